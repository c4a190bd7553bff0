use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use smallurl_core::{BaseUrl, Repository};
use smallurl_gateway::cli::{Cli, StorageBackendArg};
use smallurl_gateway::{logging, App, AppState};
use smallurl_generator::{BiasSettings, BiasedGenerator};
use smallurl_shortener::ShortenerService;
use smallurl_storage::{InMemoryRepository, MySqlRepository};
use tokio::net::TcpListener;
use tracing::{info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = Cli::parse();
    logging::init(config.log_format)?;

    info!(
        storage = %config.storage,
        base_url = %config.base_url,
        "starting smallurl gateway"
    );

    let generator = BiasedGenerator::new(BiasSettings::default())?;

    match config.storage {
        StorageBackendArg::InMemory => {
            serve(
                config.listen_addr,
                config.base_url,
                InMemoryRepository::new(),
                generator,
            )
            .await?
        }
        StorageBackendArg::Mysql => {
            let dsn = config
                .mysql_dsn
                .as_deref()
                .ok_or("--mysql-dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(dsn).await?;
            repository.ensure_schema().await?;
            serve(config.listen_addr, config.base_url, repository, generator).await?
        }
    }

    Ok(())
}

async fn serve<R: Repository>(
    listen_addr: SocketAddr,
    base_url: BaseUrl,
    repository: R,
    generator: BiasedGenerator,
) -> std::io::Result<()> {
    let shortener = Arc::new(ShortenerService::new(repository, generator));
    let router = App::router(AppState::new(shortener, base_url));

    let listener = TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "starting gateway server");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
