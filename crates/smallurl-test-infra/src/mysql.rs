use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::error::{Result, TestInfraError};

const MYSQL_PORT: u16 = 3306;

#[derive(Debug, Clone, TypedBuilder)]
pub struct MySqlDatabaseConfig {
    #[builder(default = "8.4".to_string(), setter(into))]
    image_tag: String,
    #[builder(default = "smallurl".to_string(), setter(into))]
    database: String,
    #[builder(default = 5)]
    max_connections: u32,
    /// Connects can be refused for a while after the readiness log line.
    #[builder(default = 20)]
    connect_attempts: u32,
    #[builder(default = Duration::from_millis(500))]
    retry_delay: Duration,
}

impl Default for MySqlDatabaseConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A throwaway MySQL server with an open connection pool.
///
/// Dropping it stops the container.
pub struct MySqlDatabase {
    _container: ContainerAsync<GenericImage>,
    pool: MySqlPool,
}

impl MySqlDatabase {
    pub async fn start() -> Result<Self> {
        Self::start_with(MySqlDatabaseConfig::default()).await
    }

    pub async fn start_with(config: MySqlDatabaseConfig) -> Result<Self> {
        let container = GenericImage::new("mysql", config.image_tag.as_str())
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", "root")
            .start()
            .await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(MYSQL_PORT).await?;
        let url = format!("mysql://root:root@{host}:{port}/{}", config.database);

        let pool = connect(&url, &config).await?;
        Ok(Self {
            _container: container,
            pool,
        })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

async fn connect(url: &str, config: &MySqlDatabaseConfig) -> Result<MySqlPool> {
    let mut attempt = 1;
    loop {
        match MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(source) if attempt >= config.connect_attempts => {
                return Err(TestInfraError::Unreachable {
                    attempts: attempt,
                    source,
                });
            }
            Err(err) => {
                debug!(attempt, error = %err, "mysql not ready yet");
                attempt += 1;
                tokio::time::sleep(config.retry_delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_retries_for_ten_seconds() {
        let config = MySqlDatabaseConfig::default();
        assert_eq!(config.image_tag, "8.4");
        assert_eq!(config.retry_delay * config.connect_attempts, Duration::from_secs(10));
    }
}
