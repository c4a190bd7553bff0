use clap::{Parser, ValueEnum};
use smallurl_core::BaseUrl;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SMALLURL_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "SMALLURL_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "SMALLURL_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "SMALLURL_MYSQL_DSN";
pub const LOG_FORMAT_ENV: &str = "SMALLURL_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "smallurl-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Scheme and host that short URLs are issued under, e.g. `https://small.ml`.
    #[arg(long, env = BASE_URL_ENV, value_parser = parse_base_url)]
    pub base_url: BaseUrl,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

fn parse_base_url(input: &str) -> Result<BaseUrl, String> {
    BaseUrl::parse(input).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_in_memory_storage() {
        let cli = Cli::try_parse_from(["smallurl-gateway", "--base-url", "https://small.ml/"])
            .unwrap();

        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.base_url, BaseUrl::new("https", "small.ml"));
        assert_eq!(cli.listen_addr, DEFAULT_LISTEN_ADDR.parse().unwrap());
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn mysql_requires_dsn() {
        let result = Cli::try_parse_from([
            "smallurl-gateway",
            "--base-url",
            "https://small.ml",
            "--storage",
            "mysql",
        ]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "smallurl-gateway",
            "--base-url",
            "https://small.ml",
            "--storage",
            "mysql",
            "--mysql-dsn",
            "mysql://u:p@localhost/smallurl",
        ])
        .unwrap();
        assert_eq!(cli.storage, StorageBackendArg::Mysql);
    }

    #[test]
    fn rejects_base_url_without_host() {
        let result = Cli::try_parse_from(["smallurl-gateway", "--base-url", "small.ml"]);
        assert!(result.is_err());
    }
}
