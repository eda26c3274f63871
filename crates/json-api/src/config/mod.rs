//! Server configuration module

use clap::Parser;

use crate::config::{
    content_store::ContentStoreSettings, observability::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod content_store;
pub(crate) mod observability;
pub(crate) mod server;

pub(crate) use observability::LogFormat;

/// Enrol JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "enrol-json", about = "Enrol JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Content store connection settings.
    #[command(flatten)]
    pub content_store: ContentStoreSettings,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use enrol_app::content_store::ContentStoreConfig;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_flags_into_nested_groups() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "enrol-json",
            "--port",
            "9000",
            "--log-format",
            "json",
            "--project-id",
            "abc123",
            "--timeout-seconds",
            "3",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert!(matches!(config.logging.log_format, LogFormat::Json));

        let store: ContentStoreConfig = config.content_store.into();

        assert_eq!(store.project_id, "abc123");
        assert_eq!(store.dataset, "production");
        assert_eq!(store.timeout, Duration::from_secs(3));
        assert!(!store.use_cdn, "entitlement checks must bypass the CDN");

        Ok(())
    }
}
