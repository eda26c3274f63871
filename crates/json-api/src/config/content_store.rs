//! Content Store Config

use std::time::Duration;

use clap::Args;
use enrol_app::content_store::{ContentStoreConfig, DEFAULT_API_VERSION};

/// Content store connection settings.
#[derive(Debug, Args)]
pub struct ContentStoreSettings {
    /// Content store project id
    #[arg(long, env = "CONTENT_STORE_PROJECT_ID")]
    pub project_id: String,

    /// Dataset holding purchase documents
    #[arg(long, env = "CONTENT_STORE_DATASET", default_value = "production")]
    pub dataset: String,

    /// Query API version date
    #[arg(long, env = "CONTENT_STORE_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Read token for private datasets
    #[arg(long, env = "CONTENT_STORE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Explicit API host, overriding the project-derived one
    #[arg(long, env = "CONTENT_STORE_API_HOST")]
    pub api_host: Option<String>,

    /// Content store request timeout in seconds
    #[arg(long, env = "CONTENT_STORE_TIMEOUT_SECONDS", default_value_t = 10u64)]
    pub timeout_seconds: u64,
}

impl From<ContentStoreSettings> for ContentStoreConfig {
    fn from(settings: ContentStoreSettings) -> Self {
        Self {
            project_id: settings.project_id,
            dataset: settings.dataset,
            api_version: settings.api_version,
            token: settings.token,
            use_cdn: false,
            api_host: settings.api_host,
            timeout: Duration::from_secs(settings.timeout_seconds),
        }
    }
}
