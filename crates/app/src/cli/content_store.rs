use std::time::Duration;

use clap::Args;
use enrol_app::content_store::{ContentStoreConfig, DEFAULT_API_VERSION};

/// Content store connection settings.
#[derive(Debug, Args)]
pub(crate) struct ContentStoreArgs {
    /// Content store project id
    #[arg(long, env = "CONTENT_STORE_PROJECT_ID")]
    project_id: String,

    /// Dataset holding purchase documents
    #[arg(long, env = "CONTENT_STORE_DATASET", default_value = "production")]
    dataset: String,

    /// Query API version date
    #[arg(long, env = "CONTENT_STORE_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// Read token for private datasets
    #[arg(long, env = "CONTENT_STORE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Explicit API host, overriding the project-derived one
    #[arg(long, env = "CONTENT_STORE_API_HOST")]
    api_host: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CONTENT_STORE_TIMEOUT_SECONDS", default_value_t = 10)]
    timeout_seconds: u64,
}

impl From<ContentStoreArgs> for ContentStoreConfig {
    fn from(args: ContentStoreArgs) -> Self {
        Self {
            project_id: args.project_id,
            dataset: args.dataset,
            api_version: args.api_version,
            token: args.token,
            // Entitlement checks must see fresh purchases, never the edge cache.
            use_cdn: false,
            api_host: args.api_host,
            timeout: Duration::from_secs(args.timeout_seconds),
        }
    }
}
