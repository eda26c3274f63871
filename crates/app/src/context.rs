//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    content_store::{ContentStoreClient, ContentStoreConfig},
    domain::purchases::{EntitlementsService, PurchaseStoreError, StoreEntitlementsService},
};

/// Failures building the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The content store client could not be built.
    #[error("failed to build content store client")]
    ContentStore(#[source] PurchaseStoreError),
}

/// Services shared by every entry point.
#[derive(Clone)]
pub struct AppContext {
    /// Purchase entitlement checks.
    pub entitlements: Arc<dyn EntitlementsService>,
}

impl AppContext {
    /// Build application context backed by the content store.
    ///
    /// # Errors
    ///
    /// Returns an error when the content store client cannot be built.
    pub fn from_content_store(config: ContentStoreConfig) -> Result<Self, AppInitError> {
        let client = ContentStoreClient::new(config).map_err(AppInitError::ContentStore)?;

        Ok(Self {
            entitlements: Arc::new(StoreEntitlementsService::new(client)),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
