//! Entitlements service.

use std::collections::BTreeMap;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};

use crate::domain::purchases::{
    errors::EntitlementsError,
    models::{ContentRef, UserId},
    store::PurchaseStore,
};

/// Entitlement checks answered by a [`PurchaseStore`].
#[derive(Debug, Clone)]
pub struct StoreEntitlementsService<S> {
    store: S,
}

impl<S> StoreEntitlementsService<S> {
    /// Answer checks from `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> EntitlementsService for StoreEntitlementsService<S>
where
    S: PurchaseStore,
{
    async fn check_purchase(
        &self,
        user: &UserId,
        content: &ContentRef,
    ) -> Result<bool, EntitlementsError> {
        let record = self.store.find_completed_purchase(user, content).await?;

        // The store filters on status; re-check so a loose query can never grant access.
        let purchased = record.is_some_and(|record| record.status.grants_access());

        debug!(%user, %content, purchased, "checked purchase");

        Ok(purchased)
    }

    async fn check_many_purchases(
        &self,
        user: &UserId,
        contents: &[ContentRef],
    ) -> BTreeMap<ContentRef, bool> {
        let mut purchases = BTreeMap::new();

        for content in contents {
            if purchases.contains_key(content) {
                continue;
            }

            let purchased = match self.check_purchase(user, content).await {
                Ok(purchased) => purchased,
                Err(error) => {
                    warn!(%user, %content, "purchase check failed, treating as not purchased: {error}");

                    false
                }
            };

            purchases.insert(content.clone(), purchased);
        }

        purchases
    }
}

/// Purchase entitlement checks.
#[automock]
#[async_trait]
pub trait EntitlementsService: Send + Sync {
    /// Whether `user` has a completed purchase of `content`.
    ///
    /// `Ok(false)` means no completed purchase exists; a store failure is
    /// reported as [`EntitlementsError::StoreUnavailable`] instead.
    async fn check_purchase(
        &self,
        user: &UserId,
        content: &ContentRef,
    ) -> Result<bool, EntitlementsError>;

    /// Resolve access for each content unit independently.
    ///
    /// Units whose check fails resolve to `false`; the rest are still resolved.
    /// A post and a course sharing an id are distinct units.
    async fn check_many_purchases(
        &self,
        user: &UserId,
        contents: &[ContentRef],
    ) -> BTreeMap<ContentRef, bool>;
}
