//! Purchase store seam.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::purchases::{
    errors::PurchaseStoreError,
    models::{ContentRef, PurchaseRecord, UserId},
};

/// Document-store query capability over purchase records.
#[automock]
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Fetch the first purchase document for `user` and `content` whose status
    /// is `completed`, if any.
    async fn find_completed_purchase(
        &self,
        user: &UserId,
        content: &ContentRef,
    ) -> Result<Option<PurchaseRecord>, PurchaseStoreError>;
}
