//! Purchase documents as returned by the content store.

use jiff::Timestamp;
use serde::Deserialize;
use tracing::debug;

use crate::domain::purchases::{
    errors::PurchaseStoreError,
    models::{ContentId, ContentKind, ContentRef, PurchaseRecord, PurchaseStatus, UserId},
};

/// Raw purchase document. Every field is optional until validated by
/// [`PurchaseDocument::into_record`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDocument {
    /// Store document id.
    #[serde(rename = "_id")]
    pub id: Option<String>,

    /// Purchaser id.
    pub user_id: Option<String>,

    /// Purchased post, for post purchases.
    pub post_id: Option<String>,

    /// Purchased course, for course purchases.
    pub course_id: Option<String>,

    /// Raw status text.
    pub status: Option<String>,

    /// Amount charged.
    pub amount: Option<f64>,

    /// RFC 3339 purchase time.
    pub purchased_at: Option<String>,

    /// Payment processor reference.
    pub external_payment_reference: Option<String>,

    /// Payment reference on documents written before `externalPaymentReference`.
    pub stripe_session_id: Option<String>,
}

impl PurchaseDocument {
    /// Validate the document into a typed record for the given content kind.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseStoreError::MalformedDocument`] when a required field is
    /// missing or empty, or when the status is not a known value.
    pub fn into_record(self, kind: ContentKind) -> Result<PurchaseRecord, PurchaseStoreError> {
        let user_id = self
            .user_id
            .as_deref()
            .map(UserId::new)
            .transpose()
            .map_err(|error| PurchaseStoreError::MalformedDocument(error.to_string()))?
            .ok_or_else(|| missing("userId"))?;

        let content_id = match kind {
            ContentKind::Post => self.post_id.as_deref(),
            ContentKind::Course => self.course_id.as_deref(),
        }
        .map(ContentId::new)
        .transpose()
        .map_err(|error| PurchaseStoreError::MalformedDocument(error.to_string()))?
        .ok_or_else(|| missing(kind.store_field()))?;

        let status = self
            .status
            .as_deref()
            .map(parse_status)
            .transpose()?
            .ok_or_else(|| missing("status"))?;

        let purchased_at = self.purchased_at.as_deref().and_then(|value| {
            value
                .parse::<Timestamp>()
                .inspect_err(|error| debug!("ignoring unparseable purchasedAt {value:?}: {error}"))
                .ok()
        });

        Ok(PurchaseRecord {
            id: self.id,
            user_id,
            content: ContentRef {
                kind,
                id: content_id,
            },
            status,
            amount: self.amount,
            purchased_at,
            external_payment_reference: self
                .external_payment_reference
                .or(self.stripe_session_id),
        })
    }
}

fn missing(field: &str) -> PurchaseStoreError {
    PurchaseStoreError::MalformedDocument(format!("missing {field}"))
}

fn parse_status(value: &str) -> Result<PurchaseStatus, PurchaseStoreError> {
    match value {
        "pending" => Ok(PurchaseStatus::Pending),
        "completed" => Ok(PurchaseStatus::Completed),
        "failed" => Ok(PurchaseStatus::Failed),
        "refunded" => Ok(PurchaseStatus::Refunded),
        other => Err(PurchaseStoreError::MalformedDocument(format!(
            "unknown status {other:?}"
        ))),
    }
}
