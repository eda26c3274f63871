//! Purchases errors.

use thiserror::Error;

use crate::ids::EmptyIdentifier;

/// Failures talking to the document store that holds purchase records.
#[derive(Debug, Error)]
pub enum PurchaseStoreError {
    /// An HTTP transport, timeout or body decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-2xx response or an unexpected body.
    #[error("unexpected response from content store: {0}")]
    UnexpectedResponse(String),

    /// A purchase document was missing a required field or had an unknown value.
    #[error("malformed purchase document: {0}")]
    MalformedDocument(String),
}

/// Failures resolving whether a user owns a content unit.
#[derive(Debug, Error)]
pub enum EntitlementsError {
    /// A user or content identifier was empty.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] EmptyIdentifier),

    /// The purchase store could not answer; distinct from "not purchased".
    #[error("purchase store unavailable")]
    StoreUnavailable(#[from] PurchaseStoreError),
}
