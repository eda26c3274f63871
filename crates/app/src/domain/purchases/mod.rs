//! Purchases and content entitlements

pub mod documents;
pub mod errors;
pub mod models;
pub mod service;
pub mod store;

pub use errors::{EntitlementsError, PurchaseStoreError};
pub use service::*;
pub use store::*;
