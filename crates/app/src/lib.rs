//! Course purchase entitlements and the client-side course cart.

pub mod content_store;
pub mod context;
pub mod domain;
pub mod ids;
