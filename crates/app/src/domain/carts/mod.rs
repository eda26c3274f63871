//! Carts
//!
//! The client-side, pre-checkout list of selected courses. A [`CartStore`]
//! owns the cart for one client session, mirrors it to a [`CartStorage`]
//! backend and notifies subscribers after every change.

pub mod models;
pub mod storage;
pub mod store;
mod subscribers;

pub use models::{CartItem, CartSnapshot, CourseId};
pub use storage::{CartStorage, CartStorageError, FileStorage, MemoryStorage};
pub use store::{CartStore, DEFAULT_CART_KEY};
pub use subscribers::{Subscription, SubscriptionId};
