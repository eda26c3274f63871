//! Enrol Domain Concerns

pub mod carts;
pub mod purchases;
