//! Purchase Handlers

pub(crate) mod check;
pub(crate) mod check_many;
