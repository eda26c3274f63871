//! Session identity
//!
//! Authentication happens upstream; the session layer forwards the signed-in
//! user's id in [`USER_ID_HEADER`]. Requests without it are anonymous.

pub(crate) mod middleware;

pub(crate) const USER_ID_HEADER: &str = "x-user-id";
