//! Depot helper extensions.

use std::any::Any;

use enrol_app::domain::purchases::models::UserId;
use salvo::prelude::{Depot, StatusError};

/// Helpers for request-scoped values stored in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_user_id(&mut self, user: UserId);

    /// The authenticated purchaser, if the session layer identified one.
    fn user_id(&self) -> Option<&UserId>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_id(&mut self, user: UserId) {
        self.inject(user);
    }

    fn user_id(&self) -> Option<&UserId> {
        self.obtain::<UserId>().ok()
    }
}
