//! Shared handler state.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use enrol_app::{context::AppContext, domain::purchases::EntitlementsService};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) entitlements: Arc<dyn EntitlementsService>,
}

impl State {
    #[must_use]
    pub(crate) fn new(entitlements: Arc<dyn EntitlementsService>) -> Self {
        Self { entitlements }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app.entitlements))
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("State").finish_non_exhaustive()
    }
}
