//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use enrol_app::domain::purchases::MockEntitlementsService;

use crate::{session, state::State};

pub(crate) fn state_with_entitlements(entitlements: MockEntitlementsService) -> Arc<State> {
    Arc::new(State::new(Arc::new(entitlements)))
}

/// Serve `route` behind the session layer with `entitlements` as state.
pub(crate) fn purchases_service(entitlements: MockEntitlementsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_entitlements(entitlements)))
            .hoop(session::middleware::handler)
            .push(route),
    )
}
