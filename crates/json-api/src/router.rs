//! App Router

use salvo::Router;

use crate::{healthcheck, purchases, session};

/// Routes served by the API, without state or documentation.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::new().hoop(session::middleware::handler).push(
                Router::with_path("purchases/check")
                    .get(purchases::check::handler)
                    .post(purchases::check_many::handler),
            ),
        )
}
