//! Check Purchase Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use enrol_app::domain::purchases::models::{ContentKind, ContentRef};

use crate::{extensions::*, purchases::errors::into_status_error, state::State};

/// Purchase Check Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseCheckResponse {
    /// Whether the current user has a completed purchase of the content
    pub purchased: bool,
}

/// Check Purchase Handler
///
/// Checks whether the signed-in user has bought a single post or course.
/// Exactly one of the `postId` and `courseId` query parameters is required.
/// Anonymous requests are never entitled.
#[endpoint(
    tags("purchases"),
    summary = "Check Purchase",
    responses(
        (status_code = StatusCode::OK, description = "Purchase status resolved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Purchase store unavailable"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<PurchaseCheckResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let content = content_from_query(
        req.query::<String>("postId"),
        req.query::<String>("courseId"),
    )?;

    let Some(user) = depot.user_id() else {
        return Ok(Json(PurchaseCheckResponse { purchased: false }));
    };

    let purchased = state
        .entitlements
        .check_purchase(user, &content)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PurchaseCheckResponse { purchased }))
}

fn content_from_query(
    post: Option<String>,
    course: Option<String>,
) -> Result<ContentRef, StatusError> {
    match (post, course) {
        (Some(post), None) => ContentRef::parse(ContentKind::Post, post).map_err(into_status_error),
        (None, Some(course)) => {
            ContentRef::parse(ContentKind::Course, course).map_err(into_status_error)
        }
        (Some(_), Some(_)) => {
            Err(StatusError::bad_request().brief("Provide either postId or courseId, not both"))
        }
        (None, None) => Err(StatusError::bad_request().brief("postId or courseId is required")),
    }
}
