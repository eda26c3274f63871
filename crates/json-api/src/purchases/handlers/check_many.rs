//! Check Many Purchases Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use enrol_app::domain::purchases::models::{ContentKind, ContentRef};

use crate::{extensions::*, purchases::errors::into_status_error, state::State};

/// Check Many Purchases Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckManyPurchasesRequest {
    /// Post ids to check
    #[serde(default)]
    pub post_ids: Vec<String>,

    /// Course ids to check
    #[serde(default)]
    pub course_ids: Vec<String>,
}

impl CheckManyPurchasesRequest {
    /// Parse the requested ids. The response is keyed by bare id, so an id
    /// may not be requested as both a post and a course.
    fn into_contents(self) -> Result<Vec<ContentRef>, StatusError> {
        let posts = self
            .post_ids
            .into_iter()
            .map(|id| ContentRef::parse(ContentKind::Post, id));

        let courses = self
            .course_ids
            .into_iter()
            .map(|id| ContentRef::parse(ContentKind::Course, id));

        let contents = posts
            .chain(courses)
            .collect::<Result<Vec<_>, _>>()
            .map_err(into_status_error)?;

        let kinds_by_id: BTreeMap<_, _> = contents
            .iter()
            .map(|content| (&content.id, content.kind))
            .collect();

        if let Some(content) = contents
            .iter()
            .find(|content| kinds_by_id.get(&content.id) != Some(&content.kind))
        {
            return Err(StatusError::bad_request().brief(format!(
                "{} is requested as both a post and a course",
                content.id
            )));
        }

        Ok(contents)
    }
}

/// Check Many Purchases Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckManyPurchasesResponse {
    /// Purchase status keyed by content id
    pub purchases: BTreeMap<String, bool>,
}

/// Check Many Purchases Handler
///
/// Resolves purchase status for several posts and courses at once. Each id
/// is checked independently; an id whose check fails reports `false`.
#[endpoint(
    tags("purchases"),
    summary = "Check Many Purchases",
    responses(
        (status_code = StatusCode::OK, description = "Purchase statuses resolved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckManyPurchasesRequest>,
    depot: &mut Depot,
) -> Result<Json<CheckManyPurchasesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let contents = json.into_inner().into_contents()?;

    let purchases = match depot.user_id() {
        Some(user) => state
            .entitlements
            .check_many_purchases(user, &contents)
            .await
            .into_iter()
            .map(|(content, purchased)| (content.id.into_string(), purchased))
            .collect(),
        None => contents
            .into_iter()
            .map(|content| (content.id.into_string(), false))
            .collect(),
    };

    Ok(Json(CheckManyPurchasesResponse { purchases }))
}
