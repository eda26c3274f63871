//! Content store query client.
//!
//! Purchase records live in a hosted document store alongside posts and
//! courses. This client issues parameterised queries against its HTTP query
//! API and validates the returned documents before handing them to the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::purchases::{
    PurchaseStore, PurchaseStoreError,
    documents::PurchaseDocument,
    models::{ContentKind, ContentRef, PurchaseRecord, UserId},
};

/// Default API version date sent with every query.
pub const DEFAULT_API_VERSION: &str = "2024-01-01";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for connecting to the content store.
#[derive(Debug, Clone)]
pub struct ContentStoreConfig {
    /// Project identifier, used to derive the API host.
    pub project_id: String,

    /// Dataset holding purchase documents, e.g. `"production"`.
    pub dataset: String,

    /// API version date, e.g. `"2024-01-01"`.
    pub api_version: String,

    /// Read token. Required when the dataset is private.
    pub token: Option<String>,

    /// Query the edge cache instead of the live API.
    pub use_cdn: bool,

    /// Explicit API host, overriding the one derived from `project_id`.
    pub api_host: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ContentStoreConfig {
    /// Base URL queries are issued against, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None if self.use_cdn => format!("https://{}.apicdn.sanity.io", self.project_id),
            None => format!("https://{}.api.sanity.io", self.project_id),
        }
    }

    /// Full query endpoint for the configured dataset.
    #[must_use]
    pub fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.base_url(),
            self.api_version,
            self.dataset
        )
    }
}

/// HTTP client for the content store query API.
#[derive(Debug, Clone)]
pub struct ContentStoreClient {
    config: ContentStoreConfig,
    http: Client,
}

impl ContentStoreClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ContentStoreConfig) -> Result<Self, PurchaseStoreError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    /// Run a parameterised query and return its `result` value.
    ///
    /// Parameter values are JSON-encoded as the query API expects; they are
    /// never spliced into the query text.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx response, or an unexpected
    /// response body.
    pub async fn query(&self, query: &str, params: &[(&str, &str)]) -> Result<Value, PurchaseStoreError> {
        let mut pairs = Vec::with_capacity(params.len() + 1);

        pairs.push(("query".to_string(), query.to_string()));

        for (name, value) in params {
            pairs.push((format!("${name}"), encode_param(value)));
        }

        let mut request = self.http.get(self.config.query_url()).query(&pairs);

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PurchaseStoreError::UnexpectedResponse(format!(
                "query failed with status {status}: {text}"
            )));
        }

        let body = response.bytes().await?;

        parse_query_response(&body)
    }
}

#[async_trait]
impl PurchaseStore for ContentStoreClient {
    async fn find_completed_purchase(
        &self,
        user: &UserId,
        content: &ContentRef,
    ) -> Result<Option<PurchaseRecord>, PurchaseStoreError> {
        let query = completed_purchase_query(content.kind);

        let result = self
            .query(
                &query,
                &[("userId", user.as_str()), ("contentId", content.id.as_str())],
            )
            .await?;

        debug!(%user, %content, found = !result.is_null(), "queried purchase store");

        decode_purchase(result, content.kind)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// Query for the first completed purchase of one content unit by one user.
#[must_use]
pub fn completed_purchase_query(kind: ContentKind) -> String {
    let field = kind.store_field();

    format!(
        "*[_type == \"purchase\" && userId == $userId && {field} == $contentId && status == \"completed\"][0]\
         {{_id, userId, {field}, status, amount, purchasedAt, externalPaymentReference, stripeSessionId}}"
    )
}

fn parse_query_response(body: &[u8]) -> Result<Value, PurchaseStoreError> {
    let parsed: QueryResponse = serde_json::from_slice(body).map_err(|error| {
        PurchaseStoreError::UnexpectedResponse(format!("undecodable query response: {error}"))
    })?;

    Ok(parsed.result)
}

fn encode_param(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

fn decode_purchase(
    result: Value,
    kind: ContentKind,
) -> Result<Option<PurchaseRecord>, PurchaseStoreError> {
    if result.is_null() {
        return Ok(None);
    }

    let document: PurchaseDocument = serde_json::from_value(result)
        .map_err(|error| PurchaseStoreError::MalformedDocument(error.to_string()))?;

    document.into_record(kind).map(Some)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::purchases::models::{ContentId, PurchaseStatus};

    use super::*;

    fn config() -> ContentStoreConfig {
        ContentStoreConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token: None,
            use_cdn: false,
            api_host: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[test]
    fn query_url_is_derived_from_project() {
        assert_eq!(
            config().query_url(),
            "https://abc123.api.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn cdn_and_explicit_hosts_are_respected() {
        let cdn = ContentStoreConfig {
            use_cdn: true,
            ..config()
        };

        let explicit = ContentStoreConfig {
            api_host: Some("http://localhost:3333/".to_string()),
            ..config()
        };

        assert_eq!(cdn.base_url(), "https://abc123.apicdn.sanity.io");
        assert_eq!(explicit.base_url(), "http://localhost:3333");
    }

    #[test]
    fn query_filters_on_kind_field_and_completed_status() {
        let post_query = completed_purchase_query(ContentKind::Post);
        let course_query = completed_purchase_query(ContentKind::Course);

        assert!(post_query.contains("postId == $contentId"), "{post_query}");
        assert!(course_query.contains("courseId == $contentId"), "{course_query}");
        assert!(post_query.contains("status == \"completed\""), "{post_query}");
        assert!(post_query.contains("userId == $userId"), "{post_query}");
    }

    #[test]
    fn params_are_json_encoded() {
        assert_eq!(encode_param("u1"), "\"u1\"");
        assert_eq!(encode_param("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn null_result_decodes_to_none() -> TestResult {
        assert!(decode_purchase(Value::Null, ContentKind::Post)?.is_none());

        Ok(())
    }

    #[test]
    fn document_result_decodes_to_record() -> TestResult {
        let record = decode_purchase(
            json!({ "userId": "u1", "courseId": "c1", "status": "completed" }),
            ContentKind::Course,
        )?;

        let record = record.ok_or("expected a record")?;

        assert_eq!(record.status, PurchaseStatus::Completed);
        assert_eq!(record.content.id, ContentId::new("c1")?);

        Ok(())
    }

    #[test]
    fn projected_result_with_both_payment_keys_decodes() -> TestResult {
        let record = decode_purchase(
            json!({
                "_id": "purchase-1",
                "userId": "u1",
                "postId": "p42",
                "status": "completed",
                "amount": null,
                "purchasedAt": null,
                "externalPaymentReference": null,
                "stripeSessionId": "cs_test_123"
            }),
            ContentKind::Post,
        )?
        .ok_or("expected a record")?;

        assert_eq!(record.status, PurchaseStatus::Completed);
        assert_eq!(record.external_payment_reference.as_deref(), Some("cs_test_123"));

        Ok(())
    }

    #[test]
    fn non_object_result_is_malformed() {
        let result = decode_purchase(json!(["not", "a", "document"]), ContentKind::Post);

        assert!(
            matches!(result, Err(PurchaseStoreError::MalformedDocument(_))),
            "expected MalformedDocument, got {result:?}"
        );
    }

    #[test]
    fn query_response_without_result_is_null() -> TestResult {
        assert_eq!(parse_query_response(br#"{"ms": 3}"#)?, Value::Null);

        Ok(())
    }

    #[test]
    fn undecodable_query_response_is_unexpected() {
        let result = parse_query_response(b"<html>bad gateway</html>");

        assert!(
            matches!(result, Err(PurchaseStoreError::UnexpectedResponse(_))),
            "expected UnexpectedResponse, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unreachable_store_is_an_http_error() -> TestResult {
        let client = ContentStoreClient::new(ContentStoreConfig {
            api_host: Some("http://127.0.0.1:9".to_string()),
            timeout: Duration::from_secs(2),
            ..config()
        })?;

        let user = UserId::new("u1")?;
        let content = ContentRef::post(ContentId::new("p1")?);

        let result = client.find_completed_purchase(&user, &content).await;

        assert!(
            matches!(result, Err(PurchaseStoreError::Http(_))),
            "expected Http error, got {result:?}"
        );

        Ok(())
    }
}
