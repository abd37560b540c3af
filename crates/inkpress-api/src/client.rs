//! REST client for the remote store's table API.

use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub(crate) fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

/// Percent-encode a filter value so it cannot break the query grammar
/// (commas, parentheses, and dots are significant to the filter syntax).
pub(crate) fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

/// Parse the total from a `Content-Range` header (`0-24/3573` or `*/0`).
pub(crate) fn parse_content_range_total(header: &str) -> Option<u64> {
    let total = header.rsplit('/').next()?;
    if total == "*" {
        return Some(0);
    }
    total.parse().ok()
}

/// Client for the remote store's table API.
///
/// Every request carries the project's anonymous key; when an access token
/// is attached the bearer header carries it, otherwise the anonymous key
/// doubles as the bearer (the store's row policies see an anonymous role).
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    api_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a new anonymous client.
    ///
    /// # Arguments
    /// * `api_url` - The project API URL (e.g., `https://xyz.supabase.co`)
    /// * `anon_key` - The anonymous API key
    pub fn new(api_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    /// A copy of this client that authenticates as the session behind
    /// `access_token`.
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            http_client: self.http_client.clone(),
            api_url: self.api_url.clone(),
            anon_key: self.anon_key.clone(),
            access_token: Some(access_token.into()),
        }
    }

    /// Whether this client carries a session token.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Build the REST API URL for a table.
    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.api_url, table)
    }

    /// Build the RPC URL for a stored function.
    pub(crate) fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.api_url, function)
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.http_client
            .get(url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .header("Accept", "application/json")
    }

    async fn check_status(
        response: reqwest::Response,
        context: &'static str,
    ) -> ApiResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            context,
            status,
            body_summary: summarize_response_body(&body),
        })
    }

    /// GET a filtered selection and deserialize the row set.
    pub(crate) async fn fetch_rows<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &'static str,
    ) -> ApiResult<Vec<T>> {
        let response = self.get_request(url).send().await?;
        let response = Self::check_status(response, context).await?;
        Ok(response.json().await?)
    }

    /// GET a unique-key selection; `Ok(None)` when no row matches.
    /// The URL is expected to carry `limit=1`.
    pub(crate) async fn fetch_maybe_single<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &'static str,
    ) -> ApiResult<Option<T>> {
        let rows: Vec<T> = self.fetch_rows(url, context).await?;
        Ok(rows.into_iter().next())
    }

    /// POST an insert and return the persisted row.
    pub(crate) async fn insert_returning<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        table: &str,
        body: &B,
        context: &'static str,
    ) -> ApiResult<Option<T>> {
        let response = self
            .http_client
            .post(self.rest_url(table))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let response = Self::check_status(response, context).await?;
        let rows: Vec<T> = response.json().await?;
        Ok(rows.into_iter().next())
    }

    /// POST an insert without asking for the row back.
    pub(crate) async fn insert_minimal<B: Serialize + ?Sized>(
        &self,
        table: &str,
        body: &B,
        context: &'static str,
    ) -> ApiResult<()> {
        let response = self
            .http_client
            .post(self.rest_url(table))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        Self::check_status(response, context).await?;
        Ok(())
    }

    /// PATCH the rows selected by `url` and return the first updated row.
    pub(crate) async fn update_returning<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        context: &'static str,
    ) -> ApiResult<Option<T>> {
        let response = self
            .http_client
            .patch(url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let response = Self::check_status(response, context).await?;
        let rows: Vec<T> = response.json().await?;
        Ok(rows.into_iter().next())
    }

    /// DELETE the rows selected by `url`.
    pub(crate) async fn delete_where(&self, url: &str, context: &'static str) -> ApiResult<()> {
        let response = self
            .http_client
            .delete(url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .send()
            .await?;
        Self::check_status(response, context).await?;
        Ok(())
    }

    /// Issue an exact-count HEAD query and parse the total from the
    /// `Content-Range` header.
    pub(crate) async fn count_exact(&self, url: &str, context: &'static str) -> ApiResult<u64> {
        let response = self
            .http_client
            .head(url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = Self::check_status(response, context).await?;

        response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or(ApiError::MissingCount(context))
    }

    /// POST a stored-function invocation, ignoring the response body.
    pub(crate) async fn rpc<B: Serialize + ?Sized>(
        &self,
        function: &str,
        body: &B,
        context: &'static str,
    ) -> ApiResult<()> {
        let response = self
            .http_client
            .post(self.rpc_url(function))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        Self::check_status(response, context).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_url() {
        let client = ApiClient::new("https://test.supabase.co", "test-key");
        assert_eq!(
            client.rest_url("posts"),
            "https://test.supabase.co/rest/v1/posts"
        );
    }

    #[test]
    fn test_rpc_url() {
        let client = ApiClient::new("https://test.supabase.co", "test-key");
        assert_eq!(
            client.rpc_url("increment_post_views"),
            "https://test.supabase.co/rest/v1/rpc/increment_post_views"
        );
    }

    #[test]
    fn test_bearer_prefers_access_token() {
        let client = ApiClient::new("https://test.supabase.co", "anon-key");
        assert_eq!(client.bearer(), "anon-key");
        assert!(!client.is_authenticated());

        let authed = client.with_access_token("session-jwt");
        assert_eq!(authed.bearer(), "session-jwt");
        assert!(authed.is_authenticated());
        // the original client is untouched
        assert_eq!(client.bearer(), "anon-key");
    }

    #[test]
    fn test_encode_component_passthrough() {
        assert_eq!(encode_component("hello-world_2024.x~y"), "hello-world_2024.x~y");
    }

    #[test]
    fn test_encode_component_reserved_chars() {
        assert_eq!(encode_component("a,b"), "a%2Cb");
        assert_eq!(encode_component("(x)"), "%28x%29");
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("50%"), "50%25");
    }

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("*/*"), Some(0));
        assert_eq!(parse_content_range_total("garbage"), None);
    }
}
