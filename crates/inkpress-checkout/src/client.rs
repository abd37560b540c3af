//! Client for the project's invocable payment functions.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, info};

fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

/// A line item in a checkout request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

/// Request body for the create-checkout function.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    pub currency: String,
    pub payment_method_types: Vec<String>,
}

impl CheckoutRequest {
    /// A single-item card checkout in USD (the pricing page shape).
    pub fn card_usd(item: CheckoutItem) -> Self {
        Self {
            items: vec![item],
            currency: "usd".to_string(),
            payment_method_types: vec!["card".to_string()],
        }
    }
}

/// A created checkout session: the hosted page to redirect to.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    #[serde(rename = "sessionId")]
    session_id: &'a str,
}

#[derive(Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    verified: bool,
}

/// Client for the project's invocable functions endpoint.
#[derive(Clone)]
pub struct FunctionsClient {
    http_client: reqwest::Client,
    api_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl FunctionsClient {
    /// Create a new functions client.
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

    /// A copy of this client that invokes functions as the session behind
    /// `access_token`.
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            http_client: self.http_client.clone(),
            api_url: self.api_url.clone(),
            anon_key: self.anon_key.clone(),
            access_token: Some(access_token.into()),
        }
    }

    /// Build the invocation URL for a function.
    fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.api_url, name)
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    async fn invoke<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        name: &str,
        body: &B,
        context: &'static str,
    ) -> CheckoutResult<T> {
        let response = self
            .http_client
            .post(self.function_url(name))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CheckoutError::Status {
                context,
                status,
                body_summary: summarize_response_body(&body),
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        envelope
            .data
            .ok_or(CheckoutError::MalformedResponse(context))
    }

    /// Create a checkout session and return the hosted checkout URL.
    pub async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> CheckoutResult<CheckoutSession> {
        debug!(items = request.items.len(), "Creating checkout session");
        let session: CheckoutSession = self
            .invoke("create_stripe_checkout", request, "create checkout")
            .await?;
        info!("Checkout session created");
        Ok(session)
    }

    /// Verify a checkout session after the redirect back.
    ///
    /// `Ok(false)` means the processor answered and declined; an `Err` means
    /// the question could not be answered.
    pub async fn verify_payment(&self, session_id: &str) -> CheckoutResult<bool> {
        debug!("Verifying payment session");
        let response: VerifyResponse = self
            .invoke(
                "verify_stripe_payment",
                &VerifyRequest { session_id },
                "verify payment",
            )
            .await?;
        Ok(response.verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_url() {
        let client = FunctionsClient::new("https://test.supabase.co", "key");
        assert_eq!(
            client.function_url("create_stripe_checkout"),
            "https://test.supabase.co/functions/v1/create_stripe_checkout"
        );
    }

    #[test]
    fn test_bearer_prefers_access_token() {
        let client = FunctionsClient::new("https://test.supabase.co", "anon");
        assert_eq!(client.bearer(), "anon");
        assert_eq!(client.with_access_token("jwt").bearer(), "jwt");
    }

    #[test]
    fn test_checkout_request_shape() {
        let request = CheckoutRequest::card_usd(CheckoutItem {
            name: "Premium Subscription".to_string(),
            price: 9.99,
            quantity: 1,
        });

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["currency"], "usd");
        assert_eq!(json["payment_method_types"][0], "card");
        assert_eq!(json["items"][0]["name"], "Premium Subscription");
        assert_eq!(json["items"][0]["quantity"], 1);
    }

    #[test]
    fn test_verify_request_uses_camel_case_key() {
        let json = serde_json::to_value(VerifyRequest { session_id: "cs_123" }).unwrap();
        assert_eq!(json["sessionId"], "cs_123");
    }

    #[test]
    fn test_envelope_unwraps_data() {
        let json = r#"{"data":{"url":"https://checkout.stripe.com/pay/cs_123"}}"#;
        let envelope: Envelope<CheckoutSession> = serde_json::from_str(json).unwrap();
        assert_eq!(
            envelope.data.unwrap().url,
            "https://checkout.stripe.com/pay/cs_123"
        );
    }

    #[test]
    fn test_verify_response_defaults_to_unverified() {
        let response: VerifyResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.verified);

        let response: VerifyResponse = serde_json::from_str(r#"{"verified":true}"#).unwrap();
        assert!(response.verified);
    }
}
