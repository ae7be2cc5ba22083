//! Billing service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use concise_models::PriceId;

use crate::error::{BillingError, BillingResult};
use crate::lookup::PriceLookup;

/// Path of the active price lookup endpoint.
const ACTIVE_PRICE_PATH: &str = "/v1/customers/active-price";

/// Configuration for the billing client.
#[derive(Debug, Clone)]
pub struct BillingClientConfig {
    /// Base URL of the billing service
    pub base_url: String,
    /// Bearer token sent with every request
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for BillingClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8002".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl BillingClientConfig {
    /// Create config from environment variables.
    ///
    /// Returns `None` when `BILLING_API_URL` is not set.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("BILLING_API_URL").ok()?;
        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: std::env::var("BILLING_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(
                std::env::var("BILLING_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }
}

/// Client for the billing service.
pub struct BillingClient {
    http: Client,
    config: BillingClientConfig,
}

impl BillingClient {
    /// Create a new billing client.
    pub fn new(config: BillingClientConfig) -> BillingResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(BillingError::Network)?;

        Ok(Self { http, config })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> BillingError {
        if e.is_timeout() {
            BillingError::Timeout(self.config.timeout.as_secs())
        } else {
            BillingError::Network(e)
        }
    }
}

#[async_trait]
impl PriceLookup for BillingClient {
    async fn price_id_for_active_user(&self, email: &str) -> BillingResult<Option<PriceId>> {
        let url = format!("{}{}", self.config.base_url, ACTIVE_PRICE_PATH);

        debug!("Looking up active price at {}", url);

        let response = self
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await.map_err(|e| self.map_send_error(e))?;
                parse_active_price(&serde_json::from_str(&body)?)
            }
            // Unknown customer: no subscription on file.
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::SERVICE_UNAVAILABLE => Err(BillingError::ServiceUnavailable(
                "billing service returned 503".to_string(),
            )),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(BillingError::RequestFailed(format!(
                    "Billing service returned {}: {}",
                    status, body
                )))
            }
        }
    }

    async fn health_check(&self) -> BillingResult<bool> {
        let url = format!("{}/health", self.config.base_url);

        match self.get(&url).send().await {
            Ok(response) if response.status().is_success() => Ok(true),
            Ok(response) => {
                warn!("Billing service health check failed: {}", response.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Billing service health check error: {}", e);
                Ok(false)
            }
        }
    }
}

/// Read `price_id` from an active price body. A missing, null or blank id
/// means no active plan.
fn parse_active_price(body: &Value) -> BillingResult<Option<PriceId>> {
    let Some(fields) = body.as_object() else {
        return Err(BillingError::InvalidResponse(format!(
            "expected a JSON object, got {}",
            body
        )));
    };

    match fields.get("price_id") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) if id.trim().is_empty() => Ok(None),
        Some(Value::String(id)) => Ok(Some(PriceId::from_string(id.as_str()))),
        Some(other) => Err(BillingError::InvalidResponse(format!(
            "price_id is not a string: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> BillingClient {
        BillingClient::new(BillingClientConfig {
            base_url: server.uri(),
            api_key: api_key.map(str::to_string),
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = BillingClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8002");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.api_key.is_none());
    }

    #[tokio::test]
    async fn test_returns_active_price_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ACTIVE_PRICE_PATH))
            .and(query_param("email", "pro@example.com"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"price_id": "price_123"})))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("secret"));
        let price_id = client.price_id_for_active_user("pro@example.com").await.unwrap();
        assert_eq!(price_id, Some(PriceId::from_string("price_123")));
    }

    #[tokio::test]
    async fn test_null_price_id_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ACTIVE_PRICE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"price_id": null})))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        assert_eq!(client.price_id_for_active_user("free@example.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ACTIVE_PRICE_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        assert_eq!(client.price_id_for_active_user("new@example.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_server_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ACTIVE_PRICE_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.price_id_for_active_user("pro@example.com").await.unwrap_err();
        assert!(matches!(err, BillingError::RequestFailed(ref msg) if msg.contains("boom")));
    }

    #[tokio::test]
    async fn test_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.price_id_for_active_user("pro@example.com").await.unwrap_err();
        assert_eq!(err.kind(), "unavailable");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.price_id_for_active_user("pro@example.com").await.unwrap_err();
        assert!(matches!(err, BillingError::Json(_)));
    }

    #[tokio::test]
    async fn test_non_string_price_id_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ACTIVE_PRICE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"price_id": 42})))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.price_id_for_active_user("pro@example.com").await.unwrap_err();
        assert!(matches!(err, BillingError::InvalidResponse(_)));
        assert_eq!(err.kind(), "invalid_response");
    }

    #[test]
    fn test_parse_active_price() {
        assert_eq!(parse_active_price(&json!({})).unwrap(), None);
        assert_eq!(parse_active_price(&json!({"price_id": "  "})).unwrap(), None);
        assert_eq!(
            parse_active_price(&json!({"price_id": "price_123", "status": "active"})).unwrap(),
            Some(PriceId::from_string("price_123"))
        );
        assert!(matches!(
            parse_active_price(&json!(["price_123"])),
            Err(BillingError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        assert!(client.health_check().await.unwrap());
    }
}
