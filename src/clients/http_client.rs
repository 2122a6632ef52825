//! reqwest-backed [`Transport`] for the Shopify Admin API.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::{serialize_error, HttpError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{ApiCallLimit, HttpResponse};
use crate::clients::Transport;
use crate::config::{Credentials, ShopifyConfig};

/// Fixed retry wait time in seconds when `Retry-After` is absent.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client that talks to one shop.
///
/// The client handles:
/// - Origin selection (`https://<shop>.myshopify.com` or the `api_host` override)
/// - Authentication (access token header or basic auth)
/// - Wrapping bodies under the root key and unwrapping results
/// - Retrying 429 and 5xx responses up to `max_retries` times
/// - Tracking the latest `X-Shopify-Shop-Api-Call-Limit`
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_resources::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "/admin/master_pages.json")
///     .root_key("master_pages")
///     .build()?;
/// let pages = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    credentials: Credentials,
    default_headers: HashMap<String, String>,
    max_retries: u32,
    call_limit: Mutex<Option<ApiCallLimit>>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client for the shop in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ShopifyConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Shopify API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        // Keep routing by shop when a proxy origin is in front.
        if config.api_host().is_some() {
            default_headers.insert("Host".to_string(), config.shop().as_ref().to_string());
        }

        if let Credentials::AccessToken(token) = config.credentials() {
            default_headers.insert(
                "X-Shopify-Access-Token".to_string(),
                token.as_ref().to_string(),
            );
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_uri: config.base_uri(),
            credentials: config.credentials().clone(),
            default_headers,
            max_retries: config.max_retries(),
            call_limit: Mutex::new(None),
        })
    }

    /// Returns the origin requests are sent to.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the call limit reported by the most recent response, if any.
    #[must_use]
    pub fn call_limit(&self) -> Option<ApiCallLimit> {
        self.call_limit.lock().ok().and_then(|guard| *guard)
    }

    async fn send_once(&self, request: &HttpRequest, url: &str) -> Result<HttpResponse, HttpError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in self.default_headers.iter().chain(&request.headers) {
            req_builder = req_builder.header(key, value);
        }

        if let Credentials::Basic { api_key, password } = &self.credentials {
            req_builder = req_builder.basic_auth(api_key.as_ref(), Some(password.as_ref()));
        }

        if let Some(body) = request.wire_body() {
            req_builder = req_builder.json(&body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text).unwrap_or_else(|_| {
                // Gateways answer 5xx with HTML; keep it for the error message.
                if code >= 500 {
                    serde_json::json!({ "raw_body": body_text })
                } else {
                    serde_json::json!({})
                }
            })
        };

        Ok(HttpResponse::new(code, headers, body))
    }

    fn record_call_limit(&self, limit: ApiCallLimit) {
        tracing::debug!(
            current = limit.current,
            max = limit.max,
            remaining = limit.remaining(),
            "Shopify API call limit"
        );
        if let Ok(mut guard) = self.call_limit.lock() {
            *guard = Some(limit);
        }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// 429 honors `Retry-After`; everything else waits the fixed delay.
    ///
    /// A `Retry-After` that does not fit a [`Duration`] falls back to the
    /// fixed delay.
    fn calculate_retry_delay(response: &HttpResponse) -> Duration {
        let fixed = Duration::from_secs(RETRY_WAIT_TIME);
        if response.code != 429 {
            return fixed;
        }
        response
            .retry_request_after
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
            .unwrap_or(fixed)
    }

    /// Takes `root_key` out of a success body, or returns the whole body.
    fn unwrap_root(body: Value, root_key: Option<&str>) -> Result<Value, HttpError> {
        let Some(key) = root_key else {
            return Ok(body);
        };
        let value = match body {
            Value::Object(mut map) => map.remove(key),
            _ => None,
        };
        value.ok_or_else(|| HttpError::MissingRootKey {
            key: key.to_string(),
        })
    }
}

impl Transport for HttpClient {
    async fn request(&self, request: HttpRequest) -> Result<Value, HttpError> {
        request.verify()?;

        let url = format!("{}{}", self.base_uri, request.url);
        let tries = self.max_retries.saturating_add(1);

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            tracing::debug!(
                method = request.method.as_str(),
                url = %request.url,
                attempt,
                "Sending Shopify REST request"
            );

            let response = self.send_once(&request, &url).await?;

            if let Some(limit) = response.api_call_limit {
                self.record_call_limit(limit);
            }

            if let Some(reason) = response.deprecation_reason() {
                tracing::warn!(
                    "Deprecated request to Shopify API at {}, received reason: {}",
                    request.url,
                    reason
                );
            }

            if response.is_ok() {
                return Self::unwrap_root(response.body, request.root_key.as_deref());
            }

            if !response.is_retryable() || tries == 1 {
                return Err(HttpError::from_response(
                    response.code,
                    &response.body,
                    &request.url,
                    response.request_id(),
                ));
            }

            if attempt >= tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code: response.code,
                    tries,
                    message: serialize_error(&response.body, response.request_id()),
                    error_reference: response.request_id().map(String::from),
                }));
            }

            let delay = Self::calculate_retry_delay(&response);
            tracing::warn!(
                code = response.code,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying Shopify REST request"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ApiKey, ApiPassword, HostUrl, ShopDomain};
    use serde_json::json;

    fn token_config() -> ShopifyConfig {
        ShopifyConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("test-access-token").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_uses_shop_origin() {
        let client = HttpClient::new(&token_config()).unwrap();
        assert_eq!(client.base_uri(), "https://test-shop.myshopify.com");
        assert!(client.default_headers().get("Host").is_none());
        assert!(client.call_limit().is_none());
    }

    #[test]
    fn test_access_token_header_injection() {
        let client = HttpClient::new(&token_config()).unwrap();
        assert_eq!(
            client.default_headers().get("X-Shopify-Access-Token"),
            Some(&"test-access-token".to_string())
        );
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_basic_credentials_send_no_token_header() {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .api_key(ApiKey::new("key").unwrap())
            .password(ApiPassword::new("secret").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        assert!(client
            .default_headers()
            .get("X-Shopify-Access-Token")
            .is_none());
    }

    #[test]
    fn test_api_host_override_sets_host_header() {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("t").unwrap())
            .api_host(HostUrl::new("https://proxy.example.com").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        assert_eq!(client.base_uri(), "https://proxy.example.com");
        assert_eq!(
            client.default_headers().get("Host"),
            Some(&"test-shop.myshopify.com".to_string())
        );
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("t").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Shopify API Library v"));
    }

    #[test]
    fn test_unwrap_root_extracts_key() {
        let value =
            HttpClient::unwrap_root(json!({"master_pages": [{"id": 1}]}), Some("master_pages"))
                .unwrap();
        assert_eq!(value, json!([{"id": 1}]));
    }

    #[test]
    fn test_unwrap_root_without_key_returns_body() {
        let value = HttpClient::unwrap_root(json!({"count": 3}), None).unwrap();
        assert_eq!(value, json!({"count": 3}));
    }

    #[test]
    fn test_unwrap_root_missing_key_errors() {
        let result = HttpClient::unwrap_root(json!({}), Some("master_pages"));
        assert!(matches!(
            result,
            Err(HttpError::MissingRootKey { key }) if key == "master_pages"
        ));
    }

    #[test]
    fn test_retry_delay_falls_back_on_out_of_range_retry_after() {
        let response = HttpResponse::new(429, HashMap::new(), json!({}));
        for seconds in [f64::MAX, 1.0e300, f64::INFINITY, f64::NAN, -5.0] {
            let response = HttpResponse {
                retry_request_after: Some(seconds),
                ..response.clone()
            };
            assert_eq!(
                HttpClient::calculate_retry_delay(&response),
                Duration::from_secs(RETRY_WAIT_TIME),
                "Retry-After {seconds}"
            );
        }
    }

    #[test]
    fn test_retry_delay_honors_retry_after_only_for_429() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["2.5".to_string()]);

        let limited = HttpResponse::new(429, headers.clone(), json!({}));
        assert_eq!(
            HttpClient::calculate_retry_delay(&limited),
            Duration::from_secs_f64(2.5)
        );

        let failed = HttpResponse::new(500, headers, json!({}));
        assert_eq!(
            HttpClient::calculate_retry_delay(&failed),
            Duration::from_secs(RETRY_WAIT_TIME)
        );
    }
}
