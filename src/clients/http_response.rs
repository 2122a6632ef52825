//! Raw responses and the Shopify headers parsed out of them.

use std::collections::HashMap;

/// Rate limit information from the `X-Shopify-Shop-Api-Call-Limit` header.
///
/// The header format is "X/Y" where X is the number of calls in the leaky
/// bucket and Y is the bucket size.
///
/// # Example
///
/// ```rust
/// use shopify_resources::clients::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("32/40").unwrap();
/// assert_eq!(limit.current, 32);
/// assert_eq!(limit.max, 40);
/// assert_eq!(limit.remaining(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// Calls currently in the bucket.
    pub current: u32,
    /// Bucket size.
    pub max: u32,
}

impl ApiCallLimit {
    /// Parses the header value. Returns `None` unless it is exactly two
    /// integers separated by `/`.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (current, max) = header_value.trim().split_once('/')?;
        Some(Self {
            current: current.parse().ok()?,
            max: max.parse().ok()?,
        })
    }

    /// Returns how many calls fit in the bucket right now.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.current)
    }
}

/// A response received by [`HttpClient`](crate::clients::HttpClient).
///
/// Header names are lower-cased; a header may carry several values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. An empty body parses to `{}`.
    pub body: serde_json::Value,
    /// From `X-Shopify-Shop-Api-Call-Limit`.
    pub api_call_limit: Option<ApiCallLimit>,
    /// Seconds to wait before retrying, from `Retry-After`. Negative or
    /// non-finite values are dropped.
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the call limit and
    /// `Retry-After` headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let first = |name: &str| headers.get(name).and_then(|values| values.first());

        let api_call_limit =
            first("x-shopify-shop-api-call-limit").and_then(|value| ApiCallLimit::parse(value));
        let retry_request_after = first("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body,
            api_call_limit,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` for 429 and 5xx responses.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code == 429 || self.code >= 500
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_and_is_retryable() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(201, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), json!({})).is_ok());

        assert!(HttpResponse::new(429, HashMap::new(), json!({})).is_retryable());
        assert!(HttpResponse::new(503, HashMap::new(), json!({})).is_retryable());
        assert!(!HttpResponse::new(422, HashMap::new(), json!({})).is_retryable());
    }

    #[test]
    fn test_api_call_limit_parsing() {
        let limit = ApiCallLimit::parse("40/80").unwrap();
        assert_eq!(limit.current, 40);
        assert_eq!(limit.max, 80);
        assert_eq!(limit.remaining(), 40);

        assert!(ApiCallLimit::parse("invalid").is_none());
        assert!(ApiCallLimit::parse("40").is_none());
        assert!(ApiCallLimit::parse("40/").is_none());
        assert!(ApiCallLimit::parse("/80").is_none());
        assert!(ApiCallLimit::parse("1/2/3").is_none());
    }

    #[test]
    fn test_remaining_saturates() {
        let limit = ApiCallLimit { current: 45, max: 40 };
        assert_eq!(limit.remaining(), 0);
    }

    #[test]
    fn test_parses_shopify_headers() {
        let response = HttpResponse::new(
            429,
            headers(&[
                ("x-shopify-shop-api-call-limit", "40/40"),
                ("retry-after", "2.0"),
                ("x-request-id", "req-1"),
                ("x-shopify-api-deprecated-reason", "use GraphQL"),
            ]),
            json!({}),
        );

        assert_eq!(
            response.api_call_limit,
            Some(ApiCallLimit { current: 40, max: 40 })
        );
        assert!((response.retry_request_after.unwrap() - 2.0).abs() < f64::EPSILON);
        assert_eq!(response.request_id(), Some("req-1"));
        assert_eq!(response.deprecation_reason(), Some("use GraphQL"));
    }

    #[test]
    fn test_missing_headers_are_none() {
        let response = HttpResponse::new(200, HashMap::new(), json!({}));
        assert!(response.api_call_limit.is_none());
        assert!(response.retry_request_after.is_none());
        assert!(response.request_id().is_none());
    }

    #[test]
    fn test_unusable_retry_after_is_dropped() {
        for value in ["1e400", "inf", "NaN", "-3", "soon"] {
            let response = HttpResponse::new(429, headers(&[("retry-after", value)]), json!({}));
            assert!(
                response.retry_request_after.is_none(),
                "Retry-After {value:?}"
            );
        }

        let response = HttpResponse::new(429, headers(&[("retry-after", " 2.5 ")]), json!({}));
        assert_eq!(response.retry_request_after, Some(2.5));
    }
}
