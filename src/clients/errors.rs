//! Error types for requests sent through a [`Transport`](crate::clients::Transport).
//!
//! Status codes are mapped to semantic variants:
//!
//! - **404**: [`HttpError::NotFound`]
//! - **422**: [`HttpError::Validation`], with the field errors from the body
//! - **429 / 5xx after retries**: [`HttpError::MaxRetries`]
//! - **Other non-2xx**: [`HttpError::Response`]
//! - **Connection failures**: [`HttpError::Network`]
//!
//! Resource clients hand these back to the caller untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_resources::HttpError;
//!
//! match shopify.section_master_page().get(42, None).await {
//!     Ok(page) => println!("{page}"),
//!     Err(HttpError::NotFound { url, .. }) => println!("nothing at {url}"),
//!     Err(HttpError::Validation { errors, .. }) => println!("{errors:?}"),
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// A non-2xx response that has no more specific variant.
///
/// `message` holds the `errors`/`error` portion of the body serialized as
/// JSON, plus an `error_reference` line when Shopify sent a request id.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Retryable responses kept coming until the retry budget ran out.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// A request rejected before it was sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET or DELETE request carried a body.
    #[error("Cannot send data with {method}.")]
    UnexpectedBody {
        /// The HTTP method that forbids a body.
        method: String,
    },

    /// The URL does not start with `/`.
    #[error("Request URL '{url}' must be an absolute path.")]
    RelativeUrl {
        /// The offending URL.
        url: String,
    },
}

/// Unified error type for resource requests.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The addressed entity does not exist (HTTP 404).
    #[error("Not found: {url}")]
    NotFound {
        /// The request URL, relative to the shop origin.
        url: String,
        /// Reference ID for error reporting (from X-Request-Id header).
        error_reference: Option<String>,
    },

    /// The remote rejected a write payload (HTTP 422).
    #[error("Validation failed: {errors:?}")]
    Validation {
        /// Field name to messages. Messages without a field are under `base`.
        errors: HashMap<String, Vec<String>>,
        /// Reference ID for error reporting (from X-Request-Id header).
        error_reference: Option<String>,
    },

    /// Any other non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// A 2xx body did not contain the expected root key.
    #[error("Response body has no '{key}' key")]
    MissingRootKey {
        /// The root key that was expected.
        key: String,
    },

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Maps a non-2xx response to an error variant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_resources::HttpError;
    /// use serde_json::json;
    ///
    /// let error = HttpError::from_response(
    ///     422,
    ///     &json!({"errors": {"title": ["can't be blank"]}}),
    ///     "/admin/master_pages.json",
    ///     Some("req-1"),
    /// );
    /// assert!(matches!(error, HttpError::Validation { .. }));
    /// ```
    #[must_use]
    pub fn from_response(code: u16, body: &Value, url: &str, request_id: Option<&str>) -> Self {
        let error_reference = request_id.map(ToString::to_string);
        match code {
            404 => Self::NotFound {
                url: url.to_string(),
                error_reference,
            },
            422 => Self::Validation {
                errors: parse_validation_errors(body),
                error_reference,
            },
            _ => Self::Response(HttpResponseError {
                code,
                message: serialize_error(body, request_id),
                error_reference,
            }),
        }
    }

    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Validation { .. } => Some(422),
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::NotFound {
                error_reference, ..
            }
            | Self::Validation {
                error_reference, ..
            } => error_reference.as_deref(),
            Self::Response(e) => e.error_reference.as_deref(),
            Self::MaxRetries(e) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

/// Serializes the error parts of a response body, Ruby SDK style.
pub(crate) fn serialize_error(body: &Value, request_id: Option<&str>) -> String {
    let mut error_body = serde_json::Map::new();

    if let Some(errors) = body.get("errors") {
        error_body.insert("errors".to_string(), errors.clone());
    }
    if let Some(error) = body.get("error") {
        error_body.insert("error".to_string(), error.clone());
        if let Some(desc) = body.get("error_description") {
            error_body.insert("error_description".to_string(), desc.clone());
        }
    }
    if let Some(raw) = body.get("raw_body") {
        error_body.insert("raw_body".to_string(), raw.clone());
    }
    if let Some(request_id) = request_id {
        error_body.insert(
            "error_reference".to_string(),
            Value::String(format!(
                "If you report this error, please include this id: {request_id}."
            )),
        );
    }

    Value::Object(error_body).to_string()
}

/// Parses `errors` from a 422 body.
///
/// Shopify sends an object of field arrays, a bare array, or a string. The
/// last two land under `base`.
fn parse_validation_errors(body: &Value) -> HashMap<String, Vec<String>> {
    let mut result = HashMap::new();

    match body.get("errors") {
        Some(Value::Object(map)) => {
            for (field, messages) in map {
                let msgs = match messages {
                    Value::Array(arr) => arr
                        .iter()
                        .filter_map(|v| v.as_str().map(ToString::to_string))
                        .collect(),
                    Value::String(s) => vec![s.clone()],
                    other => vec![other.to_string()],
                };
                result.insert(field.clone(), msgs);
            }
        }
        Some(Value::Array(arr)) => {
            let msgs: Vec<String> = arr
                .iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect();
            if !msgs.is_empty() {
                result.insert("base".to_string(), msgs);
            }
        }
        Some(Value::String(s)) => {
            result.insert("base".to_string(), vec![s.clone()]);
        }
        _ => {}
    }

    result
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
