//! The seam between resource clients and the network.

use serde_json::Value;

use crate::clients::{HttpError, HttpRequest};

/// Sends one request and resolves to the value under its root key.
///
/// On success the result is `body[root_key]`, or the whole body when the
/// request has no root key. Errors are returned as-is to the caller of the
/// resource operation; implementations own authentication, retries and rate
/// limiting.
///
/// [`HttpClient`](crate::clients::HttpClient) is the default implementation.
/// Tests and alternative stacks can provide their own:
///
/// ```rust
/// use shopify_resources::clients::{HttpError, HttpRequest, Transport};
/// use serde_json::{json, Value};
///
/// struct Canned;
///
/// impl Transport for Canned {
///     async fn request(&self, request: HttpRequest) -> Result<Value, HttpError> {
///         Ok(json!({"url": request.url}))
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends `request`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for network failures, non-2xx responses, and
    /// success bodies missing the root key.
    async fn request(&self, request: HttpRequest) -> Result<Value, HttpError>;
}
