//! Transport layer for Shopify REST requests.
//!
//! Resource clients never talk to the network directly. They build an
//! [`HttpRequest`] (URL, method, root key, body, headers) and hand it to a
//! [`Transport`]. [`HttpClient`] is the default transport:
//!
//! - [`Transport`]: the request contract
//! - [`HttpClient`]: reqwest implementation with auth, retries and call limits
//! - [`HttpRequest`] / [`HttpMethod`]: what is sent
//! - [`HttpResponse`] / [`ApiCallLimit`]: what came back
//! - [`HttpError`]: everything that can go wrong
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: retried after `Retry-After`, or 1 second if absent
//! - **5xx (Server Error)**: retried after a fixed 1-second delay
//! - **Other errors (4xx)**: returned immediately
//!
//! The number of retries comes from
//! [`ShopifyConfig::max_retries`](crate::ShopifyConfig::max_retries) and
//! defaults to 0.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiCallLimit, HttpResponse};
pub use transport::Transport;
