//! The request handed to a [`Transport`](crate::clients::Transport).

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by REST resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read a single entity, a collection, or a count.
    Get,
    /// Create an entity.
    Post,
    /// Update an entity.
    Put,
    /// Delete an entity.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for methods that must carry a body.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// One call of the transport contract: URL, method, root key, body, headers.
///
/// `url` is the path and query relative to the shop origin, e.g.
/// `/admin/master_pages/42.json?fields=id`. `body` holds the entity fields
/// only; the transport nests them under `root_key` when sending.
///
/// # Example
///
/// ```rust
/// use shopify_resources::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "/admin/master_pages.json")
///     .root_key("master_pages")
///     .body(json!({"title": "Home"}))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.root_key.as_deref(), Some("master_pages"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// Path and query, relative to the shop origin.
    pub url: String,
    /// Key the body is nested under, and the result is read from.
    pub root_key: Option<String>,
    /// The entity fields to send, if any.
    pub body: Option<Value>,
    /// Headers added on top of the transport's defaults.
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `url` does not start with `/`
    /// - the method is POST or PUT and `body` is `None`
    /// - the method is GET or DELETE and `body` is `Some`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.url.starts_with('/') {
            return Err(InvalidHttpRequestError::RelativeUrl {
                url: self.url.clone(),
            });
        }

        match (self.method.requires_body(), self.body.is_some()) {
            (true, false) => Err(InvalidHttpRequestError::MissingBody {
                method: self.method.to_string(),
            }),
            (false, true) => Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.method.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Returns the body as sent on the wire, nested under the root key.
    #[must_use]
    pub fn wire_body(&self) -> Option<Value> {
        let body = self.body.clone()?;
        Some(match &self.root_key {
            Some(key) => {
                let mut wrapped = serde_json::Map::new();
                wrapped.insert(key.clone(), body);
                Value::Object(wrapped)
            }
            None => body,
        })
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    url: String,
    root_key: Option<String>,
    body: Option<Value>,
    headers: HashMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            root_key: None,
            body: None,
            headers: HashMap::new(),
        }
    }

    /// Sets the root key.
    #[must_use]
    pub fn root_key(mut self, key: impl Into<String>) -> Self {
        self.root_key = Some(key.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds all headers from a map.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            method: self.method,
            url: self.url,
            root_key: self.root_key,
            body: self.body,
            headers: self.headers,
        };
        request.verify()?;
        Ok(request)
    }
}
