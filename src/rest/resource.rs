//! Generic CRUD access to one REST resource.
//!
//! A [`ResourceDescriptor`] names a resource kind and its JSON root keys. A
//! [`ResourceClient`] pairs a descriptor with a configuration snapshot and a
//! [`Transport`], and maps each operation to a URL, method, root key and
//! optional feature header:
//!
//! | Operation | Method | URL                          | Root key         |
//! |-----------|--------|------------------------------|------------------|
//! | `get`     | GET    | `<base><name>/<id>.json`     | `singular_key`   |
//! | `list`    | GET    | `<base><name>.json`          | `collection_key` |
//! | `create`  | POST   | `<base><name>.json`          | `singular_key`   |
//! | `update`  | PUT    | `<base><name>/<id>.json`     | `singular_key`   |
//! | `delete`  | DELETE | `<base><name>/<id>.json`     | none             |
//! | `count`   | GET    | `<base><name>/count.json`    | none             |
//!
//! The client does not retry, log, or translate errors. Whatever the
//! transport returns reaches the caller unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_resources::rest::{QueryParams, ResourceClient, ResourceDescriptor};
//! use serde_json::json;
//!
//! const THEMES: ResourceDescriptor = ResourceDescriptor::new("themes", "theme", "themes");
//!
//! let themes = ResourceClient::new(THEMES, &config, &transport);
//! let theme = themes.get(42, None).await?;
//! let page = themes.list(Some(&QueryParams::new().with("limit", 5))).await?;
//! let created = themes.create(json!({"name": "Dawn"})).await?;
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use serde_json::Value;

use crate::clients::{HttpError, HttpRequest, Transport};
use crate::config::ShopifyConfig;
use crate::rest::{build_url, QueryParams, ResourceOperation};

/// Header that opts into multi-currency presentment prices.
pub const PRESENTMENT_PRICES_HEADER: &str = "X-Shopify-Api-Features";

/// Value sent with [`PRESENTMENT_PRICES_HEADER`].
pub const PRESENTMENT_PRICES_VALUE: &str = "include-presentment-prices";

/// Immutable description of one resource kind.
///
/// # Example
///
/// ```rust
/// use shopify_resources::rest::ResourceDescriptor;
///
/// const PAGES: ResourceDescriptor = ResourceDescriptor::new("pages", "page", "pages");
/// assert_eq!(PAGES.name(), "pages");
/// assert_eq!(PAGES.singular_key(), "page");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    name: &'static str,
    singular_key: &'static str,
    collection_key: &'static str,
}

impl ResourceDescriptor {
    /// Creates a descriptor.
    ///
    /// `name` is the URL path segment. `singular_key` is the root key of
    /// single-entity responses and writes; `collection_key` is the root key of
    /// list responses.
    #[must_use]
    pub const fn new(
        name: &'static str,
        singular_key: &'static str,
        collection_key: &'static str,
    ) -> Self {
        Self {
            name,
            singular_key,
            collection_key,
        }
    }

    /// Returns the URL path segment.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the root key for single entities.
    #[must_use]
    pub const fn singular_key(&self) -> &'static str {
        self.singular_key
    }

    /// Returns the root key for collections.
    #[must_use]
    pub const fn collection_key(&self) -> &'static str {
        self.collection_key
    }

    /// Returns the root key used by `operation`, if any.
    #[must_use]
    pub const fn root_key(&self, operation: ResourceOperation) -> Option<&'static str> {
        match operation {
            ResourceOperation::Get | ResourceOperation::Create | ResourceOperation::Update => {
                Some(self.singular_key)
            }
            ResourceOperation::List => Some(self.collection_key),
            ResourceOperation::Delete | ResourceOperation::Count => None,
        }
    }
}

/// CRUD operations over one resource kind.
///
/// Holds no mutable state; concurrent calls on one client are independent.
#[derive(Debug)]
pub struct ResourceClient<'a, T: Transport> {
    descriptor: ResourceDescriptor,
    config: &'a ShopifyConfig,
    transport: &'a T,
}

impl<'a, T: Transport> ResourceClient<'a, T> {
    /// Creates a client for `descriptor`.
    #[must_use]
    pub const fn new(descriptor: ResourceDescriptor, config: &'a ShopifyConfig, transport: &'a T) -> Self {
        Self {
            descriptor,
            config,
            transport,
        }
    }

    /// Returns the resource descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    /// Returns the configuration snapshot.
    #[must_use]
    pub const fn config(&self) -> &'a ShopifyConfig {
        self.config
    }

    /// Builds the URL for an entity (`Some(id)`) or the collection (`None`).
    ///
    /// ```rust
    /// use shopify_resources::{AccessToken, HttpClient, ShopDomain, ShopifyConfig};
    /// use shopify_resources::rest::{ResourceClient, ResourceDescriptor};
    ///
    /// let config = ShopifyConfig::builder()
    ///     .shop(ShopDomain::new("my-store").unwrap())
    ///     .access_token(AccessToken::new("token").unwrap())
    ///     .build()
    ///     .unwrap();
    /// let transport = HttpClient::new(&config).unwrap();
    /// let pages = ResourceClient::new(
    ///     ResourceDescriptor::new("pages", "page", "pages"),
    ///     &config,
    ///     &transport,
    /// );
    ///
    /// assert_eq!(pages.url(Some("9"), None), "/admin/pages/9.json");
    /// ```
    #[must_use]
    pub fn url(&self, id: Option<&str>, query: Option<&QueryParams>) -> String {
        build_url(&self.config.base_path(), self.descriptor.name, id, query)
    }

    /// Fetches one entity.
    ///
    /// # Errors
    ///
    /// Returns the transport's error, e.g. [`HttpError::NotFound`] for an
    /// unknown id.
    pub async fn get<I: Display>(
        &self,
        id: I,
        query: Option<&QueryParams>,
    ) -> Result<Value, HttpError> {
        let id = id.to_string();
        self.send(ResourceOperation::Get, Some(&id), query, None).await
    }

    /// Fetches the collection.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged.
    pub async fn list(&self, query: Option<&QueryParams>) -> Result<Value, HttpError> {
        self.send(ResourceOperation::List, None, query, None).await
    }

    /// Creates an entity from `params`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Validation`] when the remote rejects `params`,
    /// or any other transport error.
    pub async fn create(&self, params: Value) -> Result<Value, HttpError> {
        self.send(ResourceOperation::Create, None, None, Some(params))
            .await
    }

    /// Updates the entity `id` with `params`.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged.
    pub async fn update<I: Display>(&self, id: I, params: Value) -> Result<Value, HttpError> {
        let id = id.to_string();
        self.send(ResourceOperation::Update, Some(&id), None, Some(params))
            .await
    }

    /// Deletes the entity `id`, returning the whole response body.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged.
    pub async fn delete<I: Display>(&self, id: I) -> Result<Value, HttpError> {
        let id = id.to_string();
        self.send(ResourceOperation::Delete, Some(&id), None, None)
            .await
    }

    /// Counts the collection.
    ///
    /// Accepts either `{"count": n}` or a bare number.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::MissingRootKey`] if the body holds no count, or
    /// the transport's error.
    pub async fn count(&self, query: Option<&QueryParams>) -> Result<u64, HttpError> {
        let body = self
            .send(
                ResourceOperation::Count,
                Some(ResourceOperation::Count.as_str()),
                query,
                None,
            )
            .await?;

        body.get("count")
            .and_then(Value::as_u64)
            .or_else(|| body.as_u64())
            .ok_or_else(|| HttpError::MissingRootKey {
                key: "count".to_string(),
            })
    }

    /// Headers `operation` carries under the current configuration.
    #[must_use]
    pub fn feature_headers(&self, operation: ResourceOperation) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        if operation.uses_feature_headers() && self.config.presentment_prices() {
            headers.insert(
                PRESENTMENT_PRICES_HEADER.to_string(),
                PRESENTMENT_PRICES_VALUE.to_string(),
            );
        }
        headers
    }

    async fn send(
        &self,
        operation: ResourceOperation,
        id: Option<&str>,
        query: Option<&QueryParams>,
        body: Option<Value>,
    ) -> Result<Value, HttpError> {
        let mut builder = HttpRequest::builder(operation.http_method(), self.url(id, query))
            .headers(self.feature_headers(operation));

        if let Some(key) = self.descriptor.root_key(operation) {
            builder = builder.root_key(key);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        self.transport.request(builder.build()?).await
    }
}
