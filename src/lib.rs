//! # Shopify REST Resources
//!
//! Typed configuration, an async HTTP transport, and generic CRUD access to
//! Shopify Admin REST resources.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ShopifyConfig`] and [`ShopifyConfigBuilder`]
//! - Validated newtypes for credentials and domain values
//! - A [`Transport`] seam with a reqwest-backed [`HttpClient`] (auth, retries,
//!   call-limit tracking)
//! - A generic [`ResourceClient`](rest::ResourceClient) mapping
//!   `get`/`list`/`create`/`update`/`delete`/`count` onto REST endpoints
//! - The [`Shopify`] owning client with per-resource accessors
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_resources::{AccessToken, ApiVersion, ShopDomain, Shopify, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_example").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! let shopify = Shopify::new(config).unwrap();
//! assert_eq!(shopify.base_path(), "/admin/api/2025-10/");
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use shopify_resources::rest::QueryParams;
//! use serde_json::json;
//!
//! let pages = shopify.section_master_page();
//!
//! let page = pages.get(42, None).await?;
//! let some = pages.list(Some(&QueryParams::new().with("limit", 5))).await?;
//! let created = pages.create(json!({"title": "Landing"})).await?;
//! pages.update(42, json!({"title": "Renamed"})).await?;
//! pages.delete(42).await?;
//! let total = pages.count(None).await?;
//! ```
//!
//! ## Private Apps
//!
//! Basic authentication with an API key and password is also supported:
//!
//! ```rust
//! use shopify_resources::{ApiKey, ApiPassword, Credentials, ShopDomain, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .api_key(ApiKey::new("key").unwrap())
//!     .password(ApiPassword::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(matches!(config.credentials(), Credentials::Basic { .. }));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Errors pass through**: resource clients return transport errors unchanged

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

mod shopify;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiKey, ApiPassword, ApiVersion, Credentials, HostUrl, Release, ShopDomain,
    ShopifyConfig, ShopifyConfigBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiCallLimit, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
    Transport,
};

pub use shopify::Shopify;
