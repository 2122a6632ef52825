//! Client configuration.
//!
//! - [`ShopifyConfig`]: immutable settings shared by every resource client
//! - [`ShopifyConfigBuilder`]: builder that validates required fields
//! - [`Credentials`]: access token or private app key/password
//! - Validated newtypes: [`ShopDomain`], [`AccessToken`], [`ApiKey`],
//!   [`ApiPassword`], [`HostUrl`]
//! - [`ApiVersion`]
//!
//! # Example
//!
//! ```rust
//! use shopify_resources::{AccessToken, ApiVersion, ShopDomain, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .api_version(ApiVersion::V2025_01)
//!     .presentment_prices(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_path(), "/admin/api/2025-01/");
//! assert!(config.presentment_prices());
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{AccessToken, ApiKey, ApiPassword, HostUrl, ShopDomain};
pub use version::{ApiVersion, Release};

use crate::error::ConfigError;

/// How requests authenticate against the Admin API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as the `X-Shopify-Access-Token` header.
    AccessToken(AccessToken),
    /// Private app credentials, sent with HTTP basic auth.
    Basic {
        /// The API key (basic auth user name).
        api_key: ApiKey,
        /// The password (basic auth password).
        password: ApiPassword,
    },
}

/// Settings for one shop connection.
///
/// The configuration is read-only once built. Resource clients read it on
/// every call, so two clients built from different configurations never
/// affect each other.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    shop: ShopDomain,
    credentials: Credentials,
    api_version: Option<ApiVersion>,
    api_host: Option<HostUrl>,
    presentment_prices: bool,
    max_retries: u32,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ShopifyConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the pinned API version, if any.
    #[must_use]
    pub const fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }

    /// Returns the host override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns whether multi-currency presentment prices are requested.
    #[must_use]
    pub const fn presentment_prices(&self) -> bool {
        self.presentment_prices
    }

    /// Returns how many times a rate limited or failed request is retried.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the per-request timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the path every resource URL is built under.
    ///
    /// `/admin/api/<version>/` with a pinned version, `/admin/` without one.
    #[must_use]
    pub fn base_path(&self) -> String {
        self.api_version
            .map_or_else(|| "/admin/".to_string(), |v| format!("/admin/api/{v}/"))
    }

    /// Returns the URL request paths are appended to.
    ///
    /// `https://<shop>`, or the whole `api_host` URL (path prefix included).
    #[must_use]
    pub fn base_uri(&self) -> String {
        self.api_host.as_ref().map_or_else(
            || format!("https://{}", self.shop.as_ref()),
            |host| host.as_str().to_string(),
        )
    }
}

// Verify ShopifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
};

/// Builder for [`ShopifyConfig`].
///
/// `shop` and one kind of credentials are required.
///
/// # Defaults
///
/// - `api_version`: `None` (unversioned `/admin/` paths)
/// - `presentment_prices`: `false`
/// - `max_retries`: `0`
/// - `timeout`: `None`
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    shop: Option<ShopDomain>,
    access_token: Option<AccessToken>,
    api_key: Option<ApiKey>,
    password: Option<ApiPassword>,
    api_version: Option<ApiVersion>,
    api_host: Option<HostUrl>,
    presentment_prices: bool,
    max_retries: u32,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Authenticates with an access token.
    ///
    /// Takes precedence over [`api_key`](Self::api_key) and
    /// [`password`](Self::password) when both are set.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the private app API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the private app password.
    #[must_use]
    pub fn password(mut self, password: ApiPassword) -> Self {
        self.password = Some(password);
        self
    }

    /// Pins the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sends requests to this origin instead of the shop's own.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Requests multi-currency presentment prices on resource reads and writes.
    #[must_use]
    pub const fn presentment_prices(mut self, enabled: bool) -> Self {
        self.presentment_prices = enabled;
        self
    }

    /// Sets how many times 429 and 5xx responses are retried.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ShopifyConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop` is not set, or
    /// if neither an access token nor both `api_key` and `password` are set.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;

        let credentials = match (self.access_token, self.api_key, self.password) {
            (Some(token), _, _) => Credentials::AccessToken(token),
            (None, Some(api_key), Some(password)) => Credentials::Basic { api_key, password },
            (None, Some(_), None) => {
                return Err(ConfigError::MissingRequiredField { field: "password" })
            }
            (None, None, _) => {
                return Err(ConfigError::MissingRequiredField {
                    field: "access_token",
                })
            }
        };

        if let Some(version) = self.api_version.filter(ApiVersion::is_deprecated) {
            tracing::warn!(
                "API version {} is outside Shopify's support window (minimum {})",
                version,
                ApiVersion::minimum_supported()
            );
        }

        Ok(ShopifyConfig {
            shop,
            credentials,
            api_version: self.api_version,
            api_host: self.api_host,
            presentment_prices: self.presentment_prices,
            max_retries: self.max_retries,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop() -> ShopDomain {
        ShopDomain::new("test-shop").unwrap()
    }

    #[test]
    fn test_builder_requires_shop() {
        let result = ShopifyConfigBuilder::new()
            .access_token(AccessToken::new("token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop" })
        ));
    }

    #[test]
    fn test_builder_requires_credentials() {
        let result = ShopifyConfig::builder().shop(shop()).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "access_token"
            })
        ));

        let result = ShopifyConfig::builder()
            .shop(shop())
            .api_key(ApiKey::new("key").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "password" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ShopifyConfig::builder()
            .shop(shop())
            .access_token(AccessToken::new("token").unwrap())
            .build()
            .unwrap();

        assert!(config.api_version().is_none());
        assert!(config.api_host().is_none());
        assert!(!config.presentment_prices());
        assert_eq!(config.max_retries(), 0);
        assert!(config.timeout().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.base_path(), "/admin/");
        assert_eq!(config.base_uri(), "https://test-shop.myshopify.com");
    }

    #[test]
    fn test_basic_credentials_from_key_and_password() {
        let config = ShopifyConfig::builder()
            .shop(shop())
            .api_key(ApiKey::new("key").unwrap())
            .password(ApiPassword::new("secret").unwrap())
            .build()
            .unwrap();

        assert!(matches!(
            config.credentials(),
            Credentials::Basic { api_key, .. } if api_key.as_ref() == "key"
        ));
    }

    #[test]
    fn test_access_token_wins_over_basic_credentials() {
        let config = ShopifyConfig::builder()
            .shop(shop())
            .api_key(ApiKey::new("key").unwrap())
            .password(ApiPassword::new("secret").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .build()
            .unwrap();

        assert!(matches!(config.credentials(), Credentials::AccessToken(_)));
    }

    #[test]
    fn test_versioned_base_path_and_host_override() {
        let config = ShopifyConfig::builder()
            .shop(shop())
            .access_token(AccessToken::new("token").unwrap())
            .api_version(ApiVersion::V2025_07)
            .api_host(HostUrl::new("http://localhost:8080/").unwrap())
            .max_retries(3)
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        assert_eq!(config.base_path(), "/admin/api/2025-07/");
        assert_eq!(config.base_uri(), "http://localhost:8080");
        assert_eq!(config.max_retries(), 3);
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_host_override_keeps_path_prefix() {
        let config = ShopifyConfig::builder()
            .shop(shop())
            .access_token(AccessToken::new("token").unwrap())
            .api_host(HostUrl::new("https://proxy.example.com/shopify/").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_uri(), "https://proxy.example.com/shopify");
        assert_eq!(config.api_host().unwrap().origin(), "https://proxy.example.com");
    }

    #[test]
    fn test_debug_output_masks_credentials() {
        let config = ShopifyConfig::builder()
            .shop(shop())
            .access_token(AccessToken::new("shpat_very_secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ShopifyConfig"));
        assert!(!debug_str.contains("shpat_very_secret"));
    }
}
