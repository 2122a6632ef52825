//! The owning client: one configuration plus one transport.

use crate::clients::{HttpClient, HttpError, Transport};
use crate::config::ShopifyConfig;
use crate::rest::resources::{SectionMasterPage, SECTION_MASTER_PAGE};
use crate::rest::{ResourceClient, ResourceDescriptor};

/// Entry point for resource access on one shop.
///
/// Owns an immutable [`ShopifyConfig`] and a [`Transport`]. Resource accessors
/// borrow both, so they are cheap to create per call.
///
/// # Example
///
/// ```rust
/// use shopify_resources::{AccessToken, ShopDomain, Shopify, ShopifyConfig};
///
/// let config = ShopifyConfig::builder()
///     .shop(ShopDomain::new("my-store").unwrap())
///     .access_token(AccessToken::new("shpat_example").unwrap())
///     .presentment_prices(true)
///     .build()
///     .unwrap();
///
/// let shopify = Shopify::new(config).unwrap();
/// let pages = shopify.section_master_page();
/// assert_eq!(pages.url(Some("42"), None), "/admin/master_pages/42.json");
/// ```
#[derive(Debug)]
pub struct Shopify<T: Transport = HttpClient> {
    config: ShopifyConfig,
    transport: T,
}

impl Shopify<HttpClient> {
    /// Creates a client backed by [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: ShopifyConfig) -> Result<Self, HttpError> {
        let transport = HttpClient::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Shopify<T> {
    /// Creates a client backed by a custom transport.
    #[must_use]
    pub const fn with_transport(config: ShopifyConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ShopifyConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the path resource URLs are built under.
    #[must_use]
    pub fn base_path(&self) -> String {
        self.config.base_path()
    }

    /// Returns a client for any resource kind.
    #[must_use]
    pub const fn resource(&self, descriptor: ResourceDescriptor) -> ResourceClient<'_, T> {
        ResourceClient::new(descriptor, &self.config, &self.transport)
    }

    /// Returns the section master page client.
    #[must_use]
    pub const fn section_master_page(&self) -> SectionMasterPage<'_, T> {
        self.resource(SECTION_MASTER_PAGE)
    }
}

// Verify Shopify is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Shopify>();
};
