//! Concrete REST resources.
//!
//! Each resource is a [`ResourceDescriptor`](crate::rest::ResourceDescriptor)
//! constant plus a [`ResourceClient`](crate::rest::ResourceClient) alias:
//!
//! ```rust,ignore
//! use shopify_resources::rest::ResourceClient;
//! use shopify_resources::rest::resources::SECTION_MASTER_PAGE;
//!
//! let pages = ResourceClient::new(SECTION_MASTER_PAGE, &config, &transport);
//! let page = pages.get(42, None).await?;
//! ```
//!
//! [`Shopify`](crate::Shopify) exposes an accessor for each of them.

mod section_master_page;

pub use section_master_page::{SectionMasterPage, SECTION_MASTER_PAGE};
