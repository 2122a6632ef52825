//! REST resource infrastructure.
//!
//! - **[`ResourceDescriptor`]**: name and root keys of one resource kind
//! - **[`ResourceClient`]**: `get`, `list`, `create`, `update`, `delete` and
//!   `count` over a descriptor, delegating to a [`Transport`](crate::clients::Transport)
//! - **[`QueryParams`]**: query parameters that round-trip through the URL
//! - **[`build_url`]** and **[`ResourceOperation`]**: URL and method mapping
//! - **[`resources`]**: descriptors for concrete resources
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_resources::Shopify;
//! use shopify_resources::rest::QueryParams;
//!
//! let shopify = Shopify::new(config)?;
//! let pages = shopify.section_master_page();
//!
//! let page = pages.get(42, None).await?;
//! let first_five = pages.list(Some(&QueryParams::new().with("limit", 5))).await?;
//! let total = pages.count(None).await?;
//! ```

mod path;
mod query;
mod resource;

pub mod resources;

pub use path::{build_url, ResourceOperation};
pub use query::{QueryParams, QueryValue};
pub use resource::{
    ResourceClient, ResourceDescriptor, PRESENTMENT_PRICES_HEADER, PRESENTMENT_PRICES_VALUE,
};
