//! Section master pages.
//!
//! The single-entity and collection root keys are both `master_pages`, and
//! every read or write except `delete` and `count` carries the presentment
//! prices header when it is enabled.

use crate::rest::{ResourceClient, ResourceDescriptor};

/// Descriptor for `/admin/master_pages`.
pub const SECTION_MASTER_PAGE: ResourceDescriptor =
    ResourceDescriptor::new("master_pages", "master_pages", "master_pages");

/// A [`ResourceClient`] over [`SECTION_MASTER_PAGE`].
pub type SectionMasterPage<'a, T> = ResourceClient<'a, T>;
