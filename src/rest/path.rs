//! URL building for REST resources.
//!
//! Every resource follows one layout:
//!
//! ```text
//! <base_path><name>[/<id>].json[?<query>]
//! ```
//!
//! `count` is addressed like an entity whose id is `count`.
//!
//! # Example
//!
//! ```rust
//! use shopify_resources::rest::{build_url, QueryParams};
//!
//! assert_eq!(
//!     build_url("/admin/", "master_pages", Some("42"), None),
//!     "/admin/master_pages/42.json"
//! );
//!
//! let query = QueryParams::new().with("limit", 5);
//! assert_eq!(
//!     build_url("/admin/", "master_pages", None, Some(&query)),
//!     "/admin/master_pages.json?limit=5"
//! );
//! ```

use crate::clients::HttpMethod;
use crate::rest::QueryParams;

/// Operations a REST resource supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Read one entity (GET /resources/{id}).
    Get,
    /// Read the collection (GET /resources).
    List,
    /// Create an entity (POST /resources).
    Create,
    /// Update an entity (PUT /resources/{id}).
    Update,
    /// Delete an entity (DELETE /resources/{id}).
    Delete,
    /// Count the collection (GET /resources/count).
    Count,
}

impl ResourceOperation {
    /// Returns the HTTP method for this operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::Get | Self::List | Self::Count => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns `true` if the operation carries the presentment prices
    /// feature header when it is enabled.
    #[must_use]
    pub const fn uses_feature_headers(&self) -> bool {
        matches!(self, Self::Get | Self::List | Self::Create | Self::Update)
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Count => "count",
        }
    }
}

/// Builds `<base_path><name>[/<id>].json[?<query>]`.
///
/// The id is inserted verbatim. An empty `query` adds no `?`.
#[must_use]
pub fn build_url(
    base_path: &str,
    name: &str,
    id: Option<&str>,
    query: Option<&QueryParams>,
) -> String {
    let mut url = format!("{base_path}{name}");

    if let Some(id) = id {
        url.push('/');
        url.push_str(id);
    }
    url.push_str(".json");

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(&query.to_query_string());
    }

    url
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
};
