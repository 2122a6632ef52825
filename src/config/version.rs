//! Shopify API version identifiers.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A Shopify Admin API version.
///
/// Shopify releases a dated version every quarter (January, April, July,
/// October). `Unstable` addresses the in-development API.
///
/// # Example
///
/// ```rust
/// use shopify_resources::ApiVersion;
///
/// let version: ApiVersion = "2024-10".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2024_10);
/// assert_eq!(version.to_string(), "2024-10");
/// assert!(ApiVersion::Unstable > ApiVersion::latest());
/// assert!(ApiVersion::dated(2025, 13).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    /// A quarterly release, e.g. `2025-01`.
    Dated(Release),
    /// The unstable API.
    Unstable,
}

/// A quarterly release date. Only built through [`ApiVersion::dated`] or
/// parsing, so the month is always 1, 4, 7 or 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Release {
    year: u16,
    month: u8,
}

impl Release {
    /// Release year.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Release month: 1, 4, 7 or 10.
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }
}

impl ApiVersion {
    /// API version 2024-10.
    pub const V2024_10: Self = Self::Dated(Release {
        year: 2024,
        month: 10,
    });
    /// API version 2025-01.
    pub const V2025_01: Self = Self::Dated(Release {
        year: 2025,
        month: 1,
    });
    /// API version 2025-04.
    pub const V2025_04: Self = Self::Dated(Release {
        year: 2025,
        month: 4,
    });
    /// API version 2025-07.
    pub const V2025_07: Self = Self::Dated(Release {
        year: 2025,
        month: 7,
    });
    /// API version 2025-10.
    pub const V2025_10: Self = Self::Dated(Release {
        year: 2025,
        month: 10,
    });

    /// Creates a dated version.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] unless `month` is 1, 4, 7
    /// or 10 and `year` has four digits.
    pub fn dated(year: u16, month: u8) -> Result<Self, ConfigError> {
        if !(1000..=9999).contains(&year) || !matches!(month, 1 | 4 | 7 | 10) {
            return Err(ConfigError::InvalidApiVersion {
                version: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self::Dated(Release { year, month }))
    }

    /// Returns the latest stable API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10
    }

    /// Returns the oldest version still inside Shopify's support window.
    #[must_use]
    pub const fn minimum_supported() -> Self {
        Self::V2025_01
    }

    /// Returns `true` for dated releases.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::Dated(_))
    }

    /// Returns `true` if this dated version is older than
    /// [`minimum_supported`](Self::minimum_supported).
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.is_stable() && *self < Self::minimum_supported()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dated(release) => write!(f, "{:04}-{:02}", release.year, release.month),
            Self::Unstable => f.write_str("unstable"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "unstable" {
            return Ok(Self::Unstable);
        }

        let invalid = || ConfigError::InvalidApiVersion { version: s.clone() };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: u16 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;

        Self::dated(year, month).map_err(|_| invalid())
    }
}
