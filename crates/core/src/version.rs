//! Framework version encoding
//!
//! A version triple is folded into a single integer so it can be compared
//! with plain integer ordering:
//!
//! ```text
//! encoded = major * 10000 + minor * 100 + patch
//! ```
//!
//! ## Fragility
//!
//! Minor and patch each get two decimal digits. A value of 100 or more
//! silently spills into the next field and breaks ordering, e.g.
//! `(0, 1, 100)` encodes the same as `(0, 2, 0)`. [`VersionTag::new`] does not
//! guard against this; use [`VersionTag::try_new`] when the fields come from
//! outside the crate.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Major version of the framework
pub const VERSION_MAJOR: u32 = 0;
/// Minor version of the framework
pub const VERSION_MINOR: u32 = 6;
/// Patch version of the framework
pub const VERSION_PATCH: u32 = 0;

/// The framework version as a tag
pub const FRAMEWORK_VERSION: VersionTag =
    VersionTag::new(VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH);

/// The framework version as a single comparable integer
pub const VERSION: u64 = FRAMEWORK_VERSION.encode();

/// Exclusive upper bound for the minor and patch fields
pub const FIELD_LIMIT: u32 = 100;

/// A (major, minor, patch) version triple
///
/// Deserialization goes through [`VersionTag::try_new`], so overflowing
/// fields are rejected on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawVersionTag")]
pub struct VersionTag {
    /// Major version
    pub major: u32,
    /// Minor version (must be < 100 to encode correctly)
    pub minor: u32,
    /// Patch version (must be < 100 to encode correctly)
    pub patch: u32,
}

#[derive(Deserialize)]
struct RawVersionTag {
    major: u32,
    minor: u32,
    patch: u32,
}

impl TryFrom<RawVersionTag> for VersionTag {
    type Error = Error;

    fn try_from(raw: RawVersionTag) -> Result<Self> {
        VersionTag::try_new(raw.major, raw.minor, raw.patch)
    }
}

impl VersionTag {
    /// Create a version tag without range checks
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        VersionTag {
            major,
            minor,
            patch,
        }
    }

    /// Create a version tag, rejecting minor/patch values that would overflow
    ///
    /// # Errors
    /// Returns `Error::VersionFieldOverflow` if minor or patch is >= 100.
    pub fn try_new(major: u32, minor: u32, patch: u32) -> Result<Self> {
        if minor >= FIELD_LIMIT {
            return Err(Error::VersionFieldOverflow {
                field: "minor",
                value: minor,
            });
        }
        if patch >= FIELD_LIMIT {
            return Err(Error::VersionFieldOverflow {
                field: "patch",
                value: patch,
            });
        }
        Ok(Self::new(major, minor, patch))
    }

    /// Fold the triple into one integer
    #[inline]
    pub const fn encode(&self) -> u64 {
        encode(self.major, self.minor, self.patch)
    }

    /// Check whether every field fits its digit budget
    #[inline]
    pub const fn is_encodable(&self) -> bool {
        self.minor < FIELD_LIMIT && self.patch < FIELD_LIMIT
    }
}

/// Fold (major, minor, patch) into `major * 10000 + minor * 100 + patch`
#[inline]
pub const fn encode(major: u32, minor: u32, patch: u32) -> u64 {
    major as u64 * 10_000 + minor as u64 * 100 + patch as u64
}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionTag {
    /// Field-wise ordering, consistent with `Eq` for every field value
    ///
    /// Matches the order of `encode()` while minor and patch are below 100.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionTag {
    type Err = Error;

    /// Parse `major.minor.patch`, applying the same checks as `try_new`
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('.');
        let mut field = || -> Result<u32> {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .ok_or_else(|| Error::InvalidVersion(s.to_string()))
        };
        let (major, minor, patch) = (field()?, field()?, field()?);
        if parts.next().is_some() {
            return Err(Error::InvalidVersion(s.to_string()));
        }
        Self::try_new(major, minor, patch)
    }
}
