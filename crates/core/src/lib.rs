//! Core compatibility layer for numkit
//!
//! Every other numkit crate depends on this one first. It defines:
//! - VERSION / VersionTag: the framework version as one comparable integer
//! - Index, OrderedMap, OrderedSet: canonical index type and container aliases
//! - PlatformFlags: mobile / Android / iOS flags resolved at compile time
//! - aligned!, export!, AttributeDialect, VisibilityMode: alignment and symbol visibility
//! - make_unique*: construct-and-own allocation helpers
//! - dynamic_cast_if_rtti: downcast that is checked only when the `rtti` feature is on
//! - SkipIndices, skip_indices!: compile-time index sets for fallback dispatch
//! - BuildConfig: all of the above resolved into one immutable value
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod alloc;
pub mod cast;
pub mod config;
pub mod error;
pub mod platform;
pub mod skip;
pub mod types;
pub mod version;

pub use abi::{gnuc_prereq, Align16, Align32, Align64, AttributeDialect, VisibilityMode};
pub use alloc::{make_unique, make_unique_array, make_unique_with, RuntimeExtent};
pub use cast::{
    checked_downcast, dynamic_cast_if_rtti, dynamic_cast_if_rtti_mut, ActiveCast, AsAny,
    CastStrategy, RTTI_ENABLED,
};
pub use config::BuildConfig;
pub use error::{Error, Result};
pub use platform::{
    PlatformFamily, PlatformFlags, IS_ANDROID, IS_IOS, IS_MOBILE, MOBILE_OVERRIDE, PLATFORM,
};
pub use skip::{IndexSet, NoSkip, SkipIndices};
pub use types::{to_index, to_usize, Index, OrderedMap, OrderedSet};
pub use version::{
    VersionTag, FRAMEWORK_VERSION, VERSION, VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH,
};

export! {
    /// Encoded framework version, for callers linking the C symbol
    fn numkit_version() -> u64 {
        VERSION
    }
}

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
