//! Error types for numkit-core
//!
//! Almost everything in this crate is resolved at compile time, so the error
//! surface is small: checked version/index conversions, parsing a rendered
//! build configuration, and the not-implemented marker.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for numkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the compatibility layer
#[derive(Debug, Error)]
pub enum Error {
    /// A minor or patch field does not fit its two decimal digits
    #[error("Version field overflow: {field} = {value} (must be < 100)")]
    VersionFieldOverflow {
        /// Name of the offending field
        field: &'static str,
        /// Value that was rejected
        value: u32,
    },

    /// Version string is not of the form `major.minor.patch`
    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    /// Value cannot be represented as the canonical index type (or back)
    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    /// Platform flags violate mutual exclusion
    #[error("Configuration conflict: {0}")]
    ConfigConflict(String),

    /// Rendered build configuration could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// Build configuration could not be rendered
    #[error("Config render error: {0}")]
    ConfigRender(String),

    /// Code path intentionally left unimplemented
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParse(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::ConfigRender(e.to_string())
    }
}

/// Return early with [`Error::NotImplemented`] from the enclosing function.
///
/// Marks code paths that exist in the API but have no implementation yet.
/// Do not leave it in finished code.
///
/// ```
/// use numkit_core::{not_implemented, Result};
///
/// fn gpu_only() -> Result<()> {
///     not_implemented!("gpu_only on this backend");
/// }
///
/// assert!(gpu_only().is_err());
/// ```
#[macro_export]
macro_rules! not_implemented {
    () => {
        $crate::not_implemented!("Not Implemented.")
    };
    ($($arg:tt)+) => {{
        let msg = ::std::format!($($arg)+);
        $crate::__private::tracing::warn!(file = ::std::file!(), line = ::std::line!(), "{}", msg);
        return ::std::result::Result::Err($crate::Error::NotImplemented(msg).into());
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_version_overflow() {
        let err = Error::VersionFieldOverflow {
            field: "minor",
            value: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("Version field overflow"));
        assert!(msg.contains("minor"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_error_display_invalid_version() {
        let err = Error::InvalidVersion("1.x".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid version"));
        assert!(msg.contains("1.x"));
    }

    #[test]
    fn test_error_display_config_conflict() {
        let err = Error::ConfigConflict("android and ios both set".to_string());
        assert!(err.to_string().contains("Configuration conflict"));
    }

    #[test]
    fn test_error_from_toml() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let err: Error = parsed.unwrap_err().into();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_error_from_toml_render() {
        // A bare value has no table to render into
        let rendered = toml::to_string(&7u32);
        let err: Error = rendered.unwrap_err().into();
        assert!(matches!(err, Error::ConfigRender(_)));
        assert!(err.to_string().starts_with("Config render error: "));
    }

    #[test]
    fn test_not_implemented_default_message() {
        fn stub() -> Result<u32> {
            not_implemented!();
        }

        match stub() {
            Err(Error::NotImplemented(msg)) => assert_eq!(msg, "Not Implemented."),
            other => panic!("Wrong result: {:?}", other),
        }
    }

    #[test]
    fn test_not_implemented_formats_message() {
        fn stub(op: &str) -> Result<()> {
            not_implemented!("operator {} has no fallback", op);
        }

        let err = stub("Conv").unwrap_err();
        assert!(err.to_string().contains("operator Conv has no fallback"));
    }
}
