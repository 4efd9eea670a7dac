//! Build configuration
//!
//! Every compile-time decision made by this crate, collected into one
//! immutable value:
//!
//! - platform family and flags (with any forced mobile override)
//! - attribute dialect (alignment spelling)
//! - visibility mode
//! - whether downcasts are type-checked
//! - the framework version
//!
//! [`BuildConfig::CURRENT`] is the value for this build. Code that needs it
//! at run time takes `&BuildConfig` (usually [`BuildConfig::global`]) instead
//! of reading the individual constants, so tests can pass a different one.
//!
//! The value can be rendered as TOML for build manifests and diagnostics:
//!
//! ```toml
//! version = "0.6.0"
//! encoded_version = 600
//! family = "desktop"
//! dialect = "gnu"
//! visibility = "gnu_attribute"
//! rtti = true
//!
//! [platform]
//! is_mobile = false
//! is_android = false
//! is_ios = false
//! mobile_forced = false
//! ```

use crate::abi::{AttributeDialect, VisibilityMode};
use crate::cast::RTTI_ENABLED;
use crate::error::{Error, Result};
use crate::platform::{PlatformFamily, PlatformFlags};
use crate::version::{VersionTag, FRAMEWORK_VERSION};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static GLOBAL: Lazy<BuildConfig> = Lazy::new(|| {
    let config = BuildConfig::CURRENT;
    tracing::debug!(
        family = %config.family,
        mobile = config.platform.is_mobile,
        rtti = config.rtti,
        "resolved build configuration"
    );
    config
});

/// Resolved build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Framework version
    #[serde(with = "version_string")]
    pub version: VersionTag,
    /// Encoded framework version
    pub encoded_version: u64,
    /// Platform family of the target
    pub family: PlatformFamily,
    /// Attribute dialect used for alignment annotations
    pub dialect: AttributeDialect,
    /// Symbol visibility spelling
    pub visibility: VisibilityMode,
    /// Downcasts are type-checked
    pub rtti: bool,
    /// Platform flags
    pub platform: PlatformFlags,
}

impl BuildConfig {
    /// Configuration of this build
    pub const CURRENT: BuildConfig = BuildConfig::detect();

    /// Resolve every option from the target and enabled features
    pub const fn detect() -> Self {
        BuildConfig {
            version: FRAMEWORK_VERSION,
            encoded_version: FRAMEWORK_VERSION.encode(),
            family: PlatformFamily::detect(),
            dialect: AttributeDialect::detect(),
            visibility: VisibilityMode::detect(),
            rtti: RTTI_ENABLED,
            platform: PlatformFlags::detect(),
        }
    }

    /// Process-wide configuration, resolved on first use
    pub fn global() -> &'static BuildConfig {
        &GLOBAL
    }

    /// Check internal consistency
    ///
    /// # Errors
    /// Returns `Error::ConfigConflict` if the platform flags violate mutual
    /// exclusion, disagree with the family, the visibility mode is not one the
    /// dialect can produce, or the encoded version does not match the version
    /// triple.
    pub fn validate(&self) -> Result<()> {
        self.platform.validate()?;
        let expected = PlatformFlags::resolve(self.family, None);
        if self.platform.is_android != expected.is_android || self.platform.is_ios != expected.is_ios
        {
            return Err(Error::ConfigConflict(format!(
                "platform flags do not match family {}",
                self.family
            )));
        }
        let visibility_ok = match self.dialect {
            AttributeDialect::Gnu => matches!(
                self.visibility,
                VisibilityMode::GnuAttribute | VisibilityMode::GnuLegacy
            ),
            AttributeDialect::Msvc | AttributeDialect::Unspecified => {
                self.visibility == VisibilityMode::None
            }
        };
        if !visibility_ok {
            return Err(Error::ConfigConflict(format!(
                "visibility {:?} is not available with dialect {}",
                self.visibility, self.dialect
            )));
        }
        if self.encoded_version != self.version.encode() {
            return Err(Error::ConfigConflict(format!(
                "encoded version {} does not match {}",
                self.encoded_version, self.version
            )));
        }
        Ok(())
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns `Error::ConfigRender` if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Parse a rendered configuration and check it
    ///
    /// # Errors
    /// Returns `Error::ConfigParse` for malformed input and
    /// `Error::ConfigConflict` if the parsed flags are inconsistent.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: BuildConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Log the configuration at info level
    pub fn log_summary(&self) {
        tracing::info!(
            version = %self.version,
            family = %self.family,
            mobile = self.platform.is_mobile,
            mobile_forced = self.platform.mobile_forced,
            dialect = %self.dialect,
            visibility = ?self.visibility,
            rtti = self.rtti,
            "numkit build configuration"
        );
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::CURRENT
    }
}

mod version_string {
    use crate::version::VersionTag;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &VersionTag, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(v)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<VersionTag, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(de::Error::custom)
    }
}
