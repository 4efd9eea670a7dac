//! Platform feature detection
//!
//! Flags are derived from target cfgs at compile time:
//!
//! - `is_android`: `target_os = "android"`
//! - `is_ios`: Apple mobile targets (iOS and simulator, tvOS, watchOS,
//!   visionOS).
//!   Desktop macOS is never iOS.
//! - `is_mobile`: `is_android || is_ios`, unless the build forces it
//!
//! ## Override
//!
//! The surrounding build may force the mobile flag with the
//! `force-mobile` or `force-desktop` cargo feature. When either is set the
//! detector does not re-derive `is_mobile`; the forced value wins. The
//! family flags (`is_android`, `is_ios`) still reflect the real target.
//! Enabling both features is a configuration conflict and fails the build.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(all(feature = "force-mobile", feature = "force-desktop"))]
compile_error!("features `force-mobile` and `force-desktop` are mutually exclusive");

const TARGET_ANDROID: bool = cfg!(target_os = "android");
const TARGET_IOS: bool = cfg!(any(
    target_os = "ios",
    target_os = "tvos",
    target_os = "watchos",
    target_os = "visionos"
));
const TARGET_MACOS: bool = cfg!(target_os = "macos");

/// Mobile flag forced by the build, if any
pub const MOBILE_OVERRIDE: Option<bool> = if cfg!(feature = "force-mobile") {
    Some(true)
} else if cfg!(feature = "force-desktop") {
    Some(false)
} else {
    None
};

/// Platform flags for the target being compiled
pub const PLATFORM: PlatformFlags = PlatformFlags::detect();

/// True when compiling for a mobile target (or forced mobile)
pub const IS_MOBILE: bool = PLATFORM.is_mobile;
/// True when compiling for Android
pub const IS_ANDROID: bool = PLATFORM.is_android;
/// True when compiling for an Apple mobile target
pub const IS_IOS: bool = PLATFORM.is_ios;

// More than one platform family at once rejects the build.
const _: () = assert!(
    !(TARGET_ANDROID && TARGET_IOS),
    "target resolves to both Android and iOS"
);
const _: () = assert!(
    !(TARGET_IOS && TARGET_MACOS),
    "target resolves to both iOS and desktop macOS"
);

/// Platform family of the compilation target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformFamily {
    /// Android device or emulator
    Android,
    /// iOS, tvOS, watchOS or visionOS device or simulator
    Ios,
    /// Desktop macOS
    AppleDesktop,
    /// Any other desktop/server/embedded target
    Desktop,
}

impl PlatformFamily {
    /// Family of the target being compiled
    pub const fn detect() -> Self {
        if TARGET_ANDROID {
            PlatformFamily::Android
        } else if TARGET_IOS {
            PlatformFamily::Ios
        } else if TARGET_MACOS {
            PlatformFamily::AppleDesktop
        } else {
            PlatformFamily::Desktop
        }
    }

    /// Whether this family is a mobile platform
    pub const fn is_mobile(&self) -> bool {
        matches!(self, PlatformFamily::Android | PlatformFamily::Ios)
    }

    /// Lowercase name
    pub const fn name(&self) -> &'static str {
        match self {
            PlatformFamily::Android => "android",
            PlatformFamily::Ios => "ios",
            PlatformFamily::AppleDesktop => "apple_desktop",
            PlatformFamily::Desktop => "desktop",
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved platform flags
///
/// ## Invariants
///
/// - At most one of `is_android`, `is_ios` is true
/// - `is_mobile == is_android || is_ios` unless `mobile_forced`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformFlags {
    /// Mobile target (or forced mobile)
    pub is_mobile: bool,
    /// Android target
    pub is_android: bool,
    /// Apple mobile target
    pub is_ios: bool,
    /// `is_mobile` came from the build override rather than detection
    #[serde(default)]
    pub mobile_forced: bool,
}

impl PlatformFlags {
    /// Flags for the target being compiled
    pub const fn detect() -> Self {
        Self::resolve(PlatformFamily::detect(), MOBILE_OVERRIDE)
    }

    /// Derive flags for a family, honoring an override of the mobile flag
    ///
    /// First definition wins: a `Some` override is taken as-is and the
    /// mobile flag is not re-derived from the family.
    pub const fn resolve(family: PlatformFamily, mobile_override: Option<bool>) -> Self {
        let is_android = matches!(family, PlatformFamily::Android);
        let is_ios = matches!(family, PlatformFamily::Ios);
        let (is_mobile, mobile_forced) = match mobile_override {
            Some(forced) => (forced, true),
            None => (family.is_mobile(), false),
        };
        PlatformFlags {
            is_mobile,
            is_android,
            is_ios,
            mobile_forced,
        }
    }

    /// Check the mutual-exclusion invariants
    ///
    /// Flags produced by [`detect`](Self::detect) always pass; this guards
    /// flags that were deserialized or assembled by hand.
    ///
    /// # Errors
    /// Returns `Error::ConfigConflict` describing the violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.is_android && self.is_ios {
            return Err(Error::ConfigConflict(
                "is_android and is_ios are both set".to_string(),
            ));
        }
        if !self.mobile_forced && self.is_mobile != (self.is_android || self.is_ios) {
            return Err(Error::ConfigConflict(format!(
                "is_mobile = {} does not match is_android = {}, is_ios = {}",
                self.is_mobile, self.is_android, self.is_ios
            )));
        }
        Ok(())
    }
}

impl Default for PlatformFlags {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_FAMILIES: [PlatformFamily; 4] = [
        PlatformFamily::Android,
        PlatformFamily::Ios,
        PlatformFamily::AppleDesktop,
        PlatformFamily::Desktop,
    ];

    #[test]
    fn test_detected_flags_are_consistent() {
        assert!(PLATFORM.validate().is_ok());
        assert!(!(IS_ANDROID && IS_IOS));
        if MOBILE_OVERRIDE.is_none() {
            assert_eq!(IS_MOBILE, IS_ANDROID || IS_IOS);
        }
    }

    #[test]
    fn test_detected_family_matches_target() {
        let family = PlatformFamily::detect();
        assert_eq!(family == PlatformFamily::Android, cfg!(target_os = "android"));
        assert_eq!(family == PlatformFamily::AppleDesktop, cfg!(target_os = "macos"));
    }

    #[test]
    fn test_resolve_mutual_exclusion_for_every_family() {
        for family in ALL_FAMILIES {
            let flags = PlatformFlags::resolve(family, None);
            assert!(!(flags.is_android && flags.is_ios), "{}", family);
            assert_eq!(flags.is_mobile, flags.is_android || flags.is_ios, "{}", family);
            assert!(flags.validate().is_ok());
        }
    }

    #[test]
    fn test_apple_desktop_is_not_mobile() {
        let flags = PlatformFlags::resolve(PlatformFamily::AppleDesktop, None);
        assert!(!flags.is_ios);
        assert!(!flags.is_mobile);
    }

    #[test]
    fn test_ios_is_mobile() {
        let flags = PlatformFlags::resolve(PlatformFamily::Ios, None);
        assert!(flags.is_ios);
        assert!(!flags.is_android);
        assert!(flags.is_mobile);
    }

    #[test]
    fn test_override_wins() {
        let forced_desktop = PlatformFlags::resolve(PlatformFamily::Android, Some(false));
        assert!(forced_desktop.is_android);
        assert!(!forced_desktop.is_mobile);
        assert!(forced_desktop.mobile_forced);
        assert!(forced_desktop.validate().is_ok());

        let forced_mobile = PlatformFlags::resolve(PlatformFamily::Desktop, Some(true));
        assert!(forced_mobile.is_mobile);
        assert!(!forced_mobile.is_android && !forced_mobile.is_ios);
        assert!(forced_mobile.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_conflicts() {
        let both = PlatformFlags {
            is_mobile: true,
            is_android: true,
            is_ios: true,
            mobile_forced: false,
        };
        assert!(matches!(both.validate(), Err(Error::ConfigConflict(_))));

        let inconsistent = PlatformFlags {
            is_mobile: false,
            is_android: true,
            is_ios: false,
            mobile_forced: false,
        };
        assert!(matches!(inconsistent.validate(), Err(Error::ConfigConflict(_))));
    }

    #[test]
    fn test_apple_mobile_targets_detect_as_ios() {
        let apple_mobile = cfg!(any(
            target_os = "ios",
            target_os = "tvos",
            target_os = "watchos",
            target_os = "visionos"
        ));
        assert_eq!(IS_IOS, apple_mobile);
        assert_eq!(PlatformFamily::detect() == PlatformFamily::Ios, apple_mobile);
        if apple_mobile && MOBILE_OVERRIDE.is_none() {
            assert!(IS_MOBILE);
        }
    }
}
