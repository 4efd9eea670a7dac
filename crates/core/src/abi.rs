//! Alignment and symbol visibility
//!
//! Two surfaces:
//!
//! - Rust: [`aligned!`](crate::aligned) declares types with a fixed byte
//!   alignment and [`export!`](crate::export) declares unmangled `extern "C"`
//!   functions. `Align16`/`Align32`/`Align64` wrap any value at that alignment.
//! - C headers: [`AttributeDialect`] and [`VisibilityMode`] render the
//!   attribute spelling a C/C++ compiler expects, for code generators that
//!   emit headers for the exported symbols.
//!
//! Dialect choice: MSVC targets use `__declspec`, GNU-family targets use
//! `__attribute__`, anything else gets no attribute at all.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Declare a struct with a fixed byte alignment
///
/// ```
/// numkit_core::aligned! {
///     32, pub struct Lanes([f32; 8]);
/// }
///
/// assert_eq!(std::mem::align_of::<Lanes>(), 32);
/// ```
#[macro_export]
macro_rules! aligned {
    ($align:tt, $(#[$meta:meta])* $vis:vis struct $name:ident $($rest:tt)*) => {
        $(#[$meta])*
        #[repr(C, align($align))]
        $vis struct $name $($rest)*
    };
}

/// Declare a function with a stable, unmangled C symbol
///
/// ```
/// numkit_core::export! {
///     /// Adds two indices.
///     fn demo_add(a: i64, b: i64) -> i64 {
///         a + b
///     }
/// }
///
/// assert_eq!(demo_add(2, 3), 5);
/// ```
#[macro_export]
macro_rules! export {
    ($(#[$meta:meta])* fn $name:ident ($($args:tt)*) $(-> $ret:ty)? $body:block) => {
        $(#[$meta])*
        #[no_mangle]
        pub extern "C" fn $name($($args)*) $(-> $ret)? $body
    };
}

macro_rules! aligned_wrapper {
    ($name:ident, $align:tt, $doc:literal) => {
        aligned! {
            $align,
            #[doc = $doc]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name<T>(pub T);
        }

        impl<T> $name<T> {
            /// Wrap a value
            pub const fn new(value: T) -> Self {
                $name(value)
            }

            /// Unwrap the value
            pub fn into_inner(self) -> T {
                self.0
            }
        }

        impl<T> Deref for $name<T> {
            type Target = T;

            fn deref(&self) -> &T {
                &self.0
            }
        }

        impl<T> DerefMut for $name<T> {
            fn deref_mut(&mut self) -> &mut T {
                &mut self.0
            }
        }
    };
}

aligned_wrapper!(Align16, 16, "Wraps a value at 16-byte alignment");
aligned_wrapper!(Align32, 32, "Wraps a value at 32-byte alignment");
aligned_wrapper!(Align64, 64, "Wraps a value at 64-byte (cache line) alignment");

/// Compiler attribute dialect for generated C declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeDialect {
    /// GCC/Clang `__attribute__((...))`
    Gnu,
    /// MSVC `__declspec(...)`
    Msvc,
    /// No known dialect; attributes expand to nothing
    Unspecified,
}

impl AttributeDialect {
    /// Dialect of the toolchain matching the compilation target
    pub const fn detect() -> Self {
        if cfg!(target_env = "msvc") {
            AttributeDialect::Msvc
        } else if cfg!(any(unix, target_env = "gnu")) {
            AttributeDialect::Gnu
        } else {
            AttributeDialect::Unspecified
        }
    }

    /// Attribute requesting `align`-byte alignment
    pub fn aligned_attr(&self, align: usize) -> String {
        match self {
            AttributeDialect::Gnu => format!("__attribute__((aligned({})))", align),
            AttributeDialect::Msvc => format!("__declspec(align({}))", align),
            AttributeDialect::Unspecified => String::new(),
        }
    }
}

impl fmt::Display for AttributeDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttributeDialect::Gnu => "gnu",
            AttributeDialect::Msvc => "msvc",
            AttributeDialect::Unspecified => "unspecified",
        })
    }
}

/// Check a GCC version against a minimum, the way `__GNUC_PREREQ` does
pub const fn gnuc_prereq(version: (u32, u32), major: u32, minor: u32) -> bool {
    ((version.0 as u64) << 16) + version.1 as u64 >= ((major as u64) << 16) + minor as u64
}

/// Spelling used to mark a symbol as publicly visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    /// `[[gnu::visibility("default")]]` (GCC >= 4.9, Clang)
    GnuAttribute,
    /// `__attribute__((__visibility__("default")))` for older GCC
    GnuLegacy,
    /// No annotation
    None,
}

impl VisibilityMode {
    /// Pick the spelling for a dialect and, for GNU, an optional GCC version
    ///
    /// A GNU toolchain without a version (Clang, rustc-generated headers)
    /// gets the modern spelling.
    pub const fn for_compiler(dialect: AttributeDialect, gcc_version: Option<(u32, u32)>) -> Self {
        match dialect {
            AttributeDialect::Gnu => match gcc_version {
                Some(v) if !gnuc_prereq(v, 4, 9) => VisibilityMode::GnuLegacy,
                _ => VisibilityMode::GnuAttribute,
            },
            AttributeDialect::Msvc | AttributeDialect::Unspecified => VisibilityMode::None,
        }
    }

    /// Visibility mode for the compilation target
    pub const fn detect() -> Self {
        Self::for_compiler(AttributeDialect::detect(), None)
    }

    /// Attribute text marking a declaration as exported
    pub const fn export_attr(&self) -> &'static str {
        match self {
            VisibilityMode::GnuAttribute => "[[gnu::visibility(\"default\")]]",
            VisibilityMode::GnuLegacy => "__attribute__((__visibility__(\"default\")))",
            VisibilityMode::None => "",
        }
    }
}
