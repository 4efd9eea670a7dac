//! numkit - foundational compatibility layer
//!
//! The base every numkit component builds on: the framework version, the
//! canonical index and container types, compile-time platform flags,
//! alignment/visibility helpers, construct-and-own allocation, RTTI-optional
//! downcasts and compile-time skip sets.
//!
//! # Quick Start
//!
//! ```
//! use numkit::{BuildConfig, Index, OrderedMap, SkipIndices, VERSION};
//!
//! assert_eq!(VERSION, 600);
//!
//! const SKIP_INPUTS: SkipIndices<2> = SkipIndices::new([1, 3]);
//! let kept: Vec<Index> = (0..4).filter(|i| !SKIP_INPUTS.contains(*i as i32)).collect();
//! assert_eq!(kept, vec![0, 2]);
//!
//! let mut shapes: OrderedMap<&str, Vec<Index>> = OrderedMap::new();
//! shapes.insert("x", vec![2, 3]);
//!
//! let config = BuildConfig::global();
//! assert!(config.validate().is_ok());
//! ```
//!
//! # Features
//!
//! - `rtti` (default): `dynamic_cast_if_rtti` checks types; without it the
//!   cast is an unchecked reinterpret
//! - `force-mobile` / `force-desktop`: override mobile detection
//!
//! Everything lives in `numkit-core`; this crate re-exports it.

pub use numkit_core::*;
