//! Tests for the numkit facade crate
//!
//! Downstream crates depend on `numkit` rather than `numkit-core`; these
//! check the re-exported surface, including the exported macros.

use numkit::{not_implemented, skip_indices, BuildConfig, Error, IndexSet, Result};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

skip_indices!(GradSkips = 0);

fn cpu_fallback(position: i32) -> Result<&'static str> {
    if GradSkips::contains(position) {
        not_implemented!("no CPU fallback for position {}", position);
    }
    Ok("cpu")
}

#[test]
fn test_not_implemented_through_facade() {
    init_tracing();
    assert_eq!(cpu_fallback(1).unwrap(), "cpu");
    match cpu_fallback(0) {
        Err(Error::NotImplemented(msg)) => assert!(msg.contains("position 0")),
        other => panic!("Wrong result: {:?}", other),
    }
}

#[test]
fn test_log_summary_with_subscriber() {
    init_tracing();
    let config = BuildConfig::global();
    config.log_summary();
    assert_eq!(config.version, numkit::FRAMEWORK_VERSION);
}

numkit::aligned! {
    64, struct Scratch([f32; 16]);
}

#[test]
fn test_aligned_through_facade() {
    assert_eq!(std::mem::align_of::<Scratch>(), 64);
    let s = Scratch([0.0; 16]);
    assert_eq!(s.0.len(), 16);
}
