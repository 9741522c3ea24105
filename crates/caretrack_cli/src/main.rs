//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `caretrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("caretrack_core ping={}", caretrack_core::ping());
    println!("caretrack_core version={}", caretrack_core::core_version());
}
