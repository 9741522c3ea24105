//! Flutter-facing FFI crate for the CareTrack core.

pub mod api;
