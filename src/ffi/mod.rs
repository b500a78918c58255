//! C FFI layer for host drivers and renderers.
//!
//! This module exports C ABI functions so a driver written in another
//! language can own the render loop. All functions are marked with
//! `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `automaton` module. These functions are thin wrappers
//! that handle null checks, pointer safety, and C-to-Rust conversions.

pub mod grid;
pub mod lifecycle;
pub mod region;

pub use grid::{ca_get_cell, ca_set_cell, ca_step};
pub use lifecycle::{
    ca_create, ca_create_from_json, ca_destroy, ca_get_generation, ca_get_height, ca_get_parity,
    ca_get_width, ByteEngine, CA_TOPOLOGY_MARGOLUS, CA_TOPOLOGY_NORMAL,
};
pub use region::{ca_extract_region, ca_import_region};
