//! Region extraction and import FFI functions.

use log::warn;

use super::lifecycle::ByteEngine;
use crate::automaton;

/// Copies a rectangular region of the current generation into a flat buffer.
///
/// # Layout
/// Row-major: y changes slowest, x fastest. `max_*` are exclusive and the
/// rectangle is clamped to the grid. This matches `ca_import_region`.
///
/// # Safety
/// - `ptr` must be a valid engine pointer, or null
/// - `out_buf` must point to at least `out_len` writable bytes, or be null
///
/// # Returns
/// Number of bytes written, or 0 on error (null pointer, empty region,
/// buffer too small).
#[no_mangle]
pub unsafe extern "C" fn ca_extract_region(
    ptr: *const ByteEngine,
    out_buf: *mut u8,
    out_len: usize,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let out = std::slice::from_raw_parts_mut(out_buf, out_len);
    automaton::extract_region((*ptr).current_view(), out, min_x, min_y, max_x, max_y) as u64
}

/// Copies a flat buffer into a rectangular region of the initial grid.
/// Only valid before the first step.
///
/// # Layout
/// Row-major, matching `ca_extract_region`. Values are stored as given.
///
/// # Safety
/// - `ptr` must be a valid engine pointer, or null
/// - `in_buf` must point to at least `in_len` readable bytes, or be null
///
/// # Returns
/// Number of bytes read, or 0 on error (null pointer, empty region, buffer
/// too short, engine already stepped).
#[no_mangle]
pub unsafe extern "C" fn ca_import_region(
    ptr: *mut ByteEngine,
    in_buf: *const u8,
    in_len: usize,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let grid = match (*ptr).seed_mut() {
        Ok(grid) => grid,
        Err(err) => {
            warn!("ca_import_region: {}", err);
            return 0;
        }
    };

    let input = std::slice::from_raw_parts(in_buf, in_len);
    automaton::import_region(grid, input, min_x, min_y, max_x, max_y) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::grid::{ca_get_cell, ca_set_cell, ca_step};
    use crate::ffi::lifecycle::{ca_create, ca_destroy, CA_TOPOLOGY_NORMAL};
    use std::ptr;

    #[test]
    fn test_extract_region() {
        unsafe {
            let engine = ca_create(8, 8, CA_TOPOLOGY_NORMAL, 1);
            ca_set_cell(engine, 2, 2, 255);
            ca_set_cell(engine, 3, 2, 255);

            let mut buffer = vec![0u8; 16];
            let bytes = ca_extract_region(engine, buffer.as_mut_ptr(), buffer.len(), 2, 2, 6, 6);

            assert_eq!(bytes, 16);
            assert_eq!(buffer[0], 255);
            assert_eq!(buffer[1], 255);
            assert_eq!(buffer[4], 0);

            ca_destroy(engine);
        }
    }

    #[test]
    fn test_extract_region_short_buffer() {
        unsafe {
            let engine = ca_create(8, 8, CA_TOPOLOGY_NORMAL, 1);

            let mut buffer = vec![0u8; 15];
            assert_eq!(
                ca_extract_region(engine, buffer.as_mut_ptr(), buffer.len(), 2, 2, 6, 6),
                0
            );

            ca_destroy(engine);
        }
    }

    #[test]
    fn test_import_region() {
        unsafe {
            let engine = ca_create(8, 8, CA_TOPOLOGY_NORMAL, 1);

            let mut buffer = vec![0u8; 16];
            buffer[0] = 255;
            buffer[1] = 255;

            let bytes = ca_import_region(engine, buffer.as_ptr(), buffer.len(), 2, 2, 6, 6);

            assert_eq!(bytes, 16);
            assert_eq!(ca_get_cell(engine, 2, 2), 255);
            assert_eq!(ca_get_cell(engine, 3, 2), 255);

            ca_destroy(engine);
        }
    }

    #[test]
    fn test_import_rejected_after_step() {
        unsafe {
            let engine = ca_create(4, 4, CA_TOPOLOGY_NORMAL, 1);
            ca_step(engine);

            let buffer = vec![255u8; 16];
            assert_eq!(
                ca_import_region(engine, buffer.as_ptr(), buffer.len(), 0, 0, 4, 4),
                0
            );
            assert_eq!(ca_get_cell(engine, 0, 0), 0);

            ca_destroy(engine);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            let mut buffer = vec![0u8; 16];

            assert_eq!(
                ca_extract_region(ptr::null(), buffer.as_mut_ptr(), buffer.len(), 0, 0, 4, 4),
                0
            );
            assert_eq!(
                ca_import_region(ptr::null_mut(), buffer.as_ptr(), buffer.len(), 0, 0, 4, 4),
                0
            );

            let engine = ca_create(4, 4, CA_TOPOLOGY_NORMAL, 1);
            assert_eq!(ca_extract_region(engine, ptr::null_mut(), 16, 0, 0, 4, 4), 0);
            assert_eq!(ca_import_region(engine, ptr::null(), 16, 0, 0, 4, 4), 0);
            ca_destroy(engine);
        }
    }
}
