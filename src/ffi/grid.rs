//! Cell access and stepping.

use log::warn;

use super::lifecycle::ByteEngine;

/// Sets a cell of the initial grid. Coordinates wrap around the torus.
///
/// # Safety
/// - `ptr` must be a valid engine pointer, or null
///
/// # Returns
/// 0 on success, 1 on null pointer, 2 if the engine has already stepped.
#[no_mangle]
pub unsafe extern "C" fn ca_set_cell(ptr: *mut ByteEngine, x: i32, y: i32, value: u8) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    match (*ptr).seed_mut() {
        Ok(grid) => {
            grid.set_wrapped(x as isize, y as isize, value);
            0
        }
        Err(err) => {
            warn!("ca_set_cell: {}", err);
            2
        }
    }
}

/// Gets a cell of the current generation. Coordinates wrap around the torus.
///
/// # Safety
/// - `ptr` must be a valid engine pointer, or null
///
/// # Returns
/// The cell value, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ca_get_cell(ptr: *const ByteEngine, x: i32, y: i32) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).current_view().get_wrapped(x as isize, y as isize)
}

/// Advances the automaton by one generation.
///
/// # Safety
/// - `ptr` must be a valid engine pointer, or null
///
/// # Returns
/// 0 on success, 1 on null pointer, 2 if the rule failed (the current
/// generation is unchanged).
#[no_mangle]
pub unsafe extern "C" fn ca_step(ptr: *mut ByteEngine) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    match (*ptr).step() {
        Ok(()) => 0,
        Err(_) => 2,
    }
}
