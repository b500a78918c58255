//! Engine creation, destruction, and state queries.

use log::warn;

use crate::automaton::{Engine, LifeRule, Rule, SingleRotation, Topology};
use crate::config::EngineConfig;

/// The engine type exposed over the C ABI: one byte per cell.
pub type ByteEngine = Engine<u8>;

/// `topology` value for the 3x3 Game of Life engine.
pub const CA_TOPOLOGY_NORMAL: u8 = 0;
/// `topology` value for the Margolus single rotation engine.
pub const CA_TOPOLOGY_MARGOLUS: u8 = 1;

fn into_handle(engine: ByteEngine) -> *mut ByteEngine {
    Box::into_raw(Box::new(engine))
}

/// Creates an all-dead engine and returns an opaque pointer.
///
/// `topology` is `CA_TOPOLOGY_NORMAL` (Game of Life, alive = 255) or
/// `CA_TOPOLOGY_MARGOLUS` (single rotation). `num_threads == 0` means 1.
///
/// # Returns
/// A pointer to a new engine, or null on invalid configuration.
///
/// # Safety
/// The returned pointer must eventually be freed with `ca_destroy()`.
#[no_mangle]
pub extern "C" fn ca_create(width: u32, height: u32, topology: u8, num_threads: u8) -> *mut ByteEngine {
    let (topology, rule) = match topology {
        CA_TOPOLOGY_NORMAL => (Topology::Normal, Rule::cell(LifeRule::conway(255))),
        CA_TOPOLOGY_MARGOLUS => (Topology::Margolus, Rule::block(SingleRotation::new())),
        other => {
            warn!("ca_create: unknown topology {}", other);
            return std::ptr::null_mut();
        }
    };

    match Engine::new(width as usize, height as usize, topology, rule, num_threads as usize) {
        Ok(engine) => into_handle(engine),
        Err(err) => {
            warn!("ca_create: {}", err);
            std::ptr::null_mut()
        }
    }
}

/// Creates a seeded engine from a UTF-8 JSON `EngineConfig`.
///
/// # Safety
/// - `json` must point to at least `len` readable bytes, or be null
///
/// # Returns
/// A pointer to a new engine, or null if the text is not a valid config.
#[no_mangle]
pub unsafe extern "C" fn ca_create_from_json(json: *const u8, len: usize) -> *mut ByteEngine {
    if json.is_null() {
        return std::ptr::null_mut();
    }

    let bytes = std::slice::from_raw_parts(json, len);
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!("ca_create_from_json: {}", err);
            return std::ptr::null_mut();
        }
    };

    match EngineConfig::from_json(text).and_then(|config| config.build()) {
        Ok(engine) => into_handle(engine),
        Err(err) => {
            warn!("ca_create_from_json: {}", err);
            std::ptr::null_mut()
        }
    }
}

/// Destroys an engine and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `ca_create*()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn ca_destroy(ptr: *mut ByteEngine) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the current generation counter.
///
/// # Safety
/// - `ptr` must be a valid engine pointer, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ca_get_generation(ptr: *const ByteEngine) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}

/// Gets the parity the next Margolus step will use.
///
/// # Safety
/// - `ptr` must be a valid engine pointer, or null
#[no_mangle]
pub unsafe extern "C" fn ca_get_parity(ptr: *const ByteEngine) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).parity()
}

/// # Safety
/// - `ptr` must be a valid engine pointer, or null
#[no_mangle]
pub unsafe extern "C" fn ca_get_width(ptr: *const ByteEngine) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).width() as u32
}

/// # Safety
/// - `ptr` must be a valid engine pointer, or null
#[no_mangle]
pub unsafe extern "C" fn ca_get_height(ptr: *const ByteEngine) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).height() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_create_and_destroy() {
        unsafe {
            let engine = ca_create(16, 8, CA_TOPOLOGY_NORMAL, 1);
            assert!(!engine.is_null());
            assert_eq!(ca_get_width(engine), 16);
            assert_eq!(ca_get_height(engine), 8);
            assert_eq!(ca_get_generation(engine), 0);
            assert_eq!(ca_get_parity(engine), 0);

            ca_destroy(engine);
        }
    }

    #[test]
    fn test_create_rejects_bad_config() {
        assert!(ca_create(0, 8, CA_TOPOLOGY_NORMAL, 1).is_null());
        assert!(ca_create(5, 8, CA_TOPOLOGY_MARGOLUS, 1).is_null());
        assert!(ca_create(8, 8, 7, 1).is_null());
    }

    #[test]
    fn test_create_from_json() {
        let json = br#"{ "width": 10, "height": 6, "patterns": [{ "name": "glider" }] }"#;
        unsafe {
            let engine = ca_create_from_json(json.as_ptr(), json.len());
            assert!(!engine.is_null());
            assert_eq!(ca_get_width(engine), 10);
            assert_eq!((*engine).current_view().alive_count(), 5);
            ca_destroy(engine);
        }
    }

    #[test]
    fn test_create_from_bad_json() {
        let json = br#"{ "width": 10 "#;
        let not_utf8 = [0xffu8, 0xfe];
        unsafe {
            assert!(ca_create_from_json(json.as_ptr(), json.len()).is_null());
            assert!(ca_create_from_json(not_utf8.as_ptr(), not_utf8.len()).is_null());
            assert!(ca_create_from_json(ptr::null(), 4).is_null());
        }
    }

    #[test]
    fn test_null_handling() {
        unsafe {
            // Should not crash
            ca_destroy(ptr::null_mut());
            assert_eq!(ca_get_generation(ptr::null()), 0);
            assert_eq!(ca_get_parity(ptr::null()), 0);
            assert_eq!(ca_get_width(ptr::null()), 0);
            assert_eq!(ca_get_height(ptr::null()), 0);
        }
    }
}
