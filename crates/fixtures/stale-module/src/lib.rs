//! A module built against some other `plugboard-core`.
//!
//! Exports only the metadata symbols, with an ABI tag no host accepts.

use std::os::raw::c_char;

#[unsafe(no_mangle)]
pub extern "C" fn plugboard_module_description() -> *const c_char {
    c"Stale Module".as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn plugboard_module_version() -> *const c_char {
    c"0.1".as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn plugboard_module_abi() -> *const c_char {
    c"plugboard-core/0.0.0".as_ptr()
}
