//! Symbols exported by loadable modules.
//!
//! A module is a `cdylib` that invokes [`declare_module!`](crate::declare_module)
//! once. The loader looks the exports up by name:
//!
//! | Symbol | Type | Required |
//! |---|---|---|
//! | `plugboard_module_description` | `extern "C" fn() -> *const c_char` | no |
//! | `plugboard_module_version` | `extern "C" fn() -> *const c_char` | no |
//! | `plugboard_module_abi` | `extern "C" fn() -> *const c_char` | no |
//! | `plugboard_module_register` | `fn(&TypeRegistry) -> usize` | no |
//! | `plugboard_module_tracing` | `fn(&tracing::Dispatch) -> bool` | no |
//!
//! The register hook hands the library's own `#[component]` submissions to
//! the host registry. The tracing hook installs the host's dispatcher in the
//! library, which links its own copy of `tracing` and would otherwise drop
//! every event. Both cross the boundary with the Rust ABI, so host and
//! module must be built by the same compiler against the same
//! `plugboard-core`; the ABI tag covers the latter.

use std::os::raw::c_char;

use crate::registry::TypeRegistry;

/// Compatibility tag compared between host and module, NUL-terminated.
pub const ABI_TAG: &str = concat!("plugboard-core/", env!("CARGO_PKG_VERSION"), "\0");

pub const DESCRIPTION_SYMBOL: &[u8] = b"plugboard_module_description\0";
pub const VERSION_SYMBOL: &[u8] = b"plugboard_module_version\0";
pub const ABI_SYMBOL: &[u8] = b"plugboard_module_abi\0";
pub const REGISTER_SYMBOL: &[u8] = b"plugboard_module_register\0";
pub const TRACING_SYMBOL: &[u8] = b"plugboard_module_tracing\0";

/// Signature of the description, version and ABI exports.
pub type InfoFn = unsafe extern "C" fn() -> *const c_char;

/// Signature of the register hook.
pub type RegisterFn = fn(&TypeRegistry) -> usize;

/// Signature of the tracing hook. Returns `false` when the library already
/// had a global dispatcher.
pub type TracingFn = fn(&tracing::Dispatch) -> bool;

/// The ABI tag without its terminator.
pub fn abi_tag() -> &'static str {
    ABI_TAG.trim_end_matches('\0')
}

/// Export the module entry points from a `cdylib`.
///
/// ```ignore
/// plugboard_core::declare_module!("Greet Application", "1.0");
/// ```
#[macro_export]
macro_rules! declare_module {
    ($description:literal, $version:literal) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn plugboard_module_description() -> *const ::std::os::raw::c_char {
            concat!($description, "\0").as_ptr().cast()
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn plugboard_module_version() -> *const ::std::os::raw::c_char {
            concat!($version, "\0").as_ptr().cast()
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn plugboard_module_abi() -> *const ::std::os::raw::c_char {
            $crate::module::ABI_TAG.as_ptr().cast()
        }

        #[unsafe(no_mangle)]
        pub fn plugboard_module_register(registry: &$crate::TypeRegistry) -> usize {
            registry.register_submitted()
        }

        #[unsafe(no_mangle)]
        pub fn plugboard_module_tracing(dispatch: &$crate::__private::tracing::Dispatch) -> bool {
            $crate::__private::tracing::dispatcher::set_global_default(dispatch.clone()).is_ok()
        }
    };
}
