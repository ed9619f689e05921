//! Entry points generated by `declare_module!`.

use std::ffi::CStr;

use plugboard_core::module::{abi_tag, ABI_TAG};
use plugboard_core::{component, TypeRegistry};
use tracing::Dispatch;

plugboard_core::declare_module!("Test Module", "2.1");

#[component(name = "ModuleProvidedType", new = "ModuleProvidedType::default")]
#[derive(Default)]
struct ModuleProvidedType;

fn read(ptr: *const std::os::raw::c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

#[test]
fn test_module_description_and_version() {
    assert_eq!(read(plugboard_module_description()), "Test Module");
    assert_eq!(read(plugboard_module_version()), "2.1");
}

#[test]
fn test_module_abi() {
    assert_eq!(read(plugboard_module_abi()), abi_tag());
    assert_eq!(ABI_TAG.len(), abi_tag().len() + 1);
}

#[test]
fn test_module_register_forwards_submissions() {
    let registry = TypeRegistry::new();
    let count = plugboard_module_register(&registry);
    assert!(count >= 1);
    assert!(registry.contains("ModuleProvidedType"));

    assert_eq!(plugboard_module_register(&registry), 0);
}

#[test]
fn test_module_tracing_installs_once() {
    let dispatch = Dispatch::none();
    assert!(plugboard_module_tracing(&dispatch));
    assert!(!plugboard_module_tracing(&dispatch));
}
