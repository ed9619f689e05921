//! Recognizing shared library files.

use std::path::Path;

/// Check whether `path` names a shared library for the current platform.
///
/// Only the file name is inspected: `.dll` on Windows, `.dylib`, `.so` and
/// `.bundle` on macOS, and `.so` or a versioned `.so.N[.N...]` elsewhere.
pub fn is_library_file(path: &Path) -> bool {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => has_library_extension(name),
        None => false,
    }
}

#[cfg(windows)]
fn has_library_extension(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.len() > 4 && name.ends_with(".dll")
}

#[cfg(target_os = "macos")]
fn has_library_extension(name: &str) -> bool {
    [".dylib", ".so", ".bundle"]
        .iter()
        .any(|ext| name.len() > ext.len() && name.ends_with(ext))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn has_library_extension(name: &str) -> bool {
    if name.len() > 3 && name.ends_with(".so") {
        return true;
    }
    match name.find(".so.") {
        Some(index) if index > 0 => name[index + 4..]
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())),
        _ => false,
    }
}

#[cfg(not(any(unix, windows)))]
fn has_library_extension(_name: &str) -> bool {
    false
}
