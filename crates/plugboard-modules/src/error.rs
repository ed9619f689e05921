//! Module loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Reason a library could not be loaded.
///
/// The [`ModuleLoader`](plugboard_protocols::ModuleLoader) contract reports
/// only success or failure; these details go to the log.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Module not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Module {} was built against {found}, host uses {expected}", path.display())]
    AbiMismatch {
        path: PathBuf,
        found: String,
        expected: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = LoadError::NotFound(PathBuf::from("/opt/modules/libmissing.so"));
        assert!(err.to_string().contains("/opt/modules/libmissing.so"));
    }

    #[test]
    fn test_abi_mismatch_error() {
        let err = LoadError::AbiMismatch {
            path: PathBuf::from("libold.so"),
            found: "plugboard-core/0.0.1".to_string(),
            expected: "plugboard-core/0.1.0".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("libold.so"));
        assert!(display.contains("0.0.1"));
        assert!(display.contains("0.1.0"));
    }

    #[test]
    fn test_io_error_from() {
        let err: LoadError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
