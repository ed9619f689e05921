//! Service resolution errors.

use thiserror::Error;

/// Failure to resolve a service through the builder.
///
/// All variants are reported synchronously to the caller of `get`; the
/// builder never retries.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Could not find {type_name} for use as {requested}")]
    TypeNotFound { type_name: String, requested: String },

    #[error("Failed to create {type_name} for use as {requested}: {reason}")]
    ConstructionFailed {
        type_name: String,
        requested: String,
        reason: String,
    },

    #[error("{requested} does not implement the requested capability {capability}")]
    TypeMismatch { requested: String, capability: String },
}

impl BuildError {
    /// The name the caller asked for.
    pub fn requested(&self) -> &str {
        match self {
            BuildError::TypeNotFound { requested, .. }
            | BuildError::ConstructionFailed { requested, .. }
            | BuildError::TypeMismatch { requested, .. } => requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_not_found_error() {
        let err = BuildError::TypeNotFound {
            type_name: "Bar".to_string(),
            requested: "Foo".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("Could not find Bar"));
        assert!(display.contains("as Foo"));
    }

    #[test]
    fn test_construction_failed_error() {
        let err = BuildError::ConstructionFailed {
            type_name: "Driver".to_string(),
            requested: "Driver".to_string(),
            reason: "no usable constructor".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("Failed to create Driver"));
        assert!(display.contains("no usable constructor"));
    }

    #[test]
    fn test_type_mismatch_error() {
        let err = BuildError::TypeMismatch {
            requested: "Sensor".to_string(),
            capability: "Greeter".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("Sensor"));
        assert!(display.contains("Greeter"));
    }

    #[test]
    fn test_requested() {
        let errors = vec![
            BuildError::TypeNotFound {
                type_name: "a".to_string(),
                requested: "x".to_string(),
            },
            BuildError::ConstructionFailed {
                type_name: "b".to_string(),
                requested: "x".to_string(),
                reason: "r".to_string(),
            },
            BuildError::TypeMismatch {
                requested: "x".to_string(),
                capability: "c".to_string(),
            },
        ];

        for err in errors {
            assert_eq!(err.requested(), "x");
        }
    }
}
