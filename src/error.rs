//! Unified error types for data-validation.
//!
//! Validators report their own narrow error types (see [`crate::validators`]);
//! this module wraps them, together with store and I/O failures, into a single
//! hierarchy with chained context for the command handlers.

use crate::validators::{JsonArgError, LabelError, ThresholdError};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for data-validation operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DataValidationError {
    /// A user-supplied argument failed validation
    #[error("Invalid argument: {context}")]
    Argument {
        context: String,
        #[source]
        source: ArgumentErrorKind,
    },

    /// Errors from the connection store
    #[error("Connection store error: {context}")]
    Store {
        context: String,
        #[source]
        source: StoreErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// An assembled configuration object is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to serialize a configuration object
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Specific argument error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ArgumentErrorKind {
    #[error(transparent)]
    Threshold(#[from] ThresholdError),

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    Json(#[from] JsonArgError),
}

/// Specific store error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreErrorKind {
    #[error("connection '{0}' not found")]
    NotFound(String),

    #[error("invalid connection name '{0}'")]
    InvalidName(String),

    #[error("stored record for '{name}' is corrupt: {reason}")]
    Corrupt { name: String, reason: String },

    #[error("no configuration directory could be determined")]
    NoConfigDir,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for data-validation operations
pub type Result<T> = std::result::Result<T, DataValidationError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl DataValidationError {
    /// Create an argument error with context
    pub fn argument(context: impl Into<String>, source: impl Into<ArgumentErrorKind>) -> Self {
        Self::Argument {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Create a store error with context
    pub fn store(context: impl Into<String>, source: StoreErrorKind) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error stems from bad user input rather than the environment.
    ///
    /// Usage errors are reported like clap's own parse failures (exit status 2);
    /// everything else is fatal.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        match self {
            Self::Argument { .. } | Self::Config(_) => true,
            Self::Store { source, .. } => matches!(
                source,
                StoreErrorKind::NotFound(_) | StoreErrorKind::InvalidName(_)
            ),
            Self::Io { .. } | Self::Serialization(_) => false,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for DataValidationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for DataValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for DataValidationError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<ThresholdError> for DataValidationError {
    fn from(err: ThresholdError) -> Self {
        Self::argument("--threshold", err)
    }
}

impl From<LabelError> for DataValidationError {
    fn from(err: LabelError) -> Self {
        Self::argument("--labels", err)
    }
}

impl From<JsonArgError> for DataValidationError {
    fn from(err: JsonArgError) -> Self {
        Self::argument("JSON argument", err)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The new context is prepended to any existing context, so a failure deep in
/// assembly reads `--source-conn: resolving stored connection: ...`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DataValidationError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: DataValidationError, new_ctx: &str) -> DataValidationError {
    match err {
        DataValidationError::Argument {
            context: existing,
            source,
        } => DataValidationError::Argument {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DataValidationError::Store {
            context: existing,
            source,
        } => DataValidationError::Store {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DataValidationError::Io {
            path,
            message,
            source,
        } => DataValidationError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        DataValidationError::Config(msg) => DataValidationError::Config(chain_context(new_ctx, &msg)),
        DataValidationError::Serialization(msg) => {
            DataValidationError::Serialization(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataValidationError::store("loading", StoreErrorKind::NotFound("prod".into()));
        assert_eq!(err.to_string(), "Connection store error: loading");

        let err: DataValidationError = ThresholdError::Negative(-4.0).into();
        assert!(err.to_string().contains("--threshold"));
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = DataValidationError::io("/path/to/test.connection.json", io_err);

        assert!(err.to_string().contains("/path/to/test.connection.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(DataValidationError::argument(
                "base",
                JsonArgError {
                    value: "{}".into(),
                    reason: "expected a sequence".into(),
                },
            ))
        }

        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(DataValidationError::Argument {
                context,
                source: ArgumentErrorKind::Json(err),
            }) => {
                assert_eq!(context, "outer layer: middle layer: base");
                assert_eq!(err.value, "{}");
            }
            other => panic!("Expected Argument error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(DataValidationError::config("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_usage_classification() {
        assert!(DataValidationError::config("bad").is_usage());
        assert!(DataValidationError::from(LabelError::MissingSeparator("key".into())).is_usage());
        assert!(
            DataValidationError::store("x", StoreErrorKind::NotFound("x".into())).is_usage()
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!DataValidationError::io("/tmp", io_err).is_usage());
        assert!(
            !DataValidationError::store("x", StoreErrorKind::Corrupt {
                name: "x".into(),
                reason: "eof".into()
            })
            .is_usage()
        );
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
