//! Domain-specific error types for the AI system classifier

use thiserror::Error;

/// Main error type for the classifier library and CLI
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error in '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ClassifierError {
    /// Shorthand for a validation failure that names the offending field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClassifierError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ClassifierError {
    fn from(err: anyhow::Error) -> Self {
        ClassifierError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        ClassifierError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ClassifierError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        let inner = err.into_inner();
        // Syntax and EOF errors have no meaningful field.
        if !inner.is_data() {
            return inner.into();
        }
        let field = if path == "." {
            "answers".to_string()
        } else {
            path
        };
        ClassifierError::Validation {
            field,
            message: inner.to_string(),
        }
    }
}

impl From<toml::de::Error> for ClassifierError {
    fn from(err: toml::de::Error) -> Self {
        ClassifierError::Config {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ClassifierError {
    fn from(err: std::io::Error) -> Self {
        ClassifierError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;
