use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    /// Wrong arity or a mistyped argument for a named operation.
    Argument { operation: String, message: String },
    UnknownOperation(String),
    Config(String),
    Io(#[from] std::io::Error),
    Serialization(String),
}

impl OpsError {
    pub fn argument(operation: impl Into<String>, message: impl Into<String>) -> Self {
        OpsError::Argument {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn is_argument_error(&self) -> bool {
        matches!(self, OpsError::Argument { .. })
    }
}

impl Display for OpsError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            OpsError::Argument { operation, message } => {
                write!(f, "Argument error in {}(): {}", operation, message)
            }
            OpsError::UnknownOperation(name) => {
                write!(f, "Unknown operation '{}'\n\n", name)?;
                write!(f, "Fix:\n")?;
                write!(f, "  • Run: adminx list")
            }
            OpsError::Config(s) => write!(f, "Configuration error: {}", s),
            OpsError::Io(e) => write!(f, "I/O error: {}", e),
            OpsError::Serialization(s) => write!(f, "Serialization error: {}", s),
        }
    }
}

impl From<serde_yaml_ng::Error> for OpsError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        OpsError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for OpsError {
    fn from(err: serde_json::Error) -> Self {
        OpsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpsError>;
