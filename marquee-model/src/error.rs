use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    StarOutOfRange(i64),
    UnknownActorRole(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::StarOutOfRange(value) => {
                write!(f, "star value {value} is outside 1..=5")
            }
            ModelError::UnknownActorRole(role) => {
                write!(f, "unknown actor role: {role}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
