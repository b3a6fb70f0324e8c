use std::fmt::{self, Display};

/// Errors produced by model constructors and parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidSlideId(String),
    UnknownThemeMode(String),
    UnknownConsentDecision(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidSlideId(raw) => {
                write!(f, "invalid slide id: {raw:?}")
            }
            ModelError::UnknownThemeMode(raw) => {
                write!(f, "unknown theme mode: {raw:?}")
            }
            ModelError::UnknownConsentDecision(raw) => {
                write!(f, "unknown consent decision: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
