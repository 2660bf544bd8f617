use crate::api::ApiError;
use thiserror::Error;

/// Failures surfaced to the user as a notification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A required input was missing; nothing was sent
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
