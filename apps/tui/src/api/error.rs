use thiserror::Error;

/// Failures of a round-trip to the catalog endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The endpoint answered with a non-2xx status
    #[error("Network error")]
    Status(u16),
    /// The request never produced a response
    #[error("{0}")]
    Transport(String),
    /// The endpoint answered `success: false`
    #[error("{0}")]
    Rejected(String),
    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected(
            message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        )
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
