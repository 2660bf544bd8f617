use crate::api::client::{ApiEnvelope, Transport};
use crate::api::error::ApiError;
use crate::api::http::HttpTransport;
use crate::api::memory::MemoryTransport;
use serde_json::Value;

/// The transport chosen at startup
#[derive(Debug)]
pub enum Backend {
    Http(HttpTransport),
    Memory(MemoryTransport),
}

impl Backend {
    pub fn describe(&self) -> String {
        match self {
            Self::Http(http) => http.endpoint().to_string(),
            Self::Memory(_) => "in-memory demo catalog".to_string(),
        }
    }
}

impl Transport for Backend {
    async fn post(&self, body: Value) -> Result<ApiEnvelope, ApiError> {
        match self {
            Self::Http(http) => http.post(body).await,
            Self::Memory(memory) => memory.post(body).await,
        }
    }
}
