use crate::api::client::{ApiEnvelope, Transport};
use crate::api::error::ApiError;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, error};

/// Posts request bodies to the catalog endpoint over HTTP
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("sports_mapper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn post(&self, body: Value) -> Result<ApiEnvelope, ApiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint = %self.endpoint, error = %e, "request failed");
                ApiError::Transport(format!("Network error: {e}"))
            })?;

        let status = response.status();
        debug!(endpoint = %self.endpoint, %status, "catalog api answered");

        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<ApiEnvelope>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
