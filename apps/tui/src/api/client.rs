use crate::api::actions::Action;
use crate::api::error::ApiError;
use crate::api::models::RowId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Response body of every catalog action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiEnvelope {
    pub const fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: Option<Value>, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Carries one request body to the endpoint and returns its envelope.
///
/// Implementations report non-2xx answers and broken connections as
/// errors; an envelope with `success: false` is returned as-is and judged
/// by [`ApiClient`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(&self, body: Value) -> Result<ApiEnvelope, ApiError>;
}

/// Builds `{ "action": <name>, ...params }`
pub fn request_body<P: Serialize + ?Sized>(action: Action, params: &P) -> Result<Value, ApiError> {
    let mut body = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(ApiError::Decode(format!(
                "parameters for {action} must be an object, got {other}"
            )))
        }
    };
    body.insert(
        "action".to_string(),
        Value::String(action.as_str().to_string()),
    );
    Ok(Value::Object(body))
}

/// Typed calls over a [`Transport`]
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends an action and returns its `data`, failing on `success: false`
    pub async fn call<P: Serialize + ?Sized>(
        &self,
        action: Action,
        params: &P,
    ) -> Result<Option<Value>, ApiError> {
        let body = request_body(action, params)?;
        debug!(%action, "calling catalog api");

        let envelope = self.transport.post(body).await.map_err(|error| {
            warn!(%action, %error, "catalog api unreachable");
            error
        })?;

        if !envelope.success {
            let error = ApiError::rejected(envelope.message);
            warn!(%action, %error, "catalog api rejected request");
            return Err(error);
        }

        Ok(envelope.data)
    }

    /// Runs a `get*` action and decodes its rows
    pub async fn fetch<R: DeserializeOwned>(&self, action: Action) -> Result<Vec<R>, ApiError> {
        match self.call(action, &()).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(data) => Ok(serde_json::from_value(data)?),
        }
    }

    /// Runs an `add*` action and returns the id of the inserted row
    pub async fn insert<P: Serialize + ?Sized>(
        &self,
        action: Action,
        params: &P,
    ) -> Result<i64, ApiError> {
        let data = self
            .call(action, params)
            .await?
            .ok_or_else(|| ApiError::Decode(format!("{action} returned no id")))?;
        let row: RowId = serde_json::from_value(data)?;
        Ok(row.id)
    }

    /// Runs an `update*` or `delete*` action
    pub async fn execute<P: Serialize + ?Sized>(
        &self,
        action: Action,
        params: &P,
    ) -> Result<(), ApiError> {
        self.call(action, params).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{LeagueMappingTarget, Sport};
    use serde_json::json;
    use std::cell::RefCell;

    /// Replays canned answers and records request bodies
    struct Scripted {
        answers: RefCell<Vec<Result<ApiEnvelope, ApiError>>>,
        bodies: RefCell<Vec<Value>>,
    }

    impl Scripted {
        fn new(answer: Result<ApiEnvelope, ApiError>) -> Self {
            Self {
                answers: RefCell::new(vec![answer]),
                bodies: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Scripted {
        async fn post(&self, body: Value) -> Result<ApiEnvelope, ApiError> {
            self.bodies.borrow_mut().push(body);
            self.answers
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted answer".to_string())))
        }
    }

    #[test]
    fn body_carries_action_next_to_params() -> Result<(), ApiError> {
        let body = request_body(
            Action::UpdateLeagueMapping,
            &LeagueMappingTarget {
                id: 4,
                league_id: None,
            },
        )?;
        assert_eq!(
            body,
            json!({"action": "updateLeagueMapping", "id": 4, "league_id": null})
        );

        let body = request_body(Action::GetSports, &())?;
        assert_eq!(body, json!({"action": "getSports"}));
        Ok(())
    }

    #[test]
    fn scalar_params_are_refused() {
        let result = request_body(Action::DeleteTeam, &7);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn fetch_decodes_rows() -> Result<(), ApiError> {
        let client = ApiClient::new(Scripted::new(Ok(ApiEnvelope::ok(json!([
            {"id": 1, "name": "Football", "active": 1}
        ])))));

        let sports: Vec<Sport> = client.fetch(Action::GetSports).await?;
        assert_eq!(sports.len(), 1);
        assert_eq!(sports[0].name, "Football");
        assert_eq!(
            client.transport().bodies.borrow()[0],
            json!({"action": "getSports"})
        );
        Ok(())
    }

    #[tokio::test]
    async fn rejection_without_message_reads_unknown_error() {
        let client = ApiClient::new(Scripted::new(Ok(ApiEnvelope {
            success: false,
            data: None,
            message: None,
        })));

        let result = client.execute(Action::DeleteTeamMapping, &RowId { id: 3 }).await;
        assert_eq!(result, Err(ApiError::Rejected("Unknown error".to_string())));
    }

    #[tokio::test]
    async fn rejection_keeps_server_message() {
        let client = ApiClient::new(Scripted::new(Ok(ApiEnvelope::failure(
            "Invalid action: getCoaches",
        ))));

        let result = client.fetch::<Sport>(Action::GetSports).await;
        assert_eq!(
            result,
            Err(ApiError::Rejected("Invalid action: getCoaches".to_string()))
        );
    }

    #[tokio::test]
    async fn status_failure_reads_network_error() {
        let client = ApiClient::new(Scripted::new(Err(ApiError::Status(502))));

        let result = client.fetch::<Sport>(Action::GetSports).await;
        let error = result.err().map(|error| error.to_string());
        assert_eq!(error.as_deref(), Some("Network error"));
    }

    #[tokio::test]
    async fn insert_reads_new_id() -> Result<(), ApiError> {
        let client = ApiClient::new(Scripted::new(Ok(ApiEnvelope::ok_with_message(
            Some(json!({"id": 42})),
            "League mapping added successfully",
        ))));

        let id = client
            .insert(Action::AddLeagueMapping, &json!({"name": "Metro League", "league_id": 5}))
            .await?;
        assert_eq!(id, 42);
        Ok(())
    }
}
