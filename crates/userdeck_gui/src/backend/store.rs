//! The network boundary: a blocking CRUD client for the remote users resource.
//!
//! Each call is attempted exactly once. Retrying is the caller's decision, and
//! nothing here touches local state.

use super::Operation;
use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use userdeck_core::{Config, CoreError, FieldErrors, FormField, User, UserDraft, UserPatch};

/// Failure of a remote store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The remote (or local validation) rejected the submitted fields.
    #[error("{message}")]
    Validation { message: String, fields: FieldErrors },

    /// Transport failure, timeout, unexpected status, or malformed response.
    #[error("Network error: {0}")]
    Network(String),

    /// The referenced id is unknown to the remote.
    #[error("User {id} was not found")]
    NotFound { id: u64 },
}

impl StoreError {
    /// Whether the failure belongs in a form rather than a notice.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation { .. })
    }
}

/// CRUD operations against the remote users resource.
///
/// Implementations block; they run on the backend worker thread.
pub trait RemoteUserStore: Send {
    /// Fetch every user, in the remote's order.
    ///
    /// # Errors
    /// [`StoreError::Network`] on transport failure.
    fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Create a user; the remote assigns the id.
    ///
    /// # Errors
    /// [`StoreError::Validation`] when the remote rejects the draft,
    /// [`StoreError::Network`] otherwise.
    fn create(&self, draft: &UserDraft) -> Result<User, StoreError>;

    /// Update a user, returning whatever the remote echoed back.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] for an unknown id, [`StoreError::Validation`]
    /// when the patch is rejected, [`StoreError::Network`] otherwise.
    fn update(&self, id: u64, patch: &UserPatch) -> Result<UserPatch, StoreError>;

    /// Delete a user.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] for an unknown id, [`StoreError::Network`]
    /// otherwise.
    fn remove(&self, id: u64) -> Result<(), StoreError>;
}

/// [`RemoteUserStore`] over HTTP: `GET/POST {base}/users`,
/// `PUT/DELETE {base}/users/{id}`.
#[derive(Debug, Clone)]
pub struct HttpUserStore {
    client: Client,
    base: Url,
}

impl HttpUserStore {
    /// Build a store for `base_url` with a per-request timeout.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidConfig`] when the URL cannot serve as an
    /// API base or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let base = Url::parse(base_url)
            .map_err(|err| CoreError::InvalidConfig(format!("API URL '{}': {}", base_url, err)))?;
        if base.cannot_be_a_base() {
            return Err(CoreError::InvalidConfig(format!(
                "API URL '{}' cannot be used as a base",
                base_url
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CoreError::InvalidConfig(format!("HTTP client: {}", err)))?;
        Ok(Self { client, base })
    }

    /// Build a store from the loaded configuration.
    ///
    /// # Errors
    /// See [`HttpUserStore::new`].
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        Self::new(&config.api_url, config.request_timeout)
    }

    fn users_url(&self, id: Option<u64>) -> Url {
        let mut url = self.base.clone();
        // `new` rejected cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.push("users");
            if let Some(id) = id {
                path.push(&id.to_string());
            }
        }
        url
    }

    fn send(
        &self,
        operation: Operation,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<Response, StoreError> {
        let response = request.send().map_err(transport_error)?;
        let status = response.status();
        debug!(operation = operation.verb(), status = status.as_u16(), "remote call finished");
        if status.is_success() {
            Ok(response)
        } else {
            Err(failure_from_response(operation, response))
        }
    }
}

impl RemoteUserStore for HttpUserStore {
    fn list(&self) -> Result<Vec<User>, StoreError> {
        let response = self.send(Operation::List, self.client.get(self.users_url(None)))?;
        decode_body(response)
    }

    fn create(&self, draft: &UserDraft) -> Result<User, StoreError> {
        let request = self.client.post(self.users_url(None)).json(draft);
        let response = self.send(Operation::Create, request)?;
        let echoed: UserPatch = decode_body(response)?;
        User::from_created(draft, &echoed)
            .ok_or_else(|| StoreError::Network("create response carried no id".to_string()))
    }

    fn update(&self, id: u64, patch: &UserPatch) -> Result<UserPatch, StoreError> {
        let request = self.client.put(self.users_url(Some(id))).json(patch);
        let response = self.send(Operation::Update { id }, request)?;
        decode_body(response)
    }

    fn remove(&self, id: u64) -> Result<(), StoreError> {
        self.send(
            Operation::Remove { id },
            self.client.delete(self.users_url(Some(id))),
        )?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Network("request timed out".to_string())
    } else if err.is_connect() {
        StoreError::Network(format!("could not connect: {}", err))
    } else {
        StoreError::Network(err.to_string())
    }
}

fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    response
        .json()
        .map_err(|err| StoreError::Network(format!("invalid response body: {}", err)))
}

fn failure_from_response(operation: Operation, response: Response) -> StoreError {
    let status = response.status();
    let body = response
        .text()
        .unwrap_or_else(|err| format!("failed to read error response body: {}", err));
    classify_failure(operation, status, &body)
}

pub(crate) fn classify_failure(operation: Operation, status: StatusCode, body: &str) -> StoreError {
    match (status, operation) {
        (StatusCode::NOT_FOUND, Operation::Update { id } | Operation::Remove { id }) => {
            StoreError::NotFound { id }
        }
        (
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY,
            Operation::Create | Operation::Update { .. },
        ) => validation_from_body(status, body),
        _ => StoreError::Network(format!(
            "{} failed ({}): {}",
            operation.verb(),
            status,
            error_message_for_response(status, body)
        )),
    }
}

fn error_message_for_response(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

fn validation_from_body(status: StatusCode, body: &str) -> StoreError {
    let message = error_message_for_response(status, body);
    let mut fields = FieldErrors::new();
    if let Ok(Value::Object(root)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::Object(raw_fields)) = root.get("fields") {
            for (name, value) in raw_fields {
                let Some(field) = FormField::parse(name) else {
                    continue;
                };
                let text = match value {
                    Value::String(text) => Some(text.clone()),
                    Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_string),
                    _ => None,
                };
                if let Some(text) = text {
                    fields.insert(field, text);
                }
            }
        }
    }
    StoreError::Validation { message, fields }
}
