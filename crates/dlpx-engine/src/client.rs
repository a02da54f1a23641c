//! Engine HTTP client: session handshake, GET/POST, envelope handling
//!
//! The legacy API is cookie-session based: a client first posts an
//! `APISession`, then a `LoginRequest`, and the engine ties both to the
//! session cookie. Every response is wrapped in a result envelope whose
//! `status` field distinguishes `OKResult` from `ErrorResult`.

use std::time::Duration;

use dlpx_step_api::{
    EngineConfig,
    StepError,
    StepResult,
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{
    json,
    Value,
};

use crate::types::EngineAction;

const PATH_SESSION: &str = "/resources/json/delphix/session";
const PATH_LOGIN: &str = "/resources/json/delphix/login";

/// Authenticated client for one Delphix Engine.
pub struct EngineClient {
    client: reqwest::Client,
    base: String,
}

/// Unwrapped engine response: the `result` payload plus the action and
/// job references a state-changing call hands back for tracking.
#[derive(Debug)]
pub struct EngineResponse {
    pub result: Value,
    pub job: Option<String>,
    pub action: Option<String>,
}

impl EngineResponse {
    pub fn into_action(self) -> EngineAction {
        EngineAction {
            action: self.action,
            job: self.job,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<ErrorBody>,
    #[serde(default)]
    job: Option<String>,
    #[serde(default)]
    action: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    details: Value,
    #[serde(default)]
    action: Value,
}

impl EngineClient {
    /// Builds the HTTP client and runs the session + login handshake.
    pub async fn connect(config: &EngineConfig) -> StepResult<Self> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .cookie_store(true)
            .danger_accept_invalid_certs(config.insecure)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| StepError::Internal(format!("Failed to build HTTP client: {e}")))?;

        let engine = Self {
            client,
            base: config.base_address().to_string(),
        };
        engine.login(config).await?;
        Ok(engine)
    }

    async fn login(&self, config: &EngineConfig) -> StepResult<()> {
        self.post(PATH_SESSION, &session_payload()).await?;

        let login = login_payload(&config.username, config.password.expose_secret());
        self.post(PATH_LOGIN, &login).await.map_err(|e| match e {
            StepError::Engine(details) => StepError::AuthenticationFailed(details),
            other => other,
        })?;

        tracing::debug!(engine = %self.base, "logged in");
        Ok(())
    }

    /// Issues one GET against the engine and unwraps the envelope.
    pub async fn get(&self, path: &str) -> StepResult<EngineResponse> {
        let url = format!("{}{path}", self.base);
        let envelope: Envelope = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StepError::Network(format!("Failed to reach engine: {e}")))?
            .json()
            .await
            .map_err(|e| StepError::Serialization(format!("Bad engine response: {e}")))?;

        unwrap_envelope(envelope)
    }

    /// Issues one POST against the engine and unwraps the envelope.
    pub async fn post(&self, path: &str, body: &Value) -> StepResult<EngineResponse> {
        let url = format!("{}{path}", self.base);
        let envelope: Envelope = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| StepError::Network(format!("Failed to reach engine: {e}")))?
            .json()
            .await
            .map_err(|e| StepError::Serialization(format!("Bad engine response: {e}")))?;

        unwrap_envelope(envelope)
    }
}

pub(crate) fn session_payload() -> Value {
    json!({
        "type": "APISession",
        "version": {
            "type": "APIVersion",
            "major": 1,
            "minor": 11,
            "micro": 0
        }
    })
}

pub(crate) fn login_payload(username: &str, password: &str) -> Value {
    json!({
        "type": "LoginRequest",
        "username": username,
        "password": password
    })
}

/// Turns an `ErrorResult` envelope into an engine error carrying the
/// reported details; anything else passes through as an `EngineResponse`.
pub(crate) fn unwrap_envelope(envelope: Envelope) -> StepResult<EngineResponse> {
    let failed = envelope.status.as_deref() == Some("ERROR") || envelope.error.is_some();
    if failed {
        let message = envelope
            .error
            .map(|error| {
                let details = value_text(&error.details);
                let action = value_text(&error.action);
                if action.is_empty() {
                    details
                } else {
                    format!("{details} ({action})")
                }
            })
            .unwrap_or_else(|| "Engine reported an error without details".to_string());
        return Err(StepError::Engine(message));
    }

    Ok(EngineResponse {
        result: envelope.result,
        job: envelope.job,
        action: envelope.action,
    })
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_payload_shape() {
        let payload = session_payload();
        assert_eq!(payload["type"], "APISession");
        assert_eq!(payload["version"]["type"], "APIVersion");
        assert_eq!(payload["version"]["major"], 1);
    }

    #[test]
    fn test_login_payload_shape() {
        let payload = login_payload("admin", "landshark");
        assert_eq!(
            payload,
            json!({
                "type": "LoginRequest",
                "username": "admin",
                "password": "landshark"
            })
        );
    }

    #[test]
    fn test_unwrap_ok_envelope() {
        let envelope: Envelope = serde_json::from_str(
            r#"{
                "type": "OKResult",
                "status": "OK",
                "result": {"reference": "JS_BOOKMARK-1"},
                "job": "JOB-12",
                "action": "ACTION-34"
            }"#,
        )
        .unwrap();

        let response = unwrap_envelope(envelope).unwrap();
        assert_eq!(response.result["reference"], "JS_BOOKMARK-1");
        assert_eq!(response.job.as_deref(), Some("JOB-12"));
        assert_eq!(response.action.as_deref(), Some("ACTION-34"));
    }

    #[test]
    fn test_unwrap_error_envelope() {
        let envelope: Envelope = serde_json::from_str(
            r#"{
                "type": "ErrorResult",
                "status": "ERROR",
                "error": {
                    "type": "APIError",
                    "details": "The reference \"JS_BOOKMARK-9\" is invalid.",
                    "action": "Check the bookmark reference."
                }
            }"#,
        )
        .unwrap();

        let err = unwrap_envelope(envelope).unwrap_err();
        match err {
            StepError::Engine(message) => {
                assert!(message.contains("JS_BOOKMARK-9"));
                assert!(message.contains("Check the bookmark reference."));
            }
            other => panic!("expected engine error, got {other:?}"),
        }
    }

    #[test]
    fn test_unwrap_error_without_details() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"type": "ErrorResult", "status": "ERROR"}"#).unwrap();
        assert!(matches!(
            unwrap_envelope(envelope),
            Err(StepError::Engine(_))
        ));
    }
}
