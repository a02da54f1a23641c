//! DCT API client core
//!
//! Unlike the legacy engine there is no session handshake: every
//! request carries the API key in an `Authorization: apk <key>` header.

use std::time::Duration;

use dlpx_step_api::{
    DctConfig,
    StepError,
    StepResult,
};
use reqwest::header::{
    HeaderMap,
    HeaderValue,
    AUTHORIZATION,
};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Authenticated client for the DCT API.
pub struct DctClient {
    client: reqwest::Client,
    base: String,
}

impl DctClient {
    pub fn new(config: &DctConfig) -> StepResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("apk {}", config.api_key.expose_secret()))
            .map_err(|e| StepError::InvalidConfig(format!("Invalid API key format: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .danger_accept_invalid_certs(config.insecure)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| StepError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base: config.base_url().to_string(),
        })
    }

    /// Issues one GET and deserializes the response body.
    pub(crate) async fn get_json<R: DeserializeOwned>(&self, path: &str) -> StepResult<R> {
        let url = format!("{}{path}", self.base);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StepError::Network(format!("Failed to reach DCT: {e}")))?;

        Self::read_json(response).await
    }

    /// Issues one POST and deserializes the response body.
    pub(crate) async fn post_json<P: Serialize, R: DeserializeOwned>(
        &self, path: &str, body: &P,
    ) -> StepResult<R> {
        let url = format!("{}{path}", self.base);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| StepError::Network(format!("Failed to reach DCT: {e}")))?;

        Self::read_json(response).await
    }

    async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> StepResult<R> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StepError::AuthenticationFailed(format!(
                "DCT rejected the API key (HTTP {status})"
            )));
        }
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StepError::Api(format!("HTTP {status}: {text}")));
        }

        response
            .json()
            .await
            .map_err(|e| StepError::Serialization(format!("Bad DCT response: {e}")))
    }
}
