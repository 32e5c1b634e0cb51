use async_trait::async_trait;
use csicore::payload::SessionPayload;
use csicore::prelude::BackendError;
use csicore::session::{ControlBackend, StartReply, StopReply};
use log::debug;
use serde::Deserialize;

/// Error body returned by the backend alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorReply {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the backend control API.
pub struct ControlClient {
    base_url: String,
    http: reqwest::Client,
}

impl ControlClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn rejection(response: reqwest::Response, fallback: &str) -> BackendError {
        let status = response.status();
        let message = response
            .json::<ErrorReply>()
            .await
            .ok()
            .and_then(|reply| reply.message)
            .unwrap_or_else(|| format!("{} ({})", fallback, status));
        BackendError::Rejected(message)
    }
}

#[async_trait]
impl ControlBackend for ControlClient {
    async fn start_session(&self, payload: &SessionPayload) -> Result<StartReply, BackendError> {
        debug!(
            "POST start-session with {} graph(s)",
            payload.total_graphs
        );
        let response = self
            .http
            .post(self.endpoint("start-session"))
            .json(payload)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if response.status().is_success() {
            response
                .json::<StartReply>()
                .await
                .map_err(|e| BackendError::Transport(e.to_string()))
        } else {
            Err(Self::rejection(response, "failed to start visualization session").await)
        }
    }

    async fn stop_session(&self) -> Result<StopReply, BackendError> {
        debug!("POST stop-session");
        let response = self
            .http
            .post(self.endpoint("stop-session"))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if response.status().is_success() {
            response
                .json::<StopReply>()
                .await
                .map_err(|e| BackendError::Transport(e.to_string()))
        } else {
            Err(Self::rejection(response, "failed to stop session cleanly").await)
        }
    }
}
