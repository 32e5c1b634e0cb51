use crate::payload::SessionPayload;
use crate::prelude::BackendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Successful reply to `start-session`, carrying the viewer reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartReply {
    pub status: String,
    #[serde(default)]
    pub recording_url: Option<String>,
    pub iframe_url: String,
}

/// Reply to `stop-session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopReply {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Transport seam to the backend control API. Exactly two calls exist;
/// neither is retried by the caller.
#[async_trait]
pub trait ControlBackend {
    async fn start_session(&self, payload: &SessionPayload) -> Result<StartReply, BackendError>;

    async fn stop_session(&self) -> Result<StopReply, BackendError>;
}
