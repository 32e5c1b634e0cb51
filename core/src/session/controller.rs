use crate::payload::SessionPayload;
use crate::prelude::{SessionError, SessionResult};
use crate::session::transport::ControlBackend;
use crate::telemetry::{LogManager, SessionMetrics};
use crate::viewer;

/// Lifecycle phases of the single backend visualization session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// Owns the session state machine and issues the two control calls.
///
/// The exclusive receivers on `start` and `stop` mean at most one transition
/// is in flight per controller; the state gate makes repeated calls no-ops,
/// so each accepted transition maps to exactly one outbound request.
pub struct SessionController<B: ControlBackend> {
    backend: B,
    state: SessionState,
    viewer_url: Option<String>,
    logger: LogManager,
    metrics: SessionMetrics,
}

impl<B: ControlBackend> SessionController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: SessionState::Idle,
            viewer_url: None,
            logger: LogManager::new(),
            metrics: SessionMetrics::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Composed viewer address, populated only while `Running`.
    pub fn viewer_url(&self) -> Option<&str> {
        self.viewer_url.as_deref()
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// Submit the payload and wait for the backend to acknowledge the
    /// session. A no-op unless the controller is idle. On failure the
    /// backend's message is surfaced verbatim and the controller returns to
    /// `Idle` with no session assumed to exist.
    pub async fn start(&mut self, payload: &SessionPayload) -> SessionResult<()> {
        if self.state != SessionState::Idle {
            self.logger
                .record(&format!("start ignored in state {:?}", self.state));
            return Ok(());
        }

        self.state = SessionState::Starting;
        match self.backend.start_session(payload).await {
            Ok(reply) => {
                self.viewer_url = Some(viewer::compose(&reply.iframe_url));
                self.state = SessionState::Running;
                self.metrics.record_started();
                self.logger
                    .record(&format!("session running ({})", reply.status));
                Ok(())
            }
            Err(err) => {
                self.state = SessionState::Idle;
                self.viewer_url = None;
                self.metrics.record_failed_start();
                Err(SessionError::StartFailed(err.message().to_string()))
            }
        }
    }

    /// Best-effort teardown. A no-op unless `Running`; backend failures are
    /// logged as warnings and never block the transition to `Stopped`.
    pub async fn stop(&mut self) {
        if self.state != SessionState::Running {
            self.logger
                .record(&format!("stop ignored in state {:?}", self.state));
            return;
        }

        self.state = SessionState::Stopping;
        match self.backend.stop_session().await {
            Ok(reply) => self
                .logger
                .record(&format!("session stopped ({})", reply.status)),
            Err(err) => self
                .logger
                .warn(&format!("stop-session failed: {}", err.message())),
        }
        self.state = SessionState::Stopped;
        self.viewer_url = None;
        self.metrics.record_stopped();
    }

    /// Return a stopped controller to `Idle` so the host context can run a
    /// fresh session without rebuilding it. No other state is affected.
    pub fn reset(&mut self) {
        if self.state == SessionState::Stopped {
            self.state = SessionState::Idle;
            self.viewer_url = None;
        }
    }
}
