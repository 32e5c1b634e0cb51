/// Number of addressable subcarriers per CSI frame.
pub const SUBCARRIER_COUNT: usize = 64;

/// First subcarrier index; stream paths address subcarriers as `0..=63`.
pub const SUBCARRIER_BASE: u8 = 0;

/// Every selectable subcarrier index, ascending.
pub fn subcarrier_universe() -> impl Iterator<Item = u8> {
    SUBCARRIER_BASE..SUBCARRIER_BASE + SUBCARRIER_COUNT as u8
}

/// Common error type for backend control calls.
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("backend rejected request: {0}")]
    Rejected(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

impl BackendError {
    /// The human-readable message carried by the failure, without the
    /// error-kind prefix.
    pub fn message(&self) -> &str {
        match self {
            BackendError::Rejected(message) => message,
            BackendError::Transport(message) => message,
        }
    }
}

/// Errors surfaced by the session lifecycle controller.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("session start failed: {0}")]
    StartFailed(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
