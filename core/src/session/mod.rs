pub mod controller;
pub mod transport;

pub use controller::{SessionController, SessionState};
pub use transport::{ControlBackend, StartReply, StopReply};
