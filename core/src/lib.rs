//! Session-configuration core for the Rust-based CSI live-visualization
//! platform.
//!
//! The modules cover the configurable slot model, per-slot subcarrier
//! selection, payload validation and projection, the backend session
//! lifecycle, and viewer-address composition.

pub mod payload;
pub mod prelude;
pub mod selector;
pub mod session;
pub mod slots;
pub mod telemetry;
pub mod validation;
pub mod viewer;

pub use session::{ControlBackend, SessionController, SessionState};
