//! Control-plane simulator for the CSI visualization backend.
//!
//! Speaks the same start/stop wire contract as the production backend so the
//! operator console can be exercised without a live capture pipeline. Only
//! the control plane is simulated; no stream processing happens here.

pub mod layout;
pub mod server;
