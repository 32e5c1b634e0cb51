//! Operator console for the CSI live-visualization platform.
//!
//! Loads a declarative session description, materializes and validates the
//! slot collection, and drives the session lifecycle against the backend
//! control API.

pub mod client;
pub mod config;
