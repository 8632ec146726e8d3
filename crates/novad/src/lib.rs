//! Nova daemon library.
//!
//! The daemon routes each chat request across the configured
//! completion backends in priority order and degrades to a
//! deterministic rule-based responder when every backend is down.

pub mod fallback;
pub mod fast_path;
pub mod orchestrator;
pub mod providers;
pub mod registry;
pub mod routes;
pub mod server;
