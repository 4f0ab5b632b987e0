//! REST service mode.
//!
//! Everything here is behind the `server` feature: the axum router, the
//! error → status mapping, and TOML configuration for `rotomd`.

pub mod config;
mod routes;

pub use routes::{AppState, router};
