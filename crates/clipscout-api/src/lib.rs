//! Axum HTTP API server.
//!
//! Exposes job submission (upload and link), job status polling, health
//! probes, and Prometheus metrics on top of the job orchestrator.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
