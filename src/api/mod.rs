//! REST API for quoting.
//!
//! Endpoints:
//! - `GET /locations`: supported cities and their sun hours
//! - `POST /estimate`: calculator result for a form submission
//! - `POST /report`: downloadable report snapshot
//! - `POST /plans`: BNPL installment options for the estimated cost

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::config::CalculatorConfig;
use crate::estimate::calculator::Estimator;

pub use types::{ErrorResponse, PlansResponse};

/// Immutable application state shared across all request handlers.
///
/// Built once from the validated configuration and wrapped in `Arc`; no
/// locks needed since every handler only reads it.
pub struct AppState {
    pub estimator: Estimator,
    /// Installment terms offered by `/plans`.
    pub terms_months: Vec<u32>,
}

impl AppState {
    /// Builds state from an already validated configuration.
    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self {
            estimator: config.estimator(),
            terms_months: config.financing.terms_months.clone(),
        }
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared estimator and installment terms
///
/// # Returns
///
/// A `Router` ready to be served or driven with `oneshot` in tests.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/locations", get(handlers::list_locations))
        .route("/estimate", post(handlers::estimate))
        .route("/report", post(handlers::report))
        .route("/plans", post(handlers::plans))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared state built by [`AppState::from_config`]
/// * `addr` - Socket address to bind (e.g. `0.0.0.0:3000`)
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
