//! Web server adapter.
//!
//! JSON API over the forecasting engine, plus an optional static
//! directory for a browser front end.

mod error;
mod handlers;

pub use error::WebError;
pub use handlers::*;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

pub struct AppState {
    pub data_port: Arc<dyn DataPort + Send + Sync>,
    pub config: Arc<dyn ConfigPort + Send + Sync>,
}

pub fn build_router(state: AppState) -> Router {
    let static_dir = state
        .config
        .get_string("web", "static_dir")
        .filter(|s| !s.trim().is_empty());

    let api = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/series", get(handlers::list_series))
        .route("/api/prices/{series}", get(handlers::prices))
        .route("/api/forecast/{series}", get(handlers::forecast))
        .route("/api/seasonality/{series}", get(handlers::seasonality));

    let router = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api.fallback(handlers::not_found),
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}
