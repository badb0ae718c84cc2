//! Local HTTP front end: one HTML page driven by Plotly.js plus a JSON
//! update endpoint that plays the dashboard's reactive request/response cycle.

pub mod error;
pub mod handlers;
pub mod page;
pub mod plotly;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use launch_core::layout::DashboardLayout;
use launch_core::RecordStore;
use tracing::info;

pub use error::WebError;

/// Read-only state shared by every handler.
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub layout: DashboardLayout,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>) -> Self {
        let layout = DashboardLayout::from_store(&store);
        Self { store, layout }
    }
}

pub fn router(store: Arc<RecordStore>) -> Router {
    let state = Arc::new(AppState::new(store));
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::health))
        .route("/_dash-layout", get(handlers::layout))
        .route("/_dash-update-component", post(handlers::update))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(store: Arc<RecordStore>, addr: SocketAddr) -> Result<(), WebError> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| WebError::Bind { addr, source })?;
    info!("dashboard running at http://{addr}");
    axum::serve(listener, app).await.map_err(WebError::Serve)
}
