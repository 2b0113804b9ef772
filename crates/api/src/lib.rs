//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for availability and payments
//! - Shared application state
//! - Response types

pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tourdesk_store::{SheetWebhook, StoreClient};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the hosted row store.
    pub store: Arc<StoreClient>,
    /// Client for the spreadsheet-proxy webhook.
    pub webhook: Arc<SheetWebhook>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
