//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod availability;
pub mod health;
pub mod payments;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(availability::routes())
        .merge(payments::routes())
}
