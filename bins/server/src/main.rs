//! Tourdesk API Server
//!
//! Main entry point for the Tourdesk backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tourdesk_api::{AppState, create_router};
use tourdesk_shared::AppConfig;
use tourdesk_store::{SheetWebhook, StoreClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourdesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Build the row store client
    let store = StoreClient::new(&config.store)?;
    info!(base_url = %config.store.base_url, "Row store client ready");

    // Build the webhook client
    let webhook = SheetWebhook::new(&config.webhook);
    if webhook.is_enabled() {
        info!("Spreadsheet webhook enabled");
    } else {
        info!("Spreadsheet webhook disabled");
    }

    // Create application state
    let state = AppState {
        store: Arc::new(store),
        webhook: Arc::new(webhook),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
