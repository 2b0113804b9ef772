//! Payment routes: order list with derived statuses and ledger CRUD.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::AppState;
use rust_decimal::Decimal;
use tourdesk_core::payments::{LedgerEntry, LedgerSummary, Order, reconcile};
use tourdesk_shared::AppError;
use tourdesk_shared::types::LedgerEntryId;
use tourdesk_store::LedgerEntryRow;

/// Creates the payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route(
            "/orders/{order_number}/ledger",
            get(get_ledger).post(append_entry),
        )
        .route("/ledger/{entry_id}", delete(delete_entry))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// An order together with its derived ledger summary.
#[derive(Debug, Serialize)]
pub struct OrderWithLedger {
    /// The order row.
    #[serde(flatten)]
    pub order: Order,
    /// Summary recomputed from the current entry list.
    pub ledger: LedgerSummary,
}

/// Response for an order's ledger view.
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    /// The order row.
    pub order: Order,
    /// All entries recorded against the order.
    pub entries: Vec<LedgerEntry>,
    /// Summary recomputed from the entries above.
    pub summary: LedgerSummary,
}

/// Request body for appending a ledger entry.
#[derive(Debug, Deserialize)]
pub struct AppendEntryRequest {
    /// Entry type label (`payment`, `refund`, `discount`, `adjustment`).
    pub entry_type: String,
    /// Non-negative magnitude.
    pub amount: Decimal,
    /// Payment method (payments only).
    #[serde(default)]
    pub method: Option<String>,
    /// External reference.
    #[serde(default)]
    pub reference: Option<String>,
    /// Optional staff notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Staff member recording the entry.
    #[serde(default)]
    pub recorded_by: Option<String>,
}

impl AppendEntryRequest {
    /// Converts the request into a raw row keyed by the order number.
    fn into_row(self, order_number: &str) -> LedgerEntryRow {
        LedgerEntryRow {
            id: LedgerEntryId::new(),
            order_number: order_number.to_string(),
            entry_type: self.entry_type,
            amount: self.amount,
            method: self.method,
            reference: self.reference,
            notes: self.notes,
            recorded_by: self.recorded_by,
            created_at: chrono::Utc::now(),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Maps an application error onto its JSON response.
fn error_response(err: &AppError) -> axum::response::Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Standard not-found response for an unknown order number.
fn order_not_found(order_number: &str) -> axum::response::Response {
    error_response(&AppError::NotFound(format!("Order {order_number} not found")))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /orders
///
/// All orders, each with its payment status derived from the full ledger
/// in one pass. Statuses are never stored; this recomputes them on every
/// read.
#[axum::debug_handler]
async fn list_orders(State(state): State<AppState>) -> impl IntoResponse {
    let orders = match state.store.list_orders().await {
        Ok(orders) => orders,
        Err(e) => {
            error!(error = %e, "Failed to load orders");
            return error_response(&AppError::Store("Failed to load orders".into()));
        }
    };
    let entries = match state.store.list_all_ledger_entries().await {
        Ok(entries) => entries,
        Err(e) => {
            error!(error = %e, "Failed to load ledger entries");
            return error_response(&AppError::Store("Failed to load ledger entries".into()));
        }
    };

    let mut by_order: HashMap<&str, Vec<&LedgerEntry>> = HashMap::new();
    for entry in &entries {
        by_order.entry(&entry.order_number).or_default().push(entry);
    }

    let response: Vec<OrderWithLedger> = orders
        .into_iter()
        .map(|order| {
            let own: Vec<LedgerEntry> = by_order
                .get(order.order_number.as_str())
                .map(|refs| refs.iter().map(|e| (*e).clone()).collect())
                .unwrap_or_default();
            let ledger = reconcile(order.total_amount, &own);
            OrderWithLedger { order, ledger }
        })
        .collect();

    (StatusCode::OK, Json(response)).into_response()
}

/// GET /orders/{order_number}/ledger
#[axum::debug_handler]
async fn get_ledger(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> impl IntoResponse {
    let order = match state.store.find_order(&order_number).await {
        Ok(Some(order)) => order,
        Ok(None) => return order_not_found(&order_number),
        Err(e) => {
            error!(error = %e, "Failed to load order");
            return error_response(&AppError::Store("Failed to load order".into()));
        }
    };

    let entries = match state.store.list_ledger_entries(&order_number).await {
        Ok(entries) => entries,
        Err(e) => {
            error!(error = %e, "Failed to load ledger entries");
            return error_response(&AppError::Store("Failed to load ledger entries".into()));
        }
    };

    let summary = reconcile(order.total_amount, &entries);
    (
        StatusCode::OK,
        Json(LedgerResponse {
            order,
            entries,
            summary,
        }),
    )
        .into_response()
}

/// POST /orders/{order_number}/ledger
///
/// Appends an entry and returns the refreshed ledger view. Entries are
/// append-only; corrections are new entries, not edits.
#[axum::debug_handler]
async fn append_entry(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Json(request): Json<AppendEntryRequest>,
) -> impl IntoResponse {
    let order = match state.store.find_order(&order_number).await {
        Ok(Some(order)) => order,
        Ok(None) => return order_not_found(&order_number),
        Err(e) => {
            error!(error = %e, "Failed to load order");
            return error_response(&AppError::Store("Failed to load order".into()));
        }
    };

    let row = request.into_row(&order_number);
    let entry = match LedgerEntry::try_from(row.clone()) {
        Ok(entry) => entry,
        Err(e) => return error_response(&AppError::Validation(e.to_string())),
    };

    if let Err(e) = state.store.insert_ledger_entry(&entry).await {
        error!(error = %e, "Failed to insert ledger entry");
        return error_response(&AppError::Store("Failed to save ledger entry".into()));
    }

    // Mirror the movement to the finance spreadsheet; failures are
    // logged, never surfaced, since the entry is already saved.
    if let Err(e) = state.webhook.post("ledger_entry_recorded", &row).await {
        warn!(error = %e, order_number = %order_number, "Webhook post failed");
    }

    let entries = match state.store.list_ledger_entries(&order_number).await {
        Ok(entries) => entries,
        Err(e) => {
            error!(error = %e, "Failed to reload ledger entries");
            return error_response(&AppError::Store("Failed to reload ledger entries".into()));
        }
    };
    let summary = reconcile(order.total_amount, &entries);

    (
        StatusCode::CREATED,
        Json(LedgerResponse {
            order,
            entries,
            summary,
        }),
    )
        .into_response()
}

/// DELETE /ledger/{entry_id}
#[axum::debug_handler]
async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<LedgerEntryId>,
) -> impl IntoResponse {
    match state.store.delete_ledger_entry(entry_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete ledger entry");
            error_response(&AppError::Store("Failed to delete ledger entry".into()))
        }
    }
}
