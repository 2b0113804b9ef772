//! Availability routes: calendar aggregation, blocked-today, block CRUD.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::AppState;
use tourdesk_core::availability::{
    Block, BlockFilter, BlockRule, blocked_today, find_conflicts, month_overview,
};
use tourdesk_shared::AppError;
use tourdesk_shared::types::{BlockId, ProviderId, TourId};
use tourdesk_store::BlockRow;

/// Creates the availability routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/availability/calendar", get(get_calendar))
        .route("/availability/blocked-today", get(get_blocked_today))
        .route("/blocks", get(list_blocks).post(create_block))
        .route("/blocks/{block_id}", patch(update_block).delete(delete_block))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the calendar view.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Restrict to a single tour.
    pub tour_id: Option<TourId>,
    /// Restrict to a single provider.
    pub provider_id: Option<ProviderId>,
    /// Restrict to a single program label.
    pub program: Option<String>,
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request body for creating or updating a block.
///
/// Carries the raw wire shape; validation happens through the same
/// ingestion path the row store uses, so the API and the store agree on
/// what a representable block is.
#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    /// Tour the block applies to.
    pub tour_id: TourId,
    /// Optional provider scope.
    #[serde(default)]
    pub provider_id: Option<ProviderId>,
    /// Optional program label scope.
    #[serde(default)]
    pub program: Option<String>,
    /// Block type label.
    pub block_type: String,
    /// Single blocked date (`one_day` only).
    #[serde(default)]
    pub blocked_date: Option<NaiveDate>,
    /// Range start (`date_range` only).
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Range end (`date_range` only).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Optional weekday-code refinement.
    #[serde(default)]
    pub blocked_weekdays: Vec<String>,
    /// Optional day-of-month refinement.
    #[serde(default)]
    pub blocked_days_of_month: Vec<u8>,
    /// Reason category label.
    pub reason: String,
    /// Optional staff notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Advisory auto-unblock flag.
    #[serde(default)]
    pub auto_unblock: bool,
    /// Activation gate.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl BlockRequest {
    /// Converts the request into a raw row carrying the given id.
    fn into_row(self, id: BlockId) -> BlockRow {
        BlockRow {
            id,
            tour_id: self.tour_id,
            provider_id: self.provider_id,
            program: self.program,
            block_type: self.block_type,
            blocked_date: self.blocked_date,
            start_date: self.start_date,
            end_date: self.end_date,
            blocked_weekdays: self.blocked_weekdays,
            blocked_days_of_month: self.blocked_days_of_month,
            reason: self.reason,
            notes: self.notes,
            auto_unblock: self.auto_unblock,
            is_active: self.is_active,
        }
    }
}

/// Response for a block create/update, with advisory conflicts.
#[derive(Debug, Serialize)]
pub struct BlockMutationResponse {
    /// The saved block.
    pub block: Block,
    /// Other active blocks stacking on the same tour and date. Advisory
    /// only; the save has already happened.
    pub conflicts: Vec<Block>,
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

/// The date a candidate block is probed on for conflict scanning.
///
/// Only single-date blocks have an unambiguous probe date; other kinds
/// produce no advisory warning.
const fn candidate_date(rule: &BlockRule) -> Option<NaiveDate> {
    match rule {
        BlockRule::OneDay { date } => Some(*date),
        _ => None,
    }
}

/// Computes the advisory conflict list for a candidate block.
fn conflicts_for(candidate: &Block, existing: &[Block], exclude: Option<BlockId>) -> Vec<Block> {
    let Some(date) = candidate_date(&candidate.rule) else {
        return Vec::new();
    };
    find_conflicts(candidate.tour_id, date, existing, exclude)
        .into_iter()
        .cloned()
        .collect()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /availability/calendar
///
/// Per-day block counts and distinct reasons for one month, narrowed by
/// the explicit filter parameters.
#[axum::debug_handler]
async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> impl IntoResponse {
    let blocks = match state.store.list_blocks().await {
        Ok(blocks) => blocks,
        Err(e) => {
            error!(error = %e, "Failed to load blocks");
            return error_response(&AppError::Store("Failed to load blocks".into()));
        }
    };

    let filter = BlockFilter {
        tour_id: query.tour_id,
        provider_id: query.provider_id,
        program: query.program,
    };

    match month_overview(query.year, query.month, &blocks, &filter) {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(e) => error_response(&AppError::Validation(e.to_string())),
    }
}

/// GET /availability/blocked-today
///
/// The unfiltered live list of currently-blocked tour/provider/program
/// combinations.
#[axum::debug_handler]
async fn get_blocked_today(State(state): State<AppState>) -> impl IntoResponse {
    let blocks = match state.store.list_blocks().await {
        Ok(blocks) => blocks,
        Err(e) => {
            error!(error = %e, "Failed to load blocks");
            return error_response(&AppError::Store("Failed to load blocks".into()));
        }
    };

    let today = chrono::Utc::now().date_naive();
    let blocked = blocked_today(today, &blocks);
    (StatusCode::OK, Json(blocked)).into_response()
}

/// GET /blocks
#[axum::debug_handler]
async fn list_blocks(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_blocks().await {
        Ok(blocks) => (StatusCode::OK, Json(blocks)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load blocks");
            error_response(&AppError::Store("Failed to load blocks".into()))
        }
    }
}

/// POST /blocks
///
/// Creates a block and reports advisory conflicts; a conflicting block
/// is still saved.
#[axum::debug_handler]
async fn create_block(
    State(state): State<AppState>,
    Json(request): Json<BlockRequest>,
) -> impl IntoResponse {
    let row = request.into_row(BlockId::new());
    let block = match Block::try_from(row) {
        Ok(block) => block,
        Err(e) => return error_response(&AppError::Validation(e.to_string())),
    };

    let existing = match state.store.list_blocks().await {
        Ok(blocks) => blocks,
        Err(e) => {
            error!(error = %e, "Failed to load blocks");
            return error_response(&AppError::Store("Failed to load blocks".into()));
        }
    };
    let conflicts = conflicts_for(&block, &existing, None);

    if let Err(e) = state.store.insert_block(&block).await {
        error!(error = %e, "Failed to insert block");
        return error_response(&AppError::Store("Failed to save block".into()));
    }

    (
        StatusCode::CREATED,
        Json(BlockMutationResponse { block, conflicts }),
    )
        .into_response()
}

/// PATCH /blocks/{block_id}
///
/// Replaces a block; the conflict scan excludes the record being edited.
#[axum::debug_handler]
async fn update_block(
    State(state): State<AppState>,
    Path(block_id): Path<BlockId>,
    Json(request): Json<BlockRequest>,
) -> impl IntoResponse {
    let row = request.into_row(block_id);
    let block = match Block::try_from(row) {
        Ok(block) => block,
        Err(e) => return error_response(&AppError::Validation(e.to_string())),
    };

    let existing = match state.store.list_blocks().await {
        Ok(blocks) => blocks,
        Err(e) => {
            error!(error = %e, "Failed to load blocks");
            return error_response(&AppError::Store("Failed to load blocks".into()));
        }
    };
    if !existing.iter().any(|b| b.id == block_id) {
        return error_response(&AppError::NotFound("Block not found".into()));
    }
    let conflicts = conflicts_for(&block, &existing, Some(block_id));

    if let Err(e) = state.store.update_block(&block).await {
        error!(error = %e, "Failed to update block");
        return error_response(&AppError::Store("Failed to save block".into()));
    }

    (
        StatusCode::OK,
        Json(BlockMutationResponse { block, conflicts }),
    )
        .into_response()
}

/// DELETE /blocks/{block_id}
#[axum::debug_handler]
async fn delete_block(
    State(state): State<AppState>,
    Path(block_id): Path<BlockId>,
) -> impl IntoResponse {
    match state.store.delete_block(block_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete block");
            error_response(&AppError::Store("Failed to delete block".into()))
        }
    }
}
