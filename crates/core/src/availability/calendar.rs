//! Calendar aggregation over the block set.
//!
//! These views are recomputed from the current block snapshot on every
//! call; nothing here caches across renders.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tourdesk_shared::types::{BlockId, ProviderId, TourId};

use super::error::CalendarError;
use super::resolver::is_date_blocked;
use super::types::Block;

/// Explicit filter parameters for the calendar view.
///
/// Filters narrow which blocks feed the aggregation; they are passed in
/// per call rather than held as ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockFilter {
    /// Restrict to a single tour.
    pub tour_id: Option<TourId>,
    /// Restrict to a single provider.
    pub provider_id: Option<ProviderId>,
    /// Restrict to a single program label.
    pub program: Option<String>,
}

impl BlockFilter {
    /// Returns true if the block passes every set filter field.
    #[must_use]
    pub fn accepts(&self, block: &Block) -> bool {
        if let Some(tour_id) = self.tour_id {
            if block.tour_id != tour_id {
                return false;
            }
        }
        if let Some(provider_id) = self.provider_id {
            if block.provider_id != Some(provider_id) {
                return false;
            }
        }
        if let Some(program) = &self.program {
            if block.program.as_deref() != Some(program.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Aggregated blocking information for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// The calendar day.
    pub date: NaiveDate,
    /// Number of distinct blocks covering this day.
    pub blocked_count: usize,
    /// Distinct reason labels among the covering blocks.
    pub reasons: BTreeSet<String>,
}

impl DayAvailability {
    /// Returns true if at least one block covers this day.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.blocked_count > 0
    }
}

/// One month of per-day blocking aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOverview {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// One entry per day of the month, in order.
    pub days: Vec<DayAvailability>,
}

/// Builds the per-day blocking overview for a calendar month.
///
/// Every day of the month is evaluated against each block that passes
/// `filter`; the result records the count of covering blocks and the
/// distinct set of their reason labels.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not 1-12.
pub fn month_overview(
    year: i32,
    month: u32,
    blocks: &[Block],
    filter: &BlockFilter,
) -> Result<MonthOverview, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidMonth { year, month })?;

    let filtered: Vec<&Block> = blocks.iter().filter(|b| filter.accepts(b)).collect();

    let days = first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|day| {
            let covering: Vec<&Block> = filtered
                .iter()
                .copied()
                .filter(|b| is_date_blocked(day, b))
                .collect();
            DayAvailability {
                date: day,
                blocked_count: covering.len(),
                reasons: covering.iter().map(|b| b.reason.clone()).collect(),
            }
        })
        .collect();

    Ok(MonthOverview { year, month, days })
}

/// A currently-blocked tour/provider/program combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedTour {
    /// The block producing this entry.
    pub block_id: BlockId,
    /// Blocked tour.
    pub tour_id: TourId,
    /// Provider scope of the block, if any.
    pub provider_id: Option<ProviderId>,
    /// Program scope of the block, if any.
    pub program: Option<String>,
    /// The block's reason label.
    pub reason: String,
}

/// Lists every tour/provider/program combination blocked on `today`.
///
/// Evaluated against the full block list, not a filtered one: this view
/// backs the live "blocked today" panel, which deliberately ignores the
/// calendar's user filters.
#[must_use]
pub fn blocked_today(today: NaiveDate, blocks: &[Block]) -> Vec<BlockedTour> {
    blocks
        .iter()
        .filter(|b| is_date_blocked(today, b))
        .map(|b| BlockedTour {
            block_id: b.id,
            tour_id: b.tour_id,
            provider_id: b.provider_id,
            program: b.program.clone(),
            reason: b.reason.clone(),
        })
        .collect()
}
