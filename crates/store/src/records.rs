//! Raw row shapes and fail-closed ingestion into core records.
//!
//! The hosted store serves rows with two independently optional day
//! pattern columns and free-form type labels. Ingestion collapses each
//! row into the typed core shape, skipping rows it cannot represent:
//! the calendar and ledger must keep rendering over partially-migrated
//! data, so a bad row is a warning, never a request failure.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use tourdesk_core::availability::{Block, BlockRule, DayPattern, Weekday};
use tourdesk_core::payments::{EntryKind, LedgerEntry, Order};
use tourdesk_shared::types::{BlockId, LedgerEntryId, OrderId, ProviderId, TourId};

use crate::error::RecordError;

fn default_true() -> bool {
    true
}

/// Availability block row as served by the hosted store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRow {
    /// Row id.
    pub id: BlockId,
    /// Tour the block applies to.
    pub tour_id: TourId,
    /// Optional provider scope.
    #[serde(default)]
    pub provider_id: Option<ProviderId>,
    /// Optional program label scope.
    #[serde(default)]
    pub program: Option<String>,
    /// Block type label (`always`, `one_day`, `date_range`, `recurring`).
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
    #[serde(default)]
    pub reason: String,
    /// Optional staff notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Advisory auto-unblock flag.
    #[serde(default)]
    pub auto_unblock: bool,
    /// Activation gate; missing means active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Collapses the two optional pattern columns into a tagged pattern.
///
/// The weekday set wins when both columns are somehow populated; the UI
/// normally prevents that state, and this tie-break keeps ingestion
/// deterministic when it slips through.
fn day_pattern(weekdays: &[String], days_of_month: &[u8]) -> Result<DayPattern, RecordError> {
    if !weekdays.is_empty() {
        let parsed = weekdays
            .iter()
            .map(|code| {
                Weekday::from_str(code).map_err(|_| RecordError::UnknownWeekday(code.clone()))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;
        return Ok(DayPattern::Weekdays(parsed));
    }
    if !days_of_month.is_empty() {
        let mut set = BTreeSet::new();
        for &day in days_of_month {
            if !(1..=31).contains(&day) {
                return Err(RecordError::DayOfMonthOutOfRange(day));
            }
            set.insert(day);
        }
        return Ok(DayPattern::DaysOfMonth(set));
    }
    Ok(DayPattern::Unrestricted)
}

impl TryFrom<BlockRow> for Block {
    type Error = RecordError;

    fn try_from(row: BlockRow) -> Result<Self, Self::Error> {
        let pattern = day_pattern(&row.blocked_weekdays, &row.blocked_days_of_month)?;

        let rule = match row.block_type.as_str() {
            "always" => BlockRule::Always { pattern },
            "one_day" => BlockRule::OneDay {
                date: row.blocked_date.ok_or(RecordError::MissingDate {
                    block_type: "one_day",
                    field: "blocked_date",
                })?,
            },
            "date_range" => BlockRule::DateRange {
                start: row.start_date.ok_or(RecordError::MissingDate {
                    block_type: "date_range",
                    field: "start_date",
                })?,
                end: row.end_date.ok_or(RecordError::MissingDate {
                    block_type: "date_range",
                    field: "end_date",
                })?,
                pattern,
            },
            "recurring" => BlockRule::Recurring { pattern },
            other => return Err(RecordError::UnknownBlockType(other.to_string())),
        };

        Ok(Self {
            id: row.id,
            tour_id: row.tour_id,
            provider_id: row.provider_id,
            program: row.program,
            rule,
            reason: row.reason,
            notes: row.notes,
            auto_unblock: row.auto_unblock,
            is_active: row.is_active,
        })
    }
}

impl From<&Block> for BlockRow {
    fn from(block: &Block) -> Self {
        let mut row = Self {
            id: block.id,
            tour_id: block.tour_id,
            provider_id: block.provider_id,
            program: block.program.clone(),
            block_type: block.rule.kind().to_string(),
            blocked_date: None,
            start_date: None,
            end_date: None,
            blocked_weekdays: Vec::new(),
            blocked_days_of_month: Vec::new(),
            reason: block.reason.clone(),
            notes: block.notes.clone(),
            auto_unblock: block.auto_unblock,
            is_active: block.is_active,
        };

        match &block.rule {
            BlockRule::Always { pattern } | BlockRule::Recurring { pattern } => {
                apply_pattern(&mut row, pattern);
            }
            BlockRule::OneDay { date } => row.blocked_date = Some(*date),
            BlockRule::DateRange {
                start,
                end,
                pattern,
            } => {
                row.start_date = Some(*start);
                row.end_date = Some(*end);
                apply_pattern(&mut row, pattern);
            }
        }

        row
    }
}

fn apply_pattern(row: &mut BlockRow, pattern: &DayPattern) {
    match pattern {
        DayPattern::Unrestricted => {}
        DayPattern::Weekdays(days) => {
            row.blocked_weekdays = days.iter().map(|d| d.code().to_string()).collect();
        }
        DayPattern::DaysOfMonth(days) => {
            row.blocked_days_of_month = days.iter().copied().collect();
        }
    }
}

/// Ledger entry row as served by the hosted store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryRow {
    /// Row id.
    pub id: LedgerEntryId,
    /// Order business key.
    pub order_number: String,
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
    /// Staff member who recorded the entry.
    #[serde(default)]
    pub recorded_by: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<LedgerEntryRow> for LedgerEntry {
    type Error = RecordError;

    fn try_from(row: LedgerEntryRow) -> Result<Self, Self::Error> {
        let kind = match row.entry_type.as_str() {
            "payment" => EntryKind::Payment,
            "refund" => EntryKind::Refund,
            "discount" => EntryKind::Discount,
            "adjustment" => EntryKind::Adjustment,
            other => return Err(RecordError::UnknownEntryType(other.to_string())),
        };
        if row.amount < Decimal::ZERO {
            return Err(RecordError::NegativeAmount(row.amount));
        }

        Ok(Self {
            id: row.id,
            order_number: row.order_number,
            kind,
            amount: row.amount,
            method: row.method,
            reference: row.reference,
            notes: row.notes,
            recorded_by: row.recorded_by,
            created_at: row.created_at,
        })
    }
}

impl From<&LedgerEntry> for LedgerEntryRow {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: entry.id,
            order_number: entry.order_number.clone(),
            entry_type: entry.kind.to_string(),
            amount: entry.amount,
            method: entry.method.clone(),
            reference: entry.reference.clone(),
            notes: entry.notes.clone(),
            recorded_by: entry.recorded_by.clone(),
            created_at: entry.created_at,
        }
    }
}

/// Booking order row as served by the hosted store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRow {
    /// Row id.
    pub id: OrderId,
    /// Order business key.
    pub order_number: String,
    /// Customer display name.
    #[serde(default)]
    pub customer_name: String,
    /// Booked tour, if linked.
    #[serde(default)]
    pub tour_id: Option<TourId>,
    /// Travel date, if set.
    #[serde(default)]
    pub travel_date: Option<NaiveDate>,
    /// Nominal order total.
    pub total_amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            order_number: row.order_number,
            customer_name: row.customer_name,
            tour_id: row.tour_id,
            travel_date: row.travel_date,
            total_amount: row.total_amount,
            created_at: row.created_at,
        }
    }
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            tour_id: order.tour_id,
            travel_date: order.travel_date,
            total_amount: order.total_amount,
            created_at: order.created_at,
        }
    }
}

/// Ingests raw block rows, skipping any the core cannot represent.
#[must_use]
pub fn blocks_from_values(values: Vec<Value>) -> Vec<Block> {
    values
        .into_iter()
        .filter_map(|value| {
            let row: BlockRow = match serde_json::from_value(value) {
                Ok(row) => row,
                Err(err) => {
                    warn!(error = %err, "Skipping undecodable block row");
                    return None;
                }
            };
            let id = row.id;
            match Block::try_from(row) {
                Ok(block) => Some(block),
                Err(err) => {
                    warn!(block_id = %id, error = %err, "Skipping malformed block row");
                    None
                }
            }
        })
        .collect()
}

/// Ingests raw ledger entry rows, skipping any the core cannot represent.
#[must_use]
pub fn entries_from_values(values: Vec<Value>) -> Vec<LedgerEntry> {
    values
        .into_iter()
        .filter_map(|value| {
            let row: LedgerEntryRow = match serde_json::from_value(value) {
                Ok(row) => row,
                Err(err) => {
                    warn!(error = %err, "Skipping undecodable ledger row");
                    return None;
                }
            };
            let id = row.id;
            match LedgerEntry::try_from(row) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(entry_id = %id, error = %err, "Skipping malformed ledger row");
                    None
                }
            }
        })
        .collect()
}

/// Ingests raw order rows, skipping any that fail to decode.
#[must_use]
pub fn orders_from_values(values: Vec<Value>) -> Vec<Order> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<OrderRow>(value) {
            Ok(row) => Some(Order::from(row)),
            Err(err) => {
                warn!(error = %err, "Skipping undecodable order row");
                None
            }
        })
        .collect()
}
