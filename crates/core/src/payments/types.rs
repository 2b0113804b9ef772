//! Payment ledger domain types.
//!
//! Ledger entries are append-only monetary movements against an order,
//! keyed by the order's business number. Amounts are stored as
//! non-negative magnitudes; the sign semantics live in [`EntryKind`].

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tourdesk_shared::types::{LedgerEntryId, OrderId, TourId};

/// Kind of monetary movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Money received from the customer.
    Payment,
    /// Money returned to the customer.
    Refund,
    /// Reduction of the amount owed.
    Discount,
    /// Increase of the amount owed.
    Adjustment,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payment => write!(f, "payment"),
            Self::Refund => write!(f, "refund"),
            Self::Discount => write!(f, "discount"),
            Self::Adjustment => write!(f, "adjustment"),
        }
    }
}

/// One monetary movement against an order.
///
/// Entries are inserted or deleted, never edited; the summary is
/// recomputed from the full entry list on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier.
    pub id: LedgerEntryId,
    /// Business key of the order this entry belongs to.
    pub order_number: String,
    /// Kind of movement.
    pub kind: EntryKind,
    /// Non-negative magnitude; sign semantics come from `kind`.
    pub amount: Decimal,
    /// Payment method (payments only).
    pub method: Option<String>,
    /// External reference (receipt or transfer id).
    pub reference: Option<String>,
    /// Optional staff notes.
    pub notes: Option<String>,
    /// Staff member who recorded the entry.
    pub recorded_by: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A booking order, read-only to this crate.
///
/// Only `total_amount` feeds the calculator; the remaining fields travel
/// through to dashboard views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier.
    pub id: OrderId,
    /// Business key used by ledger entries.
    pub order_number: String,
    /// Customer display name.
    pub customer_name: String,
    /// Booked tour, if linked.
    pub tour_id: Option<TourId>,
    /// Travel date, if set.
    pub travel_date: Option<NaiveDate>,
    /// Nominal order total the ledger reconciles against.
    pub total_amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Derived payment status of an order.
///
/// Never stored; recomputed from the current entry list on every read. A
/// `refunded` order returns to `deposit` if a new payment is recorded
/// later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing effective has been paid.
    Unpaid,
    /// Partially paid, no refunds.
    Deposit,
    /// Paid in full.
    Paid,
    /// Paid more than the adjusted total.
    Overpaid,
    /// Refunds exist but some payment remains.
    PartialRefund,
    /// Refunds have consumed all payments.
    Refunded,
}

impl PaymentStatus {
    /// Returns true if any refund activity is reflected in this status.
    #[must_use]
    pub const fn has_refund_activity(self) -> bool {
        matches!(self, Self::PartialRefund | Self::Refunded)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unpaid => write!(f, "unpaid"),
            Self::Deposit => write!(f, "deposit"),
            Self::Paid => write!(f, "paid"),
            Self::Overpaid => write!(f, "overpaid"),
            Self::PartialRefund => write!(f, "partial_refund"),
            Self::Refunded => write!(f, "refunded"),
        }
    }
}

/// Aggregated view of an order's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Sum of payment magnitudes.
    pub total_paid: Decimal,
    /// Sum of refund magnitudes.
    pub total_refunded: Decimal,
    /// Sum of discount magnitudes.
    pub total_discounts: Decimal,
    /// Sum of adjustment magnitudes.
    pub total_adjustments: Decimal,
    /// Payments net of refunds; may be negative.
    pub effective_paid: Decimal,
    /// Order total after discounts and adjustments.
    pub adjusted_total: Decimal,
    /// Amount still owed, floored at zero.
    pub balance_due: Decimal,
    /// Derived payment status.
    pub status: PaymentStatus,
}
