//! Order payment ledger reconciliation.
//!
//! This module implements the payments core:
//! - Ledger entry and order domain types
//! - Payment status classification
//! - The reconciliation calculator deriving a ledger summary

pub mod reconcile;
pub mod types;

#[cfg(test)]
mod reconcile_props;

pub use reconcile::reconcile;
pub use types::{EntryKind, LedgerEntry, LedgerSummary, Order, PaymentStatus};
