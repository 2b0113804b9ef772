//! Property-based tests for the ledger reconciliation calculator.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tourdesk_shared::types::LedgerEntryId;

use super::reconcile::reconcile;
use super::types::{EntryKind, LedgerEntry, PaymentStatus};

/// Strategy for non-negative magnitudes up to 100,000.00.
fn magnitude() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for an entry kind.
fn any_kind() -> impl Strategy<Value = EntryKind> {
    prop_oneof![
        Just(EntryKind::Payment),
        Just(EntryKind::Refund),
        Just(EntryKind::Discount),
        Just(EntryKind::Adjustment),
    ]
}

/// Strategy for a ledger entry.
fn any_entry() -> impl Strategy<Value = LedgerEntry> {
    (any_kind(), magnitude()).prop_map(|(kind, amount)| LedgerEntry {
        id: LedgerEntryId::new(),
        order_number: "ORD-1001".to_string(),
        kind,
        amount,
        method: None,
        reference: None,
        notes: None,
        recorded_by: None,
        created_at: Utc::now(),
    })
}

/// Strategy for a ledger of up to 20 entries.
fn any_ledger() -> impl Strategy<Value = Vec<LedgerEntry>> {
    prop::collection::vec(any_entry(), 0..20)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Balance due is never negative.
    #[test]
    fn prop_balance_due_never_negative(total in magnitude(), entries in any_ledger()) {
        let summary = reconcile(total, &entries);
        prop_assert!(summary.balance_due >= Decimal::ZERO);
    }

    /// Per-kind sums are order-independent.
    #[test]
    fn prop_order_independent(total in magnitude(), entries in any_ledger()) {
        let forward = reconcile(total, &entries);
        let mut reversed = entries;
        reversed.reverse();
        let backward = reconcile(total, &reversed);
        prop_assert_eq!(forward, backward);
    }

    /// The summary's derived fields satisfy their defining identities.
    #[test]
    fn prop_summary_identities(total in magnitude(), entries in any_ledger()) {
        let s = reconcile(total, &entries);
        prop_assert_eq!(s.effective_paid, s.total_paid - s.total_refunded);
        prop_assert_eq!(
            s.adjusted_total,
            total - s.total_discounts + s.total_adjustments
        );
        prop_assert_eq!(
            s.balance_due,
            (s.adjusted_total - s.effective_paid).max(Decimal::ZERO)
        );
    }

    /// Refund statuses appear exactly when refund entries exist.
    #[test]
    fn prop_refund_status_iff_refunds(total in magnitude(), entries in any_ledger()) {
        let s = reconcile(total, &entries);
        let has_refunds = s.total_refunded > Decimal::ZERO;
        prop_assert_eq!(s.status.has_refund_activity(), has_refunds);
    }

    /// Paid/overpaid require a positive adjusted total.
    #[test]
    fn prop_paid_requires_positive_adjusted_total(total in magnitude(), entries in any_ledger()) {
        let s = reconcile(total, &entries);
        if matches!(s.status, PaymentStatus::Paid | PaymentStatus::Overpaid) {
            prop_assert!(s.adjusted_total > Decimal::ZERO);
            prop_assert!(s.effective_paid >= s.adjusted_total);
        }
    }

    /// Appending a payment never increases the balance due.
    #[test]
    fn prop_payment_never_increases_balance(
        total in magnitude(),
        entries in any_ledger(),
        amount in magnitude(),
    ) {
        let before = reconcile(total, &entries);
        let mut extended = entries;
        extended.push(LedgerEntry {
            id: LedgerEntryId::new(),
            order_number: "ORD-1001".to_string(),
            kind: EntryKind::Payment,
            amount,
            method: Some("cash".to_string()),
            reference: None,
            notes: None,
            recorded_by: None,
            created_at: Utc::now(),
        });
        let after = reconcile(total, &extended);
        prop_assert!(after.balance_due <= before.balance_due);
    }
}
