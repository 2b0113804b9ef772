//! The ledger reconciliation calculator.

use rust_decimal::Decimal;

use super::types::{EntryKind, LedgerEntry, LedgerSummary, PaymentStatus};

/// Reconciles an order's ledger entries against its nominal total.
///
/// All arithmetic is over non-negative magnitudes summed per entry kind:
///
/// - `effective_paid = total_paid - total_refunded` (not clamped; refunds
///   exceeding payments leave it negative)
/// - `adjusted_total = total_amount - total_discounts + total_adjustments`
///   (discounts reduce the amount owed, adjustment magnitudes always add;
///   a discount-like correction must be recorded as a `discount`)
/// - `balance_due = max(0, adjusted_total - effective_paid)` (overpayment
///   never yields a negative balance; it is signaled by the status)
///
/// Status classification, first match wins:
///
/// 1. refunds exist and `effective_paid <= 0` => `refunded`
/// 2. refunds exist and `effective_paid > 0` => `partial_refund`
/// 3. `effective_paid >= adjusted_total` and `adjusted_total > 0` =>
///    `overpaid` when strictly greater, else `paid`
/// 4. `effective_paid > 0` => `deposit`
/// 5. otherwise => `unpaid`
///
/// A fully-discounted order (`adjusted_total <= 0`) with no payments
/// therefore classifies as `unpaid`; that quirk is preserved on purpose.
#[must_use]
pub fn reconcile(total_amount: Decimal, entries: &[LedgerEntry]) -> LedgerSummary {
    let mut total_paid = Decimal::ZERO;
    let mut total_refunded = Decimal::ZERO;
    let mut total_discounts = Decimal::ZERO;
    let mut total_adjustments = Decimal::ZERO;

    for entry in entries {
        match entry.kind {
            EntryKind::Payment => total_paid += entry.amount,
            EntryKind::Refund => total_refunded += entry.amount,
            EntryKind::Discount => total_discounts += entry.amount,
            EntryKind::Adjustment => total_adjustments += entry.amount,
        }
    }

    let effective_paid = total_paid - total_refunded;
    let adjusted_total = total_amount - total_discounts + total_adjustments;
    let balance_due = (adjusted_total - effective_paid).max(Decimal::ZERO);
    let status = classify(total_refunded, effective_paid, adjusted_total);

    LedgerSummary {
        total_paid,
        total_refunded,
        total_discounts,
        total_adjustments,
        effective_paid,
        adjusted_total,
        balance_due,
        status,
    }
}

/// Applies the status precedence rules.
fn classify(
    total_refunded: Decimal,
    effective_paid: Decimal,
    adjusted_total: Decimal,
) -> PaymentStatus {
    if total_refunded > Decimal::ZERO {
        return if effective_paid <= Decimal::ZERO {
            PaymentStatus::Refunded
        } else {
            PaymentStatus::PartialRefund
        };
    }

    if effective_paid >= adjusted_total && adjusted_total > Decimal::ZERO {
        return if effective_paid > adjusted_total {
            PaymentStatus::Overpaid
        } else {
            PaymentStatus::Paid
        };
    }

    if effective_paid > Decimal::ZERO {
        PaymentStatus::Deposit
    } else {
        PaymentStatus::Unpaid
    }
}
