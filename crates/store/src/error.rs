//! Error types for the store boundary.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while talking to the hosted row store or the
/// workflow webhook.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Row store rejected the request with status {status}")]
    Rejected {
        /// HTTP status code returned by the service.
        status: u16,
    },

    /// The response body could not be decoded as row JSON.
    #[error("Failed to decode row payload: {0}")]
    Decode(String),
}

/// Reasons a raw row fails ingestion into a typed record.
///
/// Ingestion is fail-closed: these errors cause the offending row to be
/// skipped with a warning, never to fail the surrounding request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The `block_type` column holds an unrecognized label.
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// A date column required by the row's block type is missing.
    #[error("Missing {field} for {block_type} block")]
    MissingDate {
        /// The block type requiring the column.
        block_type: &'static str,
        /// The missing column.
        field: &'static str,
    },

    /// A weekday code outside the `Mo`-`Su` enumeration.
    #[error("Unknown weekday code: {0}")]
    UnknownWeekday(String),

    /// A day-of-month outside 1-31.
    #[error("Day of month out of range: {0}")]
    DayOfMonthOutOfRange(u8),

    /// The `entry_type` column holds an unrecognized label.
    #[error("Unknown entry type: {0}")]
    UnknownEntryType(String),

    /// A ledger amount below zero; magnitudes are stored non-negative.
    #[error("Negative amount: {0}")]
    NegativeAmount(Decimal),
}
