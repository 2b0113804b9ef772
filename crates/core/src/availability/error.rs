//! Error types for calendar operations.

use thiserror::Error;

/// Errors that can occur while building calendar views.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The year/month pair does not name a calendar month.
    #[error("Invalid calendar month: {year}-{month:02}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month (1-12).
        month: u32,
    },
}
