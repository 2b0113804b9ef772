//! Tour-availability blocking rules.
//!
//! This module implements the availability core:
//! - Block domain types (blocking rules and day patterns)
//! - The date resolver deciding whether a date is covered by a block
//! - The advisory conflict scanner for new/edited blocks
//! - Calendar month aggregation and the blocked-today derivation
//! - Error types for calendar operations

pub mod calendar;
pub mod conflict;
pub mod error;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod resolver_props;

pub use calendar::{
    BlockFilter, BlockedTour, DayAvailability, MonthOverview, blocked_today, month_overview,
};
pub use conflict::find_conflicts;
pub use error::CalendarError;
pub use resolver::is_date_blocked;
pub use types::{Block, BlockKind, BlockRule, DayPattern, Weekday};
