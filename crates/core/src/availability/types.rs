//! Availability domain types: blocks, blocking rules, and day patterns.
//!
//! A [`Block`] removes availability from a tour (optionally scoped to a
//! provider and program) for some computed set of calendar dates. The set
//! is described by a [`BlockRule`], optionally refined by a [`DayPattern`].

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tourdesk_shared::types::{BlockId, ProviderId, TourId};

/// Weekday as the fixed two-letter code used on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    /// Monday.
    Mo,
    /// Tuesday.
    Tu,
    /// Wednesday.
    We,
    /// Thursday.
    Th,
    /// Friday.
    Fr,
    /// Saturday.
    Sa,
    /// Sunday.
    Su,
}

impl Weekday {
    /// Returns the weekday of the given calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Self::Mo,
            chrono::Weekday::Tue => Self::Tu,
            chrono::Weekday::Wed => Self::We,
            chrono::Weekday::Thu => Self::Th,
            chrono::Weekday::Fri => Self::Fr,
            chrono::Weekday::Sat => Self::Sa,
            chrono::Weekday::Sun => Self::Su,
        }
    }

    /// Returns the two-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Mo => "Mo",
            Self::Tu => "Tu",
            Self::We => "We",
            Self::Th => "Th",
            Self::Fr => "Fr",
            Self::Sa => "Sa",
            Self::Su => "Su",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mo" => Ok(Self::Mo),
            "Tu" => Ok(Self::Tu),
            "We" => Ok(Self::We),
            "Th" => Ok(Self::Th),
            "Fr" => Ok(Self::Fr),
            "Sa" => Ok(Self::Sa),
            "Su" => Ok(Self::Su),
            _ => Err(format!("Unknown weekday code: {s}")),
        }
    }
}

/// Optional day-level refinement of a blocking rule.
///
/// The raw rows carry two independently optional sets; ingestion collapses
/// them into this tagged union (weekday set wins when both are populated),
/// so rule dispatch never needs a tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPattern {
    /// No day refinement. What this means depends on the rule: `always`
    /// and `date_range` treat it as "every day in scope", `recurring`
    /// treats it as "no day at all".
    Unrestricted,
    /// Only the listed weekdays.
    Weekdays(BTreeSet<Weekday>),
    /// Only the listed days of the month (1-31).
    DaysOfMonth(BTreeSet<u8>),
}

impl DayPattern {
    /// Returns true if the date satisfies this refinement.
    ///
    /// `Unrestricted` matches every date; the caller is responsible for
    /// the `recurring` rule's inverted default.
    #[must_use]
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Weekdays(days) => days.contains(&Weekday::from_date(date)),
            Self::DaysOfMonth(days) => {
                // Day-of-month always fits in u8.
                #[allow(clippy::cast_possible_truncation)]
                let day = date.day() as u8;
                days.contains(&day)
            }
        }
    }

    /// Returns true if this pattern carries no day restriction.
    #[must_use]
    pub const fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }
}

/// The rule describing which dates a block covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "block_type", rename_all = "snake_case")]
pub enum BlockRule {
    /// Covers every date, optionally refined by a day pattern.
    Always {
        /// Optional day refinement; `Unrestricted` covers every date.
        pattern: DayPattern,
    },
    /// Covers exactly one date.
    OneDay {
        /// The single blocked date.
        date: NaiveDate,
    },
    /// Covers an inclusive date range, optionally refined by a day pattern.
    DateRange {
        /// First covered date.
        start: NaiveDate,
        /// Last covered date (inclusive).
        end: NaiveDate,
        /// Optional day refinement; `Unrestricted` covers the whole range.
        pattern: DayPattern,
    },
    /// Covers the dates matched by the day pattern alone. A recurring
    /// rule with no pattern covers nothing (it is a no-op, not universal).
    Recurring {
        /// Day pattern; `Unrestricted` covers nothing here.
        pattern: DayPattern,
    },
}

impl BlockRule {
    /// Returns the wire-level kind label of this rule.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::Always { .. } => BlockKind::Always,
            Self::OneDay { .. } => BlockKind::OneDay,
            Self::DateRange { .. } => BlockKind::DateRange,
            Self::Recurring { .. } => BlockKind::Recurring,
        }
    }
}

/// Block kind discriminant as stored in the `block_type` row column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Unconditional block (optionally day-refined).
    Always,
    /// Single-date block.
    OneDay,
    /// Inclusive date-range block.
    DateRange,
    /// Day-pattern-only block.
    Recurring,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::OneDay => write!(f, "one_day"),
            Self::DateRange => write!(f, "date_range"),
            Self::Recurring => write!(f, "recurring"),
        }
    }
}

/// A rule removing tour availability for some computed set of dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Unique identifier.
    pub id: BlockId,
    /// The tour this block applies to.
    pub tour_id: TourId,
    /// Optional provider scope.
    pub provider_id: Option<ProviderId>,
    /// Optional program label scope.
    pub program: Option<String>,
    /// The rule describing which dates are covered.
    #[serde(flatten)]
    pub rule: BlockRule,
    /// Free-form reason category label.
    pub reason: String,
    /// Optional staff notes.
    pub notes: Option<String>,
    /// Advisory flag; nothing in this crate unblocks automatically.
    pub auto_unblock: bool,
    /// Inactive blocks never cover any date.
    pub is_active: bool,
}
