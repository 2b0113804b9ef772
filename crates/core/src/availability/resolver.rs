//! The block resolver: does a block cover a given calendar date?

use chrono::NaiveDate;

use super::types::{Block, BlockRule, DayPattern};

/// Returns true if `date` is covered by `block`.
///
/// Pure function of its two inputs. Semantics per rule:
///
/// - An inactive block never covers any date, regardless of rule.
/// - `always`: covered when the day pattern matches; with no pattern,
///   every date is covered.
/// - `one_day`: covered only on the exact blocked date.
/// - `date_range`: covered when the date lies within the inclusive range
///   and the day pattern matches; with no pattern, the whole range is
///   covered.
/// - `recurring`: covered when the day pattern matches; with no pattern,
///   nothing is covered. This asymmetry with `always` is intentional.
#[must_use]
pub fn is_date_blocked(date: NaiveDate, block: &Block) -> bool {
    if !block.is_active {
        return false;
    }

    match &block.rule {
        BlockRule::Always { pattern } => pattern.matches_date(date),
        BlockRule::OneDay { date: blocked } => date == *blocked,
        BlockRule::DateRange {
            start,
            end,
            pattern,
        } => *start <= date && date <= *end && pattern.matches_date(date),
        BlockRule::Recurring { pattern } => match pattern {
            // A recurring rule with no pattern is a no-op, not universal.
            DayPattern::Unrestricted => false,
            restricted => restricted.matches_date(date),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::types::Weekday;
    use tourdesk_shared::types::{BlockId, TourId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn block(rule: BlockRule) -> Block {
        Block {
            id: BlockId::new(),
            tour_id: TourId::new(),
            provider_id: None,
            program: None,
            rule,
            reason: "maintenance".to_string(),
            notes: None,
            auto_unblock: false,
            is_active: true,
        }
    }

    #[test]
    fn test_inactive_block_never_matches() {
        let rules = [
            BlockRule::Always {
                pattern: DayPattern::Unrestricted,
            },
            BlockRule::OneDay {
                date: date(2025, 6, 15),
            },
            BlockRule::DateRange {
                start: date(2025, 1, 1),
                end: date(2025, 12, 31),
                pattern: DayPattern::Unrestricted,
            },
            BlockRule::Recurring {
                pattern: DayPattern::Weekdays([Weekday::Su].into()),
            },
        ];
        for rule in rules {
            let mut b = block(rule);
            b.is_active = false;
            assert!(!is_date_blocked(date(2025, 6, 15), &b));
        }
    }

    #[test]
    fn test_always_with_no_pattern_matches_every_date() {
        let b = block(BlockRule::Always {
            pattern: DayPattern::Unrestricted,
        });
        let mut day = date(2025, 1, 1);
        while day <= date(2025, 12, 31) {
            assert!(is_date_blocked(day, &b), "expected {day} to be blocked");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_always_with_weekday_pattern() {
        let b = block(BlockRule::Always {
            pattern: DayPattern::Weekdays([Weekday::Mo].into()),
        });
        assert!(is_date_blocked(date(2025, 6, 16), &b)); // Monday
        assert!(!is_date_blocked(date(2025, 6, 17), &b)); // Tuesday
    }

    #[test]
    fn test_always_with_day_of_month_pattern() {
        let b = block(BlockRule::Always {
            pattern: DayPattern::DaysOfMonth([1u8].into()),
        });
        assert!(is_date_blocked(date(2025, 2, 1), &b));
        assert!(is_date_blocked(date(2025, 11, 1), &b));
        assert!(!is_date_blocked(date(2025, 11, 2), &b));
    }

    #[test]
    fn test_one_day_matches_only_its_date() {
        let b = block(BlockRule::OneDay {
            date: date(2025, 6, 15),
        });
        assert!(is_date_blocked(date(2025, 6, 15), &b));
        assert!(!is_date_blocked(date(2025, 6, 14), &b));
        assert!(!is_date_blocked(date(2025, 6, 16), &b));
    }

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let b = block(BlockRule::DateRange {
            start: date(2025, 7, 1),
            end: date(2025, 7, 10),
            pattern: DayPattern::Unrestricted,
        });
        assert!(is_date_blocked(date(2025, 7, 1), &b));
        assert!(is_date_blocked(date(2025, 7, 10), &b));
        assert!(!is_date_blocked(date(2025, 6, 30), &b));
        assert!(!is_date_blocked(date(2025, 7, 11), &b));
    }

    #[test]
    fn test_date_range_with_weekend_pattern() {
        let b = block(BlockRule::DateRange {
            start: date(2025, 7, 1),
            end: date(2025, 7, 31),
            pattern: DayPattern::Weekdays([Weekday::Sa, Weekday::Su].into()),
        });
        let mut day = date(2025, 7, 1);
        while day <= date(2025, 7, 31) {
            let weekend = matches!(Weekday::from_date(day), Weekday::Sa | Weekday::Su);
            assert_eq!(is_date_blocked(day, &b), weekend, "mismatch on {day}");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_date_range_pattern_outside_range_does_not_match() {
        let b = block(BlockRule::DateRange {
            start: date(2025, 7, 1),
            end: date(2025, 7, 31),
            pattern: DayPattern::Weekdays([Weekday::Sa].into()),
        });
        // 2025-08-02 is a Saturday, but outside the range.
        assert!(!is_date_blocked(date(2025, 8, 2), &b));
    }

    #[test]
    fn test_recurring_with_no_pattern_matches_nothing() {
        let b = block(BlockRule::Recurring {
            pattern: DayPattern::Unrestricted,
        });
        let mut day = date(2025, 1, 1);
        while day <= date(2025, 12, 31) {
            assert!(!is_date_blocked(day, &b), "expected {day} to be free");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_recurring_with_weekday_pattern() {
        let b = block(BlockRule::Recurring {
            pattern: DayPattern::Weekdays([Weekday::We].into()),
        });
        assert!(is_date_blocked(date(2025, 6, 18), &b)); // Wednesday
        assert!(!is_date_blocked(date(2025, 6, 19), &b)); // Thursday
    }

    #[test]
    fn test_recurring_with_day_of_month_pattern() {
        let b = block(BlockRule::Recurring {
            pattern: DayPattern::DaysOfMonth([31u8].into()),
        });
        assert!(is_date_blocked(date(2025, 1, 31), &b));
        assert!(is_date_blocked(date(2025, 3, 31), &b));
        // February has no 31st, so nothing matches there.
        assert!(!is_date_blocked(date(2025, 2, 28), &b));
    }
}
