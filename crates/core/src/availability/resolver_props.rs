//! Property-based tests for the block resolver.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use tourdesk_shared::types::{BlockId, TourId};

use super::resolver::is_date_blocked;
use super::types::{Block, BlockRule, DayPattern, Weekday};

/// Strategy for dates between 2020-01-01 and roughly 2030.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..3653).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

/// Strategy for a single weekday code.
fn any_weekday() -> impl Strategy<Value = Weekday> {
    prop_oneof![
        Just(Weekday::Mo),
        Just(Weekday::Tu),
        Just(Weekday::We),
        Just(Weekday::Th),
        Just(Weekday::Fr),
        Just(Weekday::Sa),
        Just(Weekday::Su),
    ]
}

/// Strategy for a non-empty weekday set.
fn weekday_set() -> impl Strategy<Value = BTreeSet<Weekday>> {
    prop::collection::btree_set(any_weekday(), 1..=7)
}

/// Strategy for a non-empty day-of-month set.
fn day_of_month_set() -> impl Strategy<Value = BTreeSet<u8>> {
    prop::collection::btree_set(1u8..=31, 1..=10)
}

/// Strategy for any day pattern, including `Unrestricted`.
fn any_pattern() -> impl Strategy<Value = DayPattern> {
    prop_oneof![
        Just(DayPattern::Unrestricted),
        weekday_set().prop_map(DayPattern::Weekdays),
        day_of_month_set().prop_map(DayPattern::DaysOfMonth),
    ]
}

/// Strategy for any blocking rule.
fn any_rule() -> impl Strategy<Value = BlockRule> {
    prop_oneof![
        any_pattern().prop_map(|pattern| BlockRule::Always { pattern }),
        any_date().prop_map(|date| BlockRule::OneDay { date }),
        (any_date(), 0u64..120, any_pattern()).prop_map(|(start, span, pattern)| {
            BlockRule::DateRange {
                start,
                end: start.checked_add_days(Days::new(span)).unwrap(),
                pattern,
            }
        }),
        any_pattern().prop_map(|pattern| BlockRule::Recurring { pattern }),
    ]
}

fn block_with(rule: BlockRule, is_active: bool) -> Block {
    Block {
        id: BlockId::new(),
        tour_id: TourId::new(),
        provider_id: None,
        program: None,
        rule,
        reason: "reason".to_string(),
        notes: None,
        auto_unblock: false,
        is_active,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// An inactive block never covers any date, whatever its rule.
    #[test]
    fn prop_inactive_never_blocks(rule in any_rule(), date in any_date()) {
        let block = block_with(rule, false);
        prop_assert!(!is_date_blocked(date, &block));
    }

    /// An unrestricted `always` block covers every date.
    #[test]
    fn prop_always_unrestricted_blocks_everything(date in any_date()) {
        let block = block_with(
            BlockRule::Always { pattern: DayPattern::Unrestricted },
            true,
        );
        prop_assert!(is_date_blocked(date, &block));
    }

    /// An unrestricted `recurring` block covers no date.
    #[test]
    fn prop_recurring_unrestricted_blocks_nothing(date in any_date()) {
        let block = block_with(
            BlockRule::Recurring { pattern: DayPattern::Unrestricted },
            true,
        );
        prop_assert!(!is_date_blocked(date, &block));
    }

    /// A `one_day` block covers exactly its own date.
    #[test]
    fn prop_one_day_exact_equality(blocked in any_date(), probe in any_date()) {
        let block = block_with(BlockRule::OneDay { date: blocked }, true);
        prop_assert_eq!(is_date_blocked(probe, &block), probe == blocked);
    }

    /// An unrestricted `date_range` block covers exactly the inclusive range.
    #[test]
    fn prop_date_range_inclusive(start in any_date(), span in 0u64..120, probe in any_date()) {
        let end = start.checked_add_days(Days::new(span)).unwrap();
        let block = block_with(
            BlockRule::DateRange { start, end, pattern: DayPattern::Unrestricted },
            true,
        );
        prop_assert_eq!(is_date_blocked(probe, &block), start <= probe && probe <= end);
    }

    /// A weekday-patterned `always` block covers a date iff its weekday is listed.
    #[test]
    fn prop_always_weekday_pattern_matches_weekday(days in weekday_set(), probe in any_date()) {
        let expected = days.contains(&Weekday::from_date(probe));
        let block = block_with(
            BlockRule::Always { pattern: DayPattern::Weekdays(days) },
            true,
        );
        prop_assert_eq!(is_date_blocked(probe, &block), expected);
    }

    /// `always` and `recurring` agree whenever a real pattern is present.
    #[test]
    fn prop_always_and_recurring_agree_on_real_patterns(
        days in weekday_set(),
        probe in any_date(),
    ) {
        let always = block_with(
            BlockRule::Always { pattern: DayPattern::Weekdays(days.clone()) },
            true,
        );
        let recurring = block_with(
            BlockRule::Recurring { pattern: DayPattern::Weekdays(days) },
            true,
        );
        prop_assert_eq!(
            is_date_blocked(probe, &always),
            is_date_blocked(probe, &recurring)
        );
    }
}
