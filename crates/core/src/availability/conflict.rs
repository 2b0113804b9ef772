//! Advisory conflict scanning for new or edited blocks.

use chrono::NaiveDate;
use tourdesk_shared::types::{BlockId, TourId};

use super::resolver::is_date_blocked;
use super::types::Block;

/// Returns every other active block covering `date` for the same tour.
///
/// Used when a staff member creates or edits a block, to warn about
/// restrictions that would stack on the same tour and date. The result is
/// advisory only; it never prevents a save.
///
/// The scan deliberately ignores provider and program scope: two blocks
/// targeting different providers of the same tour still stack on that
/// tour, which is the business concern being surfaced. When `exclude` is
/// set (editing an existing block), that record is skipped so a block
/// never conflicts with itself.
#[must_use]
pub fn find_conflicts<'a>(
    tour_id: TourId,
    date: NaiveDate,
    blocks: &'a [Block],
    exclude: Option<BlockId>,
) -> Vec<&'a Block> {
    blocks
        .iter()
        .filter(|b| b.tour_id == tour_id)
        .filter(|b| exclude != Some(b.id))
        .filter(|b| is_date_blocked(date, b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::types::{BlockRule, DayPattern, Weekday};
    use tourdesk_shared::types::ProviderId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn one_day_block(tour_id: TourId, provider_id: Option<ProviderId>, day: NaiveDate) -> Block {
        Block {
            id: BlockId::new(),
            tour_id,
            provider_id,
            program: None,
            rule: BlockRule::OneDay { date: day },
            reason: "weather".to_string(),
            notes: None,
            auto_unblock: false,
            is_active: true,
        }
    }

    #[test]
    fn test_same_tour_same_date_conflicts_across_providers() {
        let tour = TourId::new();
        let day = date(2025, 6, 15);
        let a = one_day_block(tour, Some(ProviderId::new()), day);
        let b = one_day_block(tour, Some(ProviderId::new()), day);
        let blocks = vec![a.clone(), b.clone()];

        // A third candidate on the same tour/date sees both.
        let conflicts = find_conflicts(tour, day, &blocks, None);
        assert_eq!(conflicts.len(), 2);

        // Each sees the other when edited.
        let conflicts = find_conflicts(tour, day, &blocks, Some(a.id));
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].id, b.id);
    }

    #[test]
    fn test_excluded_block_never_conflicts_with_itself() {
        let tour = TourId::new();
        let day = date(2025, 6, 15);
        let a = one_day_block(tour, None, day);
        let blocks = vec![a.clone()];

        let conflicts = find_conflicts(tour, day, &blocks, Some(a.id));
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_other_tour_never_conflicts() {
        let day = date(2025, 6, 15);
        let a = one_day_block(TourId::new(), None, day);
        let blocks = vec![a];

        let conflicts = find_conflicts(TourId::new(), day, &blocks, None);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_inactive_block_never_conflicts() {
        let tour = TourId::new();
        let day = date(2025, 6, 15);
        let mut a = one_day_block(tour, None, day);
        a.is_active = false;
        let blocks = vec![a];

        let conflicts = find_conflicts(tour, day, &blocks, None);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_range_and_recurring_blocks_conflict_on_covered_dates() {
        let tour = TourId::new();
        let range = Block {
            rule: BlockRule::DateRange {
                start: date(2025, 6, 1),
                end: date(2025, 6, 30),
                pattern: DayPattern::Unrestricted,
            },
            ..one_day_block(tour, None, date(2025, 1, 1))
        };
        let sundays = Block {
            rule: BlockRule::Recurring {
                pattern: DayPattern::Weekdays([Weekday::Su].into()),
            },
            ..one_day_block(tour, None, date(2025, 1, 1))
        };
        let blocks = vec![range, sundays];

        // 2025-06-15 is a Sunday inside the range: both conflict.
        assert_eq!(find_conflicts(tour, date(2025, 6, 15), &blocks, None).len(), 2);
        // 2025-06-16 is a Monday inside the range: only the range conflicts.
        assert_eq!(find_conflicts(tour, date(2025, 6, 16), &blocks, None).len(), 1);
        // Outside the range on a weekday: nothing.
        assert!(find_conflicts(tour, date(2025, 7, 1), &blocks, None).is_empty());
    }
}
