//! Month grid generation.
//!
//! A month is laid out as rows of seven slots, Sunday first. Slots before the
//! 1st and after the last day are `None`.

use chrono::{Datelike, Months, NaiveDate};

use crate::constants::DAYS_IN_WEEK;
use crate::day_key::DayKey;
use crate::error::CalGridResult;
use crate::month::YearMonth;

/// One row of the grid, Sunday at index 0.
pub type Week = [Option<u32>; DAYS_IN_WEEK];

/// Week-by-week layout of a single month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    month: YearMonth,
    weeks: Vec<Week>,
}

/// Build the grid for `month` (1-indexed) of `year`.
pub fn build_grid(year: i32, month: u32) -> CalGridResult<CalendarGrid> {
    Ok(CalendarGrid::for_month(YearMonth::new(year, month)?))
}

/// Number of days in `month` (1-indexed) of `year`.
pub fn days_in_month(year: i32, month: u32) -> CalGridResult<u32> {
    Ok(YearMonth::new(year, month)?.days_in_month())
}

/// Day-of-month of the day before the 1st of the following month.
pub(crate) fn month_length(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next_first| next_first.pred_opt())
        .map(|last| last.day())
        // Only December of chrono's last representable year lands here
        .unwrap_or(31)
}

impl CalendarGrid {
    pub fn for_month(month: YearMonth) -> Self {
        let days = month.days_in_month();
        let first_weekday = month.first_day().weekday().num_days_from_sunday() as usize;

        let mut weeks = Vec::new();
        let mut current: Week = [None; DAYS_IN_WEEK];

        for day in 1..=days {
            let weekday = (first_weekday + day as usize - 1) % DAYS_IN_WEEK;
            current[weekday] = Some(day);

            if weekday == DAYS_IN_WEEK - 1 || day == days {
                weeks.push(current);
                current = [None; DAYS_IN_WEEK];
            }
        }

        CalendarGrid { month, weeks }
    }

    pub fn year_month(&self) -> YearMonth {
        self.month
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Weekday (0 = Sunday) of the 1st, i.e. the number of leading blanks.
    pub fn first_weekday(&self) -> usize {
        self.weeks
            .first()
            .and_then(|week| week.iter().position(Option::is_some))
            .unwrap_or(0)
    }

    pub fn days_in_month(&self) -> u32 {
        self.days().last().unwrap_or(0)
    }

    /// All day numbers in order, skipping blanks.
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.weeks.iter().flat_map(|week| week.iter().flatten().copied())
    }

    /// Row and column of `day`, if the month has it.
    pub fn position_of(&self, day: u32) -> Option<(usize, usize)> {
        self.weeks.iter().enumerate().find_map(|(row, week)| {
            week.iter()
                .position(|slot| *slot == Some(day))
                .map(|col| (row, col))
        })
    }

    /// Key for a clicked cell.
    pub fn day_key(&self, day: u32) -> Option<DayKey> {
        DayKey::new(self.month.year(), self.month.month(), day).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(year: i32, month: u32) -> CalendarGrid {
        build_grid(year, month).unwrap()
    }

    // --- shape ---

    #[test]
    fn october_2026_starts_thursday_and_ends_saturday() {
        let g = grid(2026, 10);
        assert_eq!(g.first_weekday(), 4);
        assert_eq!(
            g.weeks()[0],
            [None, None, None, None, Some(1), Some(2), Some(3)]
        );
        assert_eq!(g.weeks().len(), 5);
        assert_eq!(
            g.weeks()[4],
            [Some(25), Some(26), Some(27), Some(28), Some(29), Some(30), Some(31)]
        );
    }

    #[test]
    fn sunday_start_has_no_leading_blanks() {
        let g = grid(2026, 3);
        assert_eq!(g.first_weekday(), 0);
        assert_eq!(g.weeks()[0], [1u32, 2, 3, 4, 5, 6, 7].map(Some));
        assert_eq!(
            g.weeks().last().unwrap(),
            &[Some(29), Some(30), Some(31), None, None, None, None]
        );
    }

    #[test]
    fn february_28_days_starting_sunday_is_four_full_rows() {
        let g = grid(2026, 2);
        assert_eq!(g.weeks().len(), 4);
        assert!(g.weeks().iter().all(|week| week.iter().all(Option::is_some)));
    }

    #[test]
    fn saturday_first_spans_six_rows() {
        let g = grid(2026, 8);
        assert_eq!(g.weeks().len(), 6);
        assert_eq!(g.weeks()[0][6], Some(1));
        assert_eq!(
            g.weeks()[5],
            [Some(30), Some(31), None, None, None, None, None]
        );
    }

    #[test]
    fn leap_years() {
        assert_eq!(grid(2024, 2).days_in_month(), 29);
        assert_eq!(grid(2023, 2).days_in_month(), 28);
        assert_eq!(grid(2000, 2).days_in_month(), 29);
        assert_eq!(grid(1900, 2).days_in_month(), 28);
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 12).unwrap(), 31);
        assert_eq!(days_in_month(2023, 4).unwrap(), 30);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(build_grid(2024, 0).is_err());
        assert!(build_grid(2024, 13).is_err());
        assert!(days_in_month(2024, 13).is_err());
    }

    // --- properties over many months ---

    #[test]
    fn every_day_appears_once_in_order() {
        for year in 1990..=2040 {
            for month in 1..=12 {
                let g = grid(year, month);
                let expected: Vec<u32> = (1..=days_in_month(year, month).unwrap()).collect();
                let actual: Vec<u32> = g.days().collect();
                assert_eq!(actual, expected, "{year}-{month}");
            }
        }
    }

    #[test]
    fn blanks_only_at_edges() {
        for year in 1990..=2040 {
            for month in 1..=12 {
                let g = grid(year, month);
                let weeks = g.weeks();
                let last = weeks.len() - 1;

                for (i, week) in weeks.iter().enumerate() {
                    let filled: Vec<bool> = week.iter().map(Option::is_some).collect();
                    if i != 0 && i != last {
                        assert!(filled.iter().all(|f| *f), "{year}-{month} row {i}");
                    }
                    if i == 0 {
                        // Contiguous blank prefix
                        let first = filled.iter().position(|f| *f).unwrap();
                        assert!(filled[first..].iter().all(|f| *f) || i == last);
                        assert!(filled[..first].iter().all(|f| !*f));
                    }
                    if i == last {
                        // Contiguous blank suffix
                        let end = filled.iter().rposition(|f| *f).unwrap();
                        assert!(filled[end + 1..].iter().all(|f| !*f));
                        let start = if i == 0 { g.first_weekday() } else { 0 };
                        assert!(filled[start..=end].iter().all(|f| *f));
                    }
                }
            }
        }
    }

    #[test]
    fn first_slot_matches_chrono_weekday() {
        for month in 1..=12 {
            let g = grid(2025, month);
            let first = NaiveDate::from_ymd_opt(2025, month, 1).unwrap();
            assert_eq!(
                g.position_of(1),
                Some((0, first.weekday().num_days_from_sunday() as usize))
            );
        }
    }

    // --- helpers ---

    #[test]
    fn day_key_for_cells() {
        let g = grid(2024, 2);
        assert_eq!(g.day_key(29), Some(DayKey::new(2024, 2, 29).unwrap()));
        assert_eq!(g.day_key(30), None);
        assert_eq!(g.position_of(30), None);
    }
}
