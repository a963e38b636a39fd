//! Month navigation.

use std::fmt;

use chrono::{Datelike, Local, Month, Months, NaiveDate};

use crate::error::{CalGridError, CalGridResult};
use crate::grid::{CalendarGrid, month_length};

/// A displayed month. `month` is 1-indexed, like `DayKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> CalGridResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CalGridError::InvalidDate(format!(
                "month {} is out of range 1-12",
                month
            )));
        }
        // Rejects years chrono can't represent
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            CalGridError::InvalidDate(format!("{}-{} is outside the supported range", year, month))
        })?;
        Ok(YearMonth { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Parse `YYYY-MM` (or `YYYY-M`).
    pub fn parse(s: &str) -> CalGridResult<Self> {
        let invalid = || CalGridError::InvalidDate(format!("'{}'. Expected YYYY-MM", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Move `offset` months forward (or back when negative).
    ///
    /// # Errors
    /// `CalGridError::InvalidDate` when the result is outside the range of
    /// representable dates.
    pub fn shift(&self, offset: i32) -> CalGridResult<Self> {
        let months = Months::new(offset.unsigned_abs());
        let first = if offset < 0 {
            self.first_day().checked_sub_months(months)
        } else {
            self.first_day().checked_add_months(months)
        };

        first.map(Self::from_date).ok_or_else(|| {
            CalGridError::InvalidDate(format!(
                "{} shifted by {} months is outside the supported range",
                self, offset
            ))
        })
    }

    pub fn next(&self) -> CalGridResult<Self> {
        self.shift(1)
    }

    pub fn prev(&self) -> CalGridResult<Self> {
        self.shift(-1)
    }

    /// English month name, e.g. "October".
    pub fn name(&self) -> &'static str {
        Month::try_from(self.month as u8)
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }

    pub fn first_day(&self) -> NaiveDate {
        // Every constructor checks the first day is representable
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        month_length(self.first_day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn grid(&self) -> CalendarGrid {
        CalendarGrid::for_month(*self)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}
