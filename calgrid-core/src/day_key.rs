//! Typed identifier for one calendar day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};
use crate::month::YearMonth;

/// A validated `(year, month, day)` triple. Month and day are 1-indexed.
///
/// Ordering is chronological. The string form `{year}-{month}-{day}` (no
/// padding) is only used as the key in the event file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(year: i32, month: u32, day: u32) -> CalGridResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from)
            .ok_or_else(|| {
                CalGridError::InvalidDate(format!("{}-{}-{} is not a calendar day", year, month, day))
            })
    }

    /// Parse either the storage form (`2024-3-7`) or ISO form (`2024-03-07`).
    ///
    /// Split from the right so a negative year (`-5-3-7`) keeps its sign.
    pub fn parse(s: &str) -> CalGridResult<Self> {
        let invalid = || CalGridError::InvalidDate(format!("'{}'. Expected YYYY-MM-DD", s));

        let mut parts = s.trim().rsplitn(3, '-');
        let (Some(day), Some(month), Some(year)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let day = day.parse::<u32>().map_err(|_| invalid())?;

        Self::new(year, month, day)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_date(self.0)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey(date)
    }
}

impl FromStr for DayKey {
    type Err = CalGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DayKey {
    type Error = CalGridError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year(), self.month(), self.day())
    }
}
