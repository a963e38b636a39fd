//! Terminal rendering for calgrid types.
//!
//! Extension traits that add colored output to calgrid-core types using
//! owo_colors.

use calgrid_core::constants::WEEKDAY_LABELS;
use calgrid_core::{CalendarGrid, DayKey, Event};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Width of one grid cell, including padding.
const CELL_WIDTH: usize = 4;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        format!("{} {}", self.time_range().dimmed(), self.name())
    }
}

impl Render for DayKey {
    fn render(&self) -> String {
        self.date().format("%a %b %-d, %Y").to_string()
    }
}

/// A month grid with today and busy days highlighted.
pub struct MonthView<'a> {
    pub grid: &'a CalendarGrid,
    pub today: NaiveDate,
    /// Day numbers that have (matching) events
    pub marked: &'a [u32],
}

impl MonthView<'_> {
    fn is_today(&self, day: u32) -> bool {
        self.grid
            .day_key(day)
            .is_some_and(|key| key.date() == self.today)
    }

    fn render_cell(&self, slot: Option<u32>) -> String {
        let Some(day) = slot else {
            return " ".repeat(CELL_WIDTH);
        };

        let text = format!("{:>3}", day);
        let cell = if self.is_today(day) {
            text.reversed().to_string()
        } else if self.marked.contains(&day) {
            text.green().bold().to_string()
        } else {
            text
        };

        format!("{} ", cell)
    }
}

impl Render for MonthView<'_> {
    fn render(&self) -> String {
        let width = CELL_WIDTH * WEEKDAY_LABELS.len();
        let title = self.grid.year_month().to_string();

        let mut lines = vec![format!("{:^width$}", title).bold().to_string()];

        let header: String = WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{:>3} ", label))
            .collect();
        lines.push(header.dimmed().to_string());

        for week in self.grid.weeks() {
            let row: String = week.iter().map(|slot| self.render_cell(*slot)).collect();
            lines.push(row.trim_end().to_string());
        }

        lines.join("\n")
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
