use anyhow::Result;
use calgrid_core::{EventStorage, EventStore, YearMonth};
use chrono::Local;
use owo_colors::OwoColorize;

use crate::render::{MonthView, Render, pluralize};

pub fn run<S: EventStorage>(store: &EventStore<S>, month: YearMonth, filter: Option<&str>) -> Result<()> {
    let grid = month.grid();
    let events = store.filter_by_keyword(filter.unwrap_or_default());
    let marked = events.days_with_events(month);

    let view = MonthView {
        grid: &grid,
        today: Local::now().date_naive(),
        marked: &marked,
    };
    println!("{}", view.render());

    let count = events.in_month(month).event_count();
    let summary = match filter {
        Some(keyword) if !keyword.is_empty() => format!(
            "{} {} matching '{}'",
            count,
            pluralize("event", count),
            keyword
        ),
        _ => format!("{} {}", count, pluralize("event", count)),
    };
    println!();
    println!("{}", summary.dimmed());

    Ok(())
}
