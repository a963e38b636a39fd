use anyhow::Result;
use calgrid_core::{EventStorage, EventStore, YearMonth};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run<S: EventStorage>(
    store: &EventStore<S>,
    filter: Option<&str>,
    month: Option<YearMonth>,
) -> Result<()> {
    let mut events = store.filter_by_keyword(filter.unwrap_or_default());
    if let Some(month) = month {
        events = events.in_month(month);
    }

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, (day, day_events)) in events.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", day.render().bold());
        for event in day_events {
            println!("  {}", event.render());
        }
    }

    Ok(())
}
