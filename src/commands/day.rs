use anyhow::Result;
use calgrid_core::{DayKey, EventStorage, EventStore};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run<S: EventStorage>(store: &EventStore<S>, day: DayKey, filter: Option<&str>) -> Result<()> {
    let events = store.filter_by_keyword(filter.unwrap_or_default());

    println!("{}", day.render().bold());

    let day_events = events.get(&day);
    if day_events.is_empty() {
        println!("  {}", "No events".dimmed());
        return Ok(());
    }

    for event in day_events {
        println!("  {}", event.render());
    }

    Ok(())
}
