use anyhow::{Result, bail};
use calgrid_core::{CalGridError, DayKey, EventDraft, EventStorage, EventStore};
use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run<S: EventStorage>(
    store: &mut EventStore<S>,
    day: DayKey,
    name: Option<String>,
    start: Option<String>,
    end: Option<String>,
) -> Result<()> {
    let interactive = name.is_none() || start.is_none() || end.is_none();

    let mut draft = EventDraft::new(
        name.unwrap_or_default(),
        start.unwrap_or_default(),
        end.unwrap_or_default(),
    );

    if interactive {
        print_day(store, day);
    }

    loop {
        if interactive {
            prompt_draft(&mut draft)?;
        }

        match store.add_event(day, &draft) {
            Ok(()) => {
                if let Some(event) = store.events_on(&day).last() {
                    println!("{}", format!("  Added: {}", event.render()).green());
                }

                if interactive && ask_add_another()? {
                    draft.clear();
                    continue;
                }
                return Ok(());
            }
            // Keep the form open with what was typed so the user can fix it
            Err(CalGridError::Validation(e)) if interactive => {
                eprintln!("  {}", e.to_string().red());
            }
            Err(CalGridError::Persistence(msg)) => {
                bail!("Event was added but could not be saved: {}", msg);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn print_day<S: EventStorage>(store: &EventStore<S>, day: DayKey) {
    println!("{}", format!("Events for {}", day.render()).bold());

    let events = store.events_on(&day);
    if events.is_empty() {
        println!("  {}", "No events yet".dimmed());
    }
    for event in events {
        println!("  {}", event.render());
    }
    println!();
}

/// Prompt for every field, pre-filled with the current draft values.
fn prompt_draft(draft: &mut EventDraft) -> Result<()> {
    draft.name = prompt_field("  Event name", &draft.name)?;
    draft.start = prompt_field("  Start time (HH:MM)", &draft.start)?;
    draft.end = prompt_field("  End time (HH:MM)", &draft.end)?;
    Ok(())
}

fn prompt_field(prompt: &str, current: &str) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn ask_add_another() -> Result<bool> {
    let again = Confirm::new()
        .with_prompt("  Add another event?")
        .default(false)
        .interact()?;
    Ok(again)
}
