//! Per-day event scheduling.
//!
//! `EventStore` is the only writer of the day → events mapping. Every add is
//! validated, checked for overlaps against the same day, and then written
//! through to the storage backend.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, warn};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::day_key::DayKey;
use crate::error::{CalGridError, CalGridResult, ValidationError};
use crate::event::{Event, EventDraft, OverlapRule};
use crate::month::YearMonth;
use crate::storage::EventStorage;
use crate::time_of_day::TimeOfDay;

/// Events keyed by day, each day in insertion order.
///
/// Days with no events have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventMap {
    days: BTreeMap<DayKey, Vec<Event>>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events on `day`, empty if there are none.
    pub fn get(&self, day: &DayKey) -> &[Event] {
        self.days.get(day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_day(&self, day: &DayKey) -> bool {
        self.days.contains_key(day)
    }

    /// Days in chronological order with their events.
    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &[Event])> {
        self.days.iter().map(|(day, events)| (day, events.as_slice()))
    }

    /// Number of days that have events.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Days whose events match `keyword`, keeping only the matching events.
    /// An empty keyword returns everything.
    pub fn filter_by_keyword(&self, keyword: &str) -> EventMap {
        if keyword.is_empty() {
            return self.clone();
        }

        let days = self
            .days
            .iter()
            .filter_map(|(day, events)| {
                let matching: Vec<Event> = events
                    .iter()
                    .filter(|e| e.matches_keyword(keyword))
                    .cloned()
                    .collect();
                (!matching.is_empty()).then_some((*day, matching))
            })
            .collect();

        EventMap { days }
    }

    /// Only the days that fall in `month`.
    pub fn in_month(&self, month: YearMonth) -> EventMap {
        let days = self
            .days
            .iter()
            .filter(|(day, _)| day.year_month() == month)
            .map(|(day, events)| (*day, events.clone()))
            .collect();

        EventMap { days }
    }

    /// Day numbers in `month` that have at least one event, ascending.
    pub fn days_with_events(&self, month: YearMonth) -> Vec<u32> {
        self.days
            .keys()
            .filter(|day| day.year_month() == month)
            .map(DayKey::day)
            .collect()
    }

    pub(crate) fn push(&mut self, day: DayKey, event: Event) {
        self.days.entry(day).or_default().push(event);
    }

    /// Drop entries left with no events, e.g. `"2024-1-1": []` in a file.
    pub(crate) fn prune_empty_days(&mut self) {
        self.days.retain(|_, events| !events.is_empty());
    }
}

// A file may spell one day two ways ("2024-1-1" and "2024-01-01"). Both
// parse to the same DayKey, so their lists are concatenated in file order
// instead of the later entry replacing the earlier one.
struct EventMapVisitor;

impl<'de> Visitor<'de> for EventMapVisitor {
    type Value = EventMap;

    fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "a map of day keys to event lists")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut events = EventMap::new();
        while let Some((day, day_events)) = map.next_entry::<DayKey, Vec<Event>>()? {
            events.days.entry(day).or_default().extend(day_events);
        }
        Ok(events)
    }
}

impl<'de> Deserialize<'de> for EventMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EventMapVisitor)
    }
}

impl FromIterator<(DayKey, Event)> for EventMap {
    fn from_iter<I: IntoIterator<Item = (DayKey, Event)>>(iter: I) -> Self {
        let mut map = EventMap::new();
        for (day, event) in iter {
            map.push(day, event);
        }
        map
    }
}

/// Owning handle over the events and the storage they are persisted to.
pub struct EventStore<S: EventStorage> {
    events: EventMap,
    storage: S,
    overlap_rule: OverlapRule,
}

impl<S: EventStorage> EventStore<S> {
    /// Load events from `storage`. Unreadable or corrupt data starts an
    /// empty store instead of failing.
    pub fn open(storage: S) -> Self {
        let events = match storage.load() {
            Ok(events) => events,
            Err(e) => {
                warn!("event=store_load status=failed_closed error={}", e);
                EventMap::new()
            }
        };

        debug!(
            "event=store_open days={} events={}",
            events.len(),
            events.event_count()
        );

        EventStore {
            events,
            storage,
            overlap_rule: OverlapRule::default(),
        }
    }

    pub fn with_overlap_rule(mut self, rule: OverlapRule) -> Self {
        self.overlap_rule = rule;
        self
    }

    pub fn overlap_rule(&self) -> OverlapRule {
        self.overlap_rule
    }

    pub fn events(&self) -> &EventMap {
        &self.events
    }

    pub fn events_on(&self, day: &DayKey) -> &[Event] {
        self.events.get(day)
    }

    pub fn filter_by_keyword(&self, keyword: &str) -> EventMap {
        self.events.filter_by_keyword(keyword)
    }

    /// First existing event on `day` that `[start, end)` conflicts with.
    pub fn find_conflict(&self, day: &DayKey, start: TimeOfDay, end: TimeOfDay) -> Option<&Event> {
        self.events
            .get(day)
            .iter()
            .find(|existing| existing.conflicts_with(start, end, self.overlap_rule))
    }

    /// Validate `draft` and append it to `day`.
    ///
    /// Checks run in order and the first failure is returned with nothing
    /// changed: missing fields, malformed times, inverted range, overlap.
    ///
    /// # Errors
    /// - `CalGridError::Validation` when the draft is rejected.
    /// - `CalGridError::Persistence` when the event was added in memory but
    ///   could not be saved. The event is kept.
    pub fn add_event(&mut self, day: DayKey, draft: &EventDraft) -> CalGridResult<()> {
        let event = draft.to_event()?;

        if let Some(existing) = self.find_conflict(&day, event.start(), event.end()) {
            return Err(ValidationError::OverlapConflict(existing.clone()).into());
        }

        debug!(
            "event=add day={} start={} end={}",
            day,
            event.start(),
            event.end()
        );
        self.events.push(day, event);

        self.save()
    }

    /// Write the full mapping to storage.
    pub fn save(&mut self) -> CalGridResult<()> {
        self.storage.save(&self.events).map_err(|e| {
            warn!("event=store_save status=failed error={}", e);
            match e {
                CalGridError::Persistence(_) => e,
                other => CalGridError::Persistence(other.to_string()),
            }
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
