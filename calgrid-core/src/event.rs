//! Events and the form draft they are built from.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time_of_day::TimeOfDay;

/// A named, time-ranged event on a single day.
///
/// Always satisfies `start < end` and a non-empty name. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    name: String,
    #[serde(rename = "startTime")]
    start: TimeOfDay,
    #[serde(rename = "endTime")]
    end: TimeOfDay,
}

/// Unchecked shape of an event in the event file.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    name: String,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
}

impl TryFrom<EventRecord> for Event {
    type Error = ValidationError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        Event::new(record.name, record.start_time, record.end_time)
    }
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if start >= end {
            return Err(ValidationError::InvalidRange);
        }
        Ok(Event { name, start, end })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// e.g. "09:00 - 10:30"
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }

    /// Whether `[start, end)` conflicts with this event under `rule`.
    pub fn conflicts_with(&self, start: TimeOfDay, end: TimeOfDay, rule: OverlapRule) -> bool {
        rule.conflicts(start, end, self.start, self.end)
    }

    /// Case-insensitive substring match on the name. An empty keyword matches.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(&keyword.to_lowercase())
    }
}

/// How a candidate interval is compared against existing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapRule {
    /// `[start, end)` intervals intersect. Touching endpoints are fine.
    #[default]
    HalfOpen,
    /// Only rejects when one of the candidate's endpoints falls inside an
    /// existing event. A candidate that strictly contains an existing event
    /// is accepted.
    EndpointOnly,
}

impl OverlapRule {
    pub fn conflicts(
        self,
        start: TimeOfDay,
        end: TimeOfDay,
        existing_start: TimeOfDay,
        existing_end: TimeOfDay,
    ) -> bool {
        match self {
            OverlapRule::HalfOpen => start < existing_end && end > existing_start,
            OverlapRule::EndpointOnly => {
                (start >= existing_start && start < existing_end)
                    || (end > existing_start && end <= existing_end)
            }
        }
    }
}

/// Raw form values for an event that has not been validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub start: String,
    pub end: String,
}

impl EventDraft {
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        EventDraft {
            name: name.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// Reset the form after a successful submit.
    pub fn clear(&mut self) {
        *self = EventDraft::default();
    }

    pub fn is_blank(&self) -> bool {
        [&self.name, &self.start, &self.end]
            .iter()
            .all(|field| field.trim().is_empty())
    }

    /// Run the checks that don't need other events: required fields, time
    /// format, then range. The first failing check is returned.
    pub fn to_event(&self) -> Result<Event, ValidationError> {
        let fields = [("name", &self.name), ("start time", &self.start), ("end time", &self.end)];
        if let Some((field, _)) = fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::MissingField(field));
        }

        let start = TimeOfDay::parse(&self.start)?;
        let end = TimeOfDay::parse(&self.end)?;

        Event::new(self.name.trim(), start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    // --- Event ---

    #[test]
    fn event_requires_start_before_end() {
        assert_eq!(Event::new("Standup", t("10:00"), t("10:00")), Err(ValidationError::InvalidRange));
        assert_eq!(Event::new("Standup", t("10:00"), t("09:00")), Err(ValidationError::InvalidRange));
        assert!(Event::new("Standup", t("09:00"), t("09:01")).is_ok());
    }

    #[test]
    fn event_requires_a_name() {
        assert_eq!(
            Event::new("  ", t("09:00"), t("10:00")),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn keyword_match_ignores_case() {
        let event = Event::new("Team Standup", t("09:00"), t("09:15")).unwrap();
        assert!(event.matches_keyword("standup"));
        assert!(event.matches_keyword("TEAM"));
        assert!(event.matches_keyword(""));
        assert!(!event.matches_keyword("lunch"));
    }

    #[test]
    fn serializes_with_time_strings() {
        let event = Event::new("Lunch", t("12:00"), t("13:00")).unwrap();
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"name":"Lunch","startTime":"12:00","endTime":"13:00"}"#);

        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn deserialize_rejects_inverted_range() {
        let json = r#"{"name":"Lunch","startTime":"13:00","endTime":"12:00"}"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    // --- OverlapRule ---

    #[test]
    fn half_open_overlap() {
        let rule = OverlapRule::HalfOpen;
        let (es, ee) = (t("09:00"), t("10:00"));

        assert!(rule.conflicts(t("09:30"), t("09:45"), es, ee));
        assert!(rule.conflicts(t("08:30"), t("09:30"), es, ee));
        assert!(rule.conflicts(t("09:30"), t("10:30"), es, ee));
        assert!(rule.conflicts(t("08:00"), t("11:00"), es, ee));
        assert!(rule.conflicts(t("09:00"), t("10:00"), es, ee));
        assert!(!rule.conflicts(t("10:00"), t("11:00"), es, ee));
        assert!(!rule.conflicts(t("08:00"), t("09:00"), es, ee));
    }

    #[test]
    fn endpoint_only_misses_containment() {
        let rule = OverlapRule::EndpointOnly;
        let (es, ee) = (t("10:00"), t("11:00"));

        assert!(!rule.conflicts(t("09:00"), t("12:00"), es, ee));
        assert!(rule.conflicts(t("10:30"), t("12:00"), es, ee));
        assert!(rule.conflicts(t("09:00"), t("10:30"), es, ee));
        assert!(!rule.conflicts(t("11:00"), t("12:00"), es, ee));
    }

    #[test]
    fn overlap_rule_names() {
        assert_eq!(serde_json::to_string(&OverlapRule::HalfOpen).unwrap(), "\"half-open\"");
        assert_eq!(
            serde_json::from_str::<OverlapRule>("\"endpoint-only\"").unwrap(),
            OverlapRule::EndpointOnly
        );
    }

    // --- EventDraft ---

    #[test]
    fn draft_checks_run_in_order() {
        // Missing name wins over an inverted range
        let draft = EventDraft::new("", "11:00", "10:00");
        assert_eq!(draft.to_event(), Err(ValidationError::MissingField("name")));

        // Missing end wins over a malformed start
        let draft = EventDraft::new("Gym", "soon", "");
        assert_eq!(draft.to_event(), Err(ValidationError::MissingField("end time")));

        // Malformed time wins over range
        let draft = EventDraft::new("Gym", "25:00", "10:00");
        assert_eq!(
            draft.to_event(),
            Err(ValidationError::MalformedTime("25:00".to_string()))
        );

        let draft = EventDraft::new("Gym", "11:00", "10:00");
        assert_eq!(draft.to_event(), Err(ValidationError::InvalidRange));
    }

    #[test]
    fn draft_builds_trimmed_event() {
        let draft = EventDraft::new("  Gym ", "07:00", " 08:00");
        let event = draft.to_event().unwrap();
        assert_eq!(event.name(), "Gym");
        assert_eq!(event.time_range(), "07:00 - 08:00");
    }

    #[test]
    fn clear_resets_the_form() {
        let mut draft = EventDraft::new("Gym", "07:00", "08:00");
        assert!(!draft.is_blank());
        draft.clear();
        assert!(draft.is_blank());
        assert_eq!(draft, EventDraft::default());
    }
}
