//! Calendar event model: the canonical unit of display and export.
//!
//! Field names serialize camelCase to match the backend wire format.

use serde::{Deserialize, Serialize};

/// A single calendar entry, keyed by `id` for deduplication.
///
/// `start`/`end` are ISO-8601 date or date-time strings and may be absent for
/// all-day or recurring items that carry no concrete instant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub all_day: bool,
    /// Recurring background events (weekly class blocks and the like).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    /// Presentation hint only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Presentation hint only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Provenance carried for display/filtering; never part of identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_props: Option<ExtendedProps>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recurrence {
    pub days_of_week: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
}

impl CalendarEvent {
    /// The id, if one is present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Derive a synthetic identity for an event lacking one.
///
/// Fallback order is fixed: `title` (or "event"), then `start` or `end` or
/// the positional index, then the positional index again as a tiebreaker.
/// Same inputs always reproduce the same id.
pub fn assign_id(event: &CalendarEvent, index: usize) -> String {
    let title = if event.title.is_empty() {
        "event"
    } else {
        event.title.as_str()
    };
    let anchor = match event.start.as_deref().or(event.end.as_deref()) {
        Some(instant) => instant.to_string(),
        None => index.to_string(),
    };
    format!("{title}-{anchor}-{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str, start: Option<&str>, end: Option<&str>) -> CalendarEvent {
        CalendarEvent {
            title: title.to_string(),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_assign_id_prefers_start() {
        let e = event("Read Ch.3", Some("2025-09-05T10:00:00"), None);
        assert_eq!(assign_id(&e, 2), "Read Ch.3-2025-09-05T10:00:00-2");
    }

    #[test]
    fn test_assign_id_falls_back_to_end_then_index() {
        let e = event("Review", None, Some("2025-09-06"));
        assert_eq!(assign_id(&e, 0), "Review-2025-09-06-0");

        let e = event("Review", None, None);
        assert_eq!(assign_id(&e, 4), "Review-4-4");
    }

    #[test]
    fn test_assign_id_untitled() {
        let e = event("", None, None);
        assert_eq!(assign_id(&e, 1), "event-1-1");
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let e = CalendarEvent {
            id: Some("x".into()),
            title: "Lab".into(),
            all_day: true,
            extended_props: Some(ExtendedProps {
                category: Some("Study".into()),
                day: None,
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["allDay"], true);
        assert_eq!(json["extendedProps"]["category"], "Study");
        assert!(json.get("start").is_none());
    }
}
