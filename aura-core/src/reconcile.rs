//! Reconciliation of planner schedule rows into calendar events.
//!
//! Deterministic: ids derive only from the row's date and its position in the
//! batch, so converting the same schedule twice yields identical events.

use crate::event::{CalendarEvent, ExtendedProps};
use crate::schedule::PlannerScheduleItem;
use crate::time::{ALL_DAY, normalize_time};

/// Convert an ordered planner schedule into calendar events, one per row.
///
/// A row is all-day when its normalized start is the all-day marker, absent,
/// or empty. Timed rows get `DateTHH:MM:00` instants (end only when an end
/// time normalized); all-day rows get the bare date and no end.
pub fn to_calendar_events(schedule: &[PlannerScheduleItem]) -> Vec<CalendarEvent> {
    schedule
        .iter()
        .enumerate()
        .map(|(index, item)| to_calendar_event(item, index))
        .collect()
}

fn to_calendar_event(item: &PlannerScheduleItem, index: usize) -> CalendarEvent {
    let start_time = normalize_time(item.start_time.as_deref());
    let end_time = normalize_time(item.end_time.as_deref());
    let all_day = matches!(start_time.as_deref(), None | Some("") | Some(ALL_DAY));

    let date = (!item.date.is_empty()).then_some(item.date.as_str());
    let start = match (date, start_time.as_deref()) {
        (Some(date), Some(time)) if !all_day && time != ALL_DAY => {
            Some(format!("{date}T{time}"))
        }
        (Some(date), _) if all_day => Some(date.to_string()),
        _ => None,
    };
    let end = match (date, end_time.as_deref()) {
        (Some(date), Some(time)) if !all_day && time != ALL_DAY => {
            Some(format!("{date}T{time}"))
        }
        _ => None,
    };

    CalendarEvent {
        id: Some(format!("{}-{index}", date.unwrap_or("event"))),
        title: if item.task.is_empty() {
            "Planned Task".to_string()
        } else {
            item.task.clone()
        },
        start,
        end,
        all_day,
        extended_props: Some(ExtendedProps {
            category: item.category.clone(),
            day: item.day.clone(),
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, start: Option<&str>, end: Option<&str>, task: &str) -> PlannerScheduleItem {
        PlannerScheduleItem {
            date: date.to_string(),
            start_time: start.map(str::to_string),
            end_time: end.map(str::to_string),
            task: task.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_timed_row() {
        let events = to_calendar_events(&[row("2025-09-05", Some("10am"), None, "Read Ch.3")]);
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.id.as_deref(), Some("2025-09-05-0"));
        assert_eq!(e.start.as_deref(), Some("2025-09-05T10:00:00"));
        assert_eq!(e.end, None);
        assert!(!e.all_day);
    }

    #[test]
    fn test_timed_row_with_end() {
        let events =
            to_calendar_events(&[row("2025-09-05", Some("10am"), Some("11:30am"), "Lab prep")]);
        assert_eq!(events[0].end.as_deref(), Some("2025-09-05T11:30:00"));
    }

    #[test]
    fn test_all_day_when_start_missing() {
        let events = to_calendar_events(&[row("2025-09-06", None, Some("5pm"), "Essay due")]);
        let e = &events[0];
        assert!(e.all_day);
        assert_eq!(e.start.as_deref(), Some("2025-09-06"));
        // All-day rows never emit an end, even when an end time was supplied.
        assert_eq!(e.end, None);
    }

    #[test]
    fn test_all_day_marker_start() {
        let events = to_calendar_events(&[row("2025-09-07", Some("All Day"), None, "Rest")]);
        assert!(events[0].all_day);
        assert_eq!(events[0].start.as_deref(), Some("2025-09-07"));
    }

    #[test]
    fn test_dateless_row_has_fallback_id_and_no_instants() {
        let events = to_calendar_events(&[row("", Some("9am"), None, "Floating task")]);
        let e = &events[0];
        assert_eq!(e.id.as_deref(), Some("event-0"));
        assert_eq!(e.start, None);
        assert_eq!(e.end, None);
    }

    #[test]
    fn test_provenance_carried_into_extended_props() {
        let mut item = row("2025-09-05", Some("10am"), None, "Read Ch.3");
        item.category = Some("Reading".into());
        item.day = Some("Friday".into());
        let events = to_calendar_events(&[item]);
        let props = events[0].extended_props.as_ref().unwrap();
        assert_eq!(props.category.as_deref(), Some("Reading"));
        assert_eq!(props.day.as_deref(), Some("Friday"));
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let schedule = vec![
            row("2025-09-05", Some("10am"), None, "Read Ch.3"),
            row("2025-09-05", None, None, "Flashcards"),
            row("2025-09-06", Some("2pm"), Some("4pm"), "Problem set"),
        ];
        assert_eq!(to_calendar_events(&schedule), to_calendar_events(&schedule));
    }

    #[test]
    fn test_ids_unique_within_batch() {
        let schedule = vec![
            row("2025-09-05", Some("10am"), None, "A"),
            row("2025-09-05", Some("11am"), None, "B"),
        ];
        let events = to_calendar_events(&schedule);
        assert_eq!(events[0].id.as_deref(), Some("2025-09-05-0"));
        assert_eq!(events[1].id.as_deref(), Some("2025-09-05-1"));
    }

    #[test]
    fn test_untitled_task_gets_placeholder() {
        let events = to_calendar_events(&[row("2025-09-05", Some("10am"), None, "")]);
        assert_eq!(events[0].title, "Planned Task");
    }
}
