//! Session-scoped calendar event store.
//!
//! Holds the committed event collection behind the calendar display. Order is
//! irrelevant to correctness but preserved for display stability; `id` values
//! are unique, and on a collision the later entry wins.

use crate::event::{CalendarEvent, assign_id};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Merge `incoming` into the collection.
    ///
    /// Incoming events lacking an id get a synthetic one from the batch's
    /// own indices, so re-adding an identical batch reproduces identical
    /// ids and merges onto itself. The merge pass runs over the
    /// existing-then-incoming concatenation, keyed by id: the entry seen
    /// later overwrites the earlier one in place, so new data wins while
    /// the earlier entry's position is kept. Cannot fail.
    pub fn add_events(&mut self, incoming: Vec<CalendarEvent>) {
        if incoming.is_empty() {
            return;
        }

        let incoming = incoming.into_iter().enumerate().map(|(index, mut event)| {
            if event.id().is_none() {
                event.id = Some(assign_id(&event, index));
            }
            event
        });

        let mut combined = std::mem::take(&mut self.events);
        combined.extend(incoming);

        let mut slot_by_id: HashMap<String, usize> = HashMap::new();
        let mut merged: Vec<CalendarEvent> = Vec::with_capacity(combined.len());
        for (index, mut event) in combined.into_iter().enumerate() {
            let id = match event.id() {
                Some(id) => id.to_string(),
                None => {
                    let id = assign_id(&event, index);
                    event.id = Some(id.clone());
                    id
                }
            };
            match slot_by_id.get(&id) {
                Some(&slot) => merged[slot] = event,
                None => {
                    slot_by_id.insert(id, merged.len());
                    merged.push(event);
                }
            }
        }
        self.events = merged;
    }

    /// Discard the current collection and install `next` as-is, assigning
    /// synthetic ids from `next`'s own indices. No merge with prior state.
    pub fn replace_events(&mut self, next: Vec<CalendarEvent>) {
        self.events = next
            .into_iter()
            .enumerate()
            .map(|(index, mut event)| {
                if event.id().is_none() {
                    event.id = Some(assign_id(&event, index));
                }
                event
            })
            .collect();
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn event(id: Option<&str>, title: &str, start: Option<&str>) -> CalendarEvent {
        CalendarEvent {
            id: id.map(str::to_string),
            title: title.to_string(),
            start: start.map(str::to_string),
            ..Default::default()
        }
    }

    fn ids(store: &EventStore) -> Vec<&str> {
        store.events().iter().filter_map(|e| e.id()).collect()
    }

    #[test]
    fn test_add_empty_is_noop() {
        let mut store = EventStore::new();
        store.add_events(vec![event(Some("a"), "A", None)]);
        let before = store.events().to_vec();
        store.add_events(Vec::new());
        assert_eq!(store.events(), before.as_slice());
    }

    #[test]
    fn test_add_assigns_synthetic_ids_from_batch_indices() {
        let mut store = EventStore::new();
        store.add_events(vec![event(None, "Lecture", Some("2025-09-01T09:00:00"))]);
        assert_eq!(ids(&store), vec!["Lecture-2025-09-01T09:00:00-0"]);

        // A later batch restarts at index 0; the store length never leaks
        // into the id.
        store.add_events(vec![event(None, "Lab", None)]);
        assert_eq!(
            ids(&store),
            vec!["Lecture-2025-09-01T09:00:00-0", "Lab-0-0"]
        );
    }

    #[test]
    fn test_add_is_idempotent_for_idless_events() {
        let batch = vec![
            event(None, "Lecture", Some("2025-09-01T09:00:00")),
            event(None, "Lab", None),
        ];
        let mut store = EventStore::new();
        store.add_events(batch.clone());
        let once = store.events().to_vec();
        assert_eq!(
            ids(&store),
            vec!["Lecture-2025-09-01T09:00:00-0", "Lab-1-1"]
        );

        // Identical content reproduces identical synthetic ids, so the
        // second pass overwrites itself instead of duplicating.
        store.add_events(batch);
        assert_eq!(store.events(), once.as_slice());
    }

    #[test]
    fn test_later_entry_wins_and_keeps_position() {
        let mut store = EventStore::new();
        store.add_events(vec![
            event(Some("a"), "Old title", None),
            event(Some("b"), "B", None),
        ]);
        store.add_events(vec![event(Some("a"), "New title", Some("2025-09-02"))]);

        assert_eq!(store.len(), 2);
        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.events()[0].title, "New title");
        assert_eq!(store.events()[0].start.as_deref(), Some("2025-09-02"));
    }

    #[test]
    fn test_ids_always_unique() {
        let mut store = EventStore::new();
        store.add_events(vec![
            event(Some("a"), "A", None),
            event(Some("a"), "A2", None),
            event(Some("b"), "B", None),
        ]);
        store.add_events(vec![event(Some("b"), "B2", None)]);

        let unique: HashSet<_> = ids(&store).into_iter().collect();
        assert_eq!(unique.len(), store.len());
        assert_eq!(store.events()[0].title, "A2");
        assert_eq!(store.events()[1].title, "B2");
    }

    #[test]
    fn test_add_is_idempotent_for_identified_events() {
        let batch = vec![
            event(Some("2025-09-05-0"), "Read Ch.3", Some("2025-09-05T10:00:00")),
            event(Some("2025-09-05-1"), "Flashcards", None),
        ];
        let mut store = EventStore::new();
        store.add_events(batch.clone());
        let once = store.events().to_vec();
        store.add_events(batch);
        assert_eq!(store.events(), once.as_slice());
    }

    #[test]
    fn test_replace_discards_prior_state() {
        let mut store = EventStore::new();
        store.add_events(vec![event(Some("a"), "A", None)]);
        store.replace_events(vec![
            event(None, "Fresh", Some("2025-09-09")),
            event(Some("kept"), "Kept", None),
        ]);

        assert_eq!(ids(&store), vec!["Fresh-2025-09-09-0", "kept"]);
    }

    #[test]
    fn test_clear() {
        let mut store = EventStore::new();
        store.add_events(vec![event(Some("a"), "A", None)]);
        store.clear_events();
        assert!(store.is_empty());
    }
}
