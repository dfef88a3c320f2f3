use chrono::Local;
use uuid::Uuid;

use super::store::EventStore;
use crate::error::{StoreError, StoreResult};
use crate::models::event::{Event, EventPatch, NewEvent};

/// Event store that keeps everything in process memory.
///
/// Used for guest sessions and tests; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    events: Vec<Event>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventStore for InMemoryEventStore {
    fn list(&self, owner_id: &str) -> StoreResult<Vec<Event>> {
        let mut owned: Vec<Event> = self
            .events
            .iter()
            .filter(|event| event.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));
        Ok(owned)
    }

    fn get(&self, id: &str) -> StoreResult<Option<Event>> {
        Ok(self.events.iter().find(|event| event.id == id).cloned())
    }

    fn create(&mut self, owner_id: &str, fields: NewEvent) -> StoreResult<Event> {
        let mut event = Event::from_new(Uuid::new_v4().to_string(), owner_id, fields)?;
        let now = Local::now();
        event.created_at = Some(now);
        event.updated_at = Some(now);

        self.events.push(event.clone());
        Ok(event)
    }

    fn update(&mut self, id: &str, patch: &EventPatch) -> StoreResult<Event> {
        let slot = self
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut updated = slot.apply_patch(patch)?;
        updated.updated_at = Some(Local::now());
        *slot = updated.clone();
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        let before = self.events.len();
        self.events.retain(|event| event.id != id);

        if self.events.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use chrono::{DateTime, Duration, TimeZone};

    fn at(h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, h, 0, 0).unwrap()
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let mut store = InMemoryEventStore::new();
        let a = store.create("u1", NewEvent::new("A", at(9), at(10))).unwrap();
        let b = store.create("u1", NewEvent::new("B", at(9), at(10))).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_rejects_invalid_interval() {
        let mut store = InMemoryEventStore::new();
        let result = store.create("u1", NewEvent::new("A", at(10), at(9)));

        assert!(matches!(
            result,
            Err(StoreError::Validation(ValidationError::EndNotAfterStart))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_is_scoped_and_sorted() {
        let mut store = InMemoryEventStore::new();
        store.create("u1", NewEvent::new("Late", at(15), at(16))).unwrap();
        store.create("u2", NewEvent::new("Other", at(8), at(9))).unwrap();
        store.create("u1", NewEvent::new("Early", at(9), at(10))).unwrap();

        let titles: Vec<String> = store.list("u1").unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Early", "Late"]);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = InMemoryEventStore::new();
        let result = store.update("missing", &EventPatch::new().title("x"));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_keeps_old_record_on_validation_failure() {
        let mut store = InMemoryEventStore::new();
        let event = store.create("u1", NewEvent::new("A", at(9), at(10))).unwrap();

        let patch = EventPatch::new().start(at(11));
        assert!(store.update(&event.id, &patch).is_err());

        let stored = store.get(&event.id).unwrap().unwrap();
        assert_eq!(stored.start, at(9));
    }

    #[test]
    fn test_delete() {
        let mut store = InMemoryEventStore::new();
        let event = store.create("u1", NewEvent::new("A", at(9), at(10))).unwrap();

        store.delete(&event.id).unwrap();
        assert!(store.get(&event.id).unwrap().is_none());
        assert!(store.delete(&event.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_in_range_default_method() {
        let mut store = InMemoryEventStore::new();
        store.create("u1", NewEvent::new("Morning", at(9), at(10))).unwrap();
        store
            .create("u1", NewEvent::new("Tomorrow", at(9) + Duration::days(1), at(10) + Duration::days(1)))
            .unwrap();

        let window = crate::layout::TimeWindow::new(at(0), at(0) + Duration::days(1)).unwrap();
        let visible = store.list_in_range("u1", &window).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Morning");
    }
}
