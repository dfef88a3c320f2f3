use crate::error::StoreResult;
use crate::layout::TimeWindow;
use crate::models::event::{Event, EventPatch, NewEvent};

/// Persistence contract for calendar events.
///
/// Implementations validate at this boundary: `create` and `update` reject
/// records whose merged fields are invalid, and `update`/`delete` report
/// unknown ids as [`StoreError::NotFound`](crate::error::StoreError::NotFound).
#[cfg_attr(test, mockall::automock)]
pub trait EventStore {
    /// All events owned by `owner_id`, ordered by start time.
    fn list(&self, owner_id: &str) -> StoreResult<Vec<Event>>;

    fn get(&self, id: &str) -> StoreResult<Option<Event>>;

    /// Persist a new event, assigning its id and timestamps.
    fn create(&mut self, owner_id: &str, fields: NewEvent) -> StoreResult<Event>;

    /// Merge `patch` into the stored event and return the updated record.
    fn update(&mut self, id: &str, patch: &EventPatch) -> StoreResult<Event>;

    fn delete(&mut self, id: &str) -> StoreResult<()>;

    /// Events owned by `owner_id` that are at least partly inside `window`.
    fn list_in_range(&self, owner_id: &str, window: &TimeWindow) -> StoreResult<Vec<Event>> {
        Ok(self
            .list(owner_id)?
            .into_iter()
            .filter(|event| window.intersects(event))
            .collect())
    }
}
