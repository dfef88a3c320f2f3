//! Per-user calendar operations.
//!
//! [`CalendarContext`] carries the store handle and the signed-in owner
//! explicitly; nothing here reads ambient state.

use crate::error::StoreResult;
use crate::layout::TimeWindow;
use crate::models::event::{Event, EventPatch, NewEvent};
use crate::services::event::EventStore;

pub mod navigation;
pub mod projection;

pub use navigation::CalendarState;
pub use projection::{
    day_windows, project, project_day, project_month, project_week, view_window, visible_dates,
    DayColumn, MonthCell, MonthGrid, PositionedEvent, Projection, MONTH_CELL_EVENT_LIMIT,
};

pub struct CalendarContext<'s, S: EventStore + ?Sized> {
    store: &'s mut S,
    owner_id: String,
}

impl<'s, S: EventStore + ?Sized> CalendarContext<'s, S> {
    pub fn new(store: &'s mut S, owner_id: impl Into<String>) -> Self {
        Self {
            store,
            owner_id: owner_id.into(),
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Every event of the owner, ordered by start.
    pub fn events(&self) -> StoreResult<Vec<Event>> {
        self.store.list(&self.owner_id)
    }

    /// Events of the owner that are visible in `window`.
    pub fn events_in(&self, window: &TimeWindow) -> StoreResult<Vec<Event>> {
        self.store.list_in_range(&self.owner_id, window)
    }

    pub fn add_event(&mut self, fields: NewEvent) -> StoreResult<Event> {
        self.store.create(&self.owner_id, fields)
    }

    /// Apply `patch` to one of the owner's events.
    ///
    /// Returns `Ok(None)` when the id is unknown or owned by someone else;
    /// validation and storage failures are still errors.
    pub fn update_event(&mut self, id: &str, patch: &EventPatch) -> StoreResult<Option<Event>> {
        let Some(existing) = self.owned_event(id)? else {
            log::warn!("Ignoring update of unknown event {}", id);
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(existing));
        }

        match self.store.update(id, patch) {
            Ok(event) => Ok(Some(event)),
            Err(err) if err.is_not_found() => {
                log::warn!("Event {} disappeared before update", id);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Delete one of the owner's events. Returns whether anything was removed.
    pub fn delete_event(&mut self, id: &str) -> StoreResult<bool> {
        if self.owned_event(id)?.is_none() {
            log::warn!("Ignoring delete of unknown event {}", id);
            return Ok(false);
        }

        match self.store.delete(id) {
            Ok(()) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn owned_event(&self, id: &str) -> StoreResult<Option<Event>> {
        Ok(self
            .store
            .get(id)?
            .filter(|event| event.owner_id == self.owner_id))
    }
}
