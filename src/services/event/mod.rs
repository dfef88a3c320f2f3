//! Calendar event service entry point.
//! Defines the [`EventStore`] contract and its SQLite and in-memory backends,
//! organized across focused submodules.

use rusqlite::Connection;

use crate::error::StoreResult;
use crate::layout::TimeWindow;
use crate::models::event::{Event, EventPatch, NewEvent};

pub mod crud;
mod memory;
pub mod queries;
mod shared;
mod store;

pub use memory::InMemoryEventStore;
pub use store::EventStore;

#[cfg(test)]
pub use store::MockEventStore;

/// Service for managing calendar events stored in SQLite.
pub struct EventService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> EventService<'a> {
    /// Create a new EventService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EventStore for EventService<'_> {
    fn list(&self, owner_id: &str) -> StoreResult<Vec<Event>> {
        EventService::list(self, owner_id)
    }

    fn get(&self, id: &str) -> StoreResult<Option<Event>> {
        EventService::get(self, id)
    }

    fn create(&mut self, owner_id: &str, fields: NewEvent) -> StoreResult<Event> {
        EventService::create(self, owner_id, fields)
    }

    fn update(&mut self, id: &str, patch: &EventPatch) -> StoreResult<Event> {
        EventService::update(self, id, patch)
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        EventService::delete(self, id)
    }

    fn list_in_range(&self, owner_id: &str, window: &TimeWindow) -> StoreResult<Vec<Event>> {
        self.find_by_date_range(owner_id, window.start(), window.end())
    }
}
