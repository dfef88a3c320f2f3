use super::shared::{map_event_row, to_storage, EVENT_COLUMNS};
use super::EventService;
use crate::error::{StoreError, StoreResult};
use crate::models::event::{Event, EventPatch, NewEvent};
use chrono::Local;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

impl<'a> EventService<'a> {
    /// Create a new event in the database.
    pub fn create(&self, owner_id: &str, fields: NewEvent) -> StoreResult<Event> {
        let mut event = Event::from_new(Uuid::new_v4().to_string(), owner_id, fields)?;

        let now = Local::now();
        event.created_at = Some(now);
        event.updated_at = Some(now);

        self.conn.execute(
            "INSERT INTO events (
                id, owner_id, title, start_datetime, end_datetime,
                notes, color, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                event.id,
                event.owner_id,
                event.title,
                to_storage(event.start),
                to_storage(event.end),
                event.notes,
                event.color,
                to_storage(now),
                to_storage(now),
            ],
        )?;

        log::info!("Created event {} for owner {}", event.id, owner_id);
        Ok(event)
    }

    /// Retrieve an event by ID.
    pub fn get(&self, id: &str) -> StoreResult<Option<Event>> {
        let event = self
            .conn
            .query_row(
                &format!("SELECT {} FROM events WHERE id = ?1", EVENT_COLUMNS),
                [id],
                map_event_row,
            )
            .optional()?;

        Ok(event)
    }

    /// Merge `patch` into an existing event.
    pub fn update(&self, id: &str, patch: &EventPatch) -> StoreResult<Event> {
        let existing = self
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut updated = existing.apply_patch(patch)?;
        let now = Local::now();
        updated.updated_at = Some(now);

        let rows_affected = self.conn.execute(
            "UPDATE events SET
                title = ?1, start_datetime = ?2, end_datetime = ?3,
                notes = ?4, color = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                updated.title,
                to_storage(updated.start),
                to_storage(updated.end),
                updated.notes,
                updated.color,
                to_storage(now),
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        log::info!("Updated event {}", id);
        Ok(updated)
    }

    /// Delete an event by ID.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let rows_affected = self.conn.execute("DELETE FROM events WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        log::info!("Deleted event {}", id);
        Ok(())
    }
}
