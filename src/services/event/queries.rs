use super::shared::{map_event_row, to_storage, EVENT_COLUMNS};
use super::EventService;
use crate::error::StoreResult;
use crate::models::event::Event;
use chrono::{DateTime, Local};
use rusqlite::params;

impl<'a> EventService<'a> {
    /// List every event of an owner ordered by start date.
    pub fn list(&self, owner_id: &str) -> StoreResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM events
             WHERE owner_id = ?1
             ORDER BY start_datetime ASC, end_datetime ASC",
            EVENT_COLUMNS
        ))?;

        let events = stmt
            .query_map([owner_id], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// Events of an owner that intersect the half-open range `[start, end)`.
    pub fn find_by_date_range(
        &self,
        owner_id: &str,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> StoreResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM events
             WHERE owner_id = ?1 AND start_datetime < ?2 AND end_datetime > ?3
             ORDER BY start_datetime ASC, end_datetime ASC",
            EVENT_COLUMNS
        ))?;

        let events = stmt
            .query_map(
                params![owner_id, to_storage(end), to_storage(start)],
                map_event_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }
}
