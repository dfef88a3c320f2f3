use chrono::{DateTime, Local, SecondsFormat, Utc};
use rusqlite::{self, Result, Row};

use crate::models::event::Event;

pub(crate) const EVENT_COLUMNS: &str =
    "id, owner_id, title, start_datetime, end_datetime, notes, color, created_at, updated_at";

/// Fixed-width UTC RFC 3339 so stored values sort lexicographically.
pub(crate) fn to_storage(value: DateTime<Local>) -> String {
    value
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn map_event_row(row: &Row<'_>) -> Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        start: to_local_datetime(row.get::<_, String>(3)?)?,
        end: to_local_datetime(row.get::<_, String>(4)?)?,
        notes: row.get(5)?,
        color: row.get(6)?,
        created_at: Some(to_local_datetime(row.get::<_, String>(7)?)?),
        updated_at: Some(to_local_datetime(row.get::<_, String>(8)?)?),
    })
}
