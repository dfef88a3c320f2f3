use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_users_table(conn)?;
    create_events_table(conn)?;
    run_events_migrations(conn)?;
    create_session_table(conn)?;
    Ok(())
}

fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            name TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create users table")?;

    Ok(())
}

fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            start_datetime TEXT NOT NULL,
            end_datetime TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            CHECK (end_datetime > start_datetime)
        )",
        [],
    )
    .context("Failed to create events table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_owner_start
            ON events(owner_id, start_datetime)",
        [],
    )
    .context("Failed to create events index")?;

    Ok(())
}

fn run_events_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "events",
        "notes",
        "ALTER TABLE events ADD COLUMN notes TEXT",
    )?;

    migrations::ensure_column(
        conn,
        "events",
        "color",
        "ALTER TABLE events ADD COLUMN color TEXT",
    )?;

    Ok(())
}

fn create_session_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS session (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            signed_in_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create session table")?;

    Ok(())
}
