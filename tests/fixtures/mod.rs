// Test fixtures - reusable test data
// Provides consistent dates and events across the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate};
use rust_planner::models::event::{Event, NewEvent};
use rust_planner::utils::date::to_local;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, June 2 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    pub fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
    }

    /// Local wall-clock time on `day`.
    pub fn at(day: NaiveDate, hour: u32, minute: u32) -> DateTime<Local> {
        to_local(day.and_hms_opt(hour, minute, 0).unwrap())
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// A validated event on `day` between two wall-clock times.
    pub fn on(id: &str, day: NaiveDate, start: (u32, u32), end: (u32, u32)) -> Event {
        let fields = NewEvent::new(
            id,
            dates::at(day, start.0, start.1),
            dates::at(day, end.0, end.1),
        );
        Event::from_new(id, "owner", fields).unwrap()
    }

    /// Three events where the middle one bridges the other two.
    pub fn bridged_trio() -> Vec<Event> {
        let day = dates::monday();
        vec![
            on("a", day, (9, 0), (10, 0)),
            on("b", day, (9, 30), (11, 30)),
            on("c", day, (11, 0), (12, 0)),
        ]
    }
}
