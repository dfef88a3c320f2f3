//! Visible time ranges that layouts are positioned against.

use chrono::{DateTime, Duration, Local, NaiveDate};
use serde::Serialize;

use crate::models::event::Event;
use crate::utils::date::local_midnight;

/// A non-empty half-open range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl TimeWindow {
    /// Returns `None` unless `start < end`.
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// The wall-clock day `[midnight, next midnight)`.
    pub fn for_day(date: NaiveDate) -> Self {
        let start = local_midnight(date);
        let next = date.succ_opt().map(local_midnight);
        let end = match next {
            Some(end) if end > start => end,
            _ => start + Duration::hours(24),
        };
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn end(&self) -> DateTime<Local> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when the event shares at least one instant with the window.
    pub fn intersects(&self, event: &Event) -> bool {
        event.start < self.end && self.start < event.end
    }

    /// Keep only the events that are at least partly visible.
    pub fn filter_events<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|event| self.intersects(event)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::NewEvent;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
    }

    fn event(start: DateTime<Local>, end: DateTime<Local>) -> Event {
        Event::from_new("e", "u", NewEvent::new("Event", start, end)).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_window() {
        assert!(TimeWindow::new(at(9, 0), at(9, 0)).is_none());
        assert!(TimeWindow::new(at(10, 0), at(9, 0)).is_none());
        assert!(TimeWindow::new(at(9, 0), at(10, 0)).is_some());
    }

    #[test]
    fn test_for_day_spans_the_day() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let window = TimeWindow::for_day(date);
        assert_eq!(window.start(), at(0, 0));
        assert_eq!(window.duration(), Duration::hours(24));
    }

    #[test]
    fn test_intersects_is_half_open() {
        let window = TimeWindow::new(at(9, 0), at(17, 0)).unwrap();

        assert!(window.intersects(&event(at(8, 0), at(9, 30))));
        assert!(window.intersects(&event(at(16, 0), at(18, 0))));
        assert!(!window.intersects(&event(at(8, 0), at(9, 0))));
        assert!(!window.intersects(&event(at(17, 0), at(18, 0))));
    }

    #[test]
    fn test_filter_events() {
        let window = TimeWindow::new(at(9, 0), at(12, 0)).unwrap();
        let events = vec![
            event(at(7, 0), at(8, 0)),
            event(at(10, 0), at(11, 0)),
            event(at(11, 30), at(13, 0)),
        ];

        let visible = window.filter_events(&events);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].start, at(10, 0));
        assert_eq!(visible[1].start, at(11, 30));
    }
}
