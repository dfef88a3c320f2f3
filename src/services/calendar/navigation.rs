use chrono::{Duration, NaiveDate};

use crate::models::view::ViewType;
use crate::utils::date::{get_week_start, shift_month_preserving_day};

/// The active view and the anchor date it is centred on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    pub view: ViewType,
    pub date: NaiveDate,
}

impl CalendarState {
    pub fn new(view: ViewType, date: NaiveDate) -> Self {
        Self { view, date }
    }

    pub fn set_view(&mut self, view: ViewType) {
        self.view = view;
    }

    pub fn navigate_to_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn navigate_to_today(&mut self, today: NaiveDate) {
        self.date = today;
    }

    pub fn navigate_forward(&mut self) {
        self.date = match self.view {
            ViewType::Day => self.date + Duration::days(1),
            ViewType::Week => self.date + Duration::weeks(1),
            ViewType::Month => shift_month_preserving_day(self.date, 1),
        };
    }

    pub fn navigate_backward(&mut self) {
        self.date = match self.view {
            ViewType::Day => self.date - Duration::days(1),
            ViewType::Week => self.date - Duration::weeks(1),
            ViewType::Month => shift_month_preserving_day(self.date, -1),
        };
    }

    /// Heading for the current view, e.g. "June 2, 2025", "June 1 - June 7, 2025"
    /// or "June 2025".
    pub fn title(&self, first_day_of_week: u8) -> String {
        match self.view {
            ViewType::Day => self.date.format("%B %-d, %Y").to_string(),
            ViewType::Week => {
                let start = get_week_start(self.date, first_day_of_week);
                let end = start + Duration::days(6);
                format!("{} - {}", start.format("%B %-d"), end.format("%B %-d, %Y"))
            }
            ViewType::Month => self.date.format("%B %Y").to_string(),
        }
    }
}
