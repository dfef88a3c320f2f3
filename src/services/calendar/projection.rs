//! Window selection and per-view projections of an event list.
//!
//! Day and week views lay each day out independently against its own 24h
//! window. The month view only lists events per cell.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::layout::{layout_events, map_to_geometry, sort_events, Geometry, LayoutEntry, TimeWindow};
use crate::models::event::Event;
use crate::models::view::ViewType;
use crate::utils::date::{get_week_start, local_midnight, month_grid_range};

/// Events shown per month cell before collapsing into "+N more".
pub const MONTH_CELL_EVENT_LIMIT: usize = 3;

/// A layout entry together with its position inside the day window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent<'a> {
    #[serde(flatten)]
    pub entry: LayoutEntry<'a>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    pub window: TimeWindow,
    pub entries: Vec<PositionedEvent<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCell<'a> {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub events: Vec<&'a Event>,
    /// Events on this day beyond [`MONTH_CELL_EVENT_LIMIT`].
    pub overflow: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid<'a> {
    pub month: NaiveDate,
    pub weeks: Vec<Vec<MonthCell<'a>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Projection<'a> {
    Day { column: DayColumn<'a> },
    Week { columns: Vec<DayColumn<'a>> },
    Month { grid: MonthGrid<'a> },
}

/// Dates shown by `view` when anchored on `anchor`.
pub fn visible_dates(view: ViewType, anchor: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let (first, count) = match view {
        ViewType::Day => (anchor, 1),
        ViewType::Week => (get_week_start(anchor, first_day_of_week), 7),
        ViewType::Month => {
            let (start, end) = month_grid_range(anchor, first_day_of_week);
            (start, (end - start).num_days() + 1)
        }
    };

    (0..count).map(|offset| first + Duration::days(offset)).collect()
}

/// One 24h window per visible date.
pub fn day_windows(
    view: ViewType,
    anchor: NaiveDate,
    first_day_of_week: u8,
) -> Vec<(NaiveDate, TimeWindow)> {
    visible_dates(view, anchor, first_day_of_week)
        .into_iter()
        .map(|date| (date, TimeWindow::for_day(date)))
        .collect()
}

/// The whole range covered by `view`, used to fetch events from a store.
pub fn view_window(view: ViewType, anchor: NaiveDate, first_day_of_week: u8) -> TimeWindow {
    let dates = visible_dates(view, anchor, first_day_of_week);
    let first = dates.first().copied().unwrap_or(anchor);
    let last = dates.last().copied().unwrap_or(anchor);

    let start = local_midnight(first);
    let end = TimeWindow::for_day(last).end();
    TimeWindow::new(start, end).unwrap_or_else(|| TimeWindow::for_day(anchor))
}

/// Lay out the events visible on `date`.
pub fn project_day(events: &[Event], date: NaiveDate) -> DayColumn<'_> {
    let window = TimeWindow::for_day(date);
    let entries = layout_events(window.filter_events(events))
        .into_iter()
        .map(|entry| {
            let geometry = map_to_geometry(&entry, &window);
            PositionedEvent { entry, geometry }
        })
        .collect();

    DayColumn {
        date,
        window,
        entries,
    }
}

/// Seven independently laid out day columns starting on the week-start day.
pub fn project_week(events: &[Event], anchor: NaiveDate, first_day_of_week: u8) -> Vec<DayColumn<'_>> {
    visible_dates(ViewType::Week, anchor, first_day_of_week)
        .into_iter()
        .map(|date| project_day(events, date))
        .collect()
}

pub fn project_month(
    events: &[Event],
    anchor: NaiveDate,
    first_day_of_week: u8,
    today: NaiveDate,
) -> MonthGrid<'_> {
    let month = anchor.with_day(1).unwrap_or(anchor);

    let cells: Vec<MonthCell<'_>> = visible_dates(ViewType::Month, anchor, first_day_of_week)
        .into_iter()
        .map(|date| {
            let mut on_day = TimeWindow::for_day(date).filter_events(events);
            sort_events(&mut on_day);
            let overflow = on_day.len().saturating_sub(MONTH_CELL_EVENT_LIMIT);
            on_day.truncate(MONTH_CELL_EVENT_LIMIT);

            MonthCell {
                date,
                in_current_month: date.month() == month.month() && date.year() == month.year(),
                is_today: date == today,
                events: on_day,
                overflow,
            }
        })
        .collect();

    let weeks = cells.chunks(7).map(|week| week.to_vec()).collect();
    MonthGrid { month, weeks }
}

pub fn project(
    view: ViewType,
    events: &[Event],
    anchor: NaiveDate,
    first_day_of_week: u8,
    today: NaiveDate,
) -> Projection<'_> {
    match view {
        ViewType::Day => Projection::Day {
            column: project_day(events, anchor),
        },
        ViewType::Week => Projection::Week {
            columns: project_week(events, anchor, first_day_of_week),
        },
        ViewType::Month => Projection::Month {
            grid: project_month(events, anchor, first_day_of_week, today),
        },
    }
}
