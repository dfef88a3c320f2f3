//! `show`: project the signed-in user's events onto a view and print it.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use super::Workspace;
use crate::models::event::Event;
use crate::models::view::ViewType;
use crate::services::calendar::{
    project, view_window, CalendarContext, CalendarState, DayColumn, MonthGrid, Projection,
};
use crate::services::event::EventService;
use crate::utils::date::parse_date;

pub fn run(
    workspace: &Workspace,
    view: Option<ViewType>,
    date: Option<&str>,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let user = workspace.require_user()?;

    let view = view.unwrap_or(workspace.settings.default_view);
    let today = Local::now().date_naive();
    let anchor = date.map(parse_date).transpose()?.unwrap_or(today);
    let first_day_of_week = workspace.settings.first_day_of_week;

    let mut store = EventService::new(workspace.db.connection());
    let calendar = CalendarContext::new(&mut store, user.id);
    let events = calendar.events_in(&view_window(view, anchor, first_day_of_week))?;
    log::debug!("Projecting {} events onto the {} view", events.len(), view);

    let projection = project(view, &events, anchor, first_day_of_week, today);

    if json {
        let rendered =
            serde_json::to_string_pretty(&projection).context("Failed to serialize view")?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    writeln!(out, "{}", CalendarState::new(view, anchor).title(first_day_of_week))?;
    render(&projection, out)
}

pub fn render(projection: &Projection<'_>, out: &mut dyn Write) -> Result<()> {
    match projection {
        Projection::Day { column } => render_column(column, out),
        Projection::Week { columns } => {
            for column in columns {
                writeln!(out)?;
                render_column(column, out)?;
            }
            Ok(())
        }
        Projection::Month { grid } => render_month(grid, out),
    }
}

fn render_column(column: &DayColumn<'_>, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", column.date.format("%a %b %-d"))?;
    if column.entries.is_empty() {
        writeln!(out, "  (no events)")?;
    }

    for positioned in &column.entries {
        let geometry = positioned.geometry;
        writeln!(
            out,
            "  {}  {}  col {}/{}  top {:.1}% height {:.1}% left {:.1}% width {:.1}%  {}",
            time_span(positioned.entry.event, column.date),
            positioned.entry.event.title,
            positioned.entry.column + 1,
            positioned.entry.total_columns,
            geometry.top_fraction * 100.0,
            geometry.height_fraction * 100.0,
            geometry.left_fraction * 100.0,
            geometry.width_fraction * 100.0,
            positioned.entry.event.display_color(),
        )?;
    }
    Ok(())
}

fn render_month(grid: &MonthGrid<'_>, out: &mut dyn Write) -> Result<()> {
    for week in &grid.weeks {
        let busy: Vec<_> = week
            .iter()
            .filter(|cell| !cell.events.is_empty() || cell.is_today)
            .collect();
        if busy.is_empty() {
            continue;
        }

        if let Some(first) = week.first() {
            writeln!(out, "Week of {}", first.date.format("%b %-d"))?;
        }
        for cell in busy {
            let mut line = format!("  {}", cell.date.format("%a %b %-d"));
            if cell.is_today {
                line.push_str(" (today)");
            }
            if !cell.in_current_month {
                line.push_str(" *");
            }
            if !cell.events.is_empty() {
                let titles: Vec<&str> = cell.events.iter().map(|e| e.title.as_str()).collect();
                line.push_str(": ");
                line.push_str(&titles.join(", "));
            }
            if cell.overflow > 0 {
                line.push_str(&format!(" +{} more", cell.overflow));
            }
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// `HH:MM-HH:MM`, with the date added to endpoints that fall on another day.
fn time_span(event: &Event, day: NaiveDate) -> String {
    let endpoint = |dt: chrono::DateTime<Local>| {
        if dt.date_naive() == day {
            dt.format("%H:%M").to_string()
        } else {
            dt.format("%b %-d %H:%M").to_string()
        }
    };
    format!("{}-{}", endpoint(event.start), endpoint(event.end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::NewEvent;
    use crate::services::calendar::{project_day, project_month};
    use crate::utils::date::to_local;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, day: NaiveDate, start: u32, end: u32) -> Event {
        let start = to_local(day.and_hms_opt(start, 0, 0).unwrap());
        let end = to_local(day.and_hms_opt(end, 0, 0).unwrap());
        Event::from_new(id, "owner", NewEvent::new(id, start, end)).unwrap()
    }

    fn rendered(projection: &Projection<'_>) -> String {
        let mut out = Vec::new();
        render(projection, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_day_columns() {
        let day = date(2025, 6, 2);
        let events = vec![event("Standup", day, 9, 10), event("Pairing", day, 9, 12)];

        let text = rendered(&Projection::Day {
            column: project_day(&events, day),
        });

        assert!(text.starts_with("Mon Jun 2\n"));
        assert!(text.contains("09:00-10:00  Standup  col 1/2"));
        assert!(text.contains("Pairing  col 2/2"));
        assert!(text.contains("left 50.0% width 50.0%"));
    }

    #[test]
    fn test_render_empty_day() {
        let events: Vec<Event> = Vec::new();
        let text = rendered(&Projection::Day {
            column: project_day(&events, date(2025, 6, 2)),
        });
        assert_eq!(text, "Mon Jun 2\n  (no events)\n");
    }

    #[test]
    fn test_render_month_overflow() {
        let day = date(2025, 6, 10);
        let events: Vec<Event> = (0..4)
            .map(|i| event(&format!("e{}", i), day, 8 + i, 9 + i))
            .collect();

        let text = rendered(&Projection::Month {
            grid: project_month(&events, day, 0, date(2025, 1, 1)),
        });

        assert!(text.contains("Week of Jun 8"));
        assert!(text.contains("Tue Jun 10: e0, e1, e2 +1 more"));
    }

    #[test]
    fn test_time_span_marks_other_days() {
        let day = date(2025, 6, 2);
        let start = to_local(day.and_hms_opt(22, 0, 0).unwrap());
        let end = to_local(date(2025, 6, 3).and_hms_opt(1, 30, 0).unwrap());
        let late = Event::from_new("late", "owner", NewEvent::new("late", start, end)).unwrap();

        assert_eq!(time_span(&late, day), "22:00-Jun 3 01:30");
    }
}
