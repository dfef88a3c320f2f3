use std::io::Write;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use super::Workspace;
use crate::layout::TimeWindow;
use crate::models::event::{Event, EventPatch, NewEvent, DEFAULT_EVENT_COLOR};
use crate::services::calendar::CalendarContext;
use crate::services::event::EventService;
use crate::utils::date::{local_midnight, parse_date, parse_duration, parse_local_datetime};

pub struct AddArgs {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub color: Option<String>,
}

pub struct EditArgs {
    pub id: String,
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub notes: Option<String>,
    pub clear_notes: bool,
    pub color: Option<String>,
    pub clear_color: bool,
}

pub fn add(workspace: &Workspace, args: AddArgs, out: &mut dyn Write) -> Result<()> {
    let user = workspace.require_user()?;

    let start = parse_local_datetime(&args.start)?;
    // --end, then --duration, then the configured default length
    let end = if let Some(end) = &args.end {
        parse_local_datetime(end)?
    } else {
        let length = match &args.duration {
            Some(duration) => parse_duration(duration)?,
            None => workspace.settings.default_event_duration(),
        };
        start
            .checked_add_signed(length)
            .context("Event end is out of range")?
    };

    let mut fields = NewEvent::new(args.title, start, end);
    if let Some(notes) = args.notes {
        fields = fields.notes(notes);
    }
    let color = args.color.or_else(|| {
        (workspace.settings.default_event_color != DEFAULT_EVENT_COLOR)
            .then(|| workspace.settings.default_event_color.clone())
    });
    if let Some(color) = color {
        fields = fields.color(color);
    }

    let mut store = EventService::new(workspace.db.connection());
    let event = CalendarContext::new(&mut store, user.id).add_event(fields)?;

    writeln!(out, "Created {}: {}", event.id, describe(&event))?;
    Ok(())
}

pub fn edit(workspace: &Workspace, args: EditArgs, out: &mut dyn Write) -> Result<()> {
    let user = workspace.require_user()?;

    let mut patch = EventPatch::new();
    if let Some(title) = args.title {
        patch = patch.title(title);
    }
    if let Some(start) = &args.start {
        patch = patch.start(parse_local_datetime(start)?);
    }
    if let Some(end) = &args.end {
        patch = patch.end(parse_local_datetime(end)?);
    }
    if args.clear_notes {
        patch = patch.notes(None);
    } else if let Some(notes) = args.notes {
        patch = patch.notes(Some(notes));
    }
    if args.clear_color {
        patch = patch.color(None);
    } else if let Some(color) = args.color {
        patch = patch.color(Some(color));
    }

    if patch.is_empty() {
        bail!("Nothing to change. Pass at least one of --title, --start, --end, --notes or --color");
    }

    let mut store = EventService::new(workspace.db.connection());
    match CalendarContext::new(&mut store, user.id).update_event(&args.id, &patch)? {
        Some(event) => writeln!(out, "Updated {}: {}", event.id, describe(&event))?,
        None => writeln!(out, "No event with id {}", args.id)?,
    }
    Ok(())
}

pub fn delete(workspace: &Workspace, id: &str, out: &mut dyn Write) -> Result<()> {
    let user = workspace.require_user()?;

    let mut store = EventService::new(workspace.db.connection());
    if CalendarContext::new(&mut store, user.id).delete_event(id)? {
        writeln!(out, "Deleted {}", id)?;
    } else {
        writeln!(out, "No event with id {}", id)?;
    }
    Ok(())
}

pub fn list(
    workspace: &Workspace,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let user = workspace.require_user()?;

    let mut store = EventService::new(workspace.db.connection());
    let calendar = CalendarContext::new(&mut store, user.id);
    let events = match list_window(from, to)? {
        Some(window) => calendar.events_in(&window)?,
        None => calendar.events()?,
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&events).context("Failed to serialize events")?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    if events.is_empty() {
        writeln!(out, "No events")?;
    }
    for event in &events {
        writeln!(out, "{}  {}", event.id, describe(event))?;
    }
    Ok(())
}

/// The window covering whole days `from..=to`, open on either side when
/// a bound is missing.
fn list_window(from: Option<&str>, to: Option<&str>) -> Result<Option<TimeWindow>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }

    let from = from.map(parse_date).transpose()?;
    let to = to.map(parse_date).transpose()?;

    let start = local_midnight(match from {
        Some(date) => date,
        None => NaiveDate::from_ymd_opt(1900, 1, 1).context("Invalid lower bound")?,
    });
    let end = match to {
        Some(date) => TimeWindow::for_day(date).end(),
        None => local_midnight(NaiveDate::from_ymd_opt(9999, 12, 31).context("Invalid upper bound")?),
    };

    match TimeWindow::new(start, end) {
        Some(window) => Ok(Some(window)),
        None => bail!("--from must not be after --to"),
    }
}

fn describe(event: &Event) -> String {
    let mut line = format!(
        "{} - {}  {}",
        event.start.format("%Y-%m-%d %H:%M"),
        event.end.format("%Y-%m-%d %H:%M"),
        event.title
    );
    if let Some(color) = &event.color {
        line.push_str(&format!(" [{}]", color));
    }
    if let Some(notes) = &event.notes {
        line.push_str(&format!(" ({})", notes));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::AuthService;
    use crate::services::settings::AppPaths;
    use chrono::Duration;

    fn signed_in_workspace(dir: &tempfile::TempDir) -> Workspace {
        let workspace = Workspace::open(AppPaths::rooted_at(dir.path())).unwrap();
        AuthService::new(&workspace.db)
            .sign_up("ada@example.com", "pw", None)
            .unwrap();
        workspace
    }

    fn add_args(title: &str, start: &str) -> AddArgs {
        AddArgs {
            title: title.to_string(),
            start: start.to_string(),
            end: None,
            duration: None,
            notes: None,
            color: None,
        }
    }

    fn edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            title: None,
            start: None,
            end: None,
            notes: None,
            clear_notes: false,
            color: None,
            clear_color: false,
        }
    }

    fn stored(workspace: &Workspace) -> Vec<Event> {
        let user = workspace.require_user().unwrap();
        let mut store = EventService::new(workspace.db.connection());
        CalendarContext::new(&mut store, user.id).events().unwrap()
    }

    #[test]
    fn test_add_uses_default_duration() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = signed_in_workspace(&dir);

        let mut out = Vec::new();
        add(&workspace, add_args("Standup", "2025-06-02T09:00"), &mut out).unwrap();

        let events = stored(&workspace);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration(), Duration::minutes(60));
        assert!(String::from_utf8(out).unwrap().starts_with("Created "));
    }

    #[test]
    fn test_add_with_duration_and_notes() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = signed_in_workspace(&dir);

        let args = AddArgs {
            duration: Some("1h30m".into()),
            notes: Some("Room 4".into()),
            ..add_args("Review", "2025-06-02T14:00")
        };
        add(&workspace, args, &mut Vec::new()).unwrap();

        let event = &stored(&workspace)[0];
        assert_eq!(event.duration(), Duration::minutes(90));
        assert_eq!(event.notes.as_deref(), Some("Room 4"));
    }

    #[test]
    fn test_add_rejects_inverted_interval() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = signed_in_workspace(&dir);

        let args = AddArgs {
            end: Some("2025-06-02T08:00".into()),
            ..add_args("Backwards", "2025-06-02T09:00")
        };
        assert!(add(&workspace, args, &mut Vec::new()).is_err());
        assert!(stored(&workspace).is_empty());
    }

    #[test]
    fn test_add_with_huge_duration_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = signed_in_workspace(&dir);

        let args = AddArgs {
            duration: Some("100000000d".into()),
            ..add_args("Forever", "2025-06-02T09:00")
        };
        assert!(add(&workspace, args, &mut Vec::new()).is_err());
        assert!(stored(&workspace).is_empty());
    }

    #[test]
    fn test_add_requires_sign_in() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::open(AppPaths::rooted_at(dir.path())).unwrap();
        assert!(add(&workspace, add_args("Standup", "2025-06-02T09:00"), &mut Vec::new()).is_err());
    }

    #[test]
    fn test_edit_and_clear_fields() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = signed_in_workspace(&dir);
        let args = AddArgs {
            notes: Some("draft".into()),
            color: Some("#112233".into()),
            ..add_args("Standup", "2025-06-02T09:00")
        };
        add(&workspace, args, &mut Vec::new()).unwrap();
        let id = stored(&workspace)[0].id.clone();

        let args = EditArgs {
            title: Some("Daily standup".into()),
            clear_notes: true,
            clear_color: true,
            ..edit_args(&id)
        };
        edit(&workspace, args, &mut Vec::new()).unwrap();

        let event = &stored(&workspace)[0];
        assert_eq!(event.title, "Daily standup");
        assert!(event.notes.is_none());
        assert!(event.color.is_none());
    }

    #[test]
    fn test_edit_unknown_id_reports_and_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = signed_in_workspace(&dir);

        let mut out = Vec::new();
        let args = EditArgs {
            title: Some("x".into()),
            ..edit_args("missing")
        };
        edit(&workspace, args, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No event with id missing\n");
    }

    #[test]
    fn test_edit_without_changes_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = signed_in_workspace(&dir);
        assert!(edit(&workspace, edit_args("anything"), &mut Vec::new()).is_err());
    }

    #[test]
    fn test_delete_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = signed_in_workspace(&dir);
        add(&workspace, add_args("Standup", "2025-06-02T09:00"), &mut Vec::new()).unwrap();
        let id = stored(&workspace)[0].id.clone();

        let mut out = Vec::new();
        delete(&workspace, &id, &mut out).unwrap();
        delete(&workspace, &id, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Deleted {}\nNo event with id {}\n", id, id)
        );

        let mut out = Vec::new();
        list(&workspace, None, None, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No events\n");
    }

    #[test]
    fn test_list_between_dates() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = signed_in_workspace(&dir);
        add(&workspace, add_args("Monday", "2025-06-02T09:00"), &mut Vec::new()).unwrap();
        add(&workspace, add_args("Friday", "2025-06-06T09:00"), &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        list(&workspace, Some("2025-06-05"), Some("2025-06-06"), true, &mut out).unwrap();
        let listed: Vec<Event> = serde_json::from_slice(&out).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Friday");
    }

    #[test]
    fn test_list_window_rejects_inverted_dates() {
        assert!(list_window(Some("2025-06-06"), Some("2025-06-01")).is_err());
        assert!(list_window(None, None).unwrap().is_none());
    }
}
