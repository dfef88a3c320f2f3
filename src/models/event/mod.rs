// Event module
// Calendar event model, creation fields and typed partial updates

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Color applied to events that do not carry their own.
pub const DEFAULT_EVENT_COLOR: &str = "#6172AD";

/// A user-owned calendar event spanning the half-open interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub notes: Option<String>,
    pub color: Option<String>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Event {
    /// Materialise a validated event from creation fields.
    ///
    /// # Examples
    /// ```
    /// use rust_planner::models::event::{Event, NewEvent};
    /// use chrono::{Duration, Local};
    ///
    /// let start = Local::now();
    /// let fields = NewEvent::new("Standup", start, start + Duration::minutes(15));
    /// let event = Event::from_new("evt-1", "user-1", fields).unwrap();
    /// assert_eq!(event.title, "Standup");
    /// ```
    pub fn from_new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        fields: NewEvent,
    ) -> Result<Self, ValidationError> {
        fields.validate()?;

        Ok(Self {
            id: id.into(),
            owner_id: owner_id.into(),
            title: fields.title,
            start: fields.start,
            end: fields.end,
            notes: non_blank(fields.notes),
            color: non_blank(fields.color),
            created_at: None,
            updated_at: None,
        })
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.start, self.end, self.color.as_deref())
    }

    /// Return a copy of this event with `patch` merged in.
    ///
    /// The merged record is validated as a whole, so a patch that only moves
    /// `end` is still checked against the existing `start`.
    pub fn apply_patch(&self, patch: &EventPatch) -> Result<Event, ValidationError> {
        let mut merged = self.clone();

        if let Some(title) = &patch.title {
            merged.title = title.clone();
        }
        if let Some(start) = patch.start {
            merged.start = start;
        }
        if let Some(end) = patch.end {
            merged.end = end;
        }
        if let Some(notes) = &patch.notes {
            merged.notes = non_blank(notes.clone());
        }
        if let Some(color) = &patch.color {
            merged.color = non_blank(color.clone());
        }

        merged.validate()?;
        Ok(merged)
    }

    /// The event's color, or [`DEFAULT_EVENT_COLOR`] when unset.
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_EVENT_COLOR)
    }

    /// Get the duration of the event
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Half-open overlap test: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Fields supplied when creating an event. Identity and ownership are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub notes: Option<String>,
    pub color: Option<String>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            notes: None,
            color: None,
        }
    }

    /// Set the event notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.start, self.end, self.color.as_deref())
    }
}

/// Typed partial update. `None` leaves a field untouched; for the clearable
/// fields `Some(None)` removes the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start: Option<DateTime<Local>>,
    pub end: Option<DateTime<Local>>,
    pub notes: Option<Option<String>>,
    pub color: Option<Option<String>>,
}

impl EventPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn validate_fields(
    title: &str,
    start: DateTime<Local>,
    end: DateTime<Local>,
    color: Option<&str>,
) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    if end <= start {
        return Err(ValidationError::EndNotAfterStart);
    }

    if let Some(color) = color {
        if !is_hex_color(color) {
            return Err(ValidationError::InvalidColor(color.to_string()));
        }
    }

    Ok(())
}

/// `#RGB` or `#RRGGBB`.
pub(crate) fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) if digits.len() == 3 || digits.len() == 6 => {
            digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        _ => false,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
