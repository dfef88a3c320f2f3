// Settings module
// User preferences persisted as TOML

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ValidationError;
use crate::models::event::{is_hex_color, DEFAULT_EVENT_COLOR};
use crate::models::view::ViewType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 0 = Sunday, 1 = Monday, ... 6 = Saturday
    pub first_day_of_week: u8,
    pub default_view: ViewType,
    /// Used when an event is created without an explicit end.
    pub default_event_duration_minutes: u32,
    pub default_event_color: String,
    /// Overrides the platform data directory location of the database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            first_day_of_week: 0, // Sunday
            default_view: ViewType::Month,
            default_event_duration_minutes: 60,
            default_event_color: DEFAULT_EVENT_COLOR.to_string(),
            database_path: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_day_of_week > 6 {
            return Err(ValidationError::Settings(format!(
                "first_day_of_week must be between 0 and 6, got {}",
                self.first_day_of_week
            )));
        }

        if self.default_event_duration_minutes == 0 {
            return Err(ValidationError::Settings(
                "default_event_duration_minutes must be positive".to_string(),
            ));
        }

        if !is_hex_color(&self.default_event_color) {
            return Err(ValidationError::Settings(format!(
                "default_event_color must be a hex color, got '{}'",
                self.default_event_color
            )));
        }

        Ok(())
    }

    pub fn default_event_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.default_event_duration_minutes))
    }
}
