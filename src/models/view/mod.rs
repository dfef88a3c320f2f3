// View module
// Calendar view kinds selectable by the user

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Day,
    Week,
    #[default]
    Month,
}

impl ViewType {
    pub const ALL: [ViewType; 3] = [ViewType::Day, ViewType::Week, ViewType::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Day => "day",
            ViewType::Week => "week",
            ViewType::Month => "month",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewType::Day),
            "week" => Ok(ViewType::Week),
            "month" => Ok(ViewType::Month),
            other => Err(format!("Unknown view '{}' (expected day, week or month)", other)),
        }
    }
}
