// Settings service module
// Loads and saves user preferences and resolves on-disk locations

mod paths;
mod service;

pub use paths::{AppPaths, HOME_ENV_VAR};
pub use service::SettingsService;
