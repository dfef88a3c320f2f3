use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use super::Workspace;
use crate::models::settings::Settings;

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active settings and file locations
    Show,
    /// Change one setting
    Set { key: String, value: String },
    /// Restore the default settings
    Reset,
}

pub fn run(workspace: &mut Workspace, action: ConfigAction, out: &mut dyn Write) -> Result<()> {
    match action {
        ConfigAction::Show => {
            writeln!(out, "# config: {}", workspace.paths.config_file().display())?;
            writeln!(
                out,
                "# database: {}",
                workspace.paths.database_file(&workspace.settings).display()
            )?;
            let rendered =
                toml::to_string_pretty(&workspace.settings).context("Failed to render settings")?;
            write!(out, "{}", rendered)?;
        }
        ConfigAction::Set { key, value } => {
            let mut settings = workspace.settings.clone();
            apply_setting(&mut settings, &key, &value)?;
            workspace.settings_service().save(&settings)?;
            workspace.settings = settings;
            writeln!(out, "{} = {}", key, value)?;
        }
        ConfigAction::Reset => {
            workspace.settings_service().reset()?;
            workspace.settings = Settings::default();
            writeln!(out, "Settings restored to defaults")?;
        }
    }
    Ok(())
}

fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match key {
        "first_day_of_week" => {
            settings.first_day_of_week = value
                .parse()
                .with_context(|| format!("'{}' is not a weekday number (0-6)", value))?;
        }
        "default_view" => {
            settings.default_view = value.parse().map_err(anyhow::Error::msg)?;
        }
        "default_event_duration_minutes" => {
            settings.default_event_duration_minutes = value
                .parse()
                .with_context(|| format!("'{}' is not a number of minutes", value))?;
        }
        "default_event_color" => settings.default_event_color = value.to_string(),
        "database_path" => {
            settings.database_path = (!value.trim().is_empty()).then(|| value.into());
        }
        other => bail!("Unknown setting '{}'", other),
    }

    settings.validate()?;
    Ok(())
}
