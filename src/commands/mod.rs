//! Command line surface.
//!
//! Each subcommand is a plain function over a [`Workspace`] that writes its
//! report to any [`Write`] sink, so the same code serves `main` and the tests.

pub mod account;
pub mod config;
pub mod events;
pub mod show;

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::models::settings::Settings;
use crate::models::user::User;
use crate::models::view::ViewType;
use crate::services::auth::AuthService;
use crate::services::database::Database;
use crate::services::settings::{AppPaths, SettingsService};

#[derive(Parser, Debug)]
#[command(name = "rust-planner")]
#[command(version, about = "Personal scheduling with overlap-aware day, week and month layouts")]
pub struct Cli {
    /// Keep configuration and data under this directory
    #[arg(long, global = true, env = "RUST_PLANNER_HOME")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and sign in
    Signup {
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Sign in to an existing account
    Signin {
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// End the current session
    Signout,
    /// Show the signed-in account
    Whoami,
    /// Create a new event
    Add {
        /// Event title
        title: String,

        /// Start date/time (e.g., "2025-03-20T15:00")
        #[arg(short, long)]
        start: String,

        /// End date/time
        #[arg(short, long, conflicts_with = "duration")]
        end: Option<String>,

        /// Duration (e.g., "30m", "1h", "2h30m")
        #[arg(short, long, conflicts_with = "end")]
        duration: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Hex color such as "#3B82F6"
        #[arg(long)]
        color: Option<String>,
    },
    /// Change fields of an existing event
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,
        #[arg(long)]
        clear_notes: bool,
        #[arg(long, conflicts_with = "clear_color")]
        color: Option<String>,
        #[arg(long)]
        clear_color: bool,
    },
    /// Delete an event
    Delete { id: String },
    /// List events, optionally between two dates (inclusive)
    List {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Render a day, week or month view
    Show {
        /// day, week or month (defaults to the configured view)
        #[arg(short, long)]
        view: Option<ViewType>,

        /// Anchor date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Inspect or change settings
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
}

/// Everything a command needs: resolved paths, loaded settings and an open
/// database.
pub struct Workspace {
    pub paths: AppPaths,
    pub settings: Settings,
    pub db: Database,
}

impl Workspace {
    pub fn open(paths: AppPaths) -> Result<Self> {
        let settings = SettingsService::new(paths.config_file()).load()?;

        let db_path = paths.database_file(&settings);
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let db = Database::new(&db_path.to_string_lossy())?;
        db.initialize_schema()?;

        Ok(Self {
            paths,
            settings,
            db,
        })
    }

    pub fn settings_service(&self) -> SettingsService {
        SettingsService::new(self.paths.config_file())
    }

    /// The signed-in account, or an error telling the user to sign in.
    pub fn require_user(&self) -> Result<User> {
        match AuthService::new(&self.db).current_user()? {
            Some(user) => Ok(user),
            None => bail!("Not signed in. Run `rust-planner signin <email>` first"),
        }
    }
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let paths = match cli.home {
        Some(home) => AppPaths::rooted_at(home),
        None => AppPaths::resolve()?,
    };
    let mut workspace = Workspace::open(paths)?;

    dispatch(&mut workspace, cli.command, out)
}

pub fn dispatch(workspace: &mut Workspace, command: Commands, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Signup {
            email,
            password,
            name,
        } => account::signup(workspace, &email, &password, name.as_deref(), out),
        Commands::Signin { email, password } => account::signin(workspace, &email, &password, out),
        Commands::Signout => account::signout(workspace, out),
        Commands::Whoami => account::whoami(workspace, out),
        Commands::Add {
            title,
            start,
            end,
            duration,
            notes,
            color,
        } => events::add(
            workspace,
            events::AddArgs {
                title,
                start,
                end,
                duration,
                notes,
                color,
            },
            out,
        ),
        Commands::Edit {
            id,
            title,
            start,
            end,
            notes,
            clear_notes,
            color,
            clear_color,
        } => events::edit(
            workspace,
            events::EditArgs {
                id,
                title,
                start,
                end,
                notes,
                clear_notes,
                color,
                clear_color,
            },
            out,
        ),
        Commands::Delete { id } => events::delete(workspace, &id, out),
        Commands::List { from, to, json } => {
            events::list(workspace, from.as_deref(), to.as_deref(), json, out)
        }
        Commands::Show { view, date, json } => {
            show::run(workspace, view, date.as_deref(), json, out)
        }
        Commands::Config { action } => config::run(workspace, action, out),
    }
}
