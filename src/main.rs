// Rust Planner
// Main entry point

use std::io;

use anyhow::Result;
use clap::Parser;

use rust_planner::commands::{self, Cli};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Rust Planner");

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(cli, &mut out)
}
