// Rust Planner Library
// Exports all modules for testing and reuse

pub mod commands;
pub mod error;
pub mod layout;
pub mod models;
pub mod services;
pub mod utils;
