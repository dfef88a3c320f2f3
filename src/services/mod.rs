// Service module exports

pub mod auth;
pub mod calendar;
pub mod database;
pub mod event;
pub mod settings;
