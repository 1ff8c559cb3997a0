//! Terminal shell around the core state machine.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
