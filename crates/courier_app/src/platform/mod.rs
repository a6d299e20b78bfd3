//! Terminal front end: stdin intents in, rendered view model out.
mod app;
mod config;
mod effects;
mod input;
mod logging;
mod ui;

pub use app::run_app;
