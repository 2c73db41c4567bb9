mod app;
mod config;
mod effects;
mod files;
mod input;
mod logging;
mod terminal;
mod ui;

pub use app::run_app;
