mod app;
mod cities;
pub mod config;
mod effects;
mod ui;

pub use app::run_app;
