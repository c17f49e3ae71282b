mod app;
mod effects;
mod input;
pub mod logging;
mod persistence;
mod render;

pub use app::run_app;
