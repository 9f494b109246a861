//! Command-line shell around the core pipeline.
mod app;
mod cli;
mod config;
mod logging;

pub use app::run_app;
