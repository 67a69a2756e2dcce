pub mod cli;
pub mod config;
pub mod paths;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use cli::Cli;
pub use config::{load_settings, EngineSettings};
pub use run::{run_app, run_until};
