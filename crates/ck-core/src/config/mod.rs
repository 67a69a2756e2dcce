//! Engine configuration domain model.

mod engine_config;

pub use engine_config::{ConfigError, EngineConfig};
