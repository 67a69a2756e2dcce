pub mod bootstrap;

pub use bootstrap::{run_app, run_until, Cli};
