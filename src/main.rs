use clap::Parser;
use clipkeep_lib::{run_app, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_app(Cli::parse()).await
}
