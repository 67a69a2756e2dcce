use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "clipkeep",
    version,
    about = "Keeps a bounded history of everything you copy"
)]
pub struct Cli {
    /// Settings file. Defaults to `<config dir>/clipkeep/config.toml`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to stdout only.
    #[arg(long)]
    pub no_file_log: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from(["clipkeep", "--config", "/tmp/ck.toml", "--no-file-log"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ck.toml")));
        assert!(cli.no_file_log);
    }

    #[test]
    fn everything_is_optional() {
        let cli = Cli::parse_from(["clipkeep"]);
        assert!(cli.config.is_none());
        assert!(!cli.no_file_log);
    }
}
