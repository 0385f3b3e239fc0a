//! Flags shared by every `launchpad` subcommand.

use clap::Args;
use std::path::PathBuf;

/// Logging, colour and config-file flags, flattened into [`super::Cli`].
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Stderr log detail; `RUST_LOG` overrides it.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log detail on stderr (-v, -vv, -vvv)",
        long_help = "More log detail on stderr (RUST_LOG overrides this):
    (none)  - warnings: degraded add-ons, skipped git
    -v      - pipeline steps and the run id
    -vv     - each external command, its directory and exit status
    -vvv    - everything, including config layering and PATH lookups"
    )]
    pub verbose: u8,

    /// Only errors are printed; confirmation is skipped.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only and skip the confirmation prompt"
    )]
    pub quiet: bool,

    /// Plain output. `NO_COLOR` (<https://no-color.org>) sets it too.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// TOML file read instead of the per-user `config.toml`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of the per-user config.toml"
    )]
    pub config: Option<PathBuf>,
}
