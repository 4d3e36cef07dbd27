use clap::Parser;

/// CLI arguments parsed from command line.
#[derive(Debug, Default, Parser)]
#[command(
    name = "subissue",
    version,
    about = "Split move/ability catalog issues into per-category sub-issues"
)]
pub struct CliArgs {
    /// Print the sub-issues that would be created without creating them.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Create sub-issues without asking for confirmation.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Path to config file [default: subissue.toml if present].
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<String>,

    /// Repository to read from and file into (owner/name).
    #[arg(short = 'R', long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Label for created sub-issues (repeatable; replaces configured labels).
    #[arg(short = 'l', long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Move catalog issue numbers, comma-separated.
    #[arg(long, value_name = "N,...", value_delimiter = ',')]
    pub moves: Option<Vec<u64>>,

    /// Ability catalog issue numbers, comma-separated.
    #[arg(long, value_name = "N,...", value_delimiter = ',')]
    pub abilities: Option<Vec<u64>>,

    /// Tracker CLI binary.
    #[arg(long = "gh", value_name = "PATH")]
    pub gh: Option<String>,

    /// Append a timestamped run log to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<String>,

    /// Print the default config file and exit.
    #[arg(long)]
    pub print_config: bool,
}

/// Parse CLI arguments from an iterator (first item is the program name).
pub fn parse_args<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    CliArgs::try_parse_from(args)
}
