use std::path::Path;

use thiserror::Error;

use crate::batch::{BatchOptions, BatchPlan, Confirmation, SourceTicket};

use super::cli::CliArgs;
use super::{env, toml};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "subissue.toml";

/// Repository the catalog issues live in.
pub const DEFAULT_REPO: &str = "generonishimura/pxkxmxn";

/// Tracker CLI binary.
pub const DEFAULT_TRACKER_CLI: &str = "gh";

/// Label attached to every created sub-issue.
pub const DEFAULT_LABEL: &str = "enhancement";

/// Move catalog issues split by default.
pub const DEFAULT_MOVE_TICKETS: &[(u64, &str)] = &[
    (91, "特殊カテゴリの未実装技の特殊効果の実装（41件）"),
    (90, "変化カテゴリの未実装技の特殊効果の実装（263件）"),
    (89, "物理カテゴリの未実装技の特殊効果の実装（62件）"),
];

/// Ability catalog issues split by default.
pub const DEFAULT_ABILITY_TICKETS: &[(u64, &str)] = &[
    (88, "ダメージ修正カテゴリの未実装特性の実装（8件）"),
    (87, "天候カテゴリの未実装特性の実装（4件）"),
    (86, "ステータス変化カテゴリの未実装特性の実装（7件）"),
    (85, "無効化カテゴリの未実装特性の実装（5件）"),
    (84, "その他カテゴリの未実装特性の実装（318件）"),
];

/// subissue configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target repository (`owner/name`). `None` lets the tracker CLI pick
    /// the repository of the current directory.
    pub repo: Option<String>,
    /// Tracker CLI binary.
    pub tracker_cli: String,
    /// Labels for created sub-issues.
    pub labels: Vec<String>,
    /// Optional run log file.
    pub log_file: Option<String>,
    /// Move catalog issues to split.
    pub move_tickets: Vec<SourceTicket>,
    /// Ability catalog issues to split.
    pub ability_tickets: Vec<SourceTicket>,
    /// Log prospective sub-issues instead of creating them.
    pub dry_run: bool,
    /// Skip the interactive confirmation.
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: Some(DEFAULT_REPO.to_string()),
            tracker_cli: DEFAULT_TRACKER_CLI.to_string(),
            labels: vec![DEFAULT_LABEL.to_string()],
            log_file: None,
            move_tickets: tickets_from(DEFAULT_MOVE_TICKETS),
            ability_tickets: tickets_from(DEFAULT_ABILITY_TICKETS),
            dry_run: false,
            assume_yes: false,
        }
    }
}

fn tickets_from(pairs: &[(u64, &str)]) -> Vec<SourceTicket> {
    pairs
        .iter()
        .map(|&(number, title)| SourceTicket::titled(number, title))
        .collect()
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: CLI args > env vars > config file > defaults.
    ///
    /// An explicitly named config file must exist; `subissue.toml` in the
    /// working directory is read only when present.
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ref path) = cli_args.config {
            toml::load_from_file(path)?.apply_to(&mut config);
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            toml::load_from_file(DEFAULT_CONFIG_FILE)?.apply_to(&mut config);
        }

        config.apply_env();
        config.apply_cli(cli_args);

        Ok(config)
    }

    /// Parse TOML content on top of the defaults.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        toml::parse_toml(content)?.apply_to(&mut config);
        Ok(config)
    }

    fn apply_env(&mut self) {
        env::apply_env(self, |key| std::env::var(key).ok());
    }

    /// Apply CLI arguments.
    pub(super) fn apply_cli(&mut self, args: &CliArgs) {
        if args.dry_run {
            self.dry_run = true;
        }
        if args.yes {
            self.assume_yes = true;
        }
        if let Some(ref repo) = args.repo {
            self.repo = non_empty(repo);
        }
        if !args.labels.is_empty() {
            self.labels = args.labels.clone();
        }
        if let Some(ref numbers) = args.moves {
            self.move_tickets = numbers.iter().map(|&n| SourceTicket::new(n)).collect();
        }
        if let Some(ref numbers) = args.abilities {
            self.ability_tickets = numbers.iter().map(|&n| SourceTicket::new(n)).collect();
        }
        if let Some(ref gh) = args.gh {
            self.tracker_cli = gh.clone();
        }
        if let Some(ref path) = args.log_file {
            self.log_file = non_empty(path);
        }
    }

    /// Ticket lists for the batch driver.
    pub fn plan(&self) -> BatchPlan {
        BatchPlan {
            moves: self.move_tickets.clone(),
            abilities: self.ability_tickets.clone(),
        }
    }

    /// How the driver should confirm before creating sub-issues.
    pub fn confirmation(&self) -> Confirmation {
        if self.dry_run || self.assume_yes {
            Confirmation::Skip
        } else {
            Confirmation::Prompt
        }
    }

    /// Driver options for this configuration.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            dry_run: self.dry_run,
            confirmation: self.confirmation(),
            labels: self.labels.clone(),
        }
    }

    /// Generate default subissue.toml content.
    pub fn default_toml() -> String {
        let mut out = format!(
            r#"# subissue configuration

[tracker]
repo = "{repo}"
cli = "{cli}"
labels = ["{label}"]

[log]
file = ""  # empty = no run log
"#,
            repo = DEFAULT_REPO,
            cli = DEFAULT_TRACKER_CLI,
            label = DEFAULT_LABEL,
        );

        for (table, tickets) in [
            ("moves", DEFAULT_MOVE_TICKETS),
            ("abilities", DEFAULT_ABILITY_TICKETS),
        ] {
            for (number, title) in tickets {
                out.push_str(&format!(
                    "\n[[{}]]\nnumber = {}\ntitle = {}\n",
                    table,
                    number,
                    ::toml::Value::String(title.to_string())
                ));
            }
        }
        out
    }
}

/// Treat empty strings as "unset".
pub(super) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error reading config file.
    #[error("config I/O error: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Parse error in config file.
    #[error("config parse error: {0}")]
    Parse(#[from] ::toml::de::Error),
    /// Well-formed but unusable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}
