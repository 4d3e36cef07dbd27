use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::batch::SourceTicket;

use super::types::{non_empty, Config, ConfigError};

/// On-disk shape of subissue.toml. Every key is optional; missing keys keep
/// whatever the lower-precedence layer set.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileConfig {
    tracker: TrackerSection,
    log: LogSection,
    moves: Option<Vec<SourceTicket>>,
    abilities: Option<Vec<SourceTicket>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TrackerSection {
    repo: Option<String>,
    cli: Option<String>,
    labels: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LogSection {
    file: Option<String>,
}

impl FileConfig {
    pub(super) fn apply_to(self, config: &mut Config) {
        if let Some(repo) = self.tracker.repo {
            config.repo = non_empty(&repo);
        }
        if let Some(cli) = self.tracker.cli.as_deref().and_then(non_empty) {
            config.tracker_cli = cli;
        }
        if let Some(labels) = self.tracker.labels {
            config.labels = labels;
        }
        if let Some(file) = self.log.file {
            config.log_file = non_empty(&file);
        }
        if let Some(moves) = self.moves {
            config.move_tickets = moves;
        }
        if let Some(abilities) = self.abilities {
            config.ability_tickets = abilities;
        }
    }
}

pub(super) fn load_from_file<P: AsRef<Path>>(path: P) -> Result<FileConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_toml(&content)
}

pub(super) fn parse_toml(content: &str) -> Result<FileConfig, ConfigError> {
    let file: FileConfig = ::toml::from_str(content)?;

    if let Some(ref labels) = file.tracker.labels {
        if labels.iter().any(|l| l.trim().is_empty()) {
            return Err(ConfigError::Invalid("tracker.labels must not contain empty labels".to_string()));
        }
    }

    Ok(file)
}
