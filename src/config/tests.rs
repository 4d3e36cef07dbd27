use std::collections::HashMap;

use tempfile::TempDir;

use super::*;
use crate::batch::{Confirmation, SourceTicket};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["subissue"];
    argv.extend_from_slice(extra);
    parse_args(argv).expect("valid args")
}

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.repo.as_deref(), Some(DEFAULT_REPO));
    assert_eq!(config.tracker_cli, "gh");
    assert_eq!(config.labels, vec!["enhancement".to_string()]);
    assert_eq!(config.log_file, None);
    assert!(!config.dry_run);
    assert!(!config.assume_yes);

    let moves: Vec<u64> = config.move_tickets.iter().map(|t| t.number).collect();
    assert_eq!(moves, vec![91, 90, 89]);
    let abilities: Vec<u64> = config.ability_tickets.iter().map(|t| t.number).collect();
    assert_eq!(abilities, vec![88, 87, 86, 85, 84]);
    assert_eq!(
        config.move_tickets[0].title.as_deref(),
        Some("特殊カテゴリの未実装技の特殊効果の実装（41件）")
    );
}

#[test]
fn test_parse_args_dry_run_spellings() {
    assert!(args(&["--dry-run"]).dry_run);
    assert!(args(&["-n"]).dry_run);
    assert!(!args(&[]).dry_run);
}

#[test]
fn test_parse_args_flags() {
    let cli = args(&[
        "-y",
        "--repo",
        "octo/cat",
        "-l",
        "moves",
        "--label",
        "good first issue",
        "--moves",
        "7,8",
        "--abilities",
        "9",
        "--gh",
        "/opt/bin/gh",
        "--log-file",
        "run.log",
    ]);
    assert!(cli.yes);
    assert_eq!(cli.repo.as_deref(), Some("octo/cat"));
    assert_eq!(cli.labels, vec!["moves".to_string(), "good first issue".to_string()]);
    assert_eq!(cli.moves, Some(vec![7, 8]));
    assert_eq!(cli.abilities, Some(vec![9]));
    assert_eq!(cli.gh.as_deref(), Some("/opt/bin/gh"));
    assert_eq!(cli.log_file.as_deref(), Some("run.log"));
}

#[test]
fn test_parse_args_rejects_bad_ticket_number() {
    assert!(parse_args(["subissue", "--moves", "12,abc"]).is_err());
}

#[test]
fn test_config_parse_toml() {
    let content = r#"
[tracker]
repo = "octo/cat"
cli = "/usr/local/bin/gh"
labels = ["enhancement", "moves"]

[log]
file = "subissue.log"

[[moves]]
number = 12
title = "技の実装（3件）"

[[moves]]
number = 13
"#;
    let config = Config::parse_toml(content).unwrap();
    assert_eq!(config.repo.as_deref(), Some("octo/cat"));
    assert_eq!(config.tracker_cli, "/usr/local/bin/gh");
    assert_eq!(config.labels, vec!["enhancement".to_string(), "moves".to_string()]);
    assert_eq!(config.log_file.as_deref(), Some("subissue.log"));
    assert_eq!(
        config.move_tickets,
        vec![SourceTicket::titled(12, "技の実装（3件）"), SourceTicket::new(13)]
    );
    // Not mentioned in the file: defaults survive.
    assert_eq!(config.ability_tickets.len(), DEFAULT_ABILITY_TICKETS.len());
}

#[test]
fn test_config_parse_toml_empty_repo_means_current_repo() {
    let config = Config::parse_toml("[tracker]\nrepo = \"\"\n").unwrap();
    assert_eq!(config.repo, None);
}

#[test]
fn test_config_parse_toml_empty_ticket_list() {
    let config = Config::parse_toml("abilities = []\n").unwrap();
    assert!(config.ability_tickets.is_empty());
    assert_eq!(config.move_tickets.len(), DEFAULT_MOVE_TICKETS.len());
}

#[test]
fn test_config_parse_toml_rejects_unknown_keys() {
    let err = Config::parse_toml("[tracker]\nrepository = \"x/y\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_parse_toml_rejects_empty_label() {
    let err = Config::parse_toml("[tracker]\nlabels = [\"ok\", \" \"]\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_default_toml_round_trips_to_defaults() {
    let toml = Config::default_toml();
    assert!(toml.contains("repo = \"generonishimura/pxkxmxn\""));
    assert!(toml.contains("[[abilities]]"));
    assert_eq!(Config::parse_toml(&toml).unwrap(), Config::default());
}

#[test]
fn test_apply_env() {
    let mut config = Config::default();
    env::apply_env(
        &mut config,
        env_from(&[
            ("SUBISSUE_REPO", "octo/dog"),
            ("SUBISSUE_GH", "gh-beta"),
            ("SUBISSUE_LABELS", "a, b,,c"),
            ("SUBISSUE_LOG_FILE", "env.log"),
            ("SUBISSUE_DRY_RUN", "1"),
        ]),
    );
    assert_eq!(config.repo.as_deref(), Some("octo/dog"));
    assert_eq!(config.tracker_cli, "gh-beta");
    assert_eq!(config.labels, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    assert_eq!(config.log_file.as_deref(), Some("env.log"));
    assert!(config.dry_run);
}

#[test]
fn test_apply_env_ignores_blank_labels() {
    let mut config = Config::default();
    env::apply_env(&mut config, env_from(&[("SUBISSUE_LABELS", " , ")]));
    assert_eq!(config.labels, vec![DEFAULT_LABEL.to_string()]);
}

#[test]
fn test_cli_overrides_env() {
    let mut config = Config::default();
    env::apply_env(&mut config, env_from(&[("SUBISSUE_REPO", "octo/dog")]));
    config.apply_cli(&args(&["--repo", "octo/cat", "--moves", "5"]));
    assert_eq!(config.repo.as_deref(), Some("octo/cat"));
    assert_eq!(config.move_tickets, vec![SourceTicket::new(5)]);
}

#[test]
fn test_config_load_with_cli_precedence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[tracker]\nrepo = \"file/repo\"\nlabels = [\"from-file\"]\n").unwrap();

    let cli = args(&["-c", path.to_str().unwrap(), "-l", "from-cli"]);
    let config = Config::load(&cli).unwrap();
    assert_eq!(config.labels, vec!["from-cli".to_string()]);
}

#[test]
fn test_config_load_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");
    let cli = args(&["--config", path.to_str().unwrap()]);
    assert!(matches!(Config::load(&cli), Err(ConfigError::Io { .. })));
}

#[test]
fn test_confirmation_policy() {
    let mut config = Config::default();
    assert_eq!(config.confirmation(), Confirmation::Prompt);
    config.dry_run = true;
    assert_eq!(config.confirmation(), Confirmation::Skip);
    config.dry_run = false;
    config.assume_yes = true;
    assert_eq!(config.confirmation(), Confirmation::Skip);
}

#[test]
fn test_plan_uses_configured_tickets() {
    let mut config = Config::default();
    config.apply_cli(&args(&["--abilities", "1,2"]));
    let plan = config.plan();
    assert_eq!(plan.moves.len(), 3);
    assert_eq!(plan.abilities, vec![SourceTicket::new(1), SourceTicket::new(2)]);
}

#[test]
fn test_batch_options() {
    let mut config = Config::default();
    config.apply_cli(&args(&["-n", "-l", "moves", "-l", "battle"]));
    let options = config.batch_options();
    assert!(options.dry_run);
    assert_eq!(options.confirmation, Confirmation::Skip);
    assert_eq!(options.labels, vec!["moves".to_string(), "battle".to_string()]);
}
