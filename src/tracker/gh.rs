use std::io::Write;
use std::process::Command;

use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::render::TicketDraft;

use super::{Issue, Tracker};

/// Fields requested from `gh issue view`.
const VIEW_FIELDS: &str = "body,title,number";

/// GitHub CLI tracker.
#[derive(Debug, Clone)]
pub struct GhTracker {
    /// Path to the gh binary.
    cli_path: String,
    /// `--repo` argument; `None` uses the repository of the working directory.
    repo: Option<String>,
}

impl GhTracker {
    /// Use `gh` from `PATH` against the current directory's repository.
    pub fn new() -> Self {
        Self::with_path("gh")
    }

    /// Create with custom CLI path.
    pub fn with_path(cli_path: impl Into<String>) -> Self {
        Self {
            cli_path: cli_path.into(),
            repo: None,
        }
    }

    /// Target an explicit repository.
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn from_config(config: &Config) -> Self {
        let tracker = Self::with_path(config.tracker_cli.clone());
        match config.repo {
            Some(ref repo) => tracker.with_repo(repo.clone()),
            None => tracker,
        }
    }

    fn issue_command(&self, subcommand: &str) -> Command {
        let mut cmd = Command::new(&self.cli_path);
        cmd.arg("issue").arg(subcommand);
        if let Some(ref repo) = self.repo {
            cmd.arg("--repo").arg(repo);
        }
        cmd
    }

    /// Run to completion and return stdout, or a [`Error::Tracker`] on a
    /// non-zero exit.
    fn run(&self, cmd: &mut Command) -> Result<String> {
        let output = cmd.output().map_err(|source| Error::Spawn {
            program: self.cli_path.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(Error::Tracker {
                command: describe(cmd),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GhTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker for GhTracker {
    fn view(&self, number: u64) -> Result<Issue> {
        let mut cmd = self.issue_command("view");
        cmd.arg(number.to_string()).arg("--json").arg(VIEW_FIELDS);
        let stdout = self.run(&mut cmd)?;
        parse_view_output(&stdout, number)
    }

    fn create(&self, draft: &TicketDraft) -> Result<()> {
        // Dropping the handle deletes the file, on the error paths too.
        let mut body_file = tempfile::Builder::new()
            .prefix("subissue-")
            .suffix(".md")
            .tempfile()?;
        body_file.write_all(draft.body.as_bytes())?;
        body_file.flush()?;

        let mut cmd = self.issue_command("create");
        cmd.arg("--title").arg(&draft.title);
        for label in &draft.labels {
            cmd.arg("--label").arg(label);
        }
        cmd.arg("--body-file").arg(body_file.path());

        self.run(&mut cmd)?;
        Ok(())
    }
}

/// `gh --json` prints an object; some versions wrap it in an array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ViewOutput {
    One(Issue),
    Many(Vec<Issue>),
}

pub(super) fn parse_view_output(stdout: &str, number: u64) -> Result<Issue> {
    match serde_json::from_str::<ViewOutput>(stdout)? {
        ViewOutput::One(issue) => Ok(issue),
        ViewOutput::Many(issues) => issues.into_iter().next().ok_or(Error::MissingIssue(number)),
    }
}

fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}
