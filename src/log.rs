//! Run log file.
//!
//! Appends plain-text, timestamped copies of the progress lines so a batch
//! can be audited after the terminal scrollback is gone.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Append-only log of one or more runs.
#[derive(Debug, Clone)]
pub struct RunLogger {
    /// Path to the log file.
    pub path: PathBuf,
}

impl RunLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write a log entry.
    ///
    /// Format: `YYYY-MM-DD HH:MM:SS | <context> | <message>`
    pub fn log(&self, context: &str, message: &str) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.append(&format!("{} | {} | {}\n", timestamp, context, message))
    }

    /// Write a separator for a new run.
    pub fn log_session_start(&self, dry_run: bool) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mode = if dry_run { "dry run" } else { "live" };
        let separator = format!(
            "\n======================================================================\n\
             === subissue run ({}) started at {} ===\n\
             ======================================================================\n\n",
            mode, timestamp
        );
        self.append(&separator)
    }

    /// Read all lines from the log file.
    pub fn read_all(&self) -> io::Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(&self.path)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn append(&self, text: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(text.as_bytes())?;
        file.flush()
    }
}
