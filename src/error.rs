//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while talking to the tracker or handling its output.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tracker output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Tracker {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("tracker returned no issue for #{0}")]
    MissingIssue(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
