//! Issue tracker abstraction.
//!
//! Supports two backends:
//! - `gh`: the GitHub CLI
//! - `stub`: in-memory issues for tests (no processes)

use serde::Deserialize;

use crate::error::Result;
use crate::render::TicketDraft;

mod gh;
mod stub;

pub use gh::GhTracker;
pub use stub::StubTracker;

/// An issue as returned by the tracker's view operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// The two tracker operations the batch needs.
pub trait Tracker {
    /// Fetch an issue's number, title and body.
    fn view(&self, number: u64) -> Result<Issue>;

    /// File a new issue.
    fn create(&self, draft: &TicketDraft) -> Result<()>;
}

impl<T: Tracker + ?Sized> Tracker for &T {
    fn view(&self, number: u64) -> Result<Issue> {
        (**self).view(number)
    }

    fn create(&self, draft: &TicketDraft) -> Result<()> {
        (**self).create(draft)
    }
}
