use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::render::TicketDraft;

use super::{Issue, Tracker};

/// In-memory tracker for tests.
///
/// Serves canned issues and records every draft it is asked to create.
#[derive(Debug, Default)]
pub struct StubTracker {
    issues: HashMap<u64, Issue>,
    /// Creates whose title contains one of these fail.
    failing_titles: Vec<String>,
    created: RefCell<Vec<TicketDraft>>,
    viewed: RefCell<Vec<u64>>,
}

impl StubTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve an issue from `view`.
    pub fn with_issue(mut self, number: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.issues.insert(
            number,
            Issue {
                number,
                title: title.into(),
                body: body.into(),
            },
        );
        self
    }

    /// Fail any create whose title contains `fragment`.
    pub fn fail_create_containing(mut self, fragment: impl Into<String>) -> Self {
        self.failing_titles.push(fragment.into());
        self
    }

    /// Drafts successfully created so far, in order.
    pub fn created(&self) -> Vec<TicketDraft> {
        self.created.borrow().clone()
    }

    /// Issue numbers passed to `view`, in order.
    pub fn viewed(&self) -> Vec<u64> {
        self.viewed.borrow().clone()
    }
}

impl Tracker for StubTracker {
    fn view(&self, number: u64) -> Result<Issue> {
        self.viewed.borrow_mut().push(number);
        self.issues.get(&number).cloned().ok_or_else(|| Error::Tracker {
            command: format!("stub issue view {}", number),
            status: "exit status: 1".to_string(),
            stderr: format!("could not resolve to an issue with the number of {}", number),
        })
    }

    fn create(&self, draft: &TicketDraft) -> Result<()> {
        if self.failing_titles.iter().any(|f| draft.title.contains(f.as_str())) {
            return Err(Error::Tracker {
                command: "stub issue create".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("refused: {}", draft.title),
            });
        }
        self.created.borrow_mut().push(draft.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> TicketDraft {
        TicketDraft {
            title: title.to_string(),
            body: "body".to_string(),
            labels: vec!["enhancement".to_string()],
        }
    }

    #[test]
    fn test_stub_view() {
        let tracker = StubTracker::new().with_issue(5, "title", "body");
        let issue = tracker.view(5).unwrap();
        assert_eq!(issue.title, "title");
        assert!(tracker.view(6).is_err());
        assert_eq!(tracker.viewed(), vec![5, 6]);
    }

    #[test]
    fn test_stub_create_records_drafts() {
        let tracker = StubTracker::new();
        tracker.create(&draft("one")).unwrap();
        tracker.create(&draft("two")).unwrap();
        let titles: Vec<String> = tracker.created().into_iter().map(|d| d.title).collect();
        assert_eq!(titles, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_stub_create_failure() {
        let tracker = StubTracker::new().fail_create_containing("bad");
        assert!(tracker.create(&draft("a bad one")).is_err());
        assert!(tracker.create(&draft("fine")).is_ok());
        assert_eq!(tracker.created().len(), 1);
    }
}
