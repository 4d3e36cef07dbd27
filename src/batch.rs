//! Batch driver: split every configured catalog issue into sub-issues.
//!
//! Issues are handled one at a time. A failure on one parent issue, or on
//! one sub-issue create, is reported and the batch moves on; nothing is
//! retried or rolled back.

use std::io::{BufRead, Write};

use serde::Deserialize;

use crate::catalog::{AbilityRecord, CatalogRecord, MoveRecord, TicketKind};
use crate::category::{Buckets, Categorize};
use crate::color::{self, symbols};
use crate::error::Result;
use crate::log::RunLogger;
use crate::output::{self, Reporter, BATCH_CONTEXT};
use crate::render::{render_ticket, Parent, TicketDraft};
use crate::tracker::Tracker;

/// A catalog issue to split.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceTicket {
    pub number: u64,
    /// Title used for sub-issue titles; the tracker's title when absent.
    #[serde(default)]
    pub title: Option<String>,
}

impl SourceTicket {
    pub fn new(number: u64) -> Self {
        Self { number, title: None }
    }

    pub fn titled(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: Some(title.into()),
        }
    }
}

/// Parent issues grouped by catalog kind. Moves are processed first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchPlan {
    pub moves: Vec<SourceTicket>,
    pub abilities: Vec<SourceTicket>,
}

/// Whether to ask before creating sub-issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Proceed without asking.
    Skip,
    /// Ask on the input reader; anything but `y`/`yes` cancels.
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Report sub-issues instead of creating them.
    pub dry_run: bool,
    pub confirmation: Confirmation,
    /// Labels for every created sub-issue.
    pub labels: Vec<String>,
}

/// What happened to one parent issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketOutcome {
    /// Records were found and one sub-issue per category was emitted.
    Split { records: usize, categories: usize },
    /// The body had no catalog rows.
    NothingFound,
    /// Fetching the issue failed.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketReport {
    pub number: u64,
    pub kind: TicketKind,
    pub outcome: TicketOutcome,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// The user declined the confirmation; nothing was touched.
    pub cancelled: bool,
    pub tickets: Vec<TicketReport>,
    /// Sub-issues created.
    pub created: usize,
    /// Sub-issues reported in dry-run mode.
    pub planned: usize,
    /// Sub-issue creates that failed.
    pub failed_creates: usize,
}

impl BatchReport {
    /// Parent issues whose processing failed.
    pub fn failed_tickets(&self) -> Vec<u64> {
        self.tickets
            .iter()
            .filter(|t| matches!(t.outcome, TicketOutcome::Failed(_)))
            .map(|t| t.number)
            .collect()
    }
}

/// Drives one run against a tracker, writing progress to `W`.
pub struct Batch<T: Tracker, W: Write> {
    tracker: T,
    options: BatchOptions,
    reporter: Reporter<W>,
    report: BatchReport,
}

impl<T: Tracker, W: Write> Batch<T, W> {
    pub fn new(tracker: T, options: BatchOptions, out: W) -> Self {
        Self {
            tracker,
            options,
            reporter: Reporter::new(out),
            report: BatchReport::default(),
        }
    }

    /// Emit ANSI colors (use when the writer is a terminal).
    pub fn with_color(mut self, color: bool) -> Self {
        self.reporter.set_color(color);
        self
    }

    /// Mirror progress lines to a run log file.
    pub fn with_logger(mut self, logger: RunLogger) -> Self {
        self.reporter.set_logger(logger);
        self
    }

    /// Run the batch. `input` is only read when confirmation is prompted.
    pub fn run<R: BufRead>(mut self, plan: &BatchPlan, input: R) -> BatchReport {
        if let Some(logger) = self.reporter.logger() {
            if let Err(e) = logger.log_session_start(self.options.dry_run) {
                eprintln!("warning: failed to write run log: {}", e);
            }
        }

        output::print_start_banner(&mut self.reporter, self.options.dry_run);

        if !self.options.dry_run && self.options.confirmation == Confirmation::Prompt && !self.confirm(input) {
            self.reporter.say(BATCH_CONTEXT, "キャンセルしました。");
            self.report.cancelled = true;
            return self.report;
        }

        for ticket in &plan.moves {
            self.process::<MoveRecord>(ticket);
        }
        for ticket in &plan.abilities {
            self.process::<AbilityRecord>(ticket);
        }

        let failed_tickets = self.report.failed_tickets();
        output::print_finish_banner(
            &mut self.reporter,
            self.options.dry_run,
            self.report.planned,
            self.report.created,
            self.report.failed_creates,
            &failed_tickets,
        );
        self.report
    }

    fn confirm<R: BufRead>(&mut self, mut input: R) -> bool {
        self.reporter.prompt("実際にissueを作成します。続行しますか？ (y/N): ");
        let mut answer = String::new();
        if input.read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }

    fn process<R: CatalogRecord + Categorize>(&mut self, ticket: &SourceTicket) {
        let context = format!("#{}", ticket.number);
        self.reporter.blank();
        let header = match ticket.title {
            Some(ref title) => format!("=== Issue #{}: {} ===", ticket.number, title),
            None => format!("=== Issue #{} ===", ticket.number),
        };
        self.reporter.say(&context, &color::label(&header));

        let outcome = match self.split::<R>(ticket, &context) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.reporter.say(
                    &context,
                    &color::error(&format!("Error processing issue #{}: {}", ticket.number, e)),
                );
                TicketOutcome::Failed(e.to_string())
            }
        };

        self.report.tickets.push(TicketReport {
            number: ticket.number,
            kind: R::KIND,
            outcome,
        });
    }

    fn split<R: CatalogRecord + Categorize>(
        &mut self,
        ticket: &SourceTicket,
        context: &str,
    ) -> Result<TicketOutcome> {
        let issue = self.tracker.view(ticket.number)?;
        let title = ticket.title.clone().unwrap_or(issue.title);

        let records = R::parse_all(&issue.body);
        if records.is_empty() {
            self.reporter.say(
                context,
                &color::warning(&format!(
                    "  No {} found in issue #{}",
                    R::KIND.as_str(),
                    ticket.number
                )),
            );
            return Ok(TicketOutcome::NothingFound);
        }

        let buckets: Buckets<R> = records.into_iter().collect();
        let record_count = buckets.record_count();
        let group_label = match R::KIND {
            TicketKind::Moves => "カテゴリ数",
            TicketKind::Abilities => "トリガー数",
        };
        self.reporter.say(
            context,
            &format!("  見つかった{}: {}件", R::KIND.noun(), color::number(record_count)),
        );
        self.reporter.say(context, &format!("  {}: {}", group_label, color::number(buckets.len())));

        let parent = Parent {
            number: ticket.number,
            title: &title,
        };
        for bucket in &buckets {
            if bucket.records.is_empty() {
                continue;
            }
            let draft = render_ticket(parent, &bucket.name, &bucket.records, &self.options.labels);
            self.emit(context, &draft);
        }

        Ok(TicketOutcome::Split {
            records: record_count,
            categories: buckets.len(),
        })
    }

    /// Create one sub-issue, or describe it in dry-run mode.
    fn emit(&mut self, context: &str, draft: &TicketDraft) {
        if self.options.dry_run {
            self.reporter.say(
                context,
                &format!(
                    "[DRY RUN] Would create issue: {} [labels: {}]",
                    color::info(&draft.title),
                    draft.labels.join(", ")
                ),
            );
            for line in draft.preview().lines() {
                self.reporter.detail(&color::dim(&format!("    {}", line)));
            }
            self.report.planned += 1;
            return;
        }

        match self.tracker.create(draft) {
            Ok(()) => {
                self.reporter.say(
                    context,
                    &color::success(&format!("{} Created: {}", symbols::CHECK, draft.title)),
                );
                self.report.created += 1;
            }
            Err(e) => {
                self.reporter.say(
                    context,
                    &color::error(&format!("{} Failed to create: {} - {}", symbols::CROSS, draft.title, e)),
                );
                self.report.failed_creates += 1;
            }
        }
    }
}

/// Only an explicit yes proceeds.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
