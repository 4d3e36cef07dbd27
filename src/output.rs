//! Progress output for a batch run.
//!
//! Lines go to the supplied writer (stdout in the binary), colored when the
//! writer is a terminal, and are mirrored without color to the run log.

use std::io::Write;

use crate::color;
use crate::log::RunLogger;

/// Context used in the run log for lines not tied to one issue.
pub const BATCH_CONTEXT: &str = "batch";

/// Writes progress lines and mirrors them to an optional [`RunLogger`].
///
/// Write errors on the output (a closed pipe, a full disk) are ignored so
/// the batch still finishes its remaining issues; the run log and the
/// returned report stay complete.
pub struct Reporter<W: Write> {
    out: W,
    color: bool,
    logger: Option<RunLogger>,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: false,
            logger: None,
        }
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn set_logger(&mut self, logger: RunLogger) {
        self.logger = Some(logger);
    }

    pub fn logger(&self) -> Option<&RunLogger> {
        self.logger.as_ref()
    }

    /// Print a line and record it in the run log under `context`.
    pub fn say(&mut self, context: &str, text: &str) {
        self.detail(text);
        if let Some(ref logger) = self.logger {
            if let Err(e) = logger.log(context, &color::strip(text)) {
                eprintln!("warning: failed to write run log: {}", e);
            }
        }
    }

    /// Print a line without logging it.
    pub fn detail(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", self.paint(text));
    }

    /// Print a prompt without a trailing newline and flush.
    pub fn prompt(&mut self, text: &str) {
        let _ = write!(self.out, "{}", self.paint(text));
        let _ = self.out.flush();
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    fn paint(&self, text: &str) -> String {
        if self.color {
            text.to_string()
        } else {
            color::strip(text)
        }
    }
}

/// Banner printed before any issue is touched.
pub(crate) fn print_start_banner<W: Write>(reporter: &mut Reporter<W>, dry_run: bool) {
    if dry_run {
        reporter.say(BATCH_CONTEXT, &format!("=== {} ===", color::warning("DRY RUN MODE")));
        reporter.detail("実際にはissueを作成しません。");
        reporter.blank();
    } else {
        reporter.say(BATCH_CONTEXT, "Subissues作成を開始します...");
    }
}

/// Banner printed after the last issue, listing parent issues that could
/// not be processed.
pub(crate) fn print_finish_banner<W: Write>(
    reporter: &mut Reporter<W>,
    dry_run: bool,
    planned: usize,
    created: usize,
    failed: usize,
    failed_tickets: &[u64],
) {
    reporter.blank();
    if !failed_tickets.is_empty() {
        let numbers: Vec<String> = failed_tickets.iter().map(|n| format!("#{}", n)).collect();
        reporter.say(
            BATCH_CONTEXT,
            &color::error(&format!("Failed issues: {}", numbers.join(", "))),
        );
    }
    if dry_run {
        reporter.say(
            BATCH_CONTEXT,
            &format!("=== {} === ({} sub-issues planned)", color::label("DRY RUN完了"), color::number(planned)),
        );
        reporter.detail("実際に作成するには、--dry-runオプションを外して実行してください。");
    } else {
        reporter.say(
            BATCH_CONTEXT,
            &format!(
                "Subissues作成完了！ ({} created, {} failed)",
                color::number(created),
                color::number(failed)
            ),
        );
    }
}
