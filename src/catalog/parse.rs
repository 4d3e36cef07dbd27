use std::str::Lines;

use super::{AbilityRecord, MoveRecord};

/// Column label that marks a catalog table header.
const NAME_COLUMN: &str = "| 日本語名";

/// Second column label; ability tables require both on the header line.
const ENGLISH_COLUMN: &str = "英語名";

/// Parse move records from an issue body.
///
/// Lazy: rows are split and mapped as the iterator is advanced.
pub fn parse_moves(body: &str) -> impl Iterator<Item = MoveRecord> + '_ {
    TableRows::new(body, is_move_header).map(|row| MoveRecord::from_cells(row.cells))
}

/// Parse ability records from an issue body, tagging each with the `###`
/// section it was listed under.
pub fn parse_abilities(body: &str) -> impl Iterator<Item = AbilityRecord> + '_ {
    TableRows::new(body, is_ability_header)
        .map(|row| AbilityRecord::from_cells(row.cells, row.section.as_deref()))
}

fn is_move_header(line: &str) -> bool {
    line.contains(NAME_COLUMN)
}

fn is_ability_header(line: &str) -> bool {
    line.contains(NAME_COLUMN) && line.contains(ENGLISH_COLUMN)
}

/// One data row of a catalog table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TableRow {
    /// Non-empty, trimmed cells in column order.
    pub cells: Vec<String>,
    /// Most recent `###` heading text, if any.
    pub section: Option<String>,
}

/// Line scanner yielding the data rows of every catalog table in a body.
///
/// A table starts at a header line and ends at the next heading. Separator
/// and blank lines inside a table are skipped, as is any prose that does not
/// start with `|`.
pub(super) struct TableRows<'a> {
    lines: Lines<'a>,
    is_header: fn(&str) -> bool,
    in_table: bool,
    section: Option<String>,
}

impl<'a> TableRows<'a> {
    pub(super) fn new(body: &'a str, is_header: fn(&str) -> bool) -> Self {
        Self {
            lines: body.lines(),
            is_header,
            in_table: false,
            section: None,
        }
    }
}

impl Iterator for TableRows<'_> {
    type Item = TableRow;

    fn next(&mut self) -> Option<TableRow> {
        for line in self.lines.by_ref() {
            let trimmed = line.trim();

            if let Some(title) = section_heading(trimmed) {
                self.section = Some(title.to_string());
                self.in_table = false;
                continue;
            }

            if (self.is_header)(line) {
                self.in_table = true;
                continue;
            }

            if !self.in_table || trimmed.is_empty() || is_separator(trimmed) {
                continue;
            }

            if is_heading(trimmed) {
                self.in_table = false;
                continue;
            }

            if !line.starts_with('|') {
                continue;
            }

            let cells = split_cells(line);
            if cells.is_empty() {
                continue;
            }

            return Some(TableRow {
                cells,
                section: self.section.clone(),
            });
        }
        None
    }
}

/// Text of a `###` (or deeper) heading, hashes and padding stripped.
pub(super) fn section_heading(trimmed: &str) -> Option<&str> {
    if trimmed.starts_with("###") {
        Some(trimmed.trim_start_matches('#').trim())
    } else {
        None
    }
}

/// A markdown heading: `##` and deeper, or `#` followed by whitespace.
/// Issue references such as `#89 と重複` are not headings.
pub(super) fn is_heading(trimmed: &str) -> bool {
    match trimmed.strip_prefix('#') {
        Some(rest) => rest.is_empty() || rest.starts_with('#') || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

/// `|---|---|` or `| :--- | ---: |` style delimiter rows.
pub(super) fn is_separator(trimmed: &str) -> bool {
    if trimmed.starts_with("|---") {
        return true;
    }
    if !trimmed.starts_with('|') {
        return false;
    }
    let mut cells = trimmed.split('|').map(str::trim).filter(|c| !c.is_empty()).peekable();
    cells.peek().is_some()
        && cells.all(|c| c.contains('-') && c.chars().all(|ch| ch == '-' || ch == ':'))
}

/// Split a table row on `|`, trim each cell and drop the empty ones.
///
/// Dropping empties removes the pseudo-cells produced by leading and
/// trailing delimiters; genuinely empty cells are dropped too, so later
/// columns shift left.
pub(super) fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
