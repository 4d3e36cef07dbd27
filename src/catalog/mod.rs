//! Catalog issue parser.
//!
//! Catalog issues list moves or abilities as markdown tables:
//!
//! ```text
//! ### 場に出たとき
//! | 日本語名 | 英語名 | トリガー | カテゴリ |
//! |---|---|---|---|
//! | いかく | Intimidate | 場に出たとき | 能力変化 |
//! ```
//!
//! Parsing is tolerant and lossy: short rows are kept with empty fields.

mod model;
mod parse;

pub use model::{AbilityRecord, MoveRecord, TicketKind, DEFAULT_SECTION};
pub use parse::{parse_abilities, parse_moves};

/// A record type that can be parsed out of a catalog issue and listed in a
/// sub-issue body.
pub trait CatalogRecord: Sized {
    /// Catalog this record belongs to.
    const KIND: TicketKind;

    /// Parse every record in an issue body.
    fn parse_all(body: &str) -> Vec<Self>;

    /// One markdown list line describing this record.
    fn list_line(&self) -> String;
}

impl CatalogRecord for MoveRecord {
    const KIND: TicketKind = TicketKind::Moves;

    fn parse_all(body: &str) -> Vec<Self> {
        parse_moves(body).collect()
    }

    fn list_line(&self) -> String {
        format!("- {} ({}): {}", self.japanese, self.english, self.description)
    }
}

impl CatalogRecord for AbilityRecord {
    const KIND: TicketKind = TicketKind::Abilities;

    fn parse_all(body: &str) -> Vec<Self> {
        parse_abilities(body).collect()
    }

    fn list_line(&self) -> String {
        format!(
            "- {} ({}): {} / {}",
            self.japanese, self.english, self.trigger, self.category
        )
    }
}
