//! subissue: split catalog issues into per-category sub-issues.
//!
//! A catalog issue lists unimplemented moves or abilities as markdown
//! tables. Each run:
//! - fetches the configured catalog issues through the tracker CLI (`gh`)
//! - parses the table rows into records
//! - groups moves by effect keyword and abilities by `###` section
//! - files one sub-issue per group, or prints them in dry-run mode
//!
//! Configuration comes from `subissue.toml`, `SUBISSUE_*` environment
//! variables and CLI flags.

pub mod batch;
pub mod catalog;
pub mod category;
pub mod color;
pub mod config;
pub mod error;
pub mod log;
pub mod output;
pub mod render;
pub mod tracker;
