//! CLI support for tagfilter
//!
//! Provides programmatic access to the `tagfilter` commands, so that a tag
//! editor front end can reuse them without spawning the binary.

mod ast;
mod check;
mod convert;
mod docs;

pub use ast::{AstReport, execute_ast};
pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::{json_to_records, record_to_json, records_to_json};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

use crate::ParseError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no input provided, use --input or pipe JSON to stdin")]
    NoInput,

    #[error("unknown category: '{0}'\nRun 'tagfilter docs' to see available categories.")]
    UnknownCategory(String),
}

impl CliError {
    /// User facing report. Filter errors underline the offending part of
    /// `filter`.
    pub fn render(&self, filter: &str) -> String {
        match self {
            CliError::Parse(e) => e.render(filter),
            other => format!("error: {}", other),
        }
    }
}
