//! Show how a filter is parsed

use std::fmt;

use super::CliError;
use crate::{Expr, Filter};

/// The parsed form of a filter, for display.
#[derive(Debug)]
pub struct AstReport {
    /// Canonical source, which parses back to the same tree
    pub canonical: String,
    pub expr: Expr,
}

impl fmt::Display for AstReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.canonical)?;
        write!(f, "{:#?}", self.expr)
    }
}

pub fn execute_ast(filter: &str) -> Result<AstReport, CliError> {
    let filter = Filter::parse(filter)?;
    Ok(AstReport {
        canonical: filter.to_string(),
        expr: filter.expr().clone(),
    })
}
