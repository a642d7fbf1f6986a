//! Run a filter against JSON records

use super::{CliError, json_to_records};
use crate::{Filter, TagRecord};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter to run
    pub filter: String,
    /// JSON records, see [`json_to_records`]
    pub input: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
    /// Keep the records that do *not* match
    pub invert: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Records selected by the filter, in input order
    Matches(Vec<TagRecord>),
}

/// Parse the filter, then evaluate it against every input record.
///
/// The filter is parsed before the input is looked at, so a malformed filter
/// is reported even when there is nothing to filter.
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let filter = Filter::parse(&options.filter)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json: serde_json::Value = serde_json::from_str(json_str)?;
    let records = json_to_records(&json)?;
    log::debug!("evaluating `{}` against {} records", filter, records.len());

    let selected: Vec<TagRecord> = records
        .into_iter()
        .filter(|record| filter.matches(record) != options.invert)
        .collect();
    log::debug!("{} records selected", selected.len());

    Ok(CheckResult::Matches(selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const INPUT: &str = r#"[
        {"path": "a.flac", "backend": "libFLAC", "tags": [{"year": "1999"}]},
        {"path": "b.flac", "backend": "libFLAC", "tags": [{"year": "2004"}]},
        {"path": "c.flac", "backend": "libFLAC", "tags": []}
    ]"#;

    fn paths(result: CheckResult) -> Vec<String> {
        match result {
            CheckResult::Matches(records) => records.into_iter().map(|r| r.path).collect(),
            other => panic!("Expected matches, got {:?}", other),
        }
    }

    #[test]
    fn test_check_selects_matching_records() {
        let options = CheckOptions {
            filter: "%year >= 2000".to_string(),
            input: Some(INPUT.to_string()),
            ..Default::default()
        };
        assert_eq!(paths(execute_check(&options).unwrap()), vec!["b.flac"]);
    }

    #[test]
    fn test_check_invert() {
        let options = CheckOptions {
            filter: "%year >= 2000".to_string(),
            input: Some(INPUT.to_string()),
            invert: true,
            ..Default::default()
        };
        assert_eq!(paths(execute_check(&options).unwrap()), vec!["a.flac", "c.flac"]);
    }

    #[test]
    fn test_syntax_only_needs_no_input() {
        let options = CheckOptions {
            filter: "%year == undef".to_string(),
            syntax_only: true,
            ..Default::default()
        };
        assert!(matches!(execute_check(&options), Ok(CheckResult::SyntaxValid)));
    }

    #[test]
    fn test_bad_filter_reported_before_input() {
        let options = CheckOptions {
            filter: "\"a\" == \"a\"".to_string(),
            input: None,
            ..Default::default()
        };
        assert!(matches!(execute_check(&options), Err(CliError::Parse(_))));
    }

    #[test]
    fn test_missing_input() {
        let options = CheckOptions {
            filter: "%a == 1".to_string(),
            ..Default::default()
        };
        assert!(matches!(execute_check(&options), Err(CliError::NoInput)));
    }
}
