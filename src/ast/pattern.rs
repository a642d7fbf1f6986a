use std::fmt;

use regex::{Regex, RegexBuilder};

/// A regex literal compiled at lex time.
///
/// Flags follow POSIX extended semantics: without `m` the whole value is one
/// line (`.` matches a newline, `^`/`$` anchor at the ends only); with `m`,
/// `.` stops at newlines and `^`/`$` also anchor at line boundaries.
///
/// The pattern text itself uses the `regex` crate syntax, which is close to
/// but not the same as POSIX ERE. A backslash always escapes, including
/// inside brackets (`[a\]]` is `a` or `]`), and an escape with no meaning
/// such as `\y` is rejected instead of matching `y`. Perl classes like `\d`
/// and `\b` are available.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    source: String,
    case_insensitive: bool,
    multiline: bool,
}

impl Pattern {
    pub fn new(source: &str, case_insensitive: bool, multiline: bool) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(case_insensitive)
            .multi_line(multiline)
            .dot_matches_new_line(!multiline)
            .build()?;

        Ok(Pattern {
            regex,
            source: source.to_string(),
            case_insensitive,
            multiline,
        })
    }

    /// Pattern text as written between the slashes, escapes resolved.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.case_insensitive == other.case_insensitive
            && self.multiline == other.multiline
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for c in self.source.chars() {
            if c == '/' {
                f.write_str("\\")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str("/")?;
        if self.case_insensitive {
            f.write_str("i")?;
        }
        if self.multiline {
            f.write_str("m")?;
        }
        Ok(())
    }
}
