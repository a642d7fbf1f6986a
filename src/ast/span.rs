use std::fmt;

/// A `[start, end)` range of character offsets into the filter source.
///
/// Offsets count `char`s, not bytes, so a span can be used to underline the
/// offending part of a filter no matter what the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub const fn len(self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Creates a span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Renders `source` with the span underlined on the line below.
    ///
    /// ```text
    /// %year == "abc
    ///          ^~~~
    /// ```
    ///
    /// Empty spans (e.g. the end of input) still get a single caret.
    pub fn underline(self, source: &str) -> String {
        let chars: Vec<char> = source.chars().collect();
        let start = self.start.min(chars.len());
        let end = self.end.clamp(start, chars.len());

        let line: String = chars
            .iter()
            .map(|&c| if c == '\n' || c == '\t' { ' ' } else { c })
            .collect();

        let mut marker = " ".repeat(start);
        marker.push('^');
        if end > start + 1 {
            marker.push_str(&"~".repeat(end - start - 1));
        }

        format!("{}\n{}", line, marker)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underline_marks_the_span() {
        let rendered = Span::new(9, 13).underline("%year == \"abc");
        assert_eq!(rendered, "%year == \"abc\n         ^~~~");
    }

    #[test]
    fn underline_empty_span_at_end() {
        let rendered = Span::new(5, 5).underline("%year");
        assert_eq!(rendered, "%year\n     ^");
    }

    #[test]
    fn merge_covers_both() {
        assert_eq!(Span::new(4, 6).merge(Span::new(0, 2)), Span::new(0, 6));
    }
}
