use std::fmt;

use crate::{
    ast::Expr,
    evaluator::evaluate,
    lexer::Lexer,
    parser::{ParseError, Parser},
    record::Record,
};

/// A parsed filter, ready to be evaluated against records.
///
/// The source text is kept next to the tree so that errors found later can
/// still be shown in context.
///
/// # Examples
///
/// ```
/// use tagfilter::{Filter, TagRecord};
///
/// let filter = Filter::parse(r#"%artist =~ /beatles/i && %year < 1970"#).unwrap();
///
/// let records = vec![
///     TagRecord::new("a.mp3", "id3v2").with_tag("artist", "The Beatles").with_tag("year", "1966"),
///     TagRecord::new("b.mp3", "id3v2").with_tag("artist", "The Beatles").with_tag("year", "1970"),
///     TagRecord::new("c.mp3", "id3v2").with_tag("artist", "Wings").with_tag("year", "1966"),
/// ];
///
/// let paths: Vec<_> = filter.select(&records).map(|r| r.path.as_str()).collect();
/// assert_eq!(paths, vec!["a.mp3"]);
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    source: String,
    expr: Expr,
}

impl Filter {
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let expr = Parser::new(Lexer::new(source))?.parse()?;
        log::debug!("parsed filter `{}` ({}) as {}", source, expr.span, expr);

        Ok(Filter {
            source: source.to_string(),
            expr,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        let verdict = evaluate(&self.expr, record);
        log::trace!("{}: {}", record.path(), if verdict { "match" } else { "no match" });
        verdict
    }

    /// Lazily yields the records this filter matches, in input order.
    pub fn select<'f, I>(&'f self, records: I) -> impl Iterator<Item = I::Item> + 'f
    where
        I: IntoIterator + 'f,
        I::Item: Record,
    {
        records.into_iter().filter(move |record| self.matches(record))
    }
}

/// Canonical form: parses back to the same tree.
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TagRecord;
    use test_log::test;

    #[test]
    fn test_select_keeps_input_order() {
        let filter = Filter::parse("%genre == \"rock\"").unwrap();
        let records = vec![
            TagRecord::new("1.ogg", "libvorbis").with_tag("genre", "rock"),
            TagRecord::new("2.ogg", "libvorbis").with_tag("genre", "jazz"),
            TagRecord::new("3.ogg", "libvorbis").with_tag("genre", "rock"),
        ];

        let selected: Vec<_> = filter.select(records).map(|r| r.path).collect();
        assert_eq!(selected, vec!["1.ogg", "3.ogg"]);
    }

    #[test]
    fn test_display_is_canonical() {
        let filter = Filter::parse("(%a==1)&&!(  %b!=\"x\" )").unwrap();
        assert_eq!(filter.to_string(), "%a == 1 && !(%b != \"x\")");
        assert_eq!(filter.source(), "(%a==1)&&!(  %b!=\"x\" )");
    }

    #[test]
    fn test_parse_error_renders_against_source() {
        let source = "%a == 1 &&";
        let err = Filter::parse(source).unwrap_err();
        let rendered = err.render(source);
        assert!(rendered.starts_with("parser error: "));
        assert!(rendered.contains(source));
        assert!(rendered.contains('^'));
    }
}
