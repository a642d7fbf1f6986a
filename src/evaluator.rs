use std::{borrow::Cow, cmp::Ordering};

use crate::{
    ast::{BinOp, Expr, ExprKind, LogicOp, Operand, TagIndex, TagKey, Value},
    numeric::{parse_float_prefix, parse_integer_prefix},
    record::Record,
};

/// Separator used when a multi-valued tag is compared as a single string.
pub const JOIN_SEPARATOR: &str = " - ";

/// One side of a comparison, ready to be compared.
#[derive(Debug, Clone)]
enum Scalar<'a> {
    Text(Cow<'a, str>),
    Integer(i64),
    Float(f64),
}

impl Scalar<'_> {
    fn as_integer(&self) -> i64 {
        match self {
            Scalar::Text(s) => parse_integer_prefix(s),
            Scalar::Integer(n) => *n,
            Scalar::Float(n) => *n as i64,
        }
    }

    fn as_float(&self) -> f64 {
        match self {
            Scalar::Text(s) => parse_float_prefix(s),
            Scalar::Integer(n) => *n as f64,
            Scalar::Float(n) => *n,
        }
    }

    fn as_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(s) => Cow::Borrowed(s.as_ref()),
            Scalar::Integer(n) => Cow::Owned(n.to_string()),
            Scalar::Float(n) => Cow::Owned(n.to_string()),
        }
    }
}

/// An operand resolved against the current record.
#[derive(Debug)]
enum Resolved<'a> {
    /// Tag without any value, or an index past the last one
    Undefined,
    /// A single value: a literal, `filename`, `backend`, a joined or indexed tag
    One(Scalar<'a>),
    /// `*|`: the comparison must hold for at least one value
    Any(Vec<String>),
    /// `*&`: the comparison must hold for every value
    All(Vec<String>),
}

impl Resolved<'_> {
    fn is_undefined(&self) -> bool {
        matches!(self, Resolved::Undefined)
    }

    /// Runs `test` on the candidate values, short-circuiting per quantifier.
    fn satisfies(&self, mut test: impl FnMut(&Scalar<'_>) -> bool) -> bool {
        match self {
            Resolved::Undefined => false,
            Resolved::One(scalar) => test(scalar),
            Resolved::Any(values) => values
                .iter()
                .any(|v| test(&Scalar::Text(Cow::Borrowed(v.as_str())))),
            Resolved::All(values) => values
                .iter()
                .all(|v| test(&Scalar::Text(Cow::Borrowed(v.as_str())))),
        }
    }
}

/// How two scalars are compared, picked from the literal operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Integer,
    Float,
    Text,
}

impl Domain {
    fn of(left: &Value, right: &Value) -> Domain {
        match (left, right) {
            (Value::Integer(_), _) | (_, Value::Integer(_)) => Domain::Integer,
            (Value::Float(_), _) | (_, Value::Float(_)) => Domain::Float,
            _ => Domain::Text,
        }
    }

    /// `None` when the pair is unordered (NaN).
    fn compare(self, left: &Scalar<'_>, right: &Scalar<'_>) -> Option<Ordering> {
        match self {
            Domain::Integer => Some(left.as_integer().cmp(&right.as_integer())),
            Domain::Float => left.as_float().partial_cmp(&right.as_float()),
            Domain::Text => Some(left.as_text().as_bytes().cmp(right.as_text().as_bytes())),
        }
    }
}

/// Evaluates filter trees against a single record.
///
/// The evaluator holds no state besides the record, so one parsed tree can be
/// evaluated against any number of records, from any number of threads.
///
/// # Examples
///
/// ```
/// use tagfilter::{Evaluator, Lexer, Parser, TagRecord};
///
/// let expr = Parser::new(Lexer::new("%year >= 2000")).unwrap().parse().unwrap();
/// let record = TagRecord::new("a.flac", "libFLAC").with_tag("year", "2004");
///
/// assert!(Evaluator::new(&record).eval(&expr));
/// ```
pub struct Evaluator<'r, R: Record + ?Sized> {
    record: &'r R,
}

impl<'r, R: Record + ?Sized> Evaluator<'r, R> {
    pub fn new(record: &'r R) -> Self {
        Evaluator { record }
    }

    pub fn eval(&self, expr: &Expr) -> bool {
        match &expr.kind {
            ExprKind::Not(inner) => !self.eval(inner),
            ExprKind::Logical {
                op: LogicOp::And,
                left,
                right,
            } => self.eval(left) && self.eval(right),
            ExprKind::Logical {
                op: LogicOp::Or,
                left,
                right,
            } => self.eval(left) || self.eval(right),
            ExprKind::Comparison { op, left, right } => {
                let result = if op.is_match() {
                    self.eval_match(*op, left, right)
                } else {
                    self.eval_comparison(*op, left, right)
                };
                log::trace!(
                    "{}: {} {} {} -> {}",
                    self.record.path(),
                    left.value,
                    op,
                    right.value,
                    result
                );
                result
            }
        }
    }

    fn resolve<'a>(&self, operand: &'a Operand) -> Resolved<'a> {
        match &operand.value {
            Value::Integer(n) => Resolved::One(Scalar::Integer(*n)),
            Value::Float(n) => Resolved::One(Scalar::Float(*n)),
            Value::String(s) => Resolved::One(Scalar::Text(Cow::Borrowed(s.as_str()))),
            Value::Filename => Resolved::One(Scalar::Text(Cow::Owned(self.record.path().to_string()))),
            Value::Backend => {
                Resolved::One(Scalar::Text(Cow::Owned(self.record.backend_id().to_string())))
            }
            Value::TagKey(key) => self.resolve_tag(key),
            // Only next to a match operator or a tag key, handled by the callers
            Value::Regex(_) | Value::Undef => Resolved::Undefined,
        }
    }

    fn resolve_tag(&self, key: &TagKey) -> Resolved<'static> {
        let mut values = self.record.lookup(&key.name);
        if values.is_empty() {
            log::trace!("{}: tag '{}' is undefined", self.record.path(), key.name);
            return Resolved::Undefined;
        }

        match key.index {
            TagIndex::Unset | TagIndex::Join => {
                Resolved::One(Scalar::Text(Cow::Owned(values.join(JOIN_SEPARATOR))))
            }
            TagIndex::Nth(n) if n < values.len() => {
                Resolved::One(Scalar::Text(Cow::Owned(values.swap_remove(n))))
            }
            TagIndex::Nth(n) => {
                log::trace!(
                    "{}: tag '{}' has no value at index {}",
                    self.record.path(),
                    key.name,
                    n
                );
                Resolved::Undefined
            }
            TagIndex::Any => Resolved::Any(values),
            TagIndex::All => Resolved::All(values),
        }
    }

    fn eval_comparison(&self, op: BinOp, left: &Operand, right: &Operand) -> bool {
        match (&left.value, &right.value) {
            (Value::Undef, _) => return self.eval_undef(op, right, Ordering::Greater),
            (_, Value::Undef) => return self.eval_undef(op, left, Ordering::Less),
            _ => {}
        }

        let domain = Domain::of(&left.value, &right.value);

        let lhs = self.resolve(left);
        if lhs.is_undefined() {
            return false;
        }
        let rhs = self.resolve(right);
        if rhs.is_undefined() {
            return false;
        }

        lhs.satisfies(|l| rhs.satisfies(|r| op.holds(domain.compare(l, r))))
    }

    /// `undef` is equal to an undefined tag and orders after a defined one.
    /// `defined` is the ordering of the written left side against the right
    /// side when the tag has a value.
    fn eval_undef(&self, op: BinOp, tag: &Operand, defined: Ordering) -> bool {
        let ordering = if self.resolve(tag).is_undefined() {
            Ordering::Equal
        } else {
            defined
        };
        op.holds(Some(ordering))
    }

    fn eval_match(&self, op: BinOp, left: &Operand, right: &Operand) -> bool {
        let (pattern, subject) = match (&left.value, &right.value) {
            (Value::Regex(p), _) => (p, right),
            (_, Value::Regex(p)) => (p, left),
            // The parser requires a regex on exactly one side
            _ => return false,
        };

        let matched = self
            .resolve(subject)
            .satisfies(|s| pattern.is_match(&s.as_text()));

        if op == BinOp::NotMatch {
            !matched
        } else {
            matched
        }
    }
}

/// Evaluates `expr` against `record`.
pub fn evaluate<R: Record + ?Sized>(expr: &Expr, record: &R) -> bool {
    Evaluator::new(record).eval(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lexer, Parser, TagRecord};
    use test_log::test;

    fn eval(filter: &str, record: &TagRecord) -> bool {
        let expr = Parser::new(Lexer::new(filter)).unwrap().parse().unwrap();
        evaluate(&expr, record)
    }

    fn rating(value: &str) -> TagRecord {
        TagRecord::new("a.ogg", "libvorbis").with_tag("rating", value)
    }

    #[test]
    fn integer_literal_reads_numeric_prefix() {
        let record = rating("4 stars");
        assert!(eval("%rating == 4", &record));
        assert!(eval("%rating > 3", &record));
        assert!(eval("3 < %rating", &record));
    }

    #[test]
    fn non_numeric_text_reads_as_zero() {
        let record = rating("unrated");
        assert!(eval("%rating == 0", &record));
        assert!(eval("%rating < 1", &record));
    }

    #[test]
    fn float_literal_uses_float_domain() {
        let record = rating("4.5");
        assert!(eval("%rating > 4.25", &record));
        assert!(eval("%rating == 4.5", &record));
        // integer domain truncates
        assert!(eval("%rating == 4", &record));
    }

    #[test]
    fn nan_only_satisfies_not_equal() {
        let record = rating("nan");
        assert!(!eval("%rating == 1.0", &record));
        assert!(!eval("%rating < 1.0", &record));
        assert!(!eval("%rating >= 1.0", &record));
        assert!(eval("%rating != 1.0", &record));
    }

    #[test]
    fn string_literal_compares_bytes() {
        let record = TagRecord::new("a.ogg", "libvorbis").with_tag("title", "Zebra");
        assert!(eval("%title > \"Apple\"", &record));
        // uppercase sorts before lowercase
        assert!(eval("%title < \"apple\"", &record));
    }

    #[test]
    fn undef_ordering_is_mirrored() {
        let defined = rating("1");
        let missing = TagRecord::new("a.ogg", "libvorbis");

        assert!(eval("undef > %rating", &defined));
        assert!(eval("%rating < undef", &defined));
        assert!(eval("%rating != undef", &defined));
        assert!(!eval("%rating != undef", &missing));
        assert!(eval("undef == %rating", &missing));
    }
}
