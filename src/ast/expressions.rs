use std::fmt;

use crate::ast::{
    BinOp, LogicOp, Pattern, Span, TagKey,
    tokens::{write_float, write_string},
};

/// An operand of a simple condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Literals
    /// Literal integer
    ///
    /// # Example
    /// ```text
    /// 2000
    /// ```
    Integer(i64),

    /// Literal floating point number
    ///
    /// # Example
    /// ```text
    /// 7.5
    /// ```
    Float(f64),

    /// String literal
    ///
    /// # Example
    /// ```text
    /// "Pink Floyd"
    /// ```
    String(String),

    /// Compiled regex literal, only valid next to `=~` or `!~`
    Regex(Pattern),

    // Dynamic values, resolved against each record
    /// Tag reference
    ///
    /// # Examples
    /// ```text
    /// %artist
    /// %{artist=1}
    /// %{artist=*|}
    /// ```
    TagKey(TagKey),

    /// The record's path (`filename`)
    Filename,

    /// The record's backend identifier (`backend`)
    Backend,

    /// The "no value" marker (`undef`), only valid against a tag key
    Undef,
}

impl Value {
    /// Values that change from one record to the next.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Value::TagKey(_) | Value::Filename | Value::Backend)
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Value::Regex(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write_float(f, *n),
            Value::String(s) => write_string(f, s),
            Value::Regex(p) => write!(f, "{}", p),
            Value::TagKey(key) => write!(f, "{}", key),
            Value::Filename => f.write_str("filename"),
            Value::Backend => f.write_str("backend"),
            Value::Undef => f.write_str("undef"),
        }
    }
}

/// A value leaf of the tree, with the span of its token.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    pub value: Value,
    pub span: Span,
}

impl Operand {
    pub fn new(value: Value, span: Span) -> Self {
        Operand { value, span }
    }
}

/// Abstract Syntax Tree node of a filter.
///
/// The tree is immutable once parsed and can be evaluated against any number
/// of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    /// Source covered by the node, including any grouping parentheses.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Negated group
    ///
    /// # Example
    /// ```text
    /// !(%genre == "rock")
    /// ```
    Not(Box<Expr>),

    /// `&&` or `||` between two conditions
    Logical {
        op: LogicOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Comparison or regex match between two values
    ///
    /// # Examples
    /// ```text
    /// %year >= 2000
    /// filename =~ /\.flac$/
    /// ```
    Comparison {
        op: BinOp,
        left: Operand,
        right: Operand,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    fn needs_parens_under(&self, parent: LogicOp, is_right: bool) -> bool {
        match &self.kind {
            ExprKind::Logical { op: LogicOp::Or, .. } => parent == LogicOp::And || is_right,
            ExprKind::Logical { op: LogicOp::And, .. } => parent == LogicOp::And && is_right,
            _ => false,
        }
    }
}

/// Prints the canonical source of the tree. Parentheses are only emitted
/// where they change the shape, so the output parses back to an equal tree
/// (spans aside).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Not(inner) => write!(f, "!({})", inner),
            ExprKind::Logical { op, left, right } => {
                if left.needs_parens_under(*op, false) {
                    write!(f, "({})", left)?;
                } else {
                    write!(f, "{}", left)?;
                }
                write!(f, " {} ", op)?;
                if right.needs_parens_under(*op, true) {
                    write!(f, "({})", right)
                } else {
                    write!(f, "{}", right)
                }
            }
            ExprKind::Comparison { op, left, right } => {
                write!(f, "{} {} {}", left.value, op, right.value)
            }
        }
    }
}
