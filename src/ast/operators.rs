use std::{cmp::Ordering, fmt};

/// Binary operators of a simple condition (`value op value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Regex
    /// Regex match (`=~`)
    Match,
    /// Negated regex match (`!~`)
    NotMatch,
}

impl BinOp {
    pub fn is_match(self) -> bool {
        matches!(self, BinOp::Match | BinOp::NotMatch)
    }

    /// Applies the sign test of a comparison operator.
    ///
    /// `None` stands for an unordered pair (a NaN was involved): only `!=`
    /// holds then.
    pub fn holds(self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return self == BinOp::NotEqual;
        };

        match self {
            BinOp::Equal => ordering == Ordering::Equal,
            BinOp::NotEqual => ordering != Ordering::Equal,
            BinOp::LessThan => ordering == Ordering::Less,
            BinOp::GreaterThan => ordering == Ordering::Greater,
            BinOp::LessEqual => ordering != Ordering::Greater,
            BinOp::GreaterEqual => ordering != Ordering::Less,
            BinOp::Match | BinOp::NotMatch => false,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::LessThan => "<",
            BinOp::GreaterThan => ">",
            BinOp::LessEqual => "<=",
            BinOp::GreaterEqual => ">=",
            BinOp::Match => "=~",
            BinOp::NotMatch => "!~",
        })
    }
}

/// Logical connectives between conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicOp::And => "&&",
            LogicOp::Or => "||",
        })
    }
}
