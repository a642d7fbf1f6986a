use std::mem;

use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, ExprKind, LogicOp, Operand, Span, Token, TokenKind, Value},
    lexer::{LexError, Lexer},
};

/// Errors raised while building the tree. Every variant but [`ParseError::Lex`]
/// carries the span of the tokens involved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, got {found}")]
    Unexpected {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },

    #[error("'!' must be followed by a parenthesized condition, got {found}")]
    NotWithoutGroup { found: &'static str, span: Span },

    #[error("expected ')' to close '(', got {found}")]
    UnclosedGroup { found: &'static str, span: Span },

    #[error("expected <regex {op} value> or <value {op} regex>, got `{text}`")]
    RegexOperands { op: BinOp, text: String, span: Span },

    #[error("unexpected regex with '{op}' (not a match operator): `{text}`")]
    RegexWithoutMatch { op: BinOp, text: String, span: Span },

    #[error("constant comparison: `{text}`")]
    ConstantComparison { text: String, span: Span },

    #[error("'undef' can only be compared against a tag key: `{text}`")]
    MisplacedUndef { text: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span(),
            ParseError::Unexpected { span, .. }
            | ParseError::NotWithoutGroup { span, .. }
            | ParseError::UnclosedGroup { span, .. }
            | ParseError::RegexOperands { span, .. }
            | ParseError::RegexWithoutMatch { span, .. }
            | ParseError::ConstantComparison { span, .. }
            | ParseError::MisplacedUndef { span, .. } => *span,
        }
    }

    /// The error message followed by the source with the span underlined.
    pub fn render(&self, source: &str) -> String {
        match self {
            ParseError::Lex(e) => e.render(source),
            _ => format!("parser error: {}\n{}", self, self.span().underline(source)),
        }
    }
}

fn is_value(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Integer(_)
            | TokenKind::Float(_)
            | TokenKind::String(_)
            | TokenKind::Regex(_)
            | TokenKind::TagKey(_)
            | TokenKind::Filename
            | TokenKind::Backend
            | TokenKind::Undef
    )
}

/// LL(1) recursive descent parser for filters.
///
/// ```text
/// Filter     ::= Start Condition End
/// Condition  ::= Or
/// Or         ::= And ( '||' And )*
/// And        ::= Simple ( '&&' Simple )*
/// Simple     ::= '!' '(' Condition ')'
///              | '(' Condition ')'
///              | Value Op Value
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.current_token.kind) == mem::discriminant(kind)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::Unexpected {
            expected,
            found: self.current_token.kind.describe(),
            span: self.current_token.span,
        }
    }

    /// Parses a complete filter, consuming the parser and its lexer.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        if !self.check(&TokenKind::Start) {
            return Err(self.unexpected("start of filter"));
        }
        self.advance()?;

        let expr = self.parse_condition()?;

        if !self.check(&TokenKind::End) {
            return Err(self.unexpected("'&&', '||' or end of filter"));
        }
        Ok(expr)
    }

    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&TokenKind::Or) {
            self.advance()?;
            let right = self.parse_and()?;
            left = logical(LogicOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_simple()?;

        while self.check(&TokenKind::And) {
            self.advance()?;
            let right = self.parse_simple()?;
            left = logical(LogicOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_simple(&mut self) -> Result<Expr, ParseError> {
        if is_value(&self.current_token.kind) {
            return self.parse_comparison();
        }

        match self.current_token.kind {
            TokenKind::Not => self.parse_not(),
            TokenKind::OpenParen => self.parse_group(),
            _ => Err(self.unexpected("'!', '(' or a value")),
        }
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        let not_span = self.current_token.span;
        self.advance()?; // consume !

        if !self.check(&TokenKind::OpenParen) {
            return Err(ParseError::NotWithoutGroup {
                found: self.current_token.kind.describe(),
                span: not_span.merge(self.current_token.span),
            });
        }

        let inner = self.parse_group()?;
        let span = not_span.merge(inner.span);
        Ok(Expr::new(ExprKind::Not(Box::new(inner)), span))
    }

    /// `'(' Condition ')'`; no node is created, the inner span is widened to
    /// cover the parentheses.
    fn parse_group(&mut self) -> Result<Expr, ParseError> {
        let open_span = self.current_token.span;
        self.advance()?; // consume (

        let mut expr = self.parse_condition()?;

        if !self.check(&TokenKind::CloseParen) {
            return Err(ParseError::UnclosedGroup {
                found: self.current_token.kind.describe(),
                span: open_span.merge(self.current_token.span),
            });
        }
        let close_span = self.current_token.span;
        self.advance()?; // consume )

        expr.span = open_span.merge(close_span);
        Ok(expr)
    }

    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        if !is_value(&self.current_token.kind) {
            return Err(self.unexpected("a value"));
        }

        let span = self.current_token.span;
        let value = match mem::replace(&mut self.current_token.kind, TokenKind::End) {
            TokenKind::Integer(n) => Value::Integer(n),
            TokenKind::Float(n) => Value::Float(n),
            TokenKind::String(s) => Value::String(s),
            TokenKind::Regex(p) => Value::Regex(p),
            TokenKind::TagKey(key) => Value::TagKey(key),
            TokenKind::Filename => Value::Filename,
            TokenKind::Backend => Value::Backend,
            TokenKind::Undef => Value::Undef,
            _ => unreachable!("checked by is_value"),
        };
        self.advance()?;

        Ok(Operand::new(value, span))
    }

    fn parse_operator(&mut self) -> Result<BinOp, ParseError> {
        let op = match &self.current_token.kind {
            TokenKind::Eq => BinOp::Equal,
            TokenKind::Ne => BinOp::NotEqual,
            TokenKind::Lt => BinOp::LessThan,
            TokenKind::Le => BinOp::LessEqual,
            TokenKind::Gt => BinOp::GreaterThan,
            TokenKind::Ge => BinOp::GreaterEqual,
            TokenKind::Match => BinOp::Match,
            TokenKind::NotMatch => BinOp::NotMatch,
            _ => return Err(self.unexpected("a comparison or match operator")),
        };
        self.advance()?;
        Ok(op)
    }

    /// `Value Op Value`, with the semantic checks that make evaluation total.
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_operand()?;
        let op = self.parse_operator()?;
        let right = self.parse_operand()?;

        let span = left.span.merge(right.span);
        let text = || format!("{} {} {}", left.value, op, right.value);

        if op.is_match() {
            if left.value.is_regex() == right.value.is_regex() {
                return Err(ParseError::RegexOperands {
                    op,
                    text: text(),
                    span,
                });
            }
        } else if left.value.is_regex() || right.value.is_regex() {
            return Err(ParseError::RegexWithoutMatch {
                op,
                text: text(),
                span,
            });
        }

        if !left.value.is_dynamic() && !right.value.is_dynamic() {
            return Err(ParseError::ConstantComparison { text: text(), span });
        }

        let undef_misplaced = |this: &Operand, other: &Operand| {
            matches!(this.value, Value::Undef)
                && (op.is_match() || !matches!(other.value, Value::TagKey(_)))
        };
        if undef_misplaced(&left, &right) || undef_misplaced(&right, &left) {
            return Err(ParseError::MisplacedUndef { text: text(), span });
        }

        Ok(Expr::new(ExprKind::Comparison { op, left, right }, span))
    }
}

fn logical(op: LogicOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Expr, ParseError> {
        Parser::new(Lexer::new(input))?.parse()
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = parse("%a == 1 || %b == 2 && %c == 3").unwrap();
        match expr.kind {
            ExprKind::Logical {
                op: LogicOp::Or,
                right,
                ..
            } => assert!(matches!(
                right.kind,
                ExprKind::Logical {
                    op: LogicOp::And,
                    ..
                }
            )),
            other => panic!("Expected or at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_group_widens_span() {
        let expr = parse("( %a == 1 )").unwrap();
        assert_eq!(expr.span, Span::new(0, 11));
    }

    #[test]
    fn test_lex_error_passes_through() {
        let err = parse("%a = 1").unwrap_err();
        assert!(matches!(err, ParseError::Lex(LexError::Expected { .. })));
    }
}
