pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod filter;
pub mod lexer;
pub mod numeric;
pub mod parser;
pub mod record;
pub mod taglist;

pub use ast::{BinOp, Expr, ExprKind, LogicOp, Operand, Pattern, Span, TagIndex, TagKey, Token, TokenKind, Value};
pub use evaluator::{Evaluator, evaluate};
pub use filter::Filter;
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, Parser};
pub use record::{Record, TagRecord};
pub use taglist::{Tag, TagList};
