//! # Tag Filter Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) of the
//! tag filter language, a small boolean query language used to select audio
//! files by their metadata.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[span]** - Character ranges used for error reporting
//! - **[pattern]** - Regex literals, compiled at lex time
//! - **[operators]** - Comparison, match and logical operators
//! - **[expressions]** - Expression nodes and value operands
//!
//! ## Quick Start
//!
//! ```text
//! %year >= 2000 && %genre =~ /rock/i
//! ```
//!
//! This filter keeps files tagged with a year from 2000 onwards whose genre
//! contains "rock", in any case.
//!
//! ## Core Concepts
//!
//! ### Values
//!
//! Each simple condition compares two values, at least one of which must be
//! dynamic (looked up on each record):
//!
//! - `%name`, `%{name}` - a tag, possibly multi-valued
//! - `filename` - the record's path
//! - `backend` - the backend that read the tags
//!
//! Literals are integers (`2000`), floats (`7.5`), strings (`"rock"`) and
//! regexes (`/rock/i`). `undef` tests whether a tag has no value at all.
//!
//! ### Multi-valued tags
//!
//! A tag key may appear several times in a file. The `%{name=...}` form picks
//! how the values take part in a comparison:
//!
//! - `%{artist=0}` - the first value only
//! - `%{artist=*}` - all values joined with `" - "` (same as `%artist`)
//! - `%{artist=*|}` - true if any value satisfies the comparison
//! - `%{artist=*&}` - true if every value satisfies the comparison
//!
//! ### Comparison domain
//!
//! The literal side decides how the dynamic side is read: next to an integer
//! or float it is parsed as a number (leading numeric prefix, `0` if none),
//! next to a string the two are compared byte by byte.
//!
//! ## Examples
//!
//! ```text
//! %{artist=*|} == "Nick Cave" || filename =~ /bootleg/i
//! !(%genre == undef) && %track <= 3
//! ```
pub mod expressions;
pub mod operators;
pub mod pattern;
pub mod span;
pub mod tokens;

pub use expressions::{Expr, ExprKind, Operand, Value};
pub use operators::{BinOp, LogicOp};
pub use pattern::Pattern;
pub use span::Span;
pub use tokens::{TagIndex, TagKey, Token, TokenKind};
