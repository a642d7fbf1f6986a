use std::fmt;

use crate::ast::{Pattern, Span};

/// Positional selector attached to a tag key.
///
/// # Examples
/// ```text
/// %artist         // Unset
/// %{artist=2}     // Nth(2)
/// %{artist=*}     // Join
/// %{artist=*&}    // All
/// %{artist=*|}    // Any
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagIndex {
    /// No selector: all values joined with `" - "`
    #[default]
    Unset,

    /// The Nth value, 0-based
    Nth(usize),

    /// `*`: all values joined with `" - "`
    Join,

    /// `*&`: every value must satisfy the comparison
    All,

    /// `*|`: at least one value must satisfy the comparison
    Any,
}

/// A reference to a (possibly multi-valued) tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagKey {
    pub name: String,
    pub index: TagIndex,
}

impl TagKey {
    pub fn new(name: impl Into<String>, index: TagIndex) -> Self {
        TagKey {
            name: name.into(),
            index,
        }
    }

    fn is_bare(&self) -> bool {
        self.index == TagIndex::Unset
            && !self.name.is_empty()
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

/// Prints the source form, which lexes back to an equal key. Backslashes
/// are written as is, since only `\}` and `\=` are escapes; a name ending in
/// a backslash has no source form and is never produced by the lexer.
impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            return write!(f, "%{}", self.name);
        }

        f.write_str("%{")?;
        for c in self.name.chars() {
            if c == '}' || c == '=' {
                f.write_str("\\")?;
            }
            write!(f, "{}", c)?;
        }
        match self.index {
            TagIndex::Unset => {}
            TagIndex::Nth(n) => write!(f, "={}", n)?,
            TagIndex::Join => f.write_str("=*")?,
            TagIndex::All => f.write_str("=*&")?,
            TagIndex::Any => f.write_str("=*|")?,
        }
        f.write_str("}")
    }
}

/// The kind of a lexical token, without its location.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Sentinel returned once, before the first real token
    Start,

    /// End of the filter source
    End,

    // Logical
    /// `!`, only valid right before `(`
    Not,

    /// `&&`
    And,

    /// `||`
    Or,

    // Comparison
    /// `==`
    Eq,

    /// `!=`
    Ne,

    /// `<`
    Lt,

    /// `<=`
    Le,

    /// `>`
    Gt,

    /// `>=`
    Ge,

    // Regex matching
    /// `=~`
    Match,

    /// `!~`
    NotMatch,

    // Grouping
    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    // Values
    /// Integer literal, optionally signed
    ///
    /// # Examples
    /// ```text
    /// 2000
    /// -3
    /// ```
    Integer(i64),

    /// Floating point literal, recognized by its `.`
    ///
    /// # Examples
    /// ```text
    /// 0.5
    /// -12.
    /// ```
    Float(f64),

    /// String literal enclosed in double quotes, `\"` escapes the quote
    String(String),

    /// Regex literal enclosed in slashes, with optional `i` and `m` flags
    ///
    /// # Examples
    /// ```text
    /// /rock/i
    /// /^a.*z$/m
    /// ```
    Regex(Pattern),

    /// `%name` or `%{name=index}`
    TagKey(TagKey),

    /// The `filename` keyword
    Filename,

    /// The `backend` keyword
    Backend,

    /// The `undef` keyword
    Undef,
}

impl TokenKind {
    /// Human readable name used in parse errors.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Start => "start of filter",
            TokenKind::End => "end of filter",
            TokenKind::Not => "'!'",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::Eq => "'=='",
            TokenKind::Ne => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::Match => "'=~'",
            TokenKind::NotMatch => "'!~'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Integer(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::String(_) => "string",
            TokenKind::Regex(_) => "regex",
            TokenKind::TagKey(_) => "tag key",
            TokenKind::Filename => "'filename'",
            TokenKind::Backend => "'backend'",
            TokenKind::Undef => "'undef'",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Start | TokenKind::End => Ok(()),
            TokenKind::Not => f.write_str("!"),
            TokenKind::And => f.write_str("&&"),
            TokenKind::Or => f.write_str("||"),
            TokenKind::Eq => f.write_str("=="),
            TokenKind::Ne => f.write_str("!="),
            TokenKind::Lt => f.write_str("<"),
            TokenKind::Le => f.write_str("<="),
            TokenKind::Gt => f.write_str(">"),
            TokenKind::Ge => f.write_str(">="),
            TokenKind::Match => f.write_str("=~"),
            TokenKind::NotMatch => f.write_str("!~"),
            TokenKind::OpenParen => f.write_str("("),
            TokenKind::CloseParen => f.write_str(")"),
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::Float(n) => write_float(f, *n),
            TokenKind::String(s) => write_string(f, s),
            TokenKind::Regex(p) => write!(f, "{}", p),
            TokenKind::TagKey(key) => write!(f, "{}", key),
            TokenKind::Filename => f.write_str("filename"),
            TokenKind::Backend => f.write_str("backend"),
            TokenKind::Undef => f.write_str("undef"),
        }
    }
}

/// Floats always keep their `.` so they lex back as floats.
pub(crate) fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    let text = n.to_string();
    if text.contains('.') {
        f.write_str(&text)
    } else {
        write!(f, "{}.0", text)
    }
}

pub(crate) fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        if c == '"' {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("\"")
}

/// A token together with the span of source it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}
