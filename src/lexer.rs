use thiserror::Error;

use crate::ast::{Pattern, Span, TagIndex, TagKey, Token, TokenKind};

/// Errors raised while turning filter source into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{found}' at position {}", .span.start)]
    UnexpectedChar { found: char, span: Span },

    #[error("expected {expected} at position {}", .span.start)]
    Expected { expected: &'static str, span: Span },

    #[error("malformed number '{text}'")]
    InvalidNumber { text: String, span: Span },

    #[error("unterminated {what}, missing closing '{delimiter}'")]
    Unterminated {
        what: &'static str,
        delimiter: char,
        span: Span,
    },

    #[error("regex option '{flag}' given twice")]
    DuplicateRegexFlag { flag: char, span: Span },

    #[error("can't compile regex: {message}")]
    InvalidRegex { message: String, span: Span },

    #[error("empty tag name after '%' (use %{{}} for the empty key)")]
    EmptyTagName { span: Span },

    #[error("invalid tag index, expected a number, '*', '*&' or '*|'")]
    InvalidTagIndex { span: Span },

    #[error("unknown keyword '{word}', expected 'filename', 'backend' or 'undef'")]
    UnknownKeyword { word: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. }
            | LexError::Expected { span, .. }
            | LexError::InvalidNumber { span, .. }
            | LexError::Unterminated { span, .. }
            | LexError::DuplicateRegexFlag { span, .. }
            | LexError::InvalidRegex { span, .. }
            | LexError::EmptyTagName { span }
            | LexError::InvalidTagIndex { span }
            | LexError::UnknownKeyword { span, .. } => *span,
        }
    }

    /// The error message followed by the source with the span underlined.
    pub fn render(&self, source: &str) -> String {
        format!("lexer error: {}\n{}", self, self.span().underline(source))
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// On-demand tokenizer for filter source.
///
/// The first call to [`Lexer::next_token`] yields [`TokenKind::Start`], the
/// following ones walk the source, and [`TokenKind::End`] is returned forever
/// once it is exhausted.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    started: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            started: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.position)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if accept(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Consumes the current char, plus the next one when it is `second`.
    fn one_or_two(&mut self, second: char, single: TokenKind, double: TokenKind) -> TokenKind {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            double
        } else {
            self.advance();
            single
        }
    }

    /// Two-char operator whose first char is meaningless alone (`&&`, `||`).
    fn doubled(
        &mut self,
        second: char,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<TokenKind, LexError> {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            Ok(kind)
        } else {
            Err(LexError::Expected {
                expected,
                span: Span::new(self.position, self.position + 1),
            })
        }
    }

    /// Reads a `"` or `/` delimited literal. Only the delimiter can be
    /// escaped; any other backslash is kept as is.
    fn read_delimited(&mut self, delimiter: char, what: &'static str) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // Consume opening delimiter

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == delimiter => {
                    self.advance();
                    return Ok(result);
                }
                '\\' if self.peek_char(1) == Some(delimiter) => {
                    result.push(delimiter);
                    self.advance();
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::Unterminated {
            what,
            delimiter,
            span: self.span_from(start),
        })
    }

    fn read_regex(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;
        let source = self.read_delimited('/', "regex")?;

        let mut case_insensitive = false;
        let mut multiline = false;
        while let Some(flag @ ('i' | 'm')) = self.current_char() {
            let seen = if flag == 'i' {
                &mut case_insensitive
            } else {
                &mut multiline
            };
            if *seen {
                return Err(LexError::DuplicateRegexFlag {
                    flag,
                    span: Span::new(self.position, self.position + 1),
                });
            }
            *seen = true;
            self.advance();
        }

        let pattern = Pattern::new(&source, case_insensitive, multiline).map_err(|e| {
            LexError::InvalidRegex {
                message: e.to_string(),
                span: self.span_from(start),
            }
        })?;
        Ok(TokenKind::Regex(pattern))
    }

    fn read_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;
        let mut text = String::new();

        if let Some(sign @ ('+' | '-')) = self.current_char() {
            text.push(sign);
            self.advance();
        }

        // A lone zero is complete by itself: `012` is `0` then `12`
        if self.current_char() == Some('0') && self.peek_char(1) != Some('.') {
            self.advance();
            self.reject_number_suffix(start)?;
            return Ok(TokenKind::Integer(0));
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() || ch == '.' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        self.reject_number_suffix(start)?;

        let invalid = || LexError::InvalidNumber {
            text: text.clone(),
            span: Span::new(start, self.position),
        };

        if text.contains('.') {
            text.parse::<f64>().map(TokenKind::Float).map_err(|_| invalid())
        } else {
            text.parse::<i64>().map(TokenKind::Integer).map_err(|_| invalid())
        }
    }

    /// A number glued to letters (`5abc`, `0x1f`) is one malformed number.
    fn reject_number_suffix(&mut self, start: usize) -> Result<(), LexError> {
        match self.current_char() {
            Some(ch) if is_ident_char(ch) && !ch.is_ascii_digit() => {
                self.read_while(is_ident_char);
                Err(LexError::InvalidNumber {
                    text: self.input[start..self.position].iter().collect(),
                    span: self.span_from(start),
                })
            }
            _ => Ok(()),
        }
    }

    fn read_tag_key(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;
        self.advance(); // Consume '%'

        if self.current_char() == Some('{') {
            self.advance();
            return self.read_braced_tag_key(start);
        }

        let name = self.read_while(is_tag_char);
        if name.is_empty() {
            return Err(LexError::EmptyTagName {
                span: self.span_from(start),
            });
        }
        Ok(TokenKind::TagKey(TagKey::new(name, TagIndex::Unset)))
    }

    /// `%{name}` or `%{name=index}`, the opening `%{` already consumed.
    fn read_braced_tag_key(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let mut name = String::new();

        loop {
            match self.current_char() {
                None => {
                    return Err(LexError::Unterminated {
                        what: "tag key",
                        delimiter: '}',
                        span: self.span_from(start),
                    });
                }
                Some('\\') if matches!(self.peek_char(1), Some('}' | '=')) => {
                    if let Some(escaped) = self.peek_char(1) {
                        name.push(escaped);
                    }
                    self.advance();
                    self.advance();
                }
                Some('}') => {
                    self.advance();
                    return Ok(TokenKind::TagKey(TagKey::new(name, TagIndex::Unset)));
                }
                Some('=') => {
                    self.advance();
                    let index = self.read_tag_index(start)?;
                    return Ok(TokenKind::TagKey(TagKey::new(name, index)));
                }
                Some(ch) => {
                    name.push(ch);
                    self.advance();
                }
            }
        }
    }

    /// Index specifier after `=`, up to and including the closing `}`.
    fn read_tag_index(&mut self, key_start: usize) -> Result<TagIndex, LexError> {
        let start = self.position;

        let index = match self.current_char() {
            Some('*') => {
                self.advance();
                match self.current_char() {
                    Some('&') => {
                        self.advance();
                        TagIndex::All
                    }
                    Some('|') => {
                        self.advance();
                        TagIndex::Any
                    }
                    _ => TagIndex::Join,
                }
            }
            Some(ch) if ch.is_ascii_digit() => {
                let digits = self.read_while(|c| c.is_ascii_digit());
                let n = digits.parse::<usize>().map_err(|_| LexError::InvalidTagIndex {
                    span: self.span_from(start),
                })?;
                TagIndex::Nth(n)
            }
            _ => {
                return Err(LexError::InvalidTagIndex {
                    span: Span::new(start, start + 1),
                });
            }
        };

        match self.current_char() {
            Some('}') => {
                self.advance();
                Ok(index)
            }
            None => Err(LexError::Unterminated {
                what: "tag key",
                delimiter: '}',
                span: self.span_from(key_start),
            }),
            Some(_) => Err(LexError::InvalidTagIndex {
                span: Span::new(start, self.position + 1),
            }),
        }
    }

    fn read_keyword(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;
        let word = self.read_while(is_ident_char);

        match word.to_ascii_lowercase().as_str() {
            "filename" => Ok(TokenKind::Filename),
            "backend" => Ok(TokenKind::Backend),
            "undef" => Ok(TokenKind::Undef),
            _ => Err(LexError::UnknownKeyword {
                word,
                span: self.span_from(start),
            }),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if !self.started {
            self.started = true;
            return Ok(Token::new(TokenKind::Start, Span::new(0, 0)));
        }

        self.skip_whitespace();
        let start = self.position;

        let kind = match self.current_char() {
            None => TokenKind::End,
            Some('!') => match self.peek_char(1) {
                Some('~') => {
                    self.advance();
                    self.advance();
                    TokenKind::NotMatch
                }
                _ => self.one_or_two('=', TokenKind::Not, TokenKind::Ne),
            },
            Some('=') => match self.peek_char(1) {
                Some('=') | Some('~') => {
                    let kind = if self.peek_char(1) == Some('=') {
                        TokenKind::Eq
                    } else {
                        TokenKind::Match
                    };
                    self.advance();
                    self.advance();
                    kind
                }
                _ => {
                    return Err(LexError::Expected {
                        expected: "'==' or '=~' (a single '=' is not an operator)",
                        span: Span::new(start, start + 1),
                    });
                }
            },
            Some('&') => self.doubled('&', TokenKind::And, "'&&'")?,
            Some('|') => self.doubled('|', TokenKind::Or, "'||'")?,
            Some('<') => self.one_or_two('=', TokenKind::Lt, TokenKind::Le),
            Some('>') => self.one_or_two('=', TokenKind::Gt, TokenKind::Ge),
            Some('(') => {
                self.advance();
                TokenKind::OpenParen
            }
            Some(')') => {
                self.advance();
                TokenKind::CloseParen
            }
            Some('"') => TokenKind::String(self.read_delimited('"', "string")?),
            Some('/') => self.read_regex()?,
            Some('%') => self.read_tag_key()?,
            Some(ch) if ch.is_ascii_digit() || ch == '+' || ch == '-' => self.read_number()?,
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.read_keyword()?,
            Some(ch) => {
                return Err(LexError::UnexpectedChar {
                    found: ch,
                    span: Span::new(start, start + 1),
                });
            }
        };

        let token = Token::new(kind, self.span_from(start));
        log::trace!("lexed {:?} at {}", token.kind, token.span);
        Ok(token)
    }
}
