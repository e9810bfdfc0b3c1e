//! Byte-level scanner producing the parser's token alphabet.
//!
//! The lexer is deliberately small. It recognises the structural characters,
//! classifies everything else as either a digit run or a bare character
//! sequence, and leaves the actual reading of strings, numbers and bare words
//! to the sub-scanners (`read_quoted`, `read_number`, `read_bare_word`), which
//! the parser calls once it has looked at the token.
//!
//! # Whitespace
//!
//! Carriage return, newline and tab are always skipped. A space is skipped
//! only when it directly follows a line break (indentation). Any other space
//! comes back as [`Token::Space`] and it is up to the caller to ignore it.

use std::fmt;

use crate::error::{ErrorKind, JsonError, Result};

const CR: u8 = b'\r';
const NL: u8 = b'\n';
const TAB: u8 = b'\t';
const SPACE: u8 = b' ';

/// The token alphabet.
///
/// `Digit` and `CharSequence` are lookahead-only: the characters they stand
/// for are left in place for a sub-scanner to consume. Every other token
/// consumes the single character it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Space,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Quote,
    Comma,
    Colon,
    CharSequence,
    Digit,
    Minus,
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Token::Space => "space",
            Token::LeftBrace => "`{`",
            Token::RightBrace => "`}`",
            Token::LeftBracket => "`[`",
            Token::RightBracket => "`]`",
            Token::Quote => "`\"`",
            Token::Comma => "`,`",
            Token::Colon => "`:`",
            Token::CharSequence => "bare word",
            Token::Digit => "digit",
            Token::Minus => "`-`",
            Token::End => "end of input",
        };
        f.write_str(s)
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub offset: usize,
}

/// A scanned numeric literal, still as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberText<'a> {
    pub text: &'a str,
    /// Has a fraction or an exponent.
    pub fractional: bool,
}

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Current scan position as a byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.bytes();
        loop {
            while matches!(bytes.get(self.pos), Some(&(CR | NL | TAB))) {
                self.pos += 1;
            }
            let after_break = self.pos > 0 && matches!(bytes[self.pos - 1], CR | NL);
            if after_break && bytes.get(self.pos) == Some(&SPACE) {
                while bytes.get(self.pos) == Some(&SPACE) {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
    }

    /// Scan one token, consuming it unless it is `Digit` or `CharSequence`.
    pub fn next_token(&mut self) -> Lexeme {
        self.skip_whitespace();
        let lexeme = self.peek();
        if !matches!(
            lexeme.token,
            Token::Digit | Token::CharSequence | Token::End
        ) {
            self.pos += 1;
        }
        lexeme
    }

    /// Classify the byte at the current position without skipping
    /// whitespace or consuming anything. Any whitespace byte is `Space`.
    pub fn peek(&self) -> Lexeme {
        let offset = self.pos;
        let token = match self.peek_byte() {
            None => Token::End,
            Some(b'"') => Token::Quote,
            Some(b'{') => Token::LeftBrace,
            Some(b'}') => Token::RightBrace,
            Some(b'[') => Token::LeftBracket,
            Some(b']') => Token::RightBracket,
            Some(b',') => Token::Comma,
            Some(b':') => Token::Colon,
            Some(b'-') => Token::Minus,
            Some(SPACE | TAB | CR | NL) => Token::Space,
            Some(b) if b.is_ascii_digit() => Token::Digit,
            Some(_) => Token::CharSequence,
        };
        Lexeme { token, offset }
    }

    /// Read the body of a quoted string; the opening quote at `open` has
    /// already been consumed. Consumes the closing quote.
    pub fn read_quoted(&mut self, open: usize) -> Result<String> {
        let rest = &self.input[self.pos..];
        let mut out = String::new();
        let mut chars = rest.char_indices();

        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(out);
                }
                '\\' => {
                    let Some((j, esc)) = chars.next() else {
                        break;
                    };
                    let decoded = match esc {
                        '"' => '"',
                        '\\' => '\\',
                        '/' => '/',
                        'b' => '\u{8}',
                        'f' => '\u{c}',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        other => {
                            return Err(JsonError::new(
                                ErrorKind::UnsupportedEscape(other),
                                self.pos + j - 1,
                            ))
                        }
                    };
                    out.push(decoded);
                }
                other => out.push(other),
            }
        }

        self.pos = self.input.len();
        Err(JsonError::new(ErrorKind::UnterminatedString, open))
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek_byte().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Read a digit run with optional fraction and exponent.
    ///
    /// The leading minus, if any, has already been consumed by the caller.
    pub fn read_number(&mut self) -> Result<NumberText<'a>> {
        let start = self.pos;
        let mut fractional = false;

        if self.eat_digits() == 0 {
            return Err(self.invalid_number(start));
        }
        if self.peek_byte() == Some(b'.') {
            self.pos += 1;
            fractional = true;
            if self.eat_digits() == 0 {
                return Err(self.invalid_number(start));
            }
        }
        if matches!(self.peek_byte(), Some(b'e' | b'E')) {
            self.pos += 1;
            fractional = true;
            if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                return Err(self.invalid_number(start));
            }
        }
        if self
            .peek_byte()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'.')
        {
            return Err(self.invalid_number(start));
        }

        Ok(NumberText {
            text: &self.input[start..self.pos],
            fractional,
        })
    }

    fn invalid_number(&mut self, start: usize) -> JsonError {
        self.read_bare_word();
        let text = self.input[start..self.pos].to_string();
        JsonError::new(ErrorKind::InvalidNumber(text), start)
    }

    /// Read an unquoted run up to a comma, space, tab, line break, `}` or `]`.
    pub fn read_bare_word(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek_byte() {
            if matches!(b, b',' | SPACE | TAB | CR | NL | b'}' | b']') {
                break;
            }
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }
}
