//! Object parser: turns the token stream into a [`Document`].
//!
//! The parser is a two-state machine over the lexer's lookahead token:
//!
//! - **ExpectName**: a quoted member name followed by `:`, or `}` closing the
//!   active object.
//! - **ExpectValue**: a string, number, bare word, `{` or `[`.
//!
//! Completing a member flips the state back to `ExpectName`. Opening an object
//! pushes the active node onto an explicit stack of enclosing nodes and makes
//! the new node active; `}` pops it back and attaches the finished child as an
//! object member of its parent. All of this lives in one `Parser` value per
//! call, so independent parses never share state.
//!
//! Commas between members are consumed but their placement is not checked,
//! so `{"a":1 "b":2}` parses the same as `{"a":1,"b":2}`.

use std::mem;

use tracing::{debug, warn};

use crate::error::{ErrorKind, JsonError, Result};
use crate::lexer::{Lexeme, Lexer, NumberText, Token};
use crate::options::{ParseOptions, Precision};
use crate::value::{Diagnostic, Document, Node, Payload, Value};

/// Name of the document's root node.
pub const ROOT_NAME: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectName,
    ExpectValue,
}

/// An enclosing object waiting for its child to close.
#[derive(Debug)]
struct Frame {
    node: Node,
    /// Member name the child will be attached under.
    member: String,
}

/// Parse state for one document.
pub(crate) struct Parser<'a, 'o> {
    lexer: Lexer<'a>,
    lookahead: Lexeme,
    options: &'o ParseOptions,
    state: State,
    /// The object currently receiving members.
    parent: Node,
    stack: Vec<Frame>,
    /// Name of the member whose value is expected next.
    pending: Option<String>,
    diagnostics: Vec<Diagnostic>,
    root_closed: bool,
}

impl<'a, 'o> Parser<'a, 'o> {
    pub(crate) fn new(input: &'a str, options: &'o ParseOptions) -> Self {
        let mut lexer = Lexer::new(input);
        let lookahead = lexer.next_token();
        Self {
            lexer,
            lookahead,
            options,
            state: State::ExpectName,
            parent: Node::new(ROOT_NAME),
            stack: Vec::new(),
            pending: None,
            diagnostics: Vec::new(),
            root_closed: false,
        }
    }

    pub(crate) fn advance(&mut self) {
        self.lookahead = self.lexer.next_token();
    }

    pub(crate) fn lookahead(&self) -> Lexeme {
        self.lookahead
    }

    pub(crate) fn skip_spaces(&mut self) {
        while self.lookahead.token == Token::Space {
            self.advance();
        }
    }

    pub(crate) fn unexpected(&self, expected: &'static str) -> JsonError {
        JsonError::new(
            ErrorKind::UnexpectedToken {
                expected,
                found: self.lookahead.token,
            },
            self.lookahead.offset,
        )
    }

    pub(crate) fn run(mut self) -> Result<Document> {
        self.skip_spaces();
        if self.lookahead.token != Token::LeftBrace {
            return Err(self.unexpected("`{` opening the document"));
        }
        self.advance();

        while !self.root_closed {
            match (self.lookahead.token, self.state) {
                (Token::End, _) => break,
                (Token::Space, _) => self.advance(),
                (_, State::ExpectName) => self.member_name()?,
                (_, State::ExpectValue) => self.member_value()?,
            }
        }

        if !self.root_closed {
            if self.state == State::ExpectValue {
                return Err(self.unexpected("member value"));
            }
            return Err(JsonError::new(
                ErrorKind::UnclosedObject {
                    depth: self.stack.len() + 1,
                },
                self.lookahead.offset,
            ));
        }

        if !self.options.allow_trailing_content {
            self.advance();
            self.skip_spaces();
            if self.lookahead.token != Token::End {
                return Err(JsonError::new(
                    ErrorKind::TrailingContent,
                    self.lookahead.offset,
                ));
            }
        }

        Ok(Document::new(self.parent, self.diagnostics))
    }

    fn member_name(&mut self) -> Result<()> {
        let at = self.lookahead;
        match at.token {
            Token::Quote => {
                let name = self.lexer.read_quoted(at.offset)?;
                self.advance();
                self.skip_spaces();
                if self.lookahead.token != Token::Colon {
                    return Err(self.unexpected("`:` after member name"));
                }
                if self.options.reject_duplicate_keys && self.parent.contains(&name) {
                    return Err(JsonError::new(ErrorKind::DuplicateKey(name), at.offset));
                }
                debug!(name = %name, "member name");
                self.pending = Some(name);
                self.state = State::ExpectValue;
                self.advance();
            }
            Token::RightBrace => self.close_object(),
            Token::Comma => self.advance(),
            _ => return Err(self.unexpected("member name or `}`")),
        }
        Ok(())
    }

    fn member_value(&mut self) -> Result<()> {
        let at = self.lookahead;
        let name = self.pending.take().unwrap_or_default();
        match at.token {
            Token::LeftBrace => return self.open_object(name, at.offset),
            Token::LeftBracket => {
                let array = self.parse_array(at.offset)?;
                debug!(name = %name, len = array.len(), "array");
                self.parent.push(Value::new(name, Payload::Array(array)));
            }
            Token::Quote | Token::Minus | Token::Digit | Token::CharSequence => {
                let payload = self.parse_scalar(at, &name)?;
                debug!(name = %name, kind = %payload.kind(), "value");
                self.parent.push(Value::new(name, payload));
            }
            _ => return Err(self.unexpected("member value")),
        }
        self.state = State::ExpectName;
        self.advance();
        Ok(())
    }

    fn open_object(&mut self, name: String, offset: usize) -> Result<()> {
        if self.stack.len() >= self.options.max_depth {
            return Err(JsonError::new(
                ErrorKind::NestingTooDeep {
                    limit: self.options.max_depth,
                },
                offset,
            ));
        }
        debug!(name = %name, depth = self.stack.len() + 1, "open object");
        let child = Node::new(name.clone());
        let node = mem::replace(&mut self.parent, child);
        self.stack.push(Frame { node, member: name });
        self.state = State::ExpectName;
        self.advance();
        Ok(())
    }

    fn close_object(&mut self) {
        match self.stack.pop() {
            Some(frame) => {
                let child = mem::replace(&mut self.parent, frame.node);
                debug!(name = %frame.member, members = child.len(), "close object");
                self.parent
                    .push(Value::new(frame.member, Payload::Object(child)));
                self.advance();
            }
            None => {
                debug!(members = self.parent.len(), "close root");
                self.root_closed = true;
            }
        }
    }

    /// Read the scalar starting at `at`: a quoted string, a (negative)
    /// number or a bare word. On return the scalar's text is consumed but
    /// the lookahead has not been refreshed.
    pub(crate) fn parse_scalar(&mut self, at: Lexeme, name: &str) -> Result<Payload> {
        match at.token {
            Token::Quote => Ok(Payload::String(self.lexer.read_quoted(at.offset)?)),
            Token::Minus => {
                let digit = self.lexer.peek();
                if digit.token != Token::Digit {
                    return Err(JsonError::new(
                        ErrorKind::UnexpectedToken {
                            expected: "digit after `-`",
                            found: digit.token,
                        },
                        digit.offset,
                    ));
                }
                let text = self.lexer.read_number()?;
                self.number(text, true, at.offset)
            }
            Token::Digit => {
                let text = self.lexer.read_number()?;
                self.number(text, false, at.offset)
            }
            Token::CharSequence => self.bare_word(name, at.offset),
            _ => Err(self.unexpected("value")),
        }
    }

    fn number(&self, text: NumberText<'_>, negative: bool, offset: usize) -> Result<Payload> {
        let literal = if negative {
            format!("-{}", text.text)
        } else {
            text.text.to_string()
        };

        if !text.fractional {
            return match literal.parse::<i64>() {
                Ok(n) => Ok(Payload::Number(n)),
                Err(_) => Err(JsonError::new(ErrorKind::NumberOutOfRange(literal), offset)),
            };
        }

        let payload = match self.options.precision {
            Precision::Double => literal
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite())
                .map(Payload::Double),
            Precision::Single => literal
                .parse::<f32>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Payload::Float),
        };
        payload.ok_or_else(|| JsonError::new(ErrorKind::NumberOutOfRange(literal), offset))
    }

    fn bare_word(&mut self, name: &str, offset: usize) -> Result<Payload> {
        let word = self.lexer.read_bare_word();
        match word {
            "true" => Ok(Payload::Boolean(true)),
            "false" => Ok(Payload::Boolean(false)),
            "null" => Ok(Payload::Null(word.to_string())),
            other if self.options.strict_literals => Err(JsonError::new(
                ErrorKind::UnknownLiteral(other.to_string()),
                offset,
            )),
            other => {
                warn!(name = %name, word = %other, offset, "unrecognized bare word treated as null");
                self.diagnostics.push(Diagnostic::UnrecognizedLiteral {
                    name: name.to_string(),
                    word: other.to_string(),
                    offset,
                });
                Ok(Payload::Null(other.to_string()))
            }
        }
    }
}
