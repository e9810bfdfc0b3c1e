//! Array decoder.
//!
//! Arrays are flat: every element is a string, number or bare word. Elements
//! are named `#0`, `#1`, ... in order. A nested `[` or `{` is rejected with
//! [`ErrorKind::NestedContainer`].

use tracing::debug;

use crate::error::{ErrorKind, JsonError, Result};
use crate::lexer::Token;
use crate::parser::Parser;
use crate::value::{Array, Kind, Value};

impl Parser<'_, '_> {
    /// Decode the array whose `[` is the current lookahead at `open`.
    ///
    /// Returns with the closing `]` as the lookahead.
    pub(crate) fn parse_array(&mut self, open: usize) -> Result<Array> {
        let mut array = Array::new();
        self.advance();
        self.skip_spaces();
        if self.lookahead().token == Token::RightBracket {
            return Ok(array);
        }

        loop {
            let at = self.lookahead();
            match at.token {
                Token::Quote | Token::Minus | Token::Digit | Token::CharSequence => {
                    let name = format!("#{}", array.len());
                    let payload = self.parse_scalar(at, &name)?;
                    debug!(name = %name, kind = %payload.kind(), "array element");
                    array.push(Value::new(name, payload));
                }
                Token::LeftBracket => {
                    return Err(JsonError::new(
                        ErrorKind::NestedContainer(Kind::Array),
                        at.offset,
                    ))
                }
                Token::LeftBrace => {
                    return Err(JsonError::new(
                        ErrorKind::NestedContainer(Kind::Object),
                        at.offset,
                    ))
                }
                Token::End => {
                    return Err(JsonError::new(ErrorKind::UnterminatedArray, open));
                }
                _ => return Err(self.unexpected("array element")),
            }

            self.advance();
            self.skip_spaces();
            match self.lookahead().token {
                Token::RightBracket => break,
                Token::Comma => {
                    self.advance();
                    self.skip_spaces();
                }
                Token::End => {
                    return Err(JsonError::new(ErrorKind::UnterminatedArray, open));
                }
                _ => return Err(self.unexpected("`,` or `]`")),
            }
        }

        Ok(array)
    }
}
