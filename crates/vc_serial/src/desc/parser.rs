use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use super::TypeDesc;

// -----------------------------------------------------------------------------
// ParseError

/// Failure to read the textual form of a [`TypeDesc`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("unexpected end of type declaration")]
    UnexpectedEnd,

    #[error("unexpected character `{ch}` at offset {offset} in type declaration")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("missing type name at offset {offset}")]
    EmptyName { offset: usize },

    #[error("unexpected trailing input at offset {offset}")]
    TrailingInput { offset: usize },

    #[error("type parameters nested deeper than {MAX_DEPTH} levels at offset {offset}")]
    TooDeep { offset: usize },
}

/// Deepest accepted nesting of type parameters.
const MAX_DEPTH: usize = 32;

// -----------------------------------------------------------------------------
// Parser

/// Grammar:
///
/// ```text
/// type   := name ( '<' param ( ',' param )* '>' )?
/// param  := type | quoted
/// quoted := '\'' [^']* '\'' | '"' [^"]* '"'
/// ```
///
/// Whitespace is allowed around every token.
pub(super) fn parse(input: &str) -> Result<TypeDesc, ParseError> {
    let mut parser = Parser {
        input,
        pos: 0,
        depth: 0,
    };
    let ty = parser.parse_type()?;
    parser.skip_whitespace();
    if parser.pos < input.len() {
        return Err(ParseError::TrailingInput { offset: parser.pos });
    }
    Ok(ty)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    #[inline]
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.pos += ch.len_utf8();
                Ok(())
            }
            Some(ch) => Err(ParseError::UnexpectedChar {
                ch,
                offset: self.pos,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn parse_type(&mut self) -> Result<TypeDesc, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if matches!(ch, '<' | '>' | ',' | '\'' | '"') || ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
        if start == self.pos {
            return match self.peek() {
                None => Err(ParseError::UnexpectedEnd),
                Some(_) => Err(ParseError::EmptyName { offset: start }),
            };
        }
        let name = String::from(&self.input[start..self.pos]);

        self.skip_whitespace();
        if self.peek() != Some('<') {
            return Ok(TypeDesc::new(name));
        }
        if self.depth == MAX_DEPTH {
            return Err(ParseError::TooDeep { offset: self.pos });
        }
        self.pos += 1;

        self.depth += 1;
        let params = self.parse_params();
        self.depth -= 1;

        Ok(TypeDesc::with_params(name, params?))
    }

    fn parse_params(&mut self) -> Result<Vec<TypeDesc>, ParseError> {
        let mut params = Vec::new();
        loop {
            params.push(self.parse_param()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('>') => {
                    self.pos += 1;
                    break;
                }
                Some(ch) => {
                    return Err(ParseError::UnexpectedChar {
                        ch,
                        offset: self.pos,
                    });
                }
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<TypeDesc, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.pos += 1;
                let start = self.pos;
                let Some(len) = self.input[start..].find(quote) else {
                    return Err(ParseError::UnexpectedEnd);
                };
                self.pos = start + len;
                let literal = String::from(&self.input[start..self.pos]);
                self.expect(quote)?;
                Ok(TypeDesc::new(literal))
            }
            _ => self.parse_type(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
