/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use thiserror::Error;

use crate::position::Position;

/// Raised by the lexer when a character matches no scanning rule.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unexpected character {char:?} at {line}:{column}")]
pub struct LexError {
    pub char: char,
    pub line: u32,
    pub column: u32,
}

impl LexError {
    pub fn new(char: char, position: Position) -> LexError {
        LexError {
            char,
            line: position.line,
            column: position.column,
        }
    }
}

/// Raised by the grammar driver when the lookahead token isn't in the
/// expected set for the current production.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("expected {expected_token_name} but found {actual_value:?} at {line}:{column}")]
pub struct ParseError {
    pub expected_token_name: String,
    pub actual_value: String,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    pub fn new(
        expected_token_name: impl Into<String>,
        actual_value: impl Into<String>,
        position: Position,
    ) -> ParseError {
        ParseError {
            expected_token_name: expected_token_name.into(),
            actual_value: actual_value.into(),
            line: position.line,
            column: position.column,
        }
    }
}

/// The single error type returned by [`crate::parse`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
