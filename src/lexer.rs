/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Position-tracking scanner: turns a selector string into a flat
//! token vector (see `spec.md` §4.1). Whitespace is skipped here and
//! its significance is restored later by `crate::preprocessor`.

use crate::error::LexError;
use crate::position::Position;
use crate::token::{Token, TokenKind};

/// Scans `input` into a token vector ending in an `Eof` sentinel.
///
/// Fails with [`LexError`] at the first character that matches no
/// scanning rule.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    lexer.run()
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, skip: usize) -> Option<char> {
        self.rest().chars().nth(skip)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += c.len_utf8() as u32;
        }
        Some(c)
    }

    fn run(&mut self) -> Result<Vec<Token>, LexError> {
        // Pre-size conservatively per spec.md §5: roughly 1.5 tokens per
        // input byte covers the common case without many reallocations.
        let n = self.input.len();
        let mut tokens = Vec::with_capacity(n + n / 2);
        loop {
            self.skip_whitespace();
            let start = self.position();
            let Some(c) = self.peek() else {
                tokens.push(Token::eof(start));
                return Ok(tokens);
            };

            if c == '"' || c == '\'' {
                tokens.push(self.scan_string(c, start)?);
                continue;
            }
            if c.is_ascii_digit() {
                tokens.push(self.scan_number(start));
                continue;
            }
            if let Some(tok) = self.try_scan_multi_char_operator(start) {
                tokens.push(tok);
                continue;
            }
            if c == '-' && self.peek_at(1) == Some('-') {
                tokens.push(self.scan_ident(start)?);
                continue;
            }
            if let Some(tok) = self.try_scan_single_char_operator(c, start) {
                tokens.push(tok);
                continue;
            }
            if is_ident_start(c) {
                tokens.push(self.scan_ident(start)?);
                continue;
            }

            self.bump();
            return Err(LexError::new(c, start));
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if is_css_whitespace(c)) {
            self.bump();
        }
    }

    fn scan_string(&mut self, quote: char, start: Position) -> Result<Token, LexError> {
        self.bump(); // opening quote
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(LexError::new(quote, start)),
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(Token::new(TokenKind::String, value, start));
                }
                Some('\\') => {
                    value.push(self.bump().unwrap());
                    match self.peek() {
                        None => return Err(LexError::new(quote, start)),
                        Some(_) => value.push(self.bump().unwrap()),
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn scan_number(&mut self, start: Position) -> Token {
        let mut value = String::new();
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            value.push(self.bump().unwrap());
        }
        if self.peek() == Some('.') && matches!(self.peek_at(1), Some(c) if c.is_ascii_digit()) {
            value.push(self.bump().unwrap()); // '.'
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                value.push(self.bump().unwrap());
            }
        }
        Token::new(TokenKind::Number, value, start)
    }

    fn try_scan_multi_char_operator(&mut self, start: Position) -> Option<Token> {
        let first = self.peek()?;
        let second = self.peek_at(1);
        let kind = match (first, second) {
            ('~', Some('=')) => TokenKind::Includes,
            ('|', Some('=')) => TokenKind::DashMatch,
            ('^', Some('=')) => TokenKind::PrefixMatch,
            ('$', Some('=')) => TokenKind::SuffixMatch,
            ('*', Some('=')) => TokenKind::SubstringMatch,
            _ => return None,
        };
        let lexeme: String = [first, second.unwrap()].iter().collect();
        self.bump();
        self.bump();
        Some(Token::new(kind, lexeme, start))
    }

    fn try_scan_single_char_operator(&mut self, c: char, start: Position) -> Option<Token> {
        let kind = match c {
            '>' => TokenKind::Child,
            '+' => TokenKind::Adjacent,
            '~' => TokenKind::Sibling,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '#' => TokenKind::Hash,
            '*' => TokenKind::Star,
            '=' => TokenKind::Equal,
            '-' => TokenKind::Minus,
            _ => return None,
        };
        self.bump();
        Some(Token::new(kind, c.to_string(), start))
    }

    fn scan_ident(&mut self, start: Position) -> Result<Token, LexError> {
        let mut value = String::new();
        if self.peek() == Some('-') && self.peek_at(1) == Some('-') {
            // Custom-property form: `--` is accepted as an identifier
            // start even though `--foo` is not a legal selector (§9).
            value.push(self.bump().unwrap());
            value.push(self.bump().unwrap());
        } else {
            value.push(self.bump().unwrap());
        }
        loop {
            match self.peek() {
                Some(c) if is_ident_continue(c) => {
                    value.push(c);
                    self.bump();
                }
                Some('\\') => {
                    let escape_pos = self.position();
                    self.bump();
                    match self.peek() {
                        Some(next) if !matches!(next, '\n' | '\r' | '\u{C}') => {
                            value.push(next);
                            self.bump();
                        }
                        _ => return Err(LexError::new('\\', escape_pos)),
                    }
                }
                _ => break,
            }
        }
        Ok(Token::new(TokenKind::Ident, value, start))
    }
}

/// CSS selectors treat only these as significant whitespace (§4.1 step 1).
fn is_css_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
