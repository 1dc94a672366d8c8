/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use crate::position::Position;

/// The symbolic category of a [`Token`].
///
/// `Descendant` is synthetic: the lexer never produces it, only the
/// token preprocessor (see `crate::preprocessor`) does, to restore the
/// significance whitespace loses once it's been skipped.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    Ident,
    String,
    Number,
    Hash,
    Dot,
    Star,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Minus,
    Equal,
    Child,
    Adjacent,
    Sibling,
    Descendant,
    Includes,
    DashMatch,
    PrefixMatch,
    SuffixMatch,
    SubstringMatch,
    Eof,
}

impl TokenKind {
    /// Human-readable name used in `ParseError` messages.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Ident => "IDENT",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Hash => "HASH",
            TokenKind::Dot => "DOT",
            TokenKind::Star => "STAR",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Minus => "MINUS",
            TokenKind::Equal => "EQUAL",
            TokenKind::Child => "CHILD",
            TokenKind::Adjacent => "ADJACENT",
            TokenKind::Sibling => "SIBLING",
            TokenKind::Descendant => "DESCENDANT",
            TokenKind::Includes => "INCLUDES",
            TokenKind::DashMatch => "DASHMATCH",
            TokenKind::PrefixMatch => "PREFIXMATCH",
            TokenKind::SuffixMatch => "SUFFIXMATCH",
            TokenKind::SubstringMatch => "SUBSTRINGMATCH",
            TokenKind::Eof => "EOF",
        }
    }

    /// Kinds that can end a compound selector, per `spec.md` §4.2.
    pub fn can_end_compound(self) -> bool {
        matches!(
            self,
            TokenKind::Ident | TokenKind::Star | TokenKind::RParen | TokenKind::RBracket
        )
    }

    /// Kinds that can start a compound selector, per `spec.md` §4.2.
    pub fn can_start_compound(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Star
                | TokenKind::Dot
                | TokenKind::Hash
                | TokenKind::LBracket
                | TokenKind::Colon
        )
    }

    /// True for the four combinator kinds (real or synthetic).
    pub fn is_combinator(self) -> bool {
        matches!(
            self,
            TokenKind::Child | TokenKind::Adjacent | TokenKind::Sibling | TokenKind::Descendant
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical token: `(kind, lexeme, position)`.
///
/// `lexeme` is the already-processed text (quotes stripped from
/// strings, escapes stripped from identifiers); combinator and
/// punctuation tokens carry their literal character(s).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Token {
        Token {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Token {
        Token::new(TokenKind::Eof, "", position)
    }
}
