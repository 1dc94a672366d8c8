/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Descendant-combinator insertion (`spec.md` §4.2). The lexer skips
//! whitespace, so `div p` and `divp` produce identical token runs up
//! to this point; this pass reinstates the distinction by splicing a
//! synthetic `Descendant` token between adjacent compound selectors.

use crate::token::{Token, TokenKind};

/// Returns a new token vector with synthetic `Descendant` tokens
/// inserted wherever `spec.md` §4.2's three conditions hold between a
/// pair of adjacent tokens. The input is borrowed, not mutated.
pub fn insert_descendant_combinators(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() + tokens.len() / 4);
    for window in tokens.windows(2) {
        let (left, right) = (&window[0], &window[1]);
        out.push(left.clone());
        if needs_descendant(left.kind, right.kind) {
            out.push(Token::new(TokenKind::Descendant, " ", left.position));
        }
    }
    if let Some(last) = tokens.last() {
        out.push(last.clone());
    }
    out
}

fn needs_descendant(left: TokenKind, right: TokenKind) -> bool {
    if !left.can_end_compound() || !right.can_start_compound() {
        return false;
    }
    let same_compound_pair = matches!(left, TokenKind::Ident | TokenKind::Star)
        && matches!(
            right,
            TokenKind::Dot | TokenKind::Hash | TokenKind::LBracket | TokenKind::Colon
        );
    !same_compound_pair
}
