/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The grammar driver (`spec.md` §4.3): hand-rolled recursive descent
//! over the preprocessed token stream, reducing it to the AST types
//! described in §3.

use log::trace;

use crate::anplusb;
use crate::ast::{Node, NodeType};
use crate::error::ParseError;
use crate::position::Position;
use crate::token::{Token, TokenKind};

/// Parses a full selector list from an already-preprocessed token
/// stream (descendant tokens inserted, `Eof` sentinel present).
pub fn parse_selector_list(tokens: &[Token]) -> Result<Node, ParseError> {
    let mut parser = Parser::new(tokens);
    let list = parser.parse_selector_list()?;
    parser.expect(TokenKind::Eof)?;
    Ok(list)
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser { tokens, cursor: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    /// Consumes and returns the current token. Never advances past
    /// the trailing `Eof` sentinel.
    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.cursor].clone();
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.name()))
        }
    }

    fn expect_string_or_ident(&mut self) -> Result<Token, ParseError> {
        match self.peek().kind {
            TokenKind::String | TokenKind::Ident => Ok(self.advance()),
            _ => Err(self.unexpected("STRING or IDENT")),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let tok = self.peek();
        let actual = if tok.kind == TokenKind::Eof {
            "<EOF>".to_string()
        } else {
            tok.lexeme.clone()
        };
        ParseError::new(expected, actual, tok.position)
    }

    /// `selector_list := complex_selector (COMMA complex_selector)*`
    fn parse_selector_list(&mut self) -> Result<Node, ParseError> {
        let position = self.peek().position;
        let list = Node::new(NodeType::SelectorList, None, position);
        loop {
            let item = self.parse_complex_selector()?;
            list.add_child(item);
            if self.peek().kind == TokenKind::Comma {
                self.advance();
                continue;
            }
            break;
        }
        Ok(list)
    }

    /// `complex_selector := compound_selector (combinator compound_selector)*`
    ///
    /// Left-associative: `a > b + c` builds `(((a) > b) + c)`. Returns
    /// a bare `simple_selector_sequence` when no combinator follows.
    fn parse_complex_selector(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_compound_selector()?;
        self.parse_complex_selector_tail(left)
    }

    fn parse_complex_selector_tail(&mut self, mut left: Node) -> Result<Node, ParseError> {
        while self.peek().kind.is_combinator() {
            let combinator_tok = self.advance();
            let combinator = combinator_node(combinator_tok.kind, combinator_tok.position);
            let right = self.parse_compound_selector()?;
            let selector = Node::new(NodeType::Selector, None, left.position());
            selector.add_child(left);
            selector.add_child(combinator);
            selector.add_child(right);
            left = selector;
        }
        Ok(left)
    }

    /// A relative selector is a complex selector that may open with a
    /// combinator instead of a compound selector (used by `:has()`).
    /// Per this crate's resolution of that shape against the AST's
    /// "`selector` is always ternary" invariant (see `DESIGN.md`), a
    /// leading combinator gets a synthetic universal-selector left
    /// operand, so `:has(> p)` round-trips as `:has(* > p)`.
    fn parse_relative_selector(&mut self) -> Result<Node, ParseError> {
        if self.peek().kind.is_combinator() {
            let combinator_tok = self.advance();
            let combinator = combinator_node(combinator_tok.kind, combinator_tok.position);
            let implicit_left = {
                let sequence =
                    Node::new(NodeType::SimpleSelectorSequence, None, combinator_tok.position);
                sequence.add_child(Node::new(
                    NodeType::UniversalSelector,
                    Some("*".to_string()),
                    combinator_tok.position,
                ));
                sequence
            };
            let right = self.parse_compound_selector()?;
            let selector = Node::new(NodeType::Selector, None, implicit_left.position());
            selector.add_child(implicit_left);
            selector.add_child(combinator);
            selector.add_child(right);
            self.parse_complex_selector_tail(selector)
        } else {
            self.parse_complex_selector()
        }
    }

    fn parse_relative_selector_list(&mut self) -> Result<Node, ParseError> {
        let position = self.peek().position;
        let list = Node::new(NodeType::SelectorList, None, position);
        loop {
            let item = self.parse_relative_selector()?;
            list.add_child(item);
            if self.peek().kind == TokenKind::Comma {
                self.advance();
                continue;
            }
            break;
        }
        Ok(list)
    }

    /// `compound_selector := (type_selector | subclass_selector) subclass_selector*`
    fn parse_compound_selector(&mut self) -> Result<Node, ParseError> {
        let position = self.peek().position;
        let sequence = Node::new(NodeType::SimpleSelectorSequence, None, position);

        if matches!(self.peek().kind, TokenKind::Ident | TokenKind::Star) {
            let tok = self.advance();
            let node_type = if tok.kind == TokenKind::Star {
                NodeType::UniversalSelector
            } else {
                NodeType::TypeSelector
            };
            sequence.add_child(Node::new(node_type, Some(tok.lexeme), tok.position));
        }

        loop {
            let subclass = match self.peek().kind {
                TokenKind::Hash => Some(self.parse_id_selector()),
                TokenKind::Dot => Some(self.parse_class_selector()?),
                TokenKind::LBracket => Some(self.parse_attribute_selector()?),
                TokenKind::Colon => Some(self.parse_pseudo()?),
                _ => None,
            };
            match subclass {
                Some(node) => sequence.add_child(node),
                None => break,
            }
        }

        if sequence.child_count() == 0 {
            return Err(self.unexpected("a simple selector"));
        }
        trace!("parsed compound selector: {}", sequence.to_selector());
        Ok(sequence)
    }

    fn parse_id_selector(&mut self) -> Node {
        let tok = self.advance();
        Node::new(NodeType::IdSelector, Some(tok.lexeme), tok.position)
    }

    fn parse_class_selector(&mut self) -> Result<Node, ParseError> {
        let dot = self.advance();
        let name = self.expect(TokenKind::Ident)?;
        Ok(Node::new(NodeType::ClassSelector, Some(name.lexeme), dot.position))
    }

    /// `attribute_selector := LBRACKET IDENT RBRACKET`
    ///                      `| LBRACKET IDENT attr_matcher (STRING|IDENT) RBRACKET`
    fn parse_attribute_selector(&mut self) -> Result<Node, ParseError> {
        let lbracket = self.expect(TokenKind::LBracket)?;
        let name = self.expect(TokenKind::Ident)?;

        if self.peek().kind == TokenKind::RBracket {
            self.advance();
            return Ok(Node::new(
                NodeType::AttributeSelector,
                Some(name.lexeme),
                lbracket.position,
            ));
        }

        let operator_kind = self.peek().kind;
        if !is_attribute_operator(operator_kind) {
            return Err(self.unexpected("']' or an attribute matcher"));
        }
        let operator_tok = self.advance();
        let value_tok = self.expect_string_or_ident()?;
        self.expect(TokenKind::RBracket)?;

        let attr = Node::new(NodeType::AttributeSelector, None, lbracket.position);
        attr.add_child(Node::new(NodeType::Attribute, Some(name.lexeme), name.position));
        attr.add_child(Node::new(
            attribute_operator_node_type(operator_kind),
            Some(operator_tok.lexeme),
            operator_tok.position,
        ));
        attr.add_child(Node::new(NodeType::Value, Some(value_tok.lexeme), value_tok.position));
        Ok(attr)
    }

    /// `pseudo_element := COLON COLON IDENT`
    /// `pseudo_class    := COLON IDENT | COLON IDENT LPAREN any_value RPAREN`
    fn parse_pseudo(&mut self) -> Result<Node, ParseError> {
        let colon = self.expect(TokenKind::Colon)?;

        if self.peek().kind == TokenKind::Colon {
            self.advance();
            let name = self.expect(TokenKind::Ident)?;
            return Ok(Node::new(NodeType::PseudoElement, Some(name.lexeme), colon.position));
        }

        let name = self.expect(TokenKind::Ident)?;
        if self.peek().kind != TokenKind::LParen {
            return Ok(Node::new(NodeType::PseudoClass, Some(name.lexeme), colon.position));
        }

        self.advance(); // LPAREN
        let argument = self.parse_any_value()?;
        self.expect(TokenKind::RParen)?;

        let func = Node::new(NodeType::PseudoFunction, Some(name.lexeme), colon.position);
        func.add_child(argument);
        Ok(func)
    }

    /// `any_value := STRING | an_plus_b | relative_selector_list`
    ///
    /// Multi-token An+B shapes (anything with a sign, a coefficient, or
    /// an offset) are tried before falling back to a relative selector
    /// list, since `parse_relative_selector_list` could never parse
    /// `2n+1` on its own — a `NUMBER` token can't start a compound
    /// selector. A bare identifier like `n`, `even`, or a fused value
    /// like `n-2` is deliberately *not* matched here: it parses fine as
    /// an ordinary `type_selector`, and `anplusb::normalize`'s
    /// post-pass (`spec.md` §4.3) is what recognizes it as An+B
    /// afterwards.
    fn parse_any_value(&mut self) -> Result<Node, ParseError> {
        if self.peek().kind == TokenKind::String {
            let tok = self.advance();
            return Ok(Node::new(NodeType::Argument, Some(tok.lexeme), tok.position));
        }
        if let Some((value, consumed)) = anplusb::try_match(self.tokens, self.cursor) {
            let position = self.peek().position;
            for _ in 0..consumed {
                self.advance();
            }
            trace!("parsed an+b argument: {value}");
            return Ok(Node::new(NodeType::AnPlusB, Some(value), position));
        }
        self.parse_relative_selector_list()
    }
}

fn is_attribute_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Equal
            | TokenKind::Includes
            | TokenKind::DashMatch
            | TokenKind::PrefixMatch
            | TokenKind::SuffixMatch
            | TokenKind::SubstringMatch
    )
}

fn attribute_operator_node_type(kind: TokenKind) -> NodeType {
    match kind {
        TokenKind::Equal => NodeType::EqualOperator,
        TokenKind::Includes => NodeType::IncludesOperator,
        TokenKind::DashMatch => NodeType::DashmatchOperator,
        TokenKind::PrefixMatch => NodeType::PrefixmatchOperator,
        TokenKind::SuffixMatch => NodeType::SuffixmatchOperator,
        TokenKind::SubstringMatch => NodeType::SubstringmatchOperator,
        other => unreachable!("{other:?} is not an attribute matcher token"),
    }
}

fn combinator_node(kind: TokenKind, position: Position) -> Node {
    match kind {
        TokenKind::Child => Node::new(NodeType::ChildCombinator, Some(">".to_string()), position),
        TokenKind::Adjacent => {
            Node::new(NodeType::AdjacentCombinator, Some("+".to_string()), position)
        }
        TokenKind::Sibling => {
            Node::new(NodeType::SiblingCombinator, Some("~".to_string()), position)
        }
        TokenKind::Descendant => {
            Node::new(NodeType::DescendantCombinator, Some(" ".to_string()), position)
        }
        other => unreachable!("{other:?} is not a combinator token"),
    }
}
