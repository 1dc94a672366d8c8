/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Parselly parses CSS Selectors Level 3/4 strings into a structured,
//! mutable AST.
//!
//! ```
//! let ast = parselly::parse("div.card > h2#title").unwrap();
//! assert_eq!(ast.to_selector(), "div.card > h2#title");
//! ```
//!
//! The pipeline is lexer → descendant-combinator insertion → grammar
//! driver → An+B normalizer, mirroring the module layout: [`lexer`],
//! [`preprocessor`], [`parser`] (crate-private), [`anplusb`], [`ast`].

mod anplusb;
mod ast;
mod error;
mod lexer;
mod parser;
mod position;
mod preprocessor;
mod sanitize;
mod token;

pub use ast::{AttributeInfo, Node, NodeType};
pub use error::{Error, LexError, ParseError};
pub use position::Position;
pub use sanitize::sanitize;
pub use token::{Token, TokenKind};

/// Parses a selector string into its AST, per `spec.md` §2's pipeline:
/// lex, insert synthetic descendant combinators, parse, then rewrite
/// `:nth-*()` arguments that slipped through as selector lists into
/// `an_plus_b` nodes.
///
/// The root is always a `selector_list` node with at least one child.
pub fn parse(input: &str) -> Result<Node, Error> {
    let tokens = lexer::tokenize(input)?;
    let tokens = preprocessor::insert_descendant_combinators(&tokens);
    let root = parser::parse_selector_list(&tokens)?;
    anplusb::normalize(&root);
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_seed_scenario() {
        let ast = parse("div").unwrap();
        assert_eq!(ast.node_type(), NodeType::SelectorList);
        assert_eq!(ast.to_selector(), "div");
    }

    #[test]
    fn propagates_lex_errors() {
        let err = parse("div@foo").unwrap_err();
        assert!(matches!(err, Error::Lex(_)));
    }

    #[test]
    fn propagates_parse_errors() {
        let err = parse("div >").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn round_trip_is_idempotent() {
        let first = parse(":is(h1, h2, h3) > .card[title]").unwrap();
        let second = parse(&first.to_selector()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn sanitize_is_reexported() {
        assert_eq!(sanitize("1a"), "\\31 a");
    }
}
