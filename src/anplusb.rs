/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! An+B micro-syntax handling (`spec.md` §4.3, §3).
//!
//! There is no dedicated `PLUS` token distinct from `ADJACENT`, so the
//! grammar enumerates every sign/number/identifier token shape that
//! can appear inside `:nth-child()` and friends, rather than lexing
//! An+B as its own production. [`try_match`] recognizes those shapes
//! eagerly while parsing a pseudo-function's argument, but only the
//! shapes a `relative_selector_list` could never parse on its own (any
//! shape involving a `NUMBER`, `MINUS`, or `ADJACENT` token). A bare
//! `IDENT` — `n`, `even`, `odd`, or a fused value like `n-2` with no
//! leading sign or digit — parses just fine as an ordinary
//! `type_selector` through the primary grammar; [`normalize`] is the
//! second pass (`spec.md` §4.3 "An+B normalizer") that walks the tree
//! afterwards and rewrites that `type_selector` into an `an_plus_b`
//! node wherever its value matches the An+B regex and it sits inside a
//! `:nth-*()` argument.

use std::sync::OnceLock;

use regex::Regex;

use crate::ast::{Node, NodeType};
use crate::token::{Token, TokenKind};

/// `:nth-*()` pseudo-functions whose argument is An+B syntax.
pub const NTH_PSEUDOS: &[&str] = &[
    "nth-child",
    "nth-last-child",
    "nth-of-type",
    "nth-last-of-type",
    "nth-col",
    "nth-last-col",
];

fn an_plus_b_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(even|odd|[+-]?\d*n(?:[+-]\d+)?|[+-]?n(?:[+-]\d+)?|\d+)$")
            .expect("an_plus_b regex is a compile-time constant")
    })
}

/// Whether `value` is a syntactically valid An+B value per `spec.md` §3.
pub fn is_valid(value: &str) -> bool {
    an_plus_b_regex().is_match(value)
}

/// One token-kind shape the primary grammar recognizes eagerly, listed
/// from longest to shortest so a longer match is always preferred over
/// a shorter prefix of it (`spec.md` §4.3's precedence policy).
///
/// Deliberately excludes a bare `&[Ident]` shape: a lone identifier
/// parses as an ordinary `type_selector` through
/// `parse_relative_selector_list` just as well, so that case is left
/// for [`normalize`]'s post-pass to recognize instead of short-circuited
/// here.
const SHAPES: &[&[TokenKind]] = &[
    &[
        TokenKind::Minus,
        TokenKind::Number,
        TokenKind::Ident,
        TokenKind::Adjacent,
        TokenKind::Number,
    ],
    &[
        TokenKind::Minus,
        TokenKind::Number,
        TokenKind::Ident,
        TokenKind::Minus,
        TokenKind::Number,
    ],
    &[
        TokenKind::Minus,
        TokenKind::Ident,
        TokenKind::Adjacent,
        TokenKind::Number,
    ],
    &[
        TokenKind::Minus,
        TokenKind::Ident,
        TokenKind::Minus,
        TokenKind::Number,
    ],
    &[TokenKind::Number, TokenKind::Ident, TokenKind::Adjacent, TokenKind::Number],
    &[TokenKind::Number, TokenKind::Ident, TokenKind::Minus, TokenKind::Number],
    &[TokenKind::Ident, TokenKind::Adjacent, TokenKind::Number],
    &[TokenKind::Ident, TokenKind::Minus, TokenKind::Number],
    &[TokenKind::Minus, TokenKind::Number, TokenKind::Ident],
    &[TokenKind::Number, TokenKind::Ident],
    &[TokenKind::Minus, TokenKind::Ident],
    &[TokenKind::Number],
];

/// Tries to match an An+B shape starting at `tokens[cursor]`.
///
/// Returns the canonical value (the matched tokens' lexemes,
/// concatenated in order) and how many tokens it consumed, or `None`
/// if nothing at `cursor` looks like An+B syntax — in which case the
/// caller should fall back to parsing a generic `any_value`.
pub fn try_match(tokens: &[Token], cursor: usize) -> Option<(String, usize)> {
    'shape: for shape in SHAPES {
        if cursor + shape.len() > tokens.len() {
            continue;
        }
        for (offset, kind) in shape.iter().enumerate() {
            if tokens[cursor + offset].kind != *kind {
                continue 'shape;
            }
        }
        let value: String = shape
            .iter()
            .enumerate()
            .map(|(offset, _)| tokens[cursor + offset].lexeme.as_str())
            .collect();
        if is_valid(&value) {
            return Some((value, shape.len()));
        }
    }
    None
}

/// Walks `root`'s whole tree and rewrites every `:nth-*()` argument
/// that survived parsing as a `selector_list` of one
/// `simple_selector_sequence` of one `type_selector` whose value is
/// itself valid An+B syntax, replacing it with an `an_plus_b` node.
pub fn normalize(root: &Node) {
    if is_nth_pseudo_function(root) {
        try_rewrite(root);
    }
    for child in root.children() {
        normalize(&child);
    }
}

fn is_nth_pseudo_function(node: &Node) -> bool {
    node.node_type() == NodeType::PseudoFunction
        && node
            .value()
            .is_some_and(|v| NTH_PSEUDOS.contains(&v.as_str()))
}

fn try_rewrite(pseudo_function: &Node) {
    let children = pseudo_function.children();
    let [selector_list] = children.as_slice() else {
        return;
    };
    if selector_list.node_type() != NodeType::SelectorList {
        return;
    }
    let sl_children = selector_list.children();
    let [sequence] = sl_children.as_slice() else {
        return;
    };
    if sequence.node_type() != NodeType::SimpleSelectorSequence {
        return;
    }
    let seq_children = sequence.children();
    let [type_sel] = seq_children.as_slice() else {
        return;
    };
    if type_sel.node_type() != NodeType::TypeSelector {
        return;
    }
    let Some(value) = type_sel.value() else {
        return;
    };
    if !is_valid(&value) {
        return;
    }
    let an_plus_b = Node::new(NodeType::AnPlusB, Some(value), selector_list.position());
    pseudo_function.replace_child(0, an_plus_b);
}
