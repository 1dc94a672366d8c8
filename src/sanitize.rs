/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Identifier sanitization (`spec.md` §6), a `CSS.escape`-equivalent
//! free function. This is a small external collaborator of the
//! lexer/parser/AST core, not a core module itself: it prepares
//! arbitrary strings for safe use as CSS identifiers, it does not
//! consume them.

/// Escapes `input` so the result is safe to use as a single CSS
/// identifier, following the same rules as the DOM `CSS.escape()`
/// function.
pub fn sanitize(input: &str) -> String {
    if input == "-" {
        return "\\-".to_string();
    }

    let mut out = String::with_capacity(input.len());
    for (index, c) in input.chars().enumerate() {
        if c == '\0' {
            out.push('\u{FFFD}');
            continue;
        }
        if is_control(c) {
            push_hex_escape(&mut out, c);
            continue;
        }
        if c.is_ascii_digit() && (index == 0 || (index == 1 && starts_with_dash(input))) {
            push_hex_escape(&mut out, c);
            continue;
        }
        if is_plain(c) {
            out.push(c);
            continue;
        }
        out.push('\\');
        out.push(c);
    }
    out
}

fn starts_with_dash(input: &str) -> bool {
    input.starts_with('-')
}

fn is_control(c: char) -> bool {
    matches!(c, '\u{1}'..='\u{1F}' | '\u{7F}')
}

fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn push_hex_escape(out: &mut String, c: char) {
    out.push('\\');
    out.push_str(&format!("{:x} ", c as u32));
}
