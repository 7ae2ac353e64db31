//! Atom merger: fuses decimals, quoted strings, quoted characters and
//! parenthesized comments, and drops indentation that follows a newline.
//!
//! Every processor looks only at the front of the remaining atoms and
//! returns how many atoms it would merge (0 = no merge).

use super::classifier::is_fraction;
use crate::token::{merge_tokens, Token, TokenKind};

type Processor = fn(&[Token]) -> usize;

const PROCESSORS: [Processor; 4] = [
    decimal_len,
    string_len,
    character_len,
    paren_comment_len,
];

pub fn merge(atoms: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(atoms.len());
    let mut pos = 0usize;
    let mut after_newline = false;

    while pos < atoms.len() {
        if after_newline && is_indent(&atoms[pos].text) {
            pos += 1;
            continue;
        }
        after_newline = false;

        let rest = &atoms[pos..];
        let merged = PROCESSORS
            .iter()
            .map(|p| p(rest))
            .find(|n| *n > 0)
            .and_then(|n| merge_tokens(&rest[..n], TokenKind::Unknown).map(|t| (n, t)));

        let (consumed, atom) = match merged {
            Some((n, t)) => (n, t),
            None => (1, atoms[pos].clone()),
        };

        if atom.text == "\n" {
            after_newline = true;
        }
        out.push(atom);
        pos += consumed;
    }

    out
}

fn is_indent(text: &str) -> bool {
    text == " " || text == "\t"
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `[digits]["."][digits]`; the first atom may carry a leading sign and
/// the last an exponent (`1.5e3`).
fn decimal_len(atoms: &[Token]) -> usize {
    let [left, dot, right, ..] = atoms else {
        return 0;
    };
    let whole = left
        .text
        .strip_prefix(|c: char| c == '-' || c == '+')
        .unwrap_or(&left.text);
    if is_digits(whole) && dot.text == "." && is_fraction(&right.text) {
        3
    } else {
        0
    }
}

/// `"` ... `"` on one line. A `\` atom shields the following atom from
/// closing the string.
fn string_len(atoms: &[Token]) -> usize {
    if atoms.first().map(|a| a.text.as_str()) != Some("\"") {
        return 0;
    }

    let mut escaped = false;
    for (idx, atom) in atoms.iter().enumerate().skip(1) {
        if atom.text == "\n" {
            return 0;
        }
        if escaped {
            escaped = false;
            continue;
        }
        match atom.text.as_str() {
            "\\" => escaped = true,
            "\"" => return idx + 1,
            _ => {}
        }
    }
    0
}

/// `'\x'` (4 atoms) or `'x'` (3 atoms) where `x` is a single character.
fn character_len(atoms: &[Token]) -> usize {
    let one_char = |t: &Token| t.text.chars().count() == 1;
    match atoms {
        [open, esc, c, close, ..]
            if open.text == "'" && esc.text == "\\" && one_char(c) && close.text == "'" =>
        {
            4
        }
        [open, c, close, ..] if open.text == "'" && one_char(c) && close.text == "'" => 3,
        _ => 0,
    }
}

/// `(` ... `)` before the end of the line.
fn paren_comment_len(atoms: &[Token]) -> usize {
    if atoms.first().map(|a| a.text.as_str()) != Some("(") {
        return 0;
    }
    for (idx, atom) in atoms.iter().enumerate().skip(1) {
        match atom.text.as_str() {
            "\n" => return 0,
            ")" => return idx + 1,
            _ => {}
        }
    }
    0
}
