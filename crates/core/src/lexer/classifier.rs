use crate::token::{Token, TokenKind};

pub const PUNCTUATION: [&str; 5] = [".", "!", "?", ":", ","];
pub const BOOLEAN_WORDS: [&str; 8] = [
    "yes",
    "true",
    "right",
    "correct",
    "no",
    "false",
    "wrong",
    "incorrect",
];
pub const NULL_WORD: &str = "nothing";
/// Split characters that only mean something as part of a merged span.
pub const STRAY_DELIMITERS: [&str; 5] = ["\"", "'", "(", ")", "\\"];

/// Kind of a single atom, decided purely by its shape.
pub fn kind_of(text: &str) -> TokenKind {
    if PUNCTUATION.contains(&text) {
        return TokenKind::Punctuation;
    }
    match text {
        "\n" => return TokenKind::Newline,
        " " | "\t" => return TokenKind::Whitespace,
        _ => {}
    }
    if STRAY_DELIMITERS.contains(&text) {
        return TokenKind::Unknown;
    }
    if is_wrapped(text, '(', ')') {
        return TokenKind::CommentParen;
    }
    if is_wrapped(text, '"', '"') {
        return TokenKind::String;
    }
    if is_wrapped(text, '\'', '\'') {
        return TokenKind::Character;
    }
    if is_number(text) {
        return TokenKind::Number;
    }
    if BOOLEAN_WORDS.contains(&text) {
        return TokenKind::Boolean;
    }
    if text == NULL_WORD {
        return TokenKind::Null;
    }
    TokenKind::Identifier
}

fn is_wrapped(text: &str, open: char, close: char) -> bool {
    text.len() >= 2 && text.starts_with(open) && text.ends_with(close)
}

/// Decimal float text: optional sign, digits with an optional fraction (or
/// a bare fraction), optional exponent. `inf`, `nan` and hex floats are not
/// numbers here; they stay words.
pub fn is_number(text: &str) -> bool {
    let body = text.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(text);
    let (mantissa, exponent) = split_exponent(body);

    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, frac)) => {
            (is_digits(whole) && (frac.is_empty() || is_digits(frac)))
                || (whole.is_empty() && is_digits(frac))
        }
        None => is_digits(mantissa),
    };
    mantissa_ok && exponent.map_or(true, is_exponent)
}

/// Digits with an optional exponent, as allowed after a decimal point.
pub fn is_fraction(text: &str) -> bool {
    let (digits, exponent) = split_exponent(text);
    is_digits(digits) && exponent.map_or(true, is_exponent)
}

fn split_exponent(text: &str) -> (&str, Option<&str>) {
    match text.find(|c: char| c == 'e' || c == 'E') {
        Some(at) => (&text[..at], Some(&text[at + 1..])),
        None => (text, None),
    }
}

fn is_exponent(text: &str) -> bool {
    is_digits(text.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(text))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Assign a coarse kind to every atom. Empty identifier atoms are dropped.
pub fn classify(atoms: Vec<Token>) -> Vec<Token> {
    atoms
        .into_iter()
        .filter_map(|mut t| {
            t.kind = kind_of(&t.text);
            if t.kind == TokenKind::Identifier && t.length == 0 {
                None
            } else {
                Some(t)
            }
        })
        .collect()
}

/// Fuse runs of adjacent identifier tokens into one. A single whitespace
/// token sitting between two identifiers is absorbed into the run.
pub fn fuse_literals(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut run: Option<Token> = None;
    let mut iter = tokens.into_iter().peekable();

    while let Some(t) = iter.next() {
        if t.kind == TokenKind::Identifier {
            match run.as_mut() {
                Some(r) => r.append(&t),
                None => run = Some(t),
            }
            continue;
        }

        let bridges = t.kind == TokenKind::Whitespace
            && run.is_some()
            && iter.peek().is_some_and(|n| n.kind == TokenKind::Identifier);
        if bridges {
            if let Some(r) = run.as_mut() {
                r.append(&t);
            }
            continue;
        }

        if let Some(r) = run.take() {
            out.push(r);
        }
        out.push(t);
    }

    if let Some(r) = run {
        out.push(r);
    }
    out
}
