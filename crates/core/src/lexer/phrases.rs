//! Phrase recognizer: collapses multi-word English idioms into single
//! keyword tokens.
//!
//! The table is ordered. The first entry that matches the atoms at the front
//! of the stream wins, so every longer phrase is listed before any phrase
//! that is a prefix of it ("Otherwise if" before "Otherwise", "is now"
//! before "is"). Reordering entries changes the grammar.
//!
//! Phrases are written as plain text and compared atom by atom, using the
//! same split rules as the scanner: `"That's all about"` is the atom
//! sequence `That ' s _ all _ about`.

use super::scanner::atoms;
use crate::token::{merge_tokens, Token, TokenKind};

use TokenKind::*;

/// How a table entry recognizes its idiom.
#[derive(Clone, Copy)]
pub enum Pattern {
    /// Any of these phrases, tried in order.
    Words(&'static [&'static str]),
    /// A hand-written matcher returning the number of atoms consumed.
    Custom(fn(&[Token]) -> Option<usize>),
}

#[derive(Clone, Copy)]
pub struct Phrase {
    pub kind: TokenKind,
    pub pattern: Pattern,
}

impl Phrase {
    /// Number of atoms this idiom consumes at the front of `tokens`.
    pub fn match_len(&self, tokens: &[Token]) -> Option<usize> {
        match self.pattern {
            Pattern::Words(alternatives) => alternatives
                .iter()
                .find_map(|phrase| match_words(tokens, phrase)),
            Pattern::Custom(matcher) => matcher(tokens),
        }
    }
}

const fn words(kind: TokenKind, alternatives: &'static [&'static str]) -> Phrase {
    Phrase {
        kind,
        pattern: Pattern::Words(alternatives),
    }
}

// ──────────────────────────────────────────────
// The table
// ──────────────────────────────────────────────

pub const PHRASES: &[Phrase] = &[
    // Report and paragraph delimiters
    words(ReportHeader, &["Dear Princess Celestia:"]),
    words(ReportFooter, &["Your faithful student,"]),
    words(FunctionMain, &["Today I learned"]),
    words(FunctionHeader, &["I learned"]),
    words(FunctionFooter, &["That's all about"]),
    words(FunctionParameter, &["using"]),
    words(FunctionReturn, &["with", "to get"]),
    // I/O and calls
    words(
        Print,
        &["I quickly said", "I quickly sang", "I quickly wrote"],
    ),
    words(PrintNewline, &["I said", "I sang", "I wrote"]),
    words(Prompt, &["I heard", "I read", "I asked"]),
    words(FunctionCall, &["I remembered", "I would"]),
    // Variables
    words(Declaration, &["Did you know that"]),
    words(Modify, &["becomes", "become", "became", "is now"]),
    // Type hints
    words(
        TypeBoolean,
        &["argument", "logic", "an argument", "the argument", "the logic"],
    ),
    words(
        TypeBooleanArray,
        &[
            "arguments",
            "logics",
            "many arguments",
            "many logics",
            "the arguments",
            "the logics",
        ],
    ),
    words(TypeNumber, &["number", "a number", "the number"]),
    words(TypeNumberArray, &["numbers", "the numbers", "many numbers"]),
    words(
        TypeString,
        &[
            "characters",
            "letters",
            "phrase",
            "quote",
            "sentence",
            "word",
            "a phrase",
            "a quote",
            "a sentence",
            "a word",
            "the characters",
            "the letters",
            "the phrase",
            "the quote",
            "the sentence",
            "the word",
        ],
    ),
    words(
        TypeStringArray,
        &[
            "phrases",
            "quotes",
            "sentences",
            "words",
            "many phrases",
            "many quotes",
            "many sentences",
            "many words",
            "the phrases",
            "the quotes",
            "the sentences",
            "the words",
        ],
    ),
    words(
        TypeChar,
        &[
            "character",
            "letter",
            "a character",
            "a letter",
            "the character",
            "the letter",
        ],
    ),
    // Comments
    Phrase {
        kind: CommentPostscript,
        pattern: Pattern::Custom(postscript_len),
    },
    // Arithmetic
    words(OperatorAddInfix, &["plus", "added to"]),
    words(OperatorAddPrefix, &["add"]),
    words(OperatorSubInfix, &["minus", "without"]),
    words(OperatorSubPrefix, &["subtract", "the difference between"]),
    words(OperatorMulInfix, &["times", "multiplied with"]),
    words(OperatorMulPrefix, &["multiply"]),
    words(OperatorDivInfix, &["divided by"]),
    words(OperatorDivPrefix, &["divide"]),
    words(OperatorModPrefix, &["remainder of"]),
    words(OperatorModInfix, &["mod", "modulo", "remainder"]),
    // Relational, longest first
    words(
        OperatorLte,
        &[
            "had no more than",
            "has no more than",
            "is no greater than",
            "is no more than",
            "is not greater than",
            "is not more than",
            "isn't greater than",
            "isn't more than",
            "was no greater than",
            "was no more than",
            "was not greater than",
            "was not more than",
            "wasn't greater than",
            "wasn't more than",
            "were no greater than",
            "were no more than",
            "were not greater than",
            "were not more than",
            "weren't greater than",
            "weren't more than",
        ],
    ),
    words(
        OperatorGte,
        &[
            "had no less than",
            "has no less than",
            "is no less than",
            "is not less than",
            "isn't less than",
            "was no less than",
            "was not less than",
            "wasn't less than",
            "were no less than",
            "were not less than",
            "weren't less than",
        ],
    ),
    words(
        OperatorGt,
        &[
            "had more than",
            "has more than",
            "were more than",
            "was more than",
            "is greater than",
            "was greater than",
            "were greater than",
        ],
    ),
    words(
        OperatorLt,
        &[
            "had less than",
            "has less than",
            "is less than",
            "was less than",
            "were less than",
        ],
    ),
    words(
        OperatorNeq,
        &[
            "wasn't equal to",
            "isn't equal to",
            "weren't equal to",
            "hadn't",
            "hasn't",
            "isn't",
            "wasn't",
            "weren't",
            "had not",
            "has not",
            "is not",
            "was not",
            "were not",
        ],
    ),
    words(
        OperatorEq,
        &[
            "is equal to",
            "was equal to",
            "were equal to",
            "is",
            "was",
            "were",
            "had",
            "has",
            "likes",
            "like",
        ],
    ),
    // Keywords
    words(KeywordReturn, &["Then you get"]),
    words(KeywordConst, &["always"]),
    words(KeywordAnd, &["and"]),
    words(KeywordOr, &["or"]),
    words(KeywordOf, &["of"]),
    // Increment and decrement
    words(UnaryIncrementPrefix, &["There was one more"]),
    words(UnaryDecrementPrefix, &["There was one less"]),
    words(UnaryIncrementPostfix, &["got one more"]),
    words(UnaryDecrementPostfix, &["got one less"]),
    // Control flow
    words(IfClause, &["If", "When"]),
    words(KeywordThen, &["then"]),
    words(
        ElseClause,
        &["Otherwise if", "Or else if", "Or else", "Otherwise"],
    ),
    words(IfEndClause, &["That's what I would do"]),
    words(WhileClause, &["As long as", "Here's what I did while"]),
    words(KeywordStatementEnd, &["That's what I did"]),
    words(ForEveryClause, &["For every"]),
    words(KeywordIn, &["in"]),
    words(KeywordFrom, &["from"]),
    words(KeywordTo, &["to"]),
];

// ──────────────────────────────────────────────
// Matching
// ──────────────────────────────────────────────

/// Does `phrase`, split into atoms, spell the front of `tokens`?
fn match_words(tokens: &[Token], phrase: &str) -> Option<usize> {
    let mut consumed = 0usize;
    for (_, piece) in atoms(phrase) {
        let t = tokens.get(consumed)?;
        if t.text != piece {
            return None;
        }
        consumed += 1;
    }
    Some(consumed)
}

/// `P.` followed by one or more `S.` groups, then whitespace, a newline, or
/// the end of the stream.
fn postscript_len(tokens: &[Token]) -> Option<usize> {
    let text = |i: usize| tokens.get(i).map(|t| t.text.as_str());

    if text(0)? != "P" || text(1)? != "." {
        return None;
    }

    let mut idx = 2;
    loop {
        if text(idx)? != "S" || text(idx + 1)? != "." {
            return None;
        }
        idx += 2;
        match text(idx) {
            None | Some(" ") | Some("\t") | Some("\n") => return Some(idx),
            Some("S") => continue,
            Some(_) => return None,
        }
    }
}

/// The idiom at the front of `tokens`, if any: atoms consumed and the
/// resulting kind. Only fires on a literal word.
pub fn match_phrase(tokens: &[Token]) -> Option<(usize, TokenKind)> {
    if tokens.first()?.kind != Identifier {
        return None;
    }
    PHRASES
        .iter()
        .find_map(|p| p.match_len(tokens).map(|n| (n, p.kind)))
}

/// Collapse every recognized idiom in the stream into one token.
pub fn recognize(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut pos = 0usize;

    while pos < tokens.len() {
        let rest = &tokens[pos..];
        match match_phrase(rest).and_then(|(n, kind)| merge_tokens(&rest[..n], kind).map(|t| (n, t))) {
            Some((n, merged)) => {
                tracing::trace!(kind = %merged.kind, text = %merged.text, "phrase");
                out.push(merged);
                pos += n;
            }
            None => {
                out.push(tokens[pos].clone());
                pos += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{classifier::classify, merger::merge, scanner::scan};

    fn front(src: &str) -> Option<(usize, TokenKind)> {
        match_phrase(&classify(merge(scan(src))))
    }

    fn front_kind(src: &str) -> Option<TokenKind> {
        front(src).map(|(_, k)| k)
    }

    #[test]
    fn report_delimiters() {
        assert_eq!(front("Dear Princess Celestia: Hi"), Some((6, ReportHeader)));
        assert_eq!(front("Your faithful student, Me"), Some((6, ReportFooter)));
        assert_eq!(front("Dear Princess Luna:"), None);
    }

    #[test]
    fn longer_paragraph_header_wins() {
        assert_eq!(front_kind("Today I learned x"), Some(FunctionMain));
        assert_eq!(front_kind("I learned x"), Some(FunctionHeader));
    }

    #[test]
    fn inline_print_before_newline_print() {
        assert_eq!(front("I quickly said x"), Some((5, Print)));
        assert_eq!(front("I said x"), Some((3, PrintNewline)));
        assert_eq!(front_kind("I sang x"), Some(PrintNewline));
        assert_eq!(front_kind("I asked x"), Some(Prompt));
        assert_eq!(front_kind("I would x"), Some(FunctionCall));
    }

    #[test]
    fn otherwise_if_before_otherwise() {
        assert_eq!(front("Otherwise if x"), Some((3, ElseClause)));
        assert_eq!(front("Otherwise, x"), Some((1, ElseClause)));
        assert_eq!(front("Or else if x"), Some((5, ElseClause)));
        assert_eq!(front("Or else, x"), Some((3, ElseClause)));
    }

    #[test]
    fn modify_before_equality() {
        assert_eq!(front("is now 2"), Some((3, Modify)));
        assert_eq!(front("is 2"), Some((1, OperatorEq)));
        assert_eq!(front("is equal to 2"), Some((5, OperatorEq)));
    }

    #[test]
    fn relational_longest_first() {
        assert_eq!(front("is not greater than 2"), Some((7, OperatorLte)));
        assert_eq!(front("isn't more than 2"), Some((7, OperatorLte)));
        assert_eq!(front("is not less than 2"), Some((7, OperatorGte)));
        assert_eq!(front("is greater than 2"), Some((5, OperatorGt)));
        assert_eq!(front("had less than 2"), Some((5, OperatorLt)));
        assert_eq!(front("is not 2"), Some((3, OperatorNeq)));
        assert_eq!(front("wasn't equal to 2"), Some((7, OperatorNeq)));
        assert_eq!(front("isn't 2"), Some((3, OperatorNeq)));
        assert_eq!(front_kind("likes 2"), Some(OperatorEq));
    }

    #[test]
    fn return_type_before_to() {
        assert_eq!(front("to get a number"), Some((3, FunctionReturn)));
        assert_eq!(front("to say"), Some((1, KeywordTo)));
        assert_eq!(front("added to x"), Some((3, OperatorAddInfix)));
    }

    #[test]
    fn modulo_prefix_before_infix() {
        assert_eq!(front("remainder of 4"), Some((3, OperatorModPrefix)));
        assert_eq!(front("remainder 4"), Some((1, OperatorModInfix)));
    }

    #[test]
    fn type_hints() {
        assert_eq!(front_kind("the number 1"), Some(TypeNumber));
        assert_eq!(front_kind("many numbers 1"), Some(TypeNumberArray));
        assert_eq!(front_kind("the word x"), Some(TypeString));
        assert_eq!(front_kind("the words x"), Some(TypeStringArray));
        assert_eq!(front_kind("an argument x"), Some(TypeBoolean));
        assert_eq!(front_kind("the logics x"), Some(TypeBooleanArray));
        assert_eq!(front_kind("a letter x"), Some(TypeChar));
        assert_eq!(front_kind("the difference between"), Some(OperatorSubPrefix));
    }

    #[test]
    fn unary_and_loops() {
        assert_eq!(front_kind("There was one more Spike"), Some(UnaryIncrementPrefix));
        assert_eq!(front_kind("got one less."), Some(UnaryDecrementPostfix));
        assert_eq!(front_kind("That's what I did."), Some(KeywordStatementEnd));
        assert_eq!(front_kind("That's what I would do."), Some(IfEndClause));
        assert_eq!(front_kind("Here's what I did while x"), Some(WhileClause));
        assert_eq!(front_kind("As long as x"), Some(WhileClause));
        assert_eq!(front_kind("For every number"), Some(ForEveryClause));
    }

    #[test]
    fn postscript_shapes() {
        assert_eq!(front("P.S. hi"), Some((4, CommentPostscript)));
        assert_eq!(front("P.S.S. hi"), Some((6, CommentPostscript)));
        assert_eq!(front("P.S."), Some((4, CommentPostscript)));
        assert_eq!(front("P.S.\nx"), Some((4, CommentPostscript)));
        assert_eq!(front("P.Sx"), None);
        assert_eq!(front("P.S.x"), None);
    }

    #[test]
    fn only_literal_fronts_match() {
        assert_eq!(front("\"is\""), None);
        assert_eq!(front("1 is"), None);
    }

    #[test]
    fn recognize_merges_spans() {
        let out = recognize(classify(merge(scan("I said \"Hi\"!"))));
        assert_eq!(out[0].kind, PrintNewline);
        assert_eq!(out[0].text, "I said");
        assert_eq!(out[0].start, 0);
        assert_eq!(out[0].length, 6);
        assert_eq!(out[1].kind, Whitespace);
        assert_eq!(out[2].kind, String);
    }
}
