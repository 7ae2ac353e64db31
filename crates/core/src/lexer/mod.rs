//! Lexer: source text to the parser-ready token stream.
//!
//! The stages run in this order:
//!
//! 1. [`scan`] splits the source into atoms
//! 2. [`merge`] fuses decimals, quoted spans and paren comments
//! 3. [`classify`] assigns a coarse kind by shape
//! 4. [`recognize`] collapses English idioms into keyword tokens
//! 5. [`fuse_literals`] joins the remaining adjacent words
//! 6. [`finalize`] drops trivia and appends the EndOfFile sentinel
//!
//! Literal fusion belongs to classification but has to run after
//! recognition, since idioms are matched word by word.

pub mod classifier;
pub mod finalizer;
pub mod merger;
pub mod phrases;
pub mod scanner;

pub use classifier::{classify, fuse_literals};
pub use finalizer::finalize;
pub use merger::merge;
pub use phrases::{match_phrase, recognize};
pub use scanner::scan;

use crate::token::Token;

/// Run every lexer stage over `src`. Never fails: malformed input flows
/// through as Unknown or Identifier tokens for the parser to reject.
pub fn tokenize(src: &str) -> Vec<Token> {
    let atoms = scan(src);
    tracing::trace!(atoms = atoms.len(), "scanned");

    let merged = merge(atoms);
    let classified = classify(merged);
    let recognized = recognize(classified);
    let fused = fuse_literals(recognized);
    let tokens = finalize(fused);

    tracing::debug!(tokens = tokens.len(), bytes = src.len(), "tokenized");
    tokens
}
