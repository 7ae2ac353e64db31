#![allow(clippy::result_large_err)]
//! fim-core: FiM++ tokenizer and report parser.
//!
//! Turns the text of a FiM++ report into a token stream and then into a
//! typed syntax tree. Nothing here evaluates a report.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`parse()`] -- tokenize and build the [`Report`] in one call
//! - [`tokenize()`] -- run the six lexical stages and return the finalized stream
//! - [`ParseError`] -- positioned error produced by the AST builder
//! - AST types: [`Report`], [`TopLevel`], [`Function`], [`Statement`],
//!   [`Expr`], [`VarType`], [`Span`]
//!
//! Individual lexer stages live in [`lexer`] for callers that want to
//! inspect intermediate streams.

/// Version of the phrase table and AST shape emitted by this crate.
pub const GRAMMAR_VERSION: &str = "1.0";

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{
    BinaryCategory, BinaryOp, Condition, Declaration, Expr, Function, LiteralType, Parameter,
    Report, Span, Statement, Statements, TopLevel, VarType,
};
pub use error::ParseError;
pub use token::{Token, TokenKind};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use lexer::tokenize;
pub use parser::{parse_tokens, parse_value};

/// Tokenize `source` and build its report.
pub fn parse(source: &str) -> Result<Report, ParseError> {
    let tokens = tokenize(source);
    parse_tokens(&tokens, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_entry_point() {
        let src = "Dear Princess Celestia: Letters.\n\
                   Today I learned writing.\n\
                   I said \"Hi\"!\n\
                   That's all about writing!\n\
                   Your faithful student, Spike.\n";
        let report = parse(src).unwrap();
        assert_eq!(report.title, "Letters");
        assert_eq!(report.author, "Spike");
        assert_eq!(report.functions().count(), 1);
    }

    #[test]
    fn parse_error_carries_position() {
        let err = parse("Hello there.").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 1);
    }

    #[test]
    fn public_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Token>();
        assert_send_sync::<Report>();
        assert_send_sync::<ParseError>();
    }
}
