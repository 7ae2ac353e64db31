//! Report parser: a finalized token stream in, a [`Report`] out.
//!
//! Recursive descent with one token of committed lookahead. Wherever the
//! grammar needs more than that to pick a production, the parser runs a
//! bounded read-only scan that stops at the next statement end and never
//! moves the cursor.

use crate::ast::{Expr, Report, Span, TopLevel, VarType};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

mod expressions;
mod flow;
mod functions;
mod statements;
mod types;

/// Stop set for lookahead scans: a statement ends at punctuation, and no
/// scan may run past the sentinel.
const STATEMENT_END: [TokenKind; 2] = [TokenKind::Punctuation, TokenKind::EndOfFile];

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: &'a str,
}

impl<'a> Parser<'a> {
    /// The stream must be closed by the EndOfFile sentinel, which lets the
    /// cursor clamp there instead of running off the end.
    fn new(tokens: &'a [Token], source: &'a str) -> Result<Self, ParseError> {
        match tokens.last() {
            Some(t) if t.kind == TokenKind::EndOfFile => Ok(Parser {
                tokens,
                pos: 0,
                source,
            }),
            _ => Err(ParseError::at(
                source,
                source.len(),
                format!("Expected {}", TokenKind::EndOfFile),
            )),
        }
    }

    fn cur(&self) -> &'a Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.cur().kind
    }

    fn peek_next(&self) -> &'a Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek_kind())
    }

    fn advance(&mut self) -> &'a Token {
        let t = self.cur();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.err(format!("Expected {}", kind)))
        }
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        self.err_at(self.cur(), msg)
    }

    fn err_at(&self, t: &Token, msg: impl Into<String>) -> ParseError {
        ParseError::at(self.source, t.start, msg)
    }

    /// Does a `kind` token occur before the next token in `stops`? Looks at
    /// the current token too. Read-only.
    fn contains_before(&self, kind: TokenKind, stops: &[TokenKind]) -> bool {
        self.tokens[self.pos..]
            .iter()
            .take_while(|t| !stops.contains(&t.kind))
            .any(|t| t.kind == kind)
    }

    /// Consume tokens up to, not including, the first one satisfying
    /// `stop`. Hitting the sentinel first fails with `missing`.
    fn take_until(
        &mut self,
        stop: impl Fn(&Token) -> bool,
        missing: impl Into<String>,
    ) -> Result<&'a [Token], ParseError> {
        let start = self.pos;
        loop {
            let t = self.cur();
            if stop(t) {
                break;
            }
            if t.kind == TokenKind::EndOfFile {
                return Err(self.err_at(t, missing));
            }
            self.pos += 1;
        }
        Ok(&self.tokens[start..self.pos])
    }

    fn take_until_punctuation(&mut self) -> Result<&'a [Token], ParseError> {
        self.take_until(
            |t| t.kind == TokenKind::Punctuation,
            format!("Could not find {}", TokenKind::Punctuation),
        )
    }

    /// Source text covered by `run`, trimmed.
    fn source_text(&self, run: &[Token]) -> String {
        let span = Span::of_run(run);
        self.source
            .get(span.start..span.end())
            .unwrap_or_default()
            .trim()
            .to_owned()
    }

    /// A name that may span several tokens (`how to say hello`), read up to
    /// the first token in `stops`. The name is its raw source text.
    fn take_name(&mut self, stops: &[TokenKind]) -> Result<(String, Span), ParseError> {
        let first = self.cur();
        if first.kind != TokenKind::Identifier {
            return Err(self.err(format!("Expected {}", TokenKind::Identifier)));
        }
        let missing = format!("Could not find {}", stops[0]);
        let run = self.take_until(|t| stops.contains(&t.kind), missing)?;
        Ok((self.source_text(run), Span::of_run(run)))
    }

    // -- Report ---------------------------------------------------

    fn parse_report(&mut self) -> Result<Report, ParseError> {
        let header = self.expect(TokenKind::ReportHeader)?;
        let title_run = self.take_until_punctuation()?;
        if title_run.is_empty() {
            return Err(self.err(format!("Expected {}", TokenKind::Identifier)));
        }
        let title = self.source_text(title_run);
        self.expect(TokenKind::Punctuation)?;

        let mut body = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::ReportFooter => break,
                TokenKind::Punctuation => {
                    self.advance();
                }
                TokenKind::FunctionMain | TokenKind::FunctionHeader => {
                    let function = self.parse_function()?;
                    tracing::trace!(name = %function.name, main = function.is_main, "paragraph");
                    body.push(TopLevel::Function(function));
                }
                TokenKind::Declaration => {
                    body.push(TopLevel::Declaration(self.parse_declaration()?));
                }
                TokenKind::EndOfFile => {
                    return Err(self.err(format!("Could not find {}", TokenKind::ReportFooter)));
                }
                other => return Err(self.err(format!("Unexpected token: {}", other))),
            }
        }

        self.expect(TokenKind::ReportFooter)?;
        let author = self.expect(TokenKind::Identifier)?.text.clone();
        let end = self.expect(TokenKind::Punctuation)?;

        if !self.at(TokenKind::EndOfFile) {
            return Err(self.err(format!("Expected {}", TokenKind::EndOfFile)));
        }

        Ok(Report {
            title,
            author,
            body,
            span: Span::covering(header, end),
        })
    }
}

// ──────────────────────────────────────────────
// Entry points
// ──────────────────────────────────────────────

/// Build a report from a finalized stream. `source` is the text the
/// stream was produced from; it backs names, titles and error positions.
pub fn parse_tokens(tokens: &[Token], source: &str) -> Result<Report, ParseError> {
    let mut parser = Parser::new(tokens, source)?;
    let report = parser.parse_report()?;
    tracing::debug!(
        title = %report.title,
        author = %report.author,
        items = report.body.len(),
        "parsed report"
    );
    Ok(report)
}

/// Build a single value from a finalized stream, as if it were the
/// right-hand side of a statement. `expected` plays the role of the
/// declared type.
pub fn parse_value(
    tokens: &[Token],
    source: &str,
    expected: Option<VarType>,
) -> Result<Expr, ParseError> {
    let parser = Parser::new(tokens, source)?;
    parser.value(&tokens[..tokens.len() - 1], expected)
}
