use super::{Parser, STATEMENT_END};
use crate::ast::{Condition, Span, Statement};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

/// Closers of an if/otherwise body. The if-end phrase is listed first so a
/// missing end is reported as such.
const IF_BODY_END: [TokenKind; 2] = [TokenKind::IfEndClause, TokenKind::ElseClause];

impl<'a> Parser<'a> {
    // -- Predicates -----------------------------------------------

    pub(super) fn at_if(&self) -> bool {
        self.at(TokenKind::IfClause)
    }

    pub(super) fn at_while(&self) -> bool {
        self.at(TokenKind::WhileClause)
    }

    /// `For every <type> <name> from <a> to <b>`
    pub(super) fn at_for_range(&self) -> bool {
        self.at(TokenKind::ForEveryClause)
            && self.contains_before(TokenKind::KeywordFrom, &STATEMENT_END)
            && self.contains_before(TokenKind::KeywordTo, &STATEMENT_END)
    }

    /// `For every <type> <name> in <collection>`
    pub(super) fn at_for_each(&self) -> bool {
        self.at(TokenKind::ForEveryClause)
            && self.contains_before(TokenKind::KeywordIn, &STATEMENT_END)
    }

    // -- Conditions -----------------------------------------------

    /// Tokens of a condition, up to punctuation or `then`; the optional
    /// `then` is consumed.
    fn condition_run(&mut self) -> Result<&'a [Token], ParseError> {
        let run = self.take_until(
            |t| matches!(t.kind, TokenKind::Punctuation | TokenKind::KeywordThen),
            "Expected token for statement condition ending",
        )?;
        if self.at(TokenKind::KeywordThen) {
            self.advance();
        }
        Ok(run)
    }

    fn expect_comma(&mut self) -> Result<(), ParseError> {
        if self.cur().is_punctuation(",") {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("Expected {} (comma)", TokenKind::Punctuation)))
        }
    }

    // -- If -------------------------------------------------------

    pub(super) fn parse_if(&mut self) -> Result<Statement, ParseError> {
        let start = self.advance();

        let run = self.condition_run()?;
        let condition = self.value(run, None)?;
        self.expect_comma()?;
        let body = self.parse_statements(&IF_BODY_END)?;

        let mut conditions = vec![Condition {
            condition: Some(condition),
            body,
        }];
        let mut has_otherwise = false;

        while self.at(TokenKind::ElseClause) {
            let otherwise = self.advance();
            let run = self.condition_run()?;

            // A plain `Otherwise` must be the last clause.
            if has_otherwise {
                return Err(self.err_at(otherwise, "Else condition already exists"));
            }
            let condition = if run.is_empty() {
                has_otherwise = true;
                None
            } else {
                Some(self.value(run, None)?)
            };

            self.expect_comma()?;
            let body = self.parse_statements(&IF_BODY_END)?;
            conditions.push(Condition { condition, body });
        }

        self.expect(TokenKind::IfEndClause)?;
        let end = self.expect(TokenKind::Punctuation)?;

        Ok(Statement::If {
            conditions,
            span: Span::covering(start, end),
        })
    }

    // -- Loops ----------------------------------------------------

    pub(super) fn parse_while(&mut self) -> Result<Statement, ParseError> {
        let start = self.advance();
        let run = self.condition_run()?;
        let condition = self.value(run, None)?;
        self.expect(TokenKind::Punctuation)?;

        let body = self.parse_statements(&[TokenKind::KeywordStatementEnd])?;
        self.expect(TokenKind::KeywordStatementEnd)?;
        let end = self.expect(TokenKind::Punctuation)?;

        Ok(Statement::While {
            condition,
            body,
            span: Span::covering(start, end),
        })
    }

    pub(super) fn parse_for_range(&mut self) -> Result<Statement, ParseError> {
        let start = self.advance();
        let var_type = self.expect_scalar_type("Expected variable type")?;
        let var_name = self.expect(TokenKind::Identifier)?.text.clone();
        self.expect(TokenKind::KeywordFrom)?;

        let from_run = self.take_until(
            |t| t.kind == TokenKind::KeywordTo,
            "Expected 'to' token",
        )?;
        let range_start = self.value(from_run, None)?;
        self.expect(TokenKind::KeywordTo)?;
        let to_run = self.take_until_punctuation()?;
        let range_end = self.value(to_run, None)?;
        self.expect(TokenKind::Punctuation)?;

        let body = self.parse_statements(&[TokenKind::KeywordStatementEnd])?;
        self.expect(TokenKind::KeywordStatementEnd)?;
        let end = self.expect(TokenKind::Punctuation)?;

        Ok(Statement::ForRange {
            var_name,
            var_type,
            range_start,
            range_end,
            body,
            span: Span::covering(start, end),
        })
    }

    pub(super) fn parse_for_each(&mut self) -> Result<Statement, ParseError> {
        let start = self.advance();
        let var_type = self.expect_scalar_type("Expected non-array variable type")?;
        let var_name = self.expect(TokenKind::Identifier)?.text.clone();
        self.expect(TokenKind::KeywordIn)?;
        let collection = self.expect(TokenKind::Identifier)?.text.clone();
        self.expect(TokenKind::Punctuation)?;

        let body = self.parse_statements(&[TokenKind::KeywordStatementEnd])?;
        self.expect(TokenKind::KeywordStatementEnd)?;
        let end = self.expect(TokenKind::Punctuation)?;

        Ok(Statement::ForEach {
            var_name,
            var_type,
            collection,
            body,
            span: Span::covering(start, end),
        })
    }
}
