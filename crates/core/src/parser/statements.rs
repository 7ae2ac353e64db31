use super::{Parser, STATEMENT_END};
use crate::ast::{Declaration, Span, Statement, Statements, VarType};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

/// One row of the statement dispatch table: when `applies` holds at the
/// cursor, `parse` owns the statement.
#[derive(Clone, Copy)]
struct StatementRule<'a> {
    applies: fn(&Parser<'a>) -> bool,
    parse: fn(&mut Parser<'a>) -> Result<Statement, ParseError>,
}

impl<'a> Parser<'a> {
    /// Tried in order; the first rule that applies wins.
    const STATEMENT_RULES: [StatementRule<'a>; 13] = [
        StatementRule {
            applies: Self::at_print,
            parse: Self::parse_print,
        },
        StatementRule {
            applies: Self::at_prompt,
            parse: Self::parse_prompt,
        },
        StatementRule {
            applies: Self::at_declaration,
            parse: Self::parse_declaration_statement,
        },
        StatementRule {
            applies: Self::at_modify,
            parse: Self::parse_modify,
        },
        StatementRule {
            applies: Self::at_call,
            parse: Self::parse_call_statement,
        },
        StatementRule {
            applies: Self::at_if,
            parse: Self::parse_if,
        },
        StatementRule {
            applies: Self::at_while,
            parse: Self::parse_while,
        },
        StatementRule {
            applies: Self::at_prefix_unary,
            parse: Self::parse_prefix_unary,
        },
        StatementRule {
            applies: Self::at_postfix_unary,
            parse: Self::parse_postfix_unary,
        },
        StatementRule {
            applies: Self::at_return,
            parse: Self::parse_return,
        },
        StatementRule {
            applies: Self::at_for_range,
            parse: Self::parse_for_range,
        },
        StatementRule {
            applies: Self::at_for_each,
            parse: Self::parse_for_each,
        },
        StatementRule {
            applies: Self::at_array_modify,
            parse: Self::parse_array_modify,
        },
    ];

    // -- Statement lists ------------------------------------------

    /// Statements up to, not including, the first token in `closers`.
    /// Reaching the end of the stream first reports the first closer as
    /// missing.
    pub(super) fn parse_statements(
        &mut self,
        closers: &[TokenKind],
    ) -> Result<Statements, ParseError> {
        let first = self.cur();
        let mut items = Vec::new();

        loop {
            if self.at_any(closers) {
                break;
            }
            match self.peek_kind() {
                TokenKind::Punctuation => {
                    self.advance();
                    continue;
                }
                TokenKind::EndOfFile => {
                    let missing = closers.first().copied().unwrap_or(TokenKind::FunctionFooter);
                    return Err(self.err(format!("Could not find {}", missing)));
                }
                _ => {}
            }

            let rule = Self::STATEMENT_RULES
                .into_iter()
                .find(|rule| (rule.applies)(&*self));
            match rule {
                Some(rule) => items.push((rule.parse)(self)?),
                None => {
                    return Err(self.err(format!(
                        "Unsupported statement token: {}",
                        self.peek_kind()
                    )))
                }
            }
        }

        let span = match items.last() {
            Some(last) => Span::new(first.start, 0).to(last.span()),
            None => Span::new(first.start, 0),
        };
        Ok(Statements { items, span })
    }

    // -- Predicates -----------------------------------------------

    fn at_print(&self) -> bool {
        self.at_any(&[TokenKind::Print, TokenKind::PrintNewline])
    }

    fn at_prompt(&self) -> bool {
        self.at(TokenKind::Prompt)
    }

    fn at_declaration(&self) -> bool {
        self.at(TokenKind::Declaration)
    }

    fn at_modify(&self) -> bool {
        self.at(TokenKind::Identifier) && self.peek_next().kind == TokenKind::Modify
    }

    fn at_call(&self) -> bool {
        self.at(TokenKind::FunctionCall)
    }

    fn at_prefix_unary(&self) -> bool {
        self.at_any(&[
            TokenKind::UnaryIncrementPrefix,
            TokenKind::UnaryDecrementPrefix,
        ])
    }

    fn at_postfix_unary(&self) -> bool {
        self.at(TokenKind::Identifier)
            && matches!(
                self.peek_next().kind,
                TokenKind::UnaryIncrementPostfix | TokenKind::UnaryDecrementPostfix
            )
    }

    fn at_return(&self) -> bool {
        self.at(TokenKind::KeywordReturn)
    }

    fn at_array_modify(&self) -> bool {
        !self.at(TokenKind::KeywordOf)
            && self.contains_before(TokenKind::KeywordOf, &STATEMENT_END)
            && (self.contains_before(TokenKind::OperatorEq, &STATEMENT_END)
                || self.contains_before(TokenKind::Modify, &STATEMENT_END))
    }

    // -- Values ---------------------------------------------------

    /// The value run of a statement, up to its closing punctuation. Commas
    /// belong to the value when it is a list or a call with arguments.
    fn take_value_run(&mut self, expected: Option<VarType>) -> Result<&'a [Token], ParseError> {
        let lists = expected.is_some_and(VarType::is_array)
            || self.contains_before(TokenKind::FunctionParameter, &STATEMENT_END);
        if lists {
            self.take_until(
                |t| t.kind == TokenKind::Punctuation && t.text != ",",
                format!("Could not find {}", TokenKind::Punctuation),
            )
        } else {
            self.take_until_punctuation()
        }
    }

    // -- Output and input -----------------------------------------

    fn parse_print(&mut self) -> Result<Statement, ParseError> {
        let start = self.advance();
        let newline = start.kind == TokenKind::PrintNewline;
        let run = self.take_value_run(None)?;
        let value = self.value(run, None)?;
        let end = self.expect(TokenKind::Punctuation)?;
        Ok(Statement::Print {
            value,
            newline,
            span: Span::covering(start, end),
        })
    }

    fn parse_prompt(&mut self) -> Result<Statement, ParseError> {
        let start = self.advance();
        let identifier = self.expect(TokenKind::Identifier)?.text.clone();
        if !self.cur().is_punctuation(":") {
            return Err(self.err("Expected ':'"));
        }
        self.advance();
        let run = self.take_value_run(None)?;
        let prompt = self.value(run, None)?;
        let end = self.expect(TokenKind::Punctuation)?;
        Ok(Statement::Prompt {
            identifier,
            prompt,
            span: Span::covering(start, end),
        })
    }

    // -- Variables ------------------------------------------------

    /// `Did you know that <name> is [always] <type> [value]`. Shared by
    /// paragraph bodies and the report's top level.
    pub(super) fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let start = self.expect(TokenKind::Declaration)?;
        let identifier = self.expect(TokenKind::Identifier)?.text.clone();
        self.expect(TokenKind::OperatorEq)?;

        let constant = self.at(TokenKind::KeywordConst);
        if constant {
            self.advance();
        }
        let declared_type = self.expect_type_hint("Expected variable type hint")?;

        let run = self.take_value_run(Some(declared_type))?;
        let value = self.value(run, Some(declared_type))?;
        let end = self.expect(TokenKind::Punctuation)?;

        Ok(Declaration {
            identifier,
            constant,
            declared_type,
            value,
            span: Span::covering(start, end),
        })
    }

    fn parse_declaration_statement(&mut self) -> Result<Statement, ParseError> {
        self.parse_declaration().map(Statement::Declaration)
    }

    fn parse_modify(&mut self) -> Result<Statement, ParseError> {
        let ident = self.advance();
        self.expect(TokenKind::Modify)?;
        let hint = self.take_scalar_type()?;
        let run = self.take_value_run(hint)?;
        let value = self.value(run, hint)?;
        let end = self.expect(TokenKind::Punctuation)?;
        Ok(Statement::Modify {
            identifier: ident.text.clone(),
            value,
            span: Span::covering(ident, end),
        })
    }

    /// `<index> of <name> is <value>`.
    fn parse_array_modify(&mut self) -> Result<Statement, ParseError> {
        let first = self.cur();
        let index_run = self.take_until(
            |t| t.kind == TokenKind::KeywordOf,
            format!("Expected {}", TokenKind::KeywordOf),
        )?;
        let index = self.value(index_run, None)?;
        self.expect(TokenKind::KeywordOf)?;
        let identifier = self.expect(TokenKind::Identifier)?.text.clone();
        if self.at_any(&[TokenKind::OperatorEq, TokenKind::Modify]) {
            self.advance();
        } else {
            return Err(self.err(format!("Expected {}", TokenKind::OperatorEq)));
        }
        let hint = self.take_scalar_type()?;
        let run = self.take_until_punctuation()?;
        let value = self.value(run, hint)?;
        let end = self.expect(TokenKind::Punctuation)?;
        Ok(Statement::ArrayModify {
            identifier,
            index,
            value,
            span: Span::covering(first, end),
        })
    }

    // -- Calls and returns ----------------------------------------

    fn parse_call_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.advance();
        let (identifier, _) =
            self.take_name(&[TokenKind::Punctuation, TokenKind::FunctionParameter])?;

        let mut args = Vec::new();
        if self.at(TokenKind::FunctionParameter) {
            let using = self.advance();
            let mut expecting_comma = false;
            loop {
                if self.at(TokenKind::Punctuation) {
                    if self.cur().text == "," {
                        self.advance();
                        expecting_comma = false;
                        continue;
                    }
                    break;
                }
                if expecting_comma {
                    return Err(self.err_at(using, "Expecting parameters separated by comma"));
                }
                // The hint documents the argument; the evaluator checks it.
                self.take_type_hint();
                let run = self.take_until_punctuation()?;
                args.push(self.value(run, None)?);
                expecting_comma = true;
            }
        }

        let end = self.expect(TokenKind::Punctuation)?;
        Ok(Statement::Call {
            identifier,
            args,
            span: Span::covering(start, end),
        })
    }

    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        let start = self.advance();
        let run = self.take_value_run(None)?;
        let value = self.value(run, None)?;
        let end = self.expect(TokenKind::Punctuation)?;
        Ok(Statement::Return {
            value,
            span: Span::covering(start, end),
        })
    }

    // -- Increment and decrement ----------------------------------

    fn parse_prefix_unary(&mut self) -> Result<Statement, ParseError> {
        let op = self.advance();
        let identifier = self.expect(TokenKind::Identifier)?.text.clone();
        let end = self.expect(TokenKind::Punctuation)?;
        Ok(Statement::Unary {
            identifier,
            increment: op.kind == TokenKind::UnaryIncrementPrefix,
            span: Span::covering(op, end),
        })
    }

    fn parse_postfix_unary(&mut self) -> Result<Statement, ParseError> {
        let ident = self.advance();
        let op = self.advance();
        let end = self.expect(TokenKind::Punctuation)?;
        Ok(Statement::Unary {
            identifier: ident.text.clone(),
            increment: op.kind == TokenKind::UnaryIncrementPostfix,
            span: Span::covering(ident, end),
        })
    }
}
