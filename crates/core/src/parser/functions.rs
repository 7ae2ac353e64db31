use super::Parser;
use crate::ast::{Function, Parameter, Span, VarType};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

/// Tokens that end a paragraph name in its header.
const HEADER_NAME_END: [TokenKind; 3] = [
    TokenKind::Punctuation,
    TokenKind::FunctionParameter,
    TokenKind::FunctionReturn,
];

impl<'a> Parser<'a> {
    // -- Paragraphs -----------------------------------------------

    pub(super) fn parse_function(&mut self) -> Result<Function, ParseError> {
        let header = self.advance();
        let is_main = header.kind == TokenKind::FunctionMain;
        let (name, _) = self.take_name(&HEADER_NAME_END)?;

        let mut parameters: Vec<Parameter> = Vec::new();
        let mut return_type: Option<VarType> = None;

        loop {
            match self.peek_kind() {
                TokenKind::FunctionParameter => {
                    let using = self.advance();
                    if !parameters.is_empty() {
                        return Err(self.err_at(using, "Parameter already exists"));
                    }
                    self.parse_parameters(using, &mut parameters)?;
                }
                TokenKind::FunctionReturn => {
                    let with = self.advance();
                    if return_type.is_some() {
                        return Err(self.err_at(with, "Return type already exists"));
                    }
                    return_type = Some(self.expect_type_hint("Expected variable type hint")?);
                }
                _ => break,
            }
        }

        self.expect(TokenKind::Punctuation)?;
        let body = self.parse_statements(&[TokenKind::FunctionFooter])?;
        self.expect(TokenKind::FunctionFooter)?;

        let closing_at = self.cur();
        let (closing, _) = self.take_name(&[TokenKind::Punctuation])?;
        if closing != name {
            return Err(self.err_at(
                closing_at,
                format!(
                    "Mismatch method name. Expected '{}', got '{}'",
                    name, closing
                ),
            ));
        }
        let end = self.expect(TokenKind::Punctuation)?;

        Ok(Function {
            name,
            is_main,
            parameters,
            return_type,
            body,
            span: Span::covering(header, end),
        })
    }

    /// `type name, type name, ...` after `using`. Stops at the return
    /// introducer or at any punctuation other than a comma.
    fn parse_parameters(
        &mut self,
        using: &Token,
        parameters: &mut Vec<Parameter>,
    ) -> Result<(), ParseError> {
        let mut expecting_comma = false;

        loop {
            if self.at(TokenKind::FunctionReturn) {
                break;
            }
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

            let type_at = self.cur();
            let var_type = self.expect_type_hint("Expected variable type")?;
            let ident = self.expect(TokenKind::Identifier)?;
            if parameters.iter().any(|p| p.name == ident.text) {
                return Err(self.err_at(ident, "Parameter already exists"));
            }
            parameters.push(Parameter {
                name: ident.text.clone(),
                var_type,
                span: Span::covering(type_at, ident),
            });
            expecting_comma = true;
        }

        Ok(())
    }
}
