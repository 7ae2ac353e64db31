use std::collections::BTreeMap;

use super::Parser;
use crate::ast::{BinaryOp, Expr, LiteralType, Span, VarType};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

/// Infix operators, in splitting order. The first entry present in a run
/// becomes the outermost node, split at its first occurrence.
const BINARY_TABLE: [(TokenKind, BinaryOp); 13] = [
    (TokenKind::OperatorMulInfix, BinaryOp::Mul),
    (TokenKind::OperatorDivInfix, BinaryOp::Div),
    (TokenKind::OperatorModInfix, BinaryOp::Mod),
    (TokenKind::OperatorAddInfix, BinaryOp::Add),
    (TokenKind::OperatorSubInfix, BinaryOp::Sub),
    (TokenKind::OperatorGte, BinaryOp::Gte),
    (TokenKind::OperatorLte, BinaryOp::Lte),
    (TokenKind::OperatorGt, BinaryOp::Gt),
    (TokenKind::OperatorLt, BinaryOp::Lt),
    (TokenKind::OperatorNeq, BinaryOp::Neq),
    (TokenKind::OperatorEq, BinaryOp::Eq),
    (TokenKind::KeywordAnd, BinaryOp::And),
    (TokenKind::KeywordOr, BinaryOp::Or),
];

/// `add X and Y` and friends.
fn prefix_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::OperatorAddPrefix => Some(BinaryOp::Add),
        TokenKind::OperatorSubPrefix => Some(BinaryOp::Sub),
        TokenKind::OperatorMulPrefix => Some(BinaryOp::Mul),
        TokenKind::OperatorDivPrefix => Some(BinaryOp::Div),
        TokenKind::OperatorModPrefix => Some(BinaryOp::Mod),
        _ => None,
    }
}

/// Kinds that may appear inside a multi-word name.
fn is_name_part(t: &Token) -> bool {
    matches!(
        t.kind,
        TokenKind::Identifier | TokenKind::KeywordTo | TokenKind::KeywordIn | TokenKind::KeywordFrom
    )
}

fn is_comma(t: &Token) -> bool {
    t.is_punctuation(",")
}

impl<'a> Parser<'a> {
    // -- Values ---------------------------------------------------

    /// Build the value spelled by `run`. `expected` is the declared type
    /// of whatever receives the value, when there is one: it supplies
    /// defaults for empty values and `nothing`, and decides whether a
    /// comma list is allowed.
    pub(super) fn value(&self, run: &[Token], expected: Option<VarType>) -> Result<Expr, ParseError> {
        let Some(first) = run.first() else {
            return match expected {
                Some(ty) => Ok(ty.default_literal(Span::new(self.cur().start, 0))),
                None => Err(self.err("Expected value")),
            };
        };

        if let [only] = run {
            if let Some(expr) = self.single_value(only, expected) {
                return Ok(expr);
            }
        }

        if let Some(call) = self.call_value(run)? {
            return Ok(call);
        }

        if let Some(op) = prefix_op(first.kind) {
            if let Some(and) = run.iter().position(|t| t.kind == TokenKind::KeywordAnd) {
                let left = self.operand(&run[1..and], first)?;
                let right = self.operand(&run[and + 1..], &run[and])?;
                let mut expr = Expr::binary(left, op, right);
                if let Expr::Binary { span, .. } = &mut expr {
                    *span = Span::of_run(run);
                }
                return Ok(expr);
            }
        }

        for (kind, op) in BINARY_TABLE {
            if let Some(at) = run.iter().position(|t| t.kind == kind) {
                let left = self.operand(&run[..at], &run[at])?;
                let right = self.operand(&run[at + 1..], &run[at])?;
                return Ok(Expr::binary(left, op, right));
            }
        }

        if run.iter().any(is_comma) {
            return self.list_value(run, expected);
        }

        if let Some(of) = run.iter().position(|t| t.kind == TokenKind::KeywordOf) {
            if of < run.len() - 1 {
                return self.indexed_value(run, of);
            }
        }

        if first.kind == TokenKind::Identifier && run.iter().all(is_name_part) {
            let name = Expr::Identifier {
                name: self.source_text(run),
                span: Span::of_run(run),
            };
            return Ok(wrap_for(name, expected));
        }

        let text: String = run.iter().map(|t| t.text.as_str()).collect();
        Err(self.err_at(
            first,
            format!("Encountered unknown value token: '{}'", text),
        ))
    }

    /// One side of an operator. An empty side is reported at the operator.
    fn operand(&self, run: &[Token], op: &Token) -> Result<Expr, ParseError> {
        if run.is_empty() {
            return Err(self.err_at(op, "Expected value"));
        }
        self.value(run, None)
    }

    fn single_value(&self, t: &Token, expected: Option<VarType>) -> Option<Expr> {
        let span = Span::of(t);
        match t.kind {
            TokenKind::Null => Some(match expected {
                Some(ty) => ty.default_literal(span),
                None => Expr::Null { span },
            }),
            TokenKind::Identifier => Some(wrap_for(
                Expr::Identifier {
                    name: t.text.clone(),
                    span,
                },
                expected,
            )),
            kind => {
                let value_type = LiteralType::from_token_kind(kind)?;
                Some(wrap_for(
                    Expr::Literal {
                        value_type,
                        raw: t.text.clone(),
                        span,
                    },
                    expected,
                ))
            }
        }
    }

    /// `<name> using <arg>, <arg>`: a paragraph called for its value.
    fn call_value(&self, run: &[Token]) -> Result<Option<Expr>, ParseError> {
        let Some(using) = run
            .iter()
            .position(|t| t.kind == TokenKind::FunctionParameter)
        else {
            return Ok(None);
        };
        let name = &run[..using];
        if name.is_empty() || name[0].kind != TokenKind::Identifier || !name.iter().all(is_name_part) {
            return Ok(None);
        }

        let rest = &run[using + 1..];
        let mut args = Vec::new();
        if !rest.is_empty() {
            for arg in rest.split(is_comma) {
                let arg = match arg.first() {
                    Some(t) if VarType::from_token_kind(t.kind).is_some() => &arg[1..],
                    _ => arg,
                };
                args.push(self.operand(arg, &run[using])?);
            }
        }

        Ok(Some(Expr::Call {
            identifier: self.source_text(name),
            args,
            span: Span::of_run(run),
        }))
    }

    /// `a, b, c` for an array-typed receiver. Keys start at 1.
    fn list_value(&self, run: &[Token], expected: Option<VarType>) -> Result<Expr, ParseError> {
        let Some(array) = expected.filter(|ty| ty.is_array()) else {
            return Err(self.err_at(&run[0], "Expected an array type for a list of values"));
        };
        let element_type = array.element_type();

        let mut elements = BTreeMap::new();
        for (idx, item) in run.split(is_comma).enumerate() {
            elements.insert(idx + 1, self.value(item, Some(element_type))?);
        }

        Ok(Expr::LiteralArray {
            element_type,
            elements,
            span: Span::of_run(run),
        })
    }

    /// `<index> of <collection>`
    fn indexed_value(&self, run: &[Token], of: usize) -> Result<Expr, ParseError> {
        let index_run = &run[..of];
        if index_run.is_empty() {
            return Err(self.err_at(&run[of], "Expected dictionary identifier index"));
        }
        let index = self.value(index_run, None)?;

        let collection = match &run[of + 1..] {
            [ident] if ident.kind == TokenKind::Identifier => ident.text.clone(),
            rest => return Err(self.err_at(&rest[0], "Expected dictionary identifier")),
        };

        Ok(Expr::IndexedIdentifier {
            collection,
            index: Box::new(index),
            span: Span::of_run(run),
        })
    }
}

/// A single value handed to an array-typed receiver becomes a one-element
/// array.
fn wrap_for(expr: Expr, expected: Option<VarType>) -> Expr {
    match expected {
        Some(ty) if ty.is_array() => {
            let span = expr.span();
            Expr::LiteralArray {
                element_type: ty.element_type(),
                elements: BTreeMap::from([(1, expr)]),
                span,
            }
        }
        _ => expr,
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_value;
    use crate::ast::{BinaryCategory, BinaryOp, Expr, LiteralType, VarType};
    use crate::error::ParseError;
    use crate::lexer::tokenize;

    fn value(src: &str) -> Result<Expr, ParseError> {
        parse_value(&tokenize(src), src, None)
    }

    fn typed(src: &str, ty: VarType) -> Result<Expr, ParseError> {
        parse_value(&tokenize(src), src, Some(ty))
    }

    fn op_of(e: &Expr) -> BinaryOp {
        match e {
            Expr::Binary { op, .. } => *op,
            other => panic!("not binary: {other:?}"),
        }
    }

    #[test]
    fn single_tokens() {
        assert!(matches!(value("42").unwrap(), Expr::Literal { value_type: LiteralType::Number, .. }));
        assert!(matches!(value("\"hi\"").unwrap(), Expr::Literal { value_type: LiteralType::String, .. }));
        assert!(matches!(value("'c'").unwrap(), Expr::Literal { value_type: LiteralType::Character, .. }));
        assert!(matches!(value("yes").unwrap(), Expr::Literal { value_type: LiteralType::Boolean, .. }));
        assert!(matches!(value("nothing").unwrap(), Expr::Null { .. }));
    }

    #[test]
    fn nothing_takes_the_declared_default() {
        match typed("nothing", VarType::Boolean).unwrap() {
            Expr::Literal { value_type, raw, .. } => {
                assert_eq!(value_type, LiteralType::Boolean);
                assert_eq!(raw, "false");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_value() {
        assert_eq!(value("").unwrap_err().message, "Expected value");
        assert!(matches!(typed("", VarType::Number).unwrap(), Expr::Literal { .. }));
    }

    #[test]
    fn first_table_entry_is_outermost() {
        let e = value("1 plus 2 times 3").unwrap();
        assert_eq!(op_of(&e), BinaryOp::Mul);
        match e {
            Expr::Binary { left, category, .. } => {
                assert_eq!(op_of(&left), BinaryOp::Add);
                assert_eq!(category, BinaryCategory::Arithmetic);
            }
            _ => unreachable!(),
        }

        let e = value("a is 1 or b is 2").unwrap();
        assert_eq!(op_of(&e), BinaryOp::Eq);
    }

    #[test]
    fn relational_split() {
        let e = value("Spike had more than 10").unwrap();
        assert!(matches!(
            e,
            Expr::Binary { op: BinaryOp::Gt, category: BinaryCategory::Relational, .. }
        ));
        assert_eq!(op_of(&value("x is not greater than y").unwrap()), BinaryOp::Lte);
        assert_eq!(op_of(&value("x isn't y").unwrap()), BinaryOp::Neq);
    }

    #[test]
    fn missing_operand() {
        let err = value("plus 2").unwrap_err();
        assert_eq!(err.message, "Expected value");
        assert_eq!(err.column, 1);
    }

    #[test]
    fn prefix_arithmetic() {
        let e = value("add 1 and 2").unwrap();
        assert_eq!(op_of(&e), BinaryOp::Add);
        let e = value("the difference between 9 and x").unwrap();
        assert_eq!(op_of(&e), BinaryOp::Sub);
        let e = value("remainder of 9 and 2").unwrap();
        assert_eq!(op_of(&e), BinaryOp::Mod);
    }

    #[test]
    fn infix_modulo() {
        assert_eq!(op_of(&value("9 modulo 2").unwrap()), BinaryOp::Mod);
    }

    #[test]
    fn expression_call() {
        match value("how to sum using 1, x plus 2").unwrap() {
            Expr::Call { identifier, args, .. } => {
                assert_eq!(identifier, "how to sum");
                assert_eq!(args.len(), 2);
                assert_eq!(op_of(&args[1]), BinaryOp::Add);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn comma_list_needs_array_type() {
        let err = value("1, 2").unwrap_err();
        assert_eq!(err.message, "Expected an array type for a list of values");

        match typed("\"a\", \"b\"", VarType::StringArray).unwrap() {
            Expr::LiteralArray { element_type, elements, .. } => {
                assert_eq!(element_type, VarType::String);
                assert_eq!(elements.len(), 2);
                assert!(elements.contains_key(&1) && elements.contains_key(&2));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn single_value_for_array_is_wrapped() {
        match typed("7", VarType::NumberArray).unwrap() {
            Expr::LiteralArray { elements, .. } => assert_eq!(elements.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn indexed_identifier() {
        match value("x plus 1 of cakes").unwrap() {
            Expr::Binary { right, .. } => {
                assert!(matches!(*right, Expr::IndexedIdentifier { ref collection, .. } if collection == "cakes"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            value("of cakes").unwrap_err().message,
            "Expected dictionary identifier index"
        );
        assert_eq!(
            value("cakes of").unwrap_err().message,
            "Encountered unknown value token: 'cakesof'"
        );
        assert_eq!(
            value("1 of 2").unwrap_err().message,
            "Expected dictionary identifier"
        );
    }

    #[test]
    fn names_may_contain_keywords() {
        match value("way to go").unwrap() {
            Expr::Identifier { name, .. } => assert_eq!(name, "way to go"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_shape_echoes_text() {
        let err = value("\"a\" \"b\"").unwrap_err();
        assert_eq!(err.message, "Encountered unknown value token: '\"a\"\"b\"'");
    }
}
