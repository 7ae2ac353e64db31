//! Report AST produced by the parser.
//!
//! The tree is single-owned from the root down. Every node carries a
//! [`Span`] pointing back into the source; spans are for diagnostics only
//! and never affect what a node means.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::token::{Token, TokenKind};

// ──────────────────────────────────────────────
// Spans
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub length: usize,
}

impl Span {
    pub fn new(start: usize, length: usize) -> Self {
        Span { start, length }
    }

    pub fn of(token: &Token) -> Self {
        Span::new(token.start, token.length)
    }

    /// Covers everything from the start of `first` to the end of `last`.
    pub fn covering(first: &Token, last: &Token) -> Self {
        Span::new(first.start, last.end().saturating_sub(first.start))
    }

    /// Span of a token run; empty runs get an empty span.
    pub fn of_run(tokens: &[Token]) -> Self {
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => Span::covering(first, last),
            _ => Span::default(),
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Smallest span containing both.
    pub fn to(self, other: Span) -> Self {
        let start = self.start.min(other.start);
        Span::new(start, self.end().max(other.end()) - start)
    }
}

// ──────────────────────────────────────────────
// Types
// ──────────────────────────────────────────────

/// A declared variable, parameter or return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VarType {
    Boolean,
    Character,
    Number,
    String,
    BooleanArray,
    NumberArray,
    StringArray,
}

impl VarType {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::TypeBoolean => Some(VarType::Boolean),
            TokenKind::TypeBooleanArray => Some(VarType::BooleanArray),
            TokenKind::TypeNumber => Some(VarType::Number),
            TokenKind::TypeNumberArray => Some(VarType::NumberArray),
            TokenKind::TypeString => Some(VarType::String),
            TokenKind::TypeStringArray => Some(VarType::StringArray),
            TokenKind::TypeChar => Some(VarType::Character),
            _ => None,
        }
    }

    pub fn is_array(self) -> bool {
        matches!(
            self,
            VarType::BooleanArray | VarType::NumberArray | VarType::StringArray
        )
    }

    /// Type of one element; scalar types are their own element type.
    pub fn element_type(self) -> VarType {
        match self {
            VarType::BooleanArray => VarType::Boolean,
            VarType::NumberArray => VarType::Number,
            VarType::StringArray => VarType::String,
            scalar => scalar,
        }
    }

    /// Literal type of a scalar; `None` for arrays.
    pub fn literal_type(self) -> Option<LiteralType> {
        match self {
            VarType::Boolean => Some(LiteralType::Boolean),
            VarType::Character => Some(LiteralType::Character),
            VarType::Number => Some(LiteralType::Number),
            VarType::String => Some(LiteralType::String),
            _ => None,
        }
    }

    /// Value an uninitialised variable of this type holds. Arrays start
    /// empty.
    pub fn default_literal(self, span: Span) -> Expr {
        let raw = match self {
            VarType::Boolean => "false",
            VarType::Character => "'\0'",
            VarType::Number => "0",
            VarType::String => "\"\"",
            array => {
                return Expr::LiteralArray {
                    element_type: array.element_type(),
                    elements: BTreeMap::new(),
                    span,
                }
            }
        };
        Expr::Literal {
            value_type: self.literal_type().unwrap_or(LiteralType::String),
            raw: raw.to_owned(),
            span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralType {
    Boolean,
    Character,
    Number,
    String,
}

impl LiteralType {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Boolean => Some(LiteralType::Boolean),
            TokenKind::Character => Some(LiteralType::Character),
            TokenKind::Number => Some(LiteralType::Number),
            TokenKind::String => Some(LiteralType::String),
            _ => None,
        }
    }
}

// ──────────────────────────────────────────────
// Report and top-level items
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub author: String,
    pub body: Vec<TopLevel>,
    pub span: Span,
}

impl Report {
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.body.iter().filter_map(|item| match item {
            TopLevel::Function(f) => Some(f),
            TopLevel::Declaration(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum TopLevel {
    Function(Function),
    Declaration(Declaration),
}

/// A paragraph. `is_main` marks a `Today I learned` header; more than one
/// main paragraph is left for the evaluator to reject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: String,
    pub is_main: bool,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<VarType>,
    pub body: Statements,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub var_type: VarType,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub identifier: String,
    pub constant: bool,
    pub declared_type: VarType,
    pub value: Expr,
    pub span: Span,
}

// ──────────────────────────────────────────────
// Statements
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Statements {
    pub items: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Statement {
    Print {
        value: Expr,
        newline: bool,
        span: Span,
    },
    Prompt {
        identifier: String,
        prompt: Expr,
        span: Span,
    },
    Declaration(Declaration),
    Modify {
        identifier: String,
        value: Expr,
        span: Span,
    },
    ArrayModify {
        identifier: String,
        index: Expr,
        value: Expr,
        span: Span,
    },
    If {
        conditions: Vec<Condition>,
        span: Span,
    },
    While {
        condition: Expr,
        body: Statements,
        span: Span,
    },
    ForRange {
        var_name: String,
        var_type: VarType,
        range_start: Expr,
        range_end: Expr,
        body: Statements,
        span: Span,
    },
    ForEach {
        var_name: String,
        var_type: VarType,
        collection: String,
        body: Statements,
        span: Span,
    },
    Call {
        identifier: String,
        args: Vec<Expr>,
        span: Span,
    },
    Return {
        value: Expr,
        span: Span,
    },
    Unary {
        identifier: String,
        increment: bool,
        span: Span,
    },
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Declaration(d) => d.span,
            Statement::Print { span, .. }
            | Statement::Prompt { span, .. }
            | Statement::Modify { span, .. }
            | Statement::ArrayModify { span, .. }
            | Statement::If { span, .. }
            | Statement::While { span, .. }
            | Statement::ForRange { span, .. }
            | Statement::ForEach { span, .. }
            | Statement::Call { span, .. }
            | Statement::Return { span, .. }
            | Statement::Unary { span, .. } => *span,
        }
    }
}

/// One `if`/`otherwise` clause. `condition` is `None` only for a trailing
/// plain `Otherwise`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub condition: Option<Expr>,
    pub body: Statements,
}

// ──────────────────────────────────────────────
// Expressions
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Gte,
    Lte,
    Gt,
    Lt,
    Neq,
    Eq,
}

impl BinaryOp {
    pub fn category(self) -> BinaryCategory {
        match self {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
                BinaryCategory::Arithmetic
            }
            _ => BinaryCategory::Relational,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryCategory {
    Arithmetic,
    Relational,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expr {
    /// `raw` is the literal exactly as written, quotes included.
    Literal {
        value_type: LiteralType,
        raw: String,
        span: Span,
    },
    /// Keys are 1-based element indices.
    LiteralArray {
        element_type: VarType,
        elements: BTreeMap<usize, Expr>,
        span: Span,
    },
    Identifier {
        name: String,
        span: Span,
    },
    IndexedIdentifier {
        collection: String,
        index: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        category: BinaryCategory,
        span: Span,
    },
    Call {
        identifier: String,
        args: Vec<Expr>,
        span: Span,
    },
    Null {
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::LiteralArray { span, .. }
            | Expr::Identifier { span, .. }
            | Expr::IndexedIdentifier { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Call { span, .. }
            | Expr::Null { span } => *span,
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        let span = left.span().to(right.span());
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
            category: op.category(),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_types() {
        assert!(VarType::NumberArray.is_array());
        assert!(!VarType::Character.is_array());
        assert_eq!(VarType::StringArray.element_type(), VarType::String);
        assert_eq!(VarType::Number.element_type(), VarType::Number);
        assert_eq!(VarType::BooleanArray.literal_type(), None);
    }

    #[test]
    fn defaults() {
        let span = Span::default();
        match VarType::Number.default_literal(span) {
            Expr::Literal { value_type, raw, .. } => {
                assert_eq!(value_type, LiteralType::Number);
                assert_eq!(raw, "0");
            }
            other => panic!("unexpected {other:?}"),
        }
        match VarType::StringArray.default_literal(span) {
            Expr::LiteralArray {
                element_type,
                elements,
                ..
            } => {
                assert_eq!(element_type, VarType::String);
                assert!(elements.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn binary_span_covers_operands() {
        let left = Expr::Identifier {
            name: "a".into(),
            span: Span::new(4, 1),
        };
        let right = Expr::Literal {
            value_type: LiteralType::Number,
            raw: "10".into(),
            span: Span::new(11, 2),
        };
        let e = Expr::binary(left, BinaryOp::Gt, right);
        assert_eq!(e.span(), Span::new(4, 9));
        assert!(matches!(
            e,
            Expr::Binary {
                category: BinaryCategory::Relational,
                ..
            }
        ));
    }

    #[test]
    fn serializes_with_kind_tags() {
        let e = Expr::Identifier {
            name: "Spike".into(),
            span: Span::new(0, 5),
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["kind"], "Identifier");
        assert_eq!(v["name"], "Spike");
        assert_eq!(v["span"]["length"], 5);
    }
}
