//! Tokens shared by every lexer stage and the parser.
//!
//! A [`Token`] is created by the scanner as an untyped atom and receives its
//! [`TokenKind`] from the classifier or the phrase recognizer. Offsets are
//! byte offsets into the source text and are only used for diagnostics.

use std::fmt;

use serde::Serialize;

// ──────────────────────────────────────────────
// Token kinds
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Scanner output before classification.
    Unknown,
    /// A literal word (or fused run of words) that is not an idiom.
    Identifier,
    Punctuation,
    Newline,
    Whitespace,
    EndOfFile,

    CommentParen,
    CommentPostscript,

    String,
    Character,
    Number,
    Boolean,
    Null,

    ReportHeader,
    ReportFooter,

    FunctionHeader,
    FunctionMain,
    FunctionFooter,
    FunctionReturn,
    FunctionParameter,

    /// `I quickly said`: no trailing newline.
    Print,
    /// `I said`: trailing newline.
    PrintNewline,
    Prompt,
    FunctionCall,

    Declaration,
    Modify,

    TypeBoolean,
    TypeBooleanArray,
    TypeNumber,
    TypeNumberArray,
    TypeString,
    TypeStringArray,
    TypeChar,

    OperatorEq,
    OperatorNeq,
    OperatorGt,
    OperatorGte,
    OperatorLt,
    OperatorLte,

    OperatorAddInfix,
    OperatorAddPrefix,
    OperatorSubInfix,
    OperatorSubPrefix,
    OperatorMulInfix,
    OperatorMulPrefix,
    OperatorDivInfix,
    OperatorDivPrefix,
    OperatorModInfix,
    OperatorModPrefix,

    UnaryIncrementPrefix,
    UnaryIncrementPostfix,
    UnaryDecrementPrefix,
    UnaryDecrementPostfix,

    KeywordAnd,
    KeywordOr,
    KeywordOf,
    KeywordConst,
    KeywordThen,
    KeywordReturn,
    KeywordStatementEnd,
    KeywordIn,
    KeywordFrom,
    KeywordTo,

    IfClause,
    ElseClause,
    IfEndClause,
    WhileClause,
    ForEveryClause,
}

impl TokenKind {
    /// Stable label used in diagnostics and token dumps.
    pub fn label(self) -> &'static str {
        use TokenKind::*;
        match self {
            Unknown => "UNKNOWN",
            Identifier => "IDENTIFIER",
            Punctuation => "PUNCTUATION",
            Newline => "NEWLINE",
            Whitespace => "WHITESPACE",
            EndOfFile => "EOF",
            CommentParen => "COMMENT",
            CommentPostscript => "COMMENT(POSTSCRIPT)",
            String => "LITERAL(STRING)",
            Character => "LITERAL(CHARACTER)",
            Number => "LITERAL(NUMBER)",
            Boolean => "LITERAL(BOOL)",
            Null => "NULL",
            ReportHeader => "REPORT(HEADER)",
            ReportFooter => "REPORT(FOOTER)",
            FunctionHeader => "FUNCTION(HEADER)",
            FunctionMain => "FUNCTION(MAIN)",
            FunctionFooter => "FUNCTION(FOOTER)",
            FunctionReturn => "FUNCTION(RETURN)",
            FunctionParameter => "FUNCTION(PARAMETER)",
            Print => "PRINT",
            PrintNewline => "PRINT(NEWLINE)",
            Prompt => "PROMPT",
            FunctionCall => "FUNCTION(CALL)",
            Declaration => "VARIABLE(DECLARATION)",
            Modify => "VARIABLE(MODIFY)",
            TypeBoolean => "TYPE(BOOLEAN)",
            TypeBooleanArray => "TYPE(BOOLEAN_ARRAY)",
            TypeNumber => "TYPE(NUMBER)",
            TypeNumberArray => "TYPE(NUMBER_ARRAY)",
            TypeString => "TYPE(STRING)",
            TypeStringArray => "TYPE(STRING_ARRAY)",
            TypeChar => "TYPE(CHARACTER)",
            OperatorEq => "OPERATOR(EQ)",
            OperatorNeq => "OPERATOR(NEQ)",
            OperatorGt => "OPERATOR(GT)",
            OperatorGte => "OPERATOR(GTE)",
            OperatorLt => "OPERATOR(LT)",
            OperatorLte => "OPERATOR(LTE)",
            OperatorAddInfix => "OPERATOR(ADD_INFIX)",
            OperatorAddPrefix => "OPERATOR(ADD_PREFIX)",
            OperatorSubInfix => "OPERATOR(SUB_INFIX)",
            OperatorSubPrefix => "OPERATOR(SUB_PREFIX)",
            OperatorMulInfix => "OPERATOR(MUL_INFIX)",
            OperatorMulPrefix => "OPERATOR(MUL_PREFIX)",
            OperatorDivInfix => "OPERATOR(DIV_INFIX)",
            OperatorDivPrefix => "OPERATOR(DIV_PREFIX)",
            OperatorModInfix => "OPERATOR(MOD_INFIX)",
            OperatorModPrefix => "OPERATOR(MOD_PREFIX)",
            UnaryIncrementPrefix => "UNARY(INCREMENT(PREFIX))",
            UnaryIncrementPostfix => "UNARY(INCREMENT(POSTFIX))",
            UnaryDecrementPrefix => "UNARY(DECREMENT(PREFIX))",
            UnaryDecrementPostfix => "UNARY(DECREMENT(POSTFIX))",
            KeywordAnd => "AND",
            KeywordOr => "OR",
            KeywordOf => "OF",
            KeywordConst => "CONST",
            KeywordThen => "THEN",
            KeywordReturn => "RETURN",
            KeywordStatementEnd => "STATEMENT_END",
            KeywordIn => "IN",
            KeywordFrom => "FROM",
            KeywordTo => "TO",
            IfClause => "IF",
            ElseClause => "ELSE",
            IfEndClause => "IF_END",
            WhileClause => "WHILE",
            ForEveryClause => "FOR_EVERY",
        }
    }

    /// Kinds the finalizer strips before the parser runs.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Whitespace | TokenKind::CommentParen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ──────────────────────────────────────────────
// Token
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub start: usize,
    pub length: usize,
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(start: usize, text: impl Into<String>, kind: TokenKind) -> Self {
        let text = text.into();
        Token {
            start,
            length: text.len(),
            kind,
            text,
        }
    }

    /// Zero-length sentinel closing every finalized stream.
    pub fn end_of_file(start: usize) -> Self {
        Token {
            start,
            length: 0,
            kind: TokenKind::EndOfFile,
            text: String::new(),
        }
    }

    /// Byte offset one past the token.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_punctuation(&self, text: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == text
    }

    /// Concatenate `other` onto this token, keeping this token's start.
    pub fn append(&mut self, other: &Token) {
        self.text.push_str(&other.text);
        self.length += other.length;
    }
}

/// Merge `tokens` into one token: text concatenated, lengths summed, first
/// start kept. Returns `None` for an empty slice.
pub fn merge_tokens(tokens: &[Token], kind: TokenKind) -> Option<Token> {
    let (first, rest) = tokens.split_first()?;
    let mut merged = first.clone();
    for t in rest {
        merged.append(t);
    }
    merged.kind = kind;
    Some(merged)
}
