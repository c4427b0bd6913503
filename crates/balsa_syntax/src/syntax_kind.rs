//! The closed set of kinds tagging every token and every CST node.
//!
//! Token kinds reuse the registry ids from `balsa_core::lang`, so the parser never compares
//! spellings. Node kinds name the grammar shape an [`crate::node::InnerNode`] was built for.

use balsa_core::lang::keywords::{self, KeywordId};
use balsa_core::lang::operators::{self, OperatorId};
use balsa_core::lang::punctuation::{self, PunctuationId};

/// Kind of a token or CST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    // ========== Tokens (ID-based vocabulary) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Tokens (data-bearing) ==========
    Identifier,
    DecimalIntegerLiteral,
    HexIntegerLiteral,
    DecimalFloatingPointLiteral,
    StringLiteral,
    /// A character sequence the lexer could not classify.
    Invalid,
    Eof,

    // ========== Module level ==========
    ModulePart,
    ImportDecl,
    ImportOrgName,
    ModuleName,
    ImportVersion,
    ImportPrefix,
    TypeDefinition,

    // ========== Functions ==========
    FunctionDefinition,
    ObjectMethod,
    ReturnTypeDescriptor,
    FunctionBodyBlock,
    ExternalFunctionBody,
    RequiredParam,
    DefaultableParam,
    RestParam,

    // ========== Type descriptors ==========
    SimpleType,
    QualifiedIdentifier,
    RecordTypeDescriptor,
    RecordField,
    RecordFieldWithDefault,
    RecordRestType,
    TypeReference,
    ObjectTypeDescriptor,
    ObjectField,

    // ========== Statements ==========
    VarDeclStatement,
    AssignmentStatement,
    CompoundAssignmentStatement,
    CallStatement,
    IfElseStatement,
    ElseBlock,
    BlockStatement,
    WhileStatement,
    ReturnStatement,

    // ========== Expressions ==========
    BinaryExpression,
    UnaryExpression,
    BracedExpression,
    TypeCastExpression,
    CheckExpression,
    FunctionCall,
    MethodCall,
    FieldAccess,
    MemberAccess,
    PositionalArg,
    NamedArg,
    RestArg,
    BasicLiteral,

    // ========== Structural ==========
    /// Ordered repetition of children (statements, parameters with their separators, ...).
    List,
    /// Placeholder for an absent optional child; always has zero children.
    None,
}

impl SyntaxKind {
    /// Return `true` for kinds produced by the lexer.
    pub fn is_token(self) -> bool {
        matches!(
            self,
            SyntaxKind::Keyword(_)
                | SyntaxKind::Operator(_)
                | SyntaxKind::Punctuation(_)
                | SyntaxKind::Identifier
                | SyntaxKind::DecimalIntegerLiteral
                | SyntaxKind::HexIntegerLiteral
                | SyntaxKind::DecimalFloatingPointLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::Invalid
                | SyntaxKind::Eof
        )
    }

    /// Return `true` for kinds that tag inner CST nodes.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Return the canonical spelling for vocabulary tokens, `None` for everything else.
    pub fn spelling(self) -> Option<&'static str> {
        match self {
            SyntaxKind::Keyword(id) => Some(keywords::as_str(id)),
            SyntaxKind::Operator(id) => Some(operators::as_str(id)),
            SyntaxKind::Punctuation(id) => Some(punctuation::as_str(id)),
            _ => None,
        }
    }

    /// Human-readable description used in diagnostics (`missing ')'`, `missing identifier`).
    pub fn describe(self) -> String {
        if let Some(spelling) = self.spelling() {
            return format!("'{spelling}'");
        }
        match self {
            SyntaxKind::Identifier => "identifier".to_string(),
            SyntaxKind::DecimalIntegerLiteral | SyntaxKind::HexIntegerLiteral => "integer literal".to_string(),
            SyntaxKind::DecimalFloatingPointLiteral => "floating point literal".to_string(),
            SyntaxKind::StringLiteral => "string literal".to_string(),
            SyntaxKind::Eof => "end of input".to_string(),
            SyntaxKind::Invalid => "invalid token".to_string(),
            other => other.name().to_ascii_lowercase().replace('_', " "),
        }
    }

    /// Upper-case name used by tree dumps and the JSON rendering.
    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::Keyword(_) => "KEYWORD",
            SyntaxKind::Operator(_) => "OPERATOR",
            SyntaxKind::Punctuation(_) => "PUNCTUATION",
            SyntaxKind::Identifier => "IDENTIFIER",
            SyntaxKind::DecimalIntegerLiteral => "DECIMAL_INTEGER_LITERAL",
            SyntaxKind::HexIntegerLiteral => "HEX_INTEGER_LITERAL",
            SyntaxKind::DecimalFloatingPointLiteral => "DECIMAL_FLOATING_POINT_LITERAL",
            SyntaxKind::StringLiteral => "STRING_LITERAL",
            SyntaxKind::Invalid => "INVALID",
            SyntaxKind::Eof => "EOF",
            SyntaxKind::ModulePart => "MODULE_PART",
            SyntaxKind::ImportDecl => "IMPORT_DECL",
            SyntaxKind::ImportOrgName => "IMPORT_ORG_NAME",
            SyntaxKind::ModuleName => "MODULE_NAME",
            SyntaxKind::ImportVersion => "IMPORT_VERSION",
            SyntaxKind::ImportPrefix => "IMPORT_PREFIX",
            SyntaxKind::TypeDefinition => "TYPE_DEFINITION",
            SyntaxKind::FunctionDefinition => "FUNCTION_DEFINITION",
            SyntaxKind::ObjectMethod => "OBJECT_METHOD",
            SyntaxKind::ReturnTypeDescriptor => "RETURN_TYPE_DESCRIPTOR",
            SyntaxKind::FunctionBodyBlock => "FUNCTION_BODY_BLOCK",
            SyntaxKind::ExternalFunctionBody => "EXTERNAL_FUNCTION_BODY",
            SyntaxKind::RequiredParam => "REQUIRED_PARAM",
            SyntaxKind::DefaultableParam => "DEFAULTABLE_PARAM",
            SyntaxKind::RestParam => "REST_PARAM",
            SyntaxKind::SimpleType => "SIMPLE_TYPE",
            SyntaxKind::QualifiedIdentifier => "QUALIFIED_IDENTIFIER",
            SyntaxKind::RecordTypeDescriptor => "RECORD_TYPE_DESCRIPTOR",
            SyntaxKind::RecordField => "RECORD_FIELD",
            SyntaxKind::RecordFieldWithDefault => "RECORD_FIELD_WITH_DEFAULT",
            SyntaxKind::RecordRestType => "RECORD_REST_TYPE",
            SyntaxKind::TypeReference => "TYPE_REFERENCE",
            SyntaxKind::ObjectTypeDescriptor => "OBJECT_TYPE_DESCRIPTOR",
            SyntaxKind::ObjectField => "OBJECT_FIELD",
            SyntaxKind::VarDeclStatement => "VAR_DECL_STATEMENT",
            SyntaxKind::AssignmentStatement => "ASSIGNMENT_STATEMENT",
            SyntaxKind::CompoundAssignmentStatement => "COMPOUND_ASSIGNMENT_STATEMENT",
            SyntaxKind::CallStatement => "CALL_STATEMENT",
            SyntaxKind::IfElseStatement => "IF_ELSE_STATEMENT",
            SyntaxKind::ElseBlock => "ELSE_BLOCK",
            SyntaxKind::BlockStatement => "BLOCK_STATEMENT",
            SyntaxKind::WhileStatement => "WHILE_STATEMENT",
            SyntaxKind::ReturnStatement => "RETURN_STATEMENT",
            SyntaxKind::BinaryExpression => "BINARY_EXPRESSION",
            SyntaxKind::UnaryExpression => "UNARY_EXPRESSION",
            SyntaxKind::BracedExpression => "BRACED_EXPRESSION",
            SyntaxKind::TypeCastExpression => "TYPE_CAST_EXPRESSION",
            SyntaxKind::CheckExpression => "CHECK_EXPRESSION",
            SyntaxKind::FunctionCall => "FUNCTION_CALL",
            SyntaxKind::MethodCall => "METHOD_CALL",
            SyntaxKind::FieldAccess => "FIELD_ACCESS",
            SyntaxKind::MemberAccess => "MEMBER_ACCESS",
            SyntaxKind::PositionalArg => "POSITIONAL_ARG",
            SyntaxKind::NamedArg => "NAMED_ARG",
            SyntaxKind::RestArg => "REST_ARG",
            SyntaxKind::BasicLiteral => "BASIC_LITERAL",
            SyntaxKind::List => "LIST",
            SyntaxKind::None => "NONE",
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}
