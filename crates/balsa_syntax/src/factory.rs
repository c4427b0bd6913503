//! Syntax tree node factory.
//!
//! Every CST node is created here. Fixed-shape kinds have a known slot count which is checked
//! in debug builds, so a grammar rule that forgets a `None` placeholder fails its tests instead
//! of producing a tree that consumers index incorrectly.

use crate::lexer::Token;
use crate::node::{InnerNode, SyntaxNode, SyntaxToken};
use crate::span::Span;
use crate::syntax_kind::SyntaxKind;

/// Leaf for a consumed token, carrying the tokens discarded right before it.
pub fn token(token: Token, invalid: Vec<Token>) -> SyntaxNode {
    SyntaxNode::Token(leaf(token, invalid))
}

/// Bare leaf, for callers that hold tokens outside a tree (the end-of-input leaf of a fragment).
pub fn leaf(token: Token, invalid: Vec<Token>) -> SyntaxToken {
    SyntaxToken {
        kind: token.kind,
        text: token.text,
        span: token.span,
        missing: false,
        invalid,
    }
}

/// Zero-width placeholder for a token of `kind` that the input lacks, at byte offset `at`.
pub fn missing(kind: SyntaxKind, at: usize, invalid: Vec<Token>) -> SyntaxNode {
    debug_assert!(kind.is_token(), "missing leaf for node kind {kind:?}");
    SyntaxNode::Token(SyntaxToken {
        kind,
        text: String::new(),
        span: Span::empty_at(at),
        missing: true,
        invalid,
    })
}

/// Inner node of `kind` over `children`.
pub fn node(kind: SyntaxKind, children: Vec<SyntaxNode>) -> SyntaxNode {
    debug_assert!(kind.is_node(), "inner node for token kind {kind:?}");
    if let Some(slots) = slot_count(kind) {
        debug_assert_eq!(children.len(), slots, "{kind:?} built with the wrong number of children");
    }
    SyntaxNode::Inner(InnerNode { kind, children })
}

/// Ordered repetition.
pub fn list(children: Vec<SyntaxNode>) -> SyntaxNode {
    node(SyntaxKind::List, children)
}

/// Placeholder for an absent optional child.
pub fn empty() -> SyntaxNode {
    node(SyntaxKind::None, Vec::new())
}

/// Number of children a fixed-shape node has, or `None` for variable-length kinds.
///
/// ## Notes
/// - Slot order is the source order of the production, e.g. `FUNCTION_CALL` is
///   `[name, '(', args, ')']`.
pub fn slot_count(kind: SyntaxKind) -> Option<usize> {
    use SyntaxKind as K;
    let slots = match kind {
        K::ModulePart => 3,
        K::ImportDecl => 6,
        K::ImportOrgName | K::ImportVersion | K::ImportPrefix => 2,
        K::TypeDefinition => 5,
        K::FunctionDefinition | K::ObjectMethod => 8,
        K::ReturnTypeDescriptor => 2,
        K::FunctionBodyBlock | K::ExternalFunctionBody => 3,
        K::RequiredParam => 3,
        K::DefaultableParam => 5,
        K::RestParam => 4,
        K::SimpleType => 1,
        K::QualifiedIdentifier => 3,
        K::RecordTypeDescriptor => 5,
        K::RecordField => 4,
        K::RecordFieldWithDefault => 5,
        K::RecordRestType | K::TypeReference => 3,
        K::ObjectTypeDescriptor => 5,
        K::ObjectField => 6,
        K::VarDeclStatement => 5,
        K::AssignmentStatement | K::CompoundAssignmentStatement => 4,
        K::CallStatement => 2,
        K::IfElseStatement => 4,
        K::ElseBlock => 2,
        K::BlockStatement | K::WhileStatement | K::ReturnStatement => 3,
        K::BinaryExpression | K::BracedExpression => 3,
        K::UnaryExpression | K::CheckExpression => 2,
        K::TypeCastExpression => 4,
        K::FunctionCall => 4,
        K::MethodCall => 6,
        K::FieldAccess => 3,
        K::MemberAccess => 4,
        K::PositionalArg | K::BasicLiteral => 1,
        K::NamedArg => 3,
        K::RestArg => 2,
        K::None => 0,
        // `ModuleName`, `List` and token kinds
        _ => return None,
    };
    Some(slots)
}
