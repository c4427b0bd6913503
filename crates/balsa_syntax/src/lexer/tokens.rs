//! Token type produced by the lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (including simple type names)
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Tokens keep their exact source text so the CST can reproduce the input.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::span::Span;
use crate::syntax_kind::SyntaxKind;

/// A token with its kind, lexeme and source span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: SyntaxKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Construct the end-of-input token at byte offset `pos`.
    pub fn eof(pos: usize) -> Self {
        Self::new(SyntaxKind::Eof, "", Span::empty_at(pos))
    }
}
