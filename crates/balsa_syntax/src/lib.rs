//! Error-tolerant syntax frontend for the balsa language: lexer, token sources, concrete syntax
//! tree, diagnostics and the recovering recursive-descent parser.
//!
//! This crate is dependency-light and intended for reuse by the compiler front end and by editor
//! tooling that has to make sense of code while it is being typed.
//!
//! ## Notes
//! - A parse never fails. Every input produces a complete [`SyntaxTree`] whose leaves, together
//!   with the skipped tokens attached to them, reproduce the token stream exactly.
//! - Missing tokens are synthesized as zero-width leaves; unexpected tokens are kept as the
//!   invalid prefix of the next leaf. Both produce a [`diagnostics::SyntaxDiagnostic`].
//! - Vocabulary identity (keywords/operators/punctuation) comes from `balsa_core::lang` registries.
//!
//! ## Panic Policy
//! - Malformed input never panics. A panic prefixed with `INVARIANT:` means a grammar rule was
//!   reached from recovery without a resume entry, which is a bug in this crate.
//!
//! ## Examples
//! ```rust
//! use balsa_syntax::{parser, SyntaxKind};
//!
//! let tree = parser::parse("function main() { foo(); }");
//! assert!(tree.diagnostics.is_empty());
//! assert_eq!(tree.root.kind(), SyntaxKind::ModulePart);
//! ```

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod factory;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod recovery;
pub mod span;
pub mod syntax_kind;
pub mod token_helpers;

pub use config::ParserConfig;
pub use node::{SyntaxNode, SyntaxToken};
pub use parser::{EntryContext, Parser, SyntaxTree, parse, parse_entry, parse_tokens};
pub use span::Span;
pub use syntax_kind::SyntaxKind;
