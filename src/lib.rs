#![forbid(unsafe_code)]
//! balsa command-line tooling.
//!
//! The parser itself lives in `balsa_syntax`; this crate wraps it in a CLI that dumps tokens,
//! prints concrete syntax trees as an outline or JSON, renders diagnostics against the
//! source, and prints the vocabulary reference.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a parser bug (logic error), use
//!   `.expect("INVARIANT: reason")` with a clear explanation.

pub mod cli;
pub mod reference;
pub mod render;

pub use balsa_syntax::diagnostics;
pub use balsa_syntax::lexer;
pub use balsa_syntax::parser;
pub use balsa_syntax::{EntryContext, ParserConfig, SyntaxKind, SyntaxNode, SyntaxTree};

/// The balsa version string (for example, `0.1.0-alpha.1`).
pub const BALSA_VERSION: &str = env!("CARGO_PKG_VERSION");
