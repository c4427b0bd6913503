//! Provide the canonical language vocabulary shared by the balsa lexer, parser and tooling.
//!
//! This crate is intentionally small and dependency-free. It contains `const` registries that
//! map stable identifiers to spellings and metadata, so the rest of the workspace never has to
//! compare raw strings to recognise a keyword or an operator.
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no syntax-tree types.
//! - Operator precedence and associativity live here so the expression parser, diagnostics and
//!   any future formatter agree on a single table.

pub mod lang;
