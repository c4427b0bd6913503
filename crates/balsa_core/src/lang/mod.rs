//! balsa language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators
//! and punctuation.
//!
//! The design goal is to avoid stringly-typed checks scattered across the parser/tooling.
//! Instead, callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up
//! spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no syntax-tree types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use
//!   (diagnostics, precedence climbing, highlighting).
//!
//! ## Examples
//! ```rust
//! use balsa_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("function"), Some(KeywordId::Function));
//! assert_eq!(keywords::as_str(KeywordId::If), "if");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
