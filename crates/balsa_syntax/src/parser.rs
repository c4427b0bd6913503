//! Error-tolerant recursive-descent parser for balsa.
//!
//! Converts a [`TokenSource`] into a lossless concrete syntax tree. Parsing never fails: where the
//! input deviates from the grammar, the [`RecoveryEngine`] either synthesizes the missing token or
//! discards the offending one, and a diagnostic is recorded.
//!
//! ## Examples
//!
//! ```rust
//! use balsa_syntax::{parser, SyntaxKind};
//!
//! let tree = parser::parse("function f(int x { return x; }");
//! assert_eq!(tree.root.kind(), SyntaxKind::ModulePart);
//! assert_eq!(tree.diagnostics.len(), 1);
//! assert_eq!(tree.diagnostics[0].message, "missing ')'");
//! ```

use std::mem;

use balsa_core::lang::keywords::KeywordId;
use balsa_core::lang::operators::{OperatorId, Precedence};
use balsa_core::lang::punctuation::PunctuationId;

use crate::config::ParserConfig;
use crate::context::{ContextStack, RuleContext};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink, ResumeError, SyntaxDiagnostic};
use crate::factory;
use crate::lexer::{LexerMode, Token, TokenBuffer, TokenReader, TokenSource};
use crate::node::{SyntaxNode, SyntaxToken};
use crate::recovery::{self, Action, Decision, Probe, RecoveryEngine, RecoveryInput, Solution};
use crate::span::Span;
use crate::syntax_kind::SyntaxKind;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/resume.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
