//! Diagnostics produced while parsing.
//!
//! Diagnostics are data: the parser records them in a [`DiagnosticSink`] and keeps going.
//! [`SyntaxDiagnostic`] implements [`miette::Diagnostic`] so callers can render them against the
//! source with labelled spans.

use std::fmt;

use miette::{LabeledSpan, Severity as MietteSeverity};
use thiserror::Error;

use crate::context::RuleContext;
use crate::span::Span;
use crate::syntax_kind::SyntaxKind;

/// What went wrong, at the granularity recovery works at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An expected token was absent and a placeholder was synthesized.
    MissingToken,
    /// An unexpected token was discarded.
    InvalidToken,
    /// A well-formed construct in a position the language does not allow.
    InvalidNode,
}

impl DiagnosticKind {
    /// Stable diagnostic code.
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::MissingToken => "balsa::syntax::missing_token",
            DiagnosticKind::InvalidToken => "balsa::syntax::invalid_token",
            DiagnosticKind::InvalidNode => "balsa::syntax::invalid_node",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How serious a diagnostic is.
///
/// ## Notes
/// - Every syntax diagnostic is an error: recovery changes the tree, so nothing it reports is
///   advisory. The field keeps renderers independent of that rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
}

/// A syntax diagnostic with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxDiagnostic {
    pub message: String,
    pub span: Span,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub notes: Vec<String>,
}

impl SyntaxDiagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            severity: Severity::Error,
            notes: Vec::new(),
        }
    }

    /// `missing <kind>` at the zero-width position where the token was synthesized.
    pub fn missing(kind: SyntaxKind, at: Span) -> Self {
        Self::new(DiagnosticKind::MissingToken, format!("missing {}", kind.describe()), at)
    }

    /// `invalid token '<text>'` over the discarded token.
    pub fn invalid_token(text: &str, span: Span) -> Self {
        Self::new(DiagnosticKind::InvalidToken, format!("invalid token '{text}'"), span)
    }

    pub fn invalid_node(message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticKind::InvalidNode, message, span)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    fn label(&self) -> &'static str {
        match self.kind {
            DiagnosticKind::MissingToken => "expected here",
            DiagnosticKind::InvalidToken => "discarded",
            DiagnosticKind::InvalidNode => "not allowed here",
        }
    }
}

impl miette::Diagnostic for SyntaxDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.severity {
            Severity::Error => MietteSeverity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.notes.is_empty() {
            None
        } else {
            Some(Box::new(self.notes.join("\n")))
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new(Some(self.label().to_string()), self.span.start, self.span.len());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Per-session collector for diagnostics, in emission order.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<SyntaxDiagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: SyntaxDiagnostic) {
        tracing::trace!(kind = %diagnostic.kind, message = %diagnostic.message, "diagnostic");
        self.diagnostics.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyntaxDiagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<SyntaxDiagnostic> {
        self.diagnostics
    }
}

/// Failure of [`crate::parser::Parser::resume_parsing`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResumeError {
    /// The rule needs state that only exists while its caller runs (e.g. parameter ordering).
    #[error("parsing cannot be resumed at {0:?}")]
    Unsupported(RuleContext),
    #[error("resuming {ctx:?} needs {expected} already-parsed node(s), got {found}")]
    PartialNodes {
        ctx: RuleContext,
        expected: usize,
        found: usize,
    },
}
