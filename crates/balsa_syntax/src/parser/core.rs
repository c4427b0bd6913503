// Parser core types: the `Parser` itself, the entry points a session can start from and the
// `SyntaxTree` it produces.
//
// This file is `include!`'d into `crate::parser` to keep all parser methods in a single module
// while avoiding a single “god file”.

/// Grammar production a parse session starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryContext {
    /// A whole source file.
    CompilationUnit,
    /// One module-level declaration.
    TopLevelNode,
    /// One statement, as if inside a function body.
    Statement,
    /// One expression, as if inside a statement.
    Expression,
}

impl EntryContext {
    /// Contexts the stack is seeded with, so recovery sees the same enclosing anchors a fragment
    /// would have inside a file.
    fn seed(self) -> &'static [RuleContext] {
        match self {
            EntryContext::CompilationUnit | EntryContext::TopLevelNode => &[RuleContext::CompUnit],
            EntryContext::Statement => &[
                RuleContext::CompUnit,
                RuleContext::FuncDefinition,
                RuleContext::FuncBodyBlock,
            ],
            EntryContext::Expression => &[
                RuleContext::CompUnit,
                RuleContext::FuncDefinition,
                RuleContext::FuncBodyBlock,
                RuleContext::Statement,
            ],
        }
    }
}

/// Result of one parse session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub root: SyntaxNode,
    /// For fragment entries, the end-of-input leaf. Tokens left over after the fragment are its
    /// invalid prefix. A compilation unit keeps this leaf inside its root instead.
    pub end_of_input: Option<SyntaxToken>,
    pub diagnostics: Vec<SyntaxDiagnostic>,
}

impl SyntaxTree {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(SyntaxDiagnostic::is_error)
    }

    /// Every input token the tree accounts for, in order, without the end-of-input token.
    pub fn source_tokens(&self) -> Vec<Token> {
        let mut tokens: Vec<Token> = self
            .root
            .source_tokens()
            .into_iter()
            .filter(|t| t.kind != SyntaxKind::Eof)
            .collect();
        if let Some(eof) = &self.end_of_input {
            tokens.extend(eof.invalid.iter().cloned());
        }
        tokens
    }
}

/// Parser state for one session.
///
/// ## Notes
/// - The parser owns its token source, context stack, recovery memo and diagnostics; nothing is
///   shared between sessions.
/// - Tokens discarded by recovery wait in `invalid` until the next leaf is built, which takes
///   them as its invalid prefix.
pub struct Parser<S: TokenSource> {
    tokens: S,
    contexts: ContextStack,
    recovery: RecoveryEngine,
    diagnostics: DiagnosticSink,
    invalid: Vec<Token>,
    config: ParserConfig,
}

impl<S: TokenSource> Parser<S> {
    /// Create a parser over `tokens` with the default configuration.
    pub fn new(tokens: S) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    /// Create a parser over `tokens`.
    ///
    /// ## Parameters
    /// - `tokens`: the token source; it is read lazily and never rewound.
    /// - `config`: nesting bound and other knobs.
    pub fn with_config(tokens: S, config: ParserConfig) -> Self {
        Self {
            tokens,
            contexts: ContextStack::seeded(EntryContext::CompilationUnit.seed()),
            recovery: RecoveryEngine::new(),
            diagnostics: DiagnosticSink::new(),
            invalid: Vec::new(),
            config,
        }
    }
}
