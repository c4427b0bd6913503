/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek_kind`, `consume`, `discard_token`)
/// - Expecting single tokens with recovery (`expect`)
/// - Context push/pop (`with_context`) and the nesting bound
///
/// Most functions in this file are internal (`fn`) and are documented primarily
/// to aid maintenance and onboarding.
impl<S: TokenSource> Parser<S> {
    // ========================================================================
    // Lookahead
    // ========================================================================

    fn peek_kind(&mut self) -> SyntaxKind {
        self.tokens.peek(1).kind
    }

    /// Kind of the `k`-th lookahead token (1 is the next token).
    fn peek_kind_at(&mut self, k: usize) -> SyntaxKind {
        self.tokens.peek(k).kind
    }

    fn at_keyword(&mut self, id: KeywordId) -> bool {
        self.peek_kind().is_keyword(id)
    }

    fn at_punct(&mut self, id: PunctuationId) -> bool {
        self.peek_kind().is_punctuation(id)
    }

    fn at_op(&mut self, id: OperatorId) -> bool {
        self.peek_kind().is_operator(id)
    }

    /// Byte offset where the next token starts; missing leaves are placed here.
    fn next_offset(&mut self) -> usize {
        self.tokens.peek(1).span.start
    }

    // ========================================================================
    // Building leaves
    // ========================================================================

    /// Consume the next token into a leaf, attaching any pending invalid tokens.
    fn consume(&mut self) -> SyntaxNode {
        let token = self.tokens.consume();
        factory::token(token, mem::take(&mut self.invalid))
    }

    /// Consume the token a leaf context stands for, recovering when it is not next.
    ///
    /// ## Notes
    /// - When a dispatch point already reported this kind as missing at this position, the leaf
    ///   is synthesized silently.
    fn expect(&mut self, ctx: RuleContext) -> SyntaxNode {
        let Some(kind) = recovery::leaf_kind(ctx) else {
            panic!("INVARIANT: expect called with non-leaf context {ctx:?}");
        };
        if self.peek_kind() == kind {
            return self.consume();
        }
        let position = self.tokens.position();
        if self.recovery.take_pending(position, kind) {
            return self.synthesize(kind);
        }
        self.recover(ctx, &[]).into_node()
    }

    /// Zero-width leaf of `kind` at the next token, without a diagnostic.
    fn synthesize(&mut self, kind: SyntaxKind) -> SyntaxNode {
        let position = self.tokens.position();
        self.recovery.take_pending(position, kind);
        let at = self.next_offset();
        factory::missing(kind, at, mem::take(&mut self.invalid))
    }

    /// Drop the next token from the tree proper; it becomes part of the next leaf's invalid
    /// prefix.
    fn discard_token(&mut self) {
        let token = self.tokens.consume();
        self.report(SyntaxDiagnostic::invalid_token(&token.text, token.span));
        self.invalid.push(token);
    }

    /// [`Parser::discard_token`], with `note` on the diagnostic.
    fn discard_token_noted(&mut self, note: String) {
        let token = self.tokens.consume();
        self.report(SyntaxDiagnostic::invalid_token(&token.text, token.span).with_note(note));
        self.invalid.push(token);
    }

    // ========================================================================
    // Contexts and diagnostics
    // ========================================================================

    /// Run `f` with `ctx` pushed on the context stack.
    fn with_context<T>(&mut self, ctx: RuleContext, f: impl FnOnce(&mut Self) -> T) -> T {
        self.contexts.push(ctx);
        let out = f(self);
        self.contexts.pop(ctx);
        out
    }

    /// Return `true` once the context stack reached the configured bound.
    fn at_depth_limit(&self) -> bool {
        self.contexts.depth() >= self.config.max_nesting_depth
    }

    fn report(&mut self, diagnostic: SyntaxDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report a well-formed `node` that is not allowed where it appears.
    fn report_invalid_node(&mut self, node: &SyntaxNode, message: &str) {
        let span = match node.span() {
            Some(span) => span,
            None => Span::empty_at(self.next_offset()),
        };
        self.report(SyntaxDiagnostic::invalid_node(message, span));
    }

    /// Kinds of the two lookahead tokens and the current position, as recovery reads them.
    fn lookahead(&mut self) -> (SyntaxKind, SyntaxKind, usize) {
        let token = self.tokens.peek(1).kind;
        let next = self.tokens.peek(2).kind;
        (token, next, self.tokens.position())
    }
}

/// Plain names that may be called: `foo` or `mod:foo`.
fn is_name_reference(node: &SyntaxNode) -> bool {
    matches!(node.kind(), SyntaxKind::Identifier | SyntaxKind::QualifiedIdentifier)
}
