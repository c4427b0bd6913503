impl<S: TokenSource> Parser<S> {
    /// Parse a whole file.
    pub fn parse(self) -> SyntaxTree {
        self.parse_entry(EntryContext::CompilationUnit)
    }

    /// Parse starting from `entry`.
    ///
    /// ## Notes
    /// - Fragment entries stop after one node. Anything left before end of input is discarded,
    ///   one diagnostic per token, and becomes the invalid prefix of
    ///   [`SyntaxTree::end_of_input`].
    pub fn parse_entry(mut self, entry: EntryContext) -> SyntaxTree {
        self.contexts = ContextStack::seeded(entry.seed());
        let root = match entry {
            EntryContext::CompilationUnit => self.parse_compilation_unit(),
            EntryContext::TopLevelNode => self.parse_top_level_node(),
            EntryContext::Statement => self.parse_statement(),
            EntryContext::Expression => self.parse_expression(Precedence::LOWEST),
        };

        let end_of_input = if entry == EntryContext::CompilationUnit {
            None
        } else {
            while self.peek_kind() != SyntaxKind::Eof {
                self.discard_token();
            }
            let eof = self.tokens.consume();
            Some(factory::leaf(eof, mem::take(&mut self.invalid)))
        };

        tracing::debug!(
            ?entry,
            diagnostics = self.diagnostics.len(),
            "parse finished"
        );
        SyntaxTree {
            root,
            end_of_input,
            diagnostics: self.diagnostics.into_vec(),
        }
    }
}

/// Parse a source file into a [`SyntaxTree`].
///
/// This is the main public entrypoint for parsing.
pub fn parse(source: &str) -> SyntaxTree {
    parse_entry(source, EntryContext::CompilationUnit)
}

/// Parse `source` starting from `entry`.
#[tracing::instrument(skip_all, fields(source_len = source.len(), ?entry))]
pub fn parse_entry(source: &str, entry: EntryContext) -> SyntaxTree {
    Parser::new(TokenReader::new(source)).parse_entry(entry)
}

/// Parse a pre-lexed token stream starting from `entry`.
///
/// ## Parameters
/// - `tokens`: tokens in source order. Tokens after the first end-of-input token are ignored; one
///   is synthesized when missing.
#[tracing::instrument(skip_all, fields(token_count = tokens.len(), ?entry))]
pub fn parse_tokens(tokens: Vec<Token>, entry: EntryContext) -> SyntaxTree {
    Parser::new(TokenBuffer::new(tokens)).parse_entry(entry)
}
