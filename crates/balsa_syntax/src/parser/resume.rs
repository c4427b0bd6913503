/// Recovery and resumption.
///
/// Rules call [`Parser::recover`] when the next token does not fit. A REMOVE discards tokens and,
/// for resumable contexts, re-enters the rule through [`Parser::resume_parsing`] with the nodes the
/// rule had already built. An INSERT leaves the cursor in place: leaf contexts get a missing leaf,
/// dispatch points get the kind to re-dispatch on.
impl<S: TokenSource> Parser<S> {
    /// Recover at `ctx`.
    ///
    /// ## Parameters
    /// - `ctx`: the leaf or dispatch context the rule is stuck at.
    /// - `partial`: nodes the rule has already built, in the order [`Parser::resume_parsing`]
    ///   takes them. Only cloned when a REMOVE resumes the rule.
    ///
    /// ## Panics
    /// - If a resumable context cannot be resumed with `partial`; the rule passed the wrong number
    ///   of nodes.
    fn recover(&mut self, ctx: RuleContext, partial: &[SyntaxNode]) -> Solution {
        let (token, next, position) = self.lookahead();
        let decision = self.recovery.decide(RecoveryInput {
            ctx,
            token,
            next,
            position,
            stack: &self.contexts,
            max_depth: self.config.max_nesting_depth,
        });

        match decision {
            Decision::Insert(kind) => {
                let at = self.next_offset();
                self.report(SyntaxDiagnostic::new(
                    DiagnosticKind::MissingToken,
                    recovery::missing_message(ctx, kind),
                    Span::empty_at(at),
                ));
                let node = if ctx.is_leaf() {
                    Some(factory::missing(kind, at, mem::take(&mut self.invalid)))
                } else {
                    self.recovery.set_pending(position, kind);
                    None
                };
                Solution {
                    action: Action::Insert,
                    kind,
                    node,
                }
            }
            Decision::Remove => {
                loop {
                    self.discard_token();
                    let (token, next, position) = self.lookahead();
                    let probe = self.recovery.probe(RecoveryInput {
                        ctx,
                        token,
                        next,
                        position,
                        stack: &self.contexts,
                        max_depth: self.config.max_nesting_depth,
                    });
                    if probe != Probe::Remove {
                        break;
                    }
                }
                let node = if resume_arity(ctx).is_some() {
                    match self.resume_parsing(ctx, partial.to_vec()) {
                        Ok(node) => Some(node),
                        Err(err) => panic!("INVARIANT: {err}"),
                    }
                } else {
                    None
                };
                Solution {
                    action: Action::Remove,
                    kind: token,
                    node,
                }
            }
        }
    }

    /// Replace a self-recursive rule entered at the nesting bound.
    ///
    /// The rule is not entered. The tokens it would have covered are discarded, skipping balanced
    /// `()`, `[]`, `{}` and `{| |}` groups whole, up to the first token outside a group that
    /// resumes an enclosing rule. Expressions and type descriptors become a missing leaf;
    /// statements become `NONE`.
    ///
    /// ## Notes
    /// - The first diagnostic carries a note naming the limit.
    /// - A statement always discards at least one token. Other rules stop in place at most once
    ///   per `(position, context, depth)`, so an enclosing list never spins on one token.
    fn recover_at_depth_limit(&mut self, ctx: RuleContext) -> SyntaxNode {
        let depth = self.contexts.depth();
        tracing::debug!(?ctx, depth, "nesting bound reached");
        let mut note = Some(format!(
            "maximum nesting depth of {} exceeded",
            self.config.max_nesting_depth
        ));
        let statement = ctx == RuleContext::Statement;
        let position = self.tokens.position();
        let mut must_advance = statement || !self.recovery.record_insert(position, ctx, depth);
        let mut open_groups = 0usize;

        loop {
            let kind = self.peek_kind();
            if kind == SyntaxKind::Eof {
                break;
            }
            if open_groups == 0 && !must_advance && self.resumes_after_depth_limit(ctx, kind) {
                break;
            }
            if kind.opens_group() {
                open_groups += 1;
            } else if kind.closes_group() {
                open_groups = open_groups.saturating_sub(1);
            }
            match note.take() {
                Some(note) => self.discard_token_noted(note),
                None => self.discard_token(),
            }
            must_advance = false;
        }

        if statement {
            return factory::empty();
        }
        let kind = recovery::insertion_kind(ctx, self.peek_kind());
        let at = self.next_offset();
        let diagnostic = SyntaxDiagnostic::new(
            DiagnosticKind::MissingToken,
            recovery::missing_message(ctx, kind),
            Span::empty_at(at),
        );
        self.report(match note {
            Some(note) => diagnostic.with_note(note),
            None => diagnostic,
        });
        factory::missing(kind, at, mem::take(&mut self.invalid))
    }

    /// Whether `kind`, outside any group, lets an enclosing rule continue after a rule cut off at
    /// the nesting bound.
    fn resumes_after_depth_limit(&self, ctx: RuleContext, kind: SyntaxKind) -> bool {
        if kind.opens_group() {
            return false;
        }
        let follows = ctx != RuleContext::Statement && recovery::follows(ctx, kind);
        follows || recovery::anchored(&self.contexts, kind)
    }

    /// Re-enter the grammar at `ctx` with the nodes already built for it.
    ///
    /// ## Parameters
    /// - `ctx`: where to resume. Leaf contexts resume by expecting their token again.
    /// - `partial`: the nodes the rule had built before the context, oldest first (e.g. the
    ///   visibility, type and name of a parameter for [`RuleContext::ParameterRhs`]).
    ///
    /// ## Returns
    /// - The node the rule produces, as if it had never been interrupted.
    ///
    /// ## Errors
    /// - [`ResumeError::Unsupported`] for contexts whose rule keeps state that only lives in its
    ///   caller (lists, whole definitions, blocks).
    /// - [`ResumeError::PartialNodes`] when `partial` has the wrong length.
    pub fn resume_parsing(&mut self, ctx: RuleContext, partial: Vec<SyntaxNode>) -> Result<SyntaxNode, ResumeError> {
        use RuleContext as C;

        let expected = resume_arity(ctx).ok_or(ResumeError::Unsupported(ctx))?;
        if partial.len() != expected {
            return Err(ResumeError::PartialNodes {
                ctx,
                expected,
                found: partial.len(),
            });
        }
        tracing::trace!(?ctx, partial = expected, "resuming rule");

        let mut partial = partial.into_iter();
        let mut take = move || partial.next().unwrap_or_else(factory::empty);

        let node = match ctx {
            c if c.is_leaf() => self.expect(c),
            C::TopLevelNode => self.parse_top_level_node(),
            C::TopLevelNodeWithoutModifier => {
                let visibility = take();
                self.parse_top_level_without_modifier(visibility)
            }
            C::AfterParameterType => {
                let visibility = take();
                let ty = take();
                self.parse_after_parameter_type(visibility, ty)
            }
            C::ParameterRhs => {
                let visibility = take();
                let ty = take();
                let name = take();
                self.parse_parameter_rhs(visibility, ty, name)
            }
            C::FuncBody => self.parse_function_body(),
            C::TypeDescriptor => self.parse_type_descriptor(),
            C::RecordBodyStart => {
                let record = take();
                self.parse_record_body(record)
            }
            C::RecordField => self.parse_record_field(),
            C::FieldDescriptorRhs => {
                let ty = take();
                let name = take();
                self.parse_field_descriptor_rhs(ty, name)
            }
            C::ObjectMember => self.parse_object_member(),
            C::ObjectMemberWithoutVisibility => {
                let visibility = take();
                self.parse_object_member_without_visibility(visibility)
            }
            C::ObjectFieldRhs => {
                let visibility = take();
                let ty = take();
                let name = take();
                self.parse_object_field_rhs(visibility, ty, name)
            }
            C::Statement => self.parse_statement(),
            C::AssignmentOrVarDeclRhs => {
                let name = take();
                self.parse_statement_after_name(name)
            }
            C::VarDeclStmtRhs => {
                let ty = take();
                let name = take();
                self.parse_var_decl_rhs(ty, name)
            }
            C::ElseBody => {
                let else_kw = take();
                self.parse_else_block(else_kw)
            }
            C::ReturnStmtRhs => {
                let return_kw = take();
                self.parse_return_rhs(return_kw)
            }
            C::Expression => self.parse_expression(Precedence::LOWEST),
            C::TerminalExpression => self.parse_terminal_expression(),
            _ => return Err(ResumeError::Unsupported(ctx)),
        };
        Ok(node)
    }
}

/// Number of already-built nodes resuming at `ctx` takes, or `None` when `ctx` cannot be resumed.
fn resume_arity(ctx: RuleContext) -> Option<usize> {
    use RuleContext as C;
    if ctx.is_leaf() {
        return Some(0);
    }
    let arity = match ctx {
        C::TopLevelNode
        | C::FuncBody
        | C::TypeDescriptor
        | C::RecordField
        | C::ObjectMember
        | C::Statement
        | C::Expression
        | C::TerminalExpression => 0,
        C::TopLevelNodeWithoutModifier
        | C::RecordBodyStart
        | C::ObjectMemberWithoutVisibility
        | C::AssignmentOrVarDeclRhs
        | C::ElseBody
        | C::ReturnStmtRhs => 1,
        C::AfterParameterType | C::FieldDescriptorRhs | C::VarDeclStmtRhs => 2,
        C::ParameterRhs | C::ObjectFieldRhs => 3,
        _ => return None,
    };
    Some(arity)
}
