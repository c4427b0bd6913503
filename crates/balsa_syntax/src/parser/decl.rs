/// Module-level declarations.
///
/// This chunk parses the compilation unit and everything that can appear at module level:
/// - Imports (`import org/mod.sub version 1.2 as m;`)
/// - Function definitions, their parameter lists and bodies
/// - Type definitions (`public type Point record { int x; };`)
///
/// ## Notes
/// - Imports must precede other declarations. A misplaced import is still parsed (so the tree
///   keeps its tokens) and reported as an invalid node.
impl<S: TokenSource> Parser<S> {
    // ========================================================================
    // Compilation unit
    // ========================================================================

    /// Parse a whole file: `MODULE_PART [imports, members, eof]`.
    pub fn parse_compilation_unit(&mut self) -> SyntaxNode {
        let mut imports = Vec::new();
        while self.at_keyword(KeywordId::Import) {
            imports.push(self.parse_import_decl());
        }

        let mut members = Vec::new();
        while self.peek_kind() != SyntaxKind::Eof {
            if self.at_keyword(KeywordId::Import) {
                let import = self.parse_import_decl();
                self.report_invalid_node(&import, "imports must come before other declarations");
                members.push(import);
                continue;
            }
            let member = self.parse_top_level_node();
            if !member.is_none() {
                members.push(member);
            }
        }

        let eof = self.consume();
        factory::node(
            SyntaxKind::ModulePart,
            vec![factory::list(imports), factory::list(members), eof],
        )
    }

    /// Parse one module-level declaration.
    ///
    /// ## Returns
    /// - An empty `NONE` node at end of input.
    fn parse_top_level_node(&mut self) -> SyntaxNode {
        match self.peek_kind() {
            SyntaxKind::Eof => factory::empty(),
            SyntaxKind::Keyword(KeywordId::Public) => {
                let visibility = self.consume();
                self.parse_top_level_without_modifier(visibility)
            }
            SyntaxKind::Keyword(KeywordId::Function) => self.parse_function_definition(factory::empty()),
            SyntaxKind::Keyword(KeywordId::Type) => self.parse_type_definition(factory::empty()),
            SyntaxKind::Keyword(KeywordId::Import) => self.parse_import_decl(),
            _ => {
                let solution = self.recover(RuleContext::TopLevelNode, &[]);
                match solution.action {
                    Action::Insert => self.parse_function_definition(factory::empty()),
                    Action::Remove => solution.into_node(),
                }
            }
        }
    }

    fn parse_top_level_without_modifier(&mut self, visibility: SyntaxNode) -> SyntaxNode {
        match self.peek_kind() {
            SyntaxKind::Keyword(KeywordId::Function) => self.parse_function_definition(visibility),
            SyntaxKind::Keyword(KeywordId::Type) => self.parse_type_definition(visibility),
            _ => {
                let solution = self.recover(RuleContext::TopLevelNodeWithoutModifier, &[visibility.clone()]);
                match solution.action {
                    Action::Insert => self.parse_function_definition(visibility),
                    Action::Remove => solution.into_node(),
                }
            }
        }
    }

    // ========================================================================
    // Imports
    // ========================================================================

    /// `IMPORT_DECL [import, org, module name, version, prefix, ';']`.
    fn parse_import_decl(&mut self) -> SyntaxNode {
        self.with_context(RuleContext::ImportDecl, |p| {
            let import = p.consume();

            let org = if p.peek_kind() == SyntaxKind::Identifier && p.peek_kind_at(2).is_operator(OperatorId::Slash) {
                let name = p.consume();
                let slash = p.consume();
                factory::node(SyntaxKind::ImportOrgName, vec![name, slash])
            } else {
                factory::empty()
            };

            let mut parts = vec![p.expect(RuleContext::Identifier)];
            while p.at_punct(PunctuationId::Dot) {
                parts.push(p.consume());
                parts.push(p.expect(RuleContext::Identifier));
            }
            let module = factory::node(SyntaxKind::ModuleName, parts);

            let version = if p.at_keyword(KeywordId::Version) {
                p.parse_import_version()
            } else {
                factory::empty()
            };

            let prefix = if p.at_keyword(KeywordId::As) {
                let as_kw = p.consume();
                let name = p.expect(RuleContext::Identifier);
                factory::node(SyntaxKind::ImportPrefix, vec![as_kw, name])
            } else {
                factory::empty()
            };

            let semicolon = p.expect(RuleContext::Semicolon);
            factory::node(
                SyntaxKind::ImportDecl,
                vec![import, org, module, version, prefix, semicolon],
            )
        })
    }

    /// `version 1.2.3`: up to three numeric components, lexed in version mode.
    fn parse_import_version(&mut self) -> SyntaxNode {
        let version_kw = self.consume();
        self.tokens.switch_mode(LexerMode::Version);
        let mut parts = vec![self.expect(RuleContext::VersionNumber)];
        for _ in 0..2 {
            if !self.at_punct(PunctuationId::Dot) {
                break;
            }
            parts.push(self.consume());
            parts.push(self.expect(RuleContext::VersionNumber));
        }
        self.tokens.reset_mode();
        factory::node(SyntaxKind::ImportVersion, vec![version_kw, factory::list(parts)])
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn parse_function_definition(&mut self, visibility: SyntaxNode) -> SyntaxNode {
        let qualifiers = if visibility.is_none() { Vec::new() } else { vec![visibility] };
        self.parse_function_like(SyntaxKind::FunctionDefinition, qualifiers)
    }

    /// Shared shape of module-level functions and object methods:
    /// `[qualifiers, function, name, '(', params, ')', return type, body]`.
    fn parse_function_like(&mut self, kind: SyntaxKind, qualifiers: Vec<SyntaxNode>) -> SyntaxNode {
        self.with_context(RuleContext::FuncDefinition, |p| {
            let function = p.expect(RuleContext::FunctionKeyword);
            let name = p.expect(RuleContext::FuncName);
            let open = p.expect(RuleContext::OpenParenthesis);
            let params = p.parse_param_list();
            let close = p.expect(RuleContext::CloseParenthesis);
            let return_type = if p.at_keyword(KeywordId::Returns) {
                let returns = p.consume();
                let ty = p.parse_type_descriptor();
                factory::node(SyntaxKind::ReturnTypeDescriptor, vec![returns, ty])
            } else {
                factory::empty()
            };
            let body = p.parse_function_body();
            factory::node(
                kind,
                vec![
                    factory::list(qualifiers),
                    function,
                    name,
                    open,
                    params,
                    close,
                    return_type,
                    body,
                ],
            )
        })
    }

    /// Return `true` at a token that ends a parameter list.
    fn at_param_list_end(&mut self) -> bool {
        matches!(
            self.peek_kind(),
            SyntaxKind::Eof
                | SyntaxKind::Punctuation(
                    PunctuationId::RParen
                        | PunctuationId::RBrace
                        | PunctuationId::RBracket
                        | PunctuationId::LBrace
                        | PunctuationId::Semicolon
                )
                | SyntaxKind::Keyword(
                    KeywordId::Returns | KeywordId::Function | KeywordId::Type | KeywordId::Import
                )
        )
    }

    /// Parameters with their separating commas, flattened into one `LIST`.
    ///
    /// ## Notes
    /// - Parameter order is required, then defaultable, then one rest parameter. Out-of-order
    ///   parameters are kept and reported.
    /// - A trailing comma is accepted.
    fn parse_param_list(&mut self) -> SyntaxNode {
        self.with_context(RuleContext::ParamList, |p| {
            let mut items = Vec::new();
            let mut order = ParamOrder::Required;
            while !p.at_param_list_end() {
                let param = p.parse_parameter();
                if !param.is_none() {
                    p.check_param_order(&param, &mut order);
                    items.push(param);
                }
                if p.at_punct(PunctuationId::Comma) {
                    items.push(p.consume());
                    continue;
                }
                if p.at_param_list_end() {
                    break;
                }
                items.push(p.expect(RuleContext::Comma));
            }
            factory::list(items)
        })
    }

    fn check_param_order(&mut self, param: &SyntaxNode, order: &mut ParamOrder) {
        const AFTER_REST: &str = "cannot have more parameters after the rest parameter";
        match (param.kind(), *order) {
            (_, ParamOrder::Rest) => self.report_invalid_node(param, AFTER_REST),
            (SyntaxKind::RequiredParam, ParamOrder::Defaultable) => self.report_invalid_node(
                param,
                "cannot have a required parameter after a defaultable parameter",
            ),
            (SyntaxKind::DefaultableParam, _) => *order = ParamOrder::Defaultable,
            (SyntaxKind::RestParam, _) => *order = ParamOrder::Rest,
            _ => {}
        }
    }

    /// One parameter. Returns `NONE` when recovery leaves the cursor at the end of the list.
    fn parse_parameter(&mut self) -> SyntaxNode {
        self.with_context(RuleContext::Parameter, |p| loop {
            let kind = p.peek_kind();
            if kind.is_keyword(KeywordId::Public) {
                let visibility = p.consume();
                let ty = p.parse_type_descriptor();
                return p.parse_after_parameter_type(visibility, ty);
            }
            if kind.is_type_desc_start() {
                let ty = p.parse_type_descriptor();
                return p.parse_after_parameter_type(factory::empty(), ty);
            }
            if p.at_param_list_end() {
                return factory::empty();
            }
            let solution = p.recover(RuleContext::Parameter, &[]);
            if solution.action == Action::Insert {
                let ty = p.expect(RuleContext::TypeName);
                return p.parse_after_parameter_type(factory::empty(), ty);
            }
        })
    }

    fn parse_after_parameter_type(&mut self, visibility: SyntaxNode, ty: SyntaxNode) -> SyntaxNode {
        match self.peek_kind() {
            SyntaxKind::Identifier => {
                let name = self.consume();
                self.parse_parameter_rhs(visibility, ty, name)
            }
            SyntaxKind::Punctuation(PunctuationId::Ellipsis) => {
                let ellipsis = self.consume();
                let name = self.expect(RuleContext::VariableName);
                factory::node(SyntaxKind::RestParam, vec![visibility, ty, ellipsis, name])
            }
            _ => {
                let solution = self.recover(RuleContext::AfterParameterType, &[visibility.clone(), ty.clone()]);
                match solution.action {
                    Action::Insert => {
                        let name = self.expect(RuleContext::VariableName);
                        self.parse_parameter_rhs(visibility, ty, name)
                    }
                    Action::Remove => solution.into_node(),
                }
            }
        }
    }

    fn parse_parameter_rhs(&mut self, visibility: SyntaxNode, ty: SyntaxNode, name: SyntaxNode) -> SyntaxNode {
        if self.at_op(OperatorId::Eq) {
            let assign = self.consume();
            let default = self.parse_expression(Precedence::LOWEST);
            return factory::node(SyntaxKind::DefaultableParam, vec![visibility, ty, name, assign, default]);
        }
        if self.at_punct(PunctuationId::Comma) || self.at_param_list_end() {
            return factory::node(SyntaxKind::RequiredParam, vec![visibility, ty, name]);
        }

        let partial = [visibility.clone(), ty.clone(), name.clone()];
        let solution = self.recover(RuleContext::ParameterRhs, &partial);
        match (solution.action, solution.kind) {
            (Action::Insert, SyntaxKind::Operator(OperatorId::Eq)) => {
                let assign = self.expect(RuleContext::AssignOp);
                let default = self.parse_expression(Precedence::LOWEST);
                factory::node(SyntaxKind::DefaultableParam, vec![visibility, ty, name, assign, default])
            }
            // The comma is realized by the list loop.
            (Action::Insert, _) => factory::node(SyntaxKind::RequiredParam, vec![visibility, ty, name]),
            (Action::Remove, _) => solution.into_node(),
        }
    }

    /// `{ ... }` or `= external;`.
    fn parse_function_body(&mut self) -> SyntaxNode {
        match self.peek_kind() {
            SyntaxKind::Punctuation(PunctuationId::LBrace) => self.parse_function_body_block(),
            SyntaxKind::Operator(OperatorId::Eq) => {
                let assign = self.consume();
                let external = self.expect(RuleContext::ExternalKeyword);
                let semicolon = self.expect(RuleContext::Semicolon);
                factory::node(SyntaxKind::ExternalFunctionBody, vec![assign, external, semicolon])
            }
            _ => {
                let solution = self.recover(RuleContext::FuncBody, &[]);
                match solution.action {
                    Action::Insert => self.parse_function_body_block(),
                    Action::Remove => solution.into_node(),
                }
            }
        }
    }

    fn parse_function_body_block(&mut self) -> SyntaxNode {
        self.with_context(RuleContext::FuncBodyBlock, |p| {
            let open = p.expect(RuleContext::OpenBrace);
            let statements = p.parse_statement_list();
            let close = p.expect(RuleContext::CloseBrace);
            factory::node(SyntaxKind::FunctionBodyBlock, vec![open, statements, close])
        })
    }

    // ========================================================================
    // Type definitions
    // ========================================================================

    /// `TYPE_DEFINITION [visibility, type, name, descriptor, ';']`.
    fn parse_type_definition(&mut self, visibility: SyntaxNode) -> SyntaxNode {
        self.with_context(RuleContext::TypeDefinition, |p| {
            let type_kw = p.consume();
            let name = p.expect(RuleContext::TypeName);
            let descriptor = p.parse_type_descriptor();
            let semicolon = p.expect(RuleContext::Semicolon);
            factory::node(
                SyntaxKind::TypeDefinition,
                vec![visibility, type_kw, name, descriptor, semicolon],
            )
        })
    }
}

/// Cursor over the parameter kinds seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamOrder {
    Required,
    Defaultable,
    Rest,
}
