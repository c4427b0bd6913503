/// Statements.
///
/// Statement parsing is LL(2)-ish: most statements are identified by their first token, but a
/// statement starting with a name can be a declaration (`Foo foo;`), an assignment (`foo = 1;`),
/// a compound assignment (`foo += 1;`) or a call (`foo();`). The name is parsed first and the
/// next token decides.
impl<S: TokenSource> Parser<S> {
    /// Return `true` at a token that ends a statement list.
    fn at_statement_list_end(&mut self) -> bool {
        matches!(
            self.peek_kind(),
            SyntaxKind::Eof
                | SyntaxKind::Punctuation(PunctuationId::RBrace)
                | SyntaxKind::Keyword(
                    KeywordId::Else | KeywordId::Public | KeywordId::Function | KeywordId::Type | KeywordId::Import
                )
        )
    }

    fn parse_statement_list(&mut self) -> SyntaxNode {
        let mut statements = Vec::new();
        while !self.at_statement_list_end() {
            let statement = self.parse_statement();
            if !statement.is_none() {
                statements.push(statement);
            }
        }
        factory::list(statements)
    }

    /// One statement, or `NONE` at the end of a statement list.
    fn parse_statement(&mut self) -> SyntaxNode {
        if self.at_statement_list_end() {
            return factory::empty();
        }
        if self.at_depth_limit() {
            return self.recover_at_depth_limit(RuleContext::Statement);
        }
        self.with_context(RuleContext::Statement, |p| {
            let kind = p.peek_kind();
            match kind {
                SyntaxKind::Punctuation(PunctuationId::LBrace) => p.parse_block_statement(),
                SyntaxKind::Keyword(KeywordId::If) => p.parse_if_else_statement(),
                SyntaxKind::Keyword(KeywordId::While) => p.parse_while_statement(),
                SyntaxKind::Keyword(KeywordId::Return) => p.parse_return_statement(),
                SyntaxKind::Keyword(KeywordId::Check | KeywordId::Checkpanic) => p.parse_check_statement(),
                SyntaxKind::Identifier => {
                    let name = p.parse_qualified_identifier(RuleContext::Identifier);
                    p.parse_statement_after_name(name)
                }
                _ if kind.is_type_desc_start() => {
                    let ty = p.parse_type_descriptor();
                    let name = p.expect(RuleContext::VariableName);
                    p.parse_var_decl_rhs(ty, name)
                }
                _ => {
                    let solution = p.recover(RuleContext::Statement, &[]);
                    match solution.action {
                        Action::Insert => {
                            let name = p.parse_qualified_identifier(RuleContext::Identifier);
                            p.parse_statement_after_name(name)
                        }
                        Action::Remove => solution.into_node(),
                    }
                }
            }
        })
    }

    /// Disambiguate a statement that started with a (possibly qualified) name.
    fn parse_statement_after_name(&mut self, name: SyntaxNode) -> SyntaxNode {
        let kind = self.peek_kind();
        match kind {
            SyntaxKind::Identifier => {
                let variable = self.consume();
                self.parse_var_decl_rhs(name, variable)
            }
            SyntaxKind::Operator(OperatorId::Eq) => self.parse_assignment(name),
            _ if kind.is_compound_assignment() => self.parse_compound_assignment(name),
            SyntaxKind::Punctuation(PunctuationId::LParen | PunctuationId::Dot | PunctuationId::LBracket) => {
                let expr = self.parse_expression_rhs(Precedence::LOWEST, name, true);
                self.parse_statement_from_expression(expr)
            }
            _ => {
                let solution = self.recover(RuleContext::AssignmentOrVarDeclRhs, &[name.clone()]);
                match (solution.action, solution.kind) {
                    (Action::Insert, SyntaxKind::Operator(OperatorId::Eq)) => self.parse_assignment(name),
                    (Action::Insert, _) => {
                        let variable = self.expect(RuleContext::VariableName);
                        self.parse_var_decl_rhs(name, variable)
                    }
                    (Action::Remove, _) => solution.into_node(),
                }
            }
        }
    }

    /// A call, or the left-hand side of an assignment to a field or member.
    ///
    /// ## Notes
    /// - A call always becomes a call statement; an `=` after it is left to the `;` recovery.
    /// - Anything other than a call or an assigned access is reported and still emitted as a
    ///   call statement.
    fn parse_statement_from_expression(&mut self, expr: SyntaxNode) -> SyntaxNode {
        match expr.kind() {
            SyntaxKind::FunctionCall | SyntaxKind::MethodCall => return self.finish_call_statement(expr),
            SyntaxKind::FieldAccess | SyntaxKind::MemberAccess => {
                let next = self.peek_kind();
                if next.is_operator(OperatorId::Eq) {
                    return self.parse_assignment(expr);
                }
                if next.is_compound_assignment() {
                    return self.parse_compound_assignment(expr);
                }
            }
            _ => {}
        }
        if self.peek_kind().is_operator(OperatorId::Eq) {
            self.report_invalid_node(&expr, "left hand side of an assignment must be a variable reference");
        } else {
            self.report_invalid_node(&expr, "expression is not a valid call statement");
        }
        self.finish_call_statement(expr)
    }

    fn finish_call_statement(&mut self, expr: SyntaxNode) -> SyntaxNode {
        self.with_context(RuleContext::CallStmt, |p| {
            let semicolon = p.expect(RuleContext::Semicolon);
            factory::node(SyntaxKind::CallStatement, vec![expr, semicolon])
        })
    }

    /// `check f();` is a call statement wrapping a check expression.
    fn parse_check_statement(&mut self) -> SyntaxNode {
        let expr = self.parse_expression(Precedence::LOWEST);
        let wraps_call = expr.kind() == SyntaxKind::CheckExpression
            && expr
                .child(1)
                .is_some_and(|operand| matches!(operand.kind(), SyntaxKind::FunctionCall | SyntaxKind::MethodCall));
        if !wraps_call {
            self.report_invalid_node(&expr, "expression is not a valid call statement");
        }
        self.finish_call_statement(expr)
    }

    // ========================================================================
    // Declarations and assignments
    // ========================================================================

    /// `VAR_DECL_STATEMENT [type, name, '=', initializer, ';']`.
    fn parse_var_decl_rhs(&mut self, ty: SyntaxNode, name: SyntaxNode) -> SyntaxNode {
        self.with_context(RuleContext::VarDeclStmt, |p| match p.peek_kind() {
            SyntaxKind::Operator(OperatorId::Eq) => {
                let assign = p.consume();
                p.finish_var_decl(ty, name, assign)
            }
            SyntaxKind::Punctuation(PunctuationId::Semicolon) => {
                let semicolon = p.consume();
                factory::node(
                    SyntaxKind::VarDeclStatement,
                    vec![ty, name, factory::empty(), factory::empty(), semicolon],
                )
            }
            _ => {
                let solution = p.recover(RuleContext::VarDeclStmtRhs, &[ty.clone(), name.clone()]);
                match (solution.action, solution.kind) {
                    (Action::Insert, SyntaxKind::Operator(OperatorId::Eq)) => {
                        let assign = p.expect(RuleContext::AssignOp);
                        p.finish_var_decl(ty, name, assign)
                    }
                    (Action::Insert, _) => {
                        let semicolon = p.expect(RuleContext::Semicolon);
                        factory::node(
                            SyntaxKind::VarDeclStatement,
                            vec![ty, name, factory::empty(), factory::empty(), semicolon],
                        )
                    }
                    (Action::Remove, _) => solution.into_node(),
                }
            }
        })
    }

    fn finish_var_decl(&mut self, ty: SyntaxNode, name: SyntaxNode, assign: SyntaxNode) -> SyntaxNode {
        let initializer = self.parse_expression(Precedence::LOWEST);
        let semicolon = self.expect(RuleContext::Semicolon);
        factory::node(
            SyntaxKind::VarDeclStatement,
            vec![ty, name, assign, initializer, semicolon],
        )
    }

    fn parse_assignment(&mut self, lhs: SyntaxNode) -> SyntaxNode {
        self.with_context(RuleContext::AssignmentStmt, |p| {
            let assign = p.expect(RuleContext::AssignOp);
            let value = p.parse_expression(Precedence::LOWEST);
            let semicolon = p.expect(RuleContext::Semicolon);
            factory::node(SyntaxKind::AssignmentStatement, vec![lhs, assign, value, semicolon])
        })
    }

    fn parse_compound_assignment(&mut self, lhs: SyntaxNode) -> SyntaxNode {
        self.with_context(RuleContext::CompoundAssignmentStmt, |p| {
            let op = p.consume();
            let value = p.parse_expression(Precedence::LOWEST);
            let semicolon = p.expect(RuleContext::Semicolon);
            factory::node(
                SyntaxKind::CompoundAssignmentStatement,
                vec![lhs, op, value, semicolon],
            )
        })
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn parse_block_statement(&mut self) -> SyntaxNode {
        self.with_context(RuleContext::BlockStmt, |p| {
            let open = p.expect(RuleContext::OpenBrace);
            let statements = p.parse_statement_list();
            let close = p.expect(RuleContext::CloseBrace);
            factory::node(SyntaxKind::BlockStatement, vec![open, statements, close])
        })
    }

    /// `IF_ELSE_STATEMENT [if, condition, block, else]`.
    fn parse_if_else_statement(&mut self) -> SyntaxNode {
        self.with_context(RuleContext::IfBlock, |p| {
            let if_kw = p.consume();
            let condition = p.parse_expression(Precedence::LOWEST);
            let block = p.parse_block_statement();
            let else_block = if p.at_keyword(KeywordId::Else) {
                let else_kw = p.consume();
                p.parse_else_block(else_kw)
            } else {
                factory::empty()
            };
            factory::node(SyntaxKind::IfElseStatement, vec![if_kw, condition, block, else_block])
        })
    }

    /// `ELSE_BLOCK [else, body]` where the body is another `if` or a block.
    fn parse_else_block(&mut self, else_kw: SyntaxNode) -> SyntaxNode {
        let body = match self.peek_kind() {
            SyntaxKind::Keyword(KeywordId::If) => self.parse_if_else_statement(),
            SyntaxKind::Punctuation(PunctuationId::LBrace) => self.parse_block_statement(),
            _ => {
                let solution = self.recover(RuleContext::ElseBody, &[else_kw.clone()]);
                match solution.action {
                    Action::Insert => self.parse_block_statement(),
                    Action::Remove => return solution.into_node(),
                }
            }
        };
        factory::node(SyntaxKind::ElseBlock, vec![else_kw, body])
    }

    fn parse_while_statement(&mut self) -> SyntaxNode {
        self.with_context(RuleContext::WhileBlock, |p| {
            let while_kw = p.consume();
            let condition = p.parse_expression(Precedence::LOWEST);
            let block = p.parse_block_statement();
            factory::node(SyntaxKind::WhileStatement, vec![while_kw, condition, block])
        })
    }

    fn parse_return_statement(&mut self) -> SyntaxNode {
        self.with_context(RuleContext::ReturnStmt, |p| {
            let return_kw = p.consume();
            p.parse_return_rhs(return_kw)
        })
    }

    /// `RETURN_STATEMENT [return, value, ';']`.
    fn parse_return_rhs(&mut self, return_kw: SyntaxNode) -> SyntaxNode {
        let kind = self.peek_kind();
        if kind.is_punctuation(PunctuationId::Semicolon) {
            let semicolon = self.consume();
            return factory::node(SyntaxKind::ReturnStatement, vec![return_kw, factory::empty(), semicolon]);
        }
        if kind.is_expression_start() {
            let value = self.parse_expression(Precedence::LOWEST);
            let semicolon = self.expect(RuleContext::Semicolon);
            return factory::node(SyntaxKind::ReturnStatement, vec![return_kw, value, semicolon]);
        }
        let solution = self.recover(RuleContext::ReturnStmtRhs, &[return_kw.clone()]);
        match solution.action {
            Action::Insert => {
                let semicolon = self.expect(RuleContext::Semicolon);
                factory::node(SyntaxKind::ReturnStatement, vec![return_kw, factory::empty(), semicolon])
            }
            Action::Remove => solution.into_node(),
        }
    }
}
