/// Expressions.
///
/// Binary expressions use precedence climbing over the tiers in
/// [`balsa_core::lang::operators::Precedence`]. Postfix forms (calls, field and member access)
/// bind tighter than any binary operator and are applied before the climb looks at the next
/// operator.
///
/// ## Notes
/// - `^` is right-associative; every other binary operator is left-associative.
/// - Unary operators and `check`/`checkpanic` take their operand at the unary tier, so
///   `-a * b` is `(-a) * b` and `-f()` is `-(f())`.
impl<S: TokenSource> Parser<S> {
    /// Parse an expression whose binary operators all bind at least as tightly as `min`.
    fn parse_expression(&mut self, min: Precedence) -> SyntaxNode {
        if self.at_depth_limit() {
            return self.recover_at_depth_limit(RuleContext::Expression);
        }
        self.with_context(RuleContext::Expression, |p| {
            let lhs = p.parse_terminal_expression();
            p.parse_expression_rhs(min, lhs, false)
        })
    }

    /// An operand: literal, name, parenthesized expression, cast, unary or check expression.
    fn parse_terminal_expression(&mut self) -> SyntaxNode {
        let kind = self.peek_kind();
        if kind.is_literal() {
            let literal = self.consume();
            return factory::node(SyntaxKind::BasicLiteral, vec![literal]);
        }
        if kind.is_unary_operator() {
            let op = self.consume();
            let operand = self.parse_expression(Precedence::Unary);
            return factory::node(SyntaxKind::UnaryExpression, vec![op, operand]);
        }
        if kind.is_check_keyword() {
            let keyword = self.consume();
            let operand = self.parse_expression(Precedence::Unary);
            return factory::node(SyntaxKind::CheckExpression, vec![keyword, operand]);
        }
        match kind {
            SyntaxKind::Identifier => self.parse_qualified_identifier(RuleContext::Identifier),
            SyntaxKind::Punctuation(PunctuationId::LParen) => {
                let open = self.consume();
                let inner = self.parse_expression(Precedence::LOWEST);
                let close = self.expect(RuleContext::CloseParenthesis);
                factory::node(SyntaxKind::BracedExpression, vec![open, inner, close])
            }
            SyntaxKind::Operator(OperatorId::Lt) => {
                let lt = self.consume();
                let ty = self.parse_type_descriptor();
                let gt = self.expect(RuleContext::GtToken);
                let operand = self.parse_expression(Precedence::Unary);
                factory::node(SyntaxKind::TypeCastExpression, vec![lt, ty, gt, operand])
            }
            _ => {
                let solution = self.recover(RuleContext::TerminalExpression, &[]);
                match solution.action {
                    Action::Insert => self.expect(RuleContext::Identifier),
                    Action::Remove => solution.into_node(),
                }
            }
        }
    }

    /// Extend `lhs` with postfix forms and, unless `lhs_mode` is set, binary operators of tier
    /// `min` or tighter.
    ///
    /// ## Parameters
    /// - `lhs_mode`: only postfix forms; used for statements that start with a name, where a
    ///   binary operator cannot follow.
    fn parse_expression_rhs(&mut self, min: Precedence, mut lhs: SyntaxNode, lhs_mode: bool) -> SyntaxNode {
        loop {
            let kind = self.peek_kind();
            match kind {
                SyntaxKind::Punctuation(PunctuationId::LParen) => {
                    if !is_name_reference(&lhs) {
                        break;
                    }
                    lhs = self.parse_function_call(lhs);
                }
                SyntaxKind::Punctuation(PunctuationId::Dot) => {
                    lhs = self.parse_field_or_method(lhs);
                }
                SyntaxKind::Punctuation(PunctuationId::LBracket) => {
                    let open = self.consume();
                    let key = self.parse_expression(Precedence::LOWEST);
                    let close = self.expect(RuleContext::CloseBracket);
                    lhs = factory::node(SyntaxKind::MemberAccess, vec![lhs, open, key, close]);
                }
                _ => {
                    if lhs_mode {
                        break;
                    }
                    let Some(tier) = kind.binary_precedence() else {
                        break;
                    };
                    if tier < min {
                        break;
                    }
                    let op = self.consume();
                    let rhs_min = if kind.is_right_associative() { tier } else { tier.next() };
                    let rhs = self.parse_expression(rhs_min);
                    lhs = factory::node(SyntaxKind::BinaryExpression, vec![lhs, op, rhs]);
                }
            }
        }
        lhs
    }

    /// `FUNCTION_CALL [name, '(', args, ')']`.
    fn parse_function_call(&mut self, name: SyntaxNode) -> SyntaxNode {
        let open = self.consume();
        let args = self.parse_arg_list();
        let close = self.expect(RuleContext::CloseParenthesis);
        factory::node(SyntaxKind::FunctionCall, vec![name, open, args, close])
    }

    /// `.name` or `.name(args)`.
    fn parse_field_or_method(&mut self, target: SyntaxNode) -> SyntaxNode {
        let dot = self.consume();
        let name = self.expect(RuleContext::FieldName);
        if !self.at_punct(PunctuationId::LParen) {
            return factory::node(SyntaxKind::FieldAccess, vec![target, dot, name]);
        }
        let open = self.consume();
        let args = self.parse_arg_list();
        let close = self.expect(RuleContext::CloseParenthesis);
        factory::node(SyntaxKind::MethodCall, vec![target, dot, name, open, args, close])
    }

    // ========================================================================
    // Arguments
    // ========================================================================

    fn at_arg_list_end(&mut self) -> bool {
        matches!(
            self.peek_kind(),
            SyntaxKind::Eof
                | SyntaxKind::Punctuation(
                    PunctuationId::RParen | PunctuationId::RBrace | PunctuationId::RBracket | PunctuationId::Semicolon
                )
                | SyntaxKind::Keyword(
                    KeywordId::Function | KeywordId::Public | KeywordId::Type | KeywordId::Import | KeywordId::Returns
                )
        )
    }

    /// Arguments with their separating commas, flattened into one `LIST`.
    ///
    /// ## Notes
    /// - Argument order is positional, then named, then at most one rest argument. Out-of-order
    ///   arguments are kept and reported.
    fn parse_arg_list(&mut self) -> SyntaxNode {
        self.with_context(RuleContext::ArgList, |p| {
            let mut items = Vec::new();
            let mut order = ArgOrder::Positional;
            while !p.at_arg_list_end() {
                let arg = p.parse_argument();
                p.check_arg_order(&arg, &mut order);
                items.push(arg);
                if p.at_punct(PunctuationId::Comma) {
                    items.push(p.consume());
                    continue;
                }
                if p.at_arg_list_end() {
                    break;
                }
                items.push(p.expect(RuleContext::Comma));
            }
            factory::list(items)
        })
    }

    fn parse_argument(&mut self) -> SyntaxNode {
        if self.at_punct(PunctuationId::Ellipsis) {
            let ellipsis = self.consume();
            let value = self.parse_expression(Precedence::LOWEST);
            return factory::node(SyntaxKind::RestArg, vec![ellipsis, value]);
        }
        if self.peek_kind() == SyntaxKind::Identifier && self.peek_kind_at(2).is_operator(OperatorId::Eq) {
            let name = self.consume();
            let assign = self.consume();
            let value = self.parse_expression(Precedence::LOWEST);
            return factory::node(SyntaxKind::NamedArg, vec![name, assign, value]);
        }
        let value = self.parse_expression(Precedence::LOWEST);
        factory::node(SyntaxKind::PositionalArg, vec![value])
    }

    fn check_arg_order(&mut self, arg: &SyntaxNode, order: &mut ArgOrder) {
        match (arg.kind(), *order) {
            (SyntaxKind::RestArg, ArgOrder::Rest) => {
                self.report_invalid_node(arg, "cannot have more than one rest argument");
            }
            (_, ArgOrder::Rest) => {
                self.report_invalid_node(arg, "cannot have more arguments after the rest argument");
            }
            (SyntaxKind::PositionalArg, ArgOrder::Named) => {
                self.report_invalid_node(arg, "cannot have a positional argument after a named argument");
            }
            (SyntaxKind::NamedArg, _) => *order = ArgOrder::Named,
            (SyntaxKind::RestArg, _) => *order = ArgOrder::Rest,
            _ => {}
        }
    }
}

/// Cursor over the argument kinds seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgOrder {
    Positional,
    Named,
    Rest,
}
