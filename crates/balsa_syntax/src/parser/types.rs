/// Type descriptors.
///
/// Simple types (`int`, `string`, ...), named types (`Point`, `geo:Point`), records and objects.
impl<S: TokenSource> Parser<S> {
    fn parse_type_descriptor(&mut self) -> SyntaxNode {
        if self.at_depth_limit() {
            return self.recover_at_depth_limit(RuleContext::TypeDescriptor);
        }
        self.with_context(RuleContext::TypeDescriptor, |p| {
            let kind = p.peek_kind();
            if kind.is_simple_type() {
                let keyword = p.consume();
                return factory::node(SyntaxKind::SimpleType, vec![keyword]);
            }
            match kind {
                SyntaxKind::Identifier => p.parse_qualified_identifier(RuleContext::TypeName),
                SyntaxKind::Keyword(KeywordId::Record) => {
                    let record = p.consume();
                    p.parse_record_body(record)
                }
                SyntaxKind::Keyword(KeywordId::Object | KeywordId::Client | KeywordId::Abstract) => {
                    p.parse_object_type_descriptor()
                }
                _ => {
                    let solution = p.recover(RuleContext::TypeDescriptor, &[]);
                    match solution.action {
                        Action::Insert => p.expect(RuleContext::TypeName),
                        Action::Remove => solution.into_node(),
                    }
                }
            }
        })
    }

    /// `name` or `module:name`.
    ///
    /// ## Notes
    /// - A plain name is the bare identifier leaf, not a `QUALIFIED_IDENTIFIER`.
    /// - A colon not followed by an identifier is discarded.
    fn parse_qualified_identifier(&mut self, ctx: RuleContext) -> SyntaxNode {
        let first = self.expect(ctx);
        if !self.at_punct(PunctuationId::Colon) {
            return first;
        }
        if self.peek_kind_at(2) == SyntaxKind::Identifier {
            let colon = self.consume();
            let name = self.consume();
            return factory::node(SyntaxKind::QualifiedIdentifier, vec![first, colon, name]);
        }
        self.discard_token();
        first
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Everything after `record`: `{ fields }` (open) or `{| fields |}` (closed).
    fn parse_record_body(&mut self, record: SyntaxNode) -> SyntaxNode {
        let open = match self.peek_kind() {
            SyntaxKind::Punctuation(PunctuationId::LBrace | PunctuationId::LBracePipe) => self.consume(),
            _ => {
                let solution = self.recover(RuleContext::RecordBodyStart, &[record.clone()]);
                match solution.action {
                    Action::Insert => self.expect(RuleContext::OpenBrace),
                    Action::Remove => return solution.into_node(),
                }
            }
        };
        let closer = if open.kind() == SyntaxKind::Punctuation(PunctuationId::LBracePipe) {
            RuleContext::CloseBracePipe
        } else {
            RuleContext::CloseBrace
        };

        self.with_context(RuleContext::RecordBody, |p| {
            let mut fields = Vec::new();
            let mut rest: Option<SyntaxNode> = None;
            while !p.at_record_field_list_end() {
                let field = p.parse_record_field();
                if field.is_none() {
                    continue;
                }
                if field.kind() == SyntaxKind::RecordRestType {
                    if rest.is_none() {
                        rest = Some(field);
                        continue;
                    }
                    p.report_invalid_node(&field, "a record can have only one rest type");
                } else if rest.is_some() {
                    p.report_invalid_node(&field, "cannot have a field after the rest type");
                }
                fields.push(field);
            }
            let close = p.expect(closer);
            factory::node(
                SyntaxKind::RecordTypeDescriptor,
                vec![
                    record,
                    open,
                    factory::list(fields),
                    rest.unwrap_or_else(factory::empty),
                    close,
                ],
            )
        })
    }

    fn at_record_field_list_end(&mut self) -> bool {
        matches!(
            self.peek_kind(),
            SyntaxKind::Eof
                | SyntaxKind::Punctuation(PunctuationId::RBrace | PunctuationId::RBracePipe)
                | SyntaxKind::Keyword(KeywordId::Public | KeywordId::Function | KeywordId::Type | KeywordId::Import)
        )
    }

    /// One record member: a field, a field with a default, a rest type or a type reference.
    fn parse_record_field(&mut self) -> SyntaxNode {
        if self.at_record_field_list_end() {
            return factory::empty();
        }
        let kind = self.peek_kind();
        if kind.is_operator(OperatorId::Star) {
            return self.parse_type_reference();
        }
        let ty = if kind.is_type_desc_start() {
            self.parse_type_descriptor()
        } else {
            let solution = self.recover(RuleContext::RecordField, &[]);
            match solution.action {
                Action::Insert => self.expect(RuleContext::TypeName),
                Action::Remove => return solution.into_node(),
            }
        };

        if self.at_punct(PunctuationId::Ellipsis) {
            let ellipsis = self.consume();
            let semicolon = self.expect(RuleContext::Semicolon);
            return factory::node(SyntaxKind::RecordRestType, vec![ty, ellipsis, semicolon]);
        }
        let name = self.expect(RuleContext::FieldName);
        self.parse_field_descriptor_rhs(ty, name)
    }

    /// `;`, `?;` or `= default;` after a field's type and name.
    fn parse_field_descriptor_rhs(&mut self, ty: SyntaxNode, name: SyntaxNode) -> SyntaxNode {
        match self.peek_kind() {
            SyntaxKind::Punctuation(PunctuationId::Semicolon) => {
                let semicolon = self.consume();
                factory::node(SyntaxKind::RecordField, vec![ty, name, factory::empty(), semicolon])
            }
            SyntaxKind::Punctuation(PunctuationId::Question) => {
                let question = self.consume();
                let semicolon = self.expect(RuleContext::Semicolon);
                factory::node(SyntaxKind::RecordField, vec![ty, name, question, semicolon])
            }
            SyntaxKind::Operator(OperatorId::Eq) => {
                let assign = self.consume();
                self.finish_field_with_default(ty, name, assign)
            }
            _ => {
                let solution = self.recover(RuleContext::FieldDescriptorRhs, &[ty.clone(), name.clone()]);
                match (solution.action, solution.kind) {
                    (Action::Insert, SyntaxKind::Operator(OperatorId::Eq)) => {
                        let assign = self.expect(RuleContext::AssignOp);
                        self.finish_field_with_default(ty, name, assign)
                    }
                    (Action::Insert, _) => {
                        let semicolon = self.expect(RuleContext::Semicolon);
                        factory::node(SyntaxKind::RecordField, vec![ty, name, factory::empty(), semicolon])
                    }
                    (Action::Remove, _) => solution.into_node(),
                }
            }
        }
    }

    fn finish_field_with_default(&mut self, ty: SyntaxNode, name: SyntaxNode, assign: SyntaxNode) -> SyntaxNode {
        let default = self.parse_expression(Precedence::LOWEST);
        let semicolon = self.expect(RuleContext::Semicolon);
        factory::node(
            SyntaxKind::RecordFieldWithDefault,
            vec![ty, name, assign, default, semicolon],
        )
    }

    /// `*Name;` includes the members of another type.
    fn parse_type_reference(&mut self) -> SyntaxNode {
        let star = self.consume();
        let name = self.parse_qualified_identifier(RuleContext::TypeName);
        let semicolon = self.expect(RuleContext::Semicolon);
        factory::node(SyntaxKind::TypeReference, vec![star, name, semicolon])
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// `[client] [abstract] object { members }`.
    fn parse_object_type_descriptor(&mut self) -> SyntaxNode {
        let mut qualifiers: Vec<SyntaxNode> = Vec::new();
        while qualifiers.len() < 2 && (self.at_keyword(KeywordId::Client) || self.at_keyword(KeywordId::Abstract)) {
            let qualifier = self.consume();
            if qualifiers.iter().any(|q| q.kind() == qualifier.kind()) {
                self.report_invalid_node(&qualifier, "duplicate object type qualifier");
            }
            qualifiers.push(qualifier);
        }
        let object = self.expect(RuleContext::ObjectKeyword);
        let open = self.expect(RuleContext::OpenBrace);

        self.with_context(RuleContext::ObjectBody, |p| {
            let mut members = Vec::new();
            while !p.at_object_member_list_end() {
                let member = p.parse_object_member();
                if !member.is_none() {
                    members.push(member);
                }
            }
            let close = p.expect(RuleContext::CloseBrace);
            factory::node(
                SyntaxKind::ObjectTypeDescriptor,
                vec![factory::list(qualifiers), object, open, factory::list(members), close],
            )
        })
    }

    fn at_object_member_list_end(&mut self) -> bool {
        matches!(
            self.peek_kind(),
            SyntaxKind::Eof
                | SyntaxKind::Punctuation(PunctuationId::RBrace)
                | SyntaxKind::Keyword(KeywordId::Type | KeywordId::Import)
        )
    }

    fn parse_object_member(&mut self) -> SyntaxNode {
        if self.at_object_member_list_end() {
            return factory::empty();
        }
        let kind = self.peek_kind();
        match kind {
            SyntaxKind::Operator(OperatorId::Star) => self.parse_type_reference(),
            SyntaxKind::Keyword(KeywordId::Public | KeywordId::Private) => {
                let visibility = self.consume();
                self.parse_object_member_without_visibility(visibility)
            }
            SyntaxKind::Keyword(KeywordId::Remote | KeywordId::Function) => self.parse_object_method(Vec::new()),
            _ if kind.is_type_desc_start() => {
                let ty = self.parse_type_descriptor();
                self.parse_object_field(factory::empty(), ty)
            }
            _ => {
                let solution = self.recover(RuleContext::ObjectMember, &[]);
                match solution.action {
                    Action::Insert => self.parse_object_method(Vec::new()),
                    Action::Remove => solution.into_node(),
                }
            }
        }
    }

    fn parse_object_member_without_visibility(&mut self, visibility: SyntaxNode) -> SyntaxNode {
        let kind = self.peek_kind();
        match kind {
            SyntaxKind::Keyword(KeywordId::Remote | KeywordId::Function) => self.parse_object_method(vec![visibility]),
            _ if kind.is_type_desc_start() => {
                let ty = self.parse_type_descriptor();
                self.parse_object_field(visibility, ty)
            }
            _ => {
                let solution = self.recover(RuleContext::ObjectMemberWithoutVisibility, &[visibility.clone()]);
                match solution.action {
                    Action::Insert => self.parse_object_method(vec![visibility]),
                    Action::Remove => solution.into_node(),
                }
            }
        }
    }

    fn parse_object_method(&mut self, mut qualifiers: Vec<SyntaxNode>) -> SyntaxNode {
        if self.at_keyword(KeywordId::Remote) {
            qualifiers.push(self.consume());
        }
        self.parse_function_like(SyntaxKind::ObjectMethod, qualifiers)
    }

    fn parse_object_field(&mut self, visibility: SyntaxNode, ty: SyntaxNode) -> SyntaxNode {
        let name = self.expect(RuleContext::FieldName);
        self.parse_object_field_rhs(visibility, ty, name)
    }

    /// `OBJECT_FIELD [visibility, type, name, '=', default, ';']`.
    fn parse_object_field_rhs(&mut self, visibility: SyntaxNode, ty: SyntaxNode, name: SyntaxNode) -> SyntaxNode {
        let (assign, default) = match self.peek_kind() {
            SyntaxKind::Operator(OperatorId::Eq) => {
                let assign = self.consume();
                (assign, self.parse_expression(Precedence::LOWEST))
            }
            SyntaxKind::Punctuation(PunctuationId::Semicolon) => (factory::empty(), factory::empty()),
            _ => {
                let partial = [visibility.clone(), ty.clone(), name.clone()];
                let solution = self.recover(RuleContext::ObjectFieldRhs, &partial);
                match (solution.action, solution.kind) {
                    (Action::Insert, SyntaxKind::Operator(OperatorId::Eq)) => {
                        let assign = self.expect(RuleContext::AssignOp);
                        (assign, self.parse_expression(Precedence::LOWEST))
                    }
                    (Action::Insert, _) => (factory::empty(), factory::empty()),
                    (Action::Remove, _) => return solution.into_node(),
                }
            }
        };
        let semicolon = self.expect(RuleContext::Semicolon);
        factory::node(
            SyntaxKind::ObjectField,
            vec![visibility, ty, name, assign, default, semicolon],
        )
    }
}
