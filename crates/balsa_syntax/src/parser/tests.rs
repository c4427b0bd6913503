#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on the shapes specific syntactic forms produce and on the parser's
/// recovery behavior: how many diagnostics a mistake costs and that no token is ever lost.
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_as(source: &str, entry: EntryContext) -> SyntaxTree {
        parse_entry(source, entry)
    }

    fn messages(tree: &SyntaxTree) -> Vec<&str> {
        tree.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    /// Every lexed token (except end of input) appears in the tree, in order.
    fn assert_lossless(source: &str, tree: &SyntaxTree) {
        let key = |t: &Token| (t.kind, t.text.clone(), t.span);
        let expected: Vec<_> = lexer::lex(source)
            .iter()
            .filter(|t| t.kind != SyntaxKind::Eof)
            .map(key)
            .collect();
        let actual: Vec<_> = tree.source_tokens().iter().map(key).collect();
        assert_eq!(actual, expected, "tree does not account for every token of {source:?}");
    }

    /// Compact prefix rendering of an expression tree.
    fn shape(node: &SyntaxNode) -> String {
        match node {
            SyntaxNode::Token(token) if token.is_missing() => "?".to_string(),
            SyntaxNode::Token(token) => token.text.clone(),
            SyntaxNode::Inner(inner) => {
                let parts: Vec<String> = inner.children.iter().map(shape).collect();
                match inner.kind {
                    SyntaxKind::BasicLiteral | SyntaxKind::PositionalArg => parts.join(" "),
                    SyntaxKind::BracedExpression => parts[1].clone(),
                    SyntaxKind::BinaryExpression => format!("({} {} {})", parts[1], parts[0], parts[2]),
                    SyntaxKind::UnaryExpression | SyntaxKind::CheckExpression => {
                        format!("({} {})", parts[0], parts[1])
                    }
                    SyntaxKind::FunctionCall => format!("(call {} [{}])", parts[0], parts[2]),
                    SyntaxKind::List => parts
                        .into_iter()
                        .filter(|p| p != ",")
                        .collect::<Vec<_>>()
                        .join(" "),
                    SyntaxKind::QualifiedIdentifier => parts.concat(),
                    other => format!("({} {})", other.name(), parts.join(" ")),
                }
            }
        }
    }

    fn expression_shape(source: &str) -> String {
        let tree = parse_as(source, EntryContext::Expression);
        assert!(tree.diagnostics.is_empty(), "{:?}", messages(&tree));
        shape(&tree.root)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_binary_precedence() {
        assert_eq!(expression_shape("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(expression_shape("a || b && c == d"), "(|| a (&& b (== c d)))");
        assert_eq!(expression_shape("a < b + 1"), "(< a (+ b 1))");
    }

    #[test]
    fn test_left_and_right_associativity() {
        assert_eq!(expression_shape("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(expression_shape("2 ^ 3 ^ 2"), "(^ 2 (^ 3 2))");
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        assert_eq!(expression_shape("-a * b"), "(* (- a) b)");
        assert_eq!(expression_shape("!f(x)"), "(! (call f [x]))");
        assert_eq!(expression_shape("(1 + 2) * 3"), "(* (+ 1 2) 3)");
    }

    #[test]
    fn test_postfix_chain() {
        let tree = parse_as("a.b(1)[2].c", EntryContext::Expression);
        assert!(tree.diagnostics.is_empty());
        let kinds: Vec<SyntaxKind> = tree
            .root
            .descendants()
            .map(SyntaxNode::kind)
            .filter(|k| {
                matches!(
                    k,
                    SyntaxKind::FieldAccess | SyntaxKind::MethodCall | SyntaxKind::MemberAccess
                )
            })
            .collect();
        assert_eq!(
            kinds,
            vec![SyntaxKind::FieldAccess, SyntaxKind::MemberAccess, SyntaxKind::MethodCall]
        );
    }

    #[test]
    fn test_qualified_call_and_cast() {
        assert_eq!(expression_shape("io:println(x)"), "(call io:println [x])");
        let tree = parse_as("<int> x + 1", EntryContext::Expression);
        assert!(tree.diagnostics.is_empty());
        assert_eq!(tree.root.kind(), SyntaxKind::BinaryExpression);
        assert_eq!(tree.root.children()[0].kind(), SyntaxKind::TypeCastExpression);
    }

    #[test]
    fn test_only_names_can_be_called() {
        let source = "(a)(1)";
        let tree = parse_as(source, EntryContext::Expression);
        assert_eq!(tree.root.kind(), SyntaxKind::BracedExpression);
        assert_eq!(
            messages(&tree),
            vec!["invalid token '('", "invalid token '1'", "invalid token ')'"]
        );
        assert_lossless(source, &tree);
    }

    #[test]
    fn test_argument_order() {
        let tree = parse_as("f(1, x = 2, ...rest)", EntryContext::Expression);
        assert!(tree.diagnostics.is_empty());

        let tree = parse_as("f(x = 2, 1)", EntryContext::Expression);
        assert_eq!(
            messages(&tree),
            vec!["cannot have a positional argument after a named argument"]
        );

        let tree = parse_as("f(...a, ...b)", EntryContext::Expression);
        assert_eq!(messages(&tree), vec!["cannot have more than one rest argument"]);
    }

    #[test]
    fn test_trailing_comma_in_arguments_is_accepted() {
        let tree = parse_as("f(1, 2,)", EntryContext::Expression);
        assert!(tree.diagnostics.is_empty());
        assert_eq!(shape(&tree.root), "(call f [1 2])");
    }

    #[test]
    fn test_missing_operand_is_one_diagnostic() {
        let source = "function f() { x = 1 + ; }";
        let tree = parse(source);
        assert_eq!(messages(&tree), vec!["missing expression"]);
        assert_lossless(source, &tree);
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_statement_disambiguation() {
        let cases = [
            ("foo();", SyntaxKind::CallStatement),
            ("foo = 1;", SyntaxKind::AssignmentStatement),
            ("Foo foo;", SyntaxKind::VarDeclStatement),
            ("foo += 1;", SyntaxKind::CompoundAssignmentStatement),
            ("a.b = 1;", SyntaxKind::AssignmentStatement),
            ("a[0] -= 1;", SyntaxKind::CompoundAssignmentStatement),
            ("obj.run();", SyntaxKind::CallStatement),
            ("int x = 1;", SyntaxKind::VarDeclStatement),
            ("geo:Point p;", SyntaxKind::VarDeclStatement),
        ];
        for (source, kind) in cases {
            let tree = parse_as(source, EntryContext::Statement);
            assert!(tree.diagnostics.is_empty(), "{source}: {:?}", messages(&tree));
            assert_eq!(tree.root.kind(), kind, "{source}");
        }
    }

    #[test]
    fn test_qualified_type_in_declaration() {
        let tree = parse_as("geo:Point p;", EntryContext::Statement);
        assert_eq!(tree.root.children()[0].kind(), SyntaxKind::QualifiedIdentifier);
    }

    #[test]
    fn test_invalid_statement_forms_are_reported() {
        // A call is always a call statement; the stray `= 1` is discarded before the `;`.
        let source = "foo() = 1;";
        let tree = parse_as(source, EntryContext::Statement);
        assert_eq!(tree.root.kind(), SyntaxKind::CallStatement);
        assert_eq!(tree.root.children()[0].kind(), SyntaxKind::FunctionCall);
        assert_eq!(messages(&tree), vec!["invalid token '='", "invalid token '1'"]);
        assert_lossless(source, &tree);

        let tree = parse_as("obj.run() += 2;", EntryContext::Statement);
        assert_eq!(tree.root.kind(), SyntaxKind::CallStatement);
        assert_eq!(tree.root.children()[0].kind(), SyntaxKind::MethodCall);

        // Field and member access may be assigned.
        let tree = parse_as("a.b = 1;", EntryContext::Statement);
        assert!(tree.diagnostics.is_empty(), "{:?}", messages(&tree));
        assert_eq!(tree.root.kind(), SyntaxKind::AssignmentStatement);
        let tree = parse_as("a[0] += 1;", EntryContext::Statement);
        assert!(tree.diagnostics.is_empty(), "{:?}", messages(&tree));
        assert_eq!(tree.root.kind(), SyntaxKind::CompoundAssignmentStatement);

        let tree = parse_as("a.b;", EntryContext::Statement);
        assert_eq!(tree.root.kind(), SyntaxKind::CallStatement);
        assert_eq!(messages(&tree), vec!["expression is not a valid call statement"]);
    }

    #[test]
    fn test_check_statement() {
        let tree = parse_as("check foo();", EntryContext::Statement);
        assert!(tree.diagnostics.is_empty());
        assert_eq!(tree.root.kind(), SyntaxKind::CallStatement);
        assert_eq!(tree.root.children()[0].kind(), SyntaxKind::CheckExpression);

        let tree = parse_as("checkpanic x;", EntryContext::Statement);
        assert_eq!(messages(&tree), vec!["expression is not a valid call statement"]);
    }

    #[test]
    fn test_if_else_chain() {
        let tree = parse_as("if a { x = 1; } else if b { } else { return; }", EntryContext::Statement);
        assert!(tree.diagnostics.is_empty(), "{:?}", messages(&tree));
        let root = &tree.root;
        assert_eq!(root.kind(), SyntaxKind::IfElseStatement);
        let else_block = &root.children()[3];
        assert_eq!(else_block.kind(), SyntaxKind::ElseBlock);
        let nested = &else_block.children()[1];
        assert_eq!(nested.kind(), SyntaxKind::IfElseStatement);
        assert_eq!(nested.children()[3].children()[1].kind(), SyntaxKind::BlockStatement);
    }

    #[test]
    fn test_while_and_return() {
        let tree = parse_as("while i < 10 { i += 1; }", EntryContext::Statement);
        assert!(tree.diagnostics.is_empty());
        assert_eq!(tree.root.kind(), SyntaxKind::WhileStatement);

        let tree = parse_as("return;", EntryContext::Statement);
        assert!(tree.root.children()[1].is_none());
        let tree = parse_as("return a + b;", EntryContext::Statement);
        assert_eq!(tree.root.children()[1].kind(), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_missing_call_closers_snapshot() {
        let tree = parse_as("foo(1,", EntryContext::Statement);
        assert_eq!(messages(&tree), vec!["missing ')'", "missing ';'"]);
        insta::assert_snapshot!(tree.root.dump(), @r#"
        CALL_STATEMENT
          FUNCTION_CALL
            IDENTIFIER "foo"
            PUNCTUATION "("
            LIST
              POSITIONAL_ARG
                BASIC_LITERAL
                  DECIMAL_INTEGER_LITERAL "1"
              PUNCTUATION ","
            MISSING ')'
          MISSING ';'
        "#);
    }

    #[test]
    fn test_stray_token_is_skipped_snapshot() {
        let source = "int x = 1 2;";
        let tree = parse_as(source, EntryContext::Statement);
        assert_eq!(messages(&tree), vec!["invalid token '2'"]);
        insta::assert_snapshot!(tree.root.dump(), @r#"
        VAR_DECL_STATEMENT
          SIMPLE_TYPE
            KEYWORD "int"
          IDENTIFIER "x"
          OPERATOR "="
          BASIC_LITERAL
            DECIMAL_INTEGER_LITERAL "1"
          SKIPPED DECIMAL_INTEGER_LITERAL "2"
          PUNCTUATION ";"
        "#);
        assert_lossless(source, &tree);
    }

    #[test]
    fn test_missing_semicolon_before_close_brace() {
        let tree = parse("function f() { int x = 1 }");
        assert_eq!(messages(&tree), vec!["missing ';'"]);
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    #[test]
    fn test_function_with_parameters() {
        let tree = parse("public function add(int a, int b = 1, string... rest) returns int { return a + b; }");
        assert!(tree.diagnostics.is_empty(), "{:?}", messages(&tree));
        let members = &tree.root.children()[1];
        let function = &members.children()[0];
        assert_eq!(function.kind(), SyntaxKind::FunctionDefinition);
        let params: Vec<SyntaxKind> = function.children()[4]
            .children()
            .iter()
            .map(SyntaxNode::kind)
            .filter(|k| k.is_node())
            .collect();
        assert_eq!(
            params,
            vec![SyntaxKind::RequiredParam, SyntaxKind::DefaultableParam, SyntaxKind::RestParam]
        );
        assert_eq!(function.children()[6].kind(), SyntaxKind::ReturnTypeDescriptor);
    }

    #[test]
    fn test_required_after_defaultable_is_reported_on_the_parameter() {
        let source = "function f(int x, int y = 1, int z) {}";
        let tree = parse(source);
        assert_eq!(
            messages(&tree),
            vec!["cannot have a required parameter after a defaultable parameter"]
        );
        assert_eq!(tree.diagnostics[0].kind, DiagnosticKind::InvalidNode);
        assert_eq!(tree.diagnostics[0].span, Span::new(29, 34));
        let function = &tree.root.children()[1].children()[0];
        let params = function.children()[4]
            .children()
            .iter()
            .filter(|c| c.kind().is_node())
            .count();
        assert_eq!(params, 3);
    }

    #[test]
    fn test_parameters_after_rest_are_reported() {
        let tree = parse("function f(int... xs, int y) {}");
        assert_eq!(
            messages(&tree),
            vec!["cannot have more parameters after the rest parameter"]
        );
    }

    #[test]
    fn test_unterminated_signature_costs_three_diagnostics() {
        let source = "function f(";
        let tree = parse(source);
        assert_eq!(messages(&tree), vec!["missing ')'", "missing '{'", "missing '}'"]);
        assert!(
            tree.diagnostics
                .iter()
                .all(|d| d.kind == DiagnosticKind::MissingToken && d.span == Span::empty_at(11))
        );
        assert_lossless(source, &tree);
    }

    #[test]
    fn test_missing_close_paren_before_body() {
        let tree = parse("function f(int x { return x; }");
        assert_eq!(messages(&tree), vec!["missing ')'"]);
    }

    #[test]
    fn test_external_function_body() {
        let tree = parse("function now() returns int = external;");
        assert!(tree.diagnostics.is_empty());
        let function = &tree.root.children()[1].children()[0];
        assert_eq!(function.children()[7].kind(), SyntaxKind::ExternalFunctionBody);
    }

    #[test]
    fn test_imports() {
        let tree = parse("import balsa/io.file version 1.2.3 as f;\nfunction main() {}");
        assert!(tree.diagnostics.is_empty(), "{:?}", messages(&tree));
        let import = &tree.root.children()[0].children()[0];
        assert_eq!(import.kind(), SyntaxKind::ImportDecl);
        assert_eq!(import.children()[1].kind(), SyntaxKind::ImportOrgName);
        assert_eq!(import.children()[2].children().len(), 3);
        let version = &import.children()[3];
        let parts: Vec<&str> = version.children()[1]
            .leaves()
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(parts, vec!["1", ".", "2", ".", "3"]);
        assert_eq!(import.children()[4].kind(), SyntaxKind::ImportPrefix);
    }

    #[test]
    fn test_misplaced_import() {
        let tree = parse("function f() {}\nimport foo;");
        assert_eq!(messages(&tree), vec!["imports must come before other declarations"]);
        assert_eq!(tree.root.children()[1].children()[1].kind(), SyntaxKind::ImportDecl);
    }

    #[test]
    fn test_junk_before_declaration_is_removed() {
        let source = "x function f() {}";
        let tree = parse(source);
        assert_eq!(messages(&tree), vec!["invalid token 'x'"]);
        assert_eq!(tree.root.children()[1].children()[0].kind(), SyntaxKind::FunctionDefinition);
        assert_lossless(source, &tree);
    }

    // ========================================================================
    // Type definitions
    // ========================================================================

    #[test]
    fn test_record_type() {
        let tree = parse("public type P record {| int x; int y?; int z = 0; *Base; string...; |};");
        assert!(tree.diagnostics.is_empty(), "{:?}", messages(&tree));
        let definition = &tree.root.children()[1].children()[0];
        assert_eq!(definition.kind(), SyntaxKind::TypeDefinition);
        let record = &definition.children()[3];
        assert_eq!(record.kind(), SyntaxKind::RecordTypeDescriptor);
        let fields: Vec<SyntaxKind> = record.children()[2].children().iter().map(SyntaxNode::kind).collect();
        assert_eq!(
            fields,
            vec![
                SyntaxKind::RecordField,
                SyntaxKind::RecordField,
                SyntaxKind::RecordFieldWithDefault,
                SyntaxKind::TypeReference,
            ]
        );
        assert_eq!(record.children()[3].kind(), SyntaxKind::RecordRestType);
        assert_eq!(record.children()[4].as_token().map(|t| t.text.as_str()), Some("|}"));
    }

    #[test]
    fn test_field_after_rest_type() {
        let tree = parse("type P record { string...; int x; };");
        assert_eq!(messages(&tree), vec!["cannot have a field after the rest type"]);
    }

    #[test]
    fn test_object_type() {
        let source = "type C client object { public int x = 1; private string name; \
                      remote function get() returns int { return x; } *Base; };";
        let tree = parse(source);
        assert!(tree.diagnostics.is_empty(), "{:?}", messages(&tree));
        let object = &tree.root.children()[1].children()[0].children()[3];
        assert_eq!(object.kind(), SyntaxKind::ObjectTypeDescriptor);
        assert_eq!(object.children()[0].children().len(), 1);
        let members: Vec<SyntaxKind> = object.children()[3].children().iter().map(SyntaxNode::kind).collect();
        assert_eq!(
            members,
            vec![
                SyntaxKind::ObjectField,
                SyntaxKind::ObjectField,
                SyntaxKind::ObjectMethod,
                SyntaxKind::TypeReference,
            ]
        );
    }

    // ========================================================================
    // Entry points, resumption and bounds
    // ========================================================================

    #[test]
    fn test_fragment_leftovers_attach_to_end_of_input() {
        let source = "foo(); bar();";
        let tree = parse_as(source, EntryContext::Statement);
        assert_eq!(tree.root.kind(), SyntaxKind::CallStatement);
        assert_eq!(tree.diagnostics.len(), 4);
        let eof = tree.end_of_input.as_ref().expect("fragment has an end-of-input leaf");
        assert_eq!(eof.invalid.len(), 4);
        assert_lossless(source, &tree);
    }

    #[test]
    fn test_compilation_unit_has_no_separate_end_of_input() {
        let tree = parse("");
        assert!(tree.end_of_input.is_none());
        assert_eq!(tree.root.children()[2].kind(), SyntaxKind::Eof);
    }

    #[test]
    fn test_parse_tokens_matches_parse() {
        let source = "function f(int x) { return x * 2; }";
        let from_text = parse(source);
        let from_tokens = parse_tokens(lexer::lex(source), EntryContext::CompilationUnit);
        assert_eq!(from_text, from_tokens);
    }

    #[test]
    fn test_resume_parsing_validates_its_input() {
        let mut parser = Parser::new(TokenReader::new("x"));
        assert_eq!(
            parser.resume_parsing(RuleContext::ParamList, Vec::new()),
            Err(ResumeError::Unsupported(RuleContext::ParamList))
        );
        assert_eq!(
            parser.resume_parsing(RuleContext::ParameterRhs, vec![factory::empty()]),
            Err(ResumeError::PartialNodes {
                ctx: RuleContext::ParameterRhs,
                expected: 3,
                found: 1,
            })
        );
    }

    #[test]
    fn test_resume_parsing_continues_a_parameter() {
        let mut parser = Parser::new(TokenReader::new("= 5"));
        let ty = factory::token(
            Token::new(SyntaxKind::Keyword(KeywordId::Int), "int", Span::new(0, 3)),
            Vec::new(),
        );
        let name = factory::token(Token::new(SyntaxKind::Identifier, "x", Span::new(4, 5)), Vec::new());
        let node = parser
            .resume_parsing(RuleContext::ParameterRhs, vec![factory::empty(), ty, name])
            .expect("parameter rhs is resumable");
        assert_eq!(node.kind(), SyntaxKind::DefaultableParam);
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let depth = 200;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let config = ParserConfig::new().with_max_nesting_depth(64);
        let tree = Parser::with_config(TokenReader::new(&source), config).parse_entry(EntryContext::Expression);
        assert!(tree.has_errors());
        assert!(tree.diagnostics.iter().any(|d| d.message == "missing expression"));
        assert_lossless(&source, &tree);
    }

    #[test]
    fn test_depth_limit_only_drops_the_deep_subtree() {
        let nested = format!("{}1{}", "g(".repeat(200), ")".repeat(200));
        let prefix = "function f() { x = ";
        let source = format!("{prefix}{nested}; }} function h() {{ int y = 2; }}");
        let nested_end = prefix.len() + nested.len();
        let config = ParserConfig::new().with_max_nesting_depth(64);
        let tree = Parser::with_config(TokenReader::new(&source), config).parse();

        assert!(tree.has_errors());
        assert_lossless(&source, &tree);
        // Everything after the call chain parses normally.
        assert!(
            tree.diagnostics.iter().all(|d| d.span.end <= nested_end),
            "{:?}",
            messages(&tree)
        );
        let noted: Vec<_> = tree.diagnostics.iter().filter(|d| !d.notes.is_empty()).collect();
        assert_eq!(noted.len(), 1);
        assert_eq!(noted[0].notes, vec!["maximum nesting depth of 64 exceeded".to_string()]);
        let missing = tree
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::MissingToken)
            .count();
        assert_eq!(missing, 1, "{:?}", messages(&tree));
    }

    #[test]
    fn test_depth_limit_skips_deep_blocks_as_a_whole() {
        let nested = format!("{}{}", "{".repeat(100), "}".repeat(100));
        let prefix = "function f() { ";
        let source = format!("{prefix}{nested} int y = 2; }} function h() {{ }}");
        let nested_end = prefix.len() + nested.len();
        let config = ParserConfig::new().with_max_nesting_depth(48);
        let tree = Parser::with_config(TokenReader::new(&source), config).parse();

        assert_lossless(&source, &tree);
        assert!(tree.diagnostics.iter().all(|d| d.kind == DiagnosticKind::InvalidToken));
        assert!(tree.diagnostics.iter().all(|d| d.span.end <= nested_end));
        assert!(tree.root.descendants().any(|n| n.kind() == SyntaxKind::VarDeclStatement));
        assert!(!tree.root.leaves().any(|leaf| leaf.is_missing()));
    }

    #[test]
    fn test_deep_blocks_are_bounded() {
        let depth = 150;
        let source = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
        let config = ParserConfig::new().with_max_nesting_depth(48);
        let tree = Parser::with_config(TokenReader::new(&source), config).parse_entry(EntryContext::Statement);
        assert!(tree.has_errors());
        assert_lossless(&source, &tree);
    }
}
