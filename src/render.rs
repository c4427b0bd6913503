//! Output formats for syntax trees, tokens and diagnostics.
//!
//! ## Notes
//! - Tree outlines reuse [`SyntaxNode::dump`]; the end-of-input leaf of a fragment parse is
//!   appended so skipped trailing tokens stay visible.
//! - JSON output is built with `serde_json::json!` and is meant for editor plugins and golden
//!   files. Spans are `[start, end]` byte offsets.
//! - Diagnostics render through miette's graphical handler against a [`NamedSource`].

use std::fmt::Write as _;

use miette::{GraphicalReportHandler, GraphicalTheme, NamedSource, Report};
use serde_json::{Value, json};

use balsa_syntax::diagnostics::{Severity, SyntaxDiagnostic};
use balsa_syntax::lexer::Token;
use balsa_syntax::{Span, SyntaxNode, SyntaxToken, SyntaxTree};

/// Indented outline of `tree`.
pub fn tree_outline(tree: &SyntaxTree) -> String {
    let mut out = tree.root.dump();
    if let Some(eof) = &tree.end_of_input {
        out.push_str(&SyntaxNode::Token(eof.clone()).dump());
    }
    out
}

/// `tree` and its diagnostics as one JSON document.
pub fn tree_json(tree: &SyntaxTree) -> Value {
    json!({
        "root": node_json(&tree.root),
        "end_of_input": tree.end_of_input.as_ref().map(token_json),
        "diagnostics": tree.diagnostics.iter().map(diagnostic_json).collect::<Vec<_>>(),
    })
}

fn node_json(node: &SyntaxNode) -> Value {
    match node {
        SyntaxNode::Token(token) => token_json(token),
        SyntaxNode::Inner(inner) => json!({
            "kind": inner.kind.name(),
            "children": inner.children.iter().map(node_json).collect::<Vec<_>>(),
        }),
    }
}

fn token_json(token: &SyntaxToken) -> Value {
    let mut value = json!({
        "kind": token.kind.name(),
        "text": token.text,
        "span": span_json(token.span),
    });
    if token.missing {
        value["missing"] = Value::Bool(true);
    }
    if !token.invalid.is_empty() {
        value["invalid"] = Value::Array(token.invalid.iter().map(raw_token_json).collect());
    }
    value
}

fn raw_token_json(token: &Token) -> Value {
    json!({
        "kind": token.kind.name(),
        "text": token.text,
        "span": span_json(token.span),
    })
}

fn diagnostic_json(diagnostic: &SyntaxDiagnostic) -> Value {
    json!({
        "code": diagnostic.kind.code(),
        "severity": match diagnostic.severity {
            Severity::Error => "error",
        },
        "message": diagnostic.message,
        "span": span_json(diagnostic.span),
        "notes": diagnostic.notes,
    })
}

fn span_json(span: Span) -> Value {
    json!([span.start, span.end])
}

/// One line per token: `start..end KIND "text"`.
pub fn token_listing(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(
            out,
            "{}..{} {} {:?}",
            token.span.start,
            token.span.end,
            token.kind.name(),
            token.text
        );
    }
    out
}

/// Render `diagnostics` against `source`, one report after another.
///
/// ## Parameters
/// - `name`: file name shown in the report header.
/// - `theme`: [`GraphicalTheme::unicode_nocolor`] for stable output, the default theme for a
///   terminal.
pub fn render_diagnostics(
    name: &str,
    source: &str,
    diagnostics: &[SyntaxDiagnostic],
    theme: GraphicalTheme,
) -> String {
    let handler = GraphicalReportHandler::new_themed(theme);
    let mut out = String::new();
    for diagnostic in diagnostics {
        let report =
            Report::new(diagnostic.clone()).with_source_code(NamedSource::new(name, source.to_string()));
        if handler.render_report(&mut out, &*report).is_err() {
            // Fall back to the bare message; the handler only fails on a broken writer.
            let _ = writeln!(out, "error: {}", diagnostic.message);
        }
    }
    out
}

/// Short single-line summary, e.g. `3 errors`.
pub fn summary(diagnostics: &[SyntaxDiagnostic]) -> String {
    match diagnostics.iter().filter(|d| d.is_error()).count() {
        1 => "1 error".to_string(),
        n => format!("{n} errors"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balsa_syntax::{EntryContext, parse, parse_entry};

    #[test]
    fn json_marks_missing_and_skipped_tokens() {
        let tree = parse_entry("1 + ) 2", EntryContext::Expression);
        let value = tree_json(&tree);
        let text = value.to_string();
        assert!(text.contains("\"invalid\""));
        assert_eq!(value["root"]["kind"], "BINARY_EXPRESSION");
        assert!(value["diagnostics"].as_array().is_some_and(|d| !d.is_empty()));
    }

    #[test]
    fn json_of_clean_parse_has_no_diagnostics() {
        let tree = parse("function main() { }");
        let value = tree_json(&tree);
        assert_eq!(value["diagnostics"], json!([]));
        assert_eq!(value["root"]["kind"], "MODULE_PART");
        assert_eq!(value["end_of_input"], Value::Null);
    }

    #[test]
    fn missing_leaf_is_flagged_in_json() {
        let tree = parse_entry("foo(1", EntryContext::Expression);
        let text = tree_json(&tree).to_string();
        assert!(text.contains("\"missing\":true"));
    }

    #[test]
    fn outline_appends_end_of_input_for_fragments() {
        let tree = parse_entry("a b", EntryContext::Expression);
        let outline = tree_outline(&tree);
        assert!(outline.contains("SKIPPED IDENTIFIER \"b\""));
        assert!(outline.trim_end().ends_with("EOF \"\""));
    }

    #[test]
    fn token_listing_shows_spans() {
        let tokens = balsa_syntax::lexer::lex("x = 1;");
        insta::assert_snapshot!(token_listing(&tokens), @r#"
        0..1 IDENTIFIER "x"
        2..3 OPERATOR "="
        4..5 DECIMAL_INTEGER_LITERAL "1"
        5..6 PUNCTUATION ";"
        6..6 EOF ""
        "#);
    }

    #[test]
    fn rendered_diagnostics_name_the_file() {
        let source = "function f(int x { return x; }";
        let tree = parse(source);
        let rendered = render_diagnostics("f.bal", source, &tree.diagnostics, GraphicalTheme::unicode_nocolor());
        assert!(rendered.contains("f.bal"));
        assert!(rendered.contains("missing ')'"));
        assert!(rendered.contains("balsa::syntax::missing_token"));
    }

    #[test]
    fn summary_pluralizes() {
        let tree = parse("function f(");
        assert_eq!(summary(&tree.diagnostics), "3 errors");
        assert_eq!(summary(&tree.diagnostics[..1]), "1 error");
        assert_eq!(summary(&[]), "0 errors");
    }
}
