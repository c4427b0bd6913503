//! Markdown reference for the `balsa_core::lang` registries.
//!
//! Renders keywords, operators and punctuation as tables, including the version each item is
//! available since and its stability. Printed by `balsa reference`.
//!
//! ## Notes
//! - The output is derived from the registries; update them rather than editing the tables.

use balsa_core::lang::registry::Stability;
use balsa_core::lang::{keywords, operators, punctuation};

/// Render the whole reference document.
pub fn language_reference() -> String {
    let mut out = String::new();
    out.push_str("# balsa language reference\n\n");
    out.push_str("## Contents\n\n");
    out.push_str("- [Keywords](#keywords)\n");
    out.push_str("- [Operators](#operators)\n");
    out.push_str("- [Punctuation](#punctuation)\n\n");

    render_keywords_section(&mut out);
    render_operators_section(&mut out);
    render_punctuation_section(&mut out);

    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

fn start_section(out: &mut String, heading: &str) {
    out.push_str(heading);
    out.push_str("\n\n");
}

/// Inline code cell; pipes are escaped so they do not split the row.
fn code(spelling: &str) -> String {
    format!("`{}`", spelling.replace('|', "\\|"))
}

fn stability(s: Stability) -> &'static str {
    match s {
        Stability::Stable => "Stable",
        Stability::Preview => "Preview",
        Stability::Deprecated => "Deprecated",
    }
}

fn render_keywords_section(out: &mut String) {
    start_section(out, "## Keywords");
    out.push_str("| Id | Canonical | Category | Since | Stability |\n");
    out.push_str("|---|---|---|---|---|\n");
    for k in keywords::KEYWORDS {
        out.push_str(&format!(
            "| {:?} | {} | {:?} | {} | {} |\n",
            k.id,
            code(k.canonical),
            k.category,
            k.since,
            stability(k.stability)
        ));
    }
    out.push('\n');
}

fn render_operators_section(out: &mut String) {
    start_section(out, "## Operators");
    out.push_str("| Id | Spelling | Precedence | Associativity | Fixity | Since | Stability |\n");
    out.push_str("|---|---|---|---|---|---|---|\n");
    for o in operators::OPERATORS {
        out.push_str(&format!(
            "| {:?} | {} | {:?} | {:?} | {:?} | {} | {} |\n",
            o.id,
            code(o.spelling),
            o.precedence,
            o.associativity,
            o.fixity,
            o.since,
            stability(o.stability)
        ));
    }
    out.push('\n');
}

fn render_punctuation_section(out: &mut String) {
    start_section(out, "## Punctuation");
    out.push_str("| Id | Canonical | Category | Since | Stability |\n");
    out.push_str("|---|---|---|---|---|\n");
    for p in punctuation::PUNCTUATION {
        out.push_str(&format!(
            "| {:?} | {} | {:?} | {} | {} |\n",
            p.id,
            code(p.canonical),
            p.category,
            p.since,
            stability(p.stability)
        ));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registry_entry_has_a_row() {
        let doc = language_reference();
        let rows = doc.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| Id")).count();
        assert_eq!(
            rows,
            keywords::KEYWORDS.len() + operators::OPERATORS.len() + punctuation::PUNCTUATION.len()
        );
        assert!(doc.ends_with('\n') && !doc.ends_with("\n\n"));
    }

    #[test]
    fn rows_carry_version_and_stability() {
        let doc = language_reference();
        assert!(doc.contains("| Public | `public` | Qualifier | 1.0 | Stable |"));
        assert!(doc.contains("| RBracePipe | `\\|}` | Delimiter |"), "pipes must be escaped");
        let caret = doc.lines().find(|l| l.starts_with("| Caret |")).unwrap();
        assert!(caret.contains("| Power | Right |"), "{caret}");
        assert!(caret.ends_with("| 1.0 | Stable |"));
    }
}
