use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use balsa_core::lang::{keywords, operators, punctuation};
use balsa_syntax::SyntaxKind;
use balsa_syntax::lexer::lex;

/// Every registry spelling lexes back to the id it was registered under.
#[test]
fn registry_spellings_round_trip_through_the_lexer() {
    let mut cases: Vec<(&'static str, SyntaxKind)> = Vec::new();
    for k in keywords::KEYWORDS {
        cases.push((k.canonical, SyntaxKind::Keyword(k.id)));
    }
    for o in operators::OPERATORS {
        cases.push((o.spelling, SyntaxKind::Operator(o.id)));
    }
    for p in punctuation::PUNCTUATION {
        cases.push((p.canonical, SyntaxKind::Punctuation(p.id)));
    }

    for (spelling, expected) in cases {
        let tokens = lex(spelling);
        assert_eq!(tokens.len(), 2, "`{spelling}` should lex to one token plus EOF, got {tokens:?}");
        assert_eq!(tokens[0].kind, expected, "`{spelling}` lexed to the wrong kind");
        assert_eq!(tokens[0].text, spelling);
        assert_eq!(tokens[0].kind.spelling(), Some(spelling));
    }
}

/// Registry lookups agree with the tables in both directions.
#[test]
fn registry_lookups_are_consistent() {
    for k in keywords::KEYWORDS {
        assert_eq!(keywords::from_str(k.canonical), Some(k.id));
        assert_eq!(keywords::as_str(k.id), k.canonical);
    }
    for o in operators::OPERATORS {
        assert_eq!(operators::from_str(o.spelling), Some(o.id));
        assert_eq!(operators::as_str(o.id), o.spelling);
    }
    for p in punctuation::PUNCTUATION {
        assert_eq!(punctuation::from_str(p.canonical), Some(p.id));
        assert_eq!(punctuation::as_str(p.id), p.canonical);
    }
}

/// No spelling is registered twice across the three registries.
#[test]
fn spellings_are_unique_across_registries() {
    let mut seen = BTreeSet::new();
    for s in all_symbol_spellings().into_iter().chain(keyword_spellings()) {
        assert!(seen.insert(s), "`{s}` is registered more than once");
    }
}

/// Guardrail against reintroducing stringly-typed vocabulary checks.
///
/// This is intentionally a **coarse** safety net. It looks for suspicious patterns like
/// `== "function"` or `"{|" => ...` in Rust source files where we expect callers to go through
/// `balsa_core::lang` registries instead.
///
/// Notes:
/// - We allow occurrences in `crates/balsa_core/src/lang/**` (registries themselves) and in tests.
/// - This is not meant to be perfect; it's meant to catch "oops I added a string match".
#[test]
fn no_new_stringly_vocab_checks_in_rust_sources() {
    let root = repo_root();
    let spellings: Vec<&'static str> = keyword_spellings().into_iter().chain(all_symbol_spellings()).collect();
    let mut offenders: Vec<(PathBuf, usize, String)> = Vec::new();

    let targets = [root.join("src"), root.join("crates")];
    for dir in targets {
        if dir.exists() {
            scan_dir(&root, &dir, &spellings, &mut offenders);
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::new();
        msg.push_str("Found potential stringly-typed vocabulary checks. Prefer balsa_core registries.\n\n");
        for (path, line_no, line) in offenders.into_iter().take(80) {
            msg.push_str(&format!(
                "- {}:{}: {}\n",
                path.strip_prefix(&root).unwrap_or(&path).display(),
                line_no,
                line.trim()
            ));
        }
        panic!("{msg}");
    }
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn keyword_spellings() -> Vec<&'static str> {
    keywords::KEYWORDS.iter().map(|k| k.canonical).collect()
}

fn all_symbol_spellings() -> Vec<&'static str> {
    operators::OPERATORS
        .iter()
        .map(|o| o.spelling)
        .chain(punctuation::PUNCTUATION.iter().map(|p| p.canonical))
        .collect()
}

fn is_allowed_file(root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    if !rel.ends_with(".rs") {
        return true;
    }
    // Registries define the spellings; allow them.
    if rel.starts_with("crates/balsa_core/src/lang/") {
        return true;
    }
    // Parser and lexer tests feed source text directly.
    if rel.ends_with("/tests.rs") || rel.contains("/tests/") {
        return true;
    }
    false
}

fn scan_dir(root: &Path, dir: &Path, spellings: &[&'static str], offenders: &mut Vec<(PathBuf, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(root, &path, spellings, offenders);
            continue;
        }
        if is_allowed_file(root, &path) {
            continue;
        }
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        for (idx, line) in contents.lines().enumerate() {
            if is_suspicious_line(line, spellings) {
                offenders.push((path.clone(), idx + 1, line.to_string()));
            }
        }
    }
}

fn is_suspicious_line(line: &str, spellings: &[&'static str]) -> bool {
    // Avoid false positives in comments/docstrings.
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") {
        return false;
    }

    for s in spellings {
        let eq = format!("== \"{s}\"");
        let arm = format!("\"{s}\" =>");
        if line.contains(&eq) || line.contains(&arm) {
            return true;
        }
    }

    false
}
