//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use miette::GraphicalTheme;

use balsa_syntax::lexer::{self, TokenReader};
use balsa_syntax::{EntryContext, Parser, ParserConfig};

use super::{CliError, CliResult, ExitCode, OutputFormat};
use crate::{reference, render};

/// Maximum source file size (100 MB).
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// while building the tree.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Lex and display tokens.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source);
    print!("{}", render::token_listing(&tokens));
    Ok(ExitCode::SUCCESS)
}

/// Print the vocabulary reference.
pub fn print_reference() -> CliResult<ExitCode> {
    print!("{}", reference::language_reference());
    Ok(ExitCode::SUCCESS)
}

/// Options for [`parse_file`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub entry: EntryContext,
    pub format: OutputFormat,
    /// Suppress rendered diagnostics; the exit code still reports them.
    pub quiet: bool,
    pub config: ParserConfig,
}

/// Parse a file and print its syntax tree.
///
/// ## Returns
/// - `ExitCode::SUCCESS` when the parse produced no errors.
///
/// ## Errors
/// - The file cannot be read.
/// - The parse reported errors. The tree is still printed; the error message carries the
///   rendered diagnostics (empty when `quiet`).
pub fn parse_file(file_path: &str, options: &ParseOptions) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let output = parse_source(file_path, &source, options);
    print!("{}", output.stdout);
    match output.diagnostics {
        None => Ok(ExitCode::SUCCESS),
        Some(message) => Err(CliError::new(message, ExitCode::SYNTAX_ERRORS)),
    }
}

/// What `balsa parse` prints for one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    /// The tree in the requested format.
    pub stdout: String,
    /// Rendered diagnostics and summary, or `None` for an error-free parse.
    pub diagnostics: Option<String>,
}

/// Parse `source` and render the tree and diagnostics without touching the terminal.
pub fn parse_source(name: &str, source: &str, options: &ParseOptions) -> ParseOutput {
    let tree = Parser::with_config(TokenReader::new(source), options.config.clone()).parse_entry(options.entry);
    tracing::info!(
        file = name,
        entry = ?options.entry,
        diagnostics = tree.diagnostics.len(),
        "parsed"
    );

    let stdout = match options.format {
        OutputFormat::Tree => render::tree_outline(&tree),
        OutputFormat::Json => format!("{:#}\n", render::tree_json(&tree)),
    };

    let diagnostics = if !tree.has_errors() {
        None
    } else if options.quiet || options.format == OutputFormat::Json {
        Some(String::new())
    } else {
        let mut message = render::render_diagnostics(name, source, &tree.diagnostics, GraphicalTheme::default());
        message.push_str(&render::summary(&tree.diagnostics));
        Some(message)
    };

    ParseOutput { stdout, diagnostics }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn options(entry: EntryContext, format: OutputFormat) -> ParseOptions {
        ParseOptions {
            entry,
            format,
            quiet: false,
            config: ParserConfig::default(),
        }
    }

    #[test]
    fn clean_source_has_no_diagnostics() {
        let out = parse_source(
            "ok.bal",
            "function main() { int x = 1; }",
            &options(EntryContext::CompilationUnit, OutputFormat::Tree),
        );
        assert!(out.diagnostics.is_none());
        assert!(out.stdout.starts_with("MODULE_PART"));
    }

    #[test]
    fn errors_render_with_summary() {
        let out = parse_source(
            "bad.bal",
            "function f(",
            &options(EntryContext::CompilationUnit, OutputFormat::Tree),
        );
        let message = out.diagnostics.unwrap();
        assert!(message.contains("missing ')'"));
        assert!(message.ends_with("3 errors"));
    }

    #[test]
    fn json_output_carries_diagnostics_inline() {
        let out = parse_source(
            "bad.bal",
            "1 +",
            &options(EntryContext::Expression, OutputFormat::Json),
        );
        let value: serde_json::Value = serde_json::from_str(&out.stdout).unwrap();
        assert_eq!(value["diagnostics"][0]["message"], "missing expression");
        assert_eq!(out.diagnostics.as_deref(), Some(""));
    }

    #[test]
    fn quiet_suppresses_rendering_but_not_failure() {
        let mut opts = options(EntryContext::Statement, OutputFormat::Tree);
        opts.quiet = true;
        let out = parse_source("s.bal", "x = ;", &opts);
        assert_eq!(out.diagnostics.as_deref(), Some(""));
    }

    #[test]
    fn missing_file_is_a_failure() {
        let err = read_source("definitely/not/here.bal").unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("Cannot access file"));
    }
}
