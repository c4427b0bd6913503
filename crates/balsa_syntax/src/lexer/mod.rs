//! Lexer for the balsa language.
//!
//! Handles tokenization including:
//! - Keywords and identifiers (keyword spellings come from `balsa_core::lang::keywords`)
//! - Integer (decimal, hex), floating point and string literals
//! - Operators and punctuation, longest spelling first
//! - `//` line comments and whitespace, which are skipped (no trivia tokens)
//!
//! ## Module Structure
//!
//! - `tokens` - Token type
//! - `source` - The [`TokenSource`] contract the parser reads from, plus the lazy
//!   [`TokenReader`] and the pre-built [`TokenBuffer`]
//!
//! ## Notes
//! - The lexer never fails: characters it cannot classify become [`SyntaxKind::Invalid`]
//!   tokens and the parser reports them.
//! - Lexing is lazy and restartable at any byte offset ([`Lexer::seek`]), which is what lets
//!   [`TokenReader`] re-lex buffered lookahead after a mode switch.

pub mod source;
pub mod tokens;

pub use source::{LexerMode, TokenBuffer, TokenReader, TokenSource};
pub use tokens::Token;

use crate::span::Span;
use crate::syntax_kind::SyntaxKind;
use balsa_core::lang::keywords;
use balsa_core::lang::operators;
use balsa_core::lang::punctuation::{self, PunctuationId};

/// Longest operator or punctuation spelling, in bytes (`...`, `===`, `!==`).
const MAX_SYMBOL_LEN: usize = 3;

/// Lexer for balsa source code.
///
/// Produces one token per call to [`Lexer::next_token`]; once the input is exhausted every
/// further call returns an `Eof` token positioned at the end of the source.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    mode: LexerMode,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code, in [`LexerMode::Default`].
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            mode: LexerMode::Default,
        }
    }

    pub fn mode(&self) -> LexerMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LexerMode) {
        self.mode = mode;
    }

    /// Byte length of the source, which is where `Eof` tokens are positioned.
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// Restart lexing at byte offset `pos`.
    ///
    /// ## Notes
    /// - `pos` must be a token boundary previously reported in a [`Token::span`].
    pub fn seek(&mut self, pos: usize) {
        debug_assert!(self.source.is_char_boundary(pos), "seek to non-boundary offset {pos}");
        self.pos = pos.min(self.source.len());
    }

    /// Scan and return the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.pos;
        let Some(c) = self.peek_char() else {
            return Token::eof(self.source.len());
        };

        let kind = if c.is_alphabetic() || c == '_' {
            self.scan_word()
        } else if c.is_ascii_digit() {
            match self.mode {
                LexerMode::Default => self.scan_number(),
                LexerMode::Version => self.scan_version_number(),
            }
        } else if c == '"' {
            self.scan_string()
        } else {
            self.scan_symbol()
        };

        Token::new(kind, &self.source[start..self.pos], Span::new(start, self.pos))
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek_char() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if !trimmed.starts_with("//") {
                break;
            }
            match trimmed.find('\n') {
                Some(newline) => self.pos += newline,
                None => self.pos = self.source.len(),
            }
        }
    }

    // ========================================================================
    // Scanners
    // ========================================================================

    fn scan_word(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.eat_while(|c| c.is_alphanumeric() || c == '_');
        keywords::from_str(&self.source[start..self.pos]).map_or(SyntaxKind::Identifier, SyntaxKind::Keyword)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let rest = self.rest();
        if (rest.starts_with("0x") || rest.starts_with("0X")) && rest[2..].starts_with(|c: char| c.is_ascii_hexdigit())
        {
            self.pos += 2;
            self.eat_while(|c| c.is_ascii_hexdigit());
            return SyntaxKind::HexIntegerLiteral;
        }

        self.eat_while(|c| c.is_ascii_digit());
        let mut kind = SyntaxKind::DecimalIntegerLiteral;

        let rest = self.rest();
        if rest.starts_with('.') && rest[1..].starts_with(|c: char| c.is_ascii_digit()) {
            self.pos += 1;
            self.eat_while(|c| c.is_ascii_digit());
            kind = SyntaxKind::DecimalFloatingPointLiteral;
        }

        let bytes = self.rest().as_bytes();
        if matches!(bytes.first(), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
            if bytes.get(1 + sign).is_some_and(u8::is_ascii_digit) {
                self.pos += 1 + sign;
                self.eat_while(|c| c.is_ascii_digit());
                kind = SyntaxKind::DecimalFloatingPointLiteral;
            }
        }
        kind
    }

    /// In version mode `1.2.3` is three integers separated by dots, never a float.
    fn scan_version_number(&mut self) -> SyntaxKind {
        self.eat_while(|c| c.is_ascii_digit());
        SyntaxKind::DecimalIntegerLiteral
    }

    fn scan_string(&mut self) -> SyntaxKind {
        self.pos += 1;
        loop {
            match self.peek_char() {
                None | Some('\n') => return SyntaxKind::Invalid,
                Some('"') => {
                    self.pos += 1;
                    return SyntaxKind::StringLiteral;
                }
                Some('\\') => {
                    self.pos += 1;
                    if let Some(escaped) = self.peek_char().filter(|c| *c != '\n') {
                        self.pos += escaped.len_utf8();
                    }
                }
                Some(c) => self.pos += c.len_utf8(),
            }
        }
    }

    fn scan_symbol(&mut self) -> SyntaxKind {
        let rest = self.rest();
        if self.mode == LexerMode::Version && rest.starts_with('.') {
            self.pos += 1;
            return SyntaxKind::Punctuation(PunctuationId::Dot);
        }

        for len in (1..=MAX_SYMBOL_LEN).rev() {
            let Some(candidate) = rest.get(..len) else {
                continue;
            };
            if let Some(id) = punctuation::from_str(candidate) {
                self.pos += len;
                return SyntaxKind::Punctuation(id);
            }
            if let Some(id) = operators::from_str(candidate) {
                self.pos += len;
                return SyntaxKind::Operator(id);
            }
        }

        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
        SyntaxKind::Invalid
    }
}

/// Tokenize `source` eagerly in [`LexerMode::Default`].
///
/// ## Returns
/// - Every token in order; the last one is always `Eof`.
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == SyntaxKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balsa_core::lang::keywords::KeywordId;
    use balsa_core::lang::operators::OperatorId;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("function foo_1 int"),
            vec![
                SyntaxKind::Keyword(KeywordId::Function),
                SyntaxKind::Identifier,
                SyntaxKind::Keyword(KeywordId::Int),
                SyntaxKind::Eof,
            ]
        );
    }

    #[test]
    fn numeric_literals() {
        assert_eq!(
            kinds("42 0xFF 1.5 2e10 3.25E-2 7."),
            vec![
                SyntaxKind::DecimalIntegerLiteral,
                SyntaxKind::HexIntegerLiteral,
                SyntaxKind::DecimalFloatingPointLiteral,
                SyntaxKind::DecimalFloatingPointLiteral,
                SyntaxKind::DecimalFloatingPointLiteral,
                SyntaxKind::DecimalIntegerLiteral,
                SyntaxKind::Punctuation(PunctuationId::Dot),
                SyntaxKind::Eof,
            ]
        );
    }

    #[test]
    fn longest_symbol_wins() {
        assert_eq!(
            kinds("=== == = ... {| |} !=="),
            vec![
                SyntaxKind::Operator(OperatorId::EqEqEq),
                SyntaxKind::Operator(OperatorId::EqEq),
                SyntaxKind::Operator(OperatorId::Eq),
                SyntaxKind::Punctuation(PunctuationId::Ellipsis),
                SyntaxKind::Punctuation(PunctuationId::LBracePipe),
                SyntaxKind::Punctuation(PunctuationId::RBracePipe),
                SyntaxKind::Operator(OperatorId::NotEqEq),
                SyntaxKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        let tokens = lex("x // trailing comment\n  y");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].text, "y");
        assert_eq!(tokens[1].span, Span::new(24, 25));
        assert_eq!(tokens[2].span, Span::empty_at(25));
    }

    #[test]
    fn strings_keep_their_quotes_and_escapes() {
        let tokens = lex(r#""a\"b" "open"#);
        assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
        assert_eq!(tokens[0].text, r#""a\"b""#);
        assert_eq!(tokens[1].kind, SyntaxKind::Invalid);
        assert_eq!(tokens[1].text, r#""open"#);
    }

    #[test]
    fn unknown_characters_become_invalid_tokens() {
        assert_eq!(
            kinds("a | # b"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::Invalid,
                SyntaxKind::Invalid,
                SyntaxKind::Identifier,
                SyntaxKind::Eof,
            ]
        );
    }

    #[test]
    fn version_mode_splits_dotted_numbers() {
        let mut lexer = Lexer::new("1.2.3");
        lexer.set_mode(LexerMode::Version);
        let texts: Vec<String> = std::iter::from_fn(|| {
            let t = lexer.next_token();
            (t.kind != SyntaxKind::Eof).then_some(t.text)
        })
        .collect();
        assert_eq!(texts, vec!["1", ".", "2", ".", "3"]);

        assert_eq!(kinds("1.2.3")[0], SyntaxKind::DecimalFloatingPointLiteral);
    }

    #[test]
    fn eof_repeats_after_the_end() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, SyntaxKind::Identifier);
        assert_eq!(lexer.next_token().kind, SyntaxKind::Eof);
        assert_eq!(lexer.next_token().kind, SyntaxKind::Eof);
    }
}
