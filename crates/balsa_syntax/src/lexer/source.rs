//! The token source contract the parser reads from.
//!
//! The parser never touches source text directly. It asks a [`TokenSource`] for lookahead,
//! consumes tokens one at a time, and requests lexer-mode switches for the few
//! context-sensitive forms (version literals in imports).

use std::collections::VecDeque;

use super::Lexer;
use super::tokens::Token;
use crate::syntax_kind::SyntaxKind;

/// Lexing mode requested by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexerMode {
    #[default]
    Default,
    /// Digit runs are integers and `.` is always a single dot (`1.2.3` is five tokens).
    Version,
}

/// Stream of tokens with 1-indexed lookahead.
///
/// ## Notes
/// - `peek(1)` is the next token to be consumed. Lookahead past the end yields `Eof`.
/// - `consume` at end of input returns `Eof` again without advancing.
/// - `position` counts consumed tokens; it only ever grows.
pub trait TokenSource {
    fn peek(&mut self, k: usize) -> &Token;

    fn consume(&mut self) -> Token;

    /// Switch the lexing mode. Tokens already buffered for lookahead are re-lexed.
    fn switch_mode(&mut self, mode: LexerMode);

    /// Return to [`LexerMode::Default`].
    fn reset_mode(&mut self) {
        self.switch_mode(LexerMode::Default);
    }

    fn position(&self) -> usize;
}

/// Lazy token source over source text.
pub struct TokenReader<'a> {
    lexer: Lexer<'a>,
    buffer: VecDeque<Token>,
    position: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            buffer: VecDeque::new(),
            position: 0,
        }
    }

    fn fill(&mut self, k: usize) {
        while self.buffer.len() < k {
            let token = self.lexer.next_token();
            self.buffer.push_back(token);
        }
    }
}

impl TokenSource for TokenReader<'_> {
    fn peek(&mut self, k: usize) -> &Token {
        let k = k.max(1);
        self.fill(k);
        &self.buffer[k - 1]
    }

    fn consume(&mut self) -> Token {
        self.fill(1);
        let Some(token) = self.buffer.pop_front() else {
            return Token::eof(self.lexer.source_len());
        };
        if token.kind == SyntaxKind::Eof {
            self.buffer.push_front(token.clone());
        } else {
            self.position += 1;
        }
        token
    }

    fn switch_mode(&mut self, mode: LexerMode) {
        if self.lexer.mode() == mode {
            return;
        }
        if let Some(front) = self.buffer.front() {
            self.lexer.seek(front.span.start);
        }
        tracing::trace!(?mode, relexed = self.buffer.len(), "lexer mode switch");
        self.buffer.clear();
        self.lexer.set_mode(mode);
    }

    fn position(&self) -> usize {
        self.position
    }
}

/// Token source over a pre-built token vector.
///
/// ## Notes
/// - Tokens after the first `Eof` are ignored. When the vector has no `Eof`, one is synthesized
///   at the end of the last token's span.
/// - Mode switches are accepted and ignored: the tokens were already classified.
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    cursor: usize,
    eof: Token,
}

impl TokenBuffer {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let eof = match tokens.iter().position(|t| t.kind == SyntaxKind::Eof) {
            Some(index) => {
                let eof = tokens[index].clone();
                tokens.truncate(index);
                eof
            }
            None => Token::eof(tokens.last().map_or(0, |t| t.span.end)),
        };
        Self { tokens, cursor: 0, eof }
    }
}

impl TokenSource for TokenBuffer {
    fn peek(&mut self, k: usize) -> &Token {
        let index = self.cursor + k.max(1) - 1;
        self.tokens.get(index).unwrap_or(&self.eof)
    }

    fn consume(&mut self) -> Token {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                token.clone()
            }
            None => self.eof.clone(),
        }
    }

    fn switch_mode(&mut self, mode: LexerMode) {
        tracing::trace!(?mode, "mode switch ignored by pre-built token buffer");
    }

    fn position(&self) -> usize {
        self.cursor
    }
}
