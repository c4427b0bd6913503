//! Concrete syntax tree.
//!
//! A tree is built bottom-up by the parser through [`crate::factory`] and is never mutated
//! afterwards. Nodes own their children; there are no parent pointers.
//!
//! ## Notes
//! - A missing leaf has the shape of a real token: same kind, empty text, zero-width span.
//!   [`SyntaxToken::is_missing`] tells them apart.
//! - Tokens the parser discarded are attached, in order, to the next leaf as its `invalid`
//!   prefix. Walking the leaves and emitting `invalid` then the leaf itself reproduces the
//!   token stream.
//! - Absent optional children are empty `None` nodes; repeated children are `List` nodes.

use std::fmt::Write as _;

use crate::lexer::Token;
use crate::span::Span;
use crate::syntax_kind::SyntaxKind;

/// A leaf: a consumed token, or a synthesized placeholder for a missing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: SyntaxKind,
    pub text: String,
    pub span: Span,
    pub missing: bool,
    /// Discarded tokens that preceded this leaf in the input.
    pub invalid: Vec<Token>,
}

impl SyntaxToken {
    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// The original token, or `None` for a missing leaf.
    pub fn as_token(&self) -> Option<Token> {
        (!self.missing).then(|| Token::new(self.kind, self.text.clone(), self.span))
    }
}

/// An inner node: a kind and its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerNode {
    pub kind: SyntaxKind,
    pub children: Vec<SyntaxNode>,
}

/// A CST node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    Token(SyntaxToken),
    Inner(InnerNode),
}

impl SyntaxNode {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxNode::Token(token) => token.kind,
            SyntaxNode::Inner(inner) => inner.kind,
        }
    }

    /// Children of an inner node; empty for leaves.
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Token(_) => &[],
            SyntaxNode::Inner(inner) => &inner.children,
        }
    }

    pub fn child(&self, index: usize) -> Option<&SyntaxNode> {
        self.children().get(index)
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxNode::Token(token) => Some(token),
            SyntaxNode::Inner(_) => None,
        }
    }

    /// `true` for a synthesized leaf.
    pub fn is_missing(&self) -> bool {
        self.as_token().is_some_and(SyntaxToken::is_missing)
    }

    /// `true` for the empty placeholder of an absent optional child.
    pub fn is_none(&self) -> bool {
        self.kind() == SyntaxKind::None
    }

    /// Source span covered by this node's leaves (missing leaves included), without invalid
    /// prefixes. `None` when the node has no leaves at all.
    pub fn span(&self) -> Option<Span> {
        self.leaves().map(|leaf| leaf.span).reduce(Span::merge)
    }

    /// Leaves in source order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// This node and all of its descendants, in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Every input token this subtree accounts for: invalid prefixes and real leaves, in order.
    pub fn source_tokens(&self) -> Vec<Token> {
        let mut out = Vec::new();
        for leaf in self.leaves() {
            out.extend(leaf.invalid.iter().cloned());
            out.extend(leaf.as_token());
        }
        out
    }

    /// Indented outline of the tree, one node per line.
    ///
    /// ## Notes
    /// - Real leaves print as `KIND "text"`, missing leaves as `MISSING <description>`.
    /// - Discarded tokens print as `SKIPPED KIND "text"` right before the leaf that owns them.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            SyntaxNode::Token(token) => {
                for skipped in &token.invalid {
                    let _ = writeln!(out, "{indent}SKIPPED {} {:?}", skipped.kind.name(), skipped.text);
                }
                if token.missing {
                    let _ = writeln!(out, "{indent}MISSING {}", token.kind.describe());
                } else {
                    let _ = writeln!(out, "{indent}{} {:?}", token.kind.name(), token.text);
                }
            }
            SyntaxNode::Inner(inner) => {
                let _ = writeln!(out, "{indent}{}", inner.kind.name());
                for child in &inner.children {
                    child.dump_into(out, depth + 1);
                }
            }
        }
    }
}

/// Iterator over the leaves of a subtree, left to right.
pub struct Leaves<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a SyntaxToken;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                SyntaxNode::Token(token) => return Some(token),
                SyntaxNode::Inner(inner) => self.stack.extend(inner.children.iter().rev()),
            }
        }
        None
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;

    fn ident(text: &str, start: usize) -> Token {
        Token::new(SyntaxKind::Identifier, text, Span::new(start, start + text.len()))
    }

    #[test]
    fn leaves_and_spans_follow_source_order() {
        let node = factory::node(
            SyntaxKind::List,
            vec![
                factory::token(ident("a", 0), Vec::new()),
                factory::empty(),
                factory::token(ident("b", 2), vec![ident("junk", 4)]),
            ],
        );
        let texts: Vec<&str> = node.leaves().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert_eq!(node.span(), Some(Span::new(0, 3)));
        assert_eq!(factory::empty().span(), None);
    }

    #[test]
    fn source_tokens_skip_missing_leaves_but_keep_their_invalid_prefix() {
        let node = factory::node(
            SyntaxKind::List,
            vec![
                factory::token(ident("a", 0), Vec::new()),
                factory::missing(SyntaxKind::Identifier, 2, vec![ident("x", 2)]),
            ],
        );
        let texts: Vec<String> = node.source_tokens().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["a", "x"]);
    }

    #[test]
    fn dump_marks_missing_and_skipped_leaves() {
        let node = factory::node(
            SyntaxKind::List,
            vec![
                factory::empty(),
                factory::missing(SyntaxKind::Identifier, 0, vec![ident("x", 0)]),
            ],
        );
        insta::assert_snapshot!(node.dump(), @r#"
        LIST
          NONE
          SKIPPED IDENTIFIER "x"
          MISSING identifier
        "#);
    }
}
