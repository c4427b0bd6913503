//! Small helper APIs for working with `SyntaxKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to give the
//! grammar and the recovery tables one shared vocabulary of "what can start what".

use crate::syntax_kind::SyntaxKind;
use balsa_core::lang::keywords::{self, KeywordId};
use balsa_core::lang::operators::{self, Associativity, OperatorId, Precedence};
use balsa_core::lang::punctuation::PunctuationId;

impl SyntaxKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(self) -> Option<KeywordId> {
        match self {
            SyntaxKind::Keyword(id) => Some(id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(self, id: KeywordId) -> bool {
        matches!(self, SyntaxKind::Keyword(k) if k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(self) -> Option<OperatorId> {
        match self {
            SyntaxKind::Operator(id) => Some(id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(self, id: OperatorId) -> bool {
        matches!(self, SyntaxKind::Operator(o) if o == id)
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(self, id: PunctuationId) -> bool {
        matches!(self, SyntaxKind::Punctuation(p) if p == id)
    }

    /// Return the infix tier when this token can join two operands.
    pub fn binary_precedence(self) -> Option<Precedence> {
        self.operator_id().and_then(operators::binary_precedence)
    }

    pub fn is_binary_operator(self) -> bool {
        self.binary_precedence().is_some()
    }

    /// `a op b op c` groups as `a op (b op c)`.
    pub fn is_right_associative(self) -> bool {
        self.operator_id()
            .is_some_and(|id| operators::info_for(id).associativity == Associativity::Right)
    }

    /// `+=`, `-=`, `*=`, `/=`.
    pub fn is_compound_assignment(self) -> bool {
        self.operator_id().is_some_and(operators::is_compound_assignment)
    }

    /// Builtin simple type keyword (`int`, `string`, ...).
    pub fn is_simple_type(self) -> bool {
        self.keyword_id().is_some_and(keywords::is_simple_type)
    }

    /// Literal tokens that form a `BASIC_LITERAL` expression.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::DecimalIntegerLiteral
                | SyntaxKind::HexIntegerLiteral
                | SyntaxKind::DecimalFloatingPointLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::Keyword(KeywordId::True | KeywordId::False | KeywordId::Null)
        )
    }

    /// Prefix unary operators (`+ - ! ~`).
    pub fn is_unary_operator(self) -> bool {
        self.operator_id().is_some_and(operators::is_prefix)
    }

    /// `check` or `checkpanic`.
    pub fn is_check_keyword(self) -> bool {
        matches!(self, SyntaxKind::Keyword(KeywordId::Check | KeywordId::Checkpanic))
    }

    /// Tokens that can begin a type descriptor.
    pub fn is_type_desc_start(self) -> bool {
        self == SyntaxKind::Identifier
            || self.is_simple_type()
            || matches!(
                self,
                SyntaxKind::Keyword(KeywordId::Record | KeywordId::Object | KeywordId::Client | KeywordId::Abstract)
            )
    }

    /// Tokens that can begin an expression.
    pub fn is_expression_start(self) -> bool {
        self == SyntaxKind::Identifier
            || self.is_literal()
            || self.is_unary_operator()
            || self.is_check_keyword()
            || self.is_punctuation(PunctuationId::LParen)
            || self.is_operator(OperatorId::Lt)
    }

    /// Tokens that can begin a statement inside a block.
    pub fn is_statement_start(self) -> bool {
        self.is_type_desc_start()
            || self.is_check_keyword()
            || self.is_punctuation(PunctuationId::LBrace)
            || matches!(
                self,
                SyntaxKind::Keyword(KeywordId::If | KeywordId::While | KeywordId::Return)
            )
    }

    /// Tokens that can begin a module-level declaration.
    pub fn is_top_level_start(self) -> bool {
        matches!(
            self,
            SyntaxKind::Keyword(KeywordId::Public | KeywordId::Function | KeywordId::Type | KeywordId::Import)
        )
    }

    /// Opening bracket of a group: `(`, `[`, `{` or `{|`.
    pub fn opens_group(self) -> bool {
        matches!(
            self,
            SyntaxKind::Punctuation(
                PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace | PunctuationId::LBracePipe
            )
        )
    }

    /// Closing bracket of a group: `)`, `]`, `}` or `|}`.
    pub fn closes_group(self) -> bool {
        matches!(
            self,
            SyntaxKind::Punctuation(
                PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace | PunctuationId::RBracePipe
            )
        )
    }
}
