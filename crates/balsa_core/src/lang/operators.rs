//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with the metadata the expression
//! parser climbs on: precedence tier, associativity and fixity.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `check`/`checkpanic` are keywords, not operators; they bind at [`Precedence::Unary`].
//! - Assignment operators sit on [`Precedence::Assignment`], which the expression parser never
//!   climbs into; statements consume them directly.
//!
//! ## Examples
//! ```rust
//! use balsa_core::lang::operators::{self, Associativity, OperatorId, Precedence};
//!
//! assert_eq!(operators::from_str("+"), Some(OperatorId::Plus));
//! assert_eq!(operators::info_for(OperatorId::Star).precedence, Precedence::Multiplicative);
//! assert_eq!(operators::info_for(OperatorId::Caret).associativity, Associativity::Right);
//! ```

use super::registry::{Since, Stability};

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define where an operator may appear relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// Binary only (`*`, `==`, ...).
    Infix,
    /// Unary only (`!`, `~`).
    Prefix,
    /// Binary or unary (`+`, `-`).
    InfixOrPrefix,
    /// Statement-level assignment (`=`, `+=`, ...).
    Assignment,
}

/// Binding-strength tiers, lowest first.
///
/// ## Notes
/// - The derived `Ord` is the climbing order: a tier compares greater when it binds tighter.
/// - `Unary` and `Postfix` have no infix operators of their own; they bound the operand parser
///   (prefix forms) and the member/call loop (postfix forms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Precedence {
    Assignment,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Power,
    Unary,
    Postfix,
}

impl Precedence {
    /// The lowest tier an expression starts climbing from.
    pub const LOWEST: Precedence = Precedence::LogicalOr;

    /// Return the next tighter tier. `Postfix` is its own successor.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::Assignment => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Power,
            Precedence::Power => Precedence::Unary,
            Precedence::Unary | Precedence::Postfix => Precedence::Postfix,
        }
    }
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    // Comparison
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical / bitwise
    AndAnd,
    OrOr,
    Not,
    Tilde,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
}

/// Metadata for an operator.
///
/// ## Notes
/// - For [`Fixity::InfixOrPrefix`] operators, `precedence` is the infix tier; the prefix form
///   always binds at [`Precedence::Unary`].
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: Precedence,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, "+", Precedence::Additive, Associativity::Left, Fixity::InfixOrPrefix),
    op(OperatorId::Minus, "-", Precedence::Additive, Associativity::Left, Fixity::InfixOrPrefix),
    op(OperatorId::Star, "*", Precedence::Multiplicative, Associativity::Left, Fixity::Infix),
    op(OperatorId::Slash, "/", Precedence::Multiplicative, Associativity::Left, Fixity::Infix),
    op(OperatorId::Percent, "%", Precedence::Multiplicative, Associativity::Left, Fixity::Infix),
    op(OperatorId::Caret, "^", Precedence::Power, Associativity::Right, Fixity::Infix),
    // Comparison
    op(OperatorId::EqEq, "==", Precedence::Equality, Associativity::Left, Fixity::Infix),
    op(OperatorId::NotEq, "!=", Precedence::Equality, Associativity::Left, Fixity::Infix),
    op(OperatorId::EqEqEq, "===", Precedence::Equality, Associativity::Left, Fixity::Infix),
    op(OperatorId::NotEqEq, "!==", Precedence::Equality, Associativity::Left, Fixity::Infix),
    op(OperatorId::Lt, "<", Precedence::Relational, Associativity::Left, Fixity::Infix),
    op(OperatorId::LtEq, "<=", Precedence::Relational, Associativity::Left, Fixity::Infix),
    op(OperatorId::Gt, ">", Precedence::Relational, Associativity::Left, Fixity::Infix),
    op(OperatorId::GtEq, ">=", Precedence::Relational, Associativity::Left, Fixity::Infix),
    // Logical / bitwise
    op(OperatorId::AndAnd, "&&", Precedence::LogicalAnd, Associativity::Left, Fixity::Infix),
    op(OperatorId::OrOr, "||", Precedence::LogicalOr, Associativity::Left, Fixity::Infix),
    op(OperatorId::Not, "!", Precedence::Unary, Associativity::Right, Fixity::Prefix),
    op(OperatorId::Tilde, "~", Precedence::Unary, Associativity::Right, Fixity::Prefix),
    // Assignment
    op(OperatorId::Eq, "=", Precedence::Assignment, Associativity::None, Fixity::Assignment),
    op(OperatorId::PlusEq, "+=", Precedence::Assignment, Associativity::None, Fixity::Assignment),
    op(OperatorId::MinusEq, "-=", Precedence::Assignment, Associativity::None, Fixity::Assignment),
    op(OperatorId::StarEq, "*=", Precedence::Assignment, Associativity::None, Fixity::Assignment),
    op(OperatorId::SlashEq, "/=", Precedence::Assignment, Associativity::None, Fixity::Assignment),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the infix tier of `id`, or `None` when it cannot join two operands.
///
/// ## Examples
/// ```rust
/// use balsa_core::lang::operators::{self, OperatorId, Precedence};
///
/// assert_eq!(operators::binary_precedence(OperatorId::OrOr), Some(Precedence::LogicalOr));
/// assert_eq!(operators::binary_precedence(OperatorId::Not), None);
/// assert_eq!(operators::binary_precedence(OperatorId::PlusEq), None);
/// ```
pub fn binary_precedence(id: OperatorId) -> Option<Precedence> {
    let info = info_for(id);
    match info.fixity {
        Fixity::Infix | Fixity::InfixOrPrefix => Some(info.precedence),
        Fixity::Prefix | Fixity::Assignment => None,
    }
}

/// Return whether `id` may start a unary expression.
pub fn is_prefix(id: OperatorId) -> bool {
    matches!(info_for(id).fixity, Fixity::Prefix | Fixity::InfixOrPrefix)
}

/// Return whether `id` is a compound assignment (`+=`, `-=`, `*=`, `/=`).
pub fn is_compound_assignment(id: OperatorId) -> bool {
    info_for(id).fixity == Fixity::Assignment && id != OperatorId::Eq
}

/// Return the first operator whose infix tier is exactly `tier`.
///
/// ## Notes
/// - Used when a missing binary operator has to be synthesized for a given tier; registry order
///   decides the representative (`+` for additive, `*` for multiplicative, ...).
pub fn representative(tier: Precedence) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| binary_precedence(o.id) == Some(tier))
        .map(|o| o.id)
}

/// Resolve an operator spelling to its identifier.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: Precedence,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        since: Since(1, 0),
        stability: Stability::Stable,
    }
}
