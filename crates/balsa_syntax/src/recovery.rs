//! Error recovery engine.
//!
//! When a grammar rule meets a token it cannot use, it asks the engine for a [`Decision`]:
//! synthesize the piece the rule was waiting for (INSERT) or discard the offending token
//! (REMOVE). The decision depends only on the rule context, the two-token lookahead, the context
//! stack and what the engine has already decided at this position, so it is deterministic.
//!
//! ## Decision order
//! 1. End of input can only be completed: INSERT.
//! 2. An INSERT was already made for this `(position, context, depth)`, or the stack has reached
//!    the nesting bound: REMOVE.
//! 3. The token *after* the offending one is what the context expects: REMOVE (single-token
//!    deletion).
//! 4. The offending token can follow the missing piece locally, or it is an anchor of an
//!    enclosing rule (up to the nearest scope, plus the compilation unit): INSERT (single-token
//!    insertion).
//! 5. Otherwise: REMOVE.
//!
//! An INSERT whose synthesized kind equals the offending token's kind is turned into a REMOVE,
//! so every decision either advances the cursor or inserts something different from what is
//! there.
//!
//! ## Notes
//! - Step 2 is what makes recovery terminate: INSERT never advances, so it may happen at most once
//!   per `(position, context, depth)`, and depth is bounded.
//! - A dispatch point that INSERTs records the kind as *pending*; the leaf that later
//!   materializes the same kind at the same position does so silently, so each synthesized
//!   token is reported once.

use std::collections::HashSet;

use balsa_core::lang::keywords::KeywordId;
use balsa_core::lang::operators::OperatorId;
use balsa_core::lang::punctuation::PunctuationId;

use crate::context::{ContextStack, RuleContext};
use crate::node::SyntaxNode;
use crate::syntax_kind::SyntaxKind;

/// Recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// A placeholder was synthesized; the cursor did not move.
    Insert,
    /// One or more tokens were discarded; the cursor advanced.
    Remove,
}

/// Outcome of one recovery call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub action: Action,
    /// For INSERT, the synthesized kind the rule should re-dispatch on. For REMOVE, the kind of
    /// the first discarded token.
    pub kind: SyntaxKind,
    /// For a leaf INSERT, the missing leaf. For a REMOVE in a resumable context, the node the
    /// resumed rule produced.
    pub node: Option<SyntaxNode>,
}

impl Solution {
    /// Take the recovered node.
    ///
    /// ## Panics
    /// - If the solution carries no node, i.e. the calling rule asked for a node from a context
    ///   that cannot produce one. This is a grammar bug.
    pub fn into_node(self) -> SyntaxNode {
        match self.node {
            Some(node) => node,
            None => panic!("INVARIANT: recovery produced no node for a {:?} solution", self.action),
        }
    }
}

/// Engine verdict for the current token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Insert(SyntaxKind),
    Remove,
}

/// Verdict while a REMOVE is in progress and the engine is asked whether to keep discarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The token is what the context expects; stop discarding.
    Accept,
    /// The token would be completed by an INSERT; stop discarding.
    Stop,
    /// Keep discarding.
    Remove,
}

/// Lookahead and stack state a decision is made against.
#[derive(Debug, Clone, Copy)]
pub struct RecoveryInput<'a> {
    pub ctx: RuleContext,
    pub token: SyntaxKind,
    pub next: SyntaxKind,
    pub position: usize,
    pub stack: &'a ContextStack,
    pub max_depth: usize,
}

/// Per-session recovery state.
#[derive(Debug, Default)]
pub struct RecoveryEngine {
    inserted: HashSet<(usize, RuleContext, usize)>,
    pending: Option<(usize, SyntaxKind)>,
}

impl RecoveryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide how to recover at the current token, recording INSERTs.
    pub fn decide(&mut self, input: RecoveryInput<'_>) -> Decision {
        let decision = self.classify(&input);
        if let Decision::Insert(kind) = decision {
            debug_assert_ne!(kind, input.token, "recovery inserted the kind it was looking at");
            self.record_insert(input.position, input.ctx, input.stack.depth());
        }
        tracing::debug!(
            ctx = ?input.ctx,
            token = ?input.token,
            position = input.position,
            depth = input.stack.depth(),
            ?decision,
            "recovery decision"
        );
        decision
    }

    /// Re-evaluate after a token was discarded; never records anything.
    pub fn probe(&self, input: RecoveryInput<'_>) -> Probe {
        if input.token == SyntaxKind::Eof {
            return Probe::Stop;
        }
        if self.exhausted(&input) {
            return Probe::Remove;
        }
        if expects(input.ctx, input.token) {
            return Probe::Accept;
        }
        match self.classify(&input) {
            Decision::Insert(_) => Probe::Stop,
            Decision::Remove => Probe::Remove,
        }
    }

    /// Record a recovery at `(position, ctx, depth)` that does not advance the cursor.
    ///
    /// ## Returns
    /// - `false` when one was already recorded there; the caller must advance instead.
    pub fn record_insert(&mut self, position: usize, ctx: RuleContext, depth: usize) -> bool {
        self.inserted.insert((position, ctx, depth))
    }

    /// Record that a dispatch point synthesized `kind` at `position`.
    pub fn set_pending(&mut self, position: usize, kind: SyntaxKind) {
        self.pending = Some((position, kind));
    }

    /// Consume a pending insertion matching `kind` at `position`.
    ///
    /// ## Returns
    /// - `true` when the leaf being synthesized was already reported by a dispatch point.
    pub fn take_pending(&mut self, position: usize, kind: SyntaxKind) -> bool {
        if self.pending == Some((position, kind)) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn exhausted(&self, input: &RecoveryInput<'_>) -> bool {
        input.stack.depth() >= input.max_depth
            || self
                .inserted
                .contains(&(input.position, input.ctx, input.stack.depth()))
    }

    fn classify(&self, input: &RecoveryInput<'_>) -> Decision {
        if input.token == SyntaxKind::Eof {
            return Decision::Insert(insertion_kind(input.ctx, input.token));
        }
        if self.exhausted(input) {
            return Decision::Remove;
        }
        if expects(input.ctx, input.next) {
            return Decision::Remove;
        }
        if follows(input.ctx, input.token) || anchored(input.stack, input.token) {
            let kind = insertion_kind(input.ctx, input.token);
            if kind != input.token {
                return Decision::Insert(kind);
            }
        }
        Decision::Remove
    }
}

// ============================================================================
// Context tables
// ============================================================================

/// The token a leaf context stands for.
pub fn leaf_kind(ctx: RuleContext) -> Option<SyntaxKind> {
    use RuleContext as C;
    let kind = match ctx {
        C::Semicolon => punct(PunctuationId::Semicolon),
        C::Comma => punct(PunctuationId::Comma),
        C::AssignOp => SyntaxKind::Operator(OperatorId::Eq),
        C::OpenParenthesis => punct(PunctuationId::LParen),
        C::CloseParenthesis => punct(PunctuationId::RParen),
        C::OpenBrace => punct(PunctuationId::LBrace),
        C::CloseBrace => punct(PunctuationId::RBrace),
        C::CloseBracePipe => punct(PunctuationId::RBracePipe),
        C::CloseBracket => punct(PunctuationId::RBracket),
        C::GtToken => SyntaxKind::Operator(OperatorId::Gt),
        C::Identifier | C::VariableName | C::FuncName | C::TypeName | C::FieldName => SyntaxKind::Identifier,
        C::VersionNumber => SyntaxKind::DecimalIntegerLiteral,
        C::FunctionKeyword => SyntaxKind::Keyword(KeywordId::Function),
        C::ExternalKeyword => SyntaxKind::Keyword(KeywordId::External),
        C::ObjectKeyword => SyntaxKind::Keyword(KeywordId::Object),
        _ => return None,
    };
    Some(kind)
}

/// Whether `kind` is something the rule at `ctx` can continue with.
pub fn expects(ctx: RuleContext, kind: SyntaxKind) -> bool {
    use RuleContext as C;
    if let Some(leaf) = leaf_kind(ctx) {
        return kind == leaf;
    }
    match ctx {
        C::CompUnit => kind == SyntaxKind::Eof || kind.is_top_level_start(),
        C::TopLevelNode => kind.is_top_level_start(),
        C::TopLevelNodeWithoutModifier => is_kw(kind, KeywordId::Function) || is_kw(kind, KeywordId::Type),
        C::Parameter => is_kw(kind, KeywordId::Public) || kind.is_type_desc_start(),
        C::AfterParameterType => kind == SyntaxKind::Identifier || is_p(kind, PunctuationId::Ellipsis),
        C::ParameterRhs => {
            kind.is_operator(OperatorId::Eq) || is_p(kind, PunctuationId::Comma) || is_p(kind, PunctuationId::RParen)
        }
        C::FuncBody => is_p(kind, PunctuationId::LBrace) || kind.is_operator(OperatorId::Eq),
        C::TypeDescriptor => kind.is_type_desc_start(),
        C::RecordBodyStart => is_p(kind, PunctuationId::LBrace) || is_p(kind, PunctuationId::LBracePipe),
        C::RecordField => kind.is_operator(OperatorId::Star) || kind.is_type_desc_start(),
        C::FieldDescriptorRhs => {
            is_p(kind, PunctuationId::Semicolon)
                || is_p(kind, PunctuationId::Question)
                || kind.is_operator(OperatorId::Eq)
        }
        C::ObjectMember => {
            is_object_member_start(kind)
                || kind.is_type_desc_start()
                || is_kw(kind, KeywordId::Public)
                || is_kw(kind, KeywordId::Private)
        }
        C::ObjectMemberWithoutVisibility => {
            is_kw(kind, KeywordId::Remote) || is_kw(kind, KeywordId::Function) || kind.is_type_desc_start()
        }
        C::ObjectFieldRhs | C::VarDeclStmtRhs => {
            kind.is_operator(OperatorId::Eq) || is_p(kind, PunctuationId::Semicolon)
        }
        C::Statement => kind.is_statement_start(),
        C::AssignmentOrVarDeclRhs => {
            kind == SyntaxKind::Identifier
                || kind.is_operator(OperatorId::Eq)
                || kind.is_compound_assignment()
                || matches!(
                    kind,
                    SyntaxKind::Punctuation(PunctuationId::LParen | PunctuationId::Dot | PunctuationId::LBracket)
                )
        }
        C::ElseBody => is_kw(kind, KeywordId::If) || is_p(kind, PunctuationId::LBrace),
        C::ReturnStmtRhs => is_p(kind, PunctuationId::Semicolon) || kind.is_expression_start(),
        C::Expression | C::TerminalExpression => kind.is_expression_start(),
        _ => false,
    }
}

/// Whether `kind` may directly follow the piece `ctx` is missing.
pub fn follows(ctx: RuleContext, kind: SyntaxKind) -> bool {
    use RuleContext as C;
    match ctx {
        C::Semicolon => {
            kind.is_statement_start()
                || kind.is_top_level_start()
                || is_object_member_start(kind)
                || is_p(kind, PunctuationId::RBrace)
                || is_p(kind, PunctuationId::RBracePipe)
        }
        C::Comma => {
            kind.is_type_desc_start()
                || kind.is_expression_start()
                || is_p(kind, PunctuationId::Ellipsis)
                || is_kw(kind, KeywordId::Public)
        }
        C::AssignOp | C::GtToken => kind.is_expression_start(),
        C::OpenParenthesis => {
            kind.is_type_desc_start()
                || kind.is_expression_start()
                || is_kw(kind, KeywordId::Public)
                || is_p(kind, PunctuationId::RParen)
                || is_p(kind, PunctuationId::Ellipsis)
        }
        C::CloseParenthesis | C::CloseBracket => {
            is_operand_follower(kind)
                || is_p(kind, PunctuationId::LBrace)
                || is_kw(kind, KeywordId::Returns)
                || is_kw(kind, KeywordId::External)
        }
        C::OpenBrace => {
            kind.is_statement_start()
                || is_object_member_start(kind)
                || is_p(kind, PunctuationId::RBrace)
        }
        C::CloseBrace | C::CloseBracePipe => {
            kind.is_statement_start()
                || kind.is_top_level_start()
                || is_kw(kind, KeywordId::Else)
                || matches!(
                    kind,
                    SyntaxKind::Punctuation(
                        PunctuationId::RBrace
                            | PunctuationId::RBracePipe
                            | PunctuationId::Semicolon
                            | PunctuationId::Comma
                            | PunctuationId::RParen
                            | PunctuationId::Ellipsis
                            | PunctuationId::Question
                    )
                )
        }
        C::FuncName => is_p(kind, PunctuationId::LParen),
        C::TypeName => kind.is_type_desc_start(),
        C::VariableName => {
            kind.is_operator(OperatorId::Eq)
                || matches!(
                    kind,
                    SyntaxKind::Punctuation(
                        PunctuationId::Semicolon | PunctuationId::Comma | PunctuationId::RParen | PunctuationId::Question
                    )
                )
        }
        C::FieldName => is_operand_follower(kind),
        C::Identifier => {
            is_operand_follower(kind)
                || kind == SyntaxKind::Identifier
                || is_kw(kind, KeywordId::Version)
                || is_kw(kind, KeywordId::As)
                || kind.is_operator(OperatorId::Slash)
                || matches!(
                    kind,
                    SyntaxKind::Punctuation(
                        PunctuationId::LBrace | PunctuationId::Ellipsis | PunctuationId::Question | PunctuationId::Colon
                    )
                )
        }
        C::VersionNumber => {
            is_p(kind, PunctuationId::Dot) || is_p(kind, PunctuationId::Semicolon) || is_kw(kind, KeywordId::As)
        }
        C::FunctionKeyword => kind == SyntaxKind::Identifier,
        C::ExternalKeyword => is_p(kind, PunctuationId::Semicolon),
        C::ObjectKeyword => is_p(kind, PunctuationId::LBrace),

        C::TopLevelNodeWithoutModifier => kind == SyntaxKind::Identifier,
        C::Parameter => is_p(kind, PunctuationId::Ellipsis),
        C::AfterParameterType => {
            kind.is_operator(OperatorId::Eq) || is_p(kind, PunctuationId::Comma) || is_p(kind, PunctuationId::RParen)
        }
        C::ParameterRhs => {
            kind.is_type_desc_start() || kind.is_expression_start() || is_kw(kind, KeywordId::Public)
        }
        C::FuncBody | C::ElseBody => kind.is_statement_start() || is_p(kind, PunctuationId::RBrace),
        C::TypeDescriptor => {
            kind.is_operator(OperatorId::Eq)
                || kind.is_operator(OperatorId::Gt)
                || matches!(
                    kind,
                    SyntaxKind::Punctuation(
                        PunctuationId::Ellipsis
                            | PunctuationId::RParen
                            | PunctuationId::Comma
                            | PunctuationId::Semicolon
                            | PunctuationId::LBrace
                            | PunctuationId::Question
                    )
                )
        }
        C::RecordBodyStart => {
            kind.is_operator(OperatorId::Star)
                || kind.is_type_desc_start()
                || is_p(kind, PunctuationId::RBrace)
                || is_p(kind, PunctuationId::RBracePipe)
        }
        C::FieldDescriptorRhs => {
            kind.is_expression_start()
                || kind.is_type_desc_start()
                || kind.is_operator(OperatorId::Star)
                || is_p(kind, PunctuationId::RBrace)
                || is_p(kind, PunctuationId::RBracePipe)
        }
        C::ObjectFieldRhs => {
            kind.is_expression_start() || is_object_member_start(kind) || is_p(kind, PunctuationId::RBrace)
        }
        C::AssignmentOrVarDeclRhs => kind.is_expression_start() || is_p(kind, PunctuationId::Semicolon),
        C::VarDeclStmtRhs => {
            kind.is_expression_start() || kind.is_statement_start() || is_p(kind, PunctuationId::RBrace)
        }
        C::ReturnStmtRhs => kind.is_statement_start() || is_p(kind, PunctuationId::RBrace),
        C::Expression | C::TerminalExpression => is_operand_follower(kind) || is_p(kind, PunctuationId::LBrace),
        _ => false,
    }
}

/// Tokens that let the enclosing rule at `ctx` resume after something is synthesized.
fn anchors(ctx: RuleContext, kind: SyntaxKind) -> bool {
    use RuleContext as C;
    match ctx {
        C::CompUnit => kind == SyntaxKind::Eof || kind.is_top_level_start(),
        C::ImportDecl => {
            is_p(kind, PunctuationId::Semicolon)
                || is_p(kind, PunctuationId::Dot)
                || is_kw(kind, KeywordId::Version)
                || is_kw(kind, KeywordId::As)
                || kind.is_operator(OperatorId::Slash)
        }
        C::FuncDefinition => {
            is_p(kind, PunctuationId::LParen)
                || is_p(kind, PunctuationId::RParen)
                || is_p(kind, PunctuationId::LBrace)
                || kind.is_operator(OperatorId::Eq)
                || is_kw(kind, KeywordId::Returns)
                || is_kw(kind, KeywordId::External)
        }
        C::ParamList | C::ArgList => is_p(kind, PunctuationId::Comma) || is_p(kind, PunctuationId::RParen),
        C::Parameter => {
            is_p(kind, PunctuationId::Comma)
                || is_p(kind, PunctuationId::RParen)
                || is_p(kind, PunctuationId::Ellipsis)
                || kind.is_operator(OperatorId::Eq)
        }
        C::FuncBodyBlock | C::BlockStmt => is_p(kind, PunctuationId::RBrace),
        C::RecordBody => is_p(kind, PunctuationId::RBrace) || is_p(kind, PunctuationId::RBracePipe),
        C::ObjectBody => is_p(kind, PunctuationId::RBrace),
        C::TypeDefinition
        | C::VarDeclStmt
        | C::AssignmentStmt
        | C::CompoundAssignmentStmt
        | C::CallStmt
        | C::ReturnStmt => is_p(kind, PunctuationId::Semicolon),
        C::IfBlock | C::WhileBlock => is_p(kind, PunctuationId::LBrace) || is_kw(kind, KeywordId::Else),
        _ => false,
    }
}

/// Whether `kind` is an anchor of an enclosing rule.
///
/// ## Notes
/// - The scan runs from the top of the stack and stops after the first scope context; the
///   compilation unit's anchors always apply.
pub fn anchored(stack: &ContextStack, kind: SyntaxKind) -> bool {
    for ctx in stack.iter_from_top() {
        if anchors(ctx, kind) {
            return true;
        }
        if ctx.is_scope() {
            break;
        }
    }
    anchors(RuleContext::CompUnit, kind)
}

/// The kind to synthesize at `ctx` when the offending token is `token`.
pub fn insertion_kind(ctx: RuleContext, token: SyntaxKind) -> SyntaxKind {
    use RuleContext as C;
    if let Some(leaf) = leaf_kind(ctx) {
        return leaf;
    }
    let semicolon = punct(PunctuationId::Semicolon);
    let assign = SyntaxKind::Operator(OperatorId::Eq);
    match ctx {
        C::TopLevelNode | C::TopLevelNodeWithoutModifier | C::ObjectMember | C::ObjectMemberWithoutVisibility => {
            SyntaxKind::Keyword(KeywordId::Function)
        }
        C::FuncBody | C::ElseBody | C::RecordBodyStart => punct(PunctuationId::LBrace),
        C::ParameterRhs => {
            if token.is_type_desc_start() || is_kw(token, KeywordId::Public) || !token.is_expression_start() {
                punct(PunctuationId::Comma)
            } else {
                assign
            }
        }
        C::FieldDescriptorRhs | C::ObjectFieldRhs => {
            if token.is_expression_start() && !token.is_type_desc_start() {
                assign
            } else {
                semicolon
            }
        }
        C::VarDeclStmtRhs => {
            if token.is_statement_start() || !token.is_expression_start() {
                semicolon
            } else {
                assign
            }
        }
        C::AssignmentOrVarDeclRhs => {
            if token.is_expression_start() {
                assign
            } else {
                SyntaxKind::Identifier
            }
        }
        C::ReturnStmtRhs => semicolon,
        _ => SyntaxKind::Identifier,
    }
}

/// Message for a synthesized `kind` at `ctx`.
pub fn missing_message(ctx: RuleContext, kind: SyntaxKind) -> String {
    match ctx {
        RuleContext::Expression | RuleContext::TerminalExpression => "missing expression".to_string(),
        RuleContext::TypeDescriptor => "missing type descriptor".to_string(),
        _ => format!("missing {}", kind.describe()),
    }
}

// --- helpers -----------------------------------------------------------------

fn punct(id: PunctuationId) -> SyntaxKind {
    SyntaxKind::Punctuation(id)
}

fn is_p(kind: SyntaxKind, id: PunctuationId) -> bool {
    kind.is_punctuation(id)
}

fn is_kw(kind: SyntaxKind, id: KeywordId) -> bool {
    kind.is_keyword(id)
}

/// Tokens that may follow a complete operand.
fn is_operand_follower(kind: SyntaxKind) -> bool {
    kind.is_binary_operator()
        || kind.is_operator(OperatorId::Eq)
        || kind.is_compound_assignment()
        || matches!(
            kind,
            SyntaxKind::Punctuation(
                PunctuationId::Semicolon
                    | PunctuationId::Comma
                    | PunctuationId::RParen
                    | PunctuationId::RBracket
                    | PunctuationId::RBrace
                    | PunctuationId::LParen
                    | PunctuationId::LBracket
                    | PunctuationId::Dot
            )
        )
}

/// Tokens that begin an object member other than a visibility qualifier.
fn is_object_member_start(kind: SyntaxKind) -> bool {
    kind.is_operator(OperatorId::Star) || is_kw(kind, KeywordId::Remote) || is_kw(kind, KeywordId::Function)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(ctx: RuleContext, token: SyntaxKind, next: SyntaxKind, stack: &'a ContextStack) -> RecoveryInput<'a> {
        RecoveryInput {
            ctx,
            token,
            next,
            position: 3,
            stack,
            max_depth: 64,
        }
    }

    fn body_stack() -> ContextStack {
        ContextStack::seeded(&[RuleContext::CompUnit, RuleContext::FuncDefinition, RuleContext::FuncBodyBlock])
    }

    #[test]
    fn end_of_input_is_always_completed() {
        let stack = body_stack();
        let mut engine = RecoveryEngine::new();
        let d = engine.decide(input(RuleContext::CloseBrace, SyntaxKind::Eof, SyntaxKind::Eof, &stack));
        assert_eq!(d, Decision::Insert(punct(PunctuationId::RBrace)));
    }

    #[test]
    fn stray_token_before_the_expected_one_is_deleted() {
        let stack = body_stack();
        let mut engine = RecoveryEngine::new();
        let d = engine.decide(input(
            RuleContext::Semicolon,
            SyntaxKind::DecimalIntegerLiteral,
            punct(PunctuationId::Semicolon),
            &stack,
        ));
        assert_eq!(d, Decision::Remove);
    }

    #[test]
    fn follower_of_the_missing_token_triggers_insertion() {
        let stack = body_stack();
        let mut engine = RecoveryEngine::new();
        let d = engine.decide(input(
            RuleContext::Semicolon,
            punct(PunctuationId::RBrace),
            SyntaxKind::Eof,
            &stack,
        ));
        assert_eq!(d, Decision::Insert(punct(PunctuationId::Semicolon)));
    }

    #[test]
    fn a_second_insert_at_the_same_spot_becomes_a_removal() {
        let stack = body_stack();
        let mut engine = RecoveryEngine::new();
        let at = input(RuleContext::Semicolon, punct(PunctuationId::RBrace), SyntaxKind::Eof, &stack);
        assert!(matches!(engine.decide(at), Decision::Insert(_)));
        assert_eq!(engine.decide(at), Decision::Remove);
    }

    #[test]
    fn nesting_bound_forces_removal() {
        let stack = body_stack();
        let mut engine = RecoveryEngine::new();
        let mut at = input(RuleContext::Semicolon, punct(PunctuationId::RBrace), SyntaxKind::Eof, &stack);
        at.max_depth = 3;
        assert_eq!(engine.decide(at), Decision::Remove);
    }

    #[test]
    fn anchor_scan_stops_at_the_nearest_scope() {
        let stack = ContextStack::seeded(&[
            RuleContext::CompUnit,
            RuleContext::FuncDefinition,
            RuleContext::FuncBodyBlock,
            RuleContext::Statement,
            RuleContext::CallStmt,
            RuleContext::Expression,
            RuleContext::ArgList,
        ]);
        assert!(anchored(&stack, punct(PunctuationId::RParen)));
        // `{` anchors the function definition, which is behind the argument-list scope.
        assert!(!anchored(&stack, punct(PunctuationId::LBrace)));
        // Compilation-unit anchors always apply.
        assert!(anchored(&stack, SyntaxKind::Keyword(KeywordId::Function)));
    }

    #[test]
    fn probe_accepts_the_expected_token() {
        let stack = body_stack();
        let engine = RecoveryEngine::new();
        let p = engine.probe(input(
            RuleContext::Semicolon,
            punct(PunctuationId::Semicolon),
            SyntaxKind::Eof,
            &stack,
        ));
        assert_eq!(p, Probe::Accept);
    }

    #[test]
    fn pending_insertion_is_consumed_once() {
        let mut engine = RecoveryEngine::new();
        let brace = punct(PunctuationId::LBrace);
        engine.set_pending(5, brace);
        assert!(!engine.take_pending(5, SyntaxKind::Identifier));
        assert!(engine.take_pending(5, brace));
        assert!(!engine.take_pending(5, brace));
    }

    #[test]
    fn insertions_never_repeat_the_offending_kind() {
        let stack = body_stack();
        let contexts = [
            RuleContext::ParameterRhs,
            RuleContext::VarDeclStmtRhs,
            RuleContext::FieldDescriptorRhs,
            RuleContext::AssignmentOrVarDeclRhs,
            RuleContext::TerminalExpression,
            RuleContext::FuncBody,
        ];
        let tokens = [
            SyntaxKind::Identifier,
            SyntaxKind::DecimalIntegerLiteral,
            punct(PunctuationId::Semicolon),
            punct(PunctuationId::RBrace),
            SyntaxKind::Operator(OperatorId::Eq),
        ];
        for ctx in contexts {
            for token in tokens {
                let mut engine = RecoveryEngine::new();
                if let Decision::Insert(kind) = engine.decide(input(ctx, token, SyntaxKind::Eof, &stack)) {
                    assert_ne!(kind, token, "{ctx:?} at {token:?}");
                }
            }
        }
    }
}
