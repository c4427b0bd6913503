//! Rule contexts: markers naming the nonterminal being parsed.
//!
//! Grammar rules push a context on entry and pop it on exit, strictly nested. The stack is
//! consulted only by the recovery engine, to estimate what may legally follow the offending
//! token; grammar logic never branches on it.
//!
//! Contexts come in three flavours (see [`RuleContext::role`]):
//! - *rules* pushed onto the stack while a multi-token construct is parsed,
//! - *dispatch points* where a rule chooses between alternatives,
//! - *leaves* naming a single expected token.

/// Tag for a grammar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleContext {
    // ========== Module level ==========
    CompUnit,
    TopLevelNode,
    TopLevelNodeWithoutModifier,
    ImportDecl,
    TypeDefinition,

    // ========== Functions ==========
    FuncDefinition,
    ParamList,
    Parameter,
    AfterParameterType,
    ParameterRhs,
    FuncBody,
    FuncBodyBlock,

    // ========== Type descriptors ==========
    TypeDescriptor,
    RecordBodyStart,
    RecordBody,
    RecordField,
    FieldDescriptorRhs,
    ObjectBody,
    ObjectMember,
    ObjectMemberWithoutVisibility,
    ObjectFieldRhs,

    // ========== Statements ==========
    Statement,
    AssignmentOrVarDeclRhs,
    VarDeclStmt,
    VarDeclStmtRhs,
    AssignmentStmt,
    CompoundAssignmentStmt,
    CallStmt,
    IfBlock,
    ElseBody,
    WhileBlock,
    BlockStmt,
    ReturnStmt,
    ReturnStmtRhs,

    // ========== Expressions ==========
    Expression,
    TerminalExpression,
    ArgList,

    // ========== Single tokens ==========
    Semicolon,
    Comma,
    AssignOp,
    OpenParenthesis,
    CloseParenthesis,
    OpenBrace,
    CloseBrace,
    CloseBracePipe,
    CloseBracket,
    GtToken,
    Identifier,
    VariableName,
    FuncName,
    TypeName,
    FieldName,
    VersionNumber,
    FunctionKeyword,
    ExternalKeyword,
    ObjectKeyword,
}

/// How a context participates in parsing and recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextRole {
    /// Pushed for the duration of a construct; contributes anchors to recovery.
    Rule,
    /// Pushed, and also bounds the anchor scan: enclosing contexts (other than the compilation
    /// unit) are not consulted past it.
    Scope,
    /// A choice between alternatives; never pushed.
    Dispatch,
    /// A single expected token; never pushed.
    Leaf,
}

impl RuleContext {
    pub fn role(self) -> ContextRole {
        use RuleContext as C;
        match self {
            C::CompUnit
            | C::ImportDecl
            | C::TypeDefinition
            | C::FuncDefinition
            | C::VarDeclStmt
            | C::AssignmentStmt
            | C::CompoundAssignmentStmt
            | C::CallStmt
            | C::IfBlock
            | C::WhileBlock
            | C::ReturnStmt
            | C::Expression => ContextRole::Rule,

            C::ParamList | C::FuncBodyBlock | C::BlockStmt | C::RecordBody | C::ObjectBody | C::ArgList => {
                ContextRole::Scope
            }

            // Pushed while parsed, and also a dispatch point on their first token.
            C::Parameter | C::Statement | C::TypeDescriptor => ContextRole::Rule,

            C::TopLevelNode
            | C::TopLevelNodeWithoutModifier
            | C::AfterParameterType
            | C::ParameterRhs
            | C::FuncBody
            | C::RecordBodyStart
            | C::RecordField
            | C::FieldDescriptorRhs
            | C::ObjectMember
            | C::ObjectMemberWithoutVisibility
            | C::ObjectFieldRhs
            | C::AssignmentOrVarDeclRhs
            | C::VarDeclStmtRhs
            | C::ElseBody
            | C::ReturnStmtRhs
            | C::TerminalExpression => ContextRole::Dispatch,

            C::Semicolon
            | C::Comma
            | C::AssignOp
            | C::OpenParenthesis
            | C::CloseParenthesis
            | C::OpenBrace
            | C::CloseBrace
            | C::CloseBracePipe
            | C::CloseBracket
            | C::GtToken
            | C::Identifier
            | C::VariableName
            | C::FuncName
            | C::TypeName
            | C::FieldName
            | C::VersionNumber
            | C::FunctionKeyword
            | C::ExternalKeyword
            | C::ObjectKeyword => ContextRole::Leaf,
        }
    }

    pub fn is_leaf(self) -> bool {
        self.role() == ContextRole::Leaf
    }

    pub fn is_scope(self) -> bool {
        self.role() == ContextRole::Scope
    }

    /// Contexts that may be pushed onto the stack.
    pub fn is_pushable(self) -> bool {
        matches!(self.role(), ContextRole::Rule | ContextRole::Scope)
    }
}

/// The stack of rule contexts for one parse session.
#[derive(Debug, Clone, Default)]
pub struct ContextStack {
    stack: Vec<RuleContext>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack pre-seeded with `contexts`, bottom first.
    pub fn seeded(contexts: &[RuleContext]) -> Self {
        Self {
            stack: contexts.to_vec(),
        }
    }

    pub fn push(&mut self, ctx: RuleContext) {
        debug_assert!(ctx.is_pushable(), "{ctx:?} is not a pushable context");
        self.stack.push(ctx);
    }

    /// Pop `ctx`, which must be the top of the stack.
    pub fn pop(&mut self, ctx: RuleContext) {
        let popped = self.stack.pop();
        debug_assert_eq!(popped, Some(ctx), "context stack out of balance");
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Contexts from the top of the stack down.
    pub fn iter_from_top(&self) -> impl Iterator<Item = RuleContext> + '_ {
        self.stack.iter().rev().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_is_strictly_nested() {
        let mut stack = ContextStack::seeded(&[RuleContext::CompUnit]);
        stack.push(RuleContext::FuncDefinition);
        stack.push(RuleContext::ParamList);
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.iter_from_top().next(), Some(RuleContext::ParamList));
        stack.pop(RuleContext::ParamList);
        stack.pop(RuleContext::FuncDefinition);
        assert_eq!(
            stack.iter_from_top().collect::<Vec<_>>(),
            vec![RuleContext::CompUnit]
        );
    }

    #[test]
    fn leaves_and_dispatch_points_are_never_pushed() {
        assert!(!RuleContext::Semicolon.is_pushable());
        assert!(!RuleContext::TerminalExpression.is_pushable());
        assert!(RuleContext::Statement.is_pushable());
        assert!(RuleContext::ArgList.is_scope());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of balance")]
    fn popping_the_wrong_context_is_caught() {
        let mut stack = ContextStack::seeded(&[RuleContext::CompUnit]);
        stack.push(RuleContext::Expression);
        stack.pop(RuleContext::Statement);
    }
}
