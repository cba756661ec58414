//! Closed classification of the Python grammar nodes the analyzers consume.
//!
//! tree-sitter exposes node kinds as strings; matching on strings scattered
//! through every walker makes unsupported constructs an implicit fallthrough.
//! `NodeKind` narrows the grammar to the constructs this crate actually reads,
//! so each walker can match exhaustively and treat everything else as
//! `Other` on purpose.

use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    FunctionDef,
    ClassDef,
    DecoratedDef,
    Decorator,
    If,
    ElifClause,
    ElseClause,
    For,
    While,
    Try,
    ExceptClause,
    BooleanOperator,
    Ternary,
    Call,
    Raise,
    Assignment,
    ExpressionStatement,
    StringLiteral,
    Comment,
    Block,
    Other,
}

impl NodeKind {
    pub fn of(node: Node) -> Self {
        Self::from_kind(node.kind())
    }

    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "function_definition" => NodeKind::FunctionDef,
            "class_definition" => NodeKind::ClassDef,
            "decorated_definition" => NodeKind::DecoratedDef,
            "decorator" => NodeKind::Decorator,
            "if_statement" => NodeKind::If,
            "elif_clause" => NodeKind::ElifClause,
            "else_clause" => NodeKind::ElseClause,
            "for_statement" => NodeKind::For,
            "while_statement" => NodeKind::While,
            "try_statement" => NodeKind::Try,
            "except_clause" => NodeKind::ExceptClause,
            "boolean_operator" => NodeKind::BooleanOperator,
            "conditional_expression" => NodeKind::Ternary,
            "call" => NodeKind::Call,
            "raise_statement" => NodeKind::Raise,
            "assignment" => NodeKind::Assignment,
            "expression_statement" => NodeKind::ExpressionStatement,
            "string" | "concatenated_string" => NodeKind::StringLiteral,
            "comment" => NodeKind::Comment,
            "block" => NodeKind::Block,
            _ => NodeKind::Other,
        }
    }

    /// Nested definitions are analysis boundaries: walkers never descend
    /// into a `def` or `class` inside the target's body.
    pub fn is_definition(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDef | NodeKind::ClassDef | NodeKind::DecoratedDef
        )
    }
}

/// 1-based start line of a node (tree-sitter rows are 0-based).
pub(crate) fn start_line(node: Node) -> usize {
    node.start_position().row + 1
}

/// 1-based end line of a node.
pub(crate) fn end_line(node: Node) -> usize {
    node.end_position().row + 1
}
