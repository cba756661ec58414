//! Branch enumeration for cyclomatic complexity.
//!
//! Decision points counted: `if`, each `elif`, `for`, `while`, each `except`
//! clause, each `and`/`or` occurrence, and each conditional expression. A
//! plain `else`, a loop `else`, and a `try` body add nothing. The walk stops
//! at nested function and class definitions, so their internals never count
//! against the enclosing target.

use tree_sitter::Node;

use crate::analysis::analyzer::ParsedFile;
use crate::analysis::exceptions::caught_type;
use crate::analysis::facts::{Branch, BranchKind};
use crate::analysis::nodes::{self, NodeKind};

/// All decision points under `body`, in source order.
pub(crate) fn collect(parsed: &ParsedFile, body: Node) -> Vec<Branch> {
    let mut branches = Vec::new();
    walk(parsed, body, &mut branches);
    branches
}

fn walk(parsed: &ParsedFile, node: Node, out: &mut Vec<Branch>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let kind = NodeKind::of(child);
        if kind.is_definition() {
            continue;
        }
        match kind {
            NodeKind::If => push(out, BranchKind::If, condition_text(parsed, child), child),
            NodeKind::ElifClause => {
                push(out, BranchKind::Elif, condition_text(parsed, child), child)
            }
            NodeKind::For => push(out, BranchKind::For, String::new(), child),
            NodeKind::While => push(out, BranchKind::While, condition_text(parsed, child), child),
            NodeKind::ExceptClause => push(
                out,
                BranchKind::Except,
                caught_type(parsed, child).unwrap_or_default(),
                child,
            ),
            NodeKind::BooleanOperator => {
                let op = child
                    .child_by_field_name("operator")
                    .map(|o| parsed.node_text(o))
                    .unwrap_or("and");
                let kind = if op == "or" {
                    BranchKind::BooleanOr
                } else {
                    BranchKind::BooleanAnd
                };
                push(out, kind, parsed.node_text(child).to_string(), child);
            }
            NodeKind::Ternary => push(
                out,
                BranchKind::Ternary,
                ternary_condition(parsed, child),
                child,
            ),
            _ => {}
        }
        walk(parsed, child, out);
    }
}

fn push(out: &mut Vec<Branch>, kind: BranchKind, condition: String, node: Node) {
    out.push(Branch {
        kind,
        condition,
        line: nodes::start_line(node),
    });
}

fn condition_text(parsed: &ParsedFile, node: Node) -> String {
    node.child_by_field_name("condition")
        .map(|c| parsed.node_text(c).to_string())
        .unwrap_or_default()
}

/// The guard of `value if guard else other` is the child after the `if`
/// token.
fn ternary_condition(parsed: &ParsedFile, node: Node) -> String {
    let mut cursor = node.walk();
    let mut saw_if = false;
    for child in node.children(&mut cursor) {
        if saw_if {
            return parsed.node_text(child).to_string();
        }
        if child.kind() == "if" {
            saw_if = true;
        }
    }
    String::new()
}
