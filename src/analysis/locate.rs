//! Declaration lookup.
//!
//! Finds the target definition by exact name, walking every function and
//! method definition depth-first in source order, nested scopes included.
//! When several definitions share a name the first one encountered wins;
//! that is a documented policy, not an error.

use tree_sitter::Node;

use crate::analysis::analyzer::ParsedFile;
use crate::analysis::facts::{DeclarationKind, DeclarationSummary};
use crate::analysis::nodes::{self, NodeKind};

/// A located definition and its lexical surroundings.
pub(crate) struct Located<'t> {
    /// The `function_definition` node itself.
    pub def: Node<'t>,
    /// Outermost node of the declaration: the `decorated_definition` when
    /// decorators are present, otherwise the definition itself.
    pub decl: Node<'t>,
    /// Enclosing `class_definition` when the target is a method.
    pub class_def: Option<Node<'t>>,
}

/// Find the first definition named `name`, or `None`.
pub(crate) fn find_definition<'t>(parsed: &'t ParsedFile, name: &str) -> Option<Located<'t>> {
    let def = find_in(parsed, parsed.root(), name)?;
    Some(locate(def))
}

fn find_in<'t>(parsed: &ParsedFile, node: Node<'t>, name: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if NodeKind::of(child) == NodeKind::FunctionDef {
            if let Some(n) = child.child_by_field_name("name") {
                if parsed.node_text(n) == name {
                    return Some(child);
                }
            }
        }
        if let Some(found) = find_in(parsed, child, name) {
            return Some(found);
        }
    }
    None
}

fn locate(def: Node) -> Located<'_> {
    let decl = match def.parent() {
        Some(p) if NodeKind::of(p) == NodeKind::DecoratedDef => p,
        _ => def,
    };
    Located {
        def,
        decl,
        class_def: enclosing_class(def),
    }
}

/// The class whose body immediately contains this definition, if any.
///
/// A definition nested inside another function is not a method even when
/// that function lives in a class.
fn enclosing_class(def: Node) -> Option<Node<'_>> {
    let mut scope = def.parent()?;
    if NodeKind::of(scope) == NodeKind::DecoratedDef {
        scope = scope.parent()?;
    }
    if NodeKind::of(scope) != NodeKind::Block {
        return None;
    }
    let owner = scope.parent()?;
    match NodeKind::of(owner) {
        NodeKind::ClassDef => Some(owner),
        _ => None,
    }
}

/// Every function and method in the file, in source order.
pub(crate) fn declarations(parsed: &ParsedFile) -> Vec<DeclarationSummary> {
    let mut out = Vec::new();
    collect(parsed, parsed.root(), &mut out);
    out
}

fn collect(parsed: &ParsedFile, node: Node, out: &mut Vec<DeclarationSummary>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if NodeKind::of(child) == NodeKind::FunctionDef {
            let name = child
                .child_by_field_name("name")
                .map(|n| parsed.node_text(n).to_string())
                .unwrap_or_default();
            let class_name = enclosing_class(child).and_then(|class| {
                class
                    .child_by_field_name("name")
                    .map(|n| parsed.node_text(n).to_string())
            });
            let kind = if class_name.is_some() {
                DeclarationKind::Method
            } else {
                DeclarationKind::Function
            };
            out.push(DeclarationSummary {
                name,
                kind,
                class_name,
                line: nodes::start_line(child),
            });
        }
        collect(parsed, child, out);
    }
}
