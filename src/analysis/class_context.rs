//! Enclosing-class summary for method targets.
//!
//! Attribute discovery is a fold across every method in the class body:
//! each `self.<name> = ...` target lands in one set scoped to this
//! invocation, so the result is independent of method declaration order.

use std::collections::BTreeSet;

use tree_sitter::Node;

use crate::analysis::analyzer::ParsedFile;
use crate::analysis::facts::ClassContext;
use crate::analysis::nodes::NodeKind;

pub(crate) fn build(parsed: &ParsedFile, class_def: Node, target: &str) -> ClassContext {
    let class_name = class_def
        .child_by_field_name("name")
        .map(|n| parsed.node_text(n).to_string())
        .unwrap_or_default();

    let base_classes = class_def
        .child_by_field_name("superclasses")
        .map(|args| {
            let mut cursor = args.walk();
            args.named_children(&mut cursor)
                .filter(|a| !matches!(a.kind(), "keyword_argument" | "comment"))
                .map(|a| parsed.node_text(a).to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut other_methods = Vec::new();
    let mut attributes = BTreeSet::new();

    if let Some(body) = class_def.child_by_field_name("body") {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            let Some(def) = method_definition(child) else {
                continue;
            };
            let name = def
                .child_by_field_name("name")
                .map(|n| parsed.node_text(n))
                .unwrap_or_default();
            if name != target {
                other_methods.push(name.to_string());
            }
            if let Some(method_body) = def.child_by_field_name("body") {
                collect_self_attributes(parsed, method_body, &mut attributes);
            }
        }
    }

    ClassContext {
        class_name,
        base_classes,
        class_attributes: attributes.into_iter().collect(),
        other_methods,
        is_dataclass: is_dataclass(parsed, class_def),
    }
}

/// A direct child of the class body that declares a method, unwrapping
/// decorators.
fn method_definition(node: Node) -> Option<Node<'_>> {
    match NodeKind::of(node) {
        NodeKind::FunctionDef => Some(node),
        NodeKind::DecoratedDef => {
            let mut cursor = node.walk();
            let found = node
                .children(&mut cursor)
                .find(|c| NodeKind::of(*c) == NodeKind::FunctionDef);
            found
        }
        _ => None,
    }
}

fn collect_self_attributes(parsed: &ParsedFile, node: Node, out: &mut BTreeSet<String>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let kind = NodeKind::of(child);
        if kind.is_definition() {
            continue;
        }
        if kind == NodeKind::Assignment {
            if let Some(left) = child.child_by_field_name("left") {
                collect_target(parsed, left, out);
            }
        }
        collect_self_attributes(parsed, child, out);
    }
}

fn collect_target(parsed: &ParsedFile, target: Node, out: &mut BTreeSet<String>) {
    match target.kind() {
        "attribute" => {
            let receiver = target.child_by_field_name("object");
            let attr = target.child_by_field_name("attribute");
            if let (Some(receiver), Some(attr)) = (receiver, attr) {
                if receiver.kind() == "identifier" && parsed.node_text(receiver) == "self" {
                    out.insert(parsed.node_text(attr).to_string());
                }
            }
        }
        // self.a, self.b = pair
        "pattern_list" | "tuple_pattern" => {
            let mut cursor = target.walk();
            for child in target.named_children(&mut cursor) {
                collect_target(parsed, child, out);
            }
        }
        _ => {}
    }
}

fn is_dataclass(parsed: &ParsedFile, class_def: Node) -> bool {
    let Some(parent) = class_def.parent() else {
        return false;
    };
    if NodeKind::of(parent) != NodeKind::DecoratedDef {
        return false;
    }
    let mut cursor = parent.walk();
    let is_dataclass = parent
        .children(&mut cursor)
        .filter(|c| NodeKind::of(*c) == NodeKind::Decorator)
        .any(|d| {
            let text = parsed.node_text(d).trim_start_matches('@').trim();
            let head = text.split('(').next().unwrap_or(text).trim();
            head.rsplit('.').next() == Some("dataclass")
        });
    is_dataclass
}
