//! Call-site collection and builtin classification.
//!
//! Every call occurrence is recorded, duplicates included, in source order.
//! The recorded name is the final identifier of the callee; attribute calls
//! keep their receiver text as a qualifier. Callees that are themselves
//! computed expressions (`handlers[kind]()`, `f()()`) have no static name
//! and are omitted.

use phf::phf_set;
use tree_sitter::Node;

use crate::analysis::analyzer::ParsedFile;
use crate::analysis::facts::CallSite;
use crate::analysis::nodes::{self, NodeKind};

/// Global callables of CPython 3.12. Compile-time table; versioned with the
/// crate rather than queried from a runtime.
static PYTHON_BUILTINS: phf::Set<&'static str> = phf_set! {
    "abs", "aiter", "all", "anext", "any", "ascii", "bin", "bool",
    "breakpoint", "bytearray", "bytes", "callable", "chr", "classmethod",
    "compile", "complex", "delattr", "dict", "dir", "divmod", "enumerate",
    "eval", "exec", "filter", "float", "format", "frozenset", "getattr",
    "globals", "hasattr", "hash", "help", "hex", "id", "input", "int",
    "isinstance", "issubclass", "iter", "len", "list", "locals", "map",
    "max", "memoryview", "min", "next", "object", "oct", "open", "ord",
    "pow", "print", "property", "range", "repr", "reversed", "round",
    "set", "setattr", "slice", "sorted", "staticmethod", "str", "sum",
    "super", "tuple", "type", "vars", "zip", "__import__",
};

/// True iff `name` is a Python builtin callable.
pub fn is_builtin(name: &str) -> bool {
    PYTHON_BUILTINS.contains(name)
}

/// Every call under `body`, in source order, nested definitions excluded.
pub(crate) fn collect(parsed: &ParsedFile, body: Node) -> Vec<CallSite> {
    let mut calls = Vec::new();
    walk(parsed, body, &mut calls);
    calls
}

fn walk(parsed: &ParsedFile, node: Node, out: &mut Vec<CallSite>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let kind = NodeKind::of(child);
        if kind.is_definition() {
            continue;
        }
        if kind == NodeKind::Call && !is_raised_constructor(child) {
            if let Some(site) = classify(parsed, child) {
                out.push(site);
            }
        }
        walk(parsed, child, out);
    }
}

/// `raise ValueError(...)` reports through the exception analyzer; counting
/// the constructor as an external call would double-report it. Calls inside
/// its arguments still count.
fn is_raised_constructor(call: Node) -> bool {
    call.parent()
        .is_some_and(|p| NodeKind::of(p) == NodeKind::Raise)
}

fn classify(parsed: &ParsedFile, call: Node) -> Option<CallSite> {
    let callee = call.child_by_field_name("function")?;
    let (name, qualifier) = match callee.kind() {
        "identifier" => (parsed.node_text(callee).to_string(), None),
        "attribute" => {
            let attr = callee.child_by_field_name("attribute")?;
            let receiver = callee.child_by_field_name("object")?;
            (
                parsed.node_text(attr).to_string(),
                Some(parsed.node_text(receiver).to_string()),
            )
        }
        _ => return None,
    };

    // Qualified calls are method/module lookups; the builtin table only
    // applies to bare names.
    let is_builtin = qualifier.is_none() && is_builtin(&name);

    Some(CallSite {
        name,
        qualifier,
        is_builtin,
        line: nodes::start_line(call),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::locate;
    use std::path::PathBuf;

    fn calls_of(source: &str, name: &str) -> Vec<CallSite> {
        let parsed = ParsedFile::parse(source.to_string(), PathBuf::from("test.py")).unwrap();
        let located = locate::find_definition(&parsed, name).unwrap();
        collect(&parsed, located.def.child_by_field_name("body").unwrap())
    }

    #[test]
    fn test_bare_builtin_call() {
        let calls = calls_of("def show(x):\n    print(len(x))\n", "show");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "print");
        assert!(calls[0].is_builtin);
        assert_eq!(calls[1].name, "len");
        assert!(calls[1].is_builtin);
    }

    #[test]
    fn test_attribute_call_keeps_final_identifier_and_qualifier() {
        let calls = calls_of(
            "def track(self, result):\n    self.history.append(result)\n",
            "track",
        );
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "append");
        assert_eq!(calls[0].qualifier.as_deref(), Some("self.history"));
        assert!(!calls[0].is_builtin);
    }

    #[test]
    fn test_qualified_call_is_never_builtin() {
        let calls = calls_of("def run(ctx):\n    ctx.eval('1 + 1')\n", "run");
        assert_eq!(calls[0].name, "eval");
        assert!(!calls[0].is_builtin);
    }

    #[test]
    fn test_duplicates_preserved_in_source_order() {
        let calls = calls_of(
            "def log2(a, b):\n    emit(a)\n    emit(b)\n",
            "log2",
        );
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].line, 2);
        assert_eq!(calls[1].line, 3);
    }

    #[test]
    fn test_computed_callee_is_omitted() {
        let calls = calls_of(
            "def dispatch(handlers, kind):\n    handlers[kind]()\n    finish()\n",
            "dispatch",
        );
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "finish");
    }

    #[test]
    fn test_raised_constructor_is_not_a_call() {
        let calls = calls_of(
            "def fail(x):\n    raise ValueError(describe(x))\n",
            "fail",
        );
        // The constructor belongs to the exception report; its argument is
        // still a real call.
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "describe");
    }

    #[test]
    fn test_calls_in_nested_def_are_excluded() {
        let calls = calls_of(
            "def outer():\n    def inner():\n        hidden()\n    return inner\n",
            "outer",
        );
        assert!(calls.is_empty());
    }
}
