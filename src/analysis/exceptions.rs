//! Raise and except site enumeration.

use tree_sitter::Node;

use crate::analysis::analyzer::ParsedFile;
use crate::analysis::facts::{ExceptionKind, ExceptionSite};
use crate::analysis::nodes::{self, NodeKind};

/// Every `raise` statement and `except` clause under `body`, in source
/// order. Nested definitions are skipped.
pub(crate) fn collect(parsed: &ParsedFile, body: Node) -> Vec<ExceptionSite> {
    let mut sites = Vec::new();
    walk(parsed, body, &mut sites);
    sites
}

fn walk(parsed: &ParsedFile, node: Node, out: &mut Vec<ExceptionSite>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let kind = NodeKind::of(child);
        if kind.is_definition() {
            continue;
        }
        match kind {
            NodeKind::Raise => out.push(ExceptionSite {
                kind: ExceptionKind::Raise,
                exception_class: raised_class(parsed, child),
                line: nodes::start_line(child),
            }),
            NodeKind::ExceptClause => out.push(ExceptionSite {
                kind: ExceptionKind::Except,
                exception_class: caught_type(parsed, child),
                line: nodes::start_line(child),
            }),
            _ => {}
        }
        walk(parsed, child, out);
    }
}

/// The exception type of a `raise`, when it is statically visible.
///
/// Only a direct call (`raise ValueError(...)`) names its type; a bare
/// `raise` or a re-raised variable resolves to `None`.
fn raised_class(parsed: &ParsedFile, raise_stmt: Node) -> Option<String> {
    let expr = raise_stmt.named_child(0)?;
    if NodeKind::of(expr) != NodeKind::Call {
        return None;
    }
    expr.child_by_field_name("function")
        .map(|callee| parsed.node_text(callee).to_string())
}

/// The caught type expression of an `except` clause; `None` for a bare
/// `except:`. Tuples keep their raw text (`(IOError, OSError)`).
pub(crate) fn caught_type(parsed: &ParsedFile, except_clause: Node) -> Option<String> {
    let mut cursor = except_clause.walk();
    for child in except_clause.named_children(&mut cursor) {
        match NodeKind::of(child) {
            NodeKind::Comment => continue,
            NodeKind::Block => return None,
            _ => {
                // `except E as e:` may wrap the type in an as_pattern; the
                // alias is not part of the type.
                let type_node = if child.kind() == "as_pattern" {
                    child.named_child(0)?
                } else {
                    child
                };
                return Some(parsed.node_text(type_node).to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::locate;
    use std::path::PathBuf;

    fn sites_of(source: &str, name: &str) -> Vec<ExceptionSite> {
        let parsed = ParsedFile::parse(source.to_string(), PathBuf::from("test.py")).unwrap();
        let located = locate::find_definition(&parsed, name).unwrap();
        collect(&parsed, located.def.child_by_field_name("body").unwrap())
    }

    #[test]
    fn test_raise_with_named_type() {
        let sites = sites_of(
            "def check(n):\n    if n < 0:\n        raise ValueError('negative')\n    return n\n",
            "check",
        );
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].kind, ExceptionKind::Raise);
        assert_eq!(sites[0].exception_class.as_deref(), Some("ValueError"));
        assert_eq!(sites[0].line, 3);
    }

    #[test]
    fn test_bare_reraise_has_no_class() {
        let sites = sites_of(
            "def fwd():\n    try:\n        work()\n    except Exception:\n        raise\n",
            "fwd",
        );
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].kind, ExceptionKind::Except);
        assert_eq!(sites[0].exception_class.as_deref(), Some("Exception"));
        assert_eq!(sites[1].kind, ExceptionKind::Raise);
        assert_eq!(sites[1].exception_class, None);
    }

    #[test]
    fn test_raised_variable_has_no_class() {
        let sites = sites_of(
            "def rethrow(err):\n    raise err\n",
            "rethrow",
        );
        assert_eq!(sites[0].exception_class, None);
    }

    #[test]
    fn test_bare_except_and_tuple_except() {
        let sites = sites_of(
            "def guard():\n    try:\n        step()\n    except (IOError, OSError):\n        pass\n    except:\n        pass\n",
            "guard",
        );
        assert_eq!(sites[0].exception_class.as_deref(), Some("(IOError, OSError)"));
        assert_eq!(sites[1].exception_class, None);
    }

    #[test]
    fn test_dotted_exception_type() {
        let sites = sites_of(
            "def wait(sock):\n    try:\n        sock.recv()\n    except socket.timeout as e:\n        raise errors.Timeout(e)\n",
            "wait",
        );
        assert_eq!(sites[0].exception_class.as_deref(), Some("socket.timeout"));
        assert_eq!(sites[1].exception_class.as_deref(), Some("errors.Timeout"));
    }
}
