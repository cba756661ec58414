//! Signature extraction: parameters, annotations, decorators, flags.

use tree_sitter::Node;

use crate::analysis::analyzer::ParsedFile;
use crate::analysis::facts::{Parameter, ParameterKind, Signature};
use crate::analysis::locate::Located;
use crate::analysis::nodes::NodeKind;

pub(crate) fn extract(parsed: &ParsedFile, located: &Located) -> Signature {
    let def = located.def;

    let name = def
        .child_by_field_name("name")
        .map(|n| parsed.node_text(n).to_string())
        .unwrap_or_default();

    let parameters = def
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(parsed, p))
        .unwrap_or_default();

    let return_type = def
        .child_by_field_name("return_type")
        .map(|n| parsed.node_text(n).to_string());

    let mut cursor = def.walk();
    let is_async = def.children(&mut cursor).any(|c| c.kind() == "async");

    Signature {
        name,
        parameters,
        return_type,
        decorators: extract_decorators(parsed, located.decl),
        is_method: located.class_def.is_some(),
        is_async,
    }
}

/// Walk the parameter list in declaration order.
///
/// Kind tracking: a bare `*` (or a `*args` splat) switches subsequent
/// parameters to keyword-only; a `/` retroactively marks everything before
/// it positional-only.
fn extract_parameters(parsed: &ParsedFile, params_node: Node) -> Vec<Parameter> {
    let mut params = Vec::new();
    let mut keyword_only = false;
    let mut cursor = params_node.walk();

    for child in params_node.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                params.push(Parameter {
                    name: parsed.node_text(child).to_string(),
                    annotation: None,
                    default_value: None,
                    kind: plain_kind(keyword_only),
                });
            }
            "typed_parameter" => {
                let annotation = child
                    .child_by_field_name("type")
                    .map(|n| parsed.node_text(n).to_string());
                // Typed *args/**kwargs nest the identifier inside the splat
                // pattern node.
                if let Some(splat) = child_of_kind(child, "list_splat_pattern") {
                    params.push(Parameter {
                        name: splat_name(parsed, splat),
                        annotation,
                        default_value: None,
                        kind: ParameterKind::VarPositional,
                    });
                    keyword_only = true;
                } else if let Some(splat) = child_of_kind(child, "dictionary_splat_pattern") {
                    params.push(Parameter {
                        name: splat_name(parsed, splat),
                        annotation,
                        default_value: None,
                        kind: ParameterKind::VarKeyword,
                    });
                } else {
                    params.push(Parameter {
                        name: child_of_kind(child, "identifier")
                            .map(|n| parsed.node_text(n).to_string())
                            .unwrap_or_default(),
                        annotation,
                        default_value: None,
                        kind: plain_kind(keyword_only),
                    });
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                params.push(Parameter {
                    name: child
                        .child_by_field_name("name")
                        .map(|n| parsed.node_text(n).to_string())
                        .unwrap_or_default(),
                    annotation: child
                        .child_by_field_name("type")
                        .map(|n| parsed.node_text(n).to_string()),
                    default_value: child
                        .child_by_field_name("value")
                        .map(|n| parsed.node_text(n).to_string()),
                    kind: plain_kind(keyword_only),
                });
            }
            "list_splat_pattern" => {
                params.push(Parameter {
                    name: splat_name(parsed, child),
                    annotation: None,
                    default_value: None,
                    kind: ParameterKind::VarPositional,
                });
                keyword_only = true;
            }
            "dictionary_splat_pattern" => {
                params.push(Parameter {
                    name: splat_name(parsed, child),
                    annotation: None,
                    default_value: None,
                    kind: ParameterKind::VarKeyword,
                });
            }
            "*" | "keyword_separator" => {
                keyword_only = true;
            }
            "/" | "positional_separator" => {
                for p in params.iter_mut() {
                    p.kind = ParameterKind::PositionalOnly;
                }
            }
            _ => {}
        }
    }

    params
}

fn plain_kind(keyword_only: bool) -> ParameterKind {
    if keyword_only {
        ParameterKind::KeywordOnly
    } else {
        ParameterKind::Positional
    }
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Identifier inside a `*args` / `**kwargs` pattern.
fn splat_name(parsed: &ParsedFile, splat: Node) -> String {
    child_of_kind(splat, "identifier")
        .map(|n| parsed.node_text(n).to_string())
        .unwrap_or_default()
}

/// Decorator expressions in declaration order, `@` stripped, text otherwise
/// raw.
fn extract_decorators(parsed: &ParsedFile, decl: Node) -> Vec<String> {
    if NodeKind::of(decl) != NodeKind::DecoratedDef {
        return Vec::new();
    }
    let mut cursor = decl.walk();
    decl.children(&mut cursor)
        .filter(|c| NodeKind::of(*c) == NodeKind::Decorator)
        .map(|d| parsed.node_text(d).trim_start_matches('@').trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::locate;
    use std::path::PathBuf;

    fn signature_of(source: &str, name: &str) -> Signature {
        let parsed = ParsedFile::parse(source.to_string(), PathBuf::from("test.py")).unwrap();
        let located = locate::find_definition(&parsed, name).unwrap();
        extract(&parsed, &located)
    }

    #[test]
    fn test_plain_parameters() {
        let sig = signature_of("def add(a, b):\n    return a + b\n", "add");
        assert_eq!(sig.name, "add");
        assert_eq!(sig.parameters.len(), 2);
        assert_eq!(sig.parameters[0].name, "a");
        assert_eq!(sig.parameters[0].kind, ParameterKind::Positional);
        assert!(sig.return_type.is_none());
        assert!(!sig.is_method);
        assert!(!sig.is_async);
    }

    #[test]
    fn test_annotations_defaults_and_return_type() {
        let sig = signature_of(
            "def scale(value: float, factor: float = 2.0) -> float:\n    return value * factor\n",
            "scale",
        );
        assert_eq!(sig.parameters[0].annotation.as_deref(), Some("float"));
        assert_eq!(sig.parameters[0].default_value, None);
        assert_eq!(sig.parameters[1].annotation.as_deref(), Some("float"));
        assert_eq!(sig.parameters[1].default_value.as_deref(), Some("2.0"));
        assert_eq!(sig.return_type.as_deref(), Some("float"));
    }

    #[test]
    fn test_variadic_and_keyword_only() {
        let sig = signature_of(
            "def call(fn, *args: int, retries=3, **kwargs):\n    pass\n",
            "call",
        );
        let kinds: Vec<_> = sig.parameters.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParameterKind::Positional,
                ParameterKind::VarPositional,
                ParameterKind::KeywordOnly,
                ParameterKind::VarKeyword,
            ]
        );
        assert_eq!(sig.parameters[1].name, "args");
        assert_eq!(sig.parameters[1].annotation.as_deref(), Some("int"));
        assert_eq!(sig.parameters[3].name, "kwargs");
    }

    #[test]
    fn test_bare_star_and_slash_separators() {
        let sig = signature_of("def f(a, b, /, c, *, d):\n    pass\n", "f");
        let kinds: Vec<_> = sig.parameters.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParameterKind::PositionalOnly,
                ParameterKind::PositionalOnly,
                ParameterKind::Positional,
                ParameterKind::KeywordOnly,
            ]
        );
    }

    #[test]
    fn test_decorators_in_declaration_order() {
        let sig = signature_of(
            "@outer\n@retry(times=3)\ndef task():\n    pass\n",
            "task",
        );
        assert_eq!(sig.decorators, vec!["outer", "retry(times=3)"]);
    }

    #[test]
    fn test_async_method_flags() {
        let source = "class Client:\n    @staticmethod\n    async def ping(host):\n        pass\n";
        let sig = signature_of(source, "ping");
        assert!(sig.is_async);
        // Lexical position decides, not the receiver parameter.
        assert!(sig.is_method);
        assert_eq!(sig.decorators, vec!["staticmethod"]);
    }
}
