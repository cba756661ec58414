//! Docstring extraction.
//!
//! A docstring is a string literal standing alone as the first statement of
//! the body. Quotes and string prefixes are removed and outer whitespace is
//! trimmed; inner formatting is preserved and no doc-tag parsing happens.

use tree_sitter::Node;

use crate::analysis::analyzer::ParsedFile;
use crate::analysis::nodes::NodeKind;

pub(crate) fn extract(parsed: &ParsedFile, def: Node) -> Option<String> {
    let body = def.child_by_field_name("body")?;
    let mut cursor = body.walk();
    for child in body.children(&mut cursor) {
        match NodeKind::of(child) {
            NodeKind::Comment => continue,
            NodeKind::ExpressionStatement => {
                return child.named_child(0).and_then(|n| string_content(parsed, n));
            }
            // Any other first statement means there is no docstring.
            _ => return None,
        }
    }
    None
}

fn string_content(parsed: &ParsedFile, node: Node) -> Option<String> {
    let content = match node.kind() {
        "string" => strip_quotes(parsed.node_text(node)).to_string(),
        // Adjacent literals ("a" "b") merge into one docstring.
        "concatenated_string" => {
            let mut cursor = node.walk();
            node.children(&mut cursor)
                .filter(|c| c.kind() == "string")
                .map(|c| strip_quotes(parsed.node_text(c)))
                .collect::<String>()
        }
        _ => return None,
    };

    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Remove a string prefix (r, b, f, u and combinations) and the surrounding
/// quotes, triple quotes first.
fn strip_quotes(text: &str) -> &str {
    let text = match text.find(['"', '\'']) {
        Some(i) => &text[i..],
        None => return text,
    };
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if let Some(inner) = text.strip_prefix(quote) {
            return inner.strip_suffix(quote).unwrap_or(inner);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::locate;
    use std::path::PathBuf;

    fn docstring_of(source: &str, name: &str) -> Option<String> {
        let parsed = ParsedFile::parse(source.to_string(), PathBuf::from("test.py")).unwrap();
        let located = locate::find_definition(&parsed, name).unwrap();
        extract(&parsed, located.def)
    }

    #[test]
    fn test_single_line_docstring() {
        let doc = docstring_of(
            "def f():\n    \"\"\"Do the thing.\"\"\"\n    pass\n",
            "f",
        );
        assert_eq!(doc.as_deref(), Some("Do the thing."));
    }

    #[test]
    fn test_multiline_preserves_inner_formatting() {
        let doc = docstring_of(
            "def f():\n    \"\"\"\n    Summary.\n\n    Details here.\n    \"\"\"\n    pass\n",
            "f",
        )
        .unwrap();
        assert!(doc.starts_with("Summary."));
        assert!(doc.contains("\n\n    Details here."));
    }

    #[test]
    fn test_raw_prefix_and_single_quotes() {
        let doc = docstring_of("def f():\n    r'matches \\d+'\n    pass\n", "f");
        assert_eq!(doc.as_deref(), Some("matches \\d+"));
    }

    #[test]
    fn test_no_docstring_when_first_statement_is_code() {
        let doc = docstring_of("def f():\n    x = 'not a docstring'\n    return x\n", "f");
        assert!(doc.is_none());
    }
}
