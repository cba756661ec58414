//! File-level import inventory.
//!
//! Imports are file-scoped facts attached to every context built from the
//! file. Extraction is query-based; a query failure degrades to an empty
//! inventory rather than failing the context.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use crate::analysis::analyzer::{language, ParsedFile};
use crate::analysis::facts::ImportInfo;
use crate::analysis::nodes;

const IMPORT_QUERY: &str = r#"
(import_statement) @import
(import_from_statement) @import_from
"#;

pub(crate) fn collect(parsed: &ParsedFile) -> Vec<ImportInfo> {
    run_query(parsed).unwrap_or_default()
}

fn run_query(parsed: &ParsedFile) -> anyhow::Result<Vec<ImportInfo>> {
    let query = Query::new(language(), IMPORT_QUERY)?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, parsed.root(), parsed.source.as_bytes());

    let mut imports = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let name = query.capture_names()[capture.index as usize];
            match name {
                "import" => plain_import(parsed, capture.node, &mut imports),
                "import_from" => from_import(parsed, capture.node, &mut imports),
                _ => {}
            }
        }
    }

    imports.sort_by_key(|i| i.line);
    Ok(imports)
}

/// `import a.b` and `import a.b as c`; one entry per imported module.
fn plain_import(parsed: &ParsedFile, stmt: Node, out: &mut Vec<ImportInfo>) {
    let line = nodes::start_line(stmt);
    let mut cursor = stmt.walk();
    for child in stmt.named_children(&mut cursor) {
        match child.kind() {
            "dotted_name" => out.push(ImportInfo {
                module: parsed.node_text(child).to_string(),
                imported_names: Vec::new(),
                alias: None,
                line,
            }),
            "aliased_import" => {
                let module = child
                    .child_by_field_name("name")
                    .map(|n| parsed.node_text(n).to_string())
                    .unwrap_or_default();
                let alias = child
                    .child_by_field_name("alias")
                    .map(|n| parsed.node_text(n).to_string());
                out.push(ImportInfo {
                    module,
                    imported_names: Vec::new(),
                    alias,
                    line,
                });
            }
            _ => {}
        }
    }
}

/// `from m import a, b as c` and `from m import *`.
fn from_import(parsed: &ParsedFile, stmt: Node, out: &mut Vec<ImportInfo>) {
    let module = stmt
        .child_by_field_name("module_name")
        .map(|n| parsed.node_text(n).to_string())
        .unwrap_or_default();

    let mut imported_names = Vec::new();
    let mut alias = None;
    let mut cursor = stmt.walk();
    for name_node in stmt.children_by_field_name("name", &mut cursor) {
        if name_node.kind() == "aliased_import" {
            if let Some(n) = name_node.child_by_field_name("name") {
                imported_names.push(parsed.node_text(n).to_string());
            }
            if alias.is_none() {
                alias = name_node
                    .child_by_field_name("alias")
                    .map(|n| parsed.node_text(n).to_string());
            }
        } else {
            imported_names.push(parsed.node_text(name_node).to_string());
        }
    }

    if imported_names.is_empty() {
        // `from m import *` has a wildcard child instead of name fields.
        let mut cursor = stmt.walk();
        if stmt
            .named_children(&mut cursor)
            .any(|c| c.kind() == "wildcard_import")
        {
            imported_names.push("*".to_string());
        }
    }

    out.push(ImportInfo {
        module,
        imported_names,
        alias,
        line: nodes::start_line(stmt),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn imports_of(source: &str) -> Vec<ImportInfo> {
        let parsed = ParsedFile::parse(source.to_string(), PathBuf::from("test.py")).unwrap();
        collect(&parsed)
    }

    #[test]
    fn test_import_forms() {
        let imports = imports_of(
            "import json\nimport os.path as osp\nfrom typing import List, Optional\nfrom decimal import Decimal as D\nfrom helpers import *\n",
        );
        assert_eq!(imports.len(), 5);

        assert_eq!(imports[0].module, "json");
        assert!(imports[0].imported_names.is_empty());

        assert_eq!(imports[1].module, "os.path");
        assert_eq!(imports[1].alias.as_deref(), Some("osp"));

        assert_eq!(imports[2].module, "typing");
        assert_eq!(imports[2].imported_names, vec!["List", "Optional"]);

        assert_eq!(imports[3].module, "decimal");
        assert_eq!(imports[3].imported_names, vec!["Decimal"]);
        assert_eq!(imports[3].alias.as_deref(), Some("D"));

        assert_eq!(imports[4].imported_names, vec!["*"]);
    }

    #[test]
    fn test_source_order() {
        let imports = imports_of("import b\nimport a\n");
        assert_eq!(imports[0].module, "b");
        assert_eq!(imports[1].module, "a");
        assert!(imports[0].line < imports[1].line);
    }
}
