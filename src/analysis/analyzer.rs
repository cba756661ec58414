//! File-level analyzer: owns one parsed source file and builds contexts.
//!
//! An [`Analyzer`] binds to one file's text and parse tree at construction
//! time and is read-only afterwards, so independent `build_function_context`
//! calls are safe from multiple threads. Fatal conditions (unreadable file,
//! syntax errors) surface at construction; a missing function name is a
//! normal `None` result, never an error.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::analysis::facts::{BodyAnalysis, DeclarationSummary, FunctionContext};
use crate::analysis::{calls, class_context, control_flow, docs, exceptions, imports, locate, nodes, signature};
use crate::error::AnalysisError;

static PYTHON: Lazy<Language> = Lazy::new(|| tree_sitter_python::LANGUAGE.into());

/// The Python grammar shared by the parser and the import queries.
pub(crate) fn language() -> &'static Language {
    &PYTHON
}

/// Holds a parsed tree and the source it came from.
///
/// Kept separate from [`Analyzer`] so the extraction walkers can borrow the
/// tree without caring about line bookkeeping.
#[derive(Debug)]
pub struct ParsedFile {
    pub(crate) tree: Tree,
    pub(crate) source: String,
    pub(crate) path: PathBuf,
}

impl ParsedFile {
    /// Parse Python source, rejecting trees with syntax errors.
    pub(crate) fn parse(source: String, path: PathBuf) -> Result<Self, AnalysisError> {
        let mut parser = Parser::new();
        parser
            .set_language(language())
            .map_err(|e| AnalysisError::Grammar(e.to_string()))?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| AnalysisError::Grammar("parser produced no tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(root).unwrap_or(1);
            return Err(AnalysisError::Syntax { path, line });
        }

        Ok(Self { tree, source, path })
    }

    pub(crate) fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Raw source text for a node.
    pub(crate) fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

/// First line carrying an ERROR or MISSING node, for syntax diagnostics.
fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(nodes::start_line(node));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(line) = first_error_line(child) {
            return Some(line);
        }
    }
    None
}

/// Analyzer for a single Python source file.
#[derive(Debug)]
pub struct Analyzer {
    parsed: ParsedFile,
    lines: Vec<String>,
}

impl Analyzer {
    /// Read and parse a file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let path = path.as_ref().to_path_buf();
        let source = fs::read_to_string(&path).map_err(|e| AnalysisError::SourceUnavailable {
            path: path.clone(),
            source: e,
        })?;
        Self::from_source(source, path)
    }

    /// Analyze source text directly. `path` is used for reporting only.
    pub fn from_source(source: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self, AnalysisError> {
        let source = source.into();
        let lines = source.lines().map(str::to_string).collect();
        let parsed = ParsedFile::parse(source, path.into())?;
        Ok(Self { parsed, lines })
    }

    pub fn path(&self) -> &Path {
        &self.parsed.path
    }

    pub fn source(&self) -> &str {
        &self.parsed.source
    }

    /// Build the complete context for the named function or method.
    ///
    /// The first definition with a matching name, in depth-first source
    /// order, is analyzed. Returns `None` when no definition matches.
    pub fn build_function_context(&self, name: &str) -> Option<FunctionContext> {
        let located = locate::find_definition(&self.parsed, name)?;

        let signature = signature::extract(&self.parsed, &located);
        let documentation = docs::extract(&self.parsed, located.def);

        // The five body analyzers are independent; each degrades to an empty
        // or absent fact on unsupported constructs rather than failing.
        let body_analysis = match located.def.child_by_field_name("body") {
            Some(body) => BodyAnalysis::from_parts(
                control_flow::collect(&self.parsed, body),
                exceptions::collect(&self.parsed, body),
                calls::collect(&self.parsed, body),
            ),
            None => BodyAnalysis::empty(),
        };

        let class_context = located
            .class_def
            .map(|class| class_context::build(&self.parsed, class, name));

        let start = nodes::start_line(located.decl);
        let end = nodes::end_line(located.decl);

        Some(FunctionContext {
            signature,
            documentation,
            body_analysis,
            class_context,
            source_code: self.slice_lines(start, end),
            imports: imports::collect(&self.parsed),
            file_path: self.parsed.path.to_string_lossy().to_string(),
            module_path: module_path(&self.parsed.path),
            line_range: (start, end),
        })
    }

    /// Inventory of every function and method declared in the file, in
    /// source order.
    pub fn declarations(&self) -> Vec<DeclarationSummary> {
        locate::declarations(&self.parsed)
    }

    /// Verbatim source lines `start..=end` (1-based, inclusive).
    fn slice_lines(&self, start: usize, end: usize) -> String {
        let start = start.saturating_sub(1);
        let end = end.min(self.lines.len());
        self.lines[start..end].join("\n")
    }
}

/// Dotted module name for a file path (`utils/math_ops.py` -> `math_ops`).
fn module_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
