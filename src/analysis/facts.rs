//! Fact structures extracted from AST analysis.

use std::fmt;

use serde::Serialize;

/// How a parameter is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Positional,
    PositionalOnly,
    KeywordOnly,
    VarPositional,
    VarKeyword,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Positional => "positional",
            ParameterKind::PositionalOnly => "positional_only",
            ParameterKind::KeywordOnly => "keyword_only",
            ParameterKind::VarPositional => "var_positional",
            ParameterKind::VarKeyword => "var_keyword",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One declared parameter, in declaration order.
///
/// `annotation` and `default_value` carry raw source text; neither is
/// normalized or resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub annotation: Option<String>,
    pub default_value: Option<String>,
    pub kind: ParameterKind,
}

/// A function or method signature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signature {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Raw return annotation text, without the `->`.
    pub return_type: Option<String>,
    /// Decorator expressions in declaration order, `@` stripped.
    pub decorators: Vec<String>,
    /// True when the definition sits lexically inside a class body,
    /// regardless of a `self`-style first parameter.
    pub is_method: bool,
    pub is_async: bool,
}

/// Kind of decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchKind {
    If,
    Elif,
    For,
    While,
    Except,
    BooleanAnd,
    BooleanOr,
    Ternary,
}

impl BranchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchKind::If => "if",
            BranchKind::Elif => "elif",
            BranchKind::For => "for",
            BranchKind::While => "while",
            BranchKind::Except => "except",
            BranchKind::BooleanAnd => "boolean-and",
            BranchKind::BooleanOr => "boolean-or",
            BranchKind::Ternary => "ternary",
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One decision point in a function body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub kind: BranchKind,
    /// Raw text of the governing expression; empty where the construct has
    /// none (a `for` loop header).
    pub condition: String,
    /// 1-based start line of the construct.
    pub line: usize,
}

/// Whether an exception site raises or catches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionKind {
    Raise,
    Except,
}

impl ExceptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExceptionKind::Raise => "raise",
            ExceptionKind::Except => "except",
        }
    }
}

/// A `raise` statement or `except` clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptionSite {
    pub kind: ExceptionKind,
    /// Raw text of the exception type when statically visible: the callee of
    /// a raising call, or the caught type expression. `None` for a bare
    /// `raise`, a re-raised variable, or a bare `except:`.
    pub exception_class: Option<String>,
    pub line: usize,
}

/// One call occurrence. Duplicates are preserved, one entry per occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallSite {
    /// Final identifier of the callee (`method` for `obj.method(...)`).
    pub name: String,
    /// Receiver text for attribute calls (`obj` for `obj.method(...)`).
    pub qualifier: Option<String>,
    /// True iff this is a bare-name call to a Python builtin.
    pub is_builtin: bool,
    pub line: usize,
}

/// Shape of the class enclosing a method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassContext {
    pub class_name: String,
    /// Base class expressions in declaration order, unresolved.
    pub base_classes: Vec<String>,
    /// Attribute names assigned via `self.<name> = ...` anywhere in the
    /// class body, across all methods. Deduplicated and sorted.
    pub class_attributes: Vec<String>,
    /// Sibling method names in declaration order, excluding the target.
    pub other_methods: Vec<String>,
    pub is_dataclass: bool,
}

/// Control-flow, exception, and call facts for one function body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyAnalysis {
    /// Cyclomatic complexity: 1 plus the number of decision points, so it is
    /// always `branches.len() + 1`.
    pub complexity: usize,
    pub branches: Vec<Branch>,
    pub exceptions: Vec<ExceptionSite>,
    pub external_calls: Vec<CallSite>,
}

impl BodyAnalysis {
    pub fn from_parts(
        branches: Vec<Branch>,
        exceptions: Vec<ExceptionSite>,
        external_calls: Vec<CallSite>,
    ) -> Self {
        Self {
            complexity: branches.len() + 1,
            branches,
            exceptions,
            external_calls,
        }
    }

    /// An empty body: straight-line, nothing raised, nothing called.
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new())
    }
}

/// A file-level import statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportInfo {
    pub module: String,
    /// Names pulled in by `from m import a, b`; `["*"]` for a star import;
    /// empty for a plain `import m`.
    pub imported_names: Vec<String>,
    pub alias: Option<String>,
    pub line: usize,
}

/// The complete structured context for one function or method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionContext {
    pub signature: Signature,
    /// Docstring text with quotes removed and outer whitespace trimmed.
    pub documentation: Option<String>,
    pub body_analysis: BodyAnalysis,
    /// Present iff the target is a method.
    pub class_context: Option<ClassContext>,
    /// Verbatim source from the first line of the definition (decorators
    /// included) through its last line, original formatting preserved.
    pub source_code: String,
    pub imports: Vec<ImportInfo>,
    pub file_path: String,
    /// Dotted module name derived from the file name.
    pub module_path: String,
    /// First and last 1-based line of the definition, decorators included.
    pub line_range: (usize, usize),
}

/// Kind of declaration reported by the inventory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Function,
    Method,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Method => "method",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the declaration inventory (`pycontext list`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationSummary {
    pub name: String,
    pub kind: DeclarationKind,
    /// Enclosing class for methods.
    pub class_name: Option<String>,
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_is_branches_plus_one() {
        let body = BodyAnalysis::from_parts(
            vec![
                Branch {
                    kind: BranchKind::If,
                    condition: "x > 0".to_string(),
                    line: 2,
                },
                Branch {
                    kind: BranchKind::BooleanAnd,
                    condition: "x > 0 and y > 0".to_string(),
                    line: 2,
                },
            ],
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(body.complexity, 3);

        assert_eq!(BodyAnalysis::empty().complexity, 1);
    }

    #[test]
    fn test_branch_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&BranchKind::BooleanAnd).unwrap();
        assert_eq!(json, "\"boolean-and\"");
        assert_eq!(BranchKind::BooleanAnd.as_str(), "boolean-and");
    }

    #[test]
    fn test_parameter_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ParameterKind::VarPositional).unwrap();
        assert_eq!(json, "\"var_positional\"");
    }
}
