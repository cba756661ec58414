//! Confirmation policy over an extracted context.
//!
//! A thin threshold layer for callers deciding whether a change to the
//! analyzed function can be applied without asking: short, straight-line,
//! exception-free functions qualify.

use crate::analysis::FunctionContext;

/// Lines that count as code: not blank, not a comment, not a docstring
/// fence.
fn code_line_count(source: &str) -> usize {
    source
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty()
                && !trimmed.starts_with('#')
                && !trimmed.starts_with("\"\"\"")
                && !trimmed.starts_with("'''")
        })
        .count()
}

/// True when the function is simple enough to skip user confirmation:
/// fewer than 10 code lines, complexity 1, and no exception handling.
pub fn should_auto_confirm(context: &FunctionContext) -> bool {
    code_line_count(&context.source_code) < 10
        && context.body_analysis.complexity == 1
        && context.body_analysis.exceptions.is_empty()
}

/// One-line human summary of how involved the function is.
pub fn complexity_summary(context: &FunctionContext) -> String {
    let analysis = &context.body_analysis;

    let mut parts = Vec::new();
    parts.push(match analysis.complexity {
        0..=5 => "Low complexity",
        6..=10 => "Moderate complexity",
        _ => "High complexity",
    });

    let branches = format!("{} branch(es)", analysis.branches.len());
    if !analysis.branches.is_empty() {
        parts.push(&branches);
    }
    let exceptions = format!("{} exception(s)", analysis.exceptions.len());
    if !analysis.exceptions.is_empty() {
        parts.push(&exceptions);
    }
    if analysis.external_calls.len() > 5 {
        parts.push("multiple external calls");
    }

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;

    fn context_of(source: &str, name: &str) -> FunctionContext {
        Analyzer::from_source(source, "test.py")
            .unwrap()
            .build_function_context(name)
            .unwrap()
    }

    #[test]
    fn test_trivial_function_auto_confirms() {
        let ctx = context_of("def add(a, b):\n    return a + b\n", "add");
        assert!(should_auto_confirm(&ctx));
        assert_eq!(complexity_summary(&ctx), "Low complexity");
    }

    #[test]
    fn test_raising_function_needs_confirmation() {
        let ctx = context_of(
            "def divide(a, b):\n    if b == 0:\n        raise ValueError('division by zero')\n    return a / b\n",
            "divide",
        );
        assert!(!should_auto_confirm(&ctx));
        assert_eq!(complexity_summary(&ctx), "Low complexity, 1 branch(es), 1 exception(s)");
    }

    #[test]
    fn test_long_function_needs_confirmation() {
        let body: String = (0..12).map(|i| format!("    x{i} = {i}\n")).collect();
        let ctx = context_of(&format!("def filler():\n{body}"), "filler");
        assert_eq!(ctx.body_analysis.complexity, 1);
        assert!(!should_auto_confirm(&ctx));
    }
}
