//! Error taxonomy for source analysis.
//!
//! Only two situations abort an analysis: the file cannot be read, or the
//! source cannot be parsed into a usable tree. Both are surfaced before any
//! extraction runs. A function name that does not exist in the file is *not*
//! an error - `Analyzer::build_function_context` returns `None` for it - and
//! a sub-fact that cannot be statically determined (a bare `raise`, an
//! unannotated parameter) is an absent field, never a failure.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing a file for analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The source file is missing or unreadable.
    #[error("cannot read {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source could not be parsed into a well-formed tree.
    #[error("invalid Python syntax in {} near line {line}", .path.display())]
    Syntax { path: PathBuf, line: usize },

    /// The tree-sitter grammar could not be loaded (version mismatch).
    #[error("parser grammar unavailable: {0}")]
    Grammar(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_file() {
        let err = AnalysisError::Syntax {
            path: PathBuf::from("broken.py"),
            line: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("broken.py"));
        assert!(msg.contains("line 3"));
    }
}
