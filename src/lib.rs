//! Pycontext - structured context extraction for Python functions.
//!
//! Pycontext parses a Python source file with tree-sitter and builds a
//! self-contained context for one named function or method: signature,
//! docstring, control-flow and complexity summary, raise/except sites,
//! external calls, and (for methods) the shape of the enclosing class.
//! Upstream tooling uses the context to decide whether a change can be
//! applied automatically or needs human confirmation.
//!
//! # Architecture
//!
//! - `analysis`: the extraction core - declaration lookup, signature,
//!   docstring, control flow, exceptions, calls, class context, imports
//! - `error`: the fatal-error taxonomy (unreadable file, syntax error);
//!   a missing function name is a `None` result, not an error
//! - `policy`: the auto-confirm threshold over a built context
//! - `report`: output formatting (pretty, JSON)
//! - `cli`: the `analyze` and `list` subcommands
//!
//! # Example
//!
//! ```no_run
//! use pycontext::Analyzer;
//!
//! let analyzer = Analyzer::from_file("service.py")?;
//! match analyzer.build_function_context("handle_request") {
//!     Some(ctx) => println!("complexity {}", ctx.body_analysis.complexity),
//!     None => println!("not found"),
//! }
//! # Ok::<(), pycontext::AnalysisError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod policy;
pub mod report;

pub use analysis::{
    Analyzer, BodyAnalysis, Branch, BranchKind, CallSite, ClassContext, DeclarationKind,
    DeclarationSummary, ExceptionKind, ExceptionSite, FunctionContext, ImportInfo, Parameter,
    ParameterKind, Signature,
};
pub use error::AnalysisError;
