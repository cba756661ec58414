//! AST-backed extraction of function context from Python source.
//!
//! One [`Analyzer`] binds to one file. `build_function_context` locates the
//! named definition and runs five independent extractors over its subtree:
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌──────────────────┐
//! │ Source File  │────▶│ Analyzer      │────▶│ Locator          │
//! └──────────────┘     │ (tree+source) │     │ (named def node) │
//!                      └───────────────┘     └────────┬─────────┘
//!                                                     ▼
//!                 ┌───────────┬───────────┬───────────┬───────────┐
//!                 │ Signature │ Docstring │ Control   │ Exceptions│
//!                 │           │           │ Flow      │ + Calls   │
//!                 └─────┬─────┴─────┬─────┴─────┬─────┴─────┬─────┘
//!                       ▼           ▼           ▼           ▼
//!                      ┌─────────────────────────────────────┐
//!                      │ FunctionContext (+ class context    │
//!                      │ for methods, + verbatim source)     │
//!                      └─────────────────────────────────────┘
//! ```
//!
//! The extractors have no dependencies on each other; each one degrades to
//! an absent fact on constructs it does not recognize. Only an unreadable
//! file or a syntax error aborts, and both surface before any extraction
//! runs.

mod analyzer;
mod calls;
mod class_context;
mod control_flow;
mod docs;
mod exceptions;
mod facts;
mod imports;
mod locate;
mod nodes;
mod signature;

pub use analyzer::Analyzer;
pub use calls::is_builtin;
pub use facts::{
    BodyAnalysis, Branch, BranchKind, CallSite, ClassContext, DeclarationKind,
    DeclarationSummary, ExceptionKind, ExceptionSite, FunctionContext, ImportInfo, Parameter,
    ParameterKind, Signature,
};
