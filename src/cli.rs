//! Command-line interface for pycontext.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::analysis::Analyzer;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NOT_FOUND: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Extract structured context for a Python function or method.
///
/// pycontext parses a Python file and reports everything an upstream tool
/// needs to reason about one function: its signature, docstring, branches
/// and cyclomatic complexity, raise/except sites, external calls, and (for
/// methods) the shape of the enclosing class.
#[derive(Parser)]
#[command(name = "pycontext")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the full context for one function or method
    #[command(visible_alias = "ctx")]
    Analyze(AnalyzeArgs),
    /// List the functions and methods declared in a file
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Python source file
    pub file: PathBuf,

    /// Name of the function or method to analyze (exact match; the first
    /// definition in source order wins)
    pub function: String,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the list command.
#[derive(Parser)]
pub struct ListArgs {
    /// Python source file
    pub file: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

fn validate_format(format: &str) -> bool {
    format == "pretty" || format == "json"
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if !validate_format(&args.format) {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    // Unreadable files and syntax errors abort here, before any analysis.
    let analyzer = match Analyzer::from_file(&args.file) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // A missing name is a normal outcome, reported without a stack trace.
    let context = match analyzer.build_function_context(&args.function) {
        Some(ctx) => ctx,
        None => {
            eprintln!(
                "Function {:?} not found in {}",
                args.function,
                args.file.display()
            );
            eprintln!("Run 'pycontext list {}' to see declarations", args.file.display());
            return Ok(EXIT_NOT_FOUND);
        }
    };

    match args.format.as_str() {
        "json" => report::write_json(&context)?,
        _ => report::write_pretty(&context),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the list command.
pub fn run_list(args: &ListArgs) -> anyhow::Result<i32> {
    if !validate_format(&args.format) {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let analyzer = match Analyzer::from_file(&args.file) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let declarations = analyzer.declarations();
    let file = args.file.to_string_lossy();

    match args.format.as_str() {
        "json" => report::write_list_json(&file, &declarations)?,
        _ => report::write_list_pretty(&file, &declarations),
    }

    Ok(EXIT_SUCCESS)
}
