//! Output formatting for extracted contexts.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use std::collections::BTreeMap;

use colored::*;
use serde::Serialize;

use crate::analysis::{CallSite, DeclarationSummary, FunctionContext, Parameter, ParameterKind};
use crate::policy;

// =============================================================================
// JSON Format
// =============================================================================

/// Versioned envelope around a serialized context.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: String,
    pub file: String,
    pub function: String,
    pub auto_confirm: bool,
    pub context: &'a FunctionContext,
}

/// Write one context as pretty-printed JSON.
pub fn write_json(context: &FunctionContext) -> anyhow::Result<()> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        file: context.file_path.clone(),
        function: context.signature.name.clone(),
        auto_confirm: policy::should_auto_confirm(context),
        context,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

/// Envelope for the declaration inventory.
#[derive(Serialize)]
pub struct JsonListing<'a> {
    pub version: String,
    pub file: String,
    pub declarations: &'a [DeclarationSummary],
}

pub fn write_list_json(file: &str, declarations: &[DeclarationSummary]) -> anyhow::Result<()> {
    let report = JsonListing {
        version: env!("CARGO_PKG_VERSION").to_string(),
        file: file.to_string(),
        declarations,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write one context in human-readable form.
pub fn write_pretty(context: &FunctionContext) {
    println!();
    print!("  {}", "pycontext".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "File:     ".dimmed());
    println!("{}", context.file_path);
    print!("  {}", "Function: ".dimmed());
    println!("{}", context.signature.name);
    println!();

    write_signature(context);

    if let Some(ref doc) = context.documentation {
        println!("  {}", "Docstring:".bold());
        for line in doc.lines() {
            println!("    {}", line.dimmed());
        }
        println!();
    }

    write_analysis(context);

    if let Some(ref class) = context.class_context {
        println!("  {}", "Class context:".bold());
        println!("    Class: {}", class.class_name);
        if !class.base_classes.is_empty() {
            println!("    Base classes: {}", class.base_classes.join(", "));
        }
        if !class.class_attributes.is_empty() {
            println!("    Attributes: {}", class.class_attributes.join(", "));
        }
        if !class.other_methods.is_empty() {
            println!("    Other methods: {}", class.other_methods.join(", "));
        }
        if class.is_dataclass {
            println!("    Type: dataclass");
        }
        println!();
    }

    write_source(context);
    write_recommendation(context);
    println!();
}

fn write_signature(context: &FunctionContext) {
    let sig = &context.signature;
    println!("  {}", "Signature:".bold());

    for decorator in &sig.decorators {
        println!("    @{}", decorator.yellow());
    }

    let prefix = if sig.is_async { "async def" } else { "def" };
    let params = format_parameters(&sig.parameters);
    let ret = sig.return_type.as_deref().unwrap_or("None");
    println!(
        "    {} {}({}) -> {}",
        prefix.magenta(),
        sig.name.bold(),
        params,
        ret
    );

    if sig.is_method {
        println!("    {}", "(method)".dimmed());
    }
    println!();
}

/// Render parameters the way they were declared: `*`/`**` prefixes, `: type`
/// annotations, `= default` values.
fn format_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| {
            let mut out = String::new();
            match p.kind {
                ParameterKind::VarPositional => out.push('*'),
                ParameterKind::VarKeyword => out.push_str("**"),
                _ => {}
            }
            out.push_str(&p.name);
            if let Some(ref annotation) = p.annotation {
                out.push_str(": ");
                out.push_str(annotation);
            }
            if let Some(ref default) = p.default_value {
                out.push_str(" = ");
                out.push_str(default);
            }
            out
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_analysis(context: &FunctionContext) {
    let analysis = &context.body_analysis;
    println!("  {}", "Code analysis:".bold());

    print!("    Cyclomatic complexity: ");
    write_colored_complexity(analysis.complexity);
    println!();

    println!("    Branches: {}", analysis.branches.len());
    for branch in &analysis.branches {
        if branch.condition.is_empty() {
            println!("      - {} (line {})", branch.kind, branch.line);
        } else {
            println!(
                "      - {}: {} (line {})",
                branch.kind, branch.condition, branch.line
            );
        }
    }

    println!("    Exceptions: {}", analysis.exceptions.len());
    for site in &analysis.exceptions {
        let class = site.exception_class.as_deref().unwrap_or("unknown");
        println!("      - {}: {} (line {})", site.kind.as_str(), class, site.line);
    }

    println!("    External calls: {}", analysis.external_calls.len());
    for (name, (count, is_builtin)) in group_calls(&analysis.external_calls) {
        let tag = if is_builtin { " [builtin]" } else { "" };
        if count > 1 {
            println!("      - {}{} ({}x)", name, tag.dimmed(), count);
        } else {
            println!("      - {}{}", name, tag.dimmed());
        }
    }
    println!();
}

fn write_colored_complexity(complexity: usize) {
    match complexity {
        0..=5 => print!("{}", complexity.to_string().green()),
        6..=10 => print!("{}", complexity.to_string().yellow()),
        _ => print!("{}", complexity.to_string().red()),
    }
}

/// Group call occurrences by display name for compact output.
fn group_calls(calls: &[CallSite]) -> BTreeMap<String, (usize, bool)> {
    let mut grouped: BTreeMap<String, (usize, bool)> = BTreeMap::new();
    for call in calls {
        let key = match &call.qualifier {
            Some(q) => format!("{}.{}", q, call.name),
            None => call.name.clone(),
        };
        let entry = grouped.entry(key).or_insert((0, call.is_builtin));
        entry.0 += 1;
    }
    grouped
}

fn write_source(context: &FunctionContext) {
    println!("  {}", "Source:".bold());
    let (start, _) = context.line_range;
    for (offset, line) in context.source_code.lines().enumerate() {
        println!("    {} {}", format!("{:>4} |", start + offset).dimmed(), line);
    }
    println!();
}

fn write_recommendation(context: &FunctionContext) {
    let summary = policy::complexity_summary(context);
    if policy::should_auto_confirm(context) {
        println!(
            "  {} {}",
            "✓ auto-confirm".green(),
            format!("({})", summary).dimmed()
        );
    } else {
        println!(
            "  {} {}",
            "⚠ needs confirmation".yellow(),
            format!("({})", summary).dimmed()
        );
    }
}

/// Write the declaration inventory in human-readable form.
pub fn write_list_pretty(file: &str, declarations: &[DeclarationSummary]) {
    println!();
    print!("  {}", "pycontext".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("  {}", "File: ".dimmed());
    println!("{}", file);
    println!();

    if declarations.is_empty() {
        println!("  {}", "(no functions or methods)".dimmed());
        println!();
        return;
    }

    println!("  {} ({}):", "Declarations".bold(), declarations.len());
    for decl in declarations {
        let name = match &decl.class_name {
            Some(class) => format!("{}.{}", class, decl.name),
            None => decl.name.clone(),
        };
        println!(
            "    {:<10} {:<30} {}",
            decl.kind.as_str().dimmed(),
            name,
            format!("line {}", decl.line).dimmed()
        );
    }
    println!();
}
