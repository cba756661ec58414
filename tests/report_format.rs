//! Tests for the JSON output shape.
//!
//! The JSON format is consumed by upstream tooling; field names and enum
//! spellings are part of the contract.

use pycontext::report::JsonReport;
use pycontext::{policy, Analyzer};

fn context_json(source: &str, name: &str) -> serde_json::Value {
    let analyzer = Analyzer::from_source(source, "sample.py").unwrap();
    let context = analyzer.build_function_context(name).unwrap();
    let report = JsonReport {
        version: "0.0.0-test".to_string(),
        file: context.file_path.clone(),
        function: context.signature.name.clone(),
        auto_confirm: policy::should_auto_confirm(&context),
        context: &context,
    };
    serde_json::to_value(&report).unwrap()
}

#[test]
fn test_envelope_fields() {
    let json = context_json("def add(a, b):\n    return a + b\n", "add");

    assert_eq!(json["function"], "add");
    assert_eq!(json["file"], "sample.py");
    assert_eq!(json["auto_confirm"], true);
    assert!(json["context"].is_object());
}

#[test]
fn test_parameter_annotation_serializes_as_type() {
    let json = context_json(
        "def scale(value: float, *, factor=2.0):\n    return value * factor\n",
        "scale",
    );

    let params = &json["context"]["signature"]["parameters"];
    assert_eq!(params[0]["name"], "value");
    assert_eq!(params[0]["type"], "float");
    assert_eq!(params[0]["kind"], "positional");
    assert_eq!(params[1]["kind"], "keyword_only");
    assert_eq!(params[1]["default_value"], "2.0");
}

#[test]
fn test_branch_and_exception_spellings() {
    let json = context_json(
        "def f(a, b):\n    if a and b:\n        raise ValueError('both required')\n    return a\n",
        "f",
    );

    let analysis = &json["context"]["body_analysis"];
    assert_eq!(analysis["complexity"], 3);
    assert_eq!(analysis["branches"][0]["kind"], "if");
    assert_eq!(analysis["branches"][1]["kind"], "boolean-and");
    assert_eq!(analysis["exceptions"][0]["kind"], "raise");
    assert_eq!(analysis["exceptions"][0]["exception_class"], "ValueError");
    assert_eq!(json["auto_confirm"], false);
}

#[test]
fn test_absent_facts_are_null() {
    let json = context_json("def fwd(err):\n    raise err\n", "fwd");

    let analysis = &json["context"]["body_analysis"];
    assert!(analysis["exceptions"][0]["exception_class"].is_null());
    assert!(json["context"]["documentation"].is_null());
    assert!(json["context"]["class_context"].is_null());
}

#[test]
fn test_line_range_is_a_pair() {
    let json = context_json("\n\ndef late():\n    return 1\n", "late");
    assert_eq!(json["context"]["line_range"][0], 3);
    assert_eq!(json["context"]["line_range"][1], 4);
}
