//! Parameters of functions without room for a statement.

use logpoint::{Category, TransformationKind};

use crate::helpers::analysis_helpers::{analyze_js, analyze_ts};

#[test]
fn test_empty_function_is_opened() {
    let analysis = analyze_js("function greet(name) {}", 0, "name");
    let transformation = analysis.transformation.as_ref().unwrap();
    assert_eq!(transformation.kind, TransformationKind::EmptyBlock);
    assert_eq!(transformation.source, "function greet(name) {\n}");
    assert_eq!(transformation.replacement, "{\n}");

    // Placement refers to the rewritten source.
    assert_eq!(analysis.category, Category::FunctionParameter);
    assert_eq!(analysis.insertion_line, 1);
    assert_eq!(analysis.indentation, "  ");
    assert_eq!(analysis.enclosing_context.function_name, "greet");
}

#[test]
fn test_concise_arrow_gets_block_body() {
    let source = "const double = (value) => value * 2;\nuse(double);";
    let analysis = analyze_js(source, 0, "value");
    let transformation = analysis.transformation.as_ref().unwrap();
    assert_eq!(transformation.kind, TransformationKind::ConciseArrowBody);
    assert_eq!(
        transformation.source,
        "const double = (value) => {\n  return value * 2;\n};\nuse(double);"
    );
    assert_eq!(analysis.category, Category::FunctionParameter);
    assert_eq!(analysis.insertion_line, 1);
    assert_eq!(analysis.indentation, "  ");
    assert_eq!(analysis.enclosing_context.function_name, "double");
}

#[test]
fn test_empty_method_in_indented_class() {
    let source = "class Greeter {\n  greet(name: string) {}\n}";
    let analysis = analyze_ts(source, 1, "name");
    let transformation = analysis.transformation.as_ref().unwrap();
    assert_eq!(
        transformation.source,
        "class Greeter {\n  greet(name: string) {\n  }\n}"
    );
    assert_eq!(analysis.insertion_line, 2);
    assert_eq!(analysis.indentation, "    ");
    assert_eq!(analysis.enclosing_context.class_name, "Greeter");
    assert_eq!(analysis.enclosing_context.function_name, "greet");
}

#[test]
fn test_block_body_is_left_alone() {
    let analysis = analyze_js("function greet(name) {\n  hello();\n}", 0, "name");
    assert!(!analysis.needs_transformation());
    assert_eq!(analysis.insertion_line, 1);
    assert_eq!(analysis.indentation, "  ");
}

#[test]
fn test_non_parameter_selection_is_never_transformed() {
    let analysis = analyze_js("const f = (x) => x + offset;", 0, "offset");
    assert!(analysis.transformation.is_none());
}

#[test]
fn test_code_after_brace_moves_down() {
    let analysis = analyze_js("function greet(name) { return name; }", 0, "name");
    let transformation = analysis.transformation.as_ref().unwrap();
    assert_eq!(transformation.kind, TransformationKind::SplitBlock);
    assert_eq!(transformation.source, "function greet(name) {\n  return name;\n}");

    assert_eq!(analysis.category, Category::FunctionParameter);
    assert_eq!(analysis.insertion_line, 1);
    assert_eq!(analysis.indentation, "  ");
}

#[test]
fn test_loop_head_binding_lands_in_body() {
    let analysis = analyze_ts("for (let i = 0; i < n; i++) total += i;", 0, "i");
    let transformation = analysis.transformation.as_ref().unwrap();
    assert_eq!(transformation.kind, TransformationKind::LoopBody);
    assert_eq!(
        transformation.source,
        "for (let i = 0; i < n; i++) {\n  total += i;\n}"
    );
    assert_eq!(analysis.category, Category::PrimitiveAssignment);
    assert_eq!(analysis.insertion_line, 1);
    assert_eq!(analysis.indentation, "  ");
}
