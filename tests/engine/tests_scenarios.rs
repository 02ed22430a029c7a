//! End-to-end placement of log statements for common usage shapes.

use logpoint::Category;
use rstest::rstest;

use crate::helpers::analysis_helpers::{analyze_as, analyze_js, analyze_ts};
use crate::helpers::source_fixtures::{NESTED_CLASS_FUNCTION, REACT_COMPONENT, SERVICE_CLASS};

#[test]
fn test_binary_expression_goes_below() {
    let analysis = analyze_js("const sum = a + b;", 0, "sum");
    assert_eq!(analysis.category, Category::BinaryExpression);
    assert_eq!(analysis.insertion_line, 1);
    assert!(analysis.transformation.is_none());
}

#[test]
fn test_multiline_object_goes_after_closing_brace() {
    let analysis = analyze_js("const config = {\n  a: 1,\n};", 0, "config");
    assert_eq!(analysis.category, Category::ObjectLiteral);
    assert_eq!(analysis.insertion_line, 3);
    assert_eq!(analysis.indentation, "");
}

#[test]
fn test_ternary_declaration() {
    let analysis = analyze_js("const result = condition ? 'yes' : 'no';", 0, "result");
    assert_eq!(analysis.category, Category::Ternary);
    assert_eq!(analysis.insertion_line, 1);
}

#[test]
fn test_destructured_binding_is_primitive() {
    let analysis = analyze_js("const { user } = state;", 0, "user");
    assert_eq!(analysis.category, Category::PrimitiveAssignment);
    assert_eq!(analysis.insertion_line, 1);
}

#[test]
fn test_return_inside_nested_function() {
    let analysis = analyze_ts(NESTED_CLASS_FUNCTION, 3, "q");
    assert_eq!(analysis.category, Category::WithinReturnStatement);
    assert_eq!(analysis.insertion_line, 3);
    assert_eq!(analysis.indentation, "      ");
    assert_eq!(analysis.enclosing_context.class_name, "Person");
    assert_eq!(analysis.enclosing_context.function_name, "inner");
}

#[rstest]
#[case::member_call(4, "cached", Category::ObjectFunctionCallAssignment, 5)]
#[case::awaited_member_call(5, "response", Category::ObjectFunctionCallAssignment, 6)]
#[case::object_literal(6, "user", Category::ObjectLiteral, 10)]
#[case::object_key(8, "name", Category::RawPropertyAccess, 10)]
#[case::returned(10, "user", Category::WithinReturnStatement, 10)]
fn test_service_class(
    #[case] line: u32,
    #[case] variable: &str,
    #[case] category: Category,
    #[case] insertion_line: u32,
) {
    let analysis = analyze_ts(SERVICE_CLASS, line, variable);
    assert_eq!(analysis.category, category, "{variable} on line {line}");
    assert_eq!(analysis.insertion_line, insertion_line, "{variable} on line {line}");
    assert_eq!(analysis.indentation, "    ");
    assert_eq!(analysis.enclosing_context.class_name, "UserService");
    assert_eq!(analysis.enclosing_context.function_name, "load");
}

#[test]
fn test_object_key_records_path() {
    let analysis = analyze_ts(SERVICE_CLASS, 8, "name");
    assert_eq!(
        analysis.metadata.get("deepObjectPath").map(String::as_str),
        Some("user.name")
    );
}

#[rstest]
#[case::hook_tuple(1, "open", Category::FunctionCallAssignment, 2)]
#[case::concatenation(2, "title", Category::BinaryExpression, 3)]
#[case::if_test(3, "open", Category::WithinConditionBlock, 3)]
fn test_tsx_component(
    #[case] line: u32,
    #[case] variable: &str,
    #[case] category: Category,
    #[case] insertion_line: u32,
) {
    let analysis = analyze_as(REACT_COMPONENT, logpoint::Language::Tsx, line, variable);
    assert_eq!(analysis.category, category, "{variable} on line {line}");
    assert_eq!(analysis.insertion_line, insertion_line);
    assert_eq!(analysis.enclosing_context.function_name, "Profile");
}

#[rstest]
#[case::optional_chain("const n = user?.profile?.name;", "user?.profile")]
#[case::spaced("const n = user . profile . name;", "user . profile")]
fn test_selection_text_is_normalized(#[case] source: &str, #[case] selected: &str) {
    let analysis = analyze_js(source, 0, selected);
    assert_eq!(analysis.selection.variable, "user.profile");
}

#[test]
fn test_declaration_on_last_lines_appends() {
    let analysis = analyze_js("let a = 1;\nconst total = a +\n  2;", 1, "total");
    assert_eq!(analysis.insertion_line, 3);
}
