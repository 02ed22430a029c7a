//! Enclosing class and function names reported with each analysis.

use rstest::rstest;

use crate::helpers::analysis_helpers::analyze_ts;
use crate::helpers::source_fixtures::NESTED_CLASS_FUNCTION;

#[rstest]
#[case::method_parameter(1, "p", "Person", "someFunction")]
#[case::nested_function(3, "q", "Person", "inner")]
#[case::class_only(0, "Person", "Person", "")]
fn test_nested_class_function(
    #[case] line: u32,
    #[case] variable: &str,
    #[case] class_name: &str,
    #[case] function_name: &str,
) {
    let context = analyze_ts(NESTED_CLASS_FUNCTION, line, variable).enclosing_context;
    assert_eq!(context.class_name, class_name);
    assert_eq!(context.function_name, function_name);
}

#[test]
fn test_sibling_classes_do_not_leak() {
    let source = "class First {\n  run() {}\n}\nclass Second {\n  stop() {\n    const done = true;\n  }\n}";
    let context = analyze_ts(source, 5, "done").enclosing_context;
    assert_eq!(context.class_name, "Second");
    assert_eq!(context.function_name, "stop");
}

#[test]
fn test_callback_inside_method_keeps_method_name() {
    let source = "class Store {\n  load() {\n    items.forEach((item) => {\n      const id = item.id;\n    });\n  }\n}";
    let context = analyze_ts(source, 3, "id").enclosing_context;
    assert_eq!(context.class_name, "Store");
    assert_eq!(context.function_name, "load");
}
