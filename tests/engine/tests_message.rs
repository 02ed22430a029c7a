//! Rendering and inserting the log statement.

use logpoint::{MessageOptions, insert_log_statement};
use rstest::rstest;

use crate::helpers::analysis_helpers::{analyze_js, analyze_ts};
use crate::helpers::source_fixtures::SERVICE_CLASS;

#[test]
fn test_insert_after_object_literal() {
    let source = "const config = {\n  a: 1,\n};\nstart(config);\n";
    let analysis = analyze_js(source, 0, "config");
    assert_eq!(
        insert_log_statement(source, &analysis, &MessageOptions::default()),
        "const config = {\n  a: 1,\n};\nconsole.log(\"🚀 ~ config:\", config);\nstart(config);\n"
    );
}

#[test]
fn test_insert_before_return_in_method() {
    let analysis = analyze_ts(SERVICE_CLASS, 10, "user");
    let output = insert_log_statement(SERVICE_CLASS, &analysis, &MessageOptions::default());
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines[10],
        "    console.log(\"🚀 ~ UserService ~ load ~ user:\", user);"
    );
    assert_eq!(lines[11], "    return user;");
}

#[test]
fn test_context_names_can_be_left_out() {
    let analysis = analyze_ts(SERVICE_CLASS, 4, "cached");
    let options = MessageOptions {
        include_class_name: false,
        include_function_name: false,
        ..MessageOptions::default()
    };
    let output = insert_log_statement(SERVICE_CLASS, &analysis, &options);
    assert_eq!(
        output.lines().nth(5),
        Some("    console.log(\"🚀 ~ cached:\", cached);")
    );
}

#[test]
fn test_crlf_is_preserved() {
    let source = "const sum = a + b;\r\nnext();\r\n";
    let analysis = analyze_js(source, 0, "sum");
    assert_eq!(
        insert_log_statement(source, &analysis, &MessageOptions::default()),
        "const sum = a + b;\r\nconsole.log(\"🚀 ~ sum:\", sum);\r\nnext();\r\n"
    );
}

#[rstest]
#[case::code_after_function_brace(
    "function greet(name) { return name;\n}",
    0,
    "name",
    "function greet(name) {\n  console.log(\"🚀 ~ greet ~ name:\", name);\n  return name;\n}"
)]
#[case::one_line_arrow_block(
    "const f = (name) => { return name; };",
    0,
    "name",
    "const f = (name) => {\n  console.log(\"🚀 ~ f ~ name:\", name);\n  return name;\n};"
)]
#[case::one_line_loop_block(
    "for (const item of items) { use(item); }",
    0,
    "item",
    "for (const item of items) {\n  console.log(\"🚀 ~ item:\", item);\n  use(item);\n}"
)]
#[case::braceless_loop(
    "for (const item of items) use(item);\nnext();",
    0,
    "item",
    "for (const item of items) {\n  console.log(\"🚀 ~ item:\", item);\n  use(item);\n}\nnext();"
)]
#[case::second_binding_on_line(
    "data = 0; data = {\n  a: 1,\n};\nnext();",
    0,
    "data",
    "data = 0; data = {\n  a: 1,\n};\nconsole.log(\"🚀 ~ data:\", data);\nnext();"
)]
fn test_statement_lands_after_its_binding(
    #[case] source: &str,
    #[case] line: u32,
    #[case] variable: &str,
    #[case] expected: &str,
) {
    let analysis = analyze_js(source, line, variable);
    assert!(analysis.insertion_line > line, "{source}");
    assert_eq!(
        insert_log_statement(source, &analysis, &MessageOptions::default()),
        expected
    );
}
