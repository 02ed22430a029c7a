//! Classification order and determinism.

use logpoint::{CHECKER_PRIORITY, Category, Language, LogPointEngine, Selection};
use rstest::rstest;

use crate::helpers::analysis_helpers::analyze_ts;
use crate::helpers::source_fixtures::SERVICE_CLASS;

#[test]
fn test_priority_table_matches_category_order() {
    let order: Vec<Category> = CHECKER_PRIORITY.iter().map(|(category, _)| *category).collect();
    assert_eq!(order, Category::ALL.to_vec());
}

#[rstest]
// Both a member call and a plain call; the member call is checked first.
#[case::member_call_before_call("const data = await api.get(url);", "data", Category::ObjectFunctionCallAssignment)]
// Both a function value and a parameter binding the same name.
#[case::function_before_parameter("const f = (f) => f;", "f", Category::NamedFunctionAssignment)]
#[case::method_call_on_selection("const total = cart.sum();", "cart", Category::PropertyMethodCall)]
#[case::declared_by_method_call("const total = cart.sum();", "total", Category::ObjectFunctionCallAssignment)]
#[case::empty_array("let list = [];", "list", Category::ArrayAssignment)]
#[case::nothing_matches("foo();", "bar", Category::PrimitiveAssignment)]
fn test_first_match_wins(#[case] source: &str, #[case] variable: &str, #[case] expected: Category) {
    assert_eq!(analyze_ts(source, 0, variable).category, expected, "{source}");
}

#[test]
fn test_classification_is_deterministic() {
    let first = analyze_ts(SERVICE_CLASS, 8, "name");
    for _ in 0..5 {
        assert_eq!(analyze_ts(SERVICE_CLASS, 8, "name"), first);
    }
}

#[test]
fn test_every_line_classifies_within_bounds() {
    let engine = LogPointEngine::default();
    let line_count = SERVICE_CLASS.lines().count() as u32;
    for line in 0..line_count {
        for variable in ["id", "user", "response", "cache", "missing"] {
            let analysis = engine
                .analyze(SERVICE_CLASS, Language::TypeScript, &Selection::new(line, variable))
                .unwrap();
            assert!(
                analysis.insertion_line <= line_count,
                "{variable} on line {line} placed at {}",
                analysis.insertion_line
            );
        }
    }
}
