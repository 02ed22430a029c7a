//! Scripts embedded in Vue, Svelte and HTML documents.

use logpoint::{Category, EngineError, Language, LogPointEngine, ParseError, Selection};

use crate::helpers::analysis_helpers::analyze_as;
use crate::helpers::source_fixtures::VUE_COMPONENT;

#[test]
fn test_vue_lines_are_document_lines() {
    let analysis = analyze_as(VUE_COMPONENT, Language::Vue, 6, "count");
    assert_eq!(analysis.category, Category::PrimitiveAssignment);
    assert_eq!(analysis.insertion_line, 7);
    assert_eq!(analysis.indentation, "    ");
    assert_eq!(analysis.enclosing_context.function_name, "data");
}

#[test]
fn test_selection_in_template_is_rejected() {
    let err = LogPointEngine::default()
        .analyze(VUE_COMPONENT, Language::Vue, &Selection::new(1, "count"))
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Parse(ParseError::OutsideScriptRegion { line: 1 })
    ));
}

#[test]
fn test_svelte_script() {
    let source = "<script>\n  let count = 0;\n  function inc() {\n    count += 1;\n  }\n</script>\n<button on:click={inc}>{count}</button>";
    let analysis = analyze_as(source, Language::Svelte, 3, "count");
    assert_eq!(analysis.insertion_line, 4);
    assert_eq!(analysis.indentation, "    ");
    assert_eq!(analysis.enclosing_context.function_name, "inc");
}

#[test]
fn test_html_picks_region_of_selection() {
    let source = "<html>\n<script>\n  const a = 1;\n</script>\n<script type=\"module\">\n  const b = a + 1;\n</script>\n</html>";
    let analysis = analyze_as(source, Language::Html, 5, "b");
    assert_eq!(analysis.category, Category::BinaryExpression);
    assert_eq!(analysis.insertion_line, 6);
}

#[test]
fn test_language_detection() {
    assert_eq!(Language::from_extension("vue"), Some(Language::Vue));
    assert_eq!(Language::from_language_id("typescriptreact"), Some(Language::Tsx));
    assert!(Language::Svelte.is_embedded());
    assert!(!Language::Tsx.is_embedded());
}
