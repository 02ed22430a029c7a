//! Several selections of one document analyzed together.

use logpoint::{EngineError, Language, LogPointEngine, Selection};

use crate::helpers::source_fixtures::{SERVICE_CLASS, VUE_COMPONENT};

#[test]
fn test_results_follow_selection_order() {
    let engine = LogPointEngine::default();
    let selections = vec![
        Selection::new(4, "cached"),
        Selection::new(6, "user"),
        Selection::new(10, "user"),
        Selection::new(3, "id"),
    ];
    let batch = engine.analyze_selections(SERVICE_CLASS, Language::TypeScript, &selections);
    assert_eq!(batch.len(), selections.len());
    for (selection, result) in selections.iter().zip(&batch) {
        let single = engine.analyze(SERVICE_CLASS, Language::TypeScript, selection);
        assert_eq!(result, &single);
    }
}

#[test]
fn test_out_of_range_selection_fails_alone() {
    let engine = LogPointEngine::default();
    let selections = vec![Selection::new(4, "cached"), Selection::new(99, "cached")];
    let batch = engine.analyze_selections(SERVICE_CLASS, Language::TypeScript, &selections);
    assert!(batch[0].is_ok());
    assert!(matches!(
        batch[1],
        Err(EngineError::SelectionOutOfRange { line: 99, .. })
    ));
}

#[test]
fn test_parse_failure_is_reported_for_every_selection() {
    let engine = LogPointEngine::default();
    let selections = vec![Selection::new(0, "a"), Selection::new(0, "b")];
    let batch = engine.analyze_selections("const a = (;", Language::JavaScript, &selections);
    assert!(batch.iter().all(|result| matches!(result, Err(err) if err.is_parse_error())));
}

#[test]
fn test_embedded_selections_pick_their_region() {
    let engine = LogPointEngine::default();
    let selections = vec![Selection::new(6, "count"), Selection::new(1, "count")];
    let batch = engine.analyze_selections(VUE_COMPONENT, Language::Vue, &selections);
    assert_eq!(batch[0].as_ref().map(|analysis| analysis.insertion_line), Ok(7));
    assert!(batch[1].is_err());
}
