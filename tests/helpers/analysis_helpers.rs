//! Engine helpers for running one selection end to end.

use logpoint::{Language, LogPointAnalysis, LogPointEngine, Selection};

/// Analyze `variable` on `line` of a TypeScript document.
pub fn analyze_ts(source: &str, line: u32, variable: &str) -> LogPointAnalysis {
    analyze_as(source, Language::TypeScript, line, variable)
}

/// Analyze `variable` on `line` of a JavaScript document.
pub fn analyze_js(source: &str, line: u32, variable: &str) -> LogPointAnalysis {
    analyze_as(source, Language::JavaScript, line, variable)
}

pub fn analyze_as(source: &str, language: Language, line: u32, variable: &str) -> LogPointAnalysis {
    match LogPointEngine::default().analyze(source, language, &Selection::new(line, variable)) {
        Ok(analysis) => analysis,
        Err(err) => panic!("analysis of {variable:?} on line {line} failed: {err}\n{source}"),
    }
}
