//! Engine facade.
//!
//! Ties the pipeline together for one document:
//!
//! ```text
//! parse once → classify → insertion line → enclosing context
//!                 ↓ (body that cannot take a new line)
//!          reshape body → re-parse → classify → insertion line → context
//! ```
//!
//! Every call owns its tree; nothing is cached between calls.

use rayon::prelude::*;
use thiserror::Error;

use crate::analysis::{CheckContext, Selection};
use crate::base::{IndentStyle, SourceDocument, TextDocument};
use crate::checkers::{Category, CheckMetadata};
use crate::classify::classify;
use crate::context::{EnclosingContext, enclosing_context};
use crate::insertion::{indentation_for, line_for};
use crate::parser::{DEFAULT_MAX_PARSE_DEPTH, Language, ParseError, ParseOptions, parse_with_options};
use crate::syntax::{MAX_TRAVERSAL_DEPTH, SyntaxTree};
use crate::transform::{Transformation, apply_transformation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("selection line {line} is outside the document ({line_count} lines)")]
    SelectionOutOfRange { line: u32, line_count: u32 },
}

impl EngineError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Deepest syntactic nesting the parser accepts.
    pub max_parse_depth: usize,
    /// Depth ceiling for tree walks.
    pub max_traversal_depth: usize,
    /// Indentation used for reshaped bodies and generated statements.
    pub indent: IndentStyle,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_parse_depth: DEFAULT_MAX_PARSE_DEPTH,
            max_traversal_depth: MAX_TRAVERSAL_DEPTH,
            indent: IndentStyle::default(),
        }
    }
}

/// Everything the editing layer needs to place a log statement.
///
/// When `transformation` is present, the other fields describe the
/// transformed source (`transformation.source`), not the original.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogPointAnalysis {
    pub selection: Selection,
    pub category: Category,
    pub metadata: CheckMetadata,
    /// 0-indexed line the new statement takes.
    pub insertion_line: u32,
    /// Leading whitespace for the new statement.
    pub indentation: String,
    pub enclosing_context: EnclosingContext,
    pub transformation: Option<Transformation>,
}

impl LogPointAnalysis {
    pub fn needs_transformation(&self) -> bool {
        self.transformation.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogPointEngine {
    options: EngineOptions,
}

impl LogPointEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Analyze one selection of `source`.
    pub fn analyze(
        &self,
        source: &str,
        language: Language,
        selection: &Selection,
    ) -> Result<LogPointAnalysis, EngineError> {
        let document = SourceDocument::new(source);
        self.analyze_document(&document, language, selection)
    }

    pub fn analyze_document(
        &self,
        document: &SourceDocument,
        language: Language,
        selection: &Selection,
    ) -> Result<LogPointAnalysis, EngineError> {
        check_selection(document, selection)?;
        let tree = self.parse(document.text(), language, selection)?;
        self.analyze_tree(&tree, document, language, selection)
    }

    /// Analyze several selections of one document in parallel. Plain script
    /// documents are parsed once and the tree is shared; embedded-language
    /// documents are parsed per selection, since each selection picks its own
    /// `<script>` region.
    pub fn analyze_selections(
        &self,
        source: &str,
        language: Language,
        selections: &[Selection],
    ) -> Vec<Result<LogPointAnalysis, EngineError>> {
        let document = SourceDocument::new(source);
        if language.is_embedded() {
            return selections
                .par_iter()
                .map(|selection| self.analyze_document(&document, language, selection))
                .collect();
        }

        let tree = match parse_with_options(source, language, None, &self.parse_options()) {
            Ok(tree) => tree,
            Err(err) => return selections.iter().map(|_| Err(err.clone().into())).collect(),
        };
        selections
            .par_iter()
            .map(|selection| {
                check_selection(&document, selection)?;
                self.analyze_tree(&tree, &document, language, selection)
            })
            .collect()
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.options.max_parse_depth,
        }
    }

    fn parse(&self, source: &str, language: Language, selection: &Selection) -> Result<SyntaxTree, EngineError> {
        Ok(parse_with_options(
            source,
            language,
            Some(selection.line),
            &self.parse_options(),
        )?)
    }

    fn analyze_tree(
        &self,
        tree: &SyntaxTree,
        document: &SourceDocument,
        language: Language,
        selection: &Selection,
    ) -> Result<LogPointAnalysis, EngineError> {
        let ctx = CheckContext::new(tree, document, selection, self.options.max_traversal_depth);
        let Some(transformation) = apply_transformation(&ctx, &self.options.indent) else {
            return Ok(self.locate(&ctx, selection, None));
        };

        tracing::debug!(
            "reshaped body for `{}`; re-analyzing transformed source",
            selection.variable
        );
        let transformed = SourceDocument::new(transformation.source.as_str());
        let tree = self.parse(transformed.text(), language, selection)?;
        let ctx = CheckContext::new(&tree, &transformed, selection, self.options.max_traversal_depth);
        Ok(self.locate(&ctx, selection, Some(transformation)))
    }

    fn locate(
        &self,
        ctx: &CheckContext<'_>,
        selection: &Selection,
        transformation: Option<Transformation>,
    ) -> LogPointAnalysis {
        let classification = classify(ctx);
        let insertion_line = line_for(classification.category, ctx);
        let indentation = indentation_for(classification.category, ctx, insertion_line, &self.options.indent);
        LogPointAnalysis {
            selection: selection.clone(),
            category: classification.category,
            metadata: classification.metadata,
            insertion_line,
            indentation,
            enclosing_context: enclosing_context(ctx),
            transformation,
        }
    }
}

fn check_selection(document: &SourceDocument, selection: &Selection) -> Result<(), EngineError> {
    let line_count = document.line_count();
    if selection.line >= line_count {
        return Err(EngineError::SelectionOutOfRange {
            line: selection.line,
            line_count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_out_of_range() {
        let engine = LogPointEngine::default();
        let err = engine
            .analyze("const a = 1;", Language::JavaScript, &Selection::new(3, "a"))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::SelectionOutOfRange {
                line: 3,
                line_count: 1
            }
        );
    }

    #[test]
    fn test_parse_failure_is_surfaced() {
        let engine = LogPointEngine::default();
        let err = engine
            .analyze("const a = ;", Language::JavaScript, &Selection::new(0, "a"))
            .unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_parse_depth_option() {
        let engine = LogPointEngine::new(EngineOptions {
            max_parse_depth: 8,
            ..EngineOptions::default()
        });
        let source = format!("const a = {}1{};", "[".repeat(20), "]".repeat(20));
        let err = engine
            .analyze(&source, Language::JavaScript, &Selection::new(0, "a"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Parse(parse) if parse.is_nesting_too_deep()));
    }
}
