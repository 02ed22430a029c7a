//! # logpoint-engine
//!
//! Decides where a debug log statement for a selected identifier belongs in a
//! JavaScript or TypeScript document.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! engine, message → parse / classify / locate / render for one selection
//!   ↓
//! classify        → ordered checker table, first match wins
//! insertion       → insertion line and indentation per category
//! context         → enclosing class and function names
//! transform       → reshaping of bodies that cannot take a new line
//!   ↓
//! checkers        → one predicate per usage shape
//!   ↓
//! analysis        → Selection, CheckContext
//!   ↓
//! syntax          → arena SyntaxTree, bounded walks, tree queries
//!   ↓
//! parser          → Logos lexer, recursive-descent JS/TS/JSX parser
//!   ↓
//! base            → Primitives (LineIndex, TextDocument, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → analysis → checkers → engine)
// ============================================================================

/// Foundation types: line index, text documents, indentation
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, script regions
pub mod parser;

/// Syntax: arena tree, node kinds, bounded traversal
pub mod syntax;

/// Selection and per-selection context
pub mod analysis;

/// Usage-shape predicates and the category they report
pub mod checkers;

/// Priority-ordered classification
pub mod classify;

/// Insertion line and indentation
pub mod insertion;

/// Enclosing class/function resolution
pub mod context;

/// Body reshaping
pub mod transform;

/// Engine facade
pub mod engine;

/// Log statement rendering
pub mod message;

pub use analysis::{CheckContext, Selection, normalize_variable};
pub use base::{IndentStyle, LineCol, LineIndex, SourceDocument, TextDocument, TextRange, TextSize};
pub use checkers::{Category, CheckMetadata, CheckResult, Checker};
pub use classify::{CHECKER_PRIORITY, Classification, classify};
pub use context::{EnclosingContext, enclosing_context};
pub use engine::{EngineError, EngineOptions, LogPointAnalysis, LogPointEngine};
pub use insertion::{indentation_for, line_for};
pub use message::{LogMessage, MessageOptions, insert_log_statement};
pub use parser::{Language, ParseError, ParseResult, parse};
pub use syntax::{NodeId, NodeKind, SyntaxTree};
pub use transform::{Transformation, TransformationKind, apply_transformation, needs_transformation};
