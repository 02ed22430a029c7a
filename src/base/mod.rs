//! Foundation types for the engine.
//!
//! - [`LineIndex`], [`LineCol`] - offset ↔ line/column conversion
//! - [`TextDocument`], [`SourceDocument`] - the text buffer seen by the engine
//! - [`IndentStyle`] - indentation of generated text
//! - [`TextRange`], [`TextSize`] - byte offsets
//!
//! This module has NO dependencies on other logpoint modules.

mod document;
mod indent;
mod line_index;

pub use document::{SourceDocument, TextDocument};
pub use indent::IndentStyle;
pub use line_index::{LineCol, LineIndex};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
