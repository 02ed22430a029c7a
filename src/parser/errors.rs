//! Parse failures
//!
//! Parsing is fail-fast: the first error aborts the parse so nothing
//! downstream ever runs against a partial tree.

use text_size::{TextRange, TextSize};
use thiserror::Error;

use crate::syntax::InvalidNodeId;

pub type ParseResult<T> = Result<T, ParseError>;

/// Why a source text could not be turned into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected `{found}` at {range:?}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        range: TextRange,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        expected: &'static str,
        offset: TextSize,
    },

    #[error("unterminated {what} starting at {offset:?}")]
    Unterminated { what: &'static str, offset: TextSize },

    #[error("nesting deeper than {limit} levels at {offset:?}")]
    NestingTooDeep { limit: usize, offset: TextSize },

    #[error("line {line} is outside every script region of the document")]
    OutsideScriptRegion { line: u32 },

    #[error("malformed syntax tree: {0}")]
    InvalidTree(#[from] InvalidNodeId),
}

impl ParseError {
    /// Source range the error points at, when it has one.
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::UnexpectedToken { range, .. } => Some(*range),
            Self::UnexpectedEof { offset, .. }
            | Self::Unterminated { offset, .. }
            | Self::NestingTooDeep { offset, .. } => Some(TextRange::empty(*offset)),
            Self::OutsideScriptRegion { .. } | Self::InvalidTree(_) => None,
        }
    }

    pub fn is_nesting_too_deep(&self) -> bool {
        matches!(self, Self::NestingTooDeep { .. })
    }

    pub fn is_outside_script_region(&self) -> bool {
        matches!(self, Self::OutsideScriptRegion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_range() {
        let err = ParseError::Unterminated {
            what: "template literal",
            offset: TextSize::new(4),
        };
        assert_eq!(err.range(), Some(TextRange::empty(TextSize::new(4))));
        assert_eq!(ParseError::OutsideScriptRegion { line: 2 }.range(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::UnexpectedToken {
            found: ")".to_string(),
            expected: "an expression",
            range: TextRange::new(TextSize::new(3), TextSize::new(4)),
        };
        assert_eq!(
            err.to_string(),
            "unexpected `)` at 3..4, expected an expression"
        );
    }
}
