//! Per-selection analysis context.

use text_size::TextSize;

use crate::base::TextDocument;
use crate::syntax::{NodeId, SyntaxTree, WalkControl, WalkReport, deepest_end, walk_bounded};

/// The identifier (or access chain) the user selected and the line it is on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// 0-indexed line of the selection.
    pub line: u32,
    /// Normalized selected text: no whitespace, `?.` folded to `.`.
    pub variable: String,
}

impl Selection {
    pub fn new(line: u32, variable: &str) -> Self {
        Self {
            line,
            variable: normalize_variable(variable),
        }
    }
}

/// Remove whitespace and fold optional-chaining operators, so that
/// `user?.name` and `user . name` both select `user.name`.
pub fn normalize_variable(text: &str) -> String {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact.replace("?.[", "[").replace("?.", ".")
}

/// Everything a checker, line calculator or resolver may look at.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    pub tree: &'a SyntaxTree,
    pub document: &'a dyn TextDocument,
    pub selection_line: u32,
    pub variable: &'a str,
    /// Depth ceiling for walks started from this context.
    pub max_depth: usize,
}

impl std::fmt::Debug for CheckContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckContext")
            .field("selection_line", &self.selection_line)
            .field("variable", &self.variable)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl<'a> CheckContext<'a> {
    pub fn new(
        tree: &'a SyntaxTree,
        document: &'a dyn TextDocument,
        selection: &'a Selection,
        max_depth: usize,
    ) -> Self {
        Self {
            tree,
            document,
            selection_line: selection.line,
            variable: &selection.variable,
            max_depth,
        }
    }

    pub fn line_of(&self, offset: TextSize) -> u32 {
        self.document.offset_to_line(offset)
    }

    pub fn start_line(&self, id: NodeId) -> u32 {
        self.line_of(self.tree.range(id).start())
    }

    /// Line of the last character of `id`.
    pub fn end_line(&self, id: NodeId) -> u32 {
        let range = self.tree.range(id);
        let last = if range.is_empty() {
            range.end()
        } else {
            range.end() - TextSize::new(1)
        };
        self.line_of(last)
    }

    /// Last line reached by `id` or any descendant.
    pub fn deepest_end_line(&self, id: NodeId) -> u32 {
        let end = deepest_end(self.tree, id);
        let last = if end > self.tree.range(id).start() {
            end - TextSize::new(1)
        } else {
            end
        };
        self.line_of(last)
    }

    /// Whether the selection line lies within `id`'s lines.
    pub fn covers_selection(&self, id: NodeId) -> bool {
        (self.start_line(id)..=self.end_line(id)).contains(&self.selection_line)
    }

    /// Number of lines `id` spans, minus one.
    pub fn line_span(&self, id: NodeId) -> u32 {
        self.end_line(id).saturating_sub(self.start_line(id))
    }

    /// Source text of `id`.
    pub fn text(&self, id: NodeId) -> &'a str {
        self.document
            .text()
            .get(std::ops::Range::<usize>::from(self.tree.range(id)))
            .unwrap_or_default()
    }

    /// Clamp an insertion line to the document.
    pub fn clamp(&self, line: u32) -> u32 {
        line.min(self.document.line_count())
    }

    /// Bounded walk from the root.
    pub fn walk<F>(&self, visit: F) -> WalkReport
    where
        F: FnMut(NodeId, usize) -> WalkControl,
    {
        walk_bounded(self.tree, self.tree.root(), self.max_depth, visit)
    }

    /// Every node matching `predicate`, in pre-order.
    pub fn find_all<F>(&self, mut predicate: F) -> Vec<NodeId>
    where
        F: FnMut(NodeId) -> bool,
    {
        let mut found = Vec::new();
        self.walk(|id, _| {
            if predicate(id) {
                found.push(id);
            }
            WalkControl::Continue
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_variable() {
        assert_eq!(normalize_variable(" user?.profile . name "), "user.profile.name");
        assert_eq!(normalize_variable("items?.[0]"), "items[0]");
        assert_eq!(normalize_variable("count"), "count");
    }
}
