//! Bounded pre-order traversal.
//!
//! Every tree walk in the engine goes through [`walk`] or carries the same
//! discipline by hand: an explicit stack instead of the call stack, a visited
//! set, and a depth ceiling. Overflowing a bound skips the offending subtree,
//! logs a warning and reports [`WalkReport::bound_exceeded`]; it never panics.

use rustc_hash::FxHashSet;
use text_size::TextSize;

use super::node::NodeId;
use super::tree::SyntaxTree;

/// Depth ceiling for every traversal and recursive helper.
pub const MAX_TRAVERSAL_DEPTH: usize = 1000;

/// What the visitor wants to happen after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Descend into the node's children.
    Continue,
    /// Do not visit this node's children; continue with its siblings.
    SkipChildren,
    /// Halt the traversal immediately.
    Stop,
}

/// Summary of a finished walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkReport {
    /// The visitor returned [`WalkControl::Stop`].
    pub stopped: bool,
    /// A subtree was skipped because it was too deep or already visited.
    pub bound_exceeded: bool,
}

/// Pre-order walk from `root`. The visitor receives each node with its depth
/// relative to `root` (0 for `root` itself).
pub fn walk<F>(tree: &SyntaxTree, root: NodeId, visit: F) -> WalkReport
where
    F: FnMut(NodeId, usize) -> WalkControl,
{
    walk_bounded(tree, root, MAX_TRAVERSAL_DEPTH, visit)
}

/// [`walk`] with an explicit depth ceiling.
pub fn walk_bounded<F>(tree: &SyntaxTree, root: NodeId, max_depth: usize, mut visit: F) -> WalkReport
where
    F: FnMut(NodeId, usize) -> WalkControl,
{
    let mut report = WalkReport::default();
    let mut visited = FxHashSet::default();
    let mut stack = vec![(root, 0usize)];
    let mut children = Vec::new();

    while let Some((id, depth)) = stack.pop() {
        if !visited.insert(id) {
            if !report.bound_exceeded {
                tracing::warn!("node {:?} reached twice during traversal; skipping subtree", id);
            }
            report.bound_exceeded = true;
            continue;
        }
        if depth > max_depth {
            if !report.bound_exceeded {
                tracing::warn!("traversal exceeded depth {}; skipping subtree", max_depth);
            }
            report.bound_exceeded = true;
            continue;
        }

        match visit(id, depth) {
            WalkControl::Stop => {
                report.stopped = true;
                return report;
            }
            WalkControl::SkipChildren => {}
            WalkControl::Continue => {
                children.clear();
                tree.kind(id).push_children(&mut children);
                stack.extend(children.iter().rev().map(|child| (*child, depth + 1)));
            }
        }
    }

    report
}

/// First node in pre-order (including `root`) matching `predicate`.
pub fn find_first<F>(tree: &SyntaxTree, root: NodeId, mut predicate: F) -> Option<NodeId>
where
    F: FnMut(NodeId) -> bool,
{
    let mut found = None;
    walk(tree, root, |id, _| {
        if predicate(id) {
            found = Some(id);
            WalkControl::Stop
        } else {
            WalkControl::Continue
        }
    });
    found
}

/// Every node in pre-order (including `root`) matching `predicate`.
pub fn find_all<F>(tree: &SyntaxTree, root: NodeId, mut predicate: F) -> Vec<NodeId>
where
    F: FnMut(NodeId) -> bool,
{
    let mut found = Vec::new();
    walk(tree, root, |id, _| {
        if predicate(id) {
            found.push(id);
        }
        WalkControl::Continue
    });
    found
}

/// Largest end offset reached by `root` or any of its descendants.
///
/// A node's own range is not trusted to cover its children: trailing chained
/// calls and closing parentheses are picked up from the descendants.
pub fn deepest_end(tree: &SyntaxTree, root: NodeId) -> TextSize {
    let mut end = tree.range(root).end();
    walk(tree, root, |id, _| {
        end = end.max(tree.range(id).end());
        WalkControl::Continue
    });
    end
}
