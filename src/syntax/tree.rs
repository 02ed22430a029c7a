//! Arena storage for syntax nodes.
//!
//! Nodes are allocated bottom-up by [`TreeBuilder`]; [`TreeBuilder::finish`]
//! validates every child reference and computes parent links, so a
//! [`SyntaxTree`] only hands out ids that index into its arena.

use rustc_hash::FxHashSet;
use text_size::TextRange;
use thiserror::Error;

use super::node::{NodeId, NodeKind, SyntaxNode};
use super::walk::MAX_TRAVERSAL_DEPTH;

/// A child or root reference pointing outside the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("node reference {id:?} is outside the arena of {len} nodes")]
pub struct InvalidNodeId {
    pub id: NodeId,
    pub len: usize,
}

/// Incrementally builds a [`SyntaxTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and return its id.
    pub fn alloc(&mut self, kind: NodeKind, range: TextRange) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode { kind, range });
        id
    }

    /// Number of nodes allocated so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node allocated after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SyntaxNode> {
        self.nodes.get_mut(id.index())
    }

    /// Validate references and compute parent links.
    pub fn finish(self, root: NodeId) -> Result<SyntaxTree, InvalidNodeId> {
        let len = self.nodes.len();
        let check = |id: NodeId| {
            if id.index() < len {
                Ok(())
            } else {
                Err(InvalidNodeId { id, len })
            }
        };
        check(root)?;
        let mut children = Vec::new();
        for node in &self.nodes {
            children.clear();
            node.kind.push_children(&mut children);
            children.iter().copied().try_for_each(check)?;
        }

        let mut parents = vec![None; len];
        let mut seen = FxHashSet::default();
        let mut stack = vec![root];
        seen.insert(root);
        while let Some(id) = stack.pop() {
            children.clear();
            self.nodes[id.index()].kind.push_children(&mut children);
            for &child in &children {
                if seen.insert(child) {
                    parents[child.index()] = Some(id);
                    stack.push(child);
                }
            }
        }

        Ok(SyntaxTree {
            nodes: self.nodes,
            parents,
            root,
        })
    }
}

/// An immutable syntax tree.
///
/// Every id reachable through the tree's API indexes into its arena. The tree
/// itself may still be malformed (a node listed as its own descendant);
/// traversals guard against that with visited sets and depth ceilings.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    parents: Vec<Option<NodeId>>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.nodes[id.index()].range
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Strict ancestors of `id`, innermost first.
    ///
    /// Stops after [`MAX_TRAVERSAL_DEPTH`] steps so a parent cycle can not
    /// loop forever.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = id;
        let mut steps = 0;
        std::iter::from_fn(move || {
            if steps >= MAX_TRAVERSAL_DEPTH {
                return None;
            }
            steps += 1;
            current = self.parent(current)?;
            Some(current)
        })
    }

    /// All node ids, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId::from_raw)
    }

    /// Name of `id` when it is an `Identifier`.
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        self.kind(id).identifier_name()
    }
}
