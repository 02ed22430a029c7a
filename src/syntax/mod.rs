//! Syntax tree for JavaScript / TypeScript sources.
//!
//! - [`NodeKind`], [`NodeId`] - closed node kinds referencing children by id
//! - [`SyntaxTree`], [`TreeBuilder`] - arena storage with parent links
//! - [`walk`] - bounded pre-order traversal
//! - [`query`] - structural helpers shared by checkers and line calculators

mod node;
pub mod query;
mod tree;
pub mod walk;

pub use node::{
    Class, Function, LiteralKind, MethodKind, NodeId, NodeKind, PropertyKind, SyntaxNode,
    VariableKind,
};
pub use tree::{InvalidNodeId, SyntaxTree, TreeBuilder};
pub use walk::{
    MAX_TRAVERSAL_DEPTH, WalkControl, WalkReport, deepest_end, find_all, find_first, walk,
    walk_bounded,
};
