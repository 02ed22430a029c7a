//! Enclosing class and function names for a selection.
//!
//! One pre-order traversal computes both names. Subtrees whose lines do not
//! contain the selection line are pruned, and among the named candidates
//! containing it the deepest wins.

use crate::analysis::CheckContext;
use crate::syntax::query::{member_path, property_key_name, unwrap_transparent};
use crate::syntax::{MethodKind, NodeId, NodeKind, SyntaxTree, WalkControl};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnclosingContext {
    /// Innermost enclosing class name, empty when there is none.
    pub class_name: String,
    /// Innermost enclosing function or method name, empty when there is none.
    pub function_name: String,
}

#[derive(Debug)]
struct MatchRecord {
    name: String,
    depth: usize,
}

impl MatchRecord {
    fn offer(slot: &mut Option<MatchRecord>, name: Option<String>, depth: usize) {
        let Some(name) = name.filter(|name| !name.is_empty()) else {
            return;
        };
        if slot.as_ref().is_none_or(|current| depth > current.depth) {
            *slot = Some(MatchRecord { name, depth });
        }
    }
}

pub fn enclosing_context(ctx: &CheckContext<'_>) -> EnclosingContext {
    let tree = ctx.tree;
    let mut class: Option<MatchRecord> = None;
    let mut function: Option<MatchRecord> = None;

    ctx.walk(|id, depth| {
        if !ctx.covers_selection(id) {
            return WalkControl::SkipChildren;
        }
        match tree.kind(id) {
            NodeKind::ClassDeclaration(c) | NodeKind::ClassExpression(c) => {
                let name = c
                    .id
                    .and_then(|id| tree.identifier_name(id).map(str::to_string))
                    .or_else(|| inferred_name(tree, id));
                MatchRecord::offer(&mut class, name, depth);
            }
            NodeKind::FunctionDeclaration(f) | NodeKind::FunctionExpression(f) => {
                let name = f
                    .id
                    .and_then(|id| tree.identifier_name(id).map(str::to_string))
                    .or_else(|| inferred_name(tree, id));
                MatchRecord::offer(&mut function, name, depth);
            }
            NodeKind::ArrowFunctionExpression { .. } => {
                MatchRecord::offer(&mut function, inferred_name(tree, id), depth);
            }
            _ => {}
        }
        WalkControl::Continue
    });

    let context = EnclosingContext {
        class_name: class.map(|record| record.name).unwrap_or_default(),
        function_name: function.map(|record| record.name).unwrap_or_default(),
    };
    tracing::trace!(
        "enclosing context of line {}: class `{}`, function `{}`",
        ctx.selection_line,
        context.class_name,
        context.function_name
    );
    context
}

/// Name given to an anonymous function or class by where it is stored:
/// a declarator, an assignment target, an object or class property key, or
/// a method key.
fn inferred_name(tree: &SyntaxTree, id: NodeId) -> Option<String> {
    let mut child = id;
    for parent in tree.ancestors(id) {
        match tree.kind(parent) {
            NodeKind::VariableDeclarator { id: target, init } if *init == Some(child) => {
                return tree.identifier_name(*target).map(str::to_string);
            }
            NodeKind::AssignmentExpression { left, right, .. } if *right == child => {
                return last_segment(tree, *left);
            }
            NodeKind::MethodDefinition {
                kind: MethodKind::Constructor,
                value,
                ..
            } if *value == child => return Some("constructor".to_string()),
            NodeKind::MethodDefinition {
                key,
                value,
                computed: false,
                ..
            } if *value == child => return property_key_name(tree, *key),
            NodeKind::Property {
                key,
                value,
                computed: false,
                ..
            }
            | NodeKind::PropertyDefinition {
                key,
                value: Some(value),
                computed: false,
                ..
            } if *value == child => return property_key_name(tree, *key),
            NodeKind::AssignmentPattern { left, right } if *right == child => {
                return tree.identifier_name(*left).map(str::to_string);
            }
            _ if unwrap_transparent(tree, parent) == id => child = parent,
            _ => return None,
        }
    }
    None
}

/// `handler` for `this.handler`, `a` for `a`.
fn last_segment(tree: &SyntaxTree, target: NodeId) -> Option<String> {
    let target = unwrap_transparent(tree, target);
    match tree.kind(target) {
        NodeKind::Identifier { name } => Some(name.to_string()),
        NodeKind::MemberExpression {
            property,
            computed: false,
            ..
        } => property_key_name(tree, *property),
        _ => member_path(tree, target),
    }
}
