//! Property-level checkers: `obj.method()` calls on the selection and
//! object-literal keys.

use super::{CheckResult, DEEP_OBJECT_PATH};
use crate::analysis::CheckContext;
use crate::syntax::query::{matches_variable, member_path, property_key_name, unwrap_transparent};
use crate::syntax::{MAX_TRAVERSAL_DEPTH, NodeId, NodeKind, SyntaxTree};

/// The selection is the object of a method call on its line.
pub fn property_method_call(ctx: &CheckContext<'_>) -> CheckResult {
    CheckResult::from(method_call_object(ctx).is_some())
}

/// The call `selection.method(…)` whose object starts on the selection line.
pub(crate) fn method_call_object(ctx: &CheckContext<'_>) -> Option<NodeId> {
    let tree = ctx.tree;
    ctx.find_all(|id| {
        let NodeKind::CallExpression { callee, .. } = tree.kind(id) else {
            return false;
        };
        let NodeKind::MemberExpression { object, .. } = tree.kind(unwrap_transparent(tree, *callee))
        else {
            return false;
        };
        let object = unwrap_transparent(tree, *object);
        matches_variable(tree, object, ctx.variable) && ctx.start_line(object) == ctx.selection_line
    })
    .into_iter()
    .next()
}

/// The selection is a key of an object literal. Records the dotted path from
/// the nearest enclosing declarator or assignment as `deepObjectPath`.
pub fn raw_property_access(ctx: &CheckContext<'_>) -> CheckResult {
    let Some(property) = object_key_property(ctx) else {
        return CheckResult::miss();
    };
    match deep_object_path(ctx.tree, property) {
        Some(path) => CheckResult::hit().with_metadata(DEEP_OBJECT_PATH, path),
        None => CheckResult::hit(),
    }
}

/// The object-literal `Property` keyed by the selection on its line.
pub(crate) fn object_key_property(ctx: &CheckContext<'_>) -> Option<NodeId> {
    let tree = ctx.tree;
    ctx.find_all(|id| {
        let NodeKind::Property {
            key,
            computed: false,
            ..
        } = tree.kind(id)
        else {
            return false;
        };
        let in_literal = tree
            .parent(id)
            .is_some_and(|owner| matches!(tree.kind(owner), NodeKind::ObjectExpression { .. }));
        in_literal
            && ctx.start_line(*key) == ctx.selection_line
            && property_key_name(tree, *key).is_some_and(|name| name == ctx.variable)
    })
    .into_iter()
    .next()
}

/// `config.server.port` for `port` in `const config = { server: { port: 80 } }`.
/// `None` when the literal is not (part of) an initializer or assigned value.
fn deep_object_path(tree: &SyntaxTree, property: NodeId) -> Option<String> {
    let NodeKind::Property { key, .. } = tree.kind(property) else {
        return None;
    };
    let mut segments = vec![format!(".{}", property_key_name(tree, *key)?)];
    let mut child = property;
    for parent in tree.ancestors(property).take(MAX_TRAVERSAL_DEPTH) {
        match tree.kind(parent) {
            NodeKind::ObjectExpression { .. } => {}
            NodeKind::Property {
                key,
                computed: false,
                ..
            } => segments.push(format!(".{}", property_key_name(tree, *key)?)),
            NodeKind::ArrayExpression { elements } => {
                let index = elements.iter().position(|element| *element == Some(child))?;
                segments.push(format!("[{index}]"));
            }
            NodeKind::VariableDeclarator { id, init } if *init == Some(child) => {
                segments.push(tree.identifier_name(*id)?.to_string());
                break;
            }
            NodeKind::AssignmentExpression { left, right, .. } if *right == child => {
                segments.push(member_path(tree, *left)?);
                break;
            }
            _ if unwrap_transparent(tree, parent) == unwrap_transparent(tree, child) => {}
            _ => return None,
        }
        child = parent;
    }
    if segments.len() < 2 {
        return None;
    }
    segments.reverse();
    Some(segments.concat())
}
