//! Structural queries over a [`SyntaxTree`].
//!
//! These helpers are iterative and carry the same bounds as
//! [`walk`](super::walk): a depth ceiling and, where a structure can be
//! revisited, a visited set. Hitting a bound yields the negative answer.

use rustc_hash::FxHashSet;

use super::node::{LiteralKind, NodeId, NodeKind};
use super::tree::SyntaxTree;
use super::walk::{MAX_TRAVERSAL_DEPTH, WalkControl, walk};

/// Strip wrappers that do not change which value an expression denotes:
/// parentheses, `as` / `satisfies`, `<T>x`, `x!` and optional-chain wrappers.
pub fn unwrap_transparent(tree: &SyntaxTree, id: NodeId) -> NodeId {
    let mut current = id;
    for _ in 0..MAX_TRAVERSAL_DEPTH {
        current = match tree.kind(current) {
            NodeKind::ParenthesizedExpression { expression }
            | NodeKind::ChainExpression { expression }
            | NodeKind::TsNonNullExpression { expression }
            | NodeKind::TsAsExpression { expression, .. }
            | NodeKind::TsSatisfiesExpression { expression, .. }
            | NodeKind::TsTypeAssertion { expression, .. } => *expression,
            _ => return current,
        };
    }
    tracing::warn!("wrapper chain deeper than {}; giving up", MAX_TRAVERSAL_DEPTH);
    current
}

/// [`unwrap_transparent`], additionally looking through `await`.
pub fn unwrap_awaited(tree: &SyntaxTree, id: NodeId) -> NodeId {
    let mut current = unwrap_transparent(tree, id);
    for _ in 0..MAX_TRAVERSAL_DEPTH {
        match tree.kind(current) {
            NodeKind::AwaitExpression { argument } => {
                current = unwrap_transparent(tree, *argument);
            }
            _ => return current,
        }
    }
    current
}

/// Render an access chain such as `this.user.profile["name"]`.
///
/// Returns `None` for anything that is not a chain of identifiers, `this`
/// and literal-keyed accesses; a computed access with a non-literal key has
/// no stable path.
pub fn member_path(tree: &SyntaxTree, id: NodeId) -> Option<String> {
    let mut segments = Vec::new();
    let mut current = unwrap_transparent(tree, id);
    loop {
        if segments.len() >= MAX_TRAVERSAL_DEPTH {
            tracing::warn!("member chain deeper than {}; no path", MAX_TRAVERSAL_DEPTH);
            return None;
        }
        match tree.kind(current) {
            NodeKind::Identifier { name } => {
                segments.push(name.to_string());
                break;
            }
            NodeKind::ThisExpression => {
                segments.push("this".to_string());
                break;
            }
            NodeKind::MemberExpression {
                object,
                property,
                computed,
                ..
            } => {
                let segment = if *computed {
                    match tree.kind(unwrap_transparent(tree, *property)) {
                        NodeKind::Literal {
                            kind: LiteralKind::String | LiteralKind::Number,
                            raw,
                        } => format!("[{raw}]"),
                        _ => return None,
                    }
                } else {
                    match tree.kind(*property) {
                        NodeKind::Identifier { name } => format!(".{name}"),
                        NodeKind::PrivateName { name } => format!(".#{name}"),
                        _ => return None,
                    }
                };
                segments.push(segment);
                current = unwrap_transparent(tree, *object);
            }
            _ => return None,
        }
    }
    segments.reverse();
    Some(segments.concat())
}

/// Whether `id` denotes `variable`: an identifier with that name, `this`, or
/// an access chain rendering to it.
pub fn matches_variable(tree: &SyntaxTree, id: NodeId, variable: &str) -> bool {
    match tree.kind(id) {
        NodeKind::Identifier { name } => name == variable,
        NodeKind::ThisExpression => variable == "this",
        NodeKind::MemberExpression { .. } | NodeKind::ChainExpression { .. } => {
            // Cheap reject before building the path.
            variable.contains(['.', '['])
                && member_path(tree, id).is_some_and(|path| path == variable)
        }
        _ => false,
    }
}

/// The identifier bound to `name` inside a binding pattern, searching nested
/// object / array patterns, defaults, rest elements and parameter properties.
pub fn pattern_binds(tree: &SyntaxTree, pattern: NodeId, name: &str) -> Option<NodeId> {
    let mut visited = FxHashSet::default();
    let mut stack = vec![(pattern, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        if depth > MAX_TRAVERSAL_DEPTH || !visited.insert(id) {
            tracing::warn!("binding pattern search bound exceeded at {:?}", id);
            return None;
        }
        let next = depth + 1;
        match tree.kind(id) {
            NodeKind::Identifier { name: bound } if bound == name => return Some(id),
            NodeKind::ObjectPattern { properties } => {
                stack.extend(properties.iter().rev().map(|p| (*p, next)));
            }
            NodeKind::ArrayPattern { elements } => {
                stack.extend(elements.iter().flatten().rev().map(|e| (*e, next)));
            }
            NodeKind::Property { value, .. } => stack.push((*value, next)),
            NodeKind::AssignmentPattern { left, .. } => stack.push((*left, next)),
            NodeKind::RestElement { argument } => stack.push((*argument, next)),
            NodeKind::TsParameterProperty { parameter } => stack.push((*parameter, next)),
            _ => {}
        }
    }
    None
}

/// Whether an identifier or access chain at `id` is read as a value, rather
/// than being a declaration name, a property key, a label or a binding.
pub fn is_reference_position(tree: &SyntaxTree, id: NodeId) -> bool {
    let Some(parent) = tree.parent(id) else {
        return false;
    };
    match tree.kind(parent) {
        NodeKind::MemberExpression {
            property,
            computed: false,
            ..
        } => *property != id,
        NodeKind::Property {
            key,
            value,
            computed,
            ..
        } => {
            if *key == id {
                return *computed;
            }
            // Values of object *patterns* are bindings.
            *value != id
                || !tree
                    .parent(parent)
                    .is_some_and(|owner| matches!(tree.kind(owner), NodeKind::ObjectPattern { .. }))
        }
        NodeKind::MethodDefinition { key, computed, .. }
        | NodeKind::PropertyDefinition { key, computed, .. } => *key != id || *computed,
        NodeKind::VariableDeclarator { id: target, .. } => *target != id,
        NodeKind::FunctionDeclaration(f) | NodeKind::FunctionExpression(f) => {
            f.id != Some(id) && !f.params.contains(&id)
        }
        NodeKind::ArrowFunctionExpression { params, .. } => !params.contains(&id),
        NodeKind::ClassDeclaration(c) | NodeKind::ClassExpression(c) => c.id != Some(id),
        NodeKind::AssignmentPattern { left, .. } => *left != id,
        NodeKind::CatchClause { param, .. } => *param != Some(id),
        NodeKind::LabeledStatement { label, .. } => *label != id,
        NodeKind::TsDeclaration { id: name, .. } => *name != Some(id),
        NodeKind::ArrayPattern { .. }
        | NodeKind::ObjectPattern { .. }
        | NodeKind::RestElement { .. }
        | NodeKind::TsParameterProperty { .. }
        | NodeKind::BreakStatement { .. }
        | NodeKind::ContinueStatement { .. }
        | NodeKind::ImportDeclaration { .. }
        | NodeKind::MetaProperty { .. } => false,
        _ => true,
    }
}

/// Every reference to `variable` under `root`, in source order.
pub fn references(tree: &SyntaxTree, root: NodeId, variable: &str) -> Vec<NodeId> {
    let mut found = Vec::new();
    walk(tree, root, |id, _| {
        if matches_variable(tree, id, variable) && is_reference_position(tree, id) {
            found.push(id);
            // `a.b` selected: the inner `a` is not a separate hit.
            return WalkControl::SkipChildren;
        }
        WalkControl::Continue
    });
    found
}

/// Name of a property / method key: identifiers, private names and string or
/// numeric literals.
pub fn property_key_name(tree: &SyntaxTree, key: NodeId) -> Option<String> {
    match tree.kind(key) {
        NodeKind::Identifier { name } => Some(name.to_string()),
        NodeKind::PrivateName { name } => Some(format!("#{name}")),
        NodeKind::Literal {
            kind: LiteralKind::String,
            raw,
        } => Some(raw.trim_matches(['"', '\'']).to_string()),
        NodeKind::Literal {
            kind: LiteralKind::Number,
            raw,
        } => Some(raw.to_string()),
        _ => None,
    }
}

/// Nearest statement containing `id` (or `id` itself), lifted through
/// `export` wrappers.
pub fn governing_statement(tree: &SyntaxTree, id: NodeId) -> Option<NodeId> {
    let mut statement = std::iter::once(id)
        .chain(tree.ancestors(id))
        .find(|node| tree.kind(*node).is_statement())?;
    while let Some(parent) = tree.parent(statement) {
        match tree.kind(parent) {
            NodeKind::ExportNamedDeclaration { .. } | NodeKind::ExportDefaultDeclaration { .. } => {
                statement = parent;
            }
            _ => break,
        }
    }
    Some(statement)
}

/// Nearest function-like ancestor of `id`, excluding `id` itself.
pub fn enclosing_function(tree: &SyntaxTree, id: NodeId) -> Option<NodeId> {
    tree.ancestors(id)
        .find(|node| tree.kind(*node).is_function_like())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Language, parse};
    use crate::syntax::find_first;

    fn parse_js(source: &str) -> SyntaxTree {
        parse(source, Language::TypeScript, None).unwrap()
    }

    fn first(tree: &SyntaxTree, tag: &str) -> NodeId {
        find_first(tree, tree.root(), |id| tree.kind(id).tag() == tag).unwrap()
    }

    #[test]
    fn test_member_path_renders_chain() {
        let tree = parse_js("x = this.user?.profile['name'][0];");
        let chain = first(&tree, "ChainExpression");
        assert_eq!(
            member_path(&tree, chain).as_deref(),
            Some("this.user.profile['name'][0]")
        );
    }

    #[test]
    fn test_member_path_refuses_computed_identifier() {
        let tree = parse_js("x = a[key].b;");
        let member = first(&tree, "MemberExpression");
        assert_eq!(member_path(&tree, member), None);
    }

    #[test]
    fn test_unwrap_transparent_and_awaited() {
        let tree = parse_js("async function f() { x = (await (y as any))!; }");
        let assign = first(&tree, "AssignmentExpression");
        let NodeKind::AssignmentExpression { right, .. } = tree.kind(assign) else {
            unreachable!()
        };
        let inner = unwrap_awaited(&tree, *right);
        assert_eq!(tree.identifier_name(inner), Some("y"));
        assert_eq!(tree.kind(unwrap_transparent(&tree, *right)).tag(), "AwaitExpression");
    }

    #[test]
    fn test_pattern_binds_nested_destructuring() {
        let tree = parse_js("const { a: [b, { c = 1 }], ...rest } = obj;");
        let declarator = first(&tree, "VariableDeclarator");
        let NodeKind::VariableDeclarator { id, .. } = tree.kind(declarator) else {
            unreachable!()
        };
        assert!(pattern_binds(&tree, *id, "c").is_some());
        assert!(pattern_binds(&tree, *id, "rest").is_some());
        assert!(pattern_binds(&tree, *id, "a").is_none());
    }

    #[test]
    fn test_references_skip_keys_and_bindings() {
        let tree = parse_js("const value = { value: 1 };\nfoo(value, obj.value);");
        let refs = references(&tree, tree.root(), "value");
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_governing_statement_lifts_exports() {
        let tree = parse_js("export const a = 1;");
        let declarator = first(&tree, "VariableDeclarator");
        let statement = governing_statement(&tree, declarator).unwrap();
        assert_eq!(tree.kind(statement).tag(), "ExportNamedDeclaration");
    }

    #[test]
    fn test_property_key_name() {
        let tree = parse_js("x = { 'quoted-key': 1 };");
        let property = first(&tree, "Property");
        let NodeKind::Property { key, .. } = tree.kind(property) else {
            unreachable!()
        };
        assert_eq!(property_key_name(&tree, *key).as_deref(), Some("quoted-key"));
    }
}
