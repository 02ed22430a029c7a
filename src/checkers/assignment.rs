//! Assignment-shaped checkers: the selection is the target of a declarator
//! or assignment and the shape of the value decides the category.

use super::ternary::ternary_binding;
use super::{Binding, Category, CheckResult, bindings_on_line};
use crate::analysis::CheckContext;
use crate::syntax::query::{matches_variable, member_path, unwrap_awaited, unwrap_transparent};
use crate::syntax::{NodeId, NodeKind, SyntaxTree};

type BindingPredicate = fn(&CheckContext<'_>, &Binding) -> bool;

fn any_binding(ctx: &CheckContext<'_>, predicate: BindingPredicate) -> CheckResult {
    CheckResult::from(bindings_on_line(ctx).iter().any(|binding| predicate(ctx, binding)))
}

fn predicate_for(category: Category) -> Option<BindingPredicate> {
    let predicate: BindingPredicate = match category {
        Category::NamedFunctionAssignment => is_named_function,
        Category::ObjectFunctionCallAssignment => is_object_function_call,
        Category::FunctionCallAssignment => is_function_call,
        Category::PropertyAccessAssignment => reads_property,
        Category::ObjectLiteral => is_object_literal,
        Category::ArrayAssignment => is_array,
        Category::TemplateString => is_template,
        Category::BinaryExpression => is_binary,
        Category::PrimitiveAssignment => is_primitive_binding,
        _ => return None,
    };
    Some(predicate)
}

/// The binding that earned `category`: the first one on the selection line
/// with that category's shape.
pub(crate) fn governing_binding(ctx: &CheckContext<'_>, category: Category) -> Option<Binding> {
    if category == Category::Ternary {
        return ternary_binding(ctx);
    }
    let predicate = predicate_for(category)?;
    bindings_on_line(ctx)
        .into_iter()
        .find(|binding| predicate(ctx, binding))
}

/// `name = function () {}` / `name = () => …`
pub fn named_function_assignment(ctx: &CheckContext<'_>) -> CheckResult {
    any_binding(ctx, is_named_function)
}

fn is_named_function(ctx: &CheckContext<'_>, binding: &Binding) -> bool {
    !binding.destructured
        && binding.unwrapped_value(ctx).is_some_and(|value| {
            matches!(
                ctx.tree.kind(value),
                NodeKind::FunctionExpression(_) | NodeKind::ArrowFunctionExpression { .. }
            )
        })
}

/// `name = obj.method(…)`, awaited or wrapped, or a call whose object-literal
/// argument holds such a member call.
pub fn object_function_call_assignment(ctx: &CheckContext<'_>) -> CheckResult {
    any_binding(ctx, is_object_function_call)
}

fn is_object_function_call(ctx: &CheckContext<'_>, binding: &Binding) -> bool {
    binding.value.is_some_and(|value| {
        let call = unwrap_awaited(ctx.tree, value);
        is_member_call(ctx.tree, call) || has_member_call_in_object_argument(ctx.tree, call)
    })
}

/// `name = someCall(…)` / `name = new Foo(…)` / `name = await import(…)`
pub fn function_call_assignment(ctx: &CheckContext<'_>) -> CheckResult {
    any_binding(ctx, is_function_call)
}

fn is_function_call(ctx: &CheckContext<'_>, binding: &Binding) -> bool {
    binding.value.is_some_and(|value| {
        matches!(
            ctx.tree.kind(unwrap_awaited(ctx.tree, value)),
            NodeKind::CallExpression { .. } | NodeKind::NewExpression { .. } | NodeKind::ImportExpression { .. }
        )
    })
}

/// `name = obj.prop` or `obj.prop = name`.
pub fn property_access_assignment(ctx: &CheckContext<'_>) -> CheckResult {
    let reads = bindings_on_line(ctx).iter().any(|binding| reads_property(ctx, binding));
    CheckResult::from(reads || stored_into_property(ctx).is_some())
}

fn reads_property(ctx: &CheckContext<'_>, binding: &Binding) -> bool {
    !binding.destructured
        && binding
            .unwrapped_value(ctx)
            .is_some_and(|value| matches!(ctx.tree.kind(value), NodeKind::MemberExpression { .. }))
}

/// The `obj.prop = name` assignment storing the selection on its line.
pub(crate) fn stored_into_property(ctx: &CheckContext<'_>) -> Option<NodeId> {
    let tree = ctx.tree;
    ctx.find_all(|id| match tree.kind(id) {
        NodeKind::AssignmentExpression { left, right, .. } => {
            let right = unwrap_transparent(tree, *right);
            matches!(tree.kind(unwrap_transparent(tree, *left)), NodeKind::MemberExpression { .. })
                && matches_variable(tree, right, ctx.variable)
                && ctx.start_line(right) == ctx.selection_line
        }
        _ => false,
    })
    .into_iter()
    .next()
}

/// `name = { … }`
pub fn object_literal(ctx: &CheckContext<'_>) -> CheckResult {
    any_binding(ctx, is_object_literal)
}

fn is_object_literal(ctx: &CheckContext<'_>, binding: &Binding) -> bool {
    !binding.destructured
        && binding
            .unwrapped_value(ctx)
            .is_some_and(|value| matches!(ctx.tree.kind(value), NodeKind::ObjectExpression { .. }))
}

/// `name = [ … ]`, `obj.path = [ … ]` and destructuring from an array literal.
pub fn array_assignment(ctx: &CheckContext<'_>) -> CheckResult {
    any_binding(ctx, is_array)
}

fn is_array(ctx: &CheckContext<'_>, binding: &Binding) -> bool {
    binding
        .unwrapped_value(ctx)
        .is_some_and(|value| matches!(ctx.tree.kind(value), NodeKind::ArrayExpression { .. }))
}

/// ``name = `…` `` and tagged templates.
pub fn template_string(ctx: &CheckContext<'_>) -> CheckResult {
    any_binding(ctx, is_template)
}

fn is_template(ctx: &CheckContext<'_>, binding: &Binding) -> bool {
    binding.unwrapped_value(ctx).is_some_and(|value| {
        matches!(
            ctx.tree.kind(value),
            NodeKind::TemplateLiteral { .. } | NodeKind::TaggedTemplateExpression { .. }
        )
    })
}

/// `name = a + b`, `name = a ?? b`
pub fn binary_expression(ctx: &CheckContext<'_>) -> CheckResult {
    any_binding(ctx, is_binary)
}

fn is_binary(ctx: &CheckContext<'_>, binding: &Binding) -> bool {
    binding.unwrapped_value(ctx).is_some_and(|value| {
        matches!(
            ctx.tree.kind(value),
            NodeKind::BinaryExpression { .. } | NodeKind::LogicalExpression { .. }
        )
    })
}

/// `name = 1`, `name = other`, `name = this.x`, `name = -x`, `let name;` and
/// destructuring from an identifier, `this` or an access chain.
pub fn primitive_assignment(ctx: &CheckContext<'_>) -> CheckResult {
    any_binding(ctx, is_primitive_binding)
}

fn is_primitive_binding(ctx: &CheckContext<'_>, binding: &Binding) -> bool {
    binding.value.is_none_or(|value| is_primitive(ctx.tree, value))
}

fn is_primitive(tree: &SyntaxTree, value: NodeId) -> bool {
    let value = unwrap_transparent(tree, value);
    match tree.kind(value) {
        NodeKind::Literal { .. } | NodeKind::Identifier { .. } | NodeKind::ThisExpression => true,
        NodeKind::MemberExpression { .. } => member_path(tree, value).is_some(),
        NodeKind::UnaryExpression { argument, .. } => {
            let argument = unwrap_transparent(tree, *argument);
            match tree.kind(argument) {
                NodeKind::Literal { .. } | NodeKind::Identifier { .. } | NodeKind::ThisExpression => true,
                NodeKind::MemberExpression { .. } => member_path(tree, argument).is_some(),
                _ => false,
            }
        }
        _ => false,
    }
}

/// A call whose callee is an access chain: `obj.method()`, `a?.b()`.
fn is_member_call(tree: &SyntaxTree, id: NodeId) -> bool {
    match tree.kind(id) {
        NodeKind::CallExpression { callee, .. } => matches!(
            tree.kind(unwrap_transparent(tree, *callee)),
            NodeKind::MemberExpression { .. }
        ),
        _ => false,
    }
}

/// `call({ key: obj.method() })`
fn has_member_call_in_object_argument(tree: &SyntaxTree, id: NodeId) -> bool {
    let NodeKind::CallExpression { arguments, .. } = tree.kind(id) else {
        return false;
    };
    arguments.iter().any(|argument| {
        let NodeKind::ObjectExpression { properties } = tree.kind(unwrap_transparent(tree, *argument))
        else {
            return false;
        };
        properties.iter().any(|property| match tree.kind(*property) {
            NodeKind::Property { value, method: false, .. } => {
                is_member_call(tree, unwrap_awaited(tree, *value))
            }
            _ => false,
        })
    })
}
