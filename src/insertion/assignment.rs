//! Lines for assignment-shaped categories.

use super::after_statement;
use crate::analysis::CheckContext;
use crate::checkers::{
    Category, bindings_on_line, governing_binding, object_key_property, stored_into_property, ternary_binding,
    ternary_fallback,
};
use crate::syntax::NodeKind;
use crate::syntax::query::governing_statement;

/// After the statement of the binding that earned `category`, falling back
/// to the first declarator / assignment binding the selection.
pub(super) fn assignment_line(category: Category, ctx: &CheckContext<'_>) -> u32 {
    let binding = governing_binding(ctx, category).or_else(|| bindings_on_line(ctx).first().copied());
    match binding {
        Some(binding) => after_statement(ctx, binding.site),
        None => ctx.selection_line + 1,
    }
}

pub(super) fn property_access_line(ctx: &CheckContext<'_>) -> u32 {
    let site = governing_binding(ctx, Category::PropertyAccessAssignment)
        .map(|binding| binding.site)
        .or_else(|| stored_into_property(ctx))
        .or_else(|| bindings_on_line(ctx).first().map(|binding| binding.site));
    match site {
        Some(site) => after_statement(ctx, site),
        None => ctx.selection_line + 1,
    }
}

/// The binding path when a declarator holds the conditional, otherwise the
/// statement of the best-scoring conditional testing the selection.
pub(super) fn ternary_line(ctx: &CheckContext<'_>) -> u32 {
    if let Some(binding) = ternary_binding(ctx) {
        return after_statement(ctx, binding.site);
    }
    match ternary_fallback(ctx) {
        Some(conditional) => after_statement(ctx, conditional),
        None => assignment_line(Category::Ternary, ctx),
    }
}

/// After the smallest variable declaration holding the property.
pub(super) fn raw_property_line(ctx: &CheckContext<'_>) -> u32 {
    let tree = ctx.tree;
    let Some(property) = object_key_property(ctx) else {
        return ctx.selection_line + 1;
    };
    let declaration = tree
        .ancestors(property)
        .find(|id| matches!(tree.kind(*id), NodeKind::VariableDeclaration { .. }));
    match declaration.and_then(|declaration| governing_statement(tree, declaration)) {
        Some(statement) => ctx.deepest_end_line(statement) + 1,
        None => after_statement(ctx, property),
    }
}
