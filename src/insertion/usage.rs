//! Lines for method calls and the context fallbacks.

use super::{around_statement, outermost_if};
use crate::analysis::CheckContext;
use crate::checkers::{condition_owner, enclosing_return, method_call_object, references_on_line};
use crate::syntax::NodeKind;
use crate::syntax::query::governing_statement;

/// After the statement making the call, before it when that statement is
/// control flow.
pub(super) fn method_call_line(ctx: &CheckContext<'_>) -> u32 {
    match method_call_object(ctx).and_then(|call| governing_statement(ctx.tree, call)) {
        Some(statement) => around_statement(ctx, statement),
        None => ctx.selection_line + 1,
    }
}

/// Before the `if` chain or loop testing the selection; around the statement
/// holding a ternary.
pub(super) fn condition_line(ctx: &CheckContext<'_>) -> u32 {
    let tree = ctx.tree;
    let Some(owner) = condition_owner(ctx) else {
        return ctx.selection_line + 1;
    };
    if matches!(tree.kind(owner), NodeKind::ConditionalExpression { .. }) {
        return match governing_statement(tree, owner) {
            Some(statement) => around_statement(ctx, statement),
            None => ctx.selection_line + 1,
        };
    }
    ctx.start_line(outermost_if(tree, owner))
}

pub(super) fn return_line(ctx: &CheckContext<'_>) -> u32 {
    match enclosing_return(ctx) {
        Some(statement) => ctx.start_line(statement),
        None => ctx.selection_line + 1,
    }
}

/// After an expression statement, before control flow, otherwise the next
/// line.
pub(super) fn wandering_line(ctx: &CheckContext<'_>) -> u32 {
    let statement = references_on_line(ctx)
        .first()
        .and_then(|reference| governing_statement(ctx.tree, *reference));
    match statement {
        Some(statement)
            if matches!(ctx.tree.kind(statement), NodeKind::ExpressionStatement { .. })
                || super::is_control_flow(ctx.tree.kind(statement)) =>
        {
            around_statement(ctx, statement)
        }
        _ => ctx.selection_line + 1,
    }
}
