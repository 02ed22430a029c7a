//! Lines for function parameters.

use super::block_insertion_line;
use crate::analysis::CheckContext;
use crate::checkers::innermost_parameter_site;
use crate::syntax::NodeKind;

/// Inside the body of the innermost function binding the parameter. Concise
/// arrows and body-less signatures fall back to the next line; the engine
/// rewrites concise bodies before relying on this.
pub(super) fn line(ctx: &CheckContext<'_>) -> u32 {
    let body = innermost_parameter_site(ctx)
        .and_then(|site| ctx.tree.kind(site.function).function_body());
    match body {
        Some(body) if matches!(ctx.tree.kind(body), NodeKind::BlockStatement { .. }) => {
            block_insertion_line(ctx, body)
        }
        _ => ctx.selection_line + 1,
    }
}
