//! Function parameters.

use super::CheckResult;
use crate::analysis::CheckContext;
use crate::syntax::NodeId;
use crate::syntax::query::pattern_binds;

/// A function-like node with a parameter binding the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParameterSite {
    pub function: NodeId,
}

/// Identifier bound by a function, method or arrow parameter, with the
/// selection line inside that parameter.
pub fn function_parameter(ctx: &CheckContext<'_>) -> CheckResult {
    CheckResult::from(innermost_parameter_site(ctx).is_some())
}

/// The parameter site with the smallest enclosing function.
pub(crate) fn innermost_parameter_site(ctx: &CheckContext<'_>) -> Option<ParameterSite> {
    let tree = ctx.tree;
    let mut best: Option<ParameterSite> = None;
    for function in ctx.find_all(|id| tree.kind(id).is_function_like()) {
        let Some(params) = tree.kind(function).params() else {
            continue;
        };
        let binds = params.iter().any(|param| {
            ctx.covers_selection(*param) && pattern_binds(tree, *param, ctx.variable).is_some()
        });
        if !binds {
            continue;
        }
        let smaller = best.is_none_or(|current| {
            tree.range(function).len() < tree.range(current.function).len()
        });
        if smaller {
            best = Some(ParameterSite { function });
        }
    }
    best
}
