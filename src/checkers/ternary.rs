//! Conditional (ternary) expressions.

use super::{Binding, CheckResult, bindings_on_line};
use crate::analysis::CheckContext;
use crate::syntax::query::{references, unwrap_transparent};
use crate::syntax::{NodeId, NodeKind, WalkControl, walk};

/// A declarator or assignment whose value contains a conditional, or a
/// conditional testing the selection that is itself an initializer or
/// assigned value covering the selection line.
pub fn ternary(ctx: &CheckContext<'_>) -> CheckResult {
    if ternary_binding(ctx).is_some() {
        return CheckResult::hit();
    }
    let assigned = ternary_candidates(ctx)
        .into_iter()
        .any(|candidate| ctx.covers_selection(candidate) && is_assigned_value(ctx, candidate));
    CheckResult::from(assigned)
}

/// The binding on the selection line whose value contains a conditional.
pub(crate) fn ternary_binding(ctx: &CheckContext<'_>) -> Option<Binding> {
    bindings_on_line(ctx)
        .into_iter()
        .find(|binding| binding.value.is_some_and(|value| contains_conditional(ctx, value)))
}

/// Best conditional testing the selection: covering the selection line
/// first, then the fewest lines, then the earliest.
pub(crate) fn ternary_fallback(ctx: &CheckContext<'_>) -> Option<NodeId> {
    ternary_candidates(ctx).into_iter().min_by_key(|candidate| {
        (
            !ctx.covers_selection(*candidate),
            ctx.line_span(*candidate),
            ctx.tree.range(*candidate).start(),
        )
    })
}

/// Conditionals whose test references the selection.
fn ternary_candidates(ctx: &CheckContext<'_>) -> Vec<NodeId> {
    let tree = ctx.tree;
    ctx.find_all(|id| match tree.kind(id) {
        NodeKind::ConditionalExpression { test, .. } => {
            !references(tree, *test, ctx.variable).is_empty()
        }
        _ => false,
    })
}

/// A conditional in `value`, not looking into nested functions.
fn contains_conditional(ctx: &CheckContext<'_>, value: NodeId) -> bool {
    let tree = ctx.tree;
    let mut found = false;
    walk(tree, value, |id, _| match tree.kind(id) {
        NodeKind::ConditionalExpression { .. } => {
            found = true;
            WalkControl::Stop
        }
        kind if kind.is_function_like() || kind.is_class() => WalkControl::SkipChildren,
        _ => WalkControl::Continue,
    });
    found
}

/// Whether `id`, through transparent wrappers, is a declarator initializer
/// or the right-hand side of an assignment.
fn is_assigned_value(ctx: &CheckContext<'_>, id: NodeId) -> bool {
    let tree = ctx.tree;
    let mut child = id;
    for parent in tree.ancestors(id) {
        match tree.kind(parent) {
            NodeKind::VariableDeclarator { init, .. } => return *init == Some(child),
            NodeKind::AssignmentExpression { right, .. } => return *right == child,
            _ if unwrap_transparent(tree, parent) == id => child = parent,
            _ => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::test_support::Fixture;
    use rstest::rstest;

    #[rstest]
    #[case::direct("const result = condition ? 'yes' : 'no';", 0, "result")]
    #[case::nested_in_value("const result = wrap(a ? b : c);", 0, "result")]
    #[case::destructured("const { result } = flag ? x : y;", 0, "result")]
    #[case::assignment("result = flag\n  ? x\n  : y;", 0, "result")]
    #[case::fallback_test_reference("const label = isActive\n  ? 'on'\n  : 'off';", 0, "isActive")]
    fn test_ternary_matches(#[case] source: &str, #[case] line: u32, #[case] variable: &str) {
        let fixture = Fixture::new(source, line, variable);
        assert!(ternary(&fixture.ctx()).is_checked, "{source}");
    }

    #[rstest]
    #[case::function_value("const result = (a) => a ? 1 : 2;", "result")]
    #[case::ternary_in_call("log(isActive ? 1 : 2);", "isActive")]
    fn test_ternary_rejects(#[case] source: &str, #[case] variable: &str) {
        let fixture = Fixture::new(source, 0, variable);
        assert!(!ternary(&fixture.ctx()).is_checked, "{source}");
    }

    #[test]
    fn test_fallback_prefers_covering_then_smallest() {
        let source = "const a = flag\n  ? 1\n  : 2;\nconst b = flag ? (flag ? 3 : 4) : 5;";
        let fixture = Fixture::new(source, 3, "flag");
        let ctx = fixture.ctx();
        let best = ternary_fallback(&ctx).unwrap();
        assert_eq!(ctx.text(best), "flag ? (flag ? 3 : 4) : 5");

        let fixture = Fixture::new(source, 1, "flag");
        let ctx = fixture.ctx();
        let best = ternary_fallback(&ctx).unwrap();
        assert_eq!(ctx.start_line(best), 0);
    }
}
