//! Context fallbacks: the selection is read inside a condition, a `return`,
//! or anywhere else as a free-standing value.

use super::{CheckResult, references_on_line};
use crate::analysis::CheckContext;
use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// The selection is read in the test of an `if`, loop, `switch` or ternary.
pub fn within_condition_block(ctx: &CheckContext<'_>) -> CheckResult {
    CheckResult::from(condition_owner(ctx).is_some())
}

/// The selection is read in a `return` argument.
pub fn within_return_statement(ctx: &CheckContext<'_>) -> CheckResult {
    CheckResult::from(enclosing_return(ctx).is_some())
}

/// The selection is read anywhere on its line.
pub fn wandering_expression(ctx: &CheckContext<'_>) -> CheckResult {
    CheckResult::from(!references_on_line(ctx).is_empty())
}

/// The statement or conditional expression whose test reads the selection
/// on the selection line.
pub(crate) fn condition_owner(ctx: &CheckContext<'_>) -> Option<NodeId> {
    references_on_line(ctx)
        .into_iter()
        .find_map(|reference| climb(ctx.tree, reference, is_test_of))
}

/// The `return` statement whose argument reads the selection on the
/// selection line.
pub(crate) fn enclosing_return(ctx: &CheckContext<'_>) -> Option<NodeId> {
    references_on_line(ctx).into_iter().find_map(|reference| {
        climb(ctx.tree, reference, |kind, child| {
            matches!(kind, NodeKind::ReturnStatement { argument } if *argument == Some(child))
        })
    })
}

/// Walk up from an expression until `accept(parent, child)` holds. Gives up
/// at the first statement or function boundary: tests and return arguments
/// are expressions of the innermost statement.
fn climb<F>(tree: &SyntaxTree, from: NodeId, accept: F) -> Option<NodeId>
where
    F: Fn(&NodeKind, NodeId) -> bool,
{
    let mut child = from;
    for parent in tree.ancestors(from) {
        let kind = tree.kind(parent);
        if accept(kind, child) {
            return Some(parent);
        }
        if kind.is_statement() || kind.is_function_like() || kind.is_class() {
            return None;
        }
        child = parent;
    }
    None
}

fn is_test_of(kind: &NodeKind, child: NodeId) -> bool {
    match kind {
        NodeKind::IfStatement { test, .. }
        | NodeKind::WhileStatement { test, .. }
        | NodeKind::DoWhileStatement { test, .. }
        | NodeKind::ConditionalExpression { test, .. } => *test == child,
        NodeKind::ForStatement {
            init, test, update, ..
        } => [*init, *test, *update].contains(&Some(child)),
        NodeKind::ForInStatement { right, .. } | NodeKind::ForOfStatement { right, .. } => {
            *right == child
        }
        NodeKind::SwitchStatement { discriminant, .. } => *discriminant == child,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::test_support::Fixture;
    use rstest::rstest;

    #[rstest]
    #[case::if_test("if (ready) {\n  go();\n}", 0, "IfStatement")]
    #[case::else_if("if (a) {\n} else if (ready && b) {\n}", 1, "IfStatement")]
    #[case::while_test("while (ready.length > 0) {}", 0, "WhileStatement")]
    #[case::do_while("do {\n  x++;\n} while (ready);", 2, "DoWhileStatement")]
    #[case::for_test("for (let i = 0; i < ready; i++) {}", 0, "ForStatement")]
    #[case::for_of("for (const x of ready) {}", 0, "ForOfStatement")]
    #[case::switch("switch (ready) {\n  case 1:\n}", 0, "SwitchStatement")]
    #[case::ternary("log(ready ? 1 : 2);", 0, "ConditionalExpression")]
    fn test_within_condition_block(#[case] source: &str, #[case] line: u32, #[case] owner: &str) {
        let fixture = Fixture::new(source, line, "ready");
        let ctx = fixture.ctx();
        assert!(within_condition_block(&ctx).is_checked, "{source}");
        let found = condition_owner(&ctx).unwrap();
        assert_eq!(fixture.tree.kind(found).tag(), owner);
    }

    #[test]
    fn test_condition_body_is_not_a_condition() {
        let fixture = Fixture::new("if (a) {\n  use(ready);\n}", 1, "ready");
        assert!(!within_condition_block(&fixture.ctx()).is_checked);
    }

    #[rstest]
    #[case::bare("function f() {\n  return total;\n}", 1)]
    #[case::in_expression("function f() {\n  return total * 2 + other;\n}", 1)]
    #[case::member("function f() {\n  return this.total;\n}", 1)]
    fn test_within_return_statement(#[case] source: &str, #[case] line: u32) {
        let variable = if source.contains("this.total") { "this.total" } else { "total" };
        let fixture = Fixture::new(source, line, variable);
        assert!(within_return_statement(&fixture.ctx()).is_checked, "{source}");
    }

    #[test]
    fn test_return_inside_nested_function_does_not_leak() {
        let fixture = Fixture::new(
            "function f() {\n  return () => {\n    use(total);\n  };\n}",
            2,
            "total",
        );
        assert!(!within_return_statement(&fixture.ctx()).is_checked);
    }

    #[rstest]
    #[case::call_argument("use(total);", true)]
    #[case::declaration_name("const total = 1;", false)]
    #[case::object_key("x = { total: 1 };", false)]
    #[case::property_name("x = obj.total;", false)]
    fn test_wandering_expression(#[case] source: &str, #[case] expected: bool) {
        let fixture = Fixture::new(source, 0, "total");
        assert_eq!(wandering_expression(&fixture.ctx()).is_checked, expected, "{source}");
    }
}
