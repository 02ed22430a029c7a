//! Insertion-line calculator.
//!
//! [`line_for`] returns the 0-indexed line at which the generated statement
//! is inserted: the new line takes that index and existing text moves down.
//! Results are clamped to the document's line count.

mod assignment;
mod parameter;
mod usage;

use crate::analysis::CheckContext;
use crate::base::IndentStyle;
use crate::checkers::{Category, bindings_on_line, innermost_parameter_site};
use crate::syntax::query::governing_statement;
use crate::syntax::{NodeId, NodeKind, SyntaxTree, WalkControl};

/// Line at which a statement logging the selection is inserted.
pub fn line_for(category: Category, ctx: &CheckContext<'_>) -> u32 {
    let line = match category {
        Category::FunctionParameter => parameter::line(ctx),
        Category::Ternary => assignment::ternary_line(ctx),
        Category::PropertyAccessAssignment => assignment::property_access_line(ctx),
        Category::RawPropertyAccess => assignment::raw_property_line(ctx),
        Category::PropertyMethodCall => usage::method_call_line(ctx),
        Category::WithinConditionBlock => usage::condition_line(ctx),
        Category::WithinReturnStatement => usage::return_line(ctx),
        Category::WanderingExpression => usage::wandering_line(ctx),
        _ => assignment::assignment_line(category, ctx),
    };
    let clamped = ctx.clamp(line);
    tracing::debug!(
        "insertion line for `{}` ({}) on line {}: {}",
        ctx.variable,
        category,
        ctx.selection_line,
        clamped
    );
    clamped
}

/// Leading whitespace for a statement inserted at `line`.
pub fn indentation_for(category: Category, ctx: &CheckContext<'_>, line: u32, indent: &IndentStyle) -> String {
    let document = ctx.document;
    if category == Category::FunctionParameter {
        let brace_line = innermost_parameter_site(ctx)
            .and_then(|site| ctx.tree.kind(site.function).function_body())
            .map_or(ctx.selection_line, |body| ctx.start_line(body));
        return body_indentation(ctx, line, brace_line, indent);
    }
    if line <= ctx.selection_line && line < document.line_count() {
        return document.line_indentation(line).to_string();
    }
    if let Some(body) = loop_head_binding_body(ctx) {
        if first_body_line(ctx, body) == line {
            return body_indentation(ctx, line, ctx.start_line(body), indent);
        }
    }
    let anchor = innermost_statement_line(ctx).unwrap_or(ctx.selection_line);
    document.line_indentation(anchor).to_string()
}

/// The indentation of the body line a statement lands on, or one unit past
/// the brace line when that line is blank or closes the block.
fn body_indentation(ctx: &CheckContext<'_>, line: u32, brace_line: u32, indent: &IndentStyle) -> String {
    let document = ctx.document;
    let trimmed = document.line_text(line).trim();
    if line < document.line_count() && !trimmed.is_empty() && !trimmed.starts_with('}') {
        return document.line_indentation(line).to_string();
    }
    format!("{}{}", document.line_indentation(brace_line), indent.unit())
}

/// First line of the innermost statement covering the selection line.
fn innermost_statement_line(ctx: &CheckContext<'_>) -> Option<u32> {
    let mut best: Option<(usize, NodeId)> = None;
    ctx.walk(|id, depth| {
        if !ctx.covers_selection(id) {
            return WalkControl::SkipChildren;
        }
        let kind = ctx.tree.kind(id);
        if kind.is_statement() && !matches!(kind, NodeKind::BlockStatement { .. }) {
            best = Some((depth, id));
        }
        WalkControl::Continue
    });
    best.map(|(_, id)| ctx.start_line(id))
}

/// One past everything the statement governing `site` reaches; the first
/// body line when `site` sits in a loop head.
pub(crate) fn after_statement(ctx: &CheckContext<'_>, site: NodeId) -> u32 {
    if let Some(body) = loop_head_body(ctx.tree, site) {
        return first_body_line(ctx, body);
    }
    match governing_statement(ctx.tree, site) {
        Some(statement) => ctx.deepest_end_line(statement) + 1,
        None => ctx.selection_line + 1,
    }
}

/// First line inside a block body. Blocks whose brace does not end its line
/// are reshaped before this line is used.
pub(crate) fn block_insertion_line(ctx: &CheckContext<'_>, block: NodeId) -> u32 {
    ctx.start_line(block) + 1
}

fn first_body_line(ctx: &CheckContext<'_>, body: NodeId) -> u32 {
    match ctx.tree.kind(body) {
        NodeKind::BlockStatement { .. } => block_insertion_line(ctx, body),
        _ => ctx.start_line(body),
    }
}

/// Body of the loop whose head binds the selection.
pub(crate) fn loop_head_binding_body(ctx: &CheckContext<'_>) -> Option<NodeId> {
    bindings_on_line(ctx)
        .iter()
        .find_map(|binding| loop_head_body(ctx.tree, binding.site))
}

/// Body of the loop whose head (`for (…;…;…)`, `for (… of …)`) contains
/// `site`.
fn loop_head_body(tree: &SyntaxTree, site: NodeId) -> Option<NodeId> {
    let statement = std::iter::once(site)
        .chain(tree.ancestors(site))
        .find(|node| tree.kind(*node).is_statement())?;
    let candidate = if loop_body(tree.kind(statement)).is_some() {
        statement
    } else {
        tree.parent(statement)?
    };
    let body = loop_body(tree.kind(candidate))?;
    (body != statement && !tree.range(body).contains_range(tree.range(site))).then_some(body)
}

fn loop_body(kind: &NodeKind) -> Option<NodeId> {
    match kind {
        NodeKind::ForStatement { body, .. }
        | NodeKind::ForInStatement { body, .. }
        | NodeKind::ForOfStatement { body, .. } => Some(*body),
        _ => None,
    }
}

/// Statements a log line must precede rather than follow.
pub(crate) fn is_control_flow(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::ReturnStatement { .. }
            | NodeKind::ThrowStatement { .. }
            | NodeKind::BreakStatement { .. }
            | NodeKind::ContinueStatement { .. }
            | NodeKind::IfStatement { .. }
            | NodeKind::ForStatement { .. }
            | NodeKind::ForInStatement { .. }
            | NodeKind::ForOfStatement { .. }
            | NodeKind::WhileStatement { .. }
            | NodeKind::DoWhileStatement { .. }
            | NodeKind::SwitchStatement { .. }
    )
}

/// The first `if` of an `else if` chain.
pub(crate) fn outermost_if(tree: &SyntaxTree, statement: NodeId) -> NodeId {
    let mut current = statement;
    for parent in tree.ancestors(statement) {
        match tree.kind(parent) {
            NodeKind::IfStatement {
                alternate: Some(alternate),
                ..
            } if *alternate == current => current = parent,
            _ => break,
        }
    }
    current
}

/// Before a control-flow statement, after anything else.
pub(crate) fn around_statement(ctx: &CheckContext<'_>, statement: NodeId) -> u32 {
    if is_control_flow(ctx.tree.kind(statement)) {
        ctx.start_line(outermost_if(ctx.tree, statement))
    } else {
        ctx.deepest_end_line(statement) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::test_support::Fixture;
    use crate::classify::classify;
    use rstest::rstest;

    fn line(source: &str, selection_line: u32, variable: &str) -> (Category, u32) {
        let fixture = Fixture::new(source, selection_line, variable);
        let ctx = fixture.ctx();
        let category = classify(&ctx).category;
        (category, line_for(category, &ctx))
    }

    #[rstest]
    #[case::binary("const sum = a + b;", 0, "sum", Category::BinaryExpression, 1)]
    #[case::object("const config = {\n  a: 1,\n};", 0, "config", Category::ObjectLiteral, 3)]
    #[case::ternary("const result = condition ? 'yes' : 'no';", 0, "result", Category::Ternary, 1)]
    #[case::destructured("const { user } = state;", 0, "user", Category::PrimitiveAssignment, 1)]
    #[case::chained_call(
        "const items = list\n  .filter((x) => x)\n  .map((x) => x * 2);\nnext();",
        0,
        "items",
        Category::ObjectFunctionCallAssignment,
        3
    )]
    #[case::multiline_call_args(
        "const user = await fetchUser(\n  id,\n  { cache: true },\n);",
        0,
        "user",
        Category::FunctionCallAssignment,
        4
    )]
    #[case::exported("export const total =\n  a * b;", 0, "total", Category::BinaryExpression, 2)]
    #[case::for_head(
        "for (const item of items) {\n  use(item);\n}",
        0,
        "item",
        Category::PrimitiveAssignment,
        1
    )]
    #[case::for_init(
        "for (let i = 0; i < n; i++) {\n  use(i);\n}",
        0,
        "i",
        Category::PrimitiveAssignment,
        1
    )]
    #[case::later_binding_decides(
        "data = 0; data = {\n  a: 1,\n};\nnext();",
        0,
        "data",
        Category::ObjectLiteral,
        3
    )]
    #[case::property_store("this.user = user;\nnext();", 0, "user", Category::PropertyAccessAssignment, 1)]
    #[case::raw_property(
        "const config = {\n  server: {\n    port: 80,\n  },\n};",
        2,
        "port",
        Category::RawPropertyAccess,
        5
    )]
    fn test_assignment_lines(
        #[case] source: &str,
        #[case] selection_line: u32,
        #[case] variable: &str,
        #[case] category: Category,
        #[case] expected: u32,
    ) {
        assert_eq!(line(source, selection_line, variable), (category, expected), "{source}");
    }

    #[rstest]
    #[case::empty_inline_block("function greet(name) {}", 0, 1)]
    #[case::brace_ends_line("function greet(name) {\n  return name;\n}", 0, 1)]
    #[case::code_after_brace("function greet(name) { return name;\n}", 0, 1)]
    #[case::concise_arrow("const f = (name) => name.trim();", 0, 1)]
    #[case::method("class A {\n  greet(name) {\n    go();\n  }\n}", 1, 2)]
    fn test_parameter_lines(#[case] source: &str, #[case] selection_line: u32, #[case] expected: u32) {
        assert_eq!(
            line(source, selection_line, "name"),
            (Category::FunctionParameter, expected),
            "{source}"
        );
    }

    #[rstest]
    #[case::if_condition("go();\nif (ready) {\n  run();\n}", 1, Category::WithinConditionBlock, 1)]
    #[case::else_if(
        "if (a) {\n  x();\n} else if (ready) {\n  y();\n}",
        2,
        Category::WithinConditionBlock,
        0
    )]
    #[case::ternary_in_call("log(ready ? 1 : 2);\nnext();", 0, Category::WithinConditionBlock, 1)]
    #[case::ternary_in_return(
        "function f() {\n  return ready ? 1 : 2;\n}",
        1,
        Category::WithinConditionBlock,
        1
    )]
    #[case::return_statement(
        "function f() {\n  go();\n  return ready;\n}",
        2,
        Category::WithinReturnStatement,
        2
    )]
    #[case::method_call("ready.run();\nnext();", 0, Category::PropertyMethodCall, 1)]
    #[case::method_call_in_if("if (ready.has(x)) {\n}", 0, Category::PropertyMethodCall, 0)]
    #[case::wandering_statement("use(\n  ready,\n);\nnext();", 1, Category::WanderingExpression, 3)]
    #[case::wandering_in_declaration("const x = [\n  ready,\n];", 1, Category::WanderingExpression, 2)]
    fn test_usage_lines(
        #[case] source: &str,
        #[case] selection_line: u32,
        #[case] category: Category,
        #[case] expected: u32,
    ) {
        assert_eq!(line(source, selection_line, "ready"), (category, expected), "{source}");
    }

    #[test]
    fn test_lines_are_clamped() {
        let source = "const sum = a + b;";
        assert_eq!(line(source, 0, "sum").1, 1);
        let fixture = Fixture::new(source, 0, "sum");
        let ctx = fixture.ctx();
        assert_eq!(ctx.clamp(40), 1);
    }

    #[test]
    fn test_indentation_for_parameter_and_statement() {
        let indent = IndentStyle::default();
        let fixture = Fixture::new("function greet(name) {\n}", 0, "name");
        let ctx = fixture.ctx();
        assert_eq!(indentation_for(Category::FunctionParameter, &ctx, 1, &indent), "  ");

        let fixture = Fixture::new("for (const item of items) {\n    use(item);\n}", 0, "item");
        let ctx = fixture.ctx();
        assert_eq!(indentation_for(Category::PrimitiveAssignment, &ctx, 1, &indent), "    ");

        let fixture = Fixture::new("  for (const item of items) {\n  }", 0, "item");
        let ctx = fixture.ctx();
        assert_eq!(indentation_for(Category::PrimitiveAssignment, &ctx, 1, &indent), "    ");

        let fixture = Fixture::new("if (a) {\n    const b = {\n      c: 1,\n    };\n}", 1, "b");
        let ctx = fixture.ctx();
        assert_eq!(indentation_for(Category::ObjectLiteral, &ctx, 4, &indent), "    ");
    }
}
