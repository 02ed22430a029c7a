//! Body reshaping.
//!
//! A statement can only be inserted on a line of its own inside a block whose
//! opening brace ends its line. Concise arrows (`(x) => x * 2`), empty
//! one-line blocks (`function f(x) {}`), blocks with code after the brace
//! (`function f(x) { return x; }`) and braceless loop bodies are rewritten
//! first; the engine then re-parses the rewritten source and recomputes the
//! insertion line.

use text_size::{TextRange, TextSize};

use crate::analysis::CheckContext;
use crate::base::IndentStyle;
use crate::insertion::loop_head_binding_body;
use crate::syntax::query::{governing_statement, pattern_binds};
use crate::syntax::{NodeId, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransformationKind {
    /// `(x) => expr` becomes `(x) => { return expr; }`.
    ConciseArrowBody,
    /// `{}` becomes an open block spanning two lines.
    EmptyBlock,
    /// Code following `{` on its line moves to a line of its own.
    SplitBlock,
    /// A loop body without braces is wrapped in a block.
    LoopBody,
}

/// A rewrite of the source applied before inserting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transformation {
    pub kind: TransformationKind,
    /// Replaced range of the original source.
    pub range: TextRange,
    pub replacement: String,
    /// The whole source with the replacement applied.
    pub source: String,
}

/// The body to reshape and how.
#[derive(Debug, Clone, Copy)]
struct Target {
    kind: TransformationKind,
    body: NodeId,
}

/// Whether the body receiving the statement, a function binding the
/// selection as a parameter or a loop binding it in its head, needs
/// reshaping before a statement can be inserted.
pub fn needs_transformation(ctx: &CheckContext<'_>) -> bool {
    target(ctx).is_some()
}

/// Rewrite the body found by [`needs_transformation`]. `None` when nothing
/// needs reshaping.
pub fn apply_transformation(ctx: &CheckContext<'_>, indent: &IndentStyle) -> Option<Transformation> {
    let target = target(ctx)?;
    let text = ctx.document.text();
    let body = ctx.tree.range(target.body);
    let base = ctx.document.line_indentation(anchor_line(ctx, target.body));
    let unit = indent.unit();

    let (range, replacement) = match target.kind {
        TransformationKind::ConciseArrowBody => (
            body,
            format!("{{\n{base}{unit}return {};\n{base}}}", ctx.text(target.body)),
        ),
        TransformationKind::EmptyBlock => (body, format!("{{\n{base}}}")),
        TransformationKind::SplitBlock if ctx.line_span(target.body) == 0 => (
            body,
            format!("{{\n{base}{unit}{}\n{base}}}", block_inner(ctx, target.body)),
        ),
        TransformationKind::SplitBlock => {
            // Only the brace and the blanks after it are replaced.
            let after_brace = text.get(usize::from(body.start()) + 1..)?;
            let blanks = after_brace.len() - after_brace.trim_start_matches([' ', '\t']).len();
            let end = body.start() + TextSize::try_from(1 + blanks).ok()?;
            (TextRange::new(body.start(), end), format!("{{\n{base}{unit}"))
        }
        TransformationKind::LoopBody => {
            let head = text.get(..usize::from(body.start()))?.trim_end();
            let start = TextSize::try_from(head.len()).ok()?;
            (
                TextRange::new(start, body.end()),
                format!(" {{\n{base}{unit}{}\n{base}}}", ctx.text(target.body)),
            )
        }
    };

    let start = usize::from(range.start());
    let end = usize::from(range.end());
    let mut source = String::with_capacity(text.len() + replacement.len());
    source.push_str(text.get(..start)?);
    source.push_str(&replacement);
    source.push_str(text.get(end..)?);

    tracing::debug!("reshaping body at {:?} ({:?})", range, target.kind);
    Some(Transformation {
        kind: target.kind,
        range,
        replacement,
        source,
    })
}

fn target(ctx: &CheckContext<'_>) -> Option<Target> {
    function_target(ctx).or_else(|| loop_target(ctx))
}

/// Innermost arrow binding the selection whose span covers the selection
/// line decides first: a concise body or a block that does not open its own
/// line needs reshaping, any other block does not. Without such an arrow,
/// the innermost function, method or constructor binding the selection is
/// reshaped when its block does not open its own line.
fn function_target(ctx: &CheckContext<'_>) -> Option<Target> {
    let tree = ctx.tree;
    let binds = |function: NodeId| {
        tree.kind(function).params().is_some_and(|params| {
            params
                .iter()
                .any(|param| pattern_binds(tree, *param, ctx.variable).is_some())
        })
    };
    let smallest = |candidates: Vec<NodeId>| {
        candidates
            .into_iter()
            .min_by_key(|id| (ctx.line_span(*id), tree.range(*id).len()))
    };

    let arrows = ctx.find_all(|id| {
        matches!(tree.kind(id), NodeKind::ArrowFunctionExpression { .. })
            && ctx.covers_selection(id)
            && binds(id)
    });
    if let Some(arrow) = smallest(arrows) {
        let NodeKind::ArrowFunctionExpression { body, expression, .. } = tree.kind(arrow) else {
            return None;
        };
        if *expression {
            return Some(Target {
                kind: TransformationKind::ConciseArrowBody,
                body: *body,
            });
        }
        return block_target(ctx, *body);
    }

    let functions = ctx.find_all(|id| {
        matches!(
            tree.kind(id),
            NodeKind::FunctionDeclaration(_) | NodeKind::FunctionExpression(_)
        ) && ctx.covers_selection(id)
            && binds(id)
    });
    block_target(ctx, tree.kind(smallest(functions)?).function_body()?)
}

/// The body of a loop binding the selection in its head: wrapped when it
/// has no braces, otherwise treated like a function block.
fn loop_target(ctx: &CheckContext<'_>) -> Option<Target> {
    let body = loop_head_binding_body(ctx)?;
    if matches!(ctx.tree.kind(body), NodeKind::BlockStatement { .. }) {
        return block_target(ctx, body);
    }
    Some(Target {
        kind: TransformationKind::LoopBody,
        body,
    })
}

/// Blocks opening above the selection are left alone: splitting them would
/// move the selected line.
fn block_target(ctx: &CheckContext<'_>, block: NodeId) -> Option<Target> {
    if !matches!(ctx.tree.kind(block), NodeKind::BlockStatement { .. })
        || ctx.start_line(block) < ctx.selection_line
        || !code_after_brace(ctx, block)
    {
        return None;
    }
    let kind = if ctx.line_span(block) == 0 && block_inner(ctx, block).is_empty() {
        TransformationKind::EmptyBlock
    } else {
        TransformationKind::SplitBlock
    };
    Some(Target { kind, body: block })
}

fn code_after_brace(ctx: &CheckContext<'_>, block: NodeId) -> bool {
    let text = ctx.text(block);
    let rest = text.get(1..).unwrap_or_default();
    !rest.split('\n').next().unwrap_or_default().trim().is_empty()
}

/// Text between the braces of a block, trimmed.
fn block_inner<'a>(ctx: &CheckContext<'a>, block: NodeId) -> &'a str {
    let text = ctx.text(block);
    text.get(1..text.len().saturating_sub(1)).unwrap_or_default().trim()
}

/// Line whose indentation the reshaped body lines up with: the enclosing
/// member or property, otherwise the enclosing statement.
fn anchor_line(ctx: &CheckContext<'_>, body: NodeId) -> u32 {
    let tree = ctx.tree;
    for id in tree.ancestors(body) {
        match tree.kind(id) {
            NodeKind::MethodDefinition { .. }
            | NodeKind::PropertyDefinition { .. }
            | NodeKind::Property { .. } => return ctx.start_line(id),
            kind if kind.is_statement() => {
                let statement = governing_statement(tree, id).unwrap_or(id);
                return ctx.start_line(statement);
            }
            _ => {}
        }
    }
    ctx.start_line(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::test_support::Fixture;
    use rstest::rstest;

    #[rstest]
    #[case::empty_function("function greet(name) {}", 0, true)]
    #[case::empty_method("class A {\n  greet(name) {}\n}", 1, true)]
    #[case::empty_constructor("class A {\n  constructor(name) {}\n}", 1, true)]
    #[case::concise_arrow("const f = (name) => name.trim();", 0, true)]
    #[case::concise_object_arrow("const f = (name) => ({ name });", 0, true)]
    #[case::block_arrow("const f = (name) => {\n  return name;\n};", 0, false)]
    #[case::code_after_brace("function greet(name) { return name; }", 0, true)]
    #[case::code_after_arrow_brace("const f = (name) => { return name; };", 0, true)]
    #[case::commented_inline_block("function greet(name) { /* todo */ }", 0, true)]
    #[case::multiline_empty_block("function greet(name) {\n}", 0, false)]
    #[case::not_a_parameter("const name = 1;", 0, false)]
    #[case::braceless_loop("for (const name of names) use(name);", 0, true)]
    #[case::inline_loop_block("for (const name of names) { use(name); }", 0, true)]
    #[case::brace_above_selection("function greet(name) { go();\n  return name;\n}", 1, false)]
    #[case::open_loop_block("for (const name of names) {\n  use(name);\n}", 0, false)]
    fn test_needs_transformation(#[case] source: &str, #[case] line: u32, #[case] expected: bool) {
        let fixture = Fixture::new(source, line, "name");
        assert_eq!(needs_transformation(&fixture.ctx()), expected, "{source}");
    }

    #[test]
    fn test_innermost_arrow_decides() {
        // The outer arrow is concise, the inner one already has a block.
        let source = "const f = (name) => items.map((name) => {\n  return name;\n});";
        let fixture = Fixture::new(source, 0, "name");
        assert!(!needs_transformation(&fixture.ctx()));
    }

    #[test]
    fn test_apply_concise_arrow() {
        let fixture = Fixture::new("  const f = (name) => name.trim();", 0, "name");
        let transformation = apply_transformation(&fixture.ctx(), &IndentStyle::default()).unwrap();
        assert_eq!(transformation.kind, TransformationKind::ConciseArrowBody);
        assert_eq!(
            transformation.source,
            "  const f = (name) => {\n    return name.trim();\n  };"
        );
    }

    #[test]
    fn test_apply_empty_block() {
        let fixture = Fixture::new("class A {\n  greet(name) {}\n}", 1, "name");
        let transformation = apply_transformation(&fixture.ctx(), &IndentStyle::default()).unwrap();
        assert_eq!(transformation.kind, TransformationKind::EmptyBlock);
        assert_eq!(transformation.source, "class A {\n  greet(name) {\n  }\n}");
    }

    #[rstest]
    #[case::inline_function(
        "function greet(name) { return name; }",
        "function greet(name) {\n  return name;\n}"
    )]
    #[case::code_then_newline(
        "function greet(name) { return name;\n}",
        "function greet(name) {\n  return name;\n}"
    )]
    #[case::inline_arrow("const f = (name) => { return name; };", "const f = (name) => {\n  return name;\n};")]
    #[case::method_keeps_member_indent(
        "class A {\n  greet(name) { go(name); }\n}",
        "class A {\n  greet(name) {\n    go(name);\n  }\n}"
    )]
    fn test_apply_split_block(#[case] source: &str, #[case] expected: &str) {
        let line = u32::from(source.starts_with("class"));
        let fixture = Fixture::new(source, line, "name");
        let transformation = apply_transformation(&fixture.ctx(), &IndentStyle::default()).unwrap();
        assert_eq!(transformation.kind, TransformationKind::SplitBlock);
        assert_eq!(transformation.source, expected);
    }

    #[rstest]
    #[case::same_line("for (const name of names) use(name);", "for (const name of names) {\n  use(name);\n}")]
    #[case::next_line(
        "  for (const name of names)\n    use(name);",
        "  for (const name of names) {\n    use(name);\n  }"
    )]
    fn test_apply_loop_body(#[case] source: &str, #[case] expected: &str) {
        let fixture = Fixture::new(source, 0, "name");
        let transformation = apply_transformation(&fixture.ctx(), &IndentStyle::default()).unwrap();
        assert_eq!(transformation.kind, TransformationKind::LoopBody);
        assert_eq!(transformation.source, expected);
    }

    #[test]
    fn test_apply_inline_loop_block() {
        let fixture = Fixture::new("for (let i = 0; i < n; i++) { sum += i; }", 0, "i");
        let transformation = apply_transformation(&fixture.ctx(), &IndentStyle::default()).unwrap();
        assert_eq!(transformation.kind, TransformationKind::SplitBlock);
        assert_eq!(transformation.source, "for (let i = 0; i < n; i++) {\n  sum += i;\n}");
    }

    #[test]
    fn test_apply_nothing_to_do() {
        let fixture = Fixture::new("function greet(name) {\n  go();\n}", 0, "name");
        assert!(apply_transformation(&fixture.ctx(), &IndentStyle::default()).is_none());
    }
}
