//! Malformed and pathological trees terminate without panicking.

use logpoint::syntax::{NodeId, NodeKind, SyntaxTree, TreeBuilder, WalkControl, walk};
use logpoint::{
    CheckContext, Selection, SourceDocument, TextDocument, TextRange, TextSize, classify, enclosing_context,
    indentation_for, line_for, needs_transformation,
};
use smol_str::SmolStr;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::new(start), TextSize::new(end))
}

fn identifier(builder: &mut TreeBuilder, name: &str, start: u32) -> NodeId {
    builder.alloc(
        NodeKind::Identifier {
            name: SmolStr::new(name),
        },
        range(start, start + name.len() as u32),
    )
}

/// Runs every per-selection stage and returns the insertion line.
fn run_pipeline(tree: &SyntaxTree, document: &SourceDocument, selection: &Selection) -> u32 {
    let ctx = CheckContext::new(tree, document, selection, logpoint::syntax::MAX_TRAVERSAL_DEPTH);
    let category = classify(&ctx).category;
    let line = line_for(category, &ctx);
    indentation_for(category, &ctx, line, &Default::default());
    enclosing_context(&ctx);
    needs_transformation(&ctx);
    line
}

#[test]
fn test_cyclic_tree_terminates() {
    // `x(<program>)`: the call's argument points back at the root.
    let document = SourceDocument::new("x(x);\n");
    let mut builder = TreeBuilder::new();
    let callee = identifier(&mut builder, "x", 0);
    let argument = identifier(&mut builder, "x", 2);
    let call = builder.alloc(
        NodeKind::CallExpression {
            callee,
            arguments: vec![argument],
            optional: false,
        },
        range(0, 4),
    );
    let statement = builder.alloc(NodeKind::ExpressionStatement { expression: call }, range(0, 5));
    let program = builder.alloc(
        NodeKind::Program {
            body: vec![statement],
        },
        range(0, 6),
    );
    if let Some(node) = builder.get_mut(call) {
        node.kind = NodeKind::CallExpression {
            callee,
            arguments: vec![argument, program],
            optional: false,
        };
    }
    let tree = builder.finish(program).unwrap();

    let report = walk(&tree, tree.root(), |_, _| WalkControl::Continue);
    assert!(report.bound_exceeded);

    let line = run_pipeline(&tree, &document, &Selection::new(0, "x"));
    assert!(line <= document.line_count());
}

#[test]
fn test_very_deep_tree_terminates() {
    // `((((…x…))))` nested 2000 times on one line.
    let depth = 2000u32;
    let source = format!("{}x{};", "(".repeat(depth as usize), ")".repeat(depth as usize));
    let document = SourceDocument::new(source.as_str());
    let mut builder = TreeBuilder::new();
    let mut expression = identifier(&mut builder, "x", depth);
    for level in (0..depth).rev() {
        expression = builder.alloc(
            NodeKind::ParenthesizedExpression { expression },
            range(level, 2 * depth + 1 - level),
        );
    }
    let statement = builder.alloc(
        NodeKind::ExpressionStatement { expression },
        range(0, 2 * depth + 2),
    );
    let program = builder.alloc(
        NodeKind::Program {
            body: vec![statement],
        },
        range(0, 2 * depth + 2),
    );
    let tree = builder.finish(program).unwrap();

    let report = walk(&tree, tree.root(), |_, _| WalkControl::Continue);
    assert!(report.bound_exceeded);

    let line = run_pipeline(&tree, &document, &Selection::new(0, "x"));
    assert!(line <= document.line_count());
}
