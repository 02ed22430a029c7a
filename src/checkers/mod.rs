//! Pattern checkers.
//!
//! Each checker answers one question about a selection: "is the selected
//! identifier, on this line, used in shape X?". Checkers are pure functions
//! of the [`CheckContext`]; the order they are tried in lives in
//! [`crate::classify`].

mod assignment;
mod parameter;
mod property;
mod ternary;
mod usage;

use indexmap::IndexMap;

use crate::analysis::CheckContext;
use crate::syntax::query::{
    is_reference_position, matches_variable, pattern_binds, unwrap_transparent,
};
use crate::syntax::{NodeId, NodeKind, WalkControl};

pub use assignment::{
    array_assignment, binary_expression, function_call_assignment, named_function_assignment,
    object_function_call_assignment, object_literal, primitive_assignment,
    property_access_assignment, template_string,
};
pub use parameter::function_parameter;
pub use property::{property_method_call, raw_property_access};
pub use ternary::ternary;
pub use usage::{wandering_expression, within_condition_block, within_return_statement};

pub(crate) use assignment::{governing_binding, stored_into_property};
pub(crate) use parameter::innermost_parameter_site;
pub(crate) use property::{method_call_object, object_key_property};
pub(crate) use ternary::{ternary_binding, ternary_fallback};
pub(crate) use usage::{condition_owner, enclosing_return};

/// Metadata key carrying the dotted path of a raw property access.
pub const DEEP_OBJECT_PATH: &str = "deepObjectPath";

/// Usage shapes, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    NamedFunctionAssignment,
    FunctionParameter,
    ObjectFunctionCallAssignment,
    FunctionCallAssignment,
    PropertyAccessAssignment,
    ObjectLiteral,
    ArrayAssignment,
    TemplateString,
    Ternary,
    BinaryExpression,
    PropertyMethodCall,
    RawPropertyAccess,
    PrimitiveAssignment,
    WithinConditionBlock,
    WithinReturnStatement,
    WanderingExpression,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Self::NamedFunctionAssignment,
        Self::FunctionParameter,
        Self::ObjectFunctionCallAssignment,
        Self::FunctionCallAssignment,
        Self::PropertyAccessAssignment,
        Self::ObjectLiteral,
        Self::ArrayAssignment,
        Self::TemplateString,
        Self::Ternary,
        Self::BinaryExpression,
        Self::PropertyMethodCall,
        Self::RawPropertyAccess,
        Self::PrimitiveAssignment,
        Self::WithinConditionBlock,
        Self::WithinReturnStatement,
        Self::WanderingExpression,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NamedFunctionAssignment => "namedFunctionAssignment",
            Self::FunctionParameter => "functionParameter",
            Self::ObjectFunctionCallAssignment => "objectFunctionCallAssignment",
            Self::FunctionCallAssignment => "functionCallAssignment",
            Self::PropertyAccessAssignment => "propertyAccessAssignment",
            Self::ObjectLiteral => "objectLiteral",
            Self::ArrayAssignment => "arrayAssignment",
            Self::TemplateString => "templateString",
            Self::Ternary => "ternary",
            Self::BinaryExpression => "binaryExpression",
            Self::PropertyMethodCall => "propertyMethodCall",
            Self::RawPropertyAccess => "rawPropertyAccess",
            Self::PrimitiveAssignment => "primitiveAssignment",
            Self::WithinConditionBlock => "withinConditionBlock",
            Self::WithinReturnStatement => "withinReturnStatement",
            Self::WanderingExpression => "wanderingExpression",
        }
    }

    /// Categories whose line is "one past the whole assignment".
    pub fn is_assignment_shaped(self) -> bool {
        matches!(
            self,
            Self::NamedFunctionAssignment
                | Self::ObjectFunctionCallAssignment
                | Self::FunctionCallAssignment
                | Self::PropertyAccessAssignment
                | Self::ObjectLiteral
                | Self::ArrayAssignment
                | Self::TemplateString
                | Self::Ternary
                | Self::BinaryExpression
                | Self::PrimitiveAssignment
        )
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auxiliary facts recorded by a checker, in insertion order.
pub type CheckMetadata = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    pub is_checked: bool,
    pub metadata: CheckMetadata,
}

impl CheckResult {
    pub fn hit() -> Self {
        Self {
            is_checked: true,
            metadata: CheckMetadata::new(),
        }
    }

    pub fn miss() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

impl From<bool> for CheckResult {
    fn from(is_checked: bool) -> Self {
        if is_checked { Self::hit() } else { Self::miss() }
    }
}

/// Signature shared by all checkers.
pub type Checker = fn(&CheckContext<'_>) -> CheckResult;

/// A declarator or assignment whose target names the selection on the
/// selection line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Binding {
    /// The `VariableDeclarator` or `AssignmentExpression`.
    pub site: NodeId,
    /// Identifier or access chain naming the selection.
    pub target: NodeId,
    /// Initializer or right-hand side.
    pub value: Option<NodeId>,
    /// The target sits inside a destructuring pattern.
    pub destructured: bool,
}

impl Binding {
    /// Value with transparent wrappers removed.
    pub fn unwrapped_value(&self, ctx: &CheckContext<'_>) -> Option<NodeId> {
        self.value.map(|value| unwrap_transparent(ctx.tree, value))
    }
}

/// Declarators and assignments binding the selection on its line, in source
/// order.
pub(crate) fn bindings_on_line(ctx: &CheckContext<'_>) -> Vec<Binding> {
    let mut found = Vec::new();
    ctx.walk(|id, _| {
        if let Some(binding) = binding_at(ctx, id) {
            found.push(binding);
        }
        WalkControl::Continue
    });
    found
}

fn binding_at(ctx: &CheckContext<'_>, site: NodeId) -> Option<Binding> {
    let tree = ctx.tree;
    let (pattern, value) = match tree.kind(site) {
        NodeKind::VariableDeclarator { id, init } => (*id, *init),
        NodeKind::AssignmentExpression { left, right, .. } => (*left, Some(*right)),
        _ => return None,
    };
    let (target, destructured) = if matches_variable(tree, unwrap_transparent(tree, pattern), ctx.variable) {
        (pattern, false)
    } else {
        match tree.kind(pattern) {
            NodeKind::ObjectPattern { .. } | NodeKind::ArrayPattern { .. } => {
                (pattern_binds(tree, pattern, ctx.variable)?, true)
            }
            _ => return None,
        }
    };
    (ctx.start_line(target) == ctx.selection_line).then_some(Binding {
        site,
        target,
        value,
        destructured,
    })
}

/// References to the selection that start on the selection line.
pub(crate) fn references_on_line(ctx: &CheckContext<'_>) -> Vec<NodeId> {
    let mut found = Vec::new();
    ctx.walk(|id, _| {
        if matches_variable(ctx.tree, id, ctx.variable) && is_reference_position(ctx.tree, id) {
            if ctx.start_line(id) == ctx.selection_line {
                found.push(id);
            }
            return WalkControl::SkipChildren;
        }
        WalkControl::Continue
    });
    found
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::analysis::{CheckContext, Selection};
    use crate::base::SourceDocument;
    use crate::parser::{Language, parse};
    use crate::syntax::{MAX_TRAVERSAL_DEPTH, SyntaxTree};

    /// A parsed source plus a selection, owning everything a context borrows.
    pub struct Fixture {
        pub document: SourceDocument,
        pub tree: SyntaxTree,
        pub selection: Selection,
    }

    impl Fixture {
        pub fn new(source: &str, line: u32, variable: &str) -> Self {
            let tree = match parse(source, Language::TypeScript, None) {
                Ok(tree) => tree,
                Err(err) => panic!("failed to parse {source:?}: {err}"),
            };
            Self {
                document: SourceDocument::new(source),
                tree,
                selection: Selection::new(line, variable),
            }
        }

        pub fn ctx(&self) -> CheckContext<'_> {
            CheckContext::new(&self.tree, &self.document, &self.selection, MAX_TRAVERSAL_DEPTH)
        }
    }
}
