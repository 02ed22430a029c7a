//! Classification orchestrator.
//!
//! Checkers overlap: a bare `name = () => {}` is also a valid primitive
//! assignment shape. Overlaps are resolved by the fixed order of
//! [`CHECKER_PRIORITY`] alone, most specific assignment shapes first and the
//! context fallbacks last.

use crate::analysis::CheckContext;
use crate::checkers::{self, Category, CheckMetadata, Checker};

/// Checkers in the order they are tried.
pub static CHECKER_PRIORITY: [(Category, Checker); 16] = [
    (Category::NamedFunctionAssignment, checkers::named_function_assignment),
    (Category::FunctionParameter, checkers::function_parameter),
    (Category::ObjectFunctionCallAssignment, checkers::object_function_call_assignment),
    (Category::FunctionCallAssignment, checkers::function_call_assignment),
    (Category::PropertyAccessAssignment, checkers::property_access_assignment),
    (Category::ObjectLiteral, checkers::object_literal),
    (Category::ArrayAssignment, checkers::array_assignment),
    (Category::TemplateString, checkers::template_string),
    (Category::Ternary, checkers::ternary),
    (Category::BinaryExpression, checkers::binary_expression),
    (Category::PropertyMethodCall, checkers::property_method_call),
    (Category::RawPropertyAccess, checkers::raw_property_access),
    (Category::PrimitiveAssignment, checkers::primitive_assignment),
    (Category::WithinConditionBlock, checkers::within_condition_block),
    (Category::WithinReturnStatement, checkers::within_return_statement),
    (Category::WanderingExpression, checkers::wandering_expression),
];

/// Category chosen for a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification {
    pub category: Category,
    pub metadata: CheckMetadata,
}

/// First matching checker in priority order; [`Category::PrimitiveAssignment`]
/// when none matches.
pub fn classify(ctx: &CheckContext<'_>) -> Classification {
    for (category, checker) in CHECKER_PRIORITY.iter() {
        let result = checker(ctx);
        if result.is_checked {
            tracing::debug!(
                "classified `{}` on line {} as {}",
                ctx.variable,
                ctx.selection_line,
                category
            );
            return Classification {
                category: *category,
                metadata: result.metadata,
            };
        }
    }
    tracing::debug!(
        "no checker matched `{}` on line {}; falling back to {}",
        ctx.variable,
        ctx.selection_line,
        Category::PrimitiveAssignment
    );
    Classification {
        category: Category::PrimitiveAssignment,
        metadata: CheckMetadata::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::test_support::Fixture;

    #[test]
    fn test_priority_table_follows_category_order() {
        let order: Vec<Category> = CHECKER_PRIORITY.iter().map(|(category, _)| *category).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_specific_shape_beats_primitive() {
        let fixture = Fixture::new("handler = 0; handler = function () {};", 0, "handler");
        let ctx = fixture.ctx();
        assert!(checkers::primitive_assignment(&ctx).is_checked);
        assert!(checkers::named_function_assignment(&ctx).is_checked);
        assert_eq!(classify(&ctx).category, Category::NamedFunctionAssignment);
    }

    #[test]
    fn test_no_match_defaults_to_primitive() {
        let fixture = Fixture::new("foo();\n\nbar();", 1, "nothing");
        assert_eq!(classify(&fixture.ctx()).category, Category::PrimitiveAssignment);
    }
}
