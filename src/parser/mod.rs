//! JavaScript / TypeScript parser
//!
//! Turns source text into a [`SyntaxTree`]:
//!
//! ```text
//! Source Text
//!     ↓
//! script_region → <script> content of Vue / Svelte / HTML documents
//!     ↓
//! Lexer (logos) → Tokens, lexed lazily
//!     ↓
//! Parser → SyntaxTree arena with byte ranges and parent links
//! ```
//!
//! Parsing is fail-fast and nesting-bounded: the first syntax error, or
//! nesting beyond [`ParseOptions::max_depth`], aborts with a [`ParseError`].

mod errors;
mod expressions;
mod jsx;
pub mod keywords;
mod language;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;
mod patterns;
mod script_region;
mod types;

pub use errors::{ParseError, ParseResult};
pub use language::{Dialect, Language};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use script_region::{ScriptRegion, extract_script, script_regions};

use crate::syntax::SyntaxTree;

/// Nesting ceiling used when none is configured.
pub const DEFAULT_MAX_PARSE_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest statement / expression / pattern nesting accepted.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_PARSE_DEPTH,
        }
    }
}

/// Parse a document. For embedded languages `selection_line` picks the
/// `<script>` region to parse.
pub fn parse(source: &str, language: Language, selection_line: Option<u32>) -> ParseResult<SyntaxTree> {
    parse_with_options(source, language, selection_line, &ParseOptions::default())
}

pub fn parse_with_options(
    source: &str,
    language: Language,
    selection_line: Option<u32>,
    options: &ParseOptions,
) -> ParseResult<SyntaxTree> {
    if language.is_embedded() {
        let (script, dialect) = extract_script(source, selection_line)?;
        return parse_script(&script, dialect, options);
    }
    parse_script(source, language.dialect(), options)
}

/// Parse plain script text with an explicit dialect.
pub fn parse_script(source: &str, dialect: Dialect, options: &ParseOptions) -> ParseResult<SyntaxTree> {
    let tree = parser::Parser::new(source, dialect, options.max_depth).parse_program()?;
    tracing::trace!("parsed {} bytes into {} nodes", source.len(), tree.len());
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{NodeId, NodeKind, SyntaxTree, VariableKind};

    fn parse_ok(source: &str, language: Language) -> SyntaxTree {
        match parse(source, language, None) {
            Ok(tree) => tree,
            Err(err) => panic!("failed to parse {source:?}: {err}"),
        }
    }

    fn statements(tree: &SyntaxTree) -> Vec<NodeId> {
        match tree.kind(tree.root()) {
            NodeKind::Program { body } => body.clone(),
            other => panic!("root is {}", other.tag()),
        }
    }

    fn tags(tree: &SyntaxTree) -> Vec<&'static str> {
        statements(tree)
            .into_iter()
            .map(|id| tree.kind(id).tag())
            .collect()
    }

    fn text<'s>(source: &'s str, tree: &SyntaxTree, id: NodeId) -> &'s str {
        &source[tree.range(id)]
    }

    #[test]
    fn test_variable_declaration_range_includes_semicolon() {
        let source = "const sum = a + b;\nfoo();";
        let tree = parse_ok(source, Language::JavaScript);
        let body = statements(&tree);
        assert_eq!(text(source, &tree, body[0]), "const sum = a + b;");
        match tree.kind(body[0]) {
            NodeKind::VariableDeclaration { kind, declarations } => {
                assert_eq!(*kind, VariableKind::Const);
                assert_eq!(declarations.len(), 1);
            }
            other => panic!("unexpected {}", other.tag()),
        }
    }

    #[test]
    fn test_asi_and_statement_kinds() {
        let source = "let a = 1\nlet b = a\nif (a) { b++ } else return\nfor (const x of xs) {}\nwhile (a) break";
        let tree = parse_ok(source, Language::JavaScript);
        assert_eq!(
            tags(&tree),
            vec![
                "VariableDeclaration",
                "VariableDeclaration",
                "IfStatement",
                "ForOfStatement",
                "WhileStatement"
            ]
        );
    }

    #[test]
    fn test_arrow_functions() {
        let source = "const f = (a, { b = 2 }, ...rest) => a + b;\nconst g = async x => { await x; };";
        let tree = parse_ok(source, Language::JavaScript);
        let arrows: Vec<_> = tree
            .ids()
            .filter(|id| matches!(tree.kind(*id), NodeKind::ArrowFunctionExpression { .. }))
            .collect();
        assert_eq!(arrows.len(), 2);
        match tree.kind(arrows[0]) {
            NodeKind::ArrowFunctionExpression {
                params, expression, ..
            } => {
                assert_eq!(params.len(), 3);
                assert!(*expression);
            }
            _ => unreachable!(),
        }
        match tree.kind(arrows[1]) {
            NodeKind::ArrowFunctionExpression {
                is_async, expression, ..
            } => {
                assert!(*is_async);
                assert!(!*expression);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parenthesized_expression_is_not_an_arrow() {
        let source = "const x = (a ? b : c);";
        let tree = parse_ok(source, Language::JavaScript);
        assert!(tree
            .ids()
            .any(|id| matches!(tree.kind(id), NodeKind::ConditionalExpression { .. })));
        assert!(!tree
            .ids()
            .any(|id| matches!(tree.kind(id), NodeKind::ArrowFunctionExpression { .. })));
    }

    #[test]
    fn test_optional_chain_is_wrapped() {
        let source = "const v = user?.profile.name;";
        let tree = parse_ok(source, Language::JavaScript);
        assert!(tree
            .ids()
            .any(|id| matches!(tree.kind(id), NodeKind::ChainExpression { .. })));
    }

    #[test]
    fn test_template_literal_with_substitutions() {
        let source = "const s = `a ${b + `c${d}`} e`;";
        let tree = parse_ok(source, Language::JavaScript);
        let template = tree
            .ids()
            .find(|id| matches!(tree.kind(*id), NodeKind::TemplateLiteral { .. }))
            .unwrap();
        assert_eq!(text(source, &tree, template), "`a ${b + `c${d}`} e`");
    }

    #[test]
    fn test_regex_literal() {
        let source = "const re = /[a-z]+\\//gi;\nconst q = a / b / c;";
        let tree = parse_ok(source, Language::JavaScript);
        assert_eq!(tags(&tree).len(), 2);
    }

    #[test]
    fn test_class_members() {
        let source = "class Person {\n  #secret = 1;\n  static count = 0;\n  constructor(name) { this.name = name; }\n  get label() { return this.name; }\n  handle = () => {};\n}";
        let tree = parse_ok(source, Language::JavaScript);
        let methods: Vec<_> = tree
            .ids()
            .filter_map(|id| match tree.kind(id) {
                NodeKind::MethodDefinition { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            methods,
            vec![crate::syntax::MethodKind::Constructor, crate::syntax::MethodKind::Get]
        );
    }

    #[test]
    fn test_typescript_annotations() {
        let source = "interface A { x: number }\ntype B<T> = T | null;\nenum C { X }\nfunction f<T>(a: T, b?: Array<string>): Promise<void> {}\nconst g = <T,>(x: T): T => x;\nlet h = y as unknown as Map<string, number[]>;\nconst n = z!.w;\nclass D implements A { constructor(private readonly x: number) {} }";
        let tree = parse_ok(source, Language::TypeScript);
        assert_eq!(
            tags(&tree),
            vec![
                "TSDeclaration",
                "TSDeclaration",
                "TSDeclaration",
                "FunctionDeclaration",
                "VariableDeclaration",
                "VariableDeclaration",
                "VariableDeclaration",
                "ClassDeclaration"
            ]
        );
        assert!(tree
            .ids()
            .any(|id| matches!(tree.kind(id), NodeKind::TsParameterProperty { .. })));
    }

    #[test]
    fn test_typescript_generic_call_and_comparison() {
        let source = "const a = useState<string>('');\nconst b = c < d && e > f;";
        let tree = parse_ok(source, Language::TypeScript);
        assert!(tree.ids().any(|id| matches!(
            tree.kind(id),
            NodeKind::BinaryExpression { operator, .. } if operator == "<"
        )));
        assert!(tree
            .ids()
            .any(|id| matches!(tree.kind(id), NodeKind::CallExpression { .. })));
    }

    #[test]
    fn test_jsx_element() {
        let source = "const App = () => (\n  <div className=\"app\" {...props}>\n    Hello {name}!\n    <br />\n  </div>\n);";
        let tree = parse_ok(source, Language::Jsx);
        let element = tree
            .ids()
            .find(|id| matches!(tree.kind(*id), NodeKind::JsxElement { name: Some(n), .. } if n == "div"))
            .unwrap();
        assert!(text(source, &tree, element).ends_with("</div>"));
    }

    #[test]
    fn test_destructuring_assignment_becomes_pattern() {
        let source = "[a, b] = [b, a];\n({ x, y = 1 } = point);";
        let tree = parse_ok(source, Language::JavaScript);
        assert!(tree
            .ids()
            .any(|id| matches!(tree.kind(id), NodeKind::ArrayPattern { .. })));
        assert!(tree
            .ids()
            .any(|id| matches!(tree.kind(id), NodeKind::ObjectPattern { .. })));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = parse("const = ;", Language::JavaScript, None).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        let err = parse("function f() {", Language::JavaScript, None).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let source = format!("x = {}1{};", "(".repeat(2000), ")".repeat(2000));
        let err = parse(&source, Language::JavaScript, None).unwrap_err();
        assert!(err.is_nesting_too_deep());
    }

    #[test]
    fn test_vue_script_region() {
        let source = "<template>\n  <p>{{ a }}</p>\n</template>\n<script setup lang=\"ts\">\nconst a: number = 1;\n</script>\n";
        let tree = parse(source, Language::Vue, Some(4)).unwrap();
        let body = statements(&tree);
        assert_eq!(body.len(), 1);
        assert_eq!(text(source, &tree, body[0]), "const a: number = 1;");
        assert!(parse(source, Language::Vue, Some(1))
            .unwrap_err()
            .is_outside_script_region());
    }
}
