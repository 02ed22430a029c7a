//! Node kinds of the JavaScript / TypeScript syntax tree.
//!
//! Every node kind is a variant of the closed [`NodeKind`] enum. Children are
//! referenced by [`NodeId`] into the owning [`SyntaxTree`](super::SyntaxTree)
//! arena. Names follow ESTree where ESTree has a name for the construct.

use smol_str::SmolStr;
use text_size::TextRange;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node: its kind and its byte range in the parsed source.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub range: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Var,
    Let,
    Const,
    Using,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
            Self::Using => "using",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Number,
    BigInt,
    Boolean,
    Null,
    RegExp,
}

/// Function data shared by declarations, expressions and methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub id: Option<NodeId>,
    pub params: Vec<NodeId>,
    /// A `BlockStatement`, or `None` for TS overload signatures.
    pub body: Option<NodeId>,
    pub is_async: bool,
    pub is_generator: bool,
}

/// Class data shared by declarations and expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: Option<NodeId>,
    pub super_class: Option<NodeId>,
    /// A `ClassBody`.
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },

    // ------------------------------------------------------------------
    // Statements & declarations
    // ------------------------------------------------------------------
    VariableDeclaration {
        kind: VariableKind,
        declarations: Vec<NodeId>,
    },
    VariableDeclarator {
        id: NodeId,
        init: Option<NodeId>,
    },
    FunctionDeclaration(Function),
    ClassDeclaration(Class),
    ClassBody {
        body: Vec<NodeId>,
    },
    MethodDefinition {
        key: NodeId,
        /// A `FunctionExpression`.
        value: NodeId,
        kind: MethodKind,
        computed: bool,
        is_static: bool,
    },
    PropertyDefinition {
        key: NodeId,
        value: Option<NodeId>,
        computed: bool,
        is_static: bool,
    },
    StaticBlock {
        body: Vec<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    BlockStatement {
        body: Vec<NodeId>,
    },
    EmptyStatement,
    DebuggerStatement,
    ReturnStatement {
        argument: Option<NodeId>,
    },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    ForStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    ForInStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    ForOfStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
        is_await: bool,
    },
    WhileStatement {
        test: NodeId,
        body: NodeId,
    },
    DoWhileStatement {
        body: NodeId,
        test: NodeId,
    },
    SwitchStatement {
        discriminant: NodeId,
        cases: Vec<NodeId>,
    },
    SwitchCase {
        test: Option<NodeId>,
        consequent: Vec<NodeId>,
    },
    ThrowStatement {
        argument: NodeId,
    },
    TryStatement {
        block: NodeId,
        handler: Option<NodeId>,
        finalizer: Option<NodeId>,
    },
    CatchClause {
        param: Option<NodeId>,
        body: NodeId,
    },
    BreakStatement {
        label: Option<NodeId>,
    },
    ContinueStatement {
        label: Option<NodeId>,
    },
    LabeledStatement {
        label: NodeId,
        body: NodeId,
    },
    ImportDeclaration {
        /// Local binding identifiers.
        specifiers: Vec<NodeId>,
        source: NodeId,
    },
    ExportNamedDeclaration {
        declaration: Option<NodeId>,
        specifiers: Vec<NodeId>,
        source: Option<NodeId>,
    },
    ExportDefaultDeclaration {
        declaration: NodeId,
    },
    ExportAllDeclaration {
        source: NodeId,
    },
    /// `interface`, `type`, `enum`, `declare …` and `namespace` declarations.
    /// Type-only bodies are dropped; `body` holds a namespace block or the
    /// declaration wrapped by `declare`.
    TsDeclaration {
        id: Option<NodeId>,
        body: Option<NodeId>,
    },

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------
    Identifier {
        name: SmolStr,
    },
    PrivateName {
        name: SmolStr,
    },
    Literal {
        kind: LiteralKind,
        raw: SmolStr,
    },
    ThisExpression,
    Super,
    TemplateLiteral {
        quasis: Vec<NodeId>,
        expressions: Vec<NodeId>,
    },
    TemplateElement {
        raw: SmolStr,
        tail: bool,
    },
    TaggedTemplateExpression {
        tag: NodeId,
        quasi: NodeId,
    },
    ArrayExpression {
        /// `None` for holes.
        elements: Vec<Option<NodeId>>,
    },
    ObjectExpression {
        properties: Vec<NodeId>,
    },
    /// Shorthand properties get distinct key and value nodes over the same range.
    Property {
        key: NodeId,
        value: NodeId,
        kind: PropertyKind,
        computed: bool,
        shorthand: bool,
        method: bool,
    },
    SpreadElement {
        argument: NodeId,
    },
    FunctionExpression(Function),
    ArrowFunctionExpression {
        params: Vec<NodeId>,
        body: NodeId,
        /// True when the body is an expression rather than a block.
        expression: bool,
        is_async: bool,
    },
    ClassExpression(Class),
    UnaryExpression {
        operator: SmolStr,
        argument: NodeId,
    },
    UpdateExpression {
        operator: SmolStr,
        prefix: bool,
        argument: NodeId,
    },
    BinaryExpression {
        operator: SmolStr,
        left: NodeId,
        right: NodeId,
    },
    LogicalExpression {
        operator: SmolStr,
        left: NodeId,
        right: NodeId,
    },
    AssignmentExpression {
        operator: SmolStr,
        left: NodeId,
        right: NodeId,
    },
    ConditionalExpression {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
        optional: bool,
    },
    NewExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    MemberExpression {
        object: NodeId,
        property: NodeId,
        computed: bool,
        optional: bool,
    },
    /// Wraps a call/member chain that contains an optional link (`?.`).
    ChainExpression {
        expression: NodeId,
    },
    SequenceExpression {
        expressions: Vec<NodeId>,
    },
    ParenthesizedExpression {
        expression: NodeId,
    },
    AwaitExpression {
        argument: NodeId,
    },
    YieldExpression {
        argument: Option<NodeId>,
        delegate: bool,
    },
    /// `new.target`, `import.meta`
    MetaProperty {
        meta: NodeId,
        property: NodeId,
    },
    ImportExpression {
        source: NodeId,
    },

    // ------------------------------------------------------------------
    // TypeScript expression wrappers
    // ------------------------------------------------------------------
    TsAsExpression {
        expression: NodeId,
        type_annotation: NodeId,
    },
    TsSatisfiesExpression {
        expression: NodeId,
        type_annotation: NodeId,
    },
    TsNonNullExpression {
        expression: NodeId,
    },
    /// `<Type>expression`
    TsTypeAssertion {
        type_annotation: NodeId,
        expression: NodeId,
    },
    /// `constructor(private readonly x: T)`
    TsParameterProperty {
        parameter: NodeId,
    },
    /// A type in annotation position. Types are opaque to the engine.
    TsType,

    // ------------------------------------------------------------------
    // JSX
    // ------------------------------------------------------------------
    /// An element or, when `name` is `None`, a fragment.
    JsxElement {
        name: Option<SmolStr>,
        attributes: Vec<NodeId>,
        children: Vec<NodeId>,
    },
    JsxAttribute {
        name: SmolStr,
        value: Option<NodeId>,
    },
    JsxSpreadAttribute {
        argument: NodeId,
    },
    JsxExpressionContainer {
        expression: Option<NodeId>,
    },
    JsxText,

    // ------------------------------------------------------------------
    // Patterns
    // ------------------------------------------------------------------
    ObjectPattern {
        /// `Property` nodes (values are patterns) and a trailing `RestElement`.
        properties: Vec<NodeId>,
    },
    ArrayPattern {
        elements: Vec<Option<NodeId>>,
    },
    AssignmentPattern {
        left: NodeId,
        right: NodeId,
    },
    RestElement {
        argument: NodeId,
    },
}

impl NodeKind {
    /// Push the direct children of this node, in source order, onto `out`.
    pub fn push_children(&self, out: &mut Vec<NodeId>) {
        fn opt(out: &mut Vec<NodeId>, id: &Option<NodeId>) {
            if let Some(id) = id {
                out.push(*id);
            }
        }
        fn function(out: &mut Vec<NodeId>, f: &Function) {
            opt(out, &f.id);
            out.extend(f.params.iter().copied());
            opt(out, &f.body);
        }
        fn class(out: &mut Vec<NodeId>, c: &Class) {
            opt(out, &c.id);
            opt(out, &c.super_class);
            out.push(c.body);
        }

        match self {
            Self::Program { body }
            | Self::ClassBody { body }
            | Self::StaticBlock { body }
            | Self::BlockStatement { body } => out.extend(body.iter().copied()),
            Self::VariableDeclaration { declarations, .. } => {
                out.extend(declarations.iter().copied())
            }
            Self::VariableDeclarator { id, init } => {
                out.push(*id);
                opt(out, init);
            }
            Self::FunctionDeclaration(f) | Self::FunctionExpression(f) => function(out, f),
            Self::ClassDeclaration(c) | Self::ClassExpression(c) => class(out, c),
            Self::MethodDefinition { key, value, .. } => {
                out.push(*key);
                out.push(*value);
            }
            Self::PropertyDefinition { key, value, .. } => {
                out.push(*key);
                opt(out, value);
            }
            Self::ExpressionStatement { expression }
            | Self::ChainExpression { expression }
            | Self::ParenthesizedExpression { expression }
            | Self::TsNonNullExpression { expression } => out.push(*expression),
            Self::ReturnStatement { argument } | Self::YieldExpression { argument, .. } => {
                opt(out, argument)
            }
            Self::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                out.push(*test);
                out.push(*consequent);
                opt(out, alternate);
            }
            Self::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                opt(out, init);
                opt(out, test);
                opt(out, update);
                out.push(*body);
            }
            Self::ForInStatement { left, right, body }
            | Self::ForOfStatement {
                left, right, body, ..
            } => {
                out.push(*left);
                out.push(*right);
                out.push(*body);
            }
            Self::WhileStatement { test, body } => {
                out.push(*test);
                out.push(*body);
            }
            Self::DoWhileStatement { body, test } => {
                out.push(*body);
                out.push(*test);
            }
            Self::SwitchStatement {
                discriminant,
                cases,
            } => {
                out.push(*discriminant);
                out.extend(cases.iter().copied());
            }
            Self::SwitchCase { test, consequent } => {
                opt(out, test);
                out.extend(consequent.iter().copied());
            }
            Self::ThrowStatement { argument }
            | Self::SpreadElement { argument }
            | Self::AwaitExpression { argument }
            | Self::UnaryExpression { argument, .. }
            | Self::UpdateExpression { argument, .. }
            | Self::RestElement { argument }
            | Self::JsxSpreadAttribute { argument } => out.push(*argument),
            Self::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                out.push(*block);
                opt(out, handler);
                opt(out, finalizer);
            }
            Self::CatchClause { param, body } => {
                opt(out, param);
                out.push(*body);
            }
            Self::BreakStatement { label } | Self::ContinueStatement { label } => opt(out, label),
            Self::LabeledStatement { label, body } => {
                out.push(*label);
                out.push(*body);
            }
            Self::ImportDeclaration { specifiers, source } => {
                out.extend(specifiers.iter().copied());
                out.push(*source);
            }
            Self::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => {
                opt(out, declaration);
                out.extend(specifiers.iter().copied());
                opt(out, source);
            }
            Self::ExportDefaultDeclaration { declaration } => out.push(*declaration),
            Self::ExportAllDeclaration { source } | Self::ImportExpression { source } => {
                out.push(*source)
            }
            Self::TsDeclaration { id, body } => {
                opt(out, id);
                opt(out, body);
            }
            Self::TemplateLiteral {
                quasis,
                expressions,
            } => {
                // Interleave quasis and expressions to keep source order.
                let mut exprs = expressions.iter();
                for quasi in quasis {
                    out.push(*quasi);
                    if let Some(expr) = exprs.next() {
                        out.push(*expr);
                    }
                }
                out.extend(exprs.copied());
            }
            Self::TaggedTemplateExpression { tag, quasi } => {
                out.push(*tag);
                out.push(*quasi);
            }
            Self::ArrayExpression { elements } | Self::ArrayPattern { elements } => {
                out.extend(elements.iter().flatten().copied())
            }
            Self::ObjectExpression { properties } | Self::ObjectPattern { properties } => {
                out.extend(properties.iter().copied())
            }
            Self::Property { key, value, .. } => {
                out.push(*key);
                out.push(*value);
            }
            Self::ArrowFunctionExpression { params, body, .. } => {
                out.extend(params.iter().copied());
                out.push(*body);
            }
            Self::BinaryExpression { left, right, .. }
            | Self::LogicalExpression { left, right, .. }
            | Self::AssignmentExpression { left, right, .. }
            | Self::AssignmentPattern { left, right } => {
                out.push(*left);
                out.push(*right);
            }
            Self::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                out.push(*test);
                out.push(*consequent);
                out.push(*alternate);
            }
            Self::CallExpression {
                callee, arguments, ..
            }
            | Self::NewExpression { callee, arguments } => {
                out.push(*callee);
                out.extend(arguments.iter().copied());
            }
            Self::MemberExpression {
                object, property, ..
            } => {
                out.push(*object);
                out.push(*property);
            }
            Self::SequenceExpression { expressions } => out.extend(expressions.iter().copied()),
            Self::MetaProperty { meta, property } => {
                out.push(*meta);
                out.push(*property);
            }
            Self::TsAsExpression {
                expression,
                type_annotation,
            }
            | Self::TsSatisfiesExpression {
                expression,
                type_annotation,
            } => {
                out.push(*expression);
                out.push(*type_annotation);
            }
            Self::TsTypeAssertion {
                type_annotation,
                expression,
            } => {
                out.push(*type_annotation);
                out.push(*expression);
            }
            Self::TsParameterProperty { parameter } => out.push(*parameter),
            Self::JsxElement {
                attributes,
                children,
                ..
            } => {
                out.extend(attributes.iter().copied());
                out.extend(children.iter().copied());
            }
            Self::JsxAttribute { value, .. } => opt(out, value),
            Self::JsxExpressionContainer { expression } => opt(out, expression),
            Self::EmptyStatement
            | Self::DebuggerStatement
            | Self::Identifier { .. }
            | Self::PrivateName { .. }
            | Self::Literal { .. }
            | Self::ThisExpression
            | Self::Super
            | Self::TemplateElement { .. }
            | Self::TsType
            | Self::JsxText => {}
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.push_children(&mut out);
        out
    }

    /// Short ESTree-style tag of the node kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Program { .. } => "Program",
            Self::VariableDeclaration { .. } => "VariableDeclaration",
            Self::VariableDeclarator { .. } => "VariableDeclarator",
            Self::FunctionDeclaration(_) => "FunctionDeclaration",
            Self::ClassDeclaration(_) => "ClassDeclaration",
            Self::ClassBody { .. } => "ClassBody",
            Self::MethodDefinition { .. } => "MethodDefinition",
            Self::PropertyDefinition { .. } => "PropertyDefinition",
            Self::StaticBlock { .. } => "StaticBlock",
            Self::ExpressionStatement { .. } => "ExpressionStatement",
            Self::BlockStatement { .. } => "BlockStatement",
            Self::EmptyStatement => "EmptyStatement",
            Self::DebuggerStatement => "DebuggerStatement",
            Self::ReturnStatement { .. } => "ReturnStatement",
            Self::IfStatement { .. } => "IfStatement",
            Self::ForStatement { .. } => "ForStatement",
            Self::ForInStatement { .. } => "ForInStatement",
            Self::ForOfStatement { .. } => "ForOfStatement",
            Self::WhileStatement { .. } => "WhileStatement",
            Self::DoWhileStatement { .. } => "DoWhileStatement",
            Self::SwitchStatement { .. } => "SwitchStatement",
            Self::SwitchCase { .. } => "SwitchCase",
            Self::ThrowStatement { .. } => "ThrowStatement",
            Self::TryStatement { .. } => "TryStatement",
            Self::CatchClause { .. } => "CatchClause",
            Self::BreakStatement { .. } => "BreakStatement",
            Self::ContinueStatement { .. } => "ContinueStatement",
            Self::LabeledStatement { .. } => "LabeledStatement",
            Self::ImportDeclaration { .. } => "ImportDeclaration",
            Self::ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
            Self::ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
            Self::ExportAllDeclaration { .. } => "ExportAllDeclaration",
            Self::TsDeclaration { .. } => "TSDeclaration",
            Self::Identifier { .. } => "Identifier",
            Self::PrivateName { .. } => "PrivateName",
            Self::Literal { .. } => "Literal",
            Self::ThisExpression => "ThisExpression",
            Self::Super => "Super",
            Self::TemplateLiteral { .. } => "TemplateLiteral",
            Self::TemplateElement { .. } => "TemplateElement",
            Self::TaggedTemplateExpression { .. } => "TaggedTemplateExpression",
            Self::ArrayExpression { .. } => "ArrayExpression",
            Self::ObjectExpression { .. } => "ObjectExpression",
            Self::Property { .. } => "Property",
            Self::SpreadElement { .. } => "SpreadElement",
            Self::FunctionExpression(_) => "FunctionExpression",
            Self::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            Self::ClassExpression(_) => "ClassExpression",
            Self::UnaryExpression { .. } => "UnaryExpression",
            Self::UpdateExpression { .. } => "UpdateExpression",
            Self::BinaryExpression { .. } => "BinaryExpression",
            Self::LogicalExpression { .. } => "LogicalExpression",
            Self::AssignmentExpression { .. } => "AssignmentExpression",
            Self::ConditionalExpression { .. } => "ConditionalExpression",
            Self::CallExpression { .. } => "CallExpression",
            Self::NewExpression { .. } => "NewExpression",
            Self::MemberExpression { .. } => "MemberExpression",
            Self::ChainExpression { .. } => "ChainExpression",
            Self::SequenceExpression { .. } => "SequenceExpression",
            Self::ParenthesizedExpression { .. } => "ParenthesizedExpression",
            Self::AwaitExpression { .. } => "AwaitExpression",
            Self::YieldExpression { .. } => "YieldExpression",
            Self::MetaProperty { .. } => "MetaProperty",
            Self::ImportExpression { .. } => "ImportExpression",
            Self::TsAsExpression { .. } => "TSAsExpression",
            Self::TsSatisfiesExpression { .. } => "TSSatisfiesExpression",
            Self::TsNonNullExpression { .. } => "TSNonNullExpression",
            Self::TsTypeAssertion { .. } => "TSTypeAssertion",
            Self::TsParameterProperty { .. } => "TSParameterProperty",
            Self::TsType => "TSType",
            Self::JsxElement { .. } => "JSXElement",
            Self::JsxAttribute { .. } => "JSXAttribute",
            Self::JsxSpreadAttribute { .. } => "JSXSpreadAttribute",
            Self::JsxExpressionContainer { .. } => "JSXExpressionContainer",
            Self::JsxText => "JSXText",
            Self::ObjectPattern { .. } => "ObjectPattern",
            Self::ArrayPattern { .. } => "ArrayPattern",
            Self::AssignmentPattern { .. } => "AssignmentPattern",
            Self::RestElement { .. } => "RestElement",
        }
    }

    /// Function-like nodes own a parameter list and a body.
    pub fn is_function_like(&self) -> bool {
        matches!(
            self,
            Self::FunctionDeclaration(_)
                | Self::FunctionExpression(_)
                | Self::ArrowFunctionExpression { .. }
        )
    }

    /// Parameters of a function-like node.
    pub fn params(&self) -> Option<&[NodeId]> {
        match self {
            Self::FunctionDeclaration(f) | Self::FunctionExpression(f) => Some(&f.params),
            Self::ArrowFunctionExpression { params, .. } => Some(params),
            _ => None,
        }
    }

    /// Body of a function-like node (block or concise expression).
    pub fn function_body(&self) -> Option<NodeId> {
        match self {
            Self::FunctionDeclaration(f) | Self::FunctionExpression(f) => f.body,
            Self::ArrowFunctionExpression { body, .. } => Some(*body),
            _ => None,
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self, Self::ClassDeclaration(_) | Self::ClassExpression(_))
    }

    /// Statement-level nodes: the units a generated line can be placed around.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::VariableDeclaration { .. }
                | Self::FunctionDeclaration(_)
                | Self::ClassDeclaration(_)
                | Self::ExpressionStatement { .. }
                | Self::BlockStatement { .. }
                | Self::EmptyStatement
                | Self::DebuggerStatement
                | Self::ReturnStatement { .. }
                | Self::IfStatement { .. }
                | Self::ForStatement { .. }
                | Self::ForInStatement { .. }
                | Self::ForOfStatement { .. }
                | Self::WhileStatement { .. }
                | Self::DoWhileStatement { .. }
                | Self::SwitchStatement { .. }
                | Self::ThrowStatement { .. }
                | Self::TryStatement { .. }
                | Self::BreakStatement { .. }
                | Self::ContinueStatement { .. }
                | Self::LabeledStatement { .. }
                | Self::ImportDeclaration { .. }
                | Self::ExportNamedDeclaration { .. }
                | Self::ExportDefaultDeclaration { .. }
                | Self::ExportAllDeclaration { .. }
                | Self::TsDeclaration { .. }
        )
    }

    /// Name of an `Identifier` node.
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Self::Identifier { name } => Some(name),
            _ => None,
        }
    }
}
