//! Recursive descent parser for JavaScript / TypeScript
//!
//! Builds a [`SyntaxTree`] arena bottom-up from a lazily lexed token stream.
//! The parser is fail-fast: the first syntax error aborts the parse. Ambiguous
//! constructs (arrow heads, TS type arguments) are resolved by speculating
//! from a [`Checkpoint`] and rewinding on failure.
//!
//! This file holds the token cursor and statement grammar; expressions,
//! patterns, TypeScript types and JSX live in sibling modules.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::{ParseError, ParseResult};
use super::keywords;
use super::language::Dialect;
use super::lexer::{Lexer, Token, TokenKind};
use crate::syntax::{Class, Function, MethodKind, NodeId, NodeKind, SyntaxTree, TreeBuilder, VariableKind};

/// Parser state that speculation can rewind to.
#[derive(Debug, Clone, Copy)]
pub(super) struct Checkpoint {
    token: Token,
    prev_end: TextSize,
    nodes: usize,
    depth: usize,
    in_generator: bool,
}

/// The parser state
pub(super) struct Parser<'a> {
    pub(super) source: &'a str,
    pub(super) lexer: Lexer<'a>,
    /// Current (not yet consumed) token.
    pub(super) token: Token,
    /// End of the last consumed token.
    pub(super) prev_end: TextSize,
    pub(super) builder: TreeBuilder,
    pub(super) dialect: Dialect,
    /// `yield` is an operator inside generator bodies.
    pub(super) in_generator: bool,
    /// Offsets of `(` / `<` already known not to start an arrow function.
    pub(super) not_arrow: FxHashSet<TextSize>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(source: &'a str, dialect: Dialect, max_depth: usize) -> Self {
        let mut lexer = Lexer::new(source);
        let token = lexer.next_token();
        Self {
            source,
            lexer,
            token,
            prev_end: TextSize::new(0),
            builder: TreeBuilder::new(),
            dialect,
            in_generator: false,
            not_arrow: FxHashSet::default(),
            depth: 0,
            max_depth,
        }
    }

    pub(super) fn parse_program(mut self) -> ParseResult<SyntaxTree> {
        let mut body = Vec::new();
        while !self.at(TokenKind::Eof) {
            body.push(self.parse_statement()?);
        }
        let range = TextRange::up_to(TextSize::of(self.source));
        let root = self.builder.alloc(NodeKind::Program { body }, range);
        Ok(self.builder.finish(root)?)
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    pub(super) fn text(&self, token: Token) -> &'a str {
        &self.source[token.range]
    }

    /// The current token's text when it is a word.
    pub(super) fn current_word(&self) -> Option<&'a str> {
        (self.token.kind == TokenKind::Ident).then(|| self.text(self.token))
    }

    pub(super) fn at_word(&self, word: &str) -> bool {
        self.current_word() == Some(word)
    }

    /// The token after the current one.
    pub(super) fn peek(&self) -> Token {
        self.lexer.clone().next_token()
    }

    /// The `n`th token after the current one (`peek_nth(1) == peek()`).
    pub(super) fn peek_nth(&self, n: usize) -> Token {
        let mut lexer = self.lexer.clone();
        let mut token = self.token;
        for _ in 0..n {
            token = lexer.next_token();
        }
        token
    }

    pub(super) fn peek_is_word(&self, word: &str) -> bool {
        let next = self.peek();
        next.kind == TokenKind::Ident && self.text(next) == word
    }

    /// `async function` with no line break in between.
    pub(super) fn peek_is_function_on_same_line(&self) -> bool {
        let next = self.peek();
        !next.newline_before && next.kind == TokenKind::Ident && self.text(next) == "function"
    }

    pub(super) fn start(&self) -> TextSize {
        self.token.start()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(super) fn bump(&mut self) -> Token {
        let token = self.token;
        self.prev_end = token.end();
        self.token = self.lexer.next_token();
        token
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind, expected: &'static str) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            self.unexpected(expected)
        }
    }

    pub(super) fn expect_word(&mut self, word: &'static str) -> ParseResult<Token> {
        if self.at_word(word) {
            Ok(self.bump())
        } else {
            self.unexpected(word)
        }
    }

    /// Consume a `>`, splitting `>>`, `>=` and friends.
    pub(super) fn eat_gt(&mut self) -> bool {
        if self.at(TokenKind::Gt) {
            self.bump();
            true
        } else if self.token.kind.starts_with_gt() {
            let split = self.token.start() + TextSize::new(1);
            self.relex_at(split);
            true
        } else {
            false
        }
    }

    /// Continue lexing at `offset`, treating everything before it as consumed.
    pub(super) fn relex_at(&mut self, offset: TextSize) {
        self.prev_end = offset;
        self.lexer.reset(offset);
        self.token = self.lexer.next_token();
    }

    pub(super) fn unexpected<T>(&self, expected: &'static str) -> ParseResult<T> {
        Err(match self.token.kind {
            TokenKind::Eof => ParseError::UnexpectedEof {
                expected,
                offset: self.token.start(),
            },
            _ => ParseError::UnexpectedToken {
                found: self.text(self.token).to_string(),
                expected,
                range: self.token.range,
            },
        })
    }

    /// Statement terminator with automatic semicolon insertion.
    pub(super) fn consume_semicolon(&mut self) -> ParseResult<()> {
        if self.eat(TokenKind::Semicolon)
            || self.at(TokenKind::RBrace)
            || self.at(TokenKind::Eof)
            || self.token.newline_before
        {
            Ok(())
        } else {
            self.unexpected("`;`")
        }
    }

    /// Skip a bracketed group starting at the current `(`, `[` or `{`.
    pub(super) fn skip_balanced(&mut self) -> ParseResult<()> {
        let start = self.start();
        let mut stack = match closer_of(self.token.kind) {
            Some(close) => vec![close],
            None => return self.unexpected("a bracket"),
        };
        self.bump();
        while let Some(&close) = stack.last() {
            match self.token.kind {
                TokenKind::Eof => {
                    return Err(ParseError::Unterminated {
                        what: "bracketed group",
                        offset: start,
                    });
                }
                TokenKind::Backtick => {
                    let end = self
                        .lexer
                        .skip_template(self.token.start())
                        .ok_or(ParseError::Unterminated {
                            what: "template literal",
                            offset: self.token.start(),
                        })?;
                    self.relex_at(end);
                    continue;
                }
                kind if kind == close => {
                    stack.pop();
                }
                kind => {
                    if let Some(nested) = closer_of(kind) {
                        stack.push(nested);
                    } else if matches!(kind, TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace) {
                        return self.unexpected("a matching bracket");
                    }
                }
            }
            self.bump();
        }
        Ok(())
    }

    // =========================================================================
    // Node construction
    // =========================================================================

    pub(super) fn alloc(&mut self, kind: NodeKind, start: TextSize) -> NodeId {
        let range = TextRange::new(start, self.prev_end.max(start));
        self.builder.alloc(kind, range)
    }

    /// Grow `id`'s range to the end of the last consumed token.
    pub(super) fn extend_to_prev_end(&mut self, id: NodeId) {
        let end = self.prev_end;
        if let Some(node) = self.builder.get_mut(id) {
            node.range = TextRange::new(node.range.start(), end.max(node.range.start()));
        }
    }

    pub(super) fn ident_from(&mut self, token: Token) -> NodeId {
        let name = SmolStr::new(self.text(token));
        self.builder.alloc(NodeKind::Identifier { name }, token.range)
    }

    /// Any word as an identifier (keywords included).
    pub(super) fn identifier(&mut self) -> ParseResult<NodeId> {
        let token = self.expect(TokenKind::Ident, "an identifier")?;
        Ok(self.ident_from(token))
    }

    pub(super) fn string_literal(&mut self) -> ParseResult<NodeId> {
        let token = self.expect(TokenKind::String, "a string")?;
        Ok(self.literal_from(token, crate::syntax::LiteralKind::String))
    }

    pub(super) fn literal_from(&mut self, token: Token, kind: crate::syntax::LiteralKind) -> NodeId {
        let raw = SmolStr::new(self.text(token));
        self.builder.alloc(NodeKind::Literal { kind, raw }, token.range)
    }

    // =========================================================================
    // Speculation and nesting
    // =========================================================================

    pub(super) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            token: self.token,
            prev_end: self.prev_end,
            nodes: self.builder.len(),
            depth: self.depth,
            in_generator: self.in_generator,
        }
    }

    pub(super) fn restore(&mut self, checkpoint: Checkpoint) {
        self.token = checkpoint.token;
        self.prev_end = checkpoint.prev_end;
        self.lexer.reset(checkpoint.token.end());
        self.builder.truncate(checkpoint.nodes);
        self.depth = checkpoint.depth;
        self.in_generator = checkpoint.in_generator;
    }

    /// Run `f` one nesting level deeper, failing past the depth ceiling.
    pub(super) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                offset: self.token.start(),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(super) fn parse_statement(&mut self) -> ParseResult<NodeId> {
        self.nested(|p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        match self.token.kind {
            TokenKind::LBrace => return self.parse_block(),
            TokenKind::Semicolon => {
                self.bump();
                return Ok(self.alloc(NodeKind::EmptyStatement, start));
            }
            TokenKind::At => {
                self.skip_decorators()?;
                return self.parse_statement_inner();
            }
            TokenKind::Ident => {}
            _ => return self.parse_expression_statement(),
        }

        let word = self.text(self.token);
        match word {
            "var" => return self.parse_variable_statement(VariableKind::Var),
            "const" if self.dialect.typescript && self.peek_is_word("enum") => {
                return self.parse_ts_enum(start);
            }
            "const" => return self.parse_variable_statement(VariableKind::Const),
            "let" if self.let_starts_declaration() => {
                return self.parse_variable_statement(VariableKind::Let);
            }
            "using" if self.using_starts_declaration() => {
                return self.parse_variable_statement(VariableKind::Using);
            }
            "function" => return self.parse_function(start, false, true),
            "async" if self.peek_is_function_on_same_line() => {
                self.bump();
                return self.parse_function(start, true, true);
            }
            "class" => return self.parse_class(start, true),
            "if" => return self.parse_if_statement(),
            "for" => return self.parse_for_statement(),
            "while" => return self.parse_while_statement(),
            "do" => return self.parse_do_while_statement(),
            "return" => return self.parse_return_statement(),
            "break" | "continue" => return self.parse_jump_statement(word == "break"),
            "throw" => return self.parse_throw_statement(),
            "try" => return self.parse_try_statement(),
            "switch" => return self.parse_switch_statement(),
            "debugger" => {
                self.bump();
                self.consume_semicolon()?;
                return Ok(self.alloc(NodeKind::DebuggerStatement, start));
            }
            "import" if !matches!(self.peek().kind, TokenKind::LParen | TokenKind::Dot) => {
                return self.parse_import_declaration();
            }
            "export" => return self.parse_export_declaration(),
            _ => {}
        }

        if self.dialect.typescript {
            if let Some(declaration) = self.parse_ts_declaration()? {
                return Ok(declaration);
            }
        }

        if self.peek().kind == TokenKind::Colon && !keywords::is_reserved(word) {
            let label = self.identifier()?;
            self.bump();
            let body = self.parse_statement()?;
            return Ok(self.alloc(NodeKind::LabeledStatement { label, body }, start));
        }

        self.parse_expression_statement()
    }

    fn let_starts_declaration(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    fn using_starts_declaration(&self) -> bool {
        let next = self.peek();
        next.kind == TokenKind::Ident && !next.newline_before && !matches!(self.text(next), "in" | "of")
    }

    fn parse_expression_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let expression = self.parse_expression(false)?;
        self.consume_semicolon()?;
        Ok(self.alloc(NodeKind::ExpressionStatement { expression }, start))
    }

    pub(super) fn parse_block(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let body = self.parse_braced_statements()?;
        Ok(self.alloc(NodeKind::BlockStatement { body }, start))
    }

    fn parse_braced_statements(&mut self) -> ParseResult<Vec<NodeId>> {
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut body = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.at(TokenKind::Eof) {
                return self.unexpected("`}`");
            }
            body.push(self.parse_statement()?);
        }
        self.bump();
        Ok(body)
    }

    /// A function body; `yield` is an operator inside it only for generators.
    pub(super) fn parse_function_body(&mut self, is_generator: bool) -> ParseResult<NodeId> {
        let saved = std::mem::replace(&mut self.in_generator, is_generator);
        let body = self.parse_block()?;
        self.in_generator = saved;
        Ok(body)
    }

    fn parse_variable_statement(&mut self, kind: VariableKind) -> ParseResult<NodeId> {
        let declaration = self.parse_variable_declaration(kind, false)?;
        self.consume_semicolon()?;
        self.extend_to_prev_end(declaration);
        Ok(declaration)
    }

    /// `kind a = 1, { b } = c` without the terminator. `no_in` disables the
    /// `in` operator inside `for` heads.
    pub(super) fn parse_variable_declaration(&mut self, kind: VariableKind, no_in: bool) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let mut declarations = Vec::new();
        loop {
            let declarator_start = self.start();
            let id = self.parse_binding_target()?;
            if self.dialect.typescript {
                self.eat(TokenKind::Bang);
                if self.eat(TokenKind::Colon) {
                    self.skip_type()?;
                }
            }
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_assignment(no_in)?)
            } else {
                None
            };
            declarations.push(self.alloc(NodeKind::VariableDeclarator { id, init }, declarator_start));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(self.alloc(NodeKind::VariableDeclaration { kind, declarations }, start))
    }

    fn parse_if_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let test = self.parse_parenthesized_test()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat_word("else") {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(self.alloc(
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            },
            start,
        ))
    }

    fn parse_parenthesized_test(&mut self) -> ParseResult<NodeId> {
        self.expect(TokenKind::LParen, "`(`")?;
        let test = self.parse_expression(false)?;
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(test)
    }

    fn parse_for_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let is_await = self.eat_word("await");
        self.expect(TokenKind::LParen, "`(`")?;

        let init = if self.at(TokenKind::Semicolon) {
            None
        } else {
            let declaration_kind = match self.current_word() {
                Some("var") => Some(VariableKind::Var),
                Some("const") => Some(VariableKind::Const),
                Some("let") if self.let_starts_declaration() => Some(VariableKind::Let),
                Some("using") if self.using_starts_declaration() => Some(VariableKind::Using),
                _ => None,
            };
            Some(match declaration_kind {
                Some(kind) => self.parse_variable_declaration(kind, true)?,
                None => self.parse_expression(true)?,
            })
        };

        if let Some(left) = init {
            let is_of = self.at_word("of");
            if is_of || self.at_word("in") {
                self.bump();
                self.to_pattern(left);
                let right = if is_of {
                    self.parse_assignment(false)?
                } else {
                    self.parse_expression(false)?
                };
                self.expect(TokenKind::RParen, "`)`")?;
                let body = self.parse_statement()?;
                let kind = if is_of {
                    NodeKind::ForOfStatement {
                        left,
                        right,
                        body,
                        is_await,
                    }
                } else {
                    NodeKind::ForInStatement { left, right, body }
                };
                return Ok(self.alloc(kind, start));
            }
        }

        self.expect(TokenKind::Semicolon, "`;`")?;
        let test = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(TokenKind::Semicolon, "`;`")?;
        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(TokenKind::RParen, "`)`")?;
        let body = self.parse_statement()?;
        Ok(self.alloc(
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            },
            start,
        ))
    }

    fn parse_while_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let test = self.parse_parenthesized_test()?;
        let body = self.parse_statement()?;
        Ok(self.alloc(NodeKind::WhileStatement { test, body }, start))
    }

    fn parse_do_while_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let body = self.parse_statement()?;
        self.expect_word("while")?;
        let test = self.parse_parenthesized_test()?;
        self.eat(TokenKind::Semicolon);
        Ok(self.alloc(NodeKind::DoWhileStatement { body, test }, start))
    }

    fn parse_return_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let argument = if self.at(TokenKind::Semicolon)
            || self.at(TokenKind::RBrace)
            || self.at(TokenKind::Eof)
            || self.token.newline_before
        {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.consume_semicolon()?;
        Ok(self.alloc(NodeKind::ReturnStatement { argument }, start))
    }

    fn parse_jump_statement(&mut self, is_break: bool) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let label = if self.at(TokenKind::Ident) && !self.token.newline_before {
            Some(self.identifier()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        let kind = if is_break {
            NodeKind::BreakStatement { label }
        } else {
            NodeKind::ContinueStatement { label }
        };
        Ok(self.alloc(kind, start))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let argument = self.parse_expression(false)?;
        self.consume_semicolon()?;
        Ok(self.alloc(NodeKind::ThrowStatement { argument }, start))
    }

    fn parse_try_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let block = self.parse_block()?;
        let handler = if self.at_word("catch") {
            let catch_start = self.start();
            self.bump();
            let param = if self.eat(TokenKind::LParen) {
                let param = self.parse_binding_target()?;
                if self.dialect.typescript && self.eat(TokenKind::Colon) {
                    self.skip_type()?;
                }
                self.expect(TokenKind::RParen, "`)`")?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(self.alloc(NodeKind::CatchClause { param, body }, catch_start))
        } else {
            None
        };
        let finalizer = if self.eat_word("finally") {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return self.unexpected("`catch` or `finally`");
        }
        Ok(self.alloc(
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            },
            start,
        ))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let discriminant = self.parse_parenthesized_test()?;
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut cases = Vec::new();
        while !self.at(TokenKind::RBrace) {
            let case_start = self.start();
            let test = if self.eat_word("case") {
                Some(self.parse_expression(false)?)
            } else {
                self.expect_word("default")?;
                None
            };
            self.expect(TokenKind::Colon, "`:`")?;
            let mut consequent = Vec::new();
            while !self.at(TokenKind::RBrace) && !self.at_word("case") && !self.at_word("default") {
                if self.at(TokenKind::Eof) {
                    return self.unexpected("`}`");
                }
                consequent.push(self.parse_statement()?);
            }
            cases.push(self.alloc(NodeKind::SwitchCase { test, consequent }, case_start));
        }
        self.bump();
        Ok(self.alloc(
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            },
            start,
        ))
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn parse_import_declaration(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        if self.at_word("type") && self.type_modifier_applies() {
            self.bump();
        }

        let mut specifiers = Vec::new();
        if !self.at(TokenKind::String) {
            if self.at(TokenKind::Ident) {
                specifiers.push(self.identifier()?);
                if self.dialect.typescript && self.eat(TokenKind::Eq) {
                    // `import fs = require("fs")`
                    let source = self.parse_assignment(false)?;
                    self.consume_semicolon()?;
                    return Ok(self.alloc(NodeKind::ImportDeclaration { specifiers, source }, start));
                }
                self.eat(TokenKind::Comma);
            }
            if self.eat(TokenKind::Star) {
                self.expect_word("as")?;
                specifiers.push(self.identifier()?);
            } else if self.eat(TokenKind::LBrace) {
                while !self.at(TokenKind::RBrace) {
                    if self.at_word("type") && self.type_modifier_applies() {
                        self.bump();
                    }
                    let imported = self.bump();
                    if !matches!(imported.kind, TokenKind::Ident | TokenKind::String) {
                        return Err(ParseError::UnexpectedToken {
                            found: self.text(imported).to_string(),
                            expected: "an import specifier",
                            range: imported.range,
                        });
                    }
                    let local = if self.eat_word("as") {
                        self.identifier()?
                    } else {
                        self.ident_from(imported)
                    };
                    specifiers.push(local);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RBrace, "`}`")?;
            }
            self.expect_word("from")?;
        }

        let source = self.string_literal()?;
        self.skip_import_attributes()?;
        self.consume_semicolon()?;
        Ok(self.alloc(NodeKind::ImportDeclaration { specifiers, source }, start))
    }

    /// `type` in `import type X` / `{ type X }` rather than a binding named `type`.
    fn type_modifier_applies(&self) -> bool {
        let next = self.peek();
        match next.kind {
            TokenKind::LBrace | TokenKind::Star => true,
            TokenKind::Ident => !matches!(self.text(next), "from" | "as"),
            _ => false,
        }
    }

    fn skip_import_attributes(&mut self) -> ParseResult<()> {
        if (self.at_word("with") || self.at_word("assert"))
            && !self.token.newline_before
            && self.peek().kind == TokenKind::LBrace
        {
            self.bump();
            self.skip_balanced()?;
        }
        Ok(())
    }

    fn parse_export_declaration(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();

        if self.eat_word("default") {
            let declaration_start = self.start();
            let declaration = match self.current_word() {
                Some("function") => self.parse_function(declaration_start, false, true)?,
                Some("async") if self.peek_is_function_on_same_line() => {
                    self.bump();
                    self.parse_function(declaration_start, true, true)?
                }
                Some("class") => self.parse_class(declaration_start, true)?,
                Some("abstract" | "interface") if self.dialect.typescript => {
                    match self.parse_ts_declaration()? {
                        Some(declaration) => declaration,
                        None => self.parse_default_expression()?,
                    }
                }
                _ => self.parse_default_expression()?,
            };
            return Ok(self.alloc(NodeKind::ExportDefaultDeclaration { declaration }, start));
        }

        if self.eat(TokenKind::Star) {
            if self.eat_word("as") {
                self.bump();
            }
            self.expect_word("from")?;
            let source = self.string_literal()?;
            self.skip_import_attributes()?;
            self.consume_semicolon()?;
            return Ok(self.alloc(NodeKind::ExportAllDeclaration { source }, start));
        }

        if self.dialect.typescript && self.eat(TokenKind::Eq) {
            // `export = value`
            let declaration = self.parse_default_expression()?;
            return Ok(self.alloc(NodeKind::ExportDefaultDeclaration { declaration }, start));
        }

        if self.dialect.typescript && self.at_word("as") {
            // `export as namespace Lib;`
            self.bump();
            self.expect_word("namespace")?;
            let id = self.identifier()?;
            self.consume_semicolon()?;
            return Ok(self.alloc(
                NodeKind::TsDeclaration {
                    id: Some(id),
                    body: None,
                },
                start,
            ));
        }

        if self.at(TokenKind::LBrace) || (self.at_word("type") && self.peek().kind == TokenKind::LBrace) {
            self.eat_word("type");
            self.bump();
            let mut specifiers = Vec::new();
            while !self.at(TokenKind::RBrace) {
                if self.at_word("type") && self.type_modifier_applies() {
                    self.bump();
                }
                let local = self.bump();
                if !matches!(local.kind, TokenKind::Ident | TokenKind::String) {
                    return Err(ParseError::UnexpectedToken {
                        found: self.text(local).to_string(),
                        expected: "an export specifier",
                        range: local.range,
                    });
                }
                specifiers.push(self.ident_from(local));
                if self.eat_word("as") {
                    self.bump();
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RBrace, "`}`")?;
            let source = if self.eat_word("from") {
                let source = self.string_literal()?;
                self.skip_import_attributes()?;
                Some(source)
            } else {
                None
            };
            self.consume_semicolon()?;
            return Ok(self.alloc(
                NodeKind::ExportNamedDeclaration {
                    declaration: None,
                    specifiers,
                    source,
                },
                start,
            ));
        }

        let declaration = self.parse_statement()?;
        Ok(self.alloc(
            NodeKind::ExportNamedDeclaration {
                declaration: Some(declaration),
                specifiers: Vec::new(),
                source: None,
            },
            start,
        ))
    }

    fn parse_default_expression(&mut self) -> ParseResult<NodeId> {
        let expression = self.parse_assignment(false)?;
        self.consume_semicolon()?;
        Ok(expression)
    }

    // =========================================================================
    // Functions and classes
    // =========================================================================

    /// `function` declarations and expressions; `start` covers a leading `async`.
    pub(super) fn parse_function(&mut self, start: TextSize, is_async: bool, declaration: bool) -> ParseResult<NodeId> {
        self.expect_word("function")?;
        let is_generator = self.eat(TokenKind::Star);
        let id = if self.at(TokenKind::Ident) {
            Some(self.identifier()?)
        } else {
            None
        };
        let function = self.parse_function_rest(id, is_async, is_generator)?;
        let kind = if declaration {
            NodeKind::FunctionDeclaration(function)
        } else {
            NodeKind::FunctionExpression(function)
        };
        Ok(self.alloc(kind, start))
    }

    /// Type parameters, parameters, return type and body. TypeScript
    /// signatures without a body end at `;`.
    pub(super) fn parse_function_rest(
        &mut self,
        id: Option<NodeId>,
        is_async: bool,
        is_generator: bool,
    ) -> ParseResult<Function> {
        if self.dialect.typescript && self.at(TokenKind::Lt) {
            self.skip_type_parameters()?;
        }
        let params = self.parse_params()?;
        if self.dialect.typescript && self.eat(TokenKind::Colon) {
            self.skip_type()?;
        }
        let body = if self.at(TokenKind::LBrace) {
            Some(self.parse_function_body(is_generator)?)
        } else if self.dialect.typescript {
            self.consume_semicolon()?;
            None
        } else {
            return self.unexpected("a function body");
        };
        Ok(Function {
            id,
            params,
            body,
            is_async,
            is_generator,
        })
    }

    pub(super) fn parse_class(&mut self, start: TextSize, declaration: bool) -> ParseResult<NodeId> {
        self.expect_word("class")?;
        let id = if self.at(TokenKind::Ident) && !self.at_word("extends") && !self.at_word("implements") {
            Some(self.identifier()?)
        } else {
            None
        };
        if self.dialect.typescript && self.at(TokenKind::Lt) {
            self.skip_type_parameters()?;
        }
        let super_class = if self.eat_word("extends") {
            let super_class = self.parse_lhs_expression()?;
            if self.dialect.typescript && self.at(TokenKind::Lt) {
                self.skip_type_arguments()?;
            }
            Some(super_class)
        } else {
            None
        };
        if self.dialect.typescript && self.eat_word("implements") {
            loop {
                self.skip_type()?;
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let body = self.parse_class_body()?;
        let class = Class {
            id,
            super_class,
            body,
        };
        let kind = if declaration {
            NodeKind::ClassDeclaration(class)
        } else {
            NodeKind::ClassExpression(class)
        };
        Ok(self.alloc(kind, start))
    }

    fn parse_class_body(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut body = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            if self.at(TokenKind::Eof) {
                return self.unexpected("`}`");
            }
            if let Some(member) = self.nested(|p| p.parse_class_member())? {
                body.push(member);
            }
        }
        self.bump();
        Ok(self.alloc(NodeKind::ClassBody { body }, start))
    }

    /// A class element; TS index signatures produce no node.
    fn parse_class_member(&mut self) -> ParseResult<Option<NodeId>> {
        self.skip_decorators()?;
        let start = self.start();
        let mut is_static = false;
        let mut is_async = false;
        let mut accessor = None;

        while let Some(word) = self.current_word() {
            if !self.modifier_applies() {
                break;
            }
            match word {
                "static" if self.peek().kind == TokenKind::LBrace => {
                    self.bump();
                    let saved = std::mem::replace(&mut self.in_generator, false);
                    let body = self.parse_braced_statements()?;
                    self.in_generator = saved;
                    return Ok(Some(self.alloc(NodeKind::StaticBlock { body }, start)));
                }
                "static" => is_static = true,
                "async" => is_async = true,
                "get" => accessor = Some(MethodKind::Get),
                "set" => accessor = Some(MethodKind::Set),
                word if self.dialect.typescript && keywords::is_ts_modifier(word) => {}
                _ => break,
            }
            self.bump();
        }
        let is_generator = self.eat(TokenKind::Star);

        if self.dialect.typescript && self.at(TokenKind::LBracket) && self.at_index_signature() {
            self.skip_balanced()?;
            if self.eat(TokenKind::Colon) {
                self.skip_type()?;
            }
            self.consume_semicolon()?;
            return Ok(None);
        }

        let (key, computed) = self.parse_property_key()?;
        if self.dialect.typescript && !self.eat(TokenKind::Question) {
            self.eat(TokenKind::Bang);
        }

        if self.at(TokenKind::LParen) || self.at(TokenKind::Lt) {
            let function_start = self.start();
            let function = self.parse_function_rest(None, is_async, is_generator)?;
            let value = self.alloc(NodeKind::FunctionExpression(function), function_start);
            let is_constructor =
                !computed && !is_static && self.builder.get(key).and_then(|n| n.kind.identifier_name()) == Some("constructor");
            let kind = match accessor {
                Some(kind) => kind,
                None if is_constructor => MethodKind::Constructor,
                None => MethodKind::Method,
            };
            return Ok(Some(self.alloc(
                NodeKind::MethodDefinition {
                    key,
                    value,
                    kind,
                    computed,
                    is_static,
                },
                start,
            )));
        }

        if self.dialect.typescript && self.eat(TokenKind::Colon) {
            self.skip_type()?;
        }
        let value = if self.eat(TokenKind::Eq) {
            let saved = std::mem::replace(&mut self.in_generator, false);
            let value = self.parse_assignment(false)?;
            self.in_generator = saved;
            Some(value)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(Some(self.alloc(
            NodeKind::PropertyDefinition {
                key,
                value,
                computed,
                is_static,
            },
            start,
        )))
    }

    /// A member modifier word is followed by something that can name a member.
    fn modifier_applies(&self) -> bool {
        let next = self.peek();
        let names_member = matches!(
            next.kind,
            TokenKind::Ident
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::PrivateName
                | TokenKind::LBracket
                | TokenKind::Star
                | TokenKind::LBrace
        );
        names_member && !(self.at_word("async") && next.newline_before)
    }

    /// `[key: string]: T` as opposed to a computed member name.
    fn at_index_signature(&self) -> bool {
        self.peek().kind == TokenKind::Ident && self.peek_nth(2).kind == TokenKind::Colon
    }

    /// `name`, `"name"`, `1`, `#name` or `[expr]`; returns the key and whether
    /// it is computed.
    pub(super) fn parse_property_key(&mut self) -> ParseResult<(NodeId, bool)> {
        match self.token.kind {
            TokenKind::Ident => Ok((self.identifier()?, false)),
            TokenKind::String => Ok((self.string_literal()?, false)),
            TokenKind::Number => Ok((self.number_literal(), false)),
            TokenKind::PrivateName => Ok((self.private_name(), false)),
            TokenKind::LBracket => {
                self.bump();
                let key = self.parse_assignment(false)?;
                self.expect(TokenKind::RBracket, "`]`")?;
                Ok((key, true))
            }
            _ => self.unexpected("a property name"),
        }
    }

    /// Decorators carry no information the engine uses; their nodes are
    /// dropped again.
    pub(super) fn skip_decorators(&mut self) -> ParseResult<()> {
        while self.at(TokenKind::At) {
            let mark = self.builder.len();
            self.bump();
            self.parse_lhs_expression()?;
            self.builder.truncate(mark);
        }
        Ok(())
    }

    // =========================================================================
    // TypeScript declarations
    // =========================================================================

    /// `interface`, `type`, `enum`, `declare`, `namespace`/`module`,
    /// `global` and `abstract class`; `None` when the current word starts none
    /// of them.
    pub(super) fn parse_ts_declaration(&mut self) -> ParseResult<Option<NodeId>> {
        let start = self.start();
        let Some(word) = self.current_word() else {
            return Ok(None);
        };
        let next = self.peek();
        let name_follows = next.kind == TokenKind::Ident && !next.newline_before;

        let declaration = match word {
            "interface" if name_follows => {
                self.bump();
                let id = self.identifier()?;
                if self.at(TokenKind::Lt) {
                    self.skip_type_parameters()?;
                }
                if self.eat_word("extends") {
                    loop {
                        self.skip_type()?;
                        if !self.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.skip_balanced()?;
                NodeKind::TsDeclaration {
                    id: Some(id),
                    body: None,
                }
            }
            "type" if name_follows => {
                self.bump();
                let id = self.identifier()?;
                if self.at(TokenKind::Lt) {
                    self.skip_type_parameters()?;
                }
                self.expect(TokenKind::Eq, "`=`")?;
                self.skip_type()?;
                self.consume_semicolon()?;
                NodeKind::TsDeclaration {
                    id: Some(id),
                    body: None,
                }
            }
            "enum" if name_follows => return self.parse_ts_enum(start).map(Some),
            "abstract" if name_follows && self.text(next) == "class" => {
                self.bump();
                return self.parse_class(start, true).map(Some);
            }
            "declare" if name_follows => {
                self.bump();
                let body = self.parse_statement()?;
                NodeKind::TsDeclaration {
                    id: None,
                    body: Some(body),
                }
            }
            "namespace" | "module"
                if !next.newline_before && matches!(next.kind, TokenKind::Ident | TokenKind::String) =>
            {
                self.bump();
                let id = if self.at(TokenKind::String) {
                    self.string_literal()?
                } else {
                    let id = self.identifier()?;
                    while self.eat(TokenKind::Dot) {
                        self.identifier()?;
                    }
                    id
                };
                let body = if self.at(TokenKind::LBrace) {
                    Some(self.parse_block()?)
                } else {
                    self.consume_semicolon()?;
                    None
                };
                NodeKind::TsDeclaration { id: Some(id), body }
            }
            "global" if next.kind == TokenKind::LBrace => {
                self.bump();
                let body = self.parse_block()?;
                NodeKind::TsDeclaration {
                    id: None,
                    body: Some(body),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(self.alloc(declaration, start)))
    }

    fn parse_ts_enum(&mut self, start: TextSize) -> ParseResult<NodeId> {
        self.eat_word("const");
        self.expect_word("enum")?;
        let id = self.identifier()?;
        self.skip_balanced()?;
        Ok(self.alloc(
            NodeKind::TsDeclaration {
                id: Some(id),
                body: None,
            },
            start,
        ))
    }
}

fn closer_of(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::LParen => Some(TokenKind::RParen),
        TokenKind::LBracket => Some(TokenKind::RBracket),
        TokenKind::LBrace => Some(TokenKind::RBrace),
        _ => None,
    }
}
