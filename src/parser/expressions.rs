//! Expression grammar
//!
//! Precedence climbing for binary operators, a loop for member / call
//! chains, and speculation for arrow function heads.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::{ParseError, ParseResult};
use super::keywords;
use super::lexer::{TemplateEnd, TokenKind};
use super::parser::Parser;
use crate::syntax::{LiteralKind, NodeId, NodeKind, PropertyKind};

impl Parser<'_> {
    /// Comma-separated expression list.
    pub(super) fn parse_expression(&mut self, no_in: bool) -> ParseResult<NodeId> {
        let start = self.start();
        let first = self.parse_assignment(no_in)?;
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(TokenKind::Comma) {
            expressions.push(self.parse_assignment(no_in)?);
        }
        Ok(self.alloc(NodeKind::SequenceExpression { expressions }, start))
    }

    pub(super) fn parse_assignment(&mut self, no_in: bool) -> ParseResult<NodeId> {
        self.nested(|p| p.parse_assignment_inner(no_in))
    }

    fn parse_assignment_inner(&mut self, no_in: bool) -> ParseResult<NodeId> {
        if let Some(arrow) = self.try_parse_arrow(no_in)? {
            return Ok(arrow);
        }
        if self.in_generator && self.at_word("yield") {
            return self.parse_yield(no_in);
        }

        let start = self.start();
        let left = self.parse_conditional(no_in)?;
        if !self.token.kind.is_assignment_operator() {
            return Ok(left);
        }
        let op = self.bump();
        if op.kind == TokenKind::Eq {
            self.to_pattern(left);
        }
        let operator = SmolStr::new(self.text(op));
        let right = self.parse_assignment(no_in)?;
        Ok(self.alloc(
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            },
            start,
        ))
    }

    fn parse_yield(&mut self, no_in: bool) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let delegate = self.eat(TokenKind::Star);
        let ends_here = self.token.newline_before
            || matches!(
                self.token.kind,
                TokenKind::RParen
                    | TokenKind::RBracket
                    | TokenKind::RBrace
                    | TokenKind::Comma
                    | TokenKind::Semicolon
                    | TokenKind::Colon
                    | TokenKind::Eof
            );
        let argument = if ends_here && !delegate {
            None
        } else {
            Some(self.parse_assignment(no_in)?)
        };
        Ok(self.alloc(NodeKind::YieldExpression { argument, delegate }, start))
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    fn try_parse_arrow(&mut self, no_in: bool) -> ParseResult<Option<NodeId>> {
        let start = self.start();
        match self.token.kind {
            TokenKind::Ident => {
                let word = self.text(self.token);
                let next = self.peek();
                if word == "async" && !next.newline_before {
                    if next.kind == TokenKind::Ident && self.peek_nth(2).kind == TokenKind::FatArrow {
                        self.bump();
                        let param = self.identifier()?;
                        self.bump();
                        return self.parse_arrow_body(start, vec![param], true, no_in).map(Some);
                    }
                    if next.kind == TokenKind::LParen || (self.dialect.typescript && next.kind == TokenKind::Lt) {
                        let checkpoint = self.checkpoint();
                        self.bump();
                        let arrow = self.speculate_arrow(start, true, no_in)?;
                        if arrow.is_none() {
                            self.restore(checkpoint);
                        }
                        return Ok(arrow);
                    }
                }
                if next.kind == TokenKind::FatArrow && !next.newline_before && !keywords::is_reserved(word) {
                    let param = self.identifier()?;
                    self.bump();
                    return self.parse_arrow_body(start, vec![param], false, no_in).map(Some);
                }
                Ok(None)
            }
            TokenKind::LParen => self.speculate_arrow(start, false, no_in),
            TokenKind::Lt if self.dialect.typescript => self.speculate_arrow(start, false, no_in),
            _ => Ok(None),
        }
    }

    /// Try `(params): ReturnType =>` at the current token; rewinds and
    /// returns `None` when the head does not parse.
    fn speculate_arrow(&mut self, start: TextSize, is_async: bool, no_in: bool) -> ParseResult<Option<NodeId>> {
        let head_start = self.start();
        if self.not_arrow.contains(&head_start) {
            return Ok(None);
        }
        let checkpoint = self.checkpoint();
        match self.parse_arrow_head() {
            Ok(params) => self.parse_arrow_body(start, params, is_async, no_in).map(Some),
            Err(_) => {
                self.restore(checkpoint);
                self.not_arrow.insert(head_start);
                Ok(None)
            }
        }
    }

    fn parse_arrow_head(&mut self) -> ParseResult<Vec<NodeId>> {
        if self.dialect.typescript && self.at(TokenKind::Lt) {
            self.skip_type_parameters()?;
        }
        let params = self.parse_params()?;
        if self.dialect.typescript && self.eat(TokenKind::Colon) {
            self.skip_type()?;
        }
        if self.token.newline_before || !self.at(TokenKind::FatArrow) {
            return self.unexpected("`=>`");
        }
        self.bump();
        Ok(params)
    }

    fn parse_arrow_body(
        &mut self,
        start: TextSize,
        params: Vec<NodeId>,
        is_async: bool,
        no_in: bool,
    ) -> ParseResult<NodeId> {
        let saved = std::mem::replace(&mut self.in_generator, false);
        let (body, expression) = if self.at(TokenKind::LBrace) {
            (self.parse_block()?, false)
        } else {
            (self.parse_assignment(no_in)?, true)
        };
        self.in_generator = saved;
        Ok(self.alloc(
            NodeKind::ArrowFunctionExpression {
                params,
                body,
                expression,
                is_async,
            },
            start,
        ))
    }

    // =========================================================================
    // Operators
    // =========================================================================

    fn parse_conditional(&mut self, no_in: bool) -> ParseResult<NodeId> {
        let start = self.start();
        let test = self.parse_binary(1, no_in)?;
        if !self.eat(TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.parse_assignment(false)?;
        self.expect(TokenKind::Colon, "`:`")?;
        let alternate = self.parse_assignment(no_in)?;
        Ok(self.alloc(
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            },
            start,
        ))
    }

    fn parse_binary(&mut self, min_precedence: u8, no_in: bool) -> ParseResult<NodeId> {
        let start = self.start();
        let mut left = self.parse_unary()?;
        while let Some((precedence, logical)) = self.binary_precedence(no_in) {
            if precedence < min_precedence {
                break;
            }
            let op = self.bump();
            let operator = self.text(op);

            if matches!(operator, "as" | "satisfies") {
                let type_annotation = self.parse_type_node()?;
                let kind = if operator == "as" {
                    NodeKind::TsAsExpression {
                        expression: left,
                        type_annotation,
                    }
                } else {
                    NodeKind::TsSatisfiesExpression {
                        expression: left,
                        type_annotation,
                    }
                };
                left = self.alloc(kind, start);
                continue;
            }

            // `**` is right-associative.
            let next_min = if op.kind == TokenKind::StarStar {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary(next_min, no_in)?;
            let operator = SmolStr::new(operator);
            let kind = if logical {
                NodeKind::LogicalExpression {
                    operator,
                    left,
                    right,
                }
            } else {
                NodeKind::BinaryExpression {
                    operator,
                    left,
                    right,
                }
            };
            left = self.alloc(kind, start);
        }
        Ok(left)
    }

    /// Precedence of the current token as a binary operator and whether it
    /// is a logical one.
    fn binary_precedence(&self, no_in: bool) -> Option<(u8, bool)> {
        use TokenKind::*;
        let precedence = match self.token.kind {
            QuestionQuestion | PipePipe => return Some((1, true)),
            AmpAmp => return Some((2, true)),
            Pipe => 3,
            Caret => 4,
            Amp => 5,
            EqEq | BangEq | EqEqEq | BangEqEq => 6,
            Lt | Gt | LtEq | GtEq => 7,
            LtLt | GtGt | GtGtGt => 8,
            Plus | Minus => 9,
            Star | Slash | Percent => 10,
            StarStar => 11,
            Ident => match self.text(self.token) {
                "instanceof" => 7,
                "in" if !no_in => 7,
                "as" | "satisfies" if self.dialect.typescript && !self.token.newline_before => 7,
                _ => return None,
            },
            _ => return None,
        };
        Some((precedence, false))
    }

    fn parse_unary(&mut self) -> ParseResult<NodeId> {
        self.nested(|p| p.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let word_operator = self
            .current_word()
            .filter(|word| keywords::is_unary_keyword(word));
        let is_operator = word_operator.is_some()
            || matches!(
                self.token.kind,
                TokenKind::Bang | TokenKind::Tilde | TokenKind::Plus | TokenKind::Minus
            );

        if is_operator {
            let op = self.bump();
            let operator = SmolStr::new(self.text(op));
            let argument = self.parse_unary()?;
            return Ok(self.alloc(NodeKind::UnaryExpression { operator, argument }, start));
        }

        if matches!(self.token.kind, TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let op = self.bump();
            let operator = SmolStr::new(self.text(op));
            let argument = self.parse_unary()?;
            return Ok(self.alloc(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: true,
                    argument,
                },
                start,
            ));
        }

        if self.at_word("await") && self.await_is_operator() {
            self.bump();
            let argument = self.parse_unary()?;
            return Ok(self.alloc(NodeKind::AwaitExpression { argument }, start));
        }

        if self.dialect.typescript && !self.dialect.jsx && self.at(TokenKind::Lt) {
            // `<Type>expression`
            self.bump();
            let type_annotation = self.parse_type_node()?;
            if !self.eat_gt() {
                return self.unexpected("`>`");
            }
            let expression = self.parse_unary()?;
            return Ok(self.alloc(
                NodeKind::TsTypeAssertion {
                    type_annotation,
                    expression,
                },
                start,
            ));
        }

        self.parse_postfix()
    }

    fn await_is_operator(&self) -> bool {
        !matches!(
            self.peek().kind,
            TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::Colon
                | TokenKind::Eq
                | TokenKind::Dot
                | TokenKind::QuestionDot
                | TokenKind::FatArrow
                | TokenKind::Eof
        )
    }

    fn parse_postfix(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let expression = self.parse_lhs_expression()?;
        if matches!(self.token.kind, TokenKind::PlusPlus | TokenKind::MinusMinus) && !self.token.newline_before {
            let op = self.bump();
            let operator = SmolStr::new(self.text(op));
            return Ok(self.alloc(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: false,
                    argument: expression,
                },
                start,
            ));
        }
        Ok(expression)
    }

    // =========================================================================
    // Member and call chains
    // =========================================================================

    /// A primary expression followed by any number of member accesses,
    /// calls and tagged templates. Chains with an optional link are wrapped
    /// in a `ChainExpression`.
    pub(super) fn parse_lhs_expression(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let mut expression = if self.at_word("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        let mut optional_chain = false;

        loop {
            let kind = match self.token.kind {
                TokenKind::Dot => {
                    self.bump();
                    let property = self.parse_member_name()?;
                    NodeKind::MemberExpression {
                        object: expression,
                        property,
                        computed: false,
                        optional: false,
                    }
                }
                TokenKind::QuestionDot => {
                    self.bump();
                    optional_chain = true;
                    if self.dialect.typescript && self.at(TokenKind::Lt) {
                        self.skip_type_arguments()?;
                    }
                    if self.at(TokenKind::LParen) {
                        let arguments = self.parse_arguments()?;
                        NodeKind::CallExpression {
                            callee: expression,
                            arguments,
                            optional: true,
                        }
                    } else if self.eat(TokenKind::LBracket) {
                        let property = self.parse_expression(false)?;
                        self.expect(TokenKind::RBracket, "`]`")?;
                        NodeKind::MemberExpression {
                            object: expression,
                            property,
                            computed: true,
                            optional: true,
                        }
                    } else {
                        let property = self.parse_member_name()?;
                        NodeKind::MemberExpression {
                            object: expression,
                            property,
                            computed: false,
                            optional: true,
                        }
                    }
                }
                TokenKind::LBracket => {
                    self.bump();
                    let property = self.parse_expression(false)?;
                    self.expect(TokenKind::RBracket, "`]`")?;
                    NodeKind::MemberExpression {
                        object: expression,
                        property,
                        computed: true,
                        optional: false,
                    }
                }
                TokenKind::LParen => {
                    let arguments = self.parse_arguments()?;
                    NodeKind::CallExpression {
                        callee: expression,
                        arguments,
                        optional: false,
                    }
                }
                TokenKind::Backtick => {
                    let quasi = self.parse_template()?;
                    NodeKind::TaggedTemplateExpression {
                        tag: expression,
                        quasi,
                    }
                }
                TokenKind::Bang if self.dialect.typescript && !self.token.newline_before => {
                    self.bump();
                    NodeKind::TsNonNullExpression { expression }
                }
                TokenKind::Lt if self.dialect.typescript => {
                    if self.try_skip_call_type_arguments() {
                        continue;
                    }
                    break;
                }
                _ => break,
            };
            expression = self.alloc(kind, start);
        }

        if optional_chain {
            expression = self.alloc(NodeKind::ChainExpression { expression }, start);
        }
        Ok(expression)
    }

    /// `f<T>(x)`: skip type arguments only when a call or template follows.
    fn try_skip_call_type_arguments(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if self.skip_type_arguments().is_ok() && matches!(self.token.kind, TokenKind::LParen | TokenKind::Backtick) {
            return true;
        }
        self.restore(checkpoint);
        false
    }

    fn parse_member_name(&mut self) -> ParseResult<NodeId> {
        match self.token.kind {
            TokenKind::Ident => self.identifier(),
            TokenKind::PrivateName => Ok(self.private_name()),
            _ => self.unexpected("a property name"),
        }
    }

    fn parse_new(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let new_token = self.bump();
        if self.eat(TokenKind::Dot) {
            let meta = self.ident_from(new_token);
            let property = self.identifier()?;
            return Ok(self.alloc(NodeKind::MetaProperty { meta, property }, start));
        }

        let callee_start = self.start();
        let mut callee = if self.at_word("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            let kind = match self.token.kind {
                TokenKind::Dot => {
                    self.bump();
                    let property = self.parse_member_name()?;
                    NodeKind::MemberExpression {
                        object: callee,
                        property,
                        computed: false,
                        optional: false,
                    }
                }
                TokenKind::LBracket => {
                    self.bump();
                    let property = self.parse_expression(false)?;
                    self.expect(TokenKind::RBracket, "`]`")?;
                    NodeKind::MemberExpression {
                        object: callee,
                        property,
                        computed: true,
                        optional: false,
                    }
                }
                _ => break,
            };
            callee = self.alloc(kind, callee_start);
        }
        if self.dialect.typescript && self.at(TokenKind::Lt) {
            let checkpoint = self.checkpoint();
            if self.skip_type_arguments().is_err() {
                self.restore(checkpoint);
            }
        }
        let arguments = if self.at(TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(self.alloc(NodeKind::NewExpression { callee, arguments }, start))
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<NodeId>> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut arguments = Vec::new();
        while !self.at(TokenKind::RParen) {
            arguments.push(if self.at(TokenKind::DotDotDot) {
                self.parse_spread()?
            } else {
                self.parse_assignment(false)?
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(arguments)
    }

    fn parse_spread(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let argument = self.parse_assignment(false)?;
        Ok(self.alloc(NodeKind::SpreadElement { argument }, start))
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        match self.token.kind {
            TokenKind::Ident => self.parse_word_primary(),
            TokenKind::Number => Ok(self.number_literal()),
            TokenKind::String => self.string_literal(),
            TokenKind::Backtick => self.parse_template(),
            TokenKind::PrivateName => Ok(self.private_name()),
            TokenKind::LParen => {
                self.bump();
                let expression = self.parse_expression(false)?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(self.alloc(NodeKind::ParenthesizedExpression { expression }, start))
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Slash | TokenKind::SlashEq => self.parse_regex(),
            TokenKind::Lt if self.dialect.jsx => self.parse_jsx_element(),
            TokenKind::At => {
                self.skip_decorators()?;
                self.parse_primary()
            }
            _ => self.unexpected("an expression"),
        }
    }

    fn parse_word_primary(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        match self.text(self.token) {
            "function" => self.parse_function(start, false, false),
            "async" if self.peek_is_function_on_same_line() => {
                self.bump();
                self.parse_function(start, true, false)
            }
            "class" => self.parse_class(start, false),
            "this" => {
                self.bump();
                Ok(self.alloc(NodeKind::ThisExpression, start))
            }
            "super" => {
                self.bump();
                Ok(self.alloc(NodeKind::Super, start))
            }
            "null" => {
                let token = self.bump();
                Ok(self.literal_from(token, LiteralKind::Null))
            }
            "true" | "false" => {
                let token = self.bump();
                Ok(self.literal_from(token, LiteralKind::Boolean))
            }
            "import" => {
                let import_token = self.bump();
                if self.eat(TokenKind::Dot) {
                    let meta = self.ident_from(import_token);
                    let property = self.identifier()?;
                    return Ok(self.alloc(NodeKind::MetaProperty { meta, property }, start));
                }
                self.expect(TokenKind::LParen, "`(`")?;
                let source = self.parse_assignment(false)?;
                if self.eat(TokenKind::Comma) && !self.at(TokenKind::RParen) {
                    self.parse_assignment(false)?;
                    self.eat(TokenKind::Comma);
                }
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(self.alloc(NodeKind::ImportExpression { source }, start))
            }
            _ => self.identifier(),
        }
    }

    pub(super) fn number_literal(&mut self) -> NodeId {
        let token = self.bump();
        let kind = if self.text(token).ends_with('n') {
            LiteralKind::BigInt
        } else {
            LiteralKind::Number
        };
        self.literal_from(token, kind)
    }

    pub(super) fn private_name(&mut self) -> NodeId {
        let token = self.bump();
        let name = SmolStr::new(self.text(token).trim_start_matches('#'));
        self.builder.alloc(NodeKind::PrivateName { name }, token.range)
    }

    fn parse_regex(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let end = self
            .lexer
            .scan_regex(start)
            .ok_or(ParseError::Unterminated {
                what: "regular expression",
                offset: start,
            })?;
        let raw = SmolStr::new(&self.source[TextRange::new(start, end)]);
        self.relex_at(end);
        Ok(self.alloc(
            NodeKind::Literal {
                kind: LiteralKind::RegExp,
                raw,
            },
            start,
        ))
    }

    /// A template literal starting at the current backtick. Chunks are
    /// scanned directly from the source; substitutions are parsed as
    /// ordinary expressions.
    pub(super) fn parse_template(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        let mut chunk_start = self.token.end();

        loop {
            let (chunk_end, end) = self
                .lexer
                .scan_template_chunk(chunk_start)
                .ok_or(ParseError::Unterminated {
                    what: "template literal",
                    offset: start,
                })?;
            let tail = end == TemplateEnd::Backtick;
            let range = TextRange::new(chunk_start, chunk_end);
            let raw = SmolStr::new(&self.source[range]);
            quasis.push(self.builder.alloc(NodeKind::TemplateElement { raw, tail }, range));
            if tail {
                self.relex_at(chunk_end + TextSize::new(1));
                break;
            }
            self.relex_at(chunk_end + TextSize::new(2));
            expressions.push(self.parse_expression(false)?);
            if !self.at(TokenKind::RBrace) {
                return self.unexpected("`}`");
            }
            chunk_start = self.token.end();
        }

        Ok(self.alloc(
            NodeKind::TemplateLiteral {
                quasis,
                expressions,
            },
            start,
        ))
    }

    fn parse_array_literal(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let mut elements = Vec::new();
        while !self.at(TokenKind::RBracket) {
            if self.eat(TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            let element = if self.at(TokenKind::DotDotDot) {
                self.parse_spread()?
            } else {
                self.parse_assignment(false)?
            };
            elements.push(Some(element));
            if !self.at(TokenKind::RBracket) {
                self.expect(TokenKind::Comma, "`,` or `]`")?;
            }
        }
        self.bump();
        Ok(self.alloc(NodeKind::ArrayExpression { elements }, start))
    }

    fn parse_object_literal(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let mut properties = Vec::new();
        while !self.at(TokenKind::RBrace) {
            properties.push(self.nested(|p| p.parse_object_member())?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(self.alloc(NodeKind::ObjectExpression { properties }, start))
    }

    fn parse_object_member(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        if self.at(TokenKind::DotDotDot) {
            return self.parse_spread();
        }

        let mut kind = PropertyKind::Init;
        let mut is_async = false;
        while let Some(word) = self.current_word() {
            if !matches!(word, "get" | "set" | "async") || !self.object_modifier_applies() {
                break;
            }
            match word {
                "get" => kind = PropertyKind::Get,
                "set" => kind = PropertyKind::Set,
                _ => is_async = true,
            }
            self.bump();
        }
        let is_generator = self.eat(TokenKind::Star);

        let key_token = self.token;
        let (key, computed) = self.parse_property_key()?;

        if self.at(TokenKind::LParen) || self.at(TokenKind::Lt) {
            let function_start = self.start();
            let function = self.parse_function_rest(None, is_async, is_generator)?;
            let value = self.alloc(NodeKind::FunctionExpression(function), function_start);
            return Ok(self.alloc(
                NodeKind::Property {
                    key,
                    value,
                    kind,
                    computed,
                    shorthand: false,
                    method: kind == PropertyKind::Init,
                },
                start,
            ));
        }

        if self.eat(TokenKind::Colon) {
            let value = self.parse_assignment(false)?;
            return Ok(self.alloc(
                NodeKind::Property {
                    key,
                    value,
                    kind,
                    computed,
                    shorthand: false,
                    method: false,
                },
                start,
            ));
        }

        // `{ a }` or, as an assignment target, `{ a = 1 }`.
        if key_token.kind != TokenKind::Ident || computed {
            return self.unexpected("`:`");
        }
        let mut value = self.ident_from(key_token);
        if self.eat(TokenKind::Eq) {
            let right = self.parse_assignment(false)?;
            value = self.alloc(NodeKind::AssignmentPattern { left: value, right }, start);
        }
        Ok(self.alloc(
            NodeKind::Property {
                key,
                value,
                kind,
                computed,
                shorthand: true,
                method: false,
            },
            start,
        ))
    }

    fn object_modifier_applies(&self) -> bool {
        let next = self.peek();
        let names_member = matches!(
            next.kind,
            TokenKind::Ident
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::PrivateName
                | TokenKind::LBracket
                | TokenKind::Star
        );
        names_member && !(self.at_word("async") && next.newline_before)
    }
}
