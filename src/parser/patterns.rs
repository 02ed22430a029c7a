//! Binding patterns, parameter lists and assignment-target conversion.

use super::errors::ParseResult;
use super::keywords;
use super::lexer::TokenKind;
use super::parser::Parser;
use crate::syntax::{NodeId, NodeKind, PropertyKind};

impl Parser<'_> {
    /// An identifier, object pattern or array pattern.
    pub(super) fn parse_binding_target(&mut self) -> ParseResult<NodeId> {
        self.nested(|p| match p.token.kind {
            TokenKind::LBracket => p.parse_array_pattern(),
            TokenKind::LBrace => p.parse_object_pattern(),
            TokenKind::Ident => p.identifier(),
            _ => p.unexpected("a binding name or pattern"),
        })
    }

    /// A binding target with an optional `= default`.
    fn parse_binding_element(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let target = self.parse_binding_target()?;
        if !self.eat(TokenKind::Eq) {
            return Ok(target);
        }
        let right = self.parse_assignment(false)?;
        Ok(self.alloc(NodeKind::AssignmentPattern { left: target, right }, start))
    }

    fn parse_rest_element(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let argument = self.parse_binding_target()?;
        Ok(self.alloc(NodeKind::RestElement { argument }, start))
    }

    fn parse_array_pattern(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let mut elements = Vec::new();
        while !self.at(TokenKind::RBracket) {
            if self.eat(TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            let element = if self.at(TokenKind::DotDotDot) {
                self.parse_rest_element()?
            } else {
                self.parse_binding_element()?
            };
            elements.push(Some(element));
            if !self.at(TokenKind::RBracket) {
                self.expect(TokenKind::Comma, "`,` or `]`")?;
            }
        }
        self.bump();
        Ok(self.alloc(NodeKind::ArrayPattern { elements }, start))
    }

    fn parse_object_pattern(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        let mut properties = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.at(TokenKind::DotDotDot) {
                properties.push(self.parse_rest_element()?);
            } else {
                let property_start = self.start();
                let key_token = self.token;
                let (key, computed) = self.parse_property_key()?;
                let shorthand = !self.at(TokenKind::Colon);
                let value = if self.eat(TokenKind::Colon) {
                    self.parse_binding_element()?
                } else if key_token.kind == TokenKind::Ident && !computed {
                    let value = self.ident_from(key_token);
                    if self.eat(TokenKind::Eq) {
                        let right = self.parse_assignment(false)?;
                        self.alloc(NodeKind::AssignmentPattern { left: value, right }, property_start)
                    } else {
                        value
                    }
                } else {
                    return self.unexpected("`:`");
                };
                properties.push(self.alloc(
                    NodeKind::Property {
                        key,
                        value,
                        kind: PropertyKind::Init,
                        computed,
                        shorthand,
                        method: false,
                    },
                    property_start,
                ));
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(self.alloc(NodeKind::ObjectPattern { properties }, start))
    }

    /// `(a, { b } = {}, ...rest)`, including TypeScript annotations and
    /// parameter properties.
    pub(super) fn parse_params(&mut self) -> ParseResult<Vec<NodeId>> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut params = Vec::new();
        while !self.at(TokenKind::RParen) {
            params.push(self.parse_param()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(params)
    }

    fn parse_param(&mut self) -> ParseResult<NodeId> {
        self.skip_decorators()?;
        let start = self.start();

        let mut is_property = false;
        if self.dialect.typescript {
            while let Some(word) = self.current_word() {
                let next = self.peek();
                let modifies = keywords::is_ts_modifier(word)
                    && matches!(
                        next.kind,
                        TokenKind::Ident | TokenKind::LBrace | TokenKind::LBracket
                    );
                if !modifies {
                    break;
                }
                self.bump();
                is_property = true;
            }
        }

        let param = if self.at(TokenKind::DotDotDot) {
            let rest = self.parse_rest_element()?;
            self.skip_param_annotation()?;
            rest
        } else {
            let target = self.parse_binding_target()?;
            self.skip_param_annotation()?;
            if self.eat(TokenKind::Eq) {
                let right = self.parse_assignment(false)?;
                self.alloc(NodeKind::AssignmentPattern { left: target, right }, start)
            } else {
                target
            }
        };

        if is_property {
            return Ok(self.alloc(NodeKind::TsParameterProperty { parameter: param }, start));
        }
        Ok(param)
    }

    fn skip_param_annotation(&mut self) -> ParseResult<()> {
        if self.dialect.typescript {
            self.eat(TokenKind::Question);
            if self.eat(TokenKind::Colon) {
                self.skip_type()?;
            }
        }
        Ok(())
    }

    /// Reinterpret an expression parsed before `=`, `of` or `in` as an
    /// assignment target: object / array literals become patterns, `a = b`
    /// inside them becomes a default, spreads become rest elements.
    pub(super) fn to_pattern(&mut self, root: NodeId) {
        let mut work = vec![root];
        while let Some(id) = work.pop() {
            let Some(node) = self.builder.get_mut(id) else {
                continue;
            };
            let converted = match &node.kind {
                NodeKind::ObjectExpression { properties } => {
                    work.extend(properties.iter().copied());
                    Some(NodeKind::ObjectPattern {
                        properties: properties.clone(),
                    })
                }
                NodeKind::ArrayExpression { elements } => {
                    work.extend(elements.iter().flatten().copied());
                    Some(NodeKind::ArrayPattern {
                        elements: elements.clone(),
                    })
                }
                NodeKind::Property { value, .. } => {
                    work.push(*value);
                    None
                }
                NodeKind::SpreadElement { argument } => {
                    work.push(*argument);
                    Some(NodeKind::RestElement { argument: *argument })
                }
                NodeKind::AssignmentExpression {
                    operator,
                    left,
                    right,
                } if operator == "=" => {
                    work.push(*left);
                    Some(NodeKind::AssignmentPattern {
                        left: *left,
                        right: *right,
                    })
                }
                NodeKind::AssignmentPattern { left, .. } => {
                    work.push(*left);
                    None
                }
                _ => None,
            };
            if let Some(kind) = converted {
                node.kind = kind;
            }
        }
    }
}
