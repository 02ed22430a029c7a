//! JSX elements.
//!
//! Element text is not tokenizable as JavaScript, so children, tag names and
//! attribute strings are scanned straight from the source and the lexer is
//! repositioned after each piece.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::{ParseError, ParseResult};
use super::lexer::TokenKind;
use super::parser::Parser;
use crate::syntax::{LiteralKind, NodeId, NodeKind};

impl Parser<'_> {
    pub(super) fn parse_jsx_element(&mut self) -> ParseResult<NodeId> {
        self.nested(|p| p.parse_jsx_element_inner())
    }

    fn parse_jsx_element_inner(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.expect(TokenKind::Lt, "`<`")?;
        let name = self.parse_jsx_name();
        if name.is_some() && self.dialect.typescript && self.at(TokenKind::Lt) {
            self.skip_type_arguments()?;
        }

        let mut attributes = Vec::new();
        loop {
            match self.token.kind {
                TokenKind::Slash => {
                    self.bump();
                    if !self.eat_gt() {
                        return self.unexpected("`>`");
                    }
                    return Ok(self.alloc(
                        NodeKind::JsxElement {
                            name,
                            attributes,
                            children: Vec::new(),
                        },
                        start,
                    ));
                }
                kind if kind.starts_with_gt() => {
                    self.prev_end = self.token.start() + TextSize::new(1);
                    break;
                }
                TokenKind::LBrace => attributes.push(self.parse_jsx_spread_attribute()?),
                TokenKind::Ident => attributes.push(self.parse_jsx_attribute()?),
                TokenKind::Eof => {
                    return Err(ParseError::Unterminated {
                        what: "JSX element",
                        offset: start,
                    });
                }
                _ => return self.unexpected("a JSX attribute"),
            }
        }

        let children = self.parse_jsx_children(start)?;
        Ok(self.alloc(
            NodeKind::JsxElement {
                name,
                attributes,
                children,
            },
            start,
        ))
    }

    /// A tag name such as `div`, `my-widget`, `svg:rect` or `Foo.Bar`;
    /// `None` for fragments.
    fn parse_jsx_name(&mut self) -> Option<SmolStr> {
        if !self.at(TokenKind::Ident) {
            return None;
        }
        let start = self.token.start();
        let end = self.lexer.scan_jsx_name(start);
        let name = SmolStr::new(&self.source[TextRange::new(start, end)]);
        self.relex_at(end);
        Some(name)
    }

    fn parse_jsx_attribute(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let end = self.lexer.scan_jsx_name(start);
        let name = SmolStr::new(&self.source[TextRange::new(start, end)]);
        self.relex_at(end);

        let value = if self.at(TokenKind::Eq) {
            let value_start = self.skip_jsx_whitespace(self.token.end());
            match self.source[usize::from(value_start)..].chars().next() {
                Some('"' | '\'') => {
                    let value_end = self
                        .lexer
                        .scan_jsx_string(value_start)
                        .ok_or(ParseError::Unterminated {
                            what: "JSX attribute string",
                            offset: value_start,
                        })?;
                    let range = TextRange::new(value_start, value_end);
                    let raw = SmolStr::new(&self.source[range]);
                    self.relex_at(value_end);
                    Some(self.builder.alloc(
                        NodeKind::Literal {
                            kind: LiteralKind::String,
                            raw,
                        },
                        range,
                    ))
                }
                Some('{') => {
                    self.relex_at(value_start);
                    Some(self.parse_jsx_expression_container()?)
                }
                Some('<') => {
                    self.relex_at(value_start);
                    Some(self.parse_jsx_element()?)
                }
                _ => {
                    self.relex_at(value_start);
                    return self.unexpected("a JSX attribute value");
                }
            }
        } else {
            None
        };

        Ok(self.alloc(NodeKind::JsxAttribute { name, value }, start))
    }

    fn parse_jsx_spread_attribute(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump();
        self.expect(TokenKind::DotDotDot, "`...`")?;
        let argument = self.parse_assignment(false)?;
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(self.alloc(NodeKind::JsxSpreadAttribute { argument }, start))
    }

    fn parse_jsx_expression_container(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.expect(TokenKind::LBrace, "`{`")?;
        let expression = if self.at(TokenKind::RBrace) {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(self.alloc(NodeKind::JsxExpressionContainer { expression }, start))
    }

    /// Children up to and including the closing tag; the opening tag's `>`
    /// ends at `prev_end`.
    fn parse_jsx_children(&mut self, element_start: TextSize) -> ParseResult<Vec<NodeId>> {
        let mut children = Vec::new();
        let mut pos = self.prev_end;
        loop {
            let text_end = self.lexer.scan_jsx_text(pos);
            if text_end > pos {
                children.push(self.builder.alloc(NodeKind::JsxText, TextRange::new(pos, text_end)));
            }
            match self.source[usize::from(text_end)..].chars().next() {
                None => {
                    return Err(ParseError::Unterminated {
                        what: "JSX element",
                        offset: element_start,
                    });
                }
                Some('{') => {
                    self.relex_at(text_end);
                    children.push(self.parse_jsx_expression_container()?);
                }
                Some(_) => {
                    let after_lt = self.skip_jsx_whitespace(text_end + TextSize::new(1));
                    if self.source[usize::from(after_lt)..].starts_with('/') {
                        self.relex_at(after_lt + TextSize::new(1));
                        if self.at(TokenKind::Ident) {
                            let name_end = self.lexer.scan_jsx_name(self.token.start());
                            self.relex_at(name_end);
                        }
                        if !self.eat_gt() {
                            return self.unexpected("`>`");
                        }
                        return Ok(children);
                    }
                    self.relex_at(text_end);
                    children.push(self.parse_jsx_element()?);
                }
            }
            pos = self.prev_end;
        }
    }

    fn skip_jsx_whitespace(&self, from: TextSize) -> TextSize {
        let rest = &self.source[usize::from(from)..];
        let skipped = rest.len() - rest.trim_start().len();
        from + TextSize::new(skipped as u32)
    }
}
