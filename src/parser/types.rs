//! TypeScript types.
//!
//! Types never influence where a log line goes, so they are recognized only
//! far enough to find where they end. Where the tree needs a node for a type
//! (`x as T`, `<T>x`) it gets an opaque [`NodeKind::TsType`].

use super::errors::{ParseError, ParseResult};
use super::lexer::TokenKind;
use super::parser::Parser;
use crate::syntax::{NodeId, NodeKind};

impl Parser<'_> {
    pub(super) fn parse_type_node(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.skip_type()?;
        Ok(self.alloc(NodeKind::TsType, start))
    }

    pub(super) fn skip_type(&mut self) -> ParseResult<()> {
        self.nested(|p| p.skip_union_type(true))
    }

    /// `A | B & C`, optionally followed by `extends X ? Y : Z`.
    fn skip_union_type(&mut self, allow_conditional: bool) -> ParseResult<()> {
        if matches!(self.token.kind, TokenKind::Pipe | TokenKind::Amp) {
            self.bump();
        }
        self.skip_type_operand()?;
        while matches!(self.token.kind, TokenKind::Pipe | TokenKind::Amp) {
            self.bump();
            self.skip_type_operand()?;
        }

        if allow_conditional && self.at_word("extends") && !self.token.newline_before {
            self.bump();
            self.nested(|p| p.skip_union_type(false))?;
            self.expect(TokenKind::Question, "`?`")?;
            self.skip_type()?;
            self.expect(TokenKind::Colon, "`:`")?;
            self.skip_type()?;
        }
        Ok(())
    }

    fn skip_type_operand(&mut self) -> ParseResult<()> {
        while let Some(word) = self.current_word() {
            let prefix = matches!(
                word,
                "keyof" | "typeof" | "unique" | "readonly" | "infer" | "asserts"
            );
            if !prefix || !starts_type(self.peek().kind) {
                break;
            }
            self.bump();
        }

        match self.token.kind {
            TokenKind::LParen => {
                // Parenthesized type or function type.
                self.skip_balanced()?;
                if self.eat(TokenKind::FatArrow) {
                    return self.skip_type();
                }
            }
            TokenKind::Lt => {
                // Generic function type.
                self.skip_type_parameters()?;
                self.skip_balanced()?;
                self.expect(TokenKind::FatArrow, "`=>`")?;
                return self.skip_type();
            }
            TokenKind::LBrace | TokenKind::LBracket => self.skip_balanced()?,
            TokenKind::String | TokenKind::Number => {
                self.bump();
            }
            TokenKind::Minus => {
                self.bump();
                self.expect(TokenKind::Number, "a number")?;
            }
            TokenKind::Backtick => {
                let start = self.start();
                let end = self
                    .lexer
                    .skip_template(start)
                    .ok_or(ParseError::Unterminated {
                        what: "template literal type",
                        offset: start,
                    })?;
                self.relex_at(end);
            }
            TokenKind::Ident => {
                let word = self.text(self.token);
                if matches!(word, "new" | "abstract")
                    && matches!(self.peek().kind, TokenKind::LParen | TokenKind::Lt | TokenKind::Ident)
                {
                    // Constructor type: `new (x: T) => U`, `abstract new () => U`.
                    self.bump();
                    self.eat_word("new");
                    if self.at(TokenKind::Lt) {
                        self.skip_type_parameters()?;
                    }
                    self.skip_balanced()?;
                    self.expect(TokenKind::FatArrow, "`=>`")?;
                    return self.skip_type();
                }
                self.bump();
                if word == "import" && self.at(TokenKind::LParen) {
                    self.skip_balanced()?;
                }
                while self.eat(TokenKind::Dot) {
                    self.expect(TokenKind::Ident, "a type name")?;
                }
                if self.at(TokenKind::Lt) && !self.token.newline_before {
                    self.skip_type_arguments()?;
                }
                if self.at_word("is") && !self.token.newline_before {
                    // Type predicate `x is T`.
                    self.bump();
                    return self.skip_type();
                }
            }
            _ => return self.unexpected("a type"),
        }

        // Array types and indexed access.
        while self.at(TokenKind::LBracket) && !self.token.newline_before {
            self.skip_balanced()?;
        }
        Ok(())
    }

    /// `<A, B<C>>` after a type or callee name.
    pub(super) fn skip_type_arguments(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::Lt, "`<`")?;
        if self.eat_gt() {
            return Ok(());
        }
        loop {
            self.skip_type()?;
            if !self.eat(TokenKind::Comma) {
                break;
            }
            if self.token.kind.starts_with_gt() {
                break;
            }
        }
        if self.eat_gt() {
            Ok(())
        } else {
            self.unexpected("`>`")
        }
    }

    /// `<const T extends U = V, in out K>` on a declaration.
    pub(super) fn skip_type_parameters(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::Lt, "`<`")?;
        loop {
            if self.token.kind.starts_with_gt() {
                break;
            }
            while matches!(self.current_word(), Some("const" | "in" | "out"))
                && self.peek().kind == TokenKind::Ident
            {
                self.bump();
            }
            self.expect(TokenKind::Ident, "a type parameter")?;
            if self.eat_word("extends") {
                self.skip_type()?;
            }
            if self.eat(TokenKind::Eq) {
                self.skip_type()?;
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if self.eat_gt() {
            Ok(())
        } else {
            self.unexpected("`>`")
        }
    }
}

fn starts_type(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::LBrace
            | TokenKind::String
            | TokenKind::Number
            | TokenKind::Backtick
            | TokenKind::Minus
            | TokenKind::Lt
    )
}
