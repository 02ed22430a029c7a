//! Logos-based lexer for JavaScript / TypeScript
//!
//! The lexer is lazy and restartable: the parser asks for one token at a time
//! and may reposition the lexer to rescan context-sensitive constructs
//! (regular expressions, template chunks, JSX text) that a context-free
//! tokenizer can not classify.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// Token kinds seen by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    PrivateName,
    Number,
    String,
    Backtick,

    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    DotDotDot,
    Question,
    QuestionDot,
    QuestionQuestion,
    Colon,
    At,
    FatArrow,

    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    BangEq,
    EqEqEq,
    BangEqEq,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    PlusPlus,
    MinusMinus,
    LtLt,
    GtGt,
    GtGtGt,
    Amp,
    Pipe,
    Caret,
    Bang,
    Tilde,
    AmpAmp,
    PipePipe,

    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    StarStarEq,
    LtLtEq,
    GtGtEq,
    GtGtGtEq,
    AmpEq,
    PipeEq,
    CaretEq,
    AmpAmpEq,
    PipePipeEq,
    QuestionQuestionEq,

    /// A character sequence no rule matches.
    Error,
    Eof,
}

impl TokenKind {
    /// Assignment operators, including compound ones.
    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::PlusEq
                | Self::MinusEq
                | Self::StarEq
                | Self::SlashEq
                | Self::PercentEq
                | Self::StarStarEq
                | Self::LtLtEq
                | Self::GtGtEq
                | Self::GtGtGtEq
                | Self::AmpEq
                | Self::PipeEq
                | Self::CaretEq
                | Self::AmpAmpEq
                | Self::PipePipeEq
                | Self::QuestionQuestionEq
        )
    }

    /// Tokens that begin with `>`; type argument lists split them.
    pub fn starts_with_gt(self) -> bool {
        matches!(
            self,
            Self::Gt | Self::GtEq | Self::GtGt | Self::GtGtGt | Self::GtGtEq | Self::GtGtGtEq
        )
    }
}

/// A token with its kind, range and whether a line break precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
    pub newline_before: bool,
}

impl Token {
    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    pub fn end(&self) -> TextSize {
        self.range.end()
    }
}

/// How a template chunk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateEnd {
    /// The closing backtick.
    Backtick,
    /// A `${` substitution opener.
    Substitution,
}

/// Restartable lexer over a source string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let pos = if source.starts_with("#!") {
            source.find('\n').unwrap_or(source.len())
        } else {
            0
        };
        Self { source, pos }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn position(&self) -> TextSize {
        TextSize::new(self.pos as u32)
    }

    /// Continue lexing from `offset`.
    pub fn reset(&mut self, offset: TextSize) {
        self.pos = (u32::from(offset) as usize).min(self.source.len());
    }

    /// Next significant token; trivia is skipped and recorded as
    /// `newline_before`.
    pub fn next_token(&mut self) -> Token {
        let mut newline_before = false;
        loop {
            if self.pos >= self.source.len() {
                let end = TextSize::new(self.source.len() as u32);
                return Token {
                    kind: TokenKind::Eof,
                    range: TextRange::empty(end),
                    newline_before: true,
                };
            }

            let start = self.pos;
            let rest = &self.source[start..];
            let mut inner = LogosToken::lexer(rest);
            let (token, mut len) = match inner.next() {
                Some(Ok(token)) => (Some(token), inner.span().end),
                Some(Err(())) => (None, inner.span().end.max(1)),
                None => (None, rest.len()),
            };

            let kind = match token {
                Some(LogosToken::Whitespace) | Some(LogosToken::LineComment) => {
                    newline_before |= rest[..len].contains(['\n', '\r', '\u{2028}', '\u{2029}']);
                    self.pos += len;
                    continue;
                }
                Some(LogosToken::BlockComment) => {
                    newline_before |= rest[..len].contains('\n');
                    self.pos += len;
                    continue;
                }
                Some(LogosToken::Ident) => {
                    len = extend_identifier(rest, len);
                    TokenKind::Ident
                }
                Some(LogosToken::QuestionDot)
                    if rest.as_bytes().get(2).is_some_and(u8::is_ascii_digit) =>
                {
                    // `a ?.5 : b` is a conditional, not an optional chain.
                    len = 1;
                    TokenKind::Question
                }
                Some(token) => token.into(),
                None => match scan_unicode_identifier(rest) {
                    Some(ident_len) => {
                        len = ident_len;
                        TokenKind::Ident
                    }
                    None => {
                        len = rest.chars().next().map_or(1, char::len_utf8).max(len.min(1));
                        TokenKind::Error
                    }
                },
            };

            self.pos += len;
            return Token {
                kind,
                range: TextRange::new(TextSize::new(start as u32), TextSize::new(self.pos as u32)),
                newline_before,
            };
        }
    }

    /// Scan a regular expression literal whose opening `/` is at `start`.
    /// Returns the end offset (after the flags).
    pub fn scan_regex(&self, start: TextSize) -> Option<TextSize> {
        let bytes = self.source.as_bytes();
        let mut i = u32::from(start) as usize + 1;
        let mut in_class = false;
        loop {
            match bytes.get(i)? {
                b'\n' | b'\r' => return None,
                b'\\' => i += 2,
                b'[' => {
                    in_class = true;
                    i += 1;
                }
                b']' => {
                    in_class = false;
                    i += 1;
                }
                b'/' if !in_class => {
                    i += 1;
                    break;
                }
                _ => i += 1,
            }
        }
        while bytes.get(i).is_some_and(|b| b.is_ascii_alphanumeric()) {
            i += 1;
        }
        Some(TextSize::new(i as u32))
    }

    /// Scan template characters from `start` up to the closing backtick or
    /// the next `${`. Returns the chunk end (before the terminator).
    pub fn scan_template_chunk(&self, start: TextSize) -> Option<(TextSize, TemplateEnd)> {
        let bytes = self.source.as_bytes();
        let mut i = u32::from(start) as usize;
        loop {
            match bytes.get(i)? {
                b'\\' => i += 2,
                b'`' => return Some((TextSize::new(i as u32), TemplateEnd::Backtick)),
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    return Some((TextSize::new(i as u32), TemplateEnd::Substitution));
                }
                _ => i += 1,
            }
        }
    }

    /// Skip a whole template literal (opening backtick at `start`), including
    /// nested substitutions, without building nodes. Returns the end offset.
    pub fn skip_template(&self, start: TextSize) -> Option<TextSize> {
        let bytes = self.source.as_bytes();
        let mut i = u32::from(start) as usize + 1;
        let mut braces: Vec<usize> = Vec::new();
        loop {
            match bytes.get(i)? {
                b'\\' => i += 2,
                b'`' if braces.is_empty() => return Some(TextSize::new(i as u32 + 1)),
                b'`' => {
                    // A template nested inside a substitution.
                    let nested = self.skip_template(TextSize::new(i as u32))?;
                    i = u32::from(nested) as usize;
                }
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    braces.push(0);
                    i += 2;
                }
                b'{' if !braces.is_empty() => {
                    if let Some(depth) = braces.last_mut() {
                        *depth += 1;
                    }
                    i += 1;
                }
                b'}' if !braces.is_empty() => {
                    match braces.last_mut() {
                        Some(0) => {
                            braces.pop();
                        }
                        Some(depth) => *depth -= 1,
                        None => {}
                    }
                    i += 1;
                }
                _ => i += 1,
            }
        }
    }

    /// Scan JSX text from `start` up to the next `<` or `{`.
    pub fn scan_jsx_text(&self, start: TextSize) -> TextSize {
        let rest = &self.source[u32::from(start) as usize..];
        let len = rest.find(['<', '{']).unwrap_or(rest.len());
        start + TextSize::new(len as u32)
    }

    /// Scan a JSX tag or attribute name (`div`, `data-id`, `svg:rect`,
    /// `Foo.Bar`) starting at `start`.
    pub fn scan_jsx_name(&self, start: TextSize) -> TextSize {
        let rest = &self.source[u32::from(start) as usize..];
        let len = rest
            .char_indices()
            .find(|(_, c)| !(unicode_ident::is_xid_continue(*c) || matches!(c, '$' | '-' | ':' | '.')))
            .map_or(rest.len(), |(idx, _)| idx);
        start + TextSize::new(len as u32)
    }

    /// Scan a JSX attribute string (quote at `start`). Unlike JS strings it
    /// may span lines and has no escapes.
    pub fn scan_jsx_string(&self, start: TextSize) -> Option<TextSize> {
        let rest = &self.source[u32::from(start) as usize..];
        let quote = rest.chars().next()?;
        let close = rest[1..].find(quote)?;
        Some(start + TextSize::new(close as u32 + 2))
    }
}

/// Extend an ASCII identifier match with trailing non-ASCII identifier
/// characters.
fn extend_identifier(rest: &str, len: usize) -> usize {
    let tail = &rest[len..];
    let extra = tail
        .char_indices()
        .find(|(_, c)| !(unicode_ident::is_xid_continue(*c) || *c == '$' || matches!(c, '\u{200C}' | '\u{200D}')))
        .map_or(tail.len(), |(idx, _)| idx);
    len + extra
}

/// Identifiers that start with a non-ASCII character.
fn scan_unicode_identifier(rest: &str) -> Option<usize> {
    let first = rest.chars().next()?;
    if first.is_ascii() || !unicode_ident::is_xid_start(first) {
        return None;
    }
    Some(extend_identifier(rest, first.len_utf8()))
}

/// Tokenize an entire string into a Vec (up to, not including, EOF).
#[allow(dead_code)]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    std::iter::from_fn(|| {
        let token = lexer.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    })
    .collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\x0B\x0C\u{A0}\u{FEFF}\u{2028}\u{2029}]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"#[a-zA-Z_$][a-zA-Z0-9_$]*")]
    PrivateName,

    #[regex(r"0[xX][0-9a-fA-F_]+n?")]
    #[regex(r"0[bB][01_]+n?")]
    #[regex(r"0[oO][0-7_]+n?")]
    #[regex(r"[0-9][0-9_]*n")]
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9][0-9_]*)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\(.|\n)|\\\r\n)*""#)]
    #[regex(r#"'([^'\\\n]|\\(.|\n)|\\\r\n)*'"#)]
    String,

    #[token("`")]
    Backtick,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    DotDotDot,
    #[token("?")]
    Question,
    #[token("?.")]
    QuestionDot,
    #[token("??")]
    QuestionQuestion,
    #[token(":")]
    Colon,
    #[token("@")]
    At,
    #[token("=>")]
    FatArrow,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    BangEqEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("**")]
    StarStar,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token(">>>")]
    GtGtGt,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // =========================================================================
    // ASSIGNMENT
    // =========================================================================
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("**=")]
    StarStarEq,
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,
    #[token(">>>=")]
    GtGtGtEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("&&=")]
    AmpAmpEq,
    #[token("||=")]
    PipePipeEq,
    #[token("??=")]
    QuestionQuestionEq,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace | LogosToken::LineComment | LogosToken::BlockComment => {
                TokenKind::Error
            }
            LogosToken::Ident => TokenKind::Ident,
            LogosToken::PrivateName => TokenKind::PrivateName,
            LogosToken::Number => TokenKind::Number,
            LogosToken::String => TokenKind::String,
            LogosToken::Backtick => TokenKind::Backtick,
            LogosToken::LBrace => TokenKind::LBrace,
            LogosToken::RBrace => TokenKind::RBrace,
            LogosToken::LParen => TokenKind::LParen,
            LogosToken::RParen => TokenKind::RParen,
            LogosToken::LBracket => TokenKind::LBracket,
            LogosToken::RBracket => TokenKind::RBracket,
            LogosToken::Semicolon => TokenKind::Semicolon,
            LogosToken::Comma => TokenKind::Comma,
            LogosToken::Dot => TokenKind::Dot,
            LogosToken::DotDotDot => TokenKind::DotDotDot,
            LogosToken::Question => TokenKind::Question,
            LogosToken::QuestionDot => TokenKind::QuestionDot,
            LogosToken::QuestionQuestion => TokenKind::QuestionQuestion,
            LogosToken::Colon => TokenKind::Colon,
            LogosToken::At => TokenKind::At,
            LogosToken::FatArrow => TokenKind::FatArrow,
            LogosToken::Lt => TokenKind::Lt,
            LogosToken::Gt => TokenKind::Gt,
            LogosToken::LtEq => TokenKind::LtEq,
            LogosToken::GtEq => TokenKind::GtEq,
            LogosToken::EqEq => TokenKind::EqEq,
            LogosToken::BangEq => TokenKind::BangEq,
            LogosToken::EqEqEq => TokenKind::EqEqEq,
            LogosToken::BangEqEq => TokenKind::BangEqEq,
            LogosToken::Plus => TokenKind::Plus,
            LogosToken::Minus => TokenKind::Minus,
            LogosToken::Star => TokenKind::Star,
            LogosToken::Slash => TokenKind::Slash,
            LogosToken::Percent => TokenKind::Percent,
            LogosToken::StarStar => TokenKind::StarStar,
            LogosToken::PlusPlus => TokenKind::PlusPlus,
            LogosToken::MinusMinus => TokenKind::MinusMinus,
            LogosToken::LtLt => TokenKind::LtLt,
            LogosToken::GtGt => TokenKind::GtGt,
            LogosToken::GtGtGt => TokenKind::GtGtGt,
            LogosToken::Amp => TokenKind::Amp,
            LogosToken::Pipe => TokenKind::Pipe,
            LogosToken::Caret => TokenKind::Caret,
            LogosToken::Bang => TokenKind::Bang,
            LogosToken::Tilde => TokenKind::Tilde,
            LogosToken::AmpAmp => TokenKind::AmpAmp,
            LogosToken::PipePipe => TokenKind::PipePipe,
            LogosToken::Eq => TokenKind::Eq,
            LogosToken::PlusEq => TokenKind::PlusEq,
            LogosToken::MinusEq => TokenKind::MinusEq,
            LogosToken::StarEq => TokenKind::StarEq,
            LogosToken::SlashEq => TokenKind::SlashEq,
            LogosToken::PercentEq => TokenKind::PercentEq,
            LogosToken::StarStarEq => TokenKind::StarStarEq,
            LogosToken::LtLtEq => TokenKind::LtLtEq,
            LogosToken::GtGtEq => TokenKind::GtGtEq,
            LogosToken::GtGtGtEq => TokenKind::GtGtGtEq,
            LogosToken::AmpEq => TokenKind::AmpEq,
            LogosToken::PipeEq => TokenKind::PipeEq,
            LogosToken::CaretEq => TokenKind::CaretEq,
            LogosToken::AmpAmpEq => TokenKind::AmpAmpEq,
            LogosToken::PipePipeEq => TokenKind::PipePipeEq,
            LogosToken::QuestionQuestionEq => TokenKind::QuestionQuestionEq,
        }
    }
}
