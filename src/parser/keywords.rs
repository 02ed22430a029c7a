//! Keyword tables.
//!
//! The lexer produces every word as an identifier; the parser consults these
//! tables to decide when a word acts as a keyword.

/// Words that can never be an identifier reference in expression position.
pub const RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
];

/// TypeScript modifiers on class members and constructor parameters.
pub const TS_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "readonly",
    "abstract",
    "override",
    "declare",
    "accessor",
];

/// Prefix operators spelled as words.
pub const UNARY_KEYWORDS: &[&str] = &["typeof", "void", "delete"];

pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

pub fn is_ts_modifier(word: &str) -> bool {
    TS_MODIFIERS.contains(&word)
}

pub fn is_unary_keyword(word: &str) -> bool {
    UNARY_KEYWORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_tables() {
        assert!(is_reserved("function"));
        assert!(!is_reserved("async"));
        assert!(is_ts_modifier("readonly"));
        assert!(is_unary_keyword("typeof"));
    }
}
