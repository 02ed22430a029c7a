//! Source languages the parser accepts.

use std::path::Path;

/// A document language, as reported by an editor or derived from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Language {
    #[default]
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
    Vue,
    Svelte,
    Html,
}

/// Grammar switches derived from a [`Language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dialect {
    pub typescript: bool,
    pub jsx: bool,
}

impl Language {
    /// Map an editor language id (`javascriptreact`, `typescript`, …).
    pub fn from_language_id(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Some(Self::JavaScript),
            "javascriptreact" | "jsx" => Some(Self::Jsx),
            "typescript" | "ts" => Some(Self::TypeScript),
            "typescriptreact" | "tsx" => Some(Self::Tsx),
            "vue" => Some(Self::Vue),
            "svelte" => Some(Self::Svelte),
            "html" => Some(Self::Html),
            _ => None,
        }
    }

    /// Map a file extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "jsx" => Some(Self::Jsx),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "vue" => Some(Self::Vue),
            "svelte" => Some(Self::Svelte),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Languages whose scripts live inside `<script>` elements.
    pub fn is_embedded(self) -> bool {
        matches!(self, Self::Vue | Self::Svelte | Self::Html)
    }

    /// Grammar for a plain-script language. Embedded languages decide per
    /// script region, see [`super::script_region`].
    pub fn dialect(self) -> Dialect {
        match self {
            // Plain `.js` files routinely carry JSX.
            Self::JavaScript | Self::Jsx => Dialect {
                typescript: false,
                jsx: true,
            },
            Self::TypeScript => Dialect {
                typescript: true,
                jsx: false,
            },
            Self::Tsx => Dialect {
                typescript: true,
                jsx: true,
            },
            Self::Vue | Self::Svelte | Self::Html => Dialect::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("typescriptreact", Some(Language::Tsx))]
    #[case("JavaScript", Some(Language::JavaScript))]
    #[case("svelte", Some(Language::Svelte))]
    #[case("python", None)]
    fn test_from_language_id(#[case] id: &str, #[case] expected: Option<Language>) {
        assert_eq!(Language::from_language_id(id), expected);
    }

    #[rstest]
    #[case("app.mts", Some(Language::TypeScript))]
    #[case("App.vue", Some(Language::Vue))]
    #[case("index.cjs", Some(Language::JavaScript))]
    #[case("README", None)]
    fn test_from_path(#[case] path: &str, #[case] expected: Option<Language>) {
        assert_eq!(Language::from_path(Path::new(path)), expected);
    }

    #[test]
    fn test_typescript_has_no_jsx() {
        assert_eq!(
            Language::TypeScript.dialect(),
            Dialect {
                typescript: true,
                jsx: false
            }
        );
        assert!(Language::Tsx.dialect().jsx);
    }
}
