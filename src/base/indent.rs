//! Indentation settings for generated text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndentStyle {
    /// Number of spaces per indentation level (or tab width if using tabs)
    pub tab_size: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self {
            tab_size: 2,
            insert_spaces: true,
        }
    }
}

impl IndentStyle {
    /// One indentation level.
    pub fn unit(&self) -> String {
        self.indent(1)
    }

    /// Indentation string for the given level.
    pub fn indent(&self, level: usize) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size * level)
        } else {
            "\t".repeat(level)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_levels() {
        let spaces = IndentStyle::default();
        assert_eq!(spaces.indent(2), "    ");
        let tabs = IndentStyle {
            tab_size: 4,
            insert_spaces: false,
        };
        assert_eq!(tabs.unit(), "\t");
    }
}
