//! Log statement rendering and insertion.
//!
//! Turns a [`LogPointAnalysis`] into the text of a debug statement such as
//!
//! ```text
//! console.log("🚀 ~ Person ~ greet ~ name:", name);
//! ```
//!
//! and splices it into the document at the analyzed line.

use crate::base::{SourceDocument, TextDocument};
use crate::checkers::DEEP_OBJECT_PATH;
use crate::engine::LogPointAnalysis;

/// How generated log statements look.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageOptions {
    /// Function called with the label and the value.
    pub log_function: String,
    /// First segment of the label.
    pub prefix: String,
    /// Separator between label segments.
    pub delimiter: String,
    /// Quote used around the label.
    pub quote: char,
    pub include_class_name: bool,
    pub include_function_name: bool,
    pub add_semicolon: bool,
    /// Blank line above the statement
    pub empty_line_before: bool,
    /// Blank line below the statement
    pub empty_line_after: bool,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            log_function: "console.log".to_string(),
            prefix: "🚀".to_string(),
            delimiter: "~".to_string(),
            quote: '"',
            include_class_name: true,
            include_function_name: true,
            add_semicolon: true,
            empty_line_before: false,
            empty_line_after: false,
        }
    }
}

/// A rendered log statement and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    /// 0-indexed line the statement takes.
    pub line: u32,
    pub indentation: String,
    /// The statement without indentation.
    pub statement: String,
}

impl LogMessage {
    pub fn new(analysis: &LogPointAnalysis, options: &MessageOptions) -> Self {
        let context = &analysis.enclosing_context;
        let variable = analysis.selection.variable.as_str();

        let mut segments: Vec<&str> = Vec::with_capacity(4);
        if !options.prefix.is_empty() {
            segments.push(&options.prefix);
        }
        if options.include_class_name && !context.class_name.is_empty() {
            segments.push(&context.class_name);
        }
        if options.include_function_name && !context.function_name.is_empty() {
            segments.push(&context.function_name);
        }
        segments.push(variable);

        let separator = format!(" {} ", options.delimiter);
        let label = escape(&format!("{}:", segments.join(separator.as_str())), options.quote);
        let expression = analysis
            .metadata
            .get(DEEP_OBJECT_PATH)
            .map_or(variable, String::as_str);

        let mut statement = format!(
            "{function}({quote}{label}{quote}, {expression})",
            function = options.log_function,
            quote = options.quote,
        );
        if options.add_semicolon {
            statement.push(';');
        }

        Self {
            line: analysis.insertion_line,
            indentation: analysis.indentation.clone(),
            statement,
        }
    }

    /// Lines to insert, blank padding included.
    pub fn lines(&self, options: &MessageOptions) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);
        if options.empty_line_before {
            lines.push(String::new());
        }
        lines.push(format!("{}{}", self.indentation, self.statement));
        if options.empty_line_after {
            lines.push(String::new());
        }
        lines
    }
}

fn escape(label: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        if c == '\\' || c == quote {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Insert the log statement for `analysis` into `source`. When the analysis
/// carries a transformation, the statement goes into the transformed source.
pub fn insert_log_statement(source: &str, analysis: &LogPointAnalysis, options: &MessageOptions) -> String {
    let base = analysis
        .transformation
        .as_ref()
        .map_or(source, |transformation| transformation.source.as_str());
    let message = LogMessage::new(analysis, options);
    let document = SourceDocument::new(base);

    let eol = if base.contains("\r\n") { "\r\n" } else { "\n" };
    let line = message.line.min(document.line_count());
    let offset = document
        .line_index()
        .line_start(line)
        .map_or(base.len(), usize::from);

    let lines = message.lines(options);
    let block = if offset == base.len() && !base.is_empty() && !base.ends_with('\n') {
        format!("{eol}{}", lines.join(eol))
    } else {
        lines.iter().map(|line| format!("{line}{eol}")).collect()
    };

    tracing::debug!("inserting `{}` at line {}", message.statement, line);
    let mut output = String::with_capacity(base.len() + block.len());
    output.push_str(&base[..offset]);
    output.push_str(&block);
    output.push_str(&base[offset..]);
    output
}
