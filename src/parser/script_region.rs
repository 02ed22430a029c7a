//! `<script>` regions of Vue, Svelte and HTML documents.
//!
//! Script text is handed to the parser in place: everything outside the
//! chosen region(s) is blanked with spaces while line breaks are kept, so
//! byte offsets and line numbers of the parsed tree match the document.

use text_size::{TextRange, TextSize};

use super::errors::{ParseError, ParseResult};
use super::language::Dialect;

/// Content range of one `<script>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRegion {
    pub range: TextRange,
    pub dialect: Dialect,
}

/// All executable `<script>` elements in `source`, in document order.
pub fn script_regions(source: &str) -> Vec<ScriptRegion> {
    let lower = source.to_ascii_lowercase();
    let mut regions = Vec::new();
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find("<script") {
        let tag_start = cursor + found;
        let after_name = tag_start + "<script".len();
        // `<scripts>` or `<script-foo>` are other elements.
        if lower[after_name..]
            .chars()
            .next()
            .is_some_and(|c| !(c.is_ascii_whitespace() || c == '>' || c == '/'))
        {
            cursor = after_name;
            continue;
        }
        let Some(tag_end) = lower[after_name..].find('>').map(|i| after_name + i) else {
            break;
        };
        let attributes = &lower[after_name..tag_end];
        let content_start = tag_end + 1;
        let content_end = lower[content_start..]
            .find("</script")
            .map_or(source.len(), |i| content_start + i);
        cursor = content_end;

        if attributes.trim_end().ends_with('/') {
            continue;
        }
        let Some(dialect) = dialect_of(attributes) else {
            continue;
        };
        regions.push(ScriptRegion {
            range: TextRange::new(
                TextSize::new(content_start as u32),
                TextSize::new(content_end as u32),
            ),
            dialect,
        });
    }

    regions
}

/// Dialect selected by a script tag's attributes, `None` for non-script
/// payloads such as `type="application/json"`.
fn dialect_of(attributes: &str) -> Option<Dialect> {
    let lang = attribute_value(attributes, "lang");
    let ty = attribute_value(attributes, "type");

    match ty.as_deref() {
        None | Some("") | Some("module") | Some("text/javascript")
        | Some("application/javascript") | Some("text/typescript") | Some("text/babel") => {}
        Some(_) => return None,
    }

    let dialect = match lang.as_deref().or(ty.as_deref()) {
        Some("ts") | Some("typescript") | Some("text/typescript") => Dialect {
            typescript: true,
            jsx: false,
        },
        Some("tsx") => Dialect {
            typescript: true,
            jsx: true,
        },
        Some("jsx") | Some("text/babel") => Dialect {
            typescript: false,
            jsx: true,
        },
        _ => Dialect::default(),
    };
    Some(dialect)
}

fn attribute_value(attributes: &str, name: &str) -> Option<String> {
    let mut rest = attributes;
    while let Some(idx) = rest.find(name) {
        let before_ok = idx == 0
            || rest[..idx]
                .chars()
                .last()
                .is_some_and(|c| c.is_ascii_whitespace());
        let after = rest[idx + name.len()..].trim_start();
        if let Some(value) = after.strip_prefix('=').filter(|_| before_ok) {
            let value = value.trim_start();
            let mut chars = value.chars();
            return Some(match chars.next() {
                Some(quote @ ('"' | '\'')) => chars.take_while(|c| *c != quote).collect(),
                _ => value
                    .chars()
                    .take_while(|c| !c.is_ascii_whitespace())
                    .collect(),
            });
        }
        rest = &rest[idx + name.len()..];
    }
    None
}

/// Reduce an embedded-language document to script text.
///
/// With a selection line only the region containing it is kept; a line
/// outside every region is [`ParseError::OutsideScriptRegion`]. Without one,
/// every region is kept and the first region's dialect wins.
pub fn extract_script(source: &str, selection_line: Option<u32>) -> ParseResult<(String, Dialect)> {
    let regions = script_regions(source);

    let selected: Vec<ScriptRegion> = match selection_line {
        Some(line) => {
            let region = regions
                .iter()
                .find(|region| {
                    let first = line_of(source, region.range.start());
                    let last = line_of(source, region.range.end());
                    (first..=last).contains(&line)
                })
                .copied()
                .ok_or(ParseError::OutsideScriptRegion { line })?;
            vec![region]
        }
        None => regions,
    };

    let dialect = selected
        .first()
        .map(|region| region.dialect)
        .unwrap_or_default();
    Ok((blank_outside(source, &selected), dialect))
}

fn line_of(source: &str, offset: TextSize) -> u32 {
    source[..u32::from(offset) as usize]
        .bytes()
        .filter(|b| *b == b'\n')
        .count() as u32
}

/// Replace every byte outside `keep` with a space, preserving line breaks
/// and the byte length of multi-byte characters.
fn blank_outside(source: &str, keep: &[ScriptRegion]) -> String {
    let mut out = String::with_capacity(source.len());
    for (offset, c) in source.char_indices() {
        let offset = TextSize::new(offset as u32);
        if keep.iter().any(|region| region.range.contains(offset)) || matches!(c, '\n' | '\r') {
            out.push(c);
        } else {
            out.extend(std::iter::repeat_n(' ', c.len_utf8()));
        }
    }
    out
}
