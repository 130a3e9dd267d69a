//! Minimal directive markup reader.
//!
//! Recognizes explicit directive blocks and plain paragraphs, nothing more:
//!
//! ```text
//! .. gollum:plugin:: consumer.Kafka
//!
//!    Reads messages from a Kafka topic.
//!
//!    .. gollum:option:: Topic
//!       :default: default
//!
//!       Topic to read from.
//! ```
//!
//! Directive content is kept as raw, dedented lines. It is only parsed when the
//! directive asks for it, so nesting follows the directive's own control flow.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::MarkupError;

// `.. domain:name:: argument` (domain prefix optional)
static RE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.\.[ \t]+(?:([A-Za-z0-9_-]+):)?([A-Za-z0-9_-]+)::(?:[ \t]+(.*))?$").unwrap()
});

// Any other explicit markup start is a comment.
static RE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\.\.(?:[ \t]|$)").unwrap());

static RE_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([A-Za-z0-9_-]+):(?:[ \t]+(.*))?$").unwrap());

/// Raw lines of a content region and where they start in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub lines: Vec<String>,
    /// Zero-based source line of `lines[0]`
    pub offset: usize,
}

impl Content {
    pub fn from_source(source: &str) -> Self {
        Self {
            lines: source.lines().map(str::to_string).collect(),
            offset: 0,
        }
    }

    /// 1-based source line number of `lines[index]`.
    fn line_number(&self, index: usize) -> usize {
        self.offset + index + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph { text: String, line: usize },
    Directive(DirectiveBlock),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBlock {
    pub domain: Option<String>,
    pub name: String,
    /// Trimmed argument text, interior whitespace preserved
    pub argument: String,
    pub options: Vec<(String, String)>,
    pub content: Content,
    pub line: usize,
}

impl DirectiveBlock {
    /// `domain:name` or just `name`.
    pub fn qualified_name(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{}:{}", domain, self.name),
            None => self.name.clone(),
        }
    }
}

/// Split one content region into top-level blocks.
pub fn parse_blocks(content: &Content) -> Result<Vec<Block>, MarkupError> {
    let lines = &content.lines;
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        if is_blank(line) {
            i += 1;
            continue;
        }
        if indentation(line) > 0 {
            return Err(MarkupError::UnexpectedIndent {
                line: content.line_number(i),
            });
        }

        if let Some(caps) = RE_DIRECTIVE.captures(line) {
            let end = indented_block_end(lines, i + 1);
            let (options, body) = split_options(&lines[i + 1..end], content.offset + i + 1)?;
            blocks.push(Block::Directive(DirectiveBlock {
                domain: caps.get(1).map(|m| m.as_str().to_string()),
                name: caps[2].to_string(),
                argument: caps
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
                options,
                content: body,
                line: content.line_number(i),
            }));
            i = end;
            continue;
        }

        if RE_COMMENT.is_match(line) {
            i = indented_block_end(lines, i + 1);
            continue;
        }

        // Paragraph: runs until a blank line or the next explicit markup start
        let start = i;
        let mut text: Vec<&str> = Vec::new();
        while i < lines.len() && !is_blank(&lines[i]) {
            let l = &lines[i];
            if indentation(l) > 0 {
                return Err(MarkupError::UnexpectedIndent {
                    line: content.line_number(i),
                });
            }
            if i > start && RE_COMMENT.is_match(l) {
                break;
            }
            text.push(l.trim());
            i += 1;
        }
        blocks.push(Block::Paragraph {
            text: text.join(" "),
            line: content.line_number(start),
        });
    }

    Ok(blocks)
}

/// Split a directive body into its option list and dedented content.
/// `offset` is the zero-based source line of `body[0]`.
fn split_options(
    body: &[String],
    offset: usize,
) -> Result<(Vec<(String, String)>, Content), MarkupError> {
    let mut options = Vec::new();
    let mut k = 0;

    while k < body.len() && !is_blank(&body[k]) {
        let trimmed = body[k].trim();
        if !trimmed.starts_with(':') {
            break;
        }
        let caps = RE_OPTION
            .captures(trimmed)
            .ok_or_else(|| MarkupError::BadOption {
                line: offset + k + 1,
                text: trimmed.to_string(),
            })?;
        let value = caps.get(2).map_or("", |m| m.as_str()).trim();
        options.push((caps[1].to_string(), value.to_string()));
        k += 1;
    }

    while k < body.len() && is_blank(&body[k]) {
        k += 1;
    }

    let rest = &body[k..];
    let indent = rest
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| indentation(l))
        .min()
        .unwrap_or(0);
    let lines = rest
        .iter()
        .map(|l| {
            if is_blank(l) {
                String::new()
            } else {
                l[indent..].to_string()
            }
        })
        .collect();

    Ok((
        options,
        Content {
            lines,
            offset: offset + k,
        },
    ))
}

/// Index one past the last line of the indented block starting at `from`.
/// Trailing blank lines are not part of the block.
fn indented_block_end(lines: &[String], from: usize) -> usize {
    let mut end = from;
    while end < lines.len() && (is_blank(&lines[end]) || indentation(&lines[end]) > 0) {
        end += 1;
    }
    while end > from && is_blank(&lines[end - 1]) {
        end -= 1;
    }
    end
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Leading whitespace width in bytes (spaces and tabs count as one each).
fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}
