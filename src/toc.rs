//! Anchor slugs and index links.

use std::collections::{HashMap, HashSet};
use std::slice;

use crate::model::{Document, Node};

/// Anchor slug for a canonical id.
///
/// - lowercase
/// - `.` and whitespace become `-`
/// - everything that isn't alphanumeric, `-` or `_` is stripped
///
/// Distinct ids can share a slug; [`Anchors`] disambiguates them per document.
pub fn slug(id: &str) -> String {
    let mut slug = String::with_capacity(id.len());
    for c in id.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            slug.push(c);
        } else if c == '.' || c.is_whitespace() {
            slug.push('-');
        }
    }
    slug
}

/// Unique anchors for every description block of one document.
///
/// Blocks are numbered in document order (a block before its nested content).
/// The first block whose slug is taken keeps it, later ones get `-2`, `-3`, ...
#[derive(Debug, Default)]
pub struct Anchors {
    ordered: Vec<String>,
    by_id: HashMap<String, String>,
}

impl Anchors {
    pub fn for_document(doc: &Document) -> Self {
        let mut anchors = Self::default();
        let mut used = HashSet::new();
        anchors.assign(&doc.nodes, &mut used);
        anchors
    }

    fn assign(&mut self, nodes: &[Node], used: &mut HashSet<String>) {
        for node in nodes {
            let Node::Desc(desc) = node else { continue };
            let id = desc.signature.id();
            let base = slug(id);
            let mut anchor = base.clone();
            let mut n = 2;
            while used.contains(&anchor) {
                anchor = format!("{}-{}", base, n);
                n += 1;
            }
            used.insert(anchor.clone());
            // A repeated id links to its first description
            self.by_id.entry(id.to_string()).or_insert_with(|| anchor.clone());
            self.ordered.push(anchor);
            self.assign(&desc.content, used);
        }
    }

    /// Anchors in the order renderers meet description blocks.
    pub fn in_order(&self) -> slice::Iter<'_, String> {
        self.ordered.iter()
    }

    /// Anchor an index entry pointing at `id` links to.
    pub fn target(&self, id: &str) -> String {
        self.by_id.get(id).cloned().unwrap_or_else(|| slug(id))
    }
}

/// Backslash-escape characters that would start markdown emphasis, code,
/// links or JSX.
pub fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '<' | '>' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Markdown link to the anchor of `target`.
pub fn render_index_link(text: &str, target: &str, anchors: &Anchors) -> String {
    format!("[{}](#{})", escape_inline(text), anchors.target(target))
}

/// Markdown list item for an index term and its targets.
///
/// One target links the term itself; several are listed after it.
pub fn render_index_item(text: &str, targets: &[String], indent: usize, anchors: &Anchors) -> String {
    let pad = "  ".repeat(indent);
    match targets {
        [] => format!("{}* {}", pad, escape_inline(text)),
        [only] => format!("{}* {}", pad, render_index_link(text, only, anchors)),
        many => {
            let links: Vec<String> = many
                .iter()
                .enumerate()
                .map(|(i, t)| render_index_link(&(i + 1).to_string(), t, anchors))
                .collect();
            format!("{}* {} {}", pad, escape_inline(text), links.join(", "))
        }
    }
}
