//! Rendered document tree — what directives emit and renderers consume.

use serde::Serialize;

use crate::context::ObjectEntry;

/// A fully built document.
#[derive(Debug, Default, Serialize)]
pub struct Document {
    pub name: String,
    /// Label of the domain the document was built with
    pub domain_label: String,
    pub nodes: Vec<Node>,
    /// Objects described in this document, sorted by full name
    pub objects: Vec<ObjectEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Index(IndexNode),
    Desc(DescNode),
    Paragraph { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexNode {
    pub entries: Vec<IndexRecord>,
}

/// One record for the index database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexRecord {
    pub kind: IndexKind,
    /// e.g. "consumer; Kafka"
    pub key: String,
    /// Canonical id the entry links to
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Single,
    Pair,
}

/// Heading of a description block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    /// Name as declared
    pub display_name: String,
    /// e.g. " (default: 5, unit: ms)", empty when there is nothing to show
    pub annotation: String,
    /// Local and fully-qualified names
    pub names: Vec<String>,
    pub full_name: String,
    pub ids: Vec<String>,
    /// Path the entry was declared under (container entries only)
    pub module: Option<String>,
    pub first: bool,
    pub noindex: bool,
}

impl Signature {
    /// Anchor target of this signature.
    pub fn id(&self) -> &str {
        self.ids.first().map(String::as_str).unwrap_or(&self.full_name)
    }
}

/// A described object: signature plus its nested content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescNode {
    pub domain: String,
    pub objtype: String,
    pub signature: Signature,
    pub content: Vec<Node>,
}

impl Document {
    /// All index records in document order, including nested ones.
    pub fn index_records(&self) -> Vec<&IndexRecord> {
        let mut out = Vec::new();
        collect_index_records(&self.nodes, &mut out);
        out
    }
}

fn collect_index_records<'a>(nodes: &'a [Node], out: &mut Vec<&'a IndexRecord>) {
    for node in nodes {
        match node {
            Node::Index(index) => out.extend(index.entries.iter()),
            Node::Desc(desc) => collect_index_records(&desc.content, out),
            Node::Paragraph { .. } => {}
        }
    }
}
