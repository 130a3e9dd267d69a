//! Markdown (MDX) renderer.
//!
//! Each description becomes a heading preceded by an explicit anchor, nested
//! descriptions one heading level deeper. The general index follows the body.

use anyhow::Result;
use std::slice;

use crate::index::build_index;
use crate::model::*;
use crate::render::Renderer;
use crate::toc::{self, escape_inline, Anchors};

pub struct MarkdownRenderer;

/// Heading level of top-level descriptions.
const BASE_LEVEL: usize = 3;
const MAX_LEVEL: usize = 6;

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let anchors = Anchors::for_document(doc);
        let mut output = String::new();
        render_nodes(&doc.nodes, 0, &mut anchors.in_order(), &mut output);

        let index = build_index(doc.index_records());
        if !index.is_empty() {
            output.push_str(&format!("## {}\n\n", index_title(&doc.domain_label)));
            for group in &index {
                output.push_str(&format!("### {}\n\n", group.letter));
                for term in &group.terms {
                    output.push_str(&toc::render_index_item(&term.term, &term.targets, 0, &anchors));
                    output.push('\n');
                    for sub in &term.subterms {
                        output.push_str(&toc::render_index_item(&sub.term, &sub.targets, 1, &anchors));
                        output.push('\n');
                    }
                }
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "mdx"
    }
}

fn index_title(label: &str) -> String {
    if label.is_empty() {
        "Index".to_string()
    } else {
        format!("{} Index", escape_inline(label))
    }
}

fn render_nodes(nodes: &[Node], depth: usize, ids: &mut slice::Iter<'_, String>, out: &mut String) {
    for node in nodes {
        match node {
            // Collected into the index section instead
            Node::Index(_) => {}
            Node::Paragraph { text } => {
                out.push_str(text);
                out.push_str("\n\n");
            }
            Node::Desc(desc) => render_desc(desc, depth, ids, out),
        }
    }
}

fn render_desc(desc: &DescNode, depth: usize, ids: &mut slice::Iter<'_, String>, out: &mut String) {
    let sig = &desc.signature;
    let level = (BASE_LEVEL + depth).min(MAX_LEVEL);
    let anchor = ids.next().cloned().unwrap_or_else(|| toc::slug(sig.id()));

    out.push_str(&format!("<a id=\"{}\"></a>\n\n", anchor));
    out.push_str(&format!("{} {}", "#".repeat(level), escape_inline(&sig.display_name)));
    let annotation = sig.annotation.trim();
    if !annotation.is_empty() {
        out.push_str(&format!(" _{}_", escape_inline(annotation)));
    }
    out.push_str("\n\n");

    // Show the qualified name when the heading alone doesn't
    if sig.display_name != sig.full_name {
        out.push_str(&format!("`{}`\n\n", sig.full_name));
    }

    render_nodes(&desc.content, depth + 1, ids, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_document;

    fn render(src: &str) -> String {
        let doc = build_document("doc", src).unwrap();
        MarkdownRenderer.render(&doc).unwrap()
    }

    #[test]
    fn plugin_with_option() {
        let out = render(
            ".. plugin:: consumer.Kafka\n\n   Reads Kafka.\n\n   .. option:: Topic\n      :default: logs\n",
        );
        let expected = "\
<a id=\"consumer-kafka\"></a>

### consumer.Kafka

Reads Kafka.

<a id=\"consumer-kafka-topic\"></a>

#### Topic _(default: logs)_

`consumer.Kafka.Topic`

## Gollum Index

### C

* consumer
  * [Kafka](#consumer-kafka)
* consumer.Kafka
  * [Topic](#consumer-kafka-topic)

### K

* Kafka
  * [consumer](#consumer-kafka)

";
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_document() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn paragraph_only() {
        assert_eq!(render("Just text."), "Just text.\n\n");
    }

    #[test]
    fn angle_brackets_escaped() {
        let out = render(".. option:: Map<string>\n");
        assert!(out.contains("### Map\\<string\\>"));
    }

    #[test]
    fn emphasis_characters_escaped() {
        let out = render(".. option:: Match_Field\n   :default: .*\n   :from: a_b\n");
        assert!(out.contains("### Match\\_Field _(default: .\\*, from: a\\_b)_\n"));
    }

    #[test]
    fn colliding_anchors_are_distinct() {
        let out = render(
            "\
.. plugin:: p.X

   .. option:: Batch Timeout

   .. option:: Batch.Timeout

   .. option:: batch-timeout
",
        );
        assert!(out.contains("<a id=\"p-x-batch-timeout\"></a>\n\n#### Batch Timeout\n"));
        assert!(out.contains("<a id=\"p-x-batch-timeout-2\"></a>\n\n#### Batch.Timeout\n"));
        assert!(out.contains("<a id=\"p-x-batch-timeout-3\"></a>\n\n#### batch-timeout\n"));
        assert!(out.contains("  * [Batch Timeout](#p-x-batch-timeout)\n"));
        assert!(out.contains("  * [Batch.Timeout](#p-x-batch-timeout-2)\n"));
        assert!(out.contains("  * [batch-timeout](#p-x-batch-timeout-3)\n"));
    }

    #[test]
    fn index_heading_uses_domain_label() {
        let domain = crate::domain::Domain::with_plugin_directives(crate::domain::DomainConfig {
            name: "gollum".into(),
            label: "Pipeline".into(),
        });
        let doc = crate::builder::DocumentBuilder::new(&domain)
            .build("doc", ".. plugin:: a.B\n")
            .unwrap();
        let out = MarkdownRenderer.render(&doc).unwrap();
        assert!(out.contains("## Pipeline Index\n"));
    }
}
