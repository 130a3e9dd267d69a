//! HTML renderer — standalone HTML page with semantic markup.

use anyhow::Result;
use std::slice;

use crate::index::{build_index, IndexGroup};
use crate::model::*;
use crate::render::Renderer;
use crate::toc::{self, Anchors};

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        if doc.domain_label.is_empty() {
            out.push_str(&format!("<title>{}</title>\n", html_escape(&doc.name)));
        } else {
            out.push_str(&format!(
                "<title>{} ({})</title>\n",
                html_escape(&doc.name),
                html_escape(&doc.domain_label)
            ));
        }
        out.push_str("<style>\n");
        out.push_str("body { font-family: system-ui, sans-serif; max-width: 48em; margin: 2em auto; padding: 0 1em; }\n");
        out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
        out.push_str("dt { font-weight: bold; margin-top: 0.5em; }\n");
        out.push_str("dd { margin-left: 1.5em; }\n");
        out.push_str(".annotation { font-weight: normal; font-style: italic; color: #555; }\n");
        out.push_str(".fullname { font-weight: normal; font-size: 0.85em; color: #777; }\n");
        out.push_str("</style>\n");
        out.push_str("</head>\n<body>\n");

        let anchors = Anchors::for_document(doc);
        render_nodes(&doc.nodes, &mut anchors.in_order(), &mut out);

        let index = build_index(doc.index_records());
        if !index.is_empty() {
            out.push_str(&render_index(&index, &doc.domain_label, &anchors));
        }

        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn render_nodes(nodes: &[Node], ids: &mut slice::Iter<'_, String>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Index(_) => {}
            Node::Paragraph { text } => {
                out.push_str(&format!("<p>{}</p>\n", html_escape(text)));
            }
            Node::Desc(desc) => render_desc(desc, ids, out),
        }
    }
}

fn render_desc(desc: &DescNode, ids: &mut slice::Iter<'_, String>, out: &mut String) {
    let sig = &desc.signature;
    let anchor = ids.next().cloned().unwrap_or_else(|| toc::slug(sig.id()));

    out.push_str(&format!(
        "<dl class=\"{} {}\">\n",
        html_escape(&desc.domain),
        html_escape(&desc.objtype)
    ));
    out.push_str(&format!(
        "<dt id=\"{}\"><code>{}</code>",
        html_escape(&anchor),
        html_escape(&sig.display_name)
    ));
    if !sig.annotation.is_empty() {
        out.push_str(&format!(
            "<span class=\"annotation\">{}</span>",
            html_escape(&sig.annotation)
        ));
    }
    if sig.display_name != sig.full_name {
        out.push_str(&format!(
            " <span class=\"fullname\">{}</span>",
            html_escape(&sig.full_name)
        ));
    }
    out.push_str("</dt>\n<dd>\n");
    render_nodes(&desc.content, ids, out);
    out.push_str("</dd>\n</dl>\n");
}

fn render_index(index: &[IndexGroup], label: &str, anchors: &Anchors) -> String {
    let mut out = if label.is_empty() {
        String::from("<h2>Index</h2>\n")
    } else {
        format!("<h2>{} Index</h2>\n", html_escape(label))
    };
    for group in index {
        out.push_str(&format!("<h3>{}</h3>\n<ul>\n", html_escape(&group.letter)));
        for term in &group.terms {
            out.push_str(&format!("  <li>{}", render_item(&term.term, &term.targets, anchors)));
            if !term.subterms.is_empty() {
                out.push_str("\n    <ul>\n");
                for sub in &term.subterms {
                    out.push_str(&format!(
                        "      <li>{}</li>\n",
                        render_item(&sub.term, &sub.targets, anchors)
                    ));
                }
                out.push_str("    </ul>\n  ");
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n");
    }
    out
}

fn render_item(text: &str, targets: &[String], anchors: &Anchors) -> String {
    let link = |label: &str, target: &str| {
        format!(
            "<a href=\"#{}\">{}</a>",
            html_escape(&anchors.target(target)),
            html_escape(label)
        )
    };
    match targets {
        [] => html_escape(text),
        [only] => link(text, only),
        many => {
            let links: Vec<String> = many
                .iter()
                .enumerate()
                .map(|(i, t)| link(&(i + 1).to_string(), t))
                .collect();
            format!("{} {}", html_escape(text), links.join(", "))
        }
    }
}

/// Escape text for element content and double- or single-quoted attributes.
fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_document;

    #[test]
    fn description_and_index() {
        let doc = build_document(
            "kafka",
            ".. plugin:: consumer.Kafka\n\n   .. option:: Topic\n      :unit: name\n\n      A <topic>.\n",
        )
        .unwrap();
        let out = HtmlRenderer.render(&doc).unwrap();

        assert!(out.contains("<title>kafka (Gollum)</title>"));
        assert!(out.contains("<dl class=\"gollum plugin\">"));
        assert!(out.contains("<dt id=\"consumer-kafka\"><code>consumer.Kafka</code></dt>"));
        assert!(out.contains(
            "<dt id=\"consumer-kafka-topic\"><code>Topic</code><span class=\"annotation\"> (unit: name)</span> <span class=\"fullname\">consumer.Kafka.Topic</span></dt>"
        ));
        assert!(out.contains("<p>A &lt;topic&gt;.</p>"));
        assert!(out.contains("<h2>Gollum Index</h2>"));
        assert!(out.contains("<li><a href=\"#consumer-kafka-topic\">Topic</a></li>"));
    }

    #[test]
    fn colliding_anchors_are_distinct() {
        let doc = build_document(
            "p",
            ".. plugin:: p.X\n\n   .. option:: Batch Timeout\n\n   .. option:: Batch.Timeout\n",
        )
        .unwrap();
        let out = HtmlRenderer.render(&doc).unwrap();

        assert!(out.contains("<dt id=\"p-x-batch-timeout\"><code>Batch Timeout</code>"));
        assert!(out.contains("<dt id=\"p-x-batch-timeout-2\"><code>Batch.Timeout</code>"));
        assert!(out.contains("<li><a href=\"#p-x-batch-timeout\">Batch Timeout</a></li>"));
        assert!(out.contains("<li><a href=\"#p-x-batch-timeout-2\">Batch.Timeout</a></li>"));
    }

    #[test]
    fn empty_label_falls_back_to_plain_index() {
        let mut doc = build_document("p", ".. plugin:: a.B\n").unwrap();
        doc.domain_label.clear();
        let out = HtmlRenderer.render(&doc).unwrap();
        assert!(out.contains("<title>p</title>"));
        assert!(out.contains("<h2>Index</h2>"));
    }

    #[test]
    fn escape() {
        assert_eq!(html_escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(html_escape("it's"), "it&#39;s");
    }
}
