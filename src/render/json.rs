//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the built document together with its flat index records and the
//! grouped general index.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::context::ObjectEntry;
use crate::index::{build_index, IndexGroup};
use crate::model::*;
use crate::render::Renderer;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonDocument<'a> {
    name: &'a str,
    domain_label: &'a str,
    nodes: &'a [Node],
    objects: &'a [ObjectEntry],
    index_entries: Vec<&'a IndexRecord>,
    index: Vec<IndexGroup>,
}

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let records = doc.index_records();
        let out = JsonDocument {
            name: &doc.name,
            domain_label: &doc.domain_label,
            nodes: &doc.nodes,
            objects: &doc.objects,
            index: build_index(records.iter().copied()),
            index_entries: records,
        };
        let mut json = serde_json::to_string_pretty(&out)
            .with_context(|| format!("failed to serialize {}", doc.name))?;
        json.push('\n');
        Ok(json)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_document;
    use serde_json::Value;

    fn render(src: &str) -> Value {
        let doc = build_document("doc", src).unwrap();
        let out = JsonRenderer.render(&doc).unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn nodes_are_tagged() {
        let v = render(".. plugin:: producer.Console\n\n   Writes to stdout.\n");
        assert_eq!(v["name"], "doc");
        assert_eq!(v["domain_label"], "Gollum");
        assert_eq!(v["nodes"][0]["node"], "index");
        assert_eq!(v["nodes"][0]["entries"][0]["kind"], "pair");
        assert_eq!(v["nodes"][0]["entries"][0]["key"], "producer; Console");
        assert_eq!(v["nodes"][1]["node"], "desc");
        assert_eq!(v["nodes"][1]["objtype"], "plugin");
        assert_eq!(v["nodes"][1]["signature"]["full_name"], "producer.Console");
        assert_eq!(v["nodes"][1]["content"][0]["node"], "paragraph");
        assert_eq!(v["nodes"][1]["content"][0]["text"], "Writes to stdout.");
    }

    #[test]
    fn index_and_objects() {
        let v = render(".. plugin:: producer.Console\n\n   .. option:: Console\n      :default: stdout\n");
        assert_eq!(v["objects"].as_array().unwrap().len(), 2);
        assert_eq!(v["objects"][1]["full_name"], "producer.Console.Console");
        assert_eq!(v["objects"][1]["objtype"], "option");

        let entries = v["index_entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["kind"], "single");
        assert_eq!(entries[1]["key"], "producer.Console; Console");

        let letters: Vec<_> = v["index"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["letter"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(letters, vec!["C", "P"]);
    }
}
