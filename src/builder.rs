//! Document builder — the host side that drives directives.

use tracing::{debug, warn};

use crate::context::BuildContext;
use crate::domain::Domain;
use crate::entry::{Declaration, NestedParser};
use crate::error::DirectiveError;
use crate::markup::{self, Block, Content};
use crate::model::{Document, Node};

/// Parses content regions and dispatches their directives to a [`Domain`].
pub struct DocumentBuilder<'d> {
    domain: &'d Domain,
}

impl<'d> DocumentBuilder<'d> {
    pub fn new(domain: &'d Domain) -> Self {
        Self { domain }
    }

    /// Build one document from source text in a fresh context.
    pub fn build(&mut self, docname: &str, source: &str) -> Result<Document, DirectiveError> {
        debug!(doc = docname, domain = self.domain.name(), "building");
        let mut ctx = BuildContext::new(docname);
        let nodes = self.nested_parse(&mut ctx, &Content::from_source(source))?;

        if ctx.resolver().is_nested() {
            warn!(
                doc = docname,
                path = %ctx.current_path(),
                "name path not empty after build"
            );
        }

        Ok(Document {
            name: docname.to_string(),
            domain_label: self.domain.label().to_string(),
            nodes,
            objects: ctx.into_objects(),
        })
    }
}

impl NestedParser for DocumentBuilder<'_> {
    fn nested_parse(
        &mut self,
        ctx: &mut BuildContext,
        content: &Content,
    ) -> Result<Vec<Node>, DirectiveError> {
        let domain = self.domain;
        let mut nodes = Vec::new();

        for block in markup::parse_blocks(content)? {
            match block {
                Block::Paragraph { text, .. } => nodes.push(Node::Paragraph { text }),
                Block::Directive(d) => {
                    let qualified = d.qualified_name();
                    let directive = domain.resolve(d.domain.as_deref(), &d.name).ok_or_else(|| {
                        DirectiveError::UnknownDirective {
                            directive: qualified.clone(),
                            line: d.line,
                        }
                    })?;
                    debug!(doc = ctx.docname(), directive = %qualified, line = d.line, "running directive");
                    let decl = Declaration {
                        directive: &qualified,
                        argument: &d.argument,
                        options: &d.options,
                        content: &d.content,
                        line: d.line,
                    };
                    nodes.extend(directive.run(&decl, ctx, self)?);
                }
            }
        }

        Ok(nodes)
    }
}

/// Build `source` with the default `gollum` domain.
pub fn build_document(docname: &str, source: &str) -> Result<Document, DirectiveError> {
    let domain = Domain::default();
    DocumentBuilder::new(&domain).build(docname, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarkupError;
    use crate::model::DescNode;

    fn desc(node: &Node) -> &DescNode {
        match node {
            Node::Desc(d) => d,
            other => panic!("expected desc, got {other:?}"),
        }
    }

    #[test]
    fn nested_plugins_qualify_children() {
        let src = "\
.. gollum:plugin:: router.Broadcast

   Sends to all.

   .. gollum:plugin:: filter.RegExp

      .. gollum:option:: Expression
         :default: .*

.. gollum:option:: Fuse
";
        let doc = build_document("router", src).unwrap();
        assert_eq!(doc.nodes.len(), 4);

        let router = desc(&doc.nodes[1]);
        assert_eq!(router.signature.full_name, "router.Broadcast");
        assert_eq!(router.content.len(), 3);

        let filter = desc(&router.content[2]);
        assert_eq!(filter.signature.full_name, "router.Broadcast.filter.RegExp");
        assert_eq!(filter.signature.module.as_deref(), Some("router.Broadcast"));

        let expr = desc(&filter.content[1]);
        assert_eq!(
            expr.signature.full_name,
            "router.Broadcast.filter.RegExp.Expression"
        );
        assert_eq!(expr.signature.annotation, " (default: .*)");

        // Sibling after the plugin closes sees an empty path again.
        let fuse = desc(&doc.nodes[3]);
        assert_eq!(fuse.signature.full_name, "Fuse");

        let names: Vec<_> = doc.objects.iter().map(|o| o.full_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Fuse",
                "router.Broadcast",
                "router.Broadcast.filter.RegExp",
                "router.Broadcast.filter.RegExp.Expression",
            ]
        );
    }

    #[test]
    fn unknown_directive_is_an_error() {
        let err = build_document("doc", ".. gollum:function:: x\n").unwrap_err();
        assert_eq!(
            err,
            DirectiveError::UnknownDirective {
                directive: "gollum:function".into(),
                line: 1
            }
        );
    }

    #[test]
    fn markup_errors_inside_content_propagate() {
        let src = ".. plugin:: a.b\n\n   text\n\n      too deep\n";
        let err = build_document("doc", src).unwrap_err();
        assert_eq!(
            err,
            DirectiveError::Markup(MarkupError::UnexpectedIndent { line: 5 })
        );
    }

    #[test]
    fn each_build_gets_a_fresh_path() {
        let domain = Domain::default();
        let mut builder = DocumentBuilder::new(&domain);
        let first = builder.build("one", ".. plugin:: a.b\n").unwrap();
        let second = builder.build("two", ".. option:: x\n").unwrap();
        assert_eq!(first.objects[0].full_name, "a.b");
        assert_eq!(second.objects[0].full_name, "x");
    }
}
