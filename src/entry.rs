//! Plugin and plugin option directives.
//!
//! Both read the active path from the [`BuildContext`] to qualify their name.
//! A plugin additionally pushes its own name while its content is parsed, so
//! options and sub-plugins declared inside it are qualified by it.

use tracing::debug;

use crate::context::BuildContext;
use crate::error::DirectiveError;
use crate::markup::Content;
use crate::model::{DescNode, IndexKind, IndexNode, IndexRecord, Node, Signature};

/// Everything a directive receives about one declaration.
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'a> {
    /// Directive name as written, used in error messages
    pub directive: &'a str,
    pub argument: &'a str,
    pub options: &'a [(String, String)],
    pub content: &'a Content,
    pub line: usize,
}

/// Host capability that turns raw nested content into nodes, running any
/// directives it contains against the same context.
pub trait NestedParser {
    fn nested_parse(
        &mut self,
        ctx: &mut BuildContext,
        content: &Content,
    ) -> Result<Vec<Node>, DirectiveError>;
}

/// A registered directive.
pub trait Directive {
    fn run(
        &self,
        decl: &Declaration<'_>,
        ctx: &mut BuildContext,
        parser: &mut dyn NestedParser,
    ) -> Result<Vec<Node>, DirectiveError>;
}

/// Container entry: a plugin whose content may declare nested entries.
#[derive(Debug, Clone)]
pub struct Plugin {
    pub domain: String,
}

/// Leaf entry: a plugin option. Reads the path, never extends it.
#[derive(Debug, Clone)]
pub struct PluginOption {
    pub domain: String,
}

/// Recognized `option` metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionInfo {
    pub default: Option<String>,
    pub unit: Option<String>,
    pub from: Option<String>,
}

impl OptionInfo {
    /// Collect recognized options; anything else is rejected.
    pub fn from_pairs(decl: &Declaration<'_>) -> Result<Self, DirectiveError> {
        let mut info = Self::default();
        for (key, value) in decl.options {
            let slot = match key.as_str() {
                "default" => &mut info.default,
                "unit" => &mut info.unit,
                "from" => &mut info.from,
                _ => return Err(unknown_option(decl, key)),
            };
            *slot = Some(value.clone());
        }
        Ok(info)
    }

    /// `" (default: D, unit: U, from: F)"` with only the present fields, or
    /// an empty string.
    pub fn annotation(&self) -> String {
        let parts: Vec<String> = [
            ("default", &self.default),
            ("unit", &self.unit),
            ("from", &self.from),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
        .collect();

        if parts.is_empty() {
            return String::new();
        }
        format!(" ({})", parts.join(", "))
    }
}

/// Index key of a plugin: `"{kind}; {simple_name}"`.
///
/// A name without a dot yields an empty simple name.
pub fn plugin_index_key(name: &str) -> String {
    let (kind, simple_name) = name.split_once('.').unwrap_or((name, ""));
    format!("{}; {}", kind, simple_name)
}

/// Index key of an option declared under `path`.
pub fn option_index_key(path: &str, name: &str) -> String {
    if path.is_empty() {
        return name.to_string();
    }
    format!("{}; {}", path, name)
}

fn required_argument<'a>(decl: &Declaration<'a>) -> Result<&'a str, DirectiveError> {
    let name = decl.argument.trim();
    if name.is_empty() {
        return Err(DirectiveError::MissingArgument {
            directive: decl.directive.to_string(),
            line: decl.line,
        });
    }
    Ok(name)
}

fn unknown_option(decl: &Declaration<'_>, option: &str) -> DirectiveError {
    DirectiveError::UnknownOption {
        directive: decl.directive.to_string(),
        option: option.to_string(),
        line: decl.line,
    }
}

impl Directive for Plugin {
    fn run(
        &self,
        decl: &Declaration<'_>,
        ctx: &mut BuildContext,
        parser: &mut dyn NestedParser,
    ) -> Result<Vec<Node>, DirectiveError> {
        if let Some((key, _)) = decl.options.first() {
            return Err(unknown_option(decl, key));
        }
        let name = required_argument(decl)?;

        let path = ctx.current_path();
        let module = path.to_string();
        let full_name = &*path + name;
        let index_key = plugin_index_key(name);
        debug!(name, %full_name, %index_key, "plugin");

        let signature = Signature {
            display_name: name.to_string(),
            annotation: String::new(),
            names: vec![name.to_string(), full_name.clone()],
            full_name: full_name.clone(),
            ids: vec![full_name.clone()],
            module: Some(module),
            first: false,
            noindex: false,
        };
        ctx.note_object(&full_name, "plugin", decl.line);

        ctx.current_path().append(name);
        let content = parser.nested_parse(ctx, decl.content)?;
        ctx.current_path().pop_dotted(name)?;

        Ok(vec![
            Node::Index(IndexNode {
                entries: vec![IndexRecord {
                    kind: IndexKind::Pair,
                    key: index_key,
                    target: full_name,
                }],
            }),
            Node::Desc(DescNode {
                domain: self.domain.clone(),
                objtype: "plugin".to_string(),
                signature,
                content,
            }),
        ])
    }
}

impl Directive for PluginOption {
    fn run(
        &self,
        decl: &Declaration<'_>,
        ctx: &mut BuildContext,
        parser: &mut dyn NestedParser,
    ) -> Result<Vec<Node>, DirectiveError> {
        let info = OptionInfo::from_pairs(decl)?;
        let name = required_argument(decl)?;

        let path = ctx.current_path();
        let full_name = &*path + name;
        let index_key = option_index_key(&path.to_string(), name);
        debug!(name, %full_name, %index_key, "option");

        let signature = Signature {
            display_name: name.to_string(),
            annotation: info.annotation(),
            names: vec![name.to_string(), full_name.clone()],
            full_name: full_name.clone(),
            ids: vec![full_name.clone()],
            module: None,
            first: true,
            noindex: false,
        };
        ctx.note_object(&full_name, "option", decl.line);

        let content = parser.nested_parse(ctx, decl.content)?;

        Ok(vec![
            Node::Index(IndexNode {
                entries: vec![IndexRecord {
                    kind: IndexKind::Single,
                    key: index_key,
                    target: full_name,
                }],
            }),
            Node::Desc(DescNode {
                domain: self.domain.clone(),
                objtype: "option".to_string(),
                signature,
                content,
            }),
        ])
    }
}
