//! Output formats for built documents.

pub mod html;
pub mod json;
pub mod markdown;

use std::str::FromStr;

use anyhow::Result;
use thiserror::Error;

use crate::model::Document;

/// Turns a built [`Document`] into one output file's text.
pub trait Renderer {
    fn render(&self, doc: &Document) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Output format, parsed from `markdown`/`md`, `html` or `json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markdown,
    Html,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format: {0}. Use markdown, html, or json")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

impl Format {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            Self::Markdown => Box::new(markdown::MarkdownRenderer),
            Self::Html => Box::new(html::HtmlRenderer),
            Self::Json => Box::new(json::JsonRenderer),
        }
    }
}
