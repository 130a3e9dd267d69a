//! plugindoc — render nested plugin and plugin option descriptions into
//! cross-referenced documentation with a general index.
//!
//! The core is [`path::DottedPath`], which qualifies entry names as plugin
//! directives nest, and the two directives in [`entry`]. The rest is a small
//! host: a markup reader, a document builder, the index and renderers.

pub mod builder;
pub mod context;
pub mod domain;
pub mod entry;
pub mod error;
pub mod index;
pub mod markup;
pub mod model;
pub mod path;
pub mod render;
pub mod toc;

pub use builder::{build_document, DocumentBuilder};
pub use context::{BuildContext, NameResolver};
pub use domain::{Domain, DomainConfig};
pub use entry::{Declaration, Directive, NestedParser, Plugin, PluginOption};
pub use error::{DirectiveError, MarkupError, PathError};
pub use path::DottedPath;
