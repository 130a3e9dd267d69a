//! Error types for path bookkeeping, directive runs and markup reading.

use thiserror::Error;

/// Nesting bookkeeping failures. Both variants mean the path can no longer be
/// trusted and the current document build must stop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path underflow: asked to pop {requested} segment(s) from a path of depth {depth}")]
    Underflow { requested: usize, depth: usize },

    #[error("path consistency violated: expected segment `{expected}` but found `{found}` at the top of `{path}`")]
    Consistency {
        expected: String,
        found: String,
        path: String,
    },
}

/// Errors raised while running a directive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("line {line}: directive `{directive}` requires a name argument")]
    MissingArgument { directive: String, line: usize },

    #[error("line {line}: unknown option `{option}` for directive `{directive}`")]
    UnknownOption {
        directive: String,
        option: String,
        line: usize,
    },

    #[error("line {line}: unknown directive `{directive}`")]
    UnknownDirective { directive: String, line: usize },

    #[error(transparent)]
    Markup(#[from] MarkupError),
}

/// Structural problems in the input markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("line {line}: unexpected indentation")]
    UnexpectedIndent { line: usize },

    #[error("line {line}: malformed option line `{text}`")]
    BadOption { line: usize, text: String },
}
