use std::fmt;
use std::path::PathBuf;

use arbor_core::CapabilityFailure;
use thiserror::Error;

use crate::Category;

/// Expected number of child nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    AtLeast(usize),
    Exactly(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::AtLeast(n) => write!(f, "at least {n}"),
            Arity::Exactly(n) => write!(f, "exactly {n}"),
        }
    }
}

/// Errors that abort compilation. A tree is never produced partially.
///
/// `path` locates the node in the document, e.g. `Sequence/1:Loop/0:Attack`.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("unknown node category `{category}` at {path}")]
    UnknownNodeCategory { category: String, path: String },

    #[error("unknown {category} kind `{kind}` at {path}")]
    UnknownNodeKind {
        category: Category,
        kind: String,
        path: String,
    },

    #[error("{kind} at {path} expects {expected} child node(s), found {found}")]
    Structure {
        kind: String,
        path: String,
        expected: Arity,
        found: usize,
    },

    #[error("attribute `{attribute}` at {path} has no `{tag}` type tag")]
    MissingTypeTag {
        attribute: String,
        tag: String,
        path: String,
    },

    #[error("attribute `{attribute}` at {path} declares unknown type `{type_name}`")]
    UnknownAttributeType {
        attribute: String,
        type_name: String,
        path: String,
    },

    #[error("missing required attribute `{attribute}` at {path}")]
    MissingAttribute { attribute: String, path: String },

    #[error("invalid attribute `{attribute}`={value:?} at {path}: {reason}")]
    InvalidAttribute {
        attribute: String,
        value: String,
        reason: String,
        path: String,
    },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Errors that abort a tick.
///
/// `path` is the leaf's compile-time node path, so two leaves bound to the same capability can be
/// told apart. Action-internal failures never show up here: they are absorbed by the action node
/// and reported to the diagnostic sink instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickError {
    #[error("agent has no capability `{capability}` (at {path})")]
    MissingCapability { capability: String, path: String },

    #[error("condition `{capability}` at {path} failed: {source}")]
    CapabilityFailed {
        capability: String,
        path: String,
        #[source]
        source: CapabilityFailure,
    },
}

impl TickError {
    pub fn capability(&self) -> &str {
        match self {
            TickError::MissingCapability { capability, .. }
            | TickError::CapabilityFailed { capability, .. } => capability,
        }
    }

    /// Node path of the leaf that aborted the tick.
    pub fn path(&self) -> &str {
        match self {
            TickError::MissingCapability { path, .. } | TickError::CapabilityFailed { path, .. } => {
                path
            }
        }
    }
}
