//! Error types for CV construction.

use crate::node::NodeKind;

/// Errors raised while building a CV tree.
#[derive(Debug, thiserror::Error)]
pub enum CvError {
    /// The name is empty once trimmed.
    #[error("{kind} name is empty")]
    EmptyName { kind: NodeKind },

    /// The canonical form of an authority/scope/collection name is malformed.
    #[error("invalid {kind} name `{name}`: canonical form `{canonical}` must match {pattern}")]
    InvalidName {
        kind: NodeKind,
        name: String,
        canonical: String,
        pattern: String,
    },

    /// The canonical form is `.` or `..`, which cannot name an archive entry.
    #[error("{kind} name `{name}` has reserved canonical form `{canonical}`")]
    ReservedName {
        kind: NodeKind,
        name: String,
        canonical: String,
    },

    /// A term name was rejected by its collection's term regex.
    #[error(
        "term `{name}` rejected by collection {collection}: canonical form `{canonical}` does not match {pattern}"
    )]
    TermNameRejected {
        collection: String,
        name: String,
        canonical: String,
        pattern: String,
    },

    /// A collection's term regex failed to compile.
    #[error("invalid term regex for collection {collection}: {message}")]
    InvalidRegex { collection: String, message: String },

    /// A sibling with the same canonical name already exists.
    #[error("duplicate {kind} `{canonical}` under {parent}")]
    Duplicate {
        kind: NodeKind,
        canonical: String,
        parent: String,
    },
}
