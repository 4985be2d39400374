//! # UKCP CV Kernel
//!
//! The controlled-vocabulary object model that raw vocabularies are
//! normalized into.
//!
//! ## Architecture
//!
//! ```text
//! Authority        ← namespace owner, e.g. `ukcp`
//!     │
//! Scope            ← partition of collections, e.g. `ukcp:ukcp18`
//!     │
//! Collection       ← regex-constrained term set, e.g. `ukcp:ukcp18:source-id`
//!     │
//! Term             ← one permissible value, e.g. `ukcp:ukcp18:source-id:hadgem3`
//! ```
//!
//! Every node carries a canonical name, a colon-joined namespace and a uid.
//! Children are added through their parent so that naming rules, term
//! regexes and uniqueness are enforced at construction time.

pub mod error;
pub mod model;
pub mod names;
pub mod node;

pub use error::CvError;
pub use model::{
    Authority, AuthoritySpec, Collection, CollectionSpec, Scope, ScopeSpec, Term, TermSpec,
};
pub use names::{REGEX_CANONICAL_NAME, format_canonical_name, join_namespace};
pub use node::{NodeKind, NodeMut};
