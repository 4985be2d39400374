//! # ukcp-cv-ingest
//!
//! Turns a directory of raw vocabulary JSON files into an archived CV tree.
//!
//! ```text
//! <SCOPE>_<collection>.json ──loader──▶ raw term map
//!                                          │ catalog (per-collection rules)
//!                                          ▼
//!                              builder ──▶ Authority tree
//!                                          │ uid map
//!                                          ▼
//!                            propagate ──▶ stable uids ──archive──▶ disk
//! ```
//!
//! Every step is fail-fast: the first error aborts the run before anything
//! is archived.

pub mod builder;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod propagate;

pub use builder::{build_authority, build_collection, collection_label, term_spec_from_payload};
pub use catalog::{AuthorityConfig, Catalog, CollectionConfig, DataFactory, ScopeConfig};
pub use error::{IngestError, LoadError};
pub use loader::{load_raw_collection, raw_file_name};
pub use pipeline::{RunContext, RunSummary, ensure_source_dir, run};
pub use propagate::{PropagationStats, assign_uids, propagate_uids};
