//! # ukcp-cv-store
//!
//! Persistence for built CV trees.
//!
//! This crate provides:
//! - `Archive`: one directory per authority, a `MANIFEST` plus one JSON file
//!   per term, replaced wholesale on every write
//! - `UidMap`: the namespace → uid table that keeps identifiers stable
//!   across runs
//! - atomic file writes shared by both
//!
//! ## Layout
//!
//! ```text
//! <archive root>/
//!   ukcp/
//!     MANIFEST                       authority + scopes + collections
//!     ukcp18/
//!       source-id/
//!         hadgem3                    one term
//! ```

pub mod archive;
pub mod atomic;
pub mod error;
pub mod uid_map;

pub use archive::{Archive, MANIFEST_FILE_NAME};
pub use atomic::write_json_atomic;
pub use error::StoreError;
pub use uid_map::UidMap;
