//! Filesystem archive of authority trees.
//!
//! An authority is written into a staging directory next to its final
//! location and swapped in only once every file has been written, so a
//! failed write never leaves a half-populated authority behind.

use crate::atomic::{read_json, sync_dir, unique_suffix, write_json_atomic};
use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use ukcp_cv_kernel::{Authority, Term, format_canonical_name, join_namespace};

/// File holding the authority, its scopes and its collections.
pub const MANIFEST_FILE_NAME: &str = "MANIFEST";

#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory an authority is archived under.
    pub fn authority_dir(&self, authority_name: &str) -> PathBuf {
        self.root.join(format_canonical_name(authority_name))
    }

    /// Persist `authority` and everything below it, replacing any previous
    /// archive of the same authority. Returns the authority directory.
    pub fn write(&self, authority: &Authority) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::io(&self.root, e))?;

        let suffix = unique_suffix();
        let staging = self
            .root
            .join(format!(".{}.staging.{suffix}", authority.canonical_name));
        if let Err(error) = write_tree(&staging, authority) {
            let _ = fs::remove_dir_all(&staging);
            return Err(error);
        }

        let target = self.authority_dir(&authority.canonical_name);
        let previous = self
            .root
            .join(format!(".{}.previous.{suffix}", authority.canonical_name));
        let had_previous = target.exists();
        if had_previous {
            fs::rename(&target, &previous).map_err(|e| {
                let _ = fs::remove_dir_all(&staging);
                StoreError::io(&target, e)
            })?;
        }
        if let Err(e) = fs::rename(&staging, &target) {
            if had_previous {
                let _ = fs::rename(&previous, &target);
            }
            let _ = fs::remove_dir_all(&staging);
            return Err(StoreError::io(&target, e));
        }
        if had_previous {
            fs::remove_dir_all(&previous).map_err(|e| StoreError::io(&previous, e))?;
        }
        sync_dir(&self.root)?;

        tracing::info!(
            authority = %authority.namespace,
            path = %target.display(),
            terms = authority.term_count(),
            "archived authority"
        );
        Ok(target)
    }

    /// Read an archived authority back, terms included.
    pub fn load(&self, authority_name: &str) -> Result<Authority, StoreError> {
        let dir = self.authority_dir(authority_name);
        let mut authority: Authority = read_json(dir.join(MANIFEST_FILE_NAME))?;

        for scope in &mut authority.scopes {
            for collection in &mut scope.collections {
                let collection_dir = dir
                    .join(&scope.canonical_name)
                    .join(&collection.canonical_name);
                if !collection_dir.is_dir() {
                    continue;
                }
                for path in sorted_files(&collection_dir)? {
                    let term: Term = read_json(&path)?;
                    let expected = join_namespace(&collection.namespace, &term.canonical_name);
                    if term.namespace != expected {
                        return Err(StoreError::Corrupt(format!(
                            "{}: namespace `{}` does not belong under `{}`",
                            path.display(),
                            term.namespace,
                            collection.namespace
                        )));
                    }
                    collection.terms.push(term);
                }
            }
        }

        Ok(authority)
    }
}

fn write_tree(dir: &Path, authority: &Authority) -> Result<(), StoreError> {
    write_json_atomic(dir.join(MANIFEST_FILE_NAME), authority)?;
    for scope in &authority.scopes {
        for collection in &scope.collections {
            let collection_dir = dir
                .join(&scope.canonical_name)
                .join(&collection.canonical_name);
            fs::create_dir_all(&collection_dir).map_err(|e| StoreError::io(&collection_dir, e))?;
            for term in &collection.terms {
                write_json_atomic(collection_dir.join(&term.canonical_name), term)?;
            }
        }
    }
    Ok(())
}

fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))? {
        let entry = entry.map_err(|e| StoreError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
