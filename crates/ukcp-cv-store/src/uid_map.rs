//! Namespace → uid table.
//!
//! Persisted as a flat JSON object so that identifiers minted on one run
//! can be reused by the next.

use crate::atomic::{read_json, write_json_atomic};
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UidMap {
    entries: BTreeMap<String, Uuid>,
}

impl UidMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a map from disk; a missing file yields an empty map.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "uid map not found, starting empty");
            return Ok(Self::default());
        }
        let map: Self = read_json(path)?;
        tracing::debug!(path = %path.display(), entries = map.len(), "loaded uid map");
        Ok(map)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        write_json_atomic(path, self)
    }

    pub fn get(&self, namespace: &str) -> Option<Uuid> {
        self.entries.get(namespace).copied()
    }

    /// Record `uid` for `namespace`, returning any previous value.
    pub fn record(&mut self, namespace: impl Into<String>, uid: Uuid) -> Option<Uuid> {
        self.entries.insert(namespace.into(), uid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
