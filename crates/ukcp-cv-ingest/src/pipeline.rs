//! The linear run: check source → build → propagate uids → archive.

use crate::builder::build_authority;
use crate::catalog::Catalog;
use crate::error::IngestError;
use crate::propagate::{PropagationStats, assign_uids};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use ukcp_cv_store::{Archive, UidMap};

/// Inputs shared by every step of one run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub source: PathBuf,
    pub archive_dir: PathBuf,
    /// When unset, uids are minted fresh and nothing is persisted.
    pub uid_map_path: Option<PathBuf>,
    /// Creation timestamp stamped on every node.
    pub create_date: DateTime<Utc>,
}

impl RunContext {
    pub fn new(source: impl Into<PathBuf>, archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            archive_dir: archive_dir.into(),
            uid_map_path: None,
            create_date: Utc::now(),
        }
    }

    pub fn with_uid_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.uid_map_path = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub authority: String,
    pub scopes: usize,
    pub collections: usize,
    pub terms: usize,
    pub uids: PropagationStats,
    pub archive_path: String,
}

pub fn ensure_source_dir(source: &Path) -> Result<(), IngestError> {
    if source.is_dir() {
        Ok(())
    } else {
        Err(IngestError::SourceMissing(source.to_path_buf()))
    }
}

/// Run the whole migration. Nothing is archived unless every step succeeds.
pub fn run(ctx: &RunContext, catalog: &Catalog) -> Result<RunSummary, IngestError> {
    ensure_source_dir(&ctx.source)?;
    tracing::info!(source = %ctx.source.display(), "building controlled vocabularies");

    let mut authority = build_authority(catalog, &ctx.source, ctx.create_date)?;

    let mut uids = match &ctx.uid_map_path {
        Some(path) => UidMap::load(path)?,
        None => UidMap::new(),
    };
    let stats = assign_uids(&mut authority, &mut uids);

    let archive_path = Archive::new(&ctx.archive_dir).write(&authority)?;
    if let Some(path) = &ctx.uid_map_path {
        uids.save(path)?;
        tracing::info!(path = %path.display(), entries = uids.len(), "saved uid map");
    }

    Ok(RunSummary {
        authority: authority.name.clone(),
        scopes: authority.scopes.len(),
        collections: authority.collection_count(),
        terms: authority.term_count(),
        uids: stats,
        archive_path: archive_path.display().to_string(),
    })
}
