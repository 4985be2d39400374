//! Integration tests: write authorities into a scratch archive and read them back.

use chrono::{TimeZone, Utc};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use ukcp_cv_kernel::{Authority, AuthoritySpec, CollectionSpec, ScopeSpec, TermSpec};
use ukcp_cv_store::{Archive, MANIFEST_FILE_NAME, StoreError};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "ukcp-cv-store-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn sample_authority(term_names: &[&str]) -> Authority {
    let create_date = Utc
        .with_ymd_and_hms(2018, 11, 26, 0, 0, 0)
        .single()
        .expect("fixed date should be valid");
    let mut authority = Authority::new(AuthoritySpec {
        name: "UKCP".to_string(),
        description: "UK Climate Projections".to_string(),
        label: Some("UKCP".to_string()),
        url: Some("https://tba.tba.com/tba".to_string()),
        create_date,
    })
    .expect("authority should build");
    let scope = authority
        .add_scope(ScopeSpec {
            name: "UKCP18".to_string(),
            description: "Controlled Vocabularies (CVs) for use in UKCP18".to_string(),
            label: None,
            url: None,
            create_date,
        })
        .expect("scope should build");
    let collection = scope
        .add_collection(CollectionSpec {
            name: "institution_id".to_string(),
            description: "UKCP UKCP18 CV collection: institution_id".to_string(),
            label: Some("Institution ID".to_string()),
            term_regex: None,
            data: Some(json!({"cim_document_type": "party", "cim_document_type_synonym": null})),
            is_virtual: false,
            create_date,
        })
        .expect("collection should build");
    for name in term_names {
        collection
            .add_term(TermSpec {
                name: name.to_string(),
                label: None,
                description: None,
                data: Some(json!({"postal_address": format!("{name} address")})),
                create_date,
            })
            .expect("term should build");
    }
    scope
        .add_collection(CollectionSpec {
            name: "dataset_id".to_string(),
            description: String::new(),
            label: None,
            term_regex: None,
            data: None,
            is_virtual: true,
            create_date,
        })
        .expect("virtual collection should build");
    authority
}

#[test]
fn written_archive_has_manifest_and_one_file_per_term() {
    let tmp = TempDirGuard::new("layout");
    let archive = Archive::new(tmp.path());
    let authority = sample_authority(&["MOHC", "CEDA"]);

    let dir = archive.write(&authority).expect("archive should write");
    assert_eq!(dir, tmp.path().join("ukcp"));
    assert!(dir.join(MANIFEST_FILE_NAME).is_file());
    assert!(dir.join("ukcp18/institution-id/mohc").is_file());
    assert!(dir.join("ukcp18/institution-id/ceda").is_file());
    assert!(dir.join("ukcp18/dataset-id").is_dir());

    let manifest: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.join(MANIFEST_FILE_NAME)).expect("manifest should exist"),
    )
    .expect("manifest should parse");
    assert_eq!(manifest["canonical_name"], "ukcp");
    assert_eq!(manifest["scopes"][0]["collections"][0]["label"], "Institution ID");
    assert!(manifest["scopes"][0]["collections"][0].get("terms").is_none());

    let leftovers: Vec<_> = fs::read_dir(tmp.path())
        .expect("archive root should be readable")
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with('.'))
        .collect();
    assert!(leftovers.is_empty(), "staging directories must be cleaned up");
}

#[test]
fn load_restores_the_written_tree() {
    let tmp = TempDirGuard::new("load");
    let archive = Archive::new(tmp.path());
    let authority = sample_authority(&["MOHC", "CEDA"]);
    archive.write(&authority).expect("archive should write");

    let loaded = archive.load("UKCP").expect("archive should load");
    assert_eq!(loaded.uid, authority.uid);
    assert_eq!(loaded.term_count(), 2);
    assert_eq!(loaded.collection_count(), 2);

    let original = &authority.scopes[0].collections[0];
    let restored = &loaded.scopes[0].collections[0];
    assert_eq!(restored.uid, original.uid);
    assert_eq!(restored.data, original.data);
    for term in &original.terms {
        let restored_term = restored.term(&term.name).expect("term should be restored");
        assert_eq!(restored_term, term);
    }
    assert!(loaded.scopes[0].collections[1].is_virtual);
}

#[test]
fn rewrite_replaces_stale_terms() {
    let tmp = TempDirGuard::new("rewrite");
    let archive = Archive::new(tmp.path());
    archive
        .write(&sample_authority(&["MOHC", "CEDA"]))
        .expect("first write should succeed");
    archive
        .write(&sample_authority(&["MOHC"]))
        .expect("second write should succeed");

    let dir = archive.authority_dir("UKCP");
    assert!(dir.join("ukcp18/institution-id/mohc").is_file());
    assert!(!dir.join("ukcp18/institution-id/ceda").exists());
    assert_eq!(archive.load("ukcp").expect("archive should load").term_count(), 1);
}

#[test]
fn load_rejects_misplaced_terms() {
    let tmp = TempDirGuard::new("corrupt");
    let archive = Archive::new(tmp.path());
    archive
        .write(&sample_authority(&["MOHC"]))
        .expect("archive should write");

    let dir = archive.authority_dir("UKCP");
    fs::copy(
        dir.join("ukcp18/institution-id/mohc"),
        dir.join("ukcp18/dataset-id/mohc"),
    )
    .expect("term file should copy");

    match archive.load("UKCP") {
        Err(StoreError::Corrupt(message)) => assert!(message.contains("ukcp:ukcp18:dataset-id")),
        other => panic!("expected corrupt archive, got {other:?}"),
    }
}

#[test]
fn load_of_missing_authority_is_an_io_error() {
    let tmp = TempDirGuard::new("missing");
    let archive = Archive::new(tmp.path());
    assert!(matches!(archive.load("UKCP"), Err(StoreError::Io { .. })));
}
