//! Catalog + raw files → authority tree.

use crate::catalog::{Catalog, CollectionConfig, ScopeConfig};
use crate::error::IngestError;
use crate::loader::load_raw_collection;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::path::Path;
use ukcp_cv_kernel::{Authority, AuthoritySpec, CollectionSpec, Scope, ScopeSpec, TermSpec};

/// Human label derived from a collection id.
///
/// Each underscore-separated segment is title-cased; a non-leading `Id`
/// segment becomes `ID`. `source_id` → `Source ID`.
pub fn collection_label(collection_id: &str) -> String {
    title_case(collection_id)
        .split('_')
        .enumerate()
        .map(|(index, segment)| {
            if index > 0 && segment == "Id" {
                "ID".to_string()
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// A letter is upper-cased after a non-letter and lower-cased after a letter.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

/// Split a term payload into label, description and remaining data.
///
/// String `label` and `description` keys of an object payload are consumed;
/// an object left empty is dropped, as is a JSON `null`. Other payload
/// shapes pass through.
pub fn term_spec_from_payload(
    raw_name: &str,
    payload: Option<Value>,
    create_date: DateTime<Utc>,
) -> TermSpec {
    let mut label = None;
    let mut description = None;
    let data = match payload {
        Some(Value::Object(mut fields)) => {
            label = take_string(&mut fields, "label");
            description = take_string(&mut fields, "description");
            (!fields.is_empty()).then_some(Value::Object(fields))
        }
        Some(Value::Null) | None => None,
        other => other,
    };

    TermSpec {
        name: raw_name.to_string(),
        label,
        description,
        data,
        create_date,
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !matches!(fields.get(key), Some(Value::String(_))) {
        return None;
    }
    match fields.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

/// Create one collection under `scope` and, unless it is virtual, import
/// its terms. Returns the number of terms created.
pub fn build_collection(
    scope: &mut Scope,
    source: &Path,
    catalog: &Catalog,
    config: &CollectionConfig,
    create_date: DateTime<Utc>,
) -> Result<usize, IngestError> {
    let data = config.cim_document_type.map(|document_type| {
        serde_json::json!({
            "cim_document_type": document_type,
            "cim_document_type_synonym": config.cim_document_type_synonym,
        })
    });
    let scope_name = scope.canonical_name.clone();
    let collection = scope.add_collection(CollectionSpec {
        name: config.id.to_string(),
        description: catalog.collection_description(config.id),
        label: Some(
            config
                .label
                .map(str::to_string)
                .unwrap_or_else(|| collection_label(config.id)),
        ),
        term_regex: config.term_regex.map(str::to_string),
        data,
        is_virtual: config.is_virtual,
        create_date,
    })?;

    if config.is_virtual {
        tracing::debug!(collection = %collection.namespace, "virtual collection, no terms imported");
        return Ok(0);
    }

    let raw = load_raw_collection(source, &scope_name, config.id)?;
    let mut created = 0;
    for raw_name in raw.keys().filter(|name| !config.is_omitted(name)) {
        let payload = config.data_factory.extract(&raw, raw_name);
        let term = collection.add_term(term_spec_from_payload(raw_name, payload, create_date))?;
        tracing::trace!(term = %term.namespace, "created term");
        created += 1;
    }

    tracing::info!(
        collection = %collection.namespace,
        terms = created,
        omitted = raw.len() - created,
        "built collection"
    );
    Ok(created)
}

fn add_scope(
    authority: &mut Authority,
    config: &ScopeConfig,
    create_date: DateTime<Utc>,
) -> Result<(), IngestError> {
    authority.add_scope(ScopeSpec {
        name: config.name.to_string(),
        description: config.description.to_string(),
        label: config.label.map(str::to_string),
        url: config.url.map(str::to_string),
        create_date,
    })?;
    Ok(())
}

/// Build the whole authority tree described by `catalog` from `source`.
pub fn build_authority(
    catalog: &Catalog,
    source: &Path,
    create_date: DateTime<Utc>,
) -> Result<Authority, IngestError> {
    let mut authority = Authority::new(AuthoritySpec {
        name: catalog.authority.name.to_string(),
        description: catalog.authority.description.to_string(),
        label: catalog.authority.label.map(str::to_string),
        url: catalog.authority.url.map(str::to_string),
        create_date,
    })?;

    for (index, scope_config) in catalog.scopes.iter().enumerate() {
        add_scope(&mut authority, scope_config, create_date)?;
        let scope = &mut authority.scopes[index];
        for collection_config in &scope_config.collections {
            build_collection(scope, source, catalog, collection_config, create_date)?;
        }
    }

    Ok(authority)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labels_title_case_segments_and_upper_case_id() {
        assert_eq!(collection_label("source_id"), "Source ID");
        assert_eq!(collection_label("admin_region"), "Admin Region");
        assert_eq!(collection_label("activity_id"), "Activity ID");
        assert_eq!(collection_label("prob_data_type"), "Prob Data Type");
        assert_eq!(collection_label("id_scheme"), "Id Scheme");
        assert_eq!(collection_label("identity_type"), "Identity Type");
        assert_eq!(collection_label("ensemble_member2x"), "Ensemble Member2X");
    }

    #[test]
    fn absent_payload_keeps_raw_name_as_label() {
        let spec = term_spec_from_payload("hist", None, Utc::now());
        assert_eq!(spec.name, "hist");
        assert_eq!(spec.label, None);
        assert_eq!(spec.description, None);
        assert_eq!(spec.data, None);
    }

    #[test]
    fn label_and_description_are_consumed_from_object_payloads() {
        let spec = term_spec_from_payload(
            "rcp85",
            Some(json!({"label": "RCP8.5", "description": "High emissions", "forcing": 8.5})),
            Utc::now(),
        );
        assert_eq!(spec.label.as_deref(), Some("RCP8.5"));
        assert_eq!(spec.description.as_deref(), Some("High emissions"));
        assert_eq!(spec.data, Some(json!({"forcing": 8.5})));
    }

    #[test]
    fn null_payload_means_no_data() {
        let spec = term_spec_from_payload("tas", Some(Value::Null), Utc::now());
        assert_eq!(spec.label, None);
        assert_eq!(spec.data, None);
    }

    #[test]
    fn payload_emptied_by_extraction_is_dropped() {
        let spec = term_spec_from_payload("uk", Some(json!({"label": "United Kingdom"})), Utc::now());
        assert_eq!(spec.label.as_deref(), Some("United Kingdom"));
        assert_eq!(spec.data, None);
    }

    #[test]
    fn scalar_and_non_string_payloads_pass_through() {
        let spec = term_spec_from_payload("MOHC", Some(json!("Exeter")), Utc::now());
        assert_eq!(spec.label, None);
        assert_eq!(spec.data, Some(json!("Exeter")));

        let spec = term_spec_from_payload("x", Some(json!({"label": 3})), Utc::now());
        assert_eq!(spec.label, None);
        assert_eq!(spec.data, Some(json!({"label": 3})));
    }
}
