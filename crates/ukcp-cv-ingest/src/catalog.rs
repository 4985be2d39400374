//! Declarative table of what gets built: authority, scopes, and the
//! per-collection import rules.

use serde_json::{Map, Value};

/// How a term's structured payload is derived from its collection's raw map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFactory {
    /// No payload.
    None,
    /// The raw value stored under the term name, as-is.
    Lookup,
    /// The raw value wrapped as the single field of an object.
    WrapAs(&'static str),
}

impl DataFactory {
    pub fn extract(&self, raw: &Map<String, Value>, term_name: &str) -> Option<Value> {
        match self {
            DataFactory::None => None,
            DataFactory::Lookup => raw.get(term_name).cloned(),
            DataFactory::WrapAs(field) => {
                let mut wrapped = Map::new();
                wrapped.insert(
                    (*field).to_string(),
                    raw.get(term_name).cloned().unwrap_or(Value::Null),
                );
                Some(Value::Object(wrapped))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub label: Option<&'static str>,
    pub url: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub label: Option<&'static str>,
    pub url: Option<&'static str>,
    pub collections: Vec<CollectionConfig>,
}

/// Import rules for one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionConfig {
    pub id: &'static str,
    /// Overrides the label derived from `id`.
    pub label: Option<&'static str>,
    pub cim_document_type: Option<&'static str>,
    pub cim_document_type_synonym: Option<&'static str>,
    /// Overrides the default canonical-name regex.
    pub term_regex: Option<&'static str>,
    /// Virtual collections have no raw file and no imported terms.
    pub is_virtual: bool,
    /// Raw names skipped on import.
    pub omitted: &'static [&'static str],
    pub data_factory: DataFactory,
}

impl CollectionConfig {
    pub const fn new(id: &'static str) -> Self {
        Self {
            id,
            label: None,
            cim_document_type: None,
            cim_document_type_synonym: None,
            term_regex: None,
            is_virtual: false,
            omitted: &[],
            data_factory: DataFactory::None,
        }
    }

    pub const fn with_data(mut self, data_factory: DataFactory) -> Self {
        self.data_factory = data_factory;
        self
    }

    pub const fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub const fn with_term_regex(mut self, term_regex: &'static str) -> Self {
        self.term_regex = Some(term_regex);
        self
    }

    pub const fn with_document_type(
        mut self,
        cim_document_type: &'static str,
        synonym: Option<&'static str>,
    ) -> Self {
        self.cim_document_type = Some(cim_document_type);
        self.cim_document_type_synonym = synonym;
        self
    }

    pub const fn omitting(mut self, omitted: &'static [&'static str]) -> Self {
        self.omitted = omitted;
        self
    }

    pub const fn virtual_collection(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn is_omitted(&self, raw_name: &str) -> bool {
        self.omitted.contains(&raw_name)
    }
}

/// Everything the builder needs to know besides the raw files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub authority: AuthorityConfig,
    /// Prepended to the collection id to form its description.
    pub collection_description_prefix: &'static str,
    pub scopes: Vec<ScopeConfig>,
}

impl Catalog {
    pub fn collection_description(&self, collection_id: &str) -> String {
        format!("{}{collection_id}", self.collection_description_prefix)
    }

    /// The UKCP18 vocabulary set.
    pub fn ukcp18() -> Self {
        use DataFactory::{Lookup, WrapAs};

        Self {
            authority: AuthorityConfig {
                name: "UKCP",
                description: "UK Climate Projections",
                label: Some("UKCP"),
                url: Some("https://tba.tba.com/tba"),
            },
            collection_description_prefix: "UKCP UKCP18 CV collection: ",
            scopes: vec![
                ScopeConfig {
                    name: "UKCP18",
                    description: "Controlled Vocabularies (CVs) for use in UKCP18",
                    label: Some("UKCP18"),
                    url: Some("https://github.com/ukcp-data/UKCP18_CVs"),
                    collections: vec![
                        CollectionConfig::new("activity_id"),
                        CollectionConfig::new("admin_region"),
                        CollectionConfig::new("collection"),
                        CollectionConfig::new("coordinate").with_data(Lookup),
                        CollectionConfig::new("country"),
                        CollectionConfig::new("dataset_id"),
                        CollectionConfig::new("domain"),
                        CollectionConfig::new("ensemble_member"),
                        CollectionConfig::new("experiment_id").with_data(Lookup),
                        CollectionConfig::new("frequency"),
                        CollectionConfig::new("institution_id")
                            .with_data(WrapAs("postal_address")),
                        CollectionConfig::new("license"),
                        CollectionConfig::new("marine_input_model"),
                        CollectionConfig::new("prob_data_type"),
                        CollectionConfig::new("project"),
                        CollectionConfig::new("projection"),
                        CollectionConfig::new("resolution"),
                        CollectionConfig::new("river_basin"),
                        CollectionConfig::new("scenario"),
                        CollectionConfig::new("source_id").with_data(Lookup),
                        CollectionConfig::new("source_type"),
                        CollectionConfig::new("variable").with_data(Lookup),
                    ],
                },
                ScopeConfig {
                    name: "GLOBAL",
                    description: "Global controlled Vocabularies (CVs)",
                    label: None,
                    url: Some("https://github.com/ukcp-data/UKCP18_CVs"),
                    collections: Vec::new(),
                },
            ],
        }
    }
}
