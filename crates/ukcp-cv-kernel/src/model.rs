//! Authority → scope → collection → term.
//!
//! Nodes are created through their parent (`add_scope`, `add_collection`,
//! `add_term`) which derives the canonical name and namespace, mints a uid
//! and enforces sibling uniqueness.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::CvError;
use crate::names::{
    REGEX_CANONICAL_NAME, format_canonical_name, join_namespace, validate_canonical_name,
};
use crate::node::NodeKind;

/// Construction arguments for an [`Authority`].
#[derive(Debug, Clone)]
pub struct AuthoritySpec {
    pub name: String,
    pub description: String,
    pub label: Option<String>,
    pub url: Option<String>,
    pub create_date: DateTime<Utc>,
}

/// Construction arguments for a [`Scope`].
#[derive(Debug, Clone)]
pub struct ScopeSpec {
    pub name: String,
    pub description: String,
    pub label: Option<String>,
    pub url: Option<String>,
    pub create_date: DateTime<Utc>,
}

/// Construction arguments for a [`Collection`].
#[derive(Debug, Clone)]
pub struct CollectionSpec {
    pub name: String,
    pub description: String,
    pub label: Option<String>,
    /// `None` falls back to [`REGEX_CANONICAL_NAME`].
    pub term_regex: Option<String>,
    pub data: Option<Value>,
    pub is_virtual: bool,
    pub create_date: DateTime<Utc>,
}

/// Construction arguments for a [`Term`].
#[derive(Debug, Clone)]
pub struct TermSpec {
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub data: Option<Value>,
    pub create_date: DateTime<Utc>,
}

/// Top-level namespace owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authority {
    pub name: String,
    pub canonical_name: String,
    pub namespace: String,
    pub uid: Uuid,
    pub label: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub create_date: DateTime<Utc>,
    #[serde(default)]
    pub scopes: Vec<Scope>,
}

/// A named partition of collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scope {
    pub name: String,
    pub canonical_name: String,
    pub namespace: String,
    pub uid: Uuid,
    pub label: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub create_date: DateTime<Utc>,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

/// A regex-constrained set of terms.
///
/// Terms are not part of the serialized form: the archive stores one file
/// per term next to the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub canonical_name: String,
    pub namespace: String,
    pub uid: Uuid,
    pub label: String,
    pub description: String,
    pub term_regex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default)]
    pub is_virtual: bool,
    pub create_date: DateTime<Utc>,
    #[serde(skip)]
    pub terms: Vec<Term>,
    #[serde(skip)]
    matcher: Option<Regex>,
}

/// A single permissible value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    pub canonical_name: String,
    pub namespace: String,
    pub uid: Uuid,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub create_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Authority {
    pub fn new(spec: AuthoritySpec) -> Result<Self, CvError> {
        let canonical_name = validate_canonical_name(NodeKind::Authority, &spec.name)?;
        Ok(Self {
            label: spec.label.unwrap_or_else(|| spec.name.clone()),
            name: spec.name,
            namespace: canonical_name.clone(),
            canonical_name,
            uid: Uuid::new_v4(),
            description: spec.description,
            url: spec.url,
            create_date: spec.create_date,
            scopes: Vec::new(),
        })
    }

    /// Add a scope; its canonical name must be unique within the authority.
    pub fn add_scope(&mut self, spec: ScopeSpec) -> Result<&mut Scope, CvError> {
        let canonical_name = validate_canonical_name(NodeKind::Scope, &spec.name)?;
        if self.scope(&canonical_name).is_some() {
            return Err(CvError::Duplicate {
                kind: NodeKind::Scope,
                canonical: canonical_name,
                parent: self.namespace.clone(),
            });
        }

        let index = self.scopes.len();
        self.scopes.push(Scope {
            label: spec.label.unwrap_or_else(|| spec.name.clone()),
            name: spec.name,
            namespace: join_namespace(&self.namespace, &canonical_name),
            canonical_name,
            uid: Uuid::new_v4(),
            description: spec.description,
            url: spec.url,
            create_date: spec.create_date,
            collections: Vec::new(),
        });
        Ok(&mut self.scopes[index])
    }

    /// Lookup a scope by raw or canonical name.
    pub fn scope(&self, name: &str) -> Option<&Scope> {
        let canonical = format_canonical_name(name);
        self.scopes.iter().find(|s| s.canonical_name == canonical)
    }

    pub fn scope_mut(&mut self, name: &str) -> Option<&mut Scope> {
        let canonical = format_canonical_name(name);
        self.scopes.iter_mut().find(|s| s.canonical_name == canonical)
    }

    pub fn collection_count(&self) -> usize {
        self.scopes.iter().map(|s| s.collections.len()).sum()
    }

    pub fn term_count(&self) -> usize {
        self.scopes
            .iter()
            .flat_map(|s| s.collections.iter())
            .map(|c| c.terms.len())
            .sum()
    }
}

impl Scope {
    /// Add a collection; compiles its term regex up front.
    pub fn add_collection(&mut self, spec: CollectionSpec) -> Result<&mut Collection, CvError> {
        let canonical_name = validate_canonical_name(NodeKind::Collection, &spec.name)?;
        if self.collection(&canonical_name).is_some() {
            return Err(CvError::Duplicate {
                kind: NodeKind::Collection,
                canonical: canonical_name,
                parent: self.namespace.clone(),
            });
        }

        let namespace = join_namespace(&self.namespace, &canonical_name);
        let term_regex = spec
            .term_regex
            .unwrap_or_else(|| REGEX_CANONICAL_NAME.to_string());
        let matcher = compile_term_regex(&namespace, &term_regex)?;

        let index = self.collections.len();
        self.collections.push(Collection {
            label: spec.label.unwrap_or_else(|| spec.name.clone()),
            name: spec.name,
            namespace,
            canonical_name,
            uid: Uuid::new_v4(),
            description: spec.description,
            term_regex,
            data: spec.data,
            is_virtual: spec.is_virtual,
            create_date: spec.create_date,
            terms: Vec::new(),
            matcher: Some(matcher),
        });
        Ok(&mut self.collections[index])
    }

    /// Lookup a collection by raw or canonical name.
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        let canonical = format_canonical_name(name);
        self.collections
            .iter()
            .find(|c| c.canonical_name == canonical)
    }

    pub fn collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        let canonical = format_canonical_name(name);
        self.collections
            .iter_mut()
            .find(|c| c.canonical_name == canonical)
    }
}

impl Collection {
    /// Add a term; its canonical name must satisfy the collection's term regex.
    pub fn add_term(&mut self, spec: TermSpec) -> Result<&mut Term, CvError> {
        let canonical_name = format_canonical_name(&spec.name);
        if canonical_name.is_empty() {
            return Err(CvError::EmptyName {
                kind: NodeKind::Term,
            });
        }
        if canonical_name == "." || canonical_name == ".." {
            return Err(CvError::ReservedName {
                kind: NodeKind::Term,
                name: spec.name,
                canonical: canonical_name,
            });
        }
        if !self.matcher()?.is_match(&canonical_name) {
            return Err(CvError::TermNameRejected {
                collection: self.namespace.clone(),
                name: spec.name,
                canonical: canonical_name,
                pattern: self.term_regex.clone(),
            });
        }
        if self.term(&canonical_name).is_some() {
            return Err(CvError::Duplicate {
                kind: NodeKind::Term,
                canonical: canonical_name,
                parent: self.namespace.clone(),
            });
        }

        let index = self.terms.len();
        self.terms.push(Term {
            label: spec.label.unwrap_or_else(|| spec.name.clone()),
            name: spec.name,
            namespace: join_namespace(&self.namespace, &canonical_name),
            canonical_name,
            uid: Uuid::new_v4(),
            description: spec.description,
            create_date: spec.create_date,
            data: spec.data,
        });
        Ok(&mut self.terms[index])
    }

    /// Lookup a term by raw or canonical name.
    pub fn term(&self, name: &str) -> Option<&Term> {
        let canonical = format_canonical_name(name);
        self.terms.iter().find(|t| t.canonical_name == canonical)
    }

    // Deserialized collections arrive without a compiled matcher.
    fn matcher(&mut self) -> Result<&Regex, CvError> {
        let matcher = match self.matcher.take() {
            Some(matcher) => matcher,
            None => compile_term_regex(&self.namespace, &self.term_regex)?,
        };
        Ok(self.matcher.insert(matcher))
    }
}

fn compile_term_regex(collection: &str, pattern: &str) -> Result<Regex, CvError> {
    Regex::new(pattern).map_err(|e| CvError::InvalidRegex {
        collection: collection.to_string(),
        message: e.to_string(),
    })
}
