//! Canonical naming rules.
//!
//! Raw names are kept verbatim on every node; the canonical form is what
//! namespaces are built from and what term regexes are checked against.

use crate::error::CvError;
use crate::node::NodeKind;
use regex::Regex;
use std::sync::OnceLock;

/// Default pattern for canonical names (and default term regex).
pub const REGEX_CANONICAL_NAME: &str = r"^[a-z0-9\-]*$";

/// Separator between namespace segments.
pub const NAMESPACE_SEPARATOR: char = ':';

fn canonical_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REGEX_CANONICAL_NAME).expect("canonical-name regex must compile"))
}

/// Trim, lower-case, and turn underscores and spaces into hyphens.
pub fn format_canonical_name(name: &str) -> String {
    name.trim().to_lowercase().replace(['_', ' '], "-")
}

/// Canonicalize a structural (non-term) node name and check it.
pub fn validate_canonical_name(kind: NodeKind, name: &str) -> Result<String, CvError> {
    let canonical = format_canonical_name(name);
    if canonical.is_empty() {
        return Err(CvError::EmptyName { kind });
    }
    if !canonical_name_re().is_match(&canonical) {
        return Err(CvError::InvalidName {
            kind,
            name: name.to_string(),
            canonical,
            pattern: REGEX_CANONICAL_NAME.to_string(),
        });
    }
    Ok(canonical)
}

/// Namespace of a child node under `parent`.
pub fn join_namespace(parent: &str, canonical: &str) -> String {
    format!("{parent}{NAMESPACE_SEPARATOR}{canonical}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_lowercases_and_hyphenates() {
        assert_eq!(format_canonical_name("  Source_ID "), "source-id");
        assert_eq!(format_canonical_name("Admin Region"), "admin-region");
        assert_eq!(format_canonical_name("rcp85"), "rcp85");
    }

    #[test]
    fn validate_rejects_empty_and_illegal_names() {
        assert!(matches!(
            validate_canonical_name(NodeKind::Scope, "   "),
            Err(CvError::EmptyName {
                kind: NodeKind::Scope
            })
        ));
        match validate_canonical_name(NodeKind::Collection, "bad.name") {
            Err(CvError::InvalidName { canonical, .. }) => assert_eq!(canonical, "bad.name"),
            other => panic!("expected invalid name, got {other:?}"),
        }
        assert_eq!(
            validate_canonical_name(NodeKind::Authority, "UKCP").expect("valid"),
            "ukcp"
        );
    }

    #[test]
    fn namespace_joins_with_colon() {
        assert_eq!(join_namespace("ukcp:ukcp18", "variable"), "ukcp:ukcp18:variable");
    }
}
