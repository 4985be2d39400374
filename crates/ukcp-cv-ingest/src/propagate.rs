//! Identifier propagation over the built tree.
//!
//! A node whose namespace is already known takes the recorded uid; any
//! other node keeps its freshly minted uid and has it recorded.

use serde::Serialize;
use ukcp_cv_kernel::{Authority, NodeMut};
use ukcp_cv_store::UidMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropagationStats {
    pub reused: usize,
    pub recorded: usize,
}

/// Visit `node` and its descendants depth-first.
pub fn propagate_uids(mut node: NodeMut<'_>, uids: &mut UidMap, stats: &mut PropagationStats) {
    match uids.get(node.namespace()) {
        Some(uid) => {
            node.set_uid(uid);
            stats.reused += 1;
        }
        None => {
            uids.record(node.namespace(), node.uid());
            stats.recorded += 1;
        }
    }

    for child in node.into_children() {
        propagate_uids(child, uids, stats);
    }
}

pub fn assign_uids(authority: &mut Authority, uids: &mut UidMap) -> PropagationStats {
    let mut stats = PropagationStats::default();
    propagate_uids(NodeMut::from(authority), uids, &mut stats);
    tracing::debug!(reused = stats.reused, recorded = stats.recorded, "propagated uids");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ukcp_cv_kernel::{AuthoritySpec, CollectionSpec, ScopeSpec, TermSpec};

    fn tree() -> Authority {
        let now = Utc::now();
        let mut authority = Authority::new(AuthoritySpec {
            name: "UKCP".to_string(),
            description: String::new(),
            label: None,
            url: None,
            create_date: now,
        })
        .expect("authority should build");
        let scope = authority
            .add_scope(ScopeSpec {
                name: "GLOBAL".to_string(),
                description: String::new(),
                label: None,
                url: None,
                create_date: now,
            })
            .expect("scope should build");
        let collection = scope
            .add_collection(CollectionSpec {
                name: "activity_id".to_string(),
                description: String::new(),
                label: None,
                term_regex: None,
                data: None,
                is_virtual: false,
                create_date: now,
            })
            .expect("collection should build");
        for name in ["hist", "rcp85"] {
            collection
                .add_term(TermSpec {
                    name: name.to_string(),
                    label: None,
                    description: None,
                    data: None,
                    create_date: now,
                })
                .expect("term should build");
        }
        authority
    }

    #[test]
    fn empty_map_records_every_node() {
        let mut authority = tree();
        let mut uids = UidMap::new();
        let stats = assign_uids(&mut authority, &mut uids);

        assert_eq!(stats, PropagationStats { reused: 0, recorded: 5 });
        assert_eq!(uids.get("ukcp"), Some(authority.uid));
        assert_eq!(
            uids.get("ukcp:global:activity-id:rcp85"),
            Some(authority.scopes[0].collections[0].terms[1].uid)
        );
    }

    #[test]
    fn known_namespaces_reuse_recorded_uids() {
        let mut first = tree();
        let mut uids = UidMap::new();
        assign_uids(&mut first, &mut uids);

        let mut second = tree();
        assert_ne!(second.uid, first.uid);
        let stats = assign_uids(&mut second, &mut uids);

        assert_eq!(stats, PropagationStats { reused: 5, recorded: 0 });
        assert_eq!(second.uid, first.uid);
        assert_eq!(second.scopes[0].uid, first.scopes[0].uid);
        let first_terms = &first.scopes[0].collections[0].terms;
        let second_terms = &second.scopes[0].collections[0].terms;
        for (a, b) in first_terms.iter().zip(second_terms) {
            assert_eq!(a.uid, b.uid);
        }
    }

    #[test]
    fn new_nodes_are_recorded_alongside_reused_ones() {
        let mut uids = UidMap::new();
        let known = uuid::Uuid::new_v4();
        uids.record("ukcp:global", known);

        let mut authority = tree();
        let stats = assign_uids(&mut authority, &mut uids);
        assert_eq!(stats, PropagationStats { reused: 1, recorded: 4 });
        assert_eq!(authority.scopes[0].uid, known);
        assert_eq!(uids.len(), 5);
    }
}
