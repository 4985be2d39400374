//! Uniform traversal over the CV tree.

use uuid::Uuid;

use crate::model::{Authority, Collection, Scope, Term};

/// Which level of the tree a node sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Authority,
    Scope,
    Collection,
    Term,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Authority => "authority",
            NodeKind::Scope => "scope",
            NodeKind::Collection => "collection",
            NodeKind::Term => "term",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable handle on any node in the tree.
///
/// Each variant knows its own children; terms are leaves.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Authority(&'a mut Authority),
    Scope(&'a mut Scope),
    Collection(&'a mut Collection),
    Term(&'a mut Term),
}

impl<'a> NodeMut<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeMut::Authority(_) => NodeKind::Authority,
            NodeMut::Scope(_) => NodeKind::Scope,
            NodeMut::Collection(_) => NodeKind::Collection,
            NodeMut::Term(_) => NodeKind::Term,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            NodeMut::Authority(node) => &node.namespace,
            NodeMut::Scope(node) => &node.namespace,
            NodeMut::Collection(node) => &node.namespace,
            NodeMut::Term(node) => &node.namespace,
        }
    }

    pub fn uid(&self) -> Uuid {
        match self {
            NodeMut::Authority(node) => node.uid,
            NodeMut::Scope(node) => node.uid,
            NodeMut::Collection(node) => node.uid,
            NodeMut::Term(node) => node.uid,
        }
    }

    pub fn set_uid(&mut self, uid: Uuid) {
        match self {
            NodeMut::Authority(node) => node.uid = uid,
            NodeMut::Scope(node) => node.uid = uid,
            NodeMut::Collection(node) => node.uid = uid,
            NodeMut::Term(node) => node.uid = uid,
        }
    }

    /// Consume the handle and hand out handles on the children, in order.
    pub fn into_children(self) -> Vec<NodeMut<'a>> {
        match self {
            NodeMut::Authority(node) => node.scopes.iter_mut().map(NodeMut::Scope).collect(),
            NodeMut::Scope(node) => node
                .collections
                .iter_mut()
                .map(NodeMut::Collection)
                .collect(),
            NodeMut::Collection(node) => node.terms.iter_mut().map(NodeMut::Term).collect(),
            NodeMut::Term(_) => Vec::new(),
        }
    }
}

impl<'a> From<&'a mut Authority> for NodeMut<'a> {
    fn from(node: &'a mut Authority) -> Self {
        NodeMut::Authority(node)
    }
}
