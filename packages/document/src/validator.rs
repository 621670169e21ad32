//! Structural checks for trees received from outside the editor.
//!
//! The serializer does not depend on these checks: it coerces whatever it
//! is given. They exist so a loader can report a bad file instead of
//! silently rendering it.

use crate::node::{Node, NodeId};
use crate::registry;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TreeIssue {
    DuplicateId(NodeId),
    /// Container type without a `children` field
    MissingChildren(NodeId),
    /// Leaf type carrying a `children` field
    UnexpectedChildren(NodeId),
    UnknownType { id: NodeId, tag: String },
}

impl TreeIssue {
    /// Unknown types still render, so they are reported but not fatal
    pub fn is_fatal(&self) -> bool {
        !matches!(self, TreeIssue::UnknownType { .. })
    }
}

impl fmt::Display for TreeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeIssue::DuplicateId(id) => write!(f, "duplicate node id '{}'", id),
            TreeIssue::MissingChildren(id) => write!(f, "container node '{}' has no children list", id),
            TreeIssue::UnexpectedChildren(id) => write!(f, "leaf node '{}' has a children list", id),
            TreeIssue::UnknownType { id, tag } => write!(f, "node '{}' has unregistered type '{}'", id, tag),
        }
    }
}

/// Collect every invariant violation in the tree, in document order
pub fn validate(nodes: &[Node]) -> Vec<TreeIssue> {
    let mut seen = HashSet::new();
    let mut issues = Vec::new();
    for root in nodes {
        root.walk(&mut |node| check_node(node, &mut seen, &mut issues));
    }
    issues
}

fn check_node<'a>(node: &'a Node, seen: &mut HashSet<&'a str>, issues: &mut Vec<TreeIssue>) {
    if !seen.insert(node.id.as_str()) {
        issues.push(TreeIssue::DuplicateId(node.id.clone()));
    }

    match registry::lookup(&node.component_type) {
        Some(def) if def.is_container && node.children.is_none() => {
            issues.push(TreeIssue::MissingChildren(node.id.clone()));
        }
        Some(def) if !def.is_container && node.children.is_some() => {
            issues.push(TreeIssue::UnexpectedChildren(node.id.clone()));
        }
        Some(_) => {}
        None => issues.push(TreeIssue::UnknownType {
            id: node.id.clone(),
            tag: node.component_type.tag().to_string(),
        }),
    }
}
