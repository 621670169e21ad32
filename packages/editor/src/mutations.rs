//! # Tree Mutations
//!
//! Semantic operations the designer performs on a template tree.
//!
//! Every mutation is validated against the current tree and, when applied,
//! returns its inverse. The undo stack stores those inverses, so undo never
//! has to diff snapshots.
//!
//! ### MoveNode
//! - `index` is the position among the new siblings once the node has been
//!   detached, clamped to their count
//! - Fails if the target parent is the node itself or one of its descendants
//!
//! ### RemoveNode
//! - Removes the node and all descendants
//! - The inverse re-inserts the full subtree at its old position

use mailclip_document::{validate, Attributes, DocumentTree, Node, NodeId, Position, TreeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a subtree under `parent_id` (`None` for top level)
    InsertNode {
        parent_id: Option<NodeId>,
        index: usize,
        node: Node,
    },

    /// Remove a node and its descendants
    RemoveNode { node_id: NodeId },

    /// Move a node to a new parent at index
    MoveNode {
        node_id: NodeId,
        new_parent_id: Option<NodeId>,
        index: usize,
    },

    /// Set one attribute value (blank values are kept but never emitted)
    SetAttribute {
        node_id: NodeId,
        name: String,
        value: String,
    },

    RemoveAttribute { node_id: NodeId, name: String },

    /// Replace the whole attribute bag
    SetAttributes {
        node_id: NodeId,
        attributes: Attributes,
    },

    /// Replace inline content (atomic, last write wins)
    SetContent {
        node_id: NodeId,
        content: Option<String>,
    },

    SetHidden { node_id: NodeId, hidden: bool },

    SetLabel {
        node_id: NodeId,
        label: Option<String>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Invalid node: {0}")]
    InvalidNode(String),
}

impl Mutation {
    /// Id of the node the mutation targets
    pub fn node_id(&self) -> &str {
        match self {
            Mutation::InsertNode { node, .. } => &node.id,
            Mutation::RemoveNode { node_id }
            | Mutation::MoveNode { node_id, .. }
            | Mutation::SetAttribute { node_id, .. }
            | Mutation::RemoveAttribute { node_id, .. }
            | Mutation::SetAttributes { node_id, .. }
            | Mutation::SetContent { node_id, .. }
            | Mutation::SetHidden { node_id, .. }
            | Mutation::SetLabel { node_id, .. } => node_id,
        }
    }

    /// Apply the mutation and return its inverse
    pub fn apply(&self, tree: &mut DocumentTree) -> Result<Mutation, MutationError> {
        self.validate(tree)?;

        match self {
            Mutation::InsertNode {
                parent_id,
                index,
                node,
            } => {
                let position = Position {
                    parent: parent_id.clone(),
                    index: *index,
                };
                tree.insert_node(&position, node.clone())?;
                Ok(Mutation::RemoveNode {
                    node_id: node.id.clone(),
                })
            }

            Mutation::RemoveNode { node_id } => {
                let (node, position) = tree.remove_node(node_id)?;
                Ok(Mutation::InsertNode {
                    parent_id: position.parent,
                    index: position.index,
                    node,
                })
            }

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => {
                let target = Position {
                    parent: new_parent_id.clone(),
                    index: *index,
                };
                let previous = tree.move_node(node_id, &target)?;
                Ok(Mutation::MoveNode {
                    node_id: node_id.clone(),
                    new_parent_id: previous.parent,
                    index: previous.index,
                })
            }

            Mutation::SetAttribute {
                node_id,
                name,
                value,
            } => {
                let inverse = match tree.set_attribute(node_id, name, value)? {
                    Some(previous) => Mutation::SetAttribute {
                        node_id: node_id.clone(),
                        name: name.clone(),
                        value: previous,
                    },
                    None => Mutation::RemoveAttribute {
                        node_id: node_id.clone(),
                        name: name.clone(),
                    },
                };
                Ok(inverse)
            }

            Mutation::RemoveAttribute { node_id, name } => {
                // Restoring the full bag keeps the attribute's original position
                let before = tree
                    .get(node_id)
                    .map(|n| n.attributes.clone())
                    .ok_or_else(|| TreeError::NodeNotFound(node_id.clone()))?;
                tree.remove_attribute(node_id, name)?;
                Ok(Mutation::SetAttributes {
                    node_id: node_id.clone(),
                    attributes: before,
                })
            }

            Mutation::SetAttributes {
                node_id,
                attributes,
            } => {
                let previous = tree.replace_attributes(node_id, attributes.clone())?;
                Ok(Mutation::SetAttributes {
                    node_id: node_id.clone(),
                    attributes: previous,
                })
            }

            Mutation::SetContent { node_id, content } => {
                let previous = tree.set_content(node_id, content.clone())?;
                Ok(Mutation::SetContent {
                    node_id: node_id.clone(),
                    content: previous,
                })
            }

            Mutation::SetHidden { node_id, hidden } => {
                let previous = tree.set_hidden(node_id, *hidden)?;
                Ok(Mutation::SetHidden {
                    node_id: node_id.clone(),
                    hidden: previous,
                })
            }

            Mutation::SetLabel { node_id, label } => {
                let previous = tree.set_label(node_id, label.clone())?;
                Ok(Mutation::SetLabel {
                    node_id: node_id.clone(),
                    label: previous,
                })
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, tree: &DocumentTree) -> Result<(), MutationError> {
        match self {
            Mutation::InsertNode { parent_id, node, .. } => {
                if let Some(parent) = parent_id {
                    let entry = tree
                        .get(parent)
                        .ok_or_else(|| TreeError::ParentNotFound(parent.clone()))?;
                    if !entry.is_container() {
                        return Err(TreeError::NotAContainer(parent.clone()).into());
                    }
                }

                let issues: Vec<String> = validate(std::slice::from_ref(node))
                    .into_iter()
                    .filter(|issue| issue.is_fatal())
                    .map(|issue| issue.to_string())
                    .collect();
                if !issues.is_empty() {
                    return Err(MutationError::InvalidNode(issues.join("; ")));
                }
                Ok(())
            }

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                ..
            } => {
                if !tree.contains(node_id) {
                    return Err(TreeError::NodeNotFound(node_id.clone()).into());
                }
                if let Some(parent) = new_parent_id {
                    if !tree.contains(parent) {
                        return Err(TreeError::ParentNotFound(parent.clone()).into());
                    }
                    if tree.is_descendant_of(parent, node_id) {
                        return Err(TreeError::CycleDetected(node_id.clone(), parent.clone()).into());
                    }
                }
                Ok(())
            }

            other => {
                let node_id = other.node_id();
                if tree.contains(node_id) {
                    Ok(())
                } else {
                    Err(TreeError::NodeNotFound(node_id.to_string()).into())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailclip_document::ComponentType;

    fn sample() -> DocumentTree {
        DocumentTree::from_nodes(vec![Node::new("s", ComponentType::Section).with_children(vec![
            Node::new("c", ComponentType::Column).with_children(vec![
                Node::new("t", ComponentType::Text)
                    .with_attribute("color", "#111111")
                    .with_attribute("align", "left")
                    .with_content("Hello"),
            ]),
        ])])
        .unwrap()
    }

    fn assert_inverse_restores(mutation: Mutation) {
        let mut tree = sample();
        let before = tree.to_nodes();

        let inverse = mutation.apply(&mut tree).unwrap();
        assert_ne!(tree.to_nodes(), before, "{:?} changed nothing", mutation);

        inverse.apply(&mut tree).unwrap();
        assert_eq!(tree.to_nodes(), before, "{:?} was not undone", mutation);
    }

    #[test]
    fn test_every_mutation_inverts() {
        let mutations = vec![
            Mutation::InsertNode {
                parent_id: Some("c".to_string()),
                index: 0,
                node: Node::from_definition("new", ComponentType::Divider),
            },
            Mutation::RemoveNode {
                node_id: "c".to_string(),
            },
            Mutation::MoveNode {
                node_id: "t".to_string(),
                new_parent_id: None,
                index: 0,
            },
            Mutation::SetAttribute {
                node_id: "t".to_string(),
                name: "color".to_string(),
                value: "#ff0000".to_string(),
            },
            Mutation::SetAttribute {
                node_id: "t".to_string(),
                name: "font-size".to_string(),
                value: "18px".to_string(),
            },
            Mutation::RemoveAttribute {
                node_id: "t".to_string(),
                name: "color".to_string(),
            },
            Mutation::SetAttributes {
                node_id: "t".to_string(),
                attributes: Attributes::new(),
            },
            Mutation::SetContent {
                node_id: "t".to_string(),
                content: Some("Goodbye".to_string()),
            },
            Mutation::SetHidden {
                node_id: "c".to_string(),
                hidden: true,
            },
            Mutation::SetLabel {
                node_id: "s".to_string(),
                label: Some("Hero".to_string()),
            },
        ];

        for mutation in mutations {
            assert_inverse_restores(mutation);
        }
    }

    #[test]
    fn test_insert_into_leaf_rejected() {
        let mut tree = sample();
        let err = Mutation::InsertNode {
            parent_id: Some("t".to_string()),
            index: 0,
            node: Node::from_definition("x", ComponentType::Spacer),
        }
        .apply(&mut tree)
        .unwrap_err();

        assert_eq!(err, MutationError::Tree(TreeError::NotAContainer("t".to_string())));
    }

    #[test]
    fn test_insert_malformed_node_rejected() {
        let mut tree = sample();
        let err = Mutation::InsertNode {
            parent_id: None,
            index: 0,
            node: Node::new("bad", ComponentType::Section),
        }
        .apply(&mut tree)
        .unwrap_err();

        assert!(matches!(err, MutationError::InvalidNode(_)));
        assert!(!tree.contains("bad"));
    }

    #[test]
    fn test_move_into_descendant_rejected() {
        let tree = sample();
        let mutation = Mutation::MoveNode {
            node_id: "s".to_string(),
            new_parent_id: Some("c".to_string()),
            index: 0,
        };

        assert_eq!(
            mutation.validate(&tree),
            Err(MutationError::Tree(TreeError::CycleDetected(
                "s".to_string(),
                "c".to_string()
            )))
        );
    }

    #[test]
    fn test_missing_node_reported() {
        let mut tree = sample();
        let err = Mutation::SetContent {
            node_id: "ghost".to_string(),
            content: None,
        }
        .apply(&mut tree)
        .unwrap_err();

        assert_eq!(err.to_string(), "Node not found: ghost");
    }

    #[test]
    fn test_mutation_json_round_trip() {
        let mutation = Mutation::MoveNode {
            node_id: "t".to_string(),
            new_parent_id: Some("c".to_string()),
            index: 2,
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let back: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mutation);
    }
}
