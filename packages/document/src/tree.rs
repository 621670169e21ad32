//! # Document Tree
//!
//! Editable form of the layout tree. Nodes live in an arena keyed by id and
//! refer to each other through explicit parent/child id lists, so a move or
//! removal touches only the two sibling lists involved instead of copying
//! the path from the root.
//!
//! The nested [`Node`] form is the interchange format: trees come in via
//! [`DocumentTree::from_nodes`] and leave as a snapshot via
//! [`DocumentTree::to_nodes`], which is what the serializer consumes.

use crate::component::ComponentType;
use crate::error::{TreeError, TreeResult};
use crate::id_generator::IdGenerator;
use crate::node::{Attributes, Node, NodeId};
use std::collections::HashMap;

/// Arena entry
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub component_type: ComponentType,
    pub attributes: Attributes,
    pub content: Option<String>,
    pub hidden: bool,
    pub label: Option<String>,
    parent: Option<NodeId>,
    children: Option<Vec<NodeId>>,
}

impl TreeNode {
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Child ids, `None` for leaf nodes
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }
}

/// Where a node sits: its parent (`None` for a root) and sibling index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub parent: Option<NodeId>,
    pub index: usize,
}

impl Position {
    pub fn root(index: usize) -> Self {
        Self { parent: None, index }
    }

    pub fn child_of(parent: impl Into<NodeId>, index: usize) -> Self {
        Self {
            parent: Some(parent.into()),
            index,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTree {
    nodes: HashMap<NodeId, TreeNode>,
    roots: Vec<NodeId>,
}

impl DocumentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the arena from a nested tree. Fails on duplicate ids.
    pub fn from_nodes(nodes: Vec<Node>) -> TreeResult<Self> {
        let mut tree = Self::new();
        for node in nodes {
            let id = node.id.clone();
            tree.adopt(node, None)?;
            tree.roots.push(id);
        }
        Ok(tree)
    }

    /// Nested snapshot of the whole tree
    pub fn to_nodes(&self) -> Vec<Node> {
        self.roots
            .iter()
            .filter_map(|id| self.snapshot(id))
            .collect()
    }

    /// Nested snapshot of one subtree
    pub fn snapshot(&self, id: &str) -> Option<Node> {
        let entry = self.nodes.get(id)?;
        let children = entry
            .children
            .as_ref()
            .map(|ids| ids.iter().filter_map(|child| self.snapshot(child)).collect());

        Some(Node {
            id: entry.id.clone(),
            component_type: entry.component_type.clone(),
            attributes: entry.attributes.clone(),
            content: entry.content.clone(),
            children,
            hidden: entry.hidden.then_some(true),
            label: entry.label.clone(),
        })
    }

    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of every node in depth-first document order
    pub fn ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<&NodeId> = self.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id.clone());
            if let Some(children) = self.nodes.get(id).and_then(|n| n.children.as_ref()) {
                stack.extend(children.iter().rev());
            }
        }
        out
    }

    pub fn position_of(&self, id: &str) -> TreeResult<Position> {
        let entry = self.entry(id)?;
        let siblings = self.siblings(entry.parent.as_deref())?;
        let index = siblings
            .iter()
            .position(|sibling| sibling == id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?;

        Ok(Position {
            parent: entry.parent.clone(),
            index,
        })
    }

    /// Whether `id` is `ancestor` or lies somewhere beneath it
    pub fn is_descendant_of(&self, id: &str, ancestor: &str) -> bool {
        let mut current = Some(id);
        while let Some(cursor) = current {
            if cursor == ancestor {
                return true;
            }
            current = self.nodes.get(cursor).and_then(|n| n.parent.as_deref());
        }
        false
    }

    /// Insert a whole subtree. `index` is clamped to the sibling count.
    pub fn insert_node(&mut self, position: &Position, node: Node) -> TreeResult<()> {
        self.check_insertable(&node)?;
        self.siblings(position.parent.as_deref())?;

        let id = node.id.clone();
        self.adopt(node, position.parent.clone())?;

        let siblings = self.siblings_mut(position.parent.as_deref())?;
        let index = position.index.min(siblings.len());
        siblings.insert(index, id);
        Ok(())
    }

    /// Create a node of `component_type` from registry defaults
    pub fn create_node(
        &mut self,
        position: &Position,
        component_type: ComponentType,
        ids: &mut IdGenerator,
    ) -> TreeResult<NodeId> {
        let node = Node::from_definition(ids.new_id(), component_type);
        let id = node.id.clone();
        self.insert_node(position, node)?;
        Ok(id)
    }

    /// Remove a node and all its descendants. Returns the removed subtree and
    /// where it used to be.
    pub fn remove_node(&mut self, id: &str) -> TreeResult<(Node, Position)> {
        let position = self.position_of(id)?;
        let snapshot = self
            .snapshot(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?;

        self.siblings_mut(position.parent.as_deref())?
            .remove(position.index);

        let mut pending = vec![id.to_string()];
        while let Some(next) = pending.pop() {
            if let Some(entry) = self.nodes.remove(&next) {
                pending.extend(entry.children.into_iter().flatten());
            }
        }

        Ok((snapshot, position))
    }

    /// Relocate a node. `target.index` is the index among the new siblings
    /// after the node has been detached, clamped to their count. Returns the
    /// previous position.
    pub fn move_node(&mut self, id: &str, target: &Position) -> TreeResult<Position> {
        self.entry(id)?;
        if let Some(parent) = target.parent.as_deref() {
            let parent_entry = self.entry(parent).map_err(|_| TreeError::ParentNotFound(parent.to_string()))?;
            if parent_entry.children.is_none() {
                return Err(TreeError::NotAContainer(parent.to_string()));
            }
            if self.is_descendant_of(parent, id) {
                return Err(TreeError::CycleDetected(id.to_string(), parent.to_string()));
            }
        }

        let previous = self.position_of(id)?;
        self.siblings_mut(previous.parent.as_deref())?
            .remove(previous.index);

        let siblings = self.siblings_mut(target.parent.as_deref())?;
        let index = target.index.min(siblings.len());
        siblings.insert(index, id.to_string());

        if let Some(entry) = self.nodes.get_mut(id) {
            entry.parent = target.parent.clone();
        }
        Ok(previous)
    }

    /// Set an attribute, returning the previous value
    pub fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> TreeResult<Option<String>> {
        Ok(self.entry_mut(id)?.attributes.set(name, value))
    }

    pub fn remove_attribute(&mut self, id: &str, name: &str) -> TreeResult<Option<String>> {
        Ok(self.entry_mut(id)?.attributes.remove(name))
    }

    /// Replace the whole attribute bag, returning the previous one
    pub fn replace_attributes(&mut self, id: &str, attributes: Attributes) -> TreeResult<Attributes> {
        let entry = self.entry_mut(id)?;
        Ok(std::mem::replace(&mut entry.attributes, attributes))
    }

    /// Replace inline content, returning the previous value
    pub fn set_content(&mut self, id: &str, content: Option<String>) -> TreeResult<Option<String>> {
        let entry = self.entry_mut(id)?;
        Ok(std::mem::replace(&mut entry.content, content))
    }

    pub fn set_hidden(&mut self, id: &str, hidden: bool) -> TreeResult<bool> {
        let entry = self.entry_mut(id)?;
        Ok(std::mem::replace(&mut entry.hidden, hidden))
    }

    pub fn set_label(&mut self, id: &str, label: Option<String>) -> TreeResult<Option<String>> {
        let entry = self.entry_mut(id)?;
        Ok(std::mem::replace(&mut entry.label, label))
    }

    fn entry(&self, id: &str) -> TreeResult<&TreeNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))
    }

    fn entry_mut(&mut self, id: &str) -> TreeResult<&mut TreeNode> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))
    }

    fn siblings(&self, parent: Option<&str>) -> TreeResult<&Vec<NodeId>> {
        match parent {
            None => Ok(&self.roots),
            Some(parent) => self
                .nodes
                .get(parent)
                .ok_or_else(|| TreeError::ParentNotFound(parent.to_string()))?
                .children
                .as_ref()
                .ok_or_else(|| TreeError::NotAContainer(parent.to_string())),
        }
    }

    fn siblings_mut(&mut self, parent: Option<&str>) -> TreeResult<&mut Vec<NodeId>> {
        match parent {
            None => Ok(&mut self.roots),
            Some(parent) => self
                .nodes
                .get_mut(parent)
                .ok_or_else(|| TreeError::ParentNotFound(parent.to_string()))?
                .children
                .as_mut()
                .ok_or_else(|| TreeError::NotAContainer(parent.to_string())),
        }
    }

    /// Reject a subtree whose ids collide with the tree or with each other
    fn check_insertable(&self, node: &Node) -> TreeResult<()> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicate = None;
        node.walk(&mut |n| {
            if duplicate.is_none() && (self.nodes.contains_key(&n.id) || !seen.insert(n.id.as_str())) {
                duplicate = Some(n.id.clone());
            }
        });
        match duplicate {
            Some(id) => Err(TreeError::DuplicateId(id)),
            None => Ok(()),
        }
    }

    /// Move a nested node and its descendants into the arena. The caller
    /// links the root id into its sibling list.
    fn adopt(&mut self, node: Node, parent: Option<NodeId>) -> TreeResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(TreeError::DuplicateId(node.id));
        }

        let Node {
            id,
            component_type,
            attributes,
            content,
            children,
            hidden,
            label,
        } = node;

        let mut child_ids = children.as_ref().map(|c| Vec::with_capacity(c.len()));
        self.nodes.insert(
            id.clone(),
            TreeNode {
                id: id.clone(),
                component_type,
                attributes,
                content,
                hidden: hidden.unwrap_or(false),
                label,
                parent,
                children: None,
            },
        );

        for child in children.into_iter().flatten() {
            if let Some(ids) = child_ids.as_mut() {
                ids.push(child.id.clone());
            }
            self.adopt(child, Some(id.clone()))?;
        }

        if let Some(entry) = self.nodes.get_mut(&id) {
            entry.children = child_ids;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocumentTree {
        DocumentTree::from_nodes(vec![
            Node::new("s1", ComponentType::Section).with_children(vec![
                Node::new("c1", ComponentType::Column).with_children(vec![
                    Node::new("t1", ComponentType::Text).with_content("One"),
                    Node::new("t2", ComponentType::Text).with_content("Two"),
                ]),
                Node::new("c2", ComponentType::Column).with_children(vec![]),
            ]),
            Node::new("s2", ComponentType::Section).with_children(vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn test_round_trip_snapshot() {
        let nodes = vec![Node::new("s1", ComponentType::Section)
            .with_label("Header")
            .with_hidden(true)
            .with_children(vec![Node::new("t1", ComponentType::Text).with_content("Hi")])];

        let tree = DocumentTree::from_nodes(nodes.clone()).unwrap();
        assert_eq!(tree.to_nodes(), nodes);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = DocumentTree::from_nodes(vec![
            Node::new("x", ComponentType::Text),
            Node::new("x", ComponentType::Text),
        ]);
        assert_eq!(result, Err(TreeError::DuplicateId("x".to_string())));
    }

    #[test]
    fn test_ids_in_document_order() {
        assert_eq!(sample().ids(), vec!["s1", "c1", "t1", "t2", "c2", "s2"]);
    }

    #[test]
    fn test_move_between_parents() {
        let mut tree = sample();
        let previous = tree.move_node("t1", &Position::child_of("c2", 0)).unwrap();

        assert_eq!(previous, Position::child_of("c1", 0));
        assert_eq!(tree.get("c1").unwrap().children().unwrap(), ["t2".to_string()]);
        assert_eq!(tree.get("c2").unwrap().children().unwrap(), ["t1".to_string()]);
        assert_eq!(tree.get("t1").unwrap().parent(), Some("c2"));
    }

    #[test]
    fn test_move_within_same_parent_clamps_index() {
        let mut tree = sample();
        tree.move_node("t1", &Position::child_of("c1", 99)).unwrap();
        assert_eq!(
            tree.get("c1").unwrap().children().unwrap(),
            ["t2".to_string(), "t1".to_string()]
        );
    }

    #[test]
    fn test_move_to_root() {
        let mut tree = sample();
        tree.move_node("c2", &Position::root(0)).unwrap();
        assert_eq!(tree.roots(), ["c2".to_string(), "s1".to_string(), "s2".to_string()]);
        assert_eq!(tree.get("c2").unwrap().parent(), None);
    }

    #[test]
    fn test_move_into_own_descendant_fails() {
        let mut tree = sample();
        let err = tree.move_node("s1", &Position::child_of("c1", 0)).unwrap_err();
        assert_eq!(err, TreeError::CycleDetected("s1".to_string(), "c1".to_string()));

        let err = tree.move_node("c1", &Position::child_of("c1", 0)).unwrap_err();
        assert!(matches!(err, TreeError::CycleDetected(..)));
    }

    #[test]
    fn test_move_into_leaf_fails() {
        let mut tree = sample();
        let err = tree.move_node("t2", &Position::child_of("t1", 0)).unwrap_err();
        assert_eq!(err, TreeError::NotAContainer("t1".to_string()));
    }

    #[test]
    fn test_remove_cascades() {
        let mut tree = sample();
        let (removed, position) = tree.remove_node("c1").unwrap();

        assert_eq!(position, Position::child_of("s1", 0));
        assert_eq!(removed.children().len(), 2);
        assert!(!tree.contains("c1"));
        assert!(!tree.contains("t1"));
        assert!(!tree.contains("t2"));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_remove_then_reinsert_restores_tree() {
        let mut tree = sample();
        let before = tree.to_nodes();

        let (removed, position) = tree.remove_node("c1").unwrap();
        tree.insert_node(&position, removed).unwrap();

        assert_eq!(tree.to_nodes(), before);
    }

    #[test]
    fn test_insert_rejects_colliding_subtree() {
        let mut tree = sample();
        let node = Node::new("fresh", ComponentType::Column)
            .with_children(vec![Node::new("t1", ComponentType::Text)]);

        let err = tree.insert_node(&Position::child_of("s2", 0), node).unwrap_err();
        assert_eq!(err, TreeError::DuplicateId("t1".to_string()));
        assert!(!tree.contains("fresh"));
    }

    #[test]
    fn test_create_node_uses_registry_defaults() {
        let mut tree = sample();
        let mut ids = IdGenerator::from_seed("doc".to_string());

        let id = tree
            .create_node(&Position::child_of("c2", 0), ComponentType::Button, &mut ids)
            .unwrap();

        let node = tree.get(&id).unwrap();
        assert_eq!(id, "doc-1");
        assert_eq!(node.content.as_deref(), Some("Click me"));
        assert_eq!(node.attributes.get("href"), Some("#"));
    }

    #[test]
    fn test_property_edits_return_previous_values() {
        let mut tree = sample();

        assert_eq!(tree.set_attribute("t1", "color", "red").unwrap(), None);
        assert_eq!(tree.set_attribute("t1", "color", "blue").unwrap(), Some("red".to_string()));
        assert_eq!(tree.remove_attribute("t1", "color").unwrap(), Some("blue".to_string()));
        assert_eq!(tree.set_content("t1", Some("Uno".to_string())).unwrap(), Some("One".to_string()));
        assert!(!tree.set_hidden("t1", true).unwrap());
        assert_eq!(tree.set_label("t1", Some("Intro".to_string())).unwrap(), None);

        assert_eq!(
            tree.set_attribute("missing", "a", "b"),
            Err(TreeError::NodeNotFound("missing".to_string()))
        );
    }
}
