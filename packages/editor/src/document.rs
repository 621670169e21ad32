//! # Document Handle
//!
//! A Document is one email template and its editing state.
//! Documents can be:
//! - **Memory-backed**: built from a tree in memory (tests, previews)
//! - **File-backed**: loaded from and saved to a `*.tree.json` file
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Serialize → Save
//!   ↓      ↓        ↓         ↓
//! JSON  Mutations  MJML     JSON
//! ```

use crate::record::{CompileRequest, TemplateRecord};
use crate::{EditorError, Mutation, UndoStack};
use mailclip_compiler_mjml::{serialize_with_options, SerializeOptions};
use mailclip_document::{
    get_document_seed, validate, ComponentType, DocumentTree, IdGenerator, Node, NodeId, Position,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,
}

/// Storage backend for a document
#[derive(Debug)]
pub enum DocumentStorage {
    Memory,
    File { path: PathBuf, dirty: bool },
}

/// Editable email template
#[derive(Debug)]
pub struct Document {
    pub name: String,

    /// Increments on every applied, undone or redone mutation
    pub version: u64,

    tree: DocumentTree,
    ids: IdGenerator,
    history: UndoStack,
    storage: DocumentStorage,
}

impl Document {
    /// Create a memory-backed document from a nested tree
    pub fn from_nodes(name: impl Into<String>, nodes: Vec<Node>) -> Result<Self, EditorError> {
        let name = name.into();
        let fatal: Vec<String> = validate(&nodes)
            .into_iter()
            .filter(|issue| issue.is_fatal())
            .map(|issue| issue.to_string())
            .collect();
        if !fatal.is_empty() {
            return Err(EditorError::InvalidTree(fatal.join("; ")));
        }

        let ids = IdGenerator::resume(get_document_seed(&name), &nodes);
        let tree = DocumentTree::from_nodes(nodes)?;

        Ok(Self {
            name,
            version: 0,
            tree,
            ids,
            history: UndoStack::new(),
            storage: DocumentStorage::Memory,
        })
    }

    /// Load a file-backed document from a JSON tree file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let nodes: Vec<Node> = serde_json::from_str(&source)?;

        let mut doc = Self::from_nodes(template_name(path), nodes)?;
        doc.storage = DocumentStorage::File {
            path: path.to_path_buf(),
            dirty: false,
        };

        info!(nodes = doc.tree.len(), "Loaded template");
        Ok(doc)
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    /// Nested snapshot of the current tree
    pub fn nodes(&self) -> Vec<Node> {
        self.tree.to_nodes()
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            DocumentStorage::File { path, .. } => Some(path),
            DocumentStorage::Memory => None,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        debug!(node_id = %mutation.node_id(), ?mutation, "Applying mutation");
        self.history.apply(&mutation, &mut self.tree)?;
        Ok(self.touch())
    }

    /// Apply several mutations as one undo step
    pub fn apply_batch(
        &mut self,
        description: impl Into<String>,
        mutations: Vec<Mutation>,
    ) -> Result<MutationResult, EditorError> {
        self.history.begin_batch();
        self.history.set_batch_description(description);

        for mutation in &mutations {
            if let Err(err) = self.history.apply(mutation, &mut self.tree) {
                self.history.abort_batch(&mut self.tree)?;
                return Err(err.into());
            }
        }

        self.history.end_batch();
        Ok(self.touch())
    }

    /// Create a node of `component_type` from registry defaults
    pub fn create_node(
        &mut self,
        parent_id: Option<&str>,
        index: usize,
        component_type: ComponentType,
    ) -> Result<NodeId, EditorError> {
        let node = Node::from_definition(self.ids.new_id(), component_type);
        let id = node.id.clone();
        self.apply(Mutation::InsertNode {
            parent_id: parent_id.map(str::to_string),
            index,
            node,
        })?;
        Ok(id)
    }

    /// Undo the last change. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let undone = self.history.undo(&mut self.tree)?;
        if undone {
            self.touch();
        }
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let redone = self.history.redo(&mut self.tree)?;
        if redone {
            self.touch();
        }
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn position_of(&self, node_id: &str) -> Result<Position, EditorError> {
        Ok(self.tree.position_of(node_id)?)
    }

    /// Markup for the current tree with default options
    pub fn markup(&self) -> String {
        self.markup_with_options(&SerializeOptions::default())
    }

    pub fn markup_with_options(&self, options: &SerializeOptions) -> String {
        serialize_with_options(&self.tree.to_nodes(), options)
    }

    /// Request body for the external HTML compiler
    pub fn compile_request(&self, options: &SerializeOptions) -> CompileRequest {
        CompileRequest {
            markup: self.markup_with_options(options),
        }
    }

    /// Snapshot for persistence or clipboard export
    pub fn to_record(&self, options: &SerializeOptions) -> TemplateRecord {
        TemplateRecord::new(self.name.clone(), self.tree.to_nodes(), options)
    }

    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory => false,
        }
    }

    /// Save the tree back to its file (if file-backed)
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn save(&mut self) -> Result<(), EditorError> {
        let json = serde_json::to_string_pretty(&self.tree.to_nodes())?;
        match &mut self.storage {
            DocumentStorage::File { path, dirty } => {
                std::fs::write(path.as_path(), json)?;
                *dirty = false;
                info!(path = %path.display(), "Saved template");
                Ok(())
            }
            DocumentStorage::Memory => Err(EditorError::NotFileBacked),
        }
    }

    fn touch(&mut self) -> MutationResult {
        self.version += 1;
        if let DocumentStorage::File { dirty, .. } = &mut self.storage {
            *dirty = true;
        }
        MutationResult {
            version: self.version,
        }
    }
}

/// `welcome.tree.json` → `welcome`
fn template_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    file_name
        .strip_suffix(".tree.json")
        .or_else(|| file_name.strip_suffix(".json"))
        .unwrap_or(&file_name)
        .to_string()
}
