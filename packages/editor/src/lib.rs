//! # Mailclip Editor
//!
//! Editing engine behind the email designer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: Node tree + component registry    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save tree files                     │
//! │  - Apply mutations with validation          │
//! │  - Undo/redo with recorded inverses         │
//! │  - Template records for persistence         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-mjml: tree → MJML markup           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailclip_editor::{Document, Mutation};
//! use mailclip_document::ComponentType;
//!
//! let mut doc = Document::load("welcome.tree.json")?;
//!
//! let section = doc.create_node(None, 0, ComponentType::Section)?;
//! doc.apply(Mutation::SetAttribute {
//!     node_id: section,
//!     name: "background-color".to_string(),
//!     value: "#f4f4f4".to_string(),
//! })?;
//!
//! let markup = doc.markup();
//! doc.save()?;
//! ```

mod document;
mod errors;
mod mutations;
mod record;
mod undo_stack;

pub use document::{Document, DocumentStorage, MutationResult};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError};
pub use record::{CompileRequest, CompileResponse, CompileWarning, CompiledHtml, TemplateRecord};
pub use undo_stack::{MutationBatch, UndoStack};

// Re-export common types for convenience
pub use mailclip_compiler_mjml::SerializeOptions;
pub use mailclip_document::{ComponentType, Node, NodeId};
