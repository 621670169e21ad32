//! # Mailclip Document
//!
//! The layout tree behind the email designer: typed nodes, the static
//! component registry that describes each node type, and an arena-backed
//! tree the editor mutates in place.
//!
//! ```text
//! Vec<Node> (JSON) ──from_nodes──▶ DocumentTree ──to_nodes──▶ Vec<Node> ──▶ serializer
//!                                      ▲
//!                                 mutations
//! ```

pub mod component;
pub mod error;
pub mod id_generator;
pub mod node;
pub mod registry;
pub mod tree;
pub mod validator;

pub use component::ComponentType;
pub use error::{TreeError, TreeResult};
pub use id_generator::{get_document_seed, IdGenerator};
pub use node::{Attributes, Node, NodeId};
pub use registry::{ComponentDefinition, ComponentGroup, Section};
pub use tree::{DocumentTree, Position, TreeNode};
pub use validator::{validate, TreeIssue};
