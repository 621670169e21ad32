use thiserror::Error;

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Node {0} cannot have children")]
    NotAContainer(String),

    #[error("Moving {0} under {1} would create a cycle")]
    CycleDetected(String, String),
}
