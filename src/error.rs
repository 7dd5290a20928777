use thiserror::Error;

use crate::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A non-indirect object was reached again while it was still being inlined.
    /// Marking one object on the cycle as indirect breaks the recursion.
    #[error("circular reference encountered in non-indirect object {node}: {object}")]
    CircularReference { node: NodeId, object: String },
    /// A precondition of the public API was not met by the caller.
    #[error("contract violation: {0}")]
    ContractViolation(String),
    /// The node id does not belong to this document.
    #[error("node {0} not found in document")]
    NodeNotFound(NodeId),
    /// IO error
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}
