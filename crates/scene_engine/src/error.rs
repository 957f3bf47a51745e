//! Scene error types

use thiserror::Error;

use crate::foundation::collections::NodeId;

/// Result alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised by scene registry, ordering and traversal operations
///
/// All of these indicate caller misuse. A failed call leaves the scene unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Index outside `[0, len)` for the container's child list
    #[error("Index {index} out of range for container with {len} children")]
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of children at the time of the call
        len: usize,
    },

    /// One or more nodes are not registered in the container
    #[error("Nodes {nodes:?} are not children of container {parent:?}")]
    NotAChild {
        /// Container that was queried
        parent: NodeId,
        /// Nodes named by the failing call
        nodes: Vec<NodeId>,
    },

    /// The handle does not refer to a live node
    #[error("Unknown node {0:?}")]
    UnknownNode(NodeId),

    /// A container operation was invoked on an object node
    #[error("Node {0:?} is not a container")]
    NotAContainer(NodeId),

    /// Adding the child would make a container its own ancestor
    #[error("Adding {child:?} to {parent:?} would create a cycle")]
    WouldCycle {
        /// Target container
        parent: NodeId,
        /// Container being added
        child: NodeId,
    },

    /// The root container cannot be owned by another container
    #[error("Root container {0:?} cannot be added as a child")]
    RootNotAddable(NodeId),

    /// A child's draw call failed
    #[error("Draw error: {0}")]
    Draw(#[from] DrawError),
}

/// Error reported by a renderable child's draw call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DrawError(pub String);

impl DrawError {
    /// Create a draw error from any message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
