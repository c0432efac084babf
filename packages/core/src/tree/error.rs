//! Tree Edit Error Types
//!
//! Errors raised by structural edits on a built tree. Every failure leaves
//! the tree unmodified; callers log and recover, nothing here is fatal to
//! the console.

use crate::models::RecordError;
use thiserror::Error;

/// Errors that can occur during structural edits
#[derive(Error, Debug)]
pub enum TreeError {
    /// Referenced node is not in the identifier index
    #[error("Node '{id}' does not exist")]
    NodeNotFound { id: String },

    /// A node with this identifier is already materialized
    #[error("Node '{id}' already exists")]
    DuplicateNode { id: String },

    /// The requested parent is not in the identifier index
    #[error("Parent node '{parent_id}' does not exist")]
    ParentNotFound { parent_id: String },

    /// The requested parent is materialized but not attached to the tree
    #[error("Parent node '{parent_id}' is not attached to the tree")]
    ParentUnattached { parent_id: String },

    /// The root cannot be deleted
    #[error("Node '{id}' is the root and cannot be deleted")]
    RootDeletion { id: String },

    /// The node is materialized but not attached, so there is nothing to
    /// detach it from
    #[error("Node '{id}' is not attached to the tree")]
    NodeUnattached { id: String },

    /// The supplied record failed validation
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] RecordError),
}

impl TreeError {
    /// Create a NodeNotFound error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create a DuplicateNode error
    pub fn duplicate_node(id: impl Into<String>) -> Self {
        Self::DuplicateNode { id: id.into() }
    }

    /// Create a ParentNotFound error
    pub fn parent_not_found(parent_id: impl Into<String>) -> Self {
        Self::ParentNotFound {
            parent_id: parent_id.into(),
        }
    }

    /// Create a ParentUnattached error
    pub fn parent_unattached(parent_id: impl Into<String>) -> Self {
        Self::ParentUnattached {
            parent_id: parent_id.into(),
        }
    }

    /// Create a RootDeletion error
    pub fn root_deletion(id: impl Into<String>) -> Self {
        Self::RootDeletion { id: id.into() }
    }

    /// Create a NodeUnattached error
    pub fn node_unattached(id: impl Into<String>) -> Self {
        Self::NodeUnattached { id: id.into() }
    }
}
