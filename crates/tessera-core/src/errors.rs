//! Error types for the Tessera layout engine.
//!
//! Layout passes themselves never fail; errors only arise while building or
//! mutating a tree, or while loading a declarative layout document.

use thiserror::Error;

/// Errors while building or mutating a layout tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Unknown node #{id}")]
    UnknownNode { id: u64 },

    #[error("Node #{id} cannot have children")]
    NotAContainer { id: u64 },

    #[error("Node #{id} is not a leaf")]
    NotALeaf { id: u64 },

    #[error("Node #{child} is already attached to node #{parent}")]
    AlreadyAttached { child: u64, parent: u64 },

    #[error("Attaching node #{child} to node #{parent} would create a cycle")]
    CycleDetected { child: u64, parent: u64 },

    #[error("Scroll container #{id} already has a content node")]
    ContentOccupied { id: u64 },
}

/// Errors while loading a layout document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[cfg(feature = "serde")]
    #[error("Malformed layout document: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned by `Gravity::from_flags`; inside a document it surfaces
    /// through `Json`
    #[error("Unknown gravity flag: {flag}")]
    UnknownGravity { flag: String },

    #[error(transparent)]
    Tree(#[from] TreeError),
}
