//! Domain model for saving datasets into remote KBase workspaces.
//!
//! - [`workspace`]: workspace metadata, directory lookup and object references
//! - [`dataset`]: expression and interaction datasets and their save payloads
//! - [`error`]: the shared error type

pub mod dataset;
pub mod error;
pub mod workspace;

// Re-export common types
pub use dataset::Dataset;
pub use error::{KbwsError, Result};
pub use workspace::{
    WorkspaceDirectory, WorkspaceInstance, WorkspaceMetadata, WorkspaceObject, WorkspaceService,
};
