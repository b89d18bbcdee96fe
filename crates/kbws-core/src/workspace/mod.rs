pub mod directory;
pub mod model;
pub mod service;

pub use directory::WorkspaceDirectory;
pub use model::{WorkspaceInstance, WorkspaceMetadata, WorkspaceObject};
pub use service::{ListWorkspacesParams, SaveObjectParams, WorkspaceService};
