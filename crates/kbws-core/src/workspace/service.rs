//! Workspace service trait.
//!
//! Defines the two remote calls this layer makes against the workspace
//! storage service. Implementations live outside the core crate.

use super::model::WorkspaceMetadata;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for `list_workspaces`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWorkspacesParams {
    /// 1 to leave globally readable workspaces out of the listing, 0 otherwise
    #[serde(rename = "excludeGlobal")]
    pub exclude_global: u8,
}

impl ListWorkspacesParams {
    pub fn new(exclude_global: bool) -> Self {
        Self {
            exclude_global: u8::from(exclude_global),
        }
    }

    pub fn excludes_global(&self) -> bool {
        self.exclude_global != 0
    }
}

impl Default for ListWorkspacesParams {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Request body for `save_object`.
///
/// Serializes to exactly `{workspace, type, id, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveObjectParams {
    /// Target workspace name
    pub workspace: String,
    /// Schema tag, e.g. `KBaseExpression.ExpressionSample-1.2`
    #[serde(rename = "type")]
    pub object_type: String,
    /// Object id within the workspace
    pub id: String,
    /// Payload, forwarded as-is
    pub data: Value,
}

/// Remote workspace storage service.
///
/// Each method is a single round trip. Errors reported by the service are
/// returned as [`crate::KbwsError::Remote`] without translation.
#[async_trait]
pub trait WorkspaceService: Send + Sync {
    /// Lists workspace metadata visible to the authenticated user.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<WorkspaceMetadata>)`: records in the order the service sent them
    /// - `Err(_)`: remote or transport failure
    async fn list_workspaces(&self, params: ListWorkspacesParams)
    -> Result<Vec<WorkspaceMetadata>>;

    /// Saves an object.
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: whatever the service returned for the save
    /// - `Err(_)`: remote or transport failure
    async fn save_object(&self, params: SaveObjectParams) -> Result<Value>;
}
