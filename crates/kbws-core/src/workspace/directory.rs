//! Workspace directory lookup.
//!
//! Lists the workspaces visible through a [`WorkspaceService`] and finds one
//! by name.

use std::sync::Arc;

use super::model::WorkspaceInstance;
use super::service::{ListWorkspacesParams, WorkspaceService};
use crate::error::{KbwsError, Result};

/// Directory of the workspaces reachable through one service handle.
///
/// # Example
///
/// ```ignore
/// let directory = WorkspaceDirectory::new(service);
/// let ws = directory.find("my_workspace", false).await?;
/// println!("{ws}");
/// ```
#[derive(Clone)]
pub struct WorkspaceDirectory {
    service: Arc<dyn WorkspaceService>,
}

impl WorkspaceDirectory {
    pub fn new(service: Arc<dyn WorkspaceService>) -> Self {
        Self { service }
    }

    /// Lists workspaces with global ones excluded.
    pub async fn workspaces(&self) -> Result<Vec<WorkspaceInstance>> {
        self.list(true).await
    }

    /// Lists workspaces, one instance per record returned by the service.
    ///
    /// Order follows the service response. With `exclude_global` set, records
    /// the service marks as global are dropped even if the service sent them.
    pub async fn list(&self, exclude_global: bool) -> Result<Vec<WorkspaceInstance>> {
        let params = ListWorkspacesParams::new(exclude_global);
        let records = self.service.list_workspaces(params).await?;
        tracing::debug!(
            count = records.len(),
            exclude_global,
            "listed workspaces"
        );

        Ok(records
            .into_iter()
            .filter(|meta| !(exclude_global && meta.is_global()))
            .map(|meta| WorkspaceInstance::new(Arc::clone(&self.service), meta))
            .collect())
    }

    /// Finds the first workspace named `name`.
    ///
    /// Global workspaces are only considered when `search_global` is set.
    /// Duplicate names are not reported; the first one listed wins.
    pub async fn find(&self, name: &str, search_global: bool) -> Result<WorkspaceInstance> {
        for ws in self.list(!search_global).await? {
            tracing::debug!("comparing with {}", ws.name());
            if ws.name() == name {
                return Ok(ws);
            }
        }
        Err(KbwsError::not_found("workspace", name))
    }
}
