//! Remote access to the KBase workspace service.
//!
//! Provides [`WorkspaceClient`], the JSON-RPC implementation of
//! [`kbws_core::WorkspaceService`], plus entry points that go from credentials
//! straight to workspaces.

pub mod config;
pub mod rpc;
pub mod workspace_client;

pub use config::{ClientConfig, Credentials, DEFAULT_WORKSPACE_URL};
pub use workspace_client::WorkspaceClient;

use kbws_core::{Result, WorkspaceDirectory, WorkspaceInstance};
use std::sync::Arc;

/// Opens a directory over a freshly built client.
///
/// Every workspace listed through the directory shares that client.
pub fn connect(config: ClientConfig) -> Result<WorkspaceDirectory> {
    let client = WorkspaceClient::new(config)?;
    Ok(WorkspaceDirectory::new(Arc::new(client)))
}

/// Lists the workspaces visible to the token holder, leaving global ones out.
pub async fn workspaces_for(
    credentials: Credentials,
    service_url: &str,
) -> Result<Vec<WorkspaceInstance>> {
    connect(ClientConfig::new(service_url, credentials))?
        .workspaces()
        .await
}

/// Finds the workspace called `name`.
///
/// Global workspaces are searched only when `search_global` is set.
pub async fn workspace(
    credentials: Credentials,
    name: &str,
    search_global: bool,
    service_url: &str,
) -> Result<WorkspaceInstance> {
    connect(ClientConfig::new(service_url, credentials))?
        .find(name, search_global)
        .await
}
