use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::service::{SaveObjectParams, WorkspaceService};
use crate::dataset::Dataset;
use crate::error::Result;

/// Global permission value meaning "not shared with everyone".
pub const NO_PERMISSION: &str = "n";

/// Version assigned to a [`WorkspaceObject`] when the caller does not name one.
pub const DEFAULT_OBJECT_VERSION: u32 = 1;

/// Metadata describing a remote workspace.
///
/// The service sends this as a positional tuple
/// `[name, owner, moddate, objects, user_permission, global_permission, id]`;
/// it is decoded into named fields once, at the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WorkspaceMetadataTuple", into = "WorkspaceMetadataTuple")]
pub struct WorkspaceMetadata {
    /// Workspace name (position 0)
    pub name: String,
    /// User that owns the workspace
    pub owner: String,
    /// Last modification timestamp, as reported by the service
    pub moddate: String,
    /// Number of objects stored in the workspace
    pub object_count: i64,
    /// Permission of the requesting user
    pub user_permission: String,
    /// Permission granted to all users
    pub global_permission: String,
    /// Numeric workspace id (position 6)
    pub id: i64,
}

impl WorkspaceMetadata {
    /// Returns true if the workspace is readable by every user.
    pub fn is_global(&self) -> bool {
        self.global_permission != NO_PERMISSION
    }
}

#[derive(Serialize, Deserialize)]
struct WorkspaceMetadataTuple(String, String, String, i64, String, String, i64);

impl From<WorkspaceMetadataTuple> for WorkspaceMetadata {
    fn from(t: WorkspaceMetadataTuple) -> Self {
        let WorkspaceMetadataTuple(
            name,
            owner,
            moddate,
            object_count,
            user_permission,
            global_permission,
            id,
        ) = t;
        Self {
            name,
            owner,
            moddate,
            object_count,
            user_permission,
            global_permission,
            id,
        }
    }
}

impl From<WorkspaceMetadata> for WorkspaceMetadataTuple {
    fn from(m: WorkspaceMetadata) -> Self {
        Self(
            m.name,
            m.owner,
            m.moddate,
            m.object_count,
            m.user_permission,
            m.global_permission,
            m.id,
        )
    }
}

/// A remote workspace together with the service handle it was listed from.
///
/// Instances are produced by [`super::WorkspaceDirectory`]; every instance from
/// one listing shares the same handle.
#[derive(Clone)]
pub struct WorkspaceInstance {
    service: Arc<dyn WorkspaceService>,
    metadata: WorkspaceMetadata,
}

impl WorkspaceInstance {
    pub fn new(service: Arc<dyn WorkspaceService>, metadata: WorkspaceMetadata) -> Self {
        Self { service, metadata }
    }

    pub fn id(&self) -> i64 {
        self.metadata.id
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn metadata(&self) -> &WorkspaceMetadata {
        &self.metadata
    }

    /// Generic save entry point; every dataset shaper ends up here.
    ///
    /// Sends `{workspace, type, id, data}` to the service and returns its
    /// result untouched. Neither `objtype` nor `data` is checked locally.
    pub async fn save_object(
        &self,
        objtype: impl Into<String>,
        objid: impl Into<String>,
        data: Value,
    ) -> Result<Value> {
        let params = SaveObjectParams {
            workspace: self.metadata.name.clone(),
            object_type: objtype.into(),
            id: objid.into(),
            data,
        };
        tracing::debug!(
            workspace = %params.workspace,
            object_type = %params.object_type,
            id = %params.id,
            "saving object"
        );
        self.service.save_object(params).await
    }

    /// Saves a dataset under its own schema tag and object id.
    pub async fn save_dataset(&self, dataset: &Dataset) -> Result<Value> {
        let payload = dataset.to_payload()?;
        self.save_object(dataset.schema_tag(), dataset.object_id(), payload)
            .await
    }

    /// Refers to version [`DEFAULT_OBJECT_VERSION`] of an object in this workspace.
    pub fn object(&self, id: impl Into<String>) -> WorkspaceObject {
        WorkspaceObject::new(self, id)
    }
}

impl fmt::Debug for WorkspaceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceInstance")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for WorkspaceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Workspace, name: {}, id: {}}}", self.name(), self.id())
    }
}

/// A versioned object stored in a workspace.
///
/// Holds only the workspace id, so the reference stays valid for as long as
/// the remote workspace keeps that id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceObject {
    /// Id of the owning workspace
    pub workspace_id: i64,
    /// Object identifier, unique within the workspace
    pub id: String,
    /// Object version
    pub version: u32,
}

impl WorkspaceObject {
    pub fn new(workspace: &WorkspaceInstance, id: impl Into<String>) -> Self {
        Self::in_workspace(workspace.id(), id)
    }

    /// Builds an object reference from a workspace id the caller already knows.
    pub fn in_workspace(workspace_id: i64, id: impl Into<String>) -> Self {
        Self {
            workspace_id,
            id: id.into(),
            version: DEFAULT_OBJECT_VERSION,
        }
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Object reference in `<workspace-id>/<object-id>/<version>` form.
    pub fn obj_ref(&self) -> String {
        format!("{}/{}/{}", self.workspace_id, self.id, self.version)
    }
}

impl fmt::Display for WorkspaceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.obj_ref())
    }
}
