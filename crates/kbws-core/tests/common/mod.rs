#![allow(dead_code)]

use async_trait::async_trait;
use kbws_core::workspace::{ListWorkspacesParams, SaveObjectParams};
use kbws_core::{KbwsError, Result, WorkspaceMetadata, WorkspaceService};
use serde_json::{Value, json};
use std::sync::Mutex;

/// In-memory workspace service that records every request it receives.
///
/// Honors `excludeGlobal` the way the real service does.
#[derive(Default)]
pub struct RecordingService {
    pub records: Vec<WorkspaceMetadata>,
    pub list_calls: Mutex<Vec<ListWorkspacesParams>>,
    pub saved: Mutex<Vec<SaveObjectParams>>,
    pub fail_with: Option<KbwsError>,
}

impl RecordingService {
    pub fn with_records(records: Vec<WorkspaceMetadata>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn failing(err: KbwsError) -> Self {
        Self {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    pub fn saved(&self) -> Vec<SaveObjectParams> {
        self.saved.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<ListWorkspacesParams> {
        self.list_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkspaceService for RecordingService {
    async fn list_workspaces(
        &self,
        params: ListWorkspacesParams,
    ) -> Result<Vec<WorkspaceMetadata>> {
        self.list_calls.lock().unwrap().push(params);
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(self
            .records
            .iter()
            .filter(|m| !(params.excludes_global() && m.is_global()))
            .cloned()
            .collect())
    }

    async fn save_object(&self, params: SaveObjectParams) -> Result<Value> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let reply = json!([params.id, params.object_type, "2014-03-01T10:00:00+0000", 1]);
        self.saved.lock().unwrap().push(params);
        Ok(reply)
    }
}

pub fn meta(name: &str, id: i64, global_permission: &str) -> WorkspaceMetadata {
    WorkspaceMetadata {
        name: name.to_string(),
        owner: "jdoe".to_string(),
        moddate: "2014-03-01T10:00:00+0000".to_string(),
        object_count: 0,
        user_permission: "a".to_string(),
        global_permission: global_permission.to_string(),
        id,
    }
}
