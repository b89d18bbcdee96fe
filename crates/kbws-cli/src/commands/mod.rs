pub mod find;
pub mod list;
pub mod save;

use anyhow::Result;
use kbws_core::WorkspaceInstance;
use serde::Serialize;
use std::io::Write;

/// JSON view of a workspace printed by the commands.
#[derive(Debug, Serialize)]
pub struct WorkspaceSummary<'a> {
    pub name: &'a str,
    pub id: i64,
    pub owner: &'a str,
    pub objects: i64,
    pub global: bool,
}

impl<'a> From<&'a WorkspaceInstance> for WorkspaceSummary<'a> {
    fn from(ws: &'a WorkspaceInstance) -> Self {
        let meta = ws.metadata();
        Self {
            name: &meta.name,
            id: meta.id,
            owner: &meta.owner,
            objects: meta.object_count,
            global: meta.is_global(),
        }
    }
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
