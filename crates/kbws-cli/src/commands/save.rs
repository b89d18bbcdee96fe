use anyhow::{Context, Result};
use kbws_core::{Dataset, WorkspaceDirectory};
use serde_json::{Value, json};
use std::fs;
use std::io::Write;
use std::path::Path;

use super::write_json;

/// Reads a tagged dataset document.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as a dataset", path.display()))
}

/// Saves `dataset` into the named workspace and reports what was stored.
pub async fn save(
    directory: &WorkspaceDirectory,
    workspace: &str,
    dataset: &Dataset,
    search_global: bool,
) -> Result<Value> {
    let ws = directory
        .find(workspace, search_global)
        .await
        .with_context(|| format!("Failed to find workspace '{}'", workspace))?;

    let result = ws
        .save_dataset(dataset)
        .await
        .with_context(|| format!("Failed to save '{}' into {}", dataset.object_id(), ws))?;

    Ok(json!({
        "workspace": ws.name(),
        "type": dataset.schema_tag(),
        "id": dataset.object_id(),
        "result": result,
    }))
}

pub async fn run<W: Write>(
    directory: &WorkspaceDirectory,
    workspace: &str,
    file: &Path,
    search_global: bool,
    out: &mut W,
) -> Result<()> {
    let dataset = read_dataset(file)?;
    let report = save(directory, workspace, &dataset, search_global).await?;
    write_json(out, &report)
}
