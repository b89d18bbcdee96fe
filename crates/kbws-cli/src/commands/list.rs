use anyhow::{Context, Result};
use kbws_core::WorkspaceDirectory;
use std::io::Write;

use super::{WorkspaceSummary, write_json};

pub async fn run<W: Write>(
    directory: &WorkspaceDirectory,
    include_global: bool,
    out: &mut W,
) -> Result<()> {
    let workspaces = directory
        .list(!include_global)
        .await
        .context("Failed to list workspaces")?;

    let summaries: Vec<WorkspaceSummary<'_>> = workspaces.iter().map(Into::into).collect();
    write_json(out, &summaries)
}
