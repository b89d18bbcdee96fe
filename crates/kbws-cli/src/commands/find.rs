use anyhow::{Context, Result};
use kbws_core::WorkspaceDirectory;
use std::io::Write;

use super::{WorkspaceSummary, write_json};

pub async fn run<W: Write>(
    directory: &WorkspaceDirectory,
    name: &str,
    search_global: bool,
    out: &mut W,
) -> Result<()> {
    let ws = directory
        .find(name, search_global)
        .await
        .with_context(|| format!("Failed to find workspace '{}'", name))?;

    write_json(out, &WorkspaceSummary::from(&ws))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{directory, meta, output_json};
    use kbws_core::KbwsError;

    #[tokio::test]
    async fn test_find_prints_matching_workspace() {
        let (_, directory) = directory(vec![meta("beta", 8, "n"), meta("alpha", 5, "n")]);
        let mut out = Vec::new();

        run(&directory, "alpha", false, &mut out).await.unwrap();

        let printed = output_json(out);
        assert_eq!(printed["name"], "alpha");
        assert_eq!(printed["id"], 5);
    }

    #[tokio::test]
    async fn test_find_missing_workspace_keeps_not_found_cause() {
        let (_, directory) = directory(vec![meta("beta", 8, "n")]);
        let mut out = Vec::new();

        let err = run(&directory, "alpha", false, &mut out).await.unwrap_err();

        assert!(err.to_string().contains("'alpha'"));
        let cause = err.downcast_ref::<KbwsError>().unwrap();
        assert!(cause.is_not_found());
        assert!(out.is_empty());
    }
}
