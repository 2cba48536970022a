pub mod artifact_storage;
pub mod project_storage;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub use artifact_storage::{extract_code, save_response_in};
pub use project_storage::{create_project_structure, slugify, ProjectWorkspace};

pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .context("missing parent directory for atomic write")?;
    if !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file");
    let tmp_path = parent.join(format!(
        "{file_name}.tmp.{}",
        chrono::Utc::now().timestamp_millis()
    ));

    fs::write(&tmp_path, content).context("failed to write tmp file")?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to move tmp file into {}", path.display()))?;
    Ok(())
}

/// Joins a model-supplied relative path under `root`, refusing anything that
/// would land outside it.
pub(crate) fn join_relative(root: &Path, rel: &str) -> Result<PathBuf> {
    let rel_path = Path::new(rel.trim());
    if rel_path.as_os_str().is_empty() {
        anyhow::bail!("empty file path");
    }
    for comp in rel_path.components() {
        match comp {
            Component::Normal(_) | Component::CurDir => {}
            _ => anyhow::bail!("file path must stay inside the project: {}", rel),
        }
    }
    Ok(root.join(rel_path))
}
