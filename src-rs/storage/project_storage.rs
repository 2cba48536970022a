use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use super::atomic_write;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Filesystem-safe form of a project name: lowercase `a-z0-9` runs joined by
/// single underscores, `project` when nothing is left.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lowered, "_");
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "project".to_string()
    } else {
        slug.to_string()
    }
}

/// Root folder of one generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectWorkspace {
    root: PathBuf,
}

impl ProjectWorkspace {
    /// Wraps an existing project folder.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            anyhow::bail!("project folder does not exist: {}", root.display());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.root.join("docs")
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.root.join("tests")
    }

    pub fn tickets_dir(&self) -> PathBuf {
        self.root.join("tickets")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}

/// Creates `<base>/<slug>_<YYYYMMDD_HHMMSS>` with the given subdirectories,
/// a README.md and a pytest.ini.
pub fn create_project_structure(
    project_name: &str,
    base: &Path,
    subdirs: &[String],
) -> Result<ProjectWorkspace> {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    let folder = base.join(format!("{}_{}", slugify(project_name), timestamp));

    for sub in subdirs {
        let dir = folder.join(sub);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    if subdirs.is_empty() {
        fs::create_dir_all(&folder)
            .with_context(|| format!("failed to create {}", folder.display()))?;
    }

    atomic_write(
        &folder.join("README.md"),
        &format!("# {}\n\nCreated at {}\n", project_name, timestamp),
    )?;
    atomic_write(&folder.join("pytest.ini"), "[pytest]\nminversion = 6.0\n")?;

    log::info!("Created project structure at {}", folder.display());
    Ok(ProjectWorkspace { root: folder })
}
