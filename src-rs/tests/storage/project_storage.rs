use crate::storage::project_storage::{create_project_structure, slugify, ProjectWorkspace};
use std::fs;

#[cfg(test)]
mod tests {
    use super::*;

    fn subdirs() -> Vec<String> {
        ["docs", "src", "tests", "tickets", "logs"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("My Cool Project!"), "my_cool_project");
        assert_eq!(slugify("__A--B__"), "a_b");
        assert_eq!(slugify("Übung 2"), "bung_2");
        assert_eq!(slugify("***"), "project");
        assert_eq!(slugify(""), "project");
    }

    #[test]
    fn creates_timestamped_folder_with_layout() {
        let base = tempfile::tempdir().unwrap();
        let ws = create_project_structure("Demo App", base.path(), &subdirs()).unwrap();

        let name = ws.root().file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with("demo_app_"), "{name}");
        // demo_app_YYYYMMDD_HHMMSS
        assert_eq!(name.len(), "demo_app_".len() + 15);
        assert!(ws.root().starts_with(base.path()));

        for sub in subdirs() {
            assert!(ws.root().join(&sub).is_dir(), "{sub}");
        }
        let readme = fs::read_to_string(ws.root().join("README.md")).unwrap();
        assert!(readme.starts_with("# Demo App\n"));
        let ini = fs::read_to_string(ws.root().join("pytest.ini")).unwrap();
        assert_eq!(ini, "[pytest]\nminversion = 6.0\n");
    }

    #[test]
    fn open_requires_existing_folder() {
        let base = tempfile::tempdir().unwrap();
        assert!(ProjectWorkspace::open(base.path()).is_ok());
        assert!(ProjectWorkspace::open(base.path().join("missing")).is_err());
    }
}
