// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Packaging of a generated project for download or local use.
//!
//! Both outputs share one layout: every generated file under a root
//! directory named after the sanitized project name, followed by a
//! `.gitignore`.

use std::{
    fs,
    path::{Component, Path, PathBuf}
};

use serde::Serialize;

use crate::{
    error::{Error, Result},
    model::GeneratedProject,
    naming::sanitize_project_name
};

/// Content of the `.gitignore` added to every packaged project.
pub const GITIGNORE: &str = "# Maven
target/
pom.xml.tag
pom.xml.releaseBackup
pom.xml.versionsBackup
pom.xml.next
release.properties

# IDE
.idea/
*.iml
.vscode/
.classpath
.project
.settings/

# OS
.DS_Store
Thumbs.db

# Logs
*.log

# Application
application-local.yml
";

/// Downloadable form of a project: archive name plus ordered entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectArchive {
    /// `<projectName>.zip`.
    pub file_name: String,
    /// `(path inside the archive, content)` in generation order.
    pub entries:   Vec<(String, String)>
}

impl ProjectArchive {
    /// Content of an entry.
    #[must_use]
    pub fn entry(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, c)| c.as_str())
    }
}

/// Root directory name of a packaged project.
///
/// Falls back to `project` when nothing survives sanitization.
#[must_use]
pub fn root_dir(project: &GeneratedProject) -> String {
    let name = sanitize_project_name(&project.project_name);
    if name.is_empty() { "project".to_string() } else { name }
}

/// Lay out a project as archive entries.
#[must_use]
pub fn archive(project: &GeneratedProject) -> ProjectArchive {
    let root = root_dir(project);
    let mut entries: Vec<(String, String)> = project
        .generated_files
        .iter()
        .map(|(path, content)| (format!("{root}/{path}"), content.to_string()))
        .collect();
    entries.push((format!("{root}/.gitignore"), GITIGNORE.to_string()));

    tracing::debug!(
        project_id = %project.project_id,
        entries = entries.len(),
        "project archived"
    );
    ProjectArchive {
        file_name: format!("{}.zip", project.project_name),
        entries
    }
}

/// Check that `path` is relative and made only of plain names, so joining it
/// onto a directory stays inside that directory.
fn is_contained(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Write a project under `root/<sanitized name>` and return that directory.
///
/// Every path is checked before anything is written.
///
/// # Errors
///
/// Returns [`Error::Validation`] when a file path is absolute or leaves the
/// project directory, and [`Error::Io`] when a directory or file cannot be
/// written.
pub fn write_to_disk(project: &GeneratedProject, root: impl AsRef<Path>) -> Result<PathBuf> {
    if let Some(path) = project.generated_files.paths().find(|p| !is_contained(p)) {
        return Err(Error::invalid(
            format!("generatedFiles[{path:?}]"),
            "path leaves the project directory"
        ));
    }

    let dir = root.as_ref().join(root_dir(project));
    tracing::info!(path = %dir.display(), "writing project to disk");

    for (path, content) in &project.generated_files {
        let target = dir.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
    }
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(".gitignore"), GITIGNORE)?;

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        model::{FileMap, GenerationStatistics},
        variant::DatabaseVariant
    };

    fn project(name: &str) -> GeneratedProject {
        let mut files = FileMap::new();
        files.insert("pom.xml", "<project/>");
        files.insert("src/main/resources/schema.sql", "-- schema");
        GeneratedProject {
            project_id:      "id-1".into(),
            project_name:    name.into(),
            base_package:    "com.shop".into(),
            database:        DatabaseVariant::H2,
            generated_files: files,
            generated_at:    Utc::now(),
            statistics:      GenerationStatistics::default()
        }
    }

    #[test]
    fn archive_layout() {
        let archive = archive(&project("My Shop!"));
        assert_eq!(archive.file_name, "My Shop!.zip");
        let paths: Vec<&str> = archive.entries.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            [
                "my-shop/pom.xml",
                "my-shop/src/main/resources/schema.sql",
                "my-shop/.gitignore"
            ]
        );
        assert_eq!(archive.entry("my-shop/pom.xml"), Some("<project/>"));
        assert!(archive.entry("my-shop/.gitignore").unwrap().contains("target/"));
    }

    #[test]
    fn unusable_name_falls_back() {
        assert_eq!(root_dir(&project("???")), "project");
    }

    #[test]
    fn writes_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = write_to_disk(&project("Shop"), tmp.path()).unwrap();
        assert_eq!(dir, tmp.path().join("shop"));
        assert_eq!(fs::read_to_string(dir.join("pom.xml")).unwrap(), "<project/>");
        assert_eq!(
            fs::read_to_string(dir.join("src/main/resources/schema.sql")).unwrap(),
            "-- schema"
        );
        assert_eq!(fs::read_to_string(dir.join(".gitignore")).unwrap(), GITIGNORE);
    }

    #[test]
    fn escaping_paths_are_refused() {
        for bad in [
            "../../escaped.java",
            "src/../../escaped.java",
            "/tmp/escaped.java",
            "./pom.xml",
            ""
        ] {
            let tmp = tempfile::tempdir().unwrap();
            let root = tmp.path().join("out");
            let mut shop = project("Shop");
            shop.generated_files.insert(bad, "class Escaped {}");

            let err = write_to_disk(&shop, &root).unwrap_err();
            assert!(err.is_validation(), "{bad:?}");
            assert!(!root.exists(), "{bad:?}");
            assert!(!tmp.path().join("escaped.java").exists());
        }
    }

    #[test]
    fn contained_paths() {
        assert!(is_contained("src/main/java/com/shop/entity/Order.java"));
        assert!(is_contained(".env"));
        assert!(!is_contained("a/../b"));
        assert!(!is_contained("/etc/passwd"));
    }
}
