use super::solution::{Project, SourceDocument, Solution, solution_name};
use crate::base::LanguageId;
use crate::error::{IndexError, IndexResult};
use indexmap::IndexMap;
use std::path::{Component, Path};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directories that never hold sources worth indexing.
const SKIPPED_DIRS: &[&str] = &["bin", "obj", "target"];

/// Discovers a solution from a directory tree.
///
/// Each immediate sub-directory holding source files becomes a project;
/// source files directly under the root form a project named after the root.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionLoader;

impl SolutionLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load_directory(&self, root: impl AsRef<Path>) -> IndexResult<Solution> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(IndexError::invalid_root(root, "directory not found"));
        }
        if !root.is_dir() {
            return Err(IndexError::invalid_root(root, "not a directory"));
        }

        let root_name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string());
        let mut solution_file = None;
        let mut projects: IndexMap<String, Project> = IndexMap::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if entry.depth() == 1 && path.extension().is_some_and(|ext| ext == "sln") {
                solution_file.get_or_insert_with(|| path.to_path_buf());
                continue;
            }
            let Some(language) = LanguageId::from_path(path) else {
                continue;
            };

            let project_name = project_of(root, path).unwrap_or_else(|| root_name.clone());
            let document = read_document(path, language);
            projects
                .entry(project_name.clone())
                .or_insert_with(|| Project::new(project_name))
                .documents
                .push(document);
        }

        let name = solution_file
            .as_deref()
            .map(solution_name)
            .unwrap_or(root_name);
        let mut solution = Solution::new(name, root);
        solution.projects = projects.into_values().collect();
        debug!(
            root = %root.display(),
            projects = solution.projects.len(),
            documents = solution.document_count(),
            "loaded solution"
        );
        Ok(solution)
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && SKIPPED_DIRS.contains(&&*name))
}

/// Name of the first directory below `root` on the way to `path`, if any.
fn project_of(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();
    let first = components.next()?;
    // A file directly under the root has no project directory
    components.next()?;
    match first {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// Read a source as UTF-8; invalid UTF-8 fails with `InvalidData`.
fn read_document(path: &Path, language: LanguageId) -> SourceDocument {
    match std::fs::read_to_string(path) {
        Ok(text) => SourceDocument::new(path, language, text),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read source");
            SourceDocument::unreadable(path, language, &err)
        }
    }
}
