use super::document::Document;
use super::folder::{Folder, FolderPath};
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::path::{Path, PathBuf};

/// Root of the indexed model: one per solution.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Workspace {
    name: String,
    root: PathBuf,
    folders: IndexMap<SmolStr, Folder>,
}

impl Workspace {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            folders: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Top-level folder `name`, created on first use.
    pub fn add_folder(&mut self, name: impl Into<SmolStr>) -> &mut Folder {
        let name = name.into();
        let path = FolderPath::root().child(name.clone());
        self.folders
            .entry(name.clone())
            .or_insert_with(|| Folder::new(name, path))
    }

    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    /// Resolve a folder path; `None` for the root path or unknown folders.
    pub fn folder(&self, path: &FolderPath) -> Option<&Folder> {
        let (first, rest) = path.segments().split_first()?;
        self.folders.get(first)?.folder_by_segments(rest)
    }

    pub fn folder_mut(&mut self, path: &FolderPath) -> Option<&mut Folder> {
        let (first, rest) = path.segments().split_first()?;
        self.folders.get_mut(first)?.folder_mut_by_segments(rest)
    }

    /// Every document, depth first, in the order folders and documents were
    /// added.
    pub fn documents(&self) -> Vec<&Document> {
        let mut documents = Vec::new();
        for folder in self.folders.values() {
            folder.collect_documents(&mut documents);
        }
        documents
    }

    pub fn document(&self, path: &Path) -> Option<&Document> {
        self.documents().into_iter().find(|doc| doc.path() == path)
    }

    pub fn document_count(&self) -> usize {
        self.documents().len()
    }

    /// Serialize the whole model for a downstream renderer.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
