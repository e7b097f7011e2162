use super::document::Document;
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::fmt;

/// Names of the folders leading from the workspace root to a folder.
///
/// Documents and folders point at their parent with one of these instead of
/// a reference, so the model stays a plain tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FolderPath(Vec<SmolStr>);

impl FolderPath {
    /// The workspace itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, name: impl Into<SmolStr>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.0
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl<S: Into<SmolStr>> FromIterator<S> for FolderPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A named group of documents; projects map to top-level folders.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Folder {
    name: SmolStr,
    path: FolderPath,
    folders: IndexMap<SmolStr, Folder>,
    documents: Vec<Document>,
}

impl Folder {
    pub(crate) fn new(name: SmolStr, path: FolderPath) -> Self {
        Self {
            name,
            path,
            folders: IndexMap::new(),
            documents: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &FolderPath {
        &self.path
    }

    /// Path of the parent folder; the root path for top-level folders.
    pub fn parent(&self) -> FolderPath {
        self.path.parent().unwrap_or_default()
    }

    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.folders.get(name)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Sub-folder `name`, created on first use.
    pub fn add_folder(&mut self, name: impl Into<SmolStr>) -> &mut Folder {
        let name = name.into();
        let path = self.path.child(name.clone());
        self.folders
            .entry(name.clone())
            .or_insert_with(|| Folder::new(name, path))
    }

    /// Attach a finished document; its folder path must be this folder's.
    pub fn attach(&mut self, document: Document) {
        debug_assert_eq!(document.folder(), &self.path);
        self.documents.push(document);
    }

    pub(crate) fn folder_mut_by_segments(&mut self, segments: &[SmolStr]) -> Option<&mut Folder> {
        match segments.split_first() {
            None => Some(self),
            Some((first, rest)) => self.folders.get_mut(first)?.folder_mut_by_segments(rest),
        }
    }

    pub(crate) fn folder_by_segments(&self, segments: &[SmolStr]) -> Option<&Folder> {
        match segments.split_first() {
            None => Some(self),
            Some((first, rest)) => self.folders.get(first)?.folder_by_segments(rest),
        }
    }

    pub(crate) fn collect_documents<'a>(&'a self, out: &mut Vec<&'a Document>) {
        out.extend(self.documents.iter());
        for folder in self.folders.values() {
            folder.collect_documents(out);
        }
    }
}
