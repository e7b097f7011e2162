use crate::base::LanguageId;
use std::io;
use std::path::{Path, PathBuf};

const SOLUTION_SUFFIX: &str = ".sln";

/// Name of a solution given its file path: the file name without a trailing
/// `.sln`.
pub fn solution_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_suffix(SOLUTION_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}

/// Why a source file could not be read.
///
/// Kept as plain data so that [`SourceDocument`] stays `Clone + Eq`; the
/// indexer turns it back into an [`std::io::Error`] when it reports the
/// document as skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    pub kind: io::ErrorKind,
    pub message: String,
}

impl ReadError {
    pub fn to_io_error(&self) -> io::Error {
        io::Error::new(self.kind, self.message.clone())
    }
}

impl From<&io::Error> for ReadError {
    fn from(error: &io::Error) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// One source file of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub language: LanguageId,
    /// `None` when the file could not be read as UTF-8 text
    pub text: Option<String>,
    /// Set when reading the file failed
    pub read_error: Option<ReadError>,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, language: LanguageId, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language,
            text: Some(text.into()),
            read_error: None,
        }
    }

    /// A document whose text could not be read.
    pub fn unreadable(path: impl Into<PathBuf>, language: LanguageId, error: &io::Error) -> Self {
        Self {
            path: path.into(),
            language,
            text: None,
            read_error: Some(ReadError::from(error)),
        }
    }

    /// File name shown for the document.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub documents: Vec<SourceDocument>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
        }
    }

    pub fn with_document(mut self, document: SourceDocument) -> Self {
        self.documents.push(document);
        self
    }
}

/// Everything an indexing run needs to know about the code base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub name: String,
    pub root: PathBuf,
    pub projects: Vec<Project>,
}

impl Solution {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            projects: Vec::new(),
        }
    }

    /// A solution named after its `.sln` file, rooted at the file's directory.
    pub fn from_solution_file(path: &Path) -> Self {
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::new(solution_name(path), root)
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    pub fn document_count(&self) -> usize {
        self.projects.iter().map(|p| p.documents.len()).sum()
    }
}
