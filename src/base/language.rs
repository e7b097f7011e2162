use smol_str::SmolStr;
use std::fmt;
use std::path::Path;

/// Tag naming the source language of a document (`csharp`, `visualbasic`, ...).
///
/// Walkers and semantic engines are registered against these tags ahead of
/// an indexing run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanguageId(SmolStr);

impl LanguageId {
    pub const CSHARP: &'static str = "csharp";
    pub const VISUAL_BASIC: &'static str = "visualbasic";
    pub const FSHARP: &'static str = "fsharp";

    pub fn new(tag: impl Into<SmolStr>) -> Self {
        Self(tag.into())
    }

    pub fn csharp() -> Self {
        Self::new(Self::CSHARP)
    }

    /// Guess the language from a file extension.
    ///
    /// Returns `None` for files that are not source files of a known language.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let tag = match ext.as_str() {
            "cs" => Self::CSHARP,
            "vb" => Self::VISUAL_BASIC,
            "fs" | "fsx" => Self::FSHARP,
            _ => return None,
        };
        Some(Self::new(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Identifier of a document inside one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub u32);

impl FileId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
