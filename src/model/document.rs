use super::folder::FolderPath;
use super::token::{Link, Token, TokenClass};
use crate::base::{LanguageId, LineCol, LineIndex};
use std::path::{Path, PathBuf};

/// A source file as a flat sequence of classified, linked tokens.
///
/// Built once by a document walker, then attached to its folder and never
/// changed again.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    name: String,
    path: PathBuf,
    folder: FolderPath,
    language: LanguageId,
    tokens: Vec<Token>,
    #[cfg_attr(feature = "serde", serde(skip))]
    line_index: LineIndex,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        folder: FolderPath,
        language: LanguageId,
        tokens: Vec<Token>,
        line_index: LineIndex,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            folder,
            language,
            tokens,
            line_index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the owning folder; resolve it with `Workspace::folder`.
    pub fn folder(&self) -> &FolderPath {
        &self.folder
    }

    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Source text rebuilt from the tokens and their trivia.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for token in &self.tokens {
            token.write_full_text(&mut text);
        }
        text
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.tokens.iter().filter_map(Token::link)
    }

    pub fn count(&self, class: TokenClass) -> usize {
        self.tokens.iter().filter(|t| t.class() == class).count()
    }

    /// Line and column where `token` starts.
    pub fn line_col(&self, token: &Token) -> LineCol {
        self.line_index.line_col(token.range().start())
    }
}
