//! Reverse index from symbol keys to every linked occurrence.
//!
//! Backs the "references" listing a renderer shows for a symbol: where it is
//! declared and every place that uses it, across all documents.

use super::workspace::Workspace;
use crate::base::{LineCol, TextRange};
use crate::symbols::SymbolKey;
use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::trace;

/// One linked token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Occurrence {
    /// Document containing the token
    pub document: PathBuf,
    /// Range of the token text
    pub range: TextRange,
    /// Where the token starts
    pub line_col: LineCol,
    pub is_declaration: bool,
}

/// Occurrences grouped by symbol key.
///
/// Keys appear in the order they were first seen; occurrences keep workspace
/// document order, then source order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReferenceIndex {
    by_key: IndexMap<SymbolKey, Vec<Occurrence>>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every linked token of the workspace.
    pub fn build(workspace: &Workspace) -> Self {
        let mut index = Self::new();
        for document in workspace.documents() {
            for token in document.tokens() {
                let Some(link) = token.link() else {
                    continue;
                };
                index.add(
                    link.key().clone(),
                    Occurrence {
                        document: document.path().to_path_buf(),
                        range: token.range(),
                        line_col: document.line_col(token),
                        is_declaration: link.is_declaration(),
                    },
                );
            }
        }
        index
    }

    /// Record one occurrence of `key`.
    pub fn add(&mut self, key: SymbolKey, occurrence: Occurrence) {
        trace!(key = %key, document = %occurrence.document.display(), "reference");
        self.by_key.entry(key).or_default().push(occurrence);
    }

    /// Every occurrence of `key`, declarations included.
    pub fn occurrences(&self, key: &str) -> &[Occurrence] {
        self.by_key.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Occurrences of `key` that are not its declaration.
    pub fn references(&self, key: &str) -> impl Iterator<Item = &Occurrence> {
        self.occurrences(key).iter().filter(|o| !o.is_declaration)
    }

    /// Declaration site of `key`; the first one for partial types.
    pub fn definition(&self, key: &str) -> Option<&Occurrence> {
        self.occurrences(key).iter().find(|o| o.is_declaration)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SymbolKey> {
        self.by_key.keys()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
