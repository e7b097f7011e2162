//! Semantic engines: the per-language producers of resolved trees.

use crate::base::LanguageId;
use crate::csharp::{Compilation, SemanticModel};
use std::fmt;
use tracing::debug;

/// A document's syntax tree together with the engine's bindings for it.
#[derive(Debug, Clone)]
pub enum ResolvedTree {
    CSharp(SemanticModel),
}

impl ResolvedTree {
    pub fn language(&self) -> LanguageId {
        match self {
            Self::CSharp(_) => LanguageId::csharp(),
        }
    }
}

/// Analyzes every document of one project written in one language.
///
/// Documents are analyzed together so that names declared in one file resolve
/// from the others.
pub trait SemanticEngine: Send + Sync + fmt::Debug {
    fn language(&self) -> LanguageId;

    /// One entry per source, in order. `None` in the input marks a document
    /// whose text could not be read; `None` in the output means the engine
    /// has no tree for that document.
    fn analyze(&self, sources: &[Option<&str>]) -> Vec<Option<ResolvedTree>>;
}

/// The bundled C# engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpEngine;

impl SemanticEngine for CSharpEngine {
    fn language(&self) -> LanguageId {
        LanguageId::csharp()
    }

    fn analyze(&self, sources: &[Option<&str>]) -> Vec<Option<ResolvedTree>> {
        let readable: Vec<(usize, &str)> = sources
            .iter()
            .enumerate()
            .filter_map(|(index, source)| source.map(|text| (index, text)))
            .collect();
        let texts: Vec<&str> = readable.iter().map(|(_, text)| *text).collect();
        let compilation = Compilation::new(&texts);
        debug!(
            documents = sources.len(),
            compiled = texts.len(),
            symbols = compilation.symbols().len(),
            "analyzed C# project"
        );

        let mut trees: Vec<Option<ResolvedTree>> = vec![None; sources.len()];
        for ((index, _), model) in readable.iter().zip(compilation.semantic_models()) {
            trees[*index] = Some(ResolvedTree::CSharp(model));
        }
        trees
    }
}
