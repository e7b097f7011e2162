//! Compilations and per-document semantic models.

use super::binder::bind_file;
use super::declare::{Declarations, declare};
use super::parser::{Parse, SyntaxError, parse};
use super::syntax_kind::{SyntaxNode, SyntaxToken};
use crate::base::{FileId, TextSize};
use crate::symbols::{Binding, SymbolTable};
use rayon::prelude::*;
use rowan::GreenNode;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

/// Every source file of one project, parsed and declared together.
///
/// File `i` of the input gets `FileId(i)`. Symbols declared in any file are
/// visible from every other file of the same compilation.
#[derive(Debug)]
pub struct Compilation {
    parses: Vec<Parse>,
    symbols: Arc<SymbolTable>,
    decls: Declarations,
}

impl Compilation {
    pub fn new<S: AsRef<str> + Sync>(sources: &[S]) -> Self {
        let parses: Vec<Parse> = sources
            .par_iter()
            .map(|source| parse(source.as_ref()))
            .collect();
        let roots: Vec<SyntaxNode> = parses.iter().map(Parse::syntax).collect();
        let (symbols, decls) = declare(&roots);
        debug!(
            files = parses.len(),
            symbols = symbols.len(),
            "declared compilation"
        );
        Self {
            parses,
            symbols: Arc::new(symbols),
            decls,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn file_count(&self) -> usize {
        self.parses.len()
    }

    pub fn parse(&self, file: FileId) -> Option<&Parse> {
        self.parses.get(file.index())
    }

    /// Bind one file.
    pub fn semantic_model(&self, file: FileId) -> Option<SemanticModel> {
        let parse = self.parses.get(file.index())?;
        let bindings = bind_file(&self.symbols, &self.decls, file, &parse.syntax());
        Some(SemanticModel {
            file,
            green: parse.green.clone(),
            errors: parse.errors.clone(),
            bindings,
            symbols: Arc::clone(&self.symbols),
        })
    }

    /// Bind every file, in parallel; the result is in file order.
    pub fn semantic_models(&self) -> Vec<SemanticModel> {
        (0..self.parses.len())
            .into_par_iter()
            .filter_map(|index| self.semantic_model(FileId::new(index)))
            .collect()
    }
}

/// The resolved tree of one document: its syntax plus a binding for every
/// identifier token.
///
/// Cheap to share across threads; `root()` builds a fresh cursor on demand.
#[derive(Debug, Clone)]
pub struct SemanticModel {
    file: FileId,
    green: GreenNode,
    errors: Vec<SyntaxError>,
    bindings: FxHashMap<TextSize, Binding>,
    symbols: Arc<SymbolTable>,
}

impl SemanticModel {
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn binding(&self, token: &SyntaxToken) -> Binding {
        self.binding_at(token.text_range().start())
    }

    pub fn binding_at(&self, offset: TextSize) -> Binding {
        self.bindings.get(&offset).copied().unwrap_or_default()
    }
}
