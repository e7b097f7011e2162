//! One indexing run: a [`Solution`] in, a [`Workspace`] out.
//!
//! Each project is analyzed by the semantic engine of every language it
//! contains, then its documents are walked independently (in parallel by
//! default). Finished documents are attached to the project's folder in
//! source order. A document that cannot be indexed is left out and reported
//! in [`IndexOutput::skipped`]; only an invalid workspace root fails the run.

use crate::base::LanguageId;
use crate::error::{IndexError, IndexResult};
use crate::index::{
    CSharpEngine, LinkProvider, ResolvedTree, SemanticEngine, SymbolLinkProvider, WalkContext,
    WalkerConstructor, WalkerSelector,
};
use crate::model::{Document, FolderPath, Workspace};
use crate::project::{Project, Solution, SourceDocument};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

/// Registrations and switches for an indexing run.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    walkers: WalkerSelector,
    engines: FxHashMap<LanguageId, Arc<dyn SemanticEngine>>,
    links: Arc<dyn LinkProvider>,
    parallel: bool,
    require_existing_root: bool,
}

impl IndexerConfig {
    /// A configuration with no languages registered.
    pub fn empty() -> Self {
        Self {
            walkers: WalkerSelector::new(),
            engines: FxHashMap::default(),
            links: Arc::new(SymbolLinkProvider),
            parallel: true,
            require_existing_root: true,
        }
    }

    pub fn with_walker(mut self, language: LanguageId, constructor: WalkerConstructor) -> Self {
        self.walkers.register(language, constructor);
        self
    }

    /// Register `engine` for the language it reports.
    pub fn with_engine(mut self, engine: Arc<dyn SemanticEngine>) -> Self {
        self.engines.insert(engine.language(), engine);
        self
    }

    pub fn with_link_provider(mut self, links: Arc<dyn LinkProvider>) -> Self {
        self.links = links;
        self
    }

    /// Walk documents on the rayon pool (the default) or on the calling thread.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether the solution root must be an existing directory (the default).
    /// Turn off to index in-memory solutions.
    pub fn require_existing_root(mut self, required: bool) -> Self {
        self.require_existing_root = required;
        self
    }

    pub fn walkers(&self) -> &WalkerSelector {
        &self.walkers
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self::empty()
            .with_walker(LanguageId::csharp(), crate::index::CSharpWalker::boxed)
            .with_engine(Arc::new(CSharpEngine))
    }
}

/// A document left out of the index.
#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub error: IndexError,
}

#[derive(Debug)]
pub struct IndexOutput {
    pub workspace: Workspace,
    pub skipped: Vec<SkippedDocument>,
}

#[derive(Debug, Clone, Default)]
pub struct Indexer {
    config: IndexerConfig,
}

impl Indexer {
    pub fn new(config: IndexerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    pub fn index(&self, solution: &Solution) -> IndexResult<IndexOutput> {
        let span = info_span!("index", solution = %solution.name);
        let _enter = span.enter();

        if self.config.require_existing_root && !solution.root.is_dir() {
            let reason = if solution.root.exists() {
                "not a directory"
            } else {
                "directory not found"
            };
            return Err(IndexError::invalid_root(&solution.root, reason));
        }

        let mut workspace = Workspace::new(solution.name.as_str(), solution.root.as_path());
        let mut skipped = Vec::new();
        for project in &solution.projects {
            let name = folder_name(&workspace, &project.name);
            if name != project.name {
                warn!(project = %project.name, folder = %name, "duplicate project name");
            }
            let folder_path = workspace.add_folder(name.as_str()).path().clone();
            let outcomes = self.index_project(project, &folder_path);
            let folder = workspace.add_folder(name.as_str());
            for (source, outcome) in project.documents.iter().zip(outcomes) {
                match outcome {
                    Ok(document) => folder.attach(document),
                    Err(error) => {
                        warn!(path = %source.path.display(), %error, "skipping document");
                        skipped.push(SkippedDocument {
                            path: source.path.clone(),
                            error,
                        });
                    }
                }
            }
        }

        info!(
            documents = workspace.document_count(),
            skipped = skipped.len(),
            "indexed solution"
        );
        Ok(IndexOutput { workspace, skipped })
    }

    /// One outcome per document of `project`, in order.
    fn index_project(
        &self,
        project: &Project,
        folder: &FolderPath,
    ) -> Vec<IndexResult<Document>> {
        let trees = self.resolve_project(project);
        debug!(
            project = %project.name,
            documents = project.documents.len(),
            "walking project"
        );
        let walk = |(source, tree): (&SourceDocument, IndexResult<ResolvedTree>)| {
            self.walk_document(source, tree?, folder)
        };
        let pairs: Vec<_> = project.documents.iter().zip(trees).collect();
        if self.config.parallel {
            pairs.into_par_iter().map(walk).collect()
        } else {
            pairs.into_iter().map(walk).collect()
        }
    }

    /// Run each language's engine over the project's documents of that
    /// language.
    fn resolve_project(&self, project: &Project) -> Vec<IndexResult<ResolvedTree>> {
        let mut trees: Vec<IndexResult<ResolvedTree>> = project
            .documents
            .iter()
            .map(|source| {
                Err(IndexError::malformed_tree(
                    &source.path,
                    "engine produced no tree",
                ))
            })
            .collect();

        let mut by_language: FxHashMap<&LanguageId, Vec<usize>> = FxHashMap::default();
        for (index, source) in project.documents.iter().enumerate() {
            if !self.config.walkers.supports(&source.language) {
                trees[index] = Err(IndexError::unsupported_language(
                    source.language.clone(),
                    &source.path,
                ));
            } else if let Some(error) = &source.read_error {
                trees[index] = Err(IndexError::io(&source.path, error.to_io_error()));
            } else {
                by_language.entry(&source.language).or_default().push(index);
            }
        }

        for (language, indices) in by_language {
            let Some(engine) = self.config.engines.get(language) else {
                for index in indices {
                    trees[index] = Err(IndexError::malformed_tree(
                        &project.documents[index].path,
                        format!("no semantic engine registered for `{language}`"),
                    ));
                }
                continue;
            };
            let sources: Vec<Option<&str>> = indices
                .iter()
                .map(|&index| project.documents[index].text.as_deref())
                .collect();
            for (&index, tree) in indices.iter().zip(engine.analyze(&sources)) {
                let source = &project.documents[index];
                match tree {
                    Some(tree) => trees[index] = Ok(tree),
                    None if source.text.is_none() => {
                        trees[index] = Err(IndexError::malformed_tree(
                            &source.path,
                            "source text is not available",
                        ));
                    }
                    None => {}
                }
            }
        }
        trees
    }

    fn walk_document(
        &self,
        source: &SourceDocument,
        tree: ResolvedTree,
        folder: &FolderPath,
    ) -> IndexResult<Document> {
        let cx = WalkContext {
            folder: folder.clone(),
            name: source.name(),
            path: source.path.clone(),
            language: source.language.clone(),
            links: Arc::clone(&self.config.links),
        };
        let mut walker = self.config.walkers.select(cx)?;
        walker.visit(&tree)?;
        let document = walker.into_document();

        if let Some(text) = &source.text {
            if document.text() != *text {
                return Err(IndexError::malformed_tree(
                    &source.path,
                    "tree does not cover the source text",
                ));
            }
        }
        debug!(
            path = %source.path.display(),
            tokens = document.tokens().len(),
            "indexed document"
        );
        Ok(document)
    }
}

/// Folder name for a project: its own name, or `Name (2)`, `Name (3)`, ...
/// when an earlier project of the solution already has that name.
fn folder_name(workspace: &Workspace, project: &str) -> String {
    let taken = |name: &str| workspace.folder(&FolderPath::root().child(name)).is_some();
    if !taken(project) {
        return project.to_string();
    }
    (2..)
        .map(|n| format!("{project} ({n})"))
        .find(|name| !taken(name))
        .unwrap_or_default()
}
