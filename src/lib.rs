//! # xref-index
//!
//! Cross-reference indexing core: turns resolved source trees into a
//! browsable model where every token is classified and every name is linked
//! to a canonical symbol key.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! indexer   → One indexing run: Solution → Workspace
//!   ↓
//! project   → Solution metadata, directory discovery
//!   ↓
//! index     → Classifier, link resolution, document walkers, engines
//!   ↓
//! model     → Workspace / Folder / Document / Token, ReferenceIndex
//!   ↓
//! csharp    → Reference C# front-end (lexer, parser, binder)
//!   ↓
//! symbols   → Engine-neutral symbol table, canonical keys
//!   ↓
//! base      → Primitives (LanguageId, FileId, LineIndex, TextRange)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use xref::{Indexer, ReferenceIndex, SolutionLoader};
//!
//! let solution = SolutionLoader::new().load_directory("path/to/solution")?;
//! let output = Indexer::default().index(&solution)?;
//! let references = ReferenceIndex::build(&output.workspace);
//! for occurrence in references.occurrences("MyApp.Program.Main()") {
//!     println!("{} {:?}", occurrence.document.display(), occurrence.line_col);
//! }
//! # Ok::<(), xref::IndexError>(())
//! ```

/// Foundation types: LanguageId, FileId, LineIndex, TextRange
pub mod base;

/// Error types shared by the whole crate
pub mod error;

/// Symbol table and canonical symbol keys
pub mod symbols;

/// Reference C# semantic engine
pub mod csharp;

/// Output model: workspace, folders, documents, tokens
pub mod model;

/// Classification, linking and document walking
pub mod index;

/// Solutions, projects and source discovery
pub mod project;

/// Indexing runs
pub mod indexer;

pub use base::{FileId, LanguageId, LineCol, LineIndex, TextRange, TextSize};
pub use error::{IndexError, IndexResult};
pub use index::{
    CSharpEngine, DocumentWalker, LinkProvider, ReferenceSourceLinkProvider, SemanticEngine,
    SymbolLinkProvider, WalkerSelector,
};
pub use indexer::{IndexOutput, Indexer, IndexerConfig, SkippedDocument};
pub use model::{
    Document, Folder, FolderPath, Link, Occurrence, ReferenceIndex, Token, TokenClass, Workspace,
};
pub use project::{Project, ReadError, Solution, SolutionLoader, SourceDocument};
pub use symbols::{SymbolKey, canonical_key};

/// Load the solution under `root` and index it with the default
/// configuration.
pub fn index_directory(root: impl AsRef<std::path::Path>) -> IndexResult<IndexOutput> {
    let solution = SolutionLoader::new().load_directory(root)?;
    Indexer::default().index(&solution)
}
