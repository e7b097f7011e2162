//! # Model
//!
//! The output of an indexing run: a tree of folders holding documents, each
//! document a flat token sequence with trivia folded in and a link on every
//! resolved name.
//!
//! ```text
//! Workspace
//! └── Folder (one per project)
//!     ├── Folder ...
//!     └── Document
//!         └── Token { class, text, trivia, link }
//! ```
//!
//! Children never own their parents; a document knows its folder only by
//! [`FolderPath`].

mod document;
mod folder;
mod references;
mod token;
mod workspace;

pub use document::Document;
pub use folder::{Folder, FolderPath};
pub use references::{Occurrence, ReferenceIndex};
pub use token::{ExternalLink, Link, SymbolLink, Token, TokenClass};
pub use workspace::Workspace;
