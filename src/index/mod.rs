//! # Index
//!
//! Turns resolved trees into documents.
//!
//! ```text
//! SemanticEngine ──► ResolvedTree ──► DocumentWalker ──► Document
//!                                       │
//!                                       ├─ classify_csharp  (token → TokenClass)
//!                                       └─ LinkResolver     (binding → Link)
//! ```
//!
//! The [`WalkerSelector`] picks the walker for a document's language; engines
//! and walkers are registered per language before a run.

mod classify;
mod csharp_walker;
mod engine;
mod link;
mod selector;
mod walker;

pub use crate::model::{ExternalLink, Link, SymbolLink, TokenClass};
pub use classify::classify_csharp;
pub use csharp_walker::CSharpWalker;
pub use engine::{CSharpEngine, ResolvedTree, SemanticEngine};
pub use link::{LinkProvider, LinkResolver, ReferenceSourceLinkProvider, SymbolLinkProvider};
pub use selector::{WalkerConstructor, WalkerSelector};
pub use walker::{DocumentWalker, TokenStream, WalkContext};

#[cfg(test)]
mod tests;
