use super::csharp_walker::CSharpWalker;
use super::walker::{DocumentWalker, WalkContext};
use crate::base::LanguageId;
use crate::error::{IndexError, IndexResult};
use rustc_hash::FxHashMap;

/// Builds a walker for one document.
pub type WalkerConstructor = fn(WalkContext) -> Box<dyn DocumentWalker>;

/// Registry of document walkers by language, filled in before a run starts.
#[derive(Debug, Clone, Default)]
pub struct WalkerSelector {
    walkers: FxHashMap<LanguageId, WalkerConstructor>,
}

impl WalkerSelector {
    /// A selector with no walkers registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selector with every bundled walker registered.
    pub fn with_defaults() -> Self {
        let mut selector = Self::new();
        selector.register(LanguageId::csharp(), CSharpWalker::boxed);
        selector
    }

    /// Register `constructor` for `language`, replacing any earlier entry.
    pub fn register(&mut self, language: LanguageId, constructor: WalkerConstructor) -> &mut Self {
        self.walkers.insert(language, constructor);
        self
    }

    pub fn supports(&self, language: &LanguageId) -> bool {
        self.walkers.contains_key(language)
    }

    /// Walker for the document described by `cx`.
    pub fn select(&self, cx: WalkContext) -> IndexResult<Box<dyn DocumentWalker>> {
        match self.walkers.get(&cx.language) {
            Some(constructor) => Ok(constructor(cx)),
            None => Err(IndexError::unsupported_language(cx.language, cx.path)),
        }
    }
}
