//! Link resolution: from engine bindings to [`Link`] values.

use crate::model::Link;
use crate::symbols::{Binding, SymbolId, SymbolKey, SymbolKind, SymbolTable, canonical_key};
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::trace;

/// Turns a resolved symbol into the link stored on its tokens.
///
/// Providers are shared by every walker of a run, so they must be cheap to
/// call and safe to use from many threads.
pub trait LinkProvider: Send + Sync + fmt::Debug {
    fn link(
        &self,
        symbols: &SymbolTable,
        symbol: SymbolId,
        key: SymbolKey,
        is_declaration: bool,
    ) -> Link;
}

/// Links every symbol to its own declaration in the index.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolLinkProvider;

impl LinkProvider for SymbolLinkProvider {
    fn link(&self, _: &SymbolTable, _: SymbolId, key: SymbolKey, is_declaration: bool) -> Link {
        Link::symbol(key, is_declaration)
    }
}

/// Sends uses of symbols from selected namespaces to a hosted reference
/// source site, e.g. `https://referencesource.microsoft.com/#System.String`.
///
/// Declaration sites and symbols outside those namespaces keep symbol links.
#[derive(Debug, Clone)]
pub struct ReferenceSourceLinkProvider {
    base_url: String,
    namespaces: Vec<String>,
}

impl ReferenceSourceLinkProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://referencesource.microsoft.com";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            namespaces: vec!["System".to_string(), "Microsoft".to_string()],
        }
    }

    /// Replace the namespace prefixes that are linked externally.
    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn url(&self, key: &SymbolKey) -> String {
        format!("{}/#{}", self.base_url, key)
    }

    fn is_hosted(&self, symbols: &SymbolTable, symbol: SymbolId) -> bool {
        let namespace = namespace_path(symbols, symbol);
        if namespace.is_empty() {
            return false;
        }
        self.namespaces.iter().any(|prefix| {
            namespace == *prefix
                || namespace
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}

impl Default for ReferenceSourceLinkProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

impl LinkProvider for ReferenceSourceLinkProvider {
    fn link(
        &self,
        symbols: &SymbolTable,
        symbol: SymbolId,
        key: SymbolKey,
        is_declaration: bool,
    ) -> Link {
        if !is_declaration && self.is_hosted(symbols, symbol) {
            let url = self.url(&key);
            return Link::external(key, url);
        }
        Link::symbol(key, is_declaration)
    }
}

/// Dotted name of the namespace enclosing `symbol` (itself, for namespaces).
fn namespace_path(symbols: &SymbolTable, symbol: SymbolId) -> String {
    let mut names = Vec::new();
    let mut current = Some(symbol);
    while let Some(id) = current {
        let Some(entry) = symbols.get(id) else {
            break;
        };
        if entry.kind == SymbolKind::Namespace {
            names.push(entry.name.as_str());
        }
        current = entry.container;
    }
    names.reverse();
    names.join(".")
}

/// Resolves bindings of one document to links.
///
/// Keys are cached per symbol, so every occurrence of a symbol in the
/// document shares one `SymbolKey` allocation.
pub struct LinkResolver<'a> {
    symbols: &'a SymbolTable,
    provider: &'a dyn LinkProvider,
    keys: FxHashMap<SymbolId, SymbolKey>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(symbols: &'a SymbolTable, provider: &'a dyn LinkProvider) -> Self {
        Self {
            symbols,
            provider,
            keys: FxHashMap::default(),
        }
    }

    /// Link for a binding; `None` when it names no symbol.
    pub fn resolve(&mut self, binding: Binding) -> Option<Link> {
        let symbol = binding.symbol()?;
        if self.symbols.get(symbol).is_none() {
            trace!(?symbol, "binding to a symbol outside the table");
            return None;
        }
        let symbols = self.symbols;
        let key = self
            .keys
            .entry(symbol)
            .or_insert_with(|| canonical_key(symbols, symbol))
            .clone();
        Some(
            self.provider
                .link(self.symbols, symbol, key, binding.is_declaration()),
        )
    }
}
