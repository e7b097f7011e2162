use super::symbol::{Symbol, SymbolId, SymbolKind};
use std::ops::Index;

/// Arena of every symbol a semantic engine resolved for one compilation.
///
/// Insertion attaches the symbol to its container's member list, so the table
/// doubles as the containment tree. A container is always inserted before its
/// members; the table is read-only once the engine hands it out.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Arena storage for all symbols - single source of truth
    arena: Vec<Symbol>,
    /// Members of each symbol, parallel to `arena`, in insertion order
    members: Vec<Vec<SymbolId>>,
    /// Symbols without a container (top-level namespaces and global types)
    roots: Vec<SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId::new(self.arena.len());
        match symbol.container {
            Some(container) => {
                debug_assert!(container < id, "container must be inserted first");
                self.members[container.index()].push(id);
            }
            None => self.roots.push(id),
        }
        self.arena.push(symbol);
        self.members.push(Vec::new());
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.arena.get(id.index())
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.arena.get_mut(id.index())
    }

    /// Direct members of a symbol in declaration order.
    pub fn members(&self, id: SymbolId) -> &[SymbolId] {
        self.members
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Top-level symbols (no container).
    pub fn roots(&self) -> &[SymbolId] {
        &self.roots
    }

    /// Members of `container` (or top-level symbols for `None`) with the given name.
    pub fn members_named<'a>(
        &'a self,
        container: Option<SymbolId>,
        name: &'a str,
    ) -> impl Iterator<Item = SymbolId> + 'a {
        let ids = match container {
            Some(id) => self.members(id),
            None => self.roots(),
        };
        ids.iter()
            .copied()
            .filter(move |id| self.arena[id.index()].name == name)
    }

    /// Parameters of a method or constructor in declaration order.
    pub fn parameters(&self, id: SymbolId) -> impl Iterator<Item = SymbolId> + '_ {
        self.members(id)
            .iter()
            .copied()
            .filter(|id| self.arena[id.index()].kind == SymbolKind::Parameter)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.arena
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId::new(index), symbol))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

impl Index<SymbolId> for SymbolTable {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.arena[id.index()]
    }
}
