#![allow(clippy::unwrap_used)]
use crate::symbols::{Symbol, SymbolKind, SymbolTable, TypeKind};

#[test]
fn test_insert_attaches_members_in_order() {
    let mut table = SymbolTable::new();
    let ns = table.insert(Symbol::new("N", SymbolKind::Namespace, None));
    let c1 = table.insert(Symbol::new("C1", SymbolKind::Type(TypeKind::Class), Some(ns)));
    let c2 = table.insert(Symbol::new("C2", SymbolKind::Type(TypeKind::Class), Some(ns)));

    assert_eq!(table.roots(), &[ns]);
    assert_eq!(table.members(ns), &[c1, c2]);
    assert!(table.members(c1).is_empty());
    assert_eq!(table.len(), 3);
}

#[test]
fn test_members_named_filters_by_name() {
    let mut table = SymbolTable::new();
    let c1 = table.insert(Symbol::new("C1", SymbolKind::Type(TypeKind::Class), None));
    let m_a = table.insert(Symbol::new("M", SymbolKind::Method, Some(c1)));
    table.insert(Symbol::new("Other", SymbolKind::Method, Some(c1)));
    let m_b = table.insert(Symbol::new("M", SymbolKind::Method, Some(c1)));

    let found: Vec<_> = table.members_named(Some(c1), "M").collect();
    assert_eq!(found, vec![m_a, m_b]);

    let roots: Vec<_> = table.members_named(None, "C1").collect();
    assert_eq!(roots, vec![c1]);
    assert_eq!(table.members_named(None, "Missing").count(), 0);
}

#[test]
fn test_parameters_skip_locals() {
    let mut table = SymbolTable::new();
    let c1 = table.insert(Symbol::new("C1", SymbolKind::Type(TypeKind::Class), None));
    let m1 = table.insert(Symbol::new("M1", SymbolKind::Method, Some(c1)));
    let p1 = table.insert(Symbol::new("p1", SymbolKind::Parameter, Some(m1)));
    table.insert(Symbol::new("l1", SymbolKind::Local, Some(m1)));
    let p2 = table.insert(Symbol::new("p2", SymbolKind::Parameter, Some(m1)));

    let params: Vec<_> = table.parameters(m1).collect();
    assert_eq!(params, vec![p1, p2]);
    assert_eq!(table[p2].name, "p2");
}
