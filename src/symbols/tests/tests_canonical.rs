#![allow(clippy::unwrap_used)]
//! Canonical key tests, independent of any language front-end.

use crate::symbols::{
    RefKind, Symbol, SymbolId, SymbolKind, SymbolTable, TypeKind, TypeRef, canonical_key,
};

fn class(table: &mut SymbolTable, name: &str, container: Option<SymbolId>) -> SymbolId {
    table.insert(Symbol::new(name, SymbolKind::Type(TypeKind::Class), container))
}

fn method(
    table: &mut SymbolTable,
    name: &str,
    ty: SymbolId,
    params: &[(&str, TypeRef)],
) -> SymbolId {
    let id = table.insert(Symbol::new(name, SymbolKind::Method, Some(ty)));
    for (param, param_ty) in params {
        let symbol = Symbol::new(*param, SymbolKind::Parameter, Some(id));
        table.insert(symbol.with_type(param_ty.clone()));
    }
    id
}

fn key(table: &SymbolTable, id: SymbolId) -> String {
    canonical_key(table, id).to_string()
}

#[test]
fn test_global_type_key_has_no_namespace() {
    let mut table = SymbolTable::new();
    let c1 = class(&mut table, "C1", None);
    assert_eq!(key(&table, c1), "C1");
}

#[test]
fn test_namespaced_and_nested_type_keys() {
    let mut table = SymbolTable::new();
    let outer_ns = table.insert(Symbol::new("Company", SymbolKind::Namespace, None));
    let inner_ns = table.insert(Symbol::new("Tools", SymbolKind::Namespace, Some(outer_ns)));
    let outer = class(&mut table, "Outer", Some(inner_ns));
    let inner = class(&mut table, "Inner", Some(outer));

    assert_eq!(key(&table, inner_ns), "Company.Tools");
    assert_eq!(key(&table, outer), "Company.Tools.Outer");
    assert_eq!(key(&table, inner), "Company.Tools.Outer.Inner");
}

#[test]
fn test_method_key_lists_parameter_types() {
    let mut table = SymbolTable::new();
    let c1 = class(&mut table, "C1", None);
    let m1 = method(
        &mut table,
        "M1",
        c1,
        &[
            ("p1", TypeRef::builtin("string")),
            ("p2", TypeRef::builtin("int")),
            ("p3", TypeRef::Named(c1)),
        ],
    );
    let empty = method(&mut table, "Method1", c1, &[]);

    assert_eq!(key(&table, m1), "C1.M1(string, int, C1)");
    assert_eq!(key(&table, empty), "C1.Method1()");
}

#[test]
fn test_overloads_get_distinct_keys() {
    let mut table = SymbolTable::new();
    let c1 = class(&mut table, "C1", None);
    let by_int = method(&mut table, "Run", c1, &[("x", TypeRef::builtin("int"))]);
    let by_string = method(&mut table, "Run", c1, &[("x", TypeRef::builtin("string"))]);

    assert_ne!(canonical_key(&table, by_int), canonical_key(&table, by_string));
    assert_eq!(key(&table, by_int), "C1.Run(int)");
    assert_eq!(key(&table, by_string), "C1.Run(string)");
}

#[test]
fn test_parameters_and_locals_scoped_to_method() {
    let mut table = SymbolTable::new();
    let c1 = class(&mut table, "C1", None);
    let m1 = method(&mut table, "M1", c1, &[("p1", TypeRef::builtin("int"))]);
    let m2 = method(&mut table, "M2", c1, &[("p1", TypeRef::builtin("int"))]);
    let l1 = Symbol::new("l1", SymbolKind::Local, Some(m1));
    let l1 = table.insert(l1.with_type(TypeRef::builtin("string")));

    let p1_in_m1 = table.parameters(m1).next().unwrap();
    let p1_in_m2 = table.parameters(m2).next().unwrap();

    assert_eq!(key(&table, p1_in_m1), "C1.M1(int)::p1");
    assert_eq!(key(&table, p1_in_m2), "C1.M2(int)::p1");
    assert_ne!(canonical_key(&table, p1_in_m1), canonical_key(&table, p1_in_m2));
    // A local added after the parameters does not change the method key.
    assert_eq!(key(&table, l1), "C1.M1(int)::l1");
}

#[test]
fn test_extension_method_keyed_by_declaring_type() {
    let mut table = SymbolTable::new();
    let ext = class(&mut table, "MyExtensions", None);
    let m = table.insert(Symbol::new("ExtensionMethod", SymbolKind::Method, Some(ext)).extension());
    let param = Symbol::new("myParam", SymbolKind::Parameter, Some(m));
    table.insert(param.with_type(TypeRef::builtin("string")));

    assert_eq!(key(&table, m), "MyExtensions.ExtensionMethod(string)");
}

#[test]
fn test_constructor_field_array_and_ref_parameters() {
    let mut table = SymbolTable::new();
    let ns = table.insert(Symbol::new("N", SymbolKind::Namespace, None));
    let c1 = class(&mut table, "C1", Some(ns));
    let field = Symbol::new("count", SymbolKind::Field, Some(c1));
    let field = table.insert(field.with_type(TypeRef::builtin("int")));
    let ctor = table.insert(Symbol::new("C1", SymbolKind::Constructor, Some(c1)));
    table.insert(
        Symbol::new("items", SymbolKind::Parameter, Some(ctor))
            .with_type(TypeRef::array_of(TypeRef::Named(c1))),
    );
    table.insert(
        Symbol::new("total", SymbolKind::Parameter, Some(ctor))
            .with_type(TypeRef::builtin("int"))
            .with_ref_kind(RefKind::Out),
    );

    assert_eq!(key(&table, field), "N.C1.count");
    assert_eq!(key(&table, ctor), "N.C1.C1(N.C1[], out int)");
}

#[test]
fn test_unresolved_parameter_type_kept_as_written() {
    let mut table = SymbolTable::new();
    let c1 = class(&mut table, "C1", None);
    let m = method(&mut table, "Use", c1, &[("w", TypeRef::Unresolved("Widget".into()))]);
    assert_eq!(key(&table, m), "C1.Use(Widget)");
}

#[test]
fn test_key_independent_of_insertion_order() {
    // Same program elements, inserted in two different orders.
    let mut first = SymbolTable::new();
    let a1 = class(&mut first, "A", None);
    let b1 = class(&mut first, "B", None);
    let m1 = method(&mut first, "M", b1, &[("a", TypeRef::Named(a1))]);

    let mut second = SymbolTable::new();
    let b2 = class(&mut second, "B", None);
    let a2 = class(&mut second, "A", None);
    let m2 = method(&mut second, "M", b2, &[("a", TypeRef::Named(a2))]);

    assert_eq!(canonical_key(&first, m1), canonical_key(&second, m2));
    assert_eq!(canonical_key(&first, a1), canonical_key(&second, a2));
    // Recomputing is stable.
    assert_eq!(canonical_key(&first, m1), canonical_key(&first, m1));
}

#[test]
fn test_key_compares_with_str() {
    let mut table = SymbolTable::new();
    let c1 = class(&mut table, "C1", None);
    let k = canonical_key(&table, c1);
    assert_eq!(k, "C1");
    assert_eq!(k.as_str(), "C1");
}
