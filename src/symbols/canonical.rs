//! Canonical symbol keys.
//!
//! A key is a pure function of a symbol's identity: its containers, its name,
//! and for callables the parameter types in declaration order. It does not
//! depend on which occurrence is being looked at or on traversal order, so two
//! tokens refer to the same program element exactly when their keys are equal.

use super::symbol::{SymbolId, SymbolKind, TypeRef};
use super::table::SymbolTable;
use std::borrow::Borrow;
use std::fmt::{self, Write};
use std::sync::Arc;

/// Canonical string identity of a program element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SymbolKey(Arc<str>);

impl SymbolKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SymbolKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SymbolKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for SymbolKey {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl From<&str> for SymbolKey {
    fn from(key: &str) -> Self {
        Self(Arc::from(key))
    }
}

impl PartialEq<str> for SymbolKey {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for SymbolKey {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Build the canonical key of `id`.
///
/// - type: `Namespace.TypeName` (namespace omitted when global)
/// - field: `TypeKey.Name`
/// - method / constructor: `TypeKey.Name(ParamType1, ParamType2)`
/// - parameter / local: `MethodKey::name`
pub fn canonical_key(table: &SymbolTable, id: SymbolId) -> SymbolKey {
    let mut key = String::new();
    // Writing into a String cannot fail.
    let _ = write_symbol(table, id, &mut key);
    SymbolKey::from(key)
}

fn write_symbol(table: &SymbolTable, id: SymbolId, out: &mut String) -> fmt::Result {
    let Some(symbol) = table.get(id) else {
        return Ok(());
    };

    if let Some(container) = symbol.container {
        write_symbol(table, container, out)?;
        let separator = if symbol.kind.is_scoped_variable() {
            "::"
        } else {
            "."
        };
        out.push_str(separator);
    }
    out.push_str(&symbol.name);

    if symbol.kind.is_callable() {
        out.push('(');
        for (index, param) in table.parameters(id).enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let param = &table[param];
            out.push_str(param.ref_kind.prefix());
            match &param.ty {
                Some(ty) => write_type(table, ty, out)?,
                None => out.push('?'),
            }
        }
        out.push(')');
    }
    Ok(())
}

fn write_type(table: &SymbolTable, ty: &TypeRef, out: &mut String) -> fmt::Result {
    match ty {
        TypeRef::Builtin(keyword) => out.push_str(keyword),
        TypeRef::Named(id) => match table.get(*id) {
            Some(symbol) if matches!(symbol.kind, SymbolKind::Type(_)) => {
                write_symbol(table, *id, out)?
            }
            Some(symbol) => write!(out, "{}", symbol.name)?,
            None => out.push('?'),
        },
        TypeRef::Array(element) => {
            write_type(table, element, out)?;
            out.push_str("[]");
        }
        TypeRef::Unresolved(text) => out.push_str(text),
    }
    Ok(())
}
