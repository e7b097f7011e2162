//! # Symbols
//!
//! Engine-neutral symbol model and the canonical naming scheme built on it.
//!
//! A semantic engine (see [`crate::csharp`]) fills a [`SymbolTable`] with every
//! program element it resolves. The rest of the crate only ever compares
//! symbols through their [`SymbolKey`], a string computed by
//! [`canonical_key`] from the symbol's identity:
//!
//! ```text
//! C1                          type
//! N.C1.M1(string, int, N.C1)  method (parameter types disambiguate overloads)
//! N.C1.M1(string, int, N.C1)::p1
//!                             parameter / local, scoped to the method key
//! ```

mod canonical;
mod symbol;
mod table;

pub use canonical::{SymbolKey, canonical_key};
pub use symbol::{Binding, Location, RefKind, Symbol, SymbolId, SymbolKind, TypeKind, TypeRef};
pub use table::SymbolTable;

#[cfg(test)]
mod tests;
