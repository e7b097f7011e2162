//! Name lookup shared by the declaration and binding passes.
//!
//! Lookups start from an innermost container (a type or namespace symbol, or
//! `None` for the global namespace) and walk outward, then fall back to the
//! namespaces imported by the file's `using` directives.

use super::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::symbols::{SymbolId, SymbolKind, SymbolTable, TypeKind, TypeRef};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// Static type of an expression as seen by overload resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Typed(TypeRef),
    /// The `null` literal
    Null,
    /// A name that denotes a type (`C1` in `C1.Create()`)
    TypeName(SymbolId),
    Namespace(SymbolId),
    /// `void`, or an expression whose type is not known
    Unknown,
}

/// Cost of converting an argument to a parameter type; lower is better.
pub(crate) const IDENTITY: u32 = 0;
pub(crate) const IMPLICIT: u32 = 1;
pub(crate) const LENIENT: u32 = 2;

const NUMERIC_RANK: &[&str] = &[
    "sbyte", "byte", "short", "ushort", "int", "uint", "long", "ulong", "float", "double",
    "decimal",
];

/// Implicit numeric conversions of the language.
fn widens(from: &str, to: &str) -> bool {
    let targets: &[&str] = match from {
        "sbyte" => &["short", "int", "long", "float", "double", "decimal"],
        "byte" => &[
            "short", "ushort", "int", "uint", "long", "ulong", "float", "double", "decimal",
        ],
        "short" => &["int", "long", "float", "double", "decimal"],
        "ushort" => &["int", "uint", "long", "ulong", "float", "double", "decimal"],
        "int" => &["long", "float", "double", "decimal"],
        "uint" => &["long", "ulong", "float", "double", "decimal"],
        "long" | "ulong" => &["float", "double", "decimal"],
        "char" => &[
            "ushort", "int", "uint", "long", "ulong", "float", "double", "decimal",
        ],
        "float" => &["double"],
        _ => &[],
    };
    targets.contains(&to)
}

/// Result type of an arithmetic operator over two builtin numeric operands.
pub(crate) fn promote(left: &str, right: &str) -> Option<&'static str> {
    let rank = |name: &str| NUMERIC_RANK.iter().position(|n| *n == name);
    let (l, r) = (rank(left)?, rank(right)?);
    // Arithmetic happens in int at least
    Some(NUMERIC_RANK[l.max(r).max(4)])
}

/// Direct child tokens of `node` that are identifiers, in source order.
pub(crate) fn idents(node: &SyntaxNode) -> Vec<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::IDENT)
        .collect()
}

pub(crate) fn first_ident(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == SyntaxKind::IDENT)
}

/// Source text of a type node without trivia, as `Dictionary<string, int>`.
pub(crate) fn type_text(node: &SyntaxNode) -> String {
    let mut text = String::new();
    for token in node
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
    {
        text.push_str(token.text());
        if token.kind() == SyntaxKind::COMMA {
            text.push(' ');
        }
    }
    text
}

pub(crate) fn child_node(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|child| child.kind() == kind)
}

pub(crate) fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .any(|token| token.kind() == kind)
}

pub(crate) fn is_type_node(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PREDEFINED_TYPE | SyntaxKind::NAMED_TYPE | SyntaxKind::ARRAY_TYPE
    )
}

/// Read-only view used to resolve names against a symbol table.
#[derive(Clone, Copy)]
pub(crate) struct Scope<'a> {
    pub table: &'a SymbolTable,
    /// Namespaces imported by the current file
    pub usings: &'a [SymbolId],
}

impl<'a> Scope<'a> {
    pub fn new(table: &'a SymbolTable, usings: &'a [SymbolId]) -> Self {
        Self { table, usings }
    }

    fn is_type_or_namespace(&self, id: SymbolId) -> bool {
        matches!(
            self.table[id].kind,
            SymbolKind::Type(_) | SymbolKind::Namespace
        )
    }

    /// The type itself followed by every base type, breadth first.
    pub fn hierarchy(&self, ty: SymbolId) -> Vec<SymbolId> {
        let mut order = vec![ty];
        let mut seen = FxHashSet::default();
        seen.insert(ty);
        let mut next = 0;
        while let Some(&current) = order.get(next) {
            next += 1;
            for base in &self.table[current].base_types {
                if let TypeRef::Named(base) = base {
                    if seen.insert(*base) {
                        order.push(*base);
                    }
                }
            }
        }
        order
    }

    /// Enclosing types from the innermost outward, each with its hierarchy.
    pub fn type_levels(&self, ty: Option<SymbolId>) -> Vec<SymbolId> {
        let mut levels = Vec::new();
        let mut current = ty;
        while let Some(id) = current {
            if !self.table[id].kind.is_type() {
                break;
            }
            for level in self.hierarchy(id) {
                if !levels.contains(&level) {
                    levels.push(level);
                }
            }
            current = self.table[id].container;
        }
        levels
    }

    /// Namespaces whose extension methods are visible from `from`.
    pub fn namespaces_in_scope(&self, from: Option<SymbolId>) -> Vec<Option<SymbolId>> {
        let mut namespaces = Vec::new();
        let mut current = from;
        while let Some(id) = current {
            if self.table[id].kind == SymbolKind::Namespace {
                namespaces.push(Some(id));
            }
            current = self.table[id].container;
        }
        namespaces.push(None);
        namespaces.extend(self.usings.iter().copied().map(Some));
        namespaces
    }

    /// Namespace a symbol is declared in (`None` for the global namespace).
    pub fn namespace_of(&self, id: SymbolId) -> Option<SymbolId> {
        let mut current = self.table[id].container;
        while let Some(container) = current {
            if self.table[container].kind == SymbolKind::Namespace {
                return Some(container);
            }
            current = self.table[container].container;
        }
        None
    }

    /// A nested type or namespace named `name` directly inside `container`.
    pub fn member_type_or_namespace(&self, container: SymbolId, name: &str) -> Option<SymbolId> {
        if self.table[container].kind.is_type() {
            return self
                .hierarchy(container)
                .into_iter()
                .find_map(|level| {
                    self.table
                        .members_named(Some(level), name)
                        .find(|id| self.table[*id].kind.is_type())
                });
        }
        self.table
            .members_named(Some(container), name)
            .find(|id| self.is_type_or_namespace(*id))
    }

    /// Resolve a simple type or namespace name as seen from `from`.
    pub fn lookup_type_or_namespace(&self, from: Option<SymbolId>, name: &str) -> Option<SymbolId> {
        let mut current = from;
        while let Some(container) = current {
            if let Some(found) = self.member_type_or_namespace(container, name) {
                return Some(found);
            }
            current = self.table[container].container;
        }
        if let Some(found) = self
            .table
            .members_named(None, name)
            .find(|id| self.is_type_or_namespace(*id))
        {
            return Some(found);
        }
        self.usings.iter().find_map(|namespace| {
            self.table
                .members_named(Some(*namespace), name)
                .find(|id| self.table[*id].kind.is_type())
        })
    }

    /// Resolve each segment of a dotted name; a segment after a failed one
    /// stays unresolved.
    pub fn resolve_qualified(
        &self,
        segments: &[SyntaxToken],
        from: Option<SymbolId>,
    ) -> Vec<Option<SymbolId>> {
        let mut resolved = Vec::with_capacity(segments.len());
        let mut previous: Option<SymbolId> = None;
        for (index, segment) in segments.iter().enumerate() {
            let found = if index == 0 {
                self.lookup_type_or_namespace(from, segment.text())
            } else {
                previous.and_then(|prev| self.member_type_or_namespace(prev, segment.text()))
            };
            resolved.push(found);
            previous = found;
        }
        resolved
    }

    /// Namespace path of a `using` directive, resolved from the global namespace.
    pub fn resolve_namespace_path(&self, segments: &[SyntaxToken]) -> Vec<Option<SymbolId>> {
        let mut resolved = Vec::with_capacity(segments.len());
        let mut previous: Option<SymbolId> = None;
        for (index, segment) in segments.iter().enumerate() {
            let found = if index == 0 {
                self.table
                    .members_named(None, segment.text())
                    .find(|id| self.is_type_or_namespace(*id))
            } else {
                previous.and_then(|prev| self.member_type_or_namespace(prev, segment.text()))
            };
            resolved.push(found);
            previous = found;
        }
        resolved
    }

    /// Type named by a type node; `None` for `void` and `var`.
    pub fn resolve_type(&self, node: &SyntaxNode, from: Option<SymbolId>) -> Option<TypeRef> {
        match node.kind() {
            SyntaxKind::PREDEFINED_TYPE => {
                let keyword = node
                    .children_with_tokens()
                    .filter_map(|element| element.into_token())
                    .find(|token| !token.kind().is_trivia())?;
                match keyword.kind() {
                    SyntaxKind::VOID_KW | SyntaxKind::VAR_KW => None,
                    _ => Some(TypeRef::builtin(keyword.text())),
                }
            }
            SyntaxKind::NAMED_TYPE => {
                let segments = idents(node);
                let resolved = self.resolve_qualified(&segments, from);
                match resolved.last().copied().flatten() {
                    Some(id) if self.table[id].kind.is_type() => Some(TypeRef::Named(id)),
                    _ => Some(TypeRef::Unresolved(SmolStr::new(type_text(node)))),
                }
            }
            SyntaxKind::ARRAY_TYPE => {
                let element = node.children().next()?;
                self.resolve_type(&element, from).map(TypeRef::array_of)
            }
            _ => None,
        }
    }

    fn is_reference_type(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Builtin(name) => name == "string" || name == "object",
            TypeRef::Named(id) => matches!(
                self.table[*id].kind,
                SymbolKind::Type(TypeKind::Class | TypeKind::Interface)
            ),
            TypeRef::Array(_) | TypeRef::Unresolved(_) => true,
        }
    }

    /// Cost of passing `value` where `to` is expected, `None` if it does not
    /// convert.
    pub fn conversion(&self, value: &Value, to: &TypeRef) -> Option<u32> {
        if let TypeRef::Unresolved(_) = to {
            return Some(LENIENT);
        }
        match value {
            Value::Typed(from) if from == to => Some(IDENTITY),
            Value::Typed(TypeRef::Unresolved(_)) | Value::Unknown => Some(LENIENT),
            Value::Null => self.is_reference_type(to).then_some(IMPLICIT),
            Value::TypeName(_) | Value::Namespace(_) => None,
            Value::Typed(from) => {
                if matches!(to, TypeRef::Builtin(name) if name == "object") {
                    return Some(IMPLICIT);
                }
                match (from, to) {
                    (TypeRef::Builtin(from), TypeRef::Builtin(to)) => {
                        widens(from, to).then_some(IMPLICIT)
                    }
                    (TypeRef::Named(derived), TypeRef::Named(base)) => self
                        .hierarchy(*derived)
                        .contains(base)
                        .then_some(IMPLICIT),
                    _ => None,
                }
            }
        }
    }
}
