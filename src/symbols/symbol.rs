use crate::base::{FileId, TextRange};
use smol_str::SmolStr;

/// Unique identifier for a symbol in the arena.
/// Uses u32 for compact storage (supports ~4 billion symbols).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Create a new SymbolId from an index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
}

/// What kind of program element a symbol is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Type(TypeKind),
    Method,
    Constructor,
    /// Fields and enum members.
    Field,
    Parameter,
    Local,
}

impl SymbolKind {
    pub fn is_type(self) -> bool {
        matches!(self, SymbolKind::Type(_))
    }

    /// Methods and constructors: the symbols whose keys carry a parameter list.
    pub fn is_callable(self) -> bool {
        matches!(self, SymbolKind::Method | SymbolKind::Constructor)
    }

    /// Parameters and locals: named relative to their declaring method.
    pub fn is_scoped_variable(self) -> bool {
        matches!(self, SymbolKind::Parameter | SymbolKind::Local)
    }
}

/// How a parameter is passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RefKind {
    #[default]
    Value,
    Ref,
    Out,
    In,
}

impl RefKind {
    /// Prefix used when the parameter type is displayed in a key.
    pub fn prefix(self) -> &'static str {
        match self {
            RefKind::Value => "",
            RefKind::Ref => "ref ",
            RefKind::Out => "out ",
            RefKind::In => "in ",
        }
    }
}

/// A reference to a type, as resolved by the semantic engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A language-predefined type, named by its keyword (`string`, `int`).
    Builtin(SmolStr),
    /// A type declared in the indexed sources.
    Named(SymbolId),
    Array(Box<TypeRef>),
    /// A type name the engine could not resolve; kept as written.
    Unresolved(SmolStr),
}

impl TypeRef {
    pub fn builtin(keyword: &str) -> Self {
        TypeRef::Builtin(SmolStr::new(keyword))
    }

    pub fn array_of(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }
}

/// Declaration site of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: FileId,
    /// Range of the declaring name token.
    pub range: TextRange,
}

/// A resolved program element.
///
/// Symbols form a tree through `container`: namespaces contain namespaces and
/// types, types contain members, methods contain their parameters and locals.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub container: Option<SymbolId>,
    /// Field/parameter/local type, or a method's return type (`None` for `void`
    /// and for symbols without a type).
    pub ty: Option<TypeRef>,
    pub ref_kind: RefKind,
    /// Base class and implemented interfaces of a type.
    pub base_types: Vec<TypeRef>,
    pub is_static: bool,
    /// Method whose first parameter is the `this` receiver.
    pub is_extension: bool,
    pub declaration: Option<Location>,
}

impl Symbol {
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind, container: Option<SymbolId>) -> Self {
        Self {
            name: name.into(),
            kind,
            container,
            ty: None,
            ref_kind: RefKind::Value,
            base_types: Vec::new(),
            is_static: false,
            is_extension: false,
            declaration: None,
        }
    }

    pub fn with_type(mut self, ty: TypeRef) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    pub fn with_declaration(mut self, file: FileId, range: TextRange) -> Self {
        self.declaration = Some(Location { file, range });
        self
    }

    pub fn extension(mut self) -> Self {
        self.is_extension = true;
        self.is_static = true;
        self
    }
}

/// What the semantic engine resolved a token to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Binding {
    /// The token names the symbol at its declaration site.
    Declaration(SymbolId),
    /// The token refers to a symbol declared elsewhere.
    Reference(SymbolId),
    /// An identifier the engine could not resolve.
    Unresolved,
    /// Nothing to resolve (keywords, punctuation, literals).
    #[default]
    None,
}

impl Binding {
    pub fn symbol(self) -> Option<SymbolId> {
        match self {
            Binding::Declaration(id) | Binding::Reference(id) => Some(id),
            Binding::Unresolved | Binding::None => None,
        }
    }

    pub fn is_declaration(self) -> bool {
        matches!(self, Binding::Declaration(_))
    }
}
