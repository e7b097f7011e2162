//! Declaration pass: fills the symbol table from every file of a compilation.
//!
//! Namespaces and types are declared across all files first, so that member
//! signatures in one file can name types declared in another. Members,
//! parameters and locals follow. Locals are declared up front with the block
//! they are visible in; binding never mutates the table.

use super::resolve::{Scope, child_node, first_ident, has_token, idents, is_type_node};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::base::{FileId, TextRange, TextSize};
use crate::symbols::{RefKind, Symbol, SymbolId, SymbolKind, SymbolTable, TypeKind, TypeRef};
use rustc_hash::FxHashMap;
use tracing::trace;

/// What the declaration pass hands to every document's binder.
#[derive(Debug, Default)]
pub(crate) struct Declarations {
    /// Declared symbol of each declaring name token
    pub names: FxHashMap<(FileId, TextSize), SymbolId>,
    /// Namespaces imported by each file's `using` directives
    pub usings: Vec<Vec<SymbolId>>,
    /// Range of the statement list a local is visible in
    pub local_scopes: FxHashMap<SymbolId, TextRange>,
}

impl Declarations {
    pub fn declared(&self, file: FileId, offset: TextSize) -> Option<SymbolId> {
        self.names.get(&(file, offset)).copied()
    }

    pub fn usings(&self, file: FileId) -> &[SymbolId] {
        self.usings.get(file.index()).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub(crate) fn declare(roots: &[SyntaxNode]) -> (SymbolTable, Declarations) {
    let mut declarer = Declarer {
        table: SymbolTable::new(),
        decls: Declarations {
            usings: vec![Vec::new(); roots.len()],
            ..Declarations::default()
        },
    };

    for (index, root) in roots.iter().enumerate() {
        declarer.declare_types(FileId::new(index), root, None);
    }
    for (index, root) in roots.iter().enumerate() {
        let file = FileId::new(index);
        declarer.collect_usings(file, root);
        declarer.declare_members(file, root, None);
    }

    (declarer.table, declarer.decls)
}

struct Declarer {
    table: SymbolTable,
    decls: Declarations,
}

impl Declarer {
    fn record(&mut self, file: FileId, offset: TextSize, id: SymbolId) {
        self.decls.names.insert((file, offset), id);
    }

    fn declared(&self, file: FileId, node: &SyntaxNode) -> Option<SymbolId> {
        let name = first_ident(node)?;
        self.decls.declared(file, name.text_range().start())
    }

    // =========================================================================
    // Namespaces and types
    // =========================================================================

    fn declare_types(&mut self, file: FileId, node: &SyntaxNode, container: Option<SymbolId>) {
        for child in node.children() {
            match child.kind() {
                SyntaxKind::NAMESPACE_DECL => {
                    let mut namespace = container;
                    if let Some(name) = child_node(&child, SyntaxKind::QUALIFIED_NAME) {
                        for segment in idents(&name) {
                            let range = segment.text_range();
                            let id = self.namespace(namespace, segment.text(), file, range);
                            self.record(file, range.start(), id);
                            namespace = Some(id);
                        }
                    }
                    self.declare_types(file, &child, namespace);
                }
                SyntaxKind::TYPE_DECL | SyntaxKind::ENUM_DECL => {
                    let Some(name) = first_ident(&child) else {
                        continue;
                    };
                    let kind = SymbolKind::Type(type_kind(&child));
                    // Partial declarations share one symbol
                    let existing = self
                        .table
                        .members_named(container, name.text())
                        .find(|id| self.table[*id].kind == kind);
                    let id = match existing {
                        Some(id) => id,
                        None => self.table.insert(
                            Symbol::new(name.text(), kind, container)
                                .with_declaration(file, name.text_range()),
                        ),
                    };
                    self.record(file, name.text_range().start(), id);
                    self.declare_types(file, &child, Some(id));
                }
                _ => {}
            }
        }
    }

    fn namespace(
        &mut self,
        container: Option<SymbolId>,
        name: &str,
        file: FileId,
        range: TextRange,
    ) -> SymbolId {
        let existing = self
            .table
            .members_named(container, name)
            .find(|id| self.table[*id].kind == SymbolKind::Namespace);
        existing.unwrap_or_else(|| {
            self.table.insert(
                Symbol::new(name, SymbolKind::Namespace, container).with_declaration(file, range),
            )
        })
    }

    fn collect_usings(&mut self, file: FileId, root: &SyntaxNode) {
        let scope = Scope::new(&self.table, &[]);
        let mut usings = Vec::new();
        for directive in root
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::USING_DIRECTIVE)
        {
            // Aliases and `using static` import no namespace
            if has_token(&directive, SyntaxKind::STATIC_KW)
                || has_token(&directive, SyntaxKind::EQ)
            {
                continue;
            }
            let Some(name) = child_node(&directive, SyntaxKind::QUALIFIED_NAME) else {
                continue;
            };
            if let Some(Some(id)) = scope.resolve_namespace_path(&idents(&name)).last() {
                if self.table[*id].kind == SymbolKind::Namespace {
                    usings.push(*id);
                }
            }
        }
        self.decls.usings[file.index()] = usings;
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn declare_members(&mut self, file: FileId, node: &SyntaxNode, container: Option<SymbolId>) {
        for child in node.children() {
            match child.kind() {
                SyntaxKind::NAMESPACE_DECL => {
                    let namespace = child_node(&child, SyntaxKind::QUALIFIED_NAME)
                        .and_then(|name| idents(&name).last().cloned())
                        .and_then(|last| self.decls.declared(file, last.text_range().start()))
                        .or(container);
                    self.declare_members(file, &child, namespace);
                }
                SyntaxKind::TYPE_DECL | SyntaxKind::ENUM_DECL => {
                    let Some(ty) = self.declared(file, &child) else {
                        continue;
                    };
                    self.declare_base_list(file, &child, ty, container);
                    if child.kind() == SyntaxKind::ENUM_DECL {
                        self.declare_enum_members(file, &child, ty);
                    } else {
                        self.declare_members(file, &child, Some(ty));
                    }
                }
                SyntaxKind::FIELD_DECL => {
                    if let Some(ty) = container {
                        self.declare_field(file, &child, ty);
                    }
                }
                SyntaxKind::METHOD_DECL | SyntaxKind::CTOR_DECL => {
                    if let Some(ty) = container {
                        self.declare_callable(file, &child, ty);
                    }
                }
                _ => {}
            }
        }
    }

    fn declare_base_list(
        &mut self,
        file: FileId,
        node: &SyntaxNode,
        ty: SymbolId,
        container: Option<SymbolId>,
    ) {
        let Some(list) = child_node(node, SyntaxKind::BASE_LIST) else {
            return;
        };
        let scope = Scope::new(&self.table, self.decls.usings(file));
        let bases: Vec<_> = list
            .children()
            .filter(|child| is_type_node(child.kind()))
            .filter_map(|child| scope.resolve_type(&child, container))
            .collect();
        if let Some(symbol) = self.table.get_mut(ty) {
            symbol.base_types.extend(bases);
        }
    }

    fn declare_enum_members(&mut self, file: FileId, node: &SyntaxNode, ty: SymbolId) {
        for member in node
            .children()
            .filter(|child| child.kind() == SyntaxKind::ENUM_MEMBER)
        {
            let Some(name) = first_ident(&member) else {
                continue;
            };
            let mut symbol = Symbol::new(name.text(), SymbolKind::Field, Some(ty))
                .with_type(TypeRef::Named(ty))
                .with_declaration(file, name.text_range());
            symbol.is_static = true;
            let id = self.table.insert(symbol);
            self.record(file, name.text_range().start(), id);
        }
    }

    fn declare_field(&mut self, file: FileId, node: &SyntaxNode, ty: SymbolId) {
        let scope = Scope::new(&self.table, self.decls.usings(file));
        let field_type = node
            .children()
            .find(|child| is_type_node(child.kind()))
            .and_then(|type_node| scope.resolve_type(&type_node, Some(ty)));
        let is_static =
            has_token(node, SyntaxKind::STATIC_KW) || has_token(node, SyntaxKind::CONST_KW);

        for declarator in node
            .children()
            .filter(|child| child.kind() == SyntaxKind::VARIABLE_DECLARATOR)
        {
            let Some(name) = first_ident(&declarator) else {
                continue;
            };
            let mut symbol = Symbol::new(name.text(), SymbolKind::Field, Some(ty))
                .with_declaration(file, name.text_range());
            symbol.ty = field_type.clone();
            symbol.is_static = is_static;
            let id = self.table.insert(symbol);
            self.record(file, name.text_range().start(), id);
        }
    }

    fn declare_callable(&mut self, file: FileId, node: &SyntaxNode, ty: SymbolId) {
        let Some(name) = first_ident(node) else {
            return;
        };
        let (kind, return_type) = if node.kind() == SyntaxKind::CTOR_DECL {
            (SymbolKind::Constructor, None)
        } else {
            let scope = Scope::new(&self.table, self.decls.usings(file));
            let return_type = node
                .children()
                .find(|child| is_type_node(child.kind()))
                .and_then(|type_node| scope.resolve_type(&type_node, Some(ty)));
            (SymbolKind::Method, return_type)
        };

        let mut symbol =
            Symbol::new(name.text(), kind, Some(ty)).with_declaration(file, name.text_range());
        symbol.ty = return_type;
        symbol.is_static = has_token(node, SyntaxKind::STATIC_KW);
        let method = self.table.insert(symbol);
        self.record(file, name.text_range().start(), method);
        trace!(name = name.text(), "declared callable");

        if let Some(params) = child_node(node, SyntaxKind::PARAM_LIST) {
            for (index, param) in params
                .children()
                .filter(|child| child.kind() == SyntaxKind::PARAM)
                .enumerate()
            {
                let receiver = self.declare_param(file, &param, method, ty);
                if index == 0 && receiver {
                    if let Some(symbol) = self.table.get_mut(method) {
                        symbol.is_extension = true;
                    }
                }
            }
        }

        self.declare_locals(file, node, method, ty);
    }

    /// Returns whether the parameter is an extension receiver (`this`).
    fn declare_param(
        &mut self,
        file: FileId,
        node: &SyntaxNode,
        method: SymbolId,
        ty: SymbolId,
    ) -> bool {
        let scope = Scope::new(&self.table, self.decls.usings(file));
        let param_type = node
            .children()
            .find(|child| is_type_node(child.kind()))
            .and_then(|type_node| scope.resolve_type(&type_node, Some(ty)));
        let ref_kind = if has_token(node, SyntaxKind::REF_KW) {
            RefKind::Ref
        } else if has_token(node, SyntaxKind::OUT_KW) {
            RefKind::Out
        } else if has_token(node, SyntaxKind::IN_KW) {
            RefKind::In
        } else {
            RefKind::Value
        };

        // A parameter without a name still takes its place in the signature
        let name = first_ident(node);
        let mut symbol = Symbol::new(
            name.as_ref().map(|n| n.text()).unwrap_or_default(),
            SymbolKind::Parameter,
            Some(method),
        )
        .with_ref_kind(ref_kind);
        symbol.ty = param_type;
        if let Some(name) = &name {
            symbol = symbol.with_declaration(file, name.text_range());
        }
        let id = self.table.insert(symbol);
        if let Some(name) = name {
            self.record(file, name.text_range().start(), id);
        }
        has_token(node, SyntaxKind::THIS_KW)
    }

    /// Locals are visible in the node that holds their declaration: the
    /// enclosing block, or the `for` statement for its initializer.
    /// A `foreach` variable is visible in its own statement.
    fn declare_locals(&mut self, file: FileId, node: &SyntaxNode, method: SymbolId, ty: SymbolId) {
        for statement in node.descendants() {
            let (scope_range, names) = match statement.kind() {
                SyntaxKind::LOCAL_DECL_STMT => {
                    let scope_range = statement
                        .parent()
                        .map(|parent| parent.text_range())
                        .unwrap_or_else(|| statement.text_range());
                    let names: Vec<_> = statement
                        .children()
                        .filter(|child| child.kind() == SyntaxKind::VARIABLE_DECLARATOR)
                        .filter_map(|declarator| first_ident(&declarator))
                        .collect();
                    (scope_range, names)
                }
                SyntaxKind::FOREACH_STMT => {
                    let names: Vec<_> = first_ident(&statement).into_iter().collect();
                    (statement.text_range(), names)
                }
                _ => continue,
            };
            let scope = Scope::new(&self.table, self.decls.usings(file));
            let local_type = statement
                .children()
                .find(|child| is_type_node(child.kind()))
                .and_then(|type_node| scope.resolve_type(&type_node, Some(ty)));

            for name in names {
                let mut symbol = Symbol::new(name.text(), SymbolKind::Local, Some(method))
                    .with_declaration(file, name.text_range());
                symbol.ty = local_type.clone();
                let id = self.table.insert(symbol);
                self.record(file, name.text_range().start(), id);
                self.decls.local_scopes.insert(id, scope_range);
            }
        }
    }
}

fn type_kind(node: &SyntaxNode) -> TypeKind {
    let keyword = node
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .map(|token| token.kind())
        .find(|kind| {
            matches!(
                kind,
                SyntaxKind::CLASS_KW
                    | SyntaxKind::STRUCT_KW
                    | SyntaxKind::INTERFACE_KW
                    | SyntaxKind::ENUM_KW
            )
        });
    match keyword {
        Some(SyntaxKind::STRUCT_KW) => TypeKind::Struct,
        Some(SyntaxKind::INTERFACE_KW) => TypeKind::Interface,
        Some(SyntaxKind::ENUM_KW) => TypeKind::Enum,
        _ => TypeKind::Class,
    }
}
