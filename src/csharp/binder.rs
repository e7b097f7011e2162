//! Binding pass: resolves every identifier token of one file.
//!
//! The binder only reads the symbol table and the declaration-pass output,
//! so every file of a compilation can be bound on its own thread.

use super::declare::Declarations;
use super::resolve::{
    LENIENT, Scope, Value, child_node, first_ident, has_token, idents, is_type_node, promote,
};
use super::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::base::{FileId, TextSize};
use crate::symbols::{Binding, RefKind, SymbolId, SymbolKind, SymbolTable, TypeRef};
use rowan::NodeOrToken;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Bind every identifier token of `root`, keyed by token start offset.
pub(crate) fn bind_file(
    table: &SymbolTable,
    decls: &Declarations,
    file: FileId,
    root: &SyntaxNode,
) -> FxHashMap<TextSize, Binding> {
    let mut binder = Binder {
        table,
        decls,
        scope: Scope::new(table, decls.usings(file)),
        file,
        bindings: FxHashMap::default(),
        local_types: FxHashMap::default(),
    };
    binder.bind_node(root, Context::default());
    binder.bindings
}

/// Where a node sits, for name lookup.
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    /// Innermost type or namespace
    container: Option<SymbolId>,
    /// Innermost type
    ty: Option<SymbolId>,
    /// Enclosing method or constructor
    method: Option<SymbolId>,
}

#[derive(Debug, Clone)]
struct Arg {
    value: Value,
    ref_kind: RefKind,
}

enum Resolution {
    Found(SymbolId),
    Ambiguous,
    NoMatch,
}

struct Binder<'a> {
    table: &'a SymbolTable,
    decls: &'a Declarations,
    scope: Scope<'a>,
    file: FileId,
    bindings: FxHashMap<TextSize, Binding>,
    /// Types inferred for `var` locals
    local_types: FxHashMap<SymbolId, TypeRef>,
}

fn is_expr(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::LITERAL_EXPR
            | SyntaxKind::NAME_EXPR
            | SyntaxKind::THIS_EXPR
            | SyntaxKind::MEMBER_ACCESS_EXPR
            | SyntaxKind::INVOCATION_EXPR
            | SyntaxKind::OBJECT_CREATION_EXPR
            | SyntaxKind::ASSIGN_EXPR
            | SyntaxKind::BINARY_EXPR
            | SyntaxKind::PREFIX_EXPR
            | SyntaxKind::POSTFIX_EXPR
            | SyntaxKind::PAREN_EXPR
    )
}

fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
}

impl<'a> Binder<'a> {
    fn record(&mut self, token: &SyntaxToken, binding: Binding) {
        trace!(name = token.text(), ?binding, "bound identifier");
        self.bindings.insert(token.text_range().start(), binding);
    }

    fn record_symbol(&mut self, token: &SyntaxToken, symbol: Option<SymbolId>) {
        let binding = symbol.map_or(Binding::Unresolved, Binding::Reference);
        self.record(token, binding);
    }

    /// Bind a declaring name token; returns the declared symbol.
    fn declare(&mut self, token: &SyntaxToken) -> Option<SymbolId> {
        let declared = self.decls.declared(self.file, token.text_range().start());
        let binding = declared.map_or(Binding::Unresolved, Binding::Declaration);
        self.record(token, binding);
        declared
    }

    fn value_of(&self, id: SymbolId) -> Value {
        if let Some(ty) = self.local_types.get(&id) {
            return Value::Typed(ty.clone());
        }
        let symbol = &self.table[id];
        match symbol.kind {
            SymbolKind::Type(_) => Value::TypeName(id),
            SymbolKind::Namespace => Value::Namespace(id),
            _ => symbol.ty.clone().map_or(Value::Unknown, Value::Typed),
        }
    }

    // =========================================================================
    // Declarations and statements
    // =========================================================================

    fn bind_node(&mut self, node: &SyntaxNode, cx: Context) {
        match node.kind() {
            SyntaxKind::USING_DIRECTIVE => self.bind_using(node),
            SyntaxKind::NAMESPACE_DECL => {
                let mut cx = cx;
                if let Some(name) = child_node(node, SyntaxKind::QUALIFIED_NAME) {
                    for segment in idents(&name) {
                        if let Some(id) = self.declare(&segment) {
                            cx.container = Some(id);
                        }
                    }
                }
                self.bind_children(node, cx);
            }
            SyntaxKind::TYPE_DECL | SyntaxKind::ENUM_DECL => {
                let mut cx = cx;
                if let Some(name) = first_ident(node) {
                    if let Some(id) = self.declare(&name) {
                        cx = Context {
                            container: Some(id),
                            ty: Some(id),
                            method: None,
                        };
                    }
                }
                self.bind_children(node, cx);
            }
            SyntaxKind::BASE_LIST => {
                // Base types are named from outside the declaring type
                let outer = cx.container.and_then(|id| self.table[id].container);
                for child in node.children() {
                    self.bind_type(&child, outer);
                }
            }
            SyntaxKind::METHOD_DECL | SyntaxKind::CTOR_DECL => {
                let mut cx = cx;
                if let Some(name) = first_ident(node) {
                    cx.method = self.declare(&name);
                }
                self.bind_children(node, cx);
            }
            SyntaxKind::ENUM_MEMBER | SyntaxKind::VARIABLE_DECLARATOR | SyntaxKind::PARAM => {
                if let Some(name) = first_ident(node) {
                    self.declare(&name);
                }
                self.bind_children(node, cx);
            }
            SyntaxKind::LOCAL_DECL_STMT => self.bind_local_decl(node, cx),
            SyntaxKind::FOREACH_STMT => self.bind_foreach(node, cx),
            SyntaxKind::CTOR_INITIALIZER => {
                if let Some(args) = child_node(node, SyntaxKind::ARG_LIST) {
                    self.bind_args(&args, cx);
                }
            }
            kind if is_type_node(kind) => {
                self.bind_type(node, cx.container);
            }
            kind if is_expr(kind) => {
                self.bind_expr(node, cx);
            }
            _ => self.bind_children(node, cx),
        }
    }

    fn bind_children(&mut self, node: &SyntaxNode, cx: Context) {
        for child in node.children() {
            self.bind_node(&child, cx);
        }
    }

    fn bind_using(&mut self, node: &SyntaxNode) {
        if let Some(alias) = first_ident(node) {
            self.record(&alias, Binding::Unresolved);
        }
        let Some(name) = child_node(node, SyntaxKind::QUALIFIED_NAME) else {
            return;
        };
        let segments = idents(&name);
        let resolved = self.scope.resolve_namespace_path(&segments);
        for (segment, symbol) in segments.iter().zip(resolved) {
            self.record_symbol(segment, symbol);
        }
    }

    fn bind_local_decl(&mut self, node: &SyntaxNode, cx: Context) {
        let mut inferred = false;
        for child in node.children() {
            match child.kind() {
                SyntaxKind::PREDEFINED_TYPE if has_token(&child, SyntaxKind::VAR_KW) => {
                    inferred = true;
                }
                kind if is_type_node(kind) => {
                    self.bind_type(&child, cx.container);
                }
                SyntaxKind::VARIABLE_DECLARATOR => {
                    let local = first_ident(&child).and_then(|name| self.declare(&name));
                    let init = child.children().find(|n| is_expr(n.kind()));
                    let value = init.map(|init| self.bind_expr(&init, cx));
                    if let (true, Some(local), Some(Value::Typed(ty))) = (inferred, local, value) {
                        self.local_types.insert(local, ty);
                    }
                }
                _ => self.bind_node(&child, cx),
            }
        }
    }

    fn bind_foreach(&mut self, node: &SyntaxNode, cx: Context) {
        let local = first_ident(node).and_then(|name| self.declare(&name));
        let mut inferred = false;
        for child in node.children() {
            match child.kind() {
                SyntaxKind::PREDEFINED_TYPE if has_token(&child, SyntaxKind::VAR_KW) => {
                    inferred = true;
                }
                kind if is_type_node(kind) => {
                    self.bind_type(&child, cx.container);
                }
                kind if is_expr(kind) => {
                    let collection = self.bind_expr(&child, cx);
                    // Only arrays have an element type the binder knows
                    if let (true, Some(local), Value::Typed(TypeRef::Array(element))) =
                        (inferred, local, collection)
                    {
                        self.local_types.insert(local, *element);
                    }
                }
                _ => self.bind_node(&child, cx),
            }
        }
    }

    /// Bind the identifiers of a type node; returns the named type.
    fn bind_type(&mut self, node: &SyntaxNode, from: Option<SymbolId>) -> Option<TypeRef> {
        match node.kind() {
            SyntaxKind::NAMED_TYPE => {
                let segments = idents(node);
                let resolved = self.scope.resolve_qualified(&segments, from);
                for (segment, symbol) in segments.iter().zip(resolved) {
                    self.record_symbol(segment, symbol);
                }
                if let Some(args) = child_node(node, SyntaxKind::TYPE_ARG_LIST) {
                    for arg in args.children() {
                        self.bind_type(&arg, from);
                    }
                }
            }
            SyntaxKind::ARRAY_TYPE => {
                for child in node.children() {
                    self.bind_type(&child, from);
                }
            }
            _ => {}
        }
        self.scope.resolve_type(node, from)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn bind_expr(&mut self, node: &SyntaxNode, cx: Context) -> Value {
        match node.kind() {
            SyntaxKind::LITERAL_EXPR => significant_tokens(node)
                .next()
                .map_or(Value::Unknown, |token| literal_value(&token)),
            SyntaxKind::NAME_EXPR => match first_ident(node) {
                Some(name) => self.bind_name(&name, cx),
                None => Value::Unknown,
            },
            SyntaxKind::THIS_EXPR => self.this_value(node, cx),
            SyntaxKind::PAREN_EXPR | SyntaxKind::POSTFIX_EXPR => self
                .bind_operands(node, cx)
                .into_iter()
                .next()
                .unwrap_or(Value::Unknown),
            SyntaxKind::MEMBER_ACCESS_EXPR => {
                let receiver = match node.children().next() {
                    Some(receiver) => self.bind_expr(&receiver, cx),
                    None => Value::Unknown,
                };
                match idents(node).last() {
                    Some(name) => self.bind_member(receiver, name),
                    None => Value::Unknown,
                }
            }
            SyntaxKind::INVOCATION_EXPR => self.bind_invocation(node, cx),
            SyntaxKind::OBJECT_CREATION_EXPR => {
                let ty = node
                    .children()
                    .find(|child| is_type_node(child.kind()))
                    .and_then(|type_node| self.bind_type(&type_node, cx.container));
                if let Some(args) = child_node(node, SyntaxKind::ARG_LIST) {
                    self.bind_args(&args, cx);
                }
                ty.map_or(Value::Unknown, Value::Typed)
            }
            SyntaxKind::ASSIGN_EXPR => {
                let operands = self.bind_operands(node, cx);
                operands.into_iter().next().unwrap_or(Value::Unknown)
            }
            SyntaxKind::BINARY_EXPR => self.bind_binary(node, cx),
            SyntaxKind::PREFIX_EXPR => {
                let op = significant_tokens(node).next().map(|token| token.kind());
                let operand = self
                    .bind_operands(node, cx)
                    .into_iter()
                    .next()
                    .unwrap_or(Value::Unknown);
                match op {
                    Some(SyntaxKind::BANG) => Value::Typed(TypeRef::builtin("bool")),
                    _ => operand,
                }
            }
            _ => {
                self.bind_children(node, cx);
                Value::Unknown
            }
        }
    }

    /// Bind the child expressions of `node` in order.
    fn bind_operands(&mut self, node: &SyntaxNode, cx: Context) -> Vec<Value> {
        node.children()
            .map(|child| self.bind_operand(&child, cx))
            .collect()
    }

    fn bind_operand(&mut self, child: &SyntaxNode, cx: Context) -> Value {
        if is_expr(child.kind()) {
            self.bind_expr(child, cx)
        } else {
            self.bind_node(child, cx);
            Value::Unknown
        }
    }

    /// Fold the operands of a flat operator chain from the left.
    fn bind_binary(&mut self, node: &SyntaxNode, cx: Context) -> Value {
        let mut value: Option<Value> = None;
        let mut op = None;
        for element in node.children_with_tokens() {
            match element {
                NodeOrToken::Token(token) => {
                    if !token.kind().is_trivia() {
                        op = Some(token.kind());
                    }
                }
                NodeOrToken::Node(child) => {
                    let operand = self.bind_operand(&child, cx);
                    value = Some(match value {
                        Some(left) => binary_value(op, left, operand),
                        None => operand,
                    });
                }
            }
        }
        value.unwrap_or(Value::Unknown)
    }

    fn this_value(&self, node: &SyntaxNode, cx: Context) -> Value {
        let Some(ty) = cx.ty else {
            return Value::Unknown;
        };
        let is_base = significant_tokens(node).any(|token| token.kind() == SyntaxKind::BASE_KW);
        if !is_base {
            return Value::Typed(TypeRef::Named(ty));
        }
        self.table[ty]
            .base_types
            .first()
            .cloned()
            .map_or(Value::Unknown, Value::Typed)
    }

    /// A simple name used as a value: locals, parameters, members, then types
    /// and namespaces.
    fn bind_name(&mut self, name: &SyntaxToken, cx: Context) -> Value {
        let text = name.text();
        let offset = name.text_range().start();

        if let Some(method) = cx.method {
            let variable = self.lookup_local(method, text, offset).or_else(|| {
                self.table
                    .members_named(Some(method), text)
                    .find(|id| self.table[*id].kind == SymbolKind::Parameter)
            });
            if let Some(id) = variable {
                self.record(name, Binding::Reference(id));
                return self.value_of(id);
            }
        }

        let levels = self.scope.type_levels(cx.ty);
        let member = levels.iter().find_map(|level| {
            self.table
                .members_named(Some(*level), text)
                .find(|id| self.table[*id].kind == SymbolKind::Field)
        });
        let member = member.or_else(|| self.single_method(&levels, text));
        if let Some(id) = member {
            self.record(name, Binding::Reference(id));
            return self.value_of(id);
        }

        let found = self.scope.lookup_type_or_namespace(cx.container, text);
        self.record_symbol(name, found);
        found.map_or(Value::Unknown, |id| self.value_of(id))
    }

    /// A local visible at `offset`: declared before it, in an enclosing block.
    fn lookup_local(&self, method: SymbolId, name: &str, offset: TextSize) -> Option<SymbolId> {
        self.table
            .members_named(Some(method), name)
            .filter(|id| self.table[*id].kind == SymbolKind::Local)
            .filter_map(|id| {
                let scope = *self.decls.local_scopes.get(&id)?;
                let declared_at = self.table[id].declaration?.range.start();
                (scope.contains(offset) && declared_at <= offset).then_some((id, scope.len()))
            })
            .min_by_key(|(_, len)| *len)
            .map(|(id, _)| id)
    }

    /// A method group named without invoking it binds only when unambiguous.
    fn single_method(&self, levels: &[SymbolId], name: &str) -> Option<SymbolId> {
        let mut methods = levels.iter().flat_map(|level| {
            self.table
                .members_named(Some(*level), name)
                .filter(|id| self.table[*id].kind == SymbolKind::Method)
        });
        let first = methods.next()?;
        methods.next().is_none().then_some(first)
    }

    fn bind_member(&mut self, receiver: Value, name: &SyntaxToken) -> Value {
        let text = name.text();
        let found = match receiver {
            Value::Typed(TypeRef::Named(ty)) | Value::TypeName(ty) => {
                let levels = self.scope.hierarchy(ty);
                levels
                    .iter()
                    .find_map(|level| {
                        self.table
                            .members_named(Some(*level), text)
                            .find(|id| self.table[*id].kind == SymbolKind::Field)
                    })
                    .or_else(|| self.scope.member_type_or_namespace(ty, text))
                    .or_else(|| self.single_method(&levels, text))
            }
            Value::Namespace(namespace) => self.scope.member_type_or_namespace(namespace, text),
            _ => None,
        };
        self.record_symbol(name, found);
        found.map_or(Value::Unknown, |id| self.value_of(id))
    }

    // =========================================================================
    // Invocations and overload resolution
    // =========================================================================

    fn bind_args(&mut self, list: &SyntaxNode, cx: Context) -> Vec<Arg> {
        list.children()
            .filter(|child| child.kind() == SyntaxKind::ARG)
            .map(|arg| {
                let ref_kind = match significant_tokens(&arg).next().map(|t| t.kind()) {
                    Some(SyntaxKind::REF_KW) => RefKind::Ref,
                    Some(SyntaxKind::OUT_KW) => RefKind::Out,
                    Some(SyntaxKind::IN_KW) => RefKind::In,
                    _ => RefKind::Value,
                };
                let value = match arg.children().find(|n| is_expr(n.kind())) {
                    Some(expr) => self.bind_expr(&expr, cx),
                    None => Value::Unknown,
                };
                Arg { value, ref_kind }
            })
            .collect()
    }

    fn bind_invocation(&mut self, node: &SyntaxNode, cx: Context) -> Value {
        let Some(callee) = node.children().next() else {
            return Value::Unknown;
        };
        let args = match child_node(node, SyntaxKind::ARG_LIST) {
            Some(list) => self.bind_args(&list, cx),
            None => Vec::new(),
        };

        let (name, resolution) = match callee.kind() {
            SyntaxKind::NAME_EXPR => {
                let Some(name) = first_ident(&callee) else {
                    return Value::Unknown;
                };
                let levels = self.scope.type_levels(cx.ty);
                let resolution = self.resolve_in_levels(&levels, name.text(), &args);
                (name, resolution)
            }
            SyntaxKind::MEMBER_ACCESS_EXPR => {
                let receiver = match callee.children().next() {
                    Some(receiver) => self.bind_expr(&receiver, cx),
                    None => Value::Unknown,
                };
                let Some(name) = idents(&callee).last().cloned() else {
                    return Value::Unknown;
                };
                let resolution = self.resolve_member_call(receiver, name.text(), &args, cx);
                (name, resolution)
            }
            _ => {
                self.bind_expr(&callee, cx);
                return Value::Unknown;
            }
        };

        match resolution {
            Resolution::Found(method) => {
                self.record(&name, Binding::Reference(method));
                self.value_of(method)
            }
            Resolution::Ambiguous | Resolution::NoMatch => {
                trace!(name = name.text(), "no single applicable method");
                self.record(&name, Binding::Unresolved);
                Value::Unknown
            }
        }
    }

    fn resolve_member_call(
        &self,
        receiver: Value,
        name: &str,
        args: &[Arg],
        cx: Context,
    ) -> Resolution {
        let instance = match &receiver {
            Value::Typed(TypeRef::Named(ty)) | Value::TypeName(ty) => {
                self.resolve_in_levels(&self.scope.hierarchy(*ty), name, args)
            }
            _ => Resolution::NoMatch,
        };
        if !matches!(instance, Resolution::NoMatch) {
            return instance;
        }
        if !matches!(receiver, Value::Typed(_) | Value::Null) {
            return Resolution::NoMatch;
        }

        // Extension methods see the receiver as their first argument
        let visible = self.scope.namespaces_in_scope(cx.container);
        let candidates: Vec<SymbolId> = self
            .table
            .iter()
            .filter(|(_, symbol)| symbol.is_extension && symbol.name == name)
            .map(|(id, _)| id)
            .filter(|id| visible.contains(&self.scope.namespace_of(*id)))
            .collect();
        let mut extension_args = Vec::with_capacity(args.len() + 1);
        extension_args.push(Arg {
            value: receiver,
            ref_kind: RefKind::Value,
        });
        extension_args.extend(args.iter().cloned());
        self.resolve_overload(&candidates, &extension_args)
    }

    /// Methods of derived types hide applicable methods of their bases.
    fn resolve_in_levels(&self, levels: &[SymbolId], name: &str, args: &[Arg]) -> Resolution {
        for level in levels {
            let candidates: Vec<SymbolId> = self
                .table
                .members_named(Some(*level), name)
                .filter(|id| self.table[*id].kind == SymbolKind::Method)
                .collect();
            match self.resolve_overload(&candidates, args) {
                Resolution::NoMatch => continue,
                resolved => return resolved,
            }
        }
        Resolution::NoMatch
    }

    fn resolve_overload(&self, candidates: &[SymbolId], args: &[Arg]) -> Resolution {
        let mut best: Option<(u32, SymbolId)> = None;
        let mut tied = false;

        for &candidate in candidates {
            let params: Vec<SymbolId> = self.table.parameters(candidate).collect();
            if params.len() != args.len() {
                continue;
            }
            let mut cost = 0;
            let mut applicable = true;
            for (param, arg) in params.iter().zip(args) {
                let param = &self.table[*param];
                if param.ref_kind != arg.ref_kind {
                    applicable = false;
                    break;
                }
                let step = match &param.ty {
                    Some(ty) => self.scope.conversion(&arg.value, ty),
                    None => Some(LENIENT),
                };
                match step {
                    Some(step) => cost += step,
                    None => {
                        applicable = false;
                        break;
                    }
                }
            }
            if !applicable {
                continue;
            }
            match best {
                Some((best_cost, _)) if cost > best_cost => {}
                Some((best_cost, _)) if cost == best_cost => tied = true,
                _ => {
                    best = Some((cost, candidate));
                    tied = false;
                }
            }
        }

        match best {
            Some((_, method)) if !tied => Resolution::Found(method),
            Some(_) => Resolution::Ambiguous,
            None => Resolution::NoMatch,
        }
    }
}

fn literal_value(token: &SyntaxToken) -> Value {
    let text = token.text().to_ascii_lowercase();
    let builtin = match token.kind() {
        SyntaxKind::NULL_KW => return Value::Null,
        SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => "bool",
        SyntaxKind::STRING_LITERAL => "string",
        SyntaxKind::CHAR_LITERAL => "char",
        SyntaxKind::INT_LITERAL if text.ends_with("ul") || text.ends_with("lu") => "ulong",
        SyntaxKind::INT_LITERAL if text.ends_with('l') => "long",
        SyntaxKind::INT_LITERAL if text.ends_with('u') => "uint",
        SyntaxKind::INT_LITERAL => "int",
        SyntaxKind::REAL_LITERAL if text.ends_with('f') => "float",
        SyntaxKind::REAL_LITERAL if text.ends_with('m') => "decimal",
        SyntaxKind::REAL_LITERAL => "double",
        _ => return Value::Unknown,
    };
    Value::Typed(TypeRef::builtin(builtin))
}

fn binary_value(op: Option<SyntaxKind>, left: Value, right: Value) -> Value {
    let is_string =
        |value: &Value| matches!(value, Value::Typed(TypeRef::Builtin(name)) if name == "string");
    match op {
        Some(
            SyntaxKind::EQ_EQ
            | SyntaxKind::BANG_EQ
            | SyntaxKind::LT
            | SyntaxKind::GT
            | SyntaxKind::LT_EQ
            | SyntaxKind::GT_EQ
            | SyntaxKind::AMP_AMP
            | SyntaxKind::PIPE_PIPE,
        ) => Value::Typed(TypeRef::builtin("bool")),
        Some(SyntaxKind::QUESTION_QUESTION) => match left {
            Value::Null | Value::Unknown => right,
            _ => left,
        },
        Some(SyntaxKind::PLUS) if is_string(&left) || is_string(&right) => {
            Value::Typed(TypeRef::builtin("string"))
        }
        _ => {
            if let (Value::Typed(TypeRef::Builtin(l)), Value::Typed(TypeRef::Builtin(r))) =
                (&left, &right)
            {
                if let Some(ty) = promote(l, r) {
                    return Value::Typed(TypeRef::builtin(ty));
                }
            }
            left
        }
    }
}
