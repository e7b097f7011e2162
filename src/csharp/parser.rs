//! Recursive descent parser for C#
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: every lexed token,
//! trivia included, lands in the tree and an empty `EOF` token closes it.

use super::lexer::{Lexer, Token};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse C# source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Tokens that end error recovery between declarations
const MEMBER_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::CLASS_KW,
    SyntaxKind::STRUCT_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::NAMESPACE_KW,
    SyntaxKind::USING_KW,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::PROTECTED_KW,
    SyntaxKind::INTERNAL_KW,
    SyntaxKind::STATIC_KW,
    SyntaxKind::SEMICOLON,
    SyntaxKind::R_BRACE,
];

/// Tokens that end error recovery inside a block
const STMT_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::L_BRACE,
    SyntaxKind::R_BRACE,
];

const ASSIGN_OPS: &[SyntaxKind] = &[
    SyntaxKind::EQ,
    SyntaxKind::PLUS_EQ,
    SyntaxKind::MINUS_EQ,
    SyntaxKind::STAR_EQ,
    SyntaxKind::SLASH_EQ,
];

const PREFIX_OPS: &[SyntaxKind] = &[
    SyntaxKind::BANG,
    SyntaxKind::MINUS,
    SyntaxKind::PLUS,
    SyntaxKind::TILDE,
    SyntaxKind::PLUS_PLUS,
    SyntaxKind::MINUS_MINUS,
];

const PARAM_MODIFIERS: &[SyntaxKind] = &[
    SyntaxKind::THIS_KW,
    SyntaxKind::REF_KW,
    SyntaxKind::OUT_KW,
    SyntaxKind::IN_KW,
    SyntaxKind::PARAMS_KW,
];

/// Deepest statement and expression nesting the parser descends into.
/// Anything deeper is kept as an `ERROR` node.
const MAX_DEPTH: u32 = 256;

/// Binding power of a binary operator; higher binds tighter
fn binary_binding_power(kind: SyntaxKind) -> Option<u8> {
    let bp = match kind {
        SyntaxKind::QUESTION_QUESTION => 1,
        SyntaxKind::PIPE_PIPE => 2,
        SyntaxKind::AMP_AMP => 3,
        SyntaxKind::PIPE => 4,
        SyntaxKind::CARET => 5,
        SyntaxKind::AMP => 6,
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => 7,
        SyntaxKind::LT | SyntaxKind::GT | SyntaxKind::LT_EQ | SyntaxKind::GT_EQ => 8,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 9,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 10,
        _ => return None,
    };
    Some(bp)
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    depth: u32,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            depth: 0,
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (lookahead always skips trivia)
    // =========================================================================

    fn nth_token(&self, n: usize) -> Option<&'a Token<'a>> {
        let tokens: &'a [Token<'a>] = self.tokens;
        tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn current_text(&self) -> &'a str {
        self.nth_token(0).map(|t| t.text).unwrap_or("")
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    /// Identifier with the given text, for contextual keywords
    fn at_contextual(&self, text: &str) -> bool {
        self.at(SyntaxKind::IDENT) && self.current_text() == text
    }

    fn at_type_start(&self) -> bool {
        let kind = self.current_kind();
        kind == SyntaxKind::IDENT || kind.is_predefined_type()
    }

    /// If the `n`th token opens a type argument list, the index just past
    /// its closing `>`.
    fn type_args_end(&self, n: usize) -> Option<usize> {
        if self.nth(n) != SyntaxKind::LT {
            return None;
        }
        let mut open = 0u32;
        let mut n = n;
        loop {
            match self.nth(n) {
                SyntaxKind::LT => open += 1,
                SyntaxKind::GT => {
                    open -= 1;
                    if open == 0 {
                        return Some(n + 1);
                    }
                }
                SyntaxKind::IDENT
                | SyntaxKind::DOT
                | SyntaxKind::COMMA
                | SyntaxKind::QUESTION
                | SyntaxKind::L_BRACKET
                | SyntaxKind::R_BRACKET => {}
                kind if kind.is_predefined_type() => {}
                _ => return None,
            }
            n += 1;
        }
    }

    /// Whether the tokens from `n` on read as a type; returns the index just
    /// past it.
    fn type_end(&self, n: usize) -> Option<usize> {
        let first = self.nth(n);
        let mut n = n + 1;
        if first == SyntaxKind::IDENT {
            while self.nth(n) == SyntaxKind::DOT && self.nth(n + 1) == SyntaxKind::IDENT {
                n += 2;
            }
            if let Some(end) = self.type_args_end(n) {
                n = end;
            }
        } else if !first.is_predefined_type() {
            return None;
        }
        while self.nth(n) == SyntaxKind::L_BRACKET && self.nth(n + 1) == SyntaxKind::R_BRACKET {
            n += 2;
        }
        Some(n)
    }

    /// A member name followed by its parameter list, type parameters
    /// optional.
    fn at_callable_name(&self) -> bool {
        if !self.at(SyntaxKind::IDENT) {
            return false;
        }
        let after = self.type_args_end(1).unwrap_or(1);
        self.nth(after) == SyntaxKind::L_PAREN
    }

    fn end_offset(&self) -> TextSize {
        self.tokens
            .last()
            .map(|t| t.offset + TextSize::of(t.text))
            .unwrap_or_default()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume pending trivia and the next significant token
    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Like `bump`, but records the token under another kind
    fn bump_remap(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = match self.nth_token(0) {
            Some(t) => TextRange::at(t.offset, TextSize::of(t.text)),
            None => TextRange::empty(self.end_offset()),
        };
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        let checkpoint = self.checkpoint();
        let start = self.pos;
        self.recover_from(checkpoint, start, message, recovery);
    }

    /// Wrap everything since `checkpoint` plus the tokens up to the next
    /// recovery point in an ERROR node.
    fn recover_from(
        &mut self,
        checkpoint: Checkpoint,
        start: usize,
        message: impl Into<String>,
        recovery: &[SyntaxKind],
    ) {
        self.error(message);
        self.start_node_at(checkpoint, SyntaxKind::ERROR);
        // Skipped blocks are skipped whole, so their closing brace cannot end
        // the enclosing declaration.
        let mut open = 0u32;
        while !self.at_eof() && (open > 0 || !self.at_any(recovery)) {
            match self.current_kind() {
                SyntaxKind::L_BRACE => open += 1,
                SyntaxKind::R_BRACE => open = open.saturating_sub(1),
                _ => {}
            }
            self.bump();
        }
        // Always consume at least one token to make progress
        if self.pos == start && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    /// Parse `f` one nesting level deeper, or keep the construct as an
    /// `ERROR` node once `MAX_DEPTH` is reached.
    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        if self.depth >= MAX_DEPTH {
            self.skip_too_deep();
            return;
        }
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    /// Skip to the end of the current construct: the next `;`, `,` or
    /// unmatched closing bracket.
    fn skip_too_deep(&mut self) {
        self.error("nesting too deep");
        self.start_node(SyntaxKind::ERROR);
        let mut open = 0u32;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACE | SyntaxKind::L_BRACKET => open += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACE | SyntaxKind::R_BRACKET if open == 0 => {
                    break;
                }
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACE | SyntaxKind::R_BRACKET => open -= 1,
                SyntaxKind::SEMICOLON | SyntaxKind::COMMA if open == 0 => break,
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Start a node; pending trivia stays in the parent.
    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// SourceFile = (UsingDirective | NamespaceDecl | TypeDecl)* EOF
    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());
        self.parse_member_list(false, false);
        self.skip_trivia();
        self.builder.token(SyntaxKind::EOF.into(), "");
        self.builder.finish_node();
    }

    fn parse_member_list(&mut self, in_type: bool, braced: bool) {
        loop {
            self.skip_trivia();
            if self.at_eof() || (braced && self.at(SyntaxKind::R_BRACE)) {
                break;
            }
            // Empty member
            if self.eat(SyntaxKind::SEMICOLON) {
                continue;
            }
            let pos_before = self.pos;
            self.nested(|p| p.parse_member(in_type));
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }
    }

    fn parse_member(&mut self, in_type: bool) {
        match self.current_kind() {
            SyntaxKind::USING_KW if !in_type => self.parse_using_directive(),
            SyntaxKind::NAMESPACE_KW if !in_type => self.parse_namespace(),
            _ => self.parse_declaration(in_type),
        }
    }

    /// UsingDirective = 'using' 'static'? (Ident '=')? QualifiedName ';'
    fn parse_using_directive(&mut self) {
        self.start_node(SyntaxKind::USING_DIRECTIVE);
        self.bump();
        self.eat(SyntaxKind::STATIC_KW);
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::EQ {
            self.bump();
            self.bump();
        }
        self.parse_qualified_name();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// NamespaceDecl = 'namespace' QualifiedName ('{' Member* '}' | ';' Member*)
    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_DECL);
        self.bump();
        self.parse_qualified_name();
        if self.eat(SyntaxKind::SEMICOLON) {
            // File-scoped: the rest of the file belongs to the namespace
            self.parse_member_list(false, false);
        } else if self.expect(SyntaxKind::L_BRACE) {
            self.parse_member_list(false, true);
            self.expect(SyntaxKind::R_BRACE);
        }
        self.finish_node();
    }

    /// QualifiedName = Ident ('.' Ident)*
    fn parse_qualified_name(&mut self) {
        self.start_node(SyntaxKind::QUALIFIED_NAME);
        self.expect(SyntaxKind::IDENT);
        while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
            self.bump();
            self.bump();
        }
        self.finish_node();
    }

    fn parse_modifiers(&mut self) {
        loop {
            if self.current_kind().is_modifier() {
                self.bump();
            } else if self.at_contextual("partial")
                && matches!(
                    self.nth(1),
                    SyntaxKind::CLASS_KW
                        | SyntaxKind::STRUCT_KW
                        | SyntaxKind::INTERFACE_KW
                        | SyntaxKind::VOID_KW
                )
            {
                self.bump_remap(SyntaxKind::PARTIAL_KW);
            } else {
                break;
            }
        }
    }

    fn parse_declaration(&mut self, in_type: bool) {
        let checkpoint = self.checkpoint();
        let start = self.pos;
        self.parse_modifiers();

        match self.current_kind() {
            SyntaxKind::CLASS_KW | SyntaxKind::STRUCT_KW | SyntaxKind::INTERFACE_KW => {
                self.start_node_at(checkpoint, SyntaxKind::TYPE_DECL);
                self.parse_type_decl_rest();
                self.finish_node();
            }
            SyntaxKind::ENUM_KW => {
                self.start_node_at(checkpoint, SyntaxKind::ENUM_DECL);
                self.parse_enum_decl_rest();
                self.finish_node();
            }
            _ if in_type => self.parse_type_member(checkpoint, start),
            kind => self.recover_from(
                checkpoint,
                start,
                format!("expected type declaration, found {:?}", kind),
                MEMBER_RECOVERY,
            ),
        }
    }

    /// TypeDecl = Modifier* ('class' | 'struct' | 'interface') Ident BaseList? TypeBody
    fn parse_type_decl_rest(&mut self) {
        self.bump();
        self.expect(SyntaxKind::IDENT);
        if self.at(SyntaxKind::LT) {
            self.parse_type_param_list();
        }
        if self.at(SyntaxKind::COLON) {
            self.parse_base_list();
        }
        self.parse_where_clauses();
        if self.expect(SyntaxKind::L_BRACE) {
            self.parse_member_list(true, true);
            self.expect(SyntaxKind::R_BRACE);
        }
        self.eat(SyntaxKind::SEMICOLON);
    }

    /// TypeParamList = '<' TypeParam (',' TypeParam)* '>'
    fn parse_type_param_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_PARAM_LIST);
        self.bump();
        loop {
            self.start_node(SyntaxKind::TYPE_PARAM);
            // Variance annotations
            if self.at_any(&[SyntaxKind::IN_KW, SyntaxKind::OUT_KW]) {
                self.bump();
            }
            self.expect(SyntaxKind::IDENT);
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::GT);
        self.finish_node();
    }

    /// WhereClause = 'where' Ident ':' Constraint (',' Constraint)*
    /// Constraint = 'class' | 'struct' | 'new' '(' ')' | Type
    fn parse_where_clauses(&mut self) {
        while self.at_contextual("where") && self.nth(1) == SyntaxKind::IDENT {
            self.start_node(SyntaxKind::WHERE_CLAUSE);
            self.bump_remap(SyntaxKind::WHERE_KW);
            self.bump();
            self.expect(SyntaxKind::COLON);
            loop {
                match self.current_kind() {
                    SyntaxKind::CLASS_KW | SyntaxKind::STRUCT_KW => self.bump(),
                    SyntaxKind::NEW_KW => {
                        self.bump();
                        self.expect(SyntaxKind::L_PAREN);
                        self.expect(SyntaxKind::R_PAREN);
                    }
                    _ => self.parse_type(),
                }
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.finish_node();
        }
    }

    /// BaseList = ':' Type (',' Type)*
    fn parse_base_list(&mut self) {
        self.start_node(SyntaxKind::BASE_LIST);
        self.bump();
        self.parse_type();
        while self.eat(SyntaxKind::COMMA) {
            self.parse_type();
        }
        self.finish_node();
    }

    /// EnumDecl = Modifier* 'enum' Ident BaseList? '{' (EnumMember (',' EnumMember)* ','?)? '}'
    fn parse_enum_decl_rest(&mut self) {
        self.bump();
        self.expect(SyntaxKind::IDENT);
        if self.at(SyntaxKind::COLON) {
            self.parse_base_list();
        }
        if self.expect(SyntaxKind::L_BRACE) {
            while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                if self.at(SyntaxKind::IDENT) {
                    self.start_node(SyntaxKind::ENUM_MEMBER);
                    self.bump();
                    if self.eat(SyntaxKind::EQ) {
                        self.parse_expr();
                    }
                    self.finish_node();
                } else {
                    self.error_recover(
                        "expected enum member",
                        &[SyntaxKind::COMMA, SyntaxKind::R_BRACE],
                    );
                }
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.expect(SyntaxKind::R_BRACE);
        }
        self.eat(SyntaxKind::SEMICOLON);
    }

    /// Constructor, method, field or property, after its modifiers.
    fn parse_type_member(&mut self, checkpoint: Checkpoint, start: usize) {
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN {
            self.start_node_at(checkpoint, SyntaxKind::CTOR_DECL);
            self.bump();
            self.parse_param_list();
            if self.at(SyntaxKind::COLON) {
                self.parse_ctor_initializer();
            }
            self.parse_method_body();
            self.finish_node();
            return;
        }

        if !self.at_type_start() {
            self.recover_from(
                checkpoint,
                start,
                format!("expected member declaration, found {:?}", self.current_kind()),
                MEMBER_RECOVERY,
            );
            return;
        }

        self.parse_type();
        if self.at_callable_name() {
            self.start_node_at(checkpoint, SyntaxKind::METHOD_DECL);
            self.bump();
            if self.at(SyntaxKind::LT) {
                self.parse_type_param_list();
            }
            self.parse_param_list();
            self.parse_where_clauses();
            self.parse_method_body();
            self.finish_node();
        } else {
            self.start_node_at(checkpoint, SyntaxKind::FIELD_DECL);
            self.parse_variable_declarators();
            match self.current_kind() {
                // Properties are indexed like fields
                SyntaxKind::L_BRACE => self.parse_accessors(),
                SyntaxKind::FAT_ARROW => {
                    self.bump();
                    self.parse_expr();
                    self.expect(SyntaxKind::SEMICOLON);
                }
                _ => {
                    self.expect(SyntaxKind::SEMICOLON);
                }
            }
            self.finish_node();
        }
    }

    /// Accessors = '{' (Accessor (';' | Block | '=>' Expr ';'))* '}' ('=' Expr ';')?
    /// Accessor = Modifier* ('get' | 'set' | 'init' | Ident)
    fn parse_accessors(&mut self) {
        self.bump();
        while self.at(SyntaxKind::IDENT) || self.current_kind().is_modifier() {
            while self.current_kind().is_modifier() {
                self.bump();
            }
            match self.current_text() {
                "get" if self.at(SyntaxKind::IDENT) => self.bump_remap(SyntaxKind::GET_KW),
                "set" if self.at(SyntaxKind::IDENT) => self.bump_remap(SyntaxKind::SET_KW),
                "init" if self.at(SyntaxKind::IDENT) => self.bump_remap(SyntaxKind::INIT_KW),
                _ => {
                    self.expect(SyntaxKind::IDENT);
                }
            }
            match self.current_kind() {
                SyntaxKind::L_BRACE => self.parse_block(),
                SyntaxKind::FAT_ARROW => {
                    self.bump();
                    self.parse_expr();
                    self.expect(SyntaxKind::SEMICOLON);
                }
                _ => {
                    self.expect(SyntaxKind::SEMICOLON);
                }
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        if self.eat(SyntaxKind::EQ) {
            self.parse_expr();
            self.expect(SyntaxKind::SEMICOLON);
        }
    }

    /// MethodBody = Block | '=>' Expr ';' | ';'
    fn parse_method_body(&mut self) {
        match self.current_kind() {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::FAT_ARROW => {
                self.bump();
                self.parse_expr();
                self.expect(SyntaxKind::SEMICOLON);
            }
            _ => {
                self.expect(SyntaxKind::SEMICOLON);
            }
        }
    }

    /// CtorInitializer = ':' ('base' | 'this') ArgList
    fn parse_ctor_initializer(&mut self) {
        self.start_node(SyntaxKind::CTOR_INITIALIZER);
        self.bump();
        if self.at_any(&[SyntaxKind::BASE_KW, SyntaxKind::THIS_KW]) {
            self.bump();
        } else {
            self.error("expected `base` or `this`");
        }
        self.parse_arg_list();
        self.finish_node();
    }

    /// ParamList = '(' (Param (',' Param)*)? ')'
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        self.expect(SyntaxKind::L_PAREN);
        if !self.at(SyntaxKind::R_PAREN) {
            loop {
                self.parse_param();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Param = ('this' | 'ref' | 'out' | 'in' | 'params')* Type Ident ('=' Expr)?
    fn parse_param(&mut self) {
        self.start_node(SyntaxKind::PARAM);
        while self.at_any(PARAM_MODIFIERS) {
            self.bump();
        }
        self.parse_type();
        self.expect(SyntaxKind::IDENT);
        if self.eat(SyntaxKind::EQ) {
            self.parse_expr();
        }
        self.finish_node();
    }

    /// VariableDeclarator = Ident ('=' Expr)?, comma separated
    fn parse_variable_declarators(&mut self) {
        loop {
            self.start_node(SyntaxKind::VARIABLE_DECLARATOR);
            self.expect(SyntaxKind::IDENT);
            if self.eat(SyntaxKind::EQ) {
                self.parse_expr();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Type = (PredefinedType | NamedType) ('[' ']')*
    fn parse_type(&mut self) {
        let checkpoint = self.checkpoint();
        let kind = self.current_kind();
        if kind.is_predefined_type() {
            self.start_node(SyntaxKind::PREDEFINED_TYPE);
            self.bump();
            self.finish_node();
        } else if kind == SyntaxKind::IDENT {
            self.start_node(SyntaxKind::NAMED_TYPE);
            self.bump();
            while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
                self.bump();
                self.bump();
            }
            if self.type_args_end(0).is_some() {
                self.parse_type_arg_list();
            }
            self.finish_node();
        } else {
            self.error(format!("expected type, found {:?}", kind));
            return;
        }

        while self.at(SyntaxKind::L_BRACKET) && self.nth(1) == SyntaxKind::R_BRACKET {
            self.start_node_at(checkpoint, SyntaxKind::ARRAY_TYPE);
            self.bump();
            self.bump();
            self.finish_node();
        }
    }

    /// TypeArgList = '<' Type (',' Type)* '>'
    fn parse_type_arg_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_ARG_LIST);
        self.bump();
        loop {
            self.parse_type();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::GT);
        self.finish_node();
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Block = '{' Statement* '}'
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        self.expect(SyntaxKind::L_BRACE);
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                break;
            }
            let pos_before = self.pos;
            self.parse_statement();
            if self.pos == pos_before {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        self.nested(Self::parse_statement_inner);
    }

    fn parse_statement_inner(&mut self) {
        match self.current_kind() {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::SEMICOLON => {
                self.start_node(SyntaxKind::EMPTY_STMT);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::RETURN_KW => {
                self.start_node(SyntaxKind::RETURN_STMT);
                self.bump();
                if !self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]) {
                    self.parse_expr();
                }
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            SyntaxKind::IF_KW => {
                self.start_node(SyntaxKind::IF_STMT);
                self.bump();
                self.parse_condition();
                self.parse_statement();
                if self.at(SyntaxKind::ELSE_KW) {
                    self.start_node(SyntaxKind::ELSE_CLAUSE);
                    self.bump();
                    self.parse_statement();
                    self.finish_node();
                }
                self.finish_node();
            }
            SyntaxKind::WHILE_KW => {
                self.start_node(SyntaxKind::WHILE_STMT);
                self.bump();
                self.parse_condition();
                self.parse_statement();
                self.finish_node();
            }
            SyntaxKind::FOR_KW => self.parse_for(),
            SyntaxKind::FOREACH_KW => self.parse_foreach(),
            _ if self.at_local_decl() => self.parse_local_decl(),
            kind if kind.is_keyword() && !self.at_expr_start() => {
                self.error_recover(format!("unsupported statement: {:?}", kind), STMT_RECOVERY);
            }
            _ => {
                self.start_node(SyntaxKind::EXPR_STMT);
                self.parse_expr();
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
        }
    }

    fn parse_condition(&mut self) {
        self.expect(SyntaxKind::L_PAREN);
        self.parse_expr();
        self.expect(SyntaxKind::R_PAREN);
    }

    /// For = 'for' '(' (LocalDecl | ExprList? ';') Expr? ';' ExprList? ')' Statement
    fn parse_for(&mut self) {
        self.start_node(SyntaxKind::FOR_STMT);
        self.bump();
        self.expect(SyntaxKind::L_PAREN);
        if self.at_local_decl() {
            self.parse_local_decl();
        } else {
            if !self.at(SyntaxKind::SEMICOLON) {
                self.parse_expr_list();
            }
            self.expect(SyntaxKind::SEMICOLON);
        }
        if !self.at(SyntaxKind::SEMICOLON) {
            self.parse_expr();
        }
        self.expect(SyntaxKind::SEMICOLON);
        if !self.at(SyntaxKind::R_PAREN) {
            self.parse_expr_list();
        }
        self.expect(SyntaxKind::R_PAREN);
        self.parse_statement();
        self.finish_node();
    }

    /// Foreach = 'foreach' '(' ('var' | Type) Ident 'in' Expr ')' Statement
    fn parse_foreach(&mut self) {
        self.start_node(SyntaxKind::FOREACH_STMT);
        self.bump();
        self.expect(SyntaxKind::L_PAREN);
        self.parse_local_type();
        self.expect(SyntaxKind::IDENT);
        self.expect(SyntaxKind::IN_KW);
        self.parse_expr();
        self.expect(SyntaxKind::R_PAREN);
        self.parse_statement();
        self.finish_node();
    }

    /// ExprList = Expr (',' Expr)*
    fn parse_expr_list(&mut self) {
        loop {
            self.parse_expr();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    /// Whether the next tokens read as `Type Ident`.
    fn at_local_decl(&self) -> bool {
        if self.nth(0).is_predefined_type() && self.nth(1) == SyntaxKind::DOT {
            return false;
        }
        self.type_end(0)
            .is_some_and(|end| self.nth(end) == SyntaxKind::IDENT)
    }

    /// LocalDecl = ('var' | Type) VariableDeclarator (',' VariableDeclarator)* ';'
    fn parse_local_decl(&mut self) {
        self.start_node(SyntaxKind::LOCAL_DECL_STMT);
        self.parse_local_type();
        self.parse_variable_declarators();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    fn parse_local_type(&mut self) {
        if self.at_contextual("var") && self.nth(1) == SyntaxKind::IDENT {
            self.start_node(SyntaxKind::PREDEFINED_TYPE);
            self.bump_remap(SyntaxKind::VAR_KW);
            self.finish_node();
        } else {
            self.parse_type();
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn at_expr_start(&self) -> bool {
        let kind = self.current_kind();
        kind.is_predefined_type()
            || matches!(
                kind,
                SyntaxKind::THIS_KW
                    | SyntaxKind::BASE_KW
                    | SyntaxKind::NEW_KW
                    | SyntaxKind::TRUE_KW
                    | SyntaxKind::FALSE_KW
                    | SyntaxKind::NULL_KW
            )
    }

    /// Expr = BinaryExpr (AssignOp Expr)?
    fn parse_expr(&mut self) {
        self.nested(Self::parse_expr_inner);
    }

    fn parse_expr_inner(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_binary(1);
        if self.at_any(ASSIGN_OPS) {
            self.start_node_at(checkpoint, SyntaxKind::ASSIGN_EXPR);
            self.bump();
            self.parse_expr();
            self.finish_node();
        }
    }

    /// Operators of equal precedence share one flat `BINARY_EXPR`:
    /// `a + b - c` is one node with three operands.
    fn parse_binary(&mut self, min_bp: u8) {
        let checkpoint = self.checkpoint();
        self.parse_unary();
        while let Some(bp) = binary_binding_power(self.current_kind()) {
            if bp < min_bp {
                break;
            }
            self.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
            loop {
                self.bump();
                self.parse_binary(bp + 1);
                if binary_binding_power(self.current_kind()) != Some(bp) {
                    break;
                }
            }
            self.finish_node();
        }
    }

    fn parse_unary(&mut self) {
        if self.at_any(PREFIX_OPS) {
            self.start_node(SyntaxKind::PREFIX_EXPR);
            self.bump();
            self.nested(Self::parse_unary);
            self.finish_node();
        } else {
            self.parse_postfix();
        }
    }

    /// PostfixExpr = PrimaryExpr ('.' Ident | ArgList | '++' | '--')*
    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        if !self.parse_primary() {
            return;
        }
        let mut links = 0;
        loop {
            let extends = matches!(
                self.current_kind(),
                SyntaxKind::DOT
                    | SyntaxKind::L_PAREN
                    | SyntaxKind::PLUS_PLUS
                    | SyntaxKind::MINUS_MINUS
            );
            if extends && self.depth + links >= MAX_DEPTH {
                self.skip_too_deep();
                break;
            }
            links += 1;
            match self.current_kind() {
                SyntaxKind::DOT => {
                    self.start_node_at(checkpoint, SyntaxKind::MEMBER_ACCESS_EXPR);
                    self.bump();
                    self.expect(SyntaxKind::IDENT);
                    self.finish_node();
                }
                SyntaxKind::L_PAREN => {
                    self.start_node_at(checkpoint, SyntaxKind::INVOCATION_EXPR);
                    self.parse_arg_list();
                    self.finish_node();
                }
                SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                    self.start_node_at(checkpoint, SyntaxKind::POSTFIX_EXPR);
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// Returns false when no expression could be started.
    fn parse_primary(&mut self) -> bool {
        match self.current_kind() {
            SyntaxKind::INT_LITERAL
            | SyntaxKind::REAL_LITERAL
            | SyntaxKind::CHAR_LITERAL
            | SyntaxKind::STRING_LITERAL
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
            | SyntaxKind::NULL_KW => self.wrap_token(SyntaxKind::LITERAL_EXPR),
            SyntaxKind::IDENT => self.wrap_token(SyntaxKind::NAME_EXPR),
            SyntaxKind::THIS_KW | SyntaxKind::BASE_KW => self.wrap_token(SyntaxKind::THIS_EXPR),
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                self.bump();
                self.parse_expr();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            SyntaxKind::NEW_KW => {
                self.start_node(SyntaxKind::OBJECT_CREATION_EXPR);
                self.bump();
                self.parse_type();
                if self.at(SyntaxKind::L_PAREN) {
                    self.parse_arg_list();
                } else {
                    self.error("expected argument list");
                }
                self.finish_node();
            }
            kind if kind.is_predefined_type() => self.wrap_token(SyntaxKind::PREDEFINED_TYPE),
            kind => {
                self.error(format!("expected expression, found {:?}", kind));
                return false;
            }
        }
        true
    }

    fn wrap_token(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    /// ArgList = '(' (Arg (',' Arg)*)? ')'
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.expect(SyntaxKind::L_PAREN);
        if !self.at(SyntaxKind::R_PAREN) {
            loop {
                self.start_node(SyntaxKind::ARG);
                if self.at_any(&[SyntaxKind::REF_KW, SyntaxKind::OUT_KW, SyntaxKind::IN_KW]) {
                    self.bump();
                }
                self.parse_expr();
                self.finish_node();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }
}
