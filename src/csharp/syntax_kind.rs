//! Syntax kinds for the Rowan-based C# CST
//!
//! This enum defines all node and token kinds in the syntax tree.

/// All syntax kinds (tokens and nodes) of the C# front-end
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation, trivia).
/// Nodes are composite (declarations, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace, newlines and comments - preserved, not meaningful)
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS AND IDENTIFIERS
    // =========================================================================
    IDENT,
    INT_LITERAL,
    REAL_LITERAL,
    CHAR_LITERAL,
    STRING_LITERAL,

    // =========================================================================
    // PUNCTUATION AND OPERATORS
    // =========================================================================
    L_BRACE,       // {
    R_BRACE,       // }
    L_PAREN,       // (
    R_PAREN,       // )
    L_BRACKET,     // [
    R_BRACKET,     // ]
    SEMICOLON,     // ;
    COMMA,         // ,
    DOT,           // .
    COLON,         // :
    QUESTION,      // ?
    QUESTION_QUESTION, // ??
    EQ,            // =
    EQ_EQ,         // ==
    BANG,          // !
    BANG_EQ,       // !=
    LT,            // <
    GT,            // >
    LT_EQ,         // <=
    GT_EQ,         // >=
    PLUS,          // +
    MINUS,         // -
    STAR,          // *
    SLASH,         // /
    PERCENT,       // %
    AMP,           // &
    AMP_AMP,       // &&
    PIPE,          // |
    PIPE_PIPE,     // ||
    CARET,         // ^
    TILDE,         // ~
    PLUS_PLUS,     // ++
    MINUS_MINUS,   // --
    PLUS_EQ,       // +=
    MINUS_EQ,      // -=
    STAR_EQ,       // *=
    SLASH_EQ,      // /=
    FAT_ARROW,     // =>

    // =========================================================================
    // KEYWORDS (reserved C# keywords, alphabetical)
    // =========================================================================
    ABSTRACT_KW,
    AS_KW,
    BASE_KW,
    BOOL_KW,
    BREAK_KW,
    BYTE_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CHECKED_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DECIMAL_KW,
    DEFAULT_KW,
    DELEGATE_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EVENT_KW,
    EXPLICIT_KW,
    EXTERN_KW,
    FALSE_KW,
    FINALLY_KW,
    FIXED_KW,
    FLOAT_KW,
    FOR_KW,
    FOREACH_KW,
    GOTO_KW,
    IF_KW,
    IMPLICIT_KW,
    IN_KW,
    INT_KW,
    INTERFACE_KW,
    INTERNAL_KW,
    IS_KW,
    LOCK_KW,
    LONG_KW,
    NAMESPACE_KW,
    NEW_KW,
    NULL_KW,
    OBJECT_KW,
    OPERATOR_KW,
    OUT_KW,
    OVERRIDE_KW,
    PARAMS_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    READONLY_KW,
    REF_KW,
    RETURN_KW,
    SBYTE_KW,
    SEALED_KW,
    SHORT_KW,
    SIZEOF_KW,
    STACKALLOC_KW,
    STATIC_KW,
    STRING_KW,
    STRUCT_KW,
    SWITCH_KW,
    THIS_KW,
    THROW_KW,
    TRUE_KW,
    TRY_KW,
    TYPEOF_KW,
    UINT_KW,
    ULONG_KW,
    UNCHECKED_KW,
    UNSAFE_KW,
    USHORT_KW,
    USING_KW,
    VIRTUAL_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,
    // Contextual keywords: lexed as IDENT, remapped by the parser in position
    GET_KW,
    INIT_KW,
    PARTIAL_KW,
    SET_KW,
    /// `var` in a local's type position
    VAR_KW,
    WHERE_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Zero-width end-of-file token, always the last token of a file
    EOF,
    /// Lexer error token or parser error node
    ERROR,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    USING_DIRECTIVE,
    NAMESPACE_DECL,
    QUALIFIED_NAME,
    TYPE_DECL,
    ENUM_DECL,
    ENUM_MEMBER,
    BASE_LIST,
    FIELD_DECL,
    VARIABLE_DECLARATOR,
    METHOD_DECL,
    CTOR_DECL,
    CTOR_INITIALIZER,
    PARAM_LIST,
    PARAM,
    PREDEFINED_TYPE,
    NAMED_TYPE,
    TYPE_ARG_LIST,
    ARRAY_TYPE,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    WHERE_CLAUSE,
    BLOCK,
    LOCAL_DECL_STMT,
    EXPR_STMT,
    RETURN_STMT,
    IF_STMT,
    ELSE_CLAUSE,
    WHILE_STMT,
    FOR_STMT,
    FOREACH_STMT,
    EMPTY_STMT,
    LITERAL_EXPR,
    NAME_EXPR,
    THIS_EXPR,
    MEMBER_ACCESS_EXPR,
    INVOCATION_EXPR,
    ARG_LIST,
    ARG,
    OBJECT_CREATION_EXPR,
    ASSIGN_EXPR,
    BINARY_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    PAREN_EXPR,
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, newline or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::NEWLINE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this is a keyword (reserved or contextual)
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABSTRACT_KW as u16) && (self as u16) <= (Self::WHERE_KW as u16)
    }

    /// Check if this is a punctuation or operator token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::FAT_ARROW as u16)
    }

    /// Check if this is a literal token (keyword literals excluded)
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INT_LITERAL | Self::REAL_LITERAL | Self::CHAR_LITERAL | Self::STRING_LITERAL
        )
    }

    /// Keywords naming a predefined type (`int`, `string`, `void`, ...)
    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            Self::BOOL_KW
                | Self::BYTE_KW
                | Self::CHAR_KW
                | Self::DECIMAL_KW
                | Self::DOUBLE_KW
                | Self::FLOAT_KW
                | Self::INT_KW
                | Self::LONG_KW
                | Self::OBJECT_KW
                | Self::SBYTE_KW
                | Self::SHORT_KW
                | Self::STRING_KW
                | Self::UINT_KW
                | Self::ULONG_KW
                | Self::USHORT_KW
                | Self::VOID_KW
        )
    }

    /// Declaration modifiers accepted before type and member declarations
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::ABSTRACT_KW
                | Self::CONST_KW
                | Self::EXTERN_KW
                | Self::INTERNAL_KW
                | Self::NEW_KW
                | Self::OVERRIDE_KW
                | Self::PARTIAL_KW
                | Self::PRIVATE_KW
                | Self::PROTECTED_KW
                | Self::PUBLIC_KW
                | Self::READONLY_KW
                | Self::SEALED_KW
                | Self::STATIC_KW
                | Self::UNSAFE_KW
                | Self::VIRTUAL_KW
                | Self::VOLATILE_KW
        )
    }

    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::SOURCE_FILE as u16) && (self as u16) < (Self::__LAST as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharpLanguage {}

impl rowan::Language for CSharpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<CSharpLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CSharpLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CSharpLanguage>;
