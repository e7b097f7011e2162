//! Logos-based lexer for C#
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up in
//! exactly one token; text logos cannot match becomes an `ERROR` token.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Consume a block comment up to and including the closing `*/`.
///
/// An unterminated comment swallows the rest of the input and lexes as an
/// error.
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\x0B\x0C\u{FEFF}]+")]
    Whitespace,

    #[regex(r"\r\n|\r|\n")]
    Newline,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS AND IDENTIFIERS
    // =========================================================================
    #[regex(r"@?[\p{XID_Start}_][\p{XID_Continue}]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*([uU][lL]?|[lL][uU]?)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+([uU][lL]?|[lL][uU]?)?")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[fFdDmM]")]
    Real,

    #[regex(r"'([^'\\\r\n]|\\.)*'")]
    Char,

    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("??")]
    QuestionQuestion,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("=>")]
    FatArrow,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,

    // =========================================================================
    // KEYWORDS (alphabetical, longest match wins in logos)
    // =========================================================================
    #[token("abstract")]
    AbstractKw,
    #[token("as")]
    AsKw,
    #[token("base")]
    BaseKw,
    #[token("bool")]
    BoolKw,
    #[token("break")]
    BreakKw,
    #[token("byte")]
    ByteKw,
    #[token("case")]
    CaseKw,
    #[token("catch")]
    CatchKw,
    #[token("char")]
    CharKw,
    #[token("checked")]
    CheckedKw,
    #[token("class")]
    ClassKw,
    #[token("const")]
    ConstKw,
    #[token("continue")]
    ContinueKw,
    #[token("decimal")]
    DecimalKw,
    #[token("default")]
    DefaultKw,
    #[token("delegate")]
    DelegateKw,
    #[token("do")]
    DoKw,
    #[token("double")]
    DoubleKw,
    #[token("else")]
    ElseKw,
    #[token("enum")]
    EnumKw,
    #[token("event")]
    EventKw,
    #[token("explicit")]
    ExplicitKw,
    #[token("extern")]
    ExternKw,
    #[token("false")]
    FalseKw,
    #[token("finally")]
    FinallyKw,
    #[token("fixed")]
    FixedKw,
    #[token("float")]
    FloatKw,
    #[token("for")]
    ForKw,
    #[token("foreach")]
    ForeachKw,
    #[token("goto")]
    GotoKw,
    #[token("if")]
    IfKw,
    #[token("implicit")]
    ImplicitKw,
    #[token("in")]
    InKw,
    #[token("int")]
    IntKw,
    #[token("interface")]
    InterfaceKw,
    #[token("internal")]
    InternalKw,
    #[token("is")]
    IsKw,
    #[token("lock")]
    LockKw,
    #[token("long")]
    LongKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("new")]
    NewKw,
    #[token("null")]
    NullKw,
    #[token("object")]
    ObjectKw,
    #[token("operator")]
    OperatorKw,
    #[token("out")]
    OutKw,
    #[token("override")]
    OverrideKw,
    #[token("params")]
    ParamsKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("public")]
    PublicKw,
    #[token("readonly")]
    ReadonlyKw,
    #[token("ref")]
    RefKw,
    #[token("return")]
    ReturnKw,
    #[token("sbyte")]
    SbyteKw,
    #[token("sealed")]
    SealedKw,
    #[token("short")]
    ShortKw,
    #[token("sizeof")]
    SizeofKw,
    #[token("stackalloc")]
    StackallocKw,
    #[token("static")]
    StaticKw,
    #[token("string")]
    StringKw,
    #[token("struct")]
    StructKw,
    #[token("switch")]
    SwitchKw,
    #[token("this")]
    ThisKw,
    #[token("throw")]
    ThrowKw,
    #[token("true")]
    TrueKw,
    #[token("try")]
    TryKw,
    #[token("typeof")]
    TypeofKw,
    #[token("uint")]
    UintKw,
    #[token("ulong")]
    UlongKw,
    #[token("unchecked")]
    UncheckedKw,
    #[token("unsafe")]
    UnsafeKw,
    #[token("ushort")]
    UshortKw,
    #[token("using")]
    UsingKw,
    #[token("virtual")]
    VirtualKw,
    #[token("void")]
    VoidKw,
    #[token("volatile")]
    VolatileKw,
    #[token("while")]
    WhileKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            Integer => SyntaxKind::INT_LITERAL,
            Real => SyntaxKind::REAL_LITERAL,
            Char => SyntaxKind::CHAR_LITERAL,
            String => SyntaxKind::STRING_LITERAL,

            // Multi-char punctuation
            QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            FatArrow => SyntaxKind::FAT_ARROW,

            // Single-char punctuation
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Semicolon => SyntaxKind::SEMICOLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Colon => SyntaxKind::COLON,
            Question => SyntaxKind::QUESTION,
            Eq => SyntaxKind::EQ,
            Bang => SyntaxKind::BANG,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,
            Tilde => SyntaxKind::TILDE,

            // Keywords
            AbstractKw => SyntaxKind::ABSTRACT_KW,
            AsKw => SyntaxKind::AS_KW,
            BaseKw => SyntaxKind::BASE_KW,
            BoolKw => SyntaxKind::BOOL_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            ByteKw => SyntaxKind::BYTE_KW,
            CaseKw => SyntaxKind::CASE_KW,
            CatchKw => SyntaxKind::CATCH_KW,
            CharKw => SyntaxKind::CHAR_KW,
            CheckedKw => SyntaxKind::CHECKED_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            ConstKw => SyntaxKind::CONST_KW,
            ContinueKw => SyntaxKind::CONTINUE_KW,
            DecimalKw => SyntaxKind::DECIMAL_KW,
            DefaultKw => SyntaxKind::DEFAULT_KW,
            DelegateKw => SyntaxKind::DELEGATE_KW,
            DoKw => SyntaxKind::DO_KW,
            DoubleKw => SyntaxKind::DOUBLE_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            EventKw => SyntaxKind::EVENT_KW,
            ExplicitKw => SyntaxKind::EXPLICIT_KW,
            ExternKw => SyntaxKind::EXTERN_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            FinallyKw => SyntaxKind::FINALLY_KW,
            FixedKw => SyntaxKind::FIXED_KW,
            FloatKw => SyntaxKind::FLOAT_KW,
            ForKw => SyntaxKind::FOR_KW,
            ForeachKw => SyntaxKind::FOREACH_KW,
            GotoKw => SyntaxKind::GOTO_KW,
            IfKw => SyntaxKind::IF_KW,
            ImplicitKw => SyntaxKind::IMPLICIT_KW,
            InKw => SyntaxKind::IN_KW,
            IntKw => SyntaxKind::INT_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            InternalKw => SyntaxKind::INTERNAL_KW,
            IsKw => SyntaxKind::IS_KW,
            LockKw => SyntaxKind::LOCK_KW,
            LongKw => SyntaxKind::LONG_KW,
            NamespaceKw => SyntaxKind::NAMESPACE_KW,
            NewKw => SyntaxKind::NEW_KW,
            NullKw => SyntaxKind::NULL_KW,
            ObjectKw => SyntaxKind::OBJECT_KW,
            OperatorKw => SyntaxKind::OPERATOR_KW,
            OutKw => SyntaxKind::OUT_KW,
            OverrideKw => SyntaxKind::OVERRIDE_KW,
            ParamsKw => SyntaxKind::PARAMS_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            ProtectedKw => SyntaxKind::PROTECTED_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            ReadonlyKw => SyntaxKind::READONLY_KW,
            RefKw => SyntaxKind::REF_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            SbyteKw => SyntaxKind::SBYTE_KW,
            SealedKw => SyntaxKind::SEALED_KW,
            ShortKw => SyntaxKind::SHORT_KW,
            SizeofKw => SyntaxKind::SIZEOF_KW,
            StackallocKw => SyntaxKind::STACKALLOC_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            StringKw => SyntaxKind::STRING_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            SwitchKw => SyntaxKind::SWITCH_KW,
            ThisKw => SyntaxKind::THIS_KW,
            ThrowKw => SyntaxKind::THROW_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            TryKw => SyntaxKind::TRY_KW,
            TypeofKw => SyntaxKind::TYPEOF_KW,
            UintKw => SyntaxKind::UINT_KW,
            UlongKw => SyntaxKind::ULONG_KW,
            UncheckedKw => SyntaxKind::UNCHECKED_KW,
            UnsafeKw => SyntaxKind::UNSAFE_KW,
            UshortKw => SyntaxKind::USHORT_KW,
            UsingKw => SyntaxKind::USING_KW,
            VirtualKw => SyntaxKind::VIRTUAL_KW,
            VoidKw => SyntaxKind::VOID_KW,
            VolatileKw => SyntaxKind::VOLATILE_KW,
            WhileKw => SyntaxKind::WHILE_KW,
        }
    }
}
