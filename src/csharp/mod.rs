//! Reference C# front-end
//!
//! A semantic engine for a subset of C#, built on:
//! - **logos** for fast lexing
//! - **rowan** for the lossless CST
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (every byte of the source, plus an empty EOF token)
//!     ↓
//! Declaration pass → SymbolTable shared by all files of a project
//!     ↓
//! Binder (one file per rayon task) → SemanticModel
//! ```
//!
//! The subset covers namespaces, `using` directives, classes, structs,
//! interfaces, enums, fields, properties, methods, constructors and the
//! statements and expressions needed to reference them. Anything else still
//! parses into ERROR nodes so the tree stays lossless.

mod binder;
mod compilation;
mod declare;
mod lexer;
mod parser;
mod resolve;
mod syntax_kind;

pub use compilation::{Compilation, SemanticModel};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{CSharpLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
