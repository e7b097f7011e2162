//! Token classification.
//!
//! Each language maps its own lexical kinds onto the shared [`TokenClass`]
//! taxonomy. Classification only looks at the token and its parent node; it
//! never consults symbols.

use crate::csharp::{SyntaxKind, SyntaxToken};
use crate::model::TokenClass;

/// Classify a C# token.
///
/// Identifiers directly inside a type reference, naming a type declaration or
/// a type parameter are [`TokenClass::Type`]; keywords, including contextual ones remapped by
/// the parser, are [`TokenClass::Keyword`].
pub fn classify_csharp(token: &SyntaxToken) -> TokenClass {
    let kind = token.kind();
    if kind.is_keyword() {
        return TokenClass::Keyword;
    }
    if kind != SyntaxKind::IDENT {
        return TokenClass::Other;
    }
    let in_type_position = token.parent().is_some_and(|parent| {
        matches!(
            parent.kind(),
            SyntaxKind::NAMED_TYPE
                | SyntaxKind::TYPE_DECL
                | SyntaxKind::ENUM_DECL
                | SyntaxKind::TYPE_PARAM
                | SyntaxKind::WHERE_CLAUSE
        )
    });
    if in_type_position {
        TokenClass::Type
    } else {
        TokenClass::Identifier
    }
}
