use crate::base::TextRange;
use crate::symbols::SymbolKey;
use smol_str::SmolStr;

/// Lexical category of a token, shared by every language.
///
/// Downstream renderers map these to a presentation style; the index itself
/// only counts them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TokenClass {
    /// Reserved words, including contextual keywords in keyword position
    Keyword,
    /// Names of types, at declarations and references
    Type,
    /// Any other name
    Identifier,
    /// Punctuation, operators, literals, unknown characters
    #[default]
    Other,
}

/// Link from a token to a symbol declared in the indexed sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SymbolLink {
    pub key: SymbolKey,
    /// The token is the declaration site of the symbol
    pub is_declaration: bool,
}

/// Link from a token to documentation hosted outside the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExternalLink {
    pub key: SymbolKey,
    pub url: String,
}

/// Cross-reference attached to a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Link {
    Symbol(SymbolLink),
    External(ExternalLink),
}

impl Link {
    pub fn symbol(key: SymbolKey, is_declaration: bool) -> Self {
        Self::Symbol(SymbolLink {
            key,
            is_declaration,
        })
    }

    pub fn external(key: SymbolKey, url: impl Into<String>) -> Self {
        Self::External(ExternalLink {
            key,
            url: url.into(),
        })
    }

    pub fn key(&self) -> &SymbolKey {
        match self {
            Self::Symbol(link) => &link.key,
            Self::External(link) => &link.key,
        }
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, Self::Symbol(link) if link.is_declaration)
    }
}

/// One significant token of a document with the trivia folded around it.
///
/// `leading_trivia + text + trailing_trivia` is exactly the slice of source
/// the token owns; the slices of consecutive tokens are adjacent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    class: TokenClass,
    range: TextRange,
    text: SmolStr,
    leading_trivia: String,
    trailing_trivia: String,
    link: Option<Link>,
}

impl Token {
    pub fn new(
        class: TokenClass,
        range: TextRange,
        text: impl Into<SmolStr>,
        leading_trivia: String,
        trailing_trivia: String,
        link: Option<Link>,
    ) -> Self {
        Self {
            class,
            range,
            text: text.into(),
            leading_trivia,
            trailing_trivia,
            link,
        }
    }

    pub fn class(&self) -> TokenClass {
        self.class
    }

    /// Range of the token text itself, without trivia.
    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn leading_trivia(&self) -> &str {
        &self.leading_trivia
    }

    pub fn trailing_trivia(&self) -> &str {
        &self.trailing_trivia
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    /// Append the token and its trivia to `buf`.
    pub fn write_full_text(&self, buf: &mut String) {
        buf.push_str(&self.leading_trivia);
        buf.push_str(&self.text);
        buf.push_str(&self.trailing_trivia);
    }
}
