//! Document walkers and the token stream they fill.

use super::engine::ResolvedTree;
use super::link::LinkProvider;
use crate::base::{LanguageId, TextRange};
use crate::error::IndexResult;
use crate::model::{Document, FolderPath, Link, Token, TokenClass};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a walker needs to know about the document it builds.
#[derive(Debug, Clone)]
pub struct WalkContext {
    /// Folder the finished document is attached to
    pub folder: FolderPath,
    pub name: String,
    pub path: PathBuf,
    pub language: LanguageId,
    pub links: Arc<dyn LinkProvider>,
}

/// Language front-end that turns one resolved tree into a [`Document`].
///
/// A walker is created for a single document, visits its tree once and is
/// then consumed by [`DocumentWalker::into_document`].
pub trait DocumentWalker: Send {
    /// Walk every token of `tree` in source order.
    ///
    /// Fails with `MalformedTree` when `tree` is not something this walker
    /// understands.
    fn visit(&mut self, tree: &ResolvedTree) -> IndexResult<()>;

    /// Finish the walk and hand over the document.
    fn into_document(self: Box<Self>) -> Document;
}

/// Token whose trailing trivia may still grow.
#[derive(Debug)]
struct PendingToken {
    class: TokenClass,
    range: TextRange,
    text: String,
    leading: String,
    trailing: String,
    link: Option<Link>,
}

impl PendingToken {
    fn finish(self) -> Token {
        Token::new(
            self.class,
            self.range,
            self.text,
            self.leading,
            self.trailing,
            self.link,
        )
    }
}

/// Builds a token sequence from raw tokens and trivia fed in source order.
///
/// Trivia following a token on the same line, up to and including the line
/// break, becomes that token's trailing trivia. Any other trivia is leading
/// trivia of the next token.
#[derive(Debug, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pending: Option<PendingToken>,
    leading: String,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed trivia; `ends_line` marks a line break.
    pub fn push_trivia(&mut self, text: &str, ends_line: bool) {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.trailing.push_str(text);
                if ends_line {
                    self.flush();
                }
            }
            None => self.leading.push_str(text),
        }
    }

    pub fn push_token(
        &mut self,
        class: TokenClass,
        range: TextRange,
        text: &str,
        link: Option<Link>,
    ) {
        self.flush();
        self.pending = Some(PendingToken {
            class,
            range,
            text: text.to_string(),
            leading: std::mem::take(&mut self.leading),
            trailing: String::new(),
            link,
        });
    }

    fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.tokens.push(pending.finish());
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len() + usize::from(self.pending.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Close the stream. Trivia after the last token on its own line joins
    /// that token's trailing trivia. A stream without tokens yields nothing.
    pub fn finish(mut self) -> Vec<Token> {
        let rest = std::mem::take(&mut self.leading);
        if !rest.is_empty() {
            if let Some(pending) = self.pending.as_mut() {
                pending.trailing.push_str(&rest);
            } else if let Some(last) = self.tokens.pop() {
                self.pending = Some(PendingToken {
                    class: last.class(),
                    range: last.range(),
                    text: last.text().to_string(),
                    leading: last.leading_trivia().to_string(),
                    trailing: format!("{}{}", last.trailing_trivia(), rest),
                    link: last.link().cloned(),
                });
            }
        }
        self.flush();
        self.tokens
    }
}
