use super::classify::classify_csharp;
use super::engine::ResolvedTree;
use super::link::LinkResolver;
use super::walker::{DocumentWalker, TokenStream, WalkContext};
use crate::base::{LineIndex, TextSize};
use crate::csharp::{SemanticModel, SyntaxKind};
use crate::error::{IndexError, IndexResult};
use crate::model::Document;
use tracing::trace;

/// Walks C# semantic models.
#[derive(Debug)]
pub struct CSharpWalker {
    cx: WalkContext,
    stream: TokenStream,
    line_index: LineIndex,
}

impl CSharpWalker {
    pub fn new(cx: WalkContext) -> Self {
        Self {
            cx,
            stream: TokenStream::new(),
            line_index: LineIndex::default(),
        }
    }

    /// Constructor registered with the walker selector.
    pub fn boxed(cx: WalkContext) -> Box<dyn DocumentWalker> {
        Box::new(Self::new(cx))
    }

    fn walk(&mut self, model: &SemanticModel) -> IndexResult<()> {
        let root = model.root();
        if root.kind() != SyntaxKind::SOURCE_FILE {
            return Err(IndexError::malformed_tree(
                &self.cx.path,
                format!("expected a source file, found {:?}", root.kind()),
            ));
        }
        if !self.stream.is_empty() {
            return Err(IndexError::malformed_tree(
                &self.cx.path,
                "document already walked",
            ));
        }

        let mut links = LinkResolver::new(model.symbols(), self.cx.links.as_ref());
        let mut expected = TextSize::new(0);
        for token in root
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
        {
            let range = token.text_range();
            if range.start() != expected {
                return Err(IndexError::malformed_tree(
                    &self.cx.path,
                    format!("gap in token sequence at offset {}", u32::from(expected)),
                ));
            }
            expected = range.end();

            let kind = token.kind();
            if kind.is_trivia() {
                self.stream
                    .push_trivia(token.text(), kind == SyntaxKind::NEWLINE);
                continue;
            }
            let link = if kind == SyntaxKind::IDENT {
                links.resolve(model.binding(&token))
            } else {
                None
            };
            self.stream
                .push_token(classify_csharp(&token), range, token.text(), link);
        }

        self.line_index = LineIndex::new(&root.text().to_string());
        trace!(
            path = %self.cx.path.display(),
            tokens = self.stream.len(),
            "walked C# document"
        );
        Ok(())
    }
}

impl DocumentWalker for CSharpWalker {
    fn visit(&mut self, tree: &ResolvedTree) -> IndexResult<()> {
        match tree {
            ResolvedTree::CSharp(model) => self.walk(model),
        }
    }

    fn into_document(self: Box<Self>) -> Document {
        let Self {
            cx,
            stream,
            line_index,
        } = *self;
        Document::new(
            cx.name,
            cx.path,
            cx.folder,
            cx.language,
            stream.finish(),
            line_index,
        )
    }
}
