mod tests_classify;
mod tests_link;

use crate::base::LanguageId;
use crate::index::{
    CSharpEngine, LinkProvider, ResolvedTree, SemanticEngine, SymbolLinkProvider, WalkContext,
    WalkerSelector,
};
use crate::model::{Document, FolderPath};
use std::sync::Arc;

fn context(path: &str, links: Arc<dyn LinkProvider>) -> WalkContext {
    WalkContext {
        folder: FolderPath::root().child("Project1"),
        name: path.to_string(),
        path: path.into(),
        language: LanguageId::csharp(),
        links,
    }
}

fn resolve(sources: &[&str]) -> Vec<ResolvedTree> {
    let inputs: Vec<Option<&str>> = sources.iter().copied().map(Some).collect();
    CSharpEngine
        .analyze(&inputs)
        .into_iter()
        .map(|tree| tree.expect("engine produced a tree"))
        .collect()
}

/// Walk every source of one project with the default selector.
fn walk_with(sources: &[&str], links: Arc<dyn LinkProvider>) -> Vec<Document> {
    let selector = WalkerSelector::with_defaults();
    resolve(sources)
        .iter()
        .enumerate()
        .map(|(index, tree)| {
            let cx = context(&format!("Document{}.cs", index + 1), links.clone());
            let mut walker = selector.select(cx).expect("csharp walker");
            walker.visit(tree).expect("walk");
            walker.into_document()
        })
        .collect()
}

fn walk(source: &str) -> Document {
    walk_with(&[source], Arc::new(SymbolLinkProvider))
        .pop()
        .expect("one document")
}
