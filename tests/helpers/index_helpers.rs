//! Building in-memory solutions and reading indexed documents.

use xref::{
    Document, IndexOutput, Indexer, IndexerConfig, LanguageId, Link, Project, Solution,
    SourceDocument,
};

/// A solution whose projects hold C# documents named `Document1.cs`, ...
pub fn solution(projects: &[(&str, &[&str])]) -> Solution {
    let mut solution = Solution::new("Workspace1", "/src");
    for (name, sources) in projects {
        let mut project = Project::new(*name);
        for (index, source) in sources.iter().enumerate() {
            project = project.with_document(SourceDocument::new(
                format!("/src/{name}/Document{}.cs", index + 1),
                LanguageId::csharp(),
                *source,
            ));
        }
        solution = solution.with_project(project);
    }
    solution
}

/// Index `solution` with the default registrations, without a root on disk.
pub fn index(solution: &Solution) -> IndexOutput {
    Indexer::new(IndexerConfig::default().require_existing_root(false))
        .index(solution)
        .expect("indexing run")
}

/// Index a single document in a project named `Project1`.
pub fn index_single(source: &str) -> Document {
    let output = index(&solution(&[("Project1", &[source])]));
    assert!(output.skipped.is_empty(), "skipped: {:?}", output.skipped);
    output.workspace.documents()[0].clone()
}

pub fn link_count(document: &Document, key: &str) -> usize {
    document.links().filter(|link| link.key() == key).count()
}

/// `(token text, key)` for every linked token, in source order.
pub fn linked_tokens(document: &Document) -> Vec<(String, String)> {
    document
        .tokens()
        .iter()
        .filter_map(|token| {
            let link = token.link()?;
            Some((token.text().to_string(), link.key().to_string()))
        })
        .collect()
}

pub fn all_symbol_links(document: &Document) -> bool {
    document.links().all(|link| matches!(link, Link::Symbol(_)))
}
