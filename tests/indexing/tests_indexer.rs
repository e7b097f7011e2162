#![allow(clippy::unwrap_used)]

use crate::helpers::index_helpers::{index, link_count, solution};
use crate::helpers::source_fixtures::*;
use std::io;
use std::path::Path;
use std::sync::Arc;
use xref::{
    CSharpEngine, IndexError, Indexer, IndexerConfig, LanguageId, Link, Project,
    ReferenceSourceLinkProvider, Solution, SourceDocument,
};

#[test]
fn test_projects_become_folders_in_order() {
    let output = index(&solution(&[
        ("Project1", &[SANITY, BASIC_LINKING]),
        ("Project2", &[PARAMETERS]),
    ]));
    let workspace = &output.workspace;

    assert_eq!(workspace.name(), "Workspace1");
    let folders: Vec<&str> = workspace.folders().map(|f| f.name()).collect();
    assert_eq!(folders, ["Project1", "Project2"]);

    let documents = workspace.documents();
    assert_eq!(documents.len(), 3);
    assert_eq!(documents[0].name(), "Document1.cs");
    assert_eq!(documents[1].name(), "Document2.cs");
    let owner = workspace.folder(documents[2].folder()).unwrap();
    assert_eq!(owner.name(), "Project2");
}

#[test]
fn test_projects_do_not_share_symbols() {
    let output = index(&solution(&[
        ("Lib", &["class Shared { }"]),
        ("App", &["class App { Shared field; }"]),
    ]));
    let app = output
        .workspace
        .document(Path::new("/src/App/Document1.cs"))
        .unwrap();
    assert_eq!(link_count(app, "Shared"), 0);
}

#[test]
fn test_unsupported_language_is_skipped() {
    let solution = Solution::new("Mixed", "/src").with_project(
        Project::new("Project1")
            .with_document(SourceDocument::new(
                "/src/Project1/Module1.vb",
                LanguageId::new(LanguageId::VISUAL_BASIC),
                "Module Module1\nEnd Module\n",
            ))
            .with_document(SourceDocument::new(
                "/src/Project1/Document1.cs",
                LanguageId::csharp(),
                SANITY,
            )),
    );
    let output = index(&solution);

    assert_eq!(output.workspace.document_count(), 1);
    assert_eq!(output.skipped.len(), 1);
    let skipped = &output.skipped[0];
    assert_eq!(skipped.path, Path::new("/src/Project1/Module1.vb"));
    assert!(matches!(
        skipped.error,
        IndexError::UnsupportedLanguage { .. }
    ));
}

#[test]
fn test_unreadable_document_reports_io_error() {
    let cause = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
    let solution = Solution::new("Demo", "/src").with_project(
        Project::new("Project1")
            .with_document(SourceDocument::unreadable(
                "/src/Project1/Binary.cs",
                LanguageId::csharp(),
                &cause,
            ))
            .with_document(SourceDocument::new(
                "/src/Project1/Document1.cs",
                LanguageId::csharp(),
                BASIC_LINKING,
            )),
    );
    let output = index(&solution);

    assert_eq!(output.workspace.document_count(), 1);
    let skipped = &output.skipped[0];
    assert_eq!(skipped.path, Path::new("/src/Project1/Binary.cs"));
    match &skipped.error {
        IndexError::Io { path, source } => {
            assert_eq!(path, Path::new("/src/Project1/Binary.cs"));
            assert_eq!(source.kind(), io::ErrorKind::InvalidData);
        }
        other => panic!("expected an IO error, got {other:?}"),
    }
    assert!(skipped.error.to_string().contains("valid UTF-8"));
    assert!(!skipped.error.is_fatal());
    let document = output.workspace.documents()[0];
    assert_eq!(link_count(document, "C1.Method1()"), 2);
}

#[test]
fn test_document_without_text_is_malformed() {
    let source = SourceDocument {
        text: None,
        ..SourceDocument::new("/src/Project1/Empty.cs", LanguageId::csharp(), "")
    };
    let solution =
        Solution::new("Demo", "/src").with_project(Project::new("Project1").with_document(source));
    let output = index(&solution);

    assert_eq!(output.workspace.document_count(), 0);
    assert!(matches!(
        output.skipped[0].error,
        IndexError::MalformedTree { .. }
    ));
}

#[test]
fn test_walker_without_engine_is_malformed() {
    let config = IndexerConfig::empty()
        .with_walker(LanguageId::csharp(), xref::index::CSharpWalker::boxed)
        .require_existing_root(false);
    let output = Indexer::new(config)
        .index(&solution(&[("Project1", &[SANITY])]))
        .unwrap();

    assert_eq!(output.workspace.document_count(), 0);
    assert!(matches!(
        output.skipped[0].error,
        IndexError::MalformedTree { .. }
    ));
}

#[test]
fn test_empty_config_skips_everything() {
    let config = IndexerConfig::empty()
        .with_engine(Arc::new(CSharpEngine))
        .require_existing_root(false);
    let output = Indexer::new(config)
        .index(&solution(&[("Project1", &[SANITY, PARAMETERS])]))
        .unwrap();

    assert_eq!(output.skipped.len(), 2);
    assert!(output.skipped.iter().all(|s| !s.error.is_fatal()));
    // The folder still exists, just empty
    assert_eq!(output.workspace.folders().count(), 1);
}

#[test]
fn test_missing_root_is_fatal() {
    let solution = Solution::new("Gone", "/definitely/not/here")
        .with_project(Project::new("Project1"));
    let err = Indexer::default().index(&solution).unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(err, IndexError::InvalidWorkspaceRoot { .. }));
}

#[test]
fn test_root_must_be_a_directory() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let solution = Solution::new("File", file.path());
    let err = Indexer::default().index(&solution).unwrap_err();
    assert!(matches!(err, IndexError::InvalidWorkspaceRoot { .. }));
}

#[test]
fn test_sequential_and_parallel_runs_agree() {
    let solution = solution(&[("Project1", &[SANITY, BASIC_LINKING, PARAMETERS, LOCALS])]);
    let run = |parallel: bool| {
        let config = IndexerConfig::default()
            .parallel(parallel)
            .require_existing_root(false);
        Indexer::new(config).index(&solution).unwrap().workspace
    };
    let parallel = run(true);
    let sequential = run(false);

    let texts = |w: &xref::Workspace| -> Vec<(String, usize)> {
        w.documents()
            .iter()
            .map(|d| (d.text(), d.links().count()))
            .collect()
    };
    assert_eq!(texts(&parallel), texts(&sequential));
}

#[test]
fn test_link_provider_is_configurable() {
    let hosted = "namespace System { public class Console { public static void WriteLine(string s) { } } }";
    let app = "using System; class App { void Main() { Console.WriteLine(\"hi\"); } }";
    let config = IndexerConfig::default()
        .with_link_provider(Arc::new(ReferenceSourceLinkProvider::default()))
        .require_existing_root(false);
    let output = Indexer::new(config)
        .index(&solution(&[("Project1", &[hosted, app])]))
        .unwrap();

    let documents = output.workspace.documents();
    let urls: Vec<&str> = documents[1]
        .links()
        .filter_map(|link| match link {
            Link::External(external) => Some(external.url.as_str()),
            Link::Symbol(_) => None,
        })
        .collect();
    assert!(urls.contains(
        &"https://referencesource.microsoft.com/#System.Console.WriteLine(string)"
    ));
}

#[test]
fn test_duplicate_project_names_get_separate_folders() {
    let output = index(&solution(&[
        ("App", &[SANITY]),
        ("App", &[BASIC_LINKING]),
        ("App", &[PARAMETERS]),
    ]));
    let workspace = &output.workspace;

    let folders: Vec<&str> = workspace.folders().map(|f| f.name()).collect();
    assert_eq!(folders, ["App", "App (2)", "App (3)"]);
    for folder in workspace.folders() {
        assert_eq!(folder.documents().len(), 1, "{}", folder.name());
    }
    let second = workspace.folders().nth(1).unwrap();
    assert_eq!(link_count(&second.documents()[0], "C1.Method1()"), 2);
    assert_eq!(second.documents()[0].folder(), second.path());
}

