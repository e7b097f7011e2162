#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use xref::{IndexError, SolutionLoader, index_directory};

fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn sample_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "Shop.sln", b"");
    write(root, "Program.cs", b"class Program { }");
    write(root, "Core/Order.cs", b"namespace Core { public class Order { } }");
    write(root, "Core/Models/Line.cs", b"namespace Core { class Line { Order order; } }");
    write(root, "Core/bin/Generated.cs", b"class Generated { }");
    write(root, "Web/Page.cs", b"class Page { }");
    write(root, "Web/readme.md", b"# not source");
    write(root, ".git/hooks/x.cs", b"class Hidden { }");
    write(root, "Legacy/Module.vb", b"Module Module1\nEnd Module\n");
    dir
}

#[test]
fn test_load_directory_discovers_projects() {
    let dir = sample_tree();
    let solution = SolutionLoader::new().load_directory(dir.path()).unwrap();

    assert_eq!(solution.name, "Shop");
    let projects: Vec<&str> = solution.projects.iter().map(|p| p.name.as_str()).collect();
    let root_name = dir.path().file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(projects, ["Core", "Legacy", root_name.as_str(), "Web"]);

    let core: Vec<String> = solution.projects[0]
        .documents
        .iter()
        .map(|d| d.name())
        .collect();
    assert_eq!(core, ["Line.cs", "Order.cs"]);
    assert_eq!(solution.document_count(), 5);
}

#[test]
fn test_non_utf8_sources_are_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "App/Bad.cs", &[0xff, 0xfe, 0x00]);
    let solution = SolutionLoader::new().load_directory(dir.path()).unwrap();
    let document = &solution.projects[0].documents[0];
    assert!(document.text.is_none());
    let error = document.read_error.as_ref().unwrap();
    assert_eq!(error.kind, std::io::ErrorKind::InvalidData);

    let output = index_directory(dir.path()).unwrap();
    assert_eq!(output.workspace.document_count(), 0);
    assert!(matches!(output.skipped[0].error, IndexError::Io { .. }));
}

#[test]
fn test_missing_directory_is_invalid_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = SolutionLoader::new().load_directory(&missing).unwrap_err();
    assert!(matches!(err, IndexError::InvalidWorkspaceRoot { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_index_directory_end_to_end() {
    let dir = sample_tree();
    let output = index_directory(dir.path()).unwrap();

    assert_eq!(output.workspace.name(), "Shop");
    assert_eq!(output.workspace.document_count(), 4);
    assert_eq!(output.skipped.len(), 1);
    assert!(matches!(
        output.skipped[0].error,
        IndexError::UnsupportedLanguage { .. }
    ));

    let line = output
        .workspace
        .documents()
        .into_iter()
        .find(|d| d.name() == "Line.cs")
        .unwrap();
    assert_eq!(
        line.links().filter(|l| l.key() == "Core.Order").count(),
        1
    );
}
