use crate::base::LanguageId;
use crate::project::{Project, Solution, SourceDocument, solution_name};
use rstest::rstest;
use std::io;
use std::path::Path;

#[rstest]
#[case("/src/Demo.sln", "Demo")]
#[case("Demo.sln", "Demo")]
#[case("/src/Demo", "Demo")]
#[case("/src/My.App.sln", "My.App")]
#[case("/src/Demo.sln.bak", "Demo.sln.bak")]
#[case("/", "")]
fn test_solution_name(#[case] path: &str, #[case] expected: &str) {
    assert_eq!(solution_name(Path::new(path)), expected);
}

#[test]
fn test_solution_from_file_uses_parent_as_root() {
    let solution = Solution::from_solution_file(Path::new("/work/Shop/Shop.sln"));
    assert_eq!(solution.name, "Shop");
    assert_eq!(solution.root, Path::new("/work/Shop"));
}

#[test]
fn test_builders_and_counts() {
    let solution = Solution::new("Demo", "/src")
        .with_project(
            Project::new("A")
                .with_document(SourceDocument::new(
                    "/src/A/one.cs",
                    LanguageId::csharp(),
                    "class One { }",
                ))
                .with_document(SourceDocument::unreadable(
                    "/src/A/two.cs",
                    LanguageId::csharp(),
                    &io::Error::from(io::ErrorKind::PermissionDenied),
                )),
        )
        .with_project(Project::new("B"));
    assert_eq!(solution.document_count(), 2);
    let docs = &solution.projects[0].documents;
    assert_eq!(docs[0].name(), "one.cs");
    assert!(docs[1].text.is_none());
    let error = docs[1].read_error.as_ref().unwrap();
    assert_eq!(error.kind, io::ErrorKind::PermissionDenied);
    assert_eq!(error.to_io_error().kind(), io::ErrorKind::PermissionDenied);
}
