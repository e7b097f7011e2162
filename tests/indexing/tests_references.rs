#![allow(clippy::unwrap_used)]

use crate::helpers::index_helpers::{index, solution};
use crate::helpers::source_fixtures::*;
use std::path::Path;
use xref::{LineCol, ReferenceIndex};

#[test]
fn test_references_listing_for_a_method() {
    let output = index(&solution(&[("Project1", &[BASIC_LINKING])]));
    let references = ReferenceIndex::build(&output.workspace);

    let occurrences = references.occurrences("C1.Method1()");
    assert_eq!(occurrences.len(), 2);
    let definition = references.definition("C1.Method1()").unwrap();
    assert_eq!(definition.line_col, LineCol::new(3, 36));
    assert_eq!(references.references("C1.Method1()").count(), 1);
    assert_eq!(
        references.references("C1.Method1()").next().unwrap().line_col,
        LineCol::new(9, 28)
    );
}

#[test]
fn test_references_span_documents() {
    let declaring = "public class Counter\n{\n    public int Count;\n}\n";
    let using = "class App\n{\n    void Tick(Counter c)\n    {\n        c.Count = c.Count + 1;\n    }\n}\n";
    let output = index(&solution(&[("Project1", &[declaring, using])]));
    let references = ReferenceIndex::build(&output.workspace);

    let count = references.occurrences("Counter.Count");
    assert_eq!(count.len(), 3);
    assert_eq!(count[0].document, Path::new("/src/Project1/Document1.cs"));
    assert!(count[0].is_declaration);
    assert!(
        count[1..]
            .iter()
            .all(|o| o.document == Path::new("/src/Project1/Document2.cs") && !o.is_declaration)
    );
    assert_eq!(count[1].line_col, LineCol::new(4, 10));

    assert!(references.keys().any(|k| k == "App.Tick(Counter)::c"));
    assert!(references.definition("NotThere").is_none());
}
