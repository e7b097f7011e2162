#![allow(clippy::unwrap_used)]

use crate::helpers::index_helpers::{index, index_single, link_count, linked_tokens, solution};
use crate::helpers::source_fixtures::*;
use rstest::rstest;
use std::collections::BTreeMap;

#[rstest]
#[case::sanity(SANITY)]
#[case::basic_linking(BASIC_LINKING)]
#[case::parameters(PARAMETERS)]
#[case::locals(LOCALS)]
#[case::extension_methods(EXTENSION_METHODS)]
#[case::overloads(OVERLOADS)]
#[case::crlf("class C1\r\n{\r\n\tint f; // field\r\n}\r\n")]
#[case::broken("class { void ( $$ } } namespace")]
fn test_tokens_reconstruct_source(#[case] source: &str) {
    let document = index_single(source);
    assert_eq!(document.text(), source);
}

#[test]
fn test_overloads_link_to_their_own_declaration() {
    let document = index_single(OVERLOADS);

    assert_eq!(link_count(&document, "Shop.Order.Add(int)"), 2);
    assert_eq!(link_count(&document, "Shop.Order.Add(string)"), 3);
    assert_eq!(link_count(&document, "Shop.Order.Add(string, int)"), 2);
}

#[test]
fn test_same_names_in_different_methods_get_distinct_keys() {
    let document = index_single(SCOPING);

    assert_eq!(link_count(&document, "C1.First(int)::value"), 2);
    assert_eq!(link_count(&document, "C1.First(int)::count"), 3);
    assert_eq!(link_count(&document, "C1.Second(int)::value"), 2);
    assert_eq!(link_count(&document, "C1.Second(int)::count"), 1);
}

#[test]
fn test_keys_agree_across_documents() {
    let declaring = "namespace Lib { public class Greeter { public void Greet(string name) { } } }";
    let using = "using Lib; class App { void Run(Greeter g) { g.Greet(\"hi\"); } }";
    let output = index(&solution(&[("Project1", &[declaring, using])]));
    let documents = output.workspace.documents();

    assert_eq!(link_count(documents[0], "Lib.Greeter"), 1);
    assert_eq!(link_count(documents[1], "Lib.Greeter"), 1);
    assert_eq!(link_count(documents[0], "Lib.Greeter.Greet(string)"), 1);
    assert_eq!(link_count(documents[1], "Lib.Greeter.Greet(string)"), 1);
}

#[test]
fn test_keys_do_not_depend_on_document_order() {
    let a = "class A { public B Next; void M() { Next.Run(); } }";
    let b = "class B { public void Run() { } }";

    let keys = |sources: &[&str]| -> BTreeMap<String, usize> {
        let output = index(&solution(&[("Project1", sources)]));
        let mut counts = BTreeMap::new();
        for document in output.workspace.documents() {
            for (_, key) in linked_tokens(document) {
                *counts.entry(key).or_default() += 1;
            }
        }
        counts
    };

    let forward = keys(&[a, b]);
    let backward = keys(&[b, a]);
    assert_eq!(forward, backward);
    assert_eq!(forward.get("B.Run()"), Some(&2));
    assert_eq!(forward.get("A.Next"), Some(&2));
}

#[test]
fn test_long_concatenation_indexes() {
    let terms = vec!["\"a\""; 5000].join(" + ");
    let source = format!("class C1\n{{\n    string f = {terms};\n    void M1() {{ M1(); }}\n}}\n");
    let document = index_single(&source);

    assert_eq!(document.text(), source);
    assert_eq!(link_count(&document, "C1.f"), 1);
    assert_eq!(link_count(&document, "C1.M1()"), 2);
}

#[rstest]
#[case::parens(format!("int f = {}1{};", "(".repeat(1500), ")".repeat(1500)))]
#[case::blocks(format!("void M2() {{ {}{} }}", "{".repeat(1500), "}".repeat(1500)))]
#[case::calls(format!("int f = x{};", ".y()".repeat(1500)))]
fn test_deeply_nested_source_indexes(#[case] member: String) {
    let source = format!("class C1\n{{\n    {member}\n    void M1() {{ M1(); }}\n}}\n");
    let document = index_single(&source);

    assert_eq!(document.text(), source);
    assert_eq!(link_count(&document, "C1.M1()"), 2);
}
