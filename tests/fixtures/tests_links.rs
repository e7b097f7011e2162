#![allow(clippy::unwrap_used)]

use crate::helpers::index_helpers::{all_symbol_links, index_single, link_count};
use crate::helpers::source_fixtures::*;
use xref::TokenClass;

#[test]
fn test_sanity_check() {
    let document = index_single(SANITY);

    assert_eq!(document.tokens().len(), 12);
    assert_eq!(document.count(TokenClass::Keyword), 3);
    assert_eq!(document.count(TokenClass::Type), 1);
    assert_eq!(document.count(TokenClass::Identifier), 1);
    assert_eq!(document.count(TokenClass::Other), 7);
}

#[test]
fn test_basic_linking() {
    let document = index_single(BASIC_LINKING);

    assert_eq!(document.links().count(), 5);
    assert!(all_symbol_links(&document));
    assert_eq!(link_count(&document, "C1.Method1()"), 2);
    assert_eq!(link_count(&document, "C1.Method2()"), 2);
    assert_eq!(link_count(&document, "C1"), 1);
}

#[test]
fn test_parameters() {
    let document = index_single(PARAMETERS);

    assert_eq!(document.links().count(), 9);
    assert_eq!(link_count(&document, "C1"), 2);
    assert_eq!(link_count(&document, "C1.M1(string, int, C1)"), 1);
    assert_eq!(link_count(&document, "C1.M1(string, int, C1)::p1"), 2);
    assert_eq!(link_count(&document, "C1.M1(string, int, C1)::p2"), 2);
    assert_eq!(link_count(&document, "C1.M1(string, int, C1)::p3"), 2);
}

#[test]
fn test_locals_with_missing_semicolons() {
    let document = index_single(LOCALS);

    assert_eq!(document.links().count(), 8);
    assert_eq!(link_count(&document, "C1"), 1);
    assert_eq!(link_count(&document, "C1.M1()"), 1);
    assert_eq!(link_count(&document, "C1.M1()::l1"), 3);
    assert_eq!(link_count(&document, "C1.M1()::l2"), 3);
}

#[test]
fn test_extension_methods() {
    let document = index_single(EXTENSION_METHODS);

    assert_eq!(document.links().count(), 6);
    assert!(all_symbol_links(&document));
    assert_eq!(link_count(&document, "MyExtensions"), 1);
    assert_eq!(link_count(&document, "MyExtensions.ExtensionMethod(string)"), 2);
    assert_eq!(
        link_count(&document, "MyExtensions.ExtensionMethod(string)::myParam"),
        1
    );
    assert_eq!(link_count(&document, "MyClass"), 1);
    assert_eq!(link_count(&document, "MyClass.MyMethod()"), 1);
}

#[test]
fn test_declaration_flags() {
    let document = index_single(BASIC_LINKING);
    let declarations: Vec<&str> = document
        .tokens()
        .iter()
        .filter(|t| t.link().is_some_and(|l| l.is_declaration()))
        .map(|t| t.text())
        .collect();
    assert_eq!(declarations, ["C1", "Method1", "Method2"]);
}

#[test]
fn test_block_comments_are_trivia() {
    let source = "class C1\n{\n    /* helper */\n    /** doc **/ void M1() { M1(); }\n}";
    let document = index_single(source);

    assert_eq!(document.text(), source);
    assert!(document.tokens().iter().all(|t| !t.text().contains("/*")));
    let void = document.tokens().iter().find(|t| t.text() == "void").unwrap();
    assert_eq!(void.leading_trivia(), "    /* helper */\n    /** doc **/ ");
    assert_eq!(link_count(&document, "C1"), 1);
    assert_eq!(link_count(&document, "C1.M1()"), 2);
}

#[test]
fn test_generic_members_keep_later_links() {
    let source = r#"class C1
{
    List<int> items;
    Dictionary<string, List<C1>> lookup;
    void M1() { M1(); }
}"#;
    let document = index_single(source);

    assert_eq!(link_count(&document, "C1"), 2);
    assert_eq!(link_count(&document, "C1.items"), 1);
    assert_eq!(link_count(&document, "C1.lookup"), 1);
    assert_eq!(link_count(&document, "C1.M1()"), 2);
}

#[test]
fn test_loop_variables_link() {
    let source = r#"class C1
{
    void M1(int[] values)
    {
        for (var i = 0; i < 3; i++) { M2(i); }
        foreach (var value in values) { M1(values); }
    }
    void M2(int n) { }
}"#;
    let document = index_single(source);

    assert_eq!(link_count(&document, "C1.M1(int[])::i"), 4);
    assert_eq!(link_count(&document, "C1.M1(int[])::value"), 1);
    assert_eq!(link_count(&document, "C1.M1(int[])::values"), 3);
    assert_eq!(link_count(&document, "C1.M2(int)"), 2);
    let vars: Vec<TokenClass> = document
        .tokens()
        .iter()
        .filter(|t| t.text() == "var")
        .map(|t| t.class())
        .collect();
    assert_eq!(vars, [TokenClass::Keyword; 2]);
}
