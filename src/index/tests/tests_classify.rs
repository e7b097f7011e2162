use super::walk;
use crate::csharp::{SyntaxKind, parse};
use crate::index::classify_csharp;
use crate::model::TokenClass;
use rstest::rstest;

fn classes(source: &str) -> Vec<(String, TokenClass)> {
    walk(source)
        .tokens()
        .iter()
        .map(|t| (t.text().to_string(), t.class()))
        .collect()
}

fn class_of(source: &str, text: &str) -> TokenClass {
    classes(source)
        .into_iter()
        .find(|(t, _)| t == text)
        .map(|(_, class)| class)
        .unwrap_or_else(|| panic!("no token `{text}`"))
}

#[test]
fn test_sanity_fixture_counts() {
    let doc = walk("class C1\n{\n    public void M1 () { }\n}");
    assert_eq!(doc.tokens().len(), 12);
    assert_eq!(doc.count(TokenClass::Keyword), 3);
    assert_eq!(doc.count(TokenClass::Type), 1);
    assert_eq!(doc.count(TokenClass::Identifier), 1);
    assert_eq!(doc.count(TokenClass::Other), 7);
}

#[rstest]
#[case::class_name("class Widget { }", "Widget", TokenClass::Type)]
#[case::enum_name("enum Color { Red }", "Color", TokenClass::Type)]
#[case::enum_member("enum Color { Red }", "Red", TokenClass::Identifier)]
#[case::field_type("class A { B b; } class B { }", "B", TokenClass::Type)]
#[case::field_name("class A { int count; }", "count", TokenClass::Identifier)]
#[case::builtin_type("class A { int count; }", "int", TokenClass::Keyword)]
#[case::contextual_var("class A { void M() { var x = 1; } }", "var", TokenClass::Keyword)]
#[case::var_as_name("class A { int var; }", "var", TokenClass::Identifier)]
#[case::partial("partial class A { }", "partial", TokenClass::Keyword)]
#[case::literal("class A { int x = 42; }", "42", TokenClass::Other)]
#[case::string_literal("class A { string s = \"hi\"; }", "\"hi\"", TokenClass::Other)]
#[case::namespace_name("namespace Tools { }", "Tools", TokenClass::Identifier)]
#[case::base_type("class A { } class B : A { }", ":", TokenClass::Other)]
#[case::getter("class A { int P { get; set; } }", "get", TokenClass::Keyword)]
#[case::setter("class A { int P { get; private set; } }", "set", TokenClass::Keyword)]
#[case::init("class A { int P { get; init; } }", "init", TokenClass::Keyword)]
#[case::get_as_name("class A { int get; }", "get", TokenClass::Identifier)]
#[case::foreach_var(
    "class A { void M(int[] xs) { foreach (var x in xs) { } } }",
    "var",
    TokenClass::Keyword
)]
#[case::for_local("class A { void M() { for (int i = 0; i < 3; i++) { } } }", "i", TokenClass::Identifier)]
#[case::type_param("class Box<T> { T value; }", "T", TokenClass::Type)]
#[case::where_kw("class Box<T> where T : class { }", "where", TokenClass::Keyword)]
#[case::generic_arg("class A { List<B> items; } class B { }", "B", TokenClass::Type)]
fn test_token_classes(#[case] source: &str, #[case] text: &str, #[case] expected: TokenClass) {
    assert_eq!(class_of(source, text), expected);
}

#[test]
fn test_object_creation_type_is_type() {
    let tokens = classes("class A { void M() { A a = new A(); } }");
    let a_classes: Vec<TokenClass> = tokens
        .iter()
        .filter(|(t, _)| t == "A")
        .map(|(_, c)| *c)
        .collect();
    assert_eq!(a_classes, [TokenClass::Type; 3]);
}

#[test]
fn test_error_tokens_are_other() {
    let parse = parse("class A { $ }");
    let error = parse
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::ERROR)
        .expect("error token");
    assert_eq!(classify_csharp(&error), TokenClass::Other);
}

#[test]
fn test_eof_is_other_and_last() {
    let doc = walk("class A { }");
    let last = doc.tokens().last().expect("tokens");
    assert_eq!(last.text(), "");
    assert_eq!(last.class(), TokenClass::Other);
}
