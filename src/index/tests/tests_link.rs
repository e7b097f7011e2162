use super::{resolve, walk, walk_with};
use crate::index::{
    Link, LinkResolver, ReferenceSourceLinkProvider, ResolvedTree, SymbolLinkProvider,
};
use crate::model::Document;
use crate::symbols::Binding;
use rstest::rstest;
use std::sync::Arc;

fn linked(doc: &Document) -> Vec<(String, String, bool)> {
    doc.tokens()
        .iter()
        .filter_map(|t| {
            let link = t.link()?;
            Some((t.text().to_string(), link.key().to_string(), link.is_declaration()))
        })
        .collect()
}

fn keys_of(doc: &Document, key: &str) -> usize {
    doc.links().filter(|l| l.key() == key).count()
}

const SHAPES: &str = "
namespace Shapes
{
    enum Kind { Round }

    class Circle
    {
        double radius;
        public Circle(double r) { radius = r; }
        public double Area(int scale)
        {
            var factor = scale * 2;
            return radius * factor;
        }
    }
}";

/// Every kind of declaration links to itself exactly once.
#[rstest]
#[case::namespace("Shapes", "Shapes")]
#[case::enum_type("Kind", "Shapes.Kind")]
#[case::enum_member("Round", "Shapes.Kind.Round")]
#[case::class("Circle", "Shapes.Circle")]
#[case::field("radius", "Shapes.Circle.radius")]
#[case::parameter("r", "Shapes.Circle.Circle(double)::r")]
#[case::method("Area", "Shapes.Circle.Area(int)")]
#[case::local("factor", "Shapes.Circle.Area(int)::factor")]
fn test_declarations_self_link(#[case] name: &str, #[case] key: &str) {
    let doc = walk(SHAPES);
    let declarations: Vec<_> = linked(&doc)
        .into_iter()
        .filter(|(_, k, is_decl)| k == key && *is_decl)
        .collect();
    assert_eq!(declarations.len(), 1, "{key}");
    assert_eq!(declarations[0].0, name);
}

#[test]
fn test_uses_share_the_declaration_key() {
    let doc = walk(SHAPES);
    assert_eq!(keys_of(&doc, "Shapes.Circle.radius"), 3);
    assert_eq!(keys_of(&doc, "Shapes.Circle.Area(int)::scale"), 2);
    assert_eq!(keys_of(&doc, "Shapes.Circle.Area(int)::factor"), 2);
    assert_eq!(keys_of(&doc, "Shapes.Circle.Circle(double)::r"), 2);
}

#[test]
fn test_unresolved_names_have_no_link() {
    let doc = walk("class A { void M() { Missing(); unknown = 1; } }");
    let texts: Vec<String> = linked(&doc).into_iter().map(|(t, _, _)| t).collect();
    assert_eq!(texts, ["A", "M"]);
}

#[test]
fn test_resolution_is_idempotent() {
    let trees = resolve(&["class A { void M() { M(); } }"]);
    let ResolvedTree::CSharp(model) = &trees[0];
    let root = model.root();
    let provider = SymbolLinkProvider;
    let mut resolver = LinkResolver::new(model.symbols(), &provider);
    for token in root.descendants_with_tokens().filter_map(|e| e.into_token()) {
        let binding = model.binding(&token);
        let first = resolver.resolve(binding);
        let second = resolver.resolve(binding);
        assert_eq!(first, second);
    }
    assert_eq!(resolver.resolve(Binding::Unresolved), None);
    assert_eq!(resolver.resolve(Binding::None), None);
}

#[test]
fn test_reference_source_links_hosted_namespaces() {
    let sources = [
        "namespace System { class Widget { public static void Run() { } } }",
        "using System; class App { void M() { Widget.Run(); } }",
    ];
    let provider = ReferenceSourceLinkProvider::new("https://docs.example.test/");
    let docs = walk_with(&sources, Arc::new(provider));

    // Declarations stay in the index
    assert!(docs[0].links().all(|l| matches!(l, Link::Symbol(_))));

    let external: Vec<_> = docs[1]
        .links()
        .filter_map(|l| match l {
            Link::External(link) => Some(link.url.as_str()),
            Link::Symbol(_) => None,
        })
        .collect();
    assert_eq!(
        external,
        [
            "https://docs.example.test/#System",
            "https://docs.example.test/#System.Widget",
            "https://docs.example.test/#System.Widget.Run()",
        ]
    );
    assert_eq!(keys_of(&docs[1], "App"), 1);
}

#[test]
fn test_reference_source_namespace_prefix_must_match_segments() {
    let sources = [
        "namespace Systematic { class Tool { } }",
        "class App { Systematic.Tool tool; }",
    ];
    let provider = ReferenceSourceLinkProvider::default().with_namespaces(["System"]);
    let docs = walk_with(&sources, Arc::new(provider));
    assert!(docs[1].links().all(|l| matches!(l, Link::Symbol(_))));
    assert_eq!(keys_of(&docs[1], "Systematic.Tool"), 1);
}
