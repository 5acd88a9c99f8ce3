use luma_ir::ParseOptions;
use pretty_assertions::assert_eq;

use super::*;

fn module(name: &str, kind: DeclarationKind) -> ModuleDeclaration {
    let tree = luma_parse::parse("", &ParseOptions::default());
    ModuleDeclaration {
        name: name.into(),
        kind,
        syntax: SyntaxReference {
            tree: tree.id(),
            span: Span::new(0, 0),
        },
        member_names: Box::new([]),
        diagnostics: Arc::clone(tree.diagnostics()),
    }
}

#[test]
fn module_is_wrapped_in_its_namespaces() {
    let root = RootDeclaration::new(&["a", "b"], module("Main", DeclarationKind::Module));

    let global = root.global();
    assert_eq!(global.kind(), DeclarationKind::Namespace);
    assert_eq!(global.name(), "");

    let shape: Vec<_> = global
        .descendants()
        .into_iter()
        .map(|d| (d.kind(), d.name()))
        .collect();
    assert_eq!(
        shape,
        [
            (DeclarationKind::Namespace, ""),
            (DeclarationKind::Namespace, "a"),
            (DeclarationKind::Namespace, "b"),
            (DeclarationKind::Module, "Main"),
        ]
    );
    assert_eq!(root.namespace_names().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(root.type_names().collect::<Vec<_>>(), ["Main"]);
    assert_eq!(root.to_string(), "a.b.Main");
}

#[test]
fn module_declarations_have_no_children() {
    let root = RootDeclaration::new(&[], module("m", DeclarationKind::Script));
    let leaf = &root.global().children()[0];
    assert_eq!(leaf.kind(), DeclarationKind::Script);
    assert!(leaf.children().is_empty());
    assert_eq!(root.namespace_names().count(), 0);
    assert_eq!(root.to_string(), "m");
}

#[test]
fn only_namespaces_are_not_types() {
    assert!(!DeclarationKind::Namespace.is_type());
    assert!(DeclarationKind::Module.is_type());
    assert!(DeclarationKind::Script.is_type());
    assert!(DeclarationKind::Submission.is_type());
}
