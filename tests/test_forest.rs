mod common;

use std::sync::Arc;

use common::Java;
use jsymtab::hir::NodeRef;
use jsymtab::ide::{CheckId, ForestManager};
use jsymtab::{Error, LineCol, NodeId, SyntaxKind, TreeBuilder};

#[test]
fn test_reregistration_rebuilds_from_new_trees() {
    let mut forest = ForestManager::default();
    Java::unit("app/A.java", |j| {
        j.class("A", |_| {});
    })
    .register(&mut forest);
    let first = forest.table().unwrap();
    assert!(first.class_named("app.A").is_some());

    // same path, new content
    Java::unit("app/A.java", |j| {
        j.class("Renamed", |_| {});
    })
    .register(&mut forest);
    assert!(!forest.is_built());

    let second = forest.table().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(second.class_named("app.A").is_none());
    assert!(second.class_named("app.Renamed").is_some());
    assert_eq!(second.files().count(), 1);

    // the old generation is untouched
    assert!(first.class_named("app.A").is_some());
}

#[test]
fn test_new_file_sees_existing_classes() {
    let mut forest = ForestManager::default();
    Java::unit("app/A.java", |j| {
        j.class("A", |_| {});
    })
    .register(&mut forest);
    forest.query().unwrap();

    let b = Java::unit("app/B.java", |j| {
        j.class("B", |j| {
            j.mark("a_ty").var("A", "a", "a");
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let symbol = query.definition_at(b.at("a_ty")).unwrap();
    assert_eq!(symbol.declared(), query.table().class_named("app.A"));
}

#[test]
fn test_removed_file_no_longer_resolves() {
    let mut forest = ForestManager::default();
    let a = Java::unit("app/A.java", |j| {
        j.class("A", |_| {});
    })
    .register(&mut forest);
    let b = Java::unit("app/B.java", |j| {
        j.class("B", |j| {
            j.mark("a_ty").var("A", "a", "a");
        });
    })
    .register(&mut forest);

    forest.remove_file(a.file());
    let query = forest.query().unwrap();
    assert!(query.definition_at(b.at("a_ty")).unwrap().is_unknown());
}

#[test]
fn test_checks_share_one_forest() {
    let mut forest = ForestManager::default();
    let a = Java::unit("app/A.java", |j| {
        j.class("A", |_| {});
    })
    .register(&mut forest);
    let root = NodeRef::new(a.file(), NodeId::ROOT);

    let unused = CheckId::from("unused");
    let counts = CheckId::from("counts");
    forest.register_check_node(unused.clone(), root);
    forest.register_check_node(counts.clone(), root);

    let table = forest.table().unwrap();
    assert_eq!(
        forest.checks().cloned().collect::<Vec<_>>(),
        vec![unused.clone(), counts.clone()]
    );
    assert_eq!(forest.check_nodes_for(&unused), &[root]);

    forest.remove_check(&unused);
    assert!(forest.is_built(), "other checks keep the forest alive");
    assert!(Arc::ptr_eq(&table, &forest.table().unwrap()));

    forest.remove_check(&counts);
    assert!(forest.files().is_empty());
    assert!(!forest.is_built());
    assert_eq!(forest.table().unwrap().files().count(), 0);
}

#[test]
fn test_unexpected_root_fails_build() {
    let mut builder = TreeBuilder::new("app/Bad.java");
    builder
        .start_node(SyntaxKind::ClassDef, "", LineCol::new(0, 0))
        .unwrap();
    builder.finish_node().unwrap();
    let tree = builder.finish().unwrap();

    let mut forest = ForestManager::default();
    forest.add_tree(tree);
    let err = forest.table().unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedRoot {
            kind: SyntaxKind::ClassDef,
            ..
        }
    ));
    assert!(!forest.is_built());
}

#[test]
fn test_removing_unknown_check_keeps_files() {
    let mut forest = ForestManager::default();
    let a = Java::unit("app/A.java", |j| {
        j.class("A", |_| {});
    })
    .register(&mut forest);
    let table = forest.table().unwrap();

    forest.remove_check(&CheckId::from("never-registered"));
    assert_eq!(forest.files().len(), 1);
    assert!(Arc::ptr_eq(&table, &forest.table().unwrap()));

    // with a live check, detaching an unrelated one changes nothing either
    forest.register_check_node("unused", NodeRef::new(a.file(), NodeId::ROOT));
    forest.remove_check(&CheckId::from("counts"));
    assert_eq!(forest.files().len(), 1);
    assert_eq!(forest.checks().count(), 1);
}

#[test]
fn test_file_id_is_a_pure_lookup() {
    let mut forest = ForestManager::default();
    let a = Java::unit("app/A.java", |j| {
        j.class("A", |_| {});
    })
    .register(&mut forest);

    assert_eq!(forest.file_id("app/A.java"), Some(a.file()));
    assert_eq!(forest.file_id("app/B.java"), None);
    assert_eq!(forest.files().len(), 1);

    forest.remove_file(a.file());
    assert_eq!(forest.file_id("app/A.java"), None);
}
