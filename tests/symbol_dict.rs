//! Serialization contract of `Symbol::to_dict` across raw-record shapes.

mod helpers;

use helpers::{build, chain, raw, raw_at, with_children, PATH};
use serde_json::json;
use symtree::symbols::{DictOptions, SymbolDict};
use symtree::SymbolError;

fn depth_of(dict: &SymbolDict) -> usize {
    match &dict.children {
        None => 0,
        Some(children) => 1 + children.iter().map(depth_of).max().unwrap_or(0),
    }
}

/// Class with body 10:0-20:3 and name token at 10:6.
#[test]
fn includes_end_location_when_range_end_present() {
    let sym = build(&raw("TestSymbol", 5, (10, 0), Some((20, 3)), (10, 6)));
    let result = sym.to_dict(true, true, 0);

    let location = result.location.as_ref().expect("location");
    let end = result.end_location.as_ref().expect("end_location");
    assert_eq!(location.line, 10);
    assert_eq!(location.column, 6);
    assert_eq!(end.line, 20);
    assert_eq!(end.column, 3);
    assert_eq!(location.relative_path, PATH);
    assert_eq!(end.relative_path, PATH);
    assert_eq!(result.kind.as_deref(), Some("Class"));
}

/// Import symbols come without a body end.
#[test]
fn omits_end_location_when_range_end_absent() {
    let sym = build(&raw("import_symbol", 2, (5, 0), None, (5, 0)));
    let result = sym.to_dict(true, true, 0);

    assert!(result.location.is_some());
    assert!(result.end_location.is_none());

    let value = serde_json::to_value(&result).unwrap();
    assert!(value.get("location").is_some());
    assert!(value.get("end_location").is_none());
}

#[test]
fn single_line_symbol_reports_both_columns() {
    let sym = build(&raw("CONSTANT", 14, (15, 0), Some((15, 20)), (15, 0)));
    let result = sym.to_dict(false, true, 0);

    let location = result.location.unwrap();
    let end = result.end_location.unwrap();
    assert_eq!(location.line, 15);
    assert_eq!(end.line, 15);
    assert_eq!(location.column, 0);
    assert_eq!(end.column, 20);
}

#[test]
fn nested_child_carries_its_own_locations() {
    let parent = with_children(
        raw("Parent", 5, (10, 0), Some((20, 3)), (10, 6)),
        vec![raw("method", 6, (12, 4), Some((14, 12)), (12, 8))],
    );
    let result = build(&parent).to_dict(true, true, 1);

    let children = result.children.expect("children");
    assert_eq!(children.len(), 1);
    let child = &children[0];
    assert_eq!(child.name, "method");
    assert_eq!(child.kind.as_deref(), Some("Method"));
    assert_eq!(child.location.as_ref().unwrap().line, 12);
    assert_eq!(child.location.as_ref().unwrap().column, 8);
    assert_eq!(child.end_location.as_ref().unwrap().line, 14);
    assert!(child.children.is_none());
}

#[test]
fn location_ignores_range_start() {
    let sym = build(&raw("decorated", 12, (3, 0), Some((9, 0)), (5, 4)));
    let location = sym.to_dict(false, true, 0).location.unwrap();
    assert_eq!((location.line, location.column), (5, 4));
}

#[test]
fn flags_off_emit_only_name() {
    let tree = with_children(raw_at("Root", 0), vec![raw_at("leaf", 1)]);
    let value = serde_json::to_value(build(&tree).to_dict(false, false, 0)).unwrap();
    assert_eq!(value, json!({"name": "Root"}));
}

#[test]
fn depth_zero_never_has_children_key() {
    let tree = with_children(raw_at("Root", 0), vec![raw_at("a", 1), raw_at("b", 2)]);
    let dict = build(&tree).to_dict(true, true, 0);
    assert!(dict.children.is_none());
    let value = serde_json::to_value(&dict).unwrap();
    assert!(value.get("children").is_none());
}

#[test]
fn depth_one_stops_after_immediate_children() {
    let sym = build(&chain(3));
    let dict = sym.to_dict(false, false, 1);
    let children = dict.children.as_ref().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name, "level1");
    assert!(children[0].children.is_none());
    assert_eq!(depth_of(&dict), 1);
}

#[test]
fn depth_bound_truncates_deep_trees_and_spares_shallow_ones() {
    let sym = build(&chain(5));
    assert_eq!(depth_of(&sym.to_dict(false, false, 2)), 2);
    // The leaf at depth 4 serializes an empty child list when depth remains.
    assert_eq!(depth_of(&sym.to_dict(false, false, 10)), 5);

    let shallow = build(&chain(2)).to_dict(false, false, 7);
    let leaf = &shallow.children.as_ref().unwrap()[0];
    assert_eq!(leaf.name, "level1");
    assert_eq!(leaf.children, Some(Vec::new()));
    assert_eq!(depth_of(&shallow), 2);
}

#[test]
fn childless_symbol_serializes_empty_children_when_requested() {
    let sym = build(&raw_at("lonely", 0));
    let dict = sym.to_dict(false, false, 1);
    assert_eq!(dict.children, Some(Vec::new()));
    let value = serde_json::to_value(&dict).unwrap();
    assert_eq!(value["children"], json!([]));
}

#[test]
fn children_keep_declaration_order() {
    let tree = with_children(
        raw_at("Root", 0),
        vec![raw_at("zeta", 9), raw_at("alpha", 2), raw_at("mid", 5)],
    );
    let names: Vec<String> = build(&tree)
        .to_dict(false, false, 1)
        .children
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn flags_thread_through_every_level() {
    let sym = build(&chain(3));
    let dict = sym.to_dict(true, false, 2);
    let grandchild = &dict.children.as_ref().unwrap()[0].children.as_ref().unwrap()[0];
    assert_eq!(grandchild.name, "level2");
    assert_eq!(grandchild.kind.as_deref(), Some("Function"));
    assert!(grandchild.location.is_none());
}

#[test]
fn to_dict_is_idempotent() {
    let tree = with_children(
        raw("Mixed", 5, (0, 0), Some((30, 0)), (0, 6)),
        vec![raw("imp", 2, (1, 0), None, (1, 7)), raw_at("f", 3)],
    );
    let sym = build(&tree);
    let first = sym.to_dict(true, true, 3);
    let second = sym.to_dict(true, true, 3);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn to_dict_matches_options_form() {
    let sym = build(&with_children(raw_at("R", 0), vec![raw_at("c", 1)]));
    assert_eq!(sym.to_dict(true, true, 1), sym.to_dict_with(DictOptions::new(true, true, 1)));
}

#[test]
fn unknown_kind_does_not_fail_serialization() {
    let tree = with_children(raw_at("Root", 0), vec![raw("odd", 77, (1, 0), None, (1, 0))]);
    let dict = build(&tree).to_dict(true, false, 1);
    assert_eq!(dict.children.unwrap()[0].kind.as_deref(), Some("Unknown"));
}

#[test]
fn malformed_descendant_fails_construction() {
    let mut broken = raw_at("broken", 2);
    broken.location.as_mut().unwrap().path = None;
    let tree = with_children(raw_at("Root", 0), vec![raw_at("fine", 1), broken]);

    let err = symtree::Symbol::from_raw(&tree).unwrap_err();
    assert_eq!(
        err,
        SymbolError::Malformed {
            field: "location.path",
            name_path: "Root/broken".to_string(),
        }
    );
}

#[test]
fn concurrent_readers_see_identical_output() {
    let sym = build(&chain(4));
    let expected = sym.to_dict(true, true, 3);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| sym.to_dict(true, true, 3)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
