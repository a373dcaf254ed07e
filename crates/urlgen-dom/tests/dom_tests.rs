//! Tests for element lookup, text replacement and form-control values.

use urlgen_dom::{DomString, DomTree, NodeId};

/// Helper to create a connected element with an id under `<body>`.
fn append_with_id(tree: &mut DomTree, tag: &str, id: &str) -> NodeId {
    let body = tree.body().unwrap();
    let el = tree.create_element(tag);
    tree.set_attribute(el, "id", id);
    tree.append_child(body, el);
    el
}

// ========== skeleton ==========

#[test]
fn test_skeleton_has_body() {
    let tree = DomTree::with_skeleton();
    let body = tree.body().unwrap();
    assert_eq!(tree.as_element(body).unwrap().tag_name, "body");
    assert!(tree.is_connected(body));
}

#[test]
fn test_bare_tree_has_no_body() {
    assert_eq!(DomTree::new().body(), None);
}

// ========== get_element_by_id ==========

#[test]
fn test_get_element_by_id_finds_connected_element() {
    let mut tree = DomTree::with_skeleton();
    let input = append_with_id(&mut tree, "input", "tag");
    let pre = append_with_id(&mut tree, "pre", "tag-url");

    assert_eq!(tree.get_element_by_id("tag"), Some(input));
    assert_eq!(tree.get_element_by_id("tag-url"), Some(pre));
    assert_eq!(tree.get_element_by_id("instance"), None);
}

#[test]
fn test_get_element_by_id_empty_is_null() {
    let mut tree = DomTree::with_skeleton();
    let _ = append_with_id(&mut tree, "input", "");
    assert_eq!(tree.get_element_by_id(""), None);
}

#[test]
fn test_get_element_by_id_first_in_tree_order() {
    let mut tree = DomTree::with_skeleton();
    let first = append_with_id(&mut tree, "input", "dup");
    let _second = append_with_id(&mut tree, "input", "dup");
    assert_eq!(tree.get_element_by_id("dup"), Some(first));
}

#[test]
fn test_get_element_by_id_ignores_detached() {
    let mut tree = DomTree::with_skeleton();
    let el = tree.create_element("pre");
    tree.set_attribute(el, "id", "tag-url");
    assert!(!tree.is_connected(el));
    assert_eq!(tree.get_element_by_id("tag-url"), None);
}

#[test]
fn test_get_element_by_id_after_removal() {
    let mut tree = DomTree::with_skeleton();
    let body = tree.body().unwrap();
    let el = append_with_id(&mut tree, "pre", "tag-url");
    tree.remove_child(body, el);
    assert_eq!(tree.get_element_by_id("tag-url"), None);
    assert_eq!(tree.parent(el), None);
}

// ========== text content ==========

#[test]
fn test_set_text_content_replaces_previous() {
    let mut tree = DomTree::with_skeleton();
    let pre = append_with_id(&mut tree, "pre", "tag-url");

    tree.set_text_content(pre, "https://a.test/tag/one");
    tree.set_text_content(pre, "https://a.test/tag/two");

    assert_eq!(tree.text_content(pre), "https://a.test/tag/two");
    assert_eq!(tree.children(pre).len(), 1);
}

#[test]
fn test_set_text_content_empty_removes_children() {
    let mut tree = DomTree::with_skeleton();
    let pre = append_with_id(&mut tree, "pre", "tag-url");
    tree.set_text_content(pre, "x");
    tree.set_text_content(pre, "");
    assert!(tree.children(pre).is_empty());
    assert_eq!(tree.text_content(pre), "");
}

#[test]
fn test_text_content_concatenates_descendants() {
    let mut tree = DomTree::with_skeleton();
    let pre = append_with_id(&mut tree, "pre", "p");
    let span = tree.create_element("span");
    tree.append_child(pre, span);
    tree.set_text_content(span, "b");
    let text = tree.alloc(urlgen_dom::NodeType::Text("a".to_string()));
    tree.append_child(pre, text);
    assert_eq!(tree.text_content(pre), "ba");
}

// ========== values ==========

#[test]
fn test_value_round_trips_and_defaults_empty() {
    let mut tree = DomTree::with_skeleton();
    let input = append_with_id(&mut tree, "input", "tag");
    assert!(tree.value(input).unwrap().is_empty());

    tree.set_value(input, DomString::from("#music"));
    assert_eq!(tree.value(input).unwrap().to_string(), "#music");
}

#[test]
fn test_value_on_text_node_is_none() {
    let mut tree = DomTree::new();
    let text = tree.alloc(urlgen_dom::NodeType::Text("t".to_string()));
    assert_eq!(tree.value(text), None);
}

#[test]
fn test_dom_string_keeps_lone_surrogates() {
    let s = DomString::from_code_units(vec![0x61, 0xD800]);
    assert_eq!(s.len(), 2);
    assert_eq!(s.to_string_lossy(), "a\u{FFFD}");
}
