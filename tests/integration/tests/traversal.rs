//! Integration tests for visit order
//!
//! Compares the walker's pre-visit and post-visit sequences against orders
//! computed independently from the JSON source.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rstest::rstest;
use serde_json::{Value as Json, json};
use treewalk_core::{
    NodeType, SyncObserver, SyncWalkConfig, Timing, TraversalMode, Value, WalkOptions, walk,
    walk_step,
};

fn children(value: &Json) -> Vec<(String, &Json)> {
    match value {
        Json::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| (format!("[{}]", index), item))
            .collect(),
        Json::Object(members) => members
            .iter()
            .map(|(key, member)| (format!("[\"{}\"]", key), member))
            .collect(),
        _ => Vec::new(),
    }
}

fn pre_order(value: &Json, path: String, out: &mut Vec<String>) {
    out.push(path.clone());
    for (segment, child) in children(value) {
        pre_order(child, format!("{}{}", path, segment), out);
    }
}

fn post_order(value: &Json, path: String, out: &mut Vec<String>) {
    for (segment, child) in children(value) {
        post_order(child, format!("{}{}", path, segment), out);
    }
    out.push(path);
}

fn level_order(value: &Json) -> Vec<String> {
    let mut out = Vec::new();
    let mut queue = VecDeque::from([(String::new(), value)]);
    while let Some((path, value)) = queue.pop_front() {
        for (segment, child) in children(value) {
            queue.push_back((format!("{}{}", path, segment), child));
        }
        out.push(path);
    }
    out
}

fn record(value: &Json, mode: TraversalMode) -> (Vec<String>, Vec<String>) {
    let pre = Rc::new(RefCell::new(Vec::new()));
    let post = Rc::new(RefCell::new(Vec::new()));
    let (pre_sink, post_sink) = (Rc::clone(&pre), Rc::clone(&post));

    let config = SyncWalkConfig::new(WalkOptions::new().traversal_mode(mode))
        .observer(SyncObserver::new(move |node| {
            pre_sink.borrow_mut().push(node.path());
            Ok(())
        }))
        .observer(
            SyncObserver::new(move |node| {
                post_sink.borrow_mut().push(node.path());
                Ok(())
            })
            .with_timing(Timing::PostVisit),
        );

    walk(&Value::from(value.clone()), config).unwrap();

    let pre = pre.borrow().clone();
    let post = post.borrow().clone();
    (pre, post)
}

fn fixtures() -> Vec<Json> {
    vec![
        json!(42),
        json!([]),
        json!({"a": {"b": 1}}),
        json!({"a": [1, [2, 3], {"b": null}], "c": {"d": {"e": "f"}}, "g": []}),
        json!([[[[]]], {"x": [true, false]}, "tail"]),
    ]
}

mod depth_first {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pre_and_post_match_reference_orders() {
        for fixture in fixtures() {
            let (pre, post) = record(&fixture, TraversalMode::Depth);

            let mut expected_pre = Vec::new();
            pre_order(&fixture, String::new(), &mut expected_pre);
            let mut expected_post = Vec::new();
            post_order(&fixture, String::new(), &mut expected_post);

            assert_eq!(pre, expected_pre, "pre-order of {}", fixture);
            assert_eq!(post, expected_post, "post-order of {}", fixture);
        }
    }

    #[test]
    fn emitted_sequence_is_pre_order() {
        let fixture = json!({"a": [1, 2], "b": {"c": 3}});
        let mut expected = Vec::new();
        pre_order(&fixture, String::new(), &mut expected);

        let emitted: Vec<String> = walk_step(&Value::from(fixture), SyncWalkConfig::default())
            .unwrap()
            .map(|node| node.unwrap().path())
            .collect();

        assert_eq!(emitted, expected);
    }
}

mod breadth_first {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pre_and_post_are_level_order() {
        for fixture in fixtures() {
            let (pre, post) = record(&fixture, TraversalMode::Breadth);
            let expected = level_order(&fixture);

            assert_eq!(pre, expected, "pre-visit of {}", fixture);
            assert_eq!(post, expected, "post-visit of {}", fixture);
        }
    }
}

mod node_coverage {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_object_visits_three_nodes() {
        let count = walk_step(&Value::from(json!({"a": {"b": 1}})), SyncWalkConfig::default())
            .unwrap()
            .count();

        assert_eq!(count, 3);
    }

    #[test]
    fn special_sibling_values_are_each_visited() {
        let value = Value::object([
            ("null_a", Value::Null),
            ("null_b", Value::Null),
            ("nan_a", Value::from(f64::NAN)),
            ("nan_b", Value::from(f64::NAN)),
            ("undefined_a", Value::Undefined),
            ("undefined_b", Value::Undefined),
        ]);

        let visited: Vec<(String, &'static str)> = walk_step(&value, SyncWalkConfig::default())
            .unwrap()
            .map(|node| node.unwrap())
            .filter(|node| !node.is_root())
            .map(|node| (node.path(), node.raw_type()))
            .collect();

        assert_eq!(
            visited,
            vec![
                ("[\"null_a\"]".to_string(), "null"),
                ("[\"null_b\"]".to_string(), "null"),
                ("[\"nan_a\"]".to_string(), "number"),
                ("[\"nan_b\"]".to_string(), "number"),
                ("[\"undefined_a\"]".to_string(), "undefined"),
                ("[\"undefined_b\"]".to_string(), "undefined"),
            ]
        );
    }

    #[rstest]
    #[case::array(json!([1]), NodeType::Array)]
    #[case::object(json!({}), NodeType::Object)]
    #[case::null(json!(null), NodeType::Value)]
    #[case::string(json!("s"), NodeType::Value)]
    fn root_node_type(#[case] source: Json, #[case] expected: NodeType) {
        let root = walk_step(&Value::from(source), SyncWalkConfig::default())
            .unwrap()
            .next()
            .unwrap()
            .unwrap();

        assert_eq!(root.node_type(), expected);
    }
}
