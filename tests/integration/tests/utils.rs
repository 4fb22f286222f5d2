//! Integration tests for the collaborator utilities

use serde_json::json;
use treewalk_core::{Value, WalkNode};
use treewalk_utils::{CompareOptions, Difference, compare, deep_copy, find_all, flatten, reduce};

fn container_ids(value: &Value) -> Vec<usize> {
    let root = WalkNode::from_root(value.clone());
    std::iter::once(root.clone())
        .chain(root.descendants())
        .filter_map(|node| node.value().identity())
        .collect()
}

mod deep_copy_behaviour {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn copy_is_deeply_equal_with_no_shared_containers() {
        let source = Value::object([
            ("list", Value::from(json!([1, [2, 3], {"k": "v"}]))),
            ("undefined", Value::Undefined),
            ("nan", Value::from(f64::NAN)),
            ("null", Value::Null),
        ]);

        let copy = deep_copy(&source).unwrap();

        let source_ids = container_ids(&source);
        let copy_ids = container_ids(&copy);
        assert_eq!(copy_ids.len(), source_ids.len());
        assert!(copy_ids.iter().all(|id| !source_ids.contains(id)));

        let object = copy.as_object().unwrap();
        assert_eq!(object.keys(), vec!["list", "undefined", "nan", "null"]);
        assert!(object.get("undefined").unwrap().is_undefined());
        assert!(object.get("nan").unwrap().is_nan());
        assert!(object.get("null").unwrap().is_null());
        assert_eq!(
            object.get("list").unwrap().to_json().unwrap(),
            json!([1, [2, 3], {"k": "v"}])
        );
    }

    #[test]
    fn copy_then_compare_finds_nothing_at_leaves() {
        let source = Value::from(json!({"a": {"b": [1, "two", null]}}));
        let copy = deep_copy(&source).unwrap();

        let diff = compare(&source, &copy, &CompareOptions::new().leaves_only(true)).unwrap();

        assert_eq!(diff.len(), 3);
        assert!(diff.iter().all(|entry| !entry.has_difference));
    }
}

mod compare_behaviour {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leaves_only_reports_single_changed_leaf() {
        let a = Value::from(json!({"x": {"y": 1}}));
        let b = Value::from(json!({"x": {"y": 2}}));

        let diff = compare(&a, &b, &CompareOptions::new().leaves_only(true)).unwrap();

        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].path, ".x.y");
        match &diff[0].difference {
            Some(Difference::Changed { before, after }) => {
                assert_eq!(before.as_f64(), Some(1.0));
                assert_eq!(after.as_f64(), Some(2.0));
            }
            other => panic!("expected a change, got {:?}", other),
        }
    }

    #[test]
    fn every_path_without_leaves_only() {
        let a = Value::from(json!({"x": [1]}));
        let b = Value::from(json!({"z": true}));

        let diff = compare(&a, &b, &CompareOptions::new()).unwrap();
        let paths: Vec<&str> = diff.iter().map(|entry| entry.path.as_str()).collect();

        assert_eq!(paths, vec!["", ".x", ".x[0]", ".z"]);
        assert!(matches!(diff[1].difference, Some(Difference::Removed)));
        assert!(matches!(diff[3].difference, Some(Difference::Added)));
    }
}

mod search_behaviour {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flatten_and_find_all() {
        let value = Value::from(json!({
            "users": [{"name": "ann", "age": 31}, {"name": "bob", "age": 31}, {"name": "ann"}]
        }));

        let names: Vec<String> = flatten(&value, "name", true)
            .unwrap()
            .iter()
            .filter_map(|name| name.as_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["ann", "bob"]);

        assert_eq!(find_all(&value, &Value::from(31)).unwrap().len(), 2);
    }

    #[test]
    fn reduce_counts_nodes_by_type() {
        let value = Value::from(json!({"a": [1, 2], "b": {"c": null}}));

        let (containers, leaves) = reduce(&value, (0, 0), |(containers, leaves), node| {
            if node.can_be_compared() {
                (containers + 1, leaves)
            } else {
                (containers, leaves + 1)
            }
        })
        .unwrap();

        assert_eq!((containers, leaves), (3, 3));
    }
}
