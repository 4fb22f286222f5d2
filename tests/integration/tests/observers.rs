//! Integration tests for observer selection and ordering

use std::cell::RefCell;

use serde_json::json;
use treewalk_core::{
    NodeType, SyncObserver, SyncWalkConfig, Timing, Value, WalkBuilder, WalkOptions,
    filters, walk, walk_step,
};

mod ordering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equal_orders_run_in_registration_order() {
        let log = RefCell::new(Vec::new());
        let sink = &log;
        let labelled = move |label: &'static str, order: i32| {
            SyncObserver::new(move |_| {
                sink.borrow_mut().push(label);
                Ok(())
            })
            .with_execution_order(order)
        };

        let config = SyncWalkConfig::default()
            .observer(labelled("late", 10))
            .observer(labelled("first-zero", 0))
            .observer(labelled("early", -3))
            .observer(labelled("second-zero", 0))
            .observer(labelled("third-zero", 0));
        walk(&Value::Null, config).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["early", "first-zero", "second-zero", "third-zero", "late"]
        );
    }

    #[test]
    fn both_timing_runs_twice_on_childless_node() {
        let log = RefCell::new(Vec::new());
        let config = SyncWalkConfig::default()
            .observer(
                SyncObserver::new(|node| {
                    log.borrow_mut().push(format!("both {}", node.path()));
                    Ok(())
                })
                .with_timing(Timing::Both)
                .with_filter(filters::not_root()),
            )
            .observer(
                SyncObserver::new(|node| {
                    log.borrow_mut().push(format!("pre {}", node.path()));
                    Ok(())
                })
                .with_execution_order(1)
                .with_filter(filters::not_root()),
            );

        walk(&Value::from(json!({"leaf": 1})), config).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["both [\"leaf\"]", "pre [\"leaf\"]", "both [\"leaf\"]"]
        );
    }
}

mod selection {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn filters_combine_with_and() {
        let hits = RefCell::new(Vec::new());
        let config = SyncWalkConfig::default().observer(
            SyncObserver::new(|node| {
                hits.borrow_mut().push(node.path());
                Ok(())
            })
            .with_filter(filters::keys_in(["name", "tags"]))
            .with_filter(filters::node_type_is(NodeType::Value)),
        );

        walk(
            &Value::from(json!({"name": "root", "tags": ["x"], "child": {"name": "leaf", "tags": "y"}})),
            config,
        )
        .unwrap();

        assert_eq!(
            *hits.borrow(),
            vec!["[\"name\"]", "[\"child\"][\"name\"]", "[\"child\"][\"tags\"]"]
        );
    }

    #[test]
    fn root_callbacks_can_be_disabled() {
        let count = RefCell::new(0);
        let config = SyncWalkConfig::new(WalkOptions::new().root_object_callbacks(false)).observer(
            SyncObserver::new(|node| {
                assert!(!node.is_root());
                *count.borrow_mut() += 1;
                Ok(())
            })
            .with_timing(Timing::Both),
        );

        walk(&Value::from(json!([1, 2])), config).unwrap();

        assert_eq!(*count.borrow(), 4);
    }

    #[test]
    fn executed_observers_are_tracked_per_node() {
        let nodes = walk_step(
            &Value::from(json!({"a": 1})),
            WalkBuilder::new()
                .with_tracked_observers(true)
                .with_observer(SyncObserver::new(|_| Ok(())).with_filter(filters::not_root()))
                .with_observer(SyncObserver::new(|_| Ok(())).with_timing(Timing::Both))
                .into_config(),
        )
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

        let executed: Vec<Vec<usize>> = nodes
            .iter()
            .map(|node| node.executed_observers().iter().map(|id| id.index()).collect())
            .collect();
        assert_eq!(executed, vec![vec![1, 1], vec![0, 1, 1]]);
    }

    #[test]
    fn tracking_is_off_by_default() {
        let nodes: Vec<_> = walk_step(
            &Value::from(json!([1])),
            SyncWalkConfig::default().observer(SyncObserver::new(|_| Ok(()))),
        )
        .unwrap()
        .map(|node| node.unwrap())
        .collect();

        assert!(nodes.iter().all(|node| node.executed_observers().is_empty()));
    }
}

mod paths {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn custom_segment_formatter() {
        let leaf = walk_step(&Value::from(json!({"a": [{"b": 1}]})), SyncWalkConfig::default())
            .unwrap()
            .map(|node| node.unwrap())
            .last()
            .unwrap();

        let pointer = leaf.path_with(|segment| format!("/{}", segment.key));
        let dotted = leaf.path_with(|segment| {
            if segment.is_array_member {
                format!("[{}]", segment.key)
            } else {
                format!(".{}", segment.key)
            }
        });

        assert_eq!(leaf.path(), "[\"a\"][0][\"b\"]");
        assert_eq!(pointer, "/a/0/b");
        assert_eq!(dotted, ".a[0].b");
    }
}
