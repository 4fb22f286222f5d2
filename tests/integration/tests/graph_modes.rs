//! Integration tests for shared and cyclic structures

use std::cell::Cell;

use rstest::rstest;
use treewalk_core::{
    GraphMode, IdentityRegister, SyncObserver, SyncWalkConfig, Timing, Value, WalkError,
    WalkOptions, stop, walk, walk_step,
};

/// `a.b = b; b.a = a`, returning `a`.
fn mutual_cycle() -> Value {
    let a = Value::new_object();
    let b = Value::new_object();
    if let (Some(a_map), Some(b_map)) = (a.as_object(), b.as_object()) {
        a_map.insert("b", b.clone());
        b_map.insert("a", a.clone());
    }
    a
}

fn paths(value: &Value, mode: GraphMode) -> Result<Vec<String>, WalkError> {
    walk_step(value, SyncWalkConfig::new(WalkOptions::new().graph_mode(mode)))?
        .map(|node| node.map(|node| node.path()))
        .collect()
}

mod cycles {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn graph_mode_visits_each_container_once() {
        let visited = paths(&mutual_cycle(), GraphMode::Graph).unwrap();

        assert_eq!(visited, vec!["", "[\"b\"]"]);
    }

    #[test]
    fn finite_tree_mode_rejects_cycle() {
        let err = paths(&mutual_cycle(), GraphMode::FiniteTree).unwrap_err();

        match err {
            WalkError::StructuralViolation { path } => assert_eq!(path, "[\"b\"][\"a\"]"),
            other => panic!("expected structural violation, got {:?}", other),
        }
    }

    #[rstest]
    #[case::tree(GraphMode::Tree, 1)]
    #[case::tree(GraphMode::Tree, 7)]
    #[case::infinite(GraphMode::Infinite, 4)]
    #[case::infinite(GraphMode::Infinite, 25)]
    fn unbounded_modes_stop_after_n_visits(#[case] mode: GraphMode, #[case] limit: usize) {
        let calls = Cell::new(0);
        let config = SyncWalkConfig::new(WalkOptions::new().graph_mode(mode)).observer(
            SyncObserver::new(|_| {
                calls.set(calls.get() + 1);
                if calls.get() > limit { stop() } else { Ok(()) }
            }),
        );

        let yielded = walk_step(&mutual_cycle(), config).unwrap().count();

        assert_eq!(yielded, limit);
    }

    #[test]
    fn graph_mode_post_visit_fires_for_every_visited_node() {
        let post = Cell::new(0);
        let config = SyncWalkConfig::new(WalkOptions::new().graph_mode(GraphMode::Graph)).observer(
            SyncObserver::new(|_| {
                post.set(post.get() + 1);
                Ok(())
            })
            .with_timing(Timing::PostVisit),
        );

        walk(&mutual_cycle(), config).unwrap();

        assert_eq!(post.get(), 2);
    }
}

mod shared_references {
    use super::*;
    use pretty_assertions::assert_eq;

    fn diamond() -> Value {
        let shared = Value::array([Value::from(1)]);
        Value::object([("left", shared.clone()), ("right", shared)])
    }

    #[rstest]
    #[case::tree(GraphMode::Tree, 5)]
    #[case::infinite(GraphMode::Infinite, 5)]
    #[case::graph(GraphMode::Graph, 3)]
    fn shared_subtree_visits(#[case] mode: GraphMode, #[case] expected: usize) {
        assert_eq!(paths(&diamond(), mode).unwrap().len(), expected);
    }

    #[test]
    fn structurally_equal_values_are_not_repeats() {
        let value = Value::array([Value::new_object(), Value::new_object(), Value::Null, Value::Null]);

        assert_eq!(paths(&value, GraphMode::FiniteTree).unwrap().len(), 5);
    }

    #[test]
    fn caller_register_persists_between_walks() {
        let shared = Value::new_array();
        let mut register = IdentityRegister::new();

        let first = SyncWalkConfig::new(WalkOptions::new().graph_mode(GraphMode::Graph))
            .visitation_register(&mut register);
        walk(&Value::array([shared.clone()]), first).unwrap();
        assert_eq!(register.len(), 2);

        let second = SyncWalkConfig::new(WalkOptions::new().graph_mode(GraphMode::Graph))
            .visitation_register(&mut register);
        let count = walk_step(&Value::array([shared]), second).unwrap().count();

        // Only the new root; the shared array was seen by the first walk.
        assert_eq!(count, 1);
    }

    #[rstest]
    #[case::tree(GraphMode::Tree)]
    #[case::infinite(GraphMode::Infinite)]
    fn unbounded_walk_marks_containers_seen(#[case] mode: GraphMode) {
        let shared = Value::new_array();
        let mut register = IdentityRegister::new();

        let first = SyncWalkConfig::new(WalkOptions::new().graph_mode(mode))
            .visitation_register(&mut register);
        walk(&Value::array([shared.clone()]), first).unwrap();
        assert_eq!(register.len(), 2);

        let second = SyncWalkConfig::new(WalkOptions::new().graph_mode(GraphMode::Graph))
            .visitation_register(&mut register);
        let count = walk_step(&Value::array([shared]), second).unwrap().count();

        assert_eq!(count, 1);
    }
}
