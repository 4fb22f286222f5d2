//! Path-keyed structural diff.
//!
//! Both values are walked and their nodes indexed by path. Paths are then
//! matched up: a path only in `a` was removed, a path only in `b` was added,
//! and a path in both is changed when the node comparison says the two
//! nodes differ.

use indexmap::IndexMap;
use tracing::debug;
use treewalk_core::{NodeRef, NodeType, PathSegment, Result, Value, WalkNode};

use crate::apply::apply;

/// Renders a path segment as `[i]` for array items and `.key` for members.
pub fn dotted_segment(segment: &PathSegment<'_>) -> String {
    if segment.is_array_member {
        format!("[{}]", segment.key)
    } else {
        format!(".{}", segment.key)
    }
}

type SegmentFormatter<'a> = Box<dyn Fn(&PathSegment<'_>) -> String + 'a>;
type NodeComparisonFn<'a> = Box<dyn Fn(&WalkNode, &WalkNode) -> bool + 'a>;

/// How [`compare`] matches and compares nodes.
pub struct CompareOptions<'a> {
    leaves_only: bool,
    formatter: SegmentFormatter<'a>,
    node_comparison: NodeComparisonFn<'a>,
}

impl<'a> CompareOptions<'a> {
    /// Every path, dotted segments, `same_value` comparison.
    pub fn new() -> Self {
        Self {
            leaves_only: false,
            formatter: Box::new(dotted_segment),
            node_comparison: Box::new(|a: &WalkNode, b: &WalkNode| a.value().same_value(b.value())),
        }
    }

    /// Only report paths whose node is a scalar.
    pub fn leaves_only(mut self, yes: bool) -> Self {
        self.leaves_only = yes;
        self
    }

    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&PathSegment<'_>) -> String + 'a,
    {
        self.formatter = Box::new(formatter);
        self
    }

    /// Replaces the test deciding whether two nodes at the same path are equal.
    pub fn with_node_comparison<F>(mut self, comparison: F) -> Self
    where
        F: Fn(&WalkNode, &WalkNode) -> bool + 'a,
    {
        self.node_comparison = Box::new(comparison);
        self
    }
}

impl Default for CompareOptions<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CompareOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompareOptions")
            .field("leaves_only", &self.leaves_only)
            .finish_non_exhaustive()
    }
}

/// What happened at a path.
#[derive(Debug, Clone)]
pub enum Difference {
    /// Only in `b`.
    Added,
    /// Only in `a`.
    Removed,
    Changed { before: Value, after: Value },
}

/// One compared path.
///
/// `a` and `b` are only filled in when there is a difference, and only for
/// the sides that have the path.
#[derive(Debug, Clone)]
pub struct NodeComparison {
    pub path: String,
    pub a: Option<Value>,
    pub b: Option<Value>,
    pub has_difference: bool,
    pub difference: Option<Difference>,
}

/// Compares `a` and `b` path by path.
///
/// Entries come in walk order of `a`, followed by the paths found only in `b`
/// in walk order of `b`.
pub fn compare(a: &Value, b: &Value, options: &CompareOptions<'_>) -> Result<Vec<NodeComparison>> {
    let a_nodes = index_by_path(a, options)?;
    let b_nodes = index_by_path(b, options)?;

    let paths = a_nodes
        .keys()
        .chain(b_nodes.keys().filter(|path| !a_nodes.contains_key(*path)));

    let comparisons: Vec<NodeComparison> = paths
        .filter_map(|path| {
            let a_node = a_nodes.get(path);
            let b_node = b_nodes.get(path);
            let node = a_node.or(b_node)?;
            if options.leaves_only && node.node_type() != NodeType::Value {
                return None;
            }
            Some(compare_nodes(path, a_node, b_node, options))
        })
        .collect();

    debug!(
        "Compared {} paths, {} with differences",
        comparisons.len(),
        comparisons.iter().filter(|entry| entry.has_difference).count()
    );
    Ok(comparisons)
}

fn index_by_path(value: &Value, options: &CompareOptions<'_>) -> Result<IndexMap<String, NodeRef>> {
    let mut nodes = IndexMap::new();
    apply(value, |node| {
        nodes.insert(node.path_with(&options.formatter), node.clone());
        Ok(())
    })?;
    Ok(nodes)
}

fn compare_nodes(
    path: &str,
    a: Option<&NodeRef>,
    b: Option<&NodeRef>,
    options: &CompareOptions<'_>,
) -> NodeComparison {
    let mut entry = NodeComparison {
        path: path.to_string(),
        a: None,
        b: None,
        has_difference: false,
        difference: None,
    };

    match (a, b) {
        (Some(a), None) => {
            entry.a = Some(a.value().clone());
            entry.difference = Some(Difference::Removed);
        }
        (None, Some(b)) => {
            entry.b = Some(b.value().clone());
            entry.difference = Some(Difference::Added);
        }
        (Some(a), Some(b)) if !(options.node_comparison)(a, b) => {
            entry.a = Some(a.value().clone());
            entry.b = Some(b.value().clone());
            entry.difference = Some(Difference::Changed {
                before: a.value().clone(),
                after: b.value().clone(),
            });
        }
        _ => {}
    }

    entry.has_difference = entry.difference.is_some();
    entry
}
