//! Common observer predicates.
//!
//! Observer selection is done entirely through predicates. These
//! constructors cover the usual cases and compose with
//! [`Observer::with_filter`](crate::Observer::with_filter).

use crate::NodeType;
use crate::node::WalkNode;

/// Matches every node except the root.
pub fn not_root() -> impl Fn(&WalkNode) -> bool + Send + Sync + 'static {
    |node| !node.is_root()
}

/// Matches nodes that are array items.
pub fn is_array_member() -> impl Fn(&WalkNode) -> bool + Send + Sync + 'static {
    |node| node.is_array_member()
}

/// Matches object members named `key`. Array items never match.
pub fn key_is(key: impl Into<String>) -> impl Fn(&WalkNode) -> bool + Send + Sync + 'static {
    let key = key.into();
    move |node| node.key().and_then(|k| k.as_name()) == Some(key.as_str())
}

/// Matches object members whose name is one of `keys`. Array items never match.
pub fn keys_in<I, K>(keys: I) -> impl Fn(&WalkNode) -> bool + Send + Sync + 'static
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
    move |node| {
        node.key()
            .and_then(|k| k.as_name())
            .is_some_and(|name| keys.iter().any(|key| key == name))
    }
}

/// Matches nodes of the given type.
pub fn node_type_is(node_type: NodeType) -> impl Fn(&WalkNode) -> bool + Send + Sync + 'static {
    move |node| node.node_type() == node_type
}

/// Matches nodes whose type is one of `types`.
pub fn node_types_in(
    types: impl IntoIterator<Item = NodeType>,
) -> impl Fn(&WalkNode) -> bool + Send + Sync + 'static {
    let types: Vec<NodeType> = types.into_iter().collect();
    move |node| types.contains(&node.node_type())
}
