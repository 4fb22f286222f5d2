//! WalkNode definition.
//!
//! A [`WalkNode`] is an immutable snapshot of one position in a walked
//! structure: the value found there, how it was reached, and what kind of
//! value it is. Relatives (children, siblings, ancestors, descendants) are
//! derived on demand from the current contents of the structure.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::observer::ObserverId;
use crate::{NodeType, Value};

/// Shared handle to a node.
pub type NodeRef = Arc<WalkNode>;

/// Identifier of a node instance.
///
/// Unique among the nodes created from one [`NodeIdSource`]. Two nodes for
/// the same value get different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of node ids, owned by one walk.
#[derive(Debug, Default)]
pub struct NodeIdSource {
    last: AtomicU64,
}

impl NodeIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id. The first id is `#1`.
    pub fn next_id(&self) -> NodeId {
        NodeId(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Key under which a node is stored in its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// Object member name.
    Name(String),
    /// Array index.
    Index(usize),
}

impl NodeKey {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            NodeKey::Name(name) => Some(name),
            NodeKey::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            NodeKey::Index(index) => Some(*index),
            NodeKey::Name(_) => None,
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Name(name) => f.write_str(name),
            NodeKey::Index(index) => write!(f, "{index}"),
        }
    }
}

/// One path segment handed to a path formatter.
#[derive(Debug, Clone, Copy)]
pub struct PathSegment<'a> {
    pub key: &'a NodeKey,
    pub is_array_member: bool,
}

/// Default segment format: `[0]` for array members, `["key"]` for object members.
pub fn default_path_format(segment: &PathSegment<'_>) -> String {
    if segment.is_array_member {
        format!("[{}]", segment.key)
    } else {
        format!("[\"{}\"]", segment.key)
    }
}

/// A positioned reference to a value in the walked structure.
pub struct WalkNode {
    id: NodeId,
    value: Value,
    parent: Option<NodeRef>,
    key: Option<NodeKey>,
    is_array_member: bool,
    node_type: NodeType,
    ids: Arc<NodeIdSource>,
    executed: Mutex<Vec<ObserverId>>,
}

impl WalkNode {
    /// Creates a root node with a fresh id source.
    pub fn from_root(value: Value) -> NodeRef {
        Self::from_root_with_ids(value, Arc::new(NodeIdSource::new()))
    }

    /// Creates a root node drawing ids from `ids`.
    ///
    /// Every node derived from the root shares the same id source.
    pub fn from_root_with_ids(value: Value, ids: Arc<NodeIdSource>) -> NodeRef {
        Arc::new(Self {
            id: ids.next_id(),
            node_type: NodeType::of(&value),
            value,
            parent: None,
            key: None,
            is_array_member: false,
            ids,
            executed: Mutex::new(Vec::new()),
        })
    }

    /// Creates the node for member `key` of `parent`.
    ///
    /// A missing member yields an `Undefined` value.
    pub fn from_object_key(parent: &NodeRef, key: impl Into<String>) -> NodeRef {
        let key = key.into();
        let value = parent
            .value
            .as_object()
            .and_then(|object| object.get(&key))
            .unwrap_or_default();
        Self::child(parent, NodeKey::Name(key), value)
    }

    /// Creates the node for item `index` of `parent`.
    ///
    /// An index past the end yields an `Undefined` value.
    pub fn from_array_index(parent: &NodeRef, index: usize) -> NodeRef {
        let value = parent
            .value
            .as_array()
            .and_then(|array| array.get(index))
            .unwrap_or_default();
        Self::child(parent, NodeKey::Index(index), value)
    }

    fn child(parent: &NodeRef, key: NodeKey, value: Value) -> NodeRef {
        Arc::new(Self {
            id: parent.ids.next_id(),
            node_type: NodeType::of(&value),
            is_array_member: matches!(key, NodeKey::Index(_)),
            value,
            parent: Some(Arc::clone(parent)),
            key: Some(key),
            ids: Arc::clone(&parent.ids),
            executed: Mutex::new(Vec::new()),
        })
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn parent(&self) -> Option<&NodeRef> {
        self.parent.as_ref()
    }

    /// Key in the parent; `None` for the root.
    #[inline]
    pub fn key(&self) -> Option<&NodeKey> {
        self.key.as_ref()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn is_array_member(&self) -> bool {
        self.is_array_member
    }

    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Runtime type name of the value (`"number"`, `"object"`, ...).
    #[inline]
    pub fn raw_type(&self) -> &'static str {
        self.value.type_name()
    }

    /// Returns true if the value takes part in repeat detection.
    ///
    /// Only arrays and objects qualify; null, undefined and NaN never do.
    #[inline]
    pub fn can_be_compared(&self) -> bool {
        self.node_type.is_container()
    }

    /// Path from the root using the default segment format.
    pub fn path(&self) -> String {
        self.path_with(default_path_format)
    }

    /// Path from the root rendered with a custom segment formatter.
    ///
    /// The root's path is the empty string.
    pub fn path_with<F>(&self, format: F) -> String
    where
        F: Fn(&PathSegment<'_>) -> String,
    {
        let mut chain: Vec<&WalkNode> = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            chain.push(node);
            current = node.parent.as_deref();
        }

        chain
            .iter()
            .rev()
            .filter_map(|node| {
                node.key.as_ref().map(|key| PathSegment {
                    key,
                    is_array_member: node.is_array_member,
                })
            })
            .map(|segment| format(&segment))
            .collect()
    }

    /// Children built from the value as it is now.
    ///
    /// Nothing is cached: calling this after the structure changed reflects the change.
    pub fn children(self: &Arc<Self>) -> Vec<NodeRef> {
        match &self.value {
            Value::Array(array) => (0..array.len())
                .map(|index| Self::from_array_index(self, index))
                .collect(),
            Value::Object(object) => object
                .keys()
                .into_iter()
                .map(|key| Self::from_object_key(self, key))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The parent's other children.
    pub fn siblings(&self) -> Vec<NodeRef> {
        let Some(parent) = &self.parent else {
            return Vec::new();
        };
        parent
            .children()
            .into_iter()
            .filter(|child| child.key != self.key)
            .collect()
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef> + '_ {
        std::iter::successors(self.parent.clone(), |node| node.parent.clone())
    }

    /// All nodes below this one in pre-order.
    ///
    /// Never ends on a cyclic structure.
    pub fn descendants(self: &Arc<Self>) -> Descendants {
        let mut stack = self.children();
        stack.reverse();
        Descendants { stack }
    }

    /// Ids of the observers that ran on this node, when tracking is enabled.
    pub fn executed_observers(&self) -> Vec<ObserverId> {
        self.executed.lock().clone()
    }

    pub(crate) fn record_execution(&self, observer: ObserverId) {
        self.executed.lock().push(observer);
    }
}

impl fmt::Debug for WalkNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkNode")
            .field("id", &self.id)
            .field("path", &self.path())
            .field("node_type", &self.node_type)
            .field("value", &self.value)
            .finish()
    }
}

/// Pre-order iterator over a node's descendants.
#[derive(Debug)]
pub struct Descendants {
    stack: Vec<NodeRef>,
}

impl Iterator for Descendants {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let mut children = node.children();
        children.reverse();
        self.stack.extend(children);
        Some(node)
    }
}
