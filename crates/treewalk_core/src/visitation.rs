//! Repeat detection for shared and cyclic structures.

use std::collections::HashMap;

use crate::Value;
use crate::node::WalkNode;

/// Tracks which containers a walk has already reached.
///
/// The walker only consults a register for nodes where
/// [`WalkNode::can_be_compared`] is true. Implemented for `&mut R`, so one
/// register can be lent to several walks that should share repeat state.
pub trait VisitationRegister {
    /// Returns true if the node's value was registered before.
    fn object_has_been_seen(&self, node: &WalkNode) -> bool;

    /// Records the node's value as seen.
    fn register_object_visit(&mut self, node: &WalkNode);
}

/// Reference-identity set of visited containers.
///
/// Holds a handle to every registered container so an identity cannot be
/// reused by a new allocation while it is tracked.
#[derive(Debug, Default)]
pub struct IdentityRegister {
    seen: HashMap<usize, Value>,
}

impl IdentityRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct containers registered.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

impl VisitationRegister for IdentityRegister {
    fn object_has_been_seen(&self, node: &WalkNode) -> bool {
        node.value()
            .identity()
            .is_some_and(|identity| self.seen.contains_key(&identity))
    }

    fn register_object_visit(&mut self, node: &WalkNode) {
        if let Some(identity) = node.value().identity() {
            self.seen.insert(identity, node.value().clone());
        }
    }
}

impl<R: VisitationRegister + ?Sized> VisitationRegister for &mut R {
    fn object_has_been_seen(&self, node: &WalkNode) -> bool {
        (**self).object_has_been_seen(node)
    }

    fn register_object_visit(&mut self, node: &WalkNode) {
        (**self).register_object_visit(node)
    }
}
