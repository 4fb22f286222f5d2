//! Traversal engine.
//!
//! The walker pulls nodes off a queue, decides what to do about repeated
//! references, enqueues children and hands each visited node to dispatch.
//! Both the synchronous [`WalkStep`] and the asynchronous [`AsyncWalkStep`]
//! share the queue logic in [`Traversal`]; they differ only in how observers
//! are awaited.

mod async_walk;
mod sync_walk;

pub use async_walk::AsyncWalkStep;
pub use sync_walk::WalkStep;

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::trace;

use crate::config::{AsyncWalkConfig, GraphMode, SyncWalkConfig, TraversalMode};
use crate::context::Context;
use crate::error::{Result, WalkError};
use crate::node::{NodeRef, WalkNode};
use crate::value::Value;

/// Walks `value`, running every observer in `config`.
///
/// Returns once the queue is empty or an observer requested a stop.
pub fn walk(value: &Value, config: SyncWalkConfig<'_>) -> Result<()> {
    for node in walk_step(value, config)? {
        node?;
    }
    Ok(())
}

/// Returns the walk as a lazy sequence of nodes.
///
/// Nothing is visited until the first call to `next`. Options are validated
/// up front.
pub fn walk_step<'a>(value: &Value, config: SyncWalkConfig<'a>) -> Result<WalkStep<'a>> {
    let ctx = Context::build(config, false)?;
    Ok(WalkStep::new(value, ctx))
}

/// Asynchronous [`walk`].
pub async fn walk_async(value: &Value, config: AsyncWalkConfig<'_>) -> Result<()> {
    let mut step = walk_async_step(value, config)?;
    while let Some(node) = step.next_node().await {
        node?;
    }
    Ok(())
}

/// Asynchronous [`walk_step`].
pub fn walk_async_step<'a>(value: &Value, config: AsyncWalkConfig<'a>) -> Result<AsyncWalkStep<'a>> {
    let ctx = Context::build(config, true)?;
    Ok(AsyncWalkStep::new(value, ctx))
}

/// Outcome of pulling one queue entry.
#[derive(Debug)]
pub(crate) enum Step {
    /// The node is visited. `deferred` is set when its post-visit waits on
    /// its last child.
    Visit { node: NodeRef, deferred: bool },
    /// A repeated reference skipped in graph mode.
    Skip(NodeRef),
}

/// Queue of nodes still to visit.
#[derive(Debug)]
pub(crate) struct Traversal {
    queue: VecDeque<NodeRef>,
}

impl Traversal {
    pub(crate) fn new<C>(value: &Value, ctx: &Context<'_, C>) -> Self {
        let root = WalkNode::from_root_with_ids(value.clone(), Arc::clone(&ctx.ids));
        Self {
            queue: VecDeque::from([root]),
        }
    }

    /// Pops the next entry and enqueues its children.
    pub(crate) fn advance<C>(&mut self, ctx: &mut Context<'_, C>) -> Result<Option<Step>> {
        let Some(node) = self.queue.pop_front() else {
            return Ok(None);
        };

        if node.can_be_compared() {
            let graph_mode = ctx.options.graph_mode;
            if graph_mode.detects_repeats() && ctx.register.object_has_been_seen(&node) {
                if graph_mode == GraphMode::FiniteTree {
                    return Err(WalkError::structural(node.path()));
                }
                trace!("Skipping repeated reference at {}", node.path());
                return Ok(Some(Step::Skip(node)));
            }
            // Every mode records visits; only the reaction to a repeat differs.
            ctx.register.register_object_visit(&node);
        }

        let children = node.children();
        let deferred = match ctx.options.traversal_mode {
            TraversalMode::Depth => {
                let deferred = match children.last() {
                    Some(last) => {
                        ctx.deferred.defer(last.id(), Arc::clone(&node));
                        true
                    }
                    None => false,
                };
                for child in children.into_iter().rev() {
                    self.queue.push_front(child);
                }
                deferred
            }
            TraversalMode::Breadth => {
                self.queue.extend(children);
                false
            }
        };

        Ok(Some(Step::Visit { node, deferred }))
    }
}
