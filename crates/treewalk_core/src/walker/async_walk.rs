use std::sync::Arc;

use futures::Stream;
use futures::stream;
use tracing::debug;

use super::{Step, Traversal};
use crate::context::Context;
use crate::dispatch::{self, Halt};
use crate::error::Result;
use crate::node::NodeRef;
use crate::observer::{AsyncCallback, Phase};
use crate::value::Value;

/// Lazy sequence of the nodes of an asynchronous walk.
///
/// Same contract as [`WalkStep`](super::WalkStep): the post-visit work of a
/// node runs when the next node is requested.
pub struct AsyncWalkStep<'a> {
    ctx: Context<'a, AsyncCallback<'a>>,
    traversal: Traversal,
    pending: Option<NodeRef>,
    finished: bool,
    emitted: usize,
}

impl<'a> AsyncWalkStep<'a> {
    pub(crate) fn new(value: &Value, ctx: Context<'a, AsyncCallback<'a>>) -> Self {
        debug!(
            "Starting async walk ({:?}, {:?}, parallel: {}) with {} observers",
            ctx.options.traversal_mode,
            ctx.options.graph_mode,
            ctx.options.parallelize_async_callbacks,
            ctx.registry.len()
        );
        let traversal = Traversal::new(value, &ctx);
        Self {
            ctx,
            traversal,
            pending: None,
            finished: false,
            emitted: 0,
        }
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Resolves to the next node, or `None` once the walk is over.
    pub async fn next_node(&mut self) -> Option<Result<NodeRef>> {
        if self.finished {
            return None;
        }

        match self.step().await {
            Ok(Some(node)) => {
                self.emitted += 1;
                Some(Ok(node))
            }
            Ok(None) => {
                self.finished = true;
                debug!("Async walk finished after {} nodes", self.emitted);
                None
            }
            Err(Halt::Stop) => {
                self.finished = true;
                debug!("Async walk stopped by observer after {} nodes", self.emitted);
                None
            }
            Err(Halt::Error(error)) => {
                self.finished = true;
                debug!("Async walk failed after {} nodes: {}", self.emitted, error);
                Some(Err(error))
            }
        }
    }

    /// Converts the walk into a [`Stream`] of nodes.
    pub fn into_stream(self) -> impl Stream<Item = Result<NodeRef>> + 'a {
        stream::unfold(self, |mut walk| async move {
            let item = walk.next_node().await?;
            Some((item, walk))
        })
    }

    async fn step(&mut self) -> std::result::Result<Option<NodeRef>, Halt> {
        if let Some(node) = self.pending.take() {
            self.complete(&node, true).await?;
        }

        while let Some(step) = self.traversal.advance(&mut self.ctx)? {
            match step {
                Step::Skip(node) => self.complete(&node, false).await?,
                Step::Visit { node, deferred } => {
                    dispatch::run_async(&mut self.ctx, &node, Phase::PreVisit).await?;
                    if !deferred {
                        self.pending = Some(Arc::clone(&node));
                    }
                    return Ok(Some(node));
                }
            }
        }

        Ok(None)
    }

    async fn complete(&mut self, node: &NodeRef, fire_own: bool) -> std::result::Result<(), Halt> {
        if fire_own {
            dispatch::run_async(&mut self.ctx, node, Phase::PostVisit).await?;
        }

        let mut completed = node.id();
        while let Some(waiting) = self.ctx.deferred.take(completed) {
            dispatch::run_async(&mut self.ctx, &waiting, Phase::PostVisit).await?;
            completed = waiting.id();
        }

        Ok(())
    }
}

impl std::fmt::Debug for AsyncWalkStep<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncWalkStep")
            .field("registry", &self.ctx.registry)
            .field("deferred", &self.ctx.deferred.len())
            .field("emitted", &self.emitted)
            .field("finished", &self.finished)
            .finish()
    }
}
