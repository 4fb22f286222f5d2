use std::iter::FusedIterator;
use std::sync::Arc;

use tracing::debug;

use super::{Step, Traversal};
use crate::context::Context;
use crate::dispatch::{self, Halt};
use crate::error::Result;
use crate::node::NodeRef;
use crate::observer::{Phase, SyncCallback};
use crate::value::Value;

/// Lazy, single-pass sequence of the nodes of a synchronous walk.
///
/// Each call to `next` finishes the post-visit work of the previously
/// emitted node, then runs pre-visit observers on the next node and yields
/// it. Dropping the iterator ends the walk; post-visit observers that were
/// still pending never run.
///
/// Yields `Err` at most once, after which it is exhausted. A stop requested
/// by an observer ends the sequence without an error.
pub struct WalkStep<'a> {
    ctx: Context<'a, SyncCallback<'a>>,
    traversal: Traversal,
    /// Emitted node whose own post-visit is still due.
    pending: Option<NodeRef>,
    finished: bool,
    emitted: usize,
}

impl<'a> WalkStep<'a> {
    pub(crate) fn new(value: &Value, ctx: Context<'a, SyncCallback<'a>>) -> Self {
        debug!(
            "Starting walk ({:?}, {:?}) with {} observers",
            ctx.options.traversal_mode,
            ctx.options.graph_mode,
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

    /// Number of nodes yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn step(&mut self) -> std::result::Result<Option<NodeRef>, Halt> {
        if let Some(node) = self.pending.take() {
            self.complete(&node, true)?;
        }

        while let Some(step) = self.traversal.advance(&mut self.ctx)? {
            match step {
                Step::Skip(node) => self.complete(&node, false)?,
                Step::Visit { node, deferred } => {
                    dispatch::run_sync(&mut self.ctx, &node, Phase::PreVisit)?;
                    if !deferred {
                        self.pending = Some(Arc::clone(&node));
                    }
                    return Ok(Some(node));
                }
            }
        }

        Ok(None)
    }

    /// Marks `node` complete and fires every post-visit waiting on it.
    fn complete(&mut self, node: &NodeRef, fire_own: bool) -> std::result::Result<(), Halt> {
        if fire_own {
            dispatch::run_sync(&mut self.ctx, node, Phase::PostVisit)?;
        }

        let mut completed = node.id();
        while let Some(waiting) = self.ctx.deferred.take(completed) {
            dispatch::run_sync(&mut self.ctx, &waiting, Phase::PostVisit)?;
            completed = waiting.id();
        }

        Ok(())
    }
}

impl Iterator for WalkStep<'_> {
    type Item = Result<NodeRef>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.step() {
            Ok(Some(node)) => {
                self.emitted += 1;
                Some(Ok(node))
            }
            Ok(None) => {
                self.finished = true;
                debug!("Walk finished after {} nodes", self.emitted);
                None
            }
            Err(Halt::Stop) => {
                self.finished = true;
                debug!("Walk stopped by observer after {} nodes", self.emitted);
                None
            }
            Err(Halt::Error(error)) => {
                self.finished = true;
                debug!("Walk failed after {} nodes: {}", self.emitted, error);
                Some(Err(error))
            }
        }
    }
}

impl FusedIterator for WalkStep<'_> {}

impl std::fmt::Debug for WalkStep<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkStep")
            .field("registry", &self.ctx.registry)
            .field("deferred", &self.ctx.deferred.len())
            .field("emitted", &self.emitted)
            .field("finished", &self.finished)
            .finish()
    }
}
