//! Observer dispatch.
//!
//! Runs the observers matched for one node at one phase. Synchronous
//! dispatch and sequential async dispatch run them strictly in bucket order.
//! Parallel async dispatch starts all of them and waits for every one to
//! settle before reporting the first interrupt in bucket order.

use std::sync::Arc;

use futures::future::join_all;
use tracing::trace;

use crate::context::Context;
use crate::error::{Interrupt, WalkError};
use crate::node::NodeRef;
use crate::observer::{AsyncCallback, Phase, SyncCallback};

/// Reason a walk ends before its queue is empty.
#[derive(Debug)]
pub(crate) enum Halt {
    Stop,
    Error(WalkError),
}

impl From<WalkError> for Halt {
    fn from(error: WalkError) -> Self {
        Halt::Error(error)
    }
}

impl From<Interrupt> for Halt {
    fn from(interrupt: Interrupt) -> Self {
        match interrupt {
            Interrupt::Stop => Halt::Stop,
            Interrupt::Failed(source) => Halt::Error(WalkError::Observer(source)),
        }
    }
}

pub(crate) fn run_sync<'a>(
    ctx: &mut Context<'a, SyncCallback<'a>>,
    node: &NodeRef,
    phase: Phase,
) -> Result<(), Interrupt> {
    let track = ctx.options.track_executed_observers;

    for index in ctx.registry.matching(node, phase, &ctx.options) {
        trace!(
            "Running observer {} ({:?}) on {}",
            ctx.registry.name(index).unwrap_or("<anonymous>"),
            phase,
            node.id()
        );
        let (id, callback) = ctx.registry.callback_mut(index);
        let result = callback(node);
        if track {
            node.record_execution(id);
        }
        result?;
    }

    Ok(())
}

pub(crate) async fn run_async<'a>(
    ctx: &mut Context<'a, AsyncCallback<'a>>,
    node: &NodeRef,
    phase: Phase,
) -> Result<(), Interrupt> {
    let matched = ctx.registry.matching(node, phase, &ctx.options);
    if matched.is_empty() {
        return Ok(());
    }

    let track = ctx.options.track_executed_observers;

    if !ctx.options.parallelize_async_callbacks {
        for index in matched {
            let (id, callback) = ctx.registry.callback_mut(index);
            let result = callback(Arc::clone(node)).await;
            if track {
                node.record_execution(id);
            }
            result?;
        }
        return Ok(());
    }

    trace!(
        "Starting {} observers together ({:?}) on {}",
        matched.len(),
        phase,
        node.id()
    );

    let pending: Vec<_> = matched
        .into_iter()
        .map(|index| {
            let (id, callback) = ctx.registry.callback_mut(index);
            let future = callback(Arc::clone(node));
            let node = Arc::clone(node);
            async move {
                let result = future.await;
                // Recorded on settlement, so the list follows completion order.
                if track {
                    node.record_execution(id);
                }
                result
            }
        })
        .collect();

    join_all(pending).await.into_iter().collect()
}
