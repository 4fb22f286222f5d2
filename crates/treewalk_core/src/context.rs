//! Per-walk state.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{BoxedRegister, WalkConfig, WalkOptions};
use crate::error::Result;
use crate::node::{NodeId, NodeIdSource, NodeRef};
use crate::registry::ObserverRegistry;
use crate::visitation::IdentityRegister;

/// Everything one walk owns. Created at walk start, dropped at walk end.
pub(crate) struct Context<'a, C> {
    pub(crate) options: WalkOptions,
    pub(crate) registry: ObserverRegistry<'a, C>,
    pub(crate) register: BoxedRegister<'a>,
    pub(crate) ids: Arc<NodeIdSource>,
    pub(crate) deferred: DeferredStack,
}

impl<'a, C> Context<'a, C> {
    /// Validates `config` and builds the context. Fails before any node is visited.
    pub(crate) fn build(config: WalkConfig<'a, C>, asynchronous: bool) -> Result<Self> {
        let WalkConfig {
            options,
            on_visit,
            visitation_register,
        } = config;

        options.validate(asynchronous)?;

        Ok(Self {
            options,
            registry: ObserverRegistry::new(on_visit),
            register: visitation_register.unwrap_or_else(|| Box::new(IdentityRegister::new())),
            ids: Arc::new(NodeIdSource::new()),
            deferred: DeferredStack::default(),
        })
    }
}

/// Nodes whose post-visit waits on a descendant, keyed by the id of the
/// node whose completion triggers them.
#[derive(Debug, Default)]
pub(crate) struct DeferredStack {
    pending: HashMap<NodeId, NodeRef>,
}

impl DeferredStack {
    pub(crate) fn defer(&mut self, trigger: NodeId, node: NodeRef) {
        self.pending.insert(trigger, node);
    }

    /// Removes and returns the node waiting on `completed`, if any.
    pub(crate) fn take(&mut self, completed: NodeId) -> Option<NodeRef> {
        self.pending.remove(&completed)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
