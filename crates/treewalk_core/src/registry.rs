//! Observer registry.
//!
//! Normalizes the registered observers into two timing buckets, each sorted
//! by execution order. Buckets hold indices into the observer list so an
//! observer registered with [`Timing::Both`](crate::Timing::Both) is still a single callback.

use crate::config::WalkOptions;
use crate::node::WalkNode;
use crate::observer::{Observer, ObserverId, Phase};

pub(crate) struct ObserverRegistry<'a, C> {
    observers: Vec<Observer<'a, C>>,
    pre_visit: Vec<usize>,
    post_visit: Vec<usize>,
}

impl<'a, C> ObserverRegistry<'a, C> {
    pub(crate) fn new(observers: Vec<Observer<'a, C>>) -> Self {
        let bucket = |phase: Phase| {
            let mut indices: Vec<usize> = observers
                .iter()
                .enumerate()
                .filter(|(_, observer)| observer.timing.includes(phase))
                .map(|(index, _)| index)
                .collect();
            // Stable: equal orders keep registration order.
            indices.sort_by_key(|&index| observers[index].execution_order);
            indices
        };

        let pre_visit = bucket(Phase::PreVisit);
        let post_visit = bucket(Phase::PostVisit);

        Self {
            observers,
            pre_visit,
            post_visit,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    /// Indices of the observers that should run on `node` at `phase`, in order.
    pub(crate) fn matching(&self, node: &WalkNode, phase: Phase, options: &WalkOptions) -> Vec<usize> {
        if !options.run_callbacks || (node.is_root() && !options.root_object_callbacks) {
            return Vec::new();
        }

        let bucket = match phase {
            Phase::PreVisit => &self.pre_visit,
            Phase::PostVisit => &self.post_visit,
        };

        bucket
            .iter()
            .copied()
            .filter(|&index| self.observers[index].matches(node))
            .collect()
    }

    /// Callback of the observer at `index`, with its id.
    pub(crate) fn callback_mut(&mut self, index: usize) -> (ObserverId, &mut C) {
        (ObserverId(index), &mut self.observers[index].callback)
    }

    pub(crate) fn name(&self, index: usize) -> Option<&str> {
        self.observers[index].name()
    }
}

impl<C> std::fmt::Debug for ObserverRegistry<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<String> = self
            .observers
            .iter()
            .map(|observer| {
                format!(
                    "{}:{:?}@{}",
                    observer.name().unwrap_or("<anonymous>"),
                    observer.timing,
                    observer.execution_order
                )
            })
            .collect();
        f.debug_struct("ObserverRegistry")
            .field("observers", &labels)
            .field("pre_visit", &self.pre_visit)
            .field("post_visit", &self.post_visit)
            .finish()
    }
}
