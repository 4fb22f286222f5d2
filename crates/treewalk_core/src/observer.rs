//! Observer records.
//!
//! An [`Observer`] pairs a callback with the conditions under which it runs:
//! its timing relative to a node's descendants, its position among other
//! observers, and a list of predicates the node must satisfy.
//!
//! # Example
//!
//! ```rust
//! use treewalk_core::{SyncObserver, Timing, filters};
//!
//! let observer = SyncObserver::new(|node| {
//!     println!("{}", node.path());
//!     Ok(())
//! })
//! .with_timing(Timing::PostVisit)
//! .with_execution_order(-1)
//! .with_filter(filters::not_root());
//! ```

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::ObserverResult;
use crate::node::{NodeRef, WalkNode};

/// When an observer runs relative to a node's descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Timing {
    /// Before descending into the node.
    #[default]
    PreVisit,
    /// After every descendant completed (depth-first), or right after
    /// `PreVisit` (breadth-first and childless nodes).
    PostVisit,
    /// Both of the above; the observer can run twice per node.
    Both,
}

impl Timing {
    pub(crate) const fn includes(self, phase: Phase) -> bool {
        matches!(
            (self, phase),
            (Timing::Both, _)
                | (Timing::PreVisit, Phase::PreVisit)
                | (Timing::PostVisit, Phase::PostVisit)
        )
    }
}

/// A single dispatch point in a node's visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    PreVisit,
    PostVisit,
}

/// Registration index of an observer within one walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) usize);

impl ObserverId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Node predicate used to select observers.
pub type Predicate<'a> = Box<dyn Fn(&WalkNode) -> bool + Send + Sync + 'a>;

/// Callback of a synchronous observer.
pub type SyncCallback<'a> = Box<dyn FnMut(&NodeRef) -> ObserverResult + 'a>;

/// Callback of an asynchronous observer.
pub type AsyncCallback<'a> = Box<dyn FnMut(NodeRef) -> BoxFuture<'a, ObserverResult> + Send + 'a>;

/// Observer with a synchronous callback.
pub type SyncObserver<'a> = Observer<'a, SyncCallback<'a>>;

/// Observer with an asynchronous callback.
pub type AsyncObserver<'a> = Observer<'a, AsyncCallback<'a>>;

/// A callback plus the conditions under which it runs.
pub struct Observer<'a, C> {
    pub(crate) callback: C,
    pub(crate) execution_order: i32,
    pub(crate) timing: Timing,
    pub(crate) filters: Vec<Predicate<'a>>,
    pub(crate) name: Option<String>,
}

impl<'a> Observer<'a, SyncCallback<'a>> {
    /// Creates a pre-visit observer with order 0 and no filters.
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(&NodeRef) -> ObserverResult + 'a,
    {
        Self::from_callback(Box::new(callback))
    }
}

impl<'a> Observer<'a, AsyncCallback<'a>> {
    /// Creates a pre-visit observer with order 0 and no filters.
    pub fn new<F, Fut>(mut callback: F) -> Self
    where
        F: FnMut(NodeRef) -> Fut + Send + 'a,
        Fut: Future<Output = ObserverResult> + Send + 'a,
    {
        Self::from_callback(Box::new(
            move |node: NodeRef| -> BoxFuture<'a, ObserverResult> { Box::pin(callback(node)) },
        ))
    }
}

impl<'a, C> Observer<'a, C> {
    fn from_callback(callback: C) -> Self {
        Self {
            callback,
            execution_order: 0,
            timing: Timing::default(),
            filters: Vec::new(),
            name: None,
        }
    }

    /// Sets the execution order. Lower orders run first.
    pub fn with_execution_order(mut self, order: i32) -> Self {
        self.execution_order = order;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Adds a predicate. All predicates must hold for the observer to run.
    pub fn with_filter<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&WalkNode) -> bool + Send + Sync + 'a,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Names the observer in log output.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn execution_order(&self) -> i32 {
        self.execution_order
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true if every predicate holds for `node`.
    pub fn matches(&self, node: &WalkNode) -> bool {
        self.filters.iter().all(|predicate| predicate(node))
    }
}

impl<C> fmt::Debug for Observer<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("name", &self.name)
            .field("execution_order", &self.execution_order)
            .field("timing", &self.timing)
            .field("filters", &self.filters.len())
            .finish()
    }
}
