//! Walk configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WalkError};
use crate::observer::{AsyncCallback, Observer, SyncCallback};
use crate::visitation::VisitationRegister;

/// Order in which nodes are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraversalMode {
    /// Pre-order, left to right. Post-visit observers run after descendants.
    #[default]
    Depth,
    /// Level order.
    Breadth,
}

/// Policy for containers reached more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphMode {
    /// A repeated reference is an error.
    #[default]
    FiniteTree,
    /// Repeats are walked again every time.
    Tree,
    /// Repeats are skipped silently: no callbacks, no children, no emission.
    Graph,
    /// Like `Tree`; cyclic input never ends unless an observer stops the walk.
    Infinite,
}

impl GraphMode {
    /// Returns true if this mode reacts to a repeated reference.
    ///
    /// Every mode records visits in the register; `tree` and `infinite` never look them up.
    #[inline]
    pub const fn detects_repeats(self) -> bool {
        matches!(self, GraphMode::FiniteTree | GraphMode::Graph)
    }
}

/// Scalar walk options.
///
/// Loadable from JSON with camelCase keys; unknown keys are rejected.
///
/// `parallelize_async_callbacks` is only accepted by asynchronous walks. A
/// synchronous walk given options with it set fails with
/// [`WalkError::Configuration`] before visiting any node, so options meant
/// for both kinds of walk should leave it off and set it on the async copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WalkOptions {
    /// Default: depth.
    #[serde(default)]
    pub traversal_mode: TraversalMode,

    /// Default: finiteTree.
    #[serde(default)]
    pub graph_mode: GraphMode,

    /// Start all matching async observers of a dispatch point together.
    /// Rejected by synchronous walks. Default: false.
    #[serde(default)]
    pub parallelize_async_callbacks: bool,

    /// Whether observers run on the root node. Default: true.
    #[serde(default = "default_true")]
    pub root_object_callbacks: bool,

    /// Whether observers run at all. Default: true.
    #[serde(default = "default_true")]
    pub run_callbacks: bool,

    /// Record executed observers on each node. Default: false.
    #[serde(default)]
    pub track_executed_observers: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl WalkOptions {
    /// Creates options with every default applied.
    pub fn new() -> Self {
        Self {
            traversal_mode: TraversalMode::default(),
            graph_mode: GraphMode::default(),
            parallelize_async_callbacks: false,
            root_object_callbacks: true,
            run_callbacks: true,
            track_executed_observers: false,
        }
    }

    /// Parses options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| WalkError::config(format!("Invalid options: {}", e)))
    }

    pub fn traversal_mode(mut self, mode: TraversalMode) -> Self {
        self.traversal_mode = mode;
        self
    }

    pub fn graph_mode(mut self, mode: GraphMode) -> Self {
        self.graph_mode = mode;
        self
    }

    pub fn parallelize_async_callbacks(mut self, yes: bool) -> Self {
        self.parallelize_async_callbacks = yes;
        self
    }

    pub fn root_object_callbacks(mut self, yes: bool) -> Self {
        self.root_object_callbacks = yes;
        self
    }

    pub fn run_callbacks(mut self, yes: bool) -> Self {
        self.run_callbacks = yes;
        self
    }

    pub fn track_executed_observers(mut self, yes: bool) -> Self {
        self.track_executed_observers = yes;
        self
    }

    /// Rejects combinations that make no sense for the kind of walk.
    pub(crate) fn validate(&self, asynchronous: bool) -> Result<()> {
        if self.parallelize_async_callbacks && !asynchronous {
            return Err(WalkError::config(
                "'parallelizeAsyncCallbacks' is only valid for asynchronous walks",
            ));
        }
        Ok(())
    }
}

/// Boxed visitation register supplied by the caller.
pub type BoxedRegister<'a> = Box<dyn VisitationRegister + Send + 'a>;

/// Everything a walk needs besides the value.
pub struct WalkConfig<'a, C> {
    pub options: WalkOptions,
    /// Observers in registration order.
    pub on_visit: Vec<Observer<'a, C>>,
    /// Shared repeat state. A fresh identity register is used when `None`.
    pub visitation_register: Option<BoxedRegister<'a>>,
}

/// Configuration of a synchronous walk.
pub type SyncWalkConfig<'a> = WalkConfig<'a, SyncCallback<'a>>;

/// Configuration of an asynchronous walk.
pub type AsyncWalkConfig<'a> = WalkConfig<'a, AsyncCallback<'a>>;

impl<'a, C> WalkConfig<'a, C> {
    pub fn new(options: WalkOptions) -> Self {
        Self {
            options,
            on_visit: Vec::new(),
            visitation_register: None,
        }
    }

    /// Appends an observer.
    pub fn observer(mut self, observer: Observer<'a, C>) -> Self {
        self.on_visit.push(observer);
        self
    }

    /// Uses `register` for repeat detection.
    pub fn visitation_register<R>(mut self, register: R) -> Self
    where
        R: VisitationRegister + Send + 'a,
    {
        self.visitation_register = Some(Box::new(register));
        self
    }
}

impl<C> Default for WalkConfig<'_, C> {
    fn default() -> Self {
        Self::new(WalkOptions::default())
    }
}
