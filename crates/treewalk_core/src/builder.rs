//! Fluent builders over [`WalkConfig`].

use std::future::Future;

use crate::config::{GraphMode, TraversalMode, WalkConfig, WalkOptions};
use crate::error::{ObserverResult, Result};
use crate::node::NodeRef;
use crate::observer::{AsyncCallback, AsyncObserver, Observer, SyncCallback, SyncObserver};
use crate::value::Value;
use crate::visitation::VisitationRegister;
use crate::walker::{self, AsyncWalkStep, WalkStep};

/// Builder shared by [`WalkBuilder`] and [`AsyncWalkBuilder`].
pub struct Builder<'a, C> {
    config: WalkConfig<'a, C>,
}

/// Builder for synchronous walks.
///
/// ```rust
/// use treewalk_core::{Value, WalkBuilder, GraphMode};
///
/// let mut count = 0;
/// WalkBuilder::new()
///     .with_graph_mode(GraphMode::Graph)
///     .with_callback(|_| {
///         count += 1;
///         Ok(())
///     })
///     .walk(&Value::from(serde_json::json!({"a": [1, 2]})))
///     .unwrap();
/// assert_eq!(count, 4);
/// ```
pub type WalkBuilder<'a> = Builder<'a, SyncCallback<'a>>;

/// Builder for asynchronous walks.
pub type AsyncWalkBuilder<'a> = Builder<'a, AsyncCallback<'a>>;

impl<'a, C> Builder<'a, C> {
    pub fn new() -> Self {
        Self {
            config: WalkConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: WalkConfig<'a, C>) -> Self {
        self.config = config;
        self
    }

    /// Replaces the options, keeping observers and register.
    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.config.options = options;
        self
    }

    pub fn with_traversal_mode(mut self, mode: TraversalMode) -> Self {
        self.config.options.traversal_mode = mode;
        self
    }

    pub fn with_graph_mode(mut self, mode: GraphMode) -> Self {
        self.config.options.graph_mode = mode;
        self
    }

    pub fn with_root_object_callbacks(mut self, yes: bool) -> Self {
        self.config.options.root_object_callbacks = yes;
        self
    }

    pub fn with_running_callbacks(mut self, yes: bool) -> Self {
        self.config.options.run_callbacks = yes;
        self
    }

    pub fn with_tracked_observers(mut self, yes: bool) -> Self {
        self.config.options.track_executed_observers = yes;
        self
    }

    pub fn with_visitation_register<R>(mut self, register: R) -> Self
    where
        R: VisitationRegister + Send + 'a,
    {
        self.config = self.config.visitation_register(register);
        self
    }

    pub fn with_observer(mut self, observer: Observer<'a, C>) -> Self {
        self.config.on_visit.push(observer);
        self
    }

    pub fn into_config(self) -> WalkConfig<'a, C> {
        self.config
    }
}

impl<C> Default for Builder<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Builder<'a, SyncCallback<'a>> {
    /// Adds an unconditional pre-visit callback.
    pub fn with_callback<F>(self, callback: F) -> Self
    where
        F: FnMut(&NodeRef) -> ObserverResult + 'a,
    {
        self.with_observer(SyncObserver::new(callback))
    }

    pub fn walk(self, value: &Value) -> Result<()> {
        walker::walk(value, self.config)
    }

    pub fn walk_step(self, value: &Value) -> Result<WalkStep<'a>> {
        walker::walk_step(value, self.config)
    }
}

impl<'a> Builder<'a, AsyncCallback<'a>> {
    /// Adds an unconditional pre-visit callback.
    pub fn with_callback<F, Fut>(self, callback: F) -> Self
    where
        F: FnMut(NodeRef) -> Fut + Send + 'a,
        Fut: Future<Output = ObserverResult> + Send + 'a,
    {
        self.with_observer(AsyncObserver::new(callback))
    }

    pub fn with_parallelize_async_callbacks(mut self, yes: bool) -> Self {
        self.config.options.parallelize_async_callbacks = yes;
        self
    }

    pub async fn walk(self, value: &Value) -> Result<()> {
        walker::walk_async(value, self.config).await
    }

    pub fn walk_step(self, value: &Value) -> Result<AsyncWalkStep<'a>> {
        walker::walk_async_step(value, self.config)
    }
}

impl<C> std::fmt::Debug for Builder<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("options", &self.config.options)
            .field("observers", &self.config.on_visit)
            .field("has_register", &self.config.visitation_register.is_some())
            .finish()
    }
}
