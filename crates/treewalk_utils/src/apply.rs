//! Run plain callbacks on every node.

use std::future::Future;

use treewalk_core::{
    AsyncCallback, AsyncObserver, AsyncWalkConfig, NodeRef, ObserverResult, Result, SyncCallback,
    SyncObserver, SyncWalkConfig, Value, walk, walk_async,
};

/// Runs `callback` on every node of `value`, pre-visit, with default options.
pub fn apply<'a, F>(value: &Value, callback: F) -> Result<()>
where
    F: FnMut(&NodeRef) -> ObserverResult + 'a,
{
    walk(value, SyncWalkConfig::default().observer(SyncObserver::new(callback)))
}

/// Runs each callback on every node of `value`, in the given order.
pub fn apply_all<'a>(value: &Value, callbacks: impl IntoIterator<Item = SyncCallback<'a>>) -> Result<()> {
    let config = callbacks
        .into_iter()
        .fold(SyncWalkConfig::default(), |config, callback| {
            config.observer(SyncObserver::new(callback))
        });
    walk(value, config)
}

/// Asynchronous [`apply`]. Callbacks of one node never overlap.
pub async fn apply_async<'a, F, Fut>(value: &Value, callback: F) -> Result<()>
where
    F: FnMut(NodeRef) -> Fut + Send + 'a,
    Fut: Future<Output = ObserverResult> + Send + 'a,
{
    walk_async(value, AsyncWalkConfig::default().observer(AsyncObserver::new(callback))).await
}

/// Asynchronous [`apply_all`].
pub async fn apply_all_async<'a>(
    value: &Value,
    callbacks: impl IntoIterator<Item = AsyncCallback<'a>>,
) -> Result<()> {
    let config = callbacks
        .into_iter()
        .fold(AsyncWalkConfig::default(), |config, callback| {
            config.observer(AsyncObserver::new(callback))
        });
    walk_async(value, config).await
}
