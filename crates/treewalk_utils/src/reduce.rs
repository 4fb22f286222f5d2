use treewalk_core::{NodeRef, Result, SyncWalkConfig, Value, walk_step};

/// Folds every node of `value` into an accumulator, in depth-first pre-order.
pub fn reduce<T, F>(value: &Value, init: T, mut fold: F) -> Result<T>
where
    F: FnMut(T, &NodeRef) -> T,
{
    let mut accumulator = init;
    for node in walk_step(value, SyncWalkConfig::default())? {
        accumulator = fold(accumulator, &node?);
    }
    Ok(accumulator)
}
