//! Value search.

use treewalk_core::{Result, SyncObserver, SyncWalkConfig, Value, filters, walk};

use crate::apply::apply;

/// Values of every object member named `key`, in walk order.
///
/// With `only_unique`, later values that are the same value as an earlier one
/// are dropped.
pub fn flatten(value: &Value, key: &str, only_unique: bool) -> Result<Vec<Value>> {
    let mut found: Vec<Value> = Vec::new();

    let collector = SyncObserver::new(|node| {
        let candidate = node.value();
        if !only_unique || !found.iter().any(|seen| seen.same_value(candidate)) {
            found.push(candidate.clone());
        }
        Ok(())
    })
    .with_filter(filters::key_is(key));

    walk(value, SyncWalkConfig::default().observer(collector))?;
    Ok(found)
}

/// Every node value strictly equal to `needle`.
///
/// Containers match by identity, so searching for a container finds each
/// place it is reachable from. NaN is never found; `0.0` and `-0.0` match
/// each other.
pub fn find_all(value: &Value, needle: &Value) -> Result<Vec<Value>> {
    let mut matches = Vec::new();
    apply(value, |node| {
        if node.value().strict_equals(needle) {
            matches.push(node.value().clone());
        }
        Ok(())
    })?;
    Ok(matches)
}
