use std::collections::HashMap;

use treewalk_core::{NodeId, NodeKey, Result, SyncObserver, SyncWalkConfig, Value, walk};

/// Copies `value` into a structure that shares no containers with it.
///
/// Scalars, `Undefined` and NaN leaves are kept as they are. A non-container
/// root is returned as is. Shared or cyclic input is rejected with a
/// structural violation, and a failed copy never touches the source.
pub fn deep_copy(value: &Value) -> Result<Value> {
    if value.identity().is_none() {
        return Ok(value.clone());
    }

    let mut copies: HashMap<NodeId, Value> = HashMap::new();
    let mut root = Value::Undefined;

    let copier = SyncObserver::new(|node| {
        let copy = match node.value() {
            Value::Array(_) => Value::new_array(),
            Value::Object(_) => Value::new_object(),
            leaf => leaf.clone(),
        };

        match (node.parent(), node.key()) {
            (Some(parent), Some(key)) => match (copies.get(&parent.id()), key) {
                (Some(Value::Array(target)), NodeKey::Index(index)) => target.set(*index, copy.clone()),
                (Some(Value::Object(target)), NodeKey::Name(name)) => {
                    target.insert(name.clone(), copy.clone());
                }
                _ => {}
            },
            _ => root = copy.clone(),
        }

        if node.can_be_compared() {
            copies.insert(node.id(), copy);
        }
        Ok(())
    })
    .named("deep_copy");

    walk(value, SyncWalkConfig::default().observer(copier))?;
    Ok(root)
}
