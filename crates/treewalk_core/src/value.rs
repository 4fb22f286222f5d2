//! Walkable values.
//!
//! [`Value`] is a dynamically typed value whose containers are shared
//! handles. Cloning a `Value` clones the handle, not the contents, so one
//! array or object can be reachable from several places in a structure,
//! including from inside itself.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value as JsonValue;

use crate::error::{Result, WalkError};

/// A value in a walked structure.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value (missing key, hole in an array).
    #[default]
    Undefined,
    Null,
    Bool(bool),
    /// A number. NaN is allowed.
    Number(f64),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
}

/// Shared handle to an array.
#[derive(Clone, Default)]
pub struct ArrayRef(Arc<RwLock<Vec<Value>>>);

/// Shared handle to an insertion-ordered object.
#[derive(Clone, Default)]
pub struct ObjectRef(Arc<RwLock<IndexMap<String, Value>>>);

impl ArrayRef {
    /// Creates a new array handle.
    pub fn new(items: Vec<Value>) -> Self {
        Self(Arc::new(RwLock::new(items)))
    }

    /// Reference identity of the underlying array.
    #[inline]
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// Returns true if both handles point at the same array.
    #[inline]
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Returns the item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    pub fn push(&self, value: Value) {
        self.0.write().push(value);
    }

    /// Sets the item at `index`, padding with `Undefined` when `index` is past the end.
    pub fn set(&self, index: usize, value: Value) {
        let mut items = self.0.write();
        if index >= items.len() {
            items.resize(index + 1, Value::Undefined);
        }
        items[index] = value;
    }

    /// Copies the current item handles out of the array.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.read().clone()
    }
}

impl ObjectRef {
    /// Creates a new object handle.
    pub fn new(entries: IndexMap<String, Value>) -> Self {
        Self(Arc::new(RwLock::new(entries)))
    }

    /// Reference identity of the underlying object.
    #[inline]
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// Returns true if both handles point at the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().contains_key(key)
    }

    /// Returns the member named `key`, if any.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.read().get(key).cloned()
    }

    /// Inserts a member, keeping the position of an existing key.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.write().insert(key.into(), value)
    }

    /// Removes a member, preserving the order of the others.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.write().shift_remove(key)
    }

    /// Member names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.0.read().keys().cloned().collect()
    }

    /// Copies the current entries out of the object.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl Value {
    /// Creates an array value.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(ArrayRef::new(items.into_iter().collect()))
    }

    /// Creates an object value from `(key, value)` pairs.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(ObjectRef::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        ))
    }

    /// Creates an empty array value.
    pub fn new_array() -> Self {
        Value::Array(ArrayRef::default())
    }

    /// Creates an empty object value.
    pub fn new_object() -> Self {
        Value::Object(ObjectRef::default())
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    /// Reference identity of a container; `None` for scalars.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(array) => Some(array.identity()),
            Value::Object(object) => Some(object.identity()),
            _ => None,
        }
    }

    /// Name of the value's runtime type.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Same-value equality.
    ///
    /// Containers compare by identity. Numbers compare bitwise except that
    /// every NaN equals every other NaN, so `0.0` and `-0.0` differ.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Strict equality.
    ///
    /// Like [`same_value`](Value::same_value) except for numbers, which use
    /// IEEE comparison: NaN equals nothing, `0.0` equals `-0.0`.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            _ => self.same_value(other),
        }
    }

    /// Converts to JSON.
    ///
    /// `Undefined` and non-finite numbers become `null`. Shared containers are
    /// written once per occurrence; a cycle is reported as a structural
    /// violation instead of being followed.
    pub fn to_json(&self) -> Result<JsonValue> {
        let mut open = Vec::new();
        self.to_json_guarded(&mut open, String::new())
    }

    fn to_json_guarded(&self, open: &mut Vec<usize>, path: String) -> Result<JsonValue> {
        match self {
            Value::Undefined | Value::Null => Ok(JsonValue::Null),
            Value::Bool(b) => Ok(JsonValue::Bool(*b)),
            Value::Number(n) => Ok(number_to_json(*n)),
            Value::String(s) => Ok(JsonValue::String(s.clone())),
            Value::Array(array) => {
                let id = array.identity();
                if open.contains(&id) {
                    return Err(WalkError::structural(path));
                }
                open.push(id);
                let mut items = Vec::with_capacity(array.len());
                for (index, item) in array.to_vec().iter().enumerate() {
                    items.push(item.to_json_guarded(open, format!("{path}[{index}]"))?);
                }
                open.pop();
                Ok(JsonValue::Array(items))
            }
            Value::Object(object) => {
                let id = object.identity();
                if open.contains(&id) {
                    return Err(WalkError::structural(path));
                }
                open.push(id);
                let mut map = serde_json::Map::new();
                for (key, item) in object.entries() {
                    let item_path = format!("{path}[\"{key}\"]");
                    map.insert(key, item.to_json_guarded(open, item_path)?);
                }
                open.pop();
                Ok(JsonValue::Object(map))
            }
        }
    }
}

fn number_to_json(n: f64) -> JsonValue {
    // Integral values within the exactly representable range keep an integer form.
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE {
        return JsonValue::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
}

impl fmt::Debug for Value {
    // Containers print shallowly; a structure may contain itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Array(array) => fmt::Debug::fmt(array, f),
            Value::Object(object) => fmt::Debug::fmt(object, f),
        }
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("id", &format_args!("{:#x}", self.identity()))
            .field("len", &self.len())
            .finish()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("id", &format_args!("{:#x}", self.identity()))
            .field("keys", &self.keys())
            .finish()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(ArrayRef::new(items))
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::array(items.into_iter().map(Value::from)),
            JsonValue::Object(map) => {
                Value::object(map.into_iter().map(|(key, item)| (key, Value::from(item))))
            }
        }
    }
}
