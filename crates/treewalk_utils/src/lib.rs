//! # treewalk_utils
//!
//! Operations built on the public walker and node API of `treewalk_core`.
//!
//! ## Example
//!
//! ```rust
//! use treewalk_core::Value;
//! use treewalk_utils::{CompareOptions, compare, deep_copy};
//!
//! let original = Value::from(serde_json::json!({"x": {"y": 1}}));
//! let copy = deep_copy(&original)?;
//! if let Some(x) = copy.as_object().and_then(|root| root.get("x")) {
//!     if let Some(x) = x.as_object() {
//!         x.insert("y", Value::from(2));
//!     }
//! }
//!
//! let diff = compare(&original, &copy, &CompareOptions::new().leaves_only(true))?;
//! assert_eq!(diff.len(), 1);
//! assert_eq!(diff[0].path, ".x.y");
//! # Ok::<(), treewalk_core::WalkError>(())
//! ```

mod apply;
mod compare;
mod deep_copy;
mod reduce;
mod search;

pub use apply::{apply, apply_all, apply_all_async, apply_async};
pub use compare::{CompareOptions, Difference, NodeComparison, compare, dotted_segment};
pub use deep_copy::deep_copy;
pub use reduce::reduce;
pub use search::{find_all, flatten};
