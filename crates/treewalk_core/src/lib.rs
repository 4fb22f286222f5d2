//! # treewalk_core
//!
//! Observer-driven traversal engine for nested data.
//!
//! This crate provides:
//! - A shared-handle [`Value`] model in which cycles are expressible
//! - [`WalkNode`], a positioned view of a value with path and relatives
//! - Observers with ordering, timing and predicate filters
//! - Depth-first and breadth-first walkers, synchronous and asynchronous,
//!   with a choice of policies for repeated references
//!
//! ## Example
//!
//! ```rust
//! use treewalk_core::{SyncObserver, SyncWalkConfig, Timing, Value, WalkOptions, filters, walk};
//!
//! let value = Value::from(serde_json::json!({"a": {"b": 1}, "c": [2, 3]}));
//! let mut post_order = Vec::new();
//!
//! let config = SyncWalkConfig::new(WalkOptions::new())
//!     .observer(
//!         SyncObserver::new(|node| {
//!             post_order.push(node.path());
//!             Ok(())
//!         })
//!         .with_timing(Timing::PostVisit)
//!         .with_filter(filters::not_root()),
//!     );
//!
//! walk(&value, config)?;
//!
//! assert_eq!(
//!     post_order,
//!     ["[\"a\"][\"b\"]", "[\"a\"]", "[\"c\"][0]", "[\"c\"][1]", "[\"c\"]"]
//! );
//! # Ok::<(), treewalk_core::WalkError>(())
//! ```

mod builder;
mod config;
mod context;
mod dispatch;
mod error;
pub mod filters;
mod node;
mod node_type;
mod observer;
mod registry;
mod value;
mod visitation;
mod walker;

pub use builder::{AsyncWalkBuilder, Builder, WalkBuilder};
pub use config::{
    AsyncWalkConfig, BoxedRegister, GraphMode, SyncWalkConfig, TraversalMode, WalkConfig,
    WalkOptions,
};
pub use error::{BoxError, Interrupt, ObserverResult, Result, WalkError, stop};
pub use node::{
    Descendants, NodeId, NodeIdSource, NodeKey, NodeRef, PathSegment, WalkNode,
    default_path_format,
};
pub use node_type::NodeType;
pub use observer::{
    AsyncCallback, AsyncObserver, Observer, ObserverId, Predicate, SyncCallback, SyncObserver,
    Timing,
};
pub use value::{ArrayRef, ObjectRef, Value};
pub use visitation::{IdentityRegister, VisitationRegister};
pub use walker::{AsyncWalkStep, WalkStep, walk, walk_async, walk_async_step, walk_step};
