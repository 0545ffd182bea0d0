//! # bugtrack-store
//!
//! Storage and query layer for bug reports.
//!
//! This crate provides:
//! - `BugRecord`, `Status`, and `Priority` (the tracked entity)
//! - `KeyValueStore` backends (in-memory and directory-backed)
//! - `BugStore` (create / list / triage over one key-value entry)
//! - `query::filter` (the dashboard's search and facet filter)
//! - status summaries and the screenshot reference helper
//!
//! Rendering and routing live in the presentation crate (`bugtrack-cli`).
//!
//! ## Data model
//!
//! ```text
//! KeyValueStore["bugTracker_bugs"] (JSON array, most recent first)
//!     ↕  load / persist (full read-modify-write)
//! BugStore (create, update_status, update_assignee, list_all)
//!     ↓
//! query::filter (pure, order-preserving)
//! ```

pub mod bug;
pub mod id;
pub mod kv;
pub mod query;
pub mod screenshot;
pub mod stats;
pub mod store;

pub use bug::{BugRecord, ParseEnumError, Priority, Status};
pub use id::generate_bug_id;
pub use kv::{FileKv, KeyValueStore, KvError, MemoryKv};
pub use query::{FilterCriteria, PriorityFilter, StatusFilter, filter};
pub use screenshot::{DEFAULT_MAX_SCREENSHOT_BYTES, ScreenshotError, screenshot_reference};
pub use stats::StatusCounts;
pub use store::{BUGS_KEY, BugStore, BugStoreError, NewBug, ValidationError};
