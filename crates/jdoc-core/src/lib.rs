//! jdoc-core: a file-backed JSON document accessor
//!
//! A document is loaded from disk into a `serde_json::Value` and addressed by
//! `(key, root_object)` pairs:
//! - queries return borrowed values, or null/empty when nothing is there
//! - mutations edit the tree and immediately rewrite the whole file
//! - arrays support append, scalar removal and object-element removal
//!
//! ```no_run
//! use jdoc_core::DocumentAccessor;
//!
//! let mut doc = DocumentAccessor::open("settings.json")?;
//! doc.set("volume", 7, "audio")?;
//! assert_eq!(doc.get("volume", "audio"), &serde_json::json!(7));
//! # Ok::<(), jdoc_core::AccessError>(())
//! ```
pub mod accessor;
pub mod address;
pub mod edit;
pub mod error;
pub mod persist;
pub mod query;
pub mod value;

pub use accessor::DocumentAccessor;
pub use address::RootObject;
pub use error::{AccessError, Result};
pub use persist::{PersistOptions, read_document, render_document, write_document};
pub use value::{NULL, ValueKind, kind_of};
