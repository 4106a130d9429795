//! Dot/bracket path expressions over JSON trees.
//!
//! Paths such as `user.name`, `contacts[0].phone` or `contacts[].phone`
//! address locations inside a [`serde_json::Value`]. This crate parses them
//! and provides the primitive operations a form layer needs:
//!
//! - [`get`] never fails; an absent path yields `None`.
//! - [`set`] creates intermediate objects and arrays as needed.
//! - [`unset`] splices array elements instead of leaving holes, and expands
//!   `[]` wildcards.
//! - [`rename_path`], [`strip_path`] and [`rename_tree`] convert between
//!   plain keys and nested-attribute keys (`person` / `person_attributes`).
//!
//! # Example
//!
//! ```
//! use nestform_path::{get, set, unset};
//! use serde_json::json;
//!
//! let doc = json!({"contacts": [{"phone": "1"}, {"phone": "2"}]});
//!
//! let doc = set(&doc, "contacts[1].phone", json!("22"));
//! assert_eq!(get(&doc, "contacts[1].phone"), Some(&json!("22")));
//!
//! let doc = unset(&doc, "contacts[0]");
//! assert_eq!(doc, json!({"contacts": [{"phone": "22"}]}));
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, Token};

mod parse;
pub use parse::{array_index, format, has_wildcard, join, parse};

mod get;
pub use get::{get, get_tokens, get_tokens_mut};

mod set;
pub use set::{set, set_mut, set_tokens_mut, MAX_PADDING};

mod unset;
pub use unset::{unset, unset_mut, unset_tokens_mut};

pub mod rename;
pub use rename::{rename_path, rename_tree, strip_path, DEFAULT_SUFFIX};

/// Errors from the checked path constructors.
///
/// The tree operations themselves are total and never return errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("EMPTY_PATH")]
    Empty,
    #[error("EMPTY_SEGMENT at {0}")]
    EmptySegment(usize),
}
