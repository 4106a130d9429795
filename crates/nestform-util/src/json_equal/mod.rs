//! JSON equality utilities.
//!
//! Structural comparison used to decide whether form data differs from its
//! defaults.

mod deep_equal;

pub use deep_equal::{deep_equal, is_dirty};
