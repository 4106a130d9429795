//! nestform-util - tree helpers shared by the nestform crates.

pub mod fields;
pub mod fill_empty;
pub mod json_equal;

// Re-exports for convenience
pub use fields::Fields;
pub use fill_empty::fill_empty_values;
pub use json_equal::{deep_equal, is_dirty};
