//! nestform - path-addressed form state.
//!
//! A [`Form`] owns a JSON tree addressed by dot/bracket paths
//! (`user.phones[0].number`), a defaults snapshot for dirty tracking and
//! reset, a map of validation errors keyed by path, and the flags of an
//! asynchronous submission. [`DynamicInputs`] manages repeatable rows of an
//! array-valued field.
//!
//! Tree primitives come from [`nestform_path`], re-exported as [`path`].

pub mod config;
mod dynamic;
pub mod error;
pub mod error_map;
mod form;
pub mod remember;
pub mod submit;

pub use config::FormConfig;
pub use dynamic::{DynamicInputs, InputOverride};
pub use error::{FormError, TransportError};
pub use error_map::{error_map, ErrorMap, ErrorMessages};
pub use form::{ChangeCallback, Form, FormBuilder, TransformCallback};
pub use remember::{MemoryRememberStore, RememberStore};
pub use submit::{
    CancelHandle, Hooks, HttpClient, Method, Navigator, Progress, Visit, VisitEvents, VisitOptions,
    BASE_ERROR_KEY,
};

pub use nestform_path as path;
pub use nestform_util::Fields;
