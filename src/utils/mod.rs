//! Small shared helpers

pub mod paths;

pub use paths::{has_extension, normalize_path};
