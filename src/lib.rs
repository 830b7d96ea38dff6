//! import-tidy: strip pinned versions from import specifiers
//!
//! Walks a source tree, selects files by extension, and rewrites quoted
//! specifiers such as `"lodash@4.17.21"` to `"lodash"` in place. A second
//! pass comments out imports whose bindings are never referenced.

pub mod config;
pub mod error;
pub mod rewrite;
pub mod scan;
pub mod utils;

pub use config::{FailurePolicy, NormalizeConfig, WalkOptions};
pub use error::TidyError;
pub use rewrite::{comment_unused, normalize, FileOutcome, RunReport};
