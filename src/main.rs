//! import-tidy: normalize import specifiers in a source tree
//!
//! Strips pinned versions from quoted package specifiers and optionally
//! comments out unused imports, rewriting files in place.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
