//! Version-suffix stripping for quoted package specifiers
//!
//! `"lodash@4.17.21"` becomes `"lodash"`. The default pattern is one
//! alternative per quote character, so the closing quote always matches the
//! opening one without a backreference and the search stays linear in the size
//! of the file. Custom patterns that `regex` cannot compile (lookaround,
//! backreferences) fall back to `fancy_regex`.

use super::{Edit, Rewrite};
use crate::error::TidyError;
use std::ops::Range;

/// A package token (optionally `@`-scoped) followed by `@major.minor.patch`,
/// inside single or inside double quotes.
pub const DEFAULT_PATTERN: &str = concat!(
    r#"'(?P<body_sq>@?[A-Za-z0-9_\-/]+@\d+\.\d+\.\d+)'"#,
    "|",
    r#""(?P<body_dq>@?[A-Za-z0-9_\-/]+@\d+\.\d+\.\d+)""#,
);

/// Name of the capture group whose text gets its version stripped. Groups named
/// `body_<suffix>` count too, so alternatives can each carry their own.
pub const BODY_GROUP: &str = "body";

/// Backtracking budget for patterns that need `fancy_regex`. It covers a whole
/// search, not a single match.
const BACKTRACK_LIMIT: usize = 1_000_000_000;

fn is_body_group(name: &str) -> bool {
    name == BODY_GROUP
        || name.strip_prefix(BODY_GROUP).is_some_and(|rest| rest.starts_with('_'))
}

#[derive(Debug)]
enum Engine {
    Linear(regex::Regex),
    Backtracking(fancy_regex::Regex),
}

/// A compiled specifier pattern with at least one `body` group.
#[derive(Debug)]
pub struct SpecifierPattern {
    engine: Engine,
    body_groups: Vec<String>,
}

impl SpecifierPattern {
    pub fn new(pattern: &str) -> Result<Self, TidyError> {
        let engine = match regex::Regex::new(pattern) {
            Ok(regex) => Engine::Linear(regex),
            Err(err) => {
                tracing::debug!("Pattern needs the backtracking engine: {}", err);
                Engine::Backtracking(
                    fancy_regex::RegexBuilder::new(pattern)
                        .backtrack_limit(BACKTRACK_LIMIT)
                        .build()?,
                )
            }
        };

        let names: Vec<Option<&str>> = match &engine {
            Engine::Linear(regex) => regex.capture_names().collect(),
            Engine::Backtracking(regex) => regex.capture_names().collect(),
        };
        let body_groups: Vec<String> =
            names.into_iter().flatten().filter(|n| is_body_group(n)).map(String::from).collect();

        if body_groups.is_empty() {
            return Err(TidyError::Pattern(format!(
                "pattern must define a named group `{}`: {}",
                BODY_GROUP, pattern
            )));
        }
        Ok(Self { engine, body_groups })
    }

    pub fn as_str(&self) -> &str {
        match &self.engine {
            Engine::Linear(regex) => regex.as_str(),
            Engine::Backtracking(regex) => regex.as_str(),
        }
    }

    /// Which regex engine runs this pattern.
    pub fn engine(&self) -> &'static str {
        match self.engine {
            Engine::Linear(_) => "linear",
            Engine::Backtracking(_) => "backtracking",
        }
    }

    /// Spans of every match and of the first body group that took part in it.
    fn spans(&self, content: &str) -> Result<Vec<(Range<usize>, Range<usize>)>, TidyError> {
        let mut spans = Vec::new();
        match &self.engine {
            Engine::Linear(regex) => {
                for caps in regex.captures_iter(content) {
                    let whole = caps.get(0).map(|m| m.range());
                    let body = self.body_groups.iter().find_map(|n| caps.name(n));
                    if let (Some(whole), Some(body)) = (whole, body) {
                        spans.push((whole, body.range()));
                    }
                }
            }
            Engine::Backtracking(regex) => {
                for caps in regex.captures_iter(content) {
                    let caps = caps?;
                    let whole = caps.get(0).map(|m| m.range());
                    let body = self.body_groups.iter().find_map(|n| caps.name(n));
                    if let (Some(whole), Some(body)) = (whole, body) {
                        spans.push((whole, body.range()));
                    }
                }
            }
        }
        Ok(spans)
    }
}

impl Default for SpecifierPattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN).expect("valid default specifier regex")
    }
}

/// Drop the version from a specifier body by cutting at the first `@`.
///
/// A leading `@` is the scope marker and is not a cut point. A scoped body is
/// cut at the end of its scope, so `@scope/pkg@1.2.3` yields `@scope` and the
/// package segment is lost along with the version.
pub fn strip_version(body: &str) -> &str {
    match body.strip_prefix('@') {
        Some(scoped) => {
            let end = scoped.find(|c: char| c == '/' || c == '@').unwrap_or(scoped.len());
            &body[..end + 1]
        }
        None => body.split('@').next().unwrap_or(body),
    }
}

/// Rewrite every non-overlapping match in `content`.
///
/// Only the `body` span of a match is replaced; the quotes and anything else
/// the pattern matched are copied through unchanged. A body group that falls
/// outside its match (for example inside a lookahead) is a pattern error.
pub fn rewrite_specifiers(content: &str, pattern: &SpecifierPattern) -> Result<Rewrite, TidyError> {
    let mut out = String::with_capacity(content.len());
    let mut edits = Vec::new();
    let mut last = 0;

    for (whole, body) in pattern.spans(content)? {
        if body.start < whole.start || body.end > whole.end || body.start < last {
            return Err(TidyError::Pattern(format!(
                "capture group `{}` must lie inside the match: {}",
                BODY_GROUP,
                pattern.as_str()
            )));
        }

        let stripped = strip_version(&content[body.clone()]);
        out.push_str(&content[last..body.start]);
        out.push_str(stripped);
        last = body.end;

        edits.push(Edit {
            before: content[whole.clone()].to_string(),
            after: format!(
                "{}{}{}",
                &content[whole.start..body.start],
                stripped,
                &content[body.end..whole.end]
            ),
        });
    }

    out.push_str(&content[last..]);
    Ok(Rewrite { content: out, edits })
}
