//! Comment out single-line imports whose bindings are never referenced.

use super::{Edit, Rewrite};
use once_cell::sync::Lazy;
use regex::Regex;

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^import\s+(\{[^}]+\}|\w+|\*\s+as\s+\w+)\s+from\s+['"][^'"]+['"]"#)
        .expect("valid import regex")
});
static NAMED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("valid named regex"));

/// Names bound by the import clause (`{ a, b as c }`, `* as ns` or a default name).
///
/// For renamed imports the original name is used, not the local alias.
fn bindings(clause: &str) -> Vec<String> {
    if let Some(named) = NAMED_RE.captures(clause).and_then(|c| c.get(1)) {
        return named
            .as_str()
            .split(',')
            .filter_map(|part| part.trim().split(" as ").next())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(ns) = clause.strip_prefix("* as ") {
        return vec![ns.trim().to_string()];
    }
    vec![clause.trim().to_string()]
}

fn is_referenced(name: &str, rest: &str) -> bool {
    match Regex::new(&format!(r"\b{}\b", regex::escape(name))) {
        Ok(re) => re.is_match(rest),
        // Can't check it, so keep the import.
        Err(_) => true,
    }
}

/// Prefix `// ` to every import line none of whose bindings appear elsewhere in the file.
///
/// Lines are split on `\n` only, so `\r\n` files keep their carriage returns.
pub fn comment_unused_imports(content: &str) -> Rewrite {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut out: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    let mut edits = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(clause) = IMPORT_RE.captures(line).and_then(|c| c.get(1)) else {
            continue;
        };

        let names = bindings(clause.as_str());
        if names.is_empty() {
            continue;
        }

        let rest = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, l)| *l)
            .collect::<Vec<_>>()
            .join("\n");

        if names.iter().all(|name| !is_referenced(name, &rest)) {
            let commented = format!("// {}", line);
            edits.push(Edit { before: line.to_string(), after: commented.clone() });
            out[idx] = commented;
        }
    }

    Rewrite { content: out.join("\n"), edits }
}
