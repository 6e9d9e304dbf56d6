//! Dependency manifest normalizer.
//!
//! Produces a deterministic requirements file:
//! - Whitespace is trimmed and internal runs collapse to one space.
//! - Blank lines are dropped.
//! - Comment lines travel with the requirement that follows them; comments
//!   after the last requirement stay at the end.
//! - Option lines (`-r`, `--index-url`, ...) keep their relative order and go
//!   first, since pip reads them before any requirement.
//! - Requirements are deduplicated on the exact normalized line; comments of
//!   a dropped duplicate move to the first occurrence. The rest is sorted by
//!   package name (case-insensitive, `_` == `-`), then by the full line.
//!   Version constraints are never touched.

use crate::error::{PruneError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

struct Entry {
    comments: Vec<String>,
    line: String,
    key: (String, String),
}

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*").expect("static regex"))
}

fn sort_key(line: &str) -> (String, String) {
    let name = name_re()
        .find(line)
        .map(|m| m.as_str())
        .unwrap_or(line)
        .to_lowercase()
        .replace('_', "-");
    (name, line.to_lowercase())
}

/// Normalize requirement lines into canonical order.
pub fn normalize_requirements<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    let mut entries: Vec<Entry> = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for raw in lines {
        let line = raw.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            pending.push(line);
        } else if line.starts_with('-') {
            options.append(&mut pending);
            if !options.contains(&line) {
                options.push(line);
            }
        } else if let Some(&idx) = seen.get(&line) {
            entries[idx].comments.append(&mut pending);
        } else {
            let key = sort_key(&line);
            seen.insert(line.clone(), entries.len());
            entries.push(Entry {
                comments: std::mem::take(&mut pending),
                line,
                key,
            });
        }
    }

    entries.sort_by(|a, b| a.key.cmp(&b.key));

    let mut out = options;
    for e in entries {
        out.extend(e.comments);
        out.push(e.line);
    }
    out.extend(pending);
    out
}

/// Rewrite the manifest at `path` in canonical order. The file must exist.
pub fn normalize_manifest(path: &Path) -> Result<bool> {
    let original = fs::read_to_string(path).map_err(|e| PruneError::required(path, e))?;
    let lines: Vec<&str> = original.lines().collect();
    let normalized = normalize_requirements(&lines);
    let mut out = normalized.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    if out == original {
        return Ok(false);
    }
    fs::write(path, &out).map_err(|e| PruneError::io(path, e))?;
    debug!(
        path = %path.display(),
        before = lines.len(),
        after = normalized.len(),
        "normalized manifest"
    );
    Ok(true)
}
