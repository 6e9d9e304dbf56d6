//! Configuration tree editor.
//!
//! Generic, project-agnostic operations used by the pruning rules:
//! - Line-block removal from text files (whole trimmed lines only).
//! - Dotted-path section removal from a TOML document, collapsing
//!   ancestors that become empty.
//! - Idempotent file/directory/glob removal and file truncation.
//! - Stripping bracketed extras from a single requirement line.
//!
//! Every mutating operation returns `Ok(true)` when something on disk (or in
//! the document) changed. An absent removal target is `Ok(false)`; an absent
//! file that an operation must *edit* is `MissingRequiredInput`.

use crate::error::{PruneError, Result};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use toml::{Table, Value};
use tracing::debug;

/// Drop every line of `content` whose trimmed form equals a trimmed line of
/// `block`. Kept lines retain their original line endings and order.
///
/// The block is split on `\n`, so a block ending in a newline also removes
/// blank lines.
pub fn filter_lines(content: &str, block: &str) -> String {
    let needles: HashSet<&str> = block.split('\n').map(str::trim).collect();
    content
        .split_inclusive('\n')
        .filter(|line| !needles.contains(line.trim()))
        .collect()
}

/// Remove `block`'s lines from the file at `file`. The file must exist.
pub fn remove_line_block(file: &Path, block: &str) -> Result<bool> {
    let original = fs::read_to_string(file).map_err(|e| PruneError::required(file, e))?;
    let filtered = filter_lines(&original, block);
    if filtered == original {
        return Ok(false);
    }
    fs::write(file, &filtered).map_err(|e| PruneError::io(file, e))?;
    debug!(
        file = %file.display(),
        removed = original.lines().count() - filtered.lines().count(),
        "removed line block"
    );
    Ok(true)
}

/// Remove the section at `dotted_path` (e.g. `tool.pytest.ini_options`).
///
/// A missing or non-table intermediate key makes this a no-op. After the
/// removal, ancestors left empty are removed bottom-up; the walk stops at the
/// first ancestor that still holds other content.
pub fn remove_section(doc: &mut Table, dotted_path: &str) -> bool {
    let keys: Vec<&str> = dotted_path.split('.').collect();
    remove_path(doc, &keys)
}

fn remove_path(table: &mut Table, keys: &[&str]) -> bool {
    match keys {
        [] => false,
        [last] => table.remove(*last).is_some(),
        [head, rest @ ..] => {
            let Some(Value::Table(child)) = table.get_mut(*head) else {
                return false;
            };
            let mut changed = remove_path(child, rest);
            // Unwinding the recursion is the backward walk: each level only
            // looks at the child it just descended into.
            if child.is_empty() {
                table.remove(*head);
                changed = true;
            }
            changed
        }
    }
}

/// Parse a TOML document from disk. The file must exist and be well formed.
pub fn load_document(path: &Path) -> Result<Table> {
    let raw = fs::read_to_string(path).map_err(|e| PruneError::required(path, e))?;
    toml::from_str::<Table>(&raw).map_err(|e| PruneError::MalformedInput {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Serialize `doc` back to `path`, keeping key insertion order.
pub fn save_document(path: &Path, doc: &Table) -> Result<()> {
    let out = toml::to_string(doc).map_err(|e| PruneError::Serialize(e.to_string()))?;
    fs::write(path, out).map_err(|e| PruneError::io(path, e))
}

/// Load `file`, remove each dotted path in order, and write it back only if
/// anything changed.
pub fn remove_sections(file: &Path, paths: &[&str]) -> Result<bool> {
    let mut doc = load_document(file)?;
    let mut changed = false;
    for p in paths {
        if remove_section(&mut doc, p) {
            debug!(file = %file.display(), section = *p, "removed section");
            changed = true;
        }
    }
    if changed {
        save_document(file, &doc)?;
    }
    Ok(changed)
}

/// Recursively remove a directory. Absence is a no-op.
pub fn remove_directory(path: &Path) -> Result<bool> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(PruneError::io(path, e)),
    };
    let res = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    res.map_err(|e| PruneError::io(path, e))?;
    debug!(path = %path.display(), "removed directory");
    Ok(true)
}

/// Remove a single file. Absence is a no-op.
pub fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PruneError::io(path, e)),
    }
}

/// Absolute glob for `pattern` under `root`. The root is escaped so that
/// brackets or wildcards in the project path match literally.
pub fn glob_under(root: &Path, pattern: &str) -> String {
    let escaped = glob::Pattern::escape(&root.to_string_lossy());
    Path::new(&escaped).join(pattern).to_string_lossy().into_owned()
}

/// Remove every regular file matching `pattern` relative to `root`.
/// Returns how many files were removed.
pub fn remove_glob(root: &Path, pattern: &str) -> Result<usize> {
    let abs = glob_under(root, pattern);
    let entries = glob::glob(&abs).map_err(|e| PruneError::Pattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;
    let mut removed = 0usize;
    for entry in entries.flatten() {
        if entry.is_file() && remove_file(&entry)? {
            removed += 1;
        }
    }
    Ok(removed)
}

/// Empty an existing file. Absence is a no-op.
pub fn truncate_file(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(m) if m.len() == 0 => Ok(false),
        Ok(_) => {
            fs::write(path, "").map_err(|e| PruneError::io(path, e))?;
            debug!(path = %path.display(), "truncated file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PruneError::io(path, e)),
    }
}

/// Rewrite lines mentioning `package[...]` as `package` plus whatever
/// followed the closing bracket, e.g.
/// `kedro-datasets[pandas-csvdataset]>=3.0` becomes `kedro-datasets>=3.0`.
pub fn strip_extras_lines(content: &str, package: &str) -> String {
    let marker = format!("{}[", package);
    content
        .split_inclusive('\n')
        .map(|line| {
            if !line.contains(&marker) {
                return line.to_string();
            }
            match (line.split_once('['), line.rsplit_once(']')) {
                (Some((name, _)), Some((_, version))) => format!("{}{}", name, version),
                _ => line.to_string(),
            }
        })
        .collect()
}

/// Apply `strip_extras_lines` to a file. The file must exist.
pub fn strip_extras(file: &Path, package: &str) -> Result<bool> {
    let original = fs::read_to_string(file).map_err(|e| PruneError::required(file, e))?;
    let stripped = strip_extras_lines(&original, package);
    if stripped == original {
        return Ok(false);
    }
    fs::write(file, stripped).map_err(|e| PruneError::io(file, e))?;
    debug!(file = %file.display(), package, "stripped extras");
    Ok(true)
}
