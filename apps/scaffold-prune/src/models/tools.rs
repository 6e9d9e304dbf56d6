//! Tool catalog and canonical tool selection.
//!
//! The catalog maps the numeric ids offered at generation time to canonical
//! tool names. An empty selection renders as the `"None"` sentinel, which no
//! rule ever matches.

use crate::error::{PruneError, Result};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tool {
    Linting,
    Testing,
    CustomLogging,
    Documentation,
    DataStructure,
    PySpark,
    KedroViz,
}

/// Numeric id -> tool, in prompt order.
pub const TOOL_CATALOG: [(u8, Tool); 7] = [
    (1, Tool::Linting),
    (2, Tool::Testing),
    (3, Tool::CustomLogging),
    (4, Tool::Documentation),
    (5, Tool::DataStructure),
    (6, Tool::PySpark),
    (7, Tool::KedroViz),
];

/// Rendered name of an empty selection.
pub const NONE_SENTINEL: &str = "None";

impl Tool {
    pub fn from_id(id: u8) -> Option<Tool> {
        TOOL_CATALOG
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, t)| *t)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Linting => "Linting",
            Tool::Testing => "Testing",
            Tool::CustomLogging => "Custom Logging",
            Tool::Documentation => "Documentation",
            Tool::DataStructure => "Data Structure",
            Tool::PySpark => "PySpark",
            Tool::KedroViz => "Kedro Viz",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSelection(BTreeSet<Tool>);

impl ToolSelection {
    pub fn contains(&self, tool: Tool) -> bool {
        self.0.contains(&tool)
    }

    pub fn contains_any(&self, tools: &[Tool]) -> bool {
        tools.iter().any(|t| self.contains(*t))
    }

    /// Canonical names in catalog order, or `["None"]` when empty.
    pub fn names(&self) -> Vec<&'static str> {
        if self.0.is_empty() {
            return vec![NONE_SENTINEL];
        }
        self.0.iter().map(|t| t.name()).collect()
    }
}

impl FromIterator<Tool> for ToolSelection {
    fn from_iter<I: IntoIterator<Item = Tool>>(iter: I) -> Self {
        ToolSelection(iter.into_iter().collect())
    }
}

/// Map raw numeric ids through the catalog. Unknown ids are rejected.
pub fn canonicalize_tool_selection(raw_ids: &[u8]) -> Result<ToolSelection> {
    raw_ids
        .iter()
        .map(|id| {
            Tool::from_id(*id).ok_or_else(|| {
                PruneError::invalid_answers(format!(
                    "unknown tool id {} (expected 1-{})",
                    id,
                    TOOL_CATALOG.len()
                ))
            })
        })
        .collect()
}

/// Parse the raw tools answer: `"1,3"`, `"2-4,7"`, `"all"`, `"none"` or `""`.
pub fn parse_tool_ids(raw: &str) -> Result<Vec<u8>> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }
    if s.eq_ignore_ascii_case("all") {
        return Ok(TOOL_CATALOG.iter().map(|(i, _)| *i).collect());
    }
    let mut ids = Vec::new();
    for tok in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some((a, b)) = tok.split_once('-') {
            let start = parse_id(a)?;
            let end = parse_id(b)?;
            if start > end {
                return Err(PruneError::invalid_answers(format!(
                    "invalid tool range '{}'",
                    tok
                )));
            }
            ids.extend(start..=end);
        } else {
            ids.push(parse_id(tok)?);
        }
    }
    Ok(ids)
}

fn parse_id(tok: &str) -> Result<u8> {
    tok.trim()
        .parse::<u8>()
        .map_err(|_| PruneError::invalid_answers(format!("invalid tool id '{}'", tok.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_none_sentinel() {
        let sel = canonicalize_tool_selection(&[]).unwrap();
        assert_eq!(sel.names(), vec!["None"]);
        assert!(TOOL_CATALOG.iter().all(|(_, t)| !sel.contains(*t)));
    }

    #[test]
    fn test_canonicalize_maps_catalog_names() {
        let sel = canonicalize_tool_selection(&[3, 1, 3]).unwrap();
        assert_eq!(sel.names(), vec!["Linting", "Custom Logging"]);
        assert!(sel.contains(Tool::CustomLogging));
        assert!(!sel.contains(Tool::Testing));
    }

    #[test]
    fn test_unknown_id_rejected() {
        let err = canonicalize_tool_selection(&[8]).unwrap_err();
        assert!(err.to_string().contains("unknown tool id 8"));
    }

    #[test]
    fn test_parse_tool_ids_forms() {
        assert_eq!(parse_tool_ids("1,3").unwrap(), vec![1, 3]);
        assert_eq!(parse_tool_ids(" 2-4 , 7").unwrap(), vec![2, 3, 4, 7]);
        assert_eq!(parse_tool_ids("all").unwrap().len(), 7);
        assert!(parse_tool_ids("none").unwrap().is_empty());
        assert!(parse_tool_ids("").unwrap().is_empty());
        assert!(parse_tool_ids("4-2").is_err());
        assert!(parse_tool_ids("lint").is_err());
    }

    #[test]
    fn test_catalog_ids_resolve() {
        for (id, tool) in TOOL_CATALOG {
            assert_eq!(Tool::from_id(id), Some(tool));
        }
        assert_eq!(Tool::from_id(0), None);
    }
}
