//! Answer set schema: the resolved generation answers consumed by the rules.
//!
//! Raw answers arrive as a JSON blob (`--full-conf`) or the template engine's
//! YAML answers file. Only a handful of keys matter; the rest are ignored.

use crate::error::{PruneError, Result};
use crate::models::tools::{canonicalize_tool_selection, parse_tool_ids, ToolSelection};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Deserialize, Default)]
/// Answers as supplied, before validation.
pub struct RawAnswers {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default, alias = "package_name")]
    pub python_package: Option<String>,
    #[serde(default, alias = "tools")]
    pub project_tools: Option<ToolsField>,
    #[serde(default)]
    pub example_pipeline: Option<Flag>,
    #[serde(default, alias = "local_data")]
    pub include_local_data: Option<Flag>,
}

#[derive(Deserialize, Clone)]
#[serde(untagged)]
pub enum ToolsField {
    Single(u8),
    Text(String),
    List(Vec<ToolId>),
}

#[derive(Deserialize, Clone)]
#[serde(untagged)]
pub enum ToolId {
    Number(u8),
    Text(String),
}

#[derive(Deserialize, Clone)]
#[serde(untagged)]
/// Booleans may be real booleans or their common string spellings.
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    fn resolve(&self, key: &str) -> Result<bool> {
        match self {
            Flag::Bool(b) => Ok(*b),
            Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Ok(true),
                "false" | "no" | "n" | "0" | "" => Ok(false),
                other => Err(PruneError::invalid_answers(format!(
                    "'{}' is not a boolean for {}",
                    other, key
                ))),
            },
        }
    }
}

#[derive(Debug, Clone)]
/// Validated, immutable answers.
pub struct AnswerSet {
    pub project_name: Option<String>,
    pub package_name: Option<String>,
    pub tools: ToolSelection,
    pub example_pipeline: bool,
    pub include_local_data: Option<bool>,
}

fn package_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"))
}

/// Default package name for a project name: lowercase, spaces and dashes
/// become underscores.
pub fn derive_package_name(project_name: &str) -> String {
    project_name
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

impl AnswerSet {
    pub fn from_json(s: &str) -> Result<AnswerSet> {
        let raw: RawAnswers = serde_json::from_str(s)
            .map_err(|e| PruneError::invalid_answers(format!("answers are not valid JSON: {}", e)))?;
        AnswerSet::from_raw(raw)
    }

    pub fn from_yaml(s: &str) -> Result<AnswerSet> {
        let raw: RawAnswers = serde_yaml::from_str(s)
            .map_err(|e| PruneError::invalid_answers(format!("answers are not valid YAML: {}", e)))?;
        AnswerSet::from_raw(raw)
    }

    pub fn from_raw(raw: RawAnswers) -> Result<AnswerSet> {
        let ids = match raw.project_tools {
            None => Vec::new(),
            Some(ToolsField::Single(n)) => vec![n],
            Some(ToolsField::Text(s)) => parse_tool_ids(&s)?,
            Some(ToolsField::List(items)) => {
                let mut ids = Vec::new();
                for it in items {
                    match it {
                        ToolId::Number(n) => ids.push(n),
                        ToolId::Text(s) => ids.extend(parse_tool_ids(&s)?),
                    }
                }
                ids
            }
        };
        let tools = canonicalize_tool_selection(&ids)?;

        let package_name = match (raw.python_package, raw.project_name.as_deref()) {
            (Some(p), _) => Some(p.trim().to_string()),
            (None, Some(name)) if !name.trim().is_empty() => Some(derive_package_name(name)),
            _ => None,
        };
        if let Some(p) = package_name.as_deref() {
            if !package_re().is_match(p) {
                return Err(PruneError::invalid_answers(format!(
                    "'{}' is not a valid Python package name",
                    p
                )));
            }
        }

        let example_pipeline = match raw.example_pipeline {
            Some(f) => f.resolve("example_pipeline")?,
            None => false,
        };
        let include_local_data = raw
            .include_local_data
            .map(|f| f.resolve("include_local_data"))
            .transpose()?;

        Ok(AnswerSet {
            project_name: raw.project_name,
            package_name,
            tools,
            example_pipeline,
            include_local_data,
        })
    }
}
