//! Shared data models: answers, tool catalog, and the pass report.

pub mod answers;
pub mod tools;

use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
/// One executed (or planned) removal action.
pub struct ActionRecord {
    pub category: String,
    pub action: String,
    pub target: String,
    /// Applied: whether the project changed. Dry run: whether the target exists.
    pub changed: bool,
}

#[derive(Serialize, Debug, Clone, Default)]
/// Aggregated counts used by printers.
pub struct Summary {
    pub changed: usize,
    pub unchanged: usize,
    pub total: usize,
}

#[derive(Serialize, Debug, Clone)]
/// Result of a full pass over a project.
pub struct Report {
    pub dry_run: bool,
    pub tools: Vec<&'static str>,
    pub actions: Vec<ActionRecord>,
    pub summary: Summary,
}

impl Report {
    pub fn new(dry_run: bool, tools: Vec<&'static str>, actions: Vec<ActionRecord>) -> Report {
        let changed = actions.iter().filter(|a| a.changed).count();
        let summary = Summary {
            changed,
            unchanged: actions.len() - changed,
            total: actions.len(),
        };
        Report {
            dry_run,
            tools,
            actions,
            summary,
        }
    }
}
