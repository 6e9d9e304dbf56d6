//! Tool selection dispatcher.
//!
//! Resolves the firing rules for an answer set into concrete actions against
//! a project directory, executes them through the editor in declaration
//! order, and finishes with manifest normalization. The first fatal error
//! aborts the pass; nothing is rolled back.

use crate::editor;
use crate::error::Result;
use crate::manifest;
use crate::models::answers::AnswerSet;
use crate::models::{ActionRecord, Report};
use crate::rules::{firing_rules, Step, PACKAGE_PLACEHOLDER};
use crate::utils;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Category label used for the final normalization step.
pub const MANIFEST_CATEGORY: &str = "Manifest";

/// Fixed file locations of a generated project.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub build_config: PathBuf,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, manifest: &str, build_config: &str) -> Project {
        let root = root.into();
        Project {
            manifest: root.join(manifest),
            build_config: root.join(build_config),
            root,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RemoveLines {
        file: PathBuf,
        block: &'static str,
    },
    RemoveSections {
        file: PathBuf,
        sections: &'static [&'static str],
    },
    StripExtras {
        file: PathBuf,
        package: &'static str,
    },
    RemoveDir(PathBuf),
    RemoveFile(PathBuf),
    /// Pattern relative to the project root.
    RemoveGlob(String),
    TruncateFile(PathBuf),
    NormalizeManifest(PathBuf),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::RemoveLines { .. } => "remove-lines",
            Action::RemoveSections { .. } => "remove-sections",
            Action::StripExtras { .. } => "strip-extras",
            Action::RemoveDir(_) => "remove-dir",
            Action::RemoveFile(_) => "remove-file",
            Action::RemoveGlob(_) => "remove-glob",
            Action::TruncateFile(_) => "truncate-file",
            Action::NormalizeManifest(_) => "normalize-manifest",
        }
    }

    /// Human-readable target, relative to the project root where possible.
    pub fn target(&self, root: &Path) -> String {
        match self {
            Action::RemoveLines { file, .. } | Action::StripExtras { file, .. } => {
                utils::rel_to(root, file)
            }
            Action::RemoveSections { file, sections } => {
                format!("{} [{}]", utils::rel_to(root, file), sections.join(", "))
            }
            Action::RemoveDir(p)
            | Action::RemoveFile(p)
            | Action::TruncateFile(p)
            | Action::NormalizeManifest(p) => utils::rel_to(root, p),
            Action::RemoveGlob(pattern) => pattern.clone(),
        }
    }

    /// Perform the action. Returns whether the project changed.
    pub fn execute(&self, root: &Path) -> Result<bool> {
        match self {
            Action::RemoveLines { file, block } => editor::remove_line_block(file, block),
            Action::RemoveSections { file, sections } => editor::remove_sections(file, sections),
            Action::StripExtras { file, package } => editor::strip_extras(file, package),
            Action::RemoveDir(p) => editor::remove_directory(p),
            Action::RemoveFile(p) => editor::remove_file(p),
            Action::RemoveGlob(pattern) => Ok(editor::remove_glob(root, pattern)? > 0),
            Action::TruncateFile(p) => editor::truncate_file(p),
            Action::NormalizeManifest(p) => manifest::normalize_manifest(p),
        }
    }

    /// Whether the action's target is currently present (dry-run reporting).
    pub fn target_exists(&self, root: &Path) -> bool {
        match self {
            Action::RemoveLines { file, .. }
            | Action::RemoveSections { file, .. }
            | Action::StripExtras { file, .. } => file.exists(),
            Action::RemoveDir(p)
            | Action::RemoveFile(p)
            | Action::TruncateFile(p)
            | Action::NormalizeManifest(p) => p.exists(),
            Action::RemoveGlob(pattern) => {
                glob::glob(&editor::glob_under(root, pattern))
                    .map(|mut it| it.any(|e| e.map(|p| p.is_file()).unwrap_or(false)))
                    .unwrap_or(false)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub category: &'static str,
    pub action: Action,
}

fn resolve_path(project: &Project, answers: &AnswerSet, rel: &str) -> Option<PathBuf> {
    if !rel.contains(PACKAGE_PLACEHOLDER) {
        return Some(project.root.join(rel));
    }
    let pkg = answers.package_name.as_deref()?;
    Some(project.root.join(rel.replace(PACKAGE_PLACEHOLDER, pkg)))
}

/// Concrete actions for every firing rule, in declaration order.
/// Normalization is not included.
pub fn plan_rules(project: &Project, answers: &AnswerSet) -> Vec<PlannedAction> {
    let mut planned = Vec::new();
    for rule in firing_rules(answers) {
        info!(category = rule.category, "rule fires");
        for step in rule.steps {
            let action = match *step {
                Step::ManifestLines(block) => Action::RemoveLines {
                    file: project.manifest.clone(),
                    block,
                },
                Step::BuildSections(sections) => Action::RemoveSections {
                    file: project.build_config.clone(),
                    sections,
                },
                Step::ManifestExtras(package) => Action::StripExtras {
                    file: project.manifest.clone(),
                    package,
                },
                Step::RemoveGlob(pattern) => Action::RemoveGlob(pattern.to_string()),
                Step::RemoveDir(rel)
                | Step::RemoveFile(rel)
                | Step::TruncateFile(rel) => {
                    let Some(path) = resolve_path(project, answers, rel) else {
                        warn!(
                            category = rule.category,
                            path = rel,
                            "no package name in answers; skipping"
                        );
                        continue;
                    };
                    match *step {
                        Step::RemoveDir(_) => Action::RemoveDir(path),
                        Step::RemoveFile(_) => Action::RemoveFile(path),
                        _ => Action::TruncateFile(path),
                    }
                }
            };
            planned.push(PlannedAction {
                category: rule.category,
                action,
            });
        }
    }
    planned
}

fn record(project: &Project, p: &PlannedAction, changed: bool) -> ActionRecord {
    ActionRecord {
        category: p.category.to_string(),
        action: p.action.kind().to_string(),
        target: p.action.target(&project.root),
        changed,
    }
}

/// Execute every firing rule's actions against the project.
pub fn apply_rules(project: &Project, answers: &AnswerSet) -> Result<Vec<ActionRecord>> {
    let mut records = Vec::new();
    for p in plan_rules(project, answers) {
        let changed = p.action.execute(&project.root)?;
        records.push(record(project, &p, changed));
    }
    Ok(records)
}

/// Sort and deduplicate the project's manifest. Always the last step.
pub fn normalize_manifest(project: &Project) -> Result<ActionRecord> {
    let p = PlannedAction {
        category: MANIFEST_CATEGORY,
        action: Action::NormalizeManifest(project.manifest.clone()),
    };
    let changed = p.action.execute(&project.root)?;
    Ok(record(project, &p, changed))
}

/// Run the whole pass. With `write = false` nothing is touched and each
/// record's `changed` reports whether the action's target currently exists.
pub fn run(project: &Project, answers: &AnswerSet, write: bool) -> Result<Report> {
    let tools = answers.tools.names();
    info!(
        root = %project.root.display(),
        tools = ?tools,
        example_pipeline = answers.example_pipeline,
        dry_run = !write,
        "pruning project"
    );
    if write {
        let mut records = apply_rules(project, answers)?;
        records.push(normalize_manifest(project)?);
        return Ok(Report::new(false, tools, records));
    }
    let mut planned = plan_rules(project, answers);
    planned.push(PlannedAction {
        category: MANIFEST_CATEGORY,
        action: Action::NormalizeManifest(project.manifest.clone()),
    });
    let records = planned
        .iter()
        .map(|p| record(project, p, p.action.target_exists(&project.root)))
        .collect();
    Ok(Report::new(true, tools, records))
}
