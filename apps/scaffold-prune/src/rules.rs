//! Statically declared removal rules, one per tool category.
//!
//! Paths are relative to the project root. `{package}` in a path is replaced
//! by the answers' package name; steps that need it are skipped when the
//! answers carry none. `Manifest` and `BuildConfig` steps target the
//! configured manifest and build configuration files.

use crate::models::answers::AnswerSet;
use crate::models::tools::Tool;

pub const PACKAGE_PLACEHOLDER: &str = "{package}";

pub const LINT_REQUIREMENTS: &str = "ruff~=0.1.8\n";
pub const LINT_SECTIONS: &[&str] = &["tool.ruff", "tool.ruff.format"];

pub const TEST_REQUIREMENTS: &str = "pytest-cov~=3.0\npytest-mock>=1.7.1, <2.0\npytest~=7.2";
pub const TEST_SECTIONS: &[&str] = &["tool.pytest.ini_options", "tool.coverage.report"];

pub const DOCS_SECTIONS: &[&str] = &["project.optional-dependencies.docs"];

pub const EXAMPLE_PIPELINE_REQUIREMENTS: &str = "seaborn~=0.12.1\nscikit-learn~=1.0\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Remove whole trimmed lines of the block from the manifest.
    ManifestLines(&'static str),
    /// Remove dotted sections from the build configuration.
    BuildSections(&'static [&'static str]),
    /// Strip `[extras]` from the manifest line of this package.
    ManifestExtras(&'static str),
    RemoveDir(&'static str),
    RemoveFile(&'static str),
    RemoveGlob(&'static str),
    TruncateFile(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Fires when the tool was not selected.
    Absent(Tool),
    /// Fires when the tool was not selected and no example pipeline was requested.
    AbsentWithoutExample(Tool),
    /// Fires when any of the tools was selected and no example pipeline was requested.
    AnyWithoutExample(&'static [Tool]),
}

impl Condition {
    pub fn fires(&self, answers: &AnswerSet) -> bool {
        match self {
            Condition::Absent(t) => !answers.tools.contains(*t),
            Condition::AbsentWithoutExample(t) => {
                !answers.tools.contains(*t) && !answers.example_pipeline
            }
            Condition::AnyWithoutExample(ts) => {
                answers.tools.contains_any(ts) && !answers.example_pipeline
            }
        }
    }
}

#[derive(Debug)]
pub struct RemovalRule {
    pub category: &'static str,
    pub when: Condition,
    pub steps: &'static [Step],
}

/// All rules in evaluation order. The example-pipeline cleanup edits the
/// manifest, so it must stay ahead of normalization, which the dispatcher
/// always runs last.
pub const RULES: &[RemovalRule] = &[
    RemovalRule {
        category: "Linting",
        when: Condition::Absent(Tool::Linting),
        steps: &[
            Step::ManifestLines(LINT_REQUIREMENTS),
            Step::BuildSections(LINT_SECTIONS),
        ],
    },
    RemovalRule {
        category: "Testing",
        when: Condition::Absent(Tool::Testing),
        steps: &[
            Step::ManifestLines(TEST_REQUIREMENTS),
            Step::BuildSections(TEST_SECTIONS),
            Step::RemoveDir("tests"),
        ],
    },
    RemovalRule {
        category: "Custom Logging",
        when: Condition::Absent(Tool::CustomLogging),
        steps: &[Step::RemoveFile("conf/logging.yml")],
    },
    RemovalRule {
        category: "Documentation",
        when: Condition::Absent(Tool::Documentation),
        steps: &[Step::BuildSections(DOCS_SECTIONS), Step::RemoveDir("docs")],
    },
    RemovalRule {
        category: "Data Structure",
        when: Condition::AbsentWithoutExample(Tool::DataStructure),
        steps: &[Step::RemoveDir("data")],
    },
    RemovalRule {
        category: "PySpark/Kedro Viz starter",
        when: Condition::AnyWithoutExample(&[Tool::PySpark, Tool::KedroViz]),
        steps: &[
            Step::RemoveFile("data/01_raw/companies.csv"),
            Step::RemoveFile("data/01_raw/reviews.csv"),
            Step::RemoveFile("data/01_raw/shuttles.xlsx"),
            Step::TruncateFile("conf/base/catalog.yml"),
            Step::RemoveGlob("conf/base/parameters_*.yml"),
            Step::RemoveGlob("conf/base/parameters/*.yml"),
            Step::RemoveDir("src/{package}/pipelines/data_science"),
            Step::RemoveDir("src/{package}/pipelines/data_processing"),
            Step::RemoveDir("src/{package}/pipelines/reporting"),
            Step::RemoveFile("tests/pipelines/data_science/test_pipeline.py"),
            Step::ManifestLines(EXAMPLE_PIPELINE_REQUIREMENTS),
            Step::ManifestExtras("kedro-datasets"),
        ],
    },
];

/// Rules whose condition fires for `answers`, in declaration order.
pub fn firing_rules(answers: &AnswerSet) -> impl Iterator<Item = &'static RemovalRule> + '_ {
    RULES.iter().filter(move |r| r.when.fires(answers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answers::AnswerSet;

    fn answers(json: &str) -> AnswerSet {
        AnswerSet::from_json(json).unwrap()
    }

    #[test]
    fn test_empty_selection_fires_every_absence_rule() {
        let a = answers(r#"{"tools": ""}"#);
        let fired: Vec<&str> = firing_rules(&a).map(|r| r.category).collect();
        assert_eq!(
            fired,
            vec!["Linting", "Testing", "Custom Logging", "Documentation", "Data Structure"]
        );
    }

    #[test]
    fn test_all_selected_fires_only_starter_cleanup() {
        let a = answers(r#"{"tools": "all"}"#);
        let fired: Vec<&str> = firing_rules(&a).map(|r| r.category).collect();
        assert_eq!(fired, vec!["PySpark/Kedro Viz starter"]);
    }

    #[test]
    fn test_example_pipeline_suppresses_starter_and_data_rules() {
        let a = answers(r#"{"tools": "6", "example_pipeline": true}"#);
        assert!(firing_rules(&a).all(|r| r.category != "PySpark/Kedro Viz starter"));
        assert!(firing_rules(&a).all(|r| r.category != "Data Structure"));
    }

    #[test]
    fn test_viz_alone_triggers_starter_cleanup() {
        let a = answers(r#"{"tools": "7"}"#);
        assert!(firing_rules(&a).any(|r| r.category == "PySpark/Kedro Viz starter"));
    }
}
