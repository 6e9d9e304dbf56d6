// End-to-end passes over a miniature generated project.

use scaffold_prune::config;
use scaffold_prune::dispatch::{self, Project};
use scaffold_prune::editor::load_document;
use scaffold_prune::models::answers::AnswerSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const REQUIREMENTS: &str = "ruff~=0.1.8
kedro~=0.19.3
pytest~=7.2
pytest-cov~=3.0
pytest-mock>=1.7.1, <2.0
ipython>=8.10
kedro-datasets[pandas-csvdataset]>=3.0
notebook
";

const PYPROJECT: &str = r#"[project]
name = "demo"
dynamic = ["dependencies", "version"]

[project.optional-dependencies]
docs = ["sphinx"]
dev = ["pytest-cov"]

[tool.kedro]
package_name = "demo"

[tool.ruff]
line-length = 88

[tool.ruff.format]
docstring-code-format = true

[tool.pytest.ini_options]
addopts = "--cov-report term-missing"

[tool.coverage.report]
fail_under = 0
"#;

fn generated_project(root: &Path) {
    for d in ["conf/base", "docs/source", "tests/pipelines", "data/01_raw", "src/demo"] {
        fs::create_dir_all(root.join(d)).unwrap();
    }
    fs::write(root.join("requirements.txt"), REQUIREMENTS).unwrap();
    fs::write(root.join("pyproject.toml"), PYPROJECT).unwrap();
    fs::write(root.join("conf/logging.yml"), "version: 1\n").unwrap();
    fs::write(root.join("conf/base/catalog.yml"), "").unwrap();
    fs::write(root.join("docs/source/conf.py"), "").unwrap();
    fs::write(root.join("tests/test_run.py"), "").unwrap();
    fs::write(root.join("data/01_raw/.gitkeep"), "").unwrap();
}

#[test]
fn linting_and_logging_selected() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    generated_project(root);

    let answers = AnswerSet::from_json(r#"{"tools": "1,3", "project_name": "demo"}"#).unwrap();
    let project = Project::new(root, "requirements.txt", "pyproject.toml");
    let report = dispatch::run(&project, &answers, true).unwrap();
    assert!(!report.dry_run);
    assert_eq!(report.tools, vec!["Linting", "Custom Logging"]);

    assert!(!root.join("tests").exists());
    assert!(!root.join("docs").exists());
    assert!(!root.join("data").exists());
    assert!(root.join("conf/logging.yml").exists());
    assert!(root.join("src/demo").exists());

    let manifest = fs::read_to_string(root.join("requirements.txt")).unwrap();
    assert!(!manifest.contains("pytest"));
    assert_eq!(
        manifest,
        "ipython>=8.10\nkedro~=0.19.3\nkedro-datasets[pandas-csvdataset]>=3.0\nnotebook\nruff~=0.1.8\n"
    );

    let doc = load_document(&root.join("pyproject.toml")).unwrap();
    let tool = doc.get("tool").and_then(|v| v.as_table()).unwrap();
    assert!(tool.contains_key("ruff"));
    assert!(tool.contains_key("kedro"));
    assert!(!tool.contains_key("pytest"));
    assert!(!tool.contains_key("coverage"));
    let extras = doc
        .get("project")
        .and_then(|p| p.get("optional-dependencies"))
        .and_then(|v| v.as_table())
        .unwrap();
    assert!(!extras.contains_key("docs"));
    assert!(extras.contains_key("dev"));
}

#[test]
fn empty_selection_removes_every_category() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    generated_project(root);

    let answers = AnswerSet::from_json(r#"{"tools": ""}"#).unwrap();
    assert_eq!(answers.tools.names(), vec!["None"]);
    let project = Project::new(root, "requirements.txt", "pyproject.toml");
    dispatch::run(&project, &answers, true).unwrap();

    assert!(!root.join("conf/logging.yml").exists());
    assert!(!root.join("tests").exists());
    let manifest = fs::read_to_string(root.join("requirements.txt")).unwrap();
    assert!(!manifest.contains("ruff"));
    let doc = load_document(&root.join("pyproject.toml")).unwrap();
    let tool = doc.get("tool").and_then(|v| v.as_table()).unwrap();
    assert_eq!(tool.keys().collect::<Vec<_>>(), vec!["kedro"]);
}

#[test]
fn data_structure_selected_keeps_data_dir() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    generated_project(root);

    let answers =
        AnswerSet::from_json(r#"{"tools": "5", "example_pipeline": false}"#).unwrap();
    let project = Project::new(root, "requirements.txt", "pyproject.toml");
    let report = dispatch::run(&project, &answers, true).unwrap();

    assert!(root.join("data/01_raw/.gitkeep").exists());
    assert!(!root.join("tests").exists());
    assert!(report
        .actions
        .iter()
        .all(|r| r.category != "Data Structure"));
}

#[test]
fn second_pass_changes_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    generated_project(root);

    let answers = AnswerSet::from_json(r#"{"tools": "2"}"#).unwrap();
    let project = Project::new(root, "requirements.txt", "pyproject.toml");
    dispatch::run(&project, &answers, true).unwrap();
    let again = dispatch::run(&project, &answers, true).unwrap();
    assert_eq!(again.summary.changed, 0);
}

#[test]
fn answers_file_and_config_drive_the_pass() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    generated_project(root);
    fs::rename(root.join("requirements.txt"), root.join("reqs.txt")).unwrap();
    fs::write(root.join("scaffold-prune.toml"), "manifest = \"reqs.txt\"\n").unwrap();
    fs::write(
        root.join(".copier-answers.yml"),
        "_src_path: gh:acme/starter\nproject_tools: 1-4\nexample_pipeline: false\n",
    )
    .unwrap();

    let eff = config::resolve_effective(root.to_str(), None, None, None, None).unwrap();
    let answers = config::load_answers(&eff, None).unwrap();
    dispatch::run(&eff.project(), &answers, true).unwrap();

    assert!(root.join("tests").exists());
    assert!(root.join("docs").exists());
    assert!(!root.join("data").exists());
    let manifest = fs::read_to_string(root.join("reqs.txt")).unwrap();
    assert!(manifest.starts_with("ipython>=8.10\n"));
}

#[test]
fn malformed_pyproject_aborts_the_pass() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    generated_project(root);
    fs::write(root.join("pyproject.toml"), "[tool.ruff\n").unwrap();

    let answers = AnswerSet::from_json(r#"{"tools": "none"}"#).unwrap();
    let project = Project::new(root, "requirements.txt", "pyproject.toml");
    let err = dispatch::run(&project, &answers, true).unwrap_err();
    assert!(err.to_string().contains("malformed document"));
    assert!(root.join("docs").exists());
}
