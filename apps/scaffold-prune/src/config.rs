//! Configuration discovery and effective settings resolution.
//!
//! An optional `scaffold-prune.toml|yaml|yml` in the project root can
//! override file locations and the output mode. Defaults:
//! - `output`: `human`
//! - `manifest`: `requirements.txt`
//! - `pyproject`: `pyproject.toml`
//! - `answers_file`: `.copier-answers.yml`
//!
//! Overrides precedence: CLI > config file > defaults. Answers come from
//! `--full-conf` first, then the answers file.

use crate::dispatch::Project;
use crate::error::{PruneError, Result};
use crate::models::answers::AnswerSet;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST: &str = "requirements.txt";
pub const DEFAULT_PYPROJECT: &str = "pyproject.toml";
pub const DEFAULT_ANSWERS_FILE: &str = ".copier-answers.yml";

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `scaffold-prune.toml|yaml`.
pub struct PruneConfig {
    pub output: Option<String>,
    pub manifest: Option<String>,
    pub pyproject: Option<String>,
    pub answers_file: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub project_dir: PathBuf,
    pub output: String,
    pub manifest: String,
    pub pyproject: String,
    pub answers_file: String,
}

impl Effective {
    pub fn project(&self) -> Project {
        Project::new(&self.project_dir, &self.manifest, &self.pyproject)
    }
}

/// Load `PruneConfig` from `scaffold-prune.toml` or `scaffold-prune.yaml|yml`
/// if present. A present but unreadable config is an error.
pub fn load_config(root: &Path) -> Result<Option<PruneConfig>> {
    let toml_path = root.join("scaffold-prune.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).map_err(|e| PruneError::io(&toml_path, e))?;
        let cfg: PruneConfig = toml::from_str(&s).map_err(|e| PruneError::MalformedInput {
            path: toml_path.clone(),
            message: e.to_string(),
        })?;
        return Ok(Some(cfg));
    }
    for yml in ["scaffold-prune.yaml", "scaffold-prune.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).map_err(|e| PruneError::io(&p, e))?;
            let cfg: PruneConfig =
                serde_yaml::from_str(&s).map_err(|e| PruneError::MalformedInput {
                    path: p.clone(),
                    message: e.to_string(),
                })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_project_dir: Option<&str>,
    cli_output: Option<&str>,
    cli_manifest: Option<&str>,
    cli_pyproject: Option<&str>,
    cli_answers_file: Option<&str>,
) -> Result<Effective> {
    let project_dir = PathBuf::from(cli_project_dir.unwrap_or("."));
    let cfg = load_config(&project_dir)?.unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let manifest = cli_manifest
        .map(|s| s.to_string())
        .or(cfg.manifest)
        .unwrap_or_else(|| DEFAULT_MANIFEST.to_string());
    let pyproject = cli_pyproject
        .map(|s| s.to_string())
        .or(cfg.pyproject)
        .unwrap_or_else(|| DEFAULT_PYPROJECT.to_string());
    let answers_file = cli_answers_file
        .map(|s| s.to_string())
        .or(cfg.answers_file)
        .unwrap_or_else(|| DEFAULT_ANSWERS_FILE.to_string());

    Ok(Effective {
        project_dir,
        output,
        manifest,
        pyproject,
        answers_file,
    })
}

/// Load the answer set: the `--full-conf` JSON blob wins, otherwise the
/// answers file (YAML, relative to the project) is read.
pub fn load_answers(eff: &Effective, full_conf: Option<&str>) -> Result<AnswerSet> {
    if let Some(blob) = full_conf {
        return AnswerSet::from_json(blob);
    }
    let path = eff.project_dir.join(&eff.answers_file);
    match fs::read_to_string(&path) {
        Ok(s) => AnswerSet::from_yaml(&s),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(PruneError::invalid_answers(format!(
                "no answers supplied: pass --full-conf or provide {}",
                path.to_string_lossy()
            )))
        }
        Err(e) => Err(PruneError::io(&path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None, None, None).unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.manifest, DEFAULT_MANIFEST);
        assert_eq!(eff.pyproject, DEFAULT_PYPROJECT);
        assert_eq!(eff.answers_file, DEFAULT_ANSWERS_FILE);
        assert_eq!(eff.project().manifest, dir.path().join("requirements.txt"));
    }

    #[test]
    fn test_toml_config_and_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("scaffold-prune.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
manifest = "requirements/base.txt"
answers_file = "answers.yml"
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), Some("human"), None, None, None).unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.manifest, "requirements/base.txt");
        assert_eq!(eff.answers_file, "answers.yml");
        assert_eq!(eff.pyproject, DEFAULT_PYPROJECT);
    }

    #[test]
    fn test_yaml_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("scaffold-prune.yaml"), "pyproject: build.toml\n").unwrap();
        let eff = resolve_effective(root.to_str(), None, None, None, None).unwrap();
        assert_eq!(eff.pyproject, "build.toml");
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("scaffold-prune.toml"), "output = [").unwrap();
        assert!(resolve_effective(dir.path().to_str(), None, None, None, None).is_err());
    }

    #[test]
    fn test_load_answers_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let eff = resolve_effective(root.to_str(), None, None, None, None).unwrap();
        let err = load_answers(&eff, None).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        fs::write(root.join(DEFAULT_ANSWERS_FILE), "project_tools: '2'\n").unwrap();
        let from_file = load_answers(&eff, None).unwrap();
        assert_eq!(from_file.tools.names(), vec!["Testing"]);

        let from_blob = load_answers(&eff, Some(r#"{"tools": "4"}"#)).unwrap();
        assert_eq!(from_blob.tools.names(), vec!["Documentation"]);
    }
}
