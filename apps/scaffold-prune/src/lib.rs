//! scaffold-prune core library.
//!
//! Second pass over a freshly generated project: drops the files,
//! directories, requirement lines and pyproject sections belonging to tools
//! the user did not select, then normalizes the requirements file.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Effective configuration and answers loading.
//! - `editor`: Line-block, TOML section and file/directory removal.
//! - `rules`: Static removal rules per tool category.
//! - `dispatch`: Rule evaluation and execution over a project.
//! - `manifest`: Requirements file normalization.
//! - `models`: Answers, tool catalog and report structs.
//! - `output`: Human/JSON printers.
//! - `error`: Error taxonomy.
//! - `utils`: Supporting helpers and logging bootstrap.
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod error;
pub mod manifest;
pub mod models;
pub mod output;
pub mod rules;
pub mod utils;
