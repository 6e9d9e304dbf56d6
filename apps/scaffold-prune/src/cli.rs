//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scaffold-prune",
    version,
    about = "Post-generation pruning for project scaffolds",
    long_about = "scaffold-prune removes the files, directories, requirement lines and pyproject sections that belong to tools the user did not select, then sorts the requirements file.\n\nConfiguration precedence: CLI > scaffold-prune.toml > defaults.",
    after_help = "Examples:\n  scaffold-prune apply --full-conf '{\"project_tools\": \"1,3\", \"example_pipeline\": false}'\n  scaffold-prune plan --project-dir my-project --output json\n  scaffold-prune show --full-conf '{\"project_name\": \"demo\"}'",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Clone, Debug)]
/// Options shared by `apply` and `plan`.
pub struct PassArgs {
    #[arg(long, help = "Generated project directory (default: current dir)")]
    pub project_dir: Option<String>,
    #[arg(long, help = "Full answers as a JSON object")]
    pub full_conf: Option<String>,
    #[arg(long, help = "Answers file relative to the project (default: .copier-answers.yml)")]
    pub answers_file: Option<String>,
    #[arg(long, help = "Requirements file relative to the project (default: requirements.txt)")]
    pub manifest: Option<String>,
    #[arg(long, help = "Build configuration relative to the project (default: pyproject.toml)")]
    pub pyproject: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current scaffold-prune version.")]
    Version,
    /// Prune the project
    #[command(
        about = "Prune the generated project",
        long_about = "Apply every removal rule that fires for the answers, then normalize the requirements file. The first fatal error aborts the pass.",
        after_help = "Examples:\n  scaffold-prune apply --full-conf '{\"tools\": \"1,2\"}'\n  scaffold-prune apply --project-dir my-project --answers-file .copier-answers.yml"
    )]
    Apply(PassArgs),
    /// Preview the pass
    #[command(
        about = "Preview the actions without touching files",
        long_about = "List the actions the answers would trigger and whether each target currently exists."
    )]
    Plan(PassArgs),
    /// Echo the answers blob
    #[command(
        about = "Print the answers blob",
        long_about = "Parse --full-conf and print it back, without touching the project."
    )]
    Show {
        #[arg(long, help = "Full answers as a JSON object")]
        full_conf: String,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
