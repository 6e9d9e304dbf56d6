//! scaffold-prune CLI binary entry point.
//! Resolves configuration and answers, runs the pass, and prints results.

use clap::Parser;
use scaffold_prune::cli::{Cli, Commands, PassArgs};
use scaffold_prune::error::PruneError;
use scaffold_prune::{config, dispatch, output, utils};

fn fail(err: &PruneError) -> ! {
    eprintln!("{} {}", utils::error_prefix(), err);
    std::process::exit(err.exit_code());
}

fn run_pass(args: PassArgs, write: bool) {
    let eff = match config::resolve_effective(
        args.project_dir.as_deref(),
        args.output.as_deref(),
        args.manifest.as_deref(),
        args.pyproject.as_deref(),
        args.answers_file.as_deref(),
    ) {
        Ok(eff) => eff,
        Err(e) => fail(&e),
    };
    if !eff.project_dir.is_dir() {
        eprintln!(
            "{} Project directory not found: {}",
            utils::error_prefix(),
            eff.project_dir.to_string_lossy()
        );
        std::process::exit(2);
    }
    let answers = match config::load_answers(&eff, args.full_conf.as_deref()) {
        Ok(a) => a,
        Err(e) => fail(&e),
    };
    match dispatch::run(&eff.project(), &answers, write) {
        Ok(report) => {
            output::print_report(&report, &eff.output);
            if !write && eff.output != "json" {
                eprintln!("{} dry run; no files were changed.", utils::note_prefix());
            }
        }
        Err(e) => fail(&e),
    }
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Apply(args) => run_pass(args, true),
        Commands::Plan(args) => run_pass(args, false),
        Commands::Show {
            full_conf,
            output: mode,
        } => {
            match serde_json::from_str::<serde_json::Value>(&full_conf) {
                Ok(v) => output::print_answers(&v, mode.as_deref().unwrap_or("human")),
                Err(e) => fail(&PruneError::invalid_answers(format!(
                    "answers are not valid JSON: {}",
                    e
                ))),
            }
        }
    }
}
