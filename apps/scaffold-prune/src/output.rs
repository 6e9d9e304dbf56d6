//! Output rendering for pass reports and the answers echo.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-action fields and a top-level summary.

use crate::models::Report;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print a pass report in the requested format.
pub fn print_report(report: &Report, output: &str) {
    match output {
        "json" => println!("{}", to_pretty(&compose_report_json(report))),
        _ => {
            let color = use_colors(output);
            let tools = report.tools.join(", ");
            if color {
                println!("{} {}", "tools:".bold(), tools);
            } else {
                println!("tools: {}", tools);
            }
            for a in &report.actions {
                let status = match (report.dry_run, a.changed) {
                    (true, true) => "would apply",
                    (true, false) => "nothing to do",
                    (false, true) => "applied",
                    (false, false) => "unchanged",
                };
                if color {
                    let status = if a.changed {
                        status.green().bold().to_string()
                    } else {
                        status.bright_black().to_string()
                    };
                    println!(
                        "{} [{}] {} {}",
                        status,
                        a.category.cyan(),
                        a.action,
                        a.target.bold()
                    );
                } else {
                    println!("{} [{}] {} {}", status, a.category, a.action, a.target);
                }
            }
            let summary = format!(
                "Summary: changed={} unchanged={} total={}{}",
                report.summary.changed,
                report.summary.unchanged,
                report.summary.total,
                if report.dry_run { " (dry run)" } else { "" }
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print the parsed answers blob.
pub fn print_answers(answers: &JsonVal, output: &str) {
    match output {
        "json" => println!("{}", to_pretty(answers)),
        _ => match answers.as_object() {
            Some(map) => {
                let color = use_colors(output);
                for (k, v) in map {
                    let val = match v {
                        JsonVal::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    if color {
                        println!("{}: {}", k.bold(), val);
                    } else {
                        println!("{}: {}", k, val);
                    }
                }
            }
            None => println!("{}", answers),
        },
    }
}

fn to_pretty(v: &JsonVal) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

/// Compose the report JSON object (pure) for testing purposes.
pub fn compose_report_json(report: &Report) -> JsonVal {
    let items: Vec<_> = report
        .actions
        .iter()
        .map(|a| {
            json!({
                "category": a.category,
                "action": a.action,
                "target": a.target,
                "changed": a.changed,
            })
        })
        .collect();
    json!({
        "dry_run": report.dry_run,
        "tools": report.tools,
        "results": items,
        "summary": report.summary,
    })
}
