use colored::{ColoredString, Colorize};
use serde_json::{json, Value};

use dashdiff_basic::{assemble, check_contract, Assembly};
use dashdiff_types::ChangeKind;

use crate::cli::*;
use crate::input::read_lines;
use crate::settings;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Assemble(args) => cmd_assemble(args, &cli.format),
        Command::Check(args) => cmd_check(args, &cli.format),
    }
}

fn cmd_assemble(args: AssembleArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = settings::resolve(&args)?;
    let lines = read_lines(args.input.as_deref())?;
    let assembly = assemble(&lines, &config);
    tracing::info!(
        lines = lines.len(),
        blocks = assembly.len(),
        changes = assembly.change_count(),
        summaries = assembly.summary_count(),
        unterminated = assembly.unterminated.count(),
        "assembled"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assembly)?),
        OutputFormat::Text => {
            for row in outline(&assembly) {
                println!("{row}");
            }
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let lines = read_lines(args.input.as_deref())?;
    let report = check_contract(&lines);

    match format {
        OutputFormat::Json => {
            let violations: Vec<String> = report.violations.iter().map(|v| v.to_string()).collect();
            let out = json!({ "line_count": report.line_count, "violations": violations });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for violation in &report.violations {
                println!("{} {}", "✗".red().bold(), violation);
            }
            if report.is_valid() {
                println!("{} {} lines, contract holds", "✓".green().bold(), report.line_count);
            }
        }
    }

    if !report.is_valid() {
        anyhow::bail!("{} contract violation(s)", report.violations.len());
    }
    Ok(())
}

/// One row per block, indented rows for its changes and summaries.
fn outline(assembly: &Assembly) -> Vec<String> {
    let mut rows = Vec::new();
    for block in &assembly.blocks {
        rows.push(format!(
            "{} {}{}{}",
            marker(block.change),
            block.title.bold(),
            values(block.old.as_ref(), block.new.as_ref()),
            span(block.span()),
        ));
        for change in &block.changes {
            rows.push(format!(
                "    {} {}{}{}",
                marker(change.change),
                change.key,
                values(change.old.as_ref(), change.new.as_ref()),
                span(change.span()),
            ));
        }
        for summary in &block.summaries {
            let count = if summary.count > 0 {
                format!(" ({})", summary.count)
            } else {
                String::new()
            };
            rows.push(format!(
                "    {} {}{}{}",
                marker(summary.change),
                summary.key.italic(),
                count,
                span(summary.span()),
            ));
        }
    }

    let unterminated = assembly.unterminated.count();
    if unterminated > 0 {
        rows.push(format!(
            "{} {} unterminated construct(s) left out",
            "!".yellow().bold(),
            unterminated
        ));
    }
    rows
}

fn marker(kind: ChangeKind) -> ColoredString {
    let label = format!("{:>7}", kind.label());
    match kind {
        ChangeKind::Added => label.green(),
        ChangeKind::Deleted => label.red(),
        _ => label.yellow(),
    }
}

fn values(old: Option<&Value>, new: Option<&Value>) -> String {
    match (old, new) {
        (Some(old), Some(new)) => format!("  {} → {}", show(old), show(new)),
        (Some(old), None) => format!("  {}", show(old)),
        (None, Some(new)) => format!("  {}", show(new)),
        (None, None) => String::new(),
    }
}

fn show(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn span(span: Option<String>) -> String {
    span.map(|s| format!("  [L{s}]").dimmed().to_string())
        .unwrap_or_default()
}
