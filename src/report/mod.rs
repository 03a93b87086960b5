pub mod types;

pub use types::{FileSummary, Report};

use crate::diff::{Diff, FileStatus};
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

const OMITTED_NOTICE: &str = "Some output was omitted because a size limit was reached.";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Summarize a parsed diff.
pub fn build(diff: &Diff) -> Report {
    let files = diff
        .files
        .iter()
        .map(|file| FileSummary {
            name: file.name.clone(),
            old_name: file.is_renamed().then(|| file.old_name.clone()),
            status: file.status,
            additions: file.num_additions,
            deletions: file.num_deletions,
            sections: file.sections.len(),
            is_binary: file.is_binary,
            is_submodule: file.is_submodule,
            is_incomplete: file.is_incomplete,
        })
        .collect();

    Report {
        files,
        additions: diff.total_additions,
        deletions: diff.total_deletions,
        is_incomplete: diff.is_incomplete,
    }
}

/// Output the report to terminal (default) or to a markdown file.
#[instrument(skip(report), fields(files = report.files.len(), incomplete = report.is_incomplete))]
pub fn output(report: &Report, output_path: Option<&Path>) -> Result<(), ReportError> {
    match output_path {
        None => {
            debug!("writing report to terminal");
            print_terminal_report(report);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing report to file");
            write_markdown_report(report, path)
        }
    }
}

/// Format and print the report to the terminal with colors.
///
/// Files changed: 3 | +42 -7
///
///   CHANGED   src/lib.rs (+40 -7, 2 hunks)
///   ADDED     src/new.rs (+2 -0, 1 hunk)
///   RENAMED   docs/a.md -> docs/b.md (+0 -0, 0 hunks)
fn print_terminal_report(report: &Report) {
    println!();
    println!(
        "Files changed: {} | {} {}",
        report.files_changed(),
        format!("+{}", report.additions).green(),
        format!("-{}", report.deletions).red()
    );
    println!();

    for file in &report.files {
        let flags = file.flags();
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags).yellow().to_string()
        };
        println!(
            "  {:<9} {} (+{} -{}, {}){}",
            colorize_status(file.status),
            file.display_name(),
            file.additions,
            file.deletions,
            hunk_label(file.sections),
            flags
        );
    }

    if report.is_incomplete {
        println!();
        println!("{}", OMITTED_NOTICE.yellow().bold());
    }
    println!();
}

/// Write the report as a markdown file.
fn write_markdown_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    let mut md = String::new();
    md.push_str("# Diff summary\n\n");
    md.push_str(&format!(
        "**Files changed:** {} | **+{} -{}**\n\n",
        report.files_changed(),
        report.additions,
        report.deletions
    ));

    if report.files.is_empty() {
        md.push_str("No changes.\n\n");
    } else {
        md.push_str("| Status | File | + | - | Hunks | Notes |\n");
        md.push_str("|---|---|---|---|---|---|\n");
        for file in &report.files {
            md.push_str(&format!(
                "| {} | `{}` | {} | {} | {} | {} |\n",
                file.status,
                file.display_name(),
                file.additions,
                file.deletions,
                file.sections,
                file.flags()
            ));
        }
        md.push('\n');
    }

    if report.is_incomplete {
        md.push_str(&format!("> **Note:** {}\n", OMITTED_NOTICE));
    }

    std::fs::write(path, md)?;
    Ok(())
}

fn hunk_label(count: usize) -> String {
    if count == 1 {
        "1 hunk".to_string()
    } else {
        format!("{} hunks", count)
    }
}

/// Helper to colorize a file status for terminal output.
fn colorize_status(status: FileStatus) -> colored::ColoredString {
    let label = status.to_string();
    match status {
        FileStatus::Added => label.green().bold(),
        FileStatus::Deleted => label.red().bold(),
        FileStatus::Renamed => label.cyan().bold(),
        FileStatus::Changed => label.yellow().bold(),
    }
}
