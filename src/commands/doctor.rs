//! Doctor command handler
//!
//! Handles `cxs doctor`: cross-checks the manifest against itself and
//! against the source tree.

use anyhow::{Result, bail};
use colored::*;

use crate::project::{Project, ProjectIssue};
use crate::ui;

pub fn run_doctor(project: &Project) -> Result<()> {
    println!("{} Checking project...", "🚑".red());
    println!("-------------------------------");

    let issues = project.doctor()?;
    if issues.is_empty() {
        println!("{} Manifest and source tree agree.", "✓".green());
        return Ok(());
    }

    let mut table = ui::Table::new(&["Kind", "Problem"]);
    for issue in &issues {
        let kind = match issue {
            ProjectIssue::Manifest(_) => "manifest".yellow(),
            ProjectIssue::MissingScaffold { .. } => "missing".red(),
            ProjectIssue::Orphan { .. } => "untracked".cyan(),
        };
        table.add_row(vec![kind.to_string(), issue.to_string()]);
    }
    table.print();

    let manifest_only = issues
        .iter()
        .all(|i| matches!(i, ProjectIssue::Manifest(_)));
    if manifest_only {
        println!(
            "   Counts are rewritten by the next {} or {} command.",
            "create".cyan(),
            "delete".cyan()
        );
    }
    bail!("{} problem(s) found", issues.len())
}
