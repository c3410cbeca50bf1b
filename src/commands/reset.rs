//! Reset command handler
//!
//! Handles `cxs reset`, which returns the tree to its initial state.

use anyhow::Result;
use colored::*;
use inquire::Confirm;

use super::print_paths;
use crate::project::Project;

pub fn handle_reset(project: &Project, yes: bool, verbose: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new(
            "Delete all libraries, apps and build output, and reset every configuration file?",
        )
        .with_default(false)
        .prompt()?;
        if !confirmed {
            println!("{} Reset cancelled.", "!".yellow());
            return Ok(());
        }
    }

    let removed = project.reset()?;
    print_paths(project.root(), "-".red(), &removed, verbose);
    println!(
        "{} Project reset to its initial state ({} entries removed).",
        "✓".green(),
        removed.len()
    );
    Ok(())
}
