//! Library command handler
//!
//! Handles `cxs lib` subcommands.

use anyhow::{Context, Result};
use colored::*;

use super::{configure, name_or_prompt, print_paths};
use crate::project::Project;

/// Library subcommand operations
#[derive(Clone, Debug)]
pub enum LibOp {
    /// Scaffold a new library and register it
    Create { name: Option<String> },
    /// Unregister a library and delete its directories
    Delete { name: Option<String>, force: bool },
    /// Regenerate presets and launch entries for a library
    Configure { name: Option<String> },
}

pub fn handle_lib_command(project: &Project, op: &LibOp, verbose: bool) -> Result<()> {
    match op {
        LibOp::Create { name } => {
            let name = name_or_prompt(name.clone(), "Enter the name of the library:")?;
            let changes = project
                .create_lib(&name)
                .with_context(|| format!("Could not create library '{name}'"))?;
            print_paths(project.root(), "+".green(), &changes.written, verbose);
            println!(
                "{} Library '{}' created and added to the project.",
                "✓".green(),
                name.bold()
            );
        }
        LibOp::Delete { name, force } => {
            let name = name_or_prompt(name.clone(), "Enter the name of the library:")?;
            let changes = project
                .delete_lib(&name, *force)
                .with_context(|| format!("Could not delete library '{name}'"))?;
            print_paths(project.root(), "-".red(), &changes.removed, verbose);
            if !changes.detached_from.is_empty() {
                println!(
                    "{} Removed '{}' from {}; their sources still include it.",
                    "!".yellow(),
                    name,
                    changes.detached_from.join(", ").cyan()
                );
            }
            println!(
                "{} Library structure for '{}' deleted successfully.",
                "🗑️".red(),
                name.bold()
            );
        }
        LibOp::Configure { name } => {
            let name = name_or_prompt(name.clone(), "Enter the name of the library:")?;
            let target = project.configure_lib(&name)?;
            configure::report(project, std::slice::from_ref(&target), verbose);
        }
    }
    Ok(())
}
