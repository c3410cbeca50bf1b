//! App command handler
//!
//! Handles `cxs app` subcommands.

use anyhow::{Context, Result};
use colored::*;
use inquire::MultiSelect;

use super::{configure, name_or_prompt, print_paths};
use crate::project::Project;

/// App subcommand operations
#[derive(Clone, Debug)]
pub enum AppOp {
    /// Scaffold a new app linking `libs`
    Create {
        name: Option<String>,
        libs: Vec<String>,
    },
    /// Unregister an app and delete its directory
    Delete { name: Option<String> },
    /// Regenerate presets and launch entries for an app
    Configure { name: Option<String> },
}

pub fn handle_app_command(project: &Project, op: &AppOp, verbose: bool) -> Result<()> {
    match op {
        AppOp::Create { name, libs } => {
            let interactive = name.is_none();
            let name = name_or_prompt(name.clone(), "Enter the name of the app:")?;
            let libs = if interactive && libs.is_empty() {
                select_libs(project)?
            } else {
                libs.clone()
            };
            let changes = project
                .create_app(&name, &libs)
                .with_context(|| format!("Could not create app '{name}'"))?;
            print_paths(project.root(), "+".green(), &changes.written, verbose);
            println!(
                "{} App '{}' created and added to the project.",
                "✓".green(),
                name.bold()
            );
        }
        AppOp::Delete { name } => {
            let name = name_or_prompt(name.clone(), "Enter the name of the app:")?;
            let changes = project
                .delete_app(&name)
                .with_context(|| format!("Could not delete app '{name}'"))?;
            print_paths(project.root(), "-".red(), &changes.removed, verbose);
            println!(
                "{} Application structure for '{}' deleted successfully.",
                "🗑️".red(),
                name.bold()
            );
        }
        AppOp::Configure { name } => {
            let name = name_or_prompt(name.clone(), "Enter the name of the app:")?;
            let target = project.configure_app(&name)?;
            configure::report(project, std::slice::from_ref(&target), verbose);
        }
    }
    Ok(())
}

fn select_libs(project: &Project) -> Result<Vec<String>> {
    let known = project.open_store()?.manifest().libs.clone();
    if known.is_empty() {
        println!(
            "{} The project has no libraries yet; creating the app without any.",
            "!".yellow()
        );
        return Ok(Vec::new());
    }
    Ok(MultiSelect::new("Libraries to link:", known).prompt()?)
}
