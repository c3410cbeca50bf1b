//! Configuration regeneration (`cxs configure`).

use anyhow::Result;
use colored::*;

use crate::project::Project;
use crate::target::Target;

/// Regenerate presets and launch entries for every target in the manifest.
pub fn handle_configure_all(project: &Project, verbose: bool) -> Result<()> {
    println!("{} Regenerating presets for all targets...", "⚙️".cyan());
    let targets = project.configure_all()?;
    if targets.is_empty() {
        println!(
            "{} The manifest has no targets; only base presets were written.",
            "!".yellow()
        );
    }
    report(project, &targets, verbose);
    Ok(())
}

pub(crate) fn report(project: &Project, targets: &[Target], verbose: bool) {
    if verbose {
        for target in targets {
            println!(
                "   {} {} {}",
                "+".green(),
                target.name(),
                format!("[{}]", target.build_targets().join(", ")).dimmed()
            );
        }
        println!(
            "   {} {}",
            "~".cyan(),
            project.config().paths.presets.display().to_string().dimmed()
        );
        println!(
            "   {} {}",
            "~".cyan(),
            project.config().paths.launch.display().to_string().dimmed()
        );
    }
    let names: Vec<&str> = targets.iter().map(Target::name).collect();
    if names.is_empty() {
        return;
    }
    println!(
        "{} Build, packaging and launch configuration for '{}' updated successfully.",
        "✓".green(),
        names.join("', '")
    );
}
