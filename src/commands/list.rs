//! `cxs list`: libraries and apps known to the manifest.

use anyhow::Result;
use colored::*;

use crate::project::Project;
use crate::ui;

pub fn print_list(project: &Project) -> Result<()> {
    let store = project.open_store()?;
    let manifest = store.manifest();

    if manifest.libs.is_empty() && manifest.apps.is_empty() {
        println!(
            "{} No libraries or apps yet. Run {} to add one.",
            "!".yellow(),
            "cxs lib create <name>".cyan()
        );
        return Ok(());
    }

    let mut table = ui::Table::new(&["Kind", "Name", "Links / Used by"]);
    for lib in &manifest.libs {
        let users = manifest.apps_using(lib);
        let used_by = if users.is_empty() {
            "-".dimmed().to_string()
        } else {
            users.join(", ")
        };
        table.add_row(vec![
            "lib".blue().to_string(),
            lib.bold().green().to_string(),
            used_by,
        ]);
    }
    for app in &manifest.apps {
        let links = if app.libs.is_empty() {
            "-".dimmed().to_string()
        } else {
            app.libs.join(", ")
        };
        table.add_row(vec![
            "app".magenta().to_string(),
            app.name.bold().green().to_string(),
            links,
        ]);
    }
    table.print();
    println!(
        "   {} libraries, {} apps",
        manifest.libs.len(),
        manifest.apps.len()
    );
    Ok(())
}
