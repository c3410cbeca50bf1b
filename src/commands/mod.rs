//! CLI command handlers
//!
//! Each handler prompts for anything the command line left out, calls into
//! [`crate::project::Project`] and reports the outcome on stdout.

pub mod app;
pub mod configure;
pub mod doctor;
pub mod library;
pub mod list;
pub mod reset;

use anyhow::Result;
use colored::*;
use inquire::Text;
use std::path::{Path, PathBuf};

/// Use `given` or ask for it.
pub(crate) fn name_or_prompt(given: Option<String>, question: &str) -> Result<String> {
    match given {
        Some(name) => Ok(name),
        None => Ok(Text::new(question).prompt()?.trim().to_string()),
    }
}

/// With `--verbose`, list `paths` relative to the project root.
pub(crate) fn print_paths(root: &Path, marker: ColoredString, paths: &[PathBuf], verbose: bool) {
    if !verbose {
        return;
    }
    for path in paths {
        let shown = path.strip_prefix(root).unwrap_or(path);
        println!("   {} {}", marker, shown.display().to_string().dimmed());
    }
}
