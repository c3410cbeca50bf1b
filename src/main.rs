//! # cxs CLI Entry Point
//!
//! Parses CLI arguments with clap and routes them to the handlers in
//! [`cxs::commands`].
//!
//! ## Command Structure
//!
//! - **Libraries**: `lib create`, `lib delete`, `lib configure`
//! - **Apps**: `app create`, `app delete`, `app configure`
//! - **Project**: `configure`, `reset`, `list`, `doctor`
//! - **Shell**: `completion`

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;

use cxs::commands;
use cxs::commands::app::AppOp;
use cxs::commands::library::LibOp;
use cxs::config;
use cxs::project::Project;
use cxs::ui;

#[derive(Parser)]
#[command(name = "cxs")]
#[command(about = "Scaffold libraries and apps in a CMake-preset C++ tree", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project root containing the manifest and CMakeUserPresets.json
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,
    /// List every file written or removed
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, delete or configure a library
    Lib {
        #[command(subcommand)]
        op: LibCmd,
    },
    /// Create, delete or configure an app
    App {
        #[command(subcommand)]
        op: AppCmd,
    },
    /// Regenerate presets and launch configuration for every target
    Configure,
    /// Delete all generated sources and build output, reset configuration files
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the libraries and apps in the manifest
    List,
    /// Check the manifest and source tree for inconsistencies
    Doctor,
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

#[derive(Subcommand)]
enum LibCmd {
    /// Scaffold a new library (src/, include/, tests/)
    Create {
        /// Library name (prompted if omitted)
        name: Option<String>,
    },
    /// Delete a library and its directories
    Delete {
        /// Library name (prompted if omitted)
        name: Option<String>,
        /// Also remove the library from apps that link it
        #[arg(long)]
        force: bool,
    },
    /// Regenerate presets and launch entries for a library
    Configure {
        /// Library name (prompted if omitted)
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum AppCmd {
    /// Scaffold a new app under apps/
    Create {
        /// App name (prompted if omitted)
        name: Option<String>,
        /// Library to link (repeatable)
        #[arg(long = "lib", value_name = "LIB")]
        libs: Vec<String>,
    },
    /// Delete an app and its directory
    Delete {
        /// App name (prompted if omitted)
        name: Option<String>,
    },
    /// Regenerate presets and launch entries for an app and its libraries
    Configure {
        /// App name (prompted if omitted)
        name: Option<String>,
    },
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} {:#}", "x".red(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = match cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            return Ok(());
        }
        Some(command) => command,
        None => {
            print_splash();
            return Ok(());
        }
    };

    let config = config::load_config(&cli.root)?;
    let project = Project::new(&cli.root, config);
    let verbose = cli.verbose;

    match command {
        Commands::Lib { op } => {
            let local_op = match op {
                LibCmd::Create { name } => LibOp::Create { name },
                LibCmd::Delete { name, force } => LibOp::Delete { name, force },
                LibCmd::Configure { name } => LibOp::Configure { name },
            };
            commands::library::handle_lib_command(&project, &local_op, verbose)
        }
        Commands::App { op } => {
            let local_op = match op {
                AppCmd::Create { name, libs } => AppOp::Create { name, libs },
                AppCmd::Delete { name } => AppOp::Delete { name },
                AppCmd::Configure { name } => AppOp::Configure { name },
            };
            commands::app::handle_app_command(&project, &local_op, verbose)
        }
        Commands::Configure => commands::configure::handle_configure_all(&project, verbose),
        Commands::Reset { yes } => commands::reset::handle_reset(&project, yes, verbose),
        Commands::List => commands::list::print_list(&project),
        Commands::Doctor => commands::doctor::run_doctor(&project),
        Commands::Completion { .. } => Ok(()),
    }
}

fn print_splash() {
    println!();
    println!("   {}", "cxs".bold().cyan());
    println!(
        "   {}",
        "Scaffolding for CMake-preset C++ trees".dimmed().italic()
    );
    println!("   {}", format!("v{}", env!("CARGO_PKG_VERSION")).green());
    println!();

    let mut table = ui::Table::new(&["Category", "Commands"]);
    table.add_row(vec![
        "Libraries".bold().green().to_string(),
        format!(
            "{}, {}, {}",
            "lib create".cyan(),
            "lib delete".cyan(),
            "lib configure".cyan()
        ),
    ]);
    table.add_row(vec![
        "Apps".bold().yellow().to_string(),
        format!(
            "{}, {}, {}",
            "app create".cyan(),
            "app delete".cyan(),
            "app configure".cyan()
        ),
    ]);
    table.add_row(vec![
        "Project".bold().blue().to_string(),
        format!(
            "{}, {}, {}, {}",
            "configure".cyan(),
            "list".cyan(),
            "doctor".cyan(),
            "reset".cyan()
        ),
    ]);
    table.print();
    println!();
    println!("   Run {} for detailed usage.", "cxs --help".white().bold());
    println!();
}
