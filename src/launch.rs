//! Debugger launch configuration (`.vscode/launch.json`).
//!
//! Unlike the presets file the launch document is owned entirely by cxs and
//! replaced on every run.

use crate::config::{LaunchConfig, PathsConfig};
use crate::error::Result;
use crate::jsonio;
use crate::target::{BuildType, Target, test_target};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LaunchDocument {
    pub configurations: Vec<LaunchConfiguration>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfiguration {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub request: String,
    pub program: String,
    pub args: Vec<String>,
    pub stop_at_entry: bool,
    pub cwd: String,
    pub environment: Vec<serde_json::Value>,
    pub console: String,
}

/// Resolves where the build tree puts executables.
struct ProgramPaths<'a> {
    build_root: String,
    launch: &'a LaunchConfig,
}

impl<'a> ProgramPaths<'a> {
    fn new(paths: &PathsConfig, launch: &'a LaunchConfig) -> Self {
        let output = paths.build_output.to_string_lossy().replace('\\', "/");
        Self {
            build_root: format!("${{workspaceFolder}}/{}/build", output.trim_end_matches('/')),
            launch,
        }
    }

    fn app(&self, app: &str, build_type: BuildType) -> String {
        format!(
            "{}/apps/{app}/{}/{app}{}",
            self.build_root,
            build_type.cmake_name(),
            self.launch.executable_suffix
        )
    }

    fn test(&self, lib: &str, build_type: BuildType) -> String {
        format!(
            "{}/tests/{lib}/{}/{}{}",
            self.build_root,
            build_type.cmake_name(),
            test_target(lib),
            self.launch.executable_suffix
        )
    }
}

fn entry(launch: &LaunchConfig, name: String, program: String) -> LaunchConfiguration {
    LaunchConfiguration {
        name,
        kind: launch.debugger.clone(),
        request: "launch".to_string(),
        program,
        args: Vec::new(),
        stop_at_entry: false,
        cwd: "${workspaceFolder}".to_string(),
        environment: Vec::new(),
        console: launch.console.clone(),
    }
}

/// Release and Debug entries for each target.
///
/// An app gets entries for its own executable followed by the test
/// executables of its libraries. Entries already emitted for an earlier
/// target are not repeated.
pub fn launch_document(
    paths: &PathsConfig,
    launch: &LaunchConfig,
    targets: &[Target],
) -> LaunchDocument {
    let programs = ProgramPaths::new(paths, launch);
    let mut configurations: Vec<LaunchConfiguration> = Vec::new();
    let mut push = |c: LaunchConfiguration| {
        if !configurations.iter().any(|e| e.name == c.name) {
            configurations.push(c);
        }
    };

    for target in targets {
        if let Target::App { name, .. } = target {
            for bt in BuildType::LAUNCHABLE {
                push(entry(
                    launch,
                    format!("{} {name}", bt.cmake_name()),
                    programs.app(name, bt),
                ));
            }
        }
        for lib in target.tested_libs() {
            for bt in BuildType::LAUNCHABLE {
                push(entry(
                    launch,
                    format!("{} {lib}", bt.cmake_name()),
                    programs.test(lib, bt),
                ));
            }
        }
    }

    LaunchDocument { configurations }
}

pub fn write_launch(path: &Path, document: &LaunchDocument) -> Result<()> {
    jsonio::write_json(path, document)
}
