//! Optional project configuration (`cxs.toml`).
//!
//! Every field has a default matching the stock preset tree, so most
//! projects never need the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "cxs.toml";

/// Location of the manifest relative to the project root.
pub const DEFAULT_MANIFEST_PATH: &str = "json/project_data.json";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CxsConfig {
    pub paths: PathsConfig,
    pub presets: PresetsConfig,
    pub launch: LaunchConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub manifest: PathBuf,
    pub presets: PathBuf,
    pub launch: PathBuf,
    pub build_output: PathBuf,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PresetsConfig {
    pub configure_preset: String,
    /// Parent configure preset; empty for none.
    pub configure_inherits: String,
    pub generator: String,
    pub vcpkg_triplet: String,
    /// `CMAKE_C_COMPILER` in the baseline configure preset; empty to omit.
    pub c_compiler: String,
    /// `CMAKE_CXX_COMPILER` in the baseline configure preset; empty to omit.
    pub cxx_compiler: String,
    pub jobs: u32,
    pub package_generator: String,
    pub package_directory: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchConfig {
    pub debugger: String,
    pub console: String,
    pub executable_suffix: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST_PATH),
            presets: PathBuf::from("CMakeUserPresets.json"),
            launch: PathBuf::from(".vscode/launch.json"),
            build_output: PathBuf::from("out"),
        }
    }
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self {
            configure_preset: "default-config".to_string(),
            configure_inherits: "conf-windows".to_string(),
            generator: "Ninja Multi-Config".to_string(),
            vcpkg_triplet: "x64-windows".to_string(),
            c_compiler: "cl.exe".to_string(),
            cxx_compiler: "cl.exe".to_string(),
            jobs: 6,
            package_generator: "TGZ".to_string(),
            package_directory: "../install/".to_string(),
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            debugger: "cppvsdbg".to_string(),
            console: "internalConsole".to_string(),
            executable_suffix: ".exe".to_string(),
        }
    }
}

/// Load `cxs.toml` from `root`, falling back to defaults when it is absent.
pub fn load_config(root: &Path) -> Result<CxsConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(CxsConfig::default());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse {} - check for unknown keys or syntax errors",
            path.display()
        )
    })
}
