//! Build targets and build configurations shared by the preset and launch
//! generators.

use crate::error::{EntryKind, Result, ScaffoldError};
use crate::manifest::Manifest;

/// The CMake multi-config build types presets are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    Release,
    Debug,
    RelWithDebInfo,
}

impl BuildType {
    pub const ALL: [BuildType; 3] = [BuildType::Release, BuildType::Debug, BuildType::RelWithDebInfo];

    /// Build types that get a debugger entry.
    pub const LAUNCHABLE: [BuildType; 2] = [BuildType::Release, BuildType::Debug];

    /// Value of the CMake `configuration` field.
    pub fn cmake_name(self) -> &'static str {
        match self {
            BuildType::Release => "Release",
            BuildType::Debug => "Debug",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
        }
    }

    /// Short form used inside preset names.
    pub fn slug(self) -> &'static str {
        match self {
            BuildType::Release => "release",
            BuildType::Debug => "debug",
            BuildType::RelWithDebInfo => "debinfo",
        }
    }

    /// Name of the hidden preset every target preset of this type inherits.
    pub fn base_preset(self) -> String {
        format!("{}-build", self.slug())
    }
}

/// A library or app the generators emit entries for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Library(String),
    App { name: String, libs: Vec<String> },
}

impl Target {
    /// Look `name` up among the manifest's libraries.
    pub fn library(manifest: &Manifest, name: &str) -> Result<Self> {
        if manifest.lib_exists(name) {
            Ok(Target::Library(name.to_string()))
        } else {
            Err(ScaffoldError::NotFound {
                kind: EntryKind::Library,
                name: name.to_string(),
            })
        }
    }

    /// Look `name` up among the manifest's apps.
    pub fn app(manifest: &Manifest, name: &str) -> Result<Self> {
        match manifest.app(name) {
            Some(app) => Ok(Target::App {
                name: app.name.clone(),
                libs: app.libs.clone(),
            }),
            None => Err(ScaffoldError::NotFound {
                kind: EntryKind::App,
                name: name.to_string(),
            }),
        }
    }

    /// Every library then every app, in manifest order.
    pub fn all(manifest: &Manifest) -> Vec<Self> {
        let libs = manifest.libs.iter().map(|l| Target::Library(l.clone()));
        let apps = manifest.apps.iter().map(|a| Target::App {
            name: a.name.clone(),
            libs: a.libs.clone(),
        });
        libs.chain(apps).collect()
    }

    pub fn name(&self) -> &str {
        match self {
            Target::Library(name) => name,
            Target::App { name, .. } => name,
        }
    }

    /// Libraries whose test executables belong to this target.
    pub fn tested_libs(&self) -> Vec<&str> {
        match self {
            Target::Library(name) => vec![name.as_str()],
            Target::App { libs, .. } => libs.iter().map(String::as_str).collect(),
        }
    }

    /// CMake targets a build preset for this target must build.
    pub fn build_targets(&self) -> Vec<String> {
        match self {
            Target::Library(name) => vec![name.clone(), test_target(name)],
            Target::App { name, libs } => std::iter::once(name.clone())
                .chain(libs.iter().cloned())
                .chain(libs.iter().map(|l| test_target(l)))
                .collect(),
        }
    }

    pub fn build_preset(&self, build_type: BuildType) -> String {
        format!("{}-{}-build", self.name(), build_type.slug())
    }

    pub fn package_preset(&self) -> String {
        format!("{}-package", self.name())
    }
}

pub fn test_target(lib: &str) -> String {
    format!("test_{lib}")
}
