//! The project manifest (`json/project_data.json`).
//!
//! The manifest is the single source of truth for which libraries and apps
//! exist and which libraries each app links against. Every generator works
//! from a [`Manifest`] value handed to it; only [`ManifestStore`] touches the
//! file.
//!
//! ## Format
//!
//! ```json
//! {
//!     "lib_count": 1,
//!     "libs": ["mathutils"],
//!     "app_count": 1,
//!     "apps": [{ "name": "sim", "libs": ["mathutils"], "lib_count": 1 }]
//! }
//! ```
//!
//! A freshly reset manifest carries `-1` in both counts. It behaves exactly
//! like an empty one and the first mutation rewrites the counts.

use crate::error::{EntryKind, Result, ScaffoldError};
use crate::jsonio;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Count value written by a reset.
pub const SENTINEL_COUNT: i64 = -1;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    // Names become C++ namespaces and CMake targets.
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    #[serde(default)]
    pub libs: Vec<String>,
    #[serde(default)]
    pub lib_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub lib_count: i64,
    #[serde(default)]
    pub libs: Vec<String>,
    pub app_count: i64,
    #[serde(default)]
    pub apps: Vec<App>,
}

/// Something `cxs doctor` should tell the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestIssue {
    LibCountMismatch { recorded: i64, actual: usize },
    AppCountMismatch { recorded: i64, actual: usize },
    DuplicateLibrary(String),
    DuplicateApp(String),
    DanglingLibrary { app: String, lib: String },
    AppLibCountMismatch { app: String, recorded: i64, actual: usize },
}

impl fmt::Display for ManifestIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestIssue::LibCountMismatch { recorded, actual } => {
                write!(f, "lib_count is {recorded} but {actual} libraries are listed")
            }
            ManifestIssue::AppCountMismatch { recorded, actual } => {
                write!(f, "app_count is {recorded} but {actual} apps are listed")
            }
            ManifestIssue::DuplicateLibrary(name) => {
                write!(f, "library '{name}' is listed more than once")
            }
            ManifestIssue::DuplicateApp(name) => write!(f, "app '{name}' is listed more than once"),
            ManifestIssue::DanglingLibrary { app, lib } => {
                write!(f, "app '{app}' links '{lib}', which is not a project library")
            }
            ManifestIssue::AppLibCountMismatch {
                app,
                recorded,
                actual,
            } => write!(
                f,
                "app '{app}' records lib_count {recorded} for {actual} libraries"
            ),
        }
    }
}

/// Fail with [`ScaffoldError::InvalidName`] unless `name` is a C++ identifier.
pub fn validate_name(name: &str) -> Result<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(ScaffoldError::InvalidName {
            name: name.to_string(),
        })
    }
}

impl Manifest {
    /// The state a reset leaves behind.
    pub fn sentinel() -> Self {
        Self {
            lib_count: SENTINEL_COUNT,
            libs: Vec::new(),
            app_count: SENTINEL_COUNT,
            apps: Vec::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.lib_count == SENTINEL_COUNT
            && self.app_count == SENTINEL_COUNT
            && self.libs.is_empty()
            && self.apps.is_empty()
    }

    pub fn lib_exists(&self, name: &str) -> bool {
        self.libs.iter().any(|l| l == name)
    }

    pub fn app_exists(&self, name: &str) -> bool {
        self.app(name).is_some()
    }

    pub fn app(&self, name: &str) -> Option<&App> {
        self.apps.iter().find(|a| a.name == name)
    }

    /// Libraries linked by `name`, or an empty slice for an unknown app.
    pub fn get_app_libs(&self, name: &str) -> &[String] {
        self.app(name).map(|a| a.libs.as_slice()).unwrap_or(&[])
    }

    /// Names of the apps that link `lib`, in manifest order.
    pub fn apps_using(&self, lib: &str) -> Vec<String> {
        self.apps
            .iter()
            .filter(|a| a.libs.iter().any(|l| l == lib))
            .map(|a| a.name.clone())
            .collect()
    }

    pub fn add_lib(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        if self.lib_exists(name) {
            return Err(ScaffoldError::Duplicate {
                kind: EntryKind::Library,
                name: name.to_string(),
            });
        }
        // Libraries and apps share the CMake target namespace.
        if self.app_exists(name) {
            return Err(ScaffoldError::Duplicate {
                kind: EntryKind::App,
                name: name.to_string(),
            });
        }
        self.libs.push(name.to_string());
        self.normalize_counts();
        Ok(())
    }

    /// Remove an unreferenced library.
    ///
    /// Fails with [`ScaffoldError::LibraryInUse`] while any app links it; use
    /// [`Manifest::detach_lib`] to drop it from those apps as well.
    pub fn remove_lib(&mut self, name: &str) -> Result<()> {
        self.require_lib(name)?;
        let users = self.apps_using(name);
        if !users.is_empty() {
            return Err(ScaffoldError::LibraryInUse {
                name: name.to_string(),
                apps: users,
            });
        }
        self.libs.retain(|l| l != name);
        self.normalize_counts();
        Ok(())
    }

    /// Remove a library and strip it from every app that links it.
    ///
    /// Returns the names of the apps that were changed.
    pub fn detach_lib(&mut self, name: &str) -> Result<Vec<String>> {
        self.require_lib(name)?;
        let users = self.apps_using(name);
        for app in &mut self.apps {
            app.libs.retain(|l| l != name);
        }
        self.libs.retain(|l| l != name);
        self.normalize_counts();
        Ok(users)
    }

    /// Register an app linking `libs`.
    ///
    /// All checks run before anything is changed, so a failed call leaves the
    /// manifest untouched. Repeated library names are kept once.
    pub fn add_app(&mut self, name: &str, libs: &[String]) -> Result<()> {
        validate_name(name)?;
        if let Some(unknown) = libs.iter().find(|l| !self.lib_exists(l)) {
            return Err(ScaffoldError::UnknownLibrary {
                name: unknown.clone(),
            });
        }
        if self.app_exists(name) {
            return Err(ScaffoldError::Duplicate {
                kind: EntryKind::App,
                name: name.to_string(),
            });
        }
        if self.lib_exists(name) {
            return Err(ScaffoldError::Duplicate {
                kind: EntryKind::Library,
                name: name.to_string(),
            });
        }

        let mut unique: Vec<String> = Vec::with_capacity(libs.len());
        for lib in libs {
            if !unique.contains(lib) {
                unique.push(lib.clone());
            }
        }
        self.apps.push(App {
            name: name.to_string(),
            lib_count: unique.len() as i64,
            libs: unique,
        });
        self.normalize_counts();
        Ok(())
    }

    pub fn remove_app(&mut self, name: &str) -> Result<()> {
        if !self.app_exists(name) {
            return Err(ScaffoldError::NotFound {
                kind: EntryKind::App,
                name: name.to_string(),
            });
        }
        self.apps.retain(|a| a.name != name);
        self.normalize_counts();
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::sentinel();
    }

    /// Rewrite every recorded count from the lists it describes.
    pub fn normalize_counts(&mut self) {
        self.lib_count = self.libs.len() as i64;
        self.app_count = self.apps.len() as i64;
        for app in &mut self.apps {
            app.lib_count = app.libs.len() as i64;
        }
    }

    /// Consistency problems in the recorded data. A sentinel manifest has none.
    pub fn check(&self) -> Vec<ManifestIssue> {
        let mut issues = Vec::new();
        if self.is_sentinel() {
            return issues;
        }

        if self.lib_count != self.libs.len() as i64 {
            issues.push(ManifestIssue::LibCountMismatch {
                recorded: self.lib_count,
                actual: self.libs.len(),
            });
        }
        if self.app_count != self.apps.len() as i64 {
            issues.push(ManifestIssue::AppCountMismatch {
                recorded: self.app_count,
                actual: self.apps.len(),
            });
        }
        for (i, lib) in self.libs.iter().enumerate() {
            if self.libs[..i].contains(lib) {
                issues.push(ManifestIssue::DuplicateLibrary(lib.clone()));
            }
        }
        for (i, app) in self.apps.iter().enumerate() {
            if self.apps[..i].iter().any(|a| a.name == app.name) {
                issues.push(ManifestIssue::DuplicateApp(app.name.clone()));
            }
            for lib in &app.libs {
                if !self.lib_exists(lib) {
                    issues.push(ManifestIssue::DanglingLibrary {
                        app: app.name.clone(),
                        lib: lib.clone(),
                    });
                }
            }
            if app.lib_count != app.libs.len() as i64 {
                issues.push(ManifestIssue::AppLibCountMismatch {
                    app: app.name.clone(),
                    recorded: app.lib_count,
                    actual: app.libs.len(),
                });
            }
        }
        issues
    }

    fn require_lib(&self, name: &str) -> Result<()> {
        if self.lib_exists(name) {
            Ok(())
        } else {
            Err(ScaffoldError::NotFound {
                kind: EntryKind::Library,
                name: name.to_string(),
            })
        }
    }
}

/// A manifest bound to the file it was read from.
///
/// Mutations happen in memory; nothing reaches disk until [`ManifestStore::save`].
#[derive(Debug)]
pub struct ManifestStore {
    path: PathBuf,
    manifest: Manifest,
}

impl ManifestStore {
    /// Read the manifest at `path`. A missing or malformed file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let manifest = jsonio::read_json(&path)?;
        Ok(Self { path, manifest })
    }

    /// A store for `path` holding the sentinel manifest, without reading it.
    pub fn fresh(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            manifest: Manifest::sentinel(),
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn lib_exists(&self, name: &str) -> bool {
        self.manifest.lib_exists(name)
    }

    pub fn app_exists(&self, name: &str) -> bool {
        self.manifest.app_exists(name)
    }

    pub fn get_app_libs(&self, name: &str) -> &[String] {
        self.manifest.get_app_libs(name)
    }

    pub fn add_lib(&mut self, name: &str) -> Result<()> {
        self.manifest.add_lib(name)
    }

    pub fn remove_lib(&mut self, name: &str) -> Result<()> {
        self.manifest.remove_lib(name)
    }

    pub fn detach_lib(&mut self, name: &str) -> Result<Vec<String>> {
        self.manifest.detach_lib(name)
    }

    pub fn add_app(&mut self, name: &str, libs: &[String]) -> Result<()> {
        self.manifest.add_app(name, libs)
    }

    pub fn remove_app(&mut self, name: &str) -> Result<()> {
        self.manifest.remove_app(name)
    }

    pub fn reset(&mut self) {
        self.manifest.reset();
    }

    pub fn save(&self) -> Result<()> {
        jsonio::write_json(&self.path, &self.manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Manifest {
        Manifest {
            lib_count: 0,
            libs: vec![],
            app_count: 0,
            apps: vec![],
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_lib_increments_count() {
        let mut m = empty();
        m.add_lib("mathutils").unwrap();
        assert!(m.lib_exists("mathutils"));
        assert_eq!(m.lib_count, 1);
        assert_eq!(m.libs, names(&["mathutils"]));
    }

    #[test]
    fn test_add_lib_rejects_duplicates() {
        let mut m = empty();
        m.add_lib("core").unwrap();
        let err = m.add_lib("core").unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Duplicate {
                kind: EntryKind::Library,
                ..
            }
        ));
        assert_eq!(m.lib_count, 1);
    }

    #[test]
    fn test_add_lib_rejects_non_identifiers() {
        let mut m = empty();
        for bad in ["", "1abc", "my-lib", "a b", "../etc"] {
            assert!(matches!(
                m.add_lib(bad),
                Err(ScaffoldError::InvalidName { .. })
            ));
        }
        assert!(m.libs.is_empty());
    }

    #[test]
    fn test_remove_lib_round_trip() {
        let mut m = empty();
        m.add_lib("io").unwrap();
        let before = m.clone();
        m.add_lib("mathutils").unwrap();
        m.remove_lib("mathutils").unwrap();
        assert_eq!(m, before);
    }

    #[test]
    fn test_remove_missing_lib() {
        let mut m = empty();
        assert!(matches!(
            m.remove_lib("ghost"),
            Err(ScaffoldError::NotFound {
                kind: EntryKind::Library,
                ..
            })
        ));
    }

    #[test]
    fn test_remove_lib_in_use_is_refused() {
        let mut m = empty();
        m.add_lib("mathutils").unwrap();
        m.add_app("sim", &names(&["mathutils"])).unwrap();
        let err = m.remove_lib("mathutils").unwrap_err();
        match err {
            ScaffoldError::LibraryInUse { apps, .. } => assert_eq!(apps, names(&["sim"])),
            other => panic!("unexpected error: {other}"),
        }
        assert!(m.lib_exists("mathutils"));
    }

    #[test]
    fn test_detach_lib_cascades() {
        let mut m = empty();
        m.add_lib("a").unwrap();
        m.add_lib("b").unwrap();
        m.add_app("sim", &names(&["a", "b"])).unwrap();
        let changed = m.detach_lib("a").unwrap();
        assert_eq!(changed, names(&["sim"]));
        assert_eq!(m.get_app_libs("sim"), names(&["b"]).as_slice());
        assert_eq!(m.app("sim").unwrap().lib_count, 1);
        assert!(m.check().is_empty());
    }

    #[test]
    fn test_add_app_records_lib_count() {
        let mut m = empty();
        m.add_lib("mathutils").unwrap();
        m.add_app("sim", &names(&["mathutils"])).unwrap();
        assert_eq!(
            m.apps,
            vec![App {
                name: "sim".into(),
                libs: names(&["mathutils"]),
                lib_count: 1,
            }]
        );
        assert_eq!(m.app_count, 1);
    }

    #[test]
    fn test_add_app_unknown_library_leaves_manifest_unchanged() {
        let mut m = empty();
        m.add_lib("mathutils").unwrap();
        let before = m.clone();
        let err = m.add_app("sim", &names(&["mathutils", "physics"])).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnknownLibrary { ref name } if name == "physics"));
        assert_eq!(m, before);
    }

    #[test]
    fn test_add_app_duplicate() {
        let mut m = empty();
        m.add_app("sim", &[]).unwrap();
        assert!(matches!(
            m.add_app("sim", &[]),
            Err(ScaffoldError::Duplicate {
                kind: EntryKind::App,
                ..
            })
        ));
        assert_eq!(m.app_count, 1);
    }

    #[test]
    fn test_add_app_dedupes_libs() {
        let mut m = empty();
        m.add_lib("a").unwrap();
        m.add_app("sim", &names(&["a", "a"])).unwrap();
        assert_eq!(m.get_app_libs("sim"), names(&["a"]).as_slice());
        assert_eq!(m.app("sim").unwrap().lib_count, 1);
    }

    #[test]
    fn test_app_and_lib_names_do_not_collide() {
        let mut m = empty();
        m.add_lib("core").unwrap();
        assert!(m.add_app("core", &[]).is_err());
        m.add_app("sim", &[]).unwrap();
        assert!(m.add_lib("sim").is_err());
    }

    #[test]
    fn test_get_app_libs_unknown_is_empty() {
        assert!(empty().get_app_libs("nope").is_empty());
    }

    #[test]
    fn test_sentinel_first_mutation_normalizes() {
        let mut m = Manifest::sentinel();
        assert!(m.is_sentinel());
        assert!(m.check().is_empty());
        m.add_lib("core").unwrap();
        assert_eq!(m.lib_count, 1);
        assert_eq!(m.app_count, 0);
    }

    #[test]
    fn test_reset_restores_sentinel() {
        let mut m = empty();
        m.add_lib("core").unwrap();
        m.add_app("sim", &names(&["core"])).unwrap();
        m.reset();
        assert_eq!(m.lib_count, -1);
        assert_eq!(m.app_count, -1);
        assert!(m.libs.is_empty() && m.apps.is_empty());
    }

    #[test]
    fn test_check_reports_legacy_drift() {
        let json = r#"{
            "lib_count": 0,
            "libs": ["mathutils"],
            "app_count": 0,
            "apps": [{ "name": "sim", "lib_count": 0, "libs": ["mathutils", "gone"] }]
        }"#;
        let m: Manifest = serde_json::from_str(json).unwrap();
        let issues = m.check();
        assert!(issues.contains(&ManifestIssue::LibCountMismatch {
            recorded: 0,
            actual: 1
        }));
        assert!(issues.contains(&ManifestIssue::DanglingLibrary {
            app: "sim".into(),
            lib: "gone".into()
        }));
        assert!(issues.contains(&ManifestIssue::AppLibCountMismatch {
            app: "sim".into(),
            recorded: 0,
            actual: 2
        }));
    }

    #[test]
    fn test_store_persists_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("json").join("project_data.json");
        let mut store = ManifestStore::fresh(&path);
        store.add_lib("mathutils").unwrap();
        store.save().unwrap();

        let reopened = ManifestStore::open(&path).unwrap();
        assert!(reopened.lib_exists("mathutils"));
        assert_eq!(reopened.manifest().lib_count, 1);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"lib_count\": 1,"));
    }

    #[test]
    fn test_store_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestStore::open(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ScaffoldError::FileSystem { .. }));
    }
}
