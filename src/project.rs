//! Project operations.
//!
//! Every operation reads the manifest first and returns before touching any
//! other file if that fails. Mutations are validated in memory, then the
//! derived files are written, then the manifest is saved.

use crate::config::CxsConfig;
use crate::error::Result;
use crate::launch::{self, LaunchDocument};
use crate::manifest::{ManifestIssue, ManifestStore};
use crate::presets;
use crate::scaffold::{self, SOURCE_ROOTS, Scaffold};
use crate::target::Target;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Project {
    root: PathBuf,
    config: CxsConfig,
}

/// Files touched by a create or delete.
#[derive(Debug, Default)]
pub struct Changes {
    pub written: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    /// Apps a forced library delete stripped the library from.
    pub detached_from: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectIssue {
    Manifest(ManifestIssue),
    MissingScaffold { name: String, path: PathBuf },
    Orphan { path: PathBuf },
}

impl fmt::Display for ProjectIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectIssue::Manifest(issue) => issue.fmt(f),
            ProjectIssue::MissingScaffold { name, path } => {
                write!(f, "'{name}' is missing {}", path.display())
            }
            ProjectIssue::Orphan { path } => {
                write!(f, "{} is not tracked by the manifest", path.display())
            }
        }
    }
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: CxsConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &CxsConfig {
        &self.config
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.manifest)
    }

    pub fn presets_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.presets)
    }

    pub fn launch_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.launch)
    }

    pub fn open_store(&self) -> Result<ManifestStore> {
        ManifestStore::open(self.manifest_path())
    }

    pub fn create_lib(&self, name: &str) -> Result<Changes> {
        let mut store = self.open_store()?;
        store.add_lib(name)?;
        let written = self.commit_scaffold(&store, &Scaffold::library(name))?;
        Ok(Changes {
            written,
            ..Default::default()
        })
    }

    /// Remove a library from the manifest and delete its directories.
    ///
    /// Without `force` a library still linked by an app is refused; with it
    /// the library is dropped from those apps as well.
    pub fn delete_lib(&self, name: &str, force: bool) -> Result<Changes> {
        let mut store = self.open_store()?;
        let detached_from = if force {
            store.detach_lib(name)?
        } else {
            store.remove_lib(name)?;
            Vec::new()
        };
        store.save()?;
        let removed = scaffold::remove_dirs(&self.root, &scaffold::lib_dirs(name))?;
        Ok(Changes {
            removed,
            detached_from,
            ..Default::default()
        })
    }

    pub fn create_app(&self, name: &str, libs: &[String]) -> Result<Changes> {
        let mut store = self.open_store()?;
        store.add_app(name, libs)?;
        let scaffold = Scaffold::app(name, store.get_app_libs(name));
        let written = self.commit_scaffold(&store, &scaffold)?;
        Ok(Changes {
            written,
            ..Default::default()
        })
    }

    pub fn delete_app(&self, name: &str) -> Result<Changes> {
        let mut store = self.open_store()?;
        store.remove_app(name)?;
        store.save()?;
        let removed = scaffold::remove_dirs(&self.root, &scaffold::app_dirs(name))?;
        Ok(Changes {
            removed,
            ..Default::default()
        })
    }

    /// Regenerate presets and launch entries for one library.
    pub fn configure_lib(&self, name: &str) -> Result<Target> {
        let store = self.open_store()?;
        let target = Target::library(store.manifest(), name)?;
        self.write_configuration(std::slice::from_ref(&target))?;
        Ok(target)
    }

    /// Regenerate presets and launch entries for one app and its libraries.
    pub fn configure_app(&self, name: &str) -> Result<Target> {
        let store = self.open_store()?;
        let target = Target::app(store.manifest(), name)?;
        self.write_configuration(std::slice::from_ref(&target))?;
        Ok(target)
    }

    /// Regenerate presets and launch entries for every target.
    pub fn configure_all(&self) -> Result<Vec<Target>> {
        let store = self.open_store()?;
        let targets = Target::all(store.manifest());
        self.write_configuration(&targets)?;
        Ok(targets)
    }

    /// Return the tree to its initial state.
    ///
    /// Works without a readable manifest. Returns every path removed.
    pub fn reset(&self) -> Result<Vec<PathBuf>> {
        let mut removed =
            scaffold::remove_dirs(&self.root, &[self.config.paths.build_output.clone()])?;

        for dir in SOURCE_ROOTS {
            removed.extend(scaffold::clear_dir(&self.root.join(dir))?);
        }

        presets::write_baseline(&self.presets_path(), &self.config.presets)?;
        launch::write_launch(&self.launch_path(), &LaunchDocument::default())?;
        let mut store = self
            .open_store()
            .unwrap_or_else(|_| ManifestStore::fresh(self.manifest_path()));
        store.reset();
        store.save()?;
        Ok(removed)
    }

    /// Manifest inconsistencies plus disagreements between manifest and tree.
    pub fn doctor(&self) -> Result<Vec<ProjectIssue>> {
        let store = self.open_store()?;
        let manifest = store.manifest();
        let mut issues: Vec<ProjectIssue> = manifest
            .check()
            .into_iter()
            .map(ProjectIssue::Manifest)
            .collect();

        let owned: Vec<(String, PathBuf)> = manifest
            .libs
            .iter()
            .flat_map(|l| scaffold::lib_dirs(l).into_iter().map(move |d| (l.clone(), d)))
            .chain(manifest.apps.iter().flat_map(|a| {
                scaffold::app_dirs(&a.name)
                    .into_iter()
                    .map(move |d| (a.name.clone(), d))
            }))
            .collect();

        for (name, dir) in &owned {
            if !self.root.join(dir).is_dir() {
                issues.push(ProjectIssue::MissingScaffold {
                    name: name.clone(),
                    path: dir.clone(),
                });
            }
        }

        for root in SOURCE_ROOTS {
            let entries = match fs::read_dir(self.root.join(root)) {
                Ok(entries) => entries,
                Err(_) => continue,
            };
            let mut orphans: Vec<PathBuf> = entries
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
                .map(|e| Path::new(root).join(e.file_name()))
                .filter(|rel| !owned.iter().any(|(_, d)| d == rel))
                .collect();
            orphans.sort();
            issues.extend(orphans.into_iter().map(|path| ProjectIssue::Orphan { path }));
        }

        Ok(issues)
    }

    fn write_configuration(&self, targets: &[Target]) -> Result<()> {
        presets::write_presets(&self.presets_path(), &self.config.presets, targets)?;
        let document = launch::launch_document(&self.config.paths, &self.config.launch, targets);
        launch::write_launch(&self.launch_path(), &document)
    }

    /// Write `scaffold`, then persist `store`. If saving fails the scaffold
    /// files and directories are removed again so the tree matches the
    /// manifest on disk.
    fn commit_scaffold(&self, store: &ManifestStore, scaffold: &Scaffold) -> Result<Vec<PathBuf>> {
        let written = scaffold.write(&self.root)?;
        if let Err(e) = store.save() {
            written.rollback();
            return Err(e);
        }
        Ok(written.files)
    }
}
