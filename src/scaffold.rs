//! Scaffold staging and removal.
//!
//! A [`Scaffold`] is the full set of files for one library or app, rendered
//! in memory before anything touches the disk. [`Scaffold::write`] either
//! writes every file or leaves the tree as it found it.

use crate::error::{Result, ScaffoldError};
use crate::templates;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Top-level folders that hold generated sources.
pub const SOURCE_ROOTS: [&str; 4] = ["apps", "include", "src", "tests"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    dirs: Vec<PathBuf>,
    files: Vec<ScaffoldFile>,
}

/// What [`Scaffold::write`] put on disk, as absolute paths.
#[derive(Debug, Default)]
pub struct Written {
    pub files: Vec<PathBuf>,
    /// Directories that did not exist before the write.
    pub dirs: Vec<PathBuf>,
}

impl Written {
    /// Remove everything the write created, newest first.
    pub fn rollback(&self) {
        for path in &self.files {
            let _ = fs::remove_file(path);
        }
        for dir in self.dirs.iter().rev() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}

/// Directories owned by library `lib`.
pub fn lib_dirs(lib: &str) -> Vec<PathBuf> {
    vec![
        Path::new("src").join(lib),
        Path::new("include").join(lib),
        Path::new("tests").join(lib),
    ]
}

/// Directories owned by app `app`.
pub fn app_dirs(app: &str) -> Vec<PathBuf> {
    vec![Path::new("apps").join(app)]
}

impl Scaffold {
    pub fn library(lib: &str) -> Self {
        let src = Path::new("src").join(lib);
        let include = Path::new("include").join(lib);
        let tests = Path::new("tests").join(lib);
        Self {
            dirs: lib_dirs(lib),
            files: vec![
                file(src.join(format!("{lib}.cpp")), templates::lib_source(lib)),
                file(include.join(format!("{lib}.h")), templates::lib_header(lib)),
                file(tests.join(format!("test_{lib}.cpp")), templates::lib_test(lib)),
                file(src.join("CMakeLists.txt"), templates::lib_cmake(lib)),
                file(tests.join("CMakeLists.txt"), templates::lib_test_cmake(lib)),
            ],
        }
    }

    pub fn app(app: &str, libs: &[String]) -> Self {
        let dir = Path::new("apps").join(app);
        Self {
            dirs: app_dirs(app),
            files: vec![
                file(dir.join(format!("{app}.cpp")), templates::app_source(libs)),
                file(dir.join("CMakeLists.txt"), templates::app_cmake(app, libs)),
            ],
        }
    }

    /// Write every file under `root` and report what was created.
    ///
    /// Refuses to overwrite existing files. On any failure the directories
    /// created by this call and the files written so far are removed again.
    pub fn write(&self, root: &Path) -> Result<Written> {
        for f in &self.files {
            let target = root.join(&f.path);
            if target.exists() {
                return Err(ScaffoldError::fs(
                    &target,
                    io::Error::new(io::ErrorKind::AlreadyExists, "file already exists"),
                ));
            }
        }

        let mut written = Written::default();
        match self.write_staged(root, &mut written) {
            Ok(()) => Ok(written),
            Err(e) => {
                written.rollback();
                Err(e)
            }
        }
    }

    fn write_staged(&self, root: &Path, written: &mut Written) -> Result<()> {
        for dir in &self.dirs {
            let dir = root.join(dir);
            if !dir.exists() {
                fs::create_dir_all(&dir).map_err(|e| ScaffoldError::fs(&dir, e))?;
                written.dirs.push(dir);
            }
        }
        for f in &self.files {
            let target = root.join(&f.path);
            fs::write(&target, &f.contents).map_err(|e| ScaffoldError::fs(&target, e))?;
            written.files.push(target);
        }
        Ok(())
    }
}

fn file(path: PathBuf, contents: String) -> ScaffoldFile {
    ScaffoldFile { path, contents }
}

/// Remove `dirs` under `root`, skipping any that do not exist.
///
/// Returns the directories actually removed.
pub fn remove_dirs(root: &Path, dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for dir in dirs {
        let path = root.join(dir);
        match fs::remove_dir_all(&path) {
            Ok(()) => removed.push(path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(ScaffoldError::fs(&path, e)),
        }
    }
    Ok(removed)
}

/// Delete everything inside `dir` but keep the directory itself.
///
/// A missing directory counts as already empty. Returns the entries removed.
pub fn clear_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(ScaffoldError::fs(dir, e)),
    };

    let mut removed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScaffoldError::fs(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| ScaffoldError::fs(&path, e))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| ScaffoldError::fs(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| ScaffoldError::fs(&path, e))?;
        }
        removed.push(path);
    }
    removed.sort();
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_writes_quartet() {
        let dir = tempfile::tempdir().unwrap();
        let written = Scaffold::library("mathutils").write(dir.path()).unwrap();
        assert_eq!(written.files.len(), 5);
        assert_eq!(written.dirs.len(), 3);

        let root = dir.path();
        let header = fs::read_to_string(root.join("include/mathutils/mathutils.h")).unwrap();
        assert!(header.contains("namespace mathutils"));
        let source = fs::read_to_string(root.join("src/mathutils/mathutils.cpp")).unwrap();
        assert!(source.contains("#include \"mathutils/mathutils.h\""));
        assert!(root.join("tests/mathutils/test_mathutils.cpp").exists());
        assert!(root.join("src/mathutils/CMakeLists.txt").exists());
        assert!(root.join("tests/mathutils/CMakeLists.txt").exists());
    }

    #[test]
    fn test_write_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("apps/sim");
        fs::create_dir_all(&existing).unwrap();
        fs::write(existing.join("sim.cpp"), "// mine").unwrap();

        let err = Scaffold::app("sim", &[]).write(dir.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::FileSystem { .. }));
        assert_eq!(fs::read_to_string(existing.join("sim.cpp")).unwrap(), "// mine");
        assert!(!existing.join("CMakeLists.txt").exists());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where the tests/ folder should be makes the last dir fail.
        fs::write(dir.path().join("tests"), "").unwrap();

        assert!(Scaffold::library("io").write(dir.path()).is_err());
        assert!(!dir.path().join("src/io").exists());
        assert!(!dir.path().join("include/io").exists());
    }

    #[test]
    fn test_rollback_keeps_existing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("apps/sim");
        fs::create_dir_all(&app_dir).unwrap();
        fs::write(app_dir.join("notes.txt"), "keep").unwrap();
        let lib = Scaffold::library("io").write(dir.path()).unwrap();
        let app = Scaffold::app("sim", &[]).write(dir.path()).unwrap();
        assert!(app.dirs.is_empty());

        lib.rollback();
        app.rollback();
        assert!(!dir.path().join("src/io").exists());
        assert!(!dir.path().join("include/io").exists());
        assert!(!dir.path().join("tests/io").exists());
        assert!(!app_dir.join("sim.cpp").exists());
        assert_eq!(fs::read_to_string(app_dir.join("notes.txt")).unwrap(), "keep");
    }

    #[test]
    fn test_remove_dirs_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        Scaffold::app("sim", &[]).write(dir.path()).unwrap();
        let removed = remove_dirs(dir.path(), &lib_dirs("nothing")).unwrap();
        assert!(removed.is_empty());
        let removed = remove_dirs(dir.path(), &app_dirs("sim")).unwrap();
        assert_eq!(removed, vec![dir.path().join("apps/sim")]);
    }

    #[test]
    fn test_clear_dir_keeps_folder() {
        let dir = tempfile::tempdir().unwrap();
        Scaffold::library("io").write(dir.path()).unwrap();
        fs::write(dir.path().join("src/notes.txt"), "x").unwrap();

        let removed = clear_dir(&dir.path().join("src")).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(dir.path().join("src").is_dir());
        assert!(clear_dir(&dir.path().join("missing")).unwrap().is_empty());
    }
}
