//! Directory-level I/O for resource documents.
//!
//! The ARB adapter decides which files qualify and how to name them; a [`FileSet`]
//! only lists, reads, clears, and writes.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::error::Error;

/// A directory of named files.
pub trait FileSet {
    /// Names of the regular files directly inside `dir`, sorted.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>, Error>;

    fn read_file(&self, dir: &Path, name: &str) -> Result<Vec<u8>, Error>;

    /// Removes `dir` and everything in it. A missing directory is not an error.
    fn remove_all(&mut self, dir: &Path) -> Result<(), Error>;

    /// Writes `bytes` to `name` inside `dir`, creating `dir` if needed.
    fn write_file(&mut self, dir: &Path, name: &str, bytes: &[u8]) -> Result<(), Error>;
}

/// [`FileSet`] backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirFileSet;

impl FileSet for DirFileSet {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>, Error> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::file_access(dir, e))? {
            let entry = entry.map_err(|e| Error::file_access(dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| Error::file_access(entry.path(), e))?;
            if file_type.is_dir() {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn read_file(&self, dir: &Path, name: &str) -> Result<Vec<u8>, Error> {
        let path = dir.join(name);
        fs::read(&path).map_err(|e| Error::file_access(&path, e))
    }

    fn remove_all(&mut self, dir: &Path) -> Result<(), Error> {
        match fs::remove_dir_all(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::file_access(dir, e)),
        }
    }

    fn write_file(&mut self, dir: &Path, name: &str, bytes: &[u8]) -> Result<(), Error> {
        fs::create_dir_all(dir).map_err(|e| Error::file_access(dir, e))?;
        let path = dir.join(name);
        fs::write(&path, bytes).map_err(|e| Error::file_access(&path, e))
    }
}

/// In-memory [`FileSet`], for embedding and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFileSet {
    dirs: BTreeMap<PathBuf, BTreeMap<String, Vec<u8>>>,
}

impl MemoryFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any file with the same name.
    pub fn insert(
        &mut self,
        dir: impl Into<PathBuf>,
        name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) {
        self.dirs
            .entry(dir.into())
            .or_default()
            .insert(name.into(), bytes.into());
    }

    pub fn get(&self, dir: &Path, name: &str) -> Option<&[u8]> {
        self.dirs
            .get(dir)
            .and_then(|files| files.get(name))
            .map(Vec::as_slice)
    }
}

impl FileSet for MemoryFileSet {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>, Error> {
        match self.dirs.get(dir) {
            Some(files) => Ok(files.keys().cloned().collect()),
            None => Err(Error::file_access(
                dir,
                std::io::Error::from(ErrorKind::NotFound),
            )),
        }
    }

    fn read_file(&self, dir: &Path, name: &str) -> Result<Vec<u8>, Error> {
        self.get(dir, name).map(<[u8]>::to_vec).ok_or_else(|| {
            Error::file_access(dir.join(name), std::io::Error::from(ErrorKind::NotFound))
        })
    }

    fn remove_all(&mut self, dir: &Path) -> Result<(), Error> {
        self.dirs.retain(|path, _| !path.starts_with(dir));
        Ok(())
    }

    fn write_file(&mut self, dir: &Path, name: &str, bytes: &[u8]) -> Result<(), Error> {
        self.insert(dir, name, bytes);
        Ok(())
    }
}
