use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Where persisted state bytes live.
///
/// Reads return the whole record (empty when nothing was ever written). Writes replace it
/// wholesale and must be atomic: a reader sees either the old or the new bytes.
pub trait ByteStorage {
    fn read(&mut self) -> io::Result<Vec<u8>>;
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<T: ByteStorage + ?Sized> ByteStorage for &mut T {
    fn read(&mut self) -> io::Result<Vec<u8>> {
        (**self).read()
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }
}

impl<T: ByteStorage + ?Sized> ByteStorage for Box<T> {
    fn read(&mut self) -> io::Result<Vec<u8>> {
        (**self).read()
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemStorage {
    data: Vec<u8>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl ByteStorage for MemStorage {
    fn read(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.data.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.data.clear();
        self.data.extend_from_slice(bytes);
        Ok(())
    }
}

/// A single state file on the local filesystem.
///
/// A missing file reads as empty. Writes go to a temporary file in the same directory that is
/// synced and then renamed over the target.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ByteStorage for FileStorage {
    fn read(&mut self) -> io::Result<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_storage_replaces_contents() {
        let mut storage = MemStorage::from_vec(vec![1, 2, 3, 4]);
        storage.write(&[9]).unwrap();
        assert_eq!(storage.read().unwrap(), vec![9]);
    }

    #[test]
    fn file_storage_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("state.pb"));
        assert!(storage.read().unwrap().is_empty());
    }

    #[test]
    fn file_storage_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.pb");
        let mut storage = FileStorage::new(&path);
        storage.write(b"first").unwrap();
        storage.write(b"second").unwrap();
        assert_eq!(storage.read().unwrap(), b"second");
        assert_eq!(fs::read(&path).unwrap(), b"second");

        // Only the target file remains; temp files were renamed away.
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
