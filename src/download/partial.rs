//! Scoped partial file used while saving a download.
//!
//! Bytes go to a hidden `.part` sibling of the destination. The partial file is
//! removed on drop unless [`PartialFile::commit`] renamed it into place, so a
//! failed write never leaves a truncated image behind.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct PartialFile {
    path: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl PartialFile {
    /// Creates (or truncates) `<dir>/.<file_name>.part`.
    pub fn create(dir: &Path, file_name: &str) -> io::Result<Self> {
        let path = dir.join(format!(".{file_name}.part"));
        let file = File::create(&path)?;
        Ok(Self {
            path,
            file: Some(file),
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "partial file already closed"))?;
        file.write_all(bytes)?;
        file.flush()
    }

    /// Closes the handle and moves the partial file to `destination`,
    /// replacing any file already there.
    pub fn commit(mut self, destination: &Path) -> io::Result<()> {
        drop(self.file.take());
        if destination.exists() {
            tracing::debug!(path = %destination.display(), "replacing existing download");
        }
        fs::rename(&self.path, destination)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        drop(self.file.take());
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::debug!(path = %self.path.display(), error = %e, "could not remove partial download");
            }
        }
    }
}

impl std::fmt::Debug for PartialFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialFile")
            .field("path", &self.path)
            .field("committed", &self.committed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_partial_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let partial_path;
        {
            let mut partial = PartialFile::create(dir.path(), "Heat_Poster.jpg").unwrap();
            partial.write_all(b"half an image").unwrap();
            partial_path = partial.path().to_path_buf();
            assert!(partial_path.exists());
        }
        assert!(!partial_path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn committed_partial_file_lands_at_destination() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("Heat_Poster.jpg");

        let mut partial = PartialFile::create(dir.path(), "Heat_Poster.jpg").unwrap();
        partial.write_all(b"jpeg bytes").unwrap();
        let partial_path = partial.path().to_path_buf();
        partial.commit(&destination).unwrap();

        assert!(!partial_path.exists());
        assert_eq!(fs::read(&destination).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn commit_replaces_existing_download() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("Heat_Poster.jpg");
        fs::write(&destination, b"old poster").unwrap();

        let mut partial = PartialFile::create(dir.path(), "Heat_Poster.jpg").unwrap();
        partial.write_all(b"new poster").unwrap();
        partial.commit(&destination).unwrap();

        assert_eq!(fs::read(&destination).unwrap(), b"new poster");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
