//! Files read from disk for the command-line client.

use std::path::Path;

use crate::accept::{mime_for, AllowList};
use crate::error::FileError;
use crate::slots::FileHandle;

/// An in-memory copy of a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    name: String,
    bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read `path`, keeping only its file name.
    pub fn load(path: &Path) -> Result<Self, FileError> {
        let bytes = std::fs::read(path).map_err(|source| FileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(name, bytes))
    }

    /// Read `path` if `accept` allows its extension.
    pub fn load_accepted(path: &Path, accept: AllowList) -> Result<Self, FileError> {
        let name = path.to_string_lossy();
        if !accept.accepts(&name) {
            return Err(FileError::NotAccepted {
                name: name.into_owned(),
                accepted: accept.accept_attr(),
            });
        }
        Self::load(path)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &'static str {
        mime_for(&self.name)
    }
}

impl FileHandle for LocalFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accept::CLAIM_ACCEPT;
    use std::io::Write;

    #[test]
    fn test_load_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claim_form.pdf");
        std::fs::File::create(&path).unwrap().write_all(b"%PDF-1.7").unwrap();

        let file = LocalFile::load(&path).unwrap();
        assert_eq!(file.name(), "claim_form.pdf");
        assert_eq!(file.size(), 8);
        assert_eq!(file.mime(), "application/pdf");
    }

    #[test]
    fn test_load_accepted_rejects_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let err = LocalFile::load_accepted(&path, CLAIM_ACCEPT).unwrap_err();
        assert!(matches!(err, FileError::NotAccepted { .. }));
        assert!(err.to_string().contains(".jpg,.jpeg,.png,.pdf"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = LocalFile::load(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, FileError::Io { .. }));
    }
}
