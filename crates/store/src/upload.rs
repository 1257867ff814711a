// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Upload collaborator contract.
//!
//! The real collaborator stores bytes and serves downloads; none of that
//! is modeled here. The core only needs the admission result: a stored
//! file descriptor on success, a per-file upload error on failure.
//! Download and inline viewing stay entirely on the collaborator.

use procura_domain::{DomainError, FileMeta};

/// A file confirmed by the upload collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Server-assigned identifier.
    pub id: String,
    /// The stored filename.
    pub filename: String,
    /// The stored size in bytes.
    pub size: u64,
    /// The stored MIME type.
    pub mime: String,
}

/// Contract for the file upload collaborator.
pub trait UploadService {
    /// Uploads one file and returns its stored descriptor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Upload` carrying the originating filename if
    /// the collaborator rejects the file.
    fn upload(&mut self, file: &FileMeta) -> Result<StoredFile, DomainError>;

    /// Deletes a stored file by filename.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Upload` if the file cannot be removed.
    fn delete(&mut self, filename: &str) -> Result<(), DomainError>;
}

/// A deterministic upload service for tests and the development server.
///
/// Assigns sequential server ids. Files whose names appear in
/// `fail_names` are rejected, which is how tests exercise partial batch
/// failure.
#[derive(Debug, Default)]
pub struct SequentialUploader {
    next_id: u64,
    /// File names this uploader rejects.
    pub fail_names: Vec<String>,
    /// Filenames deleted through this uploader, in order.
    pub deleted: Vec<String>,
}

impl SequentialUploader {
    /// Creates an uploader that accepts every file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an uploader that rejects the named files.
    #[must_use]
    pub fn failing_on(fail_names: Vec<String>) -> Self {
        Self {
            fail_names,
            ..Self::default()
        }
    }
}

impl UploadService for SequentialUploader {
    fn upload(&mut self, file: &FileMeta) -> Result<StoredFile, DomainError> {
        if self.fail_names.iter().any(|n| n == &file.name) {
            return Err(DomainError::Upload {
                filename: file.name.clone(),
                reason: String::from("upload collaborator rejected the file"),
            });
        }
        self.next_id += 1;
        let id = self.next_id;
        Ok(StoredFile {
            id: format!("file-{id}"),
            filename: format!("{id}-{}", file.name),
            size: file.size,
            mime: file.mime.clone(),
        })
    }

    fn delete(&mut self, filename: &str) -> Result<(), DomainError> {
        self.deleted.push(filename.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str) -> FileMeta {
        FileMeta {
            name: name.to_string(),
            size: 2048,
            mime: String::from("application/pdf"),
        }
    }

    #[test]
    fn test_upload_assigns_sequential_server_ids() {
        let mut uploader = SequentialUploader::new();

        let first = uploader.upload(&meta("plan.pdf")).unwrap();
        let second = uploader.upload(&meta("quote.pdf")).unwrap();

        assert_eq!(first.id, "file-1");
        assert_eq!(first.filename, "1-plan.pdf");
        assert_eq!(second.id, "file-2");
    }

    #[test]
    fn test_named_files_are_rejected_with_an_upload_error() {
        let mut uploader = SequentialUploader::failing_on(vec![String::from("quote.pdf")]);

        let result = uploader.upload(&meta("quote.pdf"));

        match result {
            Err(DomainError::Upload { filename, .. }) => assert_eq!(filename, "quote.pdf"),
            other => panic!("Expected Upload error, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_records_the_filename() {
        let mut uploader = SequentialUploader::new();

        uploader.delete("1-plan.pdf").unwrap();

        assert_eq!(uploader.deleted, vec![String::from("1-plan.pdf")]);
    }
}
