// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Upload admission policy.
//!
//! This module enforces file requirements before any upload starts, so a
//! file that can never be accepted is rejected without creating a
//! placeholder.

use procura_domain::FileMeta;
use thiserror::Error;

/// Upload policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadPolicyError {
    /// The file has no name.
    #[error("File name must not be empty")]
    EmptyFilename,

    /// The file exceeds the size limit.
    #[error("File is {size} bytes; the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    /// The declared MIME type is not accepted.
    #[error("File type '{mime}' is not accepted")]
    UnsupportedType { mime: String },
}

/// Upload policy configuration.
pub struct UploadPolicy {
    /// Maximum file size in bytes.
    pub max_size_bytes: u64,
    /// Accepted MIME types. A trailing `/` entry accepts the whole
    /// top-level type (e.g., `"image/"`).
    pub accepted_mime: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: 10 * 1024 * 1024,
            accepted_mime: vec![
                String::from("application/pdf"),
                String::from("application/msword"),
                String::from(
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                ),
                String::from("image/"),
            ],
        }
    }
}

impl UploadPolicy {
    /// Validates a file against the policy.
    ///
    /// # Errors
    ///
    /// Returns an `UploadPolicyError` if the file does not meet policy
    /// requirements.
    pub fn validate(&self, file: &FileMeta) -> Result<(), UploadPolicyError> {
        if file.name.trim().is_empty() {
            return Err(UploadPolicyError::EmptyFilename);
        }

        if file.size > self.max_size_bytes {
            return Err(UploadPolicyError::TooLarge {
                size: file.size,
                max: self.max_size_bytes,
            });
        }

        let accepted = self.accepted_mime.iter().any(|m| {
            if m.ends_with('/') {
                file.mime.starts_with(m)
            } else {
                file.mime == *m
            }
        });
        if !accepted {
            return Err(UploadPolicyError::UnsupportedType {
                mime: file.mime.clone(),
            });
        }

        Ok(())
    }
}
