// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attachment lifecycle types.
//!
//! An attachment is a tagged union so that illegal states are
//! unrepresentable: an uploading placeholder has a temporary id and no
//! server id, a confirmed attachment has a server id and no temporary id.
//! Failed uploads leave no residue; they are removed from the list and
//! reported through the batch outcome instead.

use serde::{Deserialize, Serialize};

/// Metadata for a file the moment it is selected, before any upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// The client-side file name.
    pub name: String,
    /// The file size in bytes.
    pub size: u64,
    /// The declared MIME type.
    pub mime: String,
}

/// A file attached to a bid or a tender upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Attachment {
    /// Placeholder created the instant a file is selected, before the
    /// upload collaborator has responded.
    Uploading {
        /// Temporary client-assigned identifier.
        temp_id: String,
        /// The client-side file name.
        name: String,
        /// The file size in bytes.
        size: u64,
        /// The declared MIME type.
        mime: String,
    },
    /// Confirmed by the upload collaborator.
    Uploaded {
        /// Server-assigned identifier.
        id: String,
        /// The stored filename on the upload service.
        filename: String,
        /// The original client-side file name.
        name: String,
        /// The file size in bytes.
        size: u64,
        /// The declared MIME type.
        mime: String,
    },
}

impl Attachment {
    /// Creates an uploading placeholder from file metadata.
    #[must_use]
    pub fn placeholder(temp_id: String, meta: &FileMeta) -> Self {
        Self::Uploading {
            temp_id,
            name: meta.name.clone(),
            size: meta.size,
            mime: meta.mime.clone(),
        }
    }

    /// Returns the client-side file name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Uploading { name, .. } | Self::Uploaded { name, .. } => name,
        }
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        match self {
            Self::Uploading { size, .. } | Self::Uploaded { size, .. } => *size,
        }
    }

    /// Returns the declared MIME type.
    #[must_use]
    pub fn mime(&self) -> &str {
        match self {
            Self::Uploading { mime, .. } | Self::Uploaded { mime, .. } => mime,
        }
    }

    /// Returns true if the upload collaborator has confirmed this file.
    #[must_use]
    pub const fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }

    /// Returns the temporary id if this is still a placeholder.
    #[must_use]
    pub fn temp_id(&self) -> Option<&str> {
        match self {
            Self::Uploading { temp_id, .. } => Some(temp_id),
            Self::Uploaded { .. } => None,
        }
    }

    /// Returns the server-assigned id if this upload is confirmed.
    #[must_use]
    pub fn server_id(&self) -> Option<&str> {
        match self {
            Self::Uploading { .. } => None,
            Self::Uploaded { id, .. } => Some(id),
        }
    }

    /// Returns true if `id` matches this attachment's current identifier,
    /// temporary or server-assigned.
    #[must_use]
    pub fn matches_id(&self, id: &str) -> bool {
        match self {
            Self::Uploading { temp_id, .. } => temp_id == id,
            Self::Uploaded { id: server_id, .. } => server_id == id,
        }
    }
}

/// The single parent entity that owns an attachment list.
///
/// Ownership is fixed at upload time and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AttachmentOwner {
    /// Attachments belonging to a bid.
    Bid(i64),
    /// Attachments belonging to a tender's upload batch.
    TenderBatch(i64),
}
