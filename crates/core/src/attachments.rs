// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attachment batch lifecycle.
//!
//! A registry tracks the attachments of exactly one parent entity (a bid
//! or a tender upload batch). Placeholders appear the instant files are
//! selected; completion is reconciled by temporary id because upload
//! responses arrive in any order. A failed upload removes its placeholder
//! entirely. Files in one batch succeed or fail independently; the batch
//! outcome reports counts and filenames, never a single verdict.
//!
//! Once the owning bid leaves `Pending`, the registry is sealed: no new
//! uploads start and nothing can be removed. In-flight uploads may still
//! resolve, since their network fate is already decided.

use procura_domain::{Attachment, AttachmentOwner, DomainError, FileMeta};
use procura_store::{StoredFile, UploadService};

/// How one completed upload was reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResolution {
    /// The placeholder became a confirmed attachment.
    Confirmed,
    /// The upload failed and the placeholder was removed.
    Discarded {
        /// The originating filename.
        filename: String,
        /// Why the upload failed.
        reason: String,
    },
}

/// A single failed file within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    /// The originating filename.
    pub filename: String,
    /// Why the upload failed.
    pub reason: String,
}

/// The per-file outcome of one upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchOutcome {
    /// Number of files confirmed by the collaborator.
    pub uploaded: u64,
    /// The files that failed, with their filenames.
    pub failures: Vec<UploadFailure>,
}

impl BatchOutcome {
    /// Number of files that failed.
    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failures.len() as u64
    }
}

/// Tracks the attachment lifecycle for one parent entity.
#[derive(Debug)]
pub struct AttachmentRegistry {
    owner: AttachmentOwner,
    entries: Vec<Attachment>,
    sealed: bool,
    next_temp: u64,
}

impl AttachmentRegistry {
    /// Creates a registry owned by a bid.
    #[must_use]
    pub const fn for_bid(bid_id: i64) -> Self {
        Self::new(AttachmentOwner::Bid(bid_id))
    }

    /// Creates a registry owned by a tender upload batch.
    #[must_use]
    pub const fn for_tender_batch(tender_id: i64) -> Self {
        Self::new(AttachmentOwner::TenderBatch(tender_id))
    }

    /// Rebuilds the registry for a bid's stored attachment list.
    ///
    /// The registry starts sealed when `editable` is false, so a batch
    /// resumed for a resolved bid rejects new uploads and removal while
    /// in-flight completions may still land.
    #[must_use]
    pub const fn resume_for_bid(bid_id: i64, entries: Vec<Attachment>, editable: bool) -> Self {
        Self {
            owner: AttachmentOwner::Bid(bid_id),
            entries,
            sealed: !editable,
            next_temp: 0,
        }
    }

    const fn new(owner: AttachmentOwner) -> Self {
        Self {
            owner,
            entries: Vec::new(),
            sealed: false,
            next_temp: 0,
        }
    }

    /// The parent entity owning this batch. Fixed at creation.
    #[must_use]
    pub const fn owner(&self) -> AttachmentOwner {
        self.owner
    }

    /// The current attachment list, placeholders included, in order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.entries
    }

    /// Returns true if the owning bid has left `Pending`.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Marks the batch immutable because the owning bid left `Pending`.
    pub const fn seal(&mut self) {
        self.sealed = true;
    }

    /// Creates one `Uploading` placeholder per file, before any network
    /// interaction, and returns their temporary ids in file order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StateConflict` if the batch is sealed.
    pub fn begin_upload(&mut self, files: &[FileMeta]) -> Result<Vec<String>, DomainError> {
        self.reject_if_sealed("start an upload")?;
        let mut temp_ids = Vec::with_capacity(files.len());
        for meta in files {
            self.next_temp += 1;
            let temp_id = format!("tmp-{}", self.next_temp);
            self.entries
                .push(Attachment::placeholder(temp_id.clone(), meta));
            temp_ids.push(temp_id);
        }
        Ok(temp_ids)
    }

    /// Reconciles one upload response against its placeholder.
    ///
    /// On success the placeholder is replaced in place, keeping its list
    /// position. On failure it is removed entirely. Matching is by
    /// temporary id, never by list position.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no placeholder carries
    /// `temp_id`.
    pub fn complete_upload(
        &mut self,
        temp_id: &str,
        result: Result<StoredFile, DomainError>,
    ) -> Result<UploadResolution, DomainError> {
        let position = self
            .entries
            .iter()
            .position(|a| a.temp_id() == Some(temp_id))
            .ok_or_else(|| DomainError::NotFound {
                resource: String::from("attachment placeholder"),
                id: temp_id.to_string(),
            })?;

        match result {
            Ok(stored) => {
                let name = self.entries[position].name().to_string();
                self.entries[position] = Attachment::Uploaded {
                    id: stored.id,
                    filename: stored.filename,
                    name,
                    size: stored.size,
                    mime: stored.mime,
                };
                Ok(UploadResolution::Confirmed)
            }
            Err(err) => {
                let removed = self.entries.remove(position);
                let reason = match &err {
                    DomainError::Upload { reason, .. } => reason.clone(),
                    other => other.to_string(),
                };
                Ok(UploadResolution::Discarded {
                    filename: removed.name().to_string(),
                    reason,
                })
            }
        }
    }

    /// Uploads a batch of files through the collaborator, one placeholder
    /// per file, each resolved independently.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StateConflict` if the batch is sealed.
    /// Individual upload failures never fail the batch; they are reported
    /// in the outcome.
    pub fn upload_batch<U: UploadService>(
        &mut self,
        files: &[FileMeta],
        uploader: &mut U,
    ) -> Result<BatchOutcome, DomainError> {
        let temp_ids = self.begin_upload(files)?;
        let mut outcome = BatchOutcome::default();
        for (temp_id, meta) in temp_ids.iter().zip(files) {
            let resolution = self.complete_upload(temp_id, uploader.upload(meta))?;
            match resolution {
                UploadResolution::Confirmed => outcome.uploaded += 1,
                UploadResolution::Discarded { filename, reason } => {
                    outcome.failures.push(UploadFailure { filename, reason });
                }
            }
        }
        Ok(outcome)
    }

    /// Removes a confirmed attachment from the batch.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StateConflict` if the batch is sealed or the
    /// attachment is still uploading, and `DomainError::NotFound` if no
    /// attachment carries `attachment_id`.
    pub fn remove(&mut self, attachment_id: &str) -> Result<Attachment, DomainError> {
        self.reject_if_sealed("remove an attachment")?;
        let position = self
            .entries
            .iter()
            .position(|a| a.matches_id(attachment_id))
            .ok_or_else(|| DomainError::NotFound {
                resource: String::from("attachment"),
                id: attachment_id.to_string(),
            })?;

        if !self.entries[position].is_uploaded() {
            return Err(DomainError::StateConflict {
                entity: String::from("attachment"),
                current: String::from("uploading"),
                action: String::from("remove"),
                reason: String::from("an attachment cannot be removed until its upload resolves"),
            });
        }

        Ok(self.entries.remove(position))
    }

    /// Consumes the registry, yielding the confirmed attachment list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any placeholder is still
    /// uploading.
    pub fn into_attachments(self) -> Result<Vec<Attachment>, DomainError> {
        if let Some(pending) = self.entries.iter().find(|a| !a.is_uploaded()) {
            return Err(DomainError::Validation {
                field: String::from("attachments"),
                message: format!("Attachment '{}' has not finished uploading", pending.name()),
            });
        }
        Ok(self.entries)
    }

    fn reject_if_sealed(&self, action: &str) -> Result<(), DomainError> {
        if self.sealed {
            let current = match self.owner {
                AttachmentOwner::Bid(_) => "owned by a non-pending bid",
                AttachmentOwner::TenderBatch(_) => "sealed",
            };
            return Err(DomainError::StateConflict {
                entity: String::from("attachment batch"),
                current: current.to_string(),
                action: action.to_string(),
                reason: String::from("attachments are immutable once the owner leaves its editable state"),
            });
        }
        Ok(())
    }
}
