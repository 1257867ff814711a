// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid lifecycle management.
//!
//! This manager is the single writer of bid status. Each operation reads
//! the bid, validates the transition against the state machine and the
//! tender deadline, and writes back with the status it observed; the
//! store rejects the write if the status moved concurrently.

use crate::attachments::{AttachmentRegistry, BatchOutcome};
use crate::clock::Clock;
use crate::error::CoreError;
use procura_audit::{Action, Actor, AuditEvent, Cause, EntityRef, StateSnapshot};
use procura_domain::{
    Bid, BidDraft, BidStatus, DomainError, FileMeta, Tender, TenderStatus, validate_bid_draft,
};
use procura_store::{BidStore, TenderStore, UploadService};

/// Whether a submission created a new bid or updated the vendor's
/// existing pending bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new bid was created.
    Created,
    /// The vendor's existing pending bid was updated in place.
    Updated,
}

/// The result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResult {
    /// The bid after the write.
    pub bid: Bid,
    /// Whether this was a create or an in-place update.
    pub outcome: SubmitOutcome,
    /// The audit event recording the submission.
    pub audit_event: AuditEvent,
}

/// The result of a successful bid transition.
#[derive(Debug, Clone, PartialEq)]
pub struct BidTransition {
    /// The bid after the transition.
    pub bid: Bid,
    /// The audit event recording the transition.
    pub audit_event: AuditEvent,
}

/// Governs bid status transitions and field-update eligibility.
pub struct BidLifecycleManager<'a, S, C> {
    store: &'a mut S,
    clock: &'a C,
}

impl<'a, S, C> BidLifecycleManager<'a, S, C>
where
    S: BidStore + TenderStore,
    C: Clock,
{
    /// Creates a manager over the given store and clock.
    pub const fn new(store: &'a mut S, clock: &'a C) -> Self {
        Self { store, clock }
    }

    /// Submits a bid against an open tender.
    ///
    /// Idempotent by `(tender_id, vendor_id)`: if the vendor already
    /// holds a pending bid, it is updated in place and the outcome says
    /// so; a second bid is never created.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed payloads,
    /// `DeadlineExpired` after the tender deadline, a state conflict if
    /// the tender is not open or the vendor's existing bid is already
    /// resolved, and `NotFound` for an unknown tender.
    pub fn submit(
        &mut self,
        tender_id: i64,
        vendor_id: i64,
        draft: BidDraft,
        actor: Actor,
        cause: Cause,
    ) -> Result<SubmitResult, CoreError> {
        validate_bid_draft(&draft)?;

        let tender = self.load_tender(tender_id)?;
        Self::require_open(&tender, "submit a bid")?;
        self.require_unexpired(&tender)?;

        let now = self.clock.now();

        if let Some(existing) = self.store.bid_for_vendor(tender_id, vendor_id) {
            if existing.status != BidStatus::Pending {
                return Err(CoreError::DomainViolation(DomainError::StateConflict {
                    entity: String::from("bid"),
                    current: existing.status.as_str().to_string(),
                    action: String::from("resubmit"),
                    reason: String::from("the vendor's bid on this tender is already resolved"),
                }));
            }

            let before = bid_snapshot(&existing);
            let mut updated = existing;
            updated.amount = draft.amount;
            updated.proposal = draft.proposal;
            updated.delivery_timeline = draft.delivery_timeline;
            updated.attachments = draft.attachments;
            updated.updated_at = now;

            let bid = self.store.update_bid(BidStatus::Pending, updated)?;
            let audit_event = Self::event(
                actor,
                cause,
                "ResubmitBid",
                Some(format!("Vendor {vendor_id} updated their pending bid")),
                &bid,
                before,
            );
            return Ok(SubmitResult {
                bid,
                outcome: SubmitOutcome::Updated,
                audit_event,
            });
        }

        let bid = self.store.insert_bid(Bid {
            id: None,
            tender_id,
            vendor_id,
            amount: draft.amount,
            proposal: draft.proposal,
            delivery_timeline: draft.delivery_timeline,
            attachments: draft.attachments,
            status: BidStatus::Pending,
            submitted_at: now,
            updated_at: now,
            withdrawal_reason: None,
        })?;

        let audit_event = Self::event(
            actor,
            cause,
            "SubmitBid",
            Some(format!("Vendor {vendor_id} bid on tender {tender_id}")),
            &bid,
            StateSnapshot::new(String::from("absent")),
        );
        Ok(SubmitResult {
            bid,
            outcome: SubmitOutcome::Created,
            audit_event,
        })
    }

    /// Updates the fields of a pending bid.
    ///
    /// # Errors
    ///
    /// Returns a state conflict unless the bid is pending, and
    /// `DeadlineExpired` if the tender deadline has passed.
    pub fn update(
        &mut self,
        bid_id: i64,
        draft: BidDraft,
        actor: Actor,
        cause: Cause,
    ) -> Result<BidTransition, CoreError> {
        validate_bid_draft(&draft)?;

        let existing = self.load_bid(bid_id)?;
        Self::require_pending(&existing, "update")?;

        let tender = self.load_tender(existing.tender_id)?;
        self.require_unexpired(&tender)?;

        let before = bid_snapshot(&existing);
        let mut updated = existing;
        updated.amount = draft.amount;
        updated.proposal = draft.proposal;
        updated.delivery_timeline = draft.delivery_timeline;
        updated.attachments = draft.attachments;
        updated.updated_at = self.clock.now();

        let bid = self.store.update_bid(BidStatus::Pending, updated)?;
        let audit_event = Self::event(actor, cause, "UpdateBid", None, &bid, before);
        Ok(BidTransition { bid, audit_event })
    }

    /// Accepts a pending bid.
    ///
    /// # Errors
    ///
    /// Returns a state conflict from any status other than pending.
    pub fn accept(
        &mut self,
        bid_id: i64,
        actor: Actor,
        cause: Cause,
    ) -> Result<BidTransition, CoreError> {
        self.transition(bid_id, BidStatus::Accepted, None, actor, cause, "AcceptBid")
    }

    /// Rejects a pending bid.
    ///
    /// The optional reason is recorded on the audit event only; it never
    /// touches `withdrawal_reason`, which belongs to the vendor.
    ///
    /// # Errors
    ///
    /// Returns a state conflict from any status other than pending.
    pub fn reject(
        &mut self,
        bid_id: i64,
        reason: Option<String>,
        actor: Actor,
        cause: Cause,
    ) -> Result<BidTransition, CoreError> {
        self.transition(bid_id, BidStatus::Rejected, reason, actor, cause, "RejectBid")
    }

    /// Withdraws a pending bid on the vendor's behalf. Terminal.
    ///
    /// # Errors
    ///
    /// Returns a state conflict from any status other than pending.
    pub fn withdraw(
        &mut self,
        bid_id: i64,
        reason: Option<String>,
        actor: Actor,
        cause: Cause,
    ) -> Result<BidTransition, CoreError> {
        let existing = self.load_bid(bid_id)?;
        existing.status.validate_transition(BidStatus::Withdrawn)?;

        let before = bid_snapshot(&existing);
        let from = existing.status;
        let mut updated = existing;
        updated.status = BidStatus::Withdrawn;
        updated.withdrawal_reason = reason.clone();
        updated.updated_at = self.clock.now();

        let bid = self.store.update_bid(from, updated)?;
        let audit_event = Self::event(actor, cause, "WithdrawBid", reason, &bid, before);
        Ok(BidTransition { bid, audit_event })
    }

    /// Uploads files onto a pending bid through the upload collaborator.
    ///
    /// One `Uploading` placeholder per file, each resolved independently;
    /// a failed file leaves no residue on the bid. The resumed batch is
    /// sealed when the bid has already left `Pending`, so resolved bids
    /// reject new uploads.
    ///
    /// # Errors
    ///
    /// Returns a state conflict unless the bid is pending, and
    /// `DeadlineExpired` if the tender deadline has passed. Individual
    /// upload failures never fail the batch; they are reported in the
    /// outcome.
    pub fn upload_attachments<U: UploadService>(
        &mut self,
        bid_id: i64,
        files: &[FileMeta],
        uploader: &mut U,
        actor: Actor,
        cause: Cause,
    ) -> Result<(BidTransition, BatchOutcome), CoreError> {
        let existing = self.load_bid(bid_id)?;
        let tender = self.load_tender(existing.tender_id)?;
        self.require_unexpired(&tender)?;

        let before = bid_snapshot(&existing);
        let mut registry = AttachmentRegistry::resume_for_bid(
            bid_id,
            existing.attachments.clone(),
            existing.status == BidStatus::Pending,
        );
        let outcome = registry.upload_batch(files, uploader)?;

        let mut updated = existing;
        updated.attachments = registry.into_attachments()?;
        updated.updated_at = self.clock.now();

        let bid = self.store.update_bid(BidStatus::Pending, updated)?;
        let audit_event = Self::event(
            actor,
            cause,
            "UploadBidAttachments",
            Some(format!(
                "Uploaded {} file(s), {} failed",
                outcome.uploaded,
                outcome.failed()
            )),
            &bid,
            before,
        );
        Ok((BidTransition { bid, audit_event }, outcome))
    }

    /// Removes a confirmed attachment from a pending bid.
    ///
    /// # Errors
    ///
    /// Returns a state conflict unless the bid is pending, and
    /// `NotFound` if the bid carries no such attachment.
    pub fn remove_attachment(
        &mut self,
        bid_id: i64,
        attachment_id: &str,
        actor: Actor,
        cause: Cause,
    ) -> Result<BidTransition, CoreError> {
        let existing = self.load_bid(bid_id)?;
        Self::require_pending(&existing, "remove an attachment from")?;

        let position = existing
            .attachments
            .iter()
            .position(|a| a.matches_id(attachment_id))
            .ok_or_else(|| {
                CoreError::DomainViolation(DomainError::NotFound {
                    resource: String::from("attachment"),
                    id: attachment_id.to_string(),
                })
            })?;

        if !existing.attachments[position].is_uploaded() {
            return Err(CoreError::DomainViolation(DomainError::StateConflict {
                entity: String::from("attachment"),
                current: String::from("uploading"),
                action: String::from("remove"),
                reason: String::from("an attachment cannot be removed until its upload resolves"),
            }));
        }

        let before = bid_snapshot(&existing);
        let mut updated = existing;
        let removed = updated.attachments.remove(position);
        updated.updated_at = self.clock.now();

        let bid = self.store.update_bid(BidStatus::Pending, updated)?;
        let audit_event = Self::event(
            actor,
            cause,
            "RemoveBidAttachment",
            Some(format!("Removed attachment '{}'", removed.name())),
            &bid,
            before,
        );
        Ok(BidTransition { bid, audit_event })
    }

    fn transition(
        &mut self,
        bid_id: i64,
        target: BidStatus,
        detail: Option<String>,
        actor: Actor,
        cause: Cause,
        action: &str,
    ) -> Result<BidTransition, CoreError> {
        let existing = self.load_bid(bid_id)?;
        existing.status.validate_transition(target)?;

        let before = bid_snapshot(&existing);
        let from = existing.status;
        let mut updated = existing;
        updated.status = target;
        updated.updated_at = self.clock.now();

        let bid = self.store.update_bid(from, updated)?;
        let audit_event = Self::event(actor, cause, action, detail, &bid, before);
        Ok(BidTransition { bid, audit_event })
    }

    fn load_bid(&self, bid_id: i64) -> Result<Bid, CoreError> {
        self.store.bid(bid_id).map_err(CoreError::from_read)
    }

    fn load_tender(&self, tender_id: i64) -> Result<Tender, CoreError> {
        self.store.tender(tender_id).map_err(CoreError::from_read)
    }

    fn require_unexpired(&self, tender: &Tender) -> Result<(), CoreError> {
        if self.clock.now() > tender.deadline {
            return Err(CoreError::DomainViolation(DomainError::DeadlineExpired {
                deadline: tender.deadline,
            }));
        }
        Ok(())
    }

    fn require_open(tender: &Tender, action: &str) -> Result<(), CoreError> {
        if tender.status == TenderStatus::Open {
            Ok(())
        } else {
            Err(CoreError::DomainViolation(DomainError::StateConflict {
                entity: String::from("tender"),
                current: tender.status.as_str().to_string(),
                action: action.to_string(),
                reason: String::from("the tender is not open for bidding"),
            }))
        }
    }

    fn require_pending(bid: &Bid, action: &str) -> Result<(), CoreError> {
        if bid.status == BidStatus::Pending {
            Ok(())
        } else {
            Err(CoreError::DomainViolation(DomainError::StateConflict {
                entity: String::from("bid"),
                current: bid.status.as_str().to_string(),
                action: action.to_string(),
                reason: String::from("only pending bids are editable"),
            }))
        }
    }

    fn event(
        actor: Actor,
        cause: Cause,
        action: &str,
        details: Option<String>,
        bid: &Bid,
        before: StateSnapshot,
    ) -> AuditEvent {
        AuditEvent::new(
            actor,
            cause,
            Action::new(action.to_string(), details),
            EntityRef::Bid(bid.id.unwrap_or_default()),
            before,
            bid_snapshot(bid),
        )
    }
}

/// Captures the audit-relevant state of a bid.
fn bid_snapshot(bid: &Bid) -> StateSnapshot {
    StateSnapshot::new(format!(
        "status={},amount={},attachments={}",
        bid.status,
        bid.amount,
        bid.attachments.len()
    ))
}
