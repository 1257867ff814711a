// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender lifecycle management.
//!
//! Archival is modelled as a status, not a flag: `archive` remembers the
//! status it left so `unarchive` can restore it. Deletion is permanent
//! and cascades to every bid on the tender, so callers must pass an
//! explicit confirmation token.

use crate::clock::Clock;
use crate::error::CoreError;
use procura_audit::{Action, Actor, AuditEvent, Cause, EntityRef, StateSnapshot};
use procura_domain::{
    CategoryFields, CategoryTables, DomainError, Tender, TenderDraft, TenderStatus,
    resolve_category, validate_deadline, validate_tender_draft,
};
use procura_store::{BidStore, CategoryStore, TenderStore};
use time::OffsetDateTime;

/// A partial update to a tender's editable fields.
///
/// `None` leaves a field untouched. Status moves ride along with field
/// edits and are validated against the state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenderPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub budget_min: Option<Option<f64>>,
    pub budget_max: Option<Option<f64>>,
    pub deadline: Option<OffsetDateTime>,
    pub status: Option<TenderStatus>,
}

/// The result of a successful tender operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TenderTransition {
    /// The tender after the write.
    pub tender: Tender,
    /// The audit event recording the operation.
    pub audit_event: AuditEvent,
}

/// Explicit acknowledgement that deleting a tender destroys its bids.
///
/// Deletion is irreversible; this token exists so the destructive path
/// can never be reached by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    /// The caller understands every associated bid is destroyed too.
    DestroyAssociatedBids,
}

/// What a cascading delete removed.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionReport {
    /// The tender as it stood when deleted.
    pub tender: Tender,
    /// Number of bids destroyed in the same operation.
    pub bids_deleted: u64,
    /// The audit event recording the deletion.
    pub audit_event: AuditEvent,
}

/// Governs tender creation, edits, archival, and deletion.
pub struct TenderLifecycleManager<'a, S, C> {
    store: &'a mut S,
    clock: &'a C,
}

impl<'a, S, C> TenderLifecycleManager<'a, S, C>
where
    S: TenderStore + BidStore + CategoryStore,
    C: Clock,
{
    /// Creates a manager over the given store and clock.
    pub const fn new(store: &'a mut S, clock: &'a C) -> Self {
        Self { store, clock }
    }

    /// Creates a tender as a draft, or open for bidding when the draft
    /// asks to publish immediately.
    ///
    /// The display category is resolved at write time against the managed
    /// and legacy category tables, so readers never re-derive it.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank titles or descriptions,
    /// missing categories, an inverted budget range, or a deadline not in
    /// the future.
    pub fn create(
        &mut self,
        draft: TenderDraft,
        created_by: i64,
        actor: Actor,
        cause: Cause,
    ) -> Result<TenderTransition, CoreError> {
        validate_tender_draft(&draft)?;
        let now = self.clock.now();
        validate_deadline(draft.deadline, now)?;

        let status = if draft.publish {
            TenderStatus::Open
        } else {
            TenderStatus::Draft
        };

        let mut category_fields = CategoryFields::from_names(draft.categories);
        category_fields.display_category = Some(self.resolve_display(&category_fields));

        let tender = self.store.insert_tender(Tender {
            id: None,
            title: draft.title,
            description: draft.description,
            category_fields,
            budget_min: draft.budget_min,
            budget_max: draft.budget_max,
            deadline: draft.deadline,
            status,
            archived_from: None,
            created_by,
            created_at: now,
            updated_at: now,
        })?;

        let audit_event = Self::event(
            actor,
            cause,
            "CreateTender",
            Some(format!("Created as {status}")),
            &tender,
            StateSnapshot::new(String::from("absent")),
        );
        Ok(TenderTransition {
            tender,
            audit_event,
        })
    }

    /// Applies a partial update to a tender.
    ///
    /// Archived tenders reject every edit; they must be unarchived first.
    /// A status change in the patch is validated against the state
    /// machine, which only permits moves among draft, open, and closed.
    ///
    /// # Errors
    ///
    /// Returns a state conflict for archived tenders or illegal status
    /// moves, and validation errors for the same field rules as `create`.
    pub fn update(
        &mut self,
        tender_id: i64,
        patch: TenderPatch,
        actor: Actor,
        cause: Cause,
    ) -> Result<TenderTransition, CoreError> {
        let existing = self.load(tender_id)?;
        if existing.status == TenderStatus::Archived {
            return Err(CoreError::DomainViolation(DomainError::StateConflict {
                entity: String::from("tender"),
                current: String::from("archived"),
                action: String::from("update"),
                reason: String::from("archived tenders must be unarchived before editing"),
            }));
        }

        let before = tender_snapshot(&existing);
        let from = existing.status;
        let mut updated = existing;

        if let Some(status) = patch.status
            && status != from
        {
            from.validate_transition(status)?;
            updated.status = status;
        }
        if let Some(title) = patch.title {
            updated.title = title;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(categories) = patch.categories {
            updated.category_fields = CategoryFields::from_names(categories);
            updated.category_fields.display_category =
                Some(self.resolve_display(&updated.category_fields));
        }
        if let Some(budget_min) = patch.budget_min {
            updated.budget_min = budget_min;
        }
        if let Some(budget_max) = patch.budget_max {
            updated.budget_max = budget_max;
        }
        if let Some(deadline) = patch.deadline {
            validate_deadline(deadline, self.clock.now())?;
            updated.deadline = deadline;
        }

        Self::validate_fields(&updated)?;
        updated.updated_at = self.clock.now();

        let tender = self.store.update_tender(from, updated)?;
        let audit_event = Self::event(actor, cause, "UpdateTender", None, &tender, before);
        Ok(TenderTransition {
            tender,
            audit_event,
        })
    }

    /// Archives a tender, remembering the status it came from.
    ///
    /// # Errors
    ///
    /// Returns a state conflict if the tender is already archived.
    pub fn archive(
        &mut self,
        tender_id: i64,
        actor: Actor,
        cause: Cause,
    ) -> Result<TenderTransition, CoreError> {
        let existing = self.load(tender_id)?;
        if existing.status == TenderStatus::Archived {
            return Err(CoreError::DomainViolation(DomainError::StateConflict {
                entity: String::from("tender"),
                current: String::from("archived"),
                action: String::from("archive"),
                reason: String::from("the tender is already archived"),
            }));
        }
        let from = existing.status;

        let before = tender_snapshot(&existing);
        let mut updated = existing;
        updated.archived_from = Some(from);
        updated.status = TenderStatus::Archived;
        updated.updated_at = self.clock.now();

        let tender = self.store.update_tender(from, updated)?;
        let audit_event = Self::event(
            actor,
            cause,
            "ArchiveTender",
            Some(format!("Archived from {from}")),
            &tender,
            before,
        );
        Ok(TenderTransition {
            tender,
            audit_event,
        })
    }

    /// Restores an archived tender to the status it held before archival,
    /// or to open if that status was never recorded.
    ///
    /// # Errors
    ///
    /// Returns a state conflict if the tender is not archived.
    pub fn unarchive(
        &mut self,
        tender_id: i64,
        actor: Actor,
        cause: Cause,
    ) -> Result<TenderTransition, CoreError> {
        let existing = self.load(tender_id)?;
        if existing.status != TenderStatus::Archived {
            return Err(CoreError::DomainViolation(DomainError::StateConflict {
                entity: String::from("tender"),
                current: existing.status.as_str().to_string(),
                action: String::from("unarchive"),
                reason: String::from("only archived tenders can be unarchived"),
            }));
        }

        let before = tender_snapshot(&existing);
        let restored = existing.archived_from.unwrap_or(TenderStatus::Open);
        let mut updated = existing;
        updated.status = restored;
        updated.archived_from = None;
        updated.updated_at = self.clock.now();

        let tender = self.store.update_tender(TenderStatus::Archived, updated)?;
        let audit_event = Self::event(
            actor,
            cause,
            "UnarchiveTender",
            Some(format!("Restored to {restored}")),
            &tender,
            before,
        );
        Ok(TenderTransition {
            tender,
            audit_event,
        })
    }

    /// Deletes a tender and every bid on it, permanently.
    ///
    /// The tender and its bids disappear in one atomic operation; a
    /// partial cascade is never observable.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown tender.
    pub fn delete(
        &mut self,
        tender_id: i64,
        _confirmation: DeleteConfirmation,
        actor: Actor,
        cause: Cause,
    ) -> Result<DeletionReport, CoreError> {
        let report = self
            .store
            .delete_tender_cascading(tender_id)
            .map_err(CoreError::from_read)?;

        let before = tender_snapshot(&report.tender);
        let audit_event = Self::event(
            actor,
            cause,
            "DeleteTender",
            Some(format!(
                "Deleted with {} associated bid(s)",
                report.bids_deleted
            )),
            &report.tender,
            before,
        );
        Ok(DeletionReport {
            tender: report.tender,
            bids_deleted: report.bids_deleted,
            audit_event,
        })
    }

    /// Number of bids on a tender, any status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown tender.
    pub fn bid_count(&self, tender_id: i64) -> Result<u64, CoreError> {
        self.load(tender_id)?;
        Ok(self.store.bid_count(tender_id))
    }

    fn load(&self, tender_id: i64) -> Result<Tender, CoreError> {
        self.store.tender(tender_id).map_err(CoreError::from_read)
    }

    fn resolve_display(&self, fields: &CategoryFields) -> String {
        let managed = self.store.categories();
        let legacy = self.store.legacy_categories();
        let tables = CategoryTables {
            managed: &managed,
            legacy: &legacy,
        };
        resolve_category(fields, &tables)
    }

    fn validate_fields(tender: &Tender) -> Result<(), CoreError> {
        let draft = TenderDraft {
            title: tender.title.clone(),
            description: tender.description.clone(),
            categories: tender.category_fields.categories.clone(),
            budget_min: tender.budget_min,
            budget_max: tender.budget_max,
            deadline: tender.deadline,
            publish: false,
        };
        validate_tender_draft(&draft)?;
        Ok(())
    }

    fn event(
        actor: Actor,
        cause: Cause,
        action: &str,
        details: Option<String>,
        tender: &Tender,
        before: StateSnapshot,
    ) -> AuditEvent {
        AuditEvent::new(
            actor,
            cause,
            Action::new(action.to_string(), details),
            EntityRef::Tender(tender.id.unwrap_or_default()),
            before,
            tender_snapshot(tender),
        )
    }
}

/// Captures the audit-relevant state of a tender.
fn tender_snapshot(tender: &Tender) -> StateSnapshot {
    StateSnapshot::new(format!(
        "status={},title={}",
        tender.status, tender.title
    ))
}
