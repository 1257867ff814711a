// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation for tender and bid payloads.
//!
//! Validation here is pure; anything requiring the current time takes an
//! injected `now` so tests stay deterministic.

use crate::bid::BidDraft;
use crate::error::DomainError;
use crate::tender::{TenderDraft, TenderStatus};
use time::OffsetDateTime;

/// Minimum proposal length in characters.
pub const MIN_PROPOSAL_CHARS: usize = 100;

/// Validates the fields of a bid submission or update.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the amount is not positive, the
/// proposal is shorter than [`MIN_PROPOSAL_CHARS`], or an attachment is
/// still uploading.
pub fn validate_bid_draft(draft: &BidDraft) -> Result<(), DomainError> {
    if !draft.amount.is_finite() || draft.amount <= 0.0 {
        return Err(DomainError::Validation {
            field: String::from("amount"),
            message: String::from("Bid amount must be a positive number"),
        });
    }

    if draft.proposal.chars().count() < MIN_PROPOSAL_CHARS {
        return Err(DomainError::Validation {
            field: String::from("proposal"),
            message: format!("Proposal must be at least {MIN_PROPOSAL_CHARS} characters long"),
        });
    }

    // Placeholders must resolve before the bid carries them.
    if let Some(pending) = draft.attachments.iter().find(|a| !a.is_uploaded()) {
        return Err(DomainError::Validation {
            field: String::from("attachments"),
            message: format!("Attachment '{}' has not finished uploading", pending.name()),
        });
    }

    Ok(())
}

/// Validates the fields of a tender creation payload.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the title or description is
/// blank, no resolvable category is selected, or the budget bounds are
/// inverted.
pub fn validate_tender_draft(draft: &TenderDraft) -> Result<(), DomainError> {
    if draft.title.trim().is_empty() {
        return Err(DomainError::Validation {
            field: String::from("title"),
            message: String::from("Title is required"),
        });
    }

    if draft.description.trim().is_empty() {
        return Err(DomainError::Validation {
            field: String::from("description"),
            message: String::from("Description is required"),
        });
    }

    if !draft.categories.iter().any(|c| !c.trim().is_empty()) {
        return Err(DomainError::Validation {
            field: String::from("categories"),
            message: String::from("At least one category must be selected"),
        });
    }

    if let (Some(min), Some(max)) = (draft.budget_min, draft.budget_max)
        && min > max
    {
        return Err(DomainError::Validation {
            field: String::from("budget_min"),
            message: String::from("Minimum budget cannot exceed maximum budget"),
        });
    }

    Ok(())
}

/// Validates that a deadline lies in the future.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the deadline is not after `now`.
pub fn validate_deadline(deadline: OffsetDateTime, now: OffsetDateTime) -> Result<(), DomainError> {
    if deadline <= now {
        return Err(DomainError::Validation {
            field: String::from("deadline"),
            message: String::from("Deadline must be in the future"),
        });
    }
    Ok(())
}

/// Validates an externally supplied archived flag against the status.
///
/// The status is the single source of truth; a persisted `is_archived`
/// flag that disagrees with it is invalid state, not a tie to break.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the flag is present and disagrees
/// with `status`.
pub fn validate_archive_flag(
    status: TenderStatus,
    is_archived: Option<bool>,
) -> Result<(), DomainError> {
    match is_archived {
        Some(flag) if flag != status.is_archived() => Err(DomainError::Validation {
            field: String::from("is_archived"),
            message: format!(
                "is_archived={flag} disagrees with status '{status}'; \
                 the status field is the single source of truth"
            ),
        }),
        _ => Ok(()),
    }
}
