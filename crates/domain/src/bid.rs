// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid entity and status transition logic.
//!
//! A bid moves from `Pending` to exactly one of the three terminal states.
//! Nothing re-enters `Pending`; a withdrawn bid can never be resurrected.

use crate::attachment::Attachment;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle states of a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    /// Submitted and awaiting an outcome. The only editable state.
    #[default]
    Pending,
    /// Accepted by an admin or buyer. Terminal.
    Accepted,
    /// Rejected by an admin or buyer. Terminal.
    Rejected,
    /// Withdrawn by the vendor. Terminal.
    Withdrawn,
}

impl BidStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(DomainError::Validation {
                field: String::from("status"),
                message: format!("Unknown bid status: {s}"),
            }),
        }
    }

    /// Returns true if this status is terminal (no outgoing transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected | Self::Withdrawn)
    }

    /// Validates a transition from this status to another.
    ///
    /// The transition relation is `Pending -> {Accepted, Rejected,
    /// Withdrawn}` and nothing else.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StateConflict` if the transition is not
    /// permitted.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        let valid = match self {
            Self::Pending => new_status.is_terminal(),
            Self::Accepted | Self::Rejected | Self::Withdrawn => false,
        };

        if valid {
            Ok(())
        } else {
            let reason = if self.is_terminal() {
                "cannot transition from a terminal state"
            } else {
                "transition not permitted by the bid lifecycle"
            };
            Err(DomainError::StateConflict {
                entity: String::from("bid"),
                current: self.as_str().to_string(),
                action: format!("transition to '{}'", new_status.as_str()),
                reason: reason.to_string(),
            })
        }
    }
}

impl FromStr for BidStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A vendor's proposal against a specific tender.
///
/// Exactly one bid per `(tender_id, vendor_id)` pair is active for
/// submission purposes: re-submitting updates the existing pending bid
/// rather than creating a second one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// Canonical identifier, assigned by the store.
    pub id: Option<i64>,
    /// The owning tender. Immutable after creation.
    pub tender_id: i64,
    /// The submitting vendor.
    pub vendor_id: i64,
    /// The bid amount. Always positive.
    pub amount: f64,
    /// The proposal text. At least [`crate::MIN_PROPOSAL_CHARS`] characters.
    pub proposal: String,
    /// Free-text delivery timeline.
    pub delivery_timeline: Option<String>,
    /// Ordered attachment list.
    pub attachments: Vec<Attachment>,
    /// Current lifecycle status.
    pub status: BidStatus,
    /// First submission timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    /// Last modification timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Set only when `status` is `Withdrawn`.
    pub withdrawal_reason: Option<String>,
}

/// Caller-supplied fields for submitting or updating a bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidDraft {
    /// The bid amount. Must be positive.
    pub amount: f64,
    /// The proposal text. Must be at least
    /// [`crate::MIN_PROPOSAL_CHARS`] characters.
    pub proposal: String,
    /// Free-text delivery timeline.
    pub delivery_timeline: Option<String>,
    /// Uploaded attachments to carry on the bid.
    pub attachments: Vec<Attachment>,
}
