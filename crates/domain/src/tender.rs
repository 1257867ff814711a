// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender entity and status lifecycle.
//!
//! A tender's status is the single source of truth for archival: there is
//! no separately persisted `is_archived` flag, only a derived accessor.
//! Archival is reversible and preserves all bids; deletion is handled by
//! the lifecycle manager and is destructive.

use crate::category::CategoryFields;
use crate::error::DomainError;
use crate::validation::validate_archive_flag;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle states of a tender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    /// Saved but not yet published. Accepts no bids.
    #[default]
    Draft,
    /// Published and accepting bids until the deadline.
    Open,
    /// No longer accepting bids; outcomes may still be resolved.
    Closed,
    /// Removed from active listings. Reversible; bids preserved.
    Archived,
}

impl TenderStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Archived => "archived",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::Validation {
                field: String::from("status"),
                message: format!("Unknown tender status: {s}"),
            }),
        }
    }

    /// Returns true if this status represents an archived tender.
    ///
    /// This is the only archival flag in the system. Callers must never
    /// persist a separate boolean alongside it.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        matches!(self, Self::Archived)
    }

    /// Checks whether a direct status update may move to `target`.
    ///
    /// Direct updates may move freely between `Draft`, `Open`, and
    /// `Closed`. `Archived` is reachable only through the archive
    /// operation so its side-effect rules are enforced in one place.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        !matches!(self, Self::Archived)
            && !matches!(target, Self::Archived)
            && !matches!(
                (self, target),
                (Self::Draft, Self::Draft)
                    | (Self::Open, Self::Open)
                    | (Self::Closed, Self::Closed)
            )
    }

    /// Validates a direct status update.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StateConflict` if the transition is not one of
    /// the permitted draft/open/closed moves.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::StateConflict {
                entity: String::from("tender"),
                current: self.as_str().to_string(),
                action: format!("change status to '{}'", target.as_str()),
                reason: String::from(
                    "direct updates may only move between draft, open, and closed; \
                     archival must use the archive and unarchive operations",
                ),
            })
        }
    }
}

impl FromStr for TenderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A published request for bids.
///
/// `id` is `None` until the store assigns one. Category data spans three
/// schema generations and lives in [`CategoryFields`]; display resolution
/// goes through [`crate::resolve_category`].
///
/// Deserialization is checked: external snapshots from older exports may
/// still carry a persisted `is_archived` flag, and a snapshot whose flag
/// disagrees with `status` is rejected rather than reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TenderRecord")]
pub struct Tender {
    /// Canonical identifier, assigned by the store.
    pub id: Option<i64>,
    /// The tender title.
    pub title: String,
    /// The tender description.
    pub description: String,
    /// Raw category fields across all schema generations.
    #[serde(flatten)]
    pub category_fields: CategoryFields,
    /// Lower budget bound. Independently nullable from `budget_max`.
    pub budget_min: Option<f64>,
    /// Upper budget bound. Independently nullable from `budget_min`.
    pub budget_max: Option<f64>,
    /// Submission deadline.
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
    /// Current lifecycle status.
    pub status: TenderStatus,
    /// The status held immediately before archival, so unarchiving can
    /// restore it. `None` unless the tender is archived.
    pub archived_from: Option<TenderStatus>,
    /// The buyer or admin who created the tender.
    pub created_by: i64,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last modification timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Tender {
    /// Returns true if this tender is archived.
    ///
    /// Derived from `status`; the two can never disagree because there is
    /// nothing else to disagree with.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.status.is_archived()
    }
}

/// Wire form of [`Tender`].
///
/// Carries the optional persisted `is_archived` flag older exports still
/// emit. The checked conversion rejects any snapshot where the flag
/// disagrees with `status`; the status field is the single source of
/// truth and the conversion never guesses which side wins.
#[derive(Debug, Deserialize)]
struct TenderRecord {
    id: Option<i64>,
    title: String,
    description: String,
    #[serde(flatten)]
    category_fields: CategoryFields,
    budget_min: Option<f64>,
    budget_max: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    deadline: OffsetDateTime,
    status: TenderStatus,
    archived_from: Option<TenderStatus>,
    #[serde(default)]
    is_archived: Option<bool>,
    created_by: i64,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl TryFrom<TenderRecord> for Tender {
    type Error = DomainError;

    fn try_from(record: TenderRecord) -> Result<Self, Self::Error> {
        validate_archive_flag(record.status, record.is_archived)?;
        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            category_fields: record.category_fields,
            budget_min: record.budget_min,
            budget_max: record.budget_max,
            deadline: record.deadline,
            status: record.status,
            archived_from: record.archived_from,
            created_by: record.created_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Caller-supplied fields for creating a tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderDraft {
    /// The tender title.
    pub title: String,
    /// The tender description.
    pub description: String,
    /// Selected category names. At least one is required.
    pub categories: Vec<String>,
    /// Lower budget bound.
    pub budget_min: Option<f64>,
    /// Upper budget bound.
    pub budget_max: Option<f64>,
    /// Submission deadline. Must be in the future at creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
    /// Whether to publish immediately (`Open`) or save as `Draft`.
    pub publish: bool,
}
