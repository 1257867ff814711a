// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation and lifecycle transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed or missing required input. Always recoverable locally.
    Validation {
        /// The field that failed validation.
        field: String,
        /// A human-readable description of the problem.
        message: String,
    },
    /// The requested transition is illegal for the entity's current status.
    StateConflict {
        /// The entity kind ("tender" or "bid").
        entity: String,
        /// The entity's current status.
        current: String,
        /// The action that was attempted.
        action: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// An action was attempted after the tender deadline passed.
    ///
    /// Reported as a conflict, but kept distinct so callers can surface
    /// "tender expired" instead of a generic conflict message.
    DeadlineExpired {
        /// The deadline that has passed.
        deadline: OffsetDateTime,
    },
    /// A referenced tender, bid, or category does not exist.
    NotFound {
        /// The resource kind that was not found.
        resource: String,
        /// The identifier that failed to resolve.
        id: String,
    },
    /// A single file upload failed. Other files in the same batch are
    /// unaffected.
    Upload {
        /// The originating filename.
        filename: String,
        /// The reason the upload failed.
        reason: String,
    },
}

impl DomainError {
    /// Returns true if this error represents a status conflict.
    ///
    /// `DeadlineExpired` is a specialization of a conflict and counts.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::StateConflict { .. } | Self::DeadlineExpired { .. })
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::StateConflict {
                entity,
                current,
                action,
                reason,
            } => {
                write!(
                    f,
                    "Cannot {action} {entity} in status '{current}': {reason}"
                )
            }
            Self::DeadlineExpired { deadline } => {
                write!(f, "Tender deadline {deadline} has passed")
            }
            Self::NotFound { resource, id } => {
                write!(f, "{resource} '{id}' not found")
            }
            Self::Upload { filename, reason } => {
                write!(f, "Upload of '{filename}' failed: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
