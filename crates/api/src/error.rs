// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API error contract and error translation.
//!
//! Domain and core errors never cross the boundary directly; each is
//! translated into an API error so the external contract stays stable
//! while the internals evolve.

use procura_core::CoreError;
use procura_domain::DomainError;
use procura_store::StoreError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The operation conflicts with the entity's current state.
    Conflict {
        /// The entity in conflict.
        entity: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The requested resource does not exist.
    NotFound {
        /// The resource kind.
        resource: String,
        /// The identifier that was looked up.
        id: String,
    },
    /// The tender deadline has passed.
    DeadlinePassed {
        /// The deadline, RFC 3339 formatted.
        deadline: String,
    },
    /// The upload collaborator rejected a file.
    UploadRejected {
        /// The originating filename.
        filename: String,
        /// Why the file was rejected.
        reason: String,
    },
    /// An unexpected internal failure.
    Internal {
        /// A human-readable description.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { entity, message } => {
                write!(f, "Conflict on {entity}: {message}")
            }
            Self::NotFound { resource, id } => {
                write!(f, "{resource} '{id}' not found")
            }
            Self::DeadlinePassed { deadline } => {
                write!(f, "The submission deadline ({deadline}) has passed")
            }
            Self::UploadRejected { filename, reason } => {
                write!(f, "Upload of '{filename}' rejected: {reason}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::Validation { field, message } => ApiError::InvalidInput { field, message },
        DomainError::StateConflict {
            entity,
            current,
            action,
            reason,
        } => ApiError::Conflict {
            entity,
            message: format!("cannot {action} while {current}: {reason}"),
        },
        DomainError::DeadlineExpired { deadline } => ApiError::DeadlinePassed {
            deadline: deadline
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| deadline.to_string()),
        },
        DomainError::NotFound { resource, id } => ApiError::NotFound { resource, id },
        DomainError::Upload { filename, reason } => ApiError::UploadRejected { filename, reason },
    }
}

/// Translates a core error into an API error.
///
/// A concurrent status move surfaces as a conflict so callers can re-read
/// and retry; any other store failure is internal.
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::StoreFailure(StoreError::StatusMoved {
            resource,
            expected,
            actual,
            ..
        }) => ApiError::Conflict {
            entity: resource,
            message: format!("status changed from '{expected}' to '{actual}' concurrently"),
        },
        CoreError::StoreFailure(store_err) => ApiError::Internal {
            message: store_err.to_string(),
        },
    }
}
