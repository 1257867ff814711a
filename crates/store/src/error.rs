// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors reported by a storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced entity does not exist.
    NotFound {
        /// The resource kind ("tender", "bid", "category").
        resource: String,
        /// The identifier that failed to resolve.
        id: i64,
    },
    /// An optimistic write was rejected because the entity's status
    /// changed since it was read.
    StatusMoved {
        /// The resource kind.
        resource: String,
        /// The entity identifier.
        id: i64,
        /// The status the writer observed.
        expected: String,
        /// The status currently stored.
        actual: String,
    },
    /// A write was attempted for an entity that has no assigned id.
    MissingId {
        /// The resource kind.
        resource: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => write!(f, "{resource} {id} not found"),
            Self::StatusMoved {
                resource,
                id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Concurrent modification of {resource} {id}: \
                     expected status '{expected}', found '{actual}'"
                )
            }
            Self::MissingId { resource } => {
                write!(f, "Cannot write {resource} without an assigned id")
            }
        }
    }
}

impl std::error::Error for StoreError {}
