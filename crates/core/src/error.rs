// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use procura_domain::DomainError;
use procura_store::StoreError;

/// Errors returned by the lifecycle managers.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The storage collaborator rejected an operation.
    StoreFailure(StoreError),
}

impl CoreError {
    /// Maps a read failure into the domain taxonomy.
    ///
    /// A missing entity on read is a domain-level `NotFound`; anything
    /// else stays a store failure.
    #[must_use]
    pub fn from_read(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { resource, id } => Self::DomainViolation(DomainError::NotFound {
                resource,
                id: id.to_string(),
            }),
            other => Self::StoreFailure(other),
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::StoreFailure(err) => write!(f, "Store failure: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::StoreFailure(err)
    }
}
