// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use procura_audit::Actor;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: full authority over tenders, bids, and categories.
    ///
    /// Admins may perform:
    /// - tender creation, editing, archival, and deletion
    /// - bid acceptance and rejection
    /// - any corrective action on behalf of buyers and vendors
    Admin,
    /// Buyer role: owners of the procurement side.
    ///
    /// Buyers may:
    /// - create and edit tenders
    /// - archive and unarchive tenders
    /// - accept and reject bids on their tenders
    ///
    /// Buyers never submit bids.
    Buyer,
    /// Vendor role: the bidding side.
    ///
    /// Vendors may:
    /// - submit and update their own bids
    /// - withdraw their own bids
    /// - manage their bid attachments
    Vendor,
}

impl Role {
    /// Returns the lowercase label used for audit attribution.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Buyer => "buyer",
            Self::Vendor => "vendor",
        }
    }
}

/// An authenticated actor with an associated role.
///
/// This represents a portal user who has been authenticated and has
/// permission to perform certain actions based on their role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: i64,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the authenticated user.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(
            format!("{}-{}", self.role.as_str(), self.id),
            self.role.as_str().to_string(),
        )
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has permission
/// to perform a specific action based on their role.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to manage tenders.
    ///
    /// Admins and buyers may create, edit, archive, unarchive, and delete
    /// tenders.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a vendor.
    pub fn authorize_manage_tender(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Buyer => Ok(()),
            Role::Vendor => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin or Buyer"),
            }),
        }
    }

    /// Checks if an actor is authorized to resolve a bid.
    ///
    /// Admins and buyers may accept and reject bids.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a vendor.
    pub fn authorize_resolve_bid(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Buyer => Ok(()),
            Role::Vendor => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin or Buyer"),
            }),
        }
    }

    /// Checks if an actor is authorized to act as the bidding vendor.
    ///
    /// Vendors may act only on their own bids; admins may act on behalf
    /// of any vendor.
    ///
    /// # Errors
    ///
    /// Returns an error if a buyer attempts a bidding action, or if a
    /// vendor acts for a different vendor id.
    pub fn authorize_vendor_action(
        actor: &AuthenticatedActor,
        vendor_id: i64,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Vendor if actor.id == vendor_id => Ok(()),
            Role::Vendor => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("the owning Vendor"),
            }),
            Role::Buyer => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Vendor"),
            }),
        }
    }
}

/// Stub authentication function.
///
/// This is a minimal placeholder. It does NOT implement real
/// authentication; in a real system this would validate credentials,
/// check tokens, or integrate with an identity provider.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor to authenticate
/// * `role` - The role to assign to the actor
///
/// # Errors
///
/// Returns an error if the actor id is not positive.
pub fn authenticate_stub(actor_id: i64, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id <= 0 {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID must be positive"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}
