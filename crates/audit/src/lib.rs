// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit types for the Procura tender portal.
//!
//! Every successful lifecycle transition produces exactly one audit event.
//! Events are immutable once created and capture who acted, why, what
//! changed, and the entity state before and after. Archival relies on
//! this: archiving a tender is the reversible, audit-preserving action,
//! and the event trail is what it preserves.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// The entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an admin, a buyer, a vendor, or a system process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The kind of actor (e.g., "admin", "buyer", "vendor", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new `Actor`.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The kind of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// The reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., a request id).
    pub id: String,
    /// A description of what triggered the action.
    pub description: String,
}

impl Cause {
    /// Creates a new `Cause`.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SubmitBid`", "`ArchiveTender`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new `Action`.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The entity an audit event is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    /// A tender, by canonical id.
    Tender(i64),
    /// A bid, by canonical id.
    Bid(i64),
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tender(id) => write!(f, "tender/{id}"),
            Self::Bid(id) => write!(f, "bid/{id}"),
        }
    }
}

/// A snapshot of an entity's observable state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A compact string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing one state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The entity this event is scoped to.
    pub entity: EntityRef,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`. Once created, an event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `entity` - The entity the event is scoped to
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        entity: EntityRef,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            entity,
            before,
            after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> AuditEvent {
        AuditEvent::new(
            Actor::new(String::from("vendor-9"), String::from("vendor")),
            Cause::new(String::from("req-42"), String::from("API request")),
            Action::new(String::from("SubmitBid"), None),
            EntityRef::Bid(7),
            StateSnapshot::new(String::from("absent")),
            StateSnapshot::new(String::from("status=pending")),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor = Actor::new(String::from("admin-1"), String::from("admin"));

        assert_eq!(actor.id, "admin-1");
        assert_eq!(actor.actor_type, "admin");
    }

    #[test]
    fn test_entity_ref_display() {
        assert_eq!(EntityRef::Tender(12).to_string(), "tender/12");
        assert_eq!(EntityRef::Bid(7).to_string(), "bid/7");
    }

    #[test]
    fn test_audit_event_captures_before_and_after() {
        let event = sample_event();

        assert_eq!(event.before.data, "absent");
        assert_eq!(event.after.data, "status=pending");
        assert_eq!(event.entity, EntityRef::Bid(7));
    }

    #[test]
    fn test_audit_event_equality() {
        assert_eq!(sample_event(), sample_event());
    }

    #[test]
    fn test_action_with_details() {
        let action = Action::new(
            String::from("RejectBid"),
            Some(String::from("budget too high")),
        );

        assert_eq!(action.name, "RejectBid");
        assert_eq!(action.details.as_deref(), Some("budget too high"));
    }
}
