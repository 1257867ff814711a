// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod attachment_lifecycle;

use crate::clock::FixedClock;
use crate::error::CoreError;
use procura_audit::{Actor, Cause};
use procura_domain::{BidDraft, DomainError, TenderDraft};
use procura_store::MemoryStore;
use time::macros::datetime;
use time::OffsetDateTime;

/// The instant every test clock starts at.
pub fn start_instant() -> OffsetDateTime {
    datetime!(2026-06-01 12:00 UTC)
}

pub fn test_clock() -> FixedClock {
    FixedClock::at(start_instant())
}

pub fn admin() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

pub fn vendor_actor(id: i64) -> Actor {
    Actor::new(format!("vendor-{id}"), String::from("vendor"))
}

pub fn cause(description: &str) -> Cause {
    Cause::new(String::from("req-1"), description.to_string())
}

pub fn open_tender_draft() -> TenderDraft {
    TenderDraft {
        title: String::from("Warehouse shelving"),
        description: String::from("Supply and install shelving for two warehouses"),
        categories: vec![String::from("Construction")],
        budget_min: Some(10_000.0),
        budget_max: Some(60_000.0),
        deadline: datetime!(2026-09-01 00:00 UTC),
        publish: true,
    }
}

pub fn bid_draft(amount: f64) -> BidDraft {
    BidDraft {
        amount,
        proposal: "We will deliver the full scope of work within eight weeks. ".repeat(3),
        delivery_timeline: Some(String::from("8 weeks")),
        attachments: Vec::new(),
    }
}

/// Seeds a store with one open tender and returns its id.
pub fn store_with_open_tender(clock: &FixedClock) -> (MemoryStore, i64) {
    let mut store = MemoryStore::new();
    let transition = crate::TenderLifecycleManager::new(&mut store, clock)
        .create(open_tender_draft(), 1, admin(), cause("seed"))
        .unwrap();
    let id = transition.tender.id.unwrap();
    (store, id)
}

pub fn expect_state_conflict(result: Result<impl std::fmt::Debug, CoreError>) -> String {
    match result {
        Err(CoreError::DomainViolation(DomainError::StateConflict { reason, .. })) => reason,
        other => panic!("Expected a state conflict, got {other:?}"),
    }
}
