// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API tests.

use crate::auth::{AuthenticatedActor, Role};
use crate::operations::create_tender;
use crate::request_response::{CreateTenderRequest, SubmitBidRequest};
use procura_audit::Cause;
use procura_core::FixedClock;
use procura_store::MemoryStore;
use time::macros::datetime;

pub fn test_clock() -> FixedClock {
    FixedClock::at(datetime!(2026-06-01 12:00 UTC))
}

pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(1, Role::Admin)
}

pub fn buyer() -> AuthenticatedActor {
    AuthenticatedActor::new(2, Role::Buyer)
}

pub fn vendor(id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(id, Role::Vendor)
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

pub fn create_request() -> CreateTenderRequest {
    CreateTenderRequest {
        title: String::from("Data centre cabling"),
        description: String::from("Structured cabling for a new data hall"),
        categories: vec![String::from("IT Services")],
        budget_min: Some(20_000.0),
        budget_max: Some(80_000.0),
        deadline: datetime!(2026-09-01 00:00 UTC),
        publish: true,
    }
}

pub fn bid_request(amount: f64) -> SubmitBidRequest {
    SubmitBidRequest {
        amount,
        proposal: "Our team has completed comparable cabling projects on time. ".repeat(3),
        delivery_timeline: Some(String::from("6 weeks")),
        attachments: Vec::new(),
    }
}

/// Seeds a store with one published tender and returns its id.
pub fn store_with_open_tender(clock: &FixedClock) -> (MemoryStore, i64) {
    let mut store = MemoryStore::new();
    let result = create_tender(&mut store, clock, create_request(), &buyer(), test_cause())
        .expect("seeding tender");
    (store, result.response.id)
}
