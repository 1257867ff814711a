// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    admin, bid_request, buyer, create_request, store_with_open_tender, test_cause, test_clock,
    vendor,
};
use crate::auth::{Role, authenticate_stub};
use crate::error::{ApiError, AuthError};
use crate::operations::{accept_bid, create_tender, delete_tender, submit_bid, withdraw_bid};
use crate::request_response::{DeleteTenderRequest, WithdrawBidRequest};
use procura_store::MemoryStore;

#[test]
fn test_vendor_cannot_create_tender() {
    let clock = test_clock();
    let mut store = MemoryStore::new();

    let result = create_tender(
        &mut store,
        &clock,
        create_request(),
        &vendor(10),
        test_cause(),
    );

    match result {
        Err(ApiError::Unauthorized { action, .. }) => assert_eq!(action, "create_tender"),
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

#[test]
fn test_buyer_cannot_submit_bid() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);

    let result = submit_bid(
        &mut store,
        &clock,
        tender_id,
        2,
        bid_request(30_000.0),
        &buyer(),
        test_cause(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_vendor_cannot_bid_as_another_vendor() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);

    let result = submit_bid(
        &mut store,
        &clock,
        tender_id,
        11,
        bid_request(30_000.0),
        &vendor(10),
        test_cause(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_admin_can_bid_on_behalf_of_a_vendor() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);

    let result = submit_bid(
        &mut store,
        &clock,
        tender_id,
        11,
        bid_request(30_000.0),
        &admin(),
        test_cause(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_vendor_cannot_accept_a_bid() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);
    let bid_id = submit_bid(
        &mut store,
        &clock,
        tender_id,
        10,
        bid_request(30_000.0),
        &vendor(10),
        test_cause(),
    )
    .unwrap()
    .response
    .bid
    .id;

    let result = accept_bid(&mut store, &clock, bid_id, &vendor(10), test_cause());

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_vendor_cannot_withdraw_someone_elses_bid() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);
    let bid_id = submit_bid(
        &mut store,
        &clock,
        tender_id,
        10,
        bid_request(30_000.0),
        &vendor(10),
        test_cause(),
    )
    .unwrap()
    .response
    .bid
    .id;

    let result = withdraw_bid(
        &mut store,
        &clock,
        bid_id,
        WithdrawBidRequest::default(),
        &vendor(11),
        test_cause(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_vendor_cannot_delete_a_tender() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);

    let result = delete_tender(
        &mut store,
        &clock,
        tender_id,
        &DeleteTenderRequest {
            confirm_bid_destruction: true,
        },
        &vendor(10),
        test_cause(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_audit_actor_attribution_carries_the_role() {
    let clock = test_clock();
    let mut store = MemoryStore::new();

    let result = create_tender(&mut store, &clock, create_request(), &buyer(), test_cause())
        .unwrap();

    assert_eq!(result.audit_event.actor.id, "buyer-2");
    assert_eq!(result.audit_event.actor.actor_type, "buyer");
}

#[test]
fn test_authenticate_stub_rejects_non_positive_ids() {
    assert!(matches!(
        authenticate_stub(0, Role::Vendor),
        Err(AuthError::AuthenticationFailed { .. })
    ));
    assert!(authenticate_stub(7, Role::Vendor).is_ok());
}
