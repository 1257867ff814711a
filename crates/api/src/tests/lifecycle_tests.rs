// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    admin, bid_request, buyer, create_request, store_with_open_tender, test_cause, test_clock,
    vendor,
};
use crate::error::ApiError;
use crate::operations::{
    accept_bid, archive_tender, create_tender, delete_tender, get_tender, list_bids,
    list_categories, list_tenders, reject_bid, submit_bid, unarchive_tender, update_tender,
    withdraw_bid,
};
use crate::request_response::{
    DeleteTenderRequest, ListRequest, RejectBidRequest, UpdateTenderRequest, WithdrawBidRequest,
};
use procura_domain::{Category, LegacyCategory};
use procura_store::MemoryStore;
use time::macros::datetime;

#[test]
fn test_create_tender_returns_a_resolved_view() {
    let clock = test_clock();
    let mut store = MemoryStore::with_categories(
        vec![Category {
            id: 1,
            name: String::from("IT Services"),
            description: String::new(),
            is_active: true,
        }],
        Vec::new(),
    );

    let result = create_tender(&mut store, &clock, create_request(), &buyer(), test_cause())
        .unwrap();

    assert_eq!(result.response.status, "open");
    assert!(!result.response.is_archived);
    assert_eq!(result.response.display_category, "IT Services");
    assert_eq!(result.audit_event.action.name, "CreateTender");
}

#[test]
fn test_unmatched_category_value_is_capitalized_not_dropped() {
    let clock = test_clock();
    let mut store = MemoryStore::new();
    let mut request = create_request();
    request.categories = vec![String::from("  "), String::from("logistics")];

    let result = create_tender(&mut store, &clock, request, &buyer(), test_cause()).unwrap();

    assert_eq!(result.response.display_category, "Logistics");
}

#[test]
fn test_update_tender_rejects_unknown_status_string() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);

    let result = update_tender(
        &mut store,
        &clock,
        tender_id,
        UpdateTenderRequest {
            status: Some(String::from("cancelled")),
            ..UpdateTenderRequest::default()
        },
        &buyer(),
        test_cause(),
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "status"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_archive_then_unarchive_round_trip() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);

    let archived = archive_tender(&mut store, &clock, tender_id, &buyer(), test_cause()).unwrap();
    assert_eq!(archived.response.status, "archived");
    assert!(archived.response.is_archived);

    let restored =
        unarchive_tender(&mut store, &clock, tender_id, &buyer(), test_cause()).unwrap();
    assert_eq!(restored.response.status, "open");
    assert!(!restored.response.is_archived);
}

#[test]
fn test_delete_requires_explicit_confirmation() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);

    let result = delete_tender(
        &mut store,
        &clock,
        tender_id,
        &DeleteTenderRequest {
            confirm_bid_destruction: false,
        },
        &admin(),
        test_cause(),
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => {
            assert_eq!(field, "confirm_bid_destruction");
        }
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
    assert!(get_tender(&store, tender_id).is_ok());
}

#[test]
fn test_delete_reports_the_cascade() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);
    submit_bid(
        &mut store,
        &clock,
        tender_id,
        10,
        bid_request(30_000.0),
        &vendor(10),
        test_cause(),
    )
    .unwrap();
    submit_bid(
        &mut store,
        &clock,
        tender_id,
        11,
        bid_request(31_000.0),
        &vendor(11),
        test_cause(),
    )
    .unwrap();

    let result = delete_tender(
        &mut store,
        &clock,
        tender_id,
        &DeleteTenderRequest {
            confirm_bid_destruction: true,
        },
        &admin(),
        test_cause(),
    )
    .unwrap();

    assert_eq!(result.response.bids_deleted, 2);
    assert!(matches!(
        get_tender(&store, tender_id),
        Err(ApiError::NotFound { .. })
    ));
}

#[test]
fn test_submit_then_resubmit_reports_the_update() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);

    let first = submit_bid(
        &mut store,
        &clock,
        tender_id,
        10,
        bid_request(30_000.0),
        &vendor(10),
        test_cause(),
    )
    .unwrap();
    let second = submit_bid(
        &mut store,
        &clock,
        tender_id,
        10,
        bid_request(28_000.0),
        &vendor(10),
        test_cause(),
    )
    .unwrap();

    assert!(!first.response.updated_existing);
    assert!(second.response.updated_existing);
    assert_eq!(second.response.bid.id, first.response.bid.id);
    assert_eq!(second.response.bid.amount, 28_000.0);
}

#[test]
fn test_submit_after_deadline_maps_to_deadline_passed() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);
    clock.set(datetime!(2026-10-01 00:00 UTC));

    let result = submit_bid(
        &mut store,
        &clock,
        tender_id,
        10,
        bid_request(30_000.0),
        &vendor(10),
        test_cause(),
    );

    match result {
        Err(ApiError::DeadlinePassed { deadline }) => {
            assert!(deadline.starts_with("2026-09-01"));
        }
        other => panic!("Expected DeadlinePassed, got {other:?}"),
    }
}

#[test]
fn test_reject_then_withdraw_surfaces_a_conflict() {
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
    reject_bid(
        &mut store,
        &clock,
        bid_id,
        RejectBidRequest {
            reason: Some(String::from("over budget")),
        },
        &buyer(),
        test_cause(),
    )
    .unwrap();

    let result = withdraw_bid(
        &mut store,
        &clock,
        bid_id,
        WithdrawBidRequest {
            reason: Some(String::from("withdrawing anyway")),
        },
        &vendor(10),
        test_cause(),
    );

    match result {
        Err(ApiError::Conflict { entity, message }) => {
            assert_eq!(entity, "bid");
            assert!(message.contains("rejected"));
        }
        other => panic!("Expected Conflict, got {other:?}"),
    }
}

#[test]
fn test_accept_emits_an_attributed_audit_event() {
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

    let result = accept_bid(&mut store, &clock, bid_id, &buyer(), test_cause()).unwrap();

    assert_eq!(result.response.status, "accepted");
    assert_eq!(result.audit_event.action.name, "AcceptBid");
    assert_eq!(result.audit_event.actor.actor_type, "buyer");
}

#[test]
fn test_list_tenders_paginates() {
    let clock = test_clock();
    let mut store = MemoryStore::new();
    for _ in 0..5 {
        create_tender(&mut store, &clock, create_request(), &buyer(), test_cause()).unwrap();
    }

    let page = list_tenders(&store, ListRequest { page: 2, limit: 2 });

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total, 5);
    assert_eq!(page.items[0].id, 3);
}

#[test]
fn test_list_bids_for_a_tender() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);
    submit_bid(
        &mut store,
        &clock,
        tender_id,
        10,
        bid_request(30_000.0),
        &vendor(10),
        test_cause(),
    )
    .unwrap();

    let page = list_bids(&store, tender_id, ListRequest::default());

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].vendor_id, 10);
}

#[test]
fn test_list_categories_excludes_inactive() {
    let store = MemoryStore::with_categories(
        vec![
            Category {
                id: 1,
                name: String::from("Active"),
                description: String::new(),
                is_active: true,
            },
            Category {
                id: 2,
                name: String::from("Retired"),
                description: String::new(),
                is_active: false,
            },
        ],
        vec![LegacyCategory {
            value: String::from("it_services"),
            label: String::from("IT Services"),
        }],
    );

    let categories = list_categories(&store);

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Active");
}
