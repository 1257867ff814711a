// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{admin, bid_draft, cause, expect_state_conflict, store_with_open_tender, test_clock, vendor_actor};
use crate::{AttachmentRegistry, BidLifecycleManager, UploadResolution};
use procura_domain::{Attachment, DomainError, FileMeta};
use procura_store::{BidStore, SequentialUploader, StoredFile, UploadService};

fn meta(name: &str) -> FileMeta {
    FileMeta {
        name: name.to_string(),
        size: 2_048,
        mime: String::from("application/pdf"),
    }
}

#[test]
fn test_placeholders_appear_before_any_upload_resolves() {
    let mut registry = AttachmentRegistry::for_bid(1);

    let temp_ids = registry
        .begin_upload(&[meta("spec.pdf"), meta("quote.pdf")])
        .unwrap();

    assert_eq!(temp_ids.len(), 2);
    assert_eq!(registry.attachments().len(), 2);
    assert!(registry.attachments().iter().all(|a| !a.is_uploaded()));
    assert_eq!(registry.attachments()[0].name(), "spec.pdf");
}

#[test]
fn test_batch_with_a_middle_failure_keeps_the_other_two() {
    let mut registry = AttachmentRegistry::for_bid(1);
    let mut uploader = SequentialUploader::failing_on(vec![String::from("quote.pdf")]);

    let outcome = registry
        .upload_batch(
            &[meta("spec.pdf"), meta("quote.pdf"), meta("terms.pdf")],
            &mut uploader,
        )
        .unwrap();

    assert_eq!(outcome.uploaded, 2);
    assert_eq!(outcome.failed(), 1);
    assert_eq!(outcome.failures[0].filename, "quote.pdf");
    // The failed file leaves no residue; the survivors keep their order.
    assert_eq!(registry.attachments().len(), 2);
    assert_eq!(registry.attachments()[0].name(), "spec.pdf");
    assert_eq!(registry.attachments()[1].name(), "terms.pdf");
    assert!(registry.attachments().iter().all(Attachment::is_uploaded));
}

#[test]
fn test_completion_is_reconciled_by_temp_id_not_position() {
    let mut registry = AttachmentRegistry::for_bid(1);
    let mut uploader = SequentialUploader::new();
    let temp_ids = registry
        .begin_upload(&[meta("first.pdf"), meta("second.pdf")])
        .unwrap();

    // The second file's response arrives first.
    let second_stored = uploader.upload(&meta("second.pdf")).unwrap();
    registry
        .complete_upload(&temp_ids[1], Ok(second_stored))
        .unwrap();

    assert!(!registry.attachments()[0].is_uploaded());
    assert!(registry.attachments()[1].is_uploaded());
    assert_eq!(registry.attachments()[1].name(), "second.pdf");
}

#[test]
fn test_failed_completion_discards_the_placeholder() {
    let mut registry = AttachmentRegistry::for_bid(1);
    let temp_ids = registry.begin_upload(&[meta("spec.pdf")]).unwrap();

    let resolution = registry
        .complete_upload(
            &temp_ids[0],
            Err(DomainError::Upload {
                filename: String::from("spec.pdf"),
                reason: String::from("virus scan failed"),
            }),
        )
        .unwrap();

    assert_eq!(
        resolution,
        UploadResolution::Discarded {
            filename: String::from("spec.pdf"),
            reason: String::from("virus scan failed"),
        }
    );
    assert!(registry.attachments().is_empty());
}

#[test]
fn test_completion_for_unknown_temp_id_is_not_found() {
    let mut registry = AttachmentRegistry::for_bid(1);

    let result = registry.complete_upload(
        "tmp-99",
        Ok(StoredFile {
            id: String::from("file-1"),
            filename: String::from("1-spec.pdf"),
            size: 2_048,
            mime: String::from("application/pdf"),
        }),
    );

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[test]
fn test_remove_confirmed_attachment() {
    let mut registry = AttachmentRegistry::for_bid(1);
    let mut uploader = SequentialUploader::new();
    registry
        .upload_batch(&[meta("spec.pdf"), meta("quote.pdf")], &mut uploader)
        .unwrap();
    let id = registry.attachments()[0].server_id().unwrap().to_string();

    let removed = registry.remove(&id).unwrap();

    assert_eq!(removed.name(), "spec.pdf");
    assert_eq!(registry.attachments().len(), 1);
}

#[test]
fn test_remove_of_in_flight_upload_is_a_conflict() {
    let mut registry = AttachmentRegistry::for_bid(1);
    let temp_ids = registry.begin_upload(&[meta("spec.pdf")]).unwrap();

    let result = registry.remove(&temp_ids[0]);

    assert!(matches!(result, Err(DomainError::StateConflict { .. })));
    assert_eq!(registry.attachments().len(), 1);
}

#[test]
fn test_sealed_registry_rejects_new_uploads_and_removal() {
    let mut registry = AttachmentRegistry::for_bid(1);
    let mut uploader = SequentialUploader::new();
    registry
        .upload_batch(&[meta("spec.pdf")], &mut uploader)
        .unwrap();
    let id = registry.attachments()[0].server_id().unwrap().to_string();
    registry.seal();

    assert!(matches!(
        registry.begin_upload(&[meta("late.pdf")]),
        Err(DomainError::StateConflict { .. })
    ));
    assert!(matches!(
        registry.remove(&id),
        Err(DomainError::StateConflict { .. })
    ));
}

#[test]
fn test_sealing_does_not_abandon_in_flight_uploads() {
    let mut registry = AttachmentRegistry::for_bid(1);
    let mut uploader = SequentialUploader::new();
    let temp_ids = registry.begin_upload(&[meta("spec.pdf")]).unwrap();
    registry.seal();

    let stored = uploader.upload(&meta("spec.pdf")).unwrap();
    let resolution = registry.complete_upload(&temp_ids[0], Ok(stored)).unwrap();

    assert_eq!(resolution, UploadResolution::Confirmed);
    assert!(registry.attachments()[0].is_uploaded());
}

#[test]
fn test_into_attachments_refuses_pending_placeholders() {
    let mut registry = AttachmentRegistry::for_bid(1);
    registry.begin_upload(&[meta("spec.pdf")]).unwrap();

    let result = registry.into_attachments();

    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[test]
fn test_tender_batch_registry_reports_its_owner() {
    let registry = AttachmentRegistry::for_tender_batch(7);

    assert_eq!(
        registry.owner(),
        procura_domain::AttachmentOwner::TenderBatch(7)
    );
}

#[test]
fn test_manager_upload_lands_files_on_a_pending_bid() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);
    let mut manager = BidLifecycleManager::new(&mut store, &clock);
    let bid_id = manager
        .submit(tender_id, 10, bid_draft(45_000.0), vendor_actor(10), cause("submit"))
        .unwrap()
        .bid
        .id
        .unwrap();
    let mut uploader = SequentialUploader::new();

    let (transition, outcome) = manager
        .upload_attachments(
            bid_id,
            &[meta("spec.pdf"), meta("quote.pdf")],
            &mut uploader,
            vendor_actor(10),
            cause("upload"),
        )
        .unwrap();

    assert_eq!(outcome.uploaded, 2);
    assert_eq!(outcome.failed(), 0);
    assert_eq!(transition.bid.attachments.len(), 2);
    assert!(transition.bid.attachments.iter().all(Attachment::is_uploaded));
    assert_eq!(transition.audit_event.action.name, "UploadBidAttachments");
}

#[test]
fn test_manager_upload_partial_failure_keeps_only_the_survivors() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);
    let mut manager = BidLifecycleManager::new(&mut store, &clock);
    let bid_id = manager
        .submit(tender_id, 10, bid_draft(45_000.0), vendor_actor(10), cause("submit"))
        .unwrap()
        .bid
        .id
        .unwrap();
    let mut uploader = SequentialUploader::failing_on(vec![String::from("quote.pdf")]);

    let (transition, outcome) = manager
        .upload_attachments(
            bid_id,
            &[meta("spec.pdf"), meta("quote.pdf"), meta("terms.pdf")],
            &mut uploader,
            vendor_actor(10),
            cause("upload"),
        )
        .unwrap();

    assert_eq!(outcome.uploaded, 2);
    assert_eq!(outcome.failures[0].filename, "quote.pdf");
    assert_eq!(transition.bid.attachments.len(), 2);
    assert_eq!(transition.bid.attachments[0].name(), "spec.pdf");
    assert_eq!(transition.bid.attachments[1].name(), "terms.pdf");
}

#[test]
fn test_manager_upload_to_a_resolved_bid_is_sealed_off() {
    let clock = test_clock();
    let (mut store, tender_id) = store_with_open_tender(&clock);
    let mut manager = BidLifecycleManager::new(&mut store, &clock);
    let bid_id = manager
        .submit(tender_id, 10, bid_draft(45_000.0), vendor_actor(10), cause("submit"))
        .unwrap()
        .bid
        .id
        .unwrap();
    manager.accept(bid_id, admin(), cause("accept")).unwrap();
    let mut uploader = SequentialUploader::new();

    let result = manager.upload_attachments(
        bid_id,
        &[meta("late.pdf")],
        &mut uploader,
        vendor_actor(10),
        cause("upload"),
    );

    let reason = expect_state_conflict(result);
    assert!(reason.contains("immutable"));
    assert!(store.bid(bid_id).unwrap().attachments.is_empty());
}
