// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each write operation enforces authorization, invokes the matching
//! lifecycle manager, translates errors into the API contract, and
//! returns the response together with the audit event. Read operations
//! require no authorization.

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    BidView, CategoryView, CreateTenderRequest, DeleteTenderRequest, DeleteTenderResponse,
    ListRequest, RejectBidRequest, SubmitBidRequest, SubmitBidResponse, TenderView,
    UpdateTenderRequest, UploadAttachmentsResponse, WithdrawBidRequest,
};
use crate::upload_policy::UploadPolicy;
use procura_audit::{AuditEvent, Cause};
use procura_core::{
    BidLifecycleManager, Clock, DeleteConfirmation, SubmitOutcome, TenderLifecycleManager,
    TenderPatch,
};
use procura_domain::{Attachment, CategoryTables, FileMeta, TenderStatus};
use procura_store::{BidStore, CategoryStore, Collection, PageRequest, TenderStore, UploadService};
use std::str::FromStr;
use tracing::info;

/// The result of an API operation that includes both the response and
/// the audit event.
///
/// This ensures that successful API operations always produce an audit
/// trail.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
}

/// Creates a tender via the API boundary with authorization.
///
/// # Errors
///
/// Returns an error if the actor is a vendor, or any field validation
/// fails.
pub fn create_tender<S, C>(
    store: &mut S,
    clock: &C,
    request: CreateTenderRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<TenderView>, ApiError>
where
    S: TenderStore + BidStore + CategoryStore,
    C: Clock,
{
    AuthorizationService::authorize_manage_tender(authenticated_actor, "create_tender")?;

    let actor = authenticated_actor.to_audit_actor();
    let transition = TenderLifecycleManager::new(store, clock)
        .create(request.into_draft(), authenticated_actor.id, actor, cause)
        .map_err(translate_core_error)?;

    info!(
        tender_id = transition.tender.id,
        status = %transition.tender.status,
        "tender created"
    );
    Ok(ApiResult {
        response: view_of(store, transition.tender),
        audit_event: transition.audit_event,
    })
}

/// Applies a partial update to a tender via the API boundary.
///
/// # Errors
///
/// Returns an error if the actor is a vendor, the tender is archived,
/// the status move is not permitted, or field validation fails.
pub fn update_tender<S, C>(
    store: &mut S,
    clock: &C,
    tender_id: i64,
    request: UpdateTenderRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<TenderView>, ApiError>
where
    S: TenderStore + BidStore + CategoryStore,
    C: Clock,
{
    AuthorizationService::authorize_manage_tender(authenticated_actor, "update_tender")?;

    let status = match request.status {
        Some(raw) => Some(TenderStatus::from_str(&raw).map_err(translate_domain_error)?),
        None => None,
    };
    let patch = TenderPatch {
        title: request.title,
        description: request.description,
        categories: request.categories,
        budget_min: request.budget_min,
        budget_max: request.budget_max,
        deadline: request.deadline,
        status,
    };

    let actor = authenticated_actor.to_audit_actor();
    let transition = TenderLifecycleManager::new(store, clock)
        .update(tender_id, patch, actor, cause)
        .map_err(translate_core_error)?;

    Ok(ApiResult {
        response: view_of(store, transition.tender),
        audit_event: transition.audit_event,
    })
}

/// Archives a tender via the API boundary.
///
/// Archival is reversible and preserves the tender's bids and audit
/// history.
///
/// # Errors
///
/// Returns an error if the actor is a vendor or the tender is already
/// archived.
pub fn archive_tender<S, C>(
    store: &mut S,
    clock: &C,
    tender_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<TenderView>, ApiError>
where
    S: TenderStore + BidStore + CategoryStore,
    C: Clock,
{
    AuthorizationService::authorize_manage_tender(authenticated_actor, "archive_tender")?;

    let actor = authenticated_actor.to_audit_actor();
    let transition = TenderLifecycleManager::new(store, clock)
        .archive(tender_id, actor, cause)
        .map_err(translate_core_error)?;

    Ok(ApiResult {
        response: view_of(store, transition.tender),
        audit_event: transition.audit_event,
    })
}

/// Restores an archived tender via the API boundary.
///
/// # Errors
///
/// Returns an error if the actor is a vendor or the tender is not
/// archived.
pub fn unarchive_tender<S, C>(
    store: &mut S,
    clock: &C,
    tender_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<TenderView>, ApiError>
where
    S: TenderStore + BidStore + CategoryStore,
    C: Clock,
{
    AuthorizationService::authorize_manage_tender(authenticated_actor, "unarchive_tender")?;

    let actor = authenticated_actor.to_audit_actor();
    let transition = TenderLifecycleManager::new(store, clock)
        .unarchive(tender_id, actor, cause)
        .map_err(translate_core_error)?;

    Ok(ApiResult {
        response: view_of(store, transition.tender),
        audit_event: transition.audit_event,
    })
}

/// Deletes a tender and every bid on it via the API boundary.
///
/// The request must explicitly confirm bid destruction; an unconfirmed
/// request is rejected before anything is read.
///
/// # Errors
///
/// Returns an error if the actor is a vendor, the confirmation flag is
/// false, or the tender does not exist.
pub fn delete_tender<S, C>(
    store: &mut S,
    clock: &C,
    tender_id: i64,
    request: &DeleteTenderRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<DeleteTenderResponse>, ApiError>
where
    S: TenderStore + BidStore + CategoryStore,
    C: Clock,
{
    AuthorizationService::authorize_manage_tender(authenticated_actor, "delete_tender")?;

    if !request.confirm_bid_destruction {
        return Err(ApiError::InvalidInput {
            field: String::from("confirm_bid_destruction"),
            message: String::from(
                "Deleting a tender permanently destroys its bids and must be confirmed",
            ),
        });
    }

    let actor = authenticated_actor.to_audit_actor();
    let report = TenderLifecycleManager::new(store, clock)
        .delete(
            tender_id,
            DeleteConfirmation::DestroyAssociatedBids,
            actor,
            cause,
        )
        .map_err(translate_core_error)?;

    info!(tender_id, bids_deleted = report.bids_deleted, "tender deleted");
    Ok(ApiResult {
        response: DeleteTenderResponse {
            tender_id,
            bids_deleted: report.bids_deleted,
            message: format!(
                "Deleted tender {tender_id} and {} associated bid(s)",
                report.bids_deleted
            ),
        },
        audit_event: report.audit_event,
    })
}

/// Loads a single tender. Read-only; requires no authorization.
///
/// # Errors
///
/// Returns `NotFound` if the tender does not exist.
pub fn get_tender<S>(store: &S, tender_id: i64) -> Result<TenderView, ApiError>
where
    S: TenderStore + CategoryStore,
{
    let tender = store
        .tender(tender_id)
        .map_err(|err| translate_core_error(procura_core::CoreError::from_read(err)))?;
    Ok(view_of(store, tender))
}

/// Lists tenders, paginated. Read-only; requires no authorization.
#[must_use]
pub fn list_tenders<S>(store: &S, request: ListRequest) -> Collection<TenderView>
where
    S: TenderStore + CategoryStore,
{
    let all = store.tenders(PageRequest {
        page: 1,
        limit: u64::MAX,
    });
    let views: Vec<TenderView> = all.into_iter().map(|t| view_of(store, t)).collect();
    Collection::paginate(views, request.page, request.limit)
}

/// Lists the bids on a tender. Read-only; requires no authorization.
#[must_use]
pub fn list_bids<S: BidStore>(store: &S, tender_id: i64, request: ListRequest) -> Collection<BidView> {
    let views: Vec<BidView> = store
        .bids_for_tender(tender_id)
        .into_iter()
        .map(BidView::from)
        .collect();
    Collection::paginate(views, request.page, request.limit)
}

/// Lists the managed categories available for new assignments.
#[must_use]
pub fn list_categories<S: CategoryStore>(store: &S) -> Vec<CategoryView> {
    store
        .active_categories()
        .into_iter()
        .map(CategoryView::from)
        .collect()
}

/// Submits a bid via the API boundary with authorization.
///
/// A vendor who already holds a pending bid on the tender has it updated
/// in place; the response says which happened.
///
/// # Errors
///
/// Returns an error if the actor may not bid as `vendor_id`, the tender
/// is not open, the deadline has passed, the vendor's existing bid is
/// already resolved, an attachment violates the upload policy, or field
/// validation fails.
pub fn submit_bid<S, C>(
    store: &mut S,
    clock: &C,
    tender_id: i64,
    vendor_id: i64,
    request: SubmitBidRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<SubmitBidResponse>, ApiError>
where
    S: TenderStore + BidStore,
    C: Clock,
{
    AuthorizationService::authorize_vendor_action(authenticated_actor, vendor_id, "submit_bid")?;
    admit_attachments(&request.attachments)?;

    let actor = authenticated_actor.to_audit_actor();
    let result = BidLifecycleManager::new(store, clock)
        .submit(tender_id, vendor_id, request.into_draft(), actor, cause)
        .map_err(translate_core_error)?;

    let updated_existing = result.outcome == SubmitOutcome::Updated;
    let message = if updated_existing {
        format!("Updated the existing bid on tender {tender_id}")
    } else {
        format!("Submitted a bid on tender {tender_id}")
    };
    info!(tender_id, vendor_id, updated_existing, "bid submitted");
    Ok(ApiResult {
        response: SubmitBidResponse {
            bid: BidView::from(result.bid),
            updated_existing,
            message,
        },
        audit_event: result.audit_event,
    })
}

/// Updates a pending bid via the API boundary with authorization.
///
/// # Errors
///
/// Returns an error if the actor may not act on the bid, the bid is not
/// pending, the deadline has passed, an attachment violates the upload
/// policy, or field validation fails.
pub fn update_bid<S, C>(
    store: &mut S,
    clock: &C,
    bid_id: i64,
    request: SubmitBidRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<BidView>, ApiError>
where
    S: TenderStore + BidStore,
    C: Clock,
{
    let owner = bid_owner(store, bid_id)?;
    AuthorizationService::authorize_vendor_action(authenticated_actor, owner, "update_bid")?;
    admit_attachments(&request.attachments)?;

    let actor = authenticated_actor.to_audit_actor();
    let transition = BidLifecycleManager::new(store, clock)
        .update(bid_id, request.into_draft(), actor, cause)
        .map_err(translate_core_error)?;

    Ok(ApiResult {
        response: BidView::from(transition.bid),
        audit_event: transition.audit_event,
    })
}

/// Accepts a pending bid via the API boundary with authorization.
///
/// # Errors
///
/// Returns an error if the actor is a vendor or the bid is not pending.
pub fn accept_bid<S, C>(
    store: &mut S,
    clock: &C,
    bid_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<BidView>, ApiError>
where
    S: TenderStore + BidStore,
    C: Clock,
{
    AuthorizationService::authorize_resolve_bid(authenticated_actor, "accept_bid")?;

    let actor = authenticated_actor.to_audit_actor();
    let transition = BidLifecycleManager::new(store, clock)
        .accept(bid_id, actor, cause)
        .map_err(translate_core_error)?;

    Ok(ApiResult {
        response: BidView::from(transition.bid),
        audit_event: transition.audit_event,
    })
}

/// Rejects a pending bid via the API boundary with authorization.
///
/// The optional reason is recorded on the audit trail only; the bid
/// itself carries no rejection reason.
///
/// # Errors
///
/// Returns an error if the actor is a vendor or the bid is not pending.
pub fn reject_bid<S, C>(
    store: &mut S,
    clock: &C,
    bid_id: i64,
    request: RejectBidRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<BidView>, ApiError>
where
    S: TenderStore + BidStore,
    C: Clock,
{
    AuthorizationService::authorize_resolve_bid(authenticated_actor, "reject_bid")?;

    let actor = authenticated_actor.to_audit_actor();
    let transition = BidLifecycleManager::new(store, clock)
        .reject(bid_id, request.reason, actor, cause)
        .map_err(translate_core_error)?;

    Ok(ApiResult {
        response: BidView::from(transition.bid),
        audit_event: transition.audit_event,
    })
}

/// Withdraws a pending bid via the API boundary with authorization.
///
/// # Errors
///
/// Returns an error if the actor may not act on the bid or the bid is
/// not pending.
pub fn withdraw_bid<S, C>(
    store: &mut S,
    clock: &C,
    bid_id: i64,
    request: WithdrawBidRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<BidView>, ApiError>
where
    S: TenderStore + BidStore,
    C: Clock,
{
    let owner = bid_owner(store, bid_id)?;
    AuthorizationService::authorize_vendor_action(authenticated_actor, owner, "withdraw_bid")?;

    let actor = authenticated_actor.to_audit_actor();
    let transition = BidLifecycleManager::new(store, clock)
        .withdraw(bid_id, request.reason, actor, cause)
        .map_err(translate_core_error)?;

    Ok(ApiResult {
        response: BidView::from(transition.bid),
        audit_event: transition.audit_event,
    })
}

/// Uploads attachment files onto a pending bid via the API boundary.
///
/// Every file must pass the upload policy before any placeholder is
/// created, so a file that can never be accepted is rejected without
/// touching the bid. Admitted files then succeed or fail independently
/// at the collaborator.
///
/// # Errors
///
/// Returns an error if the actor may not act on the bid, a file violates
/// the upload policy, the bid is not pending, or the deadline has
/// passed.
pub fn upload_bid_attachments<S, C, U>(
    store: &mut S,
    clock: &C,
    uploader: &mut U,
    bid_id: i64,
    files: &[FileMeta],
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<UploadAttachmentsResponse>, ApiError>
where
    S: TenderStore + BidStore,
    C: Clock,
    U: UploadService,
{
    let owner = bid_owner(store, bid_id)?;
    AuthorizationService::authorize_vendor_action(
        authenticated_actor,
        owner,
        "upload_bid_attachments",
    )?;

    let policy = UploadPolicy::default();
    for file in files {
        policy.validate(file).map_err(|err| ApiError::UploadRejected {
            filename: file.name.clone(),
            reason: err.to_string(),
        })?;
    }

    let actor = authenticated_actor.to_audit_actor();
    let (transition, outcome) = BidLifecycleManager::new(store, clock)
        .upload_attachments(bid_id, files, uploader, actor, cause)
        .map_err(translate_core_error)?;

    info!(
        bid_id,
        uploaded = outcome.uploaded,
        failed = outcome.failed(),
        "bid attachments uploaded"
    );
    Ok(ApiResult {
        response: UploadAttachmentsResponse::new(BidView::from(transition.bid), &outcome),
        audit_event: transition.audit_event,
    })
}

/// Removes a confirmed attachment from a pending bid via the API
/// boundary with authorization.
///
/// # Errors
///
/// Returns an error if the actor may not act on the bid, the bid is not
/// pending, or the attachment does not exist.
pub fn remove_bid_attachment<S, C>(
    store: &mut S,
    clock: &C,
    bid_id: i64,
    attachment_id: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<BidView>, ApiError>
where
    S: TenderStore + BidStore,
    C: Clock,
{
    let owner = bid_owner(store, bid_id)?;
    AuthorizationService::authorize_vendor_action(
        authenticated_actor,
        owner,
        "remove_bid_attachment",
    )?;

    let actor = authenticated_actor.to_audit_actor();
    let transition = BidLifecycleManager::new(store, clock)
        .remove_attachment(bid_id, attachment_id, actor, cause)
        .map_err(translate_core_error)?;

    Ok(ApiResult {
        response: BidView::from(transition.bid),
        audit_event: transition.audit_event,
    })
}

/// Checks already-confirmed attachments arriving on a bid payload
/// against the upload policy, so the policy cannot be bypassed by
/// submitting pre-confirmed metadata.
fn admit_attachments(attachments: &[Attachment]) -> Result<(), ApiError> {
    let policy = UploadPolicy::default();
    for attachment in attachments {
        let file = FileMeta {
            name: attachment.name().to_string(),
            size: attachment.size(),
            mime: attachment.mime().to_string(),
        };
        policy.validate(&file).map_err(|err| ApiError::UploadRejected {
            filename: file.name.clone(),
            reason: err.to_string(),
        })?;
    }
    Ok(())
}

fn bid_owner<S: BidStore>(store: &S, bid_id: i64) -> Result<i64, ApiError> {
    let bid = store
        .bid(bid_id)
        .map_err(|err| translate_core_error(procura_core::CoreError::from_read(err)))?;
    Ok(bid.vendor_id)
}

fn view_of<S: CategoryStore>(store: &S, tender: procura_domain::Tender) -> TenderView {
    let managed = store.categories();
    let legacy = store.legacy_categories();
    let tables = CategoryTables {
        managed: &managed,
        legacy: &legacy,
    };
    TenderView::from_tender(tender, &tables)
}
