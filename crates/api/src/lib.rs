// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Procura tender portal.
//!
//! Every operation here enforces authorization before touching the core,
//! translates core and domain errors into the API error contract, and
//! returns the audit event alongside the response so callers always have
//! an attribution trail.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod error;
mod operations;
mod request_response;
mod upload_policy;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{ApiError, AuthError};
pub use operations::{
    ApiResult, accept_bid, archive_tender, create_tender, delete_tender, get_tender, list_bids,
    list_categories, list_tenders, reject_bid, remove_bid_attachment, submit_bid, unarchive_tender,
    update_bid, update_tender, upload_bid_attachments, withdraw_bid,
};
pub use request_response::{
    BidView, CategoryView, CreateTenderRequest, DeleteTenderRequest, DeleteTenderResponse,
    ListRequest, RejectBidRequest, SubmitBidRequest, SubmitBidResponse, TenderView,
    UpdateTenderRequest, UploadAttachmentsRequest, UploadAttachmentsResponse, UploadFailureView,
    WithdrawBidRequest,
};
pub use upload_policy::{UploadPolicy, UploadPolicyError};
