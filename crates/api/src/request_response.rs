// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs.
//!
//! These types are the external contract. They are distinct from domain
//! types: views carry derived fields (display category, the archived
//! flag) that the domain computes rather than stores, and requests carry
//! only what callers may set.

use procura_core::BatchOutcome;
use procura_domain::{
    Attachment, Bid, BidDraft, Category, CategoryTables, FileMeta, Tender, TenderDraft,
    resolve_category,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// API request to create a tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTenderRequest {
    /// The tender title.
    pub title: String,
    /// The tender description.
    pub description: String,
    /// Selected category names. At least one is required.
    pub categories: Vec<String>,
    /// Lower budget bound.
    pub budget_min: Option<f64>,
    /// Upper budget bound.
    pub budget_max: Option<f64>,
    /// Submission deadline. Must be in the future.
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
    /// Whether to publish immediately or save as a draft.
    #[serde(default)]
    pub publish: bool,
}

impl CreateTenderRequest {
    /// Converts this request into a domain draft.
    #[must_use]
    pub fn into_draft(self) -> TenderDraft {
        TenderDraft {
            title: self.title,
            description: self.description,
            categories: self.categories,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            deadline: self.deadline,
            publish: self.publish,
        }
    }
}

/// API request to update a tender. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTenderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<Option<f64>>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<OffsetDateTime>,
    /// A direct status move among draft, open, and closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// API request to delete a tender.
///
/// Deletion is irreversible and destroys every bid on the tender, so the
/// request carries an explicit confirmation flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTenderRequest {
    /// Must be true; the deletion cascade is never implicit.
    pub confirm_bid_destruction: bool,
}

/// API response for a tender deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTenderResponse {
    /// The deleted tender id.
    pub tender_id: i64,
    /// The number of bids destroyed with it.
    pub bids_deleted: u64,
    /// A success message.
    pub message: String,
}

/// API request to submit or update a bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitBidRequest {
    /// The bid amount. Must be positive.
    pub amount: f64,
    /// The proposal text.
    pub proposal: String,
    /// Free-text delivery timeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_timeline: Option<String>,
    /// Confirmed attachments to carry on the bid.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl SubmitBidRequest {
    /// Converts this request into a domain draft.
    #[must_use]
    pub fn into_draft(self) -> BidDraft {
        BidDraft {
            amount: self.amount,
            proposal: self.proposal,
            delivery_timeline: self.delivery_timeline,
            attachments: self.attachments,
        }
    }
}

/// API response for a bid submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitBidResponse {
    /// The bid after the write.
    pub bid: BidView,
    /// True if an existing pending bid was updated instead of creating a
    /// new one.
    pub updated_existing: bool,
    /// A success message.
    pub message: String,
}

/// API request to upload attachment files onto a bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadAttachmentsRequest {
    /// Metadata of the files to upload.
    pub files: Vec<FileMeta>,
}

/// One failed file within an upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFailureView {
    /// The originating filename.
    pub filename: String,
    /// Why the upload failed.
    pub reason: String,
}

/// API response for an attachment upload batch.
///
/// Files succeed or fail independently; the response reports both counts
/// rather than a single verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadAttachmentsResponse {
    /// The bid after the batch resolved.
    pub bid: BidView,
    /// Number of files confirmed by the collaborator.
    pub uploaded: u64,
    /// The files that failed, with their reasons.
    pub failures: Vec<UploadFailureView>,
}

impl UploadAttachmentsResponse {
    /// Builds the response from the bid view and the batch outcome.
    #[must_use]
    pub fn new(bid: BidView, outcome: &BatchOutcome) -> Self {
        Self {
            bid,
            uploaded: outcome.uploaded,
            failures: outcome
                .failures
                .iter()
                .map(|f| UploadFailureView {
                    filename: f.filename.clone(),
                    reason: f.reason.clone(),
                })
                .collect(),
        }
    }
}

/// API request to reject a bid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectBidRequest {
    /// Optional rejection reason, recorded on the audit trail only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// API request to withdraw a bid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawBidRequest {
    /// Optional withdrawal reason, recorded on the bid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Page selection for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

const fn default_page() -> u64 {
    1
}

const fn default_limit() -> u64 {
    20
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// A tender as presented to API consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderView {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// The resolved display category. Always present.
    pub display_category: String,
    /// The selected category names, when the tender uses the list form.
    pub categories: Vec<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
    pub status: String,
    /// Derived from the status. Never stored separately.
    pub is_archived: bool,
    pub created_by: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl TenderView {
    /// Builds a view from a tender, resolving its display category
    /// against the given tables.
    #[must_use]
    pub fn from_tender(tender: Tender, tables: &CategoryTables<'_>) -> Self {
        let display_category = resolve_category(&tender.category_fields, tables);
        Self {
            id: tender.id.unwrap_or_default(),
            title: tender.title,
            description: tender.description,
            display_category,
            categories: tender.category_fields.categories,
            budget_min: tender.budget_min,
            budget_max: tender.budget_max,
            deadline: tender.deadline,
            status: tender.status.as_str().to_string(),
            is_archived: tender.status.is_archived(),
            created_by: tender.created_by,
            created_at: tender.created_at,
            updated_at: tender.updated_at,
        }
    }
}

/// A bid as presented to API consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidView {
    pub id: i64,
    pub tender_id: i64,
    pub vendor_id: i64,
    pub amount: f64,
    pub proposal: String,
    pub delivery_timeline: Option<String>,
    pub attachments: Vec<Attachment>,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub withdrawal_reason: Option<String>,
}

impl From<Bid> for BidView {
    fn from(bid: Bid) -> Self {
        Self {
            id: bid.id.unwrap_or_default(),
            tender_id: bid.tender_id,
            vendor_id: bid.vendor_id,
            amount: bid.amount,
            proposal: bid.proposal,
            delivery_timeline: bid.delivery_timeline,
            attachments: bid.attachments,
            status: bid.status.as_str().to_string(),
            submitted_at: bid.submitted_at,
            updated_at: bid.updated_at,
            withdrawal_reason: bid.withdrawal_reason,
        }
    }
}

/// A managed category as presented to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            is_active: category.is_active,
        }
    }
}
