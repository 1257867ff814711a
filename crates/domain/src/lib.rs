// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rule validation for the Procura tender portal.
//!
//! This crate is pure: no I/O, no clock access, no storage. It defines the
//! tender and bid entities, their status state machines, the attachment
//! lifecycle union, category resolution, and field-level validation.
//! Everything time- or storage-dependent is injected by callers.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod attachment;
mod bid;
mod category;
mod error;
mod tender;
mod validation;

#[cfg(test)]
mod tests;

pub use attachment::{Attachment, AttachmentOwner, FileMeta};
pub use bid::{Bid, BidDraft, BidStatus};
pub use category::{
    Category, CategoryFields, CategoryTables, DEFAULT_CATEGORY, LegacyCategory, resolve_category,
};
pub use error::DomainError;
pub use tender::{Tender, TenderDraft, TenderStatus};
pub use validation::{
    MIN_PROPOSAL_CHARS, validate_archive_flag, validate_bid_draft, validate_deadline,
    validate_tender_draft,
};
