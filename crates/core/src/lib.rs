// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The business-state core of the Procura tender portal.
//!
//! Three lifecycle owners live here:
//!
//! - [`TenderLifecycleManager`] is the only writer of tender status;
//! - [`BidLifecycleManager`] is the only writer of bid status;
//! - [`AttachmentRegistry`] owns the upload-in-progress state of one
//!   attachment batch.
//!
//! Every manager operation validates against current state, applies one
//! transition through the store's compare-and-set write, and returns the
//! updated entity together with an audit event. Nothing here retries and
//! nothing reads the wall clock directly; time arrives through [`Clock`].

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

mod attachments;
mod bids;
mod clock;
mod error;
mod tenders;

#[cfg(test)]
mod tests;

pub use attachments::{AttachmentRegistry, BatchOutcome, UploadFailure, UploadResolution};
pub use bids::{BidLifecycleManager, BidTransition, SubmitOutcome, SubmitResult};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CoreError;
pub use tenders::{
    DeleteConfirmation, DeletionReport, TenderLifecycleManager, TenderPatch, TenderTransition,
};
