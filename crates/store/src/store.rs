// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store traits consumed by the lifecycle managers.
//!
//! Status-changing writes are compare-and-set on the status the writer
//! observed. Cascading deletion is a single logical operation: the count
//! and the delete happen inside one store call, all-or-nothing.

use crate::error::StoreError;
use procura_domain::{Bid, BidStatus, Category, LegacyCategory, Tender, TenderStatus};

/// A page selector for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// The result of an atomic cascading tender deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeReport {
    /// The tender that was removed.
    pub tender: Tender,
    /// The number of bids destroyed with it.
    pub bids_deleted: u64,
}

/// Persistence contract for tenders.
pub trait TenderStore {
    /// Inserts a new tender, assigning its canonical id.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store rejects the write.
    fn insert_tender(&mut self, tender: Tender) -> Result<Tender, StoreError>;

    /// Loads a tender by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the tender does not exist.
    fn tender(&self, id: i64) -> Result<Tender, StoreError>;

    /// Writes a tender back, rejecting the write if the stored status is
    /// no longer `expected_status`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StatusMoved` on concurrent modification,
    /// `StoreError::NotFound` if the tender vanished, or
    /// `StoreError::MissingId` if the tender has no id.
    fn update_tender(
        &mut self,
        expected_status: TenderStatus,
        tender: Tender,
    ) -> Result<Tender, StoreError>;

    /// Lists tenders ordered by id.
    fn tenders(&self, page: PageRequest) -> Vec<Tender>;

    /// Atomically removes a tender and every bid referencing it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the tender does not exist; in
    /// that case nothing is deleted.
    fn delete_tender_cascading(&mut self, id: i64) -> Result<CascadeReport, StoreError>;
}

/// Persistence contract for bids.
pub trait BidStore {
    /// Inserts a new bid, assigning its canonical id.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store rejects the write.
    fn insert_bid(&mut self, bid: Bid) -> Result<Bid, StoreError>;

    /// Loads a bid by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the bid does not exist.
    fn bid(&self, id: i64) -> Result<Bid, StoreError>;

    /// Writes a bid back, rejecting the write if the stored status is no
    /// longer `expected_status`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StatusMoved` on concurrent modification,
    /// `StoreError::NotFound` if the bid vanished, or
    /// `StoreError::MissingId` if the bid has no id.
    fn update_bid(&mut self, expected_status: BidStatus, bid: Bid) -> Result<Bid, StoreError>;

    /// Finds the bid a vendor holds against a tender, if any.
    fn bid_for_vendor(&self, tender_id: i64, vendor_id: i64) -> Option<Bid>;

    /// Lists all bids against a tender, ordered by id.
    fn bids_for_tender(&self, tender_id: i64) -> Vec<Bid>;

    /// Counts the bids against a tender.
    fn bid_count(&self, tender_id: i64) -> u64;
}

/// Persistence contract for category tables.
pub trait CategoryStore {
    /// All managed category records.
    fn categories(&self) -> Vec<Category>;

    /// The injected legacy value/label table.
    fn legacy_categories(&self) -> Vec<LegacyCategory>;

    /// Managed categories available for new assignments.
    fn active_categories(&self) -> Vec<Category> {
        self.categories()
            .into_iter()
            .filter(|c| c.is_active)
            .collect()
    }
}
