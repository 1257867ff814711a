// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory store used by tests and the development server.
//!
//! Honors the same contract as a real backend: compare-and-set status
//! writes and atomic cascading deletion.

use crate::error::StoreError;
use crate::store::{BidStore, CascadeReport, CategoryStore, PageRequest, TenderStore};
use procura_domain::{Bid, BidStatus, Category, LegacyCategory, Tender, TenderStatus};
use std::collections::BTreeMap;
use tracing::debug;

/// An in-memory implementation of the store traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tenders: BTreeMap<i64, Tender>,
    bids: BTreeMap<i64, Bid>,
    categories: Vec<Category>,
    legacy: Vec<LegacyCategory>,
    next_tender_id: i64,
    next_bid_id: i64,
}

impl MemoryStore {
    /// Creates an empty store with no category tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with category tables.
    #[must_use]
    pub fn with_categories(categories: Vec<Category>, legacy: Vec<LegacyCategory>) -> Self {
        Self {
            categories,
            legacy,
            ..Self::default()
        }
    }
}

impl TenderStore for MemoryStore {
    fn insert_tender(&mut self, mut tender: Tender) -> Result<Tender, StoreError> {
        self.next_tender_id += 1;
        let id = self.next_tender_id;
        tender.id = Some(id);
        debug!(tender_id = id, status = %tender.status, "inserting tender");
        self.tenders.insert(id, tender.clone());
        Ok(tender)
    }

    fn tender(&self, id: i64) -> Result<Tender, StoreError> {
        self.tenders.get(&id).cloned().ok_or(StoreError::NotFound {
            resource: String::from("tender"),
            id,
        })
    }

    fn update_tender(
        &mut self,
        expected_status: TenderStatus,
        tender: Tender,
    ) -> Result<Tender, StoreError> {
        let id = tender.id.ok_or(StoreError::MissingId {
            resource: String::from("tender"),
        })?;
        let stored = self.tenders.get(&id).ok_or(StoreError::NotFound {
            resource: String::from("tender"),
            id,
        })?;
        if stored.status != expected_status {
            return Err(StoreError::StatusMoved {
                resource: String::from("tender"),
                id,
                expected: expected_status.as_str().to_string(),
                actual: stored.status.as_str().to_string(),
            });
        }
        debug!(tender_id = id, status = %tender.status, "updating tender");
        self.tenders.insert(id, tender.clone());
        Ok(tender)
    }

    fn tenders(&self, page: PageRequest) -> Vec<Tender> {
        // BTreeMap iteration is already id-ordered.
        let start = page.page.saturating_sub(1).saturating_mul(page.limit);
        self.tenders
            .values()
            .skip(usize::try_from(start).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    fn delete_tender_cascading(&mut self, id: i64) -> Result<CascadeReport, StoreError> {
        let tender = self.tenders.remove(&id).ok_or(StoreError::NotFound {
            resource: String::from("tender"),
            id,
        })?;
        let before = self.bids.len();
        self.bids.retain(|_, bid| bid.tender_id != id);
        let bids_deleted = (before - self.bids.len()) as u64;
        debug!(tender_id = id, bids_deleted, "deleted tender with cascade");
        Ok(CascadeReport {
            tender,
            bids_deleted,
        })
    }
}

impl BidStore for MemoryStore {
    fn insert_bid(&mut self, mut bid: Bid) -> Result<Bid, StoreError> {
        self.next_bid_id += 1;
        let id = self.next_bid_id;
        bid.id = Some(id);
        debug!(bid_id = id, tender_id = bid.tender_id, "inserting bid");
        self.bids.insert(id, bid.clone());
        Ok(bid)
    }

    fn bid(&self, id: i64) -> Result<Bid, StoreError> {
        self.bids.get(&id).cloned().ok_or(StoreError::NotFound {
            resource: String::from("bid"),
            id,
        })
    }

    fn update_bid(&mut self, expected_status: BidStatus, bid: Bid) -> Result<Bid, StoreError> {
        let id = bid.id.ok_or(StoreError::MissingId {
            resource: String::from("bid"),
        })?;
        let stored = self.bids.get(&id).ok_or(StoreError::NotFound {
            resource: String::from("bid"),
            id,
        })?;
        if stored.status != expected_status {
            return Err(StoreError::StatusMoved {
                resource: String::from("bid"),
                id,
                expected: expected_status.as_str().to_string(),
                actual: stored.status.as_str().to_string(),
            });
        }
        debug!(bid_id = id, status = %bid.status, "updating bid");
        self.bids.insert(id, bid.clone());
        Ok(bid)
    }

    fn bid_for_vendor(&self, tender_id: i64, vendor_id: i64) -> Option<Bid> {
        self.bids
            .values()
            .find(|bid| bid.tender_id == tender_id && bid.vendor_id == vendor_id)
            .cloned()
    }

    fn bids_for_tender(&self, tender_id: i64) -> Vec<Bid> {
        self.bids
            .values()
            .filter(|bid| bid.tender_id == tender_id)
            .cloned()
            .collect()
    }

    fn bid_count(&self, tender_id: i64) -> u64 {
        self.bids
            .values()
            .filter(|bid| bid.tender_id == tender_id)
            .count() as u64
    }
}

impl CategoryStore for MemoryStore {
    fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    fn legacy_categories(&self) -> Vec<LegacyCategory> {
        self.legacy.clone()
    }
}
