// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage and upload collaborator contracts for the Procura tender portal.
//!
//! Persistent storage, file byte storage, and querying are external
//! collaborators of the business-state core. This crate defines the
//! contracts the core consumes: store traits with an optimistic-
//! concurrency obligation, the upload-service trait, and the JSON
//! envelope DTOs of the external contract. It also ships an in-memory
//! implementation used by tests and the development server.
//!
//! The concurrency obligation lives here, not in the core: the core never
//! holds a lock across a suspension point. It reads an entity, validates,
//! and writes back with the status it observed; a conforming store must
//! reject the write if the status moved concurrently.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod envelope;
mod error;
mod memory;
mod store;
mod upload;

pub use envelope::{Collection, Envelope, Pagination};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{BidStore, CascadeReport, CategoryStore, PageRequest, TenderStore};
pub use upload::{SequentialUploader, StoredFile, UploadService};
