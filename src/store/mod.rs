//! # Object Store Module
//!
//! The backing-store seam: a per-name object namespace where each object is
//! a randomly-addressable byte-range stream. The directory layer talks to
//! [`BlobStore`]/[`BlobStream`] only, so any page-blob-style service can be
//! plugged in behind the traits. Two backends ship with the crate: an
//! in-memory one and a local-filesystem one.
//!
//! No transactional or multi-object-atomic guarantees are assumed of a
//! backend; completed writes are as durable as the backend makes them.

pub mod backend;
pub mod errors;
pub mod local;
pub mod memory;

pub use backend::{BlobStore, BlobStream};
pub use errors::{StoreError, StoreResult};
pub use local::LocalStore;
pub use memory::MemoryStore;
