//! Persistence for the work collection.
//!
//! A single JSON document on disk is the source of truth; the repository owns
//! an in-memory index of it and serializes all mutations.

mod document;
mod repository;

pub use document::*;
pub use repository::*;
