//! Data models for the showcase backend.
//!
//! Wire names match the JSON document and frontend exactly, including the
//! historical `realName` casing.

mod comment;
mod work;

pub use comment::*;
pub use work::*;

/// Default identity for unauthenticated callers.
pub(crate) fn anonymous_user() -> String {
    "anonymous".to_string()
}
