//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod admin;
mod comments;
mod works;

pub use admin::*;
pub use comments::*;
pub use works::*;
