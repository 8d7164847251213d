//! Domain logic for the pest-control operations backend.
//!
//! This crate contains no database dependencies; all data is passed in by
//! the caller. The persistence layer lives in `pestops-db`, the HTTP
//! surface in `pestops-api`.

pub mod error;
pub mod reporting;
pub mod roles;
pub mod scope;
pub mod types;
