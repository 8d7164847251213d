//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project
//! conventions. Use [`DataResponse`] instead of ad-hoc
//! `serde_json::json!({ "data": ... })` to get compile-time type safety and
//! consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "count": N, "data": [T] }` envelope for list endpoints that report
/// how many records they returned.
#[derive(Debug, Serialize)]
pub struct CountedResponse<T: Serialize> {
    pub count: usize,
    pub data: Vec<T>,
}
