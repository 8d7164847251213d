//! Row models for the insect-population analytics queries.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use pestops_core::reporting::DateRange;
use pestops_core::scope::TenantScope;
use pestops_core::types::DbId;

/// Filters for the population analytics queries.
///
/// The date range is mandatory (validated by the caller before any query is
/// issued); location and meeting filters are applied only when present.
#[derive(Debug, Clone)]
pub struct PopulationQuery {
    pub scope: TenantScope,
    pub date_range: DateRange,
    pub location_id: Option<DbId>,
    pub meeting_id: Option<DbId>,
}

/// One point of the daily time series: total detections on a capture date.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub total_insects: i64,
}

/// One bucket of the family distribution.
///
/// The label is the classifier's family name, falling back to the raw
/// species label for detections with no family assigned.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FamilyBucket {
    pub family: String,
    pub total: i64,
}
