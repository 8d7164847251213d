//! Handler for the meeting report endpoint.
//!
//! Fetches the flat report join for the caller's tenant scope and returns
//! the assembled `Meeting -> Photo -> detections` tree with per-meeting
//! summaries.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use pestops_core::types::DbId;
use pestops_core::{reporting, scope};
use pestops_db::models::report::ReportQuery;
use pestops_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::CountedResponse;
use crate::state::AppState;

/// Query parameters for `GET /reports/pest-analytics`.
///
/// All filters are optional; the date bounds must be provided together.
#[derive(Debug, Deserialize)]
pub struct MeetingReportParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location_id: Option<DbId>,
    pub customer_id: Option<DbId>,
}

/// GET /reports/pest-analytics
///
/// Returns every meeting in scope that has at least one photo, newest
/// meeting first, with deduplicated per-photo detections and summary
/// rollups. Non-admin callers are pinned to their own company.
pub async fn get_meeting_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MeetingReportParams>,
) -> AppResult<impl IntoResponse> {
    let scope = scope::resolve(&auth.role, auth.company_id)?;
    let date_range = reporting::optional_range(params.start_date, params.end_date)?;

    let query = ReportQuery {
        scope,
        date_range,
        location_id: params.location_id,
        customer_id: params.customer_id,
    };

    let reports = ReportRepo::fetch_meeting_reports(&state.pool, &query).await?;

    Ok(Json(CountedResponse {
        count: reports.len(),
        data: reports,
    }))
}
