//! Handler for the insect-population analytics endpoint.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pestops_core::types::DbId;
use pestops_core::{reporting, scope};
use pestops_db::models::population::{FamilyBucket, PopulationQuery, SeriesPoint};
use pestops_db::repositories::PopulationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /analytics/insect-population`.
///
/// The date range is mandatory; location and meeting filters are optional.
#[derive(Debug, Deserialize)]
pub struct PopulationParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location_id: Option<DbId>,
    pub meeting_id: Option<DbId>,
}

/// Analytics payload: daily totals plus the family distribution.
#[derive(Debug, Serialize)]
pub struct PopulationData {
    pub series: Vec<SeriesPoint>,
    pub distribution: Vec<FamilyBucket>,
}

/// GET /analytics/insect-population
///
/// Returns the daily detection-count time series (ascending by date) and
/// the per-family totals (descending by total) for the requested range.
/// Both result sets come straight from grouped queries; no client-side
/// merging happens here.
pub async fn get_insect_population(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PopulationParams>,
) -> AppResult<impl IntoResponse> {
    let scope = scope::resolve(&auth.role, auth.company_id)?;
    let date_range = reporting::require_range(params.start_date, params.end_date)?;

    let query = PopulationQuery {
        scope,
        date_range,
        location_id: params.location_id,
        meeting_id: params.meeting_id,
    };

    let series = PopulationRepo::fetch_daily_series(&state.pool, &query).await?;
    let distribution = PopulationRepo::fetch_family_distribution(&state.pool, &query).await?;

    Ok(Json(DataResponse {
        data: PopulationData {
            series,
            distribution,
        },
    }))
}
