//! Route definitions for meeting reports.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Report routes, nested under `/reports`.
///
/// ```text
/// GET /pest-analytics -> get_meeting_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/pest-analytics", get(reports::get_meeting_report))
}
