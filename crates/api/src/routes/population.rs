//! Route definitions for population analytics.

use axum::routing::get;
use axum::Router;

use crate::handlers::population;
use crate::state::AppState;

/// Analytics routes, nested under `/analytics`.
///
/// ```text
/// GET /insect-population -> get_insect_population
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/insect-population", get(population::get_insect_population))
}
