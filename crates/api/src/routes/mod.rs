pub mod health;
pub mod population;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reports/pest-analytics           meeting report (requires auth)
/// /analytics/insect-population      population analytics (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reports", reports::router())
        .nest("/analytics", population::router())
}
