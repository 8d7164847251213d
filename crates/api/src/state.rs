//! Shared handler state.

use std::sync::Arc;

use crate::config::ServerConfig;

/// State handed to every handler through `State<AppState>`.
///
/// Cloning is cheap: the pool is reference-counted internally and the
/// config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: pestops_db::DbPool,
    pub config: Arc<ServerConfig>,
}
