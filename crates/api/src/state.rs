use std::sync::Arc;

use agenda_core::rate_limit::RateLimits;
use agenda_voice::VoiceAgentProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: agenda_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-identifier request limiters.
    pub rate_limits: Arc<RateLimits>,
    /// Voice-AI phone agent provider.
    pub voice: Arc<dyn VoiceAgentProvider>,
}
