use crate::config::Config;
use crate::matching::policy::MatchPolicy;

/// Shared application state injected into all route handlers via Axum
/// extractors. The scoring policy is selected once at startup; everything
/// per-request is request-scoped and immutable after construction.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub policy: MatchPolicy,
}
