use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::generation::composition::CompositionSynthesizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Wraps the injected orchestrator (HTTP or offline).
    pub synthesizer: Arc<CompositionSynthesizer>,
    /// Cancelled on shutdown. Each generation request runs on a child token.
    pub shutdown: CancellationToken,
}
