// Task strings sent to the orchestration service.

/// Task name for per-panel composition design.
pub const COMPOSITION_TASK: &str = "design comic panel composition";

/// Default cap on cooperating agents per orchestration request.
pub const DEFAULT_MAX_AGENTS: u32 = 2;

/// Default per-call timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
