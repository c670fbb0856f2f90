/// Orchestrator client — the single point of entry for remote agent orchestration calls.
///
/// The pipeline never talks to the orchestration service directly; it holds an
/// `Arc<dyn Orchestrator>` injected at startup (`HttpOrchestrator` when a URL is
/// configured, `OfflineOrchestrator` otherwise) so tests can substitute a stub.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Orchestrator returned an empty result")]
    EmptyResult,

    #[error("Orchestrator unavailable: {0}")]
    Unavailable(String),
}

/// Context block of an orchestration request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrchestrationContext {
    pub description: String,
    pub characters: Vec<String>,
    pub action: String,
    pub emotion: String,
    pub style: String,
    pub panel_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrchestrationRequest {
    pub task: String,
    pub context: OrchestrationContext,
    #[serde(rename = "maxAgents")]
    pub max_agents: u32,
    pub timeout_ms: u64,
}

/// Raw orchestration response. `result` is either a JSON object or a string holding JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct OrchestrationResponse {
    #[serde(default)]
    pub result: Value,
}

impl OrchestrationResponse {
    /// Resolves `result` into a JSON value, decoding it first when the service sent a string.
    pub fn payload(&self) -> Result<Value, OrchestratorError> {
        match &self.result {
            Value::Null => Err(OrchestratorError::EmptyResult),
            Value::String(s) if s.trim().is_empty() => Err(OrchestratorError::EmptyResult),
            Value::String(s) => Ok(serde_json::from_str(strip_json_fences(s))?),
            other => Ok(other.clone()),
        }
    }
}

/// Remote agent orchestration capability.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn orchestrate(
        &self,
        request: &OrchestrationRequest,
    ) -> Result<OrchestrationResponse, OrchestratorError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HttpOrchestrator
// ────────────────────────────────────────────────────────────────────────────

/// Talks to the orchestration service over HTTP (`POST {base_url}/orchestrate`).
#[derive(Clone)]
pub struct HttpOrchestrator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpOrchestrator {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, OrchestratorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OrchestratorErrorBody {
    error: String,
}

#[async_trait]
impl Orchestrator for HttpOrchestrator {
    async fn orchestrate(
        &self,
        request: &OrchestrationRequest,
    ) -> Result<OrchestrationResponse, OrchestratorError> {
        let mut builder = self
            .client
            .post(format!("{}/orchestrate", self.base_url))
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OrchestratorErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(OrchestratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OrchestrationResponse = response.json().await?;
        debug!(
            "Orchestration call succeeded for panel {}",
            request.context.panel_number
        );
        Ok(parsed)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OfflineOrchestrator
// ────────────────────────────────────────────────────────────────────────────

/// Used when no orchestration service is configured. Every call fails, so every
/// panel takes the deterministic fallback composition.
#[derive(Debug, Clone, Default)]
pub struct OfflineOrchestrator;

#[async_trait]
impl Orchestrator for OfflineOrchestrator {
    async fn orchestrate(
        &self,
        _request: &OrchestrationRequest,
    ) -> Result<OrchestrationResponse, OrchestratorError> {
        Err(OrchestratorError::Unavailable(
            "ORCHESTRATOR_URL is not configured".to_string(),
        ))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from agent output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_request() -> OrchestrationRequest {
        OrchestrationRequest {
            task: prompts::COMPOSITION_TASK.to_string(),
            context: OrchestrationContext {
                description: "Mara kicks the door open".to_string(),
                characters: vec!["Mara".to_string()],
                action: "kicks".to_string(),
                emotion: "angry".to_string(),
                style: "manga".to_string(),
                panel_number: 3,
            },
            max_agents: 2,
            timeout_ms: 15_000,
        }
    }

    #[test]
    fn test_request_wire_shape() {
        let value = serde_json::to_value(make_request()).unwrap();
        assert_eq!(value["task"], "design comic panel composition");
        assert_eq!(value["maxAgents"], 2);
        assert_eq!(value["timeout_ms"], 15_000);
        assert_eq!(value["context"]["panel_number"], 3);
        assert_eq!(value["context"]["characters"][0], "Mara");
    }

    #[test]
    fn test_payload_from_object() {
        let resp = OrchestrationResponse {
            result: json!({"shotType": "close-up"}),
        };
        assert_eq!(resp.payload().unwrap()["shotType"], "close-up");
    }

    #[test]
    fn test_payload_from_fenced_string() {
        let resp = OrchestrationResponse {
            result: json!("```json\n{\"angle\": \"low-angle\"}\n```"),
        };
        assert_eq!(resp.payload().unwrap()["angle"], "low-angle");
    }

    #[test]
    fn test_payload_missing_result_is_error() {
        let resp: OrchestrationResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(resp.payload(), Err(OrchestratorError::EmptyResult)));
    }

    #[test]
    fn test_payload_garbage_string_is_parse_error() {
        let resp = OrchestrationResponse {
            result: json!("not json at all"),
        };
        assert!(matches!(resp.payload(), Err(OrchestratorError::Parse(_))));
    }

    #[tokio::test]
    async fn test_offline_orchestrator_always_unavailable() {
        let result = OfflineOrchestrator.orchestrate(&make_request()).await;
        assert!(matches!(result, Err(OrchestratorError::Unavailable(_))));
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }
}
