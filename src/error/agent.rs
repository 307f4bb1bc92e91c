use reqwest::StatusCode;
use thiserror::Error as ThisError;

/// Transport-level failure talking to the agent execution service.
///
/// An agent that ran and reported `success: false` is not an `AgentError`; see
/// `AgentOutcome::Failed`.
#[derive(Debug, ThisError)]
pub enum AgentError {
    #[error("Agent request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Agent service returned status {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("Agent response JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
