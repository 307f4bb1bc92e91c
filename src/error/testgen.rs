use super::AgentError;
use thiserror::Error as ThisError;

/// Fatal outcomes of a test generation run. Per-gap failures never surface here.
#[derive(Debug, ThisError)]
pub enum TestGenError {
    #[error("Coverage analysis failed: {0}")]
    AnalysisFailed(String),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("Coverage analyzer returned malformed gap list: {0}")]
    MalformedGaps(#[from] serde_json::Error),
}
